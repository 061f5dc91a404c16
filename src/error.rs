use reqwest::StatusCode;
use thiserror::Error;

use crate::validation::FieldErrors;

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

/// Everything a client call can fail with. Validation failures are data, not panics.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected locally before any request was sent.
    #[error("invalid form: {0}")]
    Invalid(FieldErrors),

    /// The API answered with a non-success status.
    #[error("request rejected ({status}): {message}")]
    Rejected {
        status: StatusCode,
        message: String,
        fields: FieldErrors,
    },

    #[error("authentication required")]
    Unauthorized,

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response payload: {0}")]
    Decode(String),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    pub fn rejected(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError::Rejected {
            status,
            message: message.into(),
            fields: FieldErrors::new(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Field errors carried by the failure, local or server side.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Invalid(fields) => Some(fields),
            ApiError::Rejected { fields, .. } if !fields.is_empty() => Some(fields),
            _ => None,
        }
    }

    /// The single message shown to the user when a submission fails.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Invalid(_) => "Veuillez corriger les champs en erreur.".into(),
            ApiError::Rejected { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Rejected { status, .. } if status.is_server_error() => {
                "Le service est momentanément indisponible. Réessayez plus tard.".into()
            }
            ApiError::Rejected { .. } => "La requête a été refusée.".into(),
            ApiError::Unauthorized => "Votre session a expiré, veuillez vous reconnecter.".into(),
            ApiError::Transport(_) => {
                "Impossible de joindre le serveur. Vérifiez votre connexion.".into()
            }
            ApiError::Decode(_) | ApiError::Url(_) => "Une erreur inattendue est survenue.".into(),
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Invalid(errors)
    }
}
