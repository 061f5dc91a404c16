use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::rules::{validate_accepted, validate_password_strength};
use crate::validation::{trim_in_place, Schema};

/// Login form. Only presence is checked on the password; the server decides the rest.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(
        length(min = 1, message = "L'email est requis"),
        email(message = "Adresse email invalide")
    )]
    pub username: String,
    #[validate(length(min = 1, message = "Le mot de passe est requis"))]
    pub password: String,
}

impl Schema for LoginForm {
    fn sanitize(&mut self) {
        self.username = self.username.trim().to_lowercase();
    }
}

/// Account creation form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(
        length(min = 1, message = "L'email est requis"),
        email(message = "Adresse email invalide")
    )]
    pub email: String,
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Les mots de passe ne correspondent pas"))]
    #[serde(skip_serializing)]
    pub confirm_password: String,
    #[validate(length(min = 2, max = 50, message = "Le prénom doit contenir entre 2 et 50 caractères"))]
    pub first_name: String,
    #[validate(length(min = 2, max = 50, message = "Le nom doit contenir entre 2 et 50 caractères"))]
    pub last_name: String,
    #[validate(custom(function = "validate_accepted"))]
    #[serde(default)]
    pub accept_terms: bool,
}

impl Schema for RegisterForm {
    fn sanitize(&mut self) {
        self.email = self.email.trim().to_lowercase();
        trim_in_place(&mut self.first_name);
        trim_in_place(&mut self.last_name);
    }
}

/// "Forgot password" request form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordForm {
    #[validate(
        length(min = 1, message = "L'email est requis"),
        email(message = "Adresse email invalide")
    )]
    pub email: String,
}

impl Schema for ForgotPasswordForm {
    fn sanitize(&mut self) {
        self.email = self.email.trim().to_lowercase();
    }
}

/// New password chosen from the link sent by email.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordForm {
    #[validate(length(min = 1, message = "Lien de réinitialisation invalide"))]
    pub token: String,
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Les mots de passe ne correspondent pas"))]
    pub confirm_password: String,
}

impl Schema for ResetPasswordForm {
    fn sanitize(&mut self) {
        trim_in_place(&mut self.token);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Returned by login, register and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: PublicUser,
}

/// Public part of the user returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// What the "forgot password" page shows once the request settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetRequested {
    /// Same outcome whether or not the address belongs to an account.
    EmailSentIfAccountExists,
}

impl ResetRequested {
    pub fn message(&self) -> &'static str {
        match self {
            ResetRequested::EmailSentIfAccountExists => {
                "Si un compte existe pour cette adresse, un email de réinitialisation a été envoyé."
            }
        }
    }
}
