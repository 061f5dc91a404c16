//! Status of a form submission: `idle -> sending -> success | error`.
//!
//! A form instance handles at most one in-flight submission; `can_submit`
//! mirrors whether its submit control is enabled.

use std::future::Future;

use thiserror::Error;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::validation::{FieldErrors, Schema};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Sending,
    Success,
    Error {
        message: String,
        fields: FieldErrors,
    },
}

/// A submit attempt the current status does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("the form was already submitted successfully")]
    AlreadySucceeded,
}

/// What `Submission::run` ended with.
#[derive(Debug)]
pub enum Outcome<T> {
    Done(T),
    Invalid(FieldErrors),
    Failed(ApiError),
    Refused(TransitionError),
}

impl<T> Outcome<T> {
    pub fn ok(self) -> Option<T> {
        match self {
            Outcome::Done(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Submission {
    status: SubmissionStatus,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn can_submit(&self) -> bool {
        matches!(self.status, SubmissionStatus::Idle | SubmissionStatus::Error { .. })
    }

    pub fn is_sending(&self) -> bool {
        self.status == SubmissionStatus::Sending
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            SubmissionStatus::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match &self.status {
            SubmissionStatus::Error { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// `idle | error -> sending`.
    pub fn begin(&mut self) -> Result<(), TransitionError> {
        match self.status {
            SubmissionStatus::Sending => Err(TransitionError::InFlight),
            SubmissionStatus::Success => Err(TransitionError::AlreadySucceeded),
            SubmissionStatus::Idle | SubmissionStatus::Error { .. } => {
                self.status = SubmissionStatus::Sending;
                Ok(())
            }
        }
    }

    pub fn succeed(&mut self) {
        self.status = SubmissionStatus::Success;
    }

    pub fn fail(&mut self, err: &ApiError) {
        let fields = err.field_errors().cloned().unwrap_or_default();
        self.status = SubmissionStatus::Error {
            message: err.user_message(),
            fields,
        };
    }

    /// Local validation failure: straight to `error`, the network is never involved.
    pub fn reject(&mut self, fields: FieldErrors) {
        self.status = SubmissionStatus::Error {
            message: ApiError::Invalid(FieldErrors::new()).user_message(),
            fields,
        };
    }

    /// Validates `form`, and only if it passes moves to `sending` and awaits `call`.
    pub async fn run<S, T, F, Fut>(&mut self, form: S, call: F) -> Outcome<T>
    where
        S: Schema,
        F: FnOnce(S) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        if !self.can_submit() {
            let refused = match self.status {
                SubmissionStatus::Success => TransitionError::AlreadySucceeded,
                _ => TransitionError::InFlight,
            };
            return Outcome::Refused(refused);
        }

        let form = match form.parse() {
            Ok(form) => form,
            Err(fields) => {
                debug!(fields = %fields, "form rejected locally");
                self.reject(fields.clone());
                return Outcome::Invalid(fields);
            }
        };

        if let Err(e) = self.begin() {
            return Outcome::Refused(e);
        }

        match call(form).await {
            Ok(value) => {
                self.succeed();
                Outcome::Done(value)
            }
            Err(ApiError::Invalid(fields)) => {
                self.reject(fields.clone());
                Outcome::Invalid(fields)
            }
            Err(e) => {
                warn!(error = %e, "submission failed");
                self.fail(&e);
                Outcome::Failed(e)
            }
        }
    }
}
