//! Form schemas: field-level error model and the `Schema` trait every form implements.
//!
//! A schema never fails past its boundary: `parse` hands back either the
//! normalized form or the list of `(field, message)` pairs that rejected it.

pub mod rules;

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// One rejected field with the message shown next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered list of field errors. Empty means the record was accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// True when at least one error is attached to `field`.
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Messages attached to `field`, in order.
    pub fn messages_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Distinct field names carrying errors, sorted.
    pub fn fields(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.0.iter().map(|e| e.field.as_str()).collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    fn sort(&mut self) {
        self.0.sort_by(|a, b| a.field.cmp(&b.field));
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            for err in errs.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                out.push(field.to_string(), message);
            }
        }
        out.sort();
        out
    }
}

/// A form record with declarative field rules plus optional cross-field checks.
pub trait Schema: Validate + Sized {
    /// Normalize raw input before any rule runs (trim, lower-case, blank to absent).
    fn sanitize(&mut self) {}

    /// Rules spanning several fields that the declarative attributes cannot express.
    fn check(&self, _errors: &mut FieldErrors) {}

    /// Validate and return the normalized record, or every field error found.
    fn parse(mut self) -> Result<Self, FieldErrors> {
        self.sanitize();
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(e),
        };
        self.check(&mut errors);
        if errors.is_empty() {
            Ok(self)
        } else {
            errors.sort();
            Err(errors)
        }
    }
}

/// Trim in place and turn blank strings into `None`.
pub(crate) fn blank_to_none(value: &mut Option<String>) {
    if let Some(v) = value.take() {
        let trimmed = v.trim();
        if !trimmed.is_empty() {
            *value = Some(trimmed.to_string());
        }
    }
}

pub(crate) fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}
