//! Client library for the FOX-Reviews directory and reviews API: form schemas,
//! a typed HTTP client, submission status tracking and billing redirects.

pub mod account;
pub mod api;
pub mod auth;
pub mod billing;
pub mod company;
pub mod config;
pub mod contact;
pub mod error;
pub mod posts;
pub mod reviews;
pub mod search;
pub mod state;
pub mod submission;
pub mod validation;

pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use state::AppContext;
pub use validation::{FieldError, FieldErrors, Schema};
