//! Public contact form.

pub mod dto;
pub mod services;

pub use dto::ContactForm;
