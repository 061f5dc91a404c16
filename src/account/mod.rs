//! Profile settings of the logged-in user.

pub mod dto;
pub mod services;

pub use dto::AccountUpdateForm;
