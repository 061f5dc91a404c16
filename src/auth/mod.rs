//! Login, registration and password-reset flows plus the session they produce.

pub mod claims;
pub mod dto;
pub mod services;
pub mod session;

pub use dto::{
    AuthResponse, ForgotPasswordForm, LoginForm, PublicUser, RegisterForm, ResetPasswordForm,
    ResetRequested,
};
pub use session::Session;
