//! Subscription, hosted checkout and the billing-portal redirect.

pub mod dto;
pub mod portal;
pub mod routes;
pub mod services;

pub use dto::{
    CheckoutForm, CheckoutRequest, CheckoutSession, Plan, PortalSession, Subscription,
    SubscriptionStatus,
};
pub use portal::PortalRedirector;
