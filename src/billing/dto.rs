use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use url::Url;
use validator::{Validate, ValidationError};

use crate::validation::rules::{validate_duration_months, validate_required_url};
use crate::validation::{trim_in_place, FieldErrors, Schema};

/// Subscription tiers sold through checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Basic,
    Pro,
    Premium,
}

impl Plan {
    pub const ALL: [Plan; 3] = [Plan::Basic, Plan::Pro, Plan::Premium];

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Basic => "basic",
            Plan::Pro => "pro",
            Plan::Premium => "premium",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Plan::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown plan: {s}"))
    }
}

fn validate_plan(plan: &str) -> Result<(), ValidationError> {
    if plan.parse::<Plan>().is_ok() {
        Ok(())
    } else {
        let mut err = ValidationError::new("plan");
        err.message = Some("Formule inconnue (basic, pro ou premium)".into());
        Err(err)
    }
}

/// Raw checkout form. Duration arrives as a JSON number and may not be whole.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckoutForm {
    #[validate(custom(function = "validate_plan"))]
    pub plan: String,
    #[validate(custom(function = "validate_duration_months"))]
    pub duration_months: f64,
    #[validate(custom(function = "validate_required_url"))]
    pub success_url: String,
    #[validate(custom(function = "validate_required_url"))]
    pub cancel_url: String,
}

impl Schema for CheckoutForm {
    fn sanitize(&mut self) {
        self.plan = self.plan.trim().to_lowercase();
        trim_in_place(&mut self.success_url);
        trim_in_place(&mut self.cancel_url);
    }
}

impl CheckoutForm {
    /// Validates and converts into the typed request sent to the API.
    pub fn into_request(self) -> Result<CheckoutRequest, FieldErrors> {
        let form = self.parse()?;
        let plan = form.plan.parse::<Plan>().map_err(|e| {
            let mut errors = FieldErrors::new();
            errors.push("plan", e);
            errors
        })?;
        Ok(CheckoutRequest {
            plan,
            duration_months: form.duration_months as u8,
            success_url: form.success_url,
            cancel_url: form.cancel_url,
        })
    }
}

/// Validated checkout request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub plan: Plan,
    pub duration_months: u8,
    pub success_url: String,
    pub cancel_url: String,
}

/// Hosted checkout page to redirect to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub url: Url,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortalRequest {
    pub return_url: String,
}

/// Hosted billing-management page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalSession {
    pub url: Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    PastDue,
    Canceled,
    Incomplete,
    #[serde(other)]
    Unknown,
}

impl SubscriptionStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, SubscriptionStatus::Active | SubscriptionStatus::Trialing)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub plan: Plan,
    pub status: SubscriptionStatus,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub current_period_end: Option<OffsetDateTime>,
    #[serde(default)]
    pub cancel_at_period_end: bool,
}
