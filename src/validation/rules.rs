//! Field rules shared by several schemas. Each `validate_*` function plugs into
//! `#[validate(custom(function = ...))]`; the `is_*` predicates are usable on their own.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use url::Url;
use validator::ValidationError;

pub const PASSWORD_MIN_LEN: usize = 8;
pub const MIN_DURATION_MONTHS: f64 = 1.0;
pub const MAX_DURATION_MONTHS: f64 = 12.0;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    // 0X XX XX XX XX, +33 X XX XX XX XX, 0033..., separators: space, dot, dash
    static ref PHONE_FR_RE: Regex =
        Regex::new(r"^(?:(?:\+|00)33|0)\s*[1-9](?:[\s.\-]*[0-9]{2}){4}$").unwrap();
    static ref SIRET_RE: Regex = Regex::new(r"^[0-9]{14}$").unwrap();
    static ref POSTAL_CODE_FR_RE: Regex = Regex::new(r"^[0-9]{5}$").unwrap();
}

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_phone_fr(phone: &str) -> bool {
    PHONE_FR_RE.is_match(phone.trim())
}

pub fn is_valid_siret(siret: &str) -> bool {
    SIRET_RE.is_match(siret)
}

pub fn is_valid_postal_code_fr(code: &str) -> bool {
    POSTAL_CODE_FR_RE.is_match(code)
}

/// Absolute http(s) URL with a host.
pub fn is_valid_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

pub fn is_url_or_empty(value: &str) -> bool {
    value.is_empty() || is_valid_url(value)
}

/// Password strength: length plus upper, lower and digit classes.
pub fn password_problems(password: &str) -> Vec<&'static str> {
    let mut problems = Vec::new();
    if password.chars().count() < PASSWORD_MIN_LEN {
        problems.push("Le mot de passe doit contenir au moins 8 caractères");
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        problems.push("Le mot de passe doit contenir au moins une majuscule");
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        problems.push("Le mot de passe doit contenir au moins une minuscule");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        problems.push("Le mot de passe doit contenir au moins un chiffre");
    }
    problems
}

pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    match password_problems(password).first() {
        None => Ok(()),
        Some(message) => Err(rule_error("password_strength", message)),
    }
}

pub fn validate_email_or_empty(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() || is_valid_email(email) {
        Ok(())
    } else {
        Err(rule_error("email", "Adresse email invalide"))
    }
}

pub fn validate_phone_fr(phone: &str) -> Result<(), ValidationError> {
    if is_valid_phone_fr(phone) {
        Ok(())
    } else {
        Err(rule_error("phone_fr", "Numéro de téléphone invalide"))
    }
}

pub fn validate_siret(siret: &str) -> Result<(), ValidationError> {
    if is_valid_siret(siret) {
        Ok(())
    } else {
        Err(rule_error("siret", "Le SIRET doit contenir exactement 14 chiffres"))
    }
}

/// Patch variant: an empty string clears the stored SIRET.
pub fn validate_siret_or_empty(siret: &str) -> Result<(), ValidationError> {
    if siret.is_empty() {
        Ok(())
    } else {
        validate_siret(siret)
    }
}

pub fn validate_postal_code_fr(code: &str) -> Result<(), ValidationError> {
    if is_valid_postal_code_fr(code) {
        Ok(())
    } else {
        Err(rule_error("postal_code", "Le code postal doit contenir 5 chiffres"))
    }
}

pub fn validate_url_or_empty(value: &str) -> Result<(), ValidationError> {
    if is_url_or_empty(value) {
        Ok(())
    } else {
        Err(rule_error("url", "URL invalide"))
    }
}

pub fn validate_required_url(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(rule_error("required", "URL requise"));
    }
    if is_valid_url(value) {
        Ok(())
    } else {
        Err(rule_error("url", "URL invalide"))
    }
}

/// Whole number of months within 1..=12.
pub fn validate_duration_months(months: f64) -> Result<(), ValidationError> {
    if !months.is_finite() || months.fract() != 0.0 {
        return Err(rule_error("integer", "La durée doit être un nombre entier de mois"));
    }
    if !(MIN_DURATION_MONTHS..=MAX_DURATION_MONTHS).contains(&months) {
        return Err(rule_error("range", "La durée doit être comprise entre 1 et 12 mois"));
    }
    Ok(())
}

pub fn validate_accepted(accepted: &bool) -> Result<(), ValidationError> {
    if *accepted {
        Ok(())
    } else {
        Err(rule_error("accepted", "Vous devez accepter les conditions d'utilisation"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("jean.dupont@fox-reviews.fr"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("two@@b.com"));
        assert!(!is_valid_email("space in@b.com"));
    }

    #[test]
    fn test_phone_fr() {
        assert!(is_valid_phone_fr("0612345678"));
        assert!(is_valid_phone_fr("06 12 34 56 78"));
        assert!(is_valid_phone_fr("01.23.45.67.89"));
        assert!(is_valid_phone_fr("+33612345678"));
        assert!(is_valid_phone_fr("+33 6 12 34 56 78"));
        assert!(is_valid_phone_fr("0033612345678"));
        assert!(!is_valid_phone_fr("0012345678"));
        assert!(!is_valid_phone_fr("061234567"));
        assert!(!is_valid_phone_fr("+44612345678"));
        assert!(!is_valid_phone_fr("phone"));
    }

    #[test]
    fn test_siret() {
        assert!(is_valid_siret("12345678901234"));
        assert!(!is_valid_siret("1234567890123"));
        assert!(!is_valid_siret("123456789012345"));
        assert!(!is_valid_siret("1234567890123A"));
        assert!(!is_valid_siret("123 456 789 01234"));
        assert!(!is_valid_siret(""));
    }

    #[test]
    fn test_postal_code() {
        assert!(is_valid_postal_code_fr("75001"));
        assert!(!is_valid_postal_code_fr("7500"));
        assert!(!is_valid_postal_code_fr("750011"));
        assert!(!is_valid_postal_code_fr("7500A"));
    }

    #[test]
    fn test_url_or_empty() {
        assert!(is_url_or_empty(""));
        assert!(is_url_or_empty("https://fox-reviews.fr"));
        assert!(is_url_or_empty("http://localhost:3000/#/checkout/success"));
        assert!(!is_url_or_empty("fox-reviews.fr"));
        assert!(!is_url_or_empty("ftp://files.example.com"));
        assert!(!is_url_or_empty("not a url"));
        assert!(validate_required_url("").is_err());
    }

    #[test]
    fn test_password_strength() {
        assert!(password_problems("Secur3Pass").is_empty());
        assert_eq!(password_problems("Sh0rt").len(), 1);
        assert_eq!(password_problems("alllowercase1").len(), 1);
        assert_eq!(password_problems("ALLUPPERCASE1").len(), 1);
        assert_eq!(password_problems("NoDigitsHere").len(), 1);
        assert_eq!(password_problems("").len(), 4);
        assert!(validate_password_strength("Secur3Pass").is_ok());
        assert!(validate_password_strength("weak").is_err());
    }

    #[test]
    fn test_duration_months() {
        for m in 1..=12 {
            assert!(validate_duration_months(m as f64).is_ok(), "{m} months");
        }
        assert!(validate_duration_months(0.0).is_err());
        assert!(validate_duration_months(13.0).is_err());
        assert!(validate_duration_months(-1.0).is_err());
        assert!(validate_duration_months(1.5).is_err());
        assert!(validate_duration_months(f64::NAN).is_err());
        assert!(validate_duration_months(f64::INFINITY).is_err());
    }
}
