use std::collections::HashSet;

use jsonwebtoken::{decode, DecodingKey, Validation};
use time::OffsetDateTime;
use tracing::debug;

use super::claims::Claims;
use super::dto::{AuthResponse, PublicUser};

/// Authenticated session, passed explicitly to every dashboard call.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user: Option<PublicUser>,
}

impl Session {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            user: None,
        }
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// Reads the access token's claims. The signature is not checked: the client
    /// never holds the signing key, it only needs `exp` to know when to log in again.
    pub fn claims(&self) -> Option<Claims> {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();

        match decode::<Claims>(&self.access_token, &DecodingKey::from_secret(&[]), &validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                debug!(error = %e, "access token is not a readable jwt");
                None
            }
        }
    }

    pub fn expires_at(&self) -> Option<OffsetDateTime> {
        self.claims()
            .and_then(|c| OffsetDateTime::from_unix_timestamp(c.exp).ok())
    }

    /// Opaque tokens never report expiry; the API answers 401 instead.
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires_at().map(|exp| exp <= now).unwrap_or(false)
    }
}

impl From<AuthResponse> for Session {
    fn from(resp: AuthResponse) -> Self {
        Self {
            access_token: resp.access_token,
            refresh_token: resp.refresh_token,
            user: Some(resp.user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::claims::TokenKind;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use time::Duration;

    fn token_expiring_at(exp: OffsetDateTime) -> String {
        let claims = Claims {
            sub: "42".into(),
            exp: exp.unix_timestamp(),
            iat: Some(OffsetDateTime::now_utc().unix_timestamp()),
            kind: Some(TokenKind::Access),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"server-side-secret"),
        )
        .expect("sign token")
    }

    #[test]
    fn test_reads_claims_without_key() {
        let exp = OffsetDateTime::now_utc() + Duration::hours(1);
        let session = Session::new(token_expiring_at(exp));
        let claims = session.claims().expect("claims");
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.kind, Some(TokenKind::Access));
        assert_eq!(
            session.expires_at().map(|t| t.unix_timestamp()),
            Some(exp.unix_timestamp())
        );
    }

    #[test]
    fn test_expiry() {
        let now = OffsetDateTime::now_utc();
        let fresh = Session::new(token_expiring_at(now + Duration::minutes(5)));
        let stale = Session::new(token_expiring_at(now - Duration::minutes(5)));
        assert!(!fresh.is_expired(now));
        assert!(stale.is_expired(now));
    }

    #[test]
    fn test_opaque_token_never_expires_locally() {
        let session = Session::new("not-a-jwt");
        assert!(session.claims().is_none());
        assert!(!session.is_expired(OffsetDateTime::now_utc()));
        assert_eq!(session.bearer(), "Bearer not-a-jwt");
    }
}
