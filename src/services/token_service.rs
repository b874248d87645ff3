use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::web::error::ApiError;

/// Tokens are the only session artifact; nothing is kept server-side.
const TOKEN_LIFETIME_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// HS256-sign an identity claim with a 365-day expiry.
pub fn issue(secret: &str, email: &str, name: Option<&str>) -> Result<String, ApiError> {
    let claims = Claims {
        email: email.to_string(),
        name: name.map(|n| n.to_string()),
        exp: now_secs() + TOKEN_LIFETIME_SECS,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| ApiError::InvalidArgument("could not sign token".to_string()))
}

/// Validates signature and expiry; anything wrong with the token is a plain
/// unauthenticated failure, never a hint about what was wrong.
pub fn verify(secret: &str, token: &str) -> Result<Claims, ApiError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| ApiError::Unauthenticated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_then_verify_round_trips_the_claim() {
        let token = issue("test-secret", "a@x.com", Some("A")).unwrap();
        let claims = verify("test-secret", &token).unwrap();
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.name.as_deref(), Some("A"));
        assert!(claims.exp > now_secs());
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let token = issue("test-secret", "a@x.com", None).unwrap();
        assert!(matches!(
            verify("other-secret", &token),
            Err(ApiError::Unauthenticated)
        ));
    }

    #[test]
    fn verify_rejects_garbage() {
        assert!(matches!(
            verify("test-secret", "not.a.token"),
            Err(ApiError::Unauthenticated)
        ));
    }

    #[test]
    fn verify_rejects_expired_token() {
        let claims = Claims {
            email: "a@x.com".to_string(),
            name: None,
            exp: now_secs() - 120,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert!(matches!(
            verify("test-secret", &token),
            Err(ApiError::Unauthenticated)
        ));
    }
}
