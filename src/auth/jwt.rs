use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use uuid::Uuid;

use crate::auth::Claims;
use crate::errors::CoreError;

/// Validates bearer tokens issued elsewhere and yields the subject user id
#[derive(Clone)]
pub struct JwtService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("decoding_key", &"[REDACTED]")
            .field("algorithms", &self.validation.algorithms)
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given secret
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims, CoreError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|err| {
                match err.kind() {
                    ErrorKind::ExpiredSignature => tracing::debug!("rejected expired token"),
                    other => tracing::debug!(reason = ?other, "rejected invalid token"),
                }
                CoreError::Unauthenticated
            })
    }

    /// User id carried in the token's `sub` claim
    pub fn subject(&self, token: &str) -> Result<Uuid, CoreError> {
        let claims = self.validate_token(token)?;
        Uuid::parse_str(&claims.sub).map_err(|_| CoreError::Unauthenticated)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value
pub fn extract_bearer_token(header: &str) -> Result<&str, CoreError> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(CoreError::Unauthenticated)
}
