use std::sync::Arc;

use crate::auth::{Identity, JwtService};
use crate::errors::CoreError;
use crate::repositories::IdentityStore;

/// Turns a bearer token into the `Identity` the domain services expect
#[derive(Clone)]
pub struct AuthService {
    jwt_service: JwtService,
    users: Arc<dyn IdentityStore>,
}

impl AuthService {
    pub fn new(users: Arc<dyn IdentityStore>, jwt_secret: &str) -> Self {
        Self {
            jwt_service: JwtService::new(jwt_secret),
            users,
        }
    }

    /// Validate the token and resolve its subject against the identity store.
    /// Role comes from the stored user, never from the token.
    pub async fn validate_session(&self, token: &str) -> Result<Identity, CoreError> {
        let user_id = self.jwt_service.subject(token)?;

        let user = self
            .users
            .find_user_by_id(user_id)
            .await?
            .ok_or(CoreError::Unauthenticated)?;

        Ok(user.identity())
    }
}
