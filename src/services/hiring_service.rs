use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::{Identity, Role};
use crate::errors::CoreError;
use crate::models::validation::{require_text, validate_email};
use crate::models::{BulkVerifyResponse, CreateUser, HireResponse, User, UserFilter, UserPatch};
use crate::repositories::{IdentityStore, RepositoryError};
use crate::services::authorization::{authorize, Action};

/// Trainer verification and client-to-trainer assignment.
///
/// A trainer registers as Pending (`is_verified = false`) and becomes Verified
/// once an admin approves them. The transition is one-way. Only Verified
/// trainers can be hired, and hiring simply overwrites the client's
/// `assigned_trainer`; no history of earlier trainers is kept.
#[derive(Clone)]
pub struct HiringService {
    users: Arc<dyn IdentityStore>,
}

impl HiringService {
    pub fn new(users: Arc<dyn IdentityStore>) -> Self {
        Self { users }
    }

    /// Register a new user. Trainers start Pending; role-specific fields are
    /// dropped for the roles they do not apply to.
    #[instrument(skip(self, request), fields(email = %request.email, role = %request.role))]
    pub async fn register(&self, request: CreateUser) -> Result<User, CoreError> {
        require_text("name", &request.name)?;
        validate_email(&request.email)?;
        require_text("password", &request.password_hash)?;

        if self.users.find_user_by_email(&request.email).await?.is_some() {
            return Err(CoreError::EmailAlreadyExists);
        }

        let (specialization, experience) = match request.role {
            Role::Trainer => (request.specialization, request.experience),
            Role::Client | Role::Admin => (None, None),
        };

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: request.name.trim().to_string(),
            email: request.email,
            password_hash: request.password_hash,
            role: request.role,
            is_verified: false,
            assigned_trainer: None,
            specialization,
            experience,
            created_at: now,
            updated_at: now,
        };

        let user = self.users.create_user(user).await.map_err(|err| match err {
            RepositoryError::Conflict(_) => CoreError::EmailAlreadyExists,
            other => CoreError::Storage(other),
        })?;

        info!(user_id = %user.id, "registered user");
        Ok(user)
    }

    /// Trainers a client can hire
    #[instrument(skip(self))]
    pub async fn list_verified_trainers(&self, actor: &Identity) -> Result<Vec<User>, CoreError> {
        authorize(actor, Action::ListVerifiedTrainers)?;
        Ok(self.users.find_users(&UserFilter::verified_trainers()).await?)
    }

    /// Clients who hired the calling trainer
    #[instrument(skip(self))]
    pub async fn list_clients(&self, actor: &Identity) -> Result<Vec<User>, CoreError> {
        authorize(actor, Action::ListClients)?;
        Ok(self.users.find_users(&UserFilter::clients_of(actor.id)).await?)
    }

    /// Assign a verified trainer to the calling client, replacing any earlier one
    #[instrument(skip(self))]
    pub async fn hire_trainer(
        &self,
        actor: &Identity,
        trainer_id: Uuid,
    ) -> Result<HireResponse, CoreError> {
        authorize(actor, Action::HireTrainer)?;

        let trainer = self
            .users
            .find_user_by_id(trainer_id)
            .await?
            .filter(User::is_verified_trainer)
            .ok_or_else(|| CoreError::not_found("Trainer not found or not verified"))?;

        self.users
            .update_user(actor.id, &UserPatch::assign_trainer(trainer.id))
            .await?
            .ok_or_else(|| CoreError::not_found("Client not found"))?;

        info!(client_id = %actor.id, trainer_id = %trainer.id, "trainer hired");
        Ok(HireResponse {
            message: format!("You have successfully hired {}", trainer.name),
            trainer,
        })
    }

    /// Trainers waiting for admin approval
    #[instrument(skip(self))]
    pub async fn list_pending_trainers(&self, actor: &Identity) -> Result<Vec<User>, CoreError> {
        authorize(actor, Action::ListPendingTrainers)?;
        Ok(self.users.find_users(&UserFilter::pending_trainers()).await?)
    }

    /// Move a trainer from Pending to Verified. Verifying an already verified
    /// trainer is a no-op that returns the current record.
    #[instrument(skip(self))]
    pub async fn verify_trainer(&self, actor: &Identity, trainer_id: Uuid) -> Result<User, CoreError> {
        authorize(actor, Action::VerifyTrainer)?;

        let trainer = self
            .users
            .find_user_by_id(trainer_id)
            .await?
            .filter(|user| user.role == Role::Trainer)
            .ok_or_else(|| CoreError::not_found("Trainer not found"))?;

        if trainer.is_verified {
            return Ok(trainer);
        }

        let verified = self
            .users
            .update_user(trainer.id, &UserPatch::verify())
            .await?
            .ok_or_else(|| CoreError::not_found("Trainer not found"))?;

        info!(trainer_id = %verified.id, admin_id = %actor.id, "trainer verified");
        Ok(verified)
    }

    /// Verify every pending trainer at once
    #[instrument(skip(self))]
    pub async fn verify_all_pending_trainers(
        &self,
        actor: &Identity,
    ) -> Result<BulkVerifyResponse, CoreError> {
        authorize(actor, Action::VerifyAllPendingTrainers)?;

        let verified = self
            .users
            .update_users(&UserFilter::pending_trainers(), &UserPatch::verify())
            .await?;

        info!(verified, admin_id = %actor.id, "pending trainers verified");
        Ok(BulkVerifyResponse { verified })
    }
}
