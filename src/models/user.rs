use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{Identity, Role};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    /// Meaningful for trainers only; always false for other roles
    pub is_verified: bool,
    /// Meaningful for clients only
    pub assigned_trainer: Option<Uuid>,
    pub specialization: Option<String>,
    pub experience: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn identity(&self) -> Identity {
        Identity::new(self.id, self.role)
    }

    pub fn is_verified_trainer(&self) -> bool {
        self.role == Role::Trainer && self.is_verified
    }
}

/// Registration payload. The credential arrives already hashed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub specialization: Option<String>,
    pub experience: Option<String>,
}

/// The only user fields the core ever mutates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub is_verified: Option<bool>,
    pub assigned_trainer: Option<Uuid>,
}

impl UserPatch {
    pub fn verify() -> Self {
        Self {
            is_verified: Some(true),
            ..Self::default()
        }
    }

    pub fn assign_trainer(trainer_id: Uuid) -> Self {
        Self {
            assigned_trainer: Some(trainer_id),
            ..Self::default()
        }
    }

    pub fn apply(&self, user: &mut User) {
        if let Some(is_verified) = self.is_verified {
            user.is_verified = is_verified;
        }
        if let Some(trainer_id) = self.assigned_trainer {
            user.assigned_trainer = Some(trainer_id);
        }
    }
}

/// Query over the identity store; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub is_verified: Option<bool>,
    pub assigned_trainer: Option<Uuid>,
}

impl UserFilter {
    pub fn role(role: Role) -> Self {
        Self {
            role: Some(role),
            ..Self::default()
        }
    }

    pub fn verified_trainers() -> Self {
        Self {
            role: Some(Role::Trainer),
            is_verified: Some(true),
            ..Self::default()
        }
    }

    pub fn pending_trainers() -> Self {
        Self {
            role: Some(Role::Trainer),
            is_verified: Some(false),
            ..Self::default()
        }
    }

    pub fn clients_of(trainer_id: Uuid) -> Self {
        Self {
            role: Some(Role::Client),
            assigned_trainer: Some(trainer_id),
            ..Self::default()
        }
    }

    pub fn matches(&self, user: &User) -> bool {
        self.role.map_or(true, |role| user.role == role)
            && self.is_verified.map_or(true, |v| user.is_verified == v)
            && self
                .assigned_trainer
                .map_or(true, |t| user.assigned_trainer == Some(t))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HireResponse {
    pub message: String,
    pub trainer: User,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkVerifyResponse {
    pub verified: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            password_hash: "$2b$12$dummy_hash".to_string(),
            role,
            is_verified: false,
            assigned_trainer: None,
            specialization: None,
            experience: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let json = serde_json::to_value(user(Role::Client)).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["isVerified"], false);
        assert!(json["assignedTrainer"].is_null());
    }

    #[test]
    fn test_filter_matching() {
        let trainer_id = Uuid::new_v4();
        let mut client = user(Role::Client);
        client.assigned_trainer = Some(trainer_id);
        let mut trainer = user(Role::Trainer);
        trainer.is_verified = true;

        assert!(UserFilter::clients_of(trainer_id).matches(&client));
        assert!(!UserFilter::clients_of(Uuid::new_v4()).matches(&client));
        assert!(UserFilter::verified_trainers().matches(&trainer));
        assert!(!UserFilter::pending_trainers().matches(&trainer));
        assert!(UserFilter::default().matches(&client));
    }

    #[test]
    fn test_patch_only_touches_set_fields() {
        let mut client = user(Role::Client);
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        UserPatch::assign_trainer(first).apply(&mut client);
        UserPatch::assign_trainer(second).apply(&mut client);

        assert_eq!(client.assigned_trainer, Some(second));
        assert!(!client.is_verified);
    }
}
