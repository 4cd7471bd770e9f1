use uuid::Uuid;

use crate::auth::{Identity, Role};
use crate::errors::{CoreError, DenyReason};

/// Every domain action a caller can attempt. Owner-scoped actions carry the
/// id of the identity whose records are touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreatePlan,
    ListPlans,
    LogWorkout { owner: Uuid },
    ListOwnLogs { owner: Uuid },
    GetStats { subject: Uuid },
    ListClients,
    ListVerifiedTrainers,
    HireTrainer,
    ListPendingTrainers,
    VerifyTrainer,
    VerifyAllPendingTrainers,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::CreatePlan => "createPlan",
            Action::ListPlans => "listPlans",
            Action::LogWorkout { .. } => "logWorkout",
            Action::ListOwnLogs { .. } => "listOwnLogs",
            Action::GetStats { .. } => "getStats",
            Action::ListClients => "listClients",
            Action::ListVerifiedTrainers => "listVerifiedTrainers",
            Action::HireTrainer => "hireTrainer",
            Action::ListPendingTrainers => "listPendingTrainers",
            Action::VerifyTrainer => "verifyTrainer",
            Action::VerifyAllPendingTrainers => "verifyAllPendingTrainers",
        }
    }
}

fn wrong_role(required: Role) -> Result<(), CoreError> {
    Err(CoreError::Forbidden(DenyReason::WrongRole { required }))
}

fn own_records(actor: &Identity, owner: Uuid) -> Result<(), CoreError> {
    if actor.id == owner {
        Ok(())
    } else {
        Err(CoreError::Forbidden(DenyReason::NotOwner))
    }
}

/// Decides whether `actor` may perform `action`. Role rules are exhaustive
/// matches so a new role has to be placed explicitly for every action.
pub fn authorize(actor: &Identity, action: Action) -> Result<(), CoreError> {
    let decision = match action {
        Action::CreatePlan => match actor.role {
            Role::Trainer => Ok(()),
            Role::Client | Role::Admin => wrong_role(Role::Trainer),
        },
        Action::ListPlans | Action::ListVerifiedTrainers => match actor.role {
            Role::Client | Role::Trainer | Role::Admin => Ok(()),
        },
        Action::LogWorkout { owner } | Action::ListOwnLogs { owner } => match actor.role {
            Role::Client | Role::Trainer | Role::Admin => own_records(actor, owner),
        },
        Action::GetStats { subject } => match actor.role {
            Role::Client | Role::Trainer | Role::Admin => own_records(actor, subject),
        },
        Action::ListClients => match actor.role {
            Role::Trainer => Ok(()),
            Role::Client | Role::Admin => wrong_role(Role::Trainer),
        },
        Action::HireTrainer => match actor.role {
            Role::Client => Ok(()),
            Role::Trainer | Role::Admin => wrong_role(Role::Client),
        },
        Action::ListPendingTrainers | Action::VerifyTrainer | Action::VerifyAllPendingTrainers => {
            match actor.role {
                Role::Admin => Ok(()),
                Role::Client | Role::Trainer => wrong_role(Role::Admin),
            }
        }
    };

    if let Err(err) = &decision {
        tracing::warn!(
            actor = %actor.id,
            role = %actor.role,
            action = action.name(),
            reason = %err,
            "authorization denied"
        );
    }

    decision
}
