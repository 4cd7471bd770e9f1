use std::sync::Arc;

use crate::auth::AuthService;
use crate::repositories::{IdentityStore, LogRepository, PlanRepository};
use crate::services::{HiringService, ProgressService, WorkoutLogService, WorkoutPlanService};

/// Shared handler state: one instance of every domain service
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub hiring: HiringService,
    pub plans: WorkoutPlanService,
    pub logs: WorkoutLogService,
    pub progress: ProgressService,
}

impl AppState {
    pub fn new(
        users: Arc<dyn IdentityStore>,
        plans: Arc<dyn PlanRepository>,
        logs: Arc<dyn LogRepository>,
        jwt_secret: &str,
    ) -> Self {
        Self {
            auth: AuthService::new(users.clone(), jwt_secret),
            hiring: HiringService::new(users.clone()),
            plans: WorkoutPlanService::new(plans.clone()),
            logs: WorkoutLogService::new(logs.clone(), plans.clone()),
            progress: ProgressService::new(users, plans, logs),
        }
    }

    /// Build the state over a single store that backs all three repositories
    pub fn from_store<S>(store: Arc<S>, jwt_secret: &str) -> Self
    where
        S: IdentityStore + PlanRepository + LogRepository + 'static,
    {
        Self::new(store.clone(), store.clone(), store, jwt_secret)
    }
}
