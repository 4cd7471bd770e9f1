use std::sync::Arc;
use tracing::{info, instrument};

use crate::auth::Identity;
use crate::errors::CoreError;
use crate::models::{CreateWorkoutLog, LogFilter, LogSort, WorkoutLog};
use crate::repositories::{LogRepository, PlanRepository};
use crate::services::authorization::{authorize, Action};

#[derive(Clone)]
pub struct WorkoutLogService {
    logs: Arc<dyn LogRepository>,
    plans: Arc<dyn PlanRepository>,
}

impl WorkoutLogService {
    pub fn new(logs: Arc<dyn LogRepository>, plans: Arc<dyn PlanRepository>) -> Self {
        Self { logs, plans }
    }

    /// Record a session owned by the caller
    #[instrument(skip(self, request))]
    pub async fn log_workout(
        &self,
        actor: &Identity,
        request: CreateWorkoutLog,
    ) -> Result<WorkoutLog, CoreError> {
        authorize(actor, Action::LogWorkout { owner: actor.id })?;
        request.validate()?;

        let plan = match request.plan {
            Some(plan_id) => Some(
                self.plans
                    .find_plan_by_id(plan_id)
                    .await?
                    .ok_or_else(|| CoreError::not_found("Workout plan not found"))?,
            ),
            None => None,
        };

        let log = self
            .logs
            .create_log(request.into_log(actor.id, plan.as_ref()))
            .await?;

        info!(log_id = %log.id, user_id = %actor.id, "workout logged");
        Ok(log)
    }

    /// The caller's logs, newest first
    #[instrument(skip(self))]
    pub async fn get_logs(&self, actor: &Identity) -> Result<Vec<WorkoutLog>, CoreError> {
        authorize(actor, Action::ListOwnLogs { owner: actor.id })?;
        Ok(self
            .logs
            .find_logs(&LogFilter::owned_by(actor.id), LogSort::DateDesc)
            .await?)
    }
}
