use std::sync::Arc;
use tracing::{info, instrument};

use crate::auth::Identity;
use crate::errors::CoreError;
use crate::models::{CreateWorkoutPlan, PlanFilter, WorkoutPlan};
use crate::repositories::PlanRepository;
use crate::services::authorization::{authorize, Action};

#[derive(Clone)]
pub struct WorkoutPlanService {
    plans: Arc<dyn PlanRepository>,
}

impl WorkoutPlanService {
    pub fn new(plans: Arc<dyn PlanRepository>) -> Self {
        Self { plans }
    }

    /// Create a plan authored by the calling trainer
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create_plan(
        &self,
        actor: &Identity,
        request: CreateWorkoutPlan,
    ) -> Result<WorkoutPlan, CoreError> {
        authorize(actor, Action::CreatePlan)?;
        request.validate()?;

        let plan = self.plans.create_plan(request.into_plan(actor.id)).await?;

        info!(plan_id = %plan.id, trainer_id = %actor.id, "workout plan created");
        Ok(plan)
    }

    /// Every plan in the system, whoever authored it
    #[instrument(skip(self))]
    pub async fn list_plans(&self, actor: &Identity) -> Result<Vec<WorkoutPlan>, CoreError> {
        authorize(actor, Action::ListPlans)?;
        Ok(self.plans.find_plans(&PlanFilter::default()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::models::PlanExercise;
    use crate::repositories::MockPlanRepository;
    use assert_matches::assert_matches;
    use uuid::Uuid;

    fn request() -> CreateWorkoutPlan {
        CreateWorkoutPlan {
            title: "Full Body Blast".to_string(),
            description: Some("Compound lifts".to_string()),
            target_muscle_group: Some("Full Body".to_string()),
            exercises: vec![PlanExercise {
                name: "Deadlift".to_string(),
                sets: 3,
                reps: "5".to_string(),
                notes: None,
            }],
        }
    }

    #[tokio::test]
    async fn test_plan_is_stamped_with_the_author() {
        let mut plans = MockPlanRepository::new();
        plans.expect_create_plan().times(1).returning(Ok);

        let service = WorkoutPlanService::new(Arc::new(plans));
        let trainer = Identity::new(Uuid::new_v4(), Role::Trainer);

        let plan = service.create_plan(&trainer, request()).await.unwrap();
        assert_eq!(plan.trainer, trainer.id);
        assert_eq!(plan.target_muscle_group, "Full Body");
    }

    #[tokio::test]
    async fn test_invalid_plan_is_rejected_before_write() {
        let mut plans = MockPlanRepository::new();
        plans.expect_create_plan().never();

        let service = WorkoutPlanService::new(Arc::new(plans));
        let trainer = Identity::new(Uuid::new_v4(), Role::Trainer);

        let mut empty = request();
        empty.exercises.clear();
        assert_matches!(
            service.create_plan(&trainer, empty).await,
            Err(CoreError::ValidationFailed(_))
        );

        let client = Identity::new(Uuid::new_v4(), Role::Client);
        assert_matches!(
            service.create_plan(&client, request()).await,
            Err(CoreError::Forbidden(_))
        );
    }
}
