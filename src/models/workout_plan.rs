use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::require_text;
use crate::errors::CoreError;

pub const DEFAULT_MUSCLE_GROUP: &str = "General";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanExercise {
    pub name: String,
    pub sets: u32,
    /// Free text so ranges such as "8-12" survive
    pub reps: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub id: Uuid,
    pub trainer: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub target_muscle_group: String,
    pub exercises: Vec<PlanExercise>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkoutPlan {
    pub title: String,
    pub description: Option<String>,
    pub target_muscle_group: Option<String>,
    #[serde(default)]
    pub exercises: Vec<PlanExercise>,
}

impl CreateWorkoutPlan {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("title", &self.title)?;

        if self.exercises.is_empty() {
            return Err(CoreError::validation(
                "Please add a title and at least one exercise",
            ));
        }

        for (index, exercise) in self.exercises.iter().enumerate() {
            require_text(&format!("exercises[{index}].name"), &exercise.name)?;
            require_text(&format!("exercises[{index}].reps"), &exercise.reps)?;
            if exercise.sets == 0 {
                return Err(CoreError::validation(format!(
                    "exercises[{index}].sets must be at least 1"
                )));
            }
        }

        Ok(())
    }

    /// Builds the stored document for `trainer`; call `validate` first
    pub fn into_plan(self, trainer: Uuid) -> WorkoutPlan {
        let now = Utc::now();
        let target_muscle_group = self
            .target_muscle_group
            .filter(|group| !group.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MUSCLE_GROUP.to_string());

        WorkoutPlan {
            id: Uuid::new_v4(),
            trainer,
            title: self.title,
            description: self.description,
            target_muscle_group,
            exercises: self.exercises,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanFilter {
    pub trainer: Option<Uuid>,
}

impl PlanFilter {
    pub fn authored_by(trainer: Uuid) -> Self {
        Self {
            trainer: Some(trainer),
        }
    }

    pub fn matches(&self, plan: &WorkoutPlan) -> bool {
        self.trainer.map_or(true, |t| plan.trainer == t)
    }
}
