use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{require_text, validate_duration};
use super::workout_plan::{PlanExercise, WorkoutPlan};
use crate::errors::CoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedExercise {
    pub name: String,
    pub sets_completed: u32,
    #[serde(default)]
    pub is_completed: bool,
}

impl From<&PlanExercise> for LoggedExercise {
    fn from(exercise: &PlanExercise) -> Self {
        Self {
            name: exercise.name.clone(),
            sets_completed: exercise.sets,
            is_completed: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutLog {
    pub id: Uuid,
    pub user: Uuid,
    /// None for a free workout
    pub plan: Option<Uuid>,
    pub date: DateTime<Utc>,
    /// Minutes
    pub duration: f64,
    pub notes: String,
    /// Snapshot taken at logging time; later plan edits never reach it
    pub exercises: Vec<LoggedExercise>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkoutLog {
    pub date: Option<DateTime<Utc>>,
    pub duration: f64,
    pub notes: String,
    pub plan: Option<Uuid>,
    pub exercises: Option<Vec<LoggedExercise>>,
}

impl CreateWorkoutLog {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_duration(self.duration)?;
        require_text("notes", &self.notes)?;

        for (index, exercise) in self.exercises.iter().flatten().enumerate() {
            require_text(&format!("exercises[{index}].name"), &exercise.name)?;
        }

        Ok(())
    }

    /// Builds the stored document owned by `user`. `plan` is the resolved plan
    /// document when one is referenced; its exercises seed the log when the
    /// caller supplied none.
    pub fn into_log(self, user: Uuid, plan: Option<&WorkoutPlan>) -> WorkoutLog {
        let now = Utc::now();
        let exercises = match (self.exercises, plan) {
            (Some(exercises), _) if !exercises.is_empty() => exercises,
            (_, Some(plan)) => plan.exercises.iter().map(LoggedExercise::from).collect(),
            (_, None) => Vec::new(),
        };

        WorkoutLog {
            id: Uuid::new_v4(),
            user,
            plan: plan.map(|p| p.id),
            date: self.date.unwrap_or(now),
            duration: self.duration,
            notes: self.notes,
            exercises,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub user: Option<Uuid>,
}

impl LogFilter {
    pub fn owned_by(user: Uuid) -> Self {
        Self { user: Some(user) }
    }

    pub fn matches(&self, log: &WorkoutLog) -> bool {
        self.user.map_or(true, |u| log.user == u)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogSort {
    #[default]
    DateDesc,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> WorkoutPlan {
        WorkoutPlan {
            id: Uuid::new_v4(),
            trainer: Uuid::new_v4(),
            title: "Push".to_string(),
            description: None,
            target_muscle_group: "Chest".to_string(),
            exercises: vec![PlanExercise {
                name: "Bench Press".to_string(),
                sets: 4,
                reps: "8-10".to_string(),
                notes: None,
            }],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn request() -> CreateWorkoutLog {
        CreateWorkoutLog {
            date: None,
            duration: 45.0,
            notes: "Ran 5km and did some stretching".to_string(),
            plan: None,
            exercises: None,
        }
    }

    #[test]
    fn test_free_workout_defaults() {
        let user = Uuid::new_v4();
        let log = request().into_log(user, None);

        assert_eq!(log.user, user);
        assert!(log.plan.is_none());
        assert!(log.exercises.is_empty());
        assert_eq!(log.date, log.created_at);
    }

    #[test]
    fn test_exercises_snapshot_from_plan() {
        let plan = plan();
        let log = request().into_log(Uuid::new_v4(), Some(&plan));

        assert_eq!(log.plan, Some(plan.id));
        assert_eq!(
            log.exercises,
            vec![LoggedExercise {
                name: "Bench Press".to_string(),
                sets_completed: 4,
                is_completed: false,
            }]
        );
    }

    #[test]
    fn test_supplied_exercises_win_over_plan() {
        let plan = plan();
        let mut req = request();
        req.exercises = Some(vec![LoggedExercise {
            name: "Bench Press".to_string(),
            sets_completed: 2,
            is_completed: true,
        }]);

        let log = req.into_log(Uuid::new_v4(), Some(&plan));
        assert_eq!(log.exercises[0].sets_completed, 2);
        assert!(log.exercises[0].is_completed);
    }

    #[test]
    fn test_validation() {
        assert!(request().validate().is_ok());

        let mut no_notes = request();
        no_notes.notes = String::new();
        assert!(no_notes.validate().is_err());

        let mut no_duration = request();
        no_duration.duration = 0.0;
        assert!(no_duration.validate().is_err());
    }
}
