use anyhow::{Context, Result};
use std::sync::Arc;

use crate::auth::{hash_password, Identity, Role};
use crate::models::{CreateUser, CreateWorkoutPlan, PlanExercise, User};
use crate::repositories::{IdentityStore, PlanRepository};
use crate::services::{HiringService, WorkoutPlanService};

const ADMIN_EMAIL: &str = "root@gym.com";
const SYSTEM_TRAINER_EMAIL: &str = "admin@gym.com";
const DEMO_PASSWORD: &str = "admin123";

/// Demo accounts and a starter plan catalogue. Safe to run repeatedly.
pub struct DatabaseSeeder {
    users: Arc<dyn IdentityStore>,
    hiring: HiringService,
    plans: WorkoutPlanService,
}

impl DatabaseSeeder {
    pub fn new(users: Arc<dyn IdentityStore>, plans: Arc<dyn PlanRepository>) -> Self {
        Self {
            hiring: HiringService::new(users.clone()),
            plans: WorkoutPlanService::new(plans),
            users,
        }
    }

    pub async fn seed_all(&self) -> Result<()> {
        tracing::info!("Starting database seeding...");

        let admin = self
            .ensure_user(ADMIN_EMAIL, "Administrator", Role::Admin)
            .await?;
        let trainer = self
            .ensure_user(SYSTEM_TRAINER_EMAIL, "System Trainer", Role::Trainer)
            .await?;

        self.hiring
            .verify_trainer(&admin.identity(), trainer.id)
            .await
            .context("verifying the system trainer")?;

        self.seed_plans(&trainer.identity()).await?;

        tracing::info!("Database seeding completed!");
        Ok(())
    }

    async fn ensure_user(&self, email: &str, name: &str, role: Role) -> Result<User> {
        if let Some(existing) = self.users.find_user_by_email(email).await? {
            return Ok(existing);
        }

        let user = self
            .hiring
            .register(CreateUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash: hash_password(DEMO_PASSWORD)?,
                role,
                specialization: (role == Role::Trainer).then(|| "General Fitness".to_string()),
                experience: (role == Role::Trainer).then(|| "10 years".to_string()),
            })
            .await
            .with_context(|| format!("registering demo user {email}"))?;

        tracing::info!(email, role = %role, "Created demo user");
        Ok(user)
    }

    async fn seed_plans(&self, trainer: &Identity) -> Result<()> {
        let existing = self.plans.list_plans(trainer).await?;

        for plan in starter_plans() {
            let already_seeded = existing
                .iter()
                .any(|p| p.trainer == trainer.id && p.title == plan.title);
            if already_seeded {
                continue;
            }

            let created = self.plans.create_plan(trainer, plan).await?;
            tracing::info!(title = %created.title, "Created demo workout plan");
        }

        Ok(())
    }
}

fn exercise(name: &str, sets: u32, reps: &str, notes: &str) -> PlanExercise {
    PlanExercise {
        name: name.to_string(),
        sets,
        reps: reps.to_string(),
        notes: Some(notes.to_string()),
    }
}

fn starter_plans() -> Vec<CreateWorkoutPlan> {
    vec![
        CreateWorkoutPlan {
            title: "Chest & Triceps Destroyer".to_string(),
            description: Some("Push day built around pressing strength.".to_string()),
            target_muscle_group: Some("Chest & Triceps".to_string()),
            exercises: vec![
                exercise("Barbell Bench Press", 4, "8-10", "Bar to mid-chest, elbows near 45 degrees."),
                exercise("Incline Dumbbell Press", 3, "10-12", "Bench at 30 degrees."),
                exercise("Tricep Rope Pushdowns", 4, "12-15", "Elbows pinned, spread the rope at the bottom."),
                exercise("Chest Flyes", 3, "15", "Light weight, full stretch."),
            ],
        },
        CreateWorkoutPlan {
            title: "Back & Biceps Power".to_string(),
            description: Some("Pull day for a wider back and stronger arms.".to_string()),
            target_muscle_group: Some("Back & Biceps".to_string()),
            exercises: vec![
                exercise("Deadlifts", 3, "5-8", "Neutral spine, drive through the heels."),
                exercise("Lat Pulldowns", 4, "10-12", "Wide grip, pull to the upper chest."),
                exercise("Seated Cable Rows", 3, "10-12", "Chest up, squeeze the shoulder blades."),
                exercise("Barbell Curls", 3, "10-12", "No swinging."),
            ],
        },
        CreateWorkoutPlan {
            title: "Leg Day Foundation".to_string(),
            description: Some("Complete lower body session.".to_string()),
            target_muscle_group: Some("Legs".to_string()),
            exercises: vec![
                exercise("Barbell Squats", 4, "6-8", "Hips and knees break together."),
                exercise("Leg Press", 3, "10-12", "Do not lock the knees."),
                exercise("Romanian Deadlifts", 3, "10-12", "Hinge at the hips, soft knees."),
                exercise("Walking Lunges", 3, "12 per leg", "Upright torso."),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlanFilter, UserFilter};
    use crate::repositories::InMemoryStore;

    #[tokio::test]
    async fn test_seeding_is_idempotent() {
        let store = Arc::new(InMemoryStore::new());
        let seeder = DatabaseSeeder::new(store.clone(), store.clone());

        seeder.seed_all().await.unwrap();
        seeder.seed_all().await.unwrap();

        let trainers = store
            .find_users(&UserFilter::verified_trainers())
            .await
            .unwrap();
        assert_eq!(trainers.len(), 1);
        assert_eq!(trainers[0].email, SYSTEM_TRAINER_EMAIL);

        let plans = store.count_plans(&PlanFilter::default()).await.unwrap();
        assert_eq!(plans, starter_plans().len() as u64);
    }

    #[test]
    fn test_starter_plans_are_valid() {
        for plan in starter_plans() {
            assert!(plan.validate().is_ok(), "{} should validate", plan.title);
        }
    }
}
