#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use jsonwebtoken::{encode, EncodingKey, Header};
use std::sync::{Arc, Once};
use trainer_hub::api::AppState;
use trainer_hub::auth::{Claims, Identity, Role};
use trainer_hub::models::{CreateUser, CreateWorkoutLog, CreateWorkoutPlan, PlanExercise, User};
use trainer_hub::repositories::InMemoryStore;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-secret";

static INIT: Once = Once::new();

/// Initialize test logging
pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .init();
    });
}

/// Services wired over a fresh in-memory store
pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        init_test_logging();
        let store = Arc::new(InMemoryStore::new());
        let state = AppState::from_store(store.clone(), TEST_JWT_SECRET);
        Self { store, state }
    }

    pub async fn register(&self, role: Role) -> User {
        self.state
            .hiring
            .register(MockDataGenerator::create_user(role))
            .await
            .expect("registration should succeed")
    }

    pub async fn admin(&self) -> Identity {
        self.register(Role::Admin).await.identity()
    }

    pub async fn verified_trainer(&self) -> User {
        let admin = self.admin().await;
        let trainer = self.register(Role::Trainer).await;
        self.state
            .hiring
            .verify_trainer(&admin, trainer.id)
            .await
            .expect("admin can verify a trainer")
    }
}

/// Mock data generators
pub struct MockDataGenerator;

impl MockDataGenerator {
    pub fn create_user(role: Role) -> CreateUser {
        let email: String = SafeEmail().fake();
        CreateUser {
            name: Name().fake(),
            email: format!("{}.{}", Uuid::new_v4().simple(), email),
            password_hash: "$2b$12$dummy_hash".to_string(),
            role,
            specialization: Some("Strength & Conditioning".to_string()),
            experience: Some("3 years".to_string()),
        }
    }

    pub fn create_plan() -> CreateWorkoutPlan {
        CreateWorkoutPlan {
            title: "Upper Body Push".to_string(),
            description: Some("Pressing focus".to_string()),
            target_muscle_group: Some("Chest".to_string()),
            exercises: vec![
                PlanExercise {
                    name: "Bench Press".to_string(),
                    sets: 4,
                    reps: "8-10".to_string(),
                    notes: None,
                },
                PlanExercise {
                    name: "Overhead Press".to_string(),
                    sets: 3,
                    reps: "10".to_string(),
                    notes: Some("Brace the core".to_string()),
                },
            ],
        }
    }

    pub fn create_log(date: Option<DateTime<Utc>>) -> CreateWorkoutLog {
        CreateWorkoutLog {
            date,
            duration: 45.0,
            notes: "Solid session".to_string(),
            plan: None,
            exercises: None,
        }
    }
}

/// Fixed reference day so calendar arithmetic is deterministic
pub fn reference_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).expect("valid date")
}

/// A timestamp `days_before` the reference day at `hour` UTC
pub fn days_before(days_before: i64, hour: u32) -> DateTime<Utc> {
    let day = reference_day() - chrono::Duration::days(days_before);
    Utc.from_utc_datetime(&day.and_hms_opt(hour, 0, 0).expect("valid time"))
}

/// Bearer token for `user_id`, signed with the test secret
pub fn token_for(user_id: Uuid) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (now + chrono::Duration::hours(1)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("token encodes")
}
