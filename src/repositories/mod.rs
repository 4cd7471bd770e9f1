// Persistence collaborators consumed by the services.
// Every mutation is a single-document update so concurrent writers serialize
// at the store and the last write wins.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    LogFilter, LogSort, PlanFilter, User, UserFilter, UserPatch, WorkoutLog, WorkoutPlan,
};

pub use memory::InMemoryStore;
pub use postgres::PgStore;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// User records: role, verification flag and hired trainer
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Inserts a new user; a taken email yields `RepositoryError::Conflict`
    async fn create_user(&self, user: User) -> RepositoryResult<User>;

    async fn find_user_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;

    async fn find_users(&self, filter: &UserFilter) -> RepositoryResult<Vec<User>>;

    async fn count_users(&self, filter: &UserFilter) -> RepositoryResult<u64>;

    /// Atomically applies `patch` to one user, returning the updated record
    async fn update_user(&self, id: Uuid, patch: &UserPatch) -> RepositoryResult<Option<User>>;

    /// Applies `patch` to every matching user, returning how many changed
    async fn update_users(&self, filter: &UserFilter, patch: &UserPatch) -> RepositoryResult<u64>;
}

/// Trainer-authored workout plans
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn create_plan(&self, plan: WorkoutPlan) -> RepositoryResult<WorkoutPlan>;

    async fn find_plan_by_id(&self, id: Uuid) -> RepositoryResult<Option<WorkoutPlan>>;

    async fn find_plans(&self, filter: &PlanFilter) -> RepositoryResult<Vec<WorkoutPlan>>;

    async fn count_plans(&self, filter: &PlanFilter) -> RepositoryResult<u64>;
}

/// Client-recorded workout sessions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LogRepository: Send + Sync {
    async fn create_log(&self, log: WorkoutLog) -> RepositoryResult<WorkoutLog>;

    async fn find_logs(&self, filter: &LogFilter, sort: LogSort)
        -> RepositoryResult<Vec<WorkoutLog>>;

    async fn count_logs(&self, filter: &LogFilter) -> RepositoryResult<u64>;
}
