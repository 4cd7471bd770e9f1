use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{IdentityStore, LogRepository, PlanRepository, RepositoryError, RepositoryResult};
use crate::auth::Role;
use crate::models::{
    LogFilter, LogSort, LoggedExercise, PlanExercise, PlanFilter, User, UserFilter, UserPatch,
    WorkoutLog, WorkoutPlan,
};

const USER_COLUMNS: &str = "id, name, email, password_hash, role, is_verified, assigned_trainer, \
     specialization, experience, created_at, updated_at";
const PLAN_COLUMNS: &str =
    "id, trainer_id, title, description, target_muscle_group, exercises, created_at, updated_at";
const LOG_COLUMNS: &str = "id, user_id, plan_id, date, duration, notes, exercises, created_at";

/// PostgreSQL implementation of the three repositories
#[derive(Debug, Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    is_verified: bool,
    assigned_trainer: Option<Uuid>,
    specialization: Option<String>,
    experience: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = Role::parse(&row.role)
            .map_err(|err| RepositoryError::Corrupt(format!("user {}: {err}", row.id)))?;

        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            role,
            is_verified: row.is_verified,
            assigned_trainer: row.assigned_trainer,
            specialization: row.specialization,
            experience: row.experience,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(FromRow)]
struct PlanRow {
    id: Uuid,
    trainer_id: Uuid,
    title: String,
    description: Option<String>,
    target_muscle_group: String,
    exercises: Json<Vec<PlanExercise>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PlanRow> for WorkoutPlan {
    fn from(row: PlanRow) -> Self {
        WorkoutPlan {
            id: row.id,
            trainer: row.trainer_id,
            title: row.title,
            description: row.description,
            target_muscle_group: row.target_muscle_group,
            exercises: row.exercises.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(FromRow)]
struct LogRow {
    id: Uuid,
    user_id: Uuid,
    plan_id: Option<Uuid>,
    date: DateTime<Utc>,
    duration: f64,
    notes: String,
    exercises: Json<Vec<LoggedExercise>>,
    created_at: DateTime<Utc>,
}

impl From<LogRow> for WorkoutLog {
    fn from(row: LogRow) -> Self {
        WorkoutLog {
            id: row.id,
            user: row.user_id,
            plan: row.plan_id,
            date: row.date,
            duration: row.duration,
            notes: row.notes,
            exercises: row.exercises.0,
            created_at: row.created_at,
        }
    }
}

fn push_user_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &UserFilter) {
    builder.push(" WHERE TRUE");
    if let Some(role) = filter.role {
        builder.push(" AND role = ").push_bind(role.as_str());
    }
    if let Some(is_verified) = filter.is_verified {
        builder.push(" AND is_verified = ").push_bind(is_verified);
    }
    if let Some(trainer_id) = filter.assigned_trainer {
        builder.push(" AND assigned_trainer = ").push_bind(trainer_id);
    }
}

fn to_count(value: i64) -> RepositoryResult<u64> {
    u64::try_from(value).map_err(|_| RepositoryError::Corrupt(format!("negative count {value}")))
}

#[async_trait]
impl IdentityStore for PgStore {
    async fn create_user(&self, user: User) -> RepositoryResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (id, name, email, password_hash, role, is_verified, assigned_trainer, \
             specialization, experience, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.is_verified)
        .bind(user.assigned_trainer)
        .bind(&user.specialization)
        .bind(&user.experience)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            let duplicate = matches!(
                &err,
                sqlx::Error::Database(db_err) if db_err.is_unique_violation()
            );
            if duplicate {
                RepositoryError::Conflict(format!("email {} is already registered", user.email))
            } else {
                RepositoryError::Database(err)
            }
        })?;

        row.try_into()
    }

    async fn find_user_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)"
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await?
        .map(User::try_from)
        .transpose()
    }

    async fn find_users(&self, filter: &UserFilter) -> RepositoryResult<Vec<User>> {
        let mut builder = QueryBuilder::new(format!("SELECT {USER_COLUMNS} FROM users"));
        push_user_filter(&mut builder, filter);
        builder.push(" ORDER BY created_at ASC, name ASC");

        builder
            .build_query_as::<UserRow>()
            .fetch_all(&self.db)
            .await?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn count_users(&self, filter: &UserFilter) -> RepositoryResult<u64> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM users");
        push_user_filter(&mut builder, filter);

        let count: i64 = builder.build_query_scalar().fetch_one(&self.db).await?;
        to_count(count)
    }

    async fn update_user(&self, id: Uuid, patch: &UserPatch) -> RepositoryResult<Option<User>> {
        sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users
             SET is_verified = COALESCE($2, is_verified),
                 assigned_trainer = COALESCE($3, assigned_trainer),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.is_verified)
        .bind(patch.assigned_trainer)
        .fetch_optional(&self.db)
        .await?
        .map(User::try_from)
        .transpose()
    }

    async fn update_users(&self, filter: &UserFilter, patch: &UserPatch) -> RepositoryResult<u64> {
        let mut builder = QueryBuilder::new("UPDATE users SET is_verified = COALESCE(");
        builder
            .push_bind(patch.is_verified)
            .push(", is_verified), assigned_trainer = COALESCE(")
            .push_bind(patch.assigned_trainer)
            .push(", assigned_trainer), updated_at = NOW()");
        push_user_filter(&mut builder, filter);

        let result = builder.build().execute(&self.db).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl PlanRepository for PgStore {
    async fn create_plan(&self, plan: WorkoutPlan) -> RepositoryResult<WorkoutPlan> {
        let row = sqlx::query_as::<_, PlanRow>(&format!(
            "INSERT INTO workout_plans (id, trainer_id, title, description, target_muscle_group, \
             exercises, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {PLAN_COLUMNS}"
        ))
        .bind(plan.id)
        .bind(plan.trainer)
        .bind(&plan.title)
        .bind(&plan.description)
        .bind(&plan.target_muscle_group)
        .bind(Json(&plan.exercises))
        .bind(plan.created_at)
        .bind(plan.updated_at)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    async fn find_plan_by_id(&self, id: Uuid) -> RepositoryResult<Option<WorkoutPlan>> {
        let row = sqlx::query_as::<_, PlanRow>(&format!(
            "SELECT {PLAN_COLUMNS} FROM workout_plans WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(WorkoutPlan::from))
    }

    async fn find_plans(&self, filter: &PlanFilter) -> RepositoryResult<Vec<WorkoutPlan>> {
        let mut builder = QueryBuilder::new(format!("SELECT {PLAN_COLUMNS} FROM workout_plans"));
        if let Some(trainer_id) = filter.trainer {
            builder.push(" WHERE trainer_id = ").push_bind(trainer_id);
        }
        builder.push(" ORDER BY created_at ASC");

        let rows = builder.build_query_as::<PlanRow>().fetch_all(&self.db).await?;
        Ok(rows.into_iter().map(WorkoutPlan::from).collect())
    }

    async fn count_plans(&self, filter: &PlanFilter) -> RepositoryResult<u64> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM workout_plans");
        if let Some(trainer_id) = filter.trainer {
            builder.push(" WHERE trainer_id = ").push_bind(trainer_id);
        }

        let count: i64 = builder.build_query_scalar().fetch_one(&self.db).await?;
        to_count(count)
    }
}

#[async_trait]
impl LogRepository for PgStore {
    async fn create_log(&self, log: WorkoutLog) -> RepositoryResult<WorkoutLog> {
        let row = sqlx::query_as::<_, LogRow>(&format!(
            "INSERT INTO workout_logs (id, user_id, plan_id, date, duration, notes, exercises, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {LOG_COLUMNS}"
        ))
        .bind(log.id)
        .bind(log.user)
        .bind(log.plan)
        .bind(log.date)
        .bind(log.duration)
        .bind(&log.notes)
        .bind(Json(&log.exercises))
        .bind(log.created_at)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    async fn find_logs(
        &self,
        filter: &LogFilter,
        sort: LogSort,
    ) -> RepositoryResult<Vec<WorkoutLog>> {
        let mut builder = QueryBuilder::new(format!("SELECT {LOG_COLUMNS} FROM workout_logs"));
        if let Some(user_id) = filter.user {
            builder.push(" WHERE user_id = ").push_bind(user_id);
        }
        builder.push(match sort {
            LogSort::DateDesc => " ORDER BY date DESC",
        });

        let rows = builder.build_query_as::<LogRow>().fetch_all(&self.db).await?;
        Ok(rows.into_iter().map(WorkoutLog::from).collect())
    }

    async fn count_logs(&self, filter: &LogFilter) -> RepositoryResult<u64> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM workout_logs");
        if let Some(user_id) = filter.user {
            builder.push(" WHERE user_id = ").push_bind(user_id);
        }

        let count: i64 = builder.build_query_scalar().fetch_one(&self.db).await?;
        to_count(count)
    }
}
