use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{IdentityStore, LogRepository, PlanRepository, RepositoryError, RepositoryResult};
use crate::models::{
    LogFilter, LogSort, PlanFilter, User, UserFilter, UserPatch, WorkoutLog, WorkoutPlan,
};

/// Process-local store backing all three repositories. Each write takes the
/// collection's write lock, which gives single-document atomicity.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    plans: RwLock<Vec<WorkoutPlan>>,
    logs: RwLock<Vec<WorkoutLog>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityStore for InMemoryStore {
    async fn create_user(&self, user: User) -> RepositoryResult<User> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|existing| existing.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(RepositoryError::Conflict(format!(
                "email {} is already registered",
                user.email
            )));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_users(&self, filter: &UserFilter) -> RepositoryResult<Vec<User>> {
        let users = self.users.read().await;
        let mut matching: Vec<User> = users
            .values()
            .filter(|user| filter.matches(user))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.name.cmp(&b.name)));
        Ok(matching)
    }

    async fn count_users(&self, filter: &UserFilter) -> RepositoryResult<u64> {
        let users = self.users.read().await;
        Ok(users.values().filter(|user| filter.matches(user)).count() as u64)
    }

    async fn update_user(&self, id: Uuid, patch: &UserPatch) -> RepositoryResult<Option<User>> {
        let mut users = self.users.write().await;

        Ok(users.get_mut(&id).map(|user| {
            patch.apply(user);
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn update_users(&self, filter: &UserFilter, patch: &UserPatch) -> RepositoryResult<u64> {
        let mut users = self.users.write().await;
        let now = Utc::now();
        let mut changed = 0;

        for user in users.values_mut().filter(|user| filter.matches(user)) {
            patch.apply(user);
            user.updated_at = now;
            changed += 1;
        }

        Ok(changed)
    }
}

#[async_trait]
impl PlanRepository for InMemoryStore {
    async fn create_plan(&self, plan: WorkoutPlan) -> RepositoryResult<WorkoutPlan> {
        self.plans.write().await.push(plan.clone());
        Ok(plan)
    }

    async fn find_plan_by_id(&self, id: Uuid) -> RepositoryResult<Option<WorkoutPlan>> {
        Ok(self
            .plans
            .read()
            .await
            .iter()
            .find(|plan| plan.id == id)
            .cloned())
    }

    async fn find_plans(&self, filter: &PlanFilter) -> RepositoryResult<Vec<WorkoutPlan>> {
        Ok(self
            .plans
            .read()
            .await
            .iter()
            .filter(|plan| filter.matches(plan))
            .cloned()
            .collect())
    }

    async fn count_plans(&self, filter: &PlanFilter) -> RepositoryResult<u64> {
        let plans = self.plans.read().await;
        Ok(plans.iter().filter(|plan| filter.matches(plan)).count() as u64)
    }
}

#[async_trait]
impl LogRepository for InMemoryStore {
    async fn create_log(&self, log: WorkoutLog) -> RepositoryResult<WorkoutLog> {
        self.logs.write().await.push(log.clone());
        Ok(log)
    }

    async fn find_logs(
        &self,
        filter: &LogFilter,
        sort: LogSort,
    ) -> RepositoryResult<Vec<WorkoutLog>> {
        let mut logs: Vec<WorkoutLog> = self
            .logs
            .read()
            .await
            .iter()
            .filter(|log| filter.matches(log))
            .cloned()
            .collect();

        match sort {
            LogSort::DateDesc => logs.sort_by(|a, b| b.date.cmp(&a.date)),
        }

        Ok(logs)
    }

    async fn count_logs(&self, filter: &LogFilter) -> RepositoryResult<u64> {
        let logs = self.logs.read().await;
        Ok(logs.iter().filter(|log| filter.matches(log)).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use assert_matches::assert_matches;
    use chrono::Duration;

    fn user(email: &str, role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Alex".to_string(),
            email: email.to_string(),
            password_hash: "$2b$12$dummy_hash".to_string(),
            role,
            is_verified: false,
            assigned_trainer: None,
            specialization: None,
            experience: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn log(owner: Uuid, days_ago: i64) -> WorkoutLog {
        let date = Utc::now() - Duration::days(days_ago);
        WorkoutLog {
            id: Uuid::new_v4(),
            user: owner,
            plan: None,
            date,
            duration: 30.0,
            notes: "easy run".to_string(),
            exercises: vec![],
            created_at: date,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = InMemoryStore::new();
        store.create_user(user("a@example.com", Role::Client)).await.unwrap();

        let result = store.create_user(user("A@example.com", Role::Trainer)).await;
        assert_matches!(result, Err(RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_missing_user_returns_none() {
        let store = InMemoryStore::new();
        let updated = store
            .update_user(Uuid::new_v4(), &UserPatch::verify())
            .await
            .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_bulk_update_only_touches_matching_users() {
        let store = InMemoryStore::new();
        let trainer = store.create_user(user("t@example.com", Role::Trainer)).await.unwrap();
        let client = store.create_user(user("c@example.com", Role::Client)).await.unwrap();

        let changed = store
            .update_users(&UserFilter::pending_trainers(), &UserPatch::verify())
            .await
            .unwrap();

        assert_eq!(changed, 1);
        let trainer = store.find_user_by_id(trainer.id).await.unwrap().unwrap();
        let client = store.find_user_by_id(client.id).await.unwrap().unwrap();
        assert!(trainer.is_verified);
        assert!(!client.is_verified);
    }

    #[tokio::test]
    async fn test_logs_sorted_and_filtered() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        for days_ago in [3, 0, 1] {
            store.create_log(log(owner, days_ago)).await.unwrap();
        }
        store.create_log(log(Uuid::new_v4(), 0)).await.unwrap();

        let logs = store
            .find_logs(&LogFilter::owned_by(owner), LogSort::DateDesc)
            .await
            .unwrap();

        assert_eq!(logs.len(), 3);
        assert!(logs.windows(2).all(|pair| pair[0].date >= pair[1].date));
        assert_eq!(store.count_logs(&LogFilter::owned_by(owner)).await.unwrap(), 3);
        assert_eq!(store.count_logs(&LogFilter::default()).await.unwrap(), 4);
    }
}
