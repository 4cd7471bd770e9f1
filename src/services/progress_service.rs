use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::auth::{Identity, Role};
use crate::errors::CoreError;
use crate::models::{
    ClientStats, LogFilter, LogSort, PlanFilter, Stats, TrainerStats, UserFilter,
};
use crate::repositories::{IdentityStore, LogRepository, PlanRepository};
use crate::services::authorization::{authorize, Action};

/// Number of consecutive calendar days, ending today or yesterday, that hold
/// at least one log.
///
/// Timestamps are reduced to their UTC day, so several sessions on one day
/// count once and the input order does not matter. A most recent day more
/// than one day away from `today` breaks the chain.
pub fn compute_streak<I>(log_dates: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    let mut days: Vec<NaiveDate> = log_dates.into_iter().map(|date| date.date_naive()).collect();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();

    let Some((&last_day, earlier)) = days.split_first() else {
        return 0;
    };

    if (today - last_day).num_days().abs() > 1 {
        return 0;
    }

    let mut streak = 1;
    let mut anchor = last_day;
    for &day in earlier {
        if (anchor - day).num_days() != 1 {
            break;
        }
        streak += 1;
        anchor = day;
    }

    streak
}

/// Derived statistics over logs and plans
#[derive(Clone)]
pub struct ProgressService {
    users: Arc<dyn IdentityStore>,
    plans: Arc<dyn PlanRepository>,
    logs: Arc<dyn LogRepository>,
}

impl ProgressService {
    pub fn new(
        users: Arc<dyn IdentityStore>,
        plans: Arc<dyn PlanRepository>,
        logs: Arc<dyn LogRepository>,
    ) -> Self {
        Self { users, plans, logs }
    }

    /// Stats for the caller as of the current UTC date
    pub async fn stats(&self, actor: &Identity) -> Result<Stats, CoreError> {
        self.stats_on(actor, Utc::now().date_naive()).await
    }

    /// Stats for the caller with `today` supplied by the caller
    #[instrument(skip(self))]
    pub async fn stats_on(&self, actor: &Identity, today: NaiveDate) -> Result<Stats, CoreError> {
        authorize(actor, Action::GetStats { subject: actor.id })?;

        match actor.role {
            Role::Trainer => self.trainer_stats(actor).await.map(Stats::Trainer),
            Role::Client | Role::Admin => self.client_stats(actor, today).await.map(Stats::Client),
        }
    }

    async fn trainer_stats(&self, actor: &Identity) -> Result<TrainerStats, CoreError> {
        // Counts every client system-wide rather than this trainer's hires
        let active_clients = self.users.count_users(&UserFilter::role(Role::Client)).await?;
        let plans_active = self.plans.count_plans(&PlanFilter::authored_by(actor.id)).await?;

        Ok(TrainerStats {
            active_clients,
            plans_active,
        })
    }

    async fn client_stats(&self, actor: &Identity, today: NaiveDate) -> Result<ClientStats, CoreError> {
        let filter = LogFilter::owned_by(actor.id);
        let logs = self.logs.find_logs(&filter, LogSort::DateDesc).await?;
        let streak = compute_streak(logs.iter().map(|log| log.date), today);
        let workouts_completed = self.logs.count_logs(&filter).await?;

        debug!(streak, workouts_completed, "client stats computed");
        Ok(ClientStats {
            streak,
            workouts_completed,
        })
    }
}
