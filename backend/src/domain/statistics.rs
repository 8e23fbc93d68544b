//! Admin dashboard statistics. Pure reads, no side effects.

use std::sync::Arc;

use chrono::Local;

use crate::domain::error::Error;
use crate::domain::ports::IdentityStore;
use crate::domain::stats::{local_day_window, DashboardCounters, DashboardStats, RecentUser};

/// Number of recent users surfaced on the dashboard.
const RECENT_LIMIT: u32 = 5;

/// Read-model service computing dashboard statistics.
pub struct StatsService {
    identity: Arc<dyn IdentityStore>,
}

impl StatsService {
    /// Construct from an injected identity store handle.
    pub fn new(identity: Arc<dyn IdentityStore>) -> Self {
        Self { identity }
    }

    /// Compute the dashboard snapshot.
    ///
    /// Counts are snapshot reads with no cross-record consistency
    /// guarantee; `today_signups` uses the half-open local-midnight window.
    pub async fn compute(&self) -> Result<DashboardStats, Error> {
        let (start, end) = local_day_window(Local::now());
        let total_users = self.identity.count_users().await?;
        let today_signups = self
            .identity
            .count_users_created_between(start, end)
            .await?;
        let admins = self.identity.count_admins().await?;
        let recent_users = self
            .identity
            .recent_users(RECENT_LIMIT)
            .await?
            .into_iter()
            .map(|user| RecentUser {
                name: user.name,
                email: user.email,
            })
            .collect();

        Ok(DashboardStats {
            stats: DashboardCounters {
                total_users,
                today_signups,
                admins,
            },
            recent_users,
        })
    }
}
