//! Admin dashboard read-model types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregate counters shown on the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCounters {
    /// Total registered users.
    pub total_users: u64,
    /// Users created within today's local midnight-to-midnight window.
    pub today_signups: u64,
    /// Total provisioned admins.
    pub admins: u64,
}

/// Name and email of a recently registered user, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentUser {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
}

/// Full dashboard payload: counters plus the five most recent users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Aggregate counters.
    pub stats: DashboardCounters,
    /// Up to five most recently created users, newest first.
    pub recent_users: Vec<RecentUser>,
}

/// Half-open UTC window covering today's local calendar day.
///
/// Computed from local midnight so `todaySignups` follows the server's
/// wall-clock day, then converted to UTC instants for the store.
pub fn local_day_window(now: DateTime<chrono::Local>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start_local = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .unwrap_or_else(|| now.naive_local())
        .and_local_timezone(chrono::Local)
        .earliest()
        .unwrap_or(now);
    let end_local = start_local + chrono::Duration::days(1);
    (
        start_local.with_timezone(&Utc),
        end_local.with_timezone(&Utc),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    #[test]
    fn window_is_half_open_over_one_day() {
        let now = Local
            .with_ymd_and_hms(2026, 8, 29, 15, 30, 0)
            .single()
            .expect("unambiguous local time");
        let (start, end) = local_day_window(now);
        assert_eq!(end - start, chrono::Duration::days(1));
        assert!(start <= now.with_timezone(&Utc));
        assert!(now.with_timezone(&Utc) < end);
    }
}
