//! Admin dashboard aggregates.

use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset, NaiveTime, Utc};
use mockable::Clock;

use crate::domain::error::Error;
use crate::domain::ports::{
    DashboardStats, DayWindow, StatsQuery, StatsRepository, StatsRepositoryError, UserRepository,
};
use crate::domain::user::UserId;

use super::review_service::require_admin;

fn map_stats_repo_error(error: StatsRepositoryError) -> Error {
    match error {
        StatsRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("stats repository unavailable: {message}"))
        }
        StatsRepositoryError::Query { message } => {
            Error::internal(format!("stats repository error: {message}"))
        }
    }
}

/// Compute the platform-local calendar day containing `now` as a half-open
/// UTC window.
pub(crate) fn day_window(now: DateTime<Utc>, offset: FixedOffset) -> Result<DayWindow, Error> {
    let local_date = now.with_timezone(&offset).date_naive();
    let start_local = local_date
        .and_time(NaiveTime::MIN)
        .and_local_timezone(offset)
        .single()
        .ok_or_else(|| Error::internal("ambiguous local midnight for a fixed offset"))?;
    let start = start_local.with_timezone(&Utc);
    Ok(DayWindow {
        start,
        end: start + Duration::days(1),
    })
}

/// Dashboard service implementing the stats driving port.
#[derive(Clone)]
pub struct StatsQueryService<S, U> {
    stats: Arc<S>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
    offset: FixedOffset,
}

impl<S, U> StatsQueryService<S, U> {
    /// Create the dashboard service. `offset` fixes the platform-local zone
    /// used to delimit "today".
    pub fn new(stats: Arc<S>, users: Arc<U>, clock: Arc<dyn Clock>, offset: FixedOffset) -> Self {
        Self {
            stats,
            users,
            clock,
            offset,
        }
    }
}

#[async_trait::async_trait]
impl<S, U> StatsQuery for StatsQueryService<S, U>
where
    S: StatsRepository,
    U: UserRepository,
{
    async fn dashboard_stats(&self, admin_id: UserId) -> Result<DashboardStats, Error> {
        require_admin(self.users.as_ref(), admin_id).await?;
        let window = day_window(self.clock.utc(), self.offset)?;
        self.stats
            .collect(window)
            .await
            .map_err(map_stats_repo_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::{TimeZone, Utc};
    use mockable::DefaultClock;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockStatsRepository, MockUserRepository};
    use crate::domain::user::{DisplayName, EmailAddress, PhoneNumber, Role, User, UserDraft};

    fn wib() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).expect("valid offset")
    }

    #[test]
    fn window_covers_the_local_day_in_utc() {
        // 2026-03-10 01:30 WIB is still 2026-03-09 18:30 UTC.
        let now = Utc.with_ymd_and_hms(2026, 3, 9, 18, 30, 0).single().expect("valid time");
        let window = day_window(now, wib()).expect("window");

        // Local midnight 2026-03-10 00:00 +07:00 == 2026-03-09 17:00 UTC.
        assert_eq!(
            window.start,
            Utc.with_ymd_and_hms(2026, 3, 9, 17, 0, 0).single().expect("valid time")
        );
        assert_eq!(window.end - window.start, Duration::days(1));
    }

    #[test]
    fn utc_offset_zero_uses_utc_days() {
        let now = Utc.with_ymd_and_hms(2026, 3, 9, 23, 59, 59).single().expect("valid time");
        let offset = FixedOffset::east_opt(0).expect("valid offset");
        let window = day_window(now, offset).expect("window");
        assert_eq!(
            window.start,
            Utc.with_ymd_and_hms(2026, 3, 9, 0, 0, 0).single().expect("valid time")
        );
    }

    #[tokio::test]
    async fn stats_require_an_admin_identity() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().return_once(|id| {
            Ok(Some(
                User::new(UserDraft {
                    id,
                    name: DisplayName::new("Siti Rahma").expect("valid name"),
                    email: EmailAddress::new("siti@example.com").expect("valid email"),
                    phone: PhoneNumber::new("+62-812").expect("valid phone"),
                    role: Role::User,
                    points: 0,
                    created_at: Utc::now(),
                })
                .expect("valid user"),
            ))
        });

        let mut stats = MockStatsRepository::new();
        stats.expect_collect().times(0);

        let service = StatsQueryService::new(
            Arc::new(stats),
            Arc::new(users),
            Arc::new(DefaultClock),
            wib(),
        );
        let error = service
            .dashboard_stats(UserId::random())
            .await
            .expect_err("forbidden");
        assert_eq!(error.code, ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn stats_pass_through_for_admins() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().return_once(|id| {
            Ok(Some(
                User::new(UserDraft {
                    id,
                    name: DisplayName::new("Pak Budi").expect("valid name"),
                    email: EmailAddress::new("budi@example.com").expect("valid email"),
                    phone: PhoneNumber::new("+62-813").expect("valid phone"),
                    role: Role::Admin,
                    points: 0,
                    created_at: Utc::now(),
                })
                .expect("valid user"),
            ))
        });

        let mut stats = MockStatsRepository::new();
        stats.expect_collect().times(1).return_once(|_| {
            Ok(DashboardStats {
                pending_deposits: 3,
                deposits_today: 5,
                registered_users: 12,
                approved_weight_kg: 42.5,
            })
        });

        let service = StatsQueryService::new(
            Arc::new(stats),
            Arc::new(users),
            Arc::new(DefaultClock),
            wib(),
        );
        let stats = service
            .dashboard_stats(UserId::random())
            .await
            .expect("stats read");
        assert_eq!(stats.pending_deposits, 3);
        assert_eq!(stats.registered_users, 12);
    }
}
