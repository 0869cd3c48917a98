// Cache keys and TTLs for every cached resource.
// All keys live under CACHE_PREFIX so they can be cleared without touching the credential.

use std::time::Duration;

use chrono::NaiveDate;

/// Namespace shared by every cache key.
pub const CACHE_PREFIX: &str = "cache:";

/// Prefix of all schedule entries.
pub const SCHEDULE_PREFIX: &str = "cache:schedule:";

/// Today's lessons.
pub const SCHEDULE_TODAY: &str = "cache:schedule:today";

/// The signed-in student's profile.
pub const USER_ME: &str = "cache:user:me";

/// Lessons for a specific day.
pub fn schedule_day(date: NaiveDate) -> String {
    format!("{}day:{}", SCHEDULE_PREFIX, date.format("%Y-%m-%d"))
}

/// Lessons for the month containing `date`.
pub fn schedule_month(date: NaiveDate) -> String {
    format!("{}month:{}", SCHEDULE_PREFIX, date.format("%Y-%m"))
}

/// Time-to-live per resource kind.
pub mod ttl {
    use super::Duration;

    /// Profile data is stable: 24 hours.
    pub const USER_INFO: Duration = Duration::from_secs(60 * 60 * 24);

    /// Schedules change rarely: 4 hours.
    pub const SCHEDULE: Duration = Duration::from_secs(60 * 60 * 4);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameterized_keys_do_not_collide() {
        let first = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let second = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();

        assert_eq!(schedule_day(first), "cache:schedule:day:2026-03-02");
        assert_ne!(schedule_day(first), schedule_day(second));
        assert_eq!(schedule_month(first), schedule_month(second));
        assert_eq!(schedule_month(first), "cache:schedule:month:2026-03");
        assert_ne!(schedule_month(first), schedule_day(first));
    }

    #[test]
    fn test_all_keys_are_namespaced() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        for key in [
            SCHEDULE_TODAY.to_string(),
            USER_ME.to_string(),
            schedule_day(date),
            schedule_month(date),
        ] {
            assert!(key.starts_with(CACHE_PREFIX), "{key}");
        }
    }
}
