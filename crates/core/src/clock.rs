//! Source of "today" for status and period decisions.

use attachee_shared::config::CalendarConfig;
use attachee_shared::error::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Supplies the current date.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date in the clock's timezone.
    fn today(&self) -> NaiveDate;
}

/// Wall clock read in a fixed IANA timezone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    /// Clock for `tz`.
    #[must_use]
    pub const fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Clock for the configured timezone.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Configuration` if the timezone name is unknown.
    pub fn from_config(config: &CalendarConfig) -> AppResult<Self> {
        let tz = config.timezone.parse::<Tz>().map_err(|e| {
            AppError::Configuration(format!("unknown timezone {}: {e}", config.timezone))
        })?;
        Ok(Self::new(tz))
    }

    /// The configured timezone.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.tz
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }
}

/// Clock pinned to one date, for tests and replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    /// Clock that always reports `today`.
    #[must_use]
    pub const fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.today.and_time(chrono::NaiveTime::MIN).and_utc()
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_from_config() {
        let clock = SystemClock::from_config(&CalendarConfig::default()).unwrap();
        assert_eq!(clock.timezone(), chrono_tz::Africa::Nairobi);
    }

    #[test]
    fn test_system_clock_rejects_unknown_timezone() {
        let config = CalendarConfig {
            timezone: "Mars/Olympus_Mons".to_string(),
            ..CalendarConfig::default()
        };
        assert!(matches!(
            SystemClock::from_config(&config),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn test_fixed_clock() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let clock = FixedClock::new(today);
        assert_eq!(clock.today(), today);
        assert_eq!(clock.now().date_naive(), today);
    }
}
