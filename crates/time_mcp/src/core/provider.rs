use chrono::{LocalResult, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::core::{
    error::{TimeServerError, TimeServerResult},
    models::{TimeConversionResult, TimeResult},
    utils::{self, TIME_INPUT_FORMAT},
};

/// Where the server's effective local timezone came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalTimezoneSource {
    /// Supplied through the `--local-timezone` flag
    Override,
    /// Detected from the operating system
    Detected,
    /// UTC fallback when detection fails or yields an unknown name
    Fallback,
}

/// Timezone-aware clock backing the MCP tools
#[derive(Clone)]
pub struct TimeProvider {
    local_timezone: Tz,
    source: LocalTimezoneSource,
}

fn parse_timezone(name: &str) -> TimeServerResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| TimeServerError::InvalidTimezone {
            timezone: name.to_string(),
        })
}

impl TimeProvider {
    /// Build a provider, honoring an optional local-timezone override.
    ///
    /// An override that does not name a known IANA timezone is a startup
    /// error. Without one the system timezone is detected, falling back to
    /// UTC when detection fails.
    pub fn new(local_timezone_override: Option<&str>) -> TimeServerResult<Self> {
        match local_timezone_override {
            Some(name) => Ok(Self {
                local_timezone: parse_timezone(name)?,
                source: LocalTimezoneSource::Override,
            }),
            None => Ok(Self::detect()),
        }
    }

    fn detect() -> Self {
        let (local_timezone, source) = match iana_time_zone::get_timezone() {
            Ok(name) => match name.parse::<Tz>() {
                Ok(tz) => (tz, LocalTimezoneSource::Detected),
                Err(_) => {
                    tracing::warn!(
                        "system timezone '{}' is not a known IANA name, using UTC",
                        name
                    );
                    (Tz::UTC, LocalTimezoneSource::Fallback)
                }
            },
            Err(e) => {
                tracing::warn!("could not detect system timezone ({}), using UTC", e);
                (Tz::UTC, LocalTimezoneSource::Fallback)
            }
        };

        Self {
            local_timezone,
            source,
        }
    }

    pub fn local_timezone(&self) -> Tz {
        self.local_timezone
    }

    pub fn local_timezone_source(&self) -> LocalTimezoneSource {
        self.source
    }

    /// Resolve an optional timezone argument, defaulting to the local zone
    fn resolve(&self, timezone: Option<&str>) -> TimeServerResult<Tz> {
        match timezone {
            Some(name) => parse_timezone(name),
            None => Ok(self.local_timezone),
        }
    }

    /// Current time in the given timezone, or the local one when absent
    pub fn current_time(&self, timezone: Option<&str>) -> TimeServerResult<TimeResult> {
        let tz = self.resolve(timezone)?;
        let now = Utc::now().with_timezone(&tz);

        Ok(TimeResult::new(&now, tz.name()))
    }

    /// Convert a wall-clock `HH:MM` time between two timezones.
    ///
    /// The conversion is anchored on today's date in the source timezone.
    pub fn convert_time(
        &self,
        source_timezone: Option<&str>,
        time: &str,
        target_timezone: Option<&str>,
    ) -> TimeServerResult<TimeConversionResult> {
        let source_tz = self.resolve(source_timezone)?;
        let today = Utc::now().with_timezone(&source_tz).date_naive();

        self.convert_time_on(today, source_tz, time, self.resolve(target_timezone)?)
    }

    pub(crate) fn convert_time_on(
        &self,
        date: NaiveDate,
        source_tz: Tz,
        time: &str,
        target_tz: Tz,
    ) -> TimeServerResult<TimeConversionResult> {
        let wall_time = NaiveTime::parse_from_str(time, TIME_INPUT_FORMAT).map_err(|_| {
            TimeServerError::InvalidTimeFormat {
                time: time.to_string(),
            }
        })?;

        let source_time = match source_tz.from_local_datetime(&date.and_time(wall_time)) {
            LocalResult::Single(dt) => dt,
            LocalResult::Ambiguous(_, _) => {
                return Err(TimeServerError::AmbiguousTime {
                    time: time.to_string(),
                    timezone: source_tz.name().to_string(),
                });
            }
            LocalResult::None => {
                return Err(TimeServerError::NonexistentTime {
                    time: time.to_string(),
                    timezone: source_tz.name().to_string(),
                });
            }
        };
        let target_time = source_time.with_timezone(&target_tz);

        let source_offset = source_time.offset().fix().local_minus_utc();
        let target_offset = target_time.offset().fix().local_minus_utc();
        let time_difference =
            utils::format_utc_offset_delta(i64::from(target_offset - source_offset) / 60);

        Ok(TimeConversionResult {
            source: TimeResult::new(&source_time, source_tz.name()),
            target: TimeResult::new(&target_time, target_tz.name()),
            time_difference,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tz(name: &str) -> Tz {
        name.parse().unwrap()
    }

    #[test]
    fn test_override_is_honored() {
        let provider = TimeProvider::new(Some("Asia/Kathmandu")).unwrap();

        assert_eq!(provider.local_timezone().name(), "Asia/Kathmandu");
        assert_eq!(
            provider.local_timezone_source(),
            LocalTimezoneSource::Override
        );
    }

    #[test]
    fn test_unknown_override_is_a_startup_error() {
        let result = TimeProvider::new(Some("Mars/Olympus_Mons"));

        assert!(matches!(
            result,
            Err(TimeServerError::InvalidTimezone { timezone }) if timezone == "Mars/Olympus_Mons"
        ));
    }

    #[test]
    fn test_detection_never_fails() {
        let provider = TimeProvider::new(None).unwrap();

        assert!(!provider.local_timezone().name().is_empty());
        assert_ne!(
            provider.local_timezone_source(),
            LocalTimezoneSource::Override
        );
    }

    #[test]
    fn test_current_time_defaults_to_local() {
        let provider = TimeProvider::new(Some("Europe/Berlin")).unwrap();
        let result = provider.current_time(None).unwrap();

        assert_eq!(result.timezone, "Europe/Berlin");
    }

    #[test]
    fn test_current_time_explicit_timezone() {
        let provider = TimeProvider::new(Some("UTC")).unwrap();
        let result = provider.current_time(Some("UTC")).unwrap();

        assert_eq!(result.timezone, "UTC");
        assert!(!result.is_dst);
    }

    #[test]
    fn test_current_time_invalid_timezone() {
        let provider = TimeProvider::new(None).unwrap();

        assert!(provider.current_time(Some("Not/AZone")).is_err());
    }

    #[test]
    fn test_convert_time_to_fixed_offset_zone() {
        let provider = TimeProvider::new(Some("UTC")).unwrap();
        let result = provider
            .convert_time(Some("UTC"), "12:00", Some("Asia/Kathmandu"))
            .unwrap();

        assert_eq!(result.source.timezone, "UTC");
        assert_eq!(result.target.timezone, "Asia/Kathmandu");
        assert_eq!(result.time_difference, "+5.75h");
    }

    #[test]
    fn test_convert_time_defaults_to_local_endpoints() {
        let provider = TimeProvider::new(Some("UTC")).unwrap();
        let result = provider.convert_time(None, "16:30", None).unwrap();

        assert_eq!(result.source.timezone, "UTC");
        assert_eq!(result.target.timezone, "UTC");
        assert_eq!(result.time_difference, "+0h");
    }

    #[test]
    fn test_convert_time_rejects_bad_format() {
        let provider = TimeProvider::new(Some("UTC")).unwrap();

        assert!(matches!(
            provider.convert_time(Some("UTC"), "25:00", Some("UTC")),
            Err(TimeServerError::InvalidTimeFormat { .. })
        ));
        assert!(provider.convert_time(Some("UTC"), "noon", Some("UTC")).is_err());
    }

    #[test]
    fn test_convert_time_rejects_bad_timezones() {
        let provider = TimeProvider::new(Some("UTC")).unwrap();

        assert!(provider
            .convert_time(Some("Not/AZone"), "12:00", Some("UTC"))
            .is_err());
        assert!(provider
            .convert_time(Some("UTC"), "12:00", Some("Not/AZone"))
            .is_err());
    }

    #[test]
    fn test_convert_time_rejects_dst_gap() {
        // 2026-03-08 02:30 never occurs in America/New_York (spring forward)
        let provider = TimeProvider::new(Some("UTC")).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
        let result =
            provider.convert_time_on(date, tz("America/New_York"), "02:30", Tz::UTC);

        assert!(matches!(
            result,
            Err(TimeServerError::NonexistentTime { .. })
        ));
    }

    #[test]
    fn test_convert_time_rejects_dst_fold() {
        // 2026-11-01 01:30 occurs twice in America/New_York (fall back)
        let provider = TimeProvider::new(Some("UTC")).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 11, 1).unwrap();
        let result =
            provider.convert_time_on(date, tz("America/New_York"), "01:30", Tz::UTC);

        assert!(matches!(result, Err(TimeServerError::AmbiguousTime { .. })));
    }

    #[test]
    fn test_convert_time_fixed_date_across_zones() {
        // Winter date keeps New York at UTC-5 and Tokyo at UTC+9
        let provider = TimeProvider::new(Some("UTC")).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let result = provider
            .convert_time_on(date, tz("America/New_York"), "09:00", tz("Asia/Tokyo"))
            .unwrap();

        assert_eq!(result.source.datetime, "2026-01-15T09:00:00-05:00");
        assert_eq!(result.target.datetime, "2026-01-15T23:00:00+09:00");
        assert_eq!(result.time_difference, "+14h");
        assert_eq!(result.source.day_of_week, "Thursday");
    }
}
