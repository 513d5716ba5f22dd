use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::core::{AppError, Result};

/// Calendar of the restaurant's reference timezone.
///
/// All timestamps are stored in UTC. Order numbers and daily report rows are
/// keyed by the calendar date the timestamp falls on in this timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessClock {
    tz: Tz,
}

impl BusinessClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Clock pinned to UTC
    pub fn utc() -> Self {
        Self { tz: Tz::UTC }
    }

    /// Parse an IANA timezone name such as `Asia/Jakarta`
    pub fn from_name(name: &str) -> Result<Self> {
        name.parse::<Tz>()
            .map(Self::new)
            .map_err(|_| AppError::Configuration(format!("Unknown timezone: {}", name)))
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Calendar date of a UTC instant in the reference timezone
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.tz).date_naive()
    }

    /// Today's calendar date for the given "now"
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        self.date_of(now)
    }

    /// First instant of a calendar day, as UTC
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        let midnight = date.and_time(NaiveTime::MIN);
        self.resolve_local(midnight)
            // Midnight can fall into a DST gap in a handful of zones
            .or_else(|| self.resolve_local(midnight + Duration::hours(1)))
            .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
    }

    /// Last millisecond of a calendar day, as UTC
    pub fn end_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        match date.succ_opt() {
            Some(next) => self.start_of_day(next) - Duration::milliseconds(1),
            None => self.start_of_day(date) + Duration::days(1) - Duration::milliseconds(1),
        }
    }

    /// Closed window covering whole calendar days `from..=to`
    pub fn days_window(&self, from: NaiveDate, to: NaiveDate) -> TimeWindow {
        TimeWindow::closed(self.start_of_day(from), self.end_of_day(to))
    }

    /// Day window for optional list filters; a missing bound means today
    pub fn optional_days_window(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Result<Option<TimeWindow>> {
        if from.is_none() && to.is_none() {
            return Ok(None);
        }

        let today = self.today(now);
        let from = from.unwrap_or(today);
        let to = to.unwrap_or(today);
        if from > to {
            return Err(AppError::validation("from must not be after to"));
        }

        Ok(Some(self.days_window(from, to)))
    }

    /// Format a timestamp for printed receipts
    pub fn format_local(&self, instant: DateTime<Utc>, pattern: &str) -> String {
        instant.with_timezone(&self.tz).format(pattern).to_string()
    }

    fn resolve_local(&self, local: NaiveDateTime) -> Option<DateTime<Utc>> {
        self.tz
            .from_local_datetime(&local)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

impl Default for BusinessClock {
    fn default() -> Self {
        Self::utc()
    }
}

/// A span of UTC instants used for range queries.
///
/// The start is always inclusive. The end is inclusive for report ranges and
/// exclusive for the comparison period that ends where the report begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub end_inclusive: bool,
}

impl TimeWindow {
    /// `[start, end]`
    pub fn closed(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            end_inclusive: true,
        }
    }

    /// `[start, end)`
    pub fn half_open(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            end_inclusive: false,
        }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start
            && if self.end_inclusive {
                instant <= self.end
            } else {
                instant < self.end
            }
    }
}

/// `YYYYMMDD`, the suffix used by order numbers
pub fn compact_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// `YYYY-MM-DD`, the key used by daily report rows
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format timestamp as ISO 8601 UTC for API responses
pub fn format_iso8601(utc_time: DateTime<Utc>) -> String {
    utc_time.to_rfc3339()
}
