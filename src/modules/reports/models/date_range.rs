use chrono::{DateTime, Duration, Months, NaiveDate, Utc};

use crate::core::{AppError, BusinessClock, Result, TimeWindow};

/// Longest report span accepted, in months
pub const MAX_RANGE_MONTHS: u32 = 12;

/// Symbolic report range picked in the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeSelector {
    Today,
    #[default]
    SevenDays,
    ThirtyDays,
    NinetyDays,
    SixMonths,
    OneYear,
    Custom,
}

impl std::str::FromStr for RangeSelector {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "today" => Ok(RangeSelector::Today),
            "7days" => Ok(RangeSelector::SevenDays),
            "30days" => Ok(RangeSelector::ThirtyDays),
            "90days" => Ok(RangeSelector::NinetyDays),
            "6months" => Ok(RangeSelector::SixMonths),
            "1year" => Ok(RangeSelector::OneYear),
            "custom" => Ok(RangeSelector::Custom),
            other => Err(AppError::validation(format!("Unknown range '{}'", other))),
        }
    }
}

impl RangeSelector {
    /// First calendar day of a symbolic range ending today
    fn first_day(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            RangeSelector::Today => Some(today),
            RangeSelector::SevenDays => today.checked_sub_signed(Duration::days(6)),
            RangeSelector::ThirtyDays => today.checked_sub_signed(Duration::days(29)),
            RangeSelector::NinetyDays => today.checked_sub_signed(Duration::days(89)),
            RangeSelector::SixMonths => today
                .checked_sub_months(Months::new(6))
                .and_then(|d| d.succ_opt()),
            RangeSelector::OneYear => today
                .checked_sub_months(Months::new(MAX_RANGE_MONTHS))
                .and_then(|d| d.succ_opt()),
            RangeSelector::Custom => None,
        }
    }
}

/// Concrete report bounds covering whole calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub days: i64,
    /// Calendar day `from` falls on
    pub first_day: NaiveDate,
}

impl ReportRange {
    /// Whole days `first..=last` in the reference timezone.
    ///
    /// `first` must come after `last - 12 months`, the longest span the
    /// `1year` selector produces.
    pub fn for_days(clock: &BusinessClock, first: NaiveDate, last: NaiveDate) -> Result<Self> {
        if first > last {
            return Err(AppError::validation(format!(
                "startDate ({}) must not be after endDate ({})",
                first, last
            )));
        }

        // Anchored on `last` so month-end clamping matches the `1year` selector
        let year_before_last = last
            .checked_sub_months(Months::new(MAX_RANGE_MONTHS))
            .ok_or_else(|| AppError::validation("endDate out of range"))?;
        if first <= year_before_last {
            return Err(AppError::validation("Date range cannot exceed 1 year"));
        }

        Ok(Self {
            from: clock.start_of_day(first),
            to: clock.end_of_day(last),
            days: (last - first).num_days() + 1,
            first_day: first,
        })
    }

    /// Resolve query parameters into concrete bounds.
    ///
    /// Both dates present means a custom range whatever the selector says.
    /// A missing selector means the last seven days.
    pub fn resolve(
        range: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
        clock: &BusinessClock,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let selector = match range.map(str::trim).filter(|r| !r.is_empty()) {
            Some(r) => r.parse()?,
            None => RangeSelector::default(),
        };

        if let (Some(start), Some(end)) = (start_date, end_date) {
            return Self::for_days(clock, parse_date(start, "startDate")?, parse_date(end, "endDate")?);
        }
        if selector == RangeSelector::Custom {
            return Err(AppError::validation(
                "Custom range requires both startDate and endDate",
            ));
        }

        let today = clock.today(now);
        let first = selector
            .first_day(today)
            .ok_or_else(|| AppError::validation("Range start out of bounds"))?;

        Self::for_days(clock, first, today)
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow::closed(self.from, self.to)
    }

    /// The same number of calendar days ending where this one starts, excluding `from`
    pub fn previous_window(&self, clock: &BusinessClock) -> TimeWindow {
        let start = self
            .first_day
            .checked_sub_signed(Duration::days(self.days))
            .map_or(self.from - Duration::days(self.days), |day| clock.start_of_day(day));
        TimeWindow::half_open(start, self.from)
    }
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::validation(format!("{} must be a date in YYYY-MM-DD format", field))
    })
}
