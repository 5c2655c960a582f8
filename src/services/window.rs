//! Timeframe tokens and the concrete date windows they resolve to.
//!
//! Month and year offsets use calendar arithmetic (`chrono::Months`), so
//! "6 months before 31 August" lands on the last day of February rather
//! than overflowing into March, and "3 months back" is never a fixed 90 days.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Months, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use crate::errors::AppError;

/// A `[start, end]` range used to filter records.
///
/// Windows built by the timeframe resolvers are closed on both ends. A window
/// produced by [`TimeWindow::previous`] excludes its end, which is the start of
/// the window it precedes, so a record on that boundary is counted once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(skip)]
    end_exclusive: bool,
}

impl TimeWindow {
    pub fn closed(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            end_exclusive: false,
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Window of equal length ending where this one starts.
    pub fn previous(&self) -> Self {
        Self {
            start: self.start - self.duration(),
            end: self.start,
            end_exclusive: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end || (self.end_exclusive && self.start == self.end)
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        if self.is_empty() || at < self.start {
            return false;
        }
        if self.end_exclusive {
            at < self.end
        } else {
            at <= self.end
        }
    }

    /// Every calendar day touched by the window, in ascending order.
    pub fn days(&self) -> Vec<NaiveDate> {
        if self.is_empty() {
            return Vec::new();
        }
        self.start
            .date_naive()
            .iter_days()
            .take_while(|day| *day <= self.end.date_naive())
            .collect()
    }
}

/// Current window plus the equal-length window before it, if one exists.
#[derive(Debug, Clone, Copy)]
pub struct PeriodWindows {
    pub current: TimeWindow,
    pub previous: Option<TimeWindow>,
}

/// Timeframes accepted by the company dashboard metrics endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricsTimeframe {
    LastYear,
    #[serde(rename = "last-6-month")]
    LastSixMonths,
    #[serde(rename = "last-3-month")]
    LastThreeMonths,
    AllTime,
}

impl MetricsTimeframe {
    /// Resolve a query token. Missing or unknown tokens mean all-time.
    pub fn parse(token: Option<&str>) -> Self {
        match token.map(str::trim) {
            Some("last-year") => Self::LastYear,
            Some("last-6-month") => Self::LastSixMonths,
            Some("last-3-month") => Self::LastThreeMonths,
            _ => Self::AllTime,
        }
    }

    fn months_back(self) -> Option<u32> {
        match self {
            Self::LastYear => Some(12),
            Self::LastSixMonths => Some(6),
            Self::LastThreeMonths => Some(3),
            Self::AllTime => None,
        }
    }

    pub fn windows(self, now: DateTime<Utc>) -> PeriodWindows {
        let start = self
            .months_back()
            .and_then(|months| now.checked_sub_months(Months::new(months)));

        match start {
            Some(start) => {
                let current = TimeWindow::closed(start, now);
                PeriodWindows {
                    current,
                    previous: Some(current.previous()),
                }
            }
            None => PeriodWindows {
                current: TimeWindow::closed(DateTime::<Utc>::UNIX_EPOCH, now),
                previous: None,
            },
        }
    }
}

/// Timeframes accepted by the project chart endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartTimeframe {
    ThreeMonths,
    SixMonths,
    OneYear,
}

impl ChartTimeframe {
    pub const VALID: [&'static str; 3] = ["3months", "6months", "1year"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ThreeMonths => "3months",
            Self::SixMonths => "6months",
            Self::OneYear => "1year",
        }
    }

    fn months_back(self) -> u32 {
        match self {
            Self::ThreeMonths => 3,
            Self::SixMonths => 6,
            Self::OneYear => 12,
        }
    }

    /// Day-aligned window: midnight of the first day through 23:59:59.999 today.
    pub fn window(self, now: DateTime<Utc>) -> TimeWindow {
        let today = now.date_naive();
        let first_day = today
            .checked_sub_months(Months::new(self.months_back()))
            .unwrap_or(NaiveDate::MIN);

        let start = first_day.and_time(NaiveTime::MIN).and_utc();
        let end = today.and_time(NaiveTime::MIN).and_utc() + Duration::days(1)
            - Duration::milliseconds(1);
        TimeWindow::closed(start, end)
    }
}

impl FromStr for ChartTimeframe {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "3months" => Ok(Self::ThreeMonths),
            "6months" => Ok(Self::SixMonths),
            "1year" => Ok(Self::OneYear),
            other => Err(AppError::Validation(format!(
                "Invalid timeframe '{other}'. Valid options are: {}",
                Self::VALID.join(", ")
            ))),
        }
    }
}

impl fmt::Display for ChartTimeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ChartTimeframe {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
