//! Reporting windows.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Window length used when the caller gives none or an invalid one.
pub const DEFAULT_PERIOD_HOURS: i64 = 24;

/// Longest accepted window, thirty days.
pub const MAX_PERIOD_HOURS: i64 = 24 * 30;

/// Returns true if `hours` is an accepted window length.
#[must_use]
pub const fn is_valid_period_hours(hours: i64) -> bool {
    hours > 0 && hours <= MAX_PERIOD_HOURS
}

/// A closed time range that availability is reported over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingWindow {
    /// Window start.
    pub start: DateTime<Utc>,
    /// Window end.
    pub end: DateTime<Utc>,
}

impl ReportingWindow {
    /// Creates a window from explicit bounds.
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The `hours` leading up to `now`, with no validation.
    #[must_use]
    pub fn trailing(hours: i64, now: DateTime<Utc>) -> Self {
        Self::new(now - Duration::hours(hours), now)
    }

    /// The window for a caller-supplied `periodHours`.
    ///
    /// Missing values and values outside `1..=720` fall back to
    /// [`DEFAULT_PERIOD_HOURS`] instead of producing an empty or oversized
    /// window.
    #[must_use]
    pub fn from_period_hours(period_hours: Option<i64>, now: DateTime<Utc>) -> Self {
        Self::from_period_hours_or(period_hours, DEFAULT_PERIOD_HOURS, now)
    }

    /// Like [`from_period_hours`](Self::from_period_hours) with a custom fallback.
    ///
    /// An invalid `fallback` is itself replaced by [`DEFAULT_PERIOD_HOURS`].
    #[must_use]
    pub fn from_period_hours_or(
        period_hours: Option<i64>,
        fallback: i64,
        now: DateTime<Utc>,
    ) -> Self {
        let fallback = if is_valid_period_hours(fallback) {
            fallback
        } else {
            DEFAULT_PERIOD_HOURS
        };
        let hours = match period_hours {
            Some(hours) if is_valid_period_hours(hours) => hours,
            Some(hours) => {
                debug!(requested = hours, fallback, "period hours out of range");
                fallback
            }
            None => fallback,
        };
        Self::trailing(hours, now)
    }

    /// Parses a raw `periodHours` value as given on a query string or the
    /// command line.
    ///
    /// Unparseable input falls back to `fallback` like an out-of-range value;
    /// blank input counts as absent.
    #[must_use]
    pub fn from_query(raw: Option<&str>, fallback: i64, now: DateTime<Utc>) -> Self {
        let hours = raw
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(|raw| raw.parse::<i64>().unwrap_or(0));
        Self::from_period_hours_or(hours, fallback, now)
    }

    /// Returns the window length.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns true if the window has no positive length.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.duration() <= Duration::zero()
    }
}
