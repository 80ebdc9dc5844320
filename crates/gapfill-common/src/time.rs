//! Date windows for the analysis period and the expedition used for validation.

use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Check if a date falls inside the range (both ends inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered, counting both ends. Zero for an inverted range.
    pub fn days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(0)
    }

    /// Iterate over every day of the range.
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..self.days()).map(move |offset| start + TimeDelta::days(offset))
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.start > self.end {
            return Err(format!(
                "start date {} is after end date {}",
                self.start, self.end
            ));
        }
        Ok(())
    }
}

/// In situ sampling window.
///
/// Dates inside the window widened by `delta_days` must be present in the
/// reconstruction even when the satellite record has no valid pixel for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpeditionWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Number of surrounding days to reconstruct on each side
    pub delta_days: i64,
}

impl ExpeditionWindow {
    /// The expedition dates widened by `delta_days` on both sides.
    ///
    /// Fails when the widened window falls outside the representable dates.
    pub fn reconstruction_window(&self) -> Result<DateRange> {
        self.widened().ok_or_else(|| {
            ConfigError::invalid(format!(
                "expedition widened by {} days is out of the supported date range",
                self.delta_days
            ))
        })
    }

    /// Whether a date has to be kept in the reconstructed series.
    pub fn must_reconstruct(&self, date: NaiveDate) -> bool {
        // Day differences between valid dates always fit in i64.
        let before = self.start.signed_duration_since(date).num_days();
        let after = date.signed_duration_since(self.end).num_days();
        before <= self.delta_days && after <= self.delta_days
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.delta_days < 0 {
            return Err("expedition delta_days must be >= 0".to_string());
        }
        DateRange::new(self.start, self.end).validate()?;
        if self.widened().is_none() {
            return Err(format!(
                "delta_days {} widens the window past the supported date range",
                self.delta_days
            ));
        }
        Ok(())
    }

    fn widened(&self) -> Option<DateRange> {
        let delta = TimeDelta::try_days(self.delta_days)?;
        let start = self.start.checked_sub_signed(delta)?;
        let end = self.end.checked_add_signed(delta)?;
        Some(DateRange::new(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range_days() {
        let range = DateRange::new(date(2018, 5, 10), date(2018, 6, 9));
        assert_eq!(range.days(), 31);
        assert_eq!(range.iter_days().count(), 31);
        assert_eq!(range.iter_days().last(), Some(date(2018, 6, 9)));
    }

    #[test]
    fn test_inverted_range() {
        let range = DateRange::new(date(2019, 1, 2), date(2019, 1, 1));
        assert_eq!(range.days(), 0);
        assert!(range.validate().is_err());
    }

    #[test]
    fn test_reconstruction_window() {
        let window = ExpeditionWindow {
            start: date(2018, 5, 10),
            end: date(2018, 6, 9),
            delta_days: 3,
        };
        let widened = window.reconstruction_window().unwrap();
        assert_eq!(widened.start, date(2018, 5, 7));
        assert_eq!(widened.end, date(2018, 6, 12));

        assert!(window.must_reconstruct(date(2018, 5, 7)));
        assert!(window.must_reconstruct(date(2018, 6, 12)));
        assert!(!window.must_reconstruct(date(2018, 5, 6)));
        assert!(!window.must_reconstruct(date(2018, 6, 13)));
    }

    #[test]
    fn test_huge_delta_rejected() {
        let window = ExpeditionWindow {
            start: date(2018, 5, 10),
            end: date(2018, 6, 9),
            delta_days: 200_000_000,
        };
        assert!(window.validate().is_err());
        assert!(matches!(
            window.reconstruction_window(),
            Err(ConfigError::Invalid(_))
        ));
        // membership still answers without building the window
        assert!(window.must_reconstruct(date(2018, 5, 20)));
        assert!(window.must_reconstruct(NaiveDate::MIN));

        let window = ExpeditionWindow {
            delta_days: i64::MAX,
            ..window
        };
        assert!(window.validate().is_err());
        assert!(window.reconstruction_window().is_err());
    }
}
