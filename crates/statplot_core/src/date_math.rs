//! Calendar helpers for per-day climate aggregation.
//!
//! Observations from different years are compared on their calendar day
//! (month and day) alone. Feb 29 is dropped before aggregation, so every
//! year maps onto the same 365-day calendar and each `MonthDay` has a fixed
//! zero-based ordinal that doubles as the chart's x coordinate.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Days in each month of a common (non-leap) year.
const COMMON_YEAR_DAYS: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Number of calendar days once Feb 29 is excluded.
pub const DAYS_PER_YEAR: u16 = 365;

/// Three-letter month abbreviations used for axis labels.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[inline]
pub fn is_leap_day(date: Date) -> bool {
    date.month() == 2 && date.day() == 29
}

/// A calendar day independent of year. Never Feb 29.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthDay {
    pub month: u8,
    pub day: u8,
}

impl MonthDay {
    /// Calendar day of `date`, or `None` for Feb 29.
    pub fn from_date(date: Date) -> Option<Self> {
        if is_leap_day(date) {
            return None;
        }
        Some(Self {
            month: date.month() as u8,
            day: date.day() as u8,
        })
    }

    /// Zero-based position in the 365-day calendar (Jan 1 = 0, Dec 31 = 364).
    pub fn ordinal(self) -> u16 {
        let preceding: u16 = COMMON_YEAR_DAYS[..usize::from(self.month - 1)]
            .iter()
            .map(|&d| u16::from(d))
            .sum();
        preceding + u16::from(self.day) - 1
    }

    /// Inverse of [`MonthDay::ordinal`]. Returns `None` past Dec 31.
    pub fn from_ordinal(ordinal: u16) -> Option<Self> {
        let mut remaining = ordinal;
        for (idx, &days) in COMMON_YEAR_DAYS.iter().enumerate() {
            let days = u16::from(days);
            if remaining < days {
                return Some(Self {
                    month: idx as u8 + 1,
                    day: remaining as u8 + 1,
                });
            }
            remaining -= days;
        }
        None
    }

    /// Date of this calendar day in `year`.
    pub fn in_year(self, year: i16) -> Date {
        jiff::civil::date(year, self.month as i8, self.day as i8)
    }
}

impl std::fmt::Display for MonthDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// Ordinals of the first day of each month, for month-start axis ticks.
pub fn month_start_ordinals() -> [u16; 12] {
    let mut starts = [0u16; 12];
    let mut acc = 0u16;
    for (idx, &days) in COMMON_YEAR_DAYS.iter().enumerate() {
        starts[idx] = acc;
        acc += u16::from(days);
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_leap_day_has_no_month_day() {
        assert!(MonthDay::from_date(date(2012, 2, 29)).is_none());
        assert_eq!(
            MonthDay::from_date(date(2012, 3, 1)),
            Some(MonthDay { month: 3, day: 1 })
        );
    }

    #[test]
    fn test_ordinal_bounds() {
        assert_eq!(MonthDay { month: 1, day: 1 }.ordinal(), 0);
        assert_eq!(MonthDay { month: 3, day: 1 }.ordinal(), 59);
        assert_eq!(MonthDay { month: 12, day: 31 }.ordinal(), DAYS_PER_YEAR - 1);
        assert!(MonthDay::from_ordinal(DAYS_PER_YEAR).is_none());
    }

    #[test]
    fn test_ordinal_matches_across_leap_years() {
        // Same calendar day lands on the same ordinal whether or not the year is leap
        let a = MonthDay::from_date(date(2012, 7, 4)).unwrap();
        let b = MonthDay::from_date(date(2015, 7, 4)).unwrap();
        assert_eq!(a.ordinal(), b.ordinal());
        assert_eq!(a.ordinal(), 184);
    }

    #[test]
    fn test_from_ordinal_inverts_ordinal() {
        for ordinal in 0..DAYS_PER_YEAR {
            let md = MonthDay::from_ordinal(ordinal).unwrap();
            assert_eq!(md.ordinal(), ordinal, "mismatch at {md}");
        }
    }

    #[test]
    fn test_month_starts() {
        let starts = month_start_ordinals();
        assert_eq!(starts[0], 0);
        assert_eq!(starts[1], 31);
        assert_eq!(starts[11], 334);
    }

    #[test]
    fn test_display_and_in_year() {
        let md = MonthDay { month: 2, day: 3 };
        assert_eq!(md.to_string(), "02-03");
        assert_eq!(md.in_year(2015), date(2015, 2, 3));
    }
}
