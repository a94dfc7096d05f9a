// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar helpers for deck date and duration literals.
//!
//! Everything here is a pure function over [`Instant`] values (UTC,
//! whole-second resolution). Leap years and month lengths come from
//! `chrono`'s proleptic Gregorian calendar, never from hand-written
//! modular arithmetic.
//!
//! ```rust
//! use timemap::calendar::{mkdate, time_from_literal};
//!
//! let t = time_from_literal(1, "JLY", 2015, "06:30:00.250").unwrap();
//! assert!(t > mkdate(2015, 7, 1).unwrap());
//! ```

use chrono::{DateTime, Duration, Months, NaiveDate, SubsecRound, Utc};
use qtty::Seconds;

use crate::error::{Result, TimeMapError};

/// An absolute point on the schedule axis (UTC, whole seconds).
pub type Instant = DateTime<Utc>;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: f64 = 86_400.0;

// ── Month names ───────────────────────────────────────────────────────────

/// Deck month abbreviations and their 1-based month numbers.
///
/// Lookup is case-sensitive. `JLY` is the format's alternate spelling of
/// July and maps to the same month as `JUL`.
static MONTH_INDICES: [(&str, u32); 13] = [
    ("JAN", 1),
    ("FEB", 2),
    ("MAR", 3),
    ("APR", 4),
    ("MAY", 5),
    ("JUN", 6),
    ("JUL", 7),
    ("JLY", 7),
    ("AUG", 8),
    ("SEP", 9),
    ("OCT", 10),
    ("NOV", 11),
    ("DEC", 12),
];

/// Resolve a deck month abbreviation (`"JAN"` .. `"DEC"`) to its month number.
pub fn month_index(name: &str) -> Result<u32> {
    MONTH_INDICES
        .iter()
        .find(|(abbrev, _)| *abbrev == name)
        .map(|&(_, index)| index)
        .ok_or_else(|| TimeMapError::UnknownMonth {
            name: name.to_string(),
        })
}

// ── Date construction ─────────────────────────────────────────────────────

/// Midnight UTC of the given calendar date.
///
/// Fails with [`TimeMapError::InvalidDate`] for dates that do not exist
/// (February 30th, month 13, day 0, ...).
pub fn mkdate(year: i32, month: u32, day: u32) -> Result<Instant> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or(TimeMapError::InvalidDate { year, month, day })
}

/// Parse a deck time-of-day literal `HH:MM:SS[.fff]` into an offset from
/// midnight.
///
/// Fractional seconds are truncated. Hours must be below 24, minutes and
/// seconds below 60.
pub fn day_time_from_literal(literal: &str) -> Result<Duration> {
    let malformed = || TimeMapError::MalformedTime {
        literal: literal.to_string(),
    };

    let (clock, fraction) = match literal.split_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (literal, None),
    };
    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
    }

    let mut fields = clock.split(':');
    let mut next_field = |limit: i64| -> Result<i64> {
        let field = fields.next().ok_or_else(malformed)?;
        if field.is_empty() || field.len() > 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let value: i64 = field.parse().map_err(|_| malformed())?;
        if value >= limit {
            return Err(malformed());
        }
        Ok(value)
    };
    let hours = next_field(24)?;
    let minutes = next_field(60)?;
    let seconds = next_field(60)?;
    if fields.next().is_some() {
        return Err(malformed());
    }

    Ok(Duration::seconds(
        hours * SECONDS_PER_HOUR + minutes * SECONDS_PER_MINUTE + seconds,
    ))
}

/// Compose a deck date literal (`day`, month abbreviation, `year`,
/// `HH:MM:SS[.fff]`) into an absolute instant.
pub fn time_from_literal(day: u32, month: &str, year: i32, time_of_day: &str) -> Result<Instant> {
    let midnight = mkdate(year, month_index(month)?, day)?;
    let offset = day_time_from_literal(time_of_day)?;
    midnight
        .checked_add_signed(offset)
        .ok_or(TimeMapError::OutOfRange)
}

/// [`time_from_literal`] at midnight (`"00:00:00.000"`).
pub fn date_from_literal(day: u32, month: &str, year: i32) -> Result<Instant> {
    time_from_literal(day, month, year, "00:00:00.000")
}

// ── Durations ─────────────────────────────────────────────────────────────

/// Seconds per unit for a duration unit tag (case-insensitive).
///
/// There is no single-letter minute tag: `M` reads as months in deck data.
fn unit_seconds(unit: &str) -> Option<f64> {
    match unit.to_ascii_uppercase().as_str() {
        "DAY" | "DAYS" | "D" => Some(SECONDS_PER_DAY),
        "HOUR" | "HOURS" | "HR" | "H" => Some(SECONDS_PER_HOUR as f64),
        "MINUTE" | "MINUTES" | "MIN" => Some(SECONDS_PER_MINUTE as f64),
        "SECOND" | "SECONDS" | "SEC" | "S" => Some(1.0),
        _ => None,
    }
}

/// Convert a numeric duration literal and its unit into seconds.
///
/// The value must be finite and non-negative; a zero-length duration is
/// accepted here and rejected later by [`TimeMap::add_tstep`](crate::TimeMap::add_tstep).
pub fn parse_duration(value: f64, unit: &str) -> Result<Seconds> {
    let factor = unit_seconds(unit).ok_or_else(|| TimeMapError::InvalidUnit {
        unit: unit.to_string(),
    })?;
    let seconds = value * factor;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(TimeMapError::InvalidDuration { seconds });
    }
    Ok(Seconds::new(seconds))
}

// ── Forward stepping ──────────────────────────────────────────────────────

/// Drop any sub-second part so instants stay on the whole-second grid.
#[inline]
pub(crate) fn truncate_to_second(t: Instant) -> Instant {
    t.trunc_subsecs(0)
}

/// `t0` moved by `seconds` (negative values step backwards).
pub fn forward(t0: Instant, seconds: i64) -> Result<Instant> {
    let step = Duration::try_seconds(seconds).ok_or(TimeMapError::OutOfRange)?;
    t0.checked_add_signed(step).ok_or(TimeMapError::OutOfRange)
}

/// `t0` moved by `hours`, `minutes` and `seconds`.
pub fn forward_hms(t0: Instant, hours: i64, minutes: i64, seconds: i64) -> Result<Instant> {
    let total = hours
        .checked_mul(SECONDS_PER_HOUR)
        .zip(minutes.checked_mul(SECONDS_PER_MINUTE))
        .and_then(|(h, m)| h.checked_add(m))
        .and_then(|hm| hm.checked_add(seconds))
        .ok_or(TimeMapError::OutOfRange)?;
    forward(t0, total)
}

/// `t0` moved by whole calendar months.
///
/// The day of month is clamped to the length of the target month, so
/// January 31st plus one month is the last day of February.
pub fn forward_months(t0: Instant, months: u32) -> Result<Instant> {
    t0.checked_add_months(Months::new(months))
        .ok_or(TimeMapError::OutOfRange)
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};
    use proptest::prelude::*;

    #[test]
    fn month_lookup_covers_all_abbreviations() {
        let names = [
            "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
        ];
        for (i, name) in names.iter().enumerate() {
            assert_eq!(month_index(name).unwrap(), i as u32 + 1);
        }
        assert_eq!(month_index("JLY").unwrap(), 7);
    }

    #[test]
    fn month_lookup_is_case_sensitive() {
        assert_eq!(
            month_index("Jan"),
            Err(TimeMapError::UnknownMonth {
                name: "Jan".to_string()
            })
        );
        assert!(month_index("JANUARY").is_err());
        assert!(month_index("").is_err());
    }

    #[test]
    fn mkdate_leap_years() {
        assert!(mkdate(2020, 2, 29).is_ok());
        assert!(mkdate(2000, 2, 29).is_ok());
        assert_eq!(
            mkdate(2021, 2, 30),
            Err(TimeMapError::InvalidDate {
                year: 2021,
                month: 2,
                day: 30
            })
        );
        assert!(mkdate(1900, 2, 29).is_err());
        assert!(mkdate(2021, 13, 1).is_err());
        assert!(mkdate(2021, 1, 0).is_err());
    }

    #[test]
    fn mkdate_is_midnight_utc() {
        let t = mkdate(1983, 1, 1).unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(1983, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn day_time_parses_with_and_without_fraction() {
        assert_eq!(
            day_time_from_literal("00:00:00.000").unwrap(),
            Duration::zero()
        );
        assert_eq!(
            day_time_from_literal("12:30:15").unwrap(),
            Duration::seconds(12 * 3600 + 30 * 60 + 15)
        );
        assert_eq!(
            day_time_from_literal("1:2:3").unwrap(),
            Duration::seconds(3723)
        );
    }

    #[test]
    fn day_time_truncates_fraction() {
        assert_eq!(
            day_time_from_literal("23:59:59.999").unwrap(),
            Duration::seconds(86_399)
        );
    }

    #[test]
    fn day_time_rejects_bad_structure() {
        for literal in [
            "", "12", "12:00", "12:00:00:00", "aa:00:00", "12:00:00.", "12:00:00.x1", "24:00:00",
            "12:60:00", "12:00:60", "-1:00:00", "12::00", "123:00:00",
        ] {
            assert_eq!(
                day_time_from_literal(literal),
                Err(TimeMapError::MalformedTime {
                    literal: literal.to_string()
                }),
                "{literal:?} should be rejected"
            );
        }
    }

    #[test]
    fn time_from_literal_composes_date_and_time() {
        let t = time_from_literal(10, "MAR", 2015, "06:30:45.500").unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2015, 3, 10, 6, 30, 45).unwrap());
        assert_eq!(t.nanosecond(), 0);
    }

    #[test]
    fn time_from_literal_reports_first_failure() {
        assert!(matches!(
            time_from_literal(1, "XYZ", 2015, "00:00:00"),
            Err(TimeMapError::UnknownMonth { .. })
        ));
        assert!(matches!(
            time_from_literal(31, "APR", 2015, "00:00:00"),
            Err(TimeMapError::InvalidDate { .. })
        ));
        assert!(matches!(
            time_from_literal(1, "APR", 2015, "noon"),
            Err(TimeMapError::MalformedTime { .. })
        ));
    }

    #[test]
    fn date_from_literal_is_midnight() {
        assert_eq!(
            date_from_literal(1, "JAN", 2000).unwrap(),
            mkdate(2000, 1, 1).unwrap()
        );
    }

    #[test]
    fn parse_duration_units() {
        assert_eq!(parse_duration(1.5, "DAYS").unwrap(), Seconds::new(129_600.0));
        assert_eq!(parse_duration(2.0, "hours").unwrap(), Seconds::new(7_200.0));
        assert_eq!(parse_duration(3.0, "MIN").unwrap(), Seconds::new(180.0));
        assert_eq!(parse_duration(42.0, "s").unwrap(), Seconds::new(42.0));
        assert_eq!(parse_duration(0.0, "DAY").unwrap(), Seconds::new(0.0));
    }

    #[test]
    fn single_letter_m_is_not_minutes() {
        assert_eq!(
            parse_duration(1.0, "M"),
            Err(TimeMapError::InvalidUnit {
                unit: "M".to_string()
            })
        );
        assert!(parse_duration(1.0, "m").is_err());
    }

    #[test]
    fn parse_duration_rejects_unknown_unit() {
        assert_eq!(
            parse_duration(1.0, "WEEKS"),
            Err(TimeMapError::InvalidUnit {
                unit: "WEEKS".to_string()
            })
        );
    }

    #[test]
    fn parse_duration_rejects_negative_and_non_finite() {
        assert!(matches!(
            parse_duration(-1.0, "DAY"),
            Err(TimeMapError::InvalidDuration { .. })
        ));
        assert!(matches!(
            parse_duration(f64::NAN, "DAY"),
            Err(TimeMapError::InvalidDuration { .. })
        ));
        assert!(matches!(
            parse_duration(f64::INFINITY, "SECONDS"),
            Err(TimeMapError::InvalidDuration { .. })
        ));
    }

    #[test]
    fn forward_crosses_leap_day() {
        let t = mkdate(2020, 2, 28).unwrap();
        let next = forward(t, 86_400).unwrap();
        assert_eq!((next.month(), next.day()), (2, 29));
        let after = forward(next, 86_400).unwrap();
        assert_eq!((after.month(), after.day()), (3, 1));
    }

    #[test]
    fn forward_hms_composes() {
        let t = mkdate(2020, 12, 31).unwrap();
        let next = forward_hms(t, 23, 59, 60).unwrap();
        assert_eq!(next, mkdate(2021, 1, 1).unwrap());
        assert_eq!(forward_hms(t, 1, 2, 3).unwrap(), forward(t, 3723).unwrap());
    }

    #[test]
    fn forward_overflow_is_an_error() {
        let t = mkdate(2020, 1, 1).unwrap();
        assert_eq!(forward(t, i64::MAX), Err(TimeMapError::OutOfRange));
        assert_eq!(
            forward_hms(t, i64::MAX, 0, 0),
            Err(TimeMapError::OutOfRange)
        );
    }

    #[test]
    fn forward_months_clamps_day() {
        let t = mkdate(2020, 1, 31).unwrap();
        assert_eq!(forward_months(t, 1).unwrap(), mkdate(2020, 2, 29).unwrap());
        assert_eq!(forward_months(t, 13).unwrap(), mkdate(2021, 2, 28).unwrap());
        assert_eq!(forward_months(t, 0).unwrap(), t);
    }

    #[test]
    fn truncate_drops_sub_seconds() {
        let t = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 5).unwrap() + Duration::milliseconds(999);
        assert_eq!(
            truncate_to_second(t),
            Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 5).unwrap()
        );
    }

    proptest! {
        /// Every calendar date in 1900..=2100 survives literal parsing.
        #[test]
        fn date_literal_round_trips(year in 1900i32..=2100, month in 1u32..=12, day in 1u32..=31) {
            prop_assume!(NaiveDate::from_ymd_opt(year, month, day).is_some());
            let name = MONTH_INDICES
                .iter()
                .find(|(_, index)| *index == month)
                .map(|(abbrev, _)| *abbrev)
                .unwrap();
            let t = date_from_literal(day, name, year).unwrap();
            prop_assert_eq!((t.year(), t.month(), t.day()), (year, month, day));
        }

        #[test]
        fn forward_zero_is_identity(secs in -4_000_000_000i64..4_000_000_000) {
            let t = DateTime::from_timestamp(secs, 0).unwrap();
            prop_assert_eq!(forward(t, 0).unwrap(), t);
        }

        #[test]
        fn forward_is_additive(a in 0i64..1_000_000_000, b in 0i64..1_000_000_000) {
            let t = mkdate(1950, 1, 1).unwrap();
            let stepped = forward(forward(t, a).unwrap(), b).unwrap();
            prop_assert_eq!(stepped, forward(t, a + b).unwrap());
        }
    }
}
