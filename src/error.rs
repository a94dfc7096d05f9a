// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types for the time axis and its calendar helpers.

use chrono::{DateTime, Utc};

/// Error type for all fallible operations in this crate.
///
/// Every variant describes a defect in upstream deck data or a bad query
/// index. None of them leaves a [`TimeMap`](crate::TimeMap) partially
/// modified.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimeMapError {
    /// Returned when an appended instant is not strictly after the last one.
    #[error("time {attempted} is not after the last report step {previous}")]
    Ordering {
        /// The current last instant of the axis.
        previous: DateTime<Utc>,
        /// The instant that was rejected.
        attempted: DateTime<Utc>,
    },

    /// Returned when a relative step is negative, zero, or not finite.
    #[error("invalid time step: {seconds} s (must be a positive number of seconds)")]
    InvalidDuration {
        /// The offending step length in seconds.
        seconds: f64,
    },

    /// Returned when a query index is past the end of the axis.
    #[error("index {index} out of range for {len} entries")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of entries available for this query.
        len: usize,
    },

    /// Returned when a month name is not one of the deck abbreviations.
    #[error("unknown month name: {name:?}")]
    UnknownMonth {
        /// The unrecognised month name.
        name: String,
    },

    /// Returned when a time-of-day literal is not `HH:MM:SS[.fff]`.
    #[error("malformed time of day: {literal:?} (expected HH:MM:SS[.fff])")]
    MalformedTime {
        /// The rejected literal.
        literal: String,
    },

    /// Returned when a duration unit is not recognised.
    #[error("invalid time unit: {unit:?}")]
    InvalidUnit {
        /// The rejected unit tag.
        unit: String,
    },

    /// Returned when a year/month/day triple is not a calendar date.
    #[error("invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate {
        /// Calendar year.
        year: i32,
        /// Month number, 1-based.
        month: u32,
        /// Day of month, 1-based.
        day: u32,
    },

    /// Returned when a query argument is invalid (e.g. zero frequency).
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument.
        reason: &'static str,
    },

    /// Returned when instant arithmetic leaves chrono's representable range.
    #[error("time arithmetic out of representable range")]
    OutOfRange,
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TimeMapError>;
