// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Typed schedule records as handed over by the deck reader.
//!
//! The deck tokenizer lives elsewhere; these structs carry the already
//! split field values of one date record or one time-step entry.

use chrono::Duration;
use qtty::Seconds;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::calendar::{self, Instant};
use crate::error::{Result, TimeMapError};

/// Time of day assumed when a date record does not carry one.
pub const DEFAULT_TIME_OF_DAY: &str = "00:00:00.000";

/// Unit assumed when a time-step entry does not name one.
pub const DEFAULT_STEP_UNIT: &str = "DAYS";

/// One date record: `day`, month abbreviation, `year`, optional time of day.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DateRecord {
    /// Day of month, 1-based.
    pub day: u32,
    /// Month abbreviation (`JAN` .. `DEC`, or `JLY`).
    pub month: String,
    /// Calendar year.
    pub year: i32,
    /// `HH:MM:SS[.fff]`; midnight when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub time: Option<String>,
}

impl DateRecord {
    /// Date record at midnight.
    pub fn new(day: u32, month: impl Into<String>, year: i32) -> Self {
        Self {
            day,
            month: month.into(),
            year,
            time: None,
        }
    }

    /// Attach an explicit `HH:MM:SS[.fff]` time of day.
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// The absolute instant this record denotes.
    pub fn to_instant(&self) -> Result<Instant> {
        calendar::time_from_literal(
            self.day,
            &self.month,
            self.year,
            self.time.as_deref().unwrap_or(DEFAULT_TIME_OF_DAY),
        )
    }
}

/// One time-step entry: a length and an optional unit (days when absent).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeStepRecord {
    /// Step length in `unit`.
    pub value: f64,
    /// Unit tag; [`DEFAULT_STEP_UNIT`] when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub unit: Option<String>,
}

impl TimeStepRecord {
    /// A step of `value` in the given unit.
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: Some(unit.into()),
        }
    }

    /// A step of `value` days.
    pub fn days(value: f64) -> Self {
        Self { value, unit: None }
    }

    /// Step length in seconds.
    pub fn seconds(&self) -> Result<Seconds> {
        calendar::parse_duration(self.value, self.unit.as_deref().unwrap_or(DEFAULT_STEP_UNIT))
    }

    /// Step length rounded to the nearest whole second.
    pub fn duration(&self) -> Result<Duration> {
        let seconds = self.seconds()?.value();
        Duration::try_seconds(seconds.round() as i64).ok_or(TimeMapError::OutOfRange)
    }
}
