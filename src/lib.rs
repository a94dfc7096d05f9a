// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Schedule time axis
//!
//! This crate keeps the discrete time axis of a reservoir-simulation
//! schedule: the ordered report steps declared by a deck's date records and
//! time-step records, and the calendar boundaries between them.
//!
//! # Core types
//!
//! - [`TimeMap`] — strictly increasing report steps plus first-of-month and
//!   first-of-year index lists.
//! - [`BoundarySequence`] — selects every n-th month/year boundary from an
//!   offset on, for periodic reporting.
//! - [`DateRecord`] / [`TimeStepRecord`] — typed deck records consumed by the
//!   batch appenders.
//! - [`TimeMapError`] — the single error type of the crate.
//!
//! # Calendar helpers
//!
//! The [`calendar`] module parses deck literals and steps instants forward:
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`calendar::time_from_literal`] | `10 'MAR' 2015 '06:30:00'` → [`Instant`] |
//! | [`calendar::day_time_from_literal`] | `HH:MM:SS[.fff]` → offset from midnight |
//! | [`calendar::parse_duration`] | value + unit → seconds |
//! | [`calendar::forward`] | instant + seconds |
//! | [`calendar::forward_months`] | instant + calendar months |
//! | [`calendar::mkdate`] | year/month/day → midnight |
//!
//! # Example
//!
//! ```rust
//! use timemap::{BoundarySequence, DateRecord, TimeMap, TimeStepRecord};
//!
//! let mut map = TimeMap::from_date(1, "JAN", 2020).unwrap();
//! map.add_from_tstep_records(&[TimeStepRecord::days(14.0), TimeStepRecord::days(17.0)])
//!     .unwrap();
//! map.add_from_dates_records(&[DateRecord::new(1, "MAR", 2020)]).unwrap();
//!
//! assert_eq!(map.first_timestep_months(), &[0, 2, 3]);
//! assert!(map.is_boundary_step(2, &BoundarySequence::months()).unwrap());
//! ```

pub mod calendar;
mod error;
mod record;
mod sequence;
mod timemap;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use calendar::Instant;
pub use error::{Result, TimeMapError};
pub use record::{DateRecord, TimeStepRecord, DEFAULT_STEP_UNIT, DEFAULT_TIME_OF_DAY};
pub use sequence::{BoundarySequence, CalendarUnit};
pub use timemap::{TimeMap, DEFAULT_START};
