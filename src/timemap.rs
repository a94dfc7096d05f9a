// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The schedule time axis.
//!
//! [`TimeMap`] stores the report steps of a schedule as a strictly
//! increasing list of [`Instant`]s. Index 0 is the simulation start; every
//! later entry is appended either as an absolute date or as a step relative
//! to the current end.
//!
//! Two boundary lists are kept next to the instants: the index of the first
//! step of every new month and of every new year. They are extended on each
//! append by comparing the new instant with the previous one, so building an
//! axis of `n` steps costs `O(n)`.

use chrono::{Datelike, Duration};
use qtty::Seconds;
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

use crate::calendar::{self, Instant};
use crate::error::{Result, TimeMapError};
use crate::record::{DateRecord, TimeStepRecord};
use crate::sequence::{BoundarySequence, CalendarUnit};

/// Start date used when a deck declares none: 1 January 1983.
pub const DEFAULT_START: (i32, u32, u32) = (1983, 1, 1);

// ═══════════════════════════════════════════════════════════════════════════
// TimeMap
// ═══════════════════════════════════════════════════════════════════════════

/// Ordered report steps of a schedule plus month/year boundary indices.
///
/// Appends take `&mut self` and either succeed completely or leave the map
/// untouched. Queries take `&self`; a finished map can be shared freely.
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use timemap::{calendar::mkdate, TimeMap};
///
/// let mut map = TimeMap::new(mkdate(2020, 1, 1).unwrap());
/// map.add_time(mkdate(2020, 2, 1).unwrap()).unwrap();
/// map.add_tstep(Duration::days(10)).unwrap();
///
/// assert_eq!(map.size(), 3);
/// assert_eq!(map.first_timestep_months(), &[0, 1]);
/// assert!(map.is_first_of_month(1).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeMap {
    time_list: Vec<Instant>,
    first_timestep_months: Vec<usize>,
    first_timestep_years: Vec<usize>,
}

impl TimeMap {
    // ── constructors ──────────────────────────────────────────────────

    /// Axis with a single report step at `start` (sub-seconds dropped).
    pub fn new(start: Instant) -> Self {
        Self {
            time_list: vec![calendar::truncate_to_second(start)],
            first_timestep_months: vec![0],
            first_timestep_years: vec![0],
        }
    }

    /// Axis starting at `secs` seconds after the Unix epoch.
    pub fn from_timestamp(secs: i64) -> Result<Self> {
        chrono::DateTime::from_timestamp(secs, 0)
            .map(Self::new)
            .ok_or(TimeMapError::OutOfRange)
    }

    /// Axis starting at midnight of a deck date literal.
    pub fn from_date(day: u32, month: &str, year: i32) -> Result<Self> {
        calendar::date_from_literal(day, month, year).map(Self::new)
    }

    /// Axis starting at the deck's start record, or at [`DEFAULT_START`]
    /// when the deck declares none.
    pub fn from_start_record(start: Option<&DateRecord>) -> Result<Self> {
        let start = match start {
            Some(record) => record.to_instant()?,
            None => {
                let (year, month, day) = DEFAULT_START;
                calendar::mkdate(year, month, day)?
            }
        };
        Ok(Self::new(start))
    }

    // ── appends ───────────────────────────────────────────────────────

    /// Append an absolute report step.
    ///
    /// Fails with [`TimeMapError::Ordering`] unless `time` (truncated to whole
    /// seconds) is strictly after the current end.
    pub fn add_time(&mut self, time: Instant) -> Result<()> {
        let time = calendar::truncate_to_second(time);
        Self::check_after(self.end_time(), time)?;
        self.push(time);
        Ok(())
    }

    /// Append a report step `step` after the current end.
    ///
    /// Fails with [`TimeMapError::InvalidDuration`] unless `step` spans at
    /// least one whole second.
    pub fn add_tstep(&mut self, step: Duration) -> Result<()> {
        let next = Self::step_from(self.end_time(), step)?;
        self.push(next);
        Ok(())
    }

    /// Append one report step per date record, in order.
    ///
    /// All records are resolved and checked before anything is appended.
    #[tracing::instrument(skip_all, fields(records = records.len()))]
    pub fn add_from_dates_records(&mut self, records: &[DateRecord]) -> Result<()> {
        let mut staged = Vec::with_capacity(records.len());
        let mut last = self.end_time();
        for record in records {
            let time = calendar::truncate_to_second(record.to_instant()?);
            Self::check_after(last, time)?;
            staged.push(time);
            last = time;
        }
        self.commit(staged);
        Ok(())
    }

    /// Append one report step per time-step record, each relative to the
    /// previous one.
    ///
    /// All records are resolved and checked before anything is appended.
    #[tracing::instrument(skip_all, fields(records = records.len()))]
    pub fn add_from_tstep_records(&mut self, records: &[TimeStepRecord]) -> Result<()> {
        let mut staged = Vec::with_capacity(records.len());
        let mut last = self.end_time();
        for record in records {
            let time = Self::step_from(last, record.duration()?)?;
            staged.push(time);
            last = time;
        }
        self.commit(staged);
        Ok(())
    }

    fn check_after(previous: Instant, attempted: Instant) -> Result<()> {
        if attempted <= previous {
            return Err(TimeMapError::Ordering {
                previous,
                attempted,
            });
        }
        Ok(())
    }

    fn step_from(previous: Instant, step: Duration) -> Result<Instant> {
        let seconds = step.num_seconds();
        if seconds <= 0 {
            return Err(TimeMapError::InvalidDuration {
                seconds: step.num_milliseconds() as f64 / 1_000.0,
            });
        }
        calendar::forward(previous, seconds)
    }

    fn commit(&mut self, staged: Vec<Instant>) {
        if staged.is_empty() {
            return;
        }
        let appended = staged.len();
        self.time_list.reserve(appended);
        for time in staged {
            self.push(time);
        }
        debug!(appended, size = self.size(), end = %self.end_time(), "report steps committed");
    }

    /// Append a pre-validated instant and extend the boundary lists.
    fn push(&mut self, time: Instant) {
        let previous = self.end_time();
        let index = self.time_list.len();
        let new_year = time.year() != previous.year();
        let new_month = new_year || time.month() != previous.month();

        self.time_list.push(time);
        if new_month {
            self.first_timestep_months.push(index);
        }
        if new_year {
            self.first_timestep_years.push(index);
        }
        trace!(index, %time, new_month, new_year, "report step appended");
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Number of report steps, including the start.
    #[inline]
    pub fn size(&self) -> usize {
        self.time_list.len()
    }

    /// Index of the last report step.
    #[inline]
    pub fn last(&self) -> usize {
        self.time_list.len() - 1
    }

    /// Number of intervals between report steps.
    #[inline]
    pub fn num_timesteps(&self) -> usize {
        self.last()
    }

    /// Report step `index`, or `None` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Instant> {
        self.time_list.get(index).copied()
    }

    /// Report steps in order, starting with the simulation start.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Instant> + '_ {
        self.time_list.iter().copied()
    }

    /// All report steps as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Instant] {
        &self.time_list
    }

    /// Indices of the first report step of every month, starting with `0`.
    pub fn first_timestep_months(&self) -> &[usize] {
        &self.first_timestep_months
    }

    /// Indices of the first report step of every year, starting with `0`.
    pub fn first_timestep_years(&self) -> &[usize] {
        &self.first_timestep_years
    }

    /// Date and time at which step `index` starts.
    pub fn start_time(&self, index: usize) -> Result<Instant> {
        self.get(index).ok_or(TimeMapError::IndexOutOfRange {
            index,
            len: self.size(),
        })
    }

    /// The last report step.
    #[inline]
    pub fn end_time(&self) -> Instant {
        self.time_list[self.time_list.len() - 1]
    }

    // ── elapsed time ──────────────────────────────────────────────────

    /// Time between the start and the last report step.
    pub fn total_time(&self) -> Seconds {
        seconds_between(self.time_list[0], self.end_time())
    }

    /// Time between the start and report step `index`.
    pub fn time_passed_until(&self, index: usize) -> Result<Seconds> {
        let time = self.start_time(index)?;
        Ok(seconds_between(self.time_list[0], time))
    }

    /// Length of the step from report step `index` to `index + 1`.
    pub fn time_step_length(&self, index: usize) -> Result<Seconds> {
        if index >= self.num_timesteps() {
            return Err(TimeMapError::IndexOutOfRange {
                index,
                len: self.num_timesteps(),
            });
        }
        Ok(seconds_between(
            self.time_list[index],
            self.time_list[index + 1],
        ))
    }

    // ── boundary classification ───────────────────────────────────────

    /// Whether report step `index` is a selected month/year boundary.
    ///
    /// The nearest boundary at or before `index` is located by binary search;
    /// `index` qualifies when it is that boundary and its position in the
    /// boundary list is selected by `sequence`.
    pub fn is_boundary_step(&self, index: usize, sequence: &BoundarySequence) -> Result<bool> {
        sequence.validate()?;
        if index >= self.size() {
            return Err(TimeMapError::IndexOutOfRange {
                index,
                len: self.size(),
            });
        }

        let boundaries = self.boundaries(sequence.unit());
        let Some(position) = boundaries.partition_point(|&b| b <= index).checked_sub(1) else {
            return Ok(false);
        };
        Ok(boundaries[position] == index && sequence.selects(position))
    }

    /// [`is_boundary_step`](Self::is_boundary_step) for every month boundary
    /// after the start.
    pub fn is_first_of_month(&self, index: usize) -> Result<bool> {
        self.is_boundary_step(index, &BoundarySequence::months())
    }

    /// [`is_boundary_step`](Self::is_boundary_step) for every year boundary
    /// after the start.
    pub fn is_first_of_year(&self, index: usize) -> Result<bool> {
        self.is_boundary_step(index, &BoundarySequence::years())
    }

    fn boundaries(&self, unit: CalendarUnit) -> &[usize] {
        match unit {
            CalendarUnit::Month => &self.first_timestep_months,
            CalendarUnit::Year => &self.first_timestep_years,
        }
    }
}

#[inline]
fn seconds_between(start: Instant, end: Instant) -> Seconds {
    Seconds::new((end - start).num_seconds() as f64)
}

impl<'a> IntoIterator for &'a TimeMap {
    type Item = Instant;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Instant>>;

    fn into_iter(self) -> Self::IntoIter {
        self.time_list.iter().copied()
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────
//
// Only the instants are written. Reading replays them through `add_time`,
// so the boundary lists are rebuilt and unordered input is rejected.

#[cfg(feature = "serde")]
impl Serialize for TimeMap {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("TimeMap", 1)?;
        s.serialize_field("time_list", &self.time_list)?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for TimeMap {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        #[derive(Deserialize)]
        struct Raw {
            time_list: Vec<Instant>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let mut times = raw.time_list.into_iter();
        let start = times
            .next()
            .ok_or_else(|| D::Error::custom("time_list must contain the start time"))?;
        let mut map = TimeMap::new(start);
        for time in times {
            map.add_time(time).map_err(D::Error::custom)?;
        }
        Ok(map)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
