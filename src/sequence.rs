// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Configuration for calendar-boundary classification.

use crate::error::{Result, TimeMapError};

/// Calendar unit whose boundaries are tracked by a [`TimeMap`](crate::TimeMap).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum CalendarUnit {
    /// First report step of every new month.
    #[default]
    Month,
    /// First report step of every new year.
    Year,
}

/// Selects a periodic subset of boundary steps.
///
/// Boundaries are numbered by their position in the axis' boundary list;
/// position 0 is always the simulation start. A boundary at position `p`
/// belongs to the sequence when `p >= start_offset` and
/// `(p - start_offset) % frequency == 0`.
///
/// The default (`start_offset = 1`, `frequency = 1`) selects every
/// boundary except the simulation start itself.
///
/// # Example
///
/// ```
/// use timemap::{BoundarySequence, CalendarUnit};
///
/// // First step of every 3rd month, beginning with the 2nd month boundary.
/// let seq = BoundarySequence::months().starting_at(2).every(3);
///
/// assert_eq!(seq.unit(), CalendarUnit::Month);
/// assert!(seq.validate().is_ok());
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BoundarySequence {
    unit: CalendarUnit,
    start_offset: usize,
    frequency: usize,
}

impl BoundarySequence {
    /// Every month boundary after the start.
    pub const fn months() -> Self {
        Self::new(CalendarUnit::Month)
    }

    /// Every year boundary after the start.
    pub const fn years() -> Self {
        Self::new(CalendarUnit::Year)
    }

    /// Sequence over `unit` with the default offset and frequency.
    pub const fn new(unit: CalendarUnit) -> Self {
        Self {
            unit,
            start_offset: 1,
            frequency: 1,
        }
    }

    /// Sets the position of the first selected boundary.
    pub const fn starting_at(mut self, start_offset: usize) -> Self {
        self.start_offset = start_offset;
        self
    }

    /// Selects every `frequency`-th boundary from the start offset on.
    pub const fn every(mut self, frequency: usize) -> Self {
        self.frequency = frequency;
        self
    }

    /// Calendar unit whose boundaries are selected.
    pub const fn unit(&self) -> CalendarUnit {
        self.unit
    }

    /// Position of the first selected boundary.
    pub const fn start_offset(&self) -> usize {
        self.start_offset
    }

    /// Distance between selected boundary positions.
    pub const fn frequency(&self) -> usize {
        self.frequency
    }

    /// Fails with [`TimeMapError::InvalidArgument`] when the frequency is zero.
    pub fn validate(&self) -> Result<()> {
        if self.frequency == 0 {
            return Err(TimeMapError::InvalidArgument {
                reason: "frequency must be >= 1",
            });
        }
        Ok(())
    }

    /// Whether the boundary at `position` in the boundary list is selected.
    #[inline]
    pub(crate) fn selects(&self, position: usize) -> bool {
        position >= self.start_offset && (position - self.start_offset) % self.frequency == 0
    }
}

impl Default for BoundarySequence {
    fn default() -> Self {
        Self::months()
    }
}

impl From<CalendarUnit> for BoundarySequence {
    fn from(unit: CalendarUnit) -> Self {
        Self::new(unit)
    }
}
