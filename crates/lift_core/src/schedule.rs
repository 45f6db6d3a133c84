//! Per-person day schedules: where each person wants to be, and when.

use bevy_ecs::prelude::Component;
use thiserror::Error;

use crate::building::Floor;
use crate::clock::ONE_DAY_MS;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("entry at {start_time_ms}ms falls outside the simulated day")]
    OutsideDayWindow { start_time_ms: u64 },
}

/// One planned stop in a person's day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    /// Simulation time at which the person wants to head for `floor`.
    pub start_time_ms: u64,
    pub floor: Floor,
    pub label: String,
}

impl ScheduleEntry {
    pub fn new(start_time_ms: u64, floor: Floor, label: impl Into<String>) -> Self {
        Self {
            start_time_ms,
            floor,
            label: label.into(),
        }
    }
}

/// Ordered day plan attached to a person entity. Entries are kept sorted by
/// start time; a cursor tracks how far through the day the person has come.
#[derive(Debug, Clone, Default, Component)]
pub struct DaySchedule {
    entries: Vec<ScheduleEntry>,
    cursor: usize,
}

impl DaySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, keeping the list sorted by start time. Entries with
    /// equal start times keep insertion order.
    pub fn add_entry(&mut self, entry: ScheduleEntry) -> Result<(), ScheduleError> {
        if entry.start_time_ms >= ONE_DAY_MS {
            return Err(ScheduleError::OutsideDayWindow {
                start_time_ms: entry.start_time_ms,
            });
        }
        let index = self
            .entries
            .partition_point(|e| e.start_time_ms <= entry.start_time_ms);
        self.entries.insert(index, entry);
        Ok(())
    }

    /// The next entry the person has not yet acted on.
    pub fn peek(&self) -> Option<&ScheduleEntry> {
        self.entries.get(self.cursor)
    }

    /// Consume the next entry, moving the cursor past it.
    pub fn advance(&mut self) -> Option<ScheduleEntry> {
        let entry = self.entries.get(self.cursor).cloned()?;
        self.cursor += 1;
        Some(entry)
    }

    /// Number of entries not yet consumed.
    pub fn remaining(&self) -> usize {
        self.entries.len() - self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.entries.len()
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }
}
