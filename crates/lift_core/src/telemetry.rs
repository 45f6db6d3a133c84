//! Telemetry / KPIs: records completed rides and periodic state snapshots.

use std::collections::VecDeque;

use bevy_ecs::prelude::{Entity, Resource};

use crate::building::{Direction, Floor};
use crate::ecs::PersonState;

/// One completed ride, recorded when the person steps out at their
/// destination. Timestamps are simulation ms; use the helper methods for
/// derived KPIs.
#[derive(Debug, Clone)]
pub struct CompletedTripRecord {
    pub person_entity: Entity,
    pub elevator_entity: Entity,
    pub start_floor: u32,
    pub end_floor: u32,
    pub direction: Direction,
    pub distance: u32,
    pub called_at: u64,
    pub boarded_at: u64,
    pub completed_at: u64,
}

impl CompletedTripRecord {
    /// Time from pressing the call button to stepping into a car.
    pub fn wait_time(&self) -> u64 {
        self.boarded_at.saturating_sub(self.called_at)
    }

    /// Time spent riding the car.
    pub fn travel_time(&self) -> u64 {
        self.completed_at.saturating_sub(self.boarded_at)
    }

    /// Total door-to-door time for the ride.
    pub fn total_time(&self) -> u64 {
        self.completed_at.saturating_sub(self.called_at)
    }
}

/// Collects simulation telemetry. Insert as a resource to record rides.
#[derive(Debug, Default, Resource)]
pub struct SimTelemetry {
    pub completed_trips: Vec<CompletedTripRecord>,
}

/// Snapshot of one person for visualization/export.
#[derive(Debug, Clone)]
pub struct PersonSnapshot {
    pub entity: Entity,
    pub floor: Floor,
    pub state: PersonState,
}

/// Snapshot of one elevator for visualization/export.
#[derive(Debug, Clone)]
pub struct ElevatorSnapshot {
    pub entity: Entity,
    pub floor: Floor,
    pub direction: Direction,
    pub doors_open: bool,
    pub passenger_count: usize,
    pub stop_count: usize,
}

/// Aggregated counts at a point in time.
#[derive(Debug, Clone, Default)]
pub struct SimCounts {
    pub persons_resting: usize,
    pub persons_waiting: usize,
    pub persons_riding: usize,
    pub persons_done: usize,
    pub elevators_idle: usize,
    pub elevators_moving_up: usize,
    pub elevators_moving_down: usize,
    pub elevators_doors_open: usize,
}

impl SimCounts {
    pub fn add_person(&mut self, state: PersonState) {
        match state {
            PersonState::Resting => self.persons_resting += 1,
            PersonState::Waiting => self.persons_waiting += 1,
            PersonState::Riding => self.persons_riding += 1,
            PersonState::Done => self.persons_done += 1,
        }
    }

    pub fn add_elevator(&mut self, direction: Direction, doors_open: bool) {
        match direction {
            Direction::Idle => self.elevators_idle += 1,
            Direction::Up => self.elevators_moving_up += 1,
            Direction::Down => self.elevators_moving_down += 1,
        }
        if doors_open {
            self.elevators_doors_open += 1;
        }
    }
}

/// Snapshot of simulation state at a specific timestamp (simulation ms).
#[derive(Debug, Clone)]
pub struct SimSnapshot {
    pub timestamp_ms: u64,
    pub counts: SimCounts,
    pub persons: Vec<PersonSnapshot>,
    pub elevators: Vec<ElevatorSnapshot>,
}

/// Snapshot capture configuration.
#[derive(Debug, Clone, Copy, Resource)]
pub struct SimSnapshotConfig {
    pub interval_ms: u64,
    pub max_snapshots: usize,
}

impl Default for SimSnapshotConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            max_snapshots: 10_000,
        }
    }
}

/// Rolling snapshot buffer.
#[derive(Debug, Default, Resource)]
pub struct SimSnapshots {
    pub snapshots: VecDeque<SimSnapshot>,
    pub last_snapshot_at: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::prelude::World;

    #[test]
    fn derived_kpis_use_saturating_arithmetic() {
        let mut world = World::new();
        let record = CompletedTripRecord {
            person_entity: world.spawn_empty().id(),
            elevator_entity: world.spawn_empty().id(),
            start_floor: 1,
            end_floor: 4,
            direction: Direction::Up,
            distance: 3,
            called_at: 1_000,
            boarded_at: 4_000,
            completed_at: 10_000,
        };
        assert_eq!(record.wait_time(), 3_000);
        assert_eq!(record.travel_time(), 6_000);
        assert_eq!(record.total_time(), 9_000);
    }

    #[test]
    fn counts_bucket_by_state() {
        let mut counts = SimCounts::default();
        counts.add_person(PersonState::Waiting);
        counts.add_person(PersonState::Waiting);
        counts.add_person(PersonState::Done);
        counts.add_elevator(Direction::Up, true);
        counts.add_elevator(Direction::Idle, false);

        assert_eq!(counts.persons_waiting, 2);
        assert_eq!(counts.persons_done, 1);
        assert_eq!(counts.elevators_moving_up, 1);
        assert_eq!(counts.elevators_idle, 1);
        assert_eq!(counts.elevators_doors_open, 1);
    }
}
