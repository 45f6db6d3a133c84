use bevy_ecs::prelude::Resource;

use crate::call_strategy::CallStrategyKind;
use crate::clock::ONE_HOUR_MS;
use crate::dispatch::DispatchAlgorithmKind;
use crate::elevator::DEFAULT_CAPACITY;

/// Default window for schedule entries: a full working day (simulation ms).
const DEFAULT_SCHEDULE_WINDOW_MS: u64 = 8 * ONE_HOUR_MS;

/// Default time an elevator needs to travel one floor (simulation ms).
const DEFAULT_FLOOR_TRAVEL_MS: u64 = 2_000;

/// Default time doors stay open for boarding and alighting (simulation ms).
const DEFAULT_DOOR_DWELL_MS: u64 = 5_000;

/// Movement timing for every elevator in the simulation.
#[derive(Debug, Clone, Copy, Resource)]
pub struct ElevatorTiming {
    pub floor_travel_ms: u64,
    pub door_dwell_ms: u64,
}

impl Default for ElevatorTiming {
    fn default() -> Self {
        Self {
            floor_travel_ms: DEFAULT_FLOOR_TRAVEL_MS,
            door_dwell_ms: DEFAULT_DOOR_DWELL_MS,
        }
    }
}

/// Simulation end time in milliseconds. When set, the runner stops processing events
/// once the next event would be at or after this timestamp (so the simulation "ends" at this time).
#[derive(Debug, Clone, Copy, Resource)]
pub struct SimulationEndTimeMs(pub u64);

/// Parameters for building a simulation scenario.
#[derive(Debug, Clone)]
pub struct ScenarioParams {
    pub floor_count: usize,
    pub bank_count: usize,
    pub elevators_per_bank: usize,
    pub elevator_capacity: usize,
    pub num_persons: usize,
    pub min_entries_per_person: usize,
    pub max_entries_per_person: usize,
    /// Schedule entries land uniformly in [0, schedule_window_ms).
    pub schedule_window_ms: u64,
    pub seed: Option<u64>,
    /// Optional epoch for real-time conversion. If None, defaults to 0.
    pub epoch_ms: Option<i64>,
    pub floor_travel_ms: u64,
    pub door_dwell_ms: u64,
    pub dispatch_algorithm: DispatchAlgorithmKind,
    pub call_strategy: CallStrategyKind,
    /// Optional simulation end time in ms. If set, runner stops when next event >= this time.
    pub simulation_end_time_ms: Option<u64>,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            floor_count: 10,
            bank_count: 1,
            elevators_per_bank: 2,
            elevator_capacity: DEFAULT_CAPACITY,
            num_persons: 50,
            min_entries_per_person: 2,
            max_entries_per_person: 5,
            schedule_window_ms: DEFAULT_SCHEDULE_WINDOW_MS,
            seed: None,
            epoch_ms: None,
            floor_travel_ms: DEFAULT_FLOOR_TRAVEL_MS,
            door_dwell_ms: DEFAULT_DOOR_DWELL_MS,
            dispatch_algorithm: DispatchAlgorithmKind::default(),
            call_strategy: CallStrategyKind::default(),
            simulation_end_time_ms: None,
        }
    }
}

impl ScenarioParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_floor_count(mut self, floor_count: usize) -> Self {
        self.floor_count = floor_count;
        self
    }

    pub fn with_bank_count(mut self, bank_count: usize) -> Self {
        self.bank_count = bank_count;
        self
    }

    pub fn with_elevators_per_bank(mut self, elevators_per_bank: usize) -> Self {
        self.elevators_per_bank = elevators_per_bank;
        self
    }

    pub fn with_elevator_capacity(mut self, capacity: usize) -> Self {
        self.elevator_capacity = capacity;
        self
    }

    pub fn with_num_persons(mut self, num_persons: usize) -> Self {
        self.num_persons = num_persons;
        self
    }

    /// Entries per person: min..=max, drawn per person.
    pub fn with_entries_per_person(mut self, min_entries: usize, max_entries: usize) -> Self {
        self.min_entries_per_person = min_entries;
        self.max_entries_per_person = max_entries;
        self
    }

    /// Set the schedule window in hours (entries start uniformly in [0, hours] sim time).
    pub fn with_schedule_window_hours(mut self, hours: u64) -> Self {
        self.schedule_window_ms = hours * ONE_HOUR_MS;
        self
    }

    /// Set the epoch in milliseconds (real-world time corresponding to simulation time 0).
    pub fn with_epoch_ms(mut self, epoch_ms: i64) -> Self {
        self.epoch_ms = Some(epoch_ms);
        self
    }

    pub fn with_elevator_timing(mut self, floor_travel_ms: u64, door_dwell_ms: u64) -> Self {
        self.floor_travel_ms = floor_travel_ms;
        self.door_dwell_ms = door_dwell_ms;
        self
    }

    pub fn with_dispatch_algorithm(mut self, kind: DispatchAlgorithmKind) -> Self {
        self.dispatch_algorithm = kind;
        self
    }

    pub fn with_call_strategy(mut self, kind: CallStrategyKind) -> Self {
        self.call_strategy = kind;
        self
    }

    /// Set simulation end time in ms. Runner stops when the next event is at or after this time.
    pub fn with_simulation_end_time_ms(mut self, end_ms: u64) -> Self {
        self.simulation_end_time_ms = Some(end_ms);
        self
    }
}
