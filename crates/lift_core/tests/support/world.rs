#![allow(dead_code)]

use bevy_ecs::prelude::World;
use lift_core::call_strategy::{CallStrategy, CallStrategyKind};
use lift_core::clock::SimulationClock;
use lift_core::dispatch::{build_dispatch_algorithm, DispatchAlgorithmKind};
use lift_core::scenario::ElevatorTiming;
use lift_core::telemetry::{SimSnapshotConfig, SimSnapshots, SimTelemetry};

/// Builder configuration for reproducible test worlds.
#[derive(Clone, Debug)]
pub struct TestWorldConfig {
    pub seed: u64,
    pub dispatch_algorithm: DispatchAlgorithmKind,
    pub call_strategy: CallStrategyKind,
    pub floor_travel_ms: u64,
    pub door_dwell_ms: u64,
    pub snapshot_interval_ms: u64,
}

impl Default for TestWorldConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            dispatch_algorithm: DispatchAlgorithmKind::default(),
            call_strategy: CallStrategyKind::default(),
            floor_travel_ms: 2_000,
            door_dwell_ms: 5_000,
            snapshot_interval_ms: 1_000,
        }
    }
}

/// Helper that populates the ECS world with all shared resources used in integration tests.
#[derive(Debug, Default)]
pub struct TestWorldBuilder {
    config: TestWorldConfig,
}

impl TestWorldBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the RNG seed used by the call strategy.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Choose the dispatch algorithm to insert.
    pub fn with_dispatch_algorithm(mut self, kind: DispatchAlgorithmKind) -> Self {
        self.config.dispatch_algorithm = kind;
        self
    }

    /// Choose the bank call strategy to insert.
    pub fn with_call_strategy(mut self, kind: CallStrategyKind) -> Self {
        self.config.call_strategy = kind;
        self
    }

    /// Set custom per-floor travel and door dwell times.
    pub fn with_elevator_timing(mut self, floor_travel_ms: u64, door_dwell_ms: u64) -> Self {
        self.config.floor_travel_ms = floor_travel_ms;
        self.config.door_dwell_ms = door_dwell_ms;
        self
    }

    /// Set the telemetry snapshot capture interval.
    pub fn with_snapshot_interval(mut self, interval_ms: u64) -> Self {
        self.config.snapshot_interval_ms = interval_ms;
        self
    }

    /// Build the ECS world with the configured resources.
    pub fn build(self) -> World {
        let TestWorldConfig {
            seed,
            dispatch_algorithm,
            call_strategy,
            floor_travel_ms,
            door_dwell_ms,
            snapshot_interval_ms,
        } = self.config;

        let mut world = World::new();
        world.insert_resource(SimulationClock::default());
        world.insert_resource(SimTelemetry::default());
        world.insert_resource(SimSnapshotConfig {
            interval_ms: snapshot_interval_ms,
            ..Default::default()
        });
        world.insert_resource(SimSnapshots::default());
        world.insert_resource(ElevatorTiming {
            floor_travel_ms,
            door_dwell_ms,
        });
        world.insert_resource(build_dispatch_algorithm(&dispatch_algorithm));
        world.insert_resource(CallStrategy::new(
            call_strategy,
            Some(seed.wrapping_add(0x5EED_5EED)),
        ));
        world
    }
}
