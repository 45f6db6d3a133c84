//! Test helpers for common test setup and utilities.
//!
//! This module provides shared test utilities to reduce duplication across test files.

use bevy_ecs::prelude::{Entity, World};

use crate::bank::ElevatorBank;
use crate::building::Floor;
use crate::call_strategy::{CallStrategy, CallStrategyKind};
use crate::dispatch::{build_dispatch_algorithm, DispatchAlgorithmKind};
use crate::elevator::{Elevator, DEFAULT_CAPACITY};

/// Number of floors in the standard test building.
pub const TEST_FLOOR_COUNT: u32 = 5;

/// Floors of the standard test building, ground floor first.
pub fn test_floors() -> Vec<Floor> {
    (1..=TEST_FLOOR_COUNT).map(Floor::new).collect()
}

/// Create a basic test world with essential resources.
///
/// This is a convenience function for tests that need a minimal world setup.
/// For more complex scenarios, use the full `build_scenario` function.
pub fn create_test_world() -> World {
    let mut world = World::new();
    world.insert_resource(crate::clock::SimulationClock::default());
    world.insert_resource(crate::telemetry::SimTelemetry::default());
    world.insert_resource(crate::telemetry::SimSnapshotConfig::default());
    world.insert_resource(crate::telemetry::SimSnapshots::default());
    world.insert_resource(crate::scenario::ElevatorTiming::default());
    world.insert_resource(build_dispatch_algorithm(
        &DispatchAlgorithmKind::NearestElevator,
    ));
    world.insert_resource(CallStrategy::new(CallStrategyKind::RandomBank, Some(1)));
    world
}

/// Spawn a bank serving [test_floors] with `elevator_count` cars registered,
/// returning the bank entity and the car entities in registration order.
pub fn spawn_test_bank(world: &mut World, elevator_count: usize) -> (Entity, Vec<Entity>) {
    let mut bank = ElevatorBank::new(test_floors());
    let mut cars = Vec::with_capacity(elevator_count);
    for _ in 0..elevator_count {
        let car = world
            .spawn(Elevator::new(test_floors(), DEFAULT_CAPACITY))
            .id();
        bank.register_elevator(car);
        cars.push(car);
    }
    let bank_entity = world.spawn(bank).id();
    (bank_entity, cars)
}
