#![allow(dead_code)]

use bevy_ecs::prelude::{Entity, World};
use lift_core::bank::ElevatorBank;
use lift_core::building::Floor;
use lift_core::ecs::{Person, PersonState};
use lift_core::elevator::{Elevator, DEFAULT_CAPACITY};
use lift_core::schedule::{DaySchedule, ScheduleEntry};

/// Floors `1..=count`, lowest first.
pub fn test_floors(count: u32) -> Vec<Floor> {
    (1..=count).map(Floor::new).collect()
}

/// Builder for person fixtures with an optional day schedule.
#[derive(Clone, Debug)]
pub struct PersonBuilder {
    location: Floor,
    state: PersonState,
    entries: Vec<(u64, u32, &'static str)>,
}

impl Default for PersonBuilder {
    fn default() -> Self {
        Self {
            location: Floor::new(1),
            state: PersonState::Resting,
            entries: Vec::new(),
        }
    }
}

impl PersonBuilder {
    /// Create a fresh builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at_floor(mut self, level: u32) -> Self {
        self.location = Floor::new(level);
        self
    }

    pub fn with_state(mut self, state: PersonState) -> Self {
        self.state = state;
        self
    }

    /// Append a schedule entry as (start time, target level, label).
    pub fn with_entry(mut self, start_time_ms: u64, level: u32, label: &'static str) -> Self {
        self.entries.push((start_time_ms, level, label));
        self
    }

    /// Spawn the person fixture into the provided world.
    pub fn spawn(self, world: &mut World) -> Entity {
        let mut day = DaySchedule::new();
        for (start_time_ms, level, label) in self.entries {
            day.add_entry(ScheduleEntry::new(start_time_ms, Floor::new(level), label))
                .expect("schedule entry inside the day window");
        }
        world
            .spawn((
                Person {
                    state: self.state,
                    location: self.location,
                },
                day,
            ))
            .id()
    }
}

/// Builder for an elevator bank and its cars.
#[derive(Clone, Debug)]
pub struct BankBuilder {
    floors: Vec<Floor>,
    cars: Vec<(u32, usize)>,
}

impl BankBuilder {
    /// Bank serving floors `1..=floor_count` with no cars yet.
    pub fn new(floor_count: u32) -> Self {
        Self {
            floors: test_floors(floor_count),
            cars: Vec::new(),
        }
    }

    /// Add a car with default capacity parked at `level`.
    pub fn with_car_at(self, level: u32) -> Self {
        self.with_car(level, DEFAULT_CAPACITY)
    }

    /// Add a car with a custom capacity parked at `level`.
    pub fn with_car(mut self, level: u32, capacity: usize) -> Self {
        self.cars.push((level, capacity));
        self
    }

    /// Spawn the bank and its cars, returning the bank entity and the car
    /// entities in registration order.
    pub fn spawn(self, world: &mut World) -> (Entity, Vec<Entity>) {
        let mut bank = ElevatorBank::new(self.floors.clone());
        let mut car_entities = Vec::with_capacity(self.cars.len());
        for (level, capacity) in self.cars {
            let car = Elevator::new(self.floors.clone(), capacity)
                .with_starting_location(Floor::new(level));
            let entity = world.spawn(car).id();
            bank.register_elevator(entity);
            car_entities.push(entity);
        }
        let bank_entity = world.spawn(bank).id();
        (bank_entity, car_entities)
    }
}
