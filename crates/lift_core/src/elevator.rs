//! Elevator car model: location, direction, stops, doors, and passengers.

use std::collections::{BTreeSet, HashSet};

use bevy_ecs::prelude::{Component, Entity};
use thiserror::Error;

use crate::building::{Direction, Floor};

pub const DEFAULT_CAPACITY: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ElevatorError {
    #[error("floor {level} is not served by this elevator")]
    InvalidFloor { level: u32 },
    #[error("floor {level} is not a scheduled stop")]
    NotAStop { level: u32 },
    #[error("doors are closed")]
    DoorsClosed,
    #[error("car is at capacity ({capacity})")]
    CapacityExceeded { capacity: usize },
    #[error("passenger is not in the car")]
    PassengerNotPresent,
}

/// An elevator car. Movement and door transitions are driven by the
/// event systems; this component holds the car state and the rules for
/// where it goes next.
#[derive(Debug, Clone, Component)]
pub struct Elevator {
    /// Floors this car serves, lowest first.
    floors: Vec<Floor>,
    location: Floor,
    direction: Direction,
    stops: BTreeSet<Floor>,
    doors_open: bool,
    passengers: HashSet<Entity>,
    capacity: usize,
    /// True while a movement event is pending for this car.
    stepping: bool,
}

impl Elevator {
    /// Car serving `floors` (lowest first), parked at the lowest floor.
    pub fn new(floors: Vec<Floor>, capacity: usize) -> Self {
        let location = floors.first().copied().unwrap_or_else(|| Floor::new(1));
        Self {
            floors,
            location,
            direction: Direction::Idle,
            stops: BTreeSet::new(),
            doors_open: false,
            passengers: HashSet::new(),
            capacity,
            stepping: false,
        }
    }

    /// Park the car at a different starting floor.
    pub fn with_starting_location(mut self, floor: Floor) -> Self {
        self.location = floor;
        self
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn location(&self) -> Floor {
        self.location
    }

    pub fn set_location(&mut self, floor: Floor) {
        self.location = floor;
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn doors_open(&self) -> bool {
        self.doors_open
    }

    pub fn open_doors(&mut self) {
        self.doors_open = true;
    }

    pub fn close_doors(&mut self) {
        self.doors_open = false;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.passengers.len() >= self.capacity
    }

    pub fn passengers(&self) -> &HashSet<Entity> {
        &self.passengers
    }

    pub fn contains(&self, person: Entity) -> bool {
        self.passengers.contains(&person)
    }

    pub fn stops(&self) -> &BTreeSet<Floor> {
        &self.stops
    }

    pub fn has_stop(&self, floor: Floor) -> bool {
        self.stops.contains(&floor)
    }

    pub fn stepping(&self) -> bool {
        self.stepping
    }

    pub fn set_stepping(&mut self, stepping: bool) {
        self.stepping = stepping;
    }

    /// Register a floor the car must stop at.
    pub fn add_stop(&mut self, floor: Floor) -> Result<(), ElevatorError> {
        if !self.floors.contains(&floor) {
            return Err(ElevatorError::InvalidFloor {
                level: floor.level(),
            });
        }
        self.stops.insert(floor);
        Ok(())
    }

    /// Clear a stop once the car has serviced it.
    pub fn remove_stop(&mut self, floor: Floor) -> Result<(), ElevatorError> {
        if !self.stops.remove(&floor) {
            return Err(ElevatorError::NotAStop {
                level: floor.level(),
            });
        }
        Ok(())
    }

    /// Board a passenger. The doors must be open and the car below capacity.
    pub fn enter(&mut self, person: Entity) -> Result<(), ElevatorError> {
        if !self.doors_open {
            return Err(ElevatorError::DoorsClosed);
        }
        if self.is_full() {
            return Err(ElevatorError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.passengers.insert(person);
        Ok(())
    }

    /// Let a passenger out. The doors must be open and the passenger aboard.
    pub fn exit(&mut self, person: Entity) -> Result<(), ElevatorError> {
        if !self.doors_open {
            return Err(ElevatorError::DoorsClosed);
        }
        if !self.passengers.remove(&person) {
            return Err(ElevatorError::PassengerNotPresent);
        }
        Ok(())
    }

    /// Floors between the car and `floor`.
    pub fn distance(&self, floor: Floor) -> u32 {
        self.location.distance(floor)
    }

    /// Whether the car's next step takes it further from `floor`.
    pub fn moving_away(&self, floor: Floor) -> bool {
        self.next_location().distance(floor) > self.location.distance(floor)
    }

    /// Where the car will be after one movement step, clamped to the floors
    /// it serves. An idle car stays put.
    pub fn next_location(&self) -> Floor {
        let step = self.direction.as_step();
        if step == 0 {
            return self.location;
        }
        let Some(index) = self.floors.iter().position(|f| *f == self.location) else {
            return self.location;
        };
        let last = self.floors.len().saturating_sub(1) as i64;
        let next = (index as i64 + step).clamp(0, last) as usize;
        self.floors[next]
    }

    /// The direction the car should travel next.
    ///
    /// At the lowest floor the only way is up, at the highest the only way
    /// is down. An idle car heads toward its nearest stop (lower floor wins
    /// ties) and stays idle with no stops. A moving car keeps its direction
    /// while at least one stop lies ahead, reverses when every stop is
    /// behind it, and goes idle when no stops remain.
    pub fn next_direction(&self) -> Direction {
        if let Some(first) = self.floors.first() {
            if self.location == *first {
                return Direction::Up;
            }
        }
        if let Some(last) = self.floors.last() {
            if self.location == *last {
                return Direction::Down;
            }
        }

        if self.direction == Direction::Idle {
            if self.stops.contains(&self.location) {
                return Direction::Idle;
            }
            let nearest = self
                .stops
                .iter()
                .min_by_key(|f| (self.location.distance(**f), f.level()));
            return match nearest {
                Some(stop) => self.location.direction_to(*stop),
                None => Direction::Idle,
            };
        }

        if self.stops.is_empty() {
            return Direction::Idle;
        }
        let moving_towards_stop = !self.stops.iter().all(|f| self.moving_away(*f));
        if moving_towards_stop {
            self.direction
        } else {
            self.direction.reversed()
        }
    }
}
