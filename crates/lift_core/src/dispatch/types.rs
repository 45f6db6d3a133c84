use bevy_ecs::prelude::Entity;

use crate::building::{Direction, Floor};

/// Snapshot of an elevator's state taken when a hall call is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElevatorCandidate {
    pub entity: Entity,
    pub location: Floor,
    pub direction: Direction,
    pub next_location: Floor,
}

impl ElevatorCandidate {
    /// Floors between the car and the calling floor.
    pub fn distance(&self, floor: Floor) -> u32 {
        self.location.distance(floor)
    }

    /// Whether the car's next step takes it further from the calling floor.
    pub fn moving_away(&self, floor: Floor) -> bool {
        self.next_location.distance(floor) > self.location.distance(floor)
    }
}
