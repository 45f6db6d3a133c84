use bevy_ecs::prelude::{Component, Entity};

use crate::building::{Direction, Floor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonState {
    /// At a floor with nothing to do until the next schedule entry.
    Resting,
    /// Standing at a bank waiting for a car.
    Waiting,
    /// Aboard an elevator.
    Riding,
    /// Day schedule fully consumed.
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Component)]
pub struct Person {
    pub state: PersonState,
    pub location: Floor,
}

/// In-flight trip attached to a person from the moment they call an
/// elevator until they step out at their destination.
#[derive(Debug, Clone, PartialEq, Eq, Component)]
pub struct ActiveTrip {
    pub start: Floor,
    pub end: Floor,
    pub direction: Direction,
    pub distance: u32,
    /// Simulation time when the person called the bank(s).
    pub called_at: u64,
    /// Simulation time when the person boarded a car; set on boarding.
    pub boarded_at: Option<u64>,
    /// Banks this person has an open call with.
    pub called_banks: Vec<Entity>,
    /// The car the person boarded, once riding.
    pub elevator: Option<Entity>,
}
