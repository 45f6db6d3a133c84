//! Elevator bank controller: hall calls and per-floor waiting lists.

use std::collections::{HashMap, HashSet};

use bevy_ecs::prelude::{Component, Entity};
use thiserror::Error;

use crate::building::{Direction, Floor};
use crate::dispatch::{DispatchAlgorithm, ElevatorCandidate};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BankError {
    #[error("idle is not a valid call direction")]
    InvalidDirection,
    #[error("person is not waiting at floor {level}")]
    NotWaiting { level: u32 },
    #[error("no elevator available to dispatch")]
    NoElevatorAvailable,
}

/// A bank of elevators serving a common set of floors, with up and down
/// waiting lists per floor.
///
/// The bank selects which car answers a call; actually adding the stop and
/// waking the car is done by the calling system, since the cars live on
/// separate entities.
#[derive(Debug, Clone, Default, Component)]
pub struct ElevatorBank {
    floors: Vec<Floor>,
    elevators: Vec<Entity>,
    wait_list_up: HashMap<Floor, HashSet<Entity>>,
    wait_list_down: HashMap<Floor, HashSet<Entity>>,
}

impl ElevatorBank {
    /// Bank serving `floors`, lowest first, with no elevators registered yet.
    pub fn new(floors: Vec<Floor>) -> Self {
        Self {
            floors,
            ..Default::default()
        }
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    pub fn serves(&self, floor: Floor) -> bool {
        self.floors.contains(&floor)
    }

    /// Attach an elevator entity to this bank. Registration order is the
    /// candidate order seen by dispatch.
    pub fn register_elevator(&mut self, elevator: Entity) {
        self.elevators.push(elevator);
    }

    pub fn elevators(&self) -> &[Entity] {
        &self.elevators
    }

    fn wait_set_mut(
        &mut self,
        floor: Floor,
        direction: Direction,
    ) -> Result<&mut HashSet<Entity>, BankError> {
        match direction {
            Direction::Up => Ok(self.wait_list_up.entry(floor).or_default()),
            Direction::Down => Ok(self.wait_list_down.entry(floor).or_default()),
            Direction::Idle => Err(BankError::InvalidDirection),
        }
    }

    fn wait_set(&self, floor: Floor, direction: Direction) -> Result<Option<&HashSet<Entity>>, BankError> {
        match direction {
            Direction::Up => Ok(self.wait_list_up.get(&floor)),
            Direction::Down => Ok(self.wait_list_down.get(&floor)),
            Direction::Idle => Err(BankError::InvalidDirection),
        }
    }

    /// Record a person waiting at `floor` to travel in `direction`.
    pub fn wait(
        &mut self,
        person: Entity,
        floor: Floor,
        direction: Direction,
    ) -> Result<(), BankError> {
        self.wait_set_mut(floor, direction)?.insert(person);
        Ok(())
    }

    /// Remove a person from the waiting list once they board or give up.
    pub fn stop_waiting(
        &mut self,
        person: Entity,
        floor: Floor,
        direction: Direction,
    ) -> Result<(), BankError> {
        let removed = self.wait_set_mut(floor, direction)?.remove(&person);
        if !removed {
            return Err(BankError::NotWaiting {
                level: floor.level(),
            });
        }
        Ok(())
    }

    /// People waiting at `floor` for `direction`, in entity order so callers
    /// iterate deterministically.
    pub fn waiting_passengers(
        &self,
        floor: Floor,
        direction: Direction,
    ) -> Result<Vec<Entity>, BankError> {
        let mut passengers: Vec<Entity> = self
            .wait_set(floor, direction)?
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        passengers.sort();
        Ok(passengers)
    }

    /// Whether anyone at all is waiting somewhere in this bank.
    pub fn has_waiting_passengers(&self) -> bool {
        self.wait_list_up.values().any(|set| !set.is_empty())
            || self.wait_list_down.values().any(|set| !set.is_empty())
    }

    /// Every (floor, direction) pair with at least one waiting passenger,
    /// ordered by level with up calls before down calls.
    pub fn outstanding_calls(&self) -> Vec<(Floor, Direction)> {
        let mut calls: Vec<(Floor, Direction)> = Vec::new();
        for (floor, set) in &self.wait_list_up {
            if !set.is_empty() {
                calls.push((*floor, Direction::Up));
            }
        }
        for (floor, set) in &self.wait_list_down {
            if !set.is_empty() {
                calls.push((*floor, Direction::Down));
            }
        }
        calls.sort_by_key(|(floor, direction)| (floor.level(), matches!(direction, Direction::Down)));
        calls
    }

    /// Pick the elevator that should answer a call at `floor` heading in
    /// `direction`. `candidates` must be snapshots of this bank's elevators,
    /// in registration order.
    pub fn call_to(
        &self,
        candidates: &[ElevatorCandidate],
        dispatch: &dyn DispatchAlgorithm,
        floor: Floor,
        direction: Direction,
    ) -> Result<Entity, BankError> {
        if direction == Direction::Idle {
            return Err(BankError::InvalidDirection);
        }
        dispatch
            .select(candidates, self.floors.len(), floor, direction)
            .ok_or(BankError::NoElevatorAvailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::NearestElevatorDispatch;
    use bevy_ecs::prelude::World;

    fn five_floor_bank() -> ElevatorBank {
        ElevatorBank::new((1..=5).map(Floor::new).collect())
    }

    #[test]
    fn wait_and_stop_waiting_round_trip() {
        let mut world = World::new();
        let person = world.spawn_empty().id();
        let mut bank = five_floor_bank();

        bank.wait(person, Floor::new(2), Direction::Up).expect("wait");
        assert_eq!(
            bank.waiting_passengers(Floor::new(2), Direction::Up)
                .expect("waiting"),
            vec![person]
        );
        assert!(bank.has_waiting_passengers());

        bank.stop_waiting(person, Floor::new(2), Direction::Up)
            .expect("stop waiting");
        assert!(bank
            .waiting_passengers(Floor::new(2), Direction::Up)
            .expect("waiting")
            .is_empty());
        assert!(!bank.has_waiting_passengers());
    }

    #[test]
    fn wait_is_idempotent_per_person() {
        let mut world = World::new();
        let person = world.spawn_empty().id();
        let mut bank = five_floor_bank();

        bank.wait(person, Floor::new(2), Direction::Up).expect("wait");
        bank.wait(person, Floor::new(2), Direction::Up).expect("wait");
        assert_eq!(
            bank.waiting_passengers(Floor::new(2), Direction::Up)
                .expect("waiting"),
            vec![person]
        );

        bank.stop_waiting(person, Floor::new(2), Direction::Up)
            .expect("stop waiting");
        assert!(!bank.has_waiting_passengers());
    }

    #[test]
    fn directions_keep_separate_wait_lists() {
        let mut world = World::new();
        let up = world.spawn_empty().id();
        let down = world.spawn_empty().id();
        let mut bank = five_floor_bank();

        bank.wait(up, Floor::new(3), Direction::Up).expect("wait");
        bank.wait(down, Floor::new(3), Direction::Down).expect("wait");

        assert_eq!(
            bank.waiting_passengers(Floor::new(3), Direction::Up)
                .expect("waiting"),
            vec![up]
        );
        assert_eq!(
            bank.waiting_passengers(Floor::new(3), Direction::Down)
                .expect("waiting"),
            vec![down]
        );
    }

    #[test]
    fn outstanding_calls_order_by_level_then_direction() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let c = world.spawn_empty().id();
        let mut bank = five_floor_bank();

        bank.wait(a, Floor::new(4), Direction::Down).expect("wait");
        bank.wait(b, Floor::new(2), Direction::Up).expect("wait");
        bank.wait(c, Floor::new(2), Direction::Down).expect("wait");

        assert_eq!(
            bank.outstanding_calls(),
            vec![
                (Floor::new(2), Direction::Up),
                (Floor::new(2), Direction::Down),
                (Floor::new(4), Direction::Down),
            ]
        );
    }

    #[test]
    fn idle_direction_is_rejected() {
        let mut world = World::new();
        let person = world.spawn_empty().id();
        let mut bank = five_floor_bank();

        assert_eq!(
            bank.wait(person, Floor::new(2), Direction::Idle),
            Err(BankError::InvalidDirection)
        );
        assert_eq!(
            bank.waiting_passengers(Floor::new(2), Direction::Idle),
            Err(BankError::InvalidDirection)
        );
    }

    #[test]
    fn stop_waiting_requires_a_prior_wait() {
        let mut world = World::new();
        let person = world.spawn_empty().id();
        let mut bank = five_floor_bank();

        assert_eq!(
            bank.stop_waiting(person, Floor::new(2), Direction::Up),
            Err(BankError::NotWaiting { level: 2 })
        );
    }

    #[test]
    fn call_to_dispatches_through_the_algorithm() {
        let mut world = World::new();
        let elevator = world.spawn_empty().id();
        let mut bank = five_floor_bank();
        bank.register_elevator(elevator);

        let candidates = vec![ElevatorCandidate {
            entity: elevator,
            location: Floor::new(1),
            direction: Direction::Idle,
            next_location: Floor::new(1),
        }];

        let selected = bank
            .call_to(
                &candidates,
                &NearestElevatorDispatch,
                Floor::new(3),
                Direction::Up,
            )
            .expect("dispatch");
        assert_eq!(selected, elevator);
    }

    #[test]
    fn call_to_with_no_candidates_fails() {
        let bank = five_floor_bank();
        assert_eq!(
            bank.call_to(&[], &NearestElevatorDispatch, Floor::new(3), Direction::Up),
            Err(BankError::NoElevatorAvailable)
        );
        assert_eq!(
            bank.call_to(&[], &NearestElevatorDispatch, Floor::new(3), Direction::Idle),
            Err(BankError::InvalidDirection)
        );
    }
}
