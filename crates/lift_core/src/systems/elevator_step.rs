use bevy_ecs::prelude::{Entity, Query, Res, ResMut};

use crate::bank::ElevatorBank;
use crate::building::{Direction, Floor};
use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::elevator::Elevator;
use crate::scenario::ElevatorTiming;

/// One movement step of an elevator car.
///
/// The car closes its doors, then either services a stop at its current
/// floor (opening the doors), moves one floor toward its next stop, or,
/// with nothing left to do, answers an outstanding hall call or parks.
pub fn elevator_step_system(
    mut clock: ResMut<SimulationClock>,
    event: Res<CurrentEvent>,
    timing: Res<ElevatorTiming>,
    banks: Query<&ElevatorBank>,
    mut elevators: Query<&mut Elevator>,
) {
    let Some(elevator_entity) = event.0.subject_elevator() else {
        log::warn!("elevator step event without an elevator subject");
        return;
    };
    let Ok(mut elevator) = elevators.get_mut(elevator_entity) else {
        log::warn!("elevator step for missing entity {elevator_entity:?}");
        return;
    };

    elevator.close_doors();

    if elevator.stops().is_empty() {
        match next_hall_call(&banks, elevator_entity, &elevator) {
            Some(floor) => {
                if let Err(err) = elevator.add_stop(floor) {
                    log::error!("hall call stop at {} rejected: {err}", floor.level());
                    elevator.set_direction(Direction::Idle);
                    elevator.set_stepping(false);
                    return;
                }
            }
            None => {
                elevator.set_direction(Direction::Idle);
                elevator.set_stepping(false);
                return;
            }
        }
    }

    let location = elevator.location();
    let now = clock.now();
    if elevator.has_stop(location) {
        if let Err(err) = elevator.remove_stop(location) {
            log::error!("could not clear serviced stop: {err}");
        }
        let direction = elevator.next_direction();
        elevator.set_direction(direction);
        elevator.open_doors();
        clock.schedule_at(
            now,
            EventKind::DoorsOpened,
            Some(EventSubject::Elevator(elevator_entity)),
        );
    } else {
        let direction = elevator.next_direction();
        elevator.set_direction(direction);
        let next = elevator.next_location();
        elevator.set_location(next);
        clock.schedule_at(
            now + timing.floor_travel_ms,
            EventKind::ElevatorStep,
            Some(EventSubject::Elevator(elevator_entity)),
        );
    }
}

/// The nearest outstanding hall call in the bank owning this car, if any.
/// Ties prefer the lower floor.
fn next_hall_call(
    banks: &Query<&ElevatorBank>,
    elevator_entity: Entity,
    elevator: &Elevator,
) -> Option<Floor> {
    let bank = banks
        .iter()
        .find(|bank| bank.elevators().contains(&elevator_entity))?;
    bank.outstanding_calls()
        .into_iter()
        .map(|(floor, _)| floor)
        .min_by_key(|floor| (elevator.distance(*floor), floor.level()))
}
