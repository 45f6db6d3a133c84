use bevy_ecs::prelude::{Commands, Entity, Query, Res, ResMut};

use crate::bank::ElevatorBank;
use crate::building::Direction;
use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::dispatch::{DispatchAlgorithmResource, ElevatorCandidate};
use crate::ecs::{ActiveTrip, Person, PersonState};
use crate::elevator::Elevator;
use crate::scenario::ElevatorTiming;
use crate::schedule::DaySchedule;
use crate::telemetry::{CompletedTripRecord, SimTelemetry};

/// A car has opened its doors at a floor. Riders whose trip ends here get
/// off, waiting passengers heading the car's way get on, and anyone left
/// behind triggers a fresh call to the rest of the bank. The car's next
/// movement step is scheduled after the door dwell time.
#[allow(clippy::type_complexity)]
pub fn doors_opened_system(
    mut commands: Commands,
    mut clock: ResMut<SimulationClock>,
    event: Res<CurrentEvent>,
    timing: Res<ElevatorTiming>,
    dispatch: Res<DispatchAlgorithmResource>,
    mut telemetry: ResMut<SimTelemetry>,
    mut persons: Query<(&mut Person, &mut DaySchedule, Option<&mut ActiveTrip>)>,
    mut banks: Query<(Entity, &mut ElevatorBank)>,
    mut elevators: Query<&mut Elevator>,
) {
    let Some(elevator_entity) = event.0.subject_elevator() else {
        log::warn!("doors opened event without an elevator subject");
        return;
    };
    let now = clock.now();

    let car_direction = {
        let Ok(elevator) = elevators.get(elevator_entity) else {
            log::warn!("doors opened for missing entity {elevator_entity:?}");
            return;
        };
        elevator.direction()
    };

    alight_passengers(
        &mut commands,
        &mut clock,
        &mut telemetry,
        &mut persons,
        &mut elevators,
        elevator_entity,
    );

    let bank_entity = banks
        .iter()
        .find(|(_, bank)| bank.elevators().contains(&elevator_entity))
        .map(|(bank_entity, _)| bank_entity);

    if let Some(bank_entity) = bank_entity {
        let directions: &[Direction] = match car_direction {
            Direction::Up => &[Direction::Up],
            Direction::Down => &[Direction::Down],
            Direction::Idle => &[Direction::Up, Direction::Down],
        };

        for &direction in directions {
            board_waiting_passengers(
                &mut persons,
                &mut banks,
                &mut elevators,
                elevator_entity,
                direction,
                now,
            );
        }

        recall_for_left_behind(
            &mut clock,
            &dispatch,
            &mut banks,
            &mut elevators,
            bank_entity,
            elevator_entity,
            now,
        );
    }

    clock.schedule_at(
        now + timing.door_dwell_ms,
        EventKind::ElevatorStep,
        Some(EventSubject::Elevator(elevator_entity)),
    );
}

/// Drop off every rider of `elevator_entity` whose trip ends at the car's
/// current floor, record the completed trip, and schedule their next wake.
#[allow(clippy::type_complexity)]
fn alight_passengers(
    commands: &mut Commands,
    clock: &mut SimulationClock,
    telemetry: &mut SimTelemetry,
    persons: &mut Query<(&mut Person, &mut DaySchedule, Option<&mut ActiveTrip>)>,
    elevators: &mut Query<&mut Elevator>,
    elevator_entity: Entity,
) {
    let now = clock.now();
    let (location, mut riders) = {
        let Ok(elevator) = elevators.get(elevator_entity) else {
            return;
        };
        let mut riders: Vec<Entity> = elevator.passengers().iter().copied().collect();
        riders.sort();
        (elevator.location(), riders)
    };
    riders.retain(|rider| {
        persons
            .get(*rider)
            .ok()
            .and_then(|(_, _, trip)| trip.map(|trip| trip.end == location))
            .unwrap_or(false)
    });

    for rider in riders {
        let Ok((mut person, day, Some(trip))) = persons.get_mut(rider) else {
            continue;
        };
        if let Ok(mut car) = elevators.get_mut(elevator_entity) {
            if let Err(err) = car.exit(rider) {
                log::error!("rider {rider:?} could not leave the car: {err}");
                continue;
            }
        }

        person.location = location;
        person.state = PersonState::Resting;
        telemetry.completed_trips.push(CompletedTripRecord {
            person_entity: rider,
            elevator_entity,
            start_floor: trip.start.level(),
            end_floor: trip.end.level(),
            direction: trip.direction,
            distance: trip.distance,
            called_at: trip.called_at,
            boarded_at: trip.boarded_at.unwrap_or(trip.called_at),
            completed_at: now,
        });
        commands.entity(rider).remove::<ActiveTrip>();

        match day.peek() {
            Some(next) => {
                let wake_at = next.start_time_ms.max(now);
                clock.schedule_at(wake_at, EventKind::PersonWake, Some(EventSubject::Person(rider)));
            }
            None => person.state = PersonState::Done,
        }
    }
}

/// Let passengers waiting at the car's floor for `direction` board until the
/// car is full, clearing their waiting-list entries in every bank they called.
#[allow(clippy::type_complexity)]
fn board_waiting_passengers(
    persons: &mut Query<(&mut Person, &mut DaySchedule, Option<&mut ActiveTrip>)>,
    banks: &mut Query<(Entity, &mut ElevatorBank)>,
    elevators: &mut Query<&mut Elevator>,
    elevator_entity: Entity,
    direction: Direction,
    now: u64,
) {
    let Ok(elevator) = elevators.get(elevator_entity) else {
        return;
    };
    let location = elevator.location();

    let mut waiters: Vec<Entity> = Vec::new();
    for (_, bank) in banks.iter() {
        if !bank.elevators().contains(&elevator_entity) {
            continue;
        }
        match bank.waiting_passengers(location, direction) {
            Ok(list) => waiters.extend(list),
            Err(err) => log::warn!("could not list waiting passengers: {err}"),
        }
    }
    waiters.sort();
    waiters.dedup();

    let mut removals: Vec<(Entity, Entity)> = Vec::new();
    for waiter in waiters {
        let Ok(elevator) = elevators.get(elevator_entity) else {
            break;
        };
        if elevator.is_full() {
            break;
        }
        let Ok((mut person, _, Some(mut trip))) = persons.get_mut(waiter) else {
            continue;
        };
        if person.state != PersonState::Waiting || trip.start != location {
            continue;
        }
        if trip.direction != direction {
            continue;
        }

        let Ok(mut car) = elevators.get_mut(elevator_entity) else {
            break;
        };
        if let Err(err) = car.enter(waiter) {
            log::warn!("waiter {waiter:?} could not board: {err}");
            continue;
        }
        if let Err(err) = car.add_stop(trip.end) {
            log::error!("destination stop at {} rejected: {err}", trip.end.level());
        }

        person.state = PersonState::Riding;
        trip.boarded_at = Some(now);
        trip.elevator = Some(elevator_entity);
        for bank_entity in &trip.called_banks {
            removals.push((*bank_entity, waiter));
        }
    }

    for (bank_entity, waiter) in removals {
        let Ok((_, mut bank)) = banks.get_mut(bank_entity) else {
            continue;
        };
        if let Err(err) = bank.stop_waiting(waiter, location, direction) {
            log::warn!("could not clear waiting entry at {bank_entity:?}: {err}");
        }
    }
}

/// Re-dispatch for anyone still waiting at the car's floor after boarding,
/// asking the rest of the bank so the same car does not answer its own floor
/// again.
fn recall_for_left_behind(
    clock: &mut SimulationClock,
    dispatch: &DispatchAlgorithmResource,
    banks: &mut Query<(Entity, &mut ElevatorBank)>,
    elevators: &mut Query<&mut Elevator>,
    bank_entity: Entity,
    elevator_entity: Entity,
    now: u64,
) {
    let (location, leftover_directions, elevator_entities) = {
        let Ok(elevator) = elevators.get(elevator_entity) else {
            return;
        };
        let location = elevator.location();
        let Ok((_, bank)) = banks.get(bank_entity) else {
            return;
        };
        let mut leftover = Vec::new();
        for direction in [Direction::Up, Direction::Down] {
            let waiting = bank
                .waiting_passengers(location, direction)
                .map(|list| !list.is_empty())
                .unwrap_or(false);
            if waiting {
                leftover.push(direction);
            }
        }
        (location, leftover, bank.elevators().to_vec())
    };

    for direction in leftover_directions {
        let mut candidates = Vec::with_capacity(elevator_entities.len());
        for other in &elevator_entities {
            if *other == elevator_entity {
                continue;
            }
            if let Ok(elevator) = elevators.get(*other) {
                candidates.push(ElevatorCandidate {
                    entity: *other,
                    location: elevator.location(),
                    direction: elevator.direction(),
                    next_location: elevator.next_location(),
                });
            }
        }

        let Ok((_, bank)) = banks.get(bank_entity) else {
            return;
        };
        match bank.call_to(&candidates, dispatch.0.as_ref(), location, direction) {
            Ok(selected) => {
                if let Ok(mut car) = elevators.get_mut(selected) {
                    match car.add_stop(location) {
                        Ok(()) => {
                            if !car.stepping() {
                                car.set_stepping(true);
                                clock.schedule_at(
                                    now,
                                    EventKind::ElevatorStep,
                                    Some(EventSubject::Elevator(selected)),
                                );
                            }
                        }
                        Err(err) => {
                            log::error!("re-call stop at {} rejected: {err}", location.level())
                        }
                    }
                }
            }
            // With no other car in the bank, a parking car will pick the
            // call up from the waiting lists on its next step.
            Err(err) => log::debug!("re-call at {} not dispatched: {err}", location.level()),
        }
    }
}
