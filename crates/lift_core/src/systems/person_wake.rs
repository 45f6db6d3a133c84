use bevy_ecs::prelude::{Commands, Entity, Query, Res, ResMut};

use crate::bank::ElevatorBank;
use crate::call_strategy::CallStrategy;
use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::dispatch::{DispatchAlgorithmResource, ElevatorCandidate};
use crate::ecs::{ActiveTrip, Person, PersonState};
use crate::elevator::Elevator;
use crate::schedule::DaySchedule;

/// A person reaches the start time of their next schedule entry: they pick
/// bank(s) to call, press the button, and start waiting. Entries targeting
/// the floor they already stand on complete on the spot.
#[allow(clippy::type_complexity)]
pub fn person_wake_system(
    mut commands: Commands,
    mut clock: ResMut<SimulationClock>,
    event: Res<CurrentEvent>,
    dispatch: Res<DispatchAlgorithmResource>,
    mut strategy: ResMut<CallStrategy>,
    mut persons: Query<(&mut Person, &mut DaySchedule)>,
    mut banks: Query<(Entity, &mut ElevatorBank)>,
    mut elevators: Query<&mut Elevator>,
) {
    let Some(person_entity) = event.0.subject_person() else {
        log::warn!("person wake event without a person subject");
        return;
    };
    let Ok((mut person, mut day)) = persons.get_mut(person_entity) else {
        log::warn!("person wake for missing entity {person_entity:?}");
        return;
    };

    let Some(entry) = day.advance() else {
        person.state = PersonState::Done;
        return;
    };
    let now = clock.now();

    // Already on the target floor: nothing to ride, move on.
    if entry.floor == person.location {
        match day.peek() {
            Some(next) => {
                let wake_at = next.start_time_ms.max(now);
                clock.schedule_at(
                    wake_at,
                    EventKind::PersonWake,
                    Some(EventSubject::Person(person_entity)),
                );
            }
            None => person.state = PersonState::Done,
        }
        return;
    }

    let start = person.location;
    let end = entry.floor;
    let direction = start.direction_to(end);

    let serving_banks: Vec<Entity> = banks
        .iter()
        .filter(|(_, bank)| bank.serves(start) && bank.serves(end))
        .map(|(bank_entity, _)| bank_entity)
        .collect();
    let chosen_banks = strategy.select(&serving_banks);

    let mut called_banks = Vec::with_capacity(chosen_banks.len());
    for bank_entity in chosen_banks {
        let Ok((_, mut bank)) = banks.get_mut(bank_entity) else {
            continue;
        };
        if let Err(err) = bank.wait(person_entity, start, direction) {
            log::error!("wait at bank {bank_entity:?} failed: {err}");
            continue;
        }

        let elevator_entities: Vec<Entity> = bank.elevators().to_vec();
        let mut candidates = Vec::with_capacity(elevator_entities.len());
        for elevator_entity in elevator_entities {
            if let Ok(elevator) = elevators.get(elevator_entity) {
                candidates.push(ElevatorCandidate {
                    entity: elevator_entity,
                    location: elevator.location(),
                    direction: elevator.direction(),
                    next_location: elevator.next_location(),
                });
            }
        }

        match bank.call_to(&candidates, dispatch.0.as_ref(), start, direction) {
            Ok(selected) => {
                if let Ok(mut car) = elevators.get_mut(selected) {
                    match car.add_stop(start) {
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
                        Err(err) => log::error!("stop at {} rejected: {err}", start.level()),
                    }
                }
                called_banks.push(bank_entity);
            }
            Err(err) => {
                log::error!("dispatch at bank {bank_entity:?} failed: {err}");
                if let Err(err) = bank.stop_waiting(person_entity, start, direction) {
                    log::warn!("could not clear waiting entry: {err}");
                }
            }
        }
    }

    if called_banks.is_empty() {
        log::error!(
            "no bank could serve {person_entity:?} from {} to {}, skipping entry",
            start.level(),
            end.level()
        );
        match day.peek() {
            Some(next) => {
                let wake_at = next.start_time_ms.max(now);
                clock.schedule_at(
                    wake_at,
                    EventKind::PersonWake,
                    Some(EventSubject::Person(person_entity)),
                );
            }
            None => person.state = PersonState::Done,
        }
        return;
    }

    person.state = PersonState::Waiting;
    commands.entity(person_entity).insert(ActiveTrip {
        start,
        end,
        direction,
        distance: start.distance(end),
        called_at: now,
        boarded_at: None,
        called_banks,
        elevator: None,
    });
}
