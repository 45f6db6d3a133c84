use bevy_ecs::prelude::{Entity, Query, ResMut};

use crate::clock::{EventKind, EventSubject, SimulationClock};
use crate::ecs::{Person, PersonState};
use crate::schedule::DaySchedule;

/// Kicks off every person's day: schedules the first wake-up, or marks
/// people with an empty schedule as done.
pub fn simulation_started_system(
    mut clock: ResMut<SimulationClock>,
    mut persons: Query<(Entity, &mut Person, &DaySchedule)>,
) {
    let now = clock.now();
    for (entity, mut person, schedule) in persons.iter_mut() {
        match schedule.peek() {
            Some(entry) => {
                let wake_at = entry.start_time_ms.max(now);
                clock.schedule_at(
                    wake_at,
                    EventKind::PersonWake,
                    Some(EventSubject::Person(entity)),
                );
            }
            None => person.state = PersonState::Done,
        }
    }
}
