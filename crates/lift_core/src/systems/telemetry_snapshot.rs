use bevy_ecs::prelude::{Entity, Query, Res, ResMut};

use crate::clock::SimulationClock;
use crate::ecs::Person;
use crate::elevator::Elevator;
use crate::telemetry::{
    ElevatorSnapshot, PersonSnapshot, SimCounts, SimSnapshot, SimSnapshotConfig, SimSnapshots,
};

pub fn capture_snapshot_system(
    clock: Res<SimulationClock>,
    config: Res<SimSnapshotConfig>,
    mut snapshots: ResMut<SimSnapshots>,
    person_query: Query<(Entity, &Person)>,
    elevator_query: Query<(Entity, &Elevator)>,
) {
    // Interval check is also done via schedule condition, but keep for safety
    let now = clock.now();
    let should_capture = match snapshots.last_snapshot_at {
        None => true,
        Some(last) => now.saturating_sub(last) >= config.interval_ms,
    };
    if !should_capture {
        return;
    }

    let mut counts = SimCounts::default();

    let mut persons = Vec::new();
    for (entity, person) in person_query.iter() {
        counts.add_person(person.state);
        persons.push(PersonSnapshot {
            entity,
            floor: person.location,
            state: person.state,
        });
    }

    let mut elevators = Vec::new();
    for (entity, elevator) in elevator_query.iter() {
        counts.add_elevator(elevator.direction(), elevator.doors_open());
        elevators.push(ElevatorSnapshot {
            entity,
            floor: elevator.location(),
            direction: elevator.direction(),
            doors_open: elevator.doors_open(),
            passenger_count: elevator.passengers().len(),
            stop_count: elevator.stops().len(),
        });
    }

    snapshots.last_snapshot_at = Some(now);
    snapshots.snapshots.push_back(SimSnapshot {
        timestamp_ms: now,
        counts,
        persons,
        elevators,
    });

    if snapshots.snapshots.len() > config.max_snapshots {
        snapshots.snapshots.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::prelude::{Schedule, World};

    use crate::building::Floor;
    use crate::ecs::PersonState;
    use crate::elevator::DEFAULT_CAPACITY;

    fn run_capture(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(capture_snapshot_system);
        schedule.run(world);
    }

    #[test]
    fn captures_counts_and_per_entity_snapshots() {
        let mut world = World::new();
        world.insert_resource(SimulationClock::default());
        world.insert_resource(SimSnapshotConfig::default());
        world.insert_resource(SimSnapshots::default());

        world.spawn(Person {
            state: PersonState::Waiting,
            location: Floor::new(2),
        });
        let floors: Vec<Floor> = (1..=5).map(Floor::new).collect();
        world.spawn(Elevator::new(floors, DEFAULT_CAPACITY));

        run_capture(&mut world);

        let snapshots = world.resource::<SimSnapshots>();
        assert_eq!(snapshots.snapshots.len(), 1);
        let snapshot = &snapshots.snapshots[0];
        assert_eq!(snapshot.counts.persons_waiting, 1);
        assert_eq!(snapshot.counts.elevators_idle, 1);
        assert_eq!(snapshot.persons.len(), 1);
        assert_eq!(snapshot.elevators.len(), 1);
        assert_eq!(snapshot.elevators[0].floor, Floor::new(1));
    }

    #[test]
    fn respects_capture_interval() {
        let mut world = World::new();
        world.insert_resource(SimulationClock::default());
        world.insert_resource(SimSnapshotConfig {
            interval_ms: 1_000,
            max_snapshots: 10,
        });
        world.insert_resource(SimSnapshots::default());

        run_capture(&mut world);
        run_capture(&mut world);

        let snapshots = world.resource::<SimSnapshots>();
        assert_eq!(snapshots.snapshots.len(), 1);
        assert_eq!(snapshots.last_snapshot_at, Some(0));
    }

    #[test]
    fn drops_oldest_snapshot_beyond_the_cap() {
        let mut world = World::new();
        world.insert_resource(SimulationClock::default());
        world.insert_resource(SimSnapshotConfig {
            interval_ms: 0,
            max_snapshots: 2,
        });
        world.insert_resource(SimSnapshots::default());

        run_capture(&mut world);
        run_capture(&mut world);
        run_capture(&mut world);

        let snapshots = world.resource::<SimSnapshots>();
        assert_eq!(snapshots.snapshots.len(), 2);
    }
}
