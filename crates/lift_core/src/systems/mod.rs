pub mod doors_opened;
pub mod elevator_step;
pub mod person_wake;
pub mod simulation_started;
pub mod telemetry_snapshot;

#[cfg(test)]
mod end_to_end_tests {
    use bevy_ecs::prelude::World;

    use crate::bank::ElevatorBank;
    use crate::building::Floor;
    use crate::call_strategy::{CallStrategy, CallStrategyKind};
    use crate::clock::{EventKind, SimulationClock, ONE_SEC_MS};
    use crate::dispatch::{build_dispatch_algorithm, DispatchAlgorithmKind};
    use crate::ecs::{Person, PersonState};
    use crate::elevator::{Elevator, DEFAULT_CAPACITY};
    use crate::runner::{run_until_empty, simulation_schedule};
    use crate::scenario::ElevatorTiming;
    use crate::schedule::{DaySchedule, ScheduleEntry};
    use crate::telemetry::{SimSnapshotConfig, SimSnapshots, SimTelemetry};

    fn floors() -> Vec<Floor> {
        (1..=5).map(Floor::new).collect()
    }

    fn base_world() -> World {
        let mut world = World::new();
        world.insert_resource(SimulationClock::default());
        world.insert_resource(SimTelemetry::default());
        world.insert_resource(SimSnapshotConfig::default());
        world.insert_resource(SimSnapshots::default());
        world.insert_resource(ElevatorTiming::default());
        world.insert_resource(build_dispatch_algorithm(
            &DispatchAlgorithmKind::NearestElevator,
        ));
        world.insert_resource(CallStrategy::new(CallStrategyKind::RandomBank, Some(1)));
        world
    }

    #[test]
    fn simulates_one_ride_end_to_end() {
        let mut world = base_world();

        let elevator_entity = world
            .spawn(Elevator::new(floors(), DEFAULT_CAPACITY))
            .id();
        let mut bank = ElevatorBank::new(floors());
        bank.register_elevator(elevator_entity);
        world.spawn(bank);

        let mut day = DaySchedule::new();
        day.add_entry(ScheduleEntry::new(ONE_SEC_MS, Floor::new(4), "meeting"))
            .expect("entry");
        let person_entity = world
            .spawn((
                Person {
                    state: PersonState::Resting,
                    location: Floor::new(1),
                },
                day,
            ))
            .id();

        world
            .resource_mut::<SimulationClock>()
            .schedule_at(0, EventKind::SimulationStarted, None);

        let mut schedule = simulation_schedule();
        let steps = run_until_empty(&mut world, &mut schedule, 1000);
        assert!(steps < 1000, "runner did not converge");

        let person = world
            .entity(person_entity)
            .get::<Person>()
            .expect("person");
        assert_eq!(person.state, PersonState::Done);
        assert_eq!(person.location, Floor::new(4));

        let elevator = world
            .entity(elevator_entity)
            .get::<Elevator>()
            .expect("elevator");
        assert!(elevator.passengers().is_empty());
        assert!(elevator.stops().is_empty());
        assert!(!elevator.stepping());

        let telemetry = world.resource::<SimTelemetry>();
        assert_eq!(telemetry.completed_trips.len(), 1);
        let record = &telemetry.completed_trips[0];
        assert_eq!(record.person_entity, person_entity);
        assert_eq!(record.elevator_entity, elevator_entity);
        assert_eq!(record.start_floor, 1);
        assert_eq!(record.end_floor, 4);
        assert!(record.called_at >= ONE_SEC_MS);
        assert!(record.called_at <= record.boarded_at);
        assert!(record.boarded_at <= record.completed_at);
        assert!(record.travel_time() > 0, "riding three floors takes time");

        let snapshots = world.resource::<SimSnapshots>();
        assert!(!snapshots.snapshots.is_empty());
    }

    #[test]
    fn simulates_two_concurrent_rides_end_to_end() {
        let mut world = base_world();

        let low_car = world
            .spawn(Elevator::new(floors(), DEFAULT_CAPACITY))
            .id();
        let high_car = world
            .spawn(Elevator::new(floors(), DEFAULT_CAPACITY).with_starting_location(Floor::new(5)))
            .id();
        let mut bank = ElevatorBank::new(floors());
        bank.register_elevator(low_car);
        bank.register_elevator(high_car);
        world.spawn(bank);

        let mut up_day = DaySchedule::new();
        up_day
            .add_entry(ScheduleEntry::new(ONE_SEC_MS, Floor::new(4), "desk"))
            .expect("entry");
        let up_person = world
            .spawn((
                Person {
                    state: PersonState::Resting,
                    location: Floor::new(1),
                },
                up_day,
            ))
            .id();

        let mut down_day = DaySchedule::new();
        down_day
            .add_entry(ScheduleEntry::new(2 * ONE_SEC_MS, Floor::new(1), "lobby"))
            .expect("entry");
        let down_person = world
            .spawn((
                Person {
                    state: PersonState::Resting,
                    location: Floor::new(5),
                },
                down_day,
            ))
            .id();

        world
            .resource_mut::<SimulationClock>()
            .schedule_at(0, EventKind::SimulationStarted, None);

        let mut schedule = simulation_schedule();
        let steps = run_until_empty(&mut world, &mut schedule, 1000);
        assert!(steps < 1000, "runner did not converge");

        let up = world.entity(up_person).get::<Person>().expect("person");
        assert_eq!(up.state, PersonState::Done);
        assert_eq!(up.location, Floor::new(4));
        let down = world.entity(down_person).get::<Person>().expect("person");
        assert_eq!(down.state, PersonState::Done);
        assert_eq!(down.location, Floor::new(1));

        let telemetry = world.resource::<SimTelemetry>();
        assert_eq!(telemetry.completed_trips.len(), 2);
        let cars: Vec<_> = telemetry
            .completed_trips
            .iter()
            .map(|record| record.elevator_entity)
            .collect();
        assert!(cars.contains(&low_car));
        assert!(cars.contains(&high_car));
        for record in &telemetry.completed_trips {
            assert!(record.called_at <= record.boarded_at);
            assert!(record.boarded_at <= record.completed_at);
        }
    }
}
