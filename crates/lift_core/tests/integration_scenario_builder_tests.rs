mod support;

use bevy_ecs::prelude::World;
use lift_core::building::Building;
use lift_core::clock::{EventKind, SimulationClock, ONE_HOUR_MS};
use lift_core::ecs::{Person, PersonState};
use lift_core::elevator::Elevator;
use lift_core::runner::initialize_simulation;
use lift_core::scenario::{build_scenario, ElevatorTiming, ScenarioParams, SimulationEndTimeMs};
use lift_core::schedule::DaySchedule;

use support::schedule::ScheduleRunner;

#[test]
fn capacity_and_timing_params_reach_the_world() {
    let mut world = World::new();
    build_scenario(
        &mut world,
        ScenarioParams::default()
            .with_seed(3)
            .with_elevator_capacity(3)
            .with_elevator_timing(1_000, 2_500),
    );

    let mut elevators = world.query::<&Elevator>();
    let mut count = 0;
    for elevator in elevators.iter(&world) {
        assert_eq!(elevator.capacity(), 3);
        count += 1;
    }
    assert!(count > 0);

    let timing = world.resource::<ElevatorTiming>();
    assert_eq!(timing.floor_travel_ms, 1_000);
    assert_eq!(timing.door_dwell_ms, 2_500);
}

#[test]
fn end_time_resource_is_only_inserted_when_requested() {
    let mut world = World::new();
    build_scenario(&mut world, ScenarioParams::default().with_seed(1));
    assert!(world.get_resource::<SimulationEndTimeMs>().is_none());

    let mut world = World::new();
    build_scenario(
        &mut world,
        ScenarioParams::default()
            .with_seed(1)
            .with_simulation_end_time_ms(ONE_HOUR_MS),
    );
    assert_eq!(world.resource::<SimulationEndTimeMs>().0, ONE_HOUR_MS);
}

#[test]
fn epoch_anchors_the_clock() {
    let mut world = World::new();
    build_scenario(
        &mut world,
        ScenarioParams::default()
            .with_seed(1)
            .with_epoch_ms(1_700_000_000_000),
    );

    let clock = world.resource::<SimulationClock>();
    assert_eq!(clock.epoch_ms(), 1_700_000_000_000);
    assert_eq!(clock.sim_to_real_ms(1_000), 1_700_000_001_000);
}

#[test]
fn generated_schedules_stay_inside_the_building_and_window() {
    let mut world = World::new();
    let window_hours = 2;
    build_scenario(
        &mut world,
        ScenarioParams::default()
            .with_seed(9)
            .with_floor_count(6)
            .with_num_persons(8)
            .with_schedule_window_hours(window_hours),
    );

    let building = world.resource::<Building>().clone();
    let mut days = world.query::<&DaySchedule>();
    for day in days.iter(&world) {
        for entry in day.entries() {
            assert!(entry.start_time_ms < window_hours * ONE_HOUR_MS);
            assert!(building.floors().contains(&entry.floor));
        }
    }
}

#[test]
fn initialize_schedules_one_wake_per_scheduled_person() {
    let mut world = World::new();
    build_scenario(
        &mut world,
        ScenarioParams::default().with_seed(11).with_num_persons(12),
    );
    initialize_simulation(&mut world);

    let mut runner = ScheduleRunner::new();
    // Process only the SimulationStarted event.
    assert!(runner.run_one(&mut world));

    let mut persons = world.query::<(&Person, &DaySchedule)>();
    let scheduled = persons
        .iter(&world)
        .filter(|(person, day)| person.state != PersonState::Done && !day.entries().is_empty())
        .count();

    let clock = world.resource::<SimulationClock>();
    assert!(scheduled > 0);
    assert_eq!(clock.pending_event_count(), scheduled);
    assert_eq!(clock.now(), 0);
    let first = world
        .resource_mut::<SimulationClock>()
        .pop_next()
        .expect("first wake");
    assert_eq!(first.kind, EventKind::PersonWake);
}
