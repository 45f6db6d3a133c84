//! Run a 20-floor / 200-person office day and print completed rides.
//!
//! Run with: cargo run -p lift_core --example scenario_run

use bevy_ecs::prelude::World;
use lift_core::runner::{initialize_simulation, run_until_empty, simulation_schedule};
use lift_core::scenario::{build_scenario, ScenarioParams};

fn main() {
    const FLOOR_COUNT: usize = 20;
    const NUM_PERSONS: usize = 200;
    const ELEVATORS_PER_BANK: usize = 4;
    const SCHEDULE_HOURS: u64 = 8;

    let mut world = World::new();
    build_scenario(
        &mut world,
        ScenarioParams::default()
            .with_seed(123)
            .with_floor_count(FLOOR_COUNT)
            .with_elevators_per_bank(ELEVATORS_PER_BANK)
            .with_num_persons(NUM_PERSONS)
            .with_schedule_window_hours(SCHEDULE_HOURS),
    );
    initialize_simulation(&mut world);

    let mut schedule = simulation_schedule();
    // 8h of sim time + 200 persons with several trips each; allow enough steps to drain the queue
    let max_steps = 2_000_000;
    let steps = run_until_empty(&mut world, &mut schedule, max_steps);

    let telemetry = world.resource::<lift_core::telemetry::SimTelemetry>();
    let completed = telemetry.completed_trips.len();
    let clock = world.resource::<lift_core::clock::SimulationClock>();
    let sim_time_secs = clock.now() / 1000;

    println!(
        "--- Scenario run ({} floors, {} persons, {} cars, {}h schedule window, seed 123) ---",
        FLOOR_COUNT, NUM_PERSONS, ELEVATORS_PER_BANK, SCHEDULE_HOURS
    );
    println!("Steps executed: {}", steps);
    println!(
        "Simulation time: {} s ({:.1} min)",
        sim_time_secs,
        sim_time_secs as f64 / 60.0
    );
    println!("Completed rides: {}", completed);

    if completed > 0 {
        println!("\nSample completed rides (first 100):");
        const ONE_SEC_MS: u64 = 1000;
        const SAMPLE: usize = 100;
        for (i, r) in telemetry.completed_trips.iter().take(SAMPLE).enumerate() {
            println!(
                "  {}  person={:?} car={:?}  {} -> {}  wait={} s  travel={} s  total={} s  completed_at={} s",
                i + 1,
                r.person_entity,
                r.elevator_entity,
                r.start_floor,
                r.end_floor,
                r.wait_time() / ONE_SEC_MS,
                r.travel_time() / ONE_SEC_MS,
                r.total_time() / ONE_SEC_MS,
                r.completed_at / ONE_SEC_MS,
            );
        }
        if completed > SAMPLE {
            println!("  ... and {} more", completed - SAMPLE);
        }
    } else {
        println!("\nNo rides completed. (Schedules with fewer than two distinct floors never call a car.)");
    }
}
