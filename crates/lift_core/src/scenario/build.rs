use bevy_ecs::prelude::World;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bank::ElevatorBank;
use crate::building::{Building, Floor};
use crate::call_strategy::CallStrategy;
use crate::clock::SimulationClock;
use crate::dispatch::build_dispatch_algorithm;
use crate::elevator::Elevator;
use crate::scenario::params::{ElevatorTiming, ScenarioParams, SimulationEndTimeMs};
use crate::schedule::{DaySchedule, ScheduleEntry};
use crate::telemetry::{SimSnapshotConfig, SimSnapshots, SimTelemetry};

const ENTRY_LABELS: &[&str] = &["desk", "meeting", "coffee", "lunch", "visit", "lobby"];

/// Draw a day schedule of `entry_count` entries with start times uniform in
/// `[0, window_ms)`. Consecutive entries never target the same floor, so each
/// one is an actual ride from wherever the previous entry left the person.
pub fn random_day_schedule<R: Rng>(
    rng: &mut R,
    floors: &[Floor],
    home: Floor,
    entry_count: usize,
    window_ms: u64,
) -> DaySchedule {
    let mut day = DaySchedule::new();
    if floors.len() < 2 {
        return day;
    }

    let mut times: Vec<u64> = (0..entry_count)
        .map(|_| rng.gen_range(0..window_ms))
        .collect();
    times.sort_unstable();

    let mut previous = home;
    for (index, start_time_ms) in times.into_iter().enumerate() {
        let mut floor = floors[rng.gen_range(0..floors.len())];
        if floor == previous {
            let position = floors.iter().position(|f| *f == floor).unwrap_or(0);
            floor = floors[(position + 1) % floors.len()];
        }
        let label = ENTRY_LABELS[index % ENTRY_LABELS.len()];
        if let Err(err) = day.add_entry(ScheduleEntry::new(start_time_ms, floor, label)) {
            log::warn!("skipping schedule entry: {err}");
            continue;
        }
        previous = floor;
    }
    day
}

/// Populate `world` with a building, its elevator banks, and a crowd of
/// persons with randomized day schedules, plus every resource the runner
/// needs. Call [crate::runner::initialize_simulation] afterwards to kick
/// the day off.
pub fn build_scenario(world: &mut World, params: ScenarioParams) {
    let epoch_ms = params.epoch_ms.unwrap_or(0);
    let mut clock = SimulationClock::default();
    clock.set_epoch_ms(epoch_ms);
    world.insert_resource(clock);

    world.insert_resource(SimTelemetry::default());
    world.insert_resource(SimSnapshotConfig::default());
    world.insert_resource(SimSnapshots::default());
    world.insert_resource(ElevatorTiming {
        floor_travel_ms: params.floor_travel_ms,
        door_dwell_ms: params.door_dwell_ms,
    });
    if let Some(end_ms) = params.simulation_end_time_ms {
        world.insert_resource(SimulationEndTimeMs(end_ms));
    }

    world.insert_resource(build_dispatch_algorithm(&params.dispatch_algorithm));
    world.insert_resource(CallStrategy::new(
        params.call_strategy,
        params.seed.map(|seed| seed ^ 0x5eed_cafe),
    ));

    let building = Building::with_floor_count(params.floor_count as u32);
    let floors: Vec<Floor> = building.floors().to_vec();
    world.insert_resource(building);

    for _ in 0..params.bank_count {
        let mut bank = ElevatorBank::new(floors.clone());
        for _ in 0..params.elevators_per_bank {
            let elevator = world
                .spawn(Elevator::new(floors.clone(), params.elevator_capacity))
                .id();
            bank.register_elevator(elevator);
        }
        world.spawn(bank);
    }

    let seed = params.seed.unwrap_or(0);
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..params.num_persons {
        let home = floors[rng.gen_range(0..floors.len())];
        let entry_count = rng.gen_range(params.min_entries_per_person..=params.max_entries_per_person);
        let day = random_day_schedule(&mut rng, &floors, home, entry_count, params.schedule_window_ms);
        world.spawn((
            crate::ecs::Person {
                state: crate::ecs::PersonState::Resting,
                location: home,
            },
            day,
        ));
    }
}
