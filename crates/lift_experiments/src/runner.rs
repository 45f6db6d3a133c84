//! Parallel simulation execution using rayon.
//!
//! Runs single simulations to completion and executes whole parameter
//! sweeps concurrently across CPU cores.

use bevy_ecs::prelude::World;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use lift_core::runner::{initialize_simulation, run_until_empty, simulation_schedule};
use lift_core::scenario::build_scenario;

use crate::metrics::{extract_metrics, SimulationResult};
use crate::parameters::ParameterSet;

const MAX_STEPS_PER_RUN: usize = 2_000_000;

/// Run a single simulation with the given parameter set.
///
/// Creates a fresh world, builds the scenario, runs the event queue dry
/// (or to the end time), and extracts metrics from the results.
pub fn run_single_simulation(param_set: &ParameterSet) -> SimulationResult {
    let mut world = World::new();
    let mut params = param_set.scenario_params();

    if params.simulation_end_time_ms.is_none() {
        // Leave a two hour tail past the schedule window for rides to finish
        let end_time_ms = params.schedule_window_ms.saturating_add(2 * 60 * 60 * 1000);
        params.simulation_end_time_ms = Some(end_time_ms);
    }

    build_scenario(&mut world, params);
    initialize_simulation(&mut world);

    let mut schedule = simulation_schedule();
    let _steps = run_until_empty(&mut world, &mut schedule, MAX_STEPS_PER_RUN);

    extract_metrics(&mut world)
}

/// Run multiple simulations in parallel.
///
/// Uses rayon to execute simulations concurrently across available CPU
/// cores. Each simulation runs independently with no shared state.
/// Results come back in the same order as the input parameter sets.
pub fn run_parallel_experiments(
    parameter_sets: Vec<ParameterSet>,
    num_threads: Option<usize>,
) -> Vec<SimulationResult> {
    run_parallel_experiments_with_progress(parameter_sets, num_threads, true)
}

/// Run multiple simulations in parallel with an optional progress bar.
///
/// `num_threads` of None uses rayon's default pool size.
pub fn run_parallel_experiments_with_progress(
    parameter_sets: Vec<ParameterSet>,
    num_threads: Option<usize>,
    show_progress: bool,
) -> Vec<SimulationResult> {
    let total = parameter_sets.len();
    let pb = if show_progress && total > 0 {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
                )
                .expect("progress bar template is valid")
                .progress_chars("#>-"),
        );
        Some(bar)
    } else {
        None
    };

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = num_threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build().expect("Failed to create thread pool");

    let pb_clone = pb.clone();
    let results = pool.install(|| {
        parameter_sets
            .par_iter()
            .map(|param_set| {
                let result = run_single_simulation(param_set);
                if let Some(ref progress_bar) = pb_clone {
                    progress_bar.inc(1);
                }
                result
            })
            .collect()
    });

    if let Some(ref progress_bar) = pb {
        progress_bar.finish_with_message("Completed");
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::ParameterSpace;

    #[test]
    fn test_single_simulation() {
        let space = ParameterSpace::grid()
            .num_persons(vec![10])
            .elevators_per_bank(vec![2]);
        let sets = space.generate();
        let result = run_single_simulation(&sets[0]);

        assert_eq!(result.total_persons, 10);
        assert_eq!(result.total_elevators, 2);
        assert!(result.completed_trips > 0);
    }

    #[test]
    fn test_parallel_experiments() {
        let space = ParameterSpace::grid()
            .num_persons(vec![10, 20])
            .elevators_per_bank(vec![2, 3]);
        let sets = space.generate();
        let results = run_parallel_experiments_with_progress(sets, Some(2), false);

        assert_eq!(results.len(), 4); // 2 * 2 combinations
        for result in &results {
            assert!(result.total_persons > 0);
        }
    }
}
