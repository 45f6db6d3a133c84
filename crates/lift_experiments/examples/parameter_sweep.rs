//! Example: Parameter sweep over car counts and dispatch policy.
//!
//! This example demonstrates how to:
//! 1. Define a parameter space over scenario knobs
//! 2. Run multiple simulations in parallel
//! 3. Find the configuration with the lowest average wait
//! 4. Export results to CSV

use lift_core::call_strategy::CallStrategyKind;
use lift_core::dispatch::DispatchAlgorithmKind;
use lift_experiments::{
    export_to_csv, find_best_parameters, find_best_result_index, run_parallel_experiments,
    ParameterSpace,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Starting parameter sweep experiment...");

    let space = ParameterSpace::grid()
        .elevators_per_bank(vec![2, 4, 6])
        .num_persons(vec![100, 200])
        .dispatch_algorithm(vec![
            DispatchAlgorithmKind::NearestElevator,
            DispatchAlgorithmKind::FirstIdle,
        ]);

    println!("Generating parameter sets...");
    let parameter_sets = space.generate();
    println!("Generated {} parameter combinations", parameter_sets.len());

    // Run experiments in parallel (uses all available CPU cores by default)
    println!("Running simulations in parallel...");
    let results = run_parallel_experiments(parameter_sets.clone(), None);
    println!("Completed {} simulations", results.len());

    let best_idx = find_best_result_index(&results).expect("No results to analyze");

    println!("\n=== Best Configuration ===");
    let best_result = &results[best_idx];
    println!("Completion rate: {:.2}%", best_result.completion_rate * 100.0);
    println!("Completed rides: {}", best_result.completed_trips);
    println!("Avg wait: {:.1}s", best_result.avg_wait_ms / 1000.0);
    println!("P90 wait: {:.1}s", best_result.p90_wait_ms / 1000.0);
    println!("Avg travel: {:.1}s", best_result.avg_travel_ms / 1000.0);
    println!("Rides per car: {:.1}", best_result.trips_per_elevator);

    if let Some(best_params) = find_best_parameters(&results, &parameter_sets) {
        println!("\n=== Best Parameters ===");
        println!("Floors: {}", best_params.params.floor_count);
        println!("Cars per bank: {}", best_params.params.elevators_per_bank);
        println!("Car capacity: {}", best_params.params.elevator_capacity);
        println!("Persons: {}", best_params.params.num_persons);
        let dispatch = match best_params.params.dispatch_algorithm {
            DispatchAlgorithmKind::NearestElevator => "NearestElevator",
            DispatchAlgorithmKind::FirstIdle => "FirstIdle",
        };
        println!("Dispatch algorithm: {}", dispatch);
        let call_strategy = match best_params.params.call_strategy {
            CallStrategyKind::RandomBank => "RandomBank",
            CallStrategyKind::AllBanks => "AllBanks",
        };
        println!("Call strategy: {}", call_strategy);
    }

    println!("\nExporting results...");
    export_to_csv(&results, &parameter_sets, "experiment_results.csv")?;
    println!("Exported to experiment_results.csv");

    println!("\nExperiment complete!");

    Ok(())
}
