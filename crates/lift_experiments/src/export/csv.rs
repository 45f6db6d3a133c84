use lift_core::call_strategy::CallStrategyKind;
use lift_core::dispatch::DispatchAlgorithmKind;

use crate::metrics::SimulationResult;
use crate::parameters::ParameterSet;

pub(crate) fn export_to_csv_impl(
    results: &[SimulationResult],
    parameter_sets: &[ParameterSet],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    if results.len() != parameter_sets.len() {
        return Err(format!(
            "Results length ({}) doesn't match parameter_sets length ({})",
            results.len(),
            parameter_sets.len()
        )
        .into());
    }

    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record([
        "experiment_id",
        "run_id",
        "seed",
        "floor_count",
        "bank_count",
        "elevators_per_bank",
        "elevator_capacity",
        "num_persons",
        "min_entries_per_person",
        "max_entries_per_person",
        "schedule_window_ms",
        "floor_travel_ms",
        "door_dwell_ms",
        "dispatch_algorithm",
        "call_strategy",
        "simulation_end_time_ms",
        "total_persons",
        "total_elevators",
        "completed_persons",
        "completion_rate",
        "completed_trips",
        "trips_per_elevator",
        "total_floors_traveled",
        "avg_wait_ms",
        "median_wait_ms",
        "p90_wait_ms",
        "avg_travel_ms",
        "median_travel_ms",
        "p90_travel_ms",
    ])?;

    for (result, param_set) in results.iter().zip(parameter_sets.iter()) {
        let params = &param_set.params;
        let dispatch_str = match params.dispatch_algorithm {
            DispatchAlgorithmKind::NearestElevator => "NearestElevator",
            DispatchAlgorithmKind::FirstIdle => "FirstIdle",
        };
        let call_strategy_str = match params.call_strategy {
            CallStrategyKind::RandomBank => "RandomBank",
            CallStrategyKind::AllBanks => "AllBanks",
        };

        wtr.write_record([
            &param_set.experiment_id,
            &param_set.run_id.to_string(),
            &param_set.seed.to_string(),
            &params.floor_count.to_string(),
            &params.bank_count.to_string(),
            &params.elevators_per_bank.to_string(),
            &params.elevator_capacity.to_string(),
            &params.num_persons.to_string(),
            &params.min_entries_per_person.to_string(),
            &params.max_entries_per_person.to_string(),
            &params.schedule_window_ms.to_string(),
            &params.floor_travel_ms.to_string(),
            &params.door_dwell_ms.to_string(),
            dispatch_str,
            call_strategy_str,
            &params
                .simulation_end_time_ms
                .map(|e| e.to_string())
                .unwrap_or_default(),
            &result.total_persons.to_string(),
            &result.total_elevators.to_string(),
            &result.completed_persons.to_string(),
            &result.completion_rate.to_string(),
            &result.completed_trips.to_string(),
            &result.trips_per_elevator.to_string(),
            &result.total_floors_traveled.to_string(),
            &result.avg_wait_ms.to_string(),
            &result.median_wait_ms.to_string(),
            &result.p90_wait_ms.to_string(),
            &result.avg_travel_ms.to_string(),
            &result.median_travel_ms.to_string(),
            &result.p90_travel_ms.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
