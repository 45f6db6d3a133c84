//! Result export and analysis utilities.
//!
//! Exports experiment results to CSV and JSON, and ranks configurations
//! by average wait time.

use std::path::Path;

use crate::metrics::SimulationResult;
use crate::parameters::ParameterSet;

#[path = "export/csv.rs"]
mod csv;
#[path = "export/json.rs"]
mod json;
#[path = "export/ranking.rs"]
mod ranking;
#[path = "export/writer_utils.rs"]
mod writer_utils;

/// Export simulation results with parameters to CSV format.
///
/// Creates a CSV file with columns for all parameters and all metrics.
/// Parameters and results are paired by index (`results[i]` corresponds
/// to `parameter_sets[i]`).
///
/// # Errors
///
/// Returns an error if file creation or CSV writing fails, or if the
/// results and parameter_sets lengths don't match.
pub fn export_to_csv(
    results: &[SimulationResult],
    parameter_sets: &[ParameterSet],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_not_empty(results)?;
    let file = writer_utils::create_output_file(path)?;
    csv::export_to_csv_impl(results, parameter_sets, file)
}

/// Export simulation results to JSON format.
///
/// Creates a JSON file with an array of all results.
///
/// # Errors
///
/// Returns an error if file creation or JSON serialization fails.
pub fn export_to_json(
    results: &[SimulationResult],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    json::export_to_json_impl(results, file)
}

/// Find the result with the lowest average wait time.
///
/// Results with no completed rides are skipped. Returns None if every
/// result is empty.
pub fn find_best_result_index(results: &[SimulationResult]) -> Option<usize> {
    ranking::find_best_index_by_wait(results)
}

/// Find the parameter set whose run had the lowest average wait time.
///
/// Returns None if inputs are empty, mismatched in length, or no run
/// completed any rides.
pub fn find_best_parameters<'a>(
    results: &[SimulationResult],
    parameter_sets: &'a [ParameterSet],
) -> Option<&'a ParameterSet> {
    if results.len() != parameter_sets.len() {
        return None;
    }
    ranking::find_best_index_by_wait(results).map(|idx| &parameter_sets[idx])
}
