use crate::metrics::SimulationResult;

/// Index of the run with the lowest average wait time, ignoring runs
/// that completed no rides.
pub(crate) fn find_best_index_by_wait(results: &[SimulationResult]) -> Option<usize> {
    results
        .iter()
        .enumerate()
        .filter(|(_, result)| result.completed_trips > 0)
        .min_by(|(_, a), (_, b)| {
            a.avg_wait_ms
                .partial_cmp(&b.avg_wait_ms)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(idx, _)| idx)
}
