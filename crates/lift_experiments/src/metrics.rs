//! Metrics extraction from simulation results.
//!
//! Aggregates completed-ride telemetry into per-run KPIs: completion
//! counts, wait and travel time statistics, and per-car throughput.

use bevy_ecs::prelude::World;
use lift_core::ecs::{Person, PersonState};
use lift_core::elevator::Elevator;
use lift_core::telemetry::SimTelemetry;

/// Aggregated metrics from a single simulation run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SimulationResult {
    /// Total number of persons spawned.
    pub total_persons: usize,
    /// Total number of elevator cars spawned.
    pub total_elevators: usize,
    /// Persons whose day schedule fully completed.
    pub completed_persons: usize,
    /// Completion rate (completed persons / total persons).
    pub completion_rate: f64,
    /// Total number of completed rides.
    pub completed_trips: usize,
    /// Completed rides per car.
    pub trips_per_elevator: f64,
    /// Sum of floor distances over all completed rides.
    pub total_floors_traveled: u64,
    /// Average wait time (call to boarding) in milliseconds.
    pub avg_wait_ms: f64,
    /// Median wait time in milliseconds.
    pub median_wait_ms: f64,
    /// P90 wait time in milliseconds.
    pub p90_wait_ms: f64,
    /// Average travel time (boarding to alighting) in milliseconds.
    pub avg_travel_ms: f64,
    /// Median travel time in milliseconds.
    pub median_travel_ms: f64,
    /// P90 travel time in milliseconds.
    pub p90_travel_ms: f64,
}

impl SimulationResult {
    /// Average, median and P90 of a sample, all zero for an empty sample.
    fn calculate_stats(values: &[u64]) -> (f64, f64, f64) {
        if values.is_empty() {
            return (0.0, 0.0, 0.0);
        }

        let mut sorted = values.to_vec();
        sorted.sort_unstable();

        let avg = sorted.iter().sum::<u64>() as f64 / sorted.len() as f64;
        let median = if sorted.len() % 2 == 0 {
            (sorted[sorted.len() / 2 - 1] + sorted[sorted.len() / 2]) as f64 / 2.0
        } else {
            sorted[sorted.len() / 2] as f64
        };
        let p90_idx = ((sorted.len() - 1) as f64 * 0.9) as usize;
        let p90 = sorted[p90_idx.min(sorted.len() - 1)] as f64;

        (avg, median, p90)
    }
}

/// Extract metrics from a completed simulation world.
///
/// Reads ride telemetry and queries person/elevator state to compute
/// completion rates, throughput, and wait/travel time statistics.
pub fn extract_metrics(world: &mut World) -> SimulationResult {
    // Telemetry first (immutable borrow), queries after it is dropped
    let (wait_times, travel_times, total_floors_traveled) = {
        let telemetry = world
            .get_resource::<SimTelemetry>()
            .expect("SimTelemetry resource not found");

        let mut waits = Vec::with_capacity(telemetry.completed_trips.len());
        let mut travels = Vec::with_capacity(telemetry.completed_trips.len());
        let mut floors = 0u64;
        for trip in &telemetry.completed_trips {
            waits.push(trip.wait_time());
            travels.push(trip.travel_time());
            floors += trip.distance as u64;
        }
        (waits, travels, floors)
    };

    let (total_persons, completed_persons) = {
        let mut total = 0;
        let mut done = 0;
        for person in world.query::<&Person>().iter(world) {
            total += 1;
            if person.state == PersonState::Done {
                done += 1;
            }
        }
        (total, done)
    };

    let total_elevators = world.query::<&Elevator>().iter(world).count();

    let completion_rate = if total_persons > 0 {
        completed_persons as f64 / total_persons as f64
    } else {
        0.0
    };

    let completed_trips = wait_times.len();
    let trips_per_elevator = if total_elevators > 0 {
        completed_trips as f64 / total_elevators as f64
    } else {
        0.0
    };

    let (avg_wait, median_wait, p90_wait) = SimulationResult::calculate_stats(&wait_times);
    let (avg_travel, median_travel, p90_travel) = SimulationResult::calculate_stats(&travel_times);

    SimulationResult {
        total_persons,
        total_elevators,
        completed_persons,
        completion_rate,
        completed_trips,
        trips_per_elevator,
        total_floors_traveled,
        avg_wait_ms: avg_wait,
        median_wait_ms: median_wait,
        p90_wait_ms: p90_wait,
        avg_travel_ms: avg_travel,
        median_travel_ms: median_travel,
        p90_travel_ms: p90_travel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_stats() {
        let values = vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100];
        let (avg, median, p90) = SimulationResult::calculate_stats(&values);
        assert_eq!(avg, 55.0);
        // Median of 10 values: average of 5th (50) and 6th (60)
        assert_eq!(median, 55.0);
        assert_eq!(p90, 90.0);
    }

    #[test]
    fn test_calculate_stats_empty() {
        let (avg, median, p90) = SimulationResult::calculate_stats(&[]);
        assert_eq!(avg, 0.0);
        assert_eq!(median, 0.0);
        assert_eq!(p90, 0.0);
    }

    #[test]
    fn extract_metrics_from_empty_world_is_all_zero() {
        let mut world = World::new();
        world.insert_resource(SimTelemetry::default());
        let result = extract_metrics(&mut world);
        assert_eq!(result.total_persons, 0);
        assert_eq!(result.total_elevators, 0);
        assert_eq!(result.completed_trips, 0);
        assert_eq!(result.completion_rate, 0.0);
        assert_eq!(result.trips_per_elevator, 0.0);
    }
}
