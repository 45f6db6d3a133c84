//! Parameter variation framework for exploring simulation parameter space.
//!
//! Defines parameter spaces over scenario knobs and generates parameter
//! sets for parallel experimentation. Supports grid search and random
//! sampling strategies.

use lift_core::call_strategy::CallStrategyKind;
use lift_core::dispatch::DispatchAlgorithmKind;
use lift_core::scenario::ScenarioParams;
use std::collections::HashSet;

/// Represents a single parameter combination.
#[derive(Debug, Clone)]
struct ParameterCombination {
    floor_count: usize,
    elevators_per_bank: usize,
    elevator_capacity: usize,
    num_persons: usize,
    dispatch_algorithm: DispatchAlgorithmKind,
    call_strategy: CallStrategyKind,
    simulation_duration_hours: Option<u64>,
}

/// Holds all parameter variations to explore, with base-config defaults
/// filled in for unspecified dimensions.
struct ParameterVariations {
    floor_counts: Vec<usize>,
    elevators_per_bank: Vec<usize>,
    elevator_capacities: Vec<usize>,
    num_persons: Vec<usize>,
    dispatch_algorithms: Vec<DispatchAlgorithmKind>,
    call_strategies: Vec<CallStrategyKind>,
    simulation_duration_hours: Vec<Option<u64>>,
}

impl ParameterVariations {
    fn from_space(space: &ParameterSpace) -> Self {
        Self {
            floor_counts: if space.floor_counts.is_empty() {
                vec![space.base.floor_count]
            } else {
                space.floor_counts.clone()
            },
            elevators_per_bank: if space.elevators_per_bank.is_empty() {
                vec![space.base.elevators_per_bank]
            } else {
                space.elevators_per_bank.clone()
            },
            elevator_capacities: if space.elevator_capacities.is_empty() {
                vec![space.base.elevator_capacity]
            } else {
                space.elevator_capacities.clone()
            },
            num_persons: if space.num_persons.is_empty() {
                vec![space.base.num_persons]
            } else {
                space.num_persons.clone()
            },
            dispatch_algorithms: if space.dispatch_algorithms.is_empty() {
                vec![space.base.dispatch_algorithm]
            } else {
                space.dispatch_algorithms.clone()
            },
            call_strategies: if space.call_strategies.is_empty() {
                vec![space.base.call_strategy]
            } else {
                space.call_strategies.clone()
            },
            simulation_duration_hours: if space.simulation_duration_hours.is_empty() {
                // Default: no end time (set automatically in the runner)
                vec![None]
            } else {
                space.simulation_duration_hours.clone()
            },
        }
    }

    /// Generate all combinations using Cartesian product.
    fn generate_combinations(&self) -> impl Iterator<Item = ParameterCombination> + '_ {
        self.floor_counts
            .iter()
            .flat_map(move |&floor_count| self.expand_with_elevators(floor_count))
    }

    fn expand_with_elevators(
        &self,
        floor_count: usize,
    ) -> impl Iterator<Item = ParameterCombination> + '_ {
        self.elevators_per_bank
            .iter()
            .flat_map(move |&elevators_per_bank| {
                self.expand_with_capacities(floor_count, elevators_per_bank)
            })
    }

    fn expand_with_capacities(
        &self,
        floor_count: usize,
        elevators_per_bank: usize,
    ) -> impl Iterator<Item = ParameterCombination> + '_ {
        self.elevator_capacities
            .iter()
            .flat_map(move |&elevator_capacity| {
                self.expand_with_persons(floor_count, elevators_per_bank, elevator_capacity)
            })
    }

    fn expand_with_persons(
        &self,
        floor_count: usize,
        elevators_per_bank: usize,
        elevator_capacity: usize,
    ) -> impl Iterator<Item = ParameterCombination> + '_ {
        self.num_persons.iter().flat_map(move |&num_persons| {
            self.expand_with_dispatch(
                floor_count,
                elevators_per_bank,
                elevator_capacity,
                num_persons,
            )
        })
    }

    fn expand_with_dispatch(
        &self,
        floor_count: usize,
        elevators_per_bank: usize,
        elevator_capacity: usize,
        num_persons: usize,
    ) -> impl Iterator<Item = ParameterCombination> + '_ {
        self.dispatch_algorithms
            .iter()
            .flat_map(move |&dispatch_algorithm| {
                self.expand_with_call_strategies(
                    floor_count,
                    elevators_per_bank,
                    elevator_capacity,
                    num_persons,
                    dispatch_algorithm,
                )
            })
    }

    fn expand_with_call_strategies(
        &self,
        floor_count: usize,
        elevators_per_bank: usize,
        elevator_capacity: usize,
        num_persons: usize,
        dispatch_algorithm: DispatchAlgorithmKind,
    ) -> impl Iterator<Item = ParameterCombination> + '_ {
        self.call_strategies.iter().flat_map(move |&call_strategy| {
            self.expand_with_duration(
                floor_count,
                elevators_per_bank,
                elevator_capacity,
                num_persons,
                dispatch_algorithm,
                call_strategy,
            )
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn expand_with_duration(
        &self,
        floor_count: usize,
        elevators_per_bank: usize,
        elevator_capacity: usize,
        num_persons: usize,
        dispatch_algorithm: DispatchAlgorithmKind,
        call_strategy: CallStrategyKind,
    ) -> impl Iterator<Item = ParameterCombination> + '_ {
        self.simulation_duration_hours
            .iter()
            .map(move |&simulation_duration_hours| ParameterCombination {
                floor_count,
                elevators_per_bank,
                elevator_capacity,
                num_persons,
                dispatch_algorithm,
                call_strategy,
                simulation_duration_hours,
            })
    }
}

/// A single parameter configuration for a simulation run.
///
/// Wraps `ScenarioParams` with experiment metadata for tracking and
/// reproducibility.
#[derive(Debug, Clone)]
pub struct ParameterSet {
    /// Base scenario parameters.
    pub params: ScenarioParams,
    /// Unique experiment ID for this parameter configuration.
    pub experiment_id: String,
    /// Run ID within the experiment (for multiple runs with same params).
    pub run_id: usize,
    /// Seed used for this run.
    pub seed: u64,
}

impl ParameterSet {
    pub fn new(params: ScenarioParams, experiment_id: String, run_id: usize, seed: u64) -> Self {
        Self {
            params,
            experiment_id,
            run_id,
            seed,
        }
    }

    /// Get the scenario params with this run's seed applied.
    pub fn scenario_params(&self) -> ScenarioParams {
        let mut params = self.params.clone();
        params.seed = Some(self.seed);
        params
    }
}

/// Defines a parameter space for exploration.
///
/// Supports grid search (Cartesian product) and random sampling.
#[derive(Debug, Clone)]
pub struct ParameterSpace {
    /// Base parameters (used as defaults for unspecified dimensions).
    base: ScenarioParams,
    floor_counts: Vec<usize>,
    elevators_per_bank: Vec<usize>,
    elevator_capacities: Vec<usize>,
    num_persons: Vec<usize>,
    dispatch_algorithms: Vec<DispatchAlgorithmKind>,
    call_strategies: Vec<CallStrategyKind>,
    simulation_duration_hours: Vec<Option<u64>>,
}

impl ParameterSpace {
    pub fn new() -> Self {
        Self {
            base: ScenarioParams::default(),
            floor_counts: vec![],
            elevators_per_bank: vec![],
            elevator_capacities: vec![],
            num_persons: vec![],
            dispatch_algorithms: vec![],
            call_strategies: vec![],
            simulation_duration_hours: vec![],
        }
    }

    /// Create a new parameter space for grid search.
    pub fn grid() -> Self {
        Self::new()
    }

    /// Set floor counts to explore.
    pub fn floor_count(mut self, counts: Vec<usize>) -> Self {
        self.floor_counts = counts;
        self
    }

    /// Set elevators-per-bank values to explore.
    pub fn elevators_per_bank(mut self, counts: Vec<usize>) -> Self {
        self.elevators_per_bank = counts;
        self
    }

    /// Set elevator capacities to explore.
    pub fn elevator_capacity(mut self, capacities: Vec<usize>) -> Self {
        self.elevator_capacities = capacities;
        self
    }

    /// Set person counts to explore.
    pub fn num_persons(mut self, counts: Vec<usize>) -> Self {
        self.num_persons = counts;
        self
    }

    /// Set dispatch algorithms to explore.
    pub fn dispatch_algorithm(mut self, kinds: Vec<DispatchAlgorithmKind>) -> Self {
        self.dispatch_algorithms = kinds;
        self
    }

    /// Set call strategies to explore.
    pub fn call_strategy(mut self, kinds: Vec<CallStrategyKind>) -> Self {
        self.call_strategies = kinds;
        self
    }

    /// Set simulation duration (in hours past the schedule window) values to explore.
    pub fn simulation_duration_hours(mut self, durations: Vec<Option<u64>>) -> Self {
        self.simulation_duration_hours = durations;
        self
    }

    /// Set base parameters (used as defaults).
    pub fn with_base(mut self, base: ScenarioParams) -> Self {
        self.base = base;
        self
    }

    fn params_from_combination(&self, combo: &ParameterCombination) -> ScenarioParams {
        let mut params = self.base.clone();
        params.floor_count = combo.floor_count;
        params.elevators_per_bank = combo.elevators_per_bank;
        params.elevator_capacity = combo.elevator_capacity;
        params.num_persons = combo.num_persons;
        params.dispatch_algorithm = combo.dispatch_algorithm;
        params.call_strategy = combo.call_strategy;

        if let Some(duration_hours) = combo.simulation_duration_hours {
            // End time = schedule window + duration, leaving room for rides to finish
            let end_time_ms = params
                .schedule_window_ms
                .saturating_add(duration_hours * 60 * 60 * 1000);
            params.simulation_end_time_ms = Some(end_time_ms);
        }

        params
    }

    /// Generate all parameter sets using grid search (Cartesian product).
    ///
    /// Dimensions not given explicit values fall back to the base
    /// configuration.
    pub fn generate(&self) -> Vec<ParameterSet> {
        let variations = ParameterVariations::from_space(self);

        variations
            .generate_combinations()
            .enumerate()
            .map(|(experiment_id, combo)| {
                let params = self.params_from_combination(&combo);
                let seed = (experiment_id as u64).wrapping_mul(0x9e37_79b9);
                ParameterSet::new(params, format!("exp_{}", experiment_id), 0, seed)
            })
            .collect()
    }

    /// Generate random parameter sets (Monte Carlo sampling).
    ///
    /// Samples `count` distinct parameter sets from the defined space.
    /// Duplicate combinations are re-drawn until `count` unique sets exist
    /// or the attempt limit is reached.
    pub fn sample_random(&self, count: usize, seed: u64) -> Vec<ParameterSet> {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        fn pick<T: Copy, R: Rng>(rng: &mut R, values: &[T], fallback: T) -> T {
            if values.is_empty() {
                fallback
            } else {
                values[rng.gen_range(0..values.len())]
            }
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut parameter_sets = Vec::new();
        let mut seen = HashSet::new();
        let mut attempts = 0;
        const MAX_ATTEMPTS: usize = 10_000;

        while parameter_sets.len() < count && attempts < MAX_ATTEMPTS {
            attempts += 1;

            let combo = ParameterCombination {
                floor_count: pick(&mut rng, &self.floor_counts, self.base.floor_count),
                elevators_per_bank: pick(
                    &mut rng,
                    &self.elevators_per_bank,
                    self.base.elevators_per_bank,
                ),
                elevator_capacity: pick(
                    &mut rng,
                    &self.elevator_capacities,
                    self.base.elevator_capacity,
                ),
                num_persons: pick(&mut rng, &self.num_persons, self.base.num_persons),
                dispatch_algorithm: pick(
                    &mut rng,
                    &self.dispatch_algorithms,
                    self.base.dispatch_algorithm,
                ),
                call_strategy: pick(&mut rng, &self.call_strategies, self.base.call_strategy),
                simulation_duration_hours: pick(
                    &mut rng,
                    &self.simulation_duration_hours,
                    None,
                ),
            };
            let params = self.params_from_combination(&combo);

            let param_hash = format!("{:?}", params);
            if seen.contains(&param_hash) {
                continue;
            }
            seen.insert(param_hash);

            let seed_value = seed
                .wrapping_add(parameter_sets.len() as u64)
                .wrapping_mul(0x9e37_79b9);
            parameter_sets.push(ParameterSet::new(
                params,
                format!("random_{}", parameter_sets.len()),
                0,
                seed_value,
            ));
        }

        parameter_sets
    }
}

impl Default for ParameterSpace {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_search_single_parameter() {
        let space = ParameterSpace::grid().elevators_per_bank(vec![2, 4, 6]);
        let sets = space.generate();
        assert_eq!(sets.len(), 3);
    }

    #[test]
    fn test_grid_search_multiple_parameters() {
        let space = ParameterSpace::grid()
            .elevators_per_bank(vec![2, 4])
            .num_persons(vec![50, 100]);
        let sets = space.generate();
        assert_eq!(sets.len(), 4); // 2 * 2 combinations
    }

    #[test]
    fn test_grid_applies_dispatch_and_call_kinds() {
        let space = ParameterSpace::grid()
            .dispatch_algorithm(vec![
                DispatchAlgorithmKind::NearestElevator,
                DispatchAlgorithmKind::FirstIdle,
            ])
            .call_strategy(vec![CallStrategyKind::RandomBank, CallStrategyKind::AllBanks]);
        let sets = space.generate();
        assert_eq!(sets.len(), 4);
        assert_eq!(
            sets[0].params.dispatch_algorithm,
            DispatchAlgorithmKind::NearestElevator
        );
        assert_eq!(sets[3].params.dispatch_algorithm, DispatchAlgorithmKind::FirstIdle);
        assert_eq!(sets[3].params.call_strategy, CallStrategyKind::AllBanks);
    }

    #[test]
    fn test_random_sampling() {
        let space = ParameterSpace::grid()
            .elevators_per_bank(vec![2, 4, 6, 8])
            .num_persons(vec![50, 100, 150]);
        let sets = space.sample_random(10, 42);
        assert_eq!(sets.len(), 10);
    }

    #[test]
    fn test_duration_sets_end_time() {
        let space = ParameterSpace::grid().simulation_duration_hours(vec![Some(2), Some(4)]);
        let sets = space.generate();
        assert_eq!(sets.len(), 2);

        let window = sets[0].scenario_params().schedule_window_ms;
        assert_eq!(
            sets[0].scenario_params().simulation_end_time_ms,
            Some(window + 2 * 60 * 60 * 1000)
        );
        assert_eq!(
            sets[1].scenario_params().simulation_end_time_ms,
            Some(window + 4 * 60 * 60 * 1000)
        );
    }

    #[test]
    fn test_scenario_params_applies_seed() {
        let space = ParameterSpace::grid().num_persons(vec![10, 20]);
        let sets = space.generate();
        for set in &sets {
            assert_eq!(set.scenario_params().seed, Some(set.seed));
        }
    }
}
