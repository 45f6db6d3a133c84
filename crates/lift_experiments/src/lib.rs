//! Parallel experimentation framework for elevator simulation parameter sweeps.
//!
//! This crate runs multiple simulations in parallel with varying parameters,
//! extracts wait/travel time metrics, and ranks configurations to analyze how
//! car counts, capacity, and dispatch policy affect service quality.
//!
//! # Quick Start
//!
//! ```no_run
//! use lift_experiments::{find_best_result_index, run_parallel_experiments, ParameterSpace};
//!
//! // Define parameter space (grid search)
//! let space = ParameterSpace::grid()
//!     .elevators_per_bank(vec![2, 4, 6])
//!     .num_persons(vec![100, 200])
//!     .floor_count(vec![10, 20]);
//!
//! // Generate parameter sets
//! let parameter_sets = space.generate();
//!
//! // Run experiments in parallel
//! let results = run_parallel_experiments(parameter_sets, None);
//!
//! // Find the configuration with the lowest average wait
//! let best_idx = find_best_result_index(&results).unwrap();
//! ```
//!
//! # Architecture
//!
//! - [`parameters`]: Parameter variation framework (grid search, random sampling)
//! - [`runner`]: Parallel simulation execution using rayon
//! - [`metrics`]: Metrics extraction from simulation results
//! - [`export`]: Result export to CSV/JSON and best-configuration lookup

pub mod export;
pub mod metrics;
pub mod parameters;
pub mod runner;

pub use export::{export_to_csv, export_to_json, find_best_parameters, find_best_result_index};
pub use metrics::{extract_metrics, SimulationResult};
pub use parameters::{ParameterSet, ParameterSpace};
pub use runner::{run_parallel_experiments, run_parallel_experiments_with_progress, run_single_simulation};
