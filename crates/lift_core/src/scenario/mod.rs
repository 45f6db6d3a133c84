//! Scenario setup: a building, its elevator banks, and a crowd of persons
//! with randomized day schedules.

mod build;
mod params;

pub use build::{build_scenario, random_day_schedule};
pub use params::{ElevatorTiming, ScenarioParams, SimulationEndTimeMs};
