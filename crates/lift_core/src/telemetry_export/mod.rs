//! Parquet export of simulation telemetry for offline analysis.

mod agent_positions;
mod completed_trips;
mod snapshot_counts;
mod utils;

pub use agent_positions::write_agent_positions_parquet;
pub use completed_trips::write_completed_trips_parquet;
pub use snapshot_counts::write_snapshot_counts_parquet;
