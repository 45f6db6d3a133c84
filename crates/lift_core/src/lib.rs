pub mod bank;
pub mod building;
pub mod call_strategy;
pub mod clock;
pub mod dispatch;
pub mod ecs;
pub mod elevator;
pub mod profiling;
pub mod runner;
pub mod scenario;
pub mod schedule;
pub mod systems;
pub mod telemetry;
pub mod telemetry_export;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;
