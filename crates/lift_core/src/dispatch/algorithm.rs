use bevy_ecs::prelude::Entity;

use super::types::ElevatorCandidate;
use crate::building::{Direction, Floor};

/// Trait for dispatch algorithms that pick the elevator answering a hall call.
///
/// Dispatch runs over state snapshots rather than live components so the
/// algorithm stays independent of how the ECS stores elevators.
pub trait DispatchAlgorithm: Send + Sync {
    /// Pick the elevator to send to `floor` for a caller travelling in
    /// `direction`. Returns `None` when no candidate is acceptable.
    ///
    /// `floor_count` is the number of floors the bank serves and bounds the
    /// suitability scores.
    fn select(
        &self,
        candidates: &[ElevatorCandidate],
        floor_count: usize,
        floor: Floor,
        direction: Direction,
    ) -> Option<Entity>;
}
