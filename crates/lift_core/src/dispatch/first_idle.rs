use bevy_ecs::prelude::Entity;

use super::algorithm::DispatchAlgorithm;
use super::types::ElevatorCandidate;
use crate::building::{Direction, Floor};

/// Baseline dispatch: the first idle car, or the first car at all when none
/// are idle. Useful as a comparison point for the scored algorithm.
#[derive(Debug, Default)]
pub struct FirstIdleDispatch;

impl DispatchAlgorithm for FirstIdleDispatch {
    fn select(
        &self,
        candidates: &[ElevatorCandidate],
        _floor_count: usize,
        _floor: Floor,
        _direction: Direction,
    ) -> Option<Entity> {
        candidates
            .iter()
            .find(|c| c.direction == Direction::Idle)
            .or_else(|| candidates.first())
            .map(|c| c.entity)
    }
}
