use bevy_ecs::prelude::Entity;

use super::algorithm::DispatchAlgorithm;
use super::types::ElevatorCandidate;
use crate::building::{Direction, Floor};

/// Nearest-elevator dispatch: score every car by how suitable it is for the
/// call and send the best one.
///
/// Scores, for a bank serving `N` floors and a car `d` floors away:
/// - a car moving away from the call (and not already there) scores 1
/// - a car moving with the call, or idle, scores `N + 2 - d`
/// - any other car scores `N + 1 - d`
///
/// Strict comparison keeps the first car encountered at the best score, so
/// selection is deterministic for a fixed candidate order.
#[derive(Debug, Default)]
pub struct NearestElevatorDispatch;

impl DispatchAlgorithm for NearestElevatorDispatch {
    fn select(
        &self,
        candidates: &[ElevatorCandidate],
        floor_count: usize,
        floor: Floor,
        direction: Direction,
    ) -> Option<Entity> {
        let mut result: (Option<Entity>, i64) = (None, -1);
        for candidate in candidates {
            let distance = candidate.distance(floor) as i64;

            let suitability = if candidate.moving_away(floor) && distance > 0 {
                1
            } else if candidate.direction == direction || candidate.direction == Direction::Idle {
                floor_count as i64 + 2 - distance
            } else {
                floor_count as i64 + 1 - distance
            };

            let (_, best_suitability) = result;
            if suitability > best_suitability {
                result = (Some(candidate.entity), suitability);
            }
        }
        result.0
    }
}
