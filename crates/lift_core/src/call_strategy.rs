//! Strategies for choosing which elevator banks a person calls.

use bevy_ecs::prelude::{Entity, Resource};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Which call strategy a scenario should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallStrategyKind {
    /// Call a single randomly chosen bank.
    #[default]
    RandomBank,
    /// Call every bank and board whichever car arrives first.
    AllBanks,
}

#[derive(Resource)]
pub struct CallStrategy {
    kind: CallStrategyKind,
    rng: StdRng,
}

impl CallStrategy {
    pub fn new(kind: CallStrategyKind, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { kind, rng }
    }

    pub fn kind(&self) -> CallStrategyKind {
        self.kind
    }

    /// The banks a person should call for their next trip.
    pub fn select(&mut self, banks: &[Entity]) -> Vec<Entity> {
        if banks.is_empty() {
            return Vec::new();
        }
        match self.kind {
            CallStrategyKind::RandomBank => {
                let index = self.rng.gen_range(0..banks.len());
                vec![banks[index]]
            }
            CallStrategyKind::AllBanks => banks.to_vec(),
        }
    }
}
