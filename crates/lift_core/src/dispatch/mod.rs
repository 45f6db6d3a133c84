pub mod algorithm;
pub mod first_idle;
pub mod nearest;
pub mod types;

use bevy_ecs::prelude::Resource;

pub use algorithm::DispatchAlgorithm;
pub use first_idle::FirstIdleDispatch;
pub use nearest::NearestElevatorDispatch;
pub use types::ElevatorCandidate;

/// Which dispatch algorithm a scenario should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchAlgorithmKind {
    #[default]
    NearestElevator,
    FirstIdle,
}

/// Resource wrapper for the dispatch algorithm trait object.
#[derive(Resource)]
pub struct DispatchAlgorithmResource(pub Box<dyn DispatchAlgorithm>);

impl DispatchAlgorithmResource {
    pub fn new(algorithm: Box<dyn DispatchAlgorithm>) -> Self {
        Self(algorithm)
    }
}

impl std::ops::Deref for DispatchAlgorithmResource {
    type Target = dyn DispatchAlgorithm;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Build the boxed dispatch algorithm for the given kind.
pub fn build_dispatch_algorithm(kind: &DispatchAlgorithmKind) -> DispatchAlgorithmResource {
    match kind {
        DispatchAlgorithmKind::NearestElevator => {
            DispatchAlgorithmResource::new(Box::new(NearestElevatorDispatch))
        }
        DispatchAlgorithmKind::FirstIdle => {
            DispatchAlgorithmResource::new(Box::new(FirstIdleDispatch))
        }
    }
}
