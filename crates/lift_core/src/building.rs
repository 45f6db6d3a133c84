//! Building geometry: floors, travel directions, and the shared floor list.

use bevy_ecs::prelude::Resource;

/// A single floor, identified by its 1-based level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Floor {
    level: u32,
}

impl Floor {
    /// Create a floor at the given 1-based level.
    pub fn new(level: u32) -> Self {
        Self { level }
    }

    /// 1-based level of this floor.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Absolute number of floors between this floor and `other`.
    pub fn distance(&self, other: Floor) -> u32 {
        self.level.abs_diff(other.level)
    }

    /// Direction of travel from this floor toward `other`.
    pub fn direction_to(&self, other: Floor) -> Direction {
        match other.level.cmp(&self.level) {
            std::cmp::Ordering::Greater => Direction::Up,
            std::cmp::Ordering::Less => Direction::Down,
            std::cmp::Ordering::Equal => Direction::Idle,
        }
    }
}

/// Vertical travel direction of an elevator or a hall call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Up,
    Down,
    #[default]
    Idle,
}

impl Direction {
    /// Signed per-floor step for this direction.
    pub fn as_step(&self) -> i64 {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
            Direction::Idle => 0,
        }
    }

    /// The opposite direction. Idle reverses to itself.
    pub fn reversed(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Idle => Direction::Idle,
        }
    }
}

/// Shared, ordered floor list for the whole simulated building.
#[derive(Debug, Clone, Default, Resource)]
pub struct Building {
    floors: Vec<Floor>,
}

impl Building {
    /// Empty building with no floors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Building with `count` floors at levels `1..=count`.
    pub fn with_floor_count(count: u32) -> Self {
        Self {
            floors: (1..=count).map(Floor::new).collect(),
        }
    }

    /// Append a floor one level above the current highest.
    pub fn add_floor(&mut self) -> Floor {
        let level = self.floors.last().map(|f| f.level() + 1).unwrap_or(1);
        let floor = Floor::new(level);
        self.floors.push(floor);
        floor
    }

    /// All floors, lowest first.
    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    /// Number of floors.
    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    /// Lowest floor, if any floors exist.
    pub fn lowest(&self) -> Option<Floor> {
        self.floors.first().copied()
    }

    /// Highest floor, if any floors exist.
    pub fn highest(&self) -> Option<Floor> {
        self.floors.last().copied()
    }

    /// Look up a floor by its 1-based level.
    pub fn floor_at_level(&self, level: u32) -> Option<Floor> {
        self.floors
            .iter()
            .find(|f| f.level() == level)
            .copied()
    }
}
