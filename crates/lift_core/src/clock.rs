use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy_ecs::prelude::{Entity, Resource};

pub const ONE_SEC_MS: u64 = 1_000;
pub const ONE_MIN_MS: u64 = 60 * ONE_SEC_MS;
pub const ONE_HOUR_MS: u64 = 60 * ONE_MIN_MS;
pub const ONE_DAY_MS: u64 = 24 * ONE_HOUR_MS;

/// Discrete event kinds the runner dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    SimulationStarted,
    PersonWake,
    ElevatorStep,
    DoorsOpened,
}

/// Entity the event concerns, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSubject {
    Person(Entity),
    Elevator(Entity),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub timestamp: u64,
    /// Scheduling order, used to break ties at equal timestamps.
    pub seq: u64,
    pub kind: EventKind,
    pub subject: Option<EventSubject>,
}

impl Event {
    /// The person entity this event targets, if the subject is a person.
    pub fn subject_person(&self) -> Option<Entity> {
        match self.subject {
            Some(EventSubject::Person(entity)) => Some(entity),
            _ => None,
        }
    }

    /// The elevator entity this event targets, if the subject is an elevator.
    pub fn subject_elevator(&self) -> Option<Entity> {
        match self.subject {
            Some(EventSubject::Elevator(entity)) => Some(entity),
            _ => None,
        }
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by timestamp,
        // then by scheduling order so equal-time events pop FIFO.
        other
            .timestamp
            .cmp(&self.timestamp)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The event currently being processed by the schedule.
#[derive(Debug, Clone, Copy, Resource)]
pub struct CurrentEvent(pub Event);

#[derive(Debug, Default, Resource)]
pub struct SimulationClock {
    now: u64,
    next_seq: u64,
    events: BinaryHeap<Event>,
    /// Wall-clock milliseconds corresponding to simulation time zero.
    epoch_ms: i64,
}

impl SimulationClock {
    /// Clock anchored at the given wall-clock epoch (unix milliseconds).
    pub fn with_epoch(epoch_ms: i64) -> Self {
        Self {
            epoch_ms,
            ..Default::default()
        }
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn epoch_ms(&self) -> i64 {
        self.epoch_ms
    }

    pub fn set_epoch_ms(&mut self, epoch_ms: i64) {
        self.epoch_ms = epoch_ms;
    }

    /// Map a simulation timestamp to wall-clock unix milliseconds.
    pub fn sim_to_real_ms(&self, sim_ms: u64) -> i64 {
        self.epoch_ms + sim_ms as i64
    }

    /// Map wall-clock unix milliseconds back to simulation time.
    /// Returns `None` for instants before the epoch.
    pub fn real_to_sim_ms(&self, real_ms: i64) -> Option<u64> {
        let delta = real_ms - self.epoch_ms;
        u64::try_from(delta).ok()
    }

    /// Schedule an event at an absolute simulation timestamp.
    pub fn schedule_at(&mut self, timestamp: u64, kind: EventKind, subject: Option<EventSubject>) {
        debug_assert!(
            timestamp >= self.now,
            "event timestamp must be >= current time"
        );
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(Event {
            timestamp,
            seq,
            kind,
            subject,
        });
    }

    /// Schedule an event `delay_ms` milliseconds from now.
    pub fn schedule_in(&mut self, delay_ms: u64, kind: EventKind, subject: Option<EventSubject>) {
        self.schedule_at(self.now + delay_ms, kind, subject);
    }

    /// Schedule an event `delay_secs` seconds from now.
    pub fn schedule_in_secs(
        &mut self,
        delay_secs: u64,
        kind: EventKind,
        subject: Option<EventSubject>,
    ) {
        self.schedule_in(delay_secs * ONE_SEC_MS, kind, subject);
    }

    /// Pop the next event and advance the clock to its timestamp.
    pub fn pop_next(&mut self) -> Option<Event> {
        let event = self.events.pop()?;
        self.now = event.timestamp;
        Some(event)
    }

    /// Timestamp of the next pending event without popping it.
    pub fn next_event_time(&self) -> Option<u64> {
        self.events.peek().map(|e| e.timestamp)
    }

    pub fn pending_event_count(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
