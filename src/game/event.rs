//! Event System
//!
//! The update phase records what happened during a tick (a bug hit the
//! player, a bug walked off the board) instead of reporting it directly.
//! The host loop drains the queues after each tick and logs them.

use super::pool::SlotId;

/// A queue for events of a single type.
/// Events are collected during the tick and drained by the host.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Container for all game events
#[derive(Debug, Default)]
pub struct Events {
    /// A bug hit the player
    pub collision: EventQueue<CollisionEvent>,

    /// A bug left the board and was sent back to the start
    pub recycle: EventQueue<RecycleEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }
}

// =============================================================================
// Event Types
// =============================================================================

/// A bug touched the player, who was sent back to the start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    /// Which bug
    pub enemy: SlotId,
    /// Cell the player was on when hit
    pub cell: (i32, i32),
}

/// A bug was recycled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecycleEvent {
    pub enemy: SlotId,
    /// Lane drawn for the next pass
    pub lane: i32,
    /// How many times this slot has been recycled, including this one
    pub pass: u32,
}
