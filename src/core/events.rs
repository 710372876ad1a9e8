//! Simulation event queue for host observation
//!
//! The renderer, audio, or any other host system watches the simulation
//! through these events instead of poking at its internals. The queue is
//! double-buffered: events pushed during one tick become readable when the
//! tick completes and stay readable until the next tick completes.

use std::collections::VecDeque;

use crate::ai::ForageState;

// ============================================================================
// Event Types
// ============================================================================

/// Things that happened during a simulation tick.
///
/// `ant` fields are spawn-order indices, stable for the lifetime of the
/// simulation.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum SimEvent {
    /// An ant took food from a source.
    FoodPicked {
        /// Spawn-order index of the ant
        ant: usize,
        /// The food entity harvested
        food: hecs::Entity,
        /// Units taken
        amount: u32,
    },

    /// A food source ran out and was removed from the world.
    FoodExhausted {
        /// The exhausted food entity
        food: hecs::Entity,
    },

    /// An ant delivered its load to the nest.
    FoodDelivered {
        /// Spawn-order index of the ant
        ant: usize,
        /// Units delivered
        amount: u32,
        /// Nest total after the delivery
        total: u32,
    },

    /// A route was computed for an ant.
    PathPlanned {
        /// Spawn-order index of the ant
        ant: usize,
        /// Number of waypoints in the route
        waypoints: usize,
    },

    /// Route planning failed; the ant stays put and retries.
    PathFailed {
        /// Spawn-order index of the ant
        ant: usize,
    },

    /// An ant's behavior state changed this tick.
    StateChanged {
        /// Spawn-order index of the ant
        ant: usize,
        /// State before the tick
        from: ForageState,
        /// State after the tick
        to: ForageState,
    },
}

// ============================================================================
// Event Queue
// ============================================================================

/// Double-buffered event queue.
///
/// Pushes land in a pending buffer; [`swap`](EventQueue::swap) publishes
/// them and clears the previous batch, so readers always see one complete
/// tick's worth of events regardless of when they look.
#[derive(Debug, Default)]
pub struct EventQueue {
    /// Events being written this tick
    pending: VecDeque<SimEvent>,
    /// Events from the completed tick, ready for processing
    processing: VecDeque<SimEvent>,
}

impl EventQueue {
    /// Default initial capacity for event queues.
    const DEFAULT_CAPACITY: usize = 64;

    /// Create a new event queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(Self::DEFAULT_CAPACITY),
            processing: VecDeque::with_capacity(Self::DEFAULT_CAPACITY),
        }
    }

    /// Push an event; it becomes readable after the next `swap`.
    #[inline]
    pub fn push(&mut self, event: SimEvent) {
        self.pending.push_back(event);
    }

    /// Publish pending events and discard the previous batch.
    ///
    /// The simulation calls this at the end of every tick.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.pending, &mut self.processing);
        self.pending.clear();
    }

    /// Iterate over the published batch.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &SimEvent> {
        self.processing.iter()
    }

    /// Drain the published batch, taking ownership of the events.
    #[inline]
    pub fn drain(&mut self) -> impl Iterator<Item = SimEvent> + '_ {
        self.processing.drain(..)
    }

    /// True when the published batch is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.processing.is_empty()
    }

    /// Number of published events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.processing.len()
    }

    /// Clear both buffers, e.g. when resetting a simulation.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.processing.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_queue_push_and_swap() {
        let mut queue = EventQueue::new();

        queue.push(SimEvent::PathFailed { ant: 3 });
        assert!(queue.is_empty(), "events are not visible before swap");

        queue.swap();
        assert_eq!(queue.len(), 1);

        let events: Vec<_> = queue.iter().collect();
        assert!(matches!(events[0], SimEvent::PathFailed { ant: 3 }));
    }

    #[test]
    fn test_swap_discards_old_batch() {
        let mut queue = EventQueue::new();

        queue.push(SimEvent::PathFailed { ant: 0 });
        queue.swap();
        queue.push(SimEvent::PathPlanned {
            ant: 1,
            waypoints: 5,
        });
        queue.swap();

        assert_eq!(queue.len(), 1);
        let events: Vec<_> = queue.iter().collect();
        assert!(matches!(events[0], SimEvent::PathPlanned { ant: 1, .. }));
    }

    #[test]
    fn test_drain_takes_ownership() {
        let mut queue = EventQueue::new();
        queue.push(SimEvent::FoodExhausted {
            food: hecs::World::new().spawn(()),
        });
        queue.swap();

        let drained: Vec<_> = queue.drain().collect();

        assert_eq!(drained.len(), 1);
        assert!(queue.is_empty());
    }
}
