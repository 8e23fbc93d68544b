//! Driven port for the admin live-update channel.

use crate::domain::events::SignupEvent;

/// Unreliable publish-only side channel for admin observers.
///
/// Delivery is at-most-once with no acknowledgment or replay: observers
/// disconnected at publish time simply miss the event. Publishing never
/// fails from the domain's point of view.
pub trait LiveFeed: Send + Sync {
    /// Broadcast a signup event to all connected observers.
    fn publish(&self, event: SignupEvent);
}
