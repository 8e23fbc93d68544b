//! Live-feed adapter publishing signup events onto the broadcast channel.

use tokio::sync::broadcast;

use crate::domain::ports::LiveFeed;
use crate::domain::SignupEvent;

/// [`LiveFeed`] over the WebSocket broadcast channel.
///
/// A send with no subscribers fails at the channel level; that is the
/// normal at-most-once case and is deliberately swallowed.
pub struct BroadcastFeed {
    events: broadcast::Sender<SignupEvent>,
}

impl BroadcastFeed {
    /// Wrap the channel handle shared with the WebSocket state.
    pub fn new(events: broadcast::Sender<SignupEvent>) -> Self {
        Self { events }
    }
}

impl LiveFeed for BroadcastFeed {
    fn publish(&self, event: SignupEvent) {
        let _ = self.events.send(event);
    }
}
