//! Shared WebSocket adapter state.
//!
//! A single broadcast channel fans signup events out to every connected
//! session. Delivery is at-most-once: there is no replay for observers
//! that connect late or fall behind.

use tokio::sync::broadcast;

use crate::domain::SignupEvent;

/// Buffered events per subscriber before the channel reports lag.
const CHANNEL_CAPACITY: usize = 64;

/// Dependency bundle for WebSocket handlers and sessions.
#[derive(Clone)]
pub struct WsState {
    events: broadcast::Sender<SignupEvent>,
}

impl Default for WsState {
    fn default() -> Self {
        Self::new()
    }
}

impl WsState {
    /// Create a state with a fresh broadcast channel.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { events }
    }

    /// Subscribe a new session to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<SignupEvent> {
        self.events.subscribe()
    }

    /// Handle used by the outbound feed adapter to publish events.
    pub fn sender(&self) -> broadcast::Sender<SignupEvent> {
        self.events.clone()
    }
}
