//! Inbound adapters: HTTP routes and the WebSocket live feed.

pub mod http;
pub mod ws;
