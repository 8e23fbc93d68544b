//! Registration backend library.
//!
//! Hexagonal layout: `domain` holds entities, ports, and services;
//! `inbound` adapts HTTP and WebSocket traffic onto them; `outbound`
//! implements the ports against MongoDB, S3, and SMTP; `server` wires
//! everything into a running Actix application.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use doc::ApiDoc;
pub use middleware::Trace;
