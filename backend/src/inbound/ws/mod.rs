//! WebSocket inbound adapter bridging signup events to connected clients.
//!
//! Responsibilities:
//! - perform the WebSocket upgrade for `/ws`
//! - spawn the per-connection session task
//! - keep WebSocket-specific concerns at the edge of the system

use actix_web::web::{self, Payload};
use actix_web::{get, rt, HttpRequest, HttpResponse};
use tracing::error;

mod session;

pub mod messages;
pub mod state;

/// Handle WebSocket upgrade for the `/ws` endpoint.
#[get("/ws")]
pub async fn ws_entry(
    state: web::Data<state::WsState>,
    req: HttpRequest,
    stream: Payload,
) -> actix_web::Result<HttpResponse> {
    let (response, session, message_stream) =
        actix_ws::handle(&req, stream).inspect_err(|err| {
            error!(error = %err, "WebSocket upgrade failed");
        })?;

    // Subscribe before returning the handshake so events published during
    // the upgrade are not missed.
    let events = state.subscribe();
    rt::spawn(session::handle_ws_session(events, session, message_stream));

    Ok(response)
}
