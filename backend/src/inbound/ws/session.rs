//! Per-connection WebSocket handler.
//!
//! Keeps WebSocket framing and heartbeats at the edge while the broadcast
//! receiver carries the application events. The public contract pings every
//! 5s and considers a connection idle after 10s without client traffic.
//! Tests shorten these intervals to speed up feedback.

use std::time::{Duration, Instant};

use actix_ws::{CloseCode, CloseReason, Closed, Message, MessageStream, ProtocolError, Session};
use tokio::sync::broadcast;
use tokio::time;
use tracing::warn;

use crate::domain::SignupEvent;
use crate::inbound::ws::messages::ServerMessage;

/// Time between heartbeats to the client.
#[cfg(not(test))]
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
#[cfg(test)]
const HEARTBEAT_INTERVAL: Duration = Duration::from_millis(50);

/// Max idle time before disconnecting the client.
#[cfg(not(test))]
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);
#[cfg(test)]
const CLIENT_TIMEOUT: Duration = Duration::from_millis(100);

pub(super) async fn handle_ws_session(
    events: broadcast::Receiver<SignupEvent>,
    session: Session,
    stream: MessageStream,
) {
    WsSession::new(events).run(session, stream).await;
}

enum SessionError {
    ClientClosed(Option<CloseReason>),
    StreamClosed,
    FeedClosed,
    HeartbeatTimeout,
    Protocol(ProtocolError),
    Network(Closed),
}

enum CloseAction {
    None,
    Close(Option<CloseReason>),
}

struct WsSession {
    events: broadcast::Receiver<SignupEvent>,
}

impl WsSession {
    fn new(events: broadcast::Receiver<SignupEvent>) -> Self {
        Self { events }
    }

    async fn run(mut self, mut session: Session, mut stream: MessageStream) {
        let mut last_heartbeat = Instant::now();
        let mut heartbeat = time::interval(HEARTBEAT_INTERVAL);

        loop {
            let result = tokio::select! {
                _ = heartbeat.tick() => {
                    Self::handle_heartbeat_tick(&mut session, &last_heartbeat).await
                }
                event = self.events.recv() => {
                    Self::handle_feed_event(&mut session, event).await
                }
                message = stream.recv() => {
                    Self::handle_stream_message(&mut session, &mut last_heartbeat, message).await
                }
            };

            if let Err(error) = result {
                Self::log_shutdown_reason(&error);
                let close_action = Self::close_action_for(&error);
                Self::close_session_if_needed(session, close_action).await;
                return;
            }
        }
    }

    async fn handle_heartbeat_tick(
        session: &mut Session,
        last_heartbeat: &Instant,
    ) -> Result<(), SessionError> {
        if Instant::now().duration_since(*last_heartbeat) > CLIENT_TIMEOUT {
            return Err(SessionError::HeartbeatTimeout);
        }

        session.ping(b"").await.map_err(SessionError::Network)
    }

    async fn handle_feed_event(
        session: &mut Session,
        event: Result<SignupEvent, broadcast::error::RecvError>,
    ) -> Result<(), SessionError> {
        match event {
            Ok(event) => Self::send_json(session, &ServerMessage::from(event))
                .await
                .map_err(SessionError::Network),
            // Lagged subscribers drop the missed events and continue.
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                warn!(missed, "WebSocket session lagged behind the signup feed");
                Ok(())
            }
            Err(broadcast::error::RecvError::Closed) => Err(SessionError::FeedClosed),
        }
    }

    async fn handle_stream_message(
        session: &mut Session,
        last_heartbeat: &mut Instant,
        message: Option<Result<Message, ProtocolError>>,
    ) -> Result<(), SessionError> {
        let Some(message) = message else {
            return Err(SessionError::StreamClosed);
        };

        match message {
            Ok(message) => Self::handle_message(session, last_heartbeat, message).await,
            Err(error) => Err(SessionError::Protocol(error)),
        }
    }

    async fn handle_message(
        session: &mut Session,
        last_heartbeat: &mut Instant,
        message: Message,
    ) -> Result<(), SessionError> {
        match message {
            Message::Ping(payload) => {
                *last_heartbeat = Instant::now();
                session
                    .pong(&payload)
                    .await
                    .map_err(SessionError::Network)?;
                Ok(())
            }
            // The feed is push-only; client frames merely refresh the idle clock.
            Message::Text(_)
            | Message::Pong(_)
            | Message::Binary(_)
            | Message::Continuation(_)
            | Message::Nop => {
                *last_heartbeat = Instant::now();
                Ok(())
            }
            Message::Close(reason) => Err(SessionError::ClientClosed(reason)),
        }
    }

    async fn send_json<T: serde::Serialize>(
        session: &mut Session,
        payload: &T,
    ) -> Result<(), Closed> {
        match serde_json::to_string(payload) {
            Ok(body) => session.text(body).await,
            Err(error) => {
                // In debug builds fail fast so schema drift is fixed; in
                // release we log and keep the connection alive.
                if cfg!(debug_assertions) {
                    panic!("feed events must serialize: {error}");
                } else {
                    warn!(error = %error, "Failed to serialize WebSocket payload");
                }
                Ok(())
            }
        }
    }

    fn log_shutdown_reason(error: &SessionError) {
        match error {
            SessionError::HeartbeatTimeout => {
                warn!("WebSocket heartbeat timeout; closing connection");
            }
            SessionError::Protocol(error) => {
                warn!(error = %error, "WebSocket protocol error");
            }
            SessionError::Network(error) => {
                warn!(error = %error, "WebSocket send failed; closing connection");
            }
            SessionError::ClientClosed(_)
            | SessionError::StreamClosed
            | SessionError::FeedClosed => {}
        }
    }

    fn close_action_for(error: &SessionError) -> CloseAction {
        match error {
            SessionError::HeartbeatTimeout => CloseAction::Close(Some(CloseReason {
                code: CloseCode::Normal,
                description: Some("heartbeat timeout".to_owned()),
            })),
            SessionError::Protocol(_) => CloseAction::Close(Some(CloseReason {
                code: CloseCode::Protocol,
                description: Some("protocol error".to_owned()),
            })),
            SessionError::FeedClosed => CloseAction::Close(Some(CloseReason {
                code: CloseCode::Away,
                description: Some("server shutting down".to_owned()),
            })),
            SessionError::ClientClosed(reason) => CloseAction::Close(reason.clone()),
            SessionError::StreamClosed | SessionError::Network(_) => CloseAction::None,
        }
    }

    async fn close_session_if_needed(session: Session, close_action: CloseAction) {
        if let CloseAction::Close(reason) = close_action {
            if let Err(error) = session.close(reason).await {
                warn!(error = %error, "Failed to close WebSocket session");
            }
        }
    }
}
