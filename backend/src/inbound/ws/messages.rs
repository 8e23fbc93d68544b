//! Wire-level message definitions for the WebSocket adapter.
//!
//! Domain events are transformed into these payloads before being
//! serialised to JSON and pushed to connected admin dashboards.

use serde::{Deserialize, Serialize};

use crate::domain::SignupEvent;

/// Outbound frame pushed to connected observers.
///
/// Serialises as `{"event":"newUserSignedUp","data":{…}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerMessage {
    /// A user completed registration.
    NewUserSignedUp(SignupEvent),
}

impl From<SignupEvent> for ServerMessage {
    fn from(event: SignupEvent) -> Self {
        Self::NewUserSignedUp(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn frame_is_tagged_with_the_event_name() {
        let message = ServerMessage::from(SignupEvent {
            uid: "ATS260829X4QZ".into(),
            name: "Asha Rao".into(),
            email: "asha@example.com".into(),
            phone: "9876500000".into(),
            state: "Kerala".into(),
            created_at: Utc::now(),
        });
        let value = serde_json::to_value(&message).expect("frame serialises");
        assert_eq!(value["event"], "newUserSignedUp");
        assert_eq!(value["data"]["uid"], "ATS260829X4QZ");
        assert!(value["data"].get("passwordHash").is_none());
    }
}
