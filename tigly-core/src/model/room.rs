use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque room identifier minted by the matching server.
#[derive(Debug, Serialize, Deserialize, Clone, Hash, Eq, PartialEq)]
pub struct RoomId(pub String);

impl RoomId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for RoomId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which side of the offer/answer exchange this client plays. The matching
/// server announces the role together with the room id.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq)]
pub enum NegotiationRole {
    #[serde(rename = "send-offer")]
    Offerer,
    #[serde(rename = "receive-offer")]
    Answerer,
}

/// A match: room plus the role this client negotiates with. Immutable once
/// received; a later match fully supersedes the previous assignment.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RoomAssignment {
    pub room_id: RoomId,
    pub role: NegotiationRole,
}

/// Whether we are still in the queue or already paired with a peer.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RoomStatus {
    Searching,
    Matched,
}
