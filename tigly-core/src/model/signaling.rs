use crate::model::room::{NegotiationRole, RoomId};
use serde::{Deserialize, Serialize};

/// Messages this client emits to the signaling server. Candidate payloads
/// stay opaque JSON objects; only the transport cares about their insides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data")]
pub enum ClientMessage {
    #[serde(rename = "join_room")]
    JoinRoom { name: String },
    #[serde(rename = "leave_room")]
    LeaveRoom { name: String },
    #[serde(rename = "offer")]
    Offer {
        #[serde(rename = "roomId")]
        room_id: RoomId,
        sdp: String,
    },
    #[serde(rename = "answer")]
    Answer {
        #[serde(rename = "roomId")]
        room_id: RoomId,
        sdp: String,
    },
    #[serde(rename = "ice-candidate")]
    IceCandidate {
        #[serde(rename = "roomId")]
        room_id: RoomId,
        candidate: serde_json::Value,
    },
}

/// Messages the signaling server pushes to this client. Inbound payloads
/// carry no room id; the server already scoped them to our room.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data")]
pub enum ServerMessage {
    #[serde(rename = "new-room")]
    NewRoom {
        #[serde(rename = "type")]
        kind: NegotiationRole,
        #[serde(rename = "roomId")]
        room_id: RoomId,
    },
    #[serde(rename = "offer")]
    Offer { sdp: String },
    #[serde(rename = "answer")]
    Answer { sdp: String },
    #[serde(rename = "ice-candidate")]
    IceCandidate { candidate: serde_json::Value },
}
