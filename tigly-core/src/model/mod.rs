mod ice;
mod identity;
mod room;
mod session;
mod signaling;

pub use ice::IceServerConfig;
pub use identity::Identity;
pub use room::{NegotiationRole, RoomAssignment, RoomId, RoomStatus};
pub use session::SessionId;
pub use signaling::{ClientMessage, ServerMessage};
