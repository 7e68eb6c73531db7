pub use tigly_core::{Identity, RoomId};

pub mod model {
    pub use tigly_core::model::*;
}

#[cfg(feature = "client")]
pub mod client {
    pub use tigly_client::*;
}
