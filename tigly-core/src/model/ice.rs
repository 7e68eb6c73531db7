use serde::{Deserialize, Serialize};

/// One STUN/TURN entry of the static traversal configuration. Supplied at
/// session-creation time, never negotiated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

impl IceServerConfig {
    /// Credential-less STUN entry.
    pub fn stun(urls: Vec<String>) -> Self {
        Self {
            urls,
            username: None,
            credential: None,
        }
    }
}
