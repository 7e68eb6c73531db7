use tigly_core::IceServerConfig;

/// Static connectivity configuration for every peer session this client
/// creates. Treated as opaque; never negotiated with the peer.
#[derive(Debug, Clone)]
pub struct CallConfig {
    pub ice_servers: Vec<IceServerConfig>,
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            ice_servers: vec![IceServerConfig::stun(vec![
                "stun:stun.l.google.com:19302".to_owned(),
                "stun:stun1.l.google.com:19302".to_owned(),
            ])],
        }
    }
}

impl CallConfig {
    /// No traversal helpers at all; loopback-only negotiation in tests.
    pub fn without_ice_servers() -> Self {
        Self {
            ice_servers: Vec::new(),
        }
    }
}
