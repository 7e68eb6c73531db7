mod candidate_buffer;
mod peer_event;
mod peer_link;

pub use candidate_buffer::CandidateBuffer;
pub use peer_event::PeerEvent;
pub use peer_link::PeerLink;
