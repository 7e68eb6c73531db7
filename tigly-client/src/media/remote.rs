use std::sync::Arc;
use webrtc::rtp_transceiver::rtp_codec::RTPCodecType;
use webrtc::track::track_remote::TrackRemote;

/// Composite of everything the peer sends us. Remote tracks arrive as
/// independent events (audio and video almost always separately), so they
/// are accumulated here; a later track never replaces an earlier one.
#[derive(Clone, Default)]
pub struct RemoteMediaOutput {
    tracks: Vec<Arc<TrackRemote>>,
}

impl RemoteMediaOutput {
    pub fn add_track(&mut self, track: Arc<TrackRemote>) {
        if self.tracks.iter().any(|t| t.id() == track.id()) {
            return;
        }
        self.tracks.push(track);
    }

    pub fn tracks(&self) -> &[Arc<TrackRemote>] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn has_kind(&self, kind: RTPCodecType) -> bool {
        self.tracks.iter().any(|t| t.kind() == kind)
    }
}
