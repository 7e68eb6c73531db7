use bytes::Bytes;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use webrtc::media::Sample;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;

/// The local capture handle: up to one audio and one video track, owned by
/// the session lifecycle for the whole room view. Clones share state so a
/// stale clone held by the rendering layer still observes the release.
#[derive(Clone)]
pub struct LocalMediaSource {
    audio: Option<Arc<TrackLocalStaticSample>>,
    video: Option<Arc<TrackLocalStaticSample>>,
    released: Arc<AtomicBool>,
    audio_enabled: Arc<AtomicBool>,
    video_enabled: Arc<AtomicBool>,
}

impl LocalMediaSource {
    pub fn new(
        audio: Option<Arc<TrackLocalStaticSample>>,
        video: Option<Arc<TrackLocalStaticSample>>,
    ) -> Self {
        Self {
            audio,
            video,
            released: Arc::new(AtomicBool::new(false)),
            audio_enabled: Arc::new(AtomicBool::new(true)),
            video_enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Tracks to attach to a peer session. Empty once released.
    pub fn tracks(&self) -> Vec<Arc<TrackLocalStaticSample>> {
        if self.is_released() {
            return Vec::new();
        }
        self.audio
            .iter()
            .chain(self.video.iter())
            .cloned()
            .collect()
    }

    pub fn active_track_count(&self) -> usize {
        self.tracks().len()
    }

    /// Stops every track. Idempotent.
    pub fn stop(&self) {
        self.released.store(true, Ordering::SeqCst);
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }

    /// Mute/unmute the microphone. Purely local: the sample writers simply
    /// stop producing, no signaling involved.
    pub fn set_audio_enabled(&self, enabled: bool) {
        self.audio_enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn audio_enabled(&self) -> bool {
        self.audio_enabled.load(Ordering::SeqCst)
    }

    /// Pause/resume the camera.
    pub fn set_video_enabled(&self, enabled: bool) {
        self.video_enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn video_enabled(&self) -> bool {
        self.video_enabled.load(Ordering::SeqCst)
    }

    /// Feed one encoded audio frame into the outbound track. Dropped
    /// silently while muted or after release.
    pub async fn write_audio_sample(
        &self,
        data: Bytes,
        duration: Duration,
    ) -> Result<(), webrtc::Error> {
        if self.is_released() || !self.audio_enabled() {
            return Ok(());
        }
        let Some(track) = &self.audio else {
            return Ok(());
        };
        track
            .write_sample(&Sample {
                data,
                duration,
                ..Default::default()
            })
            .await
    }

    /// Feed one encoded video frame into the outbound track.
    pub async fn write_video_sample(
        &self,
        data: Bytes,
        duration: Duration,
    ) -> Result<(), webrtc::Error> {
        if self.is_released() || !self.video_enabled() {
            return Ok(());
        }
        let Some(track) = &self.video else {
            return Ok(());
        };
        track
            .write_sample(&Sample {
                data,
                duration,
                ..Default::default()
            })
            .await
    }
}
