use crate::error::MediaError;
use crate::media::{LocalMediaSource, MediaAcquirer};
use async_trait::async_trait;
use std::sync::Arc;
use webrtc::api::media_engine::{MIME_TYPE_OPUS, MIME_TYPE_VP8};
use webrtc::rtp_transceiver::rtp_codec::RTCRtpCodecCapability;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;

/// Headless capture source: one Opus audio track and one VP8 video track
/// fed by whoever drives the sample writers. Stands in for browser
/// getUserMedia on native targets.
#[derive(Debug, Default)]
pub struct SyntheticAcquirer;

impl SyntheticAcquirer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MediaAcquirer for SyntheticAcquirer {
    async fn acquire(&self) -> Result<LocalMediaSource, MediaError> {
        let audio = Arc::new(TrackLocalStaticSample::new(
            RTCRtpCodecCapability {
                mime_type: MIME_TYPE_OPUS.to_owned(),
                clock_rate: 48_000,
                channels: 2,
                ..Default::default()
            },
            "audio".to_owned(),
            "tigly-local".to_owned(),
        ));
        let video = Arc::new(TrackLocalStaticSample::new(
            RTCRtpCodecCapability {
                mime_type: MIME_TYPE_VP8.to_owned(),
                clock_rate: 90_000,
                ..Default::default()
            },
            "video".to_owned(),
            "tigly-local".to_owned(),
        ));

        Ok(LocalMediaSource::new(Some(audio), Some(video)))
    }
}
