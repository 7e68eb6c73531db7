use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use tigly_client::{LocalMediaSource, MediaAcquirer, MediaError, SessionHandle};
use tokio::task::JoinHandle;

/// Acquirer that always fails, like a browser denying getUserMedia.
#[derive(Debug, Default)]
pub struct FailingAcquirer;

#[async_trait]
impl MediaAcquirer for FailingAcquirer {
    async fn acquire(&self) -> Result<LocalMediaSource, MediaError> {
        Err(MediaError::PermissionDenied(
            "user rejected the capture prompt".to_owned(),
        ))
    }
}

/// Continuously feeds dummy frames into a session's local tracks so the
/// remote side actually receives RTP and fires its track callbacks. Stops
/// on its own once the source is released.
pub fn spawn_sample_pump(handle: &SessionHandle) -> JoinHandle<()> {
    let handle = handle.clone();
    tokio::spawn(async move {
        // The pump may start before acquisition finishes, so poll the
        // handle for the source instead of grabbing it up front.
        let source = loop {
            if let Some(source) = handle.local_media() {
                break source;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        };

        let frame = Bytes::from_static(&[0x10u8; 160]);
        while !source.is_released() {
            let _ = source
                .write_audio_sample(frame.clone(), Duration::from_millis(20))
                .await;
            let _ = source
                .write_video_sample(frame.clone(), Duration::from_millis(33))
                .await;
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
}
