use crate::error::MediaError;
use crate::media::LocalMediaSource;
use async_trait::async_trait;

/// Obtains the local audio/video source. Implementations own the side
/// effect of activating the physical capture hardware; the session
/// lifecycle owns the returned source.
#[async_trait]
pub trait MediaAcquirer: Send + Sync {
    /// Combined audio+video capture, no device selection.
    async fn acquire(&self) -> Result<LocalMediaSource, MediaError>;
}
