mod acquirer;
mod remote;
mod source;
mod synthetic;

pub use acquirer::MediaAcquirer;
pub use remote::RemoteMediaOutput;
pub use source::LocalMediaSource;
pub use synthetic::SyntheticAcquirer;
