mod handle;
mod manager;
mod runtime;

pub use handle::SessionHandle;
pub use manager::{SessionError, SessionManager};
pub use runtime::SessionRuntime;
