use thiserror::Error;

/// Errors raised while running a background analysis session.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("failed to spawn detection worker")]
    Spawn(#[from] std::io::Error),
    #[error("detection worker panicked")]
    WorkerPanicked,
    #[error("trajectory channel closed")]
    Disconnected,
}
