use crate::viewer::LoadState;
use thiserror::Error;

/// Why fetching the venue map failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("venue map request failed with status {status} {status_text}")]
    Status { status: u16, status_text: String },

    #[error("venue map request failed: {0}")]
    Network(String),
}

/// The host could not build the venue map into its container.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to mount venue map: {0}")]
pub struct MountError(pub String);

/// Misuse of the viewer lifecycle. Load failures are not errors at this
/// level: they are rendered as the fallback message and logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewerError {
    #[error("viewer for container `{0}` is inert: the container was not found")]
    Inert(String),

    #[error("venue map already loaded (state: {0:?})")]
    AlreadyLoaded(LoadState),

    #[error("viewer has been torn down")]
    TornDown,

    #[error("no load in progress (state: {0:?})")]
    NotLoading(LoadState),
}
