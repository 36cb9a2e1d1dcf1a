//! Dashboard error types.

use paydesk_client::ClientError;
use paydesk_store::StoreError;

/// Errors that end a dashboard command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Platform request failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Local data directory failed.
    #[error("data directory error: {0}")]
    Store(#[from] StoreError),

    /// Command needs a token and none is configured.
    #[error("no merchant token configured; set PAYDESK_TOKEN or pass --token")]
    MissingToken,

    /// Terminal or signal handling failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Client(ClientError::Unauthorized { .. }) | Self::MissingToken => 3,
            Self::Client(_) => 2,
            Self::Store(_) | Self::Io(_) => 1,
        }
    }
}
