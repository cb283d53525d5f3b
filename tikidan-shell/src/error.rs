//! Shell error types

use crate::session::SessionStoreError;
use thiserror::Error;
use tikidan_client::ClientError;

/// Error type for shell operations
#[derive(Debug, Error)]
pub enum ShellError {
    /// The backend rejected the credentials; message is shown inline on the
    /// login view, session state is unchanged
    #[error("login failed: {0}")]
    LoginRejected(String),

    /// The backend rejected our token mid-session; the session has been
    /// cleared and the caller should land on the login view
    #[error("session is no longer valid")]
    SessionInvalid,

    /// Transport or protocol failure
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Persisted session store failure
    #[error(transparent)]
    Store(#[from] SessionStoreError),
}
