use crate::store::StoreError;

/// Errors produced by the message-handling core.
///
/// All of these are contained at the per-message boundary; none are fatal to
/// the process.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The configuration store could not be reached.  The message that
    /// triggered the lookup is treated as non-actionable; no retry happens
    /// here.
    #[error("configuration store unavailable: {0}")]
    PersistenceUnavailable(#[source] StoreError),

    /// The message carried the command prefix but named no registered
    /// command.  Display text doubles as the user-facing notice.
    #[error("unknown command `{0}`")]
    CommandNotFound(String),

    /// A command handler returned an error.  Caught at the dispatch
    /// boundary, logged, and answered with a best-effort notice.
    #[error("command `{name}` failed: {cause}")]
    CommandExecutionFailed { name: String, cause: anyhow::Error },

    /// The author is blacklisted.  Deliberately silent: no reply reveals
    /// blacklist membership.
    #[error("author is blacklisted")]
    AccessDenied,
}
