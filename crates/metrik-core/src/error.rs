//! Shared error type across metrik crates.

use thiserror::Error;

/// Stable error codes surfaced at the API boundary (logs, callers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Repository backend failed.
    Storage,
    /// Snapshot persistence failed; the in-memory mutation still applied.
    Backup,
    /// Invalid configuration.
    Config,
    /// Unsupported config schema version.
    UnsupportedVersion,
}

impl ErrorCode {
    /// String representation used in logs and structured responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Storage => "STORAGE",
            ErrorCode::Backup => "BACKUP",
            ErrorCode::Config => "CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetrikError>;

/// Unified error type used by core and server.
///
/// `NotFound` is deliberately absent: a missing metric is reported as
/// `Ok(None)` by repository/service lookups, never as a failure.
#[derive(Debug, Error)]
pub enum MetrikError {
    #[error("storage: {0}")]
    Storage(String),
    #[error("backup: {0}")]
    Backup(String),
    #[error("config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
}

impl MetrikError {
    /// Map internal error to a stable code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            MetrikError::Storage(_) => ErrorCode::Storage,
            MetrikError::Backup(_) => ErrorCode::Backup,
            MetrikError::Config(_) => ErrorCode::Config,
            MetrikError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
        }
    }
}
