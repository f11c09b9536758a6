//! Error types for archive scanning

use thiserror::Error;

/// Errors that can occur while scanning an archive
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// IO error during archive operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid ZIP archive format
    #[error("Invalid ZIP archive: {0}")]
    InvalidZip(#[from] zip::result::ZipError),

    /// Archive is password-protected
    #[error("Archive is password-protected")]
    PasswordProtected,

    /// An external helper tool this format depends on is not installed
    #[error("'{0}' command not found, archives of this format cannot be read")]
    ToolMissing(&'static str),

    /// Archive could not be parsed as its expected format
    #[error("Corrupted archive: {0}")]
    Corrupted(String),

    /// Generic error for other cases
    #[error("Archive error: {0}")]
    Other(String),
}
