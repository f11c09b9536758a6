//! Error types for comic document loading
//!
//! Every load-time failure carries a specific kind so a host can render an
//! actionable message ("wrong file" vs "missing optional support" vs
//! "corrupt download"). Per-page failures during probing or rendering are
//! not errors: one bad page never fails the whole document, it just yields
//! no dimensions or no image for that page.

use comicdoc_archive::ArchiveFlavor;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a comic book document
#[derive(Error, Debug)]
pub enum ComicError {
    /// The source locator cannot be mapped to a local file path
    #[error("Cannot get local path for archive '{0}'")]
    NoLocalPath(String),

    /// The content type matches none of the comic book archive families
    #[error("Not a comic book content type: {0}")]
    UnsupportedType(String),

    /// The family is recognized but this host lacks codec support for it
    #[error("No decompression support for {0} comic book archives on this host")]
    UnsupportedCompression(ArchiveFlavor),

    /// The archive could not be opened or its listing failed structurally
    #[error("File corrupted or unreadable: {0}")]
    CorruptArchive(String),

    /// The archive was readable but contained no recognized image pages
    #[error("No images found in archive {}", .0.display())]
    NoImagesFound(PathBuf),
}

/// Result type alias for comic document operations
pub type Result<T> = std::result::Result<T, ComicError>;
