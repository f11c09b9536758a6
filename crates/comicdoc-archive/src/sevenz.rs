//! 7Z archive scanning
//!
//! Walks 7Z entries in container order via sevenz-rust's entry callback.
//! Supports the compression methods the library build enables (LZMA, LZMA2,
//! BZIP2, ZSTD, Copy).

use crate::error::ArchiveError;
use crate::reader::{ScanEntry, ScanFlow, ScanVisitor};
use sevenz_rust::{Password, SevenZReader};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Map a sevenz-rust error, distinguishing the password case
///
/// The library reports encryption through its error message, so the mapping
/// inspects it the same way the extraction path does.
fn map_sevenz_error(err: &sevenz_rust::Error) -> ArchiveError {
    let err_str = err.to_string();
    if err_str.contains("password") || err_str.contains("encrypted") {
        ArchiveError::PasswordProtected
    } else {
        ArchiveError::Corrupted(format!("7Z error: {err}"))
    }
}

pub(crate) fn scan(path: &Path, visit: &mut ScanVisitor<'_>) -> Result<(), ArchiveError> {
    let file = File::open(path)?;
    let len = file.metadata()?.len();
    let reader = BufReader::new(file);

    // Empty password: opening errors out if one is actually required
    let mut sz = SevenZReader::new(reader, len, Password::empty())
        .map_err(|e| map_sevenz_error(&e))?;

    // Visitor outcomes cross the callback boundary through this slot, since
    // the callback can only return the library's own error type
    let mut pending: Option<ArchiveError> = None;

    sz.for_each_entries(|entry, reader| {
        // Skip directories
        if entry.is_directory() {
            return Ok(true);
        }

        let name = entry.name().to_string();
        let size = entry.size();

        let mut scan_entry = ScanEntry::new(&name, size, reader);
        match visit(&mut scan_entry) {
            Ok(ScanFlow::Continue) => Ok(true),
            Ok(ScanFlow::Stop) => Ok(false),
            Err(err) => {
                pending = Some(err);
                Ok(false)
            }
        }
    })
    .map_err(|e| map_sevenz_error(&e))?;

    match pending {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
