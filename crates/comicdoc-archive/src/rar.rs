//! RAR archive scanning
//!
//! RAR4 and RAR5 support goes through the `unar` command-line tool, which
//! handles both formats (including multi-volume archives) without license
//! restrictions. A scan extracts the archive into a temporary directory and
//! then walks the extracted tree, serving each file as an entry. The
//! temporary directory is removed when the scan returns, on every path.
//!
//! Entry order is the sorted order of the extracted tree rather than archive
//! order; callers matching entries by pathname are unaffected.

use crate::error::ArchiveError;
use crate::reader::{ScanEntry, ScanFlow, ScanVisitor};
use std::fs::{self, File};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

pub(crate) fn scan(path: &Path, visit: &mut ScanVisitor<'_>) -> Result<(), ArchiveError> {
    if !path.exists() {
        return Err(ArchiveError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "RAR file not found",
        )));
    }

    let temp_dir = TempDir::new().map_err(ArchiveError::Io)?;

    let output = Command::new("unar")
        .arg("-o")
        .arg(temp_dir.path())
        .arg("-D") // Don't create a containing subdirectory
        .arg("-f") // Force overwrite
        .arg(path)
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ArchiveError::ToolMissing("unar")
            } else {
                ArchiveError::Io(e)
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.contains("password") || stderr.contains("encrypted") {
            return Err(ArchiveError::PasswordProtected);
        }
        return Err(ArchiveError::Corrupted(format!(
            "unar extraction failed: {stderr}"
        )));
    }

    walk_extracted(temp_dir.path(), temp_dir.path(), visit)?;
    Ok(())
}

/// Walk the extracted tree in sorted order, visiting each regular file
fn walk_extracted(
    dir: &Path,
    base_path: &Path,
    visit: &mut ScanVisitor<'_>,
) -> Result<ScanFlow, ArchiveError> {
    let mut dirents: Vec<_> = fs::read_dir(dir)
        .map_err(ArchiveError::Io)?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(ArchiveError::Io)?;
    dirents.sort_by_key(std::fs::DirEntry::file_name);

    for dirent in dirents {
        let path = dirent.path();
        let metadata = dirent.metadata().map_err(ArchiveError::Io)?;

        if metadata.is_dir() {
            if walk_extracted(&path, base_path, visit)? == ScanFlow::Stop {
                return Ok(ScanFlow::Stop);
            }
        } else if metadata.is_file() {
            let relative = path.strip_prefix(base_path).unwrap_or(&path);
            let name = relative.to_string_lossy().into_owned();

            let mut file = File::open(&path).map_err(ArchiveError::Io)?;
            let mut entry = ScanEntry::new(&name, metadata.len(), &mut file);
            if visit(&mut entry)? == ScanFlow::Stop {
                return Ok(ScanFlow::Stop);
            }
        }
    }

    Ok(ScanFlow::Continue)
}
