//! ZIP archive scanning
//!
//! Walks the central directory in entry order. Entry data is decompressed
//! lazily, so a scan that only looks at pathnames never inflates anything.

use crate::error::ArchiveError;
use crate::reader::{ScanEntry, ScanFlow, ScanVisitor};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use zip::ZipArchive;

pub(crate) fn scan(path: &Path, visit: &mut ScanVisitor<'_>) -> Result<(), ArchiveError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut archive = ZipArchive::new(reader)?;

    for i in 0..archive.len() {
        let mut zip_file = archive.by_index(i)?;

        // Skip directories
        if zip_file.is_dir() {
            continue;
        }

        // An encrypted entry poisons the whole listing: without the password
        // there is no way to produce page data later
        if zip_file.encrypted() {
            return Err(ArchiveError::PasswordProtected);
        }

        let name = zip_file.name().to_string();
        let size = zip_file.size();

        let mut entry = ScanEntry::new(&name, size, &mut zip_file);
        match visit(&mut entry)? {
            ScanFlow::Continue => {}
            ScanFlow::Stop => return Ok(()),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use tempfile::NamedTempFile;
    use zip::write::{FileOptions, ZipWriter};

    /// Helper: create a ZIP file with the given (name, contents) entries
    fn create_test_zip(entries: &[(&str, &[u8])]) -> NamedTempFile {
        let temp_file = NamedTempFile::new().expect("create temp file");
        let mut writer = ZipWriter::new(temp_file.reopen().expect("reopen temp file"));
        let options: FileOptions<()> = FileOptions::default();

        for (name, contents) in entries {
            writer.start_file(*name, options).expect("start entry");
            writer.write_all(contents).expect("write entry");
        }
        writer.finish().expect("finish zip");

        temp_file
    }

    #[test]
    fn test_scan_visits_entries_in_archive_order() {
        let temp_zip = create_test_zip(&[
            ("b.png", b"bbb"),
            ("a.png", b"aaa"),
            ("nested/c.png", b"ccc"),
        ]);

        let mut names = Vec::new();
        scan(temp_zip.path(), &mut |entry| {
            names.push(entry.pathname().to_string());
            Ok(ScanFlow::Continue)
        })
        .expect("scan zip");

        assert_eq!(names, vec!["b.png", "a.png", "nested/c.png"]);
    }

    #[test]
    fn test_scan_reports_declared_sizes() {
        let temp_zip = create_test_zip(&[("page.png", b"0123456789")]);

        scan(temp_zip.path(), &mut |entry| {
            assert_eq!(entry.size(), 10);
            Ok(ScanFlow::Continue)
        })
        .expect("scan zip");
    }

    #[test]
    fn test_scan_stop_ends_walk_early() {
        let temp_zip = create_test_zip(&[("1.png", b"x"), ("2.png", b"y"), ("3.png", b"z")]);

        let mut visited = 0;
        scan(temp_zip.path(), &mut |entry| {
            visited += 1;
            if entry.pathname() == "2.png" {
                Ok(ScanFlow::Stop)
            } else {
                Ok(ScanFlow::Continue)
            }
        })
        .expect("scan zip");

        assert_eq!(visited, 2, "entries after the Stop should not be visited");
    }

    #[test]
    fn test_scan_entry_data_matches_written_bytes() {
        let temp_zip = create_test_zip(&[("only.png", b"entry payload")]);

        let mut data = Vec::new();
        scan(temp_zip.path(), &mut |entry| {
            entry.read_to_end(&mut data)?;
            Ok(ScanFlow::Stop)
        })
        .expect("scan zip");

        assert_eq!(data, b"entry payload");
    }

    #[test]
    fn test_scan_invalid_zip_fails() {
        let temp_file = NamedTempFile::new().expect("create temp file");
        std::fs::write(temp_file.path(), b"not a zip file").expect("write garbage");

        let result = scan(temp_file.path(), &mut |_| Ok(ScanFlow::Continue));
        assert!(result.is_err(), "garbage input should not scan");
    }

    #[test]
    fn test_scan_nonexistent_file_fails() {
        let result = scan(Path::new("nonexistent.zip"), &mut |_| Ok(ScanFlow::Continue));
        assert!(matches!(result, Err(ArchiveError::Io(_))));
    }
}
