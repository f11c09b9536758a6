//! TAR archive scanning
//!
//! Walks TAR entries in container order. Compression is detected from magic
//! bytes, so .tar, .tar.gz/.tgz and .tar.bz2/.tbz2 all scan the same way.

use crate::error::ArchiveError;
use crate::reader::{ScanEntry, ScanFlow, ScanVisitor};
use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use tar::Archive;

/// Gzip magic bytes (RFC 1952)
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Bzip2 magic bytes, 'B' 'Z'
const BZIP2_MAGIC: [u8; 2] = [0x42, 0x5a];

/// Compression wrapped around a TAR stream
///
/// Defaults to `None` (uncompressed TAR).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum TarCompression {
    /// Uncompressed TAR
    #[default]
    None,
    /// Gzip compressed (.tar.gz, .tgz)
    Gzip,
    /// Bzip2 compressed (.tar.bz2, .tbz2)
    Bzip2,
}

impl TarCompression {
    /// Detect compression from file magic bytes
    #[inline]
    #[must_use = "returns the detected compression type"]
    pub fn from_magic_bytes(bytes: &[u8]) -> Self {
        if bytes.len() < 2 {
            return Self::None;
        }

        if bytes[0] == GZIP_MAGIC[0] && bytes[1] == GZIP_MAGIC[1] {
            return Self::Gzip;
        }

        if bytes[0] == BZIP2_MAGIC[0] && bytes[1] == BZIP2_MAGIC[1] {
            return Self::Bzip2;
        }

        Self::None
    }
}

pub(crate) fn scan(path: &Path, visit: &mut ScanVisitor<'_>) -> Result<(), ArchiveError> {
    let mut file = File::open(path)?;

    // Sniff compression, then rewind so the decoder sees the whole stream
    let mut magic = [0u8; 2];
    let sniffed = file.read(&mut magic)?;
    file.seek(SeekFrom::Start(0))?;

    let reader: Box<dyn Read> = match TarCompression::from_magic_bytes(&magic[..sniffed]) {
        TarCompression::None => Box::new(BufReader::new(file)),
        TarCompression::Gzip => Box::new(GzDecoder::new(BufReader::new(file))),
        TarCompression::Bzip2 => Box::new(BzDecoder::new(BufReader::new(file))),
    };

    let mut archive = Archive::new(reader);
    for entry in archive.entries()? {
        let mut tar_entry = entry?;

        // Skip directories, links and other non-file entries
        if !tar_entry.header().entry_type().is_file() {
            continue;
        }

        let name = tar_entry.path()?.to_string_lossy().into_owned();
        let size = tar_entry.size();

        let mut entry = ScanEntry::new(&name, size, &mut tar_entry);
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
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper: build an uncompressed TAR with the given (name, contents) entries
    fn tar_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());
        for (name, contents) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(contents.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, name, *contents)
                .expect("append tar entry");
        }
        builder.into_inner().expect("finish tar")
    }

    fn write_temp(bytes: &[u8]) -> NamedTempFile {
        let temp_file = NamedTempFile::new().expect("create temp file");
        std::fs::write(temp_file.path(), bytes).expect("write temp file");
        temp_file
    }

    #[test]
    fn test_magic_byte_detection() {
        assert_eq!(
            TarCompression::from_magic_bytes(&[0x1f, 0x8b, 0x08]),
            TarCompression::Gzip
        );
        assert_eq!(
            TarCompression::from_magic_bytes(b"BZh9"),
            TarCompression::Bzip2
        );
        assert_eq!(
            TarCompression::from_magic_bytes(b"ustar"),
            TarCompression::None
        );
        assert_eq!(TarCompression::from_magic_bytes(&[]), TarCompression::None);
    }

    #[test]
    fn test_scan_plain_tar() {
        let temp_tar = write_temp(&tar_bytes(&[("x.png", b"one"), ("y.png", b"twotwo")]));

        let mut seen = Vec::new();
        scan(temp_tar.path(), &mut |entry| {
            seen.push((entry.pathname().to_string(), entry.size()));
            Ok(ScanFlow::Continue)
        })
        .expect("scan tar");

        assert_eq!(
            seen,
            vec![("x.png".to_string(), 3), ("y.png".to_string(), 6)]
        );
    }

    #[test]
    fn test_scan_gzip_tar() {
        let plain = tar_bytes(&[("page.png", b"payload")]);
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&plain).expect("gzip tar");
        let temp_tgz = write_temp(&encoder.finish().expect("finish gzip"));

        let mut data = Vec::new();
        scan(temp_tgz.path(), &mut |entry| {
            assert_eq!(entry.pathname(), "page.png");
            entry.read_to_end(&mut data)?;
            Ok(ScanFlow::Stop)
        })
        .expect("scan tar.gz");

        assert_eq!(data, b"payload");
    }

    #[test]
    fn test_scan_stops_early() {
        let temp_tar = write_temp(&tar_bytes(&[("1.png", b"a"), ("2.png", b"b")]));

        let mut visited = 0;
        scan(temp_tar.path(), &mut |_| {
            visited += 1;
            Ok(ScanFlow::Stop)
        })
        .expect("scan tar");

        assert_eq!(visited, 1);
    }

    #[test]
    fn test_scan_garbage_fails() {
        let temp_file = write_temp(b"definitely not a tarball, far too short anyway");
        let result = scan(temp_file.path(), &mut |_| Ok(ScanFlow::Continue));
        assert!(result.is_err());
    }
}
