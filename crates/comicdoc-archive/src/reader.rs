//! The format-bound sequential scan
//!
//! `ArchiveReader` is a forward-only cursor factory: each call to
//! [`ArchiveReader::scan`] opens the archive fresh, walks its entries in
//! order and hands each one to a visitor closure. Entries are transient:
//! their pathname, size and byte stream are only valid inside the closure
//! invocation, never stored. The visitor controls the walk through
//! [`ScanFlow`], so a caller looking for one entry stops as soon as it has
//! found it.
//!
//! The reader owns no open handles between scans. Whatever a backend needs
//! while scanning (file handle, decompressor state, temporary extraction
//! directory for RAR) lives on the scan's stack and is dropped on every exit
//! path, including errors and early stops.

use crate::error::ArchiveError;
use crate::flavor::ArchiveFlavor;
use crate::{rar, sevenz, tar, zip};
use std::io::Read;
use std::path::Path;

/// Visitor verdict after seeing one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanFlow {
    /// Keep walking the remaining entries
    Continue,
    /// End the scan successfully without visiting further entries
    Stop,
}

/// One file entry, valid only while the scan is positioned at it
///
/// Reading from a `ScanEntry` pulls decompressed entry bytes incrementally;
/// entries that are never read are never decompressed (where the underlying
/// format allows it).
pub struct ScanEntry<'a> {
    pathname: &'a str,
    size: u64,
    data: &'a mut dyn Read,
}

impl<'a> ScanEntry<'a> {
    pub(crate) fn new(pathname: &'a str, size: u64, data: &'a mut dyn Read) -> Self {
        Self {
            pathname,
            size,
            data,
        }
    }

    /// Entry pathname as recorded in the archive
    #[inline]
    #[must_use = "returns the entry pathname"]
    pub fn pathname(&self) -> &str {
        self.pathname
    }

    /// Declared uncompressed size in bytes
    #[inline]
    #[must_use = "returns the declared entry size"]
    pub fn size(&self) -> u64 {
        self.size
    }
}

impl Read for ScanEntry<'_> {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.data.read(buf)
    }
}

/// The visitor invoked once per file entry during a scan
pub type ScanVisitor<'v> = dyn FnMut(&mut ScanEntry<'_>) -> Result<ScanFlow, ArchiveError> + 'v;

/// A sequential entry reader bound to one container family
///
/// Constructed once per document from the selected [`ArchiveFlavor`]; every
/// operation that needs archive data runs its own [`scan`](Self::scan).
/// `scan` takes `&mut self` so exclusive ownership of the reader guarantees
/// a single scan in flight at a time.
#[derive(Debug)]
pub struct ArchiveReader {
    flavor: ArchiveFlavor,
}

impl ArchiveReader {
    /// Create a reader for the given container family
    #[inline]
    #[must_use = "creates a new archive reader"]
    pub const fn new(flavor: ArchiveFlavor) -> Self {
        Self { flavor }
    }

    /// The container family this reader is bound to
    #[inline]
    #[must_use = "returns the bound flavor"]
    pub const fn flavor(&self) -> ArchiveFlavor {
        self.flavor
    }

    /// Walk the archive's file entries in order, visiting each one
    ///
    /// Directory entries are skipped. The walk ends when the visitor returns
    /// [`ScanFlow::Stop`], when the entries are exhausted, or when an error
    /// surfaces, whichever comes first. Errors from the visitor propagate
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError` if the archive cannot be opened, an entry
    /// header cannot be read, or the visitor fails.
    pub fn scan<F>(&mut self, path: &Path, mut visit: F) -> Result<(), ArchiveError>
    where
        F: FnMut(&mut ScanEntry<'_>) -> Result<ScanFlow, ArchiveError>,
    {
        match self.flavor {
            ArchiveFlavor::Zip => zip::scan(path, &mut visit),
            ArchiveFlavor::Rar => rar::scan(path, &mut visit),
            ArchiveFlavor::SevenZ => sevenz::scan(path, &mut visit),
            ArchiveFlavor::Tar => tar::scan(path, &mut visit),
        }
    }
}
