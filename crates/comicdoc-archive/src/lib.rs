//! Sequential archive reading for comic book containers
//!
//! This crate provides a forward-only entry scan over the archive formats
//! comic books ship in: ZIP (.cbz), RAR (.cbr), 7Z (.cb7) and TAR (.cbt,
//! including gzip and bzip2 compressed tarballs). A scan visits every file
//! entry in container order, exposing its pathname, declared size and an
//! incremental byte stream, and can stop early once the caller has what it
//! needs.
//!
//! The scan model deliberately assumes nothing beyond sequential access:
//! there is no entry index and no seeking between entries. Callers that need
//! a particular entry run a fresh scan and match by pathname. All underlying
//! handles (file, decompressor, temporary extraction directory) are scoped to
//! a single scan and released on every exit path.
//!
//! # Usage
//!
//! ## List every entry pathname
//!
//! ```no_run
//! use comicdoc_archive::{ArchiveFlavor, ArchiveReader, ScanFlow};
//! use std::path::Path;
//!
//! let mut reader = ArchiveReader::new(ArchiveFlavor::Zip);
//! let mut names = Vec::new();
//! reader.scan(Path::new("book.cbz"), |entry| {
//!     names.push(entry.pathname().to_string());
//!     Ok(ScanFlow::Continue)
//! }).unwrap();
//! ```
//!
//! ## Read one entry, stopping the scan at the match
//!
//! ```no_run
//! use comicdoc_archive::{ArchiveFlavor, ArchiveReader, ScanFlow};
//! use std::io::Read;
//! use std::path::Path;
//!
//! let mut reader = ArchiveReader::new(ArchiveFlavor::Zip);
//! let mut data = Vec::new();
//! reader.scan(Path::new("book.cbz"), |entry| {
//!     if entry.pathname() != "page001.png" {
//!         return Ok(ScanFlow::Continue);
//!     }
//!     entry.read_to_end(&mut data)?;
//!     Ok(ScanFlow::Stop)
//! }).unwrap();
//! ```

pub mod error;
pub mod flavor;
pub mod rar;
pub mod reader;
pub mod sevenz;
pub mod tar;
pub mod zip;

pub use error::ArchiveError;
pub use flavor::ArchiveFlavor;
pub use reader::{ArchiveReader, ScanEntry, ScanFlow};
