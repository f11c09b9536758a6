//! The comic book document
//!
//! A [`ComicDocument`] is loaded once from an archive and then answers page
//! queries for its whole lifetime: how many pages, how big is page N, render
//! page N. The page list is built by a single sequential pass over the
//! archive, filtered to entries the installed image decoders can read, and
//! sorted naturally; after a successful load it never changes, so page
//! indices are stable identifiers.
//!
//! The underlying container has no entry index, so every per-page operation
//! re-scans the archive from the start and matches the wanted entry by
//! pathname. Probe and render both follow that shape: fresh scan, linear
//! match, read, implicit close. Archives with repeated pathnames are not
//! deduplicated; every catalog slot for a repeated name resolves to its
//! first occurrence in scan order, since the linear match stops at the first
//! hit.

use crate::decode::{apply_rotation, decode_page, probe_dimensions, PageDimensions, Rotation};
use crate::error::{ComicError, Result};
use crate::extensions::supported_extensions;
use crate::sort::natural_cmp;
use comicdoc_archive::{ArchiveError, ArchiveFlavor, ArchiveReader, ScanFlow};
use image::DynamicImage;
use log::{debug, warn};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Parameters for rendering one page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderContext {
    /// Which page to render (0-based catalog index)
    pub page_index: usize,
    /// Rotation applied after decoding
    pub rotation: Rotation,
    /// Optional decode scale factor, e.g. 0.25 for a quarter-size thumbnail
    pub scale: Option<f32>,
}

impl RenderContext {
    /// Render context for a page at natural size with no rotation
    #[inline]
    #[must_use = "creates a new render context"]
    pub const fn new(page_index: usize) -> Self {
        Self {
            page_index,
            rotation: Rotation::None,
            scale: None,
        }
    }

    /// Set the rotation
    #[inline]
    #[must_use = "returns the context with rotation configured"]
    pub const fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the decode scale factor
    #[inline]
    #[must_use = "returns the context with scale configured"]
    pub const fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }
}

/// A loaded comic book archive with a stable, ordered page catalog
pub struct ComicDocument {
    reader: ArchiveReader,
    archive_path: PathBuf,
    source: String,
    page_names: Vec<String>,
}

impl ComicDocument {
    /// Load a comic book archive
    ///
    /// `source` is a local path or a `file://` URI; `content_type` selects
    /// the container family. On success the page catalog is built, sorted
    /// and frozen.
    ///
    /// # Errors
    ///
    /// - [`ComicError::NoLocalPath`] if `source` does not map to a local file
    /// - [`ComicError::UnsupportedType`] if `content_type` is not a comic
    ///   book archive type
    /// - [`ComicError::UnsupportedCompression`] if the family is recognized
    ///   but this host cannot decode it
    /// - [`ComicError::CorruptArchive`] if the archive cannot be opened or
    ///   its listing fails before producing anything
    /// - [`ComicError::NoImagesFound`] if no entry has a decodable image
    ///   extension
    pub fn load(source: &str, content_type: &str) -> Result<Self> {
        let archive_path = resolve_local_path(source)?;

        let flavor = ArchiveFlavor::from_content_type(content_type)
            .ok_or_else(|| ComicError::UnsupportedType(content_type.to_string()))?;
        if !flavor.codec_available() {
            return Err(ComicError::UnsupportedCompression(flavor));
        }

        let mut reader = ArchiveReader::new(flavor);
        let listed = list_pathnames(&mut reader, &archive_path)?;

        let extensions = supported_extensions();
        let mut page_names: Vec<String> = listed
            .into_iter()
            .filter(|name| page_extension(name).is_some_and(|ext| extensions.contains(&ext)))
            .map(|name| name.trim().to_string())
            .collect();

        if page_names.is_empty() {
            return Err(ComicError::NoImagesFound(archive_path));
        }

        page_names.sort_by(|a, b| natural_cmp(a, b));

        Ok(Self {
            reader,
            archive_path,
            source: source.to_string(),
            page_names,
        })
    }

    /// Load a comic book archive from a path, guessing its content type
    ///
    /// Convenience wrapper over [`load`](Self::load) for hosts that have no
    /// content type at hand: the comic extensions (.cbz/.cbr/.cb7/.cbt) map
    /// straight to their vendor types, anything else goes through extension
    /// based MIME guessing.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content_type = guess_content_type(path);
        Self::load(&path.to_string_lossy(), &content_type)
    }

    /// Number of pages in the catalog (always at least one after load)
    #[inline]
    #[must_use = "returns the page count"]
    pub fn page_count(&self) -> usize {
        self.page_names.len()
    }

    /// The archive pathname backing a page index
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range; page indices come from this
    /// document's own catalog, so an out-of-range index is a caller bug.
    #[must_use = "returns the page's archive pathname"]
    pub fn page_name(&self, index: usize) -> &str {
        self.assert_page_index(index);
        &self.page_names[index]
    }

    /// Catalog pathnames in page order
    pub fn page_names(&self) -> impl Iterator<Item = &str> {
        self.page_names.iter().map(String::as_str)
    }

    /// The container family this document was loaded as
    #[inline]
    #[must_use = "returns the archive flavor"]
    pub fn flavor(&self) -> ArchiveFlavor {
        self.reader.flavor()
    }

    /// The resolved local archive path
    #[inline]
    #[must_use = "returns the local archive path"]
    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    /// The source locator the document was loaded from
    #[inline]
    #[must_use = "returns the original source locator"]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Probe a page's natural dimensions without decoding its pixels
    ///
    /// Re-scans the archive for the page's entry and feeds it to the decoder
    /// in bounded chunks, stopping as soon as width and height are known.
    /// Returns `None` when the entry is missing, unreadable or not a
    /// decodable image; dimensions are advisory, so this never errors.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn page_size(&mut self, index: usize) -> Option<PageDimensions> {
        self.assert_page_index(index);
        let target = self.page_names[index].clone();

        let mut dimensions = None;
        let scan = self.reader.scan(&self.archive_path, |entry| {
            if entry.pathname() != target {
                return Ok(ScanFlow::Continue);
            }
            let declared = entry.size();
            dimensions = probe_dimensions(entry, declared);
            Ok(ScanFlow::Stop)
        });
        if let Err(err) = scan {
            warn!("Error scanning archive for page '{target}': {err}");
        }

        dimensions
    }

    /// Render one page into a pixel buffer
    ///
    /// Re-scans the archive for the page's entry, reads it fully, decodes it
    /// (optionally pre-scaled) and applies the requested rotation. Returns
    /// `None` when the entry is missing, empty or does not decode; one bad
    /// page never fails the document.
    ///
    /// # Panics
    ///
    /// Panics if `context.page_index` is out of range.
    pub fn render_page(&mut self, context: &RenderContext) -> Option<DynamicImage> {
        self.assert_page_index(context.page_index);
        let target = self.page_names[context.page_index].clone();

        let mut data: Option<Vec<u8>> = None;
        let scan = self.reader.scan(&self.archive_path, |entry| {
            if entry.pathname() != target {
                return Ok(ScanFlow::Continue);
            }

            let capacity = usize::try_from(entry.size()).unwrap_or(0);
            let mut buffer = Vec::with_capacity(capacity);
            match entry.read_to_end(&mut buffer) {
                Ok(_) => data = Some(buffer),
                Err(err) => warn!("Error reading '{target}' from archive: {err}"),
            }
            Ok(ScanFlow::Stop)
        });
        if let Err(err) = scan {
            warn!("Error scanning archive for page '{target}': {err}");
        }

        let data = data?;
        if data.is_empty() {
            warn!("Read an empty file from the archive");
            return None;
        }

        let image = decode_page(&data, context.scale)?;
        Some(apply_rotation(image, context.rotation))
    }

    /// Copy the archive byte-for-byte to a new location
    ///
    /// The document never modifies its archive, so "save" is a plain byte
    /// transfer. Returns the number of bytes copied.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error if the copy fails.
    pub fn save_copy<P: AsRef<Path>>(&self, destination: P) -> std::io::Result<u64> {
        std::fs::copy(&self.archive_path, destination)
    }

    fn assert_page_index(&self, index: usize) {
        assert!(
            index < self.page_names.len(),
            "page index {index} out of range for a document with {} pages",
            self.page_names.len()
        );
    }
}

/// One best-effort listing pass over the archive
///
/// A failure after at least one entry was listed is trailing corruption:
/// logged and treated as end of listing. A failure before anything was
/// listed is structural and surfaces as `CorruptArchive` (or
/// `UnsupportedCompression` when a helper tool is missing).
fn list_pathnames(reader: &mut ArchiveReader, path: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    let scan = reader.scan(path, |entry| {
        debug!("Adding '{}' to the list of files in the comic", entry.pathname());
        names.push(entry.pathname().to_string());
        Ok(ScanFlow::Continue)
    });

    match scan {
        Ok(()) => Ok(names),
        Err(err) if !names.is_empty() => {
            warn!("Error while listing archive, keeping {} entries: {err}", names.len());
            Ok(names)
        }
        Err(ArchiveError::ToolMissing(_)) => {
            Err(ComicError::UnsupportedCompression(reader.flavor()))
        }
        Err(err) => Err(ComicError::CorruptArchive(err.to_string())),
    }
}

/// Lower-cased extension after the last `.`, if any
///
/// The whole pathname is searched, matching the catalog contract: an entry
/// with no dot anywhere is never a page.
fn page_extension(name: &str) -> Option<String> {
    let (_, extension) = name.rsplit_once('.')?;
    Some(extension.to_ascii_lowercase())
}

/// Map a source locator onto a local filesystem path
///
/// Plain paths pass through. `file://` URIs are stripped of their scheme and
/// optional `localhost` authority and percent-decoded. Any other scheme has
/// no local path.
fn resolve_local_path(source: &str) -> Result<PathBuf> {
    if let Some(rest) = source.strip_prefix("file://") {
        let path = rest.strip_prefix("localhost").unwrap_or(rest);
        if !path.starts_with('/') {
            return Err(ComicError::NoLocalPath(source.to_string()));
        }
        return Ok(PathBuf::from(percent_decode(path)));
    }

    if source.contains("://") {
        return Err(ComicError::NoLocalPath(source.to_string()));
    }

    Ok(PathBuf::from(source))
}

/// Decode %XX escapes; malformed escapes pass through untouched
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let pair = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2]));
            if let (Some(high), Some(low)) = pair {
                decoded.push(high * 16 + low);
                i += 3;
                continue;
            }
        }
        decoded.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&decoded).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|v| v as u8)
}

/// Guess the content type for an archive path
///
/// The comic book extensions map straight to their vendor types; everything
/// else goes through extension-based MIME guessing.
fn guess_content_type(path: &Path) -> String {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("cbz") => "application/x-cbz".to_string(),
        Some("cbr") => "application/x-cbr".to_string(),
        Some("cb7") => "application/x-cb7".to_string(),
        Some("cbt") => "application/x-cbt".to_string(),
        _ => mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string(),
    }
}
