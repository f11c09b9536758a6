//! Supported image extension set
//!
//! The set of filename extensions that count as comic pages is not
//! hard-coded: it is whatever the installed image decoders can read, queried
//! once at document load time.

use image::ImageFormat;
use std::collections::BTreeSet;

/// Returns the lower-cased file extensions the image decoders can read
///
/// Formats whose decoder is compiled out are excluded, so the same archive
/// can yield different page sets on differently-configured builds.
///
/// # Examples
///
/// ```
/// let extensions = comicdoc_backend::supported_extensions();
/// assert!(extensions.contains("png"));
/// assert!(extensions.contains("jpg"));
/// ```
#[must_use = "returns the set of decodable image extensions"]
pub fn supported_extensions() -> BTreeSet<String> {
    let mut extensions = BTreeSet::new();

    for format in ImageFormat::all() {
        if !format.reading_enabled() {
            continue;
        }
        for ext in format.extensions_str() {
            extensions.insert((*ext).to_ascii_lowercase());
        }
    }

    extensions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_raster_extensions_present() {
        let extensions = supported_extensions();
        for ext in ["png", "jpg", "jpeg", "gif", "bmp", "webp"] {
            assert!(extensions.contains(ext), "expected '{ext}' to be decodable");
        }
    }

    #[test]
    fn test_extensions_are_lower_case() {
        for ext in supported_extensions() {
            assert_eq!(ext, ext.to_ascii_lowercase());
        }
    }

    #[test]
    fn test_non_image_extensions_absent() {
        let extensions = supported_extensions();
        assert!(!extensions.contains("txt"));
        assert!(!extensions.contains("xml"));
        assert!(!extensions.contains("zip"));
    }
}
