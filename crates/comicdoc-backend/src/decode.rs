//! Page image decoding
//!
//! Two read paths share this module. The dimension probe feeds entry bytes
//! to the decoder chunk by chunk and stops as soon as width and height are
//! known, so probing never pays for full pixel decode. The render path
//! decodes a complete byte buffer, optionally downscales toward a target
//! scale, and applies a right-angle rotation.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader};
use log::warn;
use serde::{Deserialize, Serialize};
use std::io::{Cursor, Read};

/// Bytes fed to the decoder per probe step
///
/// Small enough that a header-only probe stays cheap, large enough that one
/// chunk usually covers the header of any common format.
pub(crate) const PROBE_CHUNK_SIZE: usize = 10_240;

/// Natural pixel dimensions of a page image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageDimensions {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Right-angle page rotation, clockwise
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    /// No rotation
    #[default]
    None,
    /// 90° clockwise
    Quarter,
    /// 180°
    Half,
    /// 270° clockwise
    ThreeQuarter,
}

impl Rotation {
    /// Normalize an angle in degrees to a right-angle rotation
    ///
    /// Angles are reduced modulo 360 (Euclidean, so negative input works).
    /// Values that are not a multiple of 90 render unrotated with a warning.
    ///
    /// # Examples
    ///
    /// ```
    /// use comicdoc_backend::Rotation;
    ///
    /// assert_eq!(Rotation::from_degrees(450), Rotation::Quarter);
    /// assert_eq!(Rotation::from_degrees(-90), Rotation::ThreeQuarter);
    /// assert_eq!(Rotation::from_degrees(360), Rotation::None);
    /// ```
    #[must_use = "returns the normalized rotation"]
    pub fn from_degrees(angle: i32) -> Self {
        match angle.rem_euclid(360) {
            0 => Self::None,
            90 => Self::Quarter,
            180 => Self::Half,
            270 => Self::ThreeQuarter,
            other => {
                warn!("Rotation angle {other}° is not a right angle, rendering unrotated");
                Self::None
            }
        }
    }

    /// The normalized clockwise angle in degrees
    #[inline]
    #[must_use = "returns the angle in degrees"]
    pub const fn degrees(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Quarter => 90,
            Self::Half => 180,
            Self::ThreeQuarter => 270,
        }
    }
}

/// Read just enough of an entry to learn the image dimensions
///
/// Pulls `declared_size` bytes in `PROBE_CHUNK_SIZE` steps, asking the
/// decoder after each chunk whether the header has resolved. Read failures
/// and undecodable data yield `None`; dimension information is advisory, so
/// this path never errors.
pub(crate) fn probe_dimensions<R: Read + ?Sized>(
    reader: &mut R,
    declared_size: u64,
) -> Option<PageDimensions> {
    let mut collected = Vec::new();
    let mut chunk = [0u8; PROBE_CHUNK_SIZE];
    let mut left = declared_size;

    while left > 0 {
        let want = PROBE_CHUNK_SIZE.min(usize::try_from(left).unwrap_or(PROBE_CHUNK_SIZE));
        let read = match reader.read(&mut chunk[..want]) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) => {
                warn!("Error reading page data during dimension probe: {err}");
                return None;
            }
        };

        collected.extend_from_slice(&chunk[..read]);
        left = left.saturating_sub(read as u64);

        // Early exit: stop pulling data the moment the header has resolved
        if let Some(dimensions) = try_dimensions(&collected) {
            return Some(dimensions);
        }
    }

    try_dimensions(&collected)
}

/// Ask the decoder for dimensions on the bytes gathered so far
fn try_dimensions(bytes: &[u8]) -> Option<PageDimensions> {
    let (width, height) = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()?;
    Some(PageDimensions { width, height })
}

/// Decode a complete page image, optionally scaled toward a target factor
///
/// A `scale` of e.g. 0.25 requests a quarter-size decode for thumbnail use;
/// the image is decoded at natural size and resized down, preserving the
/// contract that the output dimensions equal the scaled natural dimensions.
/// Returns `None` (with a warning) when the data does not decode.
pub(crate) fn decode_page(data: &[u8], scale: Option<f32>) -> Option<DynamicImage> {
    let reader = match ImageReader::new(Cursor::new(data)).with_guessed_format() {
        Ok(reader) => reader,
        Err(err) => {
            warn!("Could not determine page image format: {err}");
            return None;
        }
    };

    let image = match reader.decode() {
        Ok(image) => image,
        Err(err) => {
            warn!("Failed to decode page image: {err}");
            return None;
        }
    };

    match scale {
        Some(factor) if factor > 0.0 && (factor - 1.0).abs() > f32::EPSILON => {
            let (width, height) = image.dimensions();
            let scaled_width = scaled_dimension(width, factor);
            let scaled_height = scaled_dimension(height, factor);
            Some(image.resize_exact(scaled_width, scaled_height, FilterType::Triangle))
        }
        _ => Some(image),
    }
}

/// Scale one dimension, clamping to at least one pixel
fn scaled_dimension(value: u32, factor: f32) -> u32 {
    let scaled = (value as f32 * factor).round();
    if scaled < 1.0 {
        1
    } else {
        scaled as u32
    }
}

/// Apply a right-angle rotation to a decoded page
///
/// `Rotation::None` returns the buffer unchanged; the other three produce a
/// freshly rotated buffer.
pub(crate) fn apply_rotation(image: DynamicImage, rotation: Rotation) -> DynamicImage {
    match rotation {
        Rotation::None => image,
        Rotation::Quarter => image.rotate90(),
        Rotation::Half => image.rotate180(),
        Rotation::ThreeQuarter => image.rotate270(),
    }
}
