//! Natural filename ordering
//!
//! Comic pages are ordered the way a person reading filenames expects:
//! `page2.jpg` before `page10.jpg`, case differences ignored. Each pathname
//! maps to a collation key of alternating text and digit-run segments; keys
//! compare segment-wise, and digit runs compare by numeric magnitude rather
//! than byte order. The key comparison is stable and total: two distinct
//! names whose keys tie (e.g. `Page01` vs `page1`) fall back to plain byte
//! order so no two distinct names ever compare equal.

use std::cmp::Ordering;

/// One collation segment: a digit run or a stretch of case-folded text
///
/// Variant order matters for the derived `Ord`: digit runs sort before text,
/// matching ASCII where digits precede letters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Segment {
    /// A run of ASCII digits, leading zeros stripped
    ///
    /// `magnitude` is the stripped digit count, so a longer run is always the
    /// larger number and equal-length runs compare digit-wise: numeric
    /// comparison without parsing into a fixed-width integer.
    Number { magnitude: usize, digits: String },
    /// Case-folded non-digit text
    Text(String),
}

/// Collation key for a pathname, comparable segment-wise
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FilenameKey(Vec<Segment>);

/// Build the collation key for one pathname
#[must_use = "returns the collation key"]
pub fn collation_key(name: &str) -> FilenameKey {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut chars = name.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_ascii_digit() {
            if !text.is_empty() {
                segments.push(Segment::Text(std::mem::take(&mut text)));
            }

            let mut digits = String::new();
            digits.push(c);
            while let Some(&next) = chars.peek() {
                if !next.is_ascii_digit() {
                    break;
                }
                digits.push(next);
                chars.next();
            }

            let stripped = digits.trim_start_matches('0');
            let stripped = if stripped.is_empty() { "0" } else { stripped };
            segments.push(Segment::Number {
                magnitude: stripped.len(),
                digits: stripped.to_string(),
            });
        } else {
            for folded in c.to_lowercase() {
                text.push(folded);
            }
        }
    }

    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }

    FilenameKey(segments)
}

/// Compare two pathnames in natural order
///
/// The single ordering law for the page catalog; applied once over the full
/// page list after catalog building.
#[must_use = "returns the ordering between the two names"]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}
