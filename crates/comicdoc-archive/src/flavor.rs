//! Archive format selection
//!
//! Maps a content-type string onto one of the four container families a comic
//! book can ship in. Both the vendor comic alias and the generic container
//! type select the same flavor, e.g. `application/x-cbz` and
//! `application/zip` are the same thing to us.

use serde::{Deserialize, Serialize};
use std::process::Command;

/// Container family of a comic book archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArchiveFlavor {
    /// ZIP container (.zip, .cbz)
    Zip,
    /// RAR container (.rar, .cbr)
    Rar,
    /// 7-Zip container (.7z, .cb7)
    SevenZ,
    /// TAR container (.tar, .cbt), optionally gzip or bzip2 compressed
    Tar,
}

impl ArchiveFlavor {
    /// Select the flavor for a content-type string
    ///
    /// Any media-type parameters (`; charset=...`) are ignored and matching
    /// is case-insensitive. Returns `None` for content types outside the four
    /// comic book families.
    ///
    /// # Examples
    ///
    /// ```
    /// use comicdoc_archive::ArchiveFlavor;
    ///
    /// assert_eq!(
    ///     ArchiveFlavor::from_content_type("application/x-cbz"),
    ///     Some(ArchiveFlavor::Zip)
    /// );
    /// assert_eq!(
    ///     ArchiveFlavor::from_content_type("application/zip"),
    ///     Some(ArchiveFlavor::Zip)
    /// );
    /// assert_eq!(ArchiveFlavor::from_content_type("text/plain"), None);
    /// ```
    #[must_use = "returns the selected flavor, if any"]
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let base = content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        match base.as_str() {
            "application/vnd.comicbook+zip" | "application/x-cbz" | "application/zip" => {
                Some(Self::Zip)
            }
            "application/vnd.comicbook-rar"
            | "application/x-cbr"
            | "application/x-rar"
            | "application/x-rar-compressed"
            | "application/vnd.rar" => Some(Self::Rar),
            "application/x-cb7" | "application/x-7z-compressed" => Some(Self::SevenZ),
            "application/x-cbt" | "application/x-tar" => Some(Self::Tar),
            _ => None,
        }
    }

    /// Whether this host can actually decode archives of this flavor
    ///
    /// ZIP, 7Z and TAR support is compiled in. RAR extraction shells out to
    /// the `unar` tool, so a recognized RAR archive is still unreadable when
    /// that binary is missing. Callers use this to distinguish "wrong file"
    /// from "missing optional support".
    #[must_use = "returns whether archives of this flavor can be decoded"]
    pub fn codec_available(self) -> bool {
        match self {
            Self::Zip | Self::SevenZ | Self::Tar => true,
            Self::Rar => Command::new("unar").arg("-v").output().is_ok(),
        }
    }

    /// Short human-readable name of the container family
    #[must_use = "returns the flavor name"]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zip => "ZIP",
            Self::Rar => "RAR",
            Self::SevenZ => "7Z",
            Self::Tar => "TAR",
        }
    }
}

impl std::fmt::Display for ArchiveFlavor {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ArchiveFlavor {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zip" | "cbz" => Ok(Self::Zip),
            "rar" | "cbr" => Ok(Self::Rar),
            "7z" | "sevenz" | "cb7" => Ok(Self::SevenZ),
            "tar" | "cbt" => Ok(Self::Tar),
            _ => Err(format!(
                "Unknown archive flavor '{s}'. Expected: zip, rar, 7z, tar"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comic_aliases_match_generic_types() {
        assert_eq!(
            ArchiveFlavor::from_content_type("application/x-cbz"),
            ArchiveFlavor::from_content_type("application/zip")
        );
        assert_eq!(
            ArchiveFlavor::from_content_type("application/x-cbr"),
            ArchiveFlavor::from_content_type("application/x-rar")
        );
        assert_eq!(
            ArchiveFlavor::from_content_type("application/x-cb7"),
            ArchiveFlavor::from_content_type("application/x-7z-compressed")
        );
        assert_eq!(
            ArchiveFlavor::from_content_type("application/x-cbt"),
            ArchiveFlavor::from_content_type("application/x-tar")
        );
    }

    #[test]
    fn test_unknown_content_types_rejected() {
        assert_eq!(ArchiveFlavor::from_content_type("text/plain"), None);
        assert_eq!(ArchiveFlavor::from_content_type("application/pdf"), None);
        assert_eq!(ArchiveFlavor::from_content_type(""), None);
    }

    #[test]
    fn test_parameters_and_case_ignored() {
        assert_eq!(
            ArchiveFlavor::from_content_type("Application/ZIP; charset=binary"),
            Some(ArchiveFlavor::Zip)
        );
        assert_eq!(
            ArchiveFlavor::from_content_type("  application/x-tar "),
            Some(ArchiveFlavor::Tar)
        );
    }

    #[test]
    fn test_from_str_round_trip() {
        for flavor in [
            ArchiveFlavor::Zip,
            ArchiveFlavor::Rar,
            ArchiveFlavor::SevenZ,
            ArchiveFlavor::Tar,
        ] {
            let parsed: ArchiveFlavor = flavor.as_str().parse().expect("parse flavor name");
            assert_eq!(parsed, flavor);
        }
        assert!("lha".parse::<ArchiveFlavor>().is_err());
    }

    #[test]
    fn test_builtin_codecs_always_available() {
        assert!(ArchiveFlavor::Zip.codec_available());
        assert!(ArchiveFlavor::SevenZ.codec_available());
        assert!(ArchiveFlavor::Tar.codec_available());
    }
}
