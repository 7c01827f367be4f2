// Tue Feb 10 2026 - Alex

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// Release tags look like android-7.1.2_r33; the Q pre-release cycle was
// tagged android-q-preview-N before the numeric scheme caught up.
static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^android-(?:(\d)\.(\d)|(q)-)").unwrap());

/// major.minor -> platform API level. Probing is bounded below at 5.0.
const API_LEVELS: &[((u32, u32), u32)] = &[
    ((5, 0), 21),
    ((5, 1), 22),
    ((6, 0), 23),
    ((7, 0), 24),
    ((7, 1), 25),
    ((8, 0), 26),
    ((8, 1), 27),
    ((9, 0), 28),
    ((10, 0), 29),
];

pub const MIN_SUPPORTED_MAJOR: u32 = 5;

#[derive(Error, Debug)]
pub enum VersionError {
    #[error("not a release tag: {0}")]
    NotReleaseTag(String),
    #[error("release {major}.{minor} predates the supported range ({tag})")]
    Unsupported { tag: String, major: u32, minor: u32 },
    #[error("no API level known for release {major}.{minor}")]
    UnknownApiLevel { major: u32, minor: u32 },
}

/// One tagged point in ART history, mapped onto a platform release.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AndroidVersion {
    pub tag: String,
    pub major: u32,
    pub minor: u32,
    pub api_level: u32,
}

impl AndroidVersion {
    pub fn from_tag(tag: &str) -> Result<Self, VersionError> {
        let (major, minor) = parse_tag(tag)
            .ok_or_else(|| VersionError::NotReleaseTag(tag.to_string()))?;

        if major < MIN_SUPPORTED_MAJOR {
            return Err(VersionError::Unsupported {
                tag: tag.to_string(),
                major,
                minor,
            });
        }

        let api_level = api_level_for(major, minor)
            .ok_or(VersionError::UnknownApiLevel { major, minor })?;

        Ok(Self {
            tag: tag.to_string(),
            major,
            minor,
            api_level,
        })
    }

    /// True for tags that name a probeable release.
    pub fn is_eligible_tag(tag: &str) -> bool {
        match parse_tag(tag) {
            Some((major, _)) => major >= MIN_SUPPORTED_MAJOR,
            None => false,
        }
    }
}

impl fmt::Display for AndroidVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}.{}, API {})",
            self.tag, self.major, self.minor, self.api_level
        )
    }
}

/// Extract (major, minor) from a tag name, or None if it is not a release
/// tag. The `q` codename maps to a synthetic 10.0.
pub fn parse_tag(tag: &str) -> Option<(u32, u32)> {
    let captures = TAG_PATTERN.captures(tag)?;

    if captures.get(3).is_some() {
        return Some((10, 0));
    }

    let major = captures.get(1)?.as_str().parse().ok()?;
    let minor = captures.get(2)?.as_str().parse().ok()?;
    Some((major, minor))
}

pub fn api_level_for(major: u32, minor: u32) -> Option<u32> {
    API_LEVELS
        .iter()
        .find(|((maj, min), _)| *maj == major && *min == minor)
        .map(|(_, api)| *api)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_release_tag() {
        assert_eq!(parse_tag("android-7.1.2_r33"), Some((7, 1)));
        assert_eq!(parse_tag("android-5.0.0_r1"), Some((5, 0)));
        assert_eq!(parse_tag("android-9.0.0_r10"), Some((9, 0)));
    }

    #[test]
    fn test_parse_codename_tag() {
        assert_eq!(parse_tag("android-q-preview-4"), Some((10, 0)));
    }

    #[test]
    fn test_parse_rejects_non_release_tags() {
        assert_eq!(parse_tag("android-cts-7.0_r1"), None);
        assert_eq!(parse_tag("studio-1.0"), None);
        assert_eq!(parse_tag("android-wear-5.1.1_r1"), None);
        // Two-digit majors never match the numeric form; 10.x enters via q.
        assert_eq!(parse_tag("android-10.0.0_r2"), None);
    }

    #[test]
    fn test_from_tag_fills_api_level() {
        let version = AndroidVersion::from_tag("android-7.1.2_r33").unwrap();
        assert_eq!(version.major, 7);
        assert_eq!(version.minor, 1);
        assert_eq!(version.api_level, 25);

        let version = AndroidVersion::from_tag("android-q-preview-4").unwrap();
        assert_eq!(version.major, 10);
        assert_eq!(version.api_level, 29);
    }

    #[test]
    fn test_from_tag_rejects_pre_lollipop() {
        assert!(matches!(
            AndroidVersion::from_tag("android-4.4_r1"),
            Err(VersionError::Unsupported { major: 4, .. })
        ));
    }

    #[test]
    fn test_from_tag_rejects_unknown_api_level() {
        assert!(matches!(
            AndroidVersion::from_tag("android-5.2.0_r1"),
            Err(VersionError::UnknownApiLevel { major: 5, minor: 2 })
        ));
    }

    #[test]
    fn test_eligibility() {
        assert!(AndroidVersion::is_eligible_tag("android-5.0.0_r1"));
        assert!(AndroidVersion::is_eligible_tag("android-q-preview-1"));
        assert!(!AndroidVersion::is_eligible_tag("android-4.4_r1"));
        assert!(!AndroidVersion::is_eligible_tag("android-cts-7.0_r1"));
    }
}
