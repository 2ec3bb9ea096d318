use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Separator joining the components of an identity key
const IDENTITY_KEY_SEPARATOR: &str = "/";

/// Metadata extracted from a single release filename
/// Parsed once by the filename grammar, never mutated afterwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRelease {
    /// Release group tag, absent when the filename has no leading bracket block
    pub group: Option<String>,

    /// Main title text, always non-empty
    pub name: String,

    /// Episode specifier (optional letter prefix plus digits); the grammar
    /// admits a bare episode separator, so this may be present and empty
    pub episode: Option<String>,

    /// Revision marker; 1 when the filename carries no explicit version
    pub version: u32,

    /// Free-text qualifier such as resolution or source tag
    pub specifier: Option<String>,

    /// 8-character hexadecimal checksum
    pub crc: Option<String>,

    /// File extension after the last dot
    pub extension: String,

    /// Base directory joined with the filename this record was derived from
    pub full_path: PathBuf,
}

impl ParsedRelease {
    /// Derives the key identifying "the same title and variant" across versions.
    ///
    /// Only components that were textually present in the filename take part,
    /// so `Show - 01.mkv` and `Show - 01 (720p).mkv` land in different groups.
    /// The raw parsed text is used on purpose: sanitizing here would merge
    /// variants that are distinct on disk.
    pub fn identity_key(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(5);
        if let Some(group) = &self.group {
            parts.push(group);
        }
        parts.push(&self.name);
        if let Some(episode) = &self.episode {
            parts.push(episode);
        }
        if let Some(specifier) = &self.specifier {
            parts.push(specifier);
        }
        parts.push(&self.extension);
        parts.join(IDENTITY_KEY_SEPARATOR)
    }

    /// Final path component as text, used by script generation and the
    /// shell safety check
    pub fn basename(&self) -> String {
        self.full_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Specifier text with absence flattened to the empty string
    pub fn specifier_text(&self) -> &str {
        self.specifier.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn release(group: Option<&str>, specifier: Option<&str>) -> ParsedRelease {
        ParsedRelease {
            group: group.map(String::from),
            name: "Show".to_string(),
            episode: Some("01".to_string()),
            version: 2,
            specifier: specifier.map(String::from),
            crc: None,
            extension: "mkv".to_string(),
            full_path: Path::new("/old").join("[G] Show - 01v2.mkv"),
        }
    }

    #[test]
    fn test_identity_key_uses_present_components_only() {
        assert_eq!(release(Some("G"), None).identity_key(), "G/Show/01/mkv");
        assert_eq!(release(None, None).identity_key(), "Show/01/mkv");
        assert_eq!(
            release(Some("G"), Some("720p")).identity_key(),
            "G/Show/01/720p/mkv"
        );
    }

    #[test]
    fn test_identity_key_ignores_version() {
        let mut v1 = release(Some("G"), None);
        v1.version = 1;
        let v2 = release(Some("G"), None);
        assert_eq!(v1.identity_key(), v2.identity_key());
    }

    #[test]
    fn test_basename_is_the_final_path_component() {
        assert_eq!(release(Some("G"), None).basename(), "[G] Show - 01v2.mkv");
    }
}
