// src/domain/pairing/value_objects.rs
//
// Pairing Value Objects
//
// Pure, immutable data structures produced while matching old and new
// release listings.
//
// CRITICAL INVARIANTS:
// - ReleaseGroup lives only for the duration of one pairing pass
// - ResolvedPair is the durable hand-off to patch and script generation
// - Version selection is first-seen-wins on ties, so results are reproducible

use serde::{Deserialize, Serialize};

use crate::domain::release::ParsedRelease;

// ============================================================================
// RELEASE GROUP (TRANSIENT)
// ============================================================================

/// Candidates sharing one identity key, split by the listing they came from
#[derive(Debug, Clone, Default)]
pub struct ReleaseGroup {
    /// Candidates found in the old listing, in encounter order
    pub old: Vec<ParsedRelease>,

    /// Candidates found in the new listing, in encounter order
    pub new: Vec<ParsedRelease>,
}

impl ReleaseGroup {
    /// Highest-version candidate on the old side.
    /// Ties keep the first-seen candidate.
    pub fn highest_old(&self) -> Option<&ParsedRelease> {
        highest_version(&self.old)
    }

    /// Highest-version candidate on the new side.
    /// Ties keep the first-seen candidate.
    pub fn highest_new(&self) -> Option<&ParsedRelease> {
        highest_version(&self.new)
    }
}

fn highest_version(candidates: &[ParsedRelease]) -> Option<&ParsedRelease> {
    let mut best: Option<&ParsedRelease> = None;
    for candidate in candidates {
        match best {
            // A later candidate replaces the current best only when it is
            // strictly newer.
            Some(current) if candidate.version <= current.version => {}
            _ => best = Some(candidate),
        }
    }
    best
}

// ============================================================================
// RESOLVED PAIR (DURABLE OUTPUT)
// ============================================================================

/// An (old, new) release combination determined to need an update artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPair {
    /// Release the patch is applied on top of
    pub source: ParsedRelease,

    /// Release the patch produces
    pub target: ParsedRelease,

    /// Output filename for the patch artifact
    pub patch_filename: String,

    /// Identity key of the group this pair was resolved from
    pub identity_key: String,

    /// Whether both basenames can be passed to the diff tool verbatim
    /// in a Windows shell script
    pub is_shell_safe: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn release(version: u32, filename: &str) -> ParsedRelease {
        ParsedRelease {
            group: Some("G".to_string()),
            name: "Show".to_string(),
            episode: Some("01".to_string()),
            version,
            specifier: None,
            crc: None,
            extension: "mkv".to_string(),
            full_path: Path::new("/old").join(filename),
        }
    }

    #[test]
    fn test_highest_version_picks_the_maximum() {
        let group = ReleaseGroup {
            old: vec![release(1, "a.mkv"), release(3, "b.mkv"), release(2, "c.mkv")],
            new: Vec::new(),
        };

        assert_eq!(group.highest_old().unwrap().version, 3);
    }

    #[test]
    fn test_highest_version_tie_keeps_first_seen() {
        let group = ReleaseGroup {
            old: vec![release(2, "first.mkv"), release(2, "second.mkv")],
            new: Vec::new(),
        };

        let highest = group.highest_old().unwrap();
        assert_eq!(highest.full_path, Path::new("/old/first.mkv"));
    }

    #[test]
    fn test_highest_version_of_empty_side_is_none() {
        let group = ReleaseGroup::default();
        assert!(group.highest_old().is_none());
        assert!(group.highest_new().is_none());
    }
}
