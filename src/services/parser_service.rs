// src/services/parser_service.rs
//
// Filename Parser
//
// Extracts structured release metadata from a single filename using a fixed
// grammar. Non-matching input is not an error: it simply is not a release
// file, and the caller skips it.

use regex::Regex;
use std::path::Path;

use crate::domain::release::{validate_release, ParsedRelease};

/// Extension that must never parse as a release file
const TORRENT_EXTENSION: &str = "torrent";

/// Parses release filenames of the form
/// `[Group] Name - 01v2 (Specifier) [CRC32HEX].ext`
/// where every field except the name and the extension is optional.
pub struct ReleaseParser {
    pattern: Regex,
}

impl Default for ReleaseParser {
    fn default() -> Self {
        Self {
            // 1. group shortname          2. main name
            // 3. episode specifier        4. version specifier
            // 5. other specifiers         6. CRC hash
            // Interior dot-delimited parts are swallowed so that only the
            // final suffix counts as the extension (7.)
            pattern: Regex::new(
                r"^(?:\[([^\]]+?)\] )?(.+?)(?: - ([a-zA-Z]*\d*))?(?:v(\d*))?(?: \(([^)]*)\))?(?: \[([0-9a-fA-F]{8})\])?(?:\..+)?\.([^.]+)$",
            )
            .unwrap(),
        }
    }
}

impl ReleaseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses one directory entry into a release record.
    ///
    /// Returns `None` for anything that does not follow the release naming
    /// convention, including torrent files. `base_dir` is joined into the
    /// record's path; it is never parsed from.
    pub fn parse(&self, filename: &str, base_dir: &Path) -> Option<ParsedRelease> {
        let captures = self.pattern.captures(filename)?;

        let extension = captures.get(7)?.as_str();
        // The grammar cannot veto its own final suffix, so torrents are
        // rejected after the match.
        if extension == TORRENT_EXTENSION {
            return None;
        }

        // A `v` marker with no digits counts as version 1, same as no
        // marker at all.
        let version = captures
            .get(4)
            .map(|m| m.as_str())
            .filter(|digits| !digits.is_empty())
            .and_then(|digits| digits.parse::<u32>().ok())
            .unwrap_or(1);

        let release = ParsedRelease {
            group: captures.get(1).map(|m| m.as_str().to_string()),
            name: captures.get(2)?.as_str().to_string(),
            episode: captures.get(3).map(|m| m.as_str().to_string()),
            version,
            specifier: captures.get(5).map(|m| m.as_str().to_string()),
            crc: captures.get(6).map(|m| m.as_str().to_string()),
            extension: extension.to_string(),
            full_path: base_dir.join(filename),
        };

        validate_release(&release).ok()?;
        Some(release)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(filename: &str) -> Option<ParsedRelease> {
        ReleaseParser::default().parse(filename, Path::new("/old"))
    }

    #[test]
    fn test_parse_fully_qualified_release_name() {
        let release = parse("[Group] Name - 01v2 (Spec) [ABCDEF12].mkv").unwrap();

        assert_eq!(release.group.as_deref(), Some("Group"));
        assert_eq!(release.name, "Name");
        assert_eq!(release.episode.as_deref(), Some("01"));
        assert_eq!(release.version, 2);
        assert_eq!(release.specifier.as_deref(), Some("Spec"));
        assert_eq!(release.crc.as_deref(), Some("ABCDEF12"));
        assert_eq!(release.extension, "mkv");
        assert_eq!(
            release.full_path,
            Path::new("/old").join("[Group] Name - 01v2 (Spec) [ABCDEF12].mkv")
        );
    }

    #[test]
    fn test_parse_minimal_release_name() {
        let release = parse("Movie.mkv").unwrap();

        assert_eq!(release.group, None);
        assert_eq!(release.name, "Movie");
        assert_eq!(release.episode, None);
        assert_eq!(release.version, 1);
        assert_eq!(release.specifier, None);
        assert_eq!(release.crc, None);
        assert_eq!(release.extension, "mkv");
    }

    #[test]
    fn test_missing_version_marker_defaults_to_one() {
        let release = parse("[G] Show - 01.mkv").unwrap();
        assert_eq!(release.version, 1);
    }

    #[test]
    fn test_version_marker_without_digits_defaults_to_one() {
        let release = parse("[G] Show - 01v.mkv").unwrap();
        assert_eq!(release.episode.as_deref(), Some("01"));
        assert_eq!(release.version, 1);
    }

    #[test]
    fn test_episode_with_letter_prefix() {
        let release = parse("[G] Show - SP1.mkv").unwrap();
        assert_eq!(release.episode.as_deref(), Some("SP1"));
    }

    #[test]
    fn test_interior_dot_segments_are_swallowed() {
        let release = parse("Show.Part.1.mkv").unwrap();
        assert_eq!(release.name, "Show");
        assert_eq!(release.extension, "mkv");
    }

    #[test]
    fn test_torrent_files_are_not_releases() {
        assert!(parse("[G] Show - 01v2.torrent").is_none());
        assert!(parse("Show.torrent").is_none());
    }

    #[test]
    fn test_torrent_only_blocks_the_final_suffix() {
        let release = parse("Show.torrent.mkv").unwrap();
        assert_eq!(release.extension, "mkv");
    }

    #[test]
    fn test_entries_without_extension_are_skipped() {
        assert!(parse("README").is_none());
        assert!(parse("").is_none());
    }

    #[test]
    fn test_group_tag_requires_trailing_space() {
        // Without the separating space the bracket block is part of the name.
        let release = parse("[Group]Show.mkv").unwrap();
        assert_eq!(release.group, None);
        assert_eq!(release.name, "[Group]Show");
    }

    #[test]
    fn test_non_crc_bracket_block_stays_in_the_name() {
        let release = parse("[G] Show - 01 [Hi10P].mkv").unwrap();
        assert_eq!(release.group.as_deref(), Some("G"));
        assert_eq!(release.crc, None);
        assert_eq!(release.name, "Show - 01 [Hi10P]");
    }

    #[test]
    fn test_parsing_is_deterministic() {
        let parser = ReleaseParser::default();
        let first = parser.parse("[G] Show - 01v2 (720p).mkv", Path::new("/old"));
        for _ in 0..10 {
            let again = parser.parse("[G] Show - 01v2 (720p).mkv", Path::new("/old"));
            assert_eq!(first, again);
        }
    }
}
