use super::entity::ParsedRelease;
use crate::domain::{DomainError, DomainResult};

/// Extension that must never belong to a release record
const TORRENT_EXTENSION: &str = "torrent";

/// Validates all ParsedRelease invariants
pub fn validate_release(release: &ParsedRelease) -> DomainResult<()> {
    if release.name.is_empty() {
        return Err(DomainError::InvariantViolation(
            "Release name cannot be empty".to_string(),
        ));
    }

    if release.extension.is_empty() {
        return Err(DomainError::InvariantViolation(
            "Release extension cannot be empty".to_string(),
        ));
    }

    if release.extension == TORRENT_EXTENSION {
        return Err(DomainError::InvariantViolation(format!(
            "'{}' is not a release file extension",
            release.extension
        )));
    }

    if release.version < 1 {
        return Err(DomainError::InvariantViolation(format!(
            "Release version must be positive, got {}",
            release.version
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn release() -> ParsedRelease {
        ParsedRelease {
            group: Some("G".to_string()),
            name: "Show".to_string(),
            episode: Some("01".to_string()),
            version: 1,
            specifier: None,
            crc: None,
            extension: "mkv".to_string(),
            full_path: PathBuf::from("/old/[G] Show - 01.mkv"),
        }
    }

    #[test]
    fn test_valid_release() {
        assert!(validate_release(&release()).is_ok());
    }

    #[test]
    fn test_empty_name_fails() {
        let mut invalid = release();
        invalid.name = String::new();

        let result = validate_release(&invalid);
        assert!(result.is_err());

        if let Err(DomainError::InvariantViolation(msg)) = result {
            assert!(msg.contains("name"));
        } else {
            panic!("Expected InvariantViolation error");
        }
    }

    #[test]
    fn test_torrent_extension_fails() {
        let mut invalid = release();
        invalid.extension = "torrent".to_string();
        assert!(validate_release(&invalid).is_err());
    }

    #[test]
    fn test_version_zero_fails() {
        let mut invalid = release();
        invalid.version = 0;
        assert!(validate_release(&invalid).is_err());
    }
}
