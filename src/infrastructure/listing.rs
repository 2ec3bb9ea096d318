// src/infrastructure/listing.rs
use std::path::Path;
use walkdir::WalkDir;

use crate::error::AppResult;

/// Enumerates the names of the files directly inside `dir`, sorted.
///
/// Subdirectories are not descended into; the pairing pass only looks at
/// flat release folders.
pub fn list_file_names(dir: &Path) -> AppResult<Vec<String>> {
    let mut names = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_listing_is_sorted_and_files_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.mkv"), b"").unwrap();
        fs::write(dir.path().join("a.mkv"), b"").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.mkv"), b"").unwrap();

        let names = list_file_names(dir.path()).unwrap();
        assert_eq!(names, vec!["a.mkv".to_string(), "b.mkv".to_string()]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        assert!(list_file_names(&missing).is_err());
    }
}
