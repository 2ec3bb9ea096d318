// src/services/shell_safety.rs
//
// Windows Safety Checker
//
// Classifies a basename as safe or unsafe for passing as a literal argument
// to the external diff tool from a cmd script. Unsafe names are still
// patchable, the generated script just routes them through a temporary
// copy with a sanitized name.

/// Device names cmd resolves before looking at the filesystem
const RESERVED_DEVICE_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Punctuation that survives cmd argument passing without escaping
const SAFE_PUNCTUATION: &str = " !#$%&()+,-.;=@[]^_`{}";

/// Returns whether `basename` can be handed to the diff tool verbatim.
///
/// The reserved-name comparison is deliberately case-sensitive, matching
/// the exact device names; everything outside a fixed 7-bit ASCII
/// allowlist is unsafe.
pub fn is_cmd_safe(basename: &str) -> bool {
    if RESERVED_DEVICE_NAMES.contains(&basename) {
        return false;
    }

    basename
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || SAFE_PUNCTUATION.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_release_names_are_safe() {
        assert!(is_cmd_safe("Show_01.mkv"));
        assert!(is_cmd_safe("[Group] Show - 01v2 (720p) [ABCDEF12].mkv"));
    }

    #[test]
    fn test_reserved_device_names_are_unsafe() {
        for name in RESERVED_DEVICE_NAMES {
            assert!(!is_cmd_safe(name), "{name} should be unsafe");
        }
    }

    #[test]
    fn test_reserved_name_check_is_case_sensitive() {
        assert!(is_cmd_safe("con"));
        assert!(is_cmd_safe("Con"));
        assert!(!is_cmd_safe("CON"));
    }

    #[test]
    fn test_non_ascii_names_are_unsafe() {
        assert!(!is_cmd_safe("Shów.mkv"));
        assert!(!is_cmd_safe("ショー.mkv"));
    }

    #[test]
    fn test_characters_outside_the_allowlist_are_unsafe() {
        assert!(!is_cmd_safe("show\"01.mkv"));
        assert!(!is_cmd_safe("show|01.mkv"));
        assert!(!is_cmd_safe("show~01.mkv"));
        assert!(!is_cmd_safe("show'01.mkv"));
    }

    #[test]
    fn test_allowlisted_punctuation_is_safe() {
        assert!(is_cmd_safe("a&b (x) [y] {z} = #1.mkv"));
    }
}
