/// Pure string processing utilities (Discord-agnostic)
use crate::constants::IDENTIFIER_MARKER;

/// Trim an identifier and make sure it starts with exactly one `@`
///
/// An identifier that already carries the marker is returned trimmed but otherwise unchanged.
pub fn normalize_identifier(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with(IDENTIFIER_MARKER) {
        trimmed.to_string()
    } else {
        format!("{}{}", IDENTIFIER_MARKER, trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_identifier_adds_marker() {
        assert_eq!(normalize_identifier("alice"), "@alice");
        assert_eq!(normalize_identifier("  bob \n"), "@bob");
    }

    #[test]
    fn test_normalize_identifier_keeps_existing_marker() {
        assert_eq!(normalize_identifier("@alice"), "@alice");
        assert_eq!(normalize_identifier(" @alice "), "@alice");
    }

    #[test]
    fn test_normalize_identifier_is_idempotent() {
        for input in ["alice", "@alice", "John Doe", "  x"] {
            let once = normalize_identifier(input);
            assert_eq!(normalize_identifier(&once), once);
            assert!(once.starts_with('@') && !once.starts_with("@@"));
        }
    }
}
