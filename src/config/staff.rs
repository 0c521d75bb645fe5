//! Staff configuration loaded from environment variables.
//!
//! Staff members may manage the catalog, list phones on platforms and read
//! customer queries. They are identified by Discord user ID through the
//! comma-separated `STAFF_USER_IDS` variable in the `.env` file.

use std::collections::HashSet;

/// Parses a comma-separated list of user IDs, ignoring blanks and whitespace.
#[must_use]
pub fn parse_staff_ids(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Gets the configured staff user IDs. Empty when `STAFF_USER_IDS` is unset.
#[must_use]
pub fn get_staff_ids() -> HashSet<String> {
    std::env::var("STAFF_USER_IDS")
        .map(|raw| parse_staff_ids(&raw))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_staff_ids() {
        let ids = parse_staff_ids(" 123, 456 ,,789 ");
        assert_eq!(ids.len(), 3);
        assert!(ids.contains("123"));
        assert!(ids.contains("456"));
        assert!(ids.contains("789"));
    }

    #[test]
    fn test_parse_empty_staff_ids() {
        assert!(parse_staff_ids("").is_empty());
        assert!(parse_staff_ids(" , ").is_empty());
    }
}
