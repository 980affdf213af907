//! Hashtag normalization and the REGEXP patterns matched against edit summaries.
//!
//! The patterns use the replica's POSIX-style word-end marker `[[:>:]]`, so a
//! tag must be preceded by start-of-string or a space and end on a word
//! boundary.

/// Tag that switches the lookback to the fixed integration-testing window.
pub const TEST_TAG: &str = "test";

/// Pattern matching any hashtag: `#`, two letters, then letters or digits.
pub const ANY_HASHTAG_PATTERN: &str = "(^| )#[[:alpha:]]{2}[[:alnum:]]*[[:>:]]";

/// Strip a single leading `#` from a user-supplied tag.
pub fn normalize_tag(tag: &str) -> &str {
    tag.strip_prefix('#').unwrap_or(tag)
}

/// Whether this (normalized) tag is the integration-testing tag.
pub fn is_test_tag(tag: &str) -> bool {
    tag == TEST_TAG
}

/// Build the REGEXP pattern for a single normalized tag.
///
/// The tag travels as a bound parameter, so it cannot alter the SQL. Regex
/// metacharacters inside it are passed through to the pattern unchanged.
pub fn tag_pattern(tag: &str) -> String {
    format!("(^| )#{tag}[[:>:]]")
}
