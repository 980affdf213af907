//! Wiki naming conventions: language codes and page/category titles.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::CoreError;

/// Language edition queried when the caller does not name one.
pub const DEFAULT_LANG: &str = "en";

/// Language codes become part of a hostname and a database name, so they are
/// restricted to what the replica naming scheme actually uses.
static LANG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]{0,31}$").expect("valid regex"));

/// A validated wiki language code such as `en` or `zh_yue`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn parse(code: &str) -> Result<Self, CoreError> {
        if LANG_RE.is_match(code) {
            Ok(Self(code.to_string()))
        } else {
            Err(CoreError::Validation(format!(
                "Invalid language code '{code}': expected lowercase letters, digits or '_'"
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self(DEFAULT_LANG.to_string())
    }
}

impl FromStr for LanguageCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Convert a human-readable title to the stored form (`My Page` -> `My_Page`).
///
/// Only spaces are rewritten; case and other characters are left alone.
pub fn to_db_title(title: &str) -> String {
    title.replace(' ', "_")
}

/// Normalize every title of an article list, rejecting an empty list.
///
/// An empty list would render `IN ()`, which is not valid SQL.
pub fn to_db_titles<S: AsRef<str>>(titles: &[S]) -> Result<Vec<String>, CoreError> {
    if titles.is_empty() {
        return Err(CoreError::Validation(
            "Article list must contain at least one title".into(),
        ));
    }
    Ok(titles.iter().map(|t| to_db_title(t.as_ref())).collect())
}
