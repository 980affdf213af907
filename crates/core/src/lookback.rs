//! Lookback windows rendered into `DATE_SUB(NOW(), INTERVAL ...)`.
//!
//! The window is a closed set: either an hour count that is always sent as a
//! bound parameter, or the fixed fourteen-day constant. No caller text is ever
//! formatted into the interval clause.

use crate::hashtag;

/// Lookback applied when the caller does not give one.
pub const DEFAULT_HOURS: u32 = 1;

/// Trailing time span within which edits or category links are considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookbackWindow {
    /// `INTERVAL ? HOUR`, with the count bound as a parameter.
    Hours(u32),
    /// `INTERVAL 14 DAY`, used only for the integration-testing tag.
    FourteenDays,
}

impl LookbackWindow {
    /// Window for the hashtag-by-tag lookup. The `test` tag always looks back
    /// fourteen days whatever `hours` says.
    pub fn for_tag(normalized_tag: &str, hours: u32) -> Self {
        if hashtag::is_test_tag(normalized_tag) {
            Self::FourteenDays
        } else {
            Self::Hours(hours)
        }
    }

    /// The interval expression, with `?` where the hour count is bound.
    pub fn sql_interval(&self) -> &'static str {
        match self {
            Self::Hours(_) => "INTERVAL ? HOUR",
            Self::FourteenDays => "INTERVAL 14 DAY",
        }
    }

    /// The value to bind for the interval placeholder, if it has one.
    pub fn bound_hours(&self) -> Option<u32> {
        match self {
            Self::Hours(h) => Some(*h),
            Self::FourteenDays => None,
        }
    }

    /// Full server-side lower bound expression.
    pub fn sql_bound(&self) -> String {
        format!("DATE_SUB(NOW(), {})", self.sql_interval())
    }
}

impl Default for LookbackWindow {
    fn default() -> Self {
        Self::Hours(DEFAULT_HOURS)
    }
}
