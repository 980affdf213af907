//! Common parameters shared by every feed lookup.

use crate::lookback::DEFAULT_HOURS;
use crate::naming::LanguageCode;

/// Row cap applied when the caller does not give one.
pub const DEFAULT_LIMIT: u32 = 50;

/// Language edition, lookback (hours) and row cap of a lookup.
///
/// Defaults to `en`, one hour, fifty rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedParams {
    pub lang: LanguageCode,
    pub hours: u32,
    pub limit: u32,
}

impl FeedParams {
    pub fn new(lang: LanguageCode) -> Self {
        Self {
            lang,
            ..Self::default()
        }
    }

    pub fn with_hours(mut self, hours: u32) -> Self {
        self.hours = hours;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

impl Default for FeedParams {
    fn default() -> Self {
        Self {
            lang: LanguageCode::default(),
            hours: DEFAULT_HOURS,
            limit: DEFAULT_LIMIT,
        }
    }
}
