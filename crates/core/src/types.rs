use chrono::{NaiveDateTime, TimeZone, Utc};

use crate::error::CoreError;

/// Internal ids on the replicas (`rc_id`, `rc_cur_id`, revision ids) are unsigned.
pub type WikiId = u64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Storage format of MediaWiki timestamps such as `rc_timestamp`.
pub const WIKI_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Parse a 14-digit MediaWiki timestamp (`20150304123000`) as UTC.
pub fn parse_wiki_timestamp(raw: &str) -> Result<Timestamp, CoreError> {
    NaiveDateTime::parse_from_str(raw.trim(), WIKI_TIMESTAMP_FORMAT)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|e| CoreError::Validation(format!("Invalid wiki timestamp '{raw}': {e}")))
}
