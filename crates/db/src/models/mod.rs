//! Row models returned by the feed lookups.
//!
//! Serialized field names are the source column names, so a record
//! serializes to the `column -> value` mapping callers expect.

pub mod recent_change;

use sqlx::mysql::MySqlRow;
use sqlx::Row;
use wikifeed_core::types::{parse_wiki_timestamp, Timestamp, WikiId};

// Replica text columns are varbinary, and integer signedness differs between
// schema versions, so columns are read by raw value rather than by declared type.

pub(crate) fn text(row: &MySqlRow, column: &str) -> Result<String, sqlx::Error> {
    let bytes: Vec<u8> = row.try_get_unchecked(column)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub(crate) fn id(row: &MySqlRow, column: &str) -> Result<WikiId, sqlx::Error> {
    row.try_get_unchecked(column)
}

pub(crate) fn int(row: &MySqlRow, column: &str) -> Result<i64, sqlx::Error> {
    row.try_get_unchecked(column)
}

pub(crate) fn opt_int(row: &MySqlRow, column: &str) -> Result<Option<i64>, sqlx::Error> {
    row.try_get_unchecked(column)
}

pub(crate) fn wiki_timestamp(row: &MySqlRow, column: &str) -> Result<Timestamp, sqlx::Error> {
    let raw = text(row, column)?;
    parse_wiki_timestamp(&raw).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
