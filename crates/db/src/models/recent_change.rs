//! Projections over `recentchanges` (and `categorylinks` for link times).

use serde::Serialize;
use sqlx::mysql::MySqlRow;
use sqlx::{FromRow, Row};
use wikifeed_core::types::{Timestamp, WikiId};

use super::{id, int, opt_int, text, wiki_timestamp};

/// An edit whose summary matched a hashtag lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashtagEdit {
    pub rc_comment: String,
    pub rc_timestamp: Timestamp,
    pub rc_this_oldid: WikiId,
    pub rc_last_oldid: WikiId,
    pub rc_user_text: String,
    pub rc_new_len: Option<i64>,
    pub rc_old_len: Option<i64>,
    pub rc_title: String,
}

impl<'r> FromRow<'r, MySqlRow> for HashtagEdit {
    fn from_row(row: &'r MySqlRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            rc_comment: text(row, "rc_comment")?,
            rc_timestamp: wiki_timestamp(row, "rc_timestamp")?,
            rc_this_oldid: id(row, "rc_this_oldid")?,
            rc_last_oldid: id(row, "rc_last_oldid")?,
            rc_user_text: text(row, "rc_user_text")?,
            rc_new_len: opt_int(row, "rc_new_len")?,
            rc_old_len: opt_int(row, "rc_old_len")?,
            rc_title: text(row, "rc_title")?,
        })
    }
}

/// A main-namespace page recently linked into a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryMember {
    pub rc_title: String,
    pub rc_cur_id: WikiId,
    pub rc_namespace: i64,
    /// When the page was linked into the category.
    pub cl_timestamp: Timestamp,
}

impl<'r> FromRow<'r, MySqlRow> for CategoryMember {
    fn from_row(row: &'r MySqlRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            rc_title: text(row, "rc_title")?,
            rc_cur_id: id(row, "rc_cur_id")?,
            rc_namespace: int(row, "rc_namespace")?,
            cl_timestamp: row.try_get("cl_timestamp")?,
        })
    }
}

/// A main-namespace revision, with its change id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentRevision {
    pub rc_id: WikiId,
    pub rc_cur_id: WikiId,
    pub rc_title: String,
    pub rc_timestamp: Timestamp,
    pub rc_this_oldid: WikiId,
    pub rc_last_oldid: WikiId,
    pub rc_user_text: String,
    pub rc_old_len: Option<i64>,
    pub rc_new_len: Option<i64>,
    pub rc_comment: String,
}

impl<'r> FromRow<'r, MySqlRow> for RecentRevision {
    fn from_row(row: &'r MySqlRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            rc_id: id(row, "rc_id")?,
            rc_cur_id: id(row, "rc_cur_id")?,
            rc_title: text(row, "rc_title")?,
            rc_timestamp: wiki_timestamp(row, "rc_timestamp")?,
            rc_this_oldid: id(row, "rc_this_oldid")?,
            rc_last_oldid: id(row, "rc_last_oldid")?,
            rc_user_text: text(row, "rc_user_text")?,
            rc_old_len: opt_int(row, "rc_old_len")?,
            rc_new_len: opt_int(row, "rc_new_len")?,
            rc_comment: text(row, "rc_comment")?,
        })
    }
}
