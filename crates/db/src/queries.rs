//! SQL builders for the recent-changes feed lookups.
//!
//! Each builder returns a [`FeedQuery`]: the statement with positional `?`
//! placeholders and the values to bind, in order. The lower time bound is
//! always `DATE_SUB(NOW(), ...)` so the replica's clock decides the window.

use sqlx::mysql::MySqlRow;
use sqlx::{Executor, FromRow, MySql};
use wikifeed_core::error::CoreError;
use wikifeed_core::hashtag::{self, ANY_HASHTAG_PATTERN};
use wikifeed_core::lookback::LookbackWindow;
use wikifeed_core::naming::{to_db_title, to_db_titles};

/// Columns returned by the hashtag lookups.
const HASHTAG_COLUMNS: &str = "rc_comment, rc_timestamp, rc_this_oldid, rc_last_oldid, \
    rc_user_text, rc_new_len, rc_old_len, rc_title";

/// Columns returned by the revision lookups, unqualified.
const REVISION_COLUMNS: &str = "rc_id, rc_cur_id, rc_title, rc_timestamp, rc_this_oldid, \
    rc_last_oldid, rc_user_text, rc_old_len, rc_new_len, rc_comment";

/// Same as [`REVISION_COLUMNS`], qualified with the `rc` alias used by joins.
const REVISION_COLUMNS_RC: &str = "rc.rc_id, rc.rc_cur_id, rc.rc_title, rc.rc_timestamp, \
    rc.rc_this_oldid, rc.rc_last_oldid, rc.rc_user_text, rc.rc_old_len, rc.rc_new_len, \
    rc.rc_comment";

/// Joins main-namespace changes to category links through a self-join on
/// title, reaching `categorylinks` by the joined row's page id.
const CATEGORY_JOIN: &str = "FROM recentchanges AS rc
             INNER JOIN recentchanges AS rc_talk
                 ON rc.rc_title = rc_talk.rc_title
                 AND rc.rc_namespace = 0
             INNER JOIN categorylinks AS cl
                 ON rc_talk.rc_cur_id = cl.cl_from";

/// A value bound to one `?` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParam {
    Text(String),
    UInt(u32),
}

/// A statement plus its ordered bind values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    pub sql: String,
    pub params: Vec<QueryParam>,
}

impl FeedQuery {
    /// Number of `?` placeholders in the statement.
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }

    /// Bind every parameter in order and fetch all rows.
    pub async fn fetch_all<'c, T, E>(&self, executor: E) -> Result<Vec<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, MySqlRow> + Send + Unpin,
        E: Executor<'c, Database = MySql>,
    {
        let mut query = sqlx::query_as::<_, T>(&self.sql);
        for param in &self.params {
            query = match param {
                QueryParam::Text(text) => query.bind(text.as_str()),
                QueryParam::UInt(n) => query.bind(*n),
            };
        }
        query.fetch_all(executor).await
    }
}

/// Push the window's bound value, if any, onto `params`.
fn bind_window(params: &mut Vec<QueryParam>, window: LookbackWindow) {
    if let Some(hours) = window.bound_hours() {
        params.push(QueryParam::UInt(hours));
    }
}

/// Edits whose summary mentions `#tag` as a whole word.
///
/// A leading `#` on `tag` is ignored. The tag `test` always looks back
/// fourteen days.
pub fn hashtag_edits(tag: &str, hours: u32, limit: u32) -> FeedQuery {
    let tag = hashtag::normalize_tag(tag);
    let window = LookbackWindow::for_tag(tag, hours);

    let sql = format!(
        "SELECT {HASHTAG_COLUMNS}
         FROM recentchanges
         WHERE rc_type = 0
         AND rc_timestamp >= {bound}
         AND rc_comment REGEXP ?
         ORDER BY rc_id DESC
         LIMIT ?",
        bound = window.sql_bound(),
    );

    let mut params = Vec::with_capacity(3);
    bind_window(&mut params, window);
    params.push(QueryParam::Text(hashtag::tag_pattern(tag)));
    params.push(QueryParam::UInt(limit));

    FeedQuery { sql, params }
}

/// Edits whose summary contains any hashtag.
pub fn any_hashtag_edits(hours: u32, limit: u32) -> FeedQuery {
    let window = LookbackWindow::Hours(hours);

    // Strictly newer than the bound, unlike the other lookups.
    let sql = format!(
        "SELECT {HASHTAG_COLUMNS}
         FROM recentchanges
         WHERE rc_type = 0
         AND rc_timestamp > {bound}
         AND rc_comment REGEXP ?
         ORDER BY rc_id DESC
         LIMIT ?",
        bound = window.sql_bound(),
    );

    let mut params = Vec::with_capacity(3);
    bind_window(&mut params, window);
    params.push(QueryParam::Text(ANY_HASHTAG_PATTERN.to_string()));
    params.push(QueryParam::UInt(limit));

    FeedQuery { sql, params }
}

/// Pages linked into `category` within the window, filtered on link time.
pub fn category_members(category: &str, hours: u32, limit: u32) -> FeedQuery {
    let window = LookbackWindow::Hours(hours);

    let sql = format!(
        "SELECT DISTINCT rc.rc_title, rc.rc_cur_id, rc.rc_namespace, cl.cl_timestamp
         {CATEGORY_JOIN}
         WHERE cl.cl_to = ?
         AND cl.cl_timestamp >= {bound}
         ORDER BY rc.rc_id DESC
         LIMIT ?",
        bound = window.sql_bound(),
    );

    let mut params = Vec::with_capacity(3);
    params.push(QueryParam::Text(to_db_title(category)));
    bind_window(&mut params, window);
    params.push(QueryParam::UInt(limit));

    FeedQuery { sql, params }
}

/// Main-namespace edits to any of `articles` within the window.
///
/// Fails with a validation error on an empty list.
pub fn article_revisions<S: AsRef<str>>(
    articles: &[S],
    hours: u32,
    limit: u32,
) -> Result<FeedQuery, CoreError> {
    let titles = to_db_titles(articles)?;
    let window = LookbackWindow::Hours(hours);
    let placeholders = vec!["?"; titles.len()].join(", ");

    let sql = format!(
        "SELECT DISTINCT {REVISION_COLUMNS}
         FROM recentchanges
         WHERE rc_title IN ({placeholders})
         AND rc_type = 0
         AND rc_timestamp >= {bound}
         ORDER BY rc_id DESC
         LIMIT ?",
        bound = window.sql_bound(),
    );

    let mut params: Vec<QueryParam> = titles.into_iter().map(QueryParam::Text).collect();
    bind_window(&mut params, window);
    params.push(QueryParam::UInt(limit));

    Ok(FeedQuery { sql, params })
}

/// Main-namespace edits to members of `category`, filtered on edit time.
pub fn category_member_revisions(category: &str, hours: u32, limit: u32) -> FeedQuery {
    let window = LookbackWindow::Hours(hours);

    let sql = format!(
        "SELECT DISTINCT {REVISION_COLUMNS_RC}
         {CATEGORY_JOIN}
         WHERE cl.cl_to = ?
         AND rc.rc_type = 0
         AND rc.rc_timestamp >= {bound}
         ORDER BY rc.rc_id DESC
         LIMIT ?",
        bound = window.sql_bound(),
    );

    let mut params = Vec::with_capacity(3);
    params.push(QueryParam::Text(to_db_title(category)));
    bind_window(&mut params, window);
    params.push(QueryParam::UInt(limit));

    FeedQuery { sql, params }
}
