//! Repository for the `recentchanges` feed and its category links.

use sqlx::{Executor, MySql};

use crate::error::DbResult;
use crate::models::recent_change::{CategoryMember, HashtagEdit, RecentRevision};
use crate::queries;

/// Read-only lookups over one language's replica.
///
/// Every method returns rows newest first (descending change id), at most
/// `limit` of them.
pub struct RecentChangeRepo;

impl RecentChangeRepo {
    /// Main-namespace edits whose summary mentions `tag` as a whole word.
    pub async fn hashtag_edits<'c, E>(
        executor: E,
        tag: &str,
        hours: u32,
        limit: u32,
    ) -> DbResult<Vec<HashtagEdit>>
    where
        E: Executor<'c, Database = MySql>,
    {
        let rows = queries::hashtag_edits(tag, hours, limit)
            .fetch_all(executor)
            .await?;
        Ok(rows)
    }

    /// Main-namespace edits whose summary contains any hashtag.
    pub async fn any_hashtag_edits<'c, E>(
        executor: E,
        hours: u32,
        limit: u32,
    ) -> DbResult<Vec<HashtagEdit>>
    where
        E: Executor<'c, Database = MySql>,
    {
        let rows = queries::any_hashtag_edits(hours, limit)
            .fetch_all(executor)
            .await?;
        Ok(rows)
    }

    /// Pages linked into `category` within the window.
    pub async fn category_members<'c, E>(
        executor: E,
        category: &str,
        hours: u32,
        limit: u32,
    ) -> DbResult<Vec<CategoryMember>>
    where
        E: Executor<'c, Database = MySql>,
    {
        let rows = queries::category_members(category, hours, limit)
            .fetch_all(executor)
            .await?;
        Ok(rows)
    }

    /// Recent edits to any of `articles`. An empty list is rejected before
    /// the executor is touched.
    pub async fn article_revisions<'c, E, S>(
        executor: E,
        articles: &[S],
        hours: u32,
        limit: u32,
    ) -> DbResult<Vec<RecentRevision>>
    where
        E: Executor<'c, Database = MySql>,
        S: AsRef<str>,
    {
        let query = queries::article_revisions(articles, hours, limit)?;
        let rows = query.fetch_all(executor).await?;
        Ok(rows)
    }

    /// Recent edits to pages in `category`.
    pub async fn category_member_revisions<'c, E>(
        executor: E,
        category: &str,
        hours: u32,
        limit: u32,
    ) -> DbResult<Vec<RecentRevision>>
    where
        E: Executor<'c, Database = MySql>,
    {
        let rows = queries::category_member_revisions(category, hours, limit)
            .fetch_all(executor)
            .await?;
        Ok(rows)
    }
}
