//! Language-aware entry point over [`RecentChangeRepo`].

use std::sync::Arc;

use wikifeed_core::naming::to_db_titles;
use wikifeed_core::params::FeedParams;

use crate::error::DbResult;
use crate::models::recent_change::{CategoryMember, HashtagEdit, RecentRevision};
use crate::registry::ConnectionRegistry;
use crate::repositories::RecentChangeRepo;

/// Runs feed lookups against the replica for each request's language.
///
/// Cheap to clone; clones share the same registry.
#[derive(Debug, Clone)]
pub struct QueryService {
    registry: Arc<ConnectionRegistry>,
}

impl QueryService {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Edits mentioning `#tag`. The `test` tag looks back fourteen days.
    pub async fn edits_by_hashtag(
        &self,
        tag: &str,
        params: &FeedParams,
    ) -> DbResult<Vec<HashtagEdit>> {
        let entry = self.registry.entry(&params.lang);
        let mut conn = entry.acquire().await?;
        let rows =
            RecentChangeRepo::hashtag_edits(&mut *conn, tag, params.hours, params.limit).await?;
        tracing::debug!(lang = %params.lang, tag, rows = rows.len(), "Fetched hashtag edits");
        Ok(rows)
    }

    /// Edits mentioning any hashtag.
    pub async fn edits_with_any_hashtag(&self, params: &FeedParams) -> DbResult<Vec<HashtagEdit>> {
        let entry = self.registry.entry(&params.lang);
        let mut conn = entry.acquire().await?;
        let rows =
            RecentChangeRepo::any_hashtag_edits(&mut *conn, params.hours, params.limit).await?;
        tracing::debug!(lang = %params.lang, rows = rows.len(), "Fetched any-hashtag edits");
        Ok(rows)
    }

    /// Pages recently linked into `category`.
    pub async fn edits_by_category(
        &self,
        category: &str,
        params: &FeedParams,
    ) -> DbResult<Vec<CategoryMember>> {
        let entry = self.registry.entry(&params.lang);
        let mut conn = entry.acquire().await?;
        let rows =
            RecentChangeRepo::category_members(&mut *conn, category, params.hours, params.limit)
                .await?;
        tracing::debug!(lang = %params.lang, category, rows = rows.len(), "Fetched category members");
        Ok(rows)
    }

    /// Recent revisions of the listed articles. An empty list fails with
    /// [`DbError::Input`](crate::DbError::Input) without opening a connection.
    pub async fn revisions_for_articles<S: AsRef<str>>(
        &self,
        articles: &[S],
        params: &FeedParams,
    ) -> DbResult<Vec<RecentRevision>> {
        let titles = to_db_titles(articles)?;
        let entry = self.registry.entry(&params.lang);
        let mut conn = entry.acquire().await?;
        let rows =
            RecentChangeRepo::article_revisions(&mut *conn, titles.as_slice(), params.hours, params.limit)
                .await?;
        tracing::debug!(
            lang = %params.lang,
            articles = titles.len(),
            rows = rows.len(),
            "Fetched article revisions",
        );
        Ok(rows)
    }

    /// Recent revisions of pages in `category`.
    pub async fn revisions_for_category_members(
        &self,
        category: &str,
        params: &FeedParams,
    ) -> DbResult<Vec<RecentRevision>> {
        let entry = self.registry.entry(&params.lang);
        let mut conn = entry.acquire().await?;
        let rows = RecentChangeRepo::category_member_revisions(
            &mut *conn,
            category,
            params.hours,
            params.limit,
        )
        .await?;
        tracing::debug!(
            lang = %params.lang,
            category,
            rows = rows.len(),
            "Fetched category member revisions",
        );
        Ok(rows)
    }
}
