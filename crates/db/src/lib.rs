//! Read-only access to the per-language recent-changes replicas.
//!
//! [`QueryService`] is the entry point: it resolves a language to its cached
//! connection through a [`ConnectionRegistry`] and runs one of the feed
//! lookups in [`repositories::RecentChangeRepo`].

pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod queries;
pub mod registry;
pub mod repositories;
pub mod service;

pub use config::ReplicaConfig;
pub use credentials::ReplicaCredentials;
pub use error::{DbError, DbResult};
pub use registry::{ConnectionEntry, ConnectionRegistry};
pub use service::QueryService;

/// Verify that the database is reachable.
pub async fn health_check<'c, E>(executor: E) -> Result<(), sqlx::Error>
where
    E: sqlx::Executor<'c, Database = sqlx::MySql>,
{
    sqlx::query("SELECT 1").execute(executor).await?;
    Ok(())
}
