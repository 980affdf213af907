//! Per-language connection cache.
//!
//! The registry is owned by the host application and shared by reference
//! (typically behind an `Arc`). Each language code maps to exactly one
//! [`ConnectionEntry`], created on first use and kept until [`close_all`].
//! An entry holds at most one open replica connection.
//!
//! [`close_all`]: ConnectionRegistry::close_all

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::Connection;
use tokio::sync::{MappedMutexGuard, MutexGuard};
use wikifeed_core::naming::LanguageCode;

use crate::config::ReplicaConfig;
use crate::credentials::ReplicaCredentials;
use crate::error::{DbError, DbResult};

/// The replica connection for one language edition.
///
/// The connection is opened by the first [`acquire`](Self::acquire) and
/// reused afterwards. Callers take turns on it.
#[derive(Debug)]
pub struct ConnectionEntry {
    pub lang: LanguageCode,
    pub host: String,
    pub database: String,
    options: MySqlConnectOptions,
    conn: tokio::sync::Mutex<Option<MySqlConnection>>,
}

impl ConnectionEntry {
    /// Lock the entry's connection, opening it if none is open.
    ///
    /// A cached connection that no longer answers a ping is dropped and a new
    /// one opened in its place. A failed connect is returned as
    /// [`DbError::Connection`] with the driver error intact; it is not retried.
    pub async fn acquire(&self) -> DbResult<MappedMutexGuard<'_, MySqlConnection>> {
        let mut slot = self.conn.lock().await;

        let cached = match slot.take() {
            Some(mut conn) => match conn.ping().await {
                Ok(()) => Some(conn),
                Err(err) => {
                    tracing::warn!(lang = %self.lang, error = %err, "Dropping unresponsive replica connection");
                    None
                }
            },
            None => None,
        };

        let conn = match cached {
            Some(conn) => conn,
            None => {
                let conn = MySqlConnection::connect_with(&self.options)
                    .await
                    .map_err(DbError::Connection)?;
                tracing::info!(
                    lang = %self.lang,
                    host = %self.host,
                    database = %self.database,
                    "Connected to replica",
                );
                conn
            }
        };

        Ok(MutexGuard::map(slot, move |slot| slot.insert(conn)))
    }

    /// Whether a connection is currently open (or in use).
    pub fn is_connected(&self) -> bool {
        self.conn
            .try_lock()
            .map(|slot| slot.is_some())
            .unwrap_or(true)
    }

    /// Close the open connection, if any.
    pub async fn close(&self) {
        if let Some(conn) = self.conn.lock().await.take() {
            if let Err(err) = conn.close().await {
                tracing::warn!(lang = %self.lang, error = %err, "Error closing replica connection");
            }
        }
    }
}

#[derive(Debug)]
pub struct ConnectionRegistry {
    config: ReplicaConfig,
    credentials: ReplicaCredentials,
    entries: Mutex<HashMap<LanguageCode, Arc<ConnectionEntry>>>,
}

impl ConnectionRegistry {
    pub fn new(config: ReplicaConfig, credentials: ReplicaCredentials) -> Self {
        Self {
            config,
            credentials,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Build a registry, reading credentials from `config.credentials_file`.
    pub fn from_config(config: ReplicaConfig) -> DbResult<Self> {
        let credentials = ReplicaCredentials::load(&config.credentials_file)?;
        Ok(Self::new(config, credentials))
    }

    pub fn config(&self) -> &ReplicaConfig {
        &self.config
    }

    /// Return the entry for `lang`, creating it if this is the first request.
    ///
    /// No I/O happens here; the connection is opened by the entry's first
    /// [`acquire`](ConnectionEntry::acquire).
    pub fn entry(&self, lang: &LanguageCode) -> Arc<ConnectionEntry> {
        let mut entries = self.lock();
        if let Some(entry) = entries.get(lang) {
            return Arc::clone(entry);
        }

        let entry = Arc::new(self.new_entry(lang));
        tracing::debug!(lang = %lang, host = %entry.host, "Registered replica connection entry");
        entries.insert(lang.clone(), Arc::clone(&entry));
        entry
    }

    /// Number of cached language entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Cached language codes, sorted.
    pub fn languages(&self) -> Vec<LanguageCode> {
        let mut langs: Vec<LanguageCode> = self.lock().keys().cloned().collect();
        langs.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        langs
    }

    /// Run `SELECT 1` on the language's connection, opening it if needed.
    pub async fn health_check(&self, lang: &LanguageCode) -> DbResult<()> {
        let entry = self.entry(lang);
        let mut conn = entry.acquire().await?;
        crate::health_check(&mut *conn).await?;
        Ok(())
    }

    /// Close every cached connection and empty the cache.
    ///
    /// Intended for host shutdown. A later lookup creates a fresh entry.
    pub async fn close_all(&self) {
        let drained: Vec<Arc<ConnectionEntry>> = self.lock().drain().map(|(_, e)| e).collect();
        for entry in drained {
            entry.close().await;
            tracing::info!(lang = %entry.lang, "Closed replica connection entry");
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<LanguageCode, Arc<ConnectionEntry>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn new_entry(&self, lang: &LanguageCode) -> ConnectionEntry {
        let host = self.config.host_for(lang);
        let database = self.config.database_for(lang);

        let options = MySqlConnectOptions::new()
            .host(&host)
            .port(self.config.port)
            .username(&self.credentials.user)
            .password(self.credentials.password())
            .database(&database);

        ConnectionEntry {
            lang: lang.clone(),
            host,
            database,
            options,
            conn: tokio::sync::Mutex::new(None),
        }
    }
}
