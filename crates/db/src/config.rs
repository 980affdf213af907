use std::path::PathBuf;

use wikifeed_core::naming::LanguageCode;

use crate::error::DbError;

/// Credentials file name, relative to the home directory.
pub const DEFAULT_CREDENTIALS_FILE: &str = "replica.my.cnf";
pub const DEFAULT_HOST_SUFFIX: &str = "wiki.labsdb";
pub const DEFAULT_DB_SUFFIX: &str = "wiki_p";
pub const DEFAULT_PORT: u16 = 3306;

/// Where the per-language replicas live and how to log in to them.
///
/// Each language edition has its own host and database, both named by
/// appending a fixed suffix to the language code (`en` -> `enwiki.labsdb`,
/// `enwiki_p`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicaConfig {
    /// MySQL option file holding `[client]` `user` and `password`.
    pub credentials_file: PathBuf,
    pub host_suffix: String,
    pub db_suffix: String,
    pub port: u16,
}

impl ReplicaConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default            |
    /// |-----------------------------|--------------------|
    /// | `WIKIFEED_CREDENTIALS_FILE` | `~/replica.my.cnf` |
    /// | `WIKIFEED_HOST_SUFFIX`      | `wiki.labsdb`      |
    /// | `WIKIFEED_DB_SUFFIX`        | `wiki_p`           |
    /// | `WIKIFEED_DB_PORT`          | `3306`             |
    pub fn from_env() -> Result<Self, DbError> {
        Self::from_lookup(|key| std::env::var(key).ok(), dirs::home_dir())
    }

    /// Same as [`from_env`](Self::from_env) but reading from an arbitrary
    /// source. `home_dir` is only needed when no credentials file is given.
    pub fn from_lookup<F>(lookup: F, home_dir: Option<PathBuf>) -> Result<Self, DbError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials_file = match lookup("WIKIFEED_CREDENTIALS_FILE") {
            Some(path) => PathBuf::from(path),
            None => home_dir
                .map(|home| home.join(DEFAULT_CREDENTIALS_FILE))
                .ok_or_else(|| {
                    DbError::Config(
                        "No home directory to find replica.my.cnf in; \
                         set WIKIFEED_CREDENTIALS_FILE"
                            .into(),
                    )
                })?,
        };

        let defaults = Self::new(credentials_file);
        let host_suffix = lookup("WIKIFEED_HOST_SUFFIX").unwrap_or(defaults.host_suffix);
        let db_suffix = lookup("WIKIFEED_DB_SUFFIX").unwrap_or(defaults.db_suffix);

        let port = match lookup("WIKIFEED_DB_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                DbError::Config(format!("WIKIFEED_DB_PORT must be a valid u16, got '{raw}'"))
            })?,
            None => defaults.port,
        };

        Ok(Self {
            credentials_file: defaults.credentials_file,
            host_suffix,
            db_suffix,
            port,
        })
    }

    /// Default replica naming and port, with the given credentials file.
    pub fn new(credentials_file: impl Into<PathBuf>) -> Self {
        Self {
            credentials_file: credentials_file.into(),
            host_suffix: DEFAULT_HOST_SUFFIX.to_string(),
            db_suffix: DEFAULT_DB_SUFFIX.to_string(),
            port: DEFAULT_PORT,
        }
    }

    pub fn host_for(&self, lang: &LanguageCode) -> String {
        format!("{lang}{}", self.host_suffix)
    }

    pub fn database_for(&self, lang: &LanguageCode) -> String {
        format!("{lang}{}", self.db_suffix)
    }
}
