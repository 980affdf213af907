//! Reader for the MySQL option file that holds replica credentials.
//!
//! Only the `[client]` section's `user` and `password` are used. Lines may
//! be `key = value` or `key=value`, values may be wrapped in single or double
//! quotes, and `#` / `;` start a comment line.

use std::fmt;
use std::path::Path;

use crate::error::DbError;

const CLIENT_SECTION: &str = "client";

#[derive(Clone, PartialEq, Eq)]
pub struct ReplicaCredentials {
    pub user: String,
    password: String,
}

impl ReplicaCredentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Read and parse the option file at `path`.
    pub fn load(path: &Path) -> Result<Self, DbError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            DbError::Config(format!(
                "Cannot read credentials file {}: {e}",
                path.display()
            ))
        })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, DbError> {
        let mut section = String::new();
        let mut user = None;
        let mut password = None;

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(['#', ';', '!']) {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                section = name.trim().to_ascii_lowercase();
                continue;
            }
            if section != CLIENT_SECTION {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = unquote(value.trim()).to_string();
            match key.trim() {
                "user" => user = Some(value),
                "password" => password = Some(value),
                _ => {}
            }
        }

        match (user, password) {
            (Some(user), Some(password)) => Ok(Self { user, password }),
            (None, _) => Err(DbError::Config(
                "Credentials file has no [client] user".into(),
            )),
            (_, None) => Err(DbError::Config(
                "Credentials file has no [client] password".into(),
            )),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for ReplicaCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplicaCredentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['\'', '"'] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
