use sqlx::mysql::MySqlDatabaseError;
use wikifeed_core::error::CoreError;

/// MySQL server errors raised while establishing a session rather than
/// running a statement: access denied for database (1044), access denied
/// for user (1045), unknown database (1049).
const CONNECT_ERROR_NUMBERS: &[u16] = &[1044, 1045, 1049];

/// Failure surfaced by every replica lookup.
///
/// The driver diagnostic is kept as the source. Nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Caller input rejected before any I/O.
    #[error(transparent)]
    Input(#[from] CoreError),

    /// Could not reach or authenticate against the replica.
    #[error("Replica connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// The statement failed or its rows could not be decoded.
    #[error("Replica query error: {0}")]
    Query(#[source] sqlx::Error),

    /// Credentials file or environment is unusable.
    #[error("Replica configuration error: {0}")]
    Config(String),
}

pub type DbResult<T> = Result<T, DbError>;

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if is_connection_error(&err) {
            DbError::Connection(err)
        } else {
            DbError::Query(err)
        }
    }
}

fn is_connection_error(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::Configuration(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => true,
        sqlx::Error::Database(db_err) => db_err
            .try_downcast_ref::<MySqlDatabaseError>()
            .is_some_and(|e| CONNECT_ERROR_NUMBERS.contains(&e.number())),
        _ => false,
    }
}
