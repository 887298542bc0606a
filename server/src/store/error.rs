/// Error returned by credential store operations.
#[derive(Debug)]
pub enum StoreError {
    /// The database could not be reached, or connecting timed out.
    Connection(String),
    /// A query failed or timed out.
    Persistence(String),
    /// An insert hit the unique constraint on the user name.
    Duplicate(String),
    /// The store was used after `close()`.
    NotConnected,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection(reason) => write!(f, "failed to connect to database: {reason}"),
            Self::Persistence(reason) => write!(f, "query failed: {reason}"),
            Self::Duplicate(reason) => write!(f, "duplicate user: {reason}"),
            Self::NotConnected => write!(f, "credential store used after close"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::Duplicate(db.message().to_string())
            }
            _ => Self::Persistence(error.to_string()),
        }
    }
}
