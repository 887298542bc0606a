//! Connection settings for the credential store.

use std::time::Duration;

/// How to reach the user table.
///
/// # Invariants
/// - `url` is whatever sqlx's `Any` driver accepts (`postgres://`, `sqlite:`).
/// - Credentials embedded in `url` are never printed by `Debug`.
#[derive(Clone)]
pub struct DatabaseConfig {
    url: String,
    connect_timeout: Duration,
    query_timeout: Duration,
}

impl DatabaseConfig {
    /// Default bound on establishing a connection.
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
    /// Default bound on a single query.
    pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

    /// Use a complete connection URL as-is.
    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            connect_timeout: Self::DEFAULT_CONNECT_TIMEOUT,
            query_timeout: Self::DEFAULT_QUERY_TIMEOUT,
        }
    }

    /// Build a Postgres URL from discrete settings.
    ///
    /// User and password are percent-encoded so that characters such as `@`
    /// or `:` cannot change how the URL is split.
    #[must_use]
    pub fn postgres(host: &str, port: u16, database: &str, user: &str, password: &str) -> Self {
        let url = format!(
            "postgres://{}:{}@{host}:{port}/{}",
            urlencoding::encode(user),
            urlencoding::encode(password),
            urlencoding::encode(database),
        );
        Self::from_url(url)
    }

    /// Replace both timeouts.
    #[must_use]
    pub const fn with_timeouts(mut self, connect_timeout: Duration, query_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self.query_timeout = query_timeout;
        self
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    #[must_use]
    pub const fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// The URL with any password replaced by `***`, for logs.
    #[must_use]
    pub fn redacted_url(&self) -> String {
        let Some(scheme_end) = self.url.find("://") else {
            return self.url.clone();
        };
        let authority_start = scheme_end + 3;
        let rest = &self.url[authority_start..];
        let authority_len = rest.find('/').unwrap_or(rest.len());
        let Some(at) = rest[..authority_len].rfind('@') else {
            return self.url.clone();
        };
        let Some(colon) = rest[..at].find(':') else {
            return self.url.clone();
        };

        format!(
            "{}{}:***{}",
            &self.url[..authority_start],
            &rest[..colon],
            &rest[at..]
        )
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.redacted_url())
            .field("connect_timeout", &self.connect_timeout)
            .field("query_timeout", &self.query_timeout)
            .finish()
    }
}
