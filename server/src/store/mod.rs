//! Relational storage for user credentials.
//!
//! A `CredentialStore` wraps a single sqlx `Any` connection, so the same code
//! runs against Postgres in production and SQLite in tests. There is no pool:
//! each flow invocation connects, runs its queries and closes.
//!
//! # Usage
//!
//! ```ignore
//! let mut store = CredentialStore::connect(&config).await?;
//! store.insert_user("bob", &password_hash).await?;
//! let rows = store.find_by_field(UserField::Name, "bob").await?;
//! store.close().await;
//! ```

mod config;
mod credentials;
mod error;

pub use config::DatabaseConfig;
pub use credentials::{CredentialStore, USERS_TABLE, UserField, UserRecord};
pub use error::StoreError;
