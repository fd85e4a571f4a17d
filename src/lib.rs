//! Table-bound query builders and transaction brackets for SQLite.
//!
//! This crate sits on top of a single pinned connection (`sqlx-sqlite-session`)
//! and provides:
//!
//! - [`Model`]: a query builder bound to one table, with chained filters,
//!   ordering and pagination plus create/find/update/delete by primary key
//! - [`run_in_transaction`]: runs a unit of work between `BEGIN` and `COMMIT`,
//!   rolling back on failure without masking the original error
//! - [`Database`]/[`PreparedStatement`]: the narrow store capability both rely on,
//!   implemented for SQLite by [`SqliteStore`]
//! - [`TableSchema`]: typed field sets and their `CREATE TABLE` text
//!
//! # Example
//!
//! ```no_run
//! use serde::{Deserialize, Serialize};
//! use sqlite_record::{Model, Record, SqliteStore, run_in_transaction};
//!
//! #[derive(Debug, Deserialize)]
//! struct User {
//!    id: i64,
//!    name: String,
//!    email: String,
//! }
//!
//! #[derive(Serialize)]
//! struct NewUser {
//!    name: String,
//!    email: String,
//! }
//!
//! #[derive(Serialize, Default)]
//! struct UserChanges {
//!    #[serde(skip_serializing_if = "Option::is_none")]
//!    name: Option<String>,
//!    #[serde(skip_serializing_if = "Option::is_none")]
//!    email: Option<String>,
//! }
//!
//! impl Record for User {
//!    type Create = NewUser;
//!    type Update = UserChanges;
//! }
//!
//! # async fn example() -> Result<(), sqlite_record::Error> {
//! let store = SqliteStore::open_in_memory(None).await?;
//! let mut users: Model<_, User> = Model::new("users", store.clone());
//!
//! let ada = users
//!    .create(&NewUser { name: "Ada".into(), email: "ada@example.com".into() })
//!    .await?;
//!
//! let recent = users.order_by("id DESC").limit(10).all().await?;
//!
//! run_in_transaction(&store, |tx| async move {
//!    let mut users: Model<_, User> = Model::new("users", tx);
//!    users
//!       .update(ada.id, &UserChanges { name: Some("Ada L.".into()), ..Default::default() })
//!       .await
//! })
//! .await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod int_bool;
pub mod model;
mod payload;
pub mod query;
pub mod schema;
pub mod sqlite;
pub mod store;
pub mod transaction;

pub use error::{Error, Result};
pub use model::{Model, NO_PARAMS, Record};
pub use query::{CompiledQuery, Condition, PendingQuery};
pub use schema::{FieldSpec, FieldType, TableSchema, table_name_for};
pub use sqlite::{SqliteStatement, SqliteStore, bind_value};
pub use store::{Database, PreparedStatement, Row, RunResult};
pub use transaction::run_in_transaction;

// Re-export commonly used types from dependencies
pub use sqlx_sqlite_session::{SqliteSession, SqliteSessionConfig};
