//! # sqlx-sqlite-session
//!
//! A minimal wrapper around SQLx that owns exactly one SQLite connection.
//!
//! ## Core Types
//!
//! - **[`SqliteSession`]**: A single pinned read-write connection
//! - **[`SqliteSessionConfig`]**: Connection settings applied when the session opens
//! - **[`SessionGuard`]**: Exclusive access to the connection for one statement
//! - **[`Error`]**: Error type for session operations
//!
//! Every statement issued through a session runs on the same underlying connection,
//! so a `BEGIN` followed by other statements and a `COMMIT` or `ROLLBACK` forms one
//! transaction. There is no pooling.
//!
//! ## Usage
//!
//! ```no_run
//! use sqlx_sqlite_session::SqliteSession;
//!
//! #[tokio::main]
//! async fn main() -> sqlx_sqlite_session::Result<()> {
//!     let session = SqliteSession::open("example.db", None).await?;
//!
//!     {
//!         let mut conn = session.acquire().await?;
//!         sqlx::query("INSERT INTO users (name) VALUES (?)")
//!             .bind("Alice")
//!             .execute(&mut *conn)
//!             .await?;
//!     }
//!
//!     session.close().await?;
//!     Ok(())
//! }
//! ```
mod config;
mod error;
mod guard;
mod session;

pub use config::SqliteSessionConfig;
pub use error::Error;
pub use guard::SessionGuard;
pub use session::SqliteSession;

/// A type alias for Results with our custom Error type
pub type Result<T> = std::result::Result<T, Error>;
