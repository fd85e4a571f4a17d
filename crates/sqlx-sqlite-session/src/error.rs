//! Error types for sqlx-sqlite-session

use thiserror::Error;

/// Errors that may occur when working with a session
#[derive(Error, Debug)]
pub enum Error {
   /// IO error when accessing database files
   #[error("IO error: {0}")]
   Io(#[from] std::io::Error),

   /// Error from the sqlx library
   #[error("Sqlx error: {0}")]
   Sqlx(#[from] sqlx::Error),

   /// Session has been closed and cannot be used
   #[error("Session has been closed")]
   SessionClosed,
}
