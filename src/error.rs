/// Result type alias for record operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for record and transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
   /// Error from SQLx operations.
   #[error(transparent)]
   Sqlx(#[from] sqlx::Error),

   /// Error from the session holding the connection.
   #[error(transparent)]
   Session(#[from] sqlx_sqlite_session::Error),

   /// A create or update payload had no fields to write.
   #[error("{operation} on {table} requires at least one field")]
   EmptyPayload {
      table: String,
      operation: &'static str,
   },

   /// A payload type did not serialize to a set of named fields.
   #[error("{operation} payload for {table} must serialize to named fields, got {kind}")]
   PayloadNotFields {
      table: String,
      operation: &'static str,
      kind: &'static str,
   },

   /// The store acknowledged an insert without reporting the created row.
   #[error("insert into {0} did not return the created row")]
   MissingCreatedRow(String),

   /// A payload or row could not be mapped to or from the record types.
   #[error("mapping failed: {0}")]
   Mapping(#[from] serde_json::Error),

   /// SQLite type that cannot be mapped to JSON.
   #[error("unsupported datatype: {0}")]
   UnsupportedDatatype(String),

   /// Error reported by a store that is not backed by SQLx.
   #[error("{0}")]
   Other(String),
}

impl Error {
   /// Extract a structured error code from the error type.
   ///
   /// This provides machine-readable error codes for error handling.
   pub fn error_code(&self) -> String {
      match self {
         Error::Sqlx(e) => {
            if let Some(code) = e.as_database_error().and_then(|db_err| db_err.code()) {
               return format!("SQLITE_{code}");
            }
            "SQLX_ERROR".to_string()
         }
         Error::Session(sqlx_sqlite_session::Error::SessionClosed) => "SESSION_CLOSED".to_string(),
         Error::Session(_) => "SESSION_ERROR".to_string(),
         Error::EmptyPayload { .. } => "EMPTY_PAYLOAD".to_string(),
         Error::PayloadNotFields { .. } => "PAYLOAD_NOT_FIELDS".to_string(),
         Error::MissingCreatedRow(_) => "MISSING_CREATED_ROW".to_string(),
         Error::Mapping(_) => "MAPPING_ERROR".to_string(),
         Error::UnsupportedDatatype(_) => "UNSUPPORTED_DATATYPE".to_string(),
         Error::Other(_) => "ERROR".to_string(),
      }
   }

   /// Returns true for caller mistakes that are detected before the store is touched.
   pub fn is_usage_error(&self) -> bool {
      matches!(
         self,
         Error::EmptyPayload { .. } | Error::PayloadNotFields { .. }
      )
   }
}
