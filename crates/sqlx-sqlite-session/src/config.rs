//! Configuration for a SQLite session connection

use serde::{Deserialize, Serialize};

/// Settings applied to the session's connection when it is opened
///
/// # Examples
///
/// ```
/// use sqlx_sqlite_session::SqliteSessionConfig;
///
/// let config = SqliteSessionConfig {
///     busy_timeout_secs: 10,
///     ..Default::default()
/// };
/// assert!(config.create_if_missing);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqliteSessionConfig {
   /// Create the database file if it does not exist yet
   ///
   /// Default: true
   pub create_if_missing: bool,

   /// How long a statement waits on a locked database before failing (in seconds)
   ///
   /// Default: 5
   pub busy_timeout_secs: u64,

   /// Enforce `FOREIGN KEY` constraints on this connection
   ///
   /// Default: true
   pub foreign_keys: bool,
}

impl Default for SqliteSessionConfig {
   fn default() -> Self {
      Self {
         create_if_missing: true,
         busy_timeout_secs: 5,
         foreign_keys: true,
      }
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_partial_config_fills_defaults() {
      let config: SqliteSessionConfig =
         serde_json::from_str(r#"{"busy_timeout_secs": 1}"#).unwrap();
      assert_eq!(config.busy_timeout_secs, 1);
      assert!(config.create_if_missing);
      assert!(config.foreign_keys);
   }
}
