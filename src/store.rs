//! The prepared-statement capability every store must provide

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::Result;

/// A row snapshot keyed by column name, in column order.
pub type Row = IndexMap<String, JsonValue>;

/// Result returned from effect statements (e.g. INSERT, UPDATE, DELETE, BEGIN).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
   /// The number of rows affected by the statement.
   pub rows_affected: u64,
   /// The last inserted row ID, 0 when the statement inserted nothing.
   pub last_insert_id: i64,
}

/// A handle to a store that can prepare statements.
///
/// Implementations are expected to be cheap handles onto one session: every
/// statement prepared from the same handle (and its clones) must run on the same
/// underlying connection, otherwise transaction brackets are meaningless.
pub trait Database: Send + Sync {
   type Statement: PreparedStatement;

   /// Prepare `query` for execution.
   ///
   /// Engines that prepare lazily report malformed SQL from the executing call.
   fn prepare(&self, query: &str) -> Self::Statement;
}

/// A prepared statement awaiting values and execution.
#[async_trait]
pub trait PreparedStatement: Send + Sized {
   /// Bind positional values to the statement's `?` placeholders, left to right.
   ///
   /// Binding replaces any values bound earlier.
   fn bind(self, values: Vec<JsonValue>) -> Self;

   /// Execute and return the first row, if any.
   async fn first(self) -> Result<Option<Row>>;

   /// Execute and return every row.
   async fn all(self) -> Result<Vec<Row>>;

   /// Execute for effect.
   async fn run(self) -> Result<RunResult>;
}
