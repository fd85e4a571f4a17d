//! [`Database`] implementation over a single sqlx SQLite session

mod bind;
mod decode;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row as _};
use sqlx_sqlite_session::{SqliteSession, SqliteSessionConfig};

use crate::Result;
use crate::store::{Database, PreparedStatement, Row, RunResult};

pub use bind::bind_value;

/// A cloneable handle onto one [`SqliteSession`].
///
/// Clones share the session, so a clone handed to a unit of work inside
/// [`run_in_transaction`](crate::run_in_transaction) runs on the same connection as
/// the `BEGIN` and `COMMIT`.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> Result<(), sqlite_record::Error> {
/// use sqlite_record::SqliteStore;
/// use std::path::Path;
///
/// let store = SqliteStore::open(Path::new("/tmp/app.db"), None).await?;
/// store.close().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SqliteStore {
   session: Arc<SqliteSession>,
}

impl SqliteStore {
   /// Open a store on the database file at `path`.
   pub async fn open(path: &Path, custom_config: Option<SqliteSessionConfig>) -> Result<Self> {
      let session = SqliteSession::open(path, custom_config).await?;
      Ok(Self::from_session(session))
   }

   /// Open a store on a private in-memory database.
   pub async fn open_in_memory(custom_config: Option<SqliteSessionConfig>) -> Result<Self> {
      let session = SqliteSession::open_in_memory(custom_config).await?;
      Ok(Self::from_session(session))
   }

   pub fn from_session(session: Arc<SqliteSession>) -> Self {
      Self { session }
   }

   pub fn session(&self) -> &Arc<SqliteSession> {
      &self.session
   }

   /// Execute a batch of semicolon-separated statements without bound values,
   /// e.g. DDL produced by [`TableSchema::create_table_sql`](crate::TableSchema::create_table_sql).
   pub async fn execute_batch(&self, sql: &str) -> Result<()> {
      let mut conn = self.session.acquire().await?;
      sqlx::raw_sql(sql).execute(&mut *conn).await?;
      Ok(())
   }

   /// Close the underlying session for every clone of this store.
   pub async fn close(self) -> Result<()> {
      self.session.close().await?;
      Ok(())
   }
}

impl Database for SqliteStore {
   type Statement = SqliteStatement;

   fn prepare(&self, query: &str) -> SqliteStatement {
      SqliteStatement {
         session: Arc::clone(&self.session),
         query: query.to_string(),
         values: Vec::new(),
      }
   }
}

/// A statement prepared against a [`SqliteStore`].
///
/// sqlx prepares lazily, so malformed SQL is reported when the statement runs.
#[derive(Debug)]
pub struct SqliteStatement {
   session: Arc<SqliteSession>,
   query: String,
   values: Vec<JsonValue>,
}

#[async_trait]
impl PreparedStatement for SqliteStatement {
   fn bind(mut self, values: Vec<JsonValue>) -> Self {
      self.values = values;
      self
   }

   async fn first(self) -> Result<Option<Row>> {
      let mut conn = self.session.acquire().await?;
      let mut q = sqlx::query(&self.query);
      for value in self.values {
         q = bind_value(q, value);
      }

      match q.fetch_optional(&mut *conn).await? {
         Some(row) => Ok(Some(decode_row(&row)?)),
         None => Ok(None),
      }
   }

   async fn all(self) -> Result<Vec<Row>> {
      let mut conn = self.session.acquire().await?;
      let mut q = sqlx::query(&self.query);
      for value in self.values {
         q = bind_value(q, value);
      }

      let rows = q.fetch_all(&mut *conn).await?;
      rows.iter().map(decode_row).collect()
   }

   async fn run(self) -> Result<RunResult> {
      let mut conn = self.session.acquire().await?;
      let mut q = sqlx::query(&self.query);
      for value in self.values {
         q = bind_value(q, value);
      }

      let result = q.execute(&mut *conn).await?;
      Ok(RunResult {
         rows_affected: result.rows_affected(),
         last_insert_id: result.last_insert_rowid(),
      })
   }
}

fn decode_row(row: &SqliteRow) -> Result<Row> {
   let mut decoded = Row::with_capacity(row.columns().len());
   for (i, column) in row.columns().iter().enumerate() {
      let value = decode::to_json(row.try_get_raw(i)?)?;
      decoded.insert(column.name().to_string(), value);
   }
   Ok(decoded)
}
