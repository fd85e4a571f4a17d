//! A single pinned SQLite connection

use crate::Result;
use crate::config::SqliteSessionConfig;
use crate::error::Error;
use crate::guard::SessionGuard;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

const MEMORY_PATH: &str = ":memory:";

/// One SQLite connection shared by every statement issued through it.
///
/// Callers take turns on the connection via [`acquire`](Self::acquire). Because the
/// connection never changes, statements that bracket a transaction (`BEGIN`, work,
/// `COMMIT`/`ROLLBACK`) are guaranteed to land on the same SQLite session. Sessions
/// are not a pool: concurrent units of work that each need their own transaction
/// must open their own session.
///
/// # Example
///
/// ```no_run
/// use sqlx_sqlite_session::SqliteSession;
///
/// # async fn example() -> Result<(), sqlx_sqlite_session::Error> {
/// let session = SqliteSession::open_in_memory(None).await?;
/// let mut conn = session.acquire().await?;
/// sqlx::query("CREATE TABLE t (id INTEGER PRIMARY KEY)")
///     .execute(&mut *conn)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SqliteSession {
   /// `None` once the session has been closed
   conn: Mutex<Option<SqliteConnection>>,

   /// Path to database file, `:memory:` for in-memory sessions
   path: PathBuf,
}

impl SqliteSession {
   /// Open a session on the database file at `path`
   ///
   /// # Arguments
   ///
   /// * `path` - Path to the SQLite database file
   /// * `custom_config` - Optional connection settings. Pass `None` to use defaults
   ///   (create the file if missing, 5 second busy timeout, foreign keys enforced).
   pub async fn open(
      path: impl AsRef<Path>,
      custom_config: Option<SqliteSessionConfig>,
   ) -> Result<Arc<Self>> {
      let path = path.as_ref();

      if path.as_os_str().is_empty() {
         return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Database path cannot be empty",
         )));
      }

      let config = custom_config.unwrap_or_default();
      let options = apply_config(SqliteConnectOptions::new().filename(path), &config)
         .create_if_missing(config.create_if_missing);

      Self::connect_with(options, path.to_path_buf()).await
   }

   /// Open a session on a private in-memory database
   ///
   /// The database lives exactly as long as the session's connection.
   pub async fn open_in_memory(custom_config: Option<SqliteSessionConfig>) -> Result<Arc<Self>> {
      let config = custom_config.unwrap_or_default();
      let options = apply_config(SqliteConnectOptions::from_str("sqlite::memory:")?, &config);

      Self::connect_with(options, PathBuf::from(MEMORY_PATH)).await
   }

   async fn connect_with(options: SqliteConnectOptions, path: PathBuf) -> Result<Arc<Self>> {
      let conn = options.connect().await?;
      debug!("Opened SQLite session: {}", path.display());

      Ok(Arc::new(Self {
         conn: Mutex::new(Some(conn)),
         path,
      }))
   }

   /// Wait for exclusive use of the connection
   ///
   /// Returns [`Error::SessionClosed`] if [`close`](Self::close) has already run.
   pub async fn acquire(&self) -> Result<SessionGuard<'_>> {
      let guard = self.conn.lock().await;
      let conn = MutexGuard::try_map(guard, Option::as_mut).map_err(|_| Error::SessionClosed)?;
      Ok(SessionGuard::new(conn))
   }

   /// Path of the database file backing this session
   pub fn path(&self) -> &Path {
      &self.path
   }

   /// Returns true once [`close`](Self::close) has completed
   pub async fn is_closed(&self) -> bool {
      self.conn.lock().await.is_none()
   }

   /// Close the connection
   ///
   /// Closing an already-closed session is a no-op. Any transaction still open on
   /// the connection is rolled back by SQLite.
   pub async fn close(&self) -> Result<()> {
      let conn = self.conn.lock().await.take();
      if let Some(conn) = conn {
         conn.close().await?;
         debug!("Closed SQLite session: {}", self.path.display());
      }
      Ok(())
   }
}

fn apply_config(options: SqliteConnectOptions, config: &SqliteSessionConfig) -> SqliteConnectOptions {
   options
      .busy_timeout(Duration::from_secs(config.busy_timeout_secs))
      .foreign_keys(config.foreign_keys)
}
