//! BEGIN/COMMIT/ROLLBACK bracket around a caller-supplied unit of work

use std::future::Future;

use tracing::{debug, error};

use crate::store::{Database, PreparedStatement};
use crate::{Error, Result};

async fn exec<D: Database>(db: &D, sql: &str) -> Result<()> {
   db.prepare(sql).run().await?;
   Ok(())
}

/// Attempt a rollback whose failure must not replace the error being returned.
async fn rollback_quietly<D: Database>(db: &D, cause: &str) {
   match exec(db, "ROLLBACK").await {
      Ok(()) => debug!("Transaction rolled back after {}", cause),
      Err(rollback_err) => {
         error!("ROLLBACK failed after {}: {}", cause, rollback_err)
      }
   }
}

/// Run `work` between `BEGIN` and `COMMIT` on `db`.
///
/// `work` receives a clone of `db`; the handle must represent a single session so
/// that every statement lands inside the bracket.
///
/// - `BEGIN` fails: that error is returned and nothing else is issued.
/// - `work` fails: `ROLLBACK` is attempted and `work`'s error is returned.
/// - `COMMIT` fails: `ROLLBACK` is attempted and the commit error is returned.
///
/// A failed rollback is logged and never returned in place of the error that
/// caused it.
///
/// # Example
///
/// ```no_run
/// # use sqlite_record::{Model, Row, SqliteStore, run_in_transaction};
/// # async fn example(store: SqliteStore, id: i64) -> sqlite_record::Result<()> {
/// run_in_transaction(&store, |tx| async move {
///    let mut users: Model<_, Row> = Model::new("users", tx);
///    users.delete(id).await?;
///    Ok::<_, sqlite_record::Error>(())
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_in_transaction<D, F, Fut, T, E>(db: &D, work: F) -> std::result::Result<T, E>
where
   D: Database + Clone,
   F: FnOnce(D) -> Fut,
   Fut: Future<Output = std::result::Result<T, E>>,
   E: From<Error>,
{
   exec(db, "BEGIN").await?;
   debug!("Transaction started");

   let value = match work(db.clone()).await {
      Ok(value) => value,
      Err(work_err) => {
         rollback_quietly(db, "unit of work failure").await;
         return Err(work_err);
      }
   };

   if let Err(commit_err) = exec(db, "COMMIT").await {
      rollback_quietly(db, "COMMIT failure").await;
      return Err(commit_err.into());
   }

   debug!("Transaction committed");
   Ok(value)
}
