//! SessionGuard for exclusive use of the session connection

use sqlx::sqlite::SqliteConnection;
use std::ops::{Deref, DerefMut};
use tokio::sync::MappedMutexGuard;

/// RAII guard for exclusive access to the session's connection
///
/// The guard derefs to `SqliteConnection` allowing direct use with sqlx queries.
/// The connection is released for the next statement when the guard is dropped.
#[derive(Debug)]
pub struct SessionGuard<'a> {
   conn: MappedMutexGuard<'a, SqliteConnection>,
}

impl<'a> SessionGuard<'a> {
   pub(crate) fn new(conn: MappedMutexGuard<'a, SqliteConnection>) -> Self {
      Self { conn }
   }
}

impl Deref for SessionGuard<'_> {
   type Target = SqliteConnection;

   fn deref(&self) -> &Self::Target {
      &self.conn
   }
}

impl DerefMut for SessionGuard<'_> {
   fn deref_mut(&mut self) -> &mut Self::Target {
      &mut self.conn
   }
}
