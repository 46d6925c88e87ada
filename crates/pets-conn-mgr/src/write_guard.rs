use std::ops::{Deref, DerefMut};

use sqlx::Sqlite;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::SqliteConnection;

/// RAII guard for exclusive write access to the database.
///
/// Wraps the only connection of the write pool. While a guard is alive every
/// other writer waits in [`SqliteDatabase::acquire_writer`](crate::SqliteDatabase::acquire_writer);
/// dropping it returns the connection to the pool.
#[must_use = "if unused, the write lock is immediately released"]
#[derive(Debug)]
pub struct WriteGuard {
   conn: PoolConnection<Sqlite>,
}

impl WriteGuard {
   pub(crate) fn new(conn: PoolConnection<Sqlite>) -> Self {
      Self { conn }
   }
}

impl Deref for WriteGuard {
   type Target = SqliteConnection;

   fn deref(&self) -> &Self::Target {
      &self.conn
   }
}

impl DerefMut for WriteGuard {
   fn deref_mut(&mut self) -> &mut Self::Target {
      &mut self.conn
   }
}
