//! SQLite database with a read pool and a single exclusive writer

use std::fs::create_dir_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use tracing::debug;

use crate::config::SqliteDatabaseConfig;
use crate::error::{Error, Result};
use crate::write_guard::WriteGuard;

/// SQLite database with connection pooling for concurrent reads and exclusive writes.
///
/// ## Architecture
///
/// The database maintains two connection pools:
/// - **`read_pool`**: Pool of read-only connections for concurrent reads
/// - **`write_conn`**: Single-connection pool for exclusive write access (enforced by max_connections=1)
///
/// ## State Management
///
/// - **`wal_initialized`**: Tracks whether WAL journal mode has been enabled (lazy initialization)
/// - **`closed`**: Prevents use after the database has been closed
/// - **`path`**: Database file path for cleanup operations
///
/// ## Usage Pattern
///
/// ```text
/// 1. Connect (creates the file on first use)
/// 2. Apply migrations through the writer
/// 3. Read operations: query the read_pool concurrently
/// 4. Write operations: acquire the writer (lazily enables WAL on first call)
/// 5. Close when done
/// ```
#[derive(Debug)]
pub struct SqliteDatabase {
   /// Pool of read-only connections (defaults to max_connections=6) for concurrent reads
   read_pool: Pool<Sqlite>,

   /// Single read-write connection pool (max_connections=1) for serialized writes
   write_conn: Pool<Sqlite>,

   /// Tracks if WAL mode has been initialized (set on first write)
   wal_initialized: AtomicBool,

   /// Marks database as closed to prevent further operations
   closed: AtomicBool,

   /// Path to database file (used for cleanup)
   path: PathBuf,
}

impl SqliteDatabase {
   /// Open the database at `path`, creating the file and any missing parent
   /// directories on first use.
   ///
   /// Each call opens fresh pools; callers share the returned `Arc` instead of
   /// connecting twice to the same file.
   pub async fn connect(
      path: impl AsRef<Path>,
      custom_config: Option<SqliteDatabaseConfig>,
   ) -> Result<Arc<Self>> {
      let config = custom_config.unwrap_or_default();
      let path = path.as_ref().to_path_buf();

      if let Some(parent) = path.parent()
         && !parent.as_os_str().is_empty()
      {
         create_dir_all(parent)?;
      }

      // The writer connects first so the file exists before read-only
      // connections try to open it.
      let write_options = SqliteConnectOptions::new()
         .filename(&path)
         .create_if_missing(true)
         .busy_timeout(config.busy_timeout);

      let write_conn = SqlitePoolOptions::new()
         .max_connections(1)
         .min_connections(0)
         .idle_timeout(Some(config.idle_timeout))
         .connect_with(write_options)
         .await?;

      let read_options = SqliteConnectOptions::new()
         .filename(&path)
         .read_only(true)
         .busy_timeout(config.busy_timeout);

      let read_pool = SqlitePoolOptions::new()
         .max_connections(config.max_read_connections.max(1))
         .min_connections(0)
         .idle_timeout(Some(config.idle_timeout))
         .connect_with(read_options)
         .await?;

      debug!(path = %path.display(), max_read_connections = config.max_read_connections, "Opened database");

      Ok(Arc::new(Self {
         read_pool,
         write_conn,
         wal_initialized: AtomicBool::new(false),
         closed: AtomicBool::new(false),
         path,
      }))
   }

   /// Readable handle: the pool of read-only connections.
   pub fn read_pool(&self) -> Result<&Pool<Sqlite>> {
      self.ensure_open()?;
      Ok(&self.read_pool)
   }

   /// Writable handle: waits for the single write connection and wraps it in
   /// a [`WriteGuard`].
   ///
   /// The first acquisition switches the database to WAL journal mode so
   /// readers keep working while a write is in progress.
   pub async fn acquire_writer(&self) -> Result<WriteGuard> {
      self.ensure_open()?;

      let mut conn = self.write_conn.acquire().await?;

      if !self.wal_initialized.load(Ordering::Acquire) {
         sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&mut *conn)
            .await?;
         self.wal_initialized.store(true, Ordering::Release);
         debug!(path = %self.path.display(), "Enabled WAL journal mode");
      }

      Ok(WriteGuard::new(conn))
   }

   /// Apply any pending migrations through the writer.
   ///
   /// Already-applied migrations are skipped, so calling this on every
   /// startup is safe.
   pub async fn migrate(&self, migrator: &Migrator) -> Result<()> {
      let mut writer = self.acquire_writer().await?;
      migrator.run(&mut *writer).await?;
      debug!(path = %self.path.display(), "Schema migrations applied");
      Ok(())
   }

   /// Path of the underlying database file.
   pub fn path(&self) -> &Path {
      &self.path
   }

   /// Whether [`close`](Self::close) has been called.
   pub fn is_closed(&self) -> bool {
      self.closed.load(Ordering::Acquire)
   }

   /// Close both pools. Any further access fails with [`Error::DatabaseClosed`].
   pub async fn close(&self) -> Result<()> {
      if self.closed.swap(true, Ordering::AcqRel) {
         return Ok(());
      }

      self.read_pool.close().await;
      self.write_conn.close().await;
      debug!(path = %self.path.display(), "Closed database");
      Ok(())
   }

   /// Close the database and delete its file along with the WAL and shared
   /// memory siblings.
   pub async fn remove(&self) -> Result<()> {
      self.close().await?;

      for suffix in ["", "-wal", "-shm"] {
         let mut file = self.path.clone().into_os_string();
         file.push(suffix);
         match std::fs::remove_file(&file) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::Io(e)),
         }
      }

      debug!(path = %self.path.display(), "Removed database files");
      Ok(())
   }

   fn ensure_open(&self) -> Result<()> {
      if self.is_closed() {
         return Err(Error::DatabaseClosed);
      }
      Ok(())
   }
}
