//! Error types for pets-conn-mgr

use thiserror::Error;

/// Errors that may occur when opening or using the pets database
#[derive(Error, Debug)]
pub enum Error {
   /// IO error when accessing database files. Standard library IO errors
   /// are converted to this variant.
   #[error("IO error: {0}")]
   Io(#[from] std::io::Error),

   /// Error from the sqlx library. Standard sqlx errors are converted to this variant
   #[error("Sqlx error: {0}")]
   Sqlx(#[from] sqlx::Error),

   /// A schema migration failed to apply
   #[error("Migration error: {0}")]
   Migrate(#[from] sqlx::migrate::MigrateError),

   /// Database has been closed and cannot be used
   #[error("Database has been closed")]
   DatabaseClosed,
}

/// A type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
