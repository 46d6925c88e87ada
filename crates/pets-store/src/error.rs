/// Result type alias for pet store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for pet store operations.
///
/// These are pure data-access errors with no Tauri dependencies.
#[derive(Debug, thiserror::Error)]
pub enum Error {
   /// Error from SQLx operations.
   #[error(transparent)]
   Sqlx(#[from] sqlx::Error),

   /// Error from the connection manager.
   #[error(transparent)]
   ConnectionManager(#[from] pets_conn_mgr::Error),

   /// A field value violates the pet constraints (missing name, invalid
   /// gender, non-positive weight).
   #[error("invalid argument: {0}")]
   InvalidArgument(String),

   /// The resource pattern is not `pets` or `pets/{id}`, or the operation is
   /// not supported on it.
   #[error("unknown resource: {0}")]
   UnknownResource(String),

   /// A write that should have changed a row reported no effect.
   #[error("write failed: {0}")]
   WriteFailed(String),

   /// SQLite storage class that cannot be mapped to JSON.
   #[error("unsupported datatype: {0}")]
   UnsupportedDatatype(String),
}

impl Error {
   /// Extract a structured error code from the error type.
   ///
   /// This provides machine-readable error codes for error handling.
   pub fn error_code(&self) -> String {
      match self {
         Error::Sqlx(e) => {
            if let Some(code) = e.as_database_error().and_then(|db_err| db_err.code()) {
               return format!("SQLITE_{}", code);
            }
            "SQLX_ERROR".to_string()
         }
         Error::ConnectionManager(pets_conn_mgr::Error::DatabaseClosed) => {
            "DATABASE_CLOSED".to_string()
         }
         Error::ConnectionManager(_) => "CONNECTION_ERROR".to_string(),
         Error::InvalidArgument(_) => "INVALID_ARGUMENT".to_string(),
         Error::UnknownResource(_) => "UNKNOWN_RESOURCE".to_string(),
         Error::WriteFailed(_) => "WRITE_FAILED".to_string(),
         Error::UnsupportedDatatype(_) => "UNSUPPORTED_DATATYPE".to_string(),
      }
   }
}
