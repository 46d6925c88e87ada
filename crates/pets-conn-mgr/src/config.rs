//! Configuration for the pets database connection pools

use std::time::Duration;

/// Configuration for SqliteDatabase connection pools
///
/// # Examples
///
/// ```
/// use pets_conn_mgr::SqliteDatabaseConfig;
/// use std::time::Duration;
///
/// // Use defaults
/// let config = SqliteDatabaseConfig::default();
///
/// // Override just one field
/// let config = SqliteDatabaseConfig {
///     max_read_connections: 3,
///     ..Default::default()
/// };
/// assert_eq!(config.idle_timeout, Duration::from_secs(30));
/// ```
#[derive(Debug, Clone)]
pub struct SqliteDatabaseConfig {
   /// Maximum number of concurrent read connections
   ///
   /// Default: 6
   pub max_read_connections: u32,

   /// Idle timeout for both read and write connections
   ///
   /// Connections that remain idle for this duration are closed automatically.
   ///
   /// Default: 30 seconds
   pub idle_timeout: Duration,

   /// How long a connection waits on a locked database before failing with `SQLITE_BUSY`
   ///
   /// Default: 5 seconds
   pub busy_timeout: Duration,
}

impl Default for SqliteDatabaseConfig {
   fn default() -> Self {
      Self {
         max_read_connections: 6,
         idle_timeout: Duration::from_secs(30),
         busy_timeout: Duration::from_secs(5),
      }
   }
}
