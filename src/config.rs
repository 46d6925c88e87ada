use std::time::Duration;

use pets_conn_mgr::SqliteDatabaseConfig;
use pets_observer::ObserverConfig;
use pets_store::contract::DATABASE_NAME;
use serde::Deserialize;

/// Plugin configuration, read from `plugins.pets` in the Tauri config.
///
/// Every field is optional; unset pool and channel settings fall back to
/// the library defaults.
///
/// ```json
/// {
///   "plugins": {
///     "pets": { "database": "shelter.db", "maxReadConnections": 4 }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginConfig {
   /// Database file name, relative to the app config directory.
   pub database: String,
   pub max_read_connections: Option<u32>,
   pub idle_timeout_secs: Option<u64>,
   pub channel_capacity: Option<usize>,
}

impl Default for PluginConfig {
   fn default() -> Self {
      Self {
         database: DATABASE_NAME.to_string(),
         max_read_connections: None,
         idle_timeout_secs: None,
         channel_capacity: None,
      }
   }
}

impl PluginConfig {
   pub fn database_config(&self) -> SqliteDatabaseConfig {
      let defaults = SqliteDatabaseConfig::default();
      SqliteDatabaseConfig {
         max_read_connections: self
            .max_read_connections
            .unwrap_or(defaults.max_read_connections),
         idle_timeout: self
            .idle_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.idle_timeout),
         ..defaults
      }
   }

   pub fn observer_config(&self) -> ObserverConfig {
      let config = ObserverConfig::new();
      match self.channel_capacity {
         Some(capacity) => config.with_channel_capacity(capacity),
         None => config,
      }
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use serde_json::json;

   #[test]
   fn test_defaults() {
      let config: PluginConfig = serde_json::from_value(json!({})).unwrap();
      assert_eq!(config, PluginConfig::default());
      assert_eq!(config.database, "shelter.db");

      let db = config.database_config();
      assert_eq!(db.max_read_connections, 6);
      assert_eq!(db.idle_timeout, Duration::from_secs(30));
      assert_eq!(config.observer_config().channel_capacity, 256);
   }

   #[test]
   fn test_overrides() {
      let config: PluginConfig = serde_json::from_value(json!({
         "database": "pets/test.db",
         "maxReadConnections": 2,
         "idleTimeoutSecs": 90,
         "channelCapacity": 16
      }))
      .unwrap();

      assert_eq!(config.database, "pets/test.db");

      let db = config.database_config();
      assert_eq!(db.max_read_connections, 2);
      assert_eq!(db.idle_timeout, Duration::from_secs(90));
      assert_eq!(db.busy_timeout, Duration::from_secs(5));
      assert_eq!(config.observer_config().channel_capacity, 16);
   }
}
