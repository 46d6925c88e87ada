use std::path::PathBuf;

use pets_observer::ChangeBroker;
use pets_store::contract::TABLE_NAME;
use tauri::plugin::{Builder as PluginBuilder, TauriPlugin};
use tauri::{AppHandle, Manager, Runtime};

mod commands;
mod config;
mod error;
mod events;
mod state;

pub use config::PluginConfig;
pub use error::{Error, Result};
pub use events::{CHANGE_EVENT, ChangePayload};
pub use state::PetStoreState;

/// Builder for the pets plugin.
///
/// The plugin exposes the `query`, `insert`, `update` and `delete` commands
/// and emits [`CHANGE_EVENT`] after every committed mutation.
///
/// # Example
///
/// ```ignore
/// use tauri_plugin_pets::Builder;
///
/// // In your Tauri app setup:
/// tauri::Builder::default()
///     .plugin(Builder::new().build())
///     .run(tauri::generate_context!())
///     .expect("error while running tauri application");
/// ```
#[derive(Default)]
pub struct Builder;

impl Builder {
   /// Create a new builder instance.
   pub fn new() -> Self {
      Self
   }

   /// Build the plugin with command registration and state management.
   pub fn build<R: Runtime>(self) -> TauriPlugin<R, Option<PluginConfig>> {
      PluginBuilder::<R, Option<PluginConfig>>::new("pets")
         .invoke_handler(tauri::generate_handler![
            commands::query,
            commands::insert,
            commands::update,
            commands::delete,
         ])
         .setup(|app, api| {
            let config = api.config().clone().unwrap_or_default();
            let path = resolve_database_path(&config.database, app)?;

            let broker = ChangeBroker::new(config.observer_config());
            let changes = broker.subscribe_stream([TABLE_NAME]);
            tauri::async_runtime::spawn(events::forward_changes(app.clone(), changes));

            log::debug!("Pet database will be opened at {}", path.display());
            app.manage(PetStoreState::new(path, config, broker));
            Ok(())
         })
         .build()
   }
}

/// Initializes the plugin with default configuration.
pub fn init<R: Runtime>() -> TauriPlugin<R, Option<PluginConfig>> {
   Builder::new().build()
}

/// Resolve `database` relative to the app config directory.
fn resolve_database_path<R: Runtime>(database: &str, app: &AppHandle<R>) -> Result<PathBuf> {
   let app_path = app.path().app_config_dir()?;
   Ok(app_path.join(database))
}
