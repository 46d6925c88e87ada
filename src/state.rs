use std::path::{Path, PathBuf};
use std::sync::Arc;

use pets_observer::ChangeBroker;
use pets_store::PetStore;
use tokio::sync::OnceCell;

use crate::{PluginConfig, Result};

/// Pet store managed by the plugin.
///
/// The broker exists from setup so the change forwarder can subscribe
/// before any command runs. The database itself is opened (and migrated)
/// by the first command that needs it.
pub struct PetStoreState {
   path: PathBuf,
   config: PluginConfig,
   broker: Arc<ChangeBroker>,
   store: OnceCell<PetStore>,
}

impl PetStoreState {
   pub fn new(path: impl Into<PathBuf>, config: PluginConfig, broker: Arc<ChangeBroker>) -> Self {
      Self {
         path: path.into(),
         config,
         broker,
         store: OnceCell::new(),
      }
   }

   /// The store, opening the database on first use.
   ///
   /// A failed open is not cached; the next call tries again.
   pub async fn store(&self) -> Result<&PetStore> {
      let store = self
         .store
         .get_or_try_init(|| async {
            log::debug!("Opening pet database at {}", self.path.display());
            PetStore::open_with_broker(
               &self.path,
               Some(self.config.database_config()),
               Arc::clone(&self.broker),
            )
            .await
         })
         .await?;
      Ok(store)
   }

   pub fn broker(&self) -> &Arc<ChangeBroker> {
      &self.broker
   }

   pub fn path(&self) -> &Path {
      &self.path
   }

   pub fn is_open(&self) -> bool {
      self.store.initialized()
   }
}
