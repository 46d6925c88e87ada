//! # pets-store
//!
//! Validated record access for the pets database.
//!
//! ## Core Types
//!
//! - **[`PetStore`]**: Query, insert, update and delete pets; publishes change notifications
//! - **[`Target`]**: `pets` (every pet) or `pets/{id}` (one pet), parsed once at the boundary
//! - **[`PetValues`]**: Partial field set for inserts and updates
//! - **[`QueryOptions`]**: Projection, [`Selection`] filter and sort order for queries
//! - **[`Pet`]** / **[`PetSummary`]**: Typed rows
//!
//! ## Usage
//!
//! ```no_run
//! use pets_store::{Gender, PetStore, PetValues, QueryOptions, Target};
//!
//! #[tokio::main]
//! async fn main() -> pets_store::Result<()> {
//!    let store = PetStore::open("shelter.db", None).await?;
//!
//!    let id = store
//!       .insert(PetValues::new().name("Toto").breed("Terrier").gender(Gender::Male).weight(7))
//!       .await?;
//!
//!    let rows = store.query(Target::ById(id), &QueryOptions::new()).await?;
//!    assert_eq!(rows.len(), 1);
//!
//!    store.delete("pets".parse()?, None).await?;
//!    store.close().await?;
//!    Ok(())
//! }
//! ```

use sqlx::migrate::Migrator;

pub mod contract;
mod decode;
mod error;
mod model;
pub mod query;
mod resource;
mod store;
mod validate;

pub use contract::{Gender, PetColumn};
pub use decode::JsonRow;
pub use error::{Error, Result};
pub use model::{Pet, PetSummary, PetValues};
pub use query::{QueryOptions, Selection, SortDirection, SortKey};
pub use resource::Target;
pub use store::PetStore;

pub use pets_conn_mgr::SqliteDatabaseConfig;
pub use pets_observer::{ChangeBroker, ChangeOperation, ObserverConfig, TableChange, TableChangeEvent, TableChangeStream};

/// Schema migrations for the pets database. Version 1 creates the `pets` table.
pub static MIGRATOR: Migrator = sqlx::migrate!();
