use std::path::Path;
use std::sync::Arc;

use pets_conn_mgr::{SqliteDatabase, SqliteDatabaseConfig};
use pets_observer::{ChangeBroker, ChangeOperation, ObserverConfig, TableChange, TableChangeStream};
use sqlx::FromRow;
use tracing::{debug, error};

use crate::contract::{PetColumn, TABLE_NAME};
use crate::decode::{JsonRow, decode_rows};
use crate::model::{Pet, PetSummary, PetValues};
use crate::query::{
   QueryOptions, Selection, SortKey, Statement, build_delete, build_insert, build_select,
   build_update,
};
use crate::resource::Target;
use crate::validate::{validate_insert, validate_update};
use crate::{Error, MIGRATOR, Result};

/// Record access for the `pets` table.
///
/// Validates writes, maps a [`Target`] to SQL, and publishes a
/// [`TableChange`] after every mutation that affected at least one row.
/// Cloning is cheap; clones share the database and the broker.
#[derive(Clone)]
pub struct PetStore {
   db: Arc<SqliteDatabase>,
   broker: Arc<ChangeBroker>,
}

impl PetStore {
   /// Wrap an open database. The broker starts observing the pets table.
   ///
   /// The schema is not touched; call [`migrate`](Self::migrate) or use
   /// [`open`](Self::open) to create it.
   pub fn new(db: Arc<SqliteDatabase>, broker: Arc<ChangeBroker>) -> Self {
      broker.observe_tables([TABLE_NAME]);
      Self { db, broker }
   }

   /// Connect to the database at `path` and bring its schema up to date.
   pub async fn open(path: impl AsRef<Path>, config: Option<SqliteDatabaseConfig>) -> Result<Self> {
      Self::open_with_broker(path, config, ChangeBroker::new(ObserverConfig::new())).await
   }

   /// Like [`open`](Self::open), publishing changes to an existing broker.
   pub async fn open_with_broker(
      path: impl AsRef<Path>,
      config: Option<SqliteDatabaseConfig>,
      broker: Arc<ChangeBroker>,
   ) -> Result<Self> {
      let db = SqliteDatabase::connect(path, config).await?;
      let store = Self::new(db, broker);
      store.migrate().await?;
      Ok(store)
   }

   /// Create the pets table if this is a fresh database.
   pub async fn migrate(&self) -> Result<()> {
      self.db.migrate(&MIGRATOR).await?;
      Ok(())
   }

   /// Rows matching `target` and `options`, decoded column by column.
   pub async fn query(&self, target: Target, options: &QueryOptions) -> Result<Vec<JsonRow>> {
      let stmt = build_select(target, options);
      let rows = stmt.query().fetch_all(self.db.read_pool()?).await?;
      decode_rows(rows)
   }

   /// Pets matching `options`. The projection is ignored; all columns are read.
   pub async fn list(&self, options: &QueryOptions) -> Result<Vec<Pet>> {
      let options = QueryOptions {
         projection: Vec::new(),
         ..options.clone()
      };
      self.fetch_typed(Target::All, &options).await
   }

   pub async fn get(&self, id: i64) -> Result<Option<Pet>> {
      let mut pets: Vec<Pet> = self
         .fetch_typed(Target::ById(id), &QueryOptions::new())
         .await?;
      Ok(pets.pop())
   }

   /// Id, name and breed of every pet, in id order.
   pub async fn list_summaries(&self) -> Result<Vec<PetSummary>> {
      let options = QueryOptions::new()
         .projection([PetColumn::Id, PetColumn::Name, PetColumn::Breed])
         .sort_by(SortKey::asc(PetColumn::Id));
      self.fetch_typed(Target::All, &options).await
   }

   /// Validate and insert a new pet, returning its id.
   pub async fn insert(&self, values: PetValues) -> Result<i64> {
      let assignments = validate_insert(&values)?;
      let stmt = build_insert(assignments);

      let mut writer = self.db.acquire_writer().await?;
      let result = stmt.query().execute(&mut *writer).await?;
      drop(writer);

      if result.rows_affected() == 0 {
         error!(resource = %Target::All, "Failed to insert pet row");
         return Err(Error::WriteFailed(format!("no row inserted into {}", Target::All)));
      }

      let id = result.last_insert_rowid();
      debug!(id, "Inserted pet");
      self.notify(ChangeOperation::Insert, Some(id), 1);
      Ok(id)
   }

   /// Apply the present fields of `values` to the rows matching `target`
   /// (and `selection`), returning how many rows changed.
   ///
   /// An empty value set returns 0 without touching the database.
   pub async fn update(
      &self,
      target: Target,
      values: PetValues,
      selection: Option<&Selection>,
   ) -> Result<u64> {
      if values.is_empty() {
         return Ok(0);
      }

      self.update_rows(target, &values, selection).await
   }

   /// Remove the rows matching `target` (and `selection`), returning how
   /// many were removed.
   pub async fn delete(&self, target: Target, selection: Option<&Selection>) -> Result<u64> {
      let stmt = build_delete(target, selection);
      let rows_affected = self.execute(&stmt).await?;

      debug!(resource = %target, rows_affected, "Deleted pets");
      self.notify(ChangeOperation::Delete, target.id(), rows_affected);
      Ok(rows_affected)
   }

   /// Change notifications for the pets table.
   pub fn subscribe(&self) -> TableChangeStream {
      self.broker.subscribe_stream([TABLE_NAME])
   }

   pub fn broker(&self) -> &Arc<ChangeBroker> {
      &self.broker
   }

   pub fn database(&self) -> &Arc<SqliteDatabase> {
      &self.db
   }

   pub async fn close(&self) -> Result<()> {
      self.db.close().await?;
      Ok(())
   }

   /// Close the database and delete its files.
   pub async fn remove(&self) -> Result<()> {
      self.db.remove().await?;
      Ok(())
   }

   /// Row-level update shared by both target shapes.
   async fn update_rows(
      &self,
      target: Target,
      values: &PetValues,
      selection: Option<&Selection>,
   ) -> Result<u64> {
      let assignments = validate_update(values)?;
      let stmt = build_update(target, assignments, selection);
      let rows_affected = self.execute(&stmt).await?;

      debug!(resource = %target, rows_affected, "Updated pets");
      self.notify(ChangeOperation::Update, target.id(), rows_affected);
      Ok(rows_affected)
   }

   async fn execute(&self, stmt: &Statement) -> Result<u64> {
      let mut writer = self.db.acquire_writer().await?;
      let result = stmt.query().execute(&mut *writer).await?;
      Ok(result.rows_affected())
   }

   async fn fetch_typed<T>(&self, target: Target, options: &QueryOptions) -> Result<Vec<T>>
   where
      T: for<'r> FromRow<'r, sqlx::sqlite::SqliteRow>,
   {
      let stmt = build_select(target, options);
      let rows = stmt.query().fetch_all(self.db.read_pool()?).await?;
      rows
         .iter()
         .map(|row| T::from_row(row).map_err(Error::from))
         .collect()
   }

   fn notify(&self, operation: ChangeOperation, rowid: Option<i64>, rows_affected: u64) {
      if rows_affected == 0 {
         return;
      }
      self
         .broker
         .publish(TableChange::new(TABLE_NAME, operation, rowid, rows_affected));
   }
}
