use pets_store::{JsonRow, PetValues, QueryOptions, Selection, Target};
use serde_json::Value as JsonValue;
use tauri::{State, command};

use crate::{PetStoreState, Result};

#[command]
pub(crate) async fn query(
   state: State<'_, PetStoreState>,
   uri: String,
   options: Option<QueryOptions>,
) -> Result<Vec<JsonRow>> {
   query_pets(&state, &uri, options).await
}

#[command]
pub(crate) async fn insert(
   state: State<'_, PetStoreState>,
   uri: String,
   values: JsonValue,
) -> Result<String> {
   insert_pet(&state, &uri, values).await
}

#[command]
pub(crate) async fn update(
   state: State<'_, PetStoreState>,
   uri: String,
   values: JsonValue,
   selection: Option<Selection>,
) -> Result<u64> {
   update_pets(&state, &uri, values, selection).await
}

#[command]
pub(crate) async fn delete(
   state: State<'_, PetStoreState>,
   uri: String,
   selection: Option<Selection>,
) -> Result<u64> {
   delete_pets(&state, &uri, selection).await
}

/// Rows of `uri` (`pets` or `pets/{id}`), shaped by `options`.
async fn query_pets(
   state: &PetStoreState,
   uri: &str,
   options: Option<QueryOptions>,
) -> Result<Vec<JsonRow>> {
   let target: Target = uri.parse()?;
   let store = state.store().await?;
   Ok(store.query(target, &options.unwrap_or_default()).await?)
}

/// Insert a pet and return the URI of the new row.
///
/// `values` is taken as raw JSON so unknown columns and wrongly typed fields
/// come back as `INVALID_ARGUMENT` rather than a deserialization failure.
async fn insert_pet(state: &PetStoreState, uri: &str, values: JsonValue) -> Result<String> {
   let target: Target = uri.parse()?;
   target.require_collection("insert")?;
   let values = PetValues::try_from(values)?;

   let id = state.store().await?.insert(values).await?;
   Ok(Target::ById(id).to_string())
}

async fn update_pets(
   state: &PetStoreState,
   uri: &str,
   values: JsonValue,
   selection: Option<Selection>,
) -> Result<u64> {
   let target: Target = uri.parse()?;
   let values = PetValues::try_from(values)?;
   let store = state.store().await?;
   Ok(store.update(target, values, selection.as_ref()).await?)
}

async fn delete_pets(state: &PetStoreState, uri: &str, selection: Option<Selection>) -> Result<u64> {
   let target: Target = uri.parse()?;
   let store = state.store().await?;
   Ok(store.delete(target, selection.as_ref()).await?)
}
