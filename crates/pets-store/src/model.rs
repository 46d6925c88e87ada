use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::contract::{Gender, PetColumn};
use crate::{Error, Result};

/// A stored pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Pet {
   #[sqlx(rename = "_id")]
   pub id: i64,
   pub name: String,
   pub breed: Option<String>,
   pub gender: Gender,
   pub weight: Option<i64>,
}

/// The columns the catalog list shows for each pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PetSummary {
   #[sqlx(rename = "_id")]
   pub id: i64,
   pub name: String,
   pub breed: Option<String>,
}

/// A partial set of pet fields for insert and update.
///
/// Each field distinguishes "absent" (`None`) from "present but null"
/// (`Some(None)`), which matters for validation: a present name or gender
/// must not be null, while an absent one is simply left alone on update.
///
/// Values are unvalidated; gender and weight stay raw integers until the
/// store checks them. Deserializing goes through `TryFrom<JsonValue>`, so
/// unknown columns and wrongly typed values are rejected instead of dropped.
///
/// ```
/// use pets_store::{PetColumn, PetValues};
///
/// let values = PetValues::new()
///    .name("Toto")
///    .breed("Terrier")
///    .gender(1)
///    .weight(7);
/// assert_eq!(values.len(), 4);
///
/// let cleared = PetValues::new().put_null(PetColumn::Breed);
/// assert!(cleared.contains(PetColumn::Breed));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "JsonValue")]
pub struct PetValues {
   pub(crate) name: Option<Option<String>>,
   pub(crate) breed: Option<Option<String>>,
   pub(crate) gender: Option<Option<i64>>,
   pub(crate) weight: Option<Option<i64>>,
}

impl TryFrom<JsonValue> for PetValues {
   type Error = Error;

   /// Read a JSON object keyed by column name. A key set to `null` is
   /// present with a null value; a missing key is absent.
   fn try_from(value: JsonValue) -> Result<Self> {
      let fields = match value {
         JsonValue::Object(fields) => fields,
         other => {
            return Err(Error::InvalidArgument(format!(
               "pet values must be an object, got {other}"
            )));
         }
      };

      let mut values = PetValues::new();
      for (key, value) in fields {
         let column = PetColumn::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == key)
            .ok_or_else(|| Error::InvalidArgument(format!("no such column: {key}")))?;

         match column {
            PetColumn::Id => {
               return Err(Error::InvalidArgument(format!(
                  "{column} is assigned by the store"
               )));
            }
            PetColumn::Name => values.name = Some(text(column, value)?),
            PetColumn::Breed => values.breed = Some(text(column, value)?),
            PetColumn::Gender => values.gender = Some(integer(column, value)?),
            PetColumn::Weight => values.weight = Some(integer(column, value)?),
         }
      }
      Ok(values)
   }
}

fn text(column: PetColumn, value: JsonValue) -> Result<Option<String>> {
   match value {
      JsonValue::Null => Ok(None),
      JsonValue::String(s) => Ok(Some(s)),
      other => Err(Error::InvalidArgument(format!(
         "{column} must be text, got {other}"
      ))),
   }
}

fn integer(column: PetColumn, value: JsonValue) -> Result<Option<i64>> {
   match &value {
      JsonValue::Null => Ok(None),
      JsonValue::Number(n) if n.as_i64().is_some() => Ok(n.as_i64()),
      _ => Err(Error::InvalidArgument(format!(
         "{column} must be an integer, got {value}"
      ))),
   }
}

impl PetValues {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn name(mut self, name: impl Into<String>) -> Self {
      self.name = Some(Some(name.into()));
      self
   }

   pub fn breed(mut self, breed: impl Into<String>) -> Self {
      self.breed = Some(Some(breed.into()));
      self
   }

   /// Raw gender code; see [`Gender`] for the valid values.
   pub fn gender(mut self, gender: impl Into<i64>) -> Self {
      self.gender = Some(Some(gender.into()));
      self
   }

   pub fn weight(mut self, weight: i64) -> Self {
      self.weight = Some(Some(weight));
      self
   }

   /// Mark `column` as present with a null value. `Id` is ignored: ids are
   /// assigned by the store.
   pub fn put_null(mut self, column: PetColumn) -> Self {
      match column {
         PetColumn::Id => {}
         PetColumn::Name => self.name = Some(None),
         PetColumn::Breed => self.breed = Some(None),
         PetColumn::Gender => self.gender = Some(None),
         PetColumn::Weight => self.weight = Some(None),
      }
      self
   }

   pub fn contains(&self, column: PetColumn) -> bool {
      match column {
         PetColumn::Id => false,
         PetColumn::Name => self.name.is_some(),
         PetColumn::Breed => self.breed.is_some(),
         PetColumn::Gender => self.gender.is_some(),
         PetColumn::Weight => self.weight.is_some(),
      }
   }

   /// Number of present fields.
   pub fn len(&self) -> usize {
      PetColumn::ALL.iter().filter(|c| self.contains(**c)).count()
   }

   pub fn is_empty(&self) -> bool {
      self.len() == 0
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use serde_json::json;

   #[test]
   fn test_deserialize_distinguishes_null_from_absent() {
      let values: PetValues =
         serde_json::from_value(json!({ "name": "Toto", "breed": null })).unwrap();

      assert_eq!(values.name, Some(Some("Toto".to_string())));
      assert_eq!(values.breed, Some(None));
      assert_eq!(values.gender, None);
      assert_eq!(values.weight, None);
      assert_eq!(values.len(), 2);
   }

   #[test]
   fn test_deserialize_empty_object() {
      let values: PetValues = serde_json::from_value(json!({})).unwrap();
      assert!(values.is_empty());
   }

   fn invalid(value: JsonValue) -> String {
      let err = PetValues::try_from(value).unwrap_err();
      assert_eq!(err.error_code(), "INVALID_ARGUMENT");
      err.to_string()
   }

   #[test]
   fn test_rejects_unknown_columns() {
      assert!(invalid(json!({ "wieght": 5 })).contains("no such column: wieght"));
      assert!(invalid(json!({ "name": "Rex", "gender": 1, "owner": "Bob" })).contains("owner"));
      assert!(invalid(json!({ "_id": 4, "name": "Rex" })).contains("assigned by the store"));
   }

   #[test]
   fn test_rejects_wrongly_typed_values() {
      assert!(invalid(json!({ "gender": "male" })).contains("gender must be an integer"));
      assert!(invalid(json!({ "weight": 2.5 })).contains("weight must be an integer"));
      assert!(invalid(json!({ "name": 7 })).contains("name must be text"));
      assert!(invalid(json!(["Toto"])).contains("must be an object"));
   }

   #[test]
   fn test_serde_rejects_unknown_columns() {
      let result = serde_json::from_value::<PetValues>(json!({ "wieght": 5 }));
      assert!(result.unwrap_err().to_string().contains("no such column"));
   }

   #[test]
   fn test_put_null_ignores_id() {
      let values = PetValues::new().put_null(PetColumn::Id);
      assert!(values.is_empty());
      assert!(!values.contains(PetColumn::Id));
   }

   #[test]
   fn test_builder_accepts_gender_enum() {
      let values = PetValues::new().gender(Gender::Female);
      assert_eq!(values.gender, Some(Some(2)));
   }

   #[test]
   fn test_pet_serializes_gender_as_code() {
      let pet = Pet {
         id: 1,
         name: "Toto".into(),
         breed: Some("Terrier".into()),
         gender: Gender::Male,
         weight: Some(7),
      };

      assert_eq!(
         serde_json::to_value(&pet).unwrap(),
         json!({ "id": 1, "name": "Toto", "breed": "Terrier", "gender": 1, "weight": 7 })
      );
   }
}
