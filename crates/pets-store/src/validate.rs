//! Field constraints for pet writes.
//!
//! Both functions return the column assignments to write, in column order,
//! so the SQL builders never see an unchecked value.

use serde_json::Value as JsonValue;

use crate::contract::{Gender, PetColumn};
use crate::model::PetValues;
use crate::{Error, Result};

pub(crate) type Assignments = Vec<(PetColumn, JsonValue)>;

/// Check a full record for insertion.
///
/// Name and gender are required; weight and breed are optional.
pub(crate) fn validate_insert(values: &PetValues) -> Result<Assignments> {
   if !matches!(values.name, Some(Some(_))) {
      return Err(Error::InvalidArgument("pet requires a name".into()));
   }
   if !matches!(values.gender, Some(Some(_))) {
      return Err(Error::InvalidArgument("pet requires a valid gender".into()));
   }
   validate_present(values)
}

/// Check a partial record for update. Absent fields are not checked.
pub(crate) fn validate_update(values: &PetValues) -> Result<Assignments> {
   validate_present(values)
}

fn validate_present(values: &PetValues) -> Result<Assignments> {
   let mut assignments = Assignments::with_capacity(values.len());

   match &values.name {
      None => {}
      Some(None) => return Err(Error::InvalidArgument("pet requires a name".into())),
      Some(Some(name)) => assignments.push((PetColumn::Name, JsonValue::from(name.as_str()))),
   }

   if let Some(breed) = &values.breed {
      assignments.push((
         PetColumn::Breed,
         breed.as_deref().map_or(JsonValue::Null, JsonValue::from),
      ));
   }

   match values.gender {
      None => {}
      Some(None) => return Err(Error::InvalidArgument("pet requires a valid gender".into())),
      Some(Some(code)) => {
         let gender = Gender::try_from(code)?;
         assignments.push((PetColumn::Gender, JsonValue::from(gender.as_i64())));
      }
   }

   match values.weight {
      None => {}
      Some(None) => assignments.push((PetColumn::Weight, JsonValue::Null)),
      Some(Some(weight)) if weight <= 0 => {
         return Err(Error::InvalidArgument(format!(
            "pet requires a positive weight, got {weight}"
         )));
      }
      Some(Some(weight)) => assignments.push((PetColumn::Weight, JsonValue::from(weight))),
   }

   Ok(assignments)
}

#[cfg(test)]
mod tests {
   use super::*;
   use serde_json::json;

   fn toto() -> PetValues {
      PetValues::new()
         .name("Toto")
         .breed("Terrier")
         .gender(Gender::Male)
         .weight(7)
   }

   fn assert_invalid(result: Result<Assignments>, needle: &str) {
      let err = result.unwrap_err();
      assert_eq!(err.error_code(), "INVALID_ARGUMENT");
      assert!(err.to_string().contains(needle), "{err}");
   }

   #[test]
   fn test_insert_valid_record() {
      let assignments = validate_insert(&toto()).unwrap();

      assert_eq!(
         assignments,
         vec![
            (PetColumn::Name, json!("Toto")),
            (PetColumn::Breed, json!("Terrier")),
            (PetColumn::Gender, json!(1)),
            (PetColumn::Weight, json!(7)),
         ]
      );
   }

   #[test]
   fn test_insert_requires_name() {
      assert_invalid(validate_insert(&PetValues::new().gender(0)), "name");
      assert_invalid(
         validate_insert(&PetValues::new().put_null(PetColumn::Name).gender(0)),
         "name",
      );
   }

   #[test]
   fn test_insert_requires_valid_gender() {
      assert_invalid(validate_insert(&PetValues::new().name("Rex")), "gender");
      assert_invalid(
         validate_insert(&PetValues::new().name("Rex").put_null(PetColumn::Gender)),
         "gender",
      );
      assert_invalid(validate_insert(&PetValues::new().name("Rex").gender(3)), "gender");
      assert_invalid(validate_insert(&PetValues::new().name("Rex").gender(-1)), "gender");
   }

   #[test]
   fn test_insert_rejects_non_positive_weight() {
      assert_invalid(validate_insert(&toto().weight(0)), "weight");
      assert_invalid(validate_insert(&toto().weight(-4)), "weight");
   }

   #[test]
   fn test_insert_accepts_missing_optional_fields() {
      let assignments = validate_insert(&PetValues::new().name("Rex").gender(0)).unwrap();
      assert_eq!(
         assignments,
         vec![(PetColumn::Name, json!("Rex")), (PetColumn::Gender, json!(0))]
      );

      // Explicit nulls for optional fields are written as NULL
      let assignments = validate_insert(
         &PetValues::new()
            .name("Rex")
            .gender(0)
            .put_null(PetColumn::Breed)
            .put_null(PetColumn::Weight),
      )
      .unwrap();
      assert_eq!(assignments.len(), 4);
      assert_eq!(assignments[1], (PetColumn::Breed, JsonValue::Null));
      assert_eq!(assignments[3], (PetColumn::Weight, JsonValue::Null));
   }

   #[test]
   fn test_update_checks_only_present_fields() {
      assert!(validate_update(&PetValues::new()).unwrap().is_empty());

      let assignments = validate_update(&PetValues::new().weight(12)).unwrap();
      assert_eq!(assignments, vec![(PetColumn::Weight, json!(12))]);

      assert_invalid(
         validate_update(&PetValues::new().put_null(PetColumn::Name)),
         "name",
      );
      assert_invalid(validate_update(&PetValues::new().gender(5)), "gender");
      assert_invalid(validate_update(&PetValues::new().weight(0)), "weight");
   }
}
