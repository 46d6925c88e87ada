//! Names and enumerations shared by everything that touches the pets table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Default file name of the pets database.
pub const DATABASE_NAME: &str = "shelter.db";

/// Schema version shipped by [`MIGRATOR`](crate::MIGRATOR).
pub const DATABASE_VERSION: i64 = 1;

pub const TABLE_NAME: &str = "pets";

pub const CONTENT_SCHEME: &str = "content";
pub const CONTENT_AUTHORITY: &str = "com.example.android.pets";
pub const PATH_PETS: &str = "pets";

/// A column of the `pets` table.
///
/// Projections and sort keys are expressed with this enum so they never
/// carry caller-supplied SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetColumn {
   #[serde(rename = "_id")]
   Id,
   Name,
   Breed,
   Gender,
   Weight,
}

impl PetColumn {
   pub const ALL: [PetColumn; 5] = [
      PetColumn::Id,
      PetColumn::Name,
      PetColumn::Breed,
      PetColumn::Gender,
      PetColumn::Weight,
   ];

   pub fn as_str(self) -> &'static str {
      match self {
         PetColumn::Id => "_id",
         PetColumn::Name => "name",
         PetColumn::Breed => "breed",
         PetColumn::Gender => "gender",
         PetColumn::Weight => "weight",
      }
   }
}

impl fmt::Display for PetColumn {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str(self.as_str())
   }
}

/// Gender of a pet, stored as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, sqlx::Type, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
#[repr(i64)]
pub enum Gender {
   #[default]
   Unknown = 0,
   Male = 1,
   Female = 2,
}

impl Gender {
   /// Whether `value` is one of the stored gender codes.
   pub fn is_valid(value: i64) -> bool {
      Self::try_from(value).is_ok()
   }

   pub fn as_i64(self) -> i64 {
      self as i64
   }
}

impl TryFrom<i64> for Gender {
   type Error = Error;

   fn try_from(value: i64) -> Result<Self, Self::Error> {
      match value {
         0 => Ok(Gender::Unknown),
         1 => Ok(Gender::Male),
         2 => Ok(Gender::Female),
         other => Err(Error::InvalidArgument(format!(
            "pet requires a valid gender, got {other}"
         ))),
      }
   }
}

impl From<Gender> for i64 {
   fn from(gender: Gender) -> Self {
      gender.as_i64()
   }
}

impl fmt::Display for Gender {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str(match self {
         Gender::Unknown => "unknown",
         Gender::Male => "male",
         Gender::Female => "female",
      })
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use serde_json::json;

   #[test]
   fn test_gender_codes() {
      assert_eq!(Gender::Unknown.as_i64(), 0);
      assert_eq!(Gender::Male.as_i64(), 1);
      assert_eq!(Gender::Female.as_i64(), 2);

      for valid in [0, 1, 2] {
         assert!(Gender::is_valid(valid));
      }
      for invalid in [-1, 3, 42] {
         assert!(!Gender::is_valid(invalid));
      }
   }

   #[test]
   fn test_gender_serializes_as_code() {
      assert_eq!(serde_json::to_value(Gender::Female).unwrap(), json!(2));
      assert_eq!(
         serde_json::from_value::<Gender>(json!(1)).unwrap(),
         Gender::Male
      );
      assert!(serde_json::from_value::<Gender>(json!(9)).is_err());
   }

   #[test]
   fn test_column_names() {
      let names: Vec<&str> = PetColumn::ALL.iter().map(|c| c.as_str()).collect();
      assert_eq!(names, vec!["_id", "name", "breed", "gender", "weight"]);

      assert_eq!(serde_json::to_value(PetColumn::Id).unwrap(), json!("_id"));
      assert_eq!(
         serde_json::from_value::<PetColumn>(json!("weight")).unwrap(),
         PetColumn::Weight
      );
      assert!(serde_json::from_value::<PetColumn>(json!("owner")).is_err());
   }
}
