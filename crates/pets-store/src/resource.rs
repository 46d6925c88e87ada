//! Addressable pet resources.
//!
//! Format: `[content://com.example.android.pets/]pets[/<id>]`
//!
//! Examples:
//! - `pets` and `content://com.example.android.pets/pets` address the whole collection
//! - `pets/42` and `content://com.example.android.pets/pets/42` address one record

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::contract::{CONTENT_AUTHORITY, CONTENT_SCHEME, PATH_PETS};
use crate::{Error, Result};

/// The rows an operation applies to, decided once when the resource
/// pattern is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Target {
   /// Every pet (`pets`).
   All,
   /// The pet with this id (`pets/{id}`).
   ById(i64),
}

impl Target {
   /// Parse a resource pattern.
   ///
   /// The optional `content://` prefix must name the pets authority. The id
   /// segment must consist of ASCII digits only.
   pub fn parse(uri: &str) -> Result<Self> {
      let unknown = || Error::UnknownResource(uri.to_string());

      let path = match uri.strip_prefix(CONTENT_SCHEME).and_then(|rest| rest.strip_prefix("://")) {
         Some(rest) => {
            let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
            if authority != CONTENT_AUTHORITY {
               return Err(unknown());
            }
            path
         }
         None => uri.strip_prefix('/').unwrap_or(uri),
      };

      let mut segments = path.split('/');
      match (segments.next(), segments.next(), segments.next()) {
         (Some(PATH_PETS), None, _) => Ok(Target::All),
         (Some(PATH_PETS), Some(id), None)
            if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) =>
         {
            id.parse().map(Target::ById).map_err(|_| unknown())
         }
         _ => Err(unknown()),
      }
   }

   /// Id addressed by this target, if any.
   pub fn id(self) -> Option<i64> {
      match self {
         Target::All => None,
         Target::ById(id) => Some(id),
      }
   }

   /// Fail with [`Error::UnknownResource`] unless this is the collection.
   ///
   /// New rows can only be added to `pets`; there is no row to insert into
   /// at `pets/{id}`.
   pub fn require_collection(self, operation: &str) -> Result<()> {
      match self {
         Target::All => Ok(()),
         Target::ById(_) => Err(Error::UnknownResource(format!(
            "{operation} is not supported for {self}"
         ))),
      }
   }
}

impl FromStr for Target {
   type Err = Error;

   fn from_str(s: &str) -> Result<Self> {
      Self::parse(s)
   }
}

impl fmt::Display for Target {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      write!(f, "{CONTENT_SCHEME}://{CONTENT_AUTHORITY}/{PATH_PETS}")?;
      if let Target::ById(id) = self {
         write!(f, "/{id}")?;
      }
      Ok(())
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_parse_collection() {
      assert_eq!(Target::parse("pets").unwrap(), Target::All);
      assert_eq!(Target::parse("/pets").unwrap(), Target::All);
      assert_eq!(
         Target::parse("content://com.example.android.pets/pets").unwrap(),
         Target::All
      );
   }

   #[test]
   fn test_parse_single_item() {
      assert_eq!(Target::parse("pets/3").unwrap(), Target::ById(3));
      assert_eq!(
         "content://com.example.android.pets/pets/42"
            .parse::<Target>()
            .unwrap(),
         Target::ById(42)
      );
   }

   #[test]
   fn test_parse_rejects_unknown_patterns() {
      for uri in [
         "",
         "owners",
         "pets/",
         "pets/abc",
         "pets/-1",
         "pets/1/2",
         "pets/99999999999999999999",
         "content://com.example.android.pets",
         "content://com.example.android.pets/owners/1",
         "content://com.example.other/pets",
         "http://com.example.android.pets/pets",
      ] {
         let err = Target::parse(uri).unwrap_err();
         assert_eq!(err.error_code(), "UNKNOWN_RESOURCE", "uri: {uri:?}");
      }
   }

   #[test]
   fn test_display_is_canonical_uri() {
      assert_eq!(
         Target::All.to_string(),
         "content://com.example.android.pets/pets"
      );
      assert_eq!(
         Target::ById(7).to_string(),
         "content://com.example.android.pets/pets/7"
      );

      // Display output parses back to the same target
      let target = Target::ById(12);
      assert_eq!(Target::parse(&target.to_string()).unwrap(), target);
   }

   #[test]
   fn test_require_collection() {
      assert!(Target::All.require_collection("insert").is_ok());

      let err = Target::ById(5).require_collection("insert").unwrap_err();
      assert_eq!(err.error_code(), "UNKNOWN_RESOURCE");
      assert!(err.to_string().contains("insert is not supported"));
   }
}
