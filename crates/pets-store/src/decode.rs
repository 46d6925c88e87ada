//! Row decoding into JSON maps.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use sqlx::sqlite::{SqliteRow, SqliteValueRef};
use sqlx::{Column, Row, TypeInfo, Value, ValueRef};

use crate::Error;

/// A decoded row: column name to value, in projection order.
pub type JsonRow = IndexMap<String, JsonValue>;

/// Convert one SQLite value to JSON according to its storage class.
///
/// Blobs become base64 strings; non-finite reals become `null`.
pub(crate) fn to_json(value: SqliteValueRef<'_>) -> Result<JsonValue, Error> {
   if value.is_null() {
      return Ok(JsonValue::Null);
   }

   let value = ValueRef::to_owned(&value);
   let type_name = value.type_info().name().to_string();

   let json = match type_name.as_str() {
      "INTEGER" => JsonValue::from(value.try_decode::<i64>()?),
      "REAL" => serde_json::Number::from_f64(value.try_decode::<f64>()?)
         .map(JsonValue::Number)
         .unwrap_or(JsonValue::Null),
      "TEXT" => JsonValue::String(value.try_decode::<String>()?),
      "BLOB" => JsonValue::String(STANDARD.encode(value.try_decode::<Vec<u8>>()?)),
      other => return Err(Error::UnsupportedDatatype(other.to_string())),
   };

   Ok(json)
}

/// Decode query results into ordered JSON maps.
pub(crate) fn decode_rows(rows: Vec<SqliteRow>) -> Result<Vec<JsonRow>, Error> {
   let mut values = Vec::with_capacity(rows.len());
   for row in rows {
      let mut value = IndexMap::default();
      for (i, column) in row.columns().iter().enumerate() {
         let v = row.try_get_raw(i)?;
         value.insert(column.name().to_string(), to_json(v)?);
      }
      values.push(value);
   }
   Ok(values)
}
