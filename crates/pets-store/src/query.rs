//! Query options and SQL generation for the pets table.
//!
//! Statements are assembled from [`PetColumn`] names (never caller text)
//! plus an optional caller [`Selection`] whose values are always bound as
//! parameters.
//!
//! # Example
//!
//! ```
//! use pets_store::{PetColumn, QueryOptions, Selection, SortKey};
//!
//! let options = QueryOptions::new()
//!    .projection([PetColumn::Id, PetColumn::Name, PetColumn::Breed])
//!    .selection(Selection::eq(PetColumn::Breed, "Terrier"))
//!    .sort_by(SortKey::asc(PetColumn::Name));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::Sqlite;
use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;

use crate::contract::{PetColumn, TABLE_NAME};
use crate::resource::Target;
use crate::validate::Assignments;

/// Sort direction for a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
   /// Ascending order (smallest first)
   #[default]
   Asc,
   /// Descending order (largest first)
   Desc,
}

impl SortDirection {
   fn as_sql(self) -> &'static str {
      match self {
         SortDirection::Asc => "ASC",
         SortDirection::Desc => "DESC",
      }
   }
}

/// One `ORDER BY` term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
   pub column: PetColumn,
   #[serde(default)]
   pub direction: SortDirection,
}

impl SortKey {
   pub fn asc(column: PetColumn) -> Self {
      Self {
         column,
         direction: SortDirection::Asc,
      }
   }

   pub fn desc(column: PetColumn) -> Self {
      Self {
         column,
         direction: SortDirection::Desc,
      }
   }
}

/// A caller-supplied row filter: an SQL boolean expression with `?`
/// placeholders and the values bound to them, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
   pub clause: String,
   #[serde(default)]
   pub args: Vec<JsonValue>,
}

impl Selection {
   pub fn new(clause: impl Into<String>, args: Vec<JsonValue>) -> Self {
      Self {
         clause: clause.into(),
         args,
      }
   }

   /// `column = value`
   pub fn eq(column: PetColumn, value: impl Into<JsonValue>) -> Self {
      Self::new(
         format!("{} = ?", quote_identifier(column.as_str())),
         vec![value.into()],
      )
   }
}

/// Projection, filter and ordering for a pets query. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryOptions {
   /// Columns to return; all columns when empty.
   pub projection: Vec<PetColumn>,
   pub selection: Option<Selection>,
   pub sort_order: Vec<SortKey>,
}

impl QueryOptions {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn projection(mut self, columns: impl IntoIterator<Item = PetColumn>) -> Self {
      self.projection = columns.into_iter().collect();
      self
   }

   pub fn selection(mut self, selection: Selection) -> Self {
      self.selection = Some(selection);
      self
   }

   pub fn sort_by(mut self, key: SortKey) -> Self {
      self.sort_order.push(key);
      self
   }
}

/// SQL text plus the values to bind, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Statement {
   pub sql: String,
   pub values: Vec<JsonValue>,
}

impl Statement {
   pub fn query(&self) -> Query<'_, Sqlite, SqliteArguments<'_>> {
      let mut q = sqlx::query(&self.sql);
      for value in &self.values {
         q = bind_value(q, value.clone());
      }
      q
   }
}

/// Quote an identifier with double quotes, doubling any embedded quote.
pub(crate) fn quote_identifier(name: &str) -> String {
   format!("\"{}\"", name.replace('"', "\"\""))
}

/// `WHERE` clause for `target`, AND-ed with the caller selection.
fn where_clause(target: Target, selection: Option<&Selection>) -> (String, Vec<JsonValue>) {
   let mut conditions = Vec::new();
   let mut values = Vec::new();

   if let Target::ById(id) = target {
      conditions.push(format!("{} = ?", quote_identifier(PetColumn::Id.as_str())));
      values.push(JsonValue::from(id));
   }

   if let Some(selection) = selection
      && !selection.clause.trim().is_empty()
   {
      conditions.push(format!("({})", selection.clause));
      values.extend(selection.args.iter().cloned());
   }

   if conditions.is_empty() {
      (String::new(), values)
   } else {
      (format!(" WHERE {}", conditions.join(" AND ")), values)
   }
}

fn column_list(columns: &[PetColumn]) -> String {
   columns
      .iter()
      .map(|c| quote_identifier(c.as_str()))
      .collect::<Vec<_>>()
      .join(", ")
}

pub(crate) fn build_select(target: Target, options: &QueryOptions) -> Statement {
   let projection = if options.projection.is_empty() {
      &PetColumn::ALL[..]
   } else {
      &options.projection[..]
   };

   let (where_sql, values) = where_clause(target, options.selection.as_ref());
   let mut sql = format!(
      "SELECT {} FROM {}{}",
      column_list(projection),
      quote_identifier(TABLE_NAME),
      where_sql
   );

   if !options.sort_order.is_empty() {
      let terms: Vec<String> = options
         .sort_order
         .iter()
         .map(|key| {
            format!(
               "{} {}",
               quote_identifier(key.column.as_str()),
               key.direction.as_sql()
            )
         })
         .collect();
      sql.push_str(" ORDER BY ");
      sql.push_str(&terms.join(", "));
   }

   Statement { sql, values }
}

pub(crate) fn build_insert(assignments: Assignments) -> Statement {
   let columns: Vec<PetColumn> = assignments.iter().map(|(c, _)| *c).collect();
   let placeholders = vec!["?"; columns.len()].join(", ");

   Statement {
      sql: format!(
         "INSERT INTO {} ({}) VALUES ({})",
         quote_identifier(TABLE_NAME),
         column_list(&columns),
         placeholders
      ),
      values: assignments.into_iter().map(|(_, v)| v).collect(),
   }
}

pub(crate) fn build_update(
   target: Target,
   assignments: Assignments,
   selection: Option<&Selection>,
) -> Statement {
   let set: Vec<String> = assignments
      .iter()
      .map(|(c, _)| format!("{} = ?", quote_identifier(c.as_str())))
      .collect();
   let mut values: Vec<JsonValue> = assignments.into_iter().map(|(_, v)| v).collect();

   let (where_sql, where_values) = where_clause(target, selection);
   values.extend(where_values);

   Statement {
      sql: format!(
         "UPDATE {} SET {}{}",
         quote_identifier(TABLE_NAME),
         set.join(", "),
         where_sql
      ),
      values,
   }
}

pub(crate) fn build_delete(target: Target, selection: Option<&Selection>) -> Statement {
   let (where_sql, values) = where_clause(target, selection);

   Statement {
      sql: format!("DELETE FROM {}{}", quote_identifier(TABLE_NAME), where_sql),
      values,
   }
}

/// Bind a JSON value to a SQLx query with its natural SQLite type.
pub(crate) fn bind_value<'a>(
   query: Query<'a, Sqlite, SqliteArguments<'a>>,
   value: JsonValue,
) -> Query<'a, Sqlite, SqliteArguments<'a>> {
   match value {
      JsonValue::Null => query.bind(None::<String>),
      JsonValue::Bool(b) => query.bind(b),
      JsonValue::String(s) => query.bind(s),
      JsonValue::Number(number) => {
         // Preserve integer precision by binding as i64 when possible
         if let Some(int_val) = number.as_i64() {
            query.bind(int_val)
         } else if let Some(uint_val) = number.as_u64() {
            // Value too large for i64, use f64 (will lose precision)
            query.bind(uint_val as f64)
         } else {
            query.bind(number.as_f64().unwrap_or_default())
         }
      }
      // Arrays and objects are stored as JSON text
      other => query.bind(other),
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use serde_json::json;

   #[test]
   fn test_select_all_columns() {
      let stmt = build_select(Target::All, &QueryOptions::new());

      assert_eq!(
         stmt.sql,
         r#"SELECT "_id", "name", "breed", "gender", "weight" FROM "pets""#
      );
      assert!(stmt.values.is_empty());
   }

   #[test]
   fn test_select_by_id_with_selection_projection_and_order() {
      let options = QueryOptions::new()
         .projection([PetColumn::Id, PetColumn::Name])
         .selection(Selection::new("weight > ?", vec![json!(5)]))
         .sort_by(SortKey::desc(PetColumn::Weight))
         .sort_by(SortKey::asc(PetColumn::Name));

      let stmt = build_select(Target::ById(3), &options);

      assert_eq!(
         stmt.sql,
         r#"SELECT "_id", "name" FROM "pets" WHERE "_id" = ? AND (weight > ?) ORDER BY "weight" DESC, "name" ASC"#
      );
      assert_eq!(stmt.values, vec![json!(3), json!(5)]);
   }

   #[test]
   fn test_blank_selection_is_ignored() {
      let stmt = build_delete(Target::All, Some(&Selection::new("  ", vec![])));
      assert_eq!(stmt.sql, r#"DELETE FROM "pets""#);
   }

   #[test]
   fn test_insert_lists_only_present_columns() {
      let stmt = build_insert(vec![
         (PetColumn::Name, json!("Rex")),
         (PetColumn::Gender, json!(0)),
      ]);

      assert_eq!(
         stmt.sql,
         r#"INSERT INTO "pets" ("name", "gender") VALUES (?, ?)"#
      );
      assert_eq!(stmt.values, vec![json!("Rex"), json!(0)]);
   }

   #[test]
   fn test_update_binds_assignments_before_filter() {
      let stmt = build_update(
         Target::ById(9),
         vec![(PetColumn::Weight, json!(12))],
         Some(&Selection::eq(PetColumn::Breed, "Terrier")),
      );

      assert_eq!(
         stmt.sql,
         r#"UPDATE "pets" SET "weight" = ? WHERE "_id" = ? AND ("breed" = ?)"#
      );
      assert_eq!(stmt.values, vec![json!(12), json!(9), json!("Terrier")]);
   }

   #[test]
   fn test_query_options_deserialize() {
      let options: QueryOptions = serde_json::from_value(json!({
         "projection": ["_id", "name"],
         "selection": { "clause": "gender = ?", "args": [1] },
         "sortOrder": [{ "column": "name" }, { "column": "_id", "direction": "desc" }]
      }))
      .unwrap();

      assert_eq!(options.projection, vec![PetColumn::Id, PetColumn::Name]);
      assert_eq!(options.selection.unwrap().args, vec![json!(1)]);
      assert_eq!(
         options.sort_order,
         vec![SortKey::asc(PetColumn::Name), SortKey::desc(PetColumn::Id)]
      );

      assert_eq!(
         serde_json::from_value::<QueryOptions>(json!({})).unwrap(),
         QueryOptions::default()
      );
   }

   #[test]
   fn test_quote_identifier() {
      assert_eq!(quote_identifier("pets"), "\"pets\"");
      assert_eq!(quote_identifier("foo\"bar"), "\"foo\"\"bar\"");
   }
}
