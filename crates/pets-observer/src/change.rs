use std::fmt;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeOperation {
   Insert,
   Update,
   Delete,
}

impl ChangeOperation {
   pub fn as_str(self) -> &'static str {
      match self {
         ChangeOperation::Insert => "insert",
         ChangeOperation::Update => "update",
         ChangeOperation::Delete => "delete",
      }
   }
}

impl fmt::Display for ChangeOperation {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str(self.as_str())
   }
}

/// Notification that rows of a table changed.
///
/// Published only after the statement that caused it has committed and
/// affected at least one row.
#[derive(Debug, Clone)]
pub struct TableChange {
   pub table: String,
   pub operation: ChangeOperation,
   /// Id of the affected row when a single, known row changed (an insert, or
   /// a mutation addressed by id). `None` for filter-based mutations.
   pub rowid: Option<i64>,
   pub rows_affected: u64,
   pub timestamp: Instant,
}

impl TableChange {
   pub fn new(
      table: impl Into<String>,
      operation: ChangeOperation,
      rowid: Option<i64>,
      rows_affected: u64,
   ) -> Self {
      Self {
         table: table.into(),
         operation,
         rowid,
         rows_affected,
         timestamp: Instant::now(),
      }
   }
}

/// Item yielded by [`TableChangeStream`](crate::TableChangeStream).
#[derive(Debug, Clone)]
pub enum TableChangeEvent {
   /// A change notification.
   Change(TableChange),
   /// The subscriber fell behind and this many notifications were dropped.
   /// Listeners should re-query instead of relying on incremental updates.
   Lagged(u64),
}
