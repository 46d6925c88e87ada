use futures::StreamExt;
use pets_observer::{TableChange, TableChangeEvent, TableChangeStream};
use serde::Serialize;
use tauri::{AppHandle, Emitter, Runtime};

/// Event emitted to the front end after every committed pet mutation.
pub const CHANGE_EVENT: &str = "pets://change";

/// Payload of [`CHANGE_EVENT`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePayload {
   pub table: String,
   pub operation: &'static str,
   pub rowid: Option<i64>,
   pub rows_affected: u64,
}

impl From<&TableChange> for ChangePayload {
   fn from(change: &TableChange) -> Self {
      Self {
         table: change.table.clone(),
         operation: change.operation.as_str(),
         rowid: change.rowid,
         rows_affected: change.rows_affected,
      }
   }
}

/// Emit every change from `changes` as [`CHANGE_EVENT`] until the broker
/// goes away.
pub(crate) async fn forward_changes<R: Runtime>(app: AppHandle<R>, mut changes: TableChangeStream) {
   while let Some(event) = changes.next().await {
      match event {
         TableChangeEvent::Change(change) => {
            if let Err(e) = app.emit(CHANGE_EVENT, ChangePayload::from(&change)) {
               log::warn!("Failed to emit {CHANGE_EVENT}: {e}");
            }
         }
         TableChangeEvent::Lagged(missed) => {
            log::warn!("Change forwarder fell behind; {missed} pet changes were not emitted");
         }
      }
   }
   log::debug!("Change forwarder stopped");
}

#[cfg(test)]
mod tests {
   use super::*;
   use pets_observer::ChangeOperation;
   use serde_json::json;

   #[test]
   fn test_payload_shape() {
      let change = TableChange::new("pets", ChangeOperation::Delete, Some(3), 1);

      assert_eq!(
         serde_json::to_value(ChangePayload::from(&change)).unwrap(),
         json!({ "table": "pets", "operation": "delete", "rowid": 3, "rowsAffected": 1 })
      );
   }

   #[test]
   fn test_payload_without_rowid() {
      let change = TableChange::new("pets", ChangeOperation::Update, None, 4);
      let payload = ChangePayload::from(&change);

      assert_eq!(payload.rowid, None);
      assert_eq!(payload.rows_affected, 4);
      assert_eq!(payload.operation, "update");
   }
}
