//! Fan-out of table changes to subscribers.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::trace;

use crate::change::TableChange;
use crate::config::ObserverConfig;
use crate::stream::TableChangeStream;

/// Routes [`TableChange`] notifications from writers to subscribers.
///
/// Only changes to observed tables are delivered; everything else is dropped
/// at [`publish`](Self::publish).
pub struct ChangeBroker {
   sender: broadcast::Sender<TableChange>,
   observed: RwLock<HashSet<String>>,
}

impl ChangeBroker {
   pub fn new(config: ObserverConfig) -> Arc<Self> {
      let (sender, _) = broadcast::channel(config.channel_capacity.max(1));
      let broker = Self {
         sender,
         observed: RwLock::new(HashSet::new()),
      };
      broker.observe_tables(config.tables.iter().map(String::as_str));
      Arc::new(broker)
   }

   /// Start delivering changes for the given tables.
   pub fn observe_tables<'a>(&self, tables: impl IntoIterator<Item = &'a str>) {
      let mut observed = self.observed.write();
      for table in tables {
         if observed.insert(table.to_string()) {
            trace!(table, "Observing table");
         }
      }
   }

   /// Currently observed tables, sorted by name.
   pub fn observed_tables(&self) -> Vec<String> {
      let mut tables: Vec<String> = self.observed.read().iter().cloned().collect();
      tables.sort();
      tables
   }

   pub fn is_observed(&self, table: &str) -> bool {
      self.observed.read().contains(table)
   }

   /// Raw receiver for every delivered change.
   pub fn subscribe(&self) -> broadcast::Receiver<TableChange> {
      self.sender.subscribe()
   }

   /// Subscribe as a `Stream`, restricted to `tables` unless it is empty.
   ///
   /// Passing tables also registers them for observation.
   pub fn subscribe_stream<I, S>(&self, tables: I) -> TableChangeStream
   where
      I: IntoIterator<Item = S>,
      S: Into<String>,
   {
      let tables: HashSet<String> = tables.into_iter().map(Into::into).collect();
      if tables.is_empty() {
         return TableChangeStream::new(self.sender.subscribe(), None);
      }
      self.observe_tables(tables.iter().map(String::as_str));
      TableChangeStream::new(self.sender.subscribe(), Some(tables))
   }

   /// Deliver `change` to current subscribers.
   ///
   /// Returns the number of subscribers it reached. Zero when the table is
   /// not observed or nobody is subscribed; neither case is an error.
   pub fn publish(&self, change: TableChange) -> usize {
      if !self.is_observed(&change.table) {
         trace!(table = %change.table, "Dropping change for unobserved table");
         return 0;
      }

      trace!(
         table = %change.table,
         operation = %change.operation,
         rowid = ?change.rowid,
         rows_affected = change.rows_affected,
         "Publishing change"
      );

      self.sender.send(change).unwrap_or(0)
   }

   pub fn subscriber_count(&self) -> usize {
      self.sender.receiver_count()
   }
}
