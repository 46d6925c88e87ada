use std::collections::HashSet;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use tokio::sync::broadcast;
use tokio_stream::Stream;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tracing::warn;

use crate::change::{TableChange, TableChangeEvent};

/// Subscriber side of a [`ChangeBroker`](crate::ChangeBroker).
///
/// Created by [`ChangeBroker::subscribe_stream`](crate::ChangeBroker::subscribe_stream).
/// Ends once the broker is dropped.
pub struct TableChangeStream {
   rx: BroadcastStream<TableChange>,
   tables: Option<HashSet<String>>,
}

impl TableChangeStream {
   /// `tables` of `None` passes every delivered change through.
   pub(crate) fn new(rx: broadcast::Receiver<TableChange>, tables: Option<HashSet<String>>) -> Self {
      Self {
         rx: BroadcastStream::new(rx),
         tables,
      }
   }

   /// Whether changes to `table` reach this subscriber.
   pub fn accepts(&self, table: &str) -> bool {
      self.tables.as_ref().is_none_or(|tables| tables.contains(table))
   }
}

impl Stream for TableChangeStream {
   type Item = TableChangeEvent;

   fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
      loop {
         let event = match ready!(Pin::new(&mut self.rx).poll_next(cx)) {
            None => return Poll::Ready(None),
            Some(Ok(change)) if !self.accepts(&change.table) => continue,
            Some(Ok(change)) => TableChangeEvent::Change(change),
            Some(Err(BroadcastStreamRecvError::Lagged(missed))) => {
               warn!(missed, "Subscriber fell behind; re-query to catch up");
               TableChangeEvent::Lagged(missed)
            }
         };
         return Poll::Ready(Some(event));
      }
   }
}
