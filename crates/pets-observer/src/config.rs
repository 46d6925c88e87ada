/// Configuration for a [`ChangeBroker`](crate::ChangeBroker).
#[derive(Debug, Clone)]
pub struct ObserverConfig {
   /// Capacity of the broadcast channel. Subscribers that fall further
   /// behind than this receive a lag notification instead of the missed
   /// changes. Zero is treated as one.
   ///
   /// Default: 256
   pub channel_capacity: usize,

   /// Tables observed from the start. More can be added later with
   /// [`ChangeBroker::observe_tables`](crate::ChangeBroker::observe_tables).
   pub tables: Vec<String>,
}

impl Default for ObserverConfig {
   fn default() -> Self {
      Self {
         channel_capacity: 256,
         tables: Vec::new(),
      }
   }
}

impl ObserverConfig {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn with_tables<I, S>(mut self, tables: I) -> Self
   where
      I: IntoIterator<Item = S>,
      S: Into<String>,
   {
      self.tables = tables.into_iter().map(Into::into).collect();
      self
   }

   pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
      self.channel_capacity = capacity;
      self
   }
}
