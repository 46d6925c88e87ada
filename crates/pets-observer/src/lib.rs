//! # pets-observer
//!
//! Change notifications for the pets database. Writers publish a
//! [`TableChange`] after a mutation commits; any number of subscribers
//! receive it through a bounded broadcast channel.
//!
//! Delivery is fire-and-forget: publishing never blocks and succeeds even
//! when nobody is listening. A subscriber that falls more than
//! `channel_capacity` changes behind sees [`TableChangeEvent::Lagged`].
//!
//! # Example
//!
//! ```
//! use pets_observer::{ChangeBroker, ChangeOperation, ObserverConfig, TableChange};
//!
//! let broker = ChangeBroker::new(ObserverConfig::new().with_tables(["pets"]));
//! let mut rx = broker.subscribe();
//!
//! broker.publish(TableChange::new("pets", ChangeOperation::Insert, Some(1), 1));
//!
//! let change = rx.try_recv().unwrap();
//! assert_eq!(change.table, "pets");
//! ```

mod broker;
mod change;
mod config;
mod stream;

pub use broker::ChangeBroker;
pub use change::{ChangeOperation, TableChange, TableChangeEvent};
pub use config::ObserverConfig;
pub use stream::TableChangeStream;
