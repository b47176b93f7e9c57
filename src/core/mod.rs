//! Stateful components and the coordinating facade.

pub mod archive;
pub mod cart;
pub mod events;
pub mod ledger;
pub mod registry;
pub mod services;
pub mod time;
pub mod tracker;

pub use archive::PriceArchive;
pub use cart::Cart;
pub use events::{ChangeBus, ChangeEvent};
pub use ledger::ExpenseLedger;
pub use registry::{StoreRegistry, DEFAULT_STORES};
pub use time::{Clock, FixedClock, SystemClock};
pub use tracker::{CartAddition, Tracker};
