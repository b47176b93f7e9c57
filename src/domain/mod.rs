//! Pure domain models for the expense tracker.
//!
//! Data types only: expenses and their line items, reporting periods,
//! reference prices, and aggregate statistics. No I/O, no storage.

pub mod expense;
pub mod period;
pub mod reference;
pub mod stats;

pub use expense::*;
pub use period::*;
pub use reference::*;
pub use stats::*;
