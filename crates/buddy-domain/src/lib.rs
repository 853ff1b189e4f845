//! buddy-domain
//!
//! Pure domain models (Transaction, Goal, Period, SummaryResult).
//! No I/O, no CLI, no storage. Only data types, core enums, and invariant checks.

pub mod common;
pub mod goal;
pub mod period;
pub mod summary;
pub mod transaction;

pub use common::*;
pub use goal::*;
pub use period::*;
pub use summary::*;
pub use transaction::*;
