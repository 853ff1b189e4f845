#![doc(test(attr(deny(warnings))))]

//! Budget Buddy computes dashboard summaries and goal progress from a
//! snapshot of income/expense transactions and savings or spending goals.

pub mod cli;
pub mod clock;
pub mod errors;
pub mod utils;

use std::sync::Once;

pub use buddy_config::{Config, ConfigManager};
pub use buddy_core::{
    Clock, CoreError, FixedClock, IngestPolicy, RecordSupply, SummaryOptions, SummaryService,
    TransactionQuery,
};
pub use buddy_domain::{
    Goal, GoalKind, GoalStatus, MonthOverMonth, OwnerId, SummaryResult, Transaction,
    TransactionKind,
};
pub use buddy_storage_json::{save_snapshot, JsonRecordStore};
pub use clock::SystemClock;
pub use errors::BuddyError;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Buddy tracing initialized.");
    });
}
