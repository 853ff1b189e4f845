//! buddy-core
//!
//! Summary and goal-evaluation engine for Budget Buddy.
//! Depends on buddy-domain. No CLI, no terminal I/O, no direct storage interactions.

pub mod aggregate;
pub mod calendar;
pub mod error;
pub mod goals;
pub mod ingest;
pub mod periods;
pub mod summary_service;
pub mod supply;
pub mod time;


pub use aggregate::Aggregator;
pub use error::CoreError;
pub use goals::{CategoryFilter, GoalEvaluation, GoalEvaluator, GoalScope};
pub use ingest::{IngestPolicy, Ingested, RawGoal, RawTransaction, Rejection};
pub use periods::{reporting_periods, ReportingPeriods};
pub use summary_service::{SummaryOptions, SummaryService, DEFAULT_RECENT_LIMIT};
pub use supply::{InMemoryRecords, RecordSupply, TransactionQuery};
pub use time::{Clock, FixedClock};
