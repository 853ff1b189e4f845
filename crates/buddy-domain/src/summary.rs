//! Result structures handed to the presentation layer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    common::RecordId, goal::GoalKind, period::Period, transaction::Transaction,
};

/// Change in spending between the prior and the current period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "trend", rename_all = "camelCase")]
pub enum MonthOverMonth {
    /// No expenses in either period.
    NoActivity,
    /// Expenses this period, none in the prior one; no finite percentage exists.
    NoPriorData,
    /// Signed, rounded percentage change against the prior period.
    Percent { percent: i64 },
}

impl MonthOverMonth {
    /// Integer form where the missing-baseline case is reported as `100`.
    pub fn legacy_percent(self) -> i64 {
        match self {
            MonthOverMonth::NoActivity => 0,
            MonthOverMonth::NoPriorData => 100,
            MonthOverMonth::Percent { percent } => percent,
        }
    }
}

/// Evaluation of one goal against the current snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GoalStatus {
    pub goal_id: RecordId,
    pub title: String,
    pub goal_kind: GoalKind,
    pub target_amount: Decimal,
    pub achieved: bool,
    pub progress: Decimal,
    /// Amount still to save, or spending headroom left; never negative.
    pub remaining: Decimal,
}

/// Total of one category within a period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    pub expenses_this_month: Decimal,
    pub income_this_month: Decimal,
    pub recent_change_percent: i64,
    pub month_over_month: MonthOverMonth,
    pub active_goals: usize,
    pub achieved_goals: usize,
    pub recent_transactions: Vec<Transaction>,
    pub goal_statuses: Vec<GoalStatus>,
    pub expenses_by_category: Vec<CategoryTotal>,
    pub current_period: Period,
    pub prior_period: Period,
    pub generated_at: DateTime<Utc>,
}
