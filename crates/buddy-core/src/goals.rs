//! Goal progress evaluation.
//!
//! Achievement is derived from the snapshot on every call and is not a one-way
//! transition: a `spend` goal that later sees more expenses reports
//! `achieved = false` again.

use buddy_domain::{Goal, GoalStatus, Transaction};
use chrono::{DateTime, NaiveDate, Timelike, Utc};
use rust_decimal::Decimal;
use tracing::trace;

use crate::Aggregator;

/// Category predicate of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter<'a> {
    Any,
    Exactly(&'a str),
}

impl<'a> CategoryFilter<'a> {
    pub fn for_goal(goal: &'a Goal) -> Self {
        match goal.category_filter() {
            Some(name) => CategoryFilter::Exactly(name),
            None => CategoryFilter::Any,
        }
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            CategoryFilter::Any => true,
            CategoryFilter::Exactly(name) => transaction.category == *name,
        }
    }
}

/// Selects the transactions governed by a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalScope<'a> {
    /// Earliest counted date. Transactions are dated at 00:00 UTC, so a goal
    /// created after midnight only counts from the following day. Goals
    /// without a creation time count from the epoch.
    pub since: NaiveDate,
    pub category: CategoryFilter<'a>,
}

impl<'a> GoalScope<'a> {
    pub fn for_goal(goal: &'a Goal) -> Self {
        let since = goal
            .created_at
            .map(first_counted_day)
            // 1970-01-01
            .unwrap_or_default();
        Self {
            since,
            category: CategoryFilter::for_goal(goal),
        }
    }

    pub fn includes(&self, transaction: &Transaction) -> bool {
        transaction.occurred_on >= self.since && self.category.matches(transaction)
    }
}

fn first_counted_day(created: DateTime<Utc>) -> NaiveDate {
    let day = created.date_naive();
    if created.num_seconds_from_midnight() == 0 && created.nanosecond() == 0 {
        day
    } else {
        day.succ_opt().unwrap_or(NaiveDate::MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalEvaluation {
    pub statuses: Vec<GoalStatus>,
    pub active: usize,
    pub achieved: usize,
}

pub struct GoalEvaluator;

impl GoalEvaluator {
    /// Evaluates one goal with a single pass over `transactions`.
    pub fn evaluate(goal: &Goal, transactions: &[Transaction]) -> GoalStatus {
        let scope = GoalScope::for_goal(goal);
        let progress = Aggregator::total(
            transactions.iter().filter(|txn| scope.includes(txn)),
            goal.goal_kind.tracked_kind(),
        );
        let achieved = goal.goal_kind.is_met(progress, goal.target_amount);
        let remaining = goal.target_amount.saturating_sub(progress).max(Decimal::ZERO);
        trace!(goal = %goal.id, %progress, achieved, "goal evaluated");
        GoalStatus {
            goal_id: goal.id.clone(),
            title: goal.title.clone(),
            goal_kind: goal.goal_kind,
            target_amount: goal.target_amount,
            achieved,
            progress,
            remaining,
        }
    }

    pub fn evaluate_all(goals: &[Goal], transactions: &[Transaction]) -> GoalEvaluation {
        let statuses: Vec<GoalStatus> = goals
            .iter()
            .map(|goal| Self::evaluate(goal, transactions))
            .collect();
        let achieved = statuses.iter().filter(|status| status.achieved).count();
        GoalEvaluation {
            active: statuses.len(),
            achieved,
            statuses,
        }
    }
}
