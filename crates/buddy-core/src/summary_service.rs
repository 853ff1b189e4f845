use buddy_domain::{Goal, OwnerId, SummaryResult, Transaction, TransactionKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    periods::reporting_periods, Aggregator, Clock, CoreError, GoalEvaluator, IngestPolicy,
    RecordSupply, TransactionQuery,
};

pub const DEFAULT_RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryOptions {
    /// Maximum number of entries in `recent_transactions`.
    pub recent_limit: usize,
    /// Handling of transactions that break their invariants.
    pub policy: IngestPolicy,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            recent_limit: DEFAULT_RECENT_LIMIT,
            policy: IngestPolicy::default(),
        }
    }
}

pub struct SummaryService;

impl SummaryService {
    /// Builds the summary for one snapshot as of `now`.
    ///
    /// Pure function of its arguments; no result is produced unless every
    /// step succeeds.
    pub fn summarize(
        transactions: &[Transaction],
        goals: &[Goal],
        now: DateTime<Utc>,
        options: &SummaryOptions,
    ) -> Result<SummaryResult, CoreError> {
        for goal in goals {
            goal.validate()?;
        }
        let transactions = Self::usable_transactions(transactions, options.policy)?;
        let periods = reporting_periods(now)?;

        let expenses_this_month =
            Aggregator::total_in(&transactions, &periods.current, TransactionKind::Expense);
        let income_this_month =
            Aggregator::total_in(&transactions, &periods.current, TransactionKind::Income);
        let expenses_prior_month =
            Aggregator::total_in(&transactions, &periods.prior, TransactionKind::Expense);
        let month_over_month =
            Aggregator::month_over_month(expenses_this_month, expenses_prior_month);
        let expenses_by_category =
            Aggregator::by_category(&transactions, &periods.current, TransactionKind::Expense);
        let evaluation = GoalEvaluator::evaluate_all(goals, &transactions);

        debug!(
            %now,
            current = %periods.current,
            prior = %periods.prior,
            %expenses_this_month,
            %expenses_prior_month,
            active_goals = evaluation.active,
            achieved_goals = evaluation.achieved,
            "summary computed"
        );

        Ok(SummaryResult {
            expenses_this_month,
            income_this_month,
            recent_change_percent: month_over_month.legacy_percent(),
            month_over_month,
            active_goals: evaluation.active,
            achieved_goals: evaluation.achieved,
            recent_transactions: Self::recent_transactions(&transactions, options.recent_limit),
            goal_statuses: evaluation.statuses,
            expenses_by_category,
            current_period: periods.current,
            prior_period: periods.prior,
            generated_at: now,
        })
    }

    /// Fetches the owner's records and summarizes them at the clock's instant.
    pub fn summarize_for<S, C>(
        supply: &S,
        clock: &C,
        owner: Option<&OwnerId>,
        options: &SummaryOptions,
    ) -> Result<SummaryResult, CoreError>
    where
        S: RecordSupply + ?Sized,
        C: Clock + ?Sized,
    {
        let goals = supply.fetch_goals(owner)?;
        let transactions = supply.fetch_transactions(owner)?;
        Self::summarize(&transactions, &goals, clock.now(), options)
    }

    /// Newest `limit` transactions, by `occurred_on` then `recorded_at`.
    pub fn recent_transactions(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
        TransactionQuery {
            kind: None,
            limit: Some(limit),
        }
        .apply(transactions.to_vec())
    }

    fn usable_transactions(
        transactions: &[Transaction],
        policy: IngestPolicy,
    ) -> Result<Vec<Transaction>, CoreError> {
        let mut usable = Vec::with_capacity(transactions.len());
        for txn in transactions {
            match txn.validate() {
                Ok(()) => usable.push(txn.clone()),
                Err(err) if policy == IngestPolicy::Strict => {
                    return Err(CoreError::Malformed {
                        id: err.id,
                        reason: format!("field `{}` {}", err.field, err.reason),
                    })
                }
                Err(err) => warn!(error = %err, "excluding malformed transaction"),
            }
        }
        Ok(usable)
    }
}
