//! Record supply seam between the engine and persistence.

use buddy_domain::{Goal, Owned, OwnerId, Transaction, TransactionKind};

use crate::CoreError;

/// Provides owner-scoped snapshots of transactions and goals.
///
/// The two collections may come from independent reads; the engine tolerates
/// the resulting skew and never asks for an atomic cross-collection read.
pub trait RecordSupply: Send + Sync {
    fn fetch_transactions(&self, owner: Option<&OwnerId>) -> Result<Vec<Transaction>, CoreError>;
    fn fetch_goals(&self, owner: Option<&OwnerId>) -> Result<Vec<Goal>, CoreError>;
}

/// Record supply backed by owned vectors.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecords {
    transactions: Vec<Transaction>,
    goals: Vec<Goal>,
}

impl InMemoryRecords {
    pub fn new(transactions: Vec<Transaction>, goals: Vec<Goal>) -> Self {
        Self {
            transactions,
            goals,
        }
    }

    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub fn add_goal(&mut self, goal: Goal) {
        self.goals.push(goal);
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }
}

impl RecordSupply for InMemoryRecords {
    fn fetch_transactions(&self, owner: Option<&OwnerId>) -> Result<Vec<Transaction>, CoreError> {
        Ok(visible(&self.transactions, owner))
    }

    fn fetch_goals(&self, owner: Option<&OwnerId>) -> Result<Vec<Goal>, CoreError> {
        Ok(visible(&self.goals, owner))
    }
}

fn visible<T: Owned + Clone>(records: &[T], owner: Option<&OwnerId>) -> Vec<T> {
    records
        .iter()
        .filter(|record| record.visible_to(owner))
        .cloned()
        .collect()
}

/// Listing filter for transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionQuery {
    pub kind: Option<TransactionKind>,
    pub limit: Option<usize>,
}

impl TransactionQuery {
    /// Filters by kind, orders newest first, and truncates to `limit`.
    pub fn apply(&self, mut transactions: Vec<Transaction>) -> Vec<Transaction> {
        if let Some(kind) = self.kind {
            transactions.retain(|txn| txn.kind == kind);
        }
        transactions.sort_by(Transaction::cmp_recency);
        if let Some(limit) = self.limit {
            transactions.truncate(limit);
        }
        transactions
    }
}
