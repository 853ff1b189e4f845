//! Domain models for income and expense transactions.

use std::{cmp::Ordering, fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::*;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
/// Direction of money movement for a transaction.
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(format!("unknown transaction kind `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerId>,
    pub kind: TransactionKind,
    pub amount: Decimal,
    #[serde(default)]
    pub category: String,
    pub occurred_on: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        amount: Decimal,
        category: impl Into<String>,
        occurred_on: NaiveDate,
    ) -> Self {
        Self {
            id: RecordId::generate(),
            owner: None,
            kind,
            amount,
            category: category.into(),
            occurred_on,
            note: None,
            recorded_at: Utc::now(),
        }
    }

    pub fn income(amount: Decimal, category: impl Into<String>, occurred_on: NaiveDate) -> Self {
        Self::new(TransactionKind::Income, amount, category, occurred_on)
    }

    pub fn expense(amount: Decimal, category: impl Into<String>, occurred_on: NaiveDate) -> Self {
        Self::new(TransactionKind::Expense, amount, category, occurred_on)
    }

    pub fn with_id(mut self, id: impl Into<RecordId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_owner(mut self, owner: impl Into<OwnerId>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_recorded_at(mut self, recorded_at: DateTime<Utc>) -> Self {
        self.recorded_at = recorded_at;
        self
    }

    /// Checks the data-model invariants: `amount >= 0`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.amount < Decimal::ZERO {
            return Err(ValidationError::new(
                "transaction",
                self.id.as_str(),
                "amount",
                format!("must not be negative (got {})", self.amount),
            ));
        }
        Ok(())
    }

    /// Orders transactions newest first: by `occurred_on` descending, then by
    /// `recorded_at` descending.
    pub fn cmp_recency(&self, other: &Self) -> Ordering {
        other
            .occurred_on
            .cmp(&self.occurred_on)
            .then_with(|| other.recorded_at.cmp(&self.recorded_at))
    }
}

impl Owned for Transaction {
    fn owner(&self) -> Option<&OwnerId> {
        self.owner.as_ref()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} [{}]",
            self.occurred_on, self.kind, self.amount, self.category
        )
    }
}
