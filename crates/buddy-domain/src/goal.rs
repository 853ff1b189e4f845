//! Savings and spending goals.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{common::*, transaction::TransactionKind};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
/// Whether a goal tracks money saved or caps money spent.
pub enum GoalKind {
    #[default]
    Save,
    Spend,
}

impl GoalKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GoalKind::Save => "save",
            GoalKind::Spend => "spend",
        }
    }

    /// Transaction kind whose amounts count toward progress.
    pub fn tracked_kind(self) -> TransactionKind {
        match self {
            GoalKind::Save => TransactionKind::Income,
            GoalKind::Spend => TransactionKind::Expense,
        }
    }

    /// `save` goals need progress at or above target, `spend` goals at or below.
    pub fn is_met(self, progress: Decimal, target: Decimal) -> bool {
        match self {
            GoalKind::Save => progress >= target,
            GoalKind::Spend => progress <= target,
        }
    }
}

impl fmt::Display for GoalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "save" => Ok(GoalKind::Save),
            "spend" => Ok(GoalKind::Spend),
            other => Err(format!("unknown goal kind `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerId>,
    pub title: String,
    #[serde(default)]
    pub goal_kind: GoalKind,
    pub target_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Advisory only; never enforced when evaluating progress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Goal {
    pub fn new(title: impl Into<String>, goal_kind: GoalKind, target_amount: Decimal) -> Self {
        Self {
            id: RecordId::generate(),
            owner: None,
            title: title.into(),
            goal_kind,
            target_amount,
            category: None,
            due_date: None,
            created_at: Some(Utc::now()),
        }
    }

    pub fn save(title: impl Into<String>, target_amount: Decimal) -> Self {
        Self::new(title, GoalKind::Save, target_amount)
    }

    pub fn spend(title: impl Into<String>, target_amount: Decimal) -> Self {
        Self::new(title, GoalKind::Spend, target_amount)
    }

    pub fn with_id(mut self, id: impl Into<RecordId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_owner(mut self, owner: impl Into<OwnerId>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_created_at(mut self, created_at: Option<DateTime<Utc>>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Category filter, with an empty string treated as "no filter".
    pub fn category_filter(&self) -> Option<&str> {
        self.category.as_deref().filter(|name| !name.is_empty())
    }

    /// Checks the data-model invariants: non-empty title, `target_amount >= 0`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::new(
                "goal",
                self.id.as_str(),
                "title",
                "must not be empty",
            ));
        }
        if self.target_amount < Decimal::ZERO {
            return Err(ValidationError::new(
                "goal",
                self.id.as_str(),
                "targetAmount",
                format!("must not be negative (got {})", self.target_amount),
            ));
        }
        Ok(())
    }
}

impl Owned for Goal {
    fn owner(&self) -> Option<&OwnerId> {
        self.owner.as_ref()
    }
}
