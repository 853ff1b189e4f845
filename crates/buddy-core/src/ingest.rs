//! Conversion of raw wire records into validated domain records.
//!
//! Raw data quality is not guaranteed upstream. A record missing a required
//! field is a shape violation and always fails ingestion. A record whose
//! fields are present but unusable (non-numeric or negative amount,
//! unparseable date, unknown kind) is malformed: under
//! [`IngestPolicy::Lenient`] it is excluded and reported in
//! [`Ingested::rejected`], under [`IngestPolicy::Strict`] it fails ingestion.

use std::str::FromStr;

use buddy_domain::{Goal, GoalKind, OwnerId, RecordId, Transaction, TransactionKind};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::CoreError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestPolicy {
    /// Exclude malformed records and keep going.
    #[default]
    Lenient,
    /// Fail on the first malformed record.
    Strict,
}

/// Transaction as found on the wire. Field aliases accept the legacy
/// document layout (`_id`, `user`, `type`, `date`, `createdAt`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default, alias = "user")]
    pub owner: Option<String>,
    #[serde(default, alias = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "date")]
    pub occurred_on: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub recorded_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGoal {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default, alias = "user")]
    pub owner: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "type")]
    pub goal_kind: Option<String>,
    #[serde(default)]
    pub target_amount: Option<Value>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A record excluded during lenient ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub id: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ingested<T> {
    pub accepted: Vec<T>,
    pub rejected: Vec<Rejection>,
}

enum Defect {
    Shape(String),
    Malformed(String),
}

fn missing(field: &str) -> Defect {
    Defect::Shape(format!("missing required field `{field}`"))
}

pub fn ingest_transactions(
    raw: Vec<RawTransaction>,
    policy: IngestPolicy,
) -> Result<Ingested<Transaction>, CoreError> {
    let mut ingested = Ingested {
        accepted: Vec::with_capacity(raw.len()),
        rejected: Vec::new(),
    };
    for (index, record) in raw.into_iter().enumerate() {
        let label = record_label(record.id.as_deref(), index);
        match record.parse() {
            Ok(transaction) => ingested.accepted.push(transaction),
            Err(Defect::Shape(reason)) => {
                return Err(CoreError::Validation(format!(
                    "transaction `{label}`: {reason}"
                )))
            }
            Err(Defect::Malformed(reason)) => {
                if policy == IngestPolicy::Strict {
                    return Err(CoreError::Malformed { id: label, reason });
                }
                warn!(record = %label, %reason, "excluding malformed transaction");
                ingested.rejected.push(Rejection { id: label, reason });
            }
        }
    }
    debug!(
        accepted = ingested.accepted.len(),
        rejected = ingested.rejected.len(),
        "transactions ingested"
    );
    Ok(ingested)
}

/// Goals have no partial tolerance: any defect is a validation error.
pub fn ingest_goals(raw: Vec<RawGoal>) -> Result<Vec<Goal>, CoreError> {
    let mut goals = Vec::with_capacity(raw.len());
    for (index, record) in raw.into_iter().enumerate() {
        let label = record_label(record.id.as_deref(), index);
        let goal = record.parse().map_err(|defect| {
            let reason = match defect {
                Defect::Shape(reason) | Defect::Malformed(reason) => reason,
            };
            CoreError::Validation(format!("goal `{label}`: {reason}"))
        })?;
        goal.validate()?;
        goals.push(goal);
    }
    debug!(goals = goals.len(), "goals ingested");
    Ok(goals)
}

impl RawTransaction {
    fn parse(self) -> Result<Transaction, Defect> {
        let id = non_blank(self.id).ok_or_else(|| missing("id"))?;
        let kind = self.kind.ok_or_else(|| missing("kind"))?;
        let amount = self.amount.ok_or_else(|| missing("amount"))?;
        let occurred_on = self.occurred_on.ok_or_else(|| missing("occurredOn"))?;

        let kind = TransactionKind::from_str(&kind).map_err(Defect::Malformed)?;
        let amount = parse_amount(&amount).map_err(Defect::Malformed)?;
        let occurred_on = parse_date(&occurred_on).ok_or_else(|| {
            Defect::Malformed(format!("occurredOn `{occurred_on}` is not a date"))
        })?;
        let recorded_at = match self.recorded_at.as_deref() {
            Some(text) => parse_timestamp(text).unwrap_or_else(|| {
                debug!(record = %id, recorded_at = text, "unreadable recordedAt, using epoch");
                DateTime::<Utc>::default()
            }),
            None => DateTime::<Utc>::default(),
        };

        Ok(Transaction {
            id: RecordId::new(id),
            owner: non_blank(self.owner).map(OwnerId::new),
            kind,
            amount,
            category: self.category.unwrap_or_default(),
            occurred_on,
            note: self.note,
            recorded_at,
        })
    }
}

impl RawGoal {
    fn parse(self) -> Result<Goal, Defect> {
        let id = non_blank(self.id).ok_or_else(|| missing("id"))?;
        let title = self.title.ok_or_else(|| missing("title"))?;
        let target = self.target_amount.ok_or_else(|| missing("targetAmount"))?;

        let goal_kind = match self.goal_kind.as_deref() {
            Some(kind) => GoalKind::from_str(kind).map_err(Defect::Malformed)?,
            None => GoalKind::default(),
        };
        let target_amount = parse_amount(&target).map_err(Defect::Malformed)?;
        let created_at = match self.created_at {
            Some(text) => Some(parse_timestamp(&text).ok_or_else(|| {
                Defect::Malformed(format!("createdAt `{text}` is not a timestamp"))
            })?),
            None => None,
        };
        let due_date = self.due_date.and_then(|text| {
            let parsed = parse_date(&text);
            if parsed.is_none() {
                warn!(goal = %id, due_date = %text, "ignoring unreadable dueDate");
            }
            parsed
        });

        Ok(Goal {
            id: RecordId::new(id),
            owner: non_blank(self.owner).map(OwnerId::new),
            title,
            goal_kind,
            target_amount,
            category: non_blank(self.category),
            due_date,
            created_at,
        })
    }
}

fn record_label(id: Option<&str>, index: usize) -> String {
    match id.map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => format!("#{index}"),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn parse_amount(value: &Value) -> Result<Decimal, String> {
    let text = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().to_string(),
        other => return Err(format!("amount `{other}` is not numeric")),
    };
    let amount = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| format!("amount `{text}` is not numeric"))?;
    if amount < Decimal::ZERO {
        return Err(format!("amount {amount} is negative"));
    }
    Ok(amount)
}

/// Accepts `YYYY-MM-DD`, RFC 3339 (reduced to its UTC date), or a naive
/// `YYYY-MM-DDTHH:MM:SS` timestamp.
fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_timestamp(text).map(|ts| ts.date_naive()))
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(DateTime::from_naive_utc_and_offset(naive, Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}
