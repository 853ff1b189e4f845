//! Command-line surface over the summary engine.

use std::path::{Path, PathBuf};

use buddy_config::{Config, ConfigManager};
use buddy_core::{
    Clock, FixedClock, IngestPolicy, SummaryOptions, SummaryService, TransactionQuery,
};
use buddy_domain::{OwnerId, TransactionKind};
use buddy_storage_json::JsonRecordStore;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use crate::{clock::SystemClock, errors::BuddyError};

/// budget_buddy_cli: dashboard summaries and goal progress from a JSON snapshot.
///
/// Reads a snapshot of `transactions` and `goals`, and prints JSON on stdout.
/// Logs go to stderr and follow RUST_LOG.
#[derive(Debug, Parser, Clone)]
#[command(name = "budget_buddy_cli", version)]
pub struct Args {
    /// Config file. Defaults to $BUDGET_BUDDY_HOME/config/config.json.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the dashboard summary (totals, month-over-month change, goals).
    Summary(SummaryArgs),
    /// Print transactions, newest first.
    Transactions(TransactionsArgs),
}

/// Where records come from and how malformed ones are treated.
#[derive(Debug, clap::Args, Clone)]
pub struct SourceArgs {
    /// Snapshot file. Falls back to the configured default snapshot.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Only consider records belonging to this owner.
    #[arg(long)]
    pub owner: Option<String>,

    /// Fail on malformed records instead of skipping them.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Number of recent transactions to include.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Evaluate as of this RFC 3339 instant instead of the current time.
    #[arg(long)]
    pub now: Option<String>,
}

#[derive(Debug, clap::Args, Clone)]
pub struct TransactionsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// income or expense
    #[arg(long)]
    pub kind: Option<String>,

    #[arg(long)]
    pub limit: Option<usize>,
}

/// Executes one command and returns the JSON to print.
pub fn run(args: &Args) -> Result<String, BuddyError> {
    let config = load_config(args.config.as_deref())?;
    match &args.command {
        Command::Summary(summary) => run_summary(summary, &config),
        Command::Transactions(listing) => run_transactions(listing, &config),
    }
}

fn run_summary(args: &SummaryArgs, config: &Config) -> Result<String, BuddyError> {
    let store = open_store(&args.source, config)?;
    let options = SummaryOptions {
        recent_limit: args.limit.unwrap_or(config.recent_limit),
        policy: ingest_policy(&args.source, config),
    };
    let clock: Box<dyn Clock> = match args.now.as_deref() {
        Some(raw) => Box::new(FixedClock(parse_instant(raw)?)),
        None => Box::new(SystemClock),
    };
    let owner = args.source.owner.as_deref().map(OwnerId::from);

    let summary = SummaryService::summarize_for(&store, clock.as_ref(), owner.as_ref(), &options)?;
    info!(
        currency = %config.currency,
        active_goals = summary.active_goals,
        achieved_goals = summary.achieved_goals,
        "summary ready"
    );
    Ok(serde_json::to_string_pretty(&summary)?)
}

fn run_transactions(args: &TransactionsArgs, config: &Config) -> Result<String, BuddyError> {
    let kind = args
        .kind
        .as_deref()
        .map(str::parse::<TransactionKind>)
        .transpose()
        .map_err(BuddyError::Input)?;
    let store = open_store(&args.source, config)?;
    let owner = args.source.owner.as_deref().map(OwnerId::from);

    let transactions = store.query_transactions(
        owner.as_ref(),
        TransactionQuery {
            kind,
            limit: args.limit,
        },
    )?;
    info!(count = transactions.len(), "transactions listed");
    Ok(serde_json::to_string_pretty(&transactions)?)
}

fn load_config(path: Option<&Path>) -> Result<Config, BuddyError> {
    let manager = match path {
        Some(path) if !path.exists() => {
            return Err(BuddyError::Input(format!(
                "config file {} does not exist",
                path.display()
            )));
        }
        Some(path) => ConfigManager::new(path.to_path_buf()),
        None => ConfigManager::new(ConfigManager::default_path()),
    };
    debug!(path = %manager.config_path().display(), "loading config");
    Ok(manager.load()?)
}

fn open_store(source: &SourceArgs, config: &Config) -> Result<JsonRecordStore, BuddyError> {
    let path = source
        .snapshot
        .clone()
        .unwrap_or_else(|| config.resolve_snapshot_path());
    let store = JsonRecordStore::open(path, ingest_policy(source, config))?;
    if !store.rejected().is_empty() {
        warn!(rejected = store.rejected().len(), "malformed records skipped");
    }
    Ok(store)
}

fn ingest_policy(source: &SourceArgs, config: &Config) -> IngestPolicy {
    if source.strict || config.strict_ingest {
        IngestPolicy::Strict
    } else {
        IngestPolicy::Lenient
    }
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>, BuddyError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|err| BuddyError::Input(format!("--now expects an RFC 3339 timestamp: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn summary_flags_parse() {
        let args = Args::try_parse_from([
            "budget_buddy_cli",
            "summary",
            "--snapshot",
            "records.json",
            "--owner",
            "alice",
            "--limit",
            "3",
            "--strict",
        ])
        .expect("valid arguments");
        let Command::Summary(summary) = args.command else {
            panic!("expected summary command");
        };
        assert_eq!(summary.source.snapshot, Some(PathBuf::from("records.json")));
        assert_eq!(summary.source.owner.as_deref(), Some("alice"));
        assert_eq!(summary.limit, Some(3));
        assert!(summary.source.strict);
        assert!(summary.now.is_none());
    }

    #[test]
    fn config_flag_is_accepted_after_subcommand() {
        let args = Args::try_parse_from([
            "budget_buddy_cli",
            "transactions",
            "--kind",
            "income",
            "--config",
            "cfg.json",
        ])
        .expect("valid arguments");
        assert_eq!(args.config, Some(PathBuf::from("cfg.json")));
    }

    #[test]
    fn instants_are_normalized_to_utc() {
        let parsed = parse_instant("2024-06-20T02:30:00+05:00").expect("rfc3339");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 6, 19, 21, 30, 0).unwrap());
        assert!(matches!(parse_instant("yesterday"), Err(BuddyError::Input(_))));
    }

    #[test]
    fn strict_config_wins_over_lenient_flag() {
        let source = SourceArgs {
            snapshot: None,
            owner: None,
            strict: false,
        };
        let config = Config {
            strict_ingest: true,
            ..Config::default()
        };
        assert_eq!(ingest_policy(&source, &config), IngestPolicy::Strict);
        assert_eq!(ingest_policy(&source, &Config::default()), IngestPolicy::Lenient);
    }
}
