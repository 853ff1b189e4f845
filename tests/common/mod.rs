use std::path::PathBuf;

use tempfile::TempDir;

/// Snapshot for two owners around June 2024, with one malformed record.
pub const JUNE_SNAPSHOT: &str = r#"{
  "transactions": [
    {"id": "may-rent", "owner": "alice", "kind": "expense", "amount": 200, "category": "Rent", "occurredOn": "2024-05-03", "recordedAt": "2024-05-03T08:00:00Z"},
    {"id": "jun-food", "owner": "alice", "kind": "expense", "amount": 30, "category": "Food", "occurredOn": "2024-06-02", "recordedAt": "2024-06-02T12:00:00Z"},
    {"id": "jun-rent", "owner": "alice", "kind": "expense", "amount": 120, "category": "Rent", "occurredOn": "2024-06-03", "recordedAt": "2024-06-03T08:00:00Z"},
    {"id": "jun-pay", "owner": "alice", "kind": "income", "amount": 2000, "category": "Salary", "occurredOn": "2024-06-01", "recordedAt": "2024-06-01T09:00:00Z"},
    {"id": "jun-late", "owner": "alice", "kind": "expense", "amount": 500, "category": "Rent", "occurredOn": "2024-06-28", "recordedAt": "2024-06-10T09:00:00Z"},
    {"_id": "legacy", "user": "alice", "type": "income", "amount": "80", "category": "Travel", "date": "2024-06-05", "createdAt": "2024-06-05T10:00:00Z"},
    {"id": "broken", "owner": "alice", "kind": "expense", "amount": "lots", "category": "Food", "occurredOn": "2024-06-04"},
    {"id": "bob-food", "owner": "bob", "kind": "expense", "amount": 999, "category": "Food", "occurredOn": "2024-06-04"}
  ],
  "goals": [
    {"id": "trip", "owner": "alice", "title": "Trip", "goalKind": "save", "targetAmount": 50, "category": "Travel", "createdAt": "2024-06-01T00:00:00Z"},
    {"id": "food-cap", "owner": "alice", "title": "Food cap", "goalKind": "spend", "targetAmount": 25, "category": "Food", "createdAt": "2024-06-01T00:00:00Z"},
    {"id": "bob-fund", "owner": "bob", "title": "Fund", "targetAmount": 10}
  ]
}"#;

/// Writes `contents` to a snapshot file inside a fresh temporary directory.
pub fn write_snapshot(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("snapshot.json");
    std::fs::write(&path, contents).expect("write snapshot");
    (dir, path)
}
