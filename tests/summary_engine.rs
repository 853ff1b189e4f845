mod common;

use budget_buddy::{
    init, FixedClock, IngestPolicy, JsonRecordStore, MonthOverMonth, OwnerId, SummaryOptions,
    SummaryService,
};
use buddy_domain::{Period, Transaction};
use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;

use common::{write_snapshot, JUNE_SNAPSHOT};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn june_clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2024, 6, 20, 12, 0, 0).unwrap())
}

#[test]
fn owner_summary_from_snapshot() {
    init();
    let (_dir, path) = write_snapshot(JUNE_SNAPSHOT);
    let store = JsonRecordStore::open(&path, IngestPolicy::Lenient).expect("open snapshot");
    assert_eq!(store.rejected().len(), 1);

    let alice = OwnerId::from("alice");
    let summary = SummaryService::summarize_for(
        &store,
        &june_clock(),
        Some(&alice),
        &SummaryOptions::default(),
    )
    .expect("summary");

    // jun-late is dated after `now` and stays out of the current period.
    assert_eq!(summary.expenses_this_month, dec!(150));
    assert_eq!(summary.income_this_month, dec!(2080));
    assert_eq!(summary.recent_change_percent, -25);
    assert_eq!(summary.month_over_month, MonthOverMonth::Percent { percent: -25 });
    assert_eq!(summary.active_goals, 2);
    assert_eq!(summary.achieved_goals, 1);

    let trip = &summary.goal_statuses[0];
    assert_eq!(trip.progress, dec!(80));
    assert!(trip.achieved);
    let food = &summary.goal_statuses[1];
    assert_eq!(food.progress, dec!(30));
    assert!(!food.achieved);

    let ids: Vec<&str> = summary
        .recent_transactions
        .iter()
        .map(|txn| txn.id.as_str())
        .collect();
    assert_eq!(ids, vec!["jun-late", "legacy", "jun-rent", "jun-food", "jun-pay"]);
    assert!(summary
        .recent_transactions
        .iter()
        .all(|txn| txn.owner.as_ref() == Some(&alice)));
}

#[test]
fn unscoped_summary_sees_every_owner() {
    let store = JsonRecordStore::from_json(JUNE_SNAPSHOT, IngestPolicy::Lenient).expect("store");
    let summary =
        SummaryService::summarize_for(&store, &june_clock(), None, &SummaryOptions::default())
            .expect("summary");
    assert_eq!(summary.expenses_this_month, dec!(1149));
    assert_eq!(summary.active_goals, 3);
}

#[test]
fn strict_loading_fails_on_malformed_amount() {
    let (_dir, path) = write_snapshot(JUNE_SNAPSHOT);
    let err = JsonRecordStore::open(&path, IngestPolicy::Strict).expect_err("strict load");
    assert!(err.to_string().contains("broken"), "unexpected error: {err}");
}

#[test]
fn january_compares_against_previous_december() {
    let txns = vec![
        Transaction::expense(dec!(100), "Gifts", date(2023, 12, 24)),
        Transaction::expense(dec!(50), "Food", date(2024, 1, 10)),
    ];
    let now = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
    let summary = SummaryService::summarize(&txns, &[], now, &SummaryOptions::default())
        .expect("summary");

    assert_eq!(
        summary.prior_period,
        Period::new(date(2023, 12, 1), date(2023, 12, 31)).unwrap()
    );
    assert_eq!(summary.current_period.start, date(2024, 1, 1));
    assert_eq!(summary.recent_change_percent, -50);
}

#[test]
fn leap_february_is_a_full_prior_month() {
    let txns = vec![
        Transaction::expense(dec!(40), "Food", date(2024, 2, 29)),
        Transaction::expense(dec!(60), "Food", date(2024, 3, 2)),
    ];
    let now = Utc.with_ymd_and_hms(2024, 3, 10, 18, 0, 0).unwrap();
    let summary = SummaryService::summarize(&txns, &[], now, &SummaryOptions::default())
        .expect("summary");

    assert_eq!(summary.prior_period.end, date(2024, 2, 29));
    assert_eq!(summary.expenses_this_month, dec!(60));
    assert_eq!(summary.recent_change_percent, 50);
}
