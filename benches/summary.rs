use budget_buddy::{Goal, SummaryOptions, SummaryService, Transaction};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;

const CATEGORIES: [&str; 5] = ["Food", "Rent", "Travel", "Salary", "Fun"];

fn snapshot(size: usize) -> (Vec<Transaction>, Vec<Goal>) {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let transactions = (0..size)
        .map(|i| {
            let date = start + Duration::days((i % 540) as i64);
            let amount = Decimal::new((i % 9_000) as i64 + 100, 2);
            let category = CATEGORIES[i % CATEGORIES.len()];
            let txn = if i % 4 == 0 {
                Transaction::income(amount, category, date)
            } else {
                Transaction::expense(amount, category, date)
            };
            txn.with_id(format!("txn-{i}"))
        })
        .collect();
    let goals = CATEGORIES
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let target = Decimal::new(50_000, 0);
            let goal = if i % 2 == 0 {
                Goal::save(format!("Save {category}"), target)
            } else {
                Goal::spend(format!("Cap {category}"), target)
            };
            goal.with_category(*category)
        })
        .collect();
    (transactions, goals)
}

fn summary_benchmark(c: &mut Criterion) {
    let (transactions, goals) = snapshot(10_000);
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
    let options = SummaryOptions::default();

    c.bench_function("summarize_10k_transactions", |b| {
        b.iter(|| {
            SummaryService::summarize(
                black_box(&transactions),
                black_box(&goals),
                now,
                &options,
            )
            .expect("summary")
        })
    });
}

criterion_group!(benches, summary_benchmark);
criterion_main!(benches);
