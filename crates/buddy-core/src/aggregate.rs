//! Period and kind filtered sums over transactions.

use std::collections::BTreeMap;

use buddy_domain::{CategoryTotal, MonthOverMonth, Period, Transaction, TransactionKind};
use rust_decimal::{prelude::ToPrimitive, Decimal};

pub struct Aggregator;

impl Aggregator {
    /// Sums the amounts of `transactions` whose kind is `kind`.
    ///
    /// Sums saturate at `Decimal::MAX` instead of overflowing.
    pub fn total<'a, I>(transactions: I, kind: TransactionKind) -> Decimal
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        transactions
            .into_iter()
            .filter(|txn| txn.kind == kind)
            .fold(Decimal::ZERO, |acc, txn| acc.saturating_add(txn.amount))
    }

    /// Sums the amounts of `kind` transactions that occurred within `period`.
    pub fn total_in(transactions: &[Transaction], period: &Period, kind: TransactionKind) -> Decimal {
        Self::total(
            transactions
                .iter()
                .filter(|txn| period.contains(txn.occurred_on)),
            kind,
        )
    }

    /// Per-category totals within `period`, largest first, ties by name.
    pub fn by_category(
        transactions: &[Transaction],
        period: &Period,
        kind: TransactionKind,
    ) -> Vec<CategoryTotal> {
        let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
        for txn in transactions
            .iter()
            .filter(|txn| txn.kind == kind && period.contains(txn.occurred_on))
        {
            let entry = totals.entry(txn.category.as_str()).or_insert(Decimal::ZERO);
            *entry = entry.saturating_add(txn.amount);
        }
        let mut rows: Vec<CategoryTotal> = totals
            .into_iter()
            .map(|(category, total)| CategoryTotal {
                category: category.to_string(),
                total,
            })
            .collect();
        rows.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
        rows
    }

    /// Compares current against prior spending.
    ///
    /// With a zero baseline there is no finite percentage; the result is
    /// `NoActivity` or `NoPriorData`. Otherwise the change is
    /// `round((current - prior) / prior * 100)` with halves rounded toward
    /// positive infinity and no clamping.
    pub fn month_over_month(current: Decimal, prior: Decimal) -> MonthOverMonth {
        if prior.is_zero() {
            return if current.is_zero() {
                MonthOverMonth::NoActivity
            } else {
                MonthOverMonth::NoPriorData
            };
        }
        let delta = current - prior;
        let saturated = if delta.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        };
        let percent = delta
            .checked_div(prior)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .and_then(|scaled| scaled.checked_add(Decimal::new(5, 1)))
            .and_then(|shifted| shifted.floor().to_i64())
            .unwrap_or(saturated);
        MonthOverMonth::Percent { percent }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn march() -> Period {
        Period::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap()
    }

    #[test]
    fn empty_collection_sums_to_zero() {
        assert_eq!(Aggregator::total_in(&[], &march(), TransactionKind::Expense), Decimal::ZERO);
    }

    #[test]
    fn sums_only_matching_kind_inside_period() {
        let txns = vec![
            Transaction::expense(dec!(10.25), "Food", date(2024, 3, 1)),
            Transaction::expense(dec!(5), "Food", date(2024, 3, 31)),
            Transaction::expense(dec!(100), "Food", date(2024, 4, 1)),
            Transaction::expense(dec!(100), "Food", date(2024, 2, 29)),
            Transaction::income(dec!(999), "Salary", date(2024, 3, 15)),
        ];
        assert_eq!(
            Aggregator::total_in(&txns, &march(), TransactionKind::Expense),
            dec!(15.25)
        );
        assert_eq!(
            Aggregator::total_in(&txns, &march(), TransactionKind::Income),
            dec!(999)
        );
    }

    #[test]
    fn category_breakdown_is_sorted_by_total() {
        let txns = vec![
            Transaction::expense(dec!(10), "Food", date(2024, 3, 2)),
            Transaction::expense(dec!(30), "Rent", date(2024, 3, 3)),
            Transaction::expense(dec!(25), "Food", date(2024, 3, 4)),
            Transaction::expense(dec!(35), "Bills", date(2024, 3, 5)),
            Transaction::income(dec!(50), "Food", date(2024, 3, 5)),
        ];
        let rows = Aggregator::by_category(&txns, &march(), TransactionKind::Expense);
        let labels: Vec<(&str, Decimal)> =
            rows.iter().map(|row| (row.category.as_str(), row.total)).collect();
        assert_eq!(labels, vec![("Bills", dec!(35)), ("Food", dec!(35)), ("Rent", dec!(30))]);
    }

    #[test]
    fn zero_baseline_cases() {
        assert_eq!(
            Aggregator::month_over_month(Decimal::ZERO, Decimal::ZERO),
            MonthOverMonth::NoActivity
        );
        assert_eq!(
            Aggregator::month_over_month(dec!(0.01), Decimal::ZERO),
            MonthOverMonth::NoPriorData
        );
    }

    #[test]
    fn percent_change_is_rounded_and_signed() {
        assert_eq!(
            Aggregator::month_over_month(dec!(150), dec!(100)),
            MonthOverMonth::Percent { percent: 50 }
        );
        assert_eq!(
            Aggregator::month_over_month(dec!(0), dec!(80)),
            MonthOverMonth::Percent { percent: -100 }
        );
        assert_eq!(
            Aggregator::month_over_month(dec!(100), dec!(30)),
            MonthOverMonth::Percent { percent: 233 }
        );
        assert_eq!(
            Aggregator::month_over_month(dec!(1000), dec!(1)),
            MonthOverMonth::Percent { percent: 99900 }
        );
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(
            Aggregator::month_over_month(dec!(100.5), dec!(100)),
            MonthOverMonth::Percent { percent: 1 }
        );
        assert_eq!(
            Aggregator::month_over_month(dec!(99.5), dec!(100)),
            MonthOverMonth::Percent { percent: 0 }
        );
        assert_eq!(
            Aggregator::month_over_month(dec!(98.5), dec!(100)),
            MonthOverMonth::Percent { percent: -1 }
        );
    }
}
