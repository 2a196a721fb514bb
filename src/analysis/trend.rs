//! Running balances and the best month of each year.

use std::collections::BTreeMap;

use serde::Serialize;
use time::{Date, Month};

use crate::transaction::TransactionRecord;

/// The running total after one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CumulativePoint {
    /// The transaction date, `None` for records without a valid date.
    pub date: Option<Date>,
    /// The sum of this and all earlier amounts.
    pub balance: f64,
}

/// The running sum of amounts in date order.
///
/// The sort is stable so transactions on the same day keep their file
/// order. Records without a date are placed last, so the final balance is
/// always the total of every amount.
pub fn cumulative_balance<'a>(
    records: impl IntoIterator<Item = &'a TransactionRecord>,
) -> Vec<CumulativePoint> {
    let mut sorted: Vec<&TransactionRecord> = records.into_iter().collect();
    sorted.sort_by_key(|record| (record.date().is_none(), record.date()));

    let mut balance = 0.0;

    sorted
        .into_iter()
        .map(|record| {
            balance += record.amount();
            CumulativePoint {
                date: record.date(),
                balance,
            }
        })
        .collect()
}

/// The calendar month with the largest total in a year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestMonth {
    /// The calendar year.
    pub year: i32,
    /// The month number, 1 for January.
    pub month: u8,
    /// The English name of the month, e.g. "February".
    pub month_name: String,
    /// The total of the month.
    pub amount: f64,
}

/// For each year, the calendar month whose amounts sum to the most.
///
/// When two months tie, the earlier one wins. Records without a date are
/// ignored. Years are returned in ascending order.
pub fn best_month_per_year<'a>(
    records: impl IntoIterator<Item = &'a TransactionRecord>,
) -> Vec<BestMonth> {
    let mut totals: BTreeMap<(i32, u8), f64> = BTreeMap::new();

    for record in records {
        if let Some(date) = record.date() {
            *totals
                .entry((date.year(), u8::from(date.month())))
                .or_insert(0.0) += record.amount();
        }
    }

    let mut best: BTreeMap<i32, (u8, f64)> = BTreeMap::new();

    // Months are visited in ascending order, so only a strictly larger
    // total replaces the current best.
    for ((year, month), amount) in totals {
        best.entry(year)
            .and_modify(|current| {
                if amount > current.1 {
                    *current = (month, amount);
                }
            })
            .or_insert((month, amount));
    }

    best.into_iter()
        .map(|(year, (month, amount))| BestMonth {
            year,
            month,
            month_name: month_name(month),
            amount,
        })
        .collect()
}

fn month_name(month: u8) -> String {
    Month::try_from(month)
        .map(|month| month.to_string())
        .unwrap_or_else(|_| month.to_string())
}
