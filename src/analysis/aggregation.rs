//! Grouped sums of transaction amounts.
//!
//! Records without a date have no month or year and are left out of every
//! grouping here. Months without transactions are absent rather than zero.

use std::collections::BTreeMap;

use serde::Serialize;
use time::{Date, Month};

use crate::transaction::TransactionRecord;

/// The sum of amounts for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyTotal {
    /// The first day of the month.
    pub month: Date,
    /// The sum of the amounts in the month.
    pub amount: f64,
}

/// The monthly totals of a single year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSeries {
    /// The calendar year.
    pub year: i32,
    /// The months of `year` that have transactions, in ascending order.
    pub months: Vec<MonthlyTotal>,
}

impl YearSeries {
    /// The total for each calendar month, January first, `None` for months
    /// without transactions.
    pub fn by_calendar_month(&self) -> [Option<f64>; 12] {
        let mut values = [None; 12];

        for total in &self.months {
            values[usize::from(u8::from(total.month.month())) - 1] = Some(total.amount);
        }

        values
    }
}

/// The sum of amounts for one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearlyTotal {
    /// The calendar year.
    pub year: i32,
    /// The sum of the amounts in the year.
    pub amount: f64,
}

/// Sum amounts by month, sorted by month ascending.
pub fn monthly_totals<'a>(
    records: impl IntoIterator<Item = &'a TransactionRecord>,
) -> Vec<MonthlyTotal> {
    let mut totals: BTreeMap<Date, f64> = BTreeMap::new();

    for record in records {
        if let Some(month) = record.month_bucket() {
            *totals.entry(month).or_insert(0.0) += record.amount();
        }
    }

    totals
        .into_iter()
        .map(|(month, amount)| MonthlyTotal { month, amount })
        .collect()
}

/// Sum amounts by year and month, one series per year in ascending order.
pub fn monthly_totals_by_year<'a>(
    records: impl IntoIterator<Item = &'a TransactionRecord>,
) -> Vec<YearSeries> {
    let mut series: Vec<YearSeries> = Vec::new();

    for total in monthly_totals(records) {
        let year = total.month.year();

        match series.last_mut() {
            Some(last) if last.year == year => last.months.push(total),
            _ => series.push(YearSeries {
                year,
                months: vec![total],
            }),
        }
    }

    series
}

/// Sum amounts by year, sorted by year ascending.
pub fn yearly_totals<'a>(
    records: impl IntoIterator<Item = &'a TransactionRecord>,
) -> Vec<YearlyTotal> {
    let mut totals: BTreeMap<i32, f64> = BTreeMap::new();

    for record in records {
        if let Some(year) = record.year() {
            *totals.entry(year).or_insert(0.0) += record.amount();
        }
    }

    totals
        .into_iter()
        .map(|(year, amount)| YearlyTotal { year, amount })
        .collect()
}

/// The three letter abbreviation of a month, e.g. "Jan".
pub fn month_abbreviation(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

/// Formats months as labels like "Jan 2023".
pub fn format_month_labels(months: &[Date]) -> Vec<String> {
    months
        .iter()
        .map(|month| format!("{} {}", month_abbreviation(month.month()), month.year()))
        .collect()
}

/// The abbreviations of the twelve months, January first.
pub fn calendar_month_labels() -> Vec<String> {
    let mut month = Month::January;
    let mut labels = Vec::with_capacity(12);

    for _ in 0..12 {
        labels.push(month_abbreviation(month).to_owned());
        month = month.next();
    }

    labels
}
