//! Scalar summaries of a filtered view and period comparisons.

use serde::Serialize;
use time::{Date, Month};

use crate::{analysis::filter::DateRange, transaction::TransactionRecord};

/// The number of months covered by each default comparison period.
pub const DEFAULT_PERIOD_MONTHS: u32 = 3;

/// The headline figures of a set of transactions.
///
/// Values are kept at full precision; use [Kpis::rounded] for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Kpis {
    /// The sum of all amounts.
    pub total_balance: f64,
    /// The sum of the positive amounts.
    pub total_income: f64,
    /// The sum of the negative amounts, zero or less.
    pub total_expenses: f64,
    /// The number of transactions.
    pub transaction_count: usize,
}

impl Kpis {
    /// Calculate the KPIs of `records`.
    pub fn calculate<'a>(records: impl IntoIterator<Item = &'a TransactionRecord>) -> Self {
        records.into_iter().fold(Kpis::default(), |mut kpis, record| {
            let amount = record.amount();

            kpis.total_balance += amount;
            kpis.transaction_count += 1;

            if amount > 0.0 {
                kpis.total_income += amount;
            } else if amount < 0.0 {
                kpis.total_expenses += amount;
            }

            kpis
        })
    }

    /// The KPIs with amounts rounded to cents.
    pub fn rounded(&self) -> Self {
        Self {
            total_balance: round_to_cents(self.total_balance),
            total_income: round_to_cents(self.total_income),
            total_expenses: round_to_cents(self.total_expenses),
            transaction_count: self.transaction_count,
        }
    }
}

/// Round `amount` to two decimal places.
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// The total amount and number of transactions in a date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    /// A name for the period, e.g. "Period 1".
    pub label: String,
    /// The dates covered by the period.
    pub range: DateRange,
    /// The sum of the amounts in the period.
    pub total_amount: f64,
    /// The number of transactions in the period.
    pub transactions: usize,
}

impl PeriodSummary {
    /// Summarise the `records` that fall in `range`.
    pub fn calculate<'a>(
        label: &str,
        range: DateRange,
        records: impl IntoIterator<Item = &'a TransactionRecord>,
    ) -> Self {
        let kpis = Kpis::calculate(
            records
                .into_iter()
                .filter(|record| range.contains(record.date())),
        );

        Self {
            label: label.to_owned(),
            range,
            total_amount: kpis.total_balance,
            transactions: kpis.transaction_count,
        }
    }
}

/// The two default comparison periods starting at `first_date`: the next
/// three months, and the three months after that.
///
/// The periods share their boundary date.
pub fn default_periods(first_date: Date) -> (DateRange, DateRange) {
    let middle = add_months(first_date, DEFAULT_PERIOD_MONTHS);
    let end = add_months(first_date, DEFAULT_PERIOD_MONTHS * 2);

    (
        DateRange::new(first_date, middle),
        DateRange::new(middle, end),
    )
}

/// Add calendar months to `date`, clamping the day to the end of shorter
/// months, e.g. 31 January plus one month is 28 or 29 February.
///
/// Saturates at the last representable date.
pub fn add_months(date: Date, months: u32) -> Date {
    let month_index = i64::from(u8::from(date.month())) - 1 + i64::from(months);
    let year = i64::from(date.year()) + month_index.div_euclid(12);
    let month = (month_index.rem_euclid(12) + 1) as u8;

    let (Ok(year), Ok(month)) = (i32::try_from(year), Month::try_from(month)) else {
        return Date::MAX;
    };

    let mut day = date.day();

    loop {
        match Date::from_calendar_date(year, month, day) {
            Ok(date) => return date,
            Err(_) if day > 28 => day -= 1,
            Err(_) => return Date::MAX,
        }
    }
}
