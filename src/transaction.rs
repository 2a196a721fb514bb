//! The transaction table built from an uploaded spreadsheet.
//!
//! A [TransactionTable] is created once per upload and never mutated
//! afterwards. Filters produce views over it, see
//! [FilteredView](crate::analysis::FilteredView).

use std::collections::BTreeSet;

use serde::Serialize;
use time::Date;

use crate::loader::ContentHash;

/// One dated, signed monetary amount.
///
/// Positive amounts are income and negative amounts are expenses.
/// `year` and `month_bucket` are derived from `date` when the record is
/// created and are `None` exactly when `date` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    date: Option<Date>,
    amount: f64,
    year: Option<i32>,
    month_bucket: Option<Date>,
}

impl TransactionRecord {
    /// Create a record and derive its calendar fields from `date`.
    pub fn new(date: Option<Date>, amount: f64) -> Self {
        Self {
            date,
            amount,
            year: date.map(|date| date.year()),
            month_bucket: date.map(month_bucket),
        }
    }

    /// The transaction date, `None` if the uploaded value could not be parsed.
    pub fn date(&self) -> Option<Date> {
        self.date
    }

    /// The signed amount.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// The calendar year of the transaction date.
    pub fn year(&self) -> Option<i32> {
        self.year
    }

    /// The first day of the month the transaction falls in.
    pub fn month_bucket(&self) -> Option<Date> {
        self.month_bucket
    }
}

/// Truncate `date` to the first day of its month.
pub fn month_bucket(date: Date) -> Date {
    // Every month has a first day, so this never falls back.
    date.replace_day(1).unwrap_or(date)
}

/// The records loaded from a single uploaded file.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionTable {
    file_name: String,
    content_hash: Option<ContentHash>,
    records: Vec<TransactionRecord>,
    unparsed_dates: usize,
    skipped_rows: usize,
}

impl TransactionTable {
    /// Create a table from `records` in file order.
    ///
    /// `skipped_rows` is the number of rows that were dropped while loading
    /// because they had no usable amount.
    pub fn new(file_name: &str, records: Vec<TransactionRecord>, skipped_rows: usize) -> Self {
        let unparsed_dates = records
            .iter()
            .filter(|record| record.date.is_none())
            .count();

        Self {
            file_name: file_name.to_owned(),
            content_hash: None,
            records,
            unparsed_dates,
            skipped_rows,
        }
    }

    /// Attach the hash of the upload the table was parsed from.
    pub fn with_content_hash(mut self, hash: ContentHash) -> Self {
        self.content_hash = Some(hash);
        self
    }

    /// The name of the file the table was loaded from.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The hash of the uploaded bytes, if the table came from an upload.
    pub fn content_hash(&self) -> Option<ContentHash> {
        self.content_hash
    }

    /// All records in file order.
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// The number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The number of records whose date could not be parsed.
    pub fn unparsed_dates(&self) -> usize {
        self.unparsed_dates
    }

    /// The number of rows dropped during loading.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// The distinct years present in the table, in ascending order.
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .filter_map(TransactionRecord::year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// The earliest and latest valid dates, or `None` if no record has a date.
    pub fn date_bounds(&self) -> Option<(Date, Date)> {
        let mut dates = self.records.iter().filter_map(TransactionRecord::date);
        let first = dates.next()?;

        Some(dates.fold((first, first), |(min, max), date| {
            (min.min(date), max.max(date))
        }))
    }

    /// The first `count` records.
    pub fn head(&self, count: usize) -> &[TransactionRecord] {
        &self.records[..count.min(self.records.len())]
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{TransactionRecord, TransactionTable, month_bucket};

    #[test]
    fn record_derives_year_and_month_bucket() {
        let record = TransactionRecord::new(Some(date!(2023 - 02 - 17)), 12.5);

        assert_eq!(record.year(), Some(2023));
        assert_eq!(record.month_bucket(), Some(date!(2023 - 02 - 01)));
        assert_eq!(record.amount(), 12.5);
    }

    #[test]
    fn record_without_date_has_no_calendar_fields() {
        let record = TransactionRecord::new(None, -4.0);

        assert_eq!(record.year(), None);
        assert_eq!(record.month_bucket(), None);
    }

    #[test]
    fn month_bucket_keeps_first_of_month() {
        assert_eq!(month_bucket(date!(2024 - 03 - 01)), date!(2024 - 03 - 01));
        assert_eq!(month_bucket(date!(2024 - 12 - 31)), date!(2024 - 12 - 01));
    }

    #[test]
    fn table_counts_unparsed_dates() {
        let table = TransactionTable::new(
            "test.xlsx",
            vec![
                TransactionRecord::new(Some(date!(2023 - 01 - 05)), 100.0),
                TransactionRecord::new(None, 20.0),
            ],
            3,
        );

        assert_eq!(table.unparsed_dates(), 1);
        assert_eq!(table.skipped_rows(), 3);
        assert_eq!(table.file_name(), "test.xlsx");
    }

    #[test]
    fn years_are_sorted_and_unique() {
        let table = TransactionTable::new(
            "test.xlsx",
            vec![
                TransactionRecord::new(Some(date!(2024 - 01 - 05)), 1.0),
                TransactionRecord::new(Some(date!(2022 - 06 - 05)), 1.0),
                TransactionRecord::new(None, 1.0),
                TransactionRecord::new(Some(date!(2024 - 09 - 05)), 1.0),
            ],
            0,
        );

        assert_eq!(table.years(), vec![2022, 2024]);
    }

    #[test]
    fn date_bounds_ignore_missing_dates() {
        let table = TransactionTable::new(
            "test.xlsx",
            vec![
                TransactionRecord::new(None, 1.0),
                TransactionRecord::new(Some(date!(2023 - 05 - 05)), 1.0),
                TransactionRecord::new(Some(date!(2023 - 01 - 20)), 1.0),
            ],
            0,
        );

        assert_eq!(
            table.date_bounds(),
            Some((date!(2023 - 01 - 20), date!(2023 - 05 - 05)))
        );
    }

    #[test]
    fn date_bounds_are_none_without_dates() {
        let table = TransactionTable::new("test.xlsx", vec![TransactionRecord::new(None, 1.0)], 0);

        assert_eq!(table.date_bounds(), None);
    }

    #[test]
    fn head_is_clamped_to_table_length() {
        let table = TransactionTable::new(
            "test.xlsx",
            vec![TransactionRecord::new(None, 1.0), TransactionRecord::new(None, 2.0)],
            0,
        );

        assert_eq!(table.head(10).len(), 2);
        assert_eq!(table.head(1)[0].amount(), 1.0);
    }
}
