//! Year and date range predicates over a [TransactionTable].

use serde::Serialize;
use time::Date;

use crate::transaction::{TransactionRecord, TransactionTable};

/// Which years to include.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "year")]
pub enum YearSelection {
    /// Records from every year, including records without a date.
    #[default]
    AllYears,
    /// Only records dated in the given year.
    SpecificYear(i32),
}

impl YearSelection {
    fn matches(&self, record: &TransactionRecord) -> bool {
        match self {
            YearSelection::AllYears => true,
            YearSelection::SpecificYear(year) => record.year() == Some(*year),
        }
    }
}

/// A closed range of dates, both ends inclusive.
///
/// A range whose start is after its end contains no dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    /// The first date in the range.
    pub start: Date,
    /// The last date in the range.
    pub end: Date,
}

impl DateRange {
    /// Create the range `[start, end]`.
    pub fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// Whether `date` falls in the range. A missing date never does.
    pub fn contains(&self, date: Option<Date>) -> bool {
        date.is_some_and(|date| self.start <= date && date <= self.end)
    }
}

/// The filters selected by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// The year selection.
    pub year: YearSelection,
    /// The date range, `None` to include every date.
    pub date_range: Option<DateRange>,
}

impl TransactionFilter {
    /// Whether `record` passes both the year and the date predicate.
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        self.year.matches(record)
            && self
                .date_range
                .is_none_or(|range| range.contains(record.date()))
    }

    /// Select the records of `table` that match the filter, in file order.
    pub fn apply<'a>(&self, table: &'a TransactionTable) -> FilteredView<'a> {
        FilteredView {
            records: table
                .records()
                .iter()
                .filter(|record| self.matches(record))
                .collect(),
        }
    }
}

/// A read-only subset of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'a> {
    records: Vec<&'a TransactionRecord>,
}

impl<'a> FilteredView<'a> {
    /// A view of every record in `table`.
    pub fn all(table: &'a TransactionTable) -> Self {
        Self {
            records: table.records().iter().collect(),
        }
    }

    /// The records in the view, in file order.
    pub fn records(&self) -> &[&'a TransactionRecord] {
        &self.records
    }

    /// Iterate over the records in the view.
    pub fn iter(&self) -> impl Iterator<Item = &'a TransactionRecord> + '_ {
        self.records.iter().copied()
    }

    /// The number of records in the view.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the view has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records of this view that fall in `range`.
    pub fn within(&self, range: DateRange) -> FilteredView<'a> {
        FilteredView {
            records: self
                .iter()
                .filter(|record| range.contains(record.date()))
                .collect(),
        }
    }

    /// The first `count` records.
    pub fn head(&self, count: usize) -> &[&'a TransactionRecord] {
        &self.records[..count.min(self.records.len())]
    }

    /// The distinct years in the view, in ascending order.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.iter().filter_map(TransactionRecord::year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }
}
