//! Turns the filter query string into a [TransactionFilter] and comparison
//! periods.
//!
//! Missing or malformed values never cause an error. They fall back to the
//! same defaults the filter form starts with.

use serde::Deserialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    analysis::{
        filter::{DateRange, TransactionFilter, YearSelection},
        kpi::default_periods,
    },
    transaction::TransactionTable,
};

const QUERY_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// The value of the `year` parameter that selects every year.
pub const ALL_YEARS: &str = "all";

/// The filter form fields as they arrive in the query string.
///
/// Empty strings are treated the same as absent fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FilterQuery {
    /// `all` or a calendar year.
    pub year: Option<String>,
    /// The first date of the date range, `YYYY-MM-DD`.
    pub start: Option<String>,
    /// The last date of the date range, `YYYY-MM-DD`.
    pub end: Option<String>,
    /// The first date of the first comparison period.
    pub period1_start: Option<String>,
    /// The last date of the first comparison period.
    pub period1_end: Option<String>,
    /// The first date of the second comparison period.
    pub period2_start: Option<String>,
    /// The last date of the second comparison period.
    pub period2_end: Option<String>,
}

/// The resolved filters and comparison periods for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// The year and date range filters.
    pub filter: TransactionFilter,
    /// The two periods to compare, `None` if the table has no dates to
    /// derive defaults from and the query gave none.
    pub periods: Option<(DateRange, DateRange)>,
}

impl FilterQuery {
    /// Resolve the query against the loaded `table`.
    ///
    /// - The year defaults to all years.
    /// - With neither date bound given, the range spans the whole table.
    ///   With only one bound given no date filter applies.
    /// - Each comparison period defaults to the consecutive three month
    ///   periods starting at the earliest date in the table.
    pub fn resolve(&self, table: &TransactionTable) -> Selection {
        let bounds = table.date_bounds();

        let year = parse_year(self.year.as_deref());

        let start = parse_query_date(self.start.as_deref(), "start");
        let end = parse_query_date(self.end.as_deref(), "end");
        let date_range = match (start, end) {
            (Some(start), Some(end)) => Some(DateRange::new(start, end)),
            (None, None) if is_unset(&self.start) && is_unset(&self.end) => {
                bounds.map(|(first, last)| DateRange::new(first, last))
            }
            _ => {
                tracing::debug!("Incomplete date range {start:?} to {end:?}, not filtering by date");
                None
            }
        };

        let defaults = bounds.map(|(first, _)| default_periods(first));
        let period1 = period_or_default(
            self.period1_start.as_deref(),
            self.period1_end.as_deref(),
            defaults.map(|(period1, _)| period1),
        );
        let period2 = period_or_default(
            self.period2_start.as_deref(),
            self.period2_end.as_deref(),
            defaults.map(|(_, period2)| period2),
        );

        Selection {
            filter: TransactionFilter { year, date_range },
            periods: period1.zip(period2),
        }
    }
}

fn is_unset(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|value| value.trim().is_empty())
}

fn parse_year(value: Option<&str>) -> YearSelection {
    let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) else {
        return YearSelection::AllYears;
    };

    if value.eq_ignore_ascii_case(ALL_YEARS) {
        return YearSelection::AllYears;
    }

    match value.parse() {
        Ok(year) => YearSelection::SpecificYear(year),
        Err(error) => {
            tracing::debug!("Ignoring invalid year {value:?}: {error}");
            YearSelection::AllYears
        }
    }
}

fn parse_query_date(value: Option<&str>, field: &str) -> Option<Date> {
    let value = value.map(str::trim).filter(|value| !value.is_empty())?;

    Date::parse(value, QUERY_DATE_FORMAT)
        .inspect_err(|error| tracing::debug!("Ignoring invalid {field} date {value:?}: {error}"))
        .ok()
}

fn period_or_default(
    start: Option<&str>,
    end: Option<&str>,
    default: Option<DateRange>,
) -> Option<DateRange> {
    match (
        parse_query_date(start, "period start"),
        parse_query_date(end, "period end"),
    ) {
        (Some(start), Some(end)) => Some(DateRange::new(start, end)),
        _ => default,
    }
}

/// Format a date the way the filter form expects it.
pub fn format_query_date(date: Date) -> String {
    date.format(QUERY_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}
