//! Everything the exploratory page and the JSON API show for one selection.

use serde::Serialize;

use crate::{
    analysis::{
        aggregation::{
            MonthlyTotal, YearSeries, YearlyTotal, monthly_totals, monthly_totals_by_year,
            yearly_totals,
        },
        filter::{DateRange, FilteredView, YearSelection},
        kpi::{Kpis, PeriodSummary},
        selection::Selection,
        statistics::{AmountSubset, DistributionSummary},
        trend::{BestMonth, CumulativePoint, best_month_per_year, cumulative_balance},
    },
    transaction::TransactionTable,
};

/// Distribution summaries of the filtered amounts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Distributions {
    /// Every amount.
    pub all: DistributionSummary,
    /// Positive amounts.
    pub income: DistributionSummary,
    /// Negative amounts.
    pub expenses: DistributionSummary,
}

/// The analysis of a filtered view of the loaded table.
///
/// KPIs are computed at full precision here and rounded by whoever
/// displays them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// The name of the uploaded file.
    pub file_name: String,
    /// The year filter that was applied.
    pub year: YearSelection,
    /// The date filter that was applied, if any.
    pub date_range: Option<DateRange>,
    /// The number of records that passed the filters.
    pub row_count: usize,
    /// Headline figures of the filtered records.
    pub kpis: Kpis,
    /// Distribution summaries of the filtered amounts.
    pub distributions: Distributions,
    /// Totals per month of the filtered records.
    pub monthly_totals: Vec<MonthlyTotal>,
    /// Totals per month, one series per year.
    pub monthly_totals_by_year: Vec<YearSeries>,
    /// Totals per year of the filtered records.
    pub yearly_totals: Vec<YearlyTotal>,
    /// Running balance of the filtered records in date order.
    pub cumulative_balance: Vec<CumulativePoint>,
    /// The best month of each year, over the whole table.
    pub best_months: Vec<BestMonth>,
    /// The comparison periods, empty if none could be determined.
    pub periods: Vec<PeriodSummary>,
}

impl AnalysisReport {
    /// Run every analysis for `selection` over `table`.
    pub fn build(table: &TransactionTable, selection: &Selection) -> Self {
        let view = selection.filter.apply(table);

        Self::from_view(table, &view, selection)
    }

    /// Run every analysis over an already filtered `view` of `table`.
    pub fn from_view(table: &TransactionTable, view: &FilteredView, selection: &Selection) -> Self {
        let periods = selection
            .periods
            .map(|(period1, period2)| {
                vec![
                    PeriodSummary::calculate("Period 1", period1, view.iter()),
                    PeriodSummary::calculate("Period 2", period2, view.iter()),
                ]
            })
            .unwrap_or_default();

        Self {
            file_name: table.file_name().to_owned(),
            year: selection.filter.year,
            date_range: selection.filter.date_range,
            row_count: view.len(),
            kpis: Kpis::calculate(view.iter()),
            distributions: Distributions {
                all: DistributionSummary::of_amounts(view.iter(), AmountSubset::All),
                income: DistributionSummary::of_amounts(view.iter(), AmountSubset::Income),
                expenses: DistributionSummary::of_amounts(view.iter(), AmountSubset::Expenses),
            },
            monthly_totals: monthly_totals(view.iter()),
            monthly_totals_by_year: monthly_totals_by_year(view.iter()),
            yearly_totals: yearly_totals(view.iter()),
            cumulative_balance: cumulative_balance(view.iter()),
            best_months: best_month_per_year(table.records()),
            periods,
        }
    }
}
