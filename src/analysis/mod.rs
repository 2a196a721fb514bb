//! Aggregations, KPIs and trends over a loaded [TransactionTable](crate::transaction::TransactionTable).
//!
//! Everything in here is a pure function of an immutable table or a
//! [FilteredView] of it. Empty inputs produce empty outputs, never errors.

pub mod aggregation;
pub mod filter;
pub mod kpi;
pub mod report;
pub mod selection;
pub mod statistics;
pub mod trend;

pub use aggregation::{
    MonthlyTotal, YearSeries, YearlyTotal, monthly_totals, monthly_totals_by_year, yearly_totals,
};
pub use filter::{DateRange, FilteredView, TransactionFilter, YearSelection};
pub use kpi::{Kpis, PeriodSummary, add_months, default_periods, round_to_cents};
pub use report::{AnalysisReport, Distributions};
pub use selection::{FilterQuery, Selection};
pub use statistics::{AmountSubset, DistributionSummary, HistogramBin, histogram, quantile};
pub use trend::{BestMonth, CumulativePoint, best_month_per_year, cumulative_balance};
