//! Trend, best month and period comparison charts of the exploratory page.

use charming::{
    Chart,
    component::{Legend, Title, VisualMap, VisualMapPiece},
    datatype::DataPoint,
    series::{Line, bar},
};

use crate::{
    analysis::{
        BestMonth, CumulativePoint, MonthlyTotal, PeriodSummary, YearSeries,
        aggregation::{calendar_month_labels, format_month_labels},
        selection::format_query_date,
    },
    charts::{category_axis, chart_grid, currency_axis, currency_tooltip},
};

/// The x-axis label of a running balance point without a date.
const NO_DATE_LABEL: &str = "No date";

/// Shown by ECharts as a gap in a line.
const MISSING_VALUE: &str = "-";

/// The running balance of the filtered transactions in date order.
pub(super) fn cumulative_balance_chart(points: &[CumulativePoint]) -> Chart {
    let labels = points
        .iter()
        .map(|point| {
            point
                .date
                .map_or_else(|| NO_DATE_LABEL.to_owned(), format_query_date)
        })
        .collect();
    let values: Vec<f64> = points.iter().map(|point| point.balance).collect();

    Chart::new()
        .title(Title::new().text("Cumulative Balance").subtext("In date order"))
        .tooltip(currency_tooltip())
        .grid(chart_grid())
        .x_axis(category_axis(labels))
        .y_axis(currency_axis())
        .series(Line::new().name("Balance").data(values))
}

/// The total of each month, coloured by whether it was a gain or a loss.
pub(super) fn monthly_trend_chart(monthly_totals: &[MonthlyTotal]) -> Chart {
    let months: Vec<_> = monthly_totals.iter().map(|total| total.month).collect();
    let values: Vec<f64> = monthly_totals.iter().map(|total| total.amount).collect();

    Chart::new()
        .title(Title::new().text("Monthly Trend").subtext("Total per month"))
        .tooltip(currency_tooltip())
        .grid(chart_grid())
        .x_axis(category_axis(format_month_labels(&months)))
        .y_axis(currency_axis())
        .visual_map(VisualMap::new().show(false).pieces(vec![
            VisualMapPiece::new().lte(-1).color("red"),
            VisualMapPiece::new().gte(0).color("green"),
        ]))
        .series(Line::new().name("Amount").data(values))
}

/// One line per year over the twelve calendar months. Months without
/// transactions are left as gaps.
pub(super) fn monthly_by_year_chart(series: &[YearSeries]) -> Chart {
    let mut chart = Chart::new()
        .title(
            Title::new()
                .text("Monthly Totals by Year")
                .left(20)
                .top("1%"),
        )
        .tooltip(currency_tooltip())
        .legend(Legend::new().left(250).top("1%"))
        .grid(chart_grid().top(90))
        .x_axis(category_axis(calendar_month_labels()))
        .y_axis(currency_axis());

    for year_series in series {
        let data: Vec<DataPoint> = year_series
            .by_calendar_month()
            .into_iter()
            .map(|amount| amount.map_or_else(|| DataPoint::from(MISSING_VALUE), DataPoint::from))
            .collect();

        chart = chart.series(
            Line::new()
                .name(year_series.year.to_string())
                .data(data),
        );
    }

    chart
}

/// The best month of each year.
pub(super) fn best_months_chart(best_months: &[BestMonth]) -> Chart {
    let labels = best_months
        .iter()
        .map(|best| format!("{} ({})", best.year, best.month_name))
        .collect();
    let values: Vec<f64> = best_months.iter().map(|best| best.amount).collect();

    Chart::new()
        .title(
            Title::new()
                .text("Best Month per Year")
                .subtext("Across all loaded transactions"),
        )
        .tooltip(currency_tooltip())
        .grid(chart_grid())
        .x_axis(category_axis(labels))
        .y_axis(currency_axis())
        .series(bar::Bar::new().name("Total").data(values))
}

/// The total amount of each comparison period.
pub(super) fn period_comparison_chart(periods: &[PeriodSummary]) -> Chart {
    let labels = periods.iter().map(|period| period.label.clone()).collect();
    let values: Vec<f64> = periods.iter().map(|period| period.total_amount).collect();

    Chart::new()
        .title(Title::new().text("Period Comparison").subtext("Total amount"))
        .tooltip(currency_tooltip())
        .grid(chart_grid())
        .x_axis(category_axis(labels))
        .y_axis(currency_axis())
        .series(bar::Bar::new().name("Total Amount").data(values))
}
