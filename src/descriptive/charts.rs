//! Histograms of the income and expense amounts.

use charming::{
    Chart,
    component::{Axis, Title},
    element::AxisType,
    series::bar,
};

use crate::{
    analysis::{DistributionSummary, HistogramBin, histogram},
    charts::{category_axis, chart_grid, count_tooltip},
    html::format_currency,
};

/// A histogram of `values`, with the mean of `summary` in the subtitle.
pub(super) fn histogram_chart(
    title: &str,
    values: &[f64],
    summary: &DistributionSummary,
) -> Chart {
    let bins = histogram(values);
    let labels = bins.iter().map(bin_label).collect();
    let counts: Vec<f64> = bins.iter().map(|bin| bin.count as f64).collect();

    let subtext = match summary.mean {
        Some(mean) => format!("Mean: {}", format_currency(mean)),
        None => "No transactions".to_owned(),
    };

    Chart::new()
        .title(Title::new().text(title).subtext(subtext))
        .tooltip(count_tooltip())
        .grid(chart_grid())
        .x_axis(category_axis(labels))
        .y_axis(Axis::new().type_(AxisType::Value).name("Transactions"))
        .series(bar::Bar::new().name("Transactions").data(counts))
}

fn bin_label(bin: &HistogramBin) -> String {
    format!(
        "{} to {}",
        format_currency(bin.lower),
        format_currency(bin.upper)
    )
}

#[cfg(test)]
mod tests {
    use crate::analysis::DistributionSummary;

    use super::histogram_chart;

    #[test]
    fn subtitle_shows_the_mean() {
        let values = [10.0, 20.0, 30.0];
        let summary = DistributionSummary::from_values(&values);

        let options = histogram_chart("Income", &values, &summary).to_string();

        assert!(options.contains("Mean: $20.00"), "got {options}");
        assert!(options.contains("$10.00 to"), "got {options}");
    }

    #[test]
    fn empty_histogram_says_so() {
        let options = histogram_chart("Income", &[], &DistributionSummary::default()).to_string();

        assert!(options.contains("No transactions"), "got {options}");
    }
}
