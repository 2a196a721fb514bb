//! Distribution summaries and histograms of amounts.

use serde::Serialize;

use crate::transaction::TransactionRecord;

/// Which amounts a summary covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountSubset {
    /// Every amount.
    All,
    /// Amounts greater than zero.
    Income,
    /// Amounts less than zero.
    Expenses,
}

impl AmountSubset {
    /// Whether `amount` belongs to the subset.
    pub fn contains(&self, amount: f64) -> bool {
        match self {
            AmountSubset::All => true,
            AmountSubset::Income => amount > 0.0,
            AmountSubset::Expenses => amount < 0.0,
        }
    }

    /// The amounts of `records` that belong to the subset.
    pub fn select<'a>(&self, records: impl IntoIterator<Item = &'a TransactionRecord>) -> Vec<f64> {
        records
            .into_iter()
            .map(TransactionRecord::amount)
            .filter(|amount| self.contains(*amount))
            .collect()
    }
}

/// Count, moments and quartiles of a set of values.
///
/// Every statistic is `None` when it is undefined for the input: all of them
/// for an empty input, and the standard deviation for fewer than two values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DistributionSummary {
    /// The number of values.
    pub count: usize,
    /// The arithmetic mean.
    pub mean: Option<f64>,
    /// The sample standard deviation (n - 1 in the denominator).
    pub std_dev: Option<f64>,
    /// The smallest value.
    pub min: Option<f64>,
    /// The first quartile.
    pub q1: Option<f64>,
    /// The second quartile.
    pub median: Option<f64>,
    /// The third quartile.
    pub q3: Option<f64>,
    /// The largest value.
    pub max: Option<f64>,
}

impl DistributionSummary {
    /// Summarise `values`. The order of `values` does not matter.
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;

        let std_dev = (count >= 2).then(|| {
            let squared_deviations: f64 = sorted.iter().map(|value| (value - mean).powi(2)).sum();
            (squared_deviations / (count - 1) as f64).sqrt()
        });

        Self {
            count,
            mean: Some(mean),
            std_dev,
            min: sorted.first().copied(),
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted.last().copied(),
        }
    }

    /// Summarise the amounts of `records` in `subset`.
    pub fn of_amounts<'a>(
        records: impl IntoIterator<Item = &'a TransactionRecord>,
        subset: AmountSubset,
    ) -> Self {
        Self::from_values(&subset.select(records))
    }
}

/// The `q`-th quantile of `sorted`, interpolating linearly between the two
/// closest ranks.
///
/// `sorted` must be in ascending order. Returns `None` for an empty slice.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let position = last as f64 * q.clamp(0.0, 1.0);
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// One bar of a histogram, covering `[lower, upper)`.
///
/// The last bin also includes its upper edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    /// The lower edge of the bin.
    pub lower: f64,
    /// The upper edge of the bin.
    pub upper: f64,
    /// The number of values in the bin.
    pub count: usize,
}

/// Bin `values` into equal width bins, choosing the number of bins with
/// Sturges' rule.
pub fn histogram(values: &[f64]) -> Vec<HistogramBin> {
    let (Some(min), Some(max)) = (
        values.iter().copied().reduce(f64::min),
        values.iter().copied().reduce(f64::max),
    ) else {
        return Vec::new();
    };

    if min == max {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: values.len(),
        }];
    }

    let bin_count = sturges_bin_count(values.len());
    let width = (max - min) / bin_count as f64;

    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|index| HistogramBin {
            lower: min + width * index as f64,
            upper: if index + 1 == bin_count {
                max
            } else {
                min + width * (index + 1) as f64
            },
            count: 0,
        })
        .collect();

    for value in values {
        let index = (((value - min) / width).floor() as usize).min(bin_count - 1);
        bins[index].count += 1;
    }

    bins
}

/// `ceil(log2(n)) + 1`.
fn sturges_bin_count(value_count: usize) -> usize {
    (value_count as f64).log2().ceil() as usize + 1
}
