//! Small descriptive-statistics helpers shared by the aggregates.
//!
//! Every helper returns `None` instead of NaN when the statistic is
//! undefined (no observations, zero variance).

/// Running sum/count for a mean.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeanAccumulator {
    sum: f64,
    count: usize,
}

impl MeanAccumulator {
    pub fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    /// Add `value` when present; missing values are skipped.
    pub fn push_opt(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.push(v);
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Arithmetic mean of the present values.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut acc = MeanAccumulator::default();
    for v in values {
        acc.push_opt(v);
    }
    acc.mean()
}

/// Quantile of an already sorted slice using linear interpolation between
/// the two closest ranks.
///
/// q: Quantile between 0.0 and 1.0 (0.5 is the median)
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }

    let pos = q * (sorted.len() - 1) as f64;
    let idx_lower = pos.floor() as usize;
    let idx_upper = pos.ceil() as usize;

    if idx_lower == idx_upper {
        Some(sorted[idx_lower])
    } else {
        let weight_upper = pos - idx_lower as f64;
        let weight_lower = 1.0 - weight_upper;
        Some(weight_lower * sorted[idx_lower] + weight_upper * sorted[idx_upper])
    }
}

/// Quantile of unsorted values.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    quantile_sorted(&sorted, q)
}

/// Pearson correlation over the pairs where both sides are present.
///
/// Undefined with fewer than two complete pairs or when either side has
/// zero variance.
pub fn pearson<I>(pairs: I) -> Option<f64>
where
    I: IntoIterator<Item = (Option<f64>, Option<f64>)>,
{
    let complete: Vec<(f64, f64)> = pairs
        .into_iter()
        .filter_map(|(x, y)| Some((x?, y?)))
        .collect();
    if complete.len() < 2 {
        return None;
    }

    let n = complete.len() as f64;
    let mean_x = complete.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = complete.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov_sum = 0.0;
    let mut var_x_sum = 0.0;
    let mut var_y_sum = 0.0;
    for (x, y) in &complete {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov_sum += dx * dy;
        var_x_sum += dx * dx;
        var_y_sum += dy * dy;
    }

    if var_x_sum <= 0.0 || var_y_sum <= 0.0 {
        return None;
    }
    let r = cov_sum / (var_x_sum.sqrt() * var_y_sum.sqrt());
    Some(r.clamp(-1.0, 1.0))
}

/// Five-number summary for a box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    /// Observations beyond the whiskers, ascending.
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    /// Whiskers reach the most extreme observation within 1.5 IQR of the
    /// quartiles. `sorted` must be ascending.
    pub fn from_sorted(sorted: &[f64]) -> Option<Self> {
        let q1 = quantile_sorted(sorted, 0.25)?;
        let median = quantile_sorted(sorted, 0.5)?;
        let q3 = quantile_sorted(sorted, 0.75)?;
        let iqr = q3 - q1;
        let lo_fence = q1 - 1.5 * iqr;
        let hi_fence = q3 + 1.5 * iqr;

        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|&v| v >= lo_fence)
            .unwrap_or(q1);
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= hi_fence)
            .unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < lo_fence || v > hi_fence)
            .collect();

        Some(BoxSummary {
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
            outliers,
        })
    }
}
