use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{Extent, Sample, Series};
use crate::error::{ChartError, ChartResult};

/// Fraction of samples at each end that may be treated as outliers.
pub const OUTLIER_MARGIN: f64 = 0.04;

/// Below this many samples the plain `[min, max]` is used.
pub const MIN_SAMPLES_FOR_OUTLIERS: usize = 10;

/// Tuning controls for robust extent estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtentTuning {
    pub outlier_margin: f64,
    /// A positive low bound whose ratio to the high bound falls below this
    /// is snapped to zero.
    pub zero_snap_ratio: f64,
}

impl Default for ExtentTuning {
    fn default() -> Self {
        Self {
            outlier_margin: OUTLIER_MARGIN,
            zero_snap_ratio: 0.1,
        }
    }
}

impl ExtentTuning {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.outlier_margin.is_finite()
            || self.outlier_margin < 0.0
            || self.outlier_margin >= 0.5
        {
            return Err(ChartError::InvalidData(
                "outlier margin must be finite and in [0, 0.5)".to_owned(),
            ));
        }
        if !self.zero_snap_ratio.is_finite() || self.zero_snap_ratio < 0.0 {
            return Err(ChartError::InvalidData(
                "zero snap ratio must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Robust `[min, max]` of one series.
///
/// The interior `1 - 2 * OUTLIER_MARGIN` of the sorted values always lies in
/// the result; values in the margins are only included while they stay
/// within two standard deviations of the interior boundary.
#[must_use]
pub fn single_extent<F>(samples: &[Sample], selector: F) -> Extent
where
    F: Fn(&Sample) -> f64,
{
    single_extent_tuned(samples, selector, ExtentTuning::default())
}

#[must_use]
pub fn single_extent_tuned<F>(samples: &[Sample], selector: F, tuning: ExtentTuning) -> Extent
where
    F: Fn(&Sample) -> f64,
{
    let mut sorted: Vec<OrderedFloat<f64>> = samples
        .iter()
        .map(&selector)
        .filter(|value| !value.is_nan())
        .map(OrderedFloat)
        .collect();
    sorted.sort_unstable();
    let values: Vec<f64> = sorted.into_iter().map(OrderedFloat::into_inner).collect();

    let n = values.len();
    if n == 0 {
        return Extent::zero();
    }
    if n < MIN_SAMPLES_FOR_OUTLIERS {
        return Extent::new(values[0], values[n - 1]);
    }

    let margin = ((n as f64 * tuning.outlier_margin).floor() as usize).min((n - 1) / 2);
    let low_edge = values[margin];
    let high_edge = values[n - margin - 1];
    let std_dev = deviation(&values[margin..n - margin]).unwrap_or((high_edge - low_edge) / 2.0);
    let reach = std_dev * 2.0;

    let low = values[..margin]
        .iter()
        .copied()
        .find(|&value| value + reach > low_edge)
        .unwrap_or(low_edge);
    let high = values[n - margin..]
        .iter()
        .rev()
        .copied()
        .find(|&value| value - reach < high_edge)
        .unwrap_or(high_edge);

    Extent::new(low, high)
}

/// Combined robust extent over several series.
///
/// With `skip_zero`, series whose low bound is exactly zero do not take part
/// in the low-bound comparison and zero forcing is skipped. Otherwise the
/// low bound is pulled down to zero when `force_zero` is set or when it is
/// positive but small relative to the high bound.
///
/// An empty member series contributes `[0, 0]` and so pulls the axis to
/// zero. Drop empty series first when that is unwanted, as
/// [`crate::api::prepare_chart`] does.
#[must_use]
pub fn extent<F>(series: &[Series], selector: F, force_zero: bool, skip_zero: bool) -> Extent
where
    F: Fn(&Sample) -> f64,
{
    extent_tuned(series, selector, force_zero, skip_zero, ExtentTuning::default())
}

#[must_use]
pub fn extent_tuned<F>(
    series: &[Series],
    selector: F,
    force_zero: bool,
    skip_zero: bool,
    tuning: ExtentTuning,
) -> Extent
where
    F: Fn(&Sample) -> f64,
{
    let slices: Vec<&[Sample]> = series.iter().map(|s| s.samples.as_slice()).collect();
    extent_of_samples_tuned(&slices, selector, force_zero, skip_zero, tuning)
}

/// Same as [`extent`] over bare sample slices.
#[must_use]
pub fn extent_of_samples<F>(
    series: &[&[Sample]],
    selector: F,
    force_zero: bool,
    skip_zero: bool,
) -> Extent
where
    F: Fn(&Sample) -> f64,
{
    extent_of_samples_tuned(series, selector, force_zero, skip_zero, ExtentTuning::default())
}

#[must_use]
pub fn extent_of_samples_tuned<F>(
    series: &[&[Sample]],
    selector: F,
    force_zero: bool,
    skip_zero: bool,
    tuning: ExtentTuning,
) -> Extent
where
    F: Fn(&Sample) -> f64,
{
    if series.is_empty() {
        return Extent::zero();
    }

    let mut low: Option<f64> = None;
    let mut high = f64::NEG_INFINITY;
    for samples in series {
        let e = single_extent_tuned(samples, &selector, tuning);
        high = high.max(e.max);
        if skip_zero && e.min == 0.0 {
            continue;
        }
        low = Some(low.map_or(e.min, |current| current.min(e.min)));
    }

    let mut combined = Extent::new(low.unwrap_or(0.0), high);
    if skip_zero {
        return combined;
    }

    if force_zero
        || (combined.min > 0.0 && combined.min / combined.max < tuning.zero_snap_ratio)
    {
        combined.min = combined.min.min(0.0);
    }

    combined
}

/// Sample standard deviation (`n - 1` denominator), `None` below two values.
fn deviation(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    // Welford keeps long, large-magnitude series stable.
    let mut mean = 0.0;
    let mut sum_sq = 0.0;
    for (i, &value) in values.iter().enumerate() {
        let delta = value - mean;
        mean += delta / (i + 1) as f64;
        sum_sq += delta * (value - mean);
    }

    let variance = sum_sq / (values.len() - 1) as f64;
    variance.is_finite().then(|| variance.sqrt())
}
