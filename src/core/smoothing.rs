use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::primitives::map_range;
use crate::core::{Sample, Series};

/// Slider domain of the smoothness control.
pub const SMOOTH_VALUE_MIN: f64 = 1.0;
pub const SMOOTH_VALUE_MAX: f64 = 100.0;

/// At full smoothness the window spans this fraction of the shortest series.
const MAX_SMOOTH_FRACTION: f64 = 0.1;

/// Per-series smoothing windows for the current and base (comparison) groups.
///
/// `current` and `base` are parallel to the input groups. Window sizes are
/// sample counts and always `>= 1`; `smooth_range_steps` is the shared
/// smoothing span in step units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothPlan {
    pub current: Vec<usize>,
    pub base: Vec<usize>,
    pub smooth_range_steps: f64,
}

impl SmoothPlan {
    fn unsmoothed(current_len: usize, base_len: usize) -> Self {
        Self {
            current: vec![1; current_len],
            base: vec![1; base_len],
            smooth_range_steps: 0.0,
        }
    }
}

fn is_density_eligible(series: &Series) -> bool {
    !series.is_summary && !series.is_empty()
}

/// Derives smoothing windows from the smoothness slider value.
///
/// The absolute smoothing span is tied to the shortest non-summary series so
/// that runs of very different lengths get comparable smoothing; each window
/// is then converted to samples using that series' own step spacing.
#[must_use]
pub fn plan_smooth_windows(current: &[Series], base: &[Series], smooth_value: f64) -> SmoothPlan {
    let min_range = current
        .iter()
        .chain(base)
        .filter(|series| is_density_eligible(series))
        .filter_map(Series::step_span)
        .reduce(f64::min);

    let Some(min_range) = min_range else {
        debug!(
            current = current.len(),
            base = base.len(),
            "no eligible series for smoothing"
        );
        return SmoothPlan::unsmoothed(current.len(), base.len());
    };

    let smooth_range_steps = map_range(
        smooth_value,
        SMOOTH_VALUE_MIN,
        SMOOTH_VALUE_MAX,
        1.0,
        min_range * MAX_SMOOTH_FRACTION,
    );

    let plan = SmoothPlan {
        current: current
            .iter()
            .map(|series| window_size(series, smooth_range_steps))
            .collect(),
        base: base
            .iter()
            .map(|series| window_size(series, smooth_range_steps))
            .collect(),
        smooth_range_steps,
    };
    debug!(
        min_range,
        smooth_value,
        smooth_range_steps,
        "planned smoothing windows"
    );
    plan
}

fn window_size(series: &Series, smooth_range_steps: f64) -> usize {
    if series.is_summary || series.len() < 2 {
        return 1;
    }

    let mut step_gap = series.samples[1].step - series.samples[0].step;
    if !(step_gap.is_finite() && step_gap > 0.0) {
        trace!(series = %series.name, step_gap, "degenerate step gap, assuming 1");
        step_gap = 1.0;
    }

    let samples = (smooth_range_steps / step_gap).floor();
    if samples.is_finite() && samples >= 1.0 {
        samples as usize
    } else {
        1
    }
}

/// Neumaier-compensated running sum. The compensation term holds the low
/// bits lost when a small value is added to a large total, so retiring a
/// large value does not cancel them.
#[derive(Debug, Clone, Copy, Default)]
struct RunningSum {
    total: f64,
    compensation: f64,
}

impl RunningSum {
    fn add(&mut self, value: f64) {
        let sum = self.total + value;
        if self.total.abs() >= value.abs() {
            self.compensation += (self.total - sum) + value;
        } else {
            self.compensation += (value - sum) + self.total;
        }
        self.total = sum;
    }

    fn value(self) -> f64 {
        self.total + self.compensation
    }
}

/// Centered moving average over the `smoothed` field.
///
/// Output sample `j` averages the samples within `window_size / 2` positions
/// on either side, clipped at the series ends, and keeps the step of sample
/// `j`. Series no longer than the window are returned unchanged.
#[must_use]
pub fn smooth(samples: &[Sample], window_size: usize) -> Vec<Sample> {
    if samples.len() <= window_size {
        return samples.to_vec();
    }

    let extra = window_size / 2;
    let mut result = Vec::with_capacity(samples.len());
    let mut window_sum = RunningSum::default();
    let mut count = 0usize;

    // Each iteration admits one sample on the right and, once the window is
    // full, retires one on the left.
    for i in 0..samples.len() + extra {
        if i < samples.len() {
            window_sum.add(samples[i].smoothed);
            count += 1;
        }
        let Some(j) = i.checked_sub(extra) else {
            continue;
        };
        if let Some(retired) = j.checked_sub(extra + 1) {
            window_sum.add(-samples[retired].smoothed);
            count -= 1;
        }

        let average = window_sum.value() / count as f64;
        result.push(Sample::new(samples[j].step, average, average));
    }

    result
}

/// Smooths every series with its planned window size.
///
/// `windows` is expected parallel to `series`; missing entries fall back to
/// a window of one sample.
#[must_use]
pub fn smooth_all(series: &[Series], windows: &[usize]) -> Vec<Series> {
    let smooth_one = |(idx, s): (usize, &Series)| {
        let window = windows.get(idx).copied().unwrap_or(1);
        s.with_samples(smooth(&s.samples, window))
    };

    #[cfg(feature = "parallel-smoothing")]
    {
        use rayon::prelude::*;
        series.par_iter().enumerate().map(smooth_one).collect()
    }

    #[cfg(not(feature = "parallel-smoothing"))]
    {
        series.iter().enumerate().map(smooth_one).collect()
    }
}
