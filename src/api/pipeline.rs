use tracing::{debug, debug_span, warn};

use crate::core::{
    ChartPreferences, ChartType, Extent, Sample, SampleReadout, Series, SmoothPlan, extent,
    plan_smooth_windows, smooth_all, trim_steps,
};
use crate::error::ChartResult;

/// Series ready to plot together with the axis domains that fit them.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedChart {
    pub plan: SmoothPlan,
    pub current: Vec<Series>,
    pub base: Vec<Series>,
    pub value_extent: Extent,
    pub step_extent: Extent,
    pub chart_type: ChartType,
    pub focus_smoothed: bool,
}

impl PreparedChart {
    /// Readouts of every current series at the cursor, `None` for empty series.
    #[must_use]
    pub fn current_readouts(&self, cursor_step: Option<f64>) -> Vec<Option<SampleReadout>> {
        self.current
            .iter()
            .map(|series| SampleReadout::at(&series.samples, cursor_step))
            .collect()
    }

    /// Readouts of every base series at the cursor.
    #[must_use]
    pub fn base_readouts(&self, cursor_step: Option<f64>) -> Vec<Option<SampleReadout>> {
        self.base
            .iter()
            .map(|series| SampleReadout::at(&series.samples, cursor_step))
            .collect()
    }
}

/// Smooths, trims and fits a comparison chart.
///
/// Series are smoothed over their full length first so the averages near
/// the visible edges see real neighbours; trimming then drops the half
/// window at each bounded edge where averages were truncated.
pub fn prepare_chart(
    current: &[Series],
    base: &[Series],
    preferences: &ChartPreferences,
) -> ChartResult<PreparedChart> {
    let preferences = preferences.clone().validate()?;
    let span = debug_span!(
        "prepare_chart",
        current = current.len(),
        base = base.len(),
        smooth_value = preferences.smooth_value
    );
    let _guard = span.enter();

    let plan = plan_smooth_windows(current, base, preferences.smooth_value);

    let trim_group = |group: &[Series], windows: &[usize]| {
        let smoothed = smooth_all(group, windows);
        trim_steps(&smoothed, preferences.step_range, plan.smooth_range_steps)
    };
    let current_trimmed = trim_group(current, &plan.current);
    let base_trimmed = trim_group(base, &plan.base);

    let dropped = current_trimmed
        .iter()
        .chain(&base_trimmed)
        .filter(|series| series.is_empty())
        .count();
    if dropped > 0 {
        warn!(dropped, "series have no samples inside the requested step range");
    }

    let plotted: Vec<Series> = current_trimmed
        .iter()
        .chain(&base_trimmed)
        .filter(|series| !series.is_empty())
        .cloned()
        .collect();
    let focus_smoothed = preferences.focus_smoothed;
    let value_extent = extent(
        &plotted,
        |sample: &Sample| {
            if focus_smoothed {
                sample.smoothed
            } else {
                sample.value
            }
        },
        false,
        false,
    );
    let step_extent = step_extent(&plotted);
    debug!(
        value_min = value_extent.min,
        value_max = value_extent.max,
        step_min = step_extent.min,
        step_max = step_extent.max,
        "chart prepared"
    );

    Ok(PreparedChart {
        plan,
        current: current_trimmed,
        base: base_trimmed,
        value_extent,
        step_extent,
        chart_type: preferences.chart_type(),
        focus_smoothed,
    })
}

/// First-to-last step domain shared by all series, `[0, 0]` when empty.
#[must_use]
pub fn step_extent(series: &[Series]) -> Extent {
    let mut bounds: Option<Extent> = None;
    for s in series {
        let (Some(first), Some(last)) = (s.samples.first(), s.samples.last()) else {
            continue;
        };
        bounds = Some(match bounds {
            None => Extent::new(first.step, last.step),
            Some(b) => Extent::new(b.min.min(first.step), b.max.max(last.step)),
        });
    }
    bounds.unwrap_or_else(Extent::zero)
}
