use serde::{Deserialize, Serialize};

use crate::core::ChartType;
use crate::core::smoothing::{SMOOTH_VALUE_MAX, SMOOTH_VALUE_MIN};
use crate::core::windowing::StepRange;
use crate::error::{ChartError, ChartResult};

/// Plot preference of a series that is not plotted.
pub const NOT_PLOTTED: i32 = -1;

/// Per-view chart preferences persisted by the dashboard.
///
/// Every field has a default so partially populated payloads from older
/// clients still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPreferences {
    #[serde(default)]
    pub series_preferences: Vec<i32>,
    #[serde(default)]
    pub base_series_preferences: Vec<i32>,
    #[serde(default)]
    pub chart_type: usize,
    #[serde(default)]
    pub step_range: StepRange,
    #[serde(default = "default_focus_smoothed")]
    pub focus_smoothed: bool,
    #[serde(default = "default_smooth_value")]
    pub smooth_value: f64,
}

fn default_focus_smoothed() -> bool {
    true
}

fn default_smooth_value() -> f64 {
    50.0
}

impl Default for ChartPreferences {
    fn default() -> Self {
        Self {
            series_preferences: Vec::new(),
            base_series_preferences: Vec::new(),
            chart_type: 0,
            step_range: StepRange::unbounded(),
            focus_smoothed: default_focus_smoothed(),
            smooth_value: default_smooth_value(),
        }
    }
}

impl ChartPreferences {
    /// Sets the smoothness slider value.
    #[must_use]
    pub fn with_smooth_value(mut self, smooth_value: f64) -> Self {
        self.smooth_value = smooth_value;
        self
    }

    /// Sets the visible step window.
    #[must_use]
    pub fn with_step_range(mut self, step_range: StepRange) -> Self {
        self.step_range = step_range;
        self
    }

    /// Chooses whether extents follow smoothed or raw values.
    #[must_use]
    pub fn with_focus_smoothed(mut self, focus_smoothed: bool) -> Self {
        self.focus_smoothed = focus_smoothed;
        self
    }

    #[must_use]
    pub fn chart_type(&self) -> ChartType {
        ChartType::from_index(self.chart_type)
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.smooth_value.is_finite()
            || !(SMOOTH_VALUE_MIN..=SMOOTH_VALUE_MAX).contains(&self.smooth_value)
        {
            return Err(ChartError::InvalidData(format!(
                "smooth value must be in [{SMOOTH_VALUE_MIN}, {SMOOTH_VALUE_MAX}], got {}",
                self.smooth_value
            )));
        }
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let preferences: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart preferences: {e}"))
        })?;
        preferences.validate()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart preferences: {e}"))
        })
    }
}

/// Aligns stored plot preferences with the current number of series.
///
/// Extra entries are dropped and missing ones are filled with
/// [`NOT_PLOTTED`].
#[must_use]
pub fn fill_plot_preferences(series_count: usize, current: &[i32]) -> Vec<i32> {
    let mut filled: Vec<i32> = current.iter().copied().take(series_count).collect();
    filled.resize(series_count, NOT_PLOTTED);
    filled
}
