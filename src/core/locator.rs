use serde::{Deserialize, Serialize};

use crate::core::Sample;

/// Raw values closer than this fraction of their magnitude to the smoothed
/// value are not shown separately.
const READOUT_RELATIVE_EPSILON: f64 = 1e-6;

/// Index of the sample nearest to `cursor_step`.
///
/// Without a cursor the most recent sample is selected. Equidistant
/// neighbours resolve to the right-hand one. Returns `None` only for an
/// empty series. Samples must be sorted by step.
#[must_use]
pub fn nearest_sample_index(samples: &[Sample], cursor_step: Option<f64>) -> Option<usize> {
    let last = samples.len().checked_sub(1)?;
    let Some(cursor) = cursor_step else {
        return Some(last);
    };

    let idx = samples.partition_point(|sample| sample.step < cursor);
    if idx > last {
        return Some(last);
    }
    if idx == 0 {
        return Some(0);
    }

    let left = (cursor - samples[idx - 1].step).abs();
    let right = (cursor - samples[idx].step).abs();
    Some(if left < right { idx - 1 } else { idx })
}

/// Values displayed next to a sparkline for the selected sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleReadout {
    pub step: f64,
    /// Smoothed value, always shown.
    pub primary: f64,
    /// Raw value, present only when it visibly differs from `primary`.
    pub secondary: Option<f64>,
}

impl SampleReadout {
    #[must_use]
    pub fn of(sample: Sample) -> Self {
        let differs =
            (sample.value - sample.smoothed).abs() > sample.value.abs() * READOUT_RELATIVE_EPSILON;
        Self {
            step: sample.step,
            primary: sample.smoothed,
            secondary: differs.then_some(sample.value),
        }
    }

    /// Readout for the sample nearest to the cursor.
    #[must_use]
    pub fn at(samples: &[Sample], cursor_step: Option<f64>) -> Option<Self> {
        let idx = nearest_sample_index(samples, cursor_step)?;
        Some(Self::of(samples[idx]))
    }
}
