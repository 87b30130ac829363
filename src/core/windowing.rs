use serde::{Deserialize, Serialize};

use crate::core::{Sample, Series};

/// Wire value meaning "no bound on this side".
pub const UNBOUNDED_SENTINEL: f64 = -1.0;

/// One side of a requested step window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StepBound {
    #[default]
    Unbounded,
    At(f64),
}

impl StepBound {
    /// Reads the wire form, where `-1` (or `NaN`) means unbounded.
    #[must_use]
    pub fn from_sentinel(value: f64) -> Self {
        if value == UNBOUNDED_SENTINEL || value.is_nan() {
            Self::Unbounded
        } else {
            Self::At(value)
        }
    }

    #[must_use]
    pub fn to_sentinel(self) -> f64 {
        match self {
            Self::Unbounded => UNBOUNDED_SENTINEL,
            Self::At(value) => value,
        }
    }
}

/// Requested visible step window. Serialized as `[min, max]` with `-1`
/// marking an open side.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct StepRange {
    pub min: StepBound,
    pub max: StepBound,
}

impl StepRange {
    #[must_use]
    pub fn new(min: StepBound, max: StepBound) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn between(min: f64, max: f64) -> Self {
        Self::new(StepBound::At(min), StepBound::At(max))
    }
}

impl From<[f64; 2]> for StepRange {
    fn from([min, max]: [f64; 2]) -> Self {
        Self::new(StepBound::from_sentinel(min), StepBound::from_sentinel(max))
    }
}

impl From<StepRange> for [f64; 2] {
    fn from(range: StepRange) -> Self {
        [range.min.to_sentinel(), range.max.to_sentinel()]
    }
}

/// Returns the samples inside `range`, shrunk by half of the smoothing span.
///
/// A bounded side is tightened so that no sample within half a smoothing
/// window of the series edge survives: those samples were averaged over a
/// truncated window. An unbounded side keeps every sample.
#[must_use]
pub fn trim_samples(samples: &[Sample], range: StepRange, smooth_range_steps: f64) -> Vec<Sample> {
    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        return Vec::new();
    };

    let half = smooth_range_steps / 2.0;
    let low = match range.min {
        StepBound::Unbounded => None,
        StepBound::At(min) => Some(min.max(first.step + half)),
    };
    let high = match range.max {
        StepBound::Unbounded => None,
        StepBound::At(max) => Some(max.min(last.step - half)),
    };

    samples
        .iter()
        .copied()
        .filter(|sample| low.is_none_or(|low| sample.step >= low))
        .filter(|sample| high.is_none_or(|high| sample.step <= high))
        .collect()
}

/// Applies [`trim_samples`] to every series, keeping series metadata.
#[must_use]
pub fn trim_steps(series: &[Series], range: StepRange, smooth_range_steps: f64) -> Vec<Series> {
    series
        .iter()
        .map(|s| s.with_samples(trim_samples(&s.samples, range, smooth_range_steps)))
        .collect()
}
