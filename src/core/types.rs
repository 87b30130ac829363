use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One recorded point of a metric.
///
/// `step` is the x coordinate (usually a training iteration). `smoothed`
/// starts out as whatever the tracker recorded and is overwritten by
/// [`crate::core::smooth`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub step: f64,
    pub value: f64,
    pub smoothed: f64,
}

impl Sample {
    #[must_use]
    pub fn new(step: f64, value: f64, smoothed: f64) -> Self {
        Self {
            step,
            value,
            smoothed,
        }
    }

    /// Sample whose smoothed value equals its raw value.
    #[must_use]
    pub fn raw(step: f64, value: f64) -> Self {
        Self::new(step, value, value)
    }
}

/// Ordered samples of one metric plus the metadata the transforms look at.
///
/// Samples are expected in non-decreasing `step` order; callers own that
/// invariant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub samples: Vec<Sample>,
    #[serde(default)]
    pub is_summary: bool,
}

impl Series {
    #[must_use]
    pub fn new(name: impl Into<String>, samples: Vec<Sample>) -> Self {
        Self {
            name: name.into(),
            samples,
            is_summary: false,
        }
    }

    /// Marks the series as an aggregate excluded from density calculations.
    #[must_use]
    pub fn with_summary(mut self, is_summary: bool) -> Self {
        self.is_summary = is_summary;
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Step distance between the first and last sample.
    #[must_use]
    pub fn step_span(&self) -> Option<f64> {
        let first = self.samples.first()?;
        let last = self.samples.last()?;
        Some(last.step - first.step)
    }

    /// Copy of this series metadata carrying different samples.
    #[must_use]
    pub fn with_samples(&self, samples: Vec<Sample>) -> Self {
        Self {
            name: self.name.clone(),
            samples,
            is_summary: self.is_summary,
        }
    }
}

/// Columnar series as delivered by the tracking server.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesModel {
    pub name: String,
    pub step: Vec<f64>,
    pub value: Vec<f64>,
    pub smoothed: Vec<f64>,
    #[serde(default)]
    pub is_summary: bool,
}

impl TryFrom<SeriesModel> for Series {
    type Error = ChartError;

    fn try_from(model: SeriesModel) -> ChartResult<Self> {
        if model.step.len() != model.value.len() || model.step.len() != model.smoothed.len() {
            return Err(ChartError::InvalidData(format!(
                "series `{}` has mismatched columns: step={}, value={}, smoothed={}",
                model.name,
                model.step.len(),
                model.value.len(),
                model.smoothed.len()
            )));
        }

        let samples = model
            .step
            .iter()
            .zip(&model.value)
            .zip(&model.smoothed)
            .map(|((&step, &value), &smoothed)| Sample::new(step, value, smoothed))
            .collect();

        Ok(Self {
            name: model.name,
            samples,
            is_summary: model.is_summary,
        })
    }
}

/// Converts a batch of wire models, failing on the first malformed one.
pub fn series_from_models(models: Vec<SeriesModel>) -> ChartResult<Vec<Series>> {
    models.into_iter().map(Series::try_from).collect()
}

/// Axis domain `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl From<Extent> for (f64, f64) {
    fn from(extent: Extent) -> Self {
        (extent.min, extent.max)
    }
}
