use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::Extent;
use crate::core::primitives::datetime_to_unix_seconds;
use crate::error::{ChartError, ChartResult};

/// Tick count used when rounding a domain outward.
const NICE_TICK_COUNT: f64 = 10.0;

/// Axis mapping kind selected in the chart toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ChartType {
    #[default]
    Linear,
    Log,
}

impl ChartType {
    /// Toolbar index to chart type: `0` is linear, anything else is log.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        if index == 0 { Self::Linear } else { Self::Log }
    }
}

/// Output pixel interval of a scale. `start` may be greater than `end`
/// for inverted (top-down) axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRange {
    pub start: f64,
    pub end: f64,
}

impl PixelRange {
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// `[0, size]`, the usual range for an axis of `size` pixels.
    #[must_use]
    pub fn sized(size: f64) -> Self {
        Self::new(0.0, size)
    }

    fn validate(self) -> ChartResult<Self> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(ChartError::InvalidRange {
                min: self.start,
                max: self.end,
            });
        }
        Ok(self)
    }

    fn lerp(self, t: f64) -> f64 {
        self.start + t * (self.end - self.start)
    }

    fn unlerp(self, pixel: f64) -> f64 {
        let span = self.end - self.start;
        if span == 0.0 {
            0.0
        } else {
            (pixel - self.start) / span
        }
    }
}

fn validate_domain(extent: Extent) -> ChartResult<Extent> {
    if !extent.min.is_finite() || !extent.max.is_finite() {
        return Err(ChartError::InvalidRange {
            min: extent.min,
            max: extent.max,
        });
    }
    Ok(extent)
}

/// Linear domain-to-pixel mapping.
///
/// A degenerate domain maps every value to the start of the pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: Extent,
    range: PixelRange,
}

impl LinearScale {
    pub fn new(domain: Extent, range: PixelRange) -> ChartResult<Self> {
        Ok(Self {
            domain: validate_domain(domain)?,
            range: range.validate()?,
        })
    }

    /// Builds a scale whose domain is extended outward to round tick values.
    pub fn nice(domain: Extent, range: PixelRange) -> ChartResult<Self> {
        let domain = validate_domain(domain)?;
        Self::new(nice_extent(domain, NICE_TICK_COUNT), range)
    }

    #[must_use]
    pub fn domain(self) -> Extent {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> PixelRange {
        self.range
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain.span();
        if span == 0.0 {
            return self.range.start;
        }
        self.range.lerp((value - self.domain.min) / span)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        self.domain.min + self.range.unlerp(pixel) * self.domain.span()
    }
}

/// Base-10 logarithmic mapping; the domain must be strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogScale {
    domain: Extent,
    range: PixelRange,
    log_min: f64,
    log_max: f64,
}

impl LogScale {
    pub fn new(domain: Extent, range: PixelRange) -> ChartResult<Self> {
        let domain = validate_domain(domain)?;
        if domain.min <= 0.0 || domain.max <= 0.0 {
            return Err(ChartError::InvalidData(
                "log scale domain must be strictly positive".to_owned(),
            ));
        }
        Ok(Self {
            domain,
            range: range.validate()?,
            log_min: domain.min.log10(),
            log_max: domain.max.log10(),
        })
    }

    #[must_use]
    pub fn domain(self) -> Extent {
        self.domain
    }

    /// Maps a value; non-positive inputs have no logarithm and yield `NaN`.
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.log_max - self.log_min;
        if span == 0.0 {
            return self.range.start;
        }
        self.range.lerp((value.log10() - self.log_min) / span)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        10f64.powf(self.log_min + self.range.unlerp(pixel) * (self.log_max - self.log_min))
    }
}

/// Wall-clock mapping for date range pickers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, range: PixelRange) -> ChartResult<Self> {
        let domain = Extent::new(
            datetime_to_unix_seconds(start),
            datetime_to_unix_seconds(end),
        );
        Ok(Self {
            start,
            end,
            linear: LinearScale::new(domain, range)?,
        })
    }

    #[must_use]
    pub fn domain(self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.start, self.end)
    }

    #[must_use]
    pub fn map(self, time: DateTime<Utc>) -> f64 {
        self.linear.map(datetime_to_unix_seconds(time))
    }

    /// Pixel to epoch seconds.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        self.linear.invert(pixel)
    }
}

/// Extends `extent` outward so both ends fall on multiples of a
/// 1/2/5 x 10^k tick step for roughly `count` ticks.
#[must_use]
pub fn nice_extent(extent: Extent, count: f64) -> Extent {
    let (mut start, mut stop) = (extent.min, extent.max);
    let reversed = stop < start;
    if reversed {
        std::mem::swap(&mut start, &mut stop);
    }

    let mut previous: Option<f64> = None;
    for _ in 0..10 {
        let step = tick_increment(start, stop, count);
        if previous == Some(step) || !step.is_finite() || step == 0.0 {
            break;
        }
        if step > 0.0 {
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
        } else {
            start = (start * step).ceil() / step;
            stop = (stop * step).floor() / step;
        }
        previous = Some(step);
    }

    if reversed {
        Extent::new(stop, start)
    } else {
        Extent::new(start, stop)
    }
}

/// Positive values are the tick step; negative values are the inverse of
/// the step (used for sub-unit steps to avoid precision loss).
fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    let e10 = 50f64.sqrt();
    let e5 = 10f64.sqrt();
    let e2 = 2f64.sqrt();

    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };

    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}
