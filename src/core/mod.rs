pub mod configs;
pub mod extent;
pub mod format;
pub mod locator;
pub mod preferences;
pub mod primitives;
pub mod scale;
pub mod smoothing;
pub mod types;
pub mod windowing;

pub use configs::{
    ConfigClass, ConfigEntry, ConfigItemView, ConfigSet, ConfigValue, RenderedValue,
    SelectionEvent, SelectionState, render_config_value,
};
pub use extent::{
    ExtentTuning, extent, extent_of_samples, extent_tuned, single_extent, single_extent_tuned,
};
pub use format::format_fixed;
pub use locator::{SampleReadout, nearest_sample_index};
pub use preferences::{ChartPreferences, fill_plot_preferences};
pub use primitives::{map_range, to_date};
pub use scale::{ChartType, LinearScale, LogScale, PixelRange, TimeScale, nice_extent};
pub use smoothing::{SmoothPlan, plan_smooth_windows, smooth, smooth_all};
pub use types::{Extent, Sample, Series, SeriesModel, series_from_models};
pub use windowing::{StepBound, StepRange, trim_samples, trim_steps};
