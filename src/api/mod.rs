mod pipeline;

pub use pipeline::{PreparedChart, prepare_chart, step_extent};
