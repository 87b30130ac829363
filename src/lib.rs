//! runchart: numeric core for experiment-tracking dashboards.
//!
//! The `core` module holds the pure transforms shared by every chart:
//! robust extents, adaptive smoothing windows, step-range trimming and
//! nearest-sample lookup. `api` composes them the way a comparison chart
//! needs them; rendering stays with the host.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{PreparedChart, prepare_chart};
pub use error::{ChartError, ChartResult};
