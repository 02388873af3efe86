#[allow(clippy::module_inception)]
mod config;

pub use config::{AmbiguityConfig, Config, CoverageConfig, PlotConfig};
