//! Inputs for, and rendering of, the per-sample coverage plot.

mod coverage_plot;
mod svg;

pub use coverage_plot::{moving_average, render_svg};

use crate::ambiguity::DensityPoint;
use crate::config::PlotConfig;
use crate::coverage::DepthSeries;
use crate::primers::AmpliconSet;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmpliconLayout {
    pub number: String,
    pub pool: String,
    pub start: u64,
    pub length: u64,
}

/// Read-only snapshot of everything the renderer draws.
#[derive(Debug, Clone, Serialize)]
pub struct PlotBundle {
    pub sample_name: String,
    pub genome_length: u64,
    pub min_depth: u32,
    pub moving_average_window: usize,
    pub y_axis_top: f64,
    pub width_inches: f64,
    pub height_inches: f64,
    pub depth: Vec<u32>,
    pub n_density: Vec<DensityPoint>,
    pub amplicons: Vec<AmpliconLayout>,
}

impl PlotBundle {
    pub fn new(
        sample_name: &str,
        depth: &DepthSeries,
        n_density: Vec<DensityPoint>,
        amplicons: &AmpliconSet,
        min_depth: u32,
        plot: &PlotConfig,
    ) -> Self {
        Self {
            sample_name: sample_name.to_string(),
            genome_length: depth.len() as u64,
            min_depth,
            moving_average_window: plot.moving_average_window,
            y_axis_top: 10f64.powi(plot.max_y_axis_exponent),
            width_inches: plot.width,
            height_inches: plot.height,
            depth: depth.depths().to_vec(),
            n_density,
            amplicons: amplicons
                .iter()
                .map(|a| AmpliconLayout {
                    number: a.number.clone(),
                    pool: a.pool.clone(),
                    start: a.start,
                    length: a.length,
                })
                .collect(),
        }
    }
}
