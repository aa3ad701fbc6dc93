//! Plot ready data
//!
//! [`PatternView`] holds the obstacle, the centered crop of the diffraction
//! pattern and its logarithm together with the axes extents in millimeters,
//! so a renderer only has to paint them.

use crate::{config::Run, Grid};

/// Axes extent `[left, right, bottom, top]`
pub type Extent = [f64; 4];

/// One image panel
#[derive(Debug, Clone)]
pub struct Panel {
    pub title: String,
    pub grid: Grid,
    pub extent: Extent,
    pub xlabel: String,
    pub ylabel: String,
}
impl Panel {
    pub fn new(title: impl ToString, grid: Grid, extent: Extent) -> Self {
        Self {
            title: title.to_string(),
            grid,
            extent,
            xlabel: "y [mm]".to_string(),
            ylabel: "x [mm]".to_string(),
        }
    }
    pub fn labels(mut self, xlabel: impl ToString, ylabel: impl ToString) -> Self {
        self.xlabel = xlabel.to_string();
        self.ylabel = ylabel.to_string();
        self
    }
}

/// Obstacle and diffraction pattern panels of a simulation
#[derive(Debug, Clone)]
pub struct PatternView {
    pub caption: String,
    pub obstacle: Panel,
    pub pattern: Panel,
    pub log_pattern: Panel,
}
impl PatternView {
    /// Builds the panels of `run`, keeping the central `zoom` fraction of the pattern
    pub fn new(run: &Run, zoom: f64) -> Self {
        let params = &run.params;
        let half_side_mm = params.side() * 5.;
        let obstacle_extent = [-half_side_mm, half_side_mm, -half_side_mm, half_side_mm];
        let factor = (params.wavelength() * 1000. * params.distance() * 10.).recip();
        let half = factor * half_side_mm * zoom;
        let pattern_extent = [-half, half, -half, half];
        let pattern = run.intensity.crop_center(zoom);
        let log_pattern = natural_log(&pattern);
        Self {
            caption: format!(
                "{} ({}): z = {}cm, λ = {}m",
                run.obstacle,
                run.method,
                params.distance(),
                params.wavelength()
            ),
            obstacle: Panel::new("Obstacle", run.mask.clone(), obstacle_extent),
            pattern: Panel::new("Diffraction Pattern", pattern, pattern_extent),
            log_pattern: Panel::new("Diffraction Pattern (log)", log_pattern, pattern_extent),
        }
    }
    pub fn panels(&self) -> [&Panel; 3] {
        [&self.obstacle, &self.pattern, &self.log_pattern]
    }
}

/// Natural logarithm with non-finite values replaced by the smallest finite one
pub fn natural_log(grid: &Grid) -> Grid {
    let log = grid.map(f64::ln);
    let floor = log
        .iter()
        .cloned()
        .filter(|v| v.is_finite())
        .fold(f64::INFINITY, f64::min);
    let floor = if floor.is_finite() { floor } else { 0. };
    log.map(|v| if v.is_finite() { v } else { floor })
}
