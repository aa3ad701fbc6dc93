//! PNG rendering of the simulation panels

use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use plotters::prelude::*;

use crate::view::{Panel, PatternView};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to draw {0:?}: {1}")]
    Draw(PathBuf, String),
}
type Result<T> = std::result::Result<T, RenderError>;

fn draw_error<E: Display>(path: &Path, e: E) -> RenderError {
    RenderError::Draw(path.to_path_buf(), e.to_string())
}

/// Saves the obstacle and diffraction pattern panels side by side
pub fn pattern_view<P: AsRef<Path>>(filename: P, view: &PatternView) -> Result<()> {
    triptych(filename, &view.caption, view.panels())
}

/// Saves three gray scale image panels side by side
pub fn triptych<P: AsRef<Path>>(filename: P, caption: &str, panels: [&Panel; 3]) -> Result<()> {
    let path = filename.as_ref();
    log::info!("making figure: {:?}", path);
    let root = BitMapBackend::new(path, (1800, 700)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| draw_error(path, e))?;
    let root = root
        .titled(caption, ("sans-serif", 28))
        .map_err(|e| draw_error(path, e))?;
    for (area, panel) in root.split_evenly((1, 3)).iter().zip(panels) {
        let [x0, x1, y0, y1] = panel.extent;
        let mut chart = ChartBuilder::on(area)
            .caption(&panel.title, ("sans-serif", 22))
            .margin(10)
            .set_label_area_size(LabelAreaPosition::Left, 50)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(x0..x1, y0..y1)
            .map_err(|e| draw_error(path, e))?;
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(&panel.xlabel)
            .y_desc(&panel.ylabel)
            .draw()
            .map_err(|e| draw_error(path, e))?;

        let (rows, cols) = panel.grid.shape();
        let (dx, dy) = ((x1 - x0) / cols as f64, (y1 - y0) / rows as f64);
        let (vmin, vmax) = panel.grid.extrema();
        let range = vmax - vmin;
        chart
            .draw_series(panel.grid.indexed_iter().map(|((i, j), v)| {
                let value = if range > 0. { (v - vmin) / range } else { 0.5 };
                let color = colorous::GREYS.eval_continuous(1. - value);
                let (x, y) = (x0 + j as f64 * dx, y1 - i as f64 * dy);
                Rectangle::new(
                    [(x, y), (x + dx, y - dy)],
                    RGBColor(color.r, color.g, color.b).filled(),
                )
            }))
            .map_err(|e| draw_error(path, e))?;
    }
    root.present().map_err(|e| draw_error(path, e))?;
    Ok(())
}
