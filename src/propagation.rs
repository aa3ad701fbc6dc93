//! Free-space propagation from the obstacle plane to the sensor plane
//!
//! Both approximations share the same pipeline: the obstacle field goes
//! through a forward 2-D transform normalized by `1/N²`, the spectrum is
//! shifted so that the zero frequency sits at `(N/2, N/2)` and the
//! intensity is the magnitude scaled by `1/(λ·z)²`, `z` in meters.
//! The Fresnel approximation first multiplies the field by the quadratic phase
//! `exp(i·k/(2z)·(x² + y²))`.

use std::time::Instant;

use rayon::prelude::*;
use rustfft::num_complex::Complex64;
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    config::{ConfigError, OpticalParameters},
    coordinates::CoordinateMapper,
    fft::{fftshift, Fft2},
    Grid, CM_PER_M,
};

/// Propagation approximation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, EnumIter, Display)]
#[strum(ascii_case_insensitive)]
pub enum Method {
    /// Near-field approximation
    #[default]
    #[strum(to_string = "Fresnel")]
    Fresnel,
    /// Far-field approximation
    #[strum(to_string = "Fraunhofer", serialize = "fraunhoffer")]
    Fraunhofer,
}

/// Sensor plane intensity of the obstacle `mask` with the given approximation
pub fn propagate(
    mask: &Grid,
    method: Method,
    params: &OpticalParameters,
) -> Result<Grid, ConfigError> {
    match method {
        Method::Fresnel => fresnel(mask, params),
        Method::Fraunhofer => fraunhofer(mask, params),
    }
}

/// Far-field intensity of the obstacle `mask`
pub fn fraunhofer(mask: &Grid, params: &OpticalParameters) -> Result<Grid, ConfigError> {
    let n = square_size(mask)?;
    let field: Vec<Complex64> = mask.iter().map(|&u| Complex64::new(u, 0.)).collect();
    Ok(transform_and_scale(field, n, params))
}

/// Near-field intensity of the obstacle `mask`
pub fn fresnel(mask: &Grid, params: &OpticalParameters) -> Result<Grid, ConfigError> {
    let n = square_size(mask)?;
    let mapper = CoordinateMapper::new(n, params.side());
    let k = params.wavenumber();
    let z = params.distance_m();
    log::debug!(
        "Fresnel number over the half plane: {:.3e}",
        params.fresnel_number(params.side() / 2.)
    );
    let field: Vec<Complex64> = mask
        .as_slice()
        .par_iter()
        .enumerate()
        .map(|(idx, &u)| {
            let (x, y) = mapper.distance(idx / n, idx % n);
            let (x, y) = (x / CM_PER_M, y / CM_PER_M);
            u * Complex64::new(0., k / (2. * z) * (x * x + y * y)).exp()
        })
        .collect();
    Ok(transform_and_scale(field, n, params))
}

fn square_size(mask: &Grid) -> Result<usize, ConfigError> {
    if !mask.is_square() {
        return Err(ConfigError::NotSquare(mask.shape()));
    }
    Ok(mask.rows())
}

/// Normalized transform, centered spectrum magnitude and physical scaling
fn transform_and_scale(mut field: Vec<Complex64>, n: usize, params: &OpticalParameters) -> Grid {
    let now = Instant::now();
    Fft2::forward((n, n)).process(&mut field);
    let norm = 1. / (n * n) as f64;
    let scale = params.intensity_scale();
    let intensity: Vec<f64> = fftshift(&field, (n, n))
        .into_iter()
        .map(|v| scale * (v * norm).norm())
        .collect();
    log::info!(
        "... {n}x{n} field propagated in {:}ms",
        now.elapsed().as_millis()
    );
    Grid::from_raw(intensity, (n, n))
}
