/*!
# Fourier filtering

Grayscale images are filtered in the frequency domain: the centered spectrum
of the image is multiplied by a [`Filter`] mask and transformed back.

```rust,no_run
use fourier_filtering::{apply_filter, Filter};
use scalar_diffraction::loader::load_grayscale;

let image = load_grayscale("img/dog.jpg")?;
let mask = Filter::LowPass { size: 40 }.mask(image.shape())?;
let filtered = apply_filter(&image, &mask)?;
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use std::time::Instant;

use scalar_diffraction::{
    config::ConfigError,
    fft::{fftshift, ifftshift, Complex64, Fft2},
    Grid,
};

mod filters;
pub mod menu;

pub use filters::{gaussian, high_pass, horizontal, low_pass, vertical, Filter, FilterKind};

/// Default image file
pub const SRC: &str = "img/dog.jpg";
/// Default half-size of the positive filters
pub const P_SPACING: usize = 40;
/// Default half-size of the negative filters
pub const N_SPACING: usize = 15;
/// Default dispersion of the Gaussian filters
pub const SIGMA: f64 = 10.;

/// Filters `image` with the centered frequency domain `filter`
///
/// Returns the magnitude of the filtered image.
pub fn apply_filter(image: &Grid, filter: &Grid) -> Result<Grid, ConfigError> {
    let shape = image.shape();
    if filter.shape() != shape {
        return Err(ConfigError::MaskShape {
            expected: shape,
            found: filter.shape(),
        });
    }
    let now = Instant::now();
    let mut spectrum: Vec<Complex64> = image.iter().map(|&v| Complex64::new(v, 0.)).collect();
    Fft2::forward(shape).process(&mut spectrum);
    let masked: Vec<Complex64> = fftshift(&spectrum, shape)
        .into_iter()
        .zip(filter.iter())
        .map(|(v, &m)| v * m)
        .collect();
    let mut filtered = ifftshift(&masked, shape);
    Fft2::inverse(shape).process(&mut filtered);
    log::info!(
        "{}x{} image filtered in {}ms",
        shape.0,
        shape.1,
        now.elapsed().as_millis()
    );
    Grid::from_vec(filtered.iter().map(|v| v.norm()).collect(), shape)
}
