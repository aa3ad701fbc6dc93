/*!
# Scalar diffraction

Simulation of the intensity pattern produced on a sensor by a plane wave going
through an obstacle, using either the Fresnel (near-field) or the Fraunhofer
(far-field) approximation.

## Key Components

- [`aperture`] - circular and square transmittance masks, grayscale image masks
- [`coordinates`] - grid index to sample plane coordinates
- [`propagation`] - Fresnel and Fraunhofer propagation to the sensor plane
- [`config`] - validated simulation settings
- [`prompt`] - interactive resolution of the settings
- [`view`] - plot ready panels, rendered with the `plot` feature

## Usage

```rust,no_run
use scalar_diffraction::{config::{Shape, SimulationConfig}, Method};

let run = SimulationConfig::default()
    .shape(Shape::Square)
    .edge(1.)
    .distance(100.)
    .method(Method::Fraunhofer)
    .build()?
    .run()?;
let (_, peak) = run.intensity.extrema();
# Ok::<(), scalar_diffraction::Error>(())
```

Lengths in the sample plane are in centimeters, aperture sizes in millimeters
and the wavelength in meters.
*/

pub mod aperture;
pub mod config;
pub mod coordinates;
mod error;
pub mod fft;
mod grid;
pub mod loader;
pub mod prompt;
pub mod propagation;
#[cfg(feature = "plot")]
pub mod render;
pub mod view;

pub use error::{error_chain, Error};
pub use grid::Grid;
pub use propagation::{propagate, Method};

pub type Result<T> = std::result::Result<T, Error>;

/// Centimeters in a meter
pub const CM_PER_M: f64 = 100.;
