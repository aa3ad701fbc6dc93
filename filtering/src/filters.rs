//! Frequency domain masks
//!
//! Every mask is centered on `(⌊H/2⌋, ⌊W/2⌋)`, the zero frequency of a shifted
//! spectrum. Bands of half-size `s` span `[m-s, m+s)` clipped to the image.

use std::{fmt, ops::Range};

use scalar_diffraction::{config::ConfigError, Grid};
use strum_macros::{Display, EnumIter, EnumString};

use crate::{N_SPACING, P_SPACING};

/// Filter family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, EnumIter, Display)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum FilterKind {
    #[default]
    HighPass,
    LowPass,
    Horizontal,
    Vertical,
}

/// Frequency domain filter with its parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Filter {
    LowPass { size: usize },
    HighPass { size: usize },
    Gaussian { sigma: f64, negative: bool },
    Horizontal { size: usize, negative: bool },
    Vertical { size: usize, negative: bool },
}
impl Filter {
    /// Filter of the `kind` family
    ///
    /// High-pass and low-pass filters are Gaussian unless `square` is set,
    /// `negative` applies to the band filters. Without `size` the positive
    /// filters use [`P_SPACING`] and the negative ones [`N_SPACING`].
    pub fn new(
        kind: FilterKind,
        square: bool,
        negative: bool,
        size: Option<usize>,
        sigma: f64,
    ) -> Self {
        let spacing = |negative: bool| size.unwrap_or(if negative { N_SPACING } else { P_SPACING });
        match kind {
            FilterKind::HighPass if square => Self::HighPass {
                size: spacing(true),
            },
            FilterKind::HighPass => Self::Gaussian {
                sigma,
                negative: true,
            },
            FilterKind::LowPass if square => Self::LowPass {
                size: spacing(false),
            },
            FilterKind::LowPass => Self::Gaussian {
                sigma,
                negative: false,
            },
            FilterKind::Horizontal => Self::Horizontal {
                size: spacing(negative),
                negative,
            },
            FilterKind::Vertical => Self::Vertical {
                size: spacing(negative),
                negative,
            },
        }
    }
    /// Mask of the filter for a `(rows, cols)` image
    pub fn mask(&self, shape: (usize, usize)) -> Result<Grid, ConfigError> {
        Ok(match *self {
            Self::LowPass { size } => low_pass(shape, size),
            Self::HighPass { size } => high_pass(shape, size),
            Self::Gaussian { sigma, negative } => gaussian(shape, sigma, negative)?,
            Self::Horizontal { size, negative } => horizontal(shape, size, negative),
            Self::Vertical { size, negative } => vertical(shape, size, negative),
        })
    }
}
impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = |negative: bool| if negative { "negative" } else { "positive" };
        match self {
            Self::LowPass { size } => write!(f, "square low-pass filter (size: {size})"),
            Self::HighPass { size } => write!(f, "square high-pass filter (size: {size})"),
            Self::Gaussian { sigma, negative } => write!(
                f,
                "gaussian {} filter (σ: {sigma})",
                if *negative { "high-pass" } else { "low-pass" }
            ),
            Self::Horizontal { size, negative } => {
                write!(f, "{} horizontal filter (width: {size})", sign(*negative))
            }
            Self::Vertical { size, negative } => {
                write!(f, "{} vertical filter (width: {size})", sign(*negative))
            }
        }
    }
}

fn band(n: usize, size: usize) -> Range<usize> {
    let m = n / 2;
    m.saturating_sub(size)..(m + size).min(n)
}

/// Keeps the frequencies of the central `2s x 2s` square
pub fn low_pass(shape: (usize, usize), size: usize) -> Grid {
    let (rows, cols) = (band(shape.0, size), band(shape.1, size));
    Grid::from_shape_fn(shape, |i, j| {
        if rows.contains(&i) && cols.contains(&j) {
            1.
        } else {
            0.
        }
    })
}

/// Removes the frequencies of the central `2s x 2s` square
pub fn high_pass(shape: (usize, usize), size: usize) -> Grid {
    low_pass(shape, size).map(|v| 1. - v)
}

/// Gaussian low-pass mask of dispersion `sigma`, high-pass if `negative`
pub fn gaussian(shape: (usize, usize), sigma: f64, negative: bool) -> Result<Grid, ConfigError> {
    if !(sigma.is_finite() && sigma > 0.) {
        return Err(ConfigError::NonPositive {
            name: "sigma",
            value: sigma,
        });
    }
    let (m_h, m_w) = ((shape.0 / 2) as f64, (shape.1 / 2) as f64);
    let two_sigma_sq = 2. * sigma * sigma;
    let mask = Grid::from_shape_fn(shape, |i, j| {
        let (di, dj) = (i as f64 - m_h, j as f64 - m_w);
        (-(di * di + dj * dj) / two_sigma_sq).exp()
    });
    let (_, max) = mask.extrema();
    Ok(mask.map(|v| {
        let v = v / max;
        if negative {
            1. - v
        } else {
            v
        }
    }))
}

/// Keeps the band of `2s` rows around the center, removes it if `negative`
pub fn horizontal(shape: (usize, usize), size: usize, negative: bool) -> Grid {
    let rows = band(shape.0, size);
    Grid::from_shape_fn(shape, |i, _| {
        if rows.contains(&i) != negative {
            1.
        } else {
            0.
        }
    })
}

/// Keeps the band of `2s` columns around the center, removes it if `negative`
pub fn vertical(shape: (usize, usize), size: usize, negative: bool) -> Grid {
    let cols = band(shape.1, size);
    Grid::from_shape_fn(shape, |_, j| {
        if cols.contains(&j) != negative {
            1.
        } else {
            0.
        }
    })
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use strum::IntoEnumIterator;

    use super::*;

    fn total(grid: &Grid) -> f64 {
        grid.iter().sum()
    }

    #[test]
    fn square_masks() {
        let shape = (10, 12);
        let low = low_pass(shape, 2);
        assert_eq!(total(&low), 16.);
        assert_eq!(low[(3, 4)], 1.);
        assert_eq!(low[(6, 7)], 1.);
        assert_eq!(low[(7, 7)], 0.);
        assert_eq!(low[(2, 4)], 0.);
        let high = high_pass(shape, 2);
        assert_eq!(total(&high), 120. - 16.);
        assert_eq!(high[(5, 6)], 0.);
    }

    #[test]
    fn bands_are_clipped() {
        assert_eq!(total(&low_pass((6, 6), 10)), 36.);
        assert_eq!(total(&horizontal((6, 4), 5, false)), 24.);
        assert_eq!(total(&vertical((6, 4), 5, true)), 0.);
    }

    #[test]
    fn band_masks() {
        let shape = (10, 12);
        assert_eq!(total(&horizontal(shape, 1, false)), 24.);
        assert_eq!(horizontal(shape, 1, false)[(4, 0)], 1.);
        assert_eq!(horizontal(shape, 1, false)[(6, 0)], 0.);
        assert_eq!(total(&horizontal(shape, 1, true)), 120. - 24.);
        assert_eq!(total(&vertical(shape, 2, false)), 40.);
        assert_eq!(total(&vertical(shape, 2, true)), 120. - 40.);
        assert_eq!(vertical(shape, 2, true)[(0, 5)], 0.);
    }

    #[test]
    fn gaussian_masks() -> Result<(), Box<dyn Error>> {
        let shape = (9, 8);
        let low = gaussian(shape, 2., false)?;
        assert_eq!(low[(4, 4)], 1.);
        assert!((low[(3, 4)] - low[(5, 4)]).abs() < 1e-15);
        assert!((low[(4, 2)] - (-4f64 / 8.).exp()).abs() < 1e-12);
        assert!(low.iter().all(|&v| v > 0. && v <= 1.));
        let high = gaussian(shape, 2., true)?;
        assert_eq!(high[(4, 4)], 0.);
        assert!(high
            .iter()
            .zip(low.iter())
            .all(|(h, l)| (h + l - 1.).abs() < 1e-15));
        Ok(())
    }

    #[test]
    fn invalid_sigma() {
        for sigma in [0., -1., f64::NAN] {
            assert!(matches!(
                gaussian((4, 4), sigma, false),
                Err(ConfigError::NonPositive { name: "sigma", .. })
            ));
        }
    }

    #[test]
    fn filter_defaults() {
        assert_eq!(
            Filter::new(FilterKind::HighPass, false, false, None, 10.),
            Filter::Gaussian {
                sigma: 10.,
                negative: true
            }
        );
        assert_eq!(
            Filter::new(FilterKind::HighPass, true, false, None, 10.),
            Filter::HighPass { size: N_SPACING }
        );
        assert_eq!(
            Filter::new(FilterKind::LowPass, true, false, None, 10.),
            Filter::LowPass { size: P_SPACING }
        );
        assert_eq!(
            Filter::new(FilterKind::Vertical, false, true, None, 10.),
            Filter::Vertical {
                size: N_SPACING,
                negative: true
            }
        );
        assert_eq!(
            Filter::new(FilterKind::Horizontal, false, false, Some(3), 10.),
            Filter::Horizontal {
                size: 3,
                negative: false
            }
        );
    }

    #[test]
    fn kind_from_str() -> Result<(), Box<dyn Error>> {
        assert_eq!("high-pass".parse::<FilterKind>()?, FilterKind::HighPass);
        assert_eq!("Low-Pass".parse::<FilterKind>()?, FilterKind::LowPass);
        for kind in FilterKind::iter() {
            assert_eq!(kind.to_string().parse::<FilterKind>()?, kind);
        }
        Ok(())
    }
}
