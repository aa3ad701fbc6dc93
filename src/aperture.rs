//! Obstacle transmittance masks
//!
//! Geometric apertures are binary: cells inside the shape transmit (1), the
//! others block (0). Aperture sizes are given in millimeters and the sample
//! plane side in centimeters.

use crate::{config::ConfigError, coordinates::CoordinateMapper, Grid};

/// Millimeters in a centimeter
pub const MM_PER_CM: f64 = 10.;

/// Circular aperture of radius `radius_mm` centered on a `n x n` grid of side `side_cm`
///
/// A cell is set if its distance to the center is strictly less than the radius.
pub fn circle(radius_mm: f64, side_cm: f64, n: usize) -> Grid {
    let radius = radius_mm / MM_PER_CM;
    let mapper = CoordinateMapper::new(n, side_cm);
    Grid::from_fn(n, |i, j| {
        let (x, y) = mapper.distance(i, j);
        if (x * x + y * y).sqrt() < radius {
            1.
        } else {
            0.
        }
    })
}

/// Square aperture of edge `edge_mm` centered on a `n x n` grid of side `side_cm`
pub fn rectangle(edge_mm: f64, side_cm: f64, n: usize) -> Grid {
    let half_edge = edge_mm / MM_PER_CM / 2.;
    let mapper = CoordinateMapper::new(n, side_cm);
    Grid::from_fn(n, |i, j| {
        let (x, y) = mapper.distance(i, j);
        if x.abs() < half_edge && y.abs() < half_edge {
            1.
        } else {
            0.
        }
    })
}

/// Circle mask entry point, radius in mm and plane side in cm, see [`circle`]
pub fn generate_circle_mask(radius_mm: f64, side_cm: f64, grid_size: usize) -> Grid {
    circle(radius_mm, side_cm, grid_size)
}

/// Square mask entry point, edge in mm and plane side in cm, see [`rectangle`]
pub fn generate_rectangle_mask(edge_mm: f64, side_cm: f64, grid_size: usize) -> Grid {
    rectangle(edge_mm, side_cm, grid_size)
}

/// Accepts a grayscale image as a transmittance mask
///
/// The pixel values are used as they are, the image must be `n x n`.
pub fn from_grayscale(image: Grid, n: usize) -> Result<Grid, ConfigError> {
    if image.shape() != (n, n) {
        return Err(ConfigError::MaskShape {
            expected: (n, n),
            found: image.shape(),
        });
    }
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn small_circle() {
        // 0.05cm radius on a 4x4 grid of 1cm side: only the center cell
        let mask = circle(0.5, 1., 4);
        assert_eq!(mask.n_set(), 1);
        assert_eq!(mask[(2, 2)], 1.);
        assert_eq!(generate_circle_mask(0.5, 1., 4), mask);
        assert_eq!(generate_rectangle_mask(1., 1., 4), rectangle(1., 1., 4));
    }

    #[test]
    fn circle_boundary_is_excluded() {
        // cell (3,2) is at 0.25cm = 2.5mm from the center
        let mask = circle(2.5, 1., 4);
        assert_eq!(mask[(3, 2)], 0.);
        assert_eq!(mask[(2, 2)], 1.);
        assert_eq!(mask.n_set(), 1);
        let mask = circle(2.5 + 1e-9, 1., 4);
        assert_eq!(mask[(3, 2)], 1.);
        assert_eq!(mask.n_set(), 5);
    }

    #[test]
    fn circle_radius_in_millimeters() {
        // 0.25mm is 2.5 samples of 0.01cm, 2.5mm is 25 samples
        let mask = circle(0.25, 1., 100);
        assert_eq!(mask.n_set(), 21);
        let mask = circle(2.5, 1., 100);
        assert!(mask.n_set() > 1900 && mask.n_set() < 2000);
    }

    #[test]
    fn circle_monotonic_inclusion() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let r: f64 = rng.gen_range(0.1..4.);
            let eps: f64 = rng.gen_range(1e-6..0.5);
            let small = circle(r, 1., 64);
            let large = circle(r + eps, 1., 64);
            assert!(small
                .iter()
                .zip(large.iter())
                .all(|(&s, &l)| s <= l));
            assert!(small.n_set() <= large.n_set());
        }
        // a ring of cells enters when the radius crosses their distance
        assert!(circle(2.5, 1., 4).n_set() < circle(2.5 + 1e-6, 1., 4).n_set());
    }

    #[test]
    fn rectangle_is_centered_square() {
        let mask = rectangle(1., 1., 100);
        let set: Vec<_> = mask
            .indexed_iter()
            .filter(|(_, v)| *v == 1.)
            .map(|(ij, _)| ij)
            .collect();
        let (imin, imax) = set
            .iter()
            .fold((usize::MAX, 0), |(a, b), &(i, _)| (a.min(i), b.max(i)));
        let (jmin, jmax) = set
            .iter()
            .fold((usize::MAX, 0), |(a, b), &(_, j)| (a.min(j), b.max(j)));
        assert_eq!(imax - imin, jmax - jmin);
        assert_eq!(50 - imin, imax - 50);
        assert_eq!(50 - jmin, jmax - 50);
        assert_eq!(set.len(), (imax - imin + 1) * (jmax - jmin + 1));
    }

    #[test]
    fn rectangle_count_converges() {
        let (edge_mm, side_cm) = (1., 1.);
        for n in [200usize, 1000] {
            let cells = edge_mm / MM_PER_CM / side_cm * n as f64;
            let expected = cells * cells;
            let count = rectangle(edge_mm, side_cm, n).n_set() as f64;
            assert!(
                (count - expected).abs() / expected < 3. / cells,
                "n={n}: {count} vs {expected}"
            );
        }
    }

    #[test]
    fn grayscale_shape_mismatch() {
        let image = Grid::zeros((10, 12));
        assert!(matches!(
            from_grayscale(image, 10),
            Err(ConfigError::MaskShape {
                expected: (10, 10),
                found: (10, 12)
            })
        ));
        let image = Grid::from_fn(10, |i, _| (i * 25) as f64);
        let mask = from_grayscale(image.clone(), 10).unwrap();
        assert_eq!(mask, image);
    }
}
