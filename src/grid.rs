//! Sampled 2-D fields
//!
//! A [`Grid`] stores real samples row-major with a `(rows, cols)` shape.
//! Obstacle masks and intensity maps are square grids.

use std::ops::Index;

use rayon::prelude::*;

use crate::config::ConfigError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    data: Vec<f64>,
    shape: (usize, usize),
}
impl Grid {
    /// A `rows x cols` grid of zeros
    pub fn zeros(shape: (usize, usize)) -> Self {
        Self {
            data: vec![0f64; shape.0 * shape.1],
            shape,
        }
    }
    /// A `n x n` grid of zeros
    pub fn square(n: usize) -> Self {
        Self::zeros((n, n))
    }
    /// Wraps row-major samples, the length must match the shape
    pub fn from_vec(data: Vec<f64>, shape: (usize, usize)) -> Result<Self, ConfigError> {
        if data.len() != shape.0 * shape.1 {
            return Err(ConfigError::GridLength {
                len: data.len(),
                shape,
            });
        }
        Ok(Self { data, shape })
    }
    pub(crate) fn from_raw(data: Vec<f64>, shape: (usize, usize)) -> Self {
        debug_assert_eq!(data.len(), shape.0 * shape.1);
        Self { data, shape }
    }
    /// A `n x n` grid with cell `(i,j)` set to `f(i,j)`
    pub fn from_fn<F>(n: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> f64 + Sync,
    {
        Self::from_shape_fn((n, n), f)
    }
    /// A `rows x cols` grid with cell `(i,j)` set to `f(i,j)`
    ///
    /// Rows are filled in parallel; each cell only depends on its own indices.
    pub fn from_shape_fn<F>(shape: (usize, usize), f: F) -> Self
    where
        F: Fn(usize, usize) -> f64 + Sync,
    {
        let mut grid = Self::zeros(shape);
        if grid.is_empty() {
            return grid;
        }
        grid.data
            .par_chunks_mut(shape.1)
            .enumerate()
            .for_each(|(i, row)| {
                row.iter_mut().enumerate().for_each(|(j, v)| *v = f(i, j));
            });
        grid
    }
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }
    pub fn rows(&self) -> usize {
        self.shape.0
    }
    pub fn cols(&self) -> usize {
        self.shape.1
    }
    pub fn is_square(&self) -> bool {
        self.shape.0 == self.shape.1
    }
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        (i < self.shape.0 && j < self.shape.1).then(|| self.data[i * self.shape.1 + j])
    }
    pub fn as_slice(&self) -> &[f64] {
        self.data.as_slice()
    }
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.data.iter()
    }
    /// Iterator over `((i, j), value)`
    pub fn indexed_iter(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        let cols = self.shape.1;
        self.data
            .iter()
            .enumerate()
            .map(move |(k, &v)| ((k / cols, k % cols), v))
    }
    /// Number of non-zero cells
    pub fn n_set(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0f64).count()
    }
    /// Minimum and maximum values
    pub fn extrema(&self) -> (f64, f64) {
        (
            self.data.iter().cloned().fold(f64::INFINITY, f64::min),
            self.data.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        )
    }
    /// Indices of the first maximum value
    pub fn argmax(&self) -> Option<(usize, usize)> {
        let cols = self.shape.1;
        self.data
            .iter()
            .enumerate()
            .fold(None, |acc: Option<(usize, f64)>, (k, &v)| match acc {
                Some((_, max)) if max >= v => acc,
                _ => Some((k, v)),
            })
            .map(|(k, _)| (k / cols, k % cols))
    }
    /// Applies `f` to every cell
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Self {
        Self {
            data: self.data.iter().map(|&v| f(v)).collect(),
            shape: self.shape,
        }
    }
    /// Crops the centered window spanning `zoom` of each dimension
    ///
    /// The window is `[n/2 - n*zoom/2, n/2 + n*zoom/2 - 1)` along both axes.
    pub fn crop_center(&self, zoom: f64) -> Self {
        let window = |n: usize| {
            let half = n as f64 / 2.;
            let start = (half - n as f64 * zoom / 2.).max(0.) as usize;
            let end = ((half + n as f64 * zoom / 2.) as usize)
                .saturating_sub(1)
                .min(n);
            (start, end.max(start))
        };
        let (r0, r1) = window(self.shape.0);
        let (c0, c1) = window(self.shape.1);
        let data: Vec<f64> = (r0..r1)
            .flat_map(|i| {
                let row = i * self.shape.1;
                self.data[row + c0..row + c1].iter().cloned()
            })
            .collect();
        Self {
            data,
            shape: (r1 - r0, c1 - c0),
        }
    }
}
impl Index<(usize, usize)> for Grid {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        assert!(
            i < self.shape.0 && j < self.shape.1,
            "index ({i},{j}) out of bounds for shape {:?}",
            self.shape
        );
        &self.data[i * self.shape.1 + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_row_major() {
        let grid = Grid::from_fn(3, |i, j| (i * 10 + j) as f64);
        assert_eq!(grid[(0, 2)], 2.);
        assert_eq!(grid[(2, 1)], 21.);
        assert_eq!(grid.get(3, 0), None);
    }

    #[test]
    fn from_shape_fn_rectangular() {
        let grid = Grid::from_shape_fn((2, 5), |i, j| (i * 10 + j) as f64);
        assert_eq!(grid.shape(), (2, 5));
        assert!(!grid.is_square());
        assert_eq!(grid[(1, 4)], 14.);
        assert!(Grid::from_shape_fn((0, 3), |_, _| 1.).is_empty());
    }

    #[test]
    fn from_vec_length_mismatch() {
        let err = Grid::from_vec(vec![0.; 5], (2, 3)).unwrap_err();
        assert!(matches!(err, ConfigError::GridLength { len: 5, .. }));
    }

    #[test]
    fn extrema_and_argmax() {
        let grid = Grid::from_fn(4, |i, j| if (i, j) == (1, 2) { 5. } else { -1. });
        assert_eq!(grid.extrema(), (-1., 5.));
        assert_eq!(grid.argmax(), Some((1, 2)));
        assert_eq!(grid.n_set(), 16);
    }

    #[test]
    fn crop_center_window() {
        let grid = Grid::from_fn(1000, |i, j| (i * 1000 + j) as f64);
        let crop = grid.crop_center(0.25);
        // rows and cols 375..624
        assert_eq!(crop.shape(), (249, 249));
        assert_eq!(crop[(0, 0)], grid[(375, 375)]);
        assert_eq!(crop[(248, 248)], grid[(623, 623)]);
    }
}
