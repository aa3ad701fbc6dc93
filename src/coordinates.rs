//! Grid index to sample plane coordinates

/// Maps the indices of a `n x n` grid onto a square sample plane of side `side`
///
/// The grid center `(n/2, n/2)` maps to the origin, `x` grows with the row
/// index and `y` grows as the column index decreases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    n: usize,
    ratio: f64,
}
impl CoordinateMapper {
    pub fn new(n: usize, side: f64) -> Self {
        Self {
            n,
            ratio: side / n as f64,
        }
    }
    /// Grid size
    pub fn n(&self) -> usize {
        self.n
    }
    /// Sampling step in the unit of the plane side
    pub fn ratio(&self) -> f64 {
        self.ratio
    }
    /// Returns the `(x,y)` coordinates of cell `(i,j)`
    pub fn distance(&self, i: usize, j: usize) -> (f64, f64) {
        let center = (self.n / 2) as f64;
        let x = (i as f64 - center) * self.ratio;
        let y = (center - j as f64) * self.ratio;
        (x, y)
    }
}

/// Returns the `(x,y)` coordinates of cell `(i,j)` of a `n x n` grid sampling a plane of side `side`
pub fn index_to_distance(i: usize, j: usize, n: usize, side: f64) -> (f64, f64) {
    CoordinateMapper::new(n, side).distance(i, j)
}
