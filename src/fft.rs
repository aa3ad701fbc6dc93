//! Two-dimensional discrete Fourier transforms
//!
//! [`Fft2`] runs 1-D transforms along the rows and then along the columns of a
//! row-major buffer. The forward transform is unnormalized and the inverse
//! transform is scaled by `1/(rows*cols)`.

use std::{fmt, sync::Arc};

use rayon::prelude::*;
use rustfft::{Fft, FftDirection, FftPlanner};

pub use rustfft::num_complex::Complex64;

/// Planned 2-D transform for a given shape
pub struct Fft2 {
    shape: (usize, usize),
    direction: FftDirection,
    row_fft: Arc<dyn Fft<f64>>,
    col_fft: Arc<dyn Fft<f64>>,
}
impl fmt::Debug for Fft2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fft2")
            .field("shape", &self.shape)
            .field("direction", &self.direction)
            .finish()
    }
}
impl Fft2 {
    fn plan(shape: (usize, usize), direction: FftDirection) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            shape,
            direction,
            row_fft: planner.plan_fft(shape.1, direction),
            col_fft: planner.plan_fft(shape.0, direction),
        }
    }
    /// Forward transform of a `rows x cols` buffer
    pub fn forward(shape: (usize, usize)) -> Self {
        Self::plan(shape, FftDirection::Forward)
    }
    /// Normalized inverse transform of a `rows x cols` buffer
    pub fn inverse(shape: (usize, usize)) -> Self {
        Self::plan(shape, FftDirection::Inverse)
    }
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }
    /// Transforms `buffer` in place
    pub fn process(&self, buffer: &mut [Complex64]) {
        let (rows, cols) = self.shape;
        assert_eq!(buffer.len(), rows * cols);
        if buffer.is_empty() {
            return;
        }
        buffer
            .par_chunks_mut(cols)
            .for_each(|row| self.row_fft.process(row));
        let mut columns = transpose(buffer, self.shape);
        columns
            .par_chunks_mut(rows)
            .for_each(|column| self.col_fft.process(column));
        buffer.copy_from_slice(&transpose(&columns, (cols, rows)));
        if let FftDirection::Inverse = self.direction {
            let scale = 1. / (rows * cols) as f64;
            buffer.par_iter_mut().for_each(|v| *v *= scale);
        }
    }
}

fn transpose<T: Copy + Send + Sync>(data: &[T], (rows, cols): (usize, usize)) -> Vec<T> {
    (0..cols)
        .into_par_iter()
        .flat_map_iter(|j| (0..rows).map(move |i| data[i * cols + j]))
        .collect()
}

fn roll<T: Copy>(data: &[T], (rows, cols): (usize, usize), (si, sj): (usize, usize)) -> Vec<T> {
    let mut rolled = data.to_vec();
    for i in 0..rows {
        for j in 0..cols {
            rolled[((i + si) % rows) * cols + (j + sj) % cols] = data[i * cols + j];
        }
    }
    rolled
}

/// Moves the zero frequency from index `(0,0)` to `(rows/2, cols/2)`
pub fn fftshift<T: Copy>(data: &[T], shape: (usize, usize)) -> Vec<T> {
    let (rows, cols) = shape;
    if rows == 0 || cols == 0 {
        return data.to_vec();
    }
    roll(data, shape, (rows / 2, cols / 2))
}

/// Undoes [`fftshift`]
pub fn ifftshift<T: Copy>(data: &[T], shape: (usize, usize)) -> Vec<T> {
    let (rows, cols) = shape;
    if rows == 0 || cols == 0 {
        return data.to_vec();
    }
    roll(data, shape, (rows - rows / 2, cols - cols / 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-9
    }

    #[test]
    fn shift_moves_zero_frequency_to_center() {
        for shape in [(4, 4), (5, 3), (1, 6)] {
            let data: Vec<usize> = (0..shape.0 * shape.1).collect();
            let shifted = fftshift(&data, shape);
            assert_eq!(shifted[(shape.0 / 2) * shape.1 + shape.1 / 2], 0);
            assert_eq!(ifftshift(&shifted, shape), data);
        }
    }

    #[test]
    fn constant_transforms_to_delta() {
        let shape = (6, 4);
        let mut buffer = vec![Complex64::new(1., 0.); 24];
        Fft2::forward(shape).process(&mut buffer);
        assert!(close(buffer[0], Complex64::new(24., 0.)));
        assert!(buffer.iter().skip(1).all(|&v| close(v, Complex64::new(0., 0.))));
    }

    #[test]
    fn single_tone_lands_on_its_frequency() {
        // exp(2i.pi.(2i/8 + 1j/4)) peaks at (2,1)
        let shape = (8, 4);
        let mut buffer: Vec<Complex64> = (0..32)
            .map(|k| {
                let (i, j) = ((k / 4) as f64, (k % 4) as f64);
                Complex64::from_polar(1., 2. * std::f64::consts::PI * (2. * i / 8. + j / 4.))
            })
            .collect();
        Fft2::forward(shape).process(&mut buffer);
        assert!(close(buffer[2 * 4 + 1], Complex64::new(32., 0.)));
    }

    #[test]
    fn inverse_undoes_forward() {
        let shape = (5, 7);
        let data: Vec<Complex64> = (0..35)
            .map(|k| Complex64::new((k as f64).sin(), (k as f64 * 0.3).cos()))
            .collect();
        let mut buffer = data.clone();
        Fft2::forward(shape).process(&mut buffer);
        Fft2::inverse(shape).process(&mut buffer);
        assert!(buffer.iter().zip(&data).all(|(&a, &b)| close(a, b)));
    }
}
