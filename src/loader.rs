//! Grayscale image decoding

use std::path::{Path, PathBuf};

use image::ImageError;

use crate::Grid;

#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("image file {1:?} does not exist")]
    NotFound(#[source] std::io::Error, PathBuf),
    #[error("failed to decode image file {1:?}")]
    Decode(#[source] ImageError, PathBuf),
}

/// Loads an image file as a grid of 8-bit gray levels (0 to 255)
///
/// Color images are converted to luma, row `i` of the grid is the image row `i`.
pub fn load_grayscale<P: AsRef<Path>>(path: P) -> Result<Grid, LoaderError> {
    let path = path.as_ref();
    log::info!("Loading {:?}...", path);
    let image = image::open(path)
        .map_err(|e| match e {
            ImageError::IoError(e) => LoaderError::NotFound(e, path.to_path_buf()),
            e => LoaderError::Decode(e, path.to_path_buf()),
        })?
        .into_luma8();
    let (width, height) = image.dimensions();
    let data: Vec<f64> = image.into_raw().into_iter().map(f64::from).collect();
    Ok(Grid::from_raw(data, (height as usize, width as usize)))
}

#[cfg(test)]
mod tests {
    use std::{env, error::Error, fs};

    use image::{GrayImage, Luma};

    use super::*;

    #[test]
    fn missing_file() {
        assert!(matches!(
            load_grayscale("no/such/image.png"),
            Err(LoaderError::NotFound(..))
        ));
    }

    #[test]
    fn undecodable_file() -> Result<(), Box<dyn Error>> {
        let path = env::temp_dir().join("scalar_diffraction_not_an_image.png");
        fs::write(&path, b"definitely not a png")?;
        let result = load_grayscale(&path);
        fs::remove_file(&path)?;
        assert!(matches!(result, Err(LoaderError::Decode(..))));
        Ok(())
    }

    #[test]
    fn gray_levels_and_orientation() -> Result<(), Box<dyn Error>> {
        let path = env::temp_dir().join("scalar_diffraction_gradient.png");
        GrayImage::from_fn(6, 4, |x, y| Luma([(10 * x + 60 * y) as u8])).save(&path)?;
        let grid = load_grayscale(&path);
        fs::remove_file(&path)?;
        let grid = grid?;
        assert_eq!(grid.shape(), (4, 6));
        assert_eq!(grid[(0, 5)], 50.);
        assert_eq!(grid[(3, 0)], 180.);
        Ok(())
    }
}
