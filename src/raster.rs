//! Reads and writes native raster files. The codec only sees pixel grids;
//! decoding PNG, JPEG and friends is left to the 'image' crate.

use crate::color::Pixel;
use crate::error::{PaiError, Result};
use crate::grid::PixelGrid;
use crate::utils::atomic_file;
use image::{ImageFormat, RgbImage};
use std::path::Path;

/// A trait that defines the interface for loading and storing pixel grids.
pub trait ImageIo {
    /// Load the image at 'path'. Alpha is discarded.
    fn read_pixel_grid(&self, path: &Path) -> Result<PixelGrid>;

    /// Store 'grid' at 'path' as an opaque image.
    fn write_pixel_grid(&self, path: &Path, grid: &PixelGrid) -> Result<()>;
}

/// Image files in any format supported by the 'image' crate. The format of
/// the output is picked from the extension of the path.
#[derive(Copy, Clone, Debug, Default)]
pub struct ImageFiles;

/// Convert a decoded image into a grid.
pub fn grid_from_image(img: &RgbImage) -> PixelGrid {
    let pixels = img
        .pixels()
        .map(|p| Pixel::new(p.0[0], p.0[1], p.0[2]))
        .collect();
    PixelGrid::from_raw(img.width() as usize, img.height() as usize, pixels)
}

/// Convert a grid into an image buffer.
pub fn image_from_grid(grid: &PixelGrid) -> Result<RgbImage> {
    let too_large = || {
        PaiError::LimitExceeded(format!(
            "{}x{} does not fit in an image buffer",
            grid.width(),
            grid.height()
        ))
    };
    let width = u32::try_from(grid.width()).map_err(|_| too_large())?;
    let height = u32::try_from(grid.height()).map_err(|_| too_large())?;

    let raw: Vec<u8> = grid
        .pixels()
        .iter()
        .flat_map(|p| [p.r, p.g, p.b])
        .collect();
    RgbImage::from_raw(width, height, raw).ok_or_else(too_large)
}

impl ImageIo for ImageFiles {
    fn read_pixel_grid(&self, path: &Path) -> Result<PixelGrid> {
        let img = image::open(path)?.to_rgb8();
        log::debug!(
            "Loaded {}x{} image from {}",
            img.width(),
            img.height(),
            path.display()
        );
        Ok(grid_from_image(&img))
    }

    fn write_pixel_grid(&self, path: &Path, grid: &PixelGrid) -> Result<()> {
        let format = ImageFormat::from_path(path)?;
        let img = image_from_grid(grid)?;
        atomic_file::write_with(path, |tmp| {
            img.save_with_format(tmp, format).map_err(PaiError::from)
        })?;
        log::debug!("Wrote {}", path.display());
        Ok(())
    }
}
