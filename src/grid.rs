//! A dense, row-major buffer of RGB pixels.

use crate::color::Pixel;
use crate::error::{PaiError, Result};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    /// Row-major pixels, 'width * height' of them.
    pixels: Vec<Pixel>,
}

impl PixelGrid {
    /// Creates a grid filled with 'color'.
    ///
    /// # Panics
    ///
    /// Panics if 'width * height' overflows. Use 'try_filled' for sizes that
    /// come from untrusted input.
    pub fn filled(width: usize, height: usize, color: Pixel) -> Self {
        match Self::try_filled(width, height, color) {
            Some(grid) => grid,
            None => panic!("Grid size {}x{} overflows", width, height),
        }
    }

    /// Creates a grid filled with 'color', or returns None if
    /// 'width * height' overflows.
    pub fn try_filled(width: usize, height: usize, color: Pixel) -> Option<Self> {
        let len = width.checked_mul(height)?;
        Some(Self {
            width,
            height,
            pixels: vec![color; len],
        })
    }

    /// Wraps a row-major pixel buffer, or returns None if the buffer does not
    /// hold exactly 'width * height' pixels.
    pub fn from_pixels(
        width: usize,
        height: usize,
        pixels: Vec<Pixel>,
    ) -> Option<Self> {
        if width.checked_mul(height)? != pixels.len() {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wraps a buffer that is already known to be rectangular.
    pub(crate) fn from_raw(width: usize, height: usize, pixels: Vec<Pixel>) -> Self {
        debug_assert_eq!(width * height, pixels.len());
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Builds a grid from a list of rows that must all have the same length.
    pub fn from_rows(rows: &[Vec<Pixel>]) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        let mut pixels = Vec::with_capacity(width * rows.len());
        for (line, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(PaiError::IrregularWidth {
                    line,
                    expected: width,
                    found: row.len(),
                });
            }
            pixels.extend_from_slice(row);
        }
        Ok(Self {
            width,
            height: rows.len(),
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }

    /// Returns the pixels of row 'y'.
    ///
    /// # Panics
    ///
    /// Panics if 'y' is not smaller than the height.
    pub fn row(&self, y: usize) -> &[Pixel] {
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        (0..self.height).map(move |y| self.row(y))
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Overwrites the pixel at ('x', 'y').
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside of the grid. Use 'try_set' to
    /// get an error instead.
    pub fn set(&mut self, x: usize, y: usize, color: Pixel) {
        if let Err(err) = self.try_set(x, y, color) {
            panic!("{}", err);
        }
    }

    /// Overwrites the pixel at ('x', 'y'), or returns 'LimitExceeded' if the
    /// coordinates are outside of the grid.
    pub fn try_set(&mut self, x: usize, y: usize, color: Pixel) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(PaiError::LimitExceeded(format!(
                "pixel ({}, {}) is outside of the {}x{} grid",
                x, y, self.width, self.height
            )));
        }
        self.pixels[y * self.width + x] = color;
        Ok(())
    }
}
