pub mod codec;
pub mod color;
pub mod compression;
pub mod container;
pub mod document;
pub mod error;
pub mod grid;
pub mod raster;
pub mod row;
pub mod separators;
pub mod utils;

pub use color::Pixel;
pub use error::{PaiError, Result};
pub use grid::PixelGrid;
pub use separators::Separators;

/// The default decoder limit on the number of pixels in an image.
pub const DEFAULT_MAX_PIXELS: u64 = 1 << 28;

/// Stores the settings of a single encode or decode call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Context {
    /// Specifies the compression quality, between 1 and 11.
    quality: u8,
    /// Specifies the characters that delimit the document.
    separators: Separators,
    /// The largest image, in pixels, that the decoder will allocate.
    max_pixels: u64,
}

impl Default for Context {
    fn default() -> Self {
        Self::new(11)
    }
}

impl Context {
    pub fn new(quality: u8) -> Self {
        Self {
            quality,
            separators: Separators::default(),
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }

    pub fn with_separators(mut self, separators: Separators) -> Self {
        self.separators = separators;
        self
    }

    pub fn with_max_pixels(mut self, max_pixels: u64) -> Self {
        self.max_pixels = max_pixels;
        self
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    pub fn separators(&self) -> &Separators {
        &self.separators
    }

    pub fn max_pixels(&self) -> u64 {
        self.max_pixels
    }
}
