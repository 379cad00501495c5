//! Converts pixels to and from their six digit hex form.

use crate::error::{PaiError, Result};
use std::fmt::Write;

/// An opaque 24-bit RGB color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Append the lowercase hex form of 'color' to 'out'.
pub fn write_color(color: Pixel, out: &mut String) {
    // Writing into a String never fails.
    let _ = write!(out, "{:02x}{:02x}{:02x}", color.r, color.g, color.b);
}

/// Return the six digit lowercase hex form of 'color'.
pub fn encode_color(color: Pixel) -> String {
    let mut out = String::with_capacity(6);
    write_color(color, &mut out);
    out
}

/// Parse a color such as "ff8000" or "#FF8000".
pub fn decode_color(text: &str) -> Result<Pixel> {
    let digits = text.strip_prefix('#').unwrap_or(text);
    let bytes = digits.as_bytes();
    if bytes.len() != 6 || !bytes.iter().all(u8::is_ascii_hexdigit) {
        return Err(PaiError::MalformedColor(text.to_string()));
    }

    // The digits are ASCII, so slicing on byte offsets is safe.
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map_err(|_| PaiError::MalformedColor(text.to_string()))
    };
    Ok(Pixel::new(channel(0)?, channel(2)?, channel(4)?))
}
