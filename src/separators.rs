//! The four characters that delimit the parts of a PAI document.

use crate::error::{PaiError, Result};
use std::str::FromStr;

pub const PIXEL: char = '@';
pub const LINE: char = '&';
pub const SIZE: char = ':';
pub const MULTI_LINE: char = 'x';

/// The token alphabet of a PAI document. All four characters must differ
/// from each other and from the hex digits used by colors and counts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Separators {
    /// Between two pixel runs of a row.
    pub pixel: char,
    /// Between two lines of the document.
    pub line: char,
    /// Between the color and the length of a pixel run.
    pub size: char,
    /// Between a row and its vertical repeat count.
    pub multi_line: char,
}

impl Default for Separators {
    fn default() -> Self {
        Self {
            pixel: PIXEL,
            line: LINE,
            size: SIZE,
            multi_line: MULTI_LINE,
        }
    }
}

impl Separators {
    pub fn new(pixel: char, line: char, size: char, multi_line: char) -> Self {
        Self {
            pixel,
            line,
            size,
            multi_line,
        }
    }

    fn as_array(&self) -> [char; 4] {
        [self.pixel, self.line, self.size, self.multi_line]
    }

    /// Check that the separators can't be confused with each other or with
    /// the content of a token.
    pub fn validate(&self) -> Result<()> {
        let all = self.as_array();
        for (i, c) in all.iter().enumerate() {
            if c.is_ascii_hexdigit() {
                return Err(PaiError::InvalidSeparators(format!(
                    "{:?} collides with the hex alphabet",
                    c
                )));
            }
            if all[i + 1..].contains(c) {
                return Err(PaiError::InvalidSeparators(format!(
                    "{:?} is used more than once",
                    c
                )));
            }
        }
        Ok(())
    }
}

/// Parses four characters in the order pixel, line, size, multi-line, for
/// example "@&:x".
impl FromStr for Separators {
    type Err = PaiError;

    fn from_str(s: &str) -> Result<Self> {
        let chars: Vec<char> = s.chars().collect();
        if let [pixel, line, size, multi_line] = chars[..] {
            let seps = Separators::new(pixel, line, size, multi_line);
            seps.validate()?;
            return Ok(seps);
        }
        Err(PaiError::InvalidSeparators(format!(
            "expected four characters, got {:?}",
            s
        )))
    }
}
