//! Serializes a whole image. Each row is encoded with the row encoder, and
//! consecutive identical rows are folded into a single line with a repeat
//! count, so a 2x2 white image becomes "ffffff:2x2".

use crate::error::{PaiError, Result};
use crate::grid::PixelGrid;
use crate::row::{decode_row, Row};
use crate::separators::Separators;
use crate::utils::number_parsing::parse_count;
use crate::utils::run_length_encoding::RunIterator;
use crate::Context;
use std::fmt::Write;

/// A row and the number of times it repeats vertically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineRun {
    pub row: Row,
    pub repeat: usize,
}

/// The parsed form of a PAI document. Every row has the same width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    lines: Vec<LineRun>,
    width: usize,
    height: usize,
}

impl Document {
    /// Fold the rows of 'grid' into maximal line runs.
    pub fn from_grid(grid: &PixelGrid) -> Result<Self> {
        if grid.height() == 0 {
            return Err(PaiError::EmptyImage);
        }

        let rows = grid
            .rows()
            .map(Row::from_pixels)
            .collect::<Result<Vec<Row>>>()?;

        let lines = RunIterator::new(&rows)
            .map(|(row, repeat)| LineRun {
                row: row.clone(),
                repeat,
            })
            .collect();

        Ok(Self {
            lines,
            width: grid.width(),
            height: grid.height(),
        })
    }

    /// Parse and validate the textual form of a document.
    pub fn parse(text: &str, ctx: &Context) -> Result<Self> {
        let seps = ctx.separators();
        seps.validate()?;
        if text.is_empty() {
            return Err(PaiError::EmptyImage);
        }

        let mut lines: Vec<LineRun> = Vec::new();
        let mut height: usize = 0;

        for (i, entry) in text.split(seps.line).enumerate() {
            let mut parts = entry.split(seps.multi_line);
            // Split always returns at least one item.
            let token = parts.next().unwrap_or_default();
            let repeat = match parts.next() {
                Some(count) => parse_count(count)
                    .ok_or_else(|| PaiError::MalformedRepeat(entry.to_string()))?,
                None => 1,
            };
            if parts.next().is_some() {
                return Err(PaiError::MalformedRepeat(entry.to_string()));
            }

            let row = decode_row(token, seps)?;
            if let Some(first) = lines.first() {
                if row.width() != first.row.width() {
                    return Err(PaiError::IrregularWidth {
                        line: i,
                        expected: first.row.width(),
                        found: row.width(),
                    });
                }
            }

            height = height.checked_add(repeat).ok_or_else(|| {
                PaiError::LimitExceeded("the image is too tall".to_string())
            })?;
            lines.push(LineRun { row, repeat });
        }

        let width = lines[0].row.width();
        let pixels = (width as u64).checked_mul(height as u64);
        match pixels {
            Some(n) if n <= ctx.max_pixels() => {}
            _ => {
                return Err(PaiError::LimitExceeded(format!(
                    "{}x{} is larger than {} pixels",
                    width,
                    height,
                    ctx.max_pixels()
                )))
            }
        }

        Ok(Self {
            lines,
            width,
            height,
        })
    }

    pub fn lines(&self) -> &[LineRun] {
        &self.lines
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Append the textual form of the document to 'out'.
    pub fn write(&self, seps: &Separators, out: &mut String) {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push(seps.line);
            }
            line.row.write(seps, out);
            if line.repeat > 1 {
                out.push(seps.multi_line);
                let _ = write!(out, "{}", line.repeat);
            }
        }
    }

    /// Expand the runs into a dense pixel grid.
    pub fn rasterize(&self) -> PixelGrid {
        let mut pixels = Vec::with_capacity(self.width * self.height);
        let mut row = Vec::with_capacity(self.width);

        for line in &self.lines {
            row.clear();
            line.row.expand(&mut row);
            for _ in 0..line.repeat {
                pixels.extend_from_slice(&row);
            }
        }

        PixelGrid::from_raw(self.width, self.height, pixels)
    }
}

/// Convert a pixel grid into a PAI string.
pub fn serialize(grid: &PixelGrid, ctx: &Context) -> Result<String> {
    let seps = ctx.separators();
    seps.validate()?;
    let doc = Document::from_grid(grid)?;
    let mut out = String::new();
    doc.write(seps, &mut out);
    Ok(out)
}

/// Convert a PAI string into a pixel grid.
pub fn deserialize(text: &str, ctx: &Context) -> Result<PixelGrid> {
    Ok(Document::parse(text, ctx)?.rasterize())
}
