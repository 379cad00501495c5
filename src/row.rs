//! Encodes a single row of pixels into a sequence of pixel runs, and parses
//! it back. A row such as [red, red, blue] is written as
//! "ff0000:2@0000ff:1".

use crate::color::{decode_color, write_color, Pixel};
use crate::error::{PaiError, Result};
use crate::separators::Separators;
use crate::utils::number_parsing::parse_count;
use crate::utils::run_length_encoding::RunIterator;
use std::fmt::Write;

/// A sequence of identical adjacent pixels within a row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PixelRun {
    pub color: Pixel,
    pub length: usize,
}

/// Describes one full row, left to right, as a list of runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    runs: Vec<PixelRun>,
    /// The sum of the run lengths.
    width: usize,
}

impl Row {
    /// Fold the pixels of a row into maximal runs.
    pub fn from_pixels(pixels: &[Pixel]) -> Result<Self> {
        if pixels.is_empty() {
            return Err(PaiError::EmptyRow);
        }
        let runs = RunIterator::new(pixels)
            .map(|(color, length)| PixelRun {
                color: *color,
                length,
            })
            .collect();
        Ok(Self {
            runs,
            width: pixels.len(),
        })
    }

    pub fn runs(&self) -> &[PixelRun] {
        &self.runs
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Append the textual form of the row to 'out'.
    pub fn write(&self, seps: &Separators, out: &mut String) {
        for (i, run) in self.runs.iter().enumerate() {
            if i > 0 {
                out.push(seps.pixel);
            }
            write_color(run.color, out);
            out.push(seps.size);
            let _ = write!(out, "{}", run.length);
        }
    }

    /// Append the pixels of the row to 'out'.
    pub fn expand(&self, out: &mut Vec<Pixel>) {
        for run in &self.runs {
            out.extend(std::iter::repeat(run.color).take(run.length));
        }
    }
}

/// Encode the pixels of a row into its textual form.
pub fn encode_row(pixels: &[Pixel], seps: &Separators) -> Result<String> {
    let row = Row::from_pixels(pixels)?;
    let mut out = String::new();
    row.write(seps, &mut out);
    Ok(out)
}

/// Parse a single "color:count" token.
fn decode_run(token: &str, seps: &Separators) -> Result<PixelRun> {
    let mut fields = token.split(seps.size);
    let (color, count) = match (fields.next(), fields.next(), fields.next()) {
        (Some(color), Some(count), None) => (color, count),
        _ => return Err(PaiError::MalformedRun(token.to_string())),
    };

    let length = parse_count(count)
        .ok_or_else(|| PaiError::MalformedRun(token.to_string()))?;
    let color = decode_color(color)?;
    Ok(PixelRun { color, length })
}

/// Parse the textual form of a row. Runs don't need to be maximal.
pub fn decode_row(token: &str, seps: &Separators) -> Result<Row> {
    let mut runs = Vec::new();
    let mut width: usize = 0;

    for part in token.split(seps.pixel) {
        let run = decode_run(part, seps)?;
        width = width.checked_add(run.length).ok_or_else(|| {
            PaiError::LimitExceeded(format!("row {:?} is too wide", token))
        })?;
        runs.push(run);
    }

    Ok(Row { runs, width })
}
