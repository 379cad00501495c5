//! Runs the whole pipeline: pixels to PAI text to compressed bytes, and back.

use crate::compression::{self, Method};
use crate::container;
use crate::document::{deserialize, serialize};
use crate::error::{PaiError, Result};
use crate::grid::PixelGrid;
use crate::raster::{ImageFiles, ImageIo};
use crate::utils::atomic_file;
use crate::utils::signatures::FILE_EXTENSION;
use crate::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// Identifies the pipeline that a hook is called for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Encode,
    Decode,
}

/// Callbacks that run immediately before and after a whole pipeline.
pub trait Hooks {
    fn on_start(&mut self, _op: Operation) {}

    /// Called after the pipeline, whether or not it succeeded.
    fn on_end(&mut self, _op: Operation, _ok: bool) {}
}

/// Hooks that do nothing.
pub struct NoHooks;

impl Hooks for NoHooks {}

/// Controls how images are encoded and decoded.
#[derive(Clone, Debug, Default)]
pub struct Options {
    pub context: Context,
    /// The compressor used to encode, and to decode unframed input.
    pub method: Method,
    /// Prefix the payload with the signature header.
    pub framed: bool,
    /// Save the encoded bytes to 'file_name' instead of returning them.
    pub write_to_file: bool,
    pub file_name: Option<PathBuf>,
}

/// The extension of decoded images when no output path is given.
pub const DECODED_EXTENSION: &str = "png";

/// Pick the output path of 'op' on 'input'. Without an explicit 'output' the
/// extension of 'input' is replaced, and if that names the input itself a
/// ".decoded" or ".encoded" suffix is added. An explicit 'output' that equals
/// 'input' is an 'OverwritesInput' error.
pub fn output_path(
    input: &Path,
    output: Option<&Path>,
    op: Operation,
) -> Result<PathBuf> {
    if let Some(output) = output {
        if output == input {
            return Err(PaiError::OverwritesInput(input.to_path_buf()));
        }
        return Ok(output.to_path_buf());
    }

    let (ext, suffix) = match op {
        Operation::Encode => (FILE_EXTENSION, "encoded"),
        Operation::Decode => (DECODED_EXTENSION, "decoded"),
    };
    let path = input.with_extension(ext);
    if path == input {
        return Ok(input.with_extension(format!("{}.{}", suffix, ext)));
    }
    Ok(path)
}

/// Convert a grid into the PAI text form.
pub fn encode_text(grid: &PixelGrid, options: &Options) -> Result<String> {
    serialize(grid, &options.context)
}

/// Convert PAI text into a grid.
pub fn decode_text(text: &str, options: &Options) -> Result<PixelGrid> {
    deserialize(text, &options.context)
}

/// Convert a grid into the compressed bytes of a .pai file.
pub fn encode_grid(grid: &PixelGrid, options: &Options) -> Result<Vec<u8>> {
    let text = encode_text(grid, options)?;
    let payload = compression::compress(&text, &options.context, options.method)?;
    log::debug!(
        "Encoded {}x{} image into {} characters, {} bytes compressed",
        grid.width(),
        grid.height(),
        text.len(),
        payload.len()
    );

    if !options.framed {
        return Ok(payload);
    }
    let mut output = Vec::with_capacity(container::HEADER_LEN + payload.len());
    let _ = container::wrap(options.method, &payload, &mut output);
    Ok(output)
}

/// Convert the bytes of a .pai file into a grid.
pub fn decode_bytes(input: &[u8], options: &Options) -> Result<PixelGrid> {
    let (method, payload) = container::unwrap(input, options.method)?;
    let text = compression::decompress(payload, method)?;
    log::debug!(
        "Decompressed {} bytes with {} into {} characters",
        payload.len(),
        method.name(),
        text.len()
    );
    decode_text(&text, options)
}

/// Converts image files to and from .pai using an image reader and writer.
pub struct Codec<I: ImageIo = ImageFiles> {
    io: I,
    options: Options,
}

impl Codec<ImageFiles> {
    pub fn new(options: Options) -> Self {
        Self::with_io(ImageFiles, options)
    }
}

impl<I: ImageIo> Codec<I> {
    pub fn with_io(io: I, options: Options) -> Self {
        Self { io, options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Run 'pipeline' between the start and end hooks.
    fn run<T, F>(op: Operation, hooks: &mut dyn Hooks, pipeline: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        hooks.on_start(op);
        let res = pipeline();
        hooks.on_end(op, res.is_ok());
        res
    }

    /// Encode the image at 'source'. The bytes are returned, unless the
    /// options ask for them to be written to a file.
    pub fn encode(
        &self,
        source: &Path,
        hooks: &mut dyn Hooks,
    ) -> Result<Option<Vec<u8>>> {
        let target = if self.options.write_to_file {
            Some(
                self.options
                    .file_name
                    .as_deref()
                    .ok_or(PaiError::MissingFileName)?,
            )
        } else {
            None
        };

        Self::run(Operation::Encode, hooks, || {
            let grid = self.io.read_pixel_grid(source)?;
            let encoded = encode_grid(&grid, &self.options)?;
            match target {
                Some(path) => {
                    atomic_file::write(path, &encoded)?;
                    log::debug!("Wrote {}", path.display());
                    Ok(None)
                }
                None => Ok(Some(encoded)),
            }
        })
    }

    /// Decode the bytes of a .pai file and write the image to 'target'.
    pub fn decode(
        &self,
        input: &[u8],
        target: &Path,
        hooks: &mut dyn Hooks,
    ) -> Result<()> {
        Self::run(Operation::Decode, hooks, || {
            let grid = decode_bytes(input, &self.options)?;
            self.io.write_pixel_grid(target, &grid)
        })
    }

    /// Decode the .pai file at 'source' and write the image to 'target'.
    pub fn decode_file(
        &self,
        source: &Path,
        target: &Path,
        hooks: &mut dyn Hooks,
    ) -> Result<()> {
        let input = fs::read(source)?;
        self.decode(&input, target, hooks)
    }
}
