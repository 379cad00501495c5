//! Wraps the PAI string with a general-purpose byte compressor.

use crate::error::{PaiError, Result};
use crate::Context;
use std::io::Write;

/// The lowest and highest accepted quality levels.
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 11;

/// Size of the internal buffers of the brotli streams.
const BROTLI_BUFFER_SIZE: usize = 4096;
/// Log2 of the brotli window size.
const BROTLI_LG_WINDOW: u32 = 22;
/// The amount of output space added per inflate step.
const DEFLATE_CHUNK_SIZE: usize = 1 << 16;

/// A trait that defines the interface of a lossless byte compressor.
pub trait Compressor {
    /// Compress 'input' at 'quality' into 'output' and return the number of
    /// bytes written.
    fn compress(
        &self,
        input: &[u8],
        quality: u8,
        output: &mut Vec<u8>,
    ) -> Result<usize>;

    /// Decompress 'input' into 'output' and return the number of bytes
    /// written. Invalid or truncated input is a 'CorruptPayload' error.
    fn decompress(&self, input: &[u8], output: &mut Vec<u8>) -> Result<usize>;
}

/// Brotli compression, the default format of .pai files.
pub struct Brotli;

impl Compressor for Brotli {
    fn compress(
        &self,
        input: &[u8],
        quality: u8,
        output: &mut Vec<u8>,
    ) -> Result<usize> {
        let start = output.len();
        let mut writer = brotli::CompressorWriter::new(
            &mut *output,
            BROTLI_BUFFER_SIZE,
            quality as u32,
            BROTLI_LG_WINDOW,
        );
        writer.write_all(input)?;
        // Finishes the stream.
        let output = writer.into_inner();
        Ok(output.len() - start)
    }

    fn decompress(&self, input: &[u8], output: &mut Vec<u8>) -> Result<usize> {
        use brotli::enc::StandardAlloc;
        use brotli::{BrotliDecompressStream, BrotliResult, BrotliState};

        let start = output.len();
        let mut state = BrotliState::new(
            StandardAlloc::default(),
            StandardAlloc::default(),
            StandardAlloc::default(),
        );
        let mut chunk = vec![0u8; BROTLI_BUFFER_SIZE];
        let mut available_in = input.len();
        let mut input_offset = 0;
        let mut total_out = 0;
        loop {
            let mut available_out = chunk.len();
            let mut output_offset = 0;
            let result = BrotliDecompressStream(
                &mut available_in,
                &mut input_offset,
                input,
                &mut available_out,
                &mut output_offset,
                &mut chunk,
                &mut total_out,
                &mut state,
            );
            output.extend_from_slice(&chunk[..output_offset]);

            match result {
                BrotliResult::NeedsMoreOutput => continue,
                BrotliResult::ResultSuccess if available_in != 0 => {
                    return Err(PaiError::CorruptPayload(format!(
                        "brotli: {} trailing bytes",
                        available_in
                    )));
                }
                BrotliResult::ResultSuccess => return Ok(output.len() - start),
                BrotliResult::NeedsMoreInput => {
                    return Err(PaiError::CorruptPayload(
                        "brotli: truncated stream".to_string(),
                    ));
                }
                BrotliResult::ResultFailure => {
                    return Err(PaiError::CorruptPayload(
                        "brotli: invalid stream".to_string(),
                    ));
                }
            }
        }
    }
}

/// Zlib compression. Deflate has fewer levels than brotli, so qualities
/// above 9 behave like 9.
pub struct Deflate;

impl Compressor for Deflate {
    fn compress(
        &self,
        input: &[u8],
        quality: u8,
        output: &mut Vec<u8>,
    ) -> Result<usize> {
        use flate2::{write::ZlibEncoder, Compression};

        let start = output.len();
        let level = Compression::new(quality.min(9) as u32);
        let mut encoder = ZlibEncoder::new(&mut *output, level);
        encoder.write_all(input)?;
        encoder.finish()?;
        Ok(output.len() - start)
    }

    fn decompress(&self, input: &[u8], output: &mut Vec<u8>) -> Result<usize> {
        use flate2::{Decompress, FlushDecompress, Status};

        let start = output.len();
        let mut inflater = Decompress::new(true);
        loop {
            // The inflater only writes into the spare capacity.
            if output.capacity() - output.len() < DEFLATE_CHUNK_SIZE {
                output.reserve(DEFLATE_CHUNK_SIZE);
            }
            let consumed = inflater.total_in() as usize;
            let produced = inflater.total_out();
            let status = inflater
                .decompress_vec(&input[consumed..], output, FlushDecompress::None)
                .map_err(|e| PaiError::CorruptPayload(format!("deflate: {}", e)))?;

            match status {
                Status::StreamEnd => {
                    let trailing = input.len() - inflater.total_in() as usize;
                    if trailing != 0 {
                        return Err(PaiError::CorruptPayload(format!(
                            "deflate: {} trailing bytes",
                            trailing
                        )));
                    }
                    return Ok(output.len() - start);
                }
                Status::Ok | Status::BufError => {
                    // The input ran out before the end of the stream.
                    if inflater.total_in() as usize == consumed
                        && inflater.total_out() == produced
                    {
                        return Err(PaiError::CorruptPayload(
                            "deflate: truncated stream".to_string(),
                        ));
                    }
                }
            }
        }
    }
}

/// Selects one of the available compressors.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    Brotli,
    Deflate,
}

impl Method {
    pub const ALL: [Method; 2] = [Method::Brotli, Method::Deflate];

    pub fn compressor(&self) -> &'static dyn Compressor {
        match self {
            Method::Brotli => &Brotli,
            Method::Deflate => &Deflate,
        }
    }

    /// The id stored in the framed header.
    pub fn id(&self) -> u8 {
        match self {
            Method::Brotli => 1,
            Method::Deflate => 2,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.id() == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Method::Brotli => "brotli",
            Method::Deflate => "deflate",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }
}

/// Return an error if 'quality' is outside of the supported range.
pub fn check_quality(quality: u8) -> Result<()> {
    if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
        return Err(PaiError::InvalidQuality(quality));
    }
    Ok(())
}

/// Compress a PAI string at the quality of 'ctx'.
pub fn compress(text: &str, ctx: &Context, method: Method) -> Result<Vec<u8>> {
    check_quality(ctx.quality())?;
    let mut output = Vec::new();
    method
        .compressor()
        .compress(text.as_bytes(), ctx.quality(), &mut output)?;
    Ok(output)
}

/// Decompress bytes that were made by 'compress' back into a PAI string.
pub fn decompress(input: &[u8], method: Method) -> Result<String> {
    let mut output = Vec::new();
    method.compressor().decompress(input, &mut output)?;
    String::from_utf8(output).map_err(|e| {
        PaiError::CorruptPayload(format!("payload is not text: {}", e))
    })
}
