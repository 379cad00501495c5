//! Handles the optional header of framed .pai files. A framed file starts
//! with the signature, a version byte and the id of the compression method.
//! Unframed files, which is what the codec writes by default, hold only the
//! compressed payload.

use crate::compression::Method;
use crate::error::{PaiError, Result};
use crate::utils::signatures::{match_signature, FORMAT_VERSION, PAI_SIG};

/// The length of the framed header.
pub const HEADER_LEN: usize = PAI_SIG.len() + 2;

/// Write the header followed by 'payload' into 'output' and return the
/// number of bytes written.
pub fn wrap(method: Method, payload: &[u8], output: &mut Vec<u8>) -> usize {
    output.extend(PAI_SIG);
    output.push(FORMAT_VERSION);
    output.push(method.id());
    output.extend_from_slice(payload);
    HEADER_LEN + payload.len()
}

/// Return true if 'input' carries the framed header.
pub fn is_framed(input: &[u8]) -> bool {
    match_signature(input, &PAI_SIG)
}

/// Split 'input' into the compression method and the compressed payload.
/// Unframed input is assumed to be compressed with 'fallback'.
pub fn unwrap(input: &[u8], fallback: Method) -> Result<(Method, &[u8])> {
    if !is_framed(input) {
        return Ok((fallback, input));
    }

    let header = input.get(..HEADER_LEN).ok_or_else(|| {
        PaiError::CorruptPayload("truncated header".to_string())
    })?;
    let version = header[PAI_SIG.len()];
    if version != FORMAT_VERSION {
        return Err(PaiError::CorruptPayload(format!(
            "unsupported format version {}",
            version
        )));
    }

    let id = header[PAI_SIG.len() + 1];
    let method = Method::from_id(id).ok_or_else(|| {
        PaiError::CorruptPayload(format!("unknown compression method {}", id))
    })?;
    Ok((method, &input[HEADER_LEN..]))
}
