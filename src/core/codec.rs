//! Payload codec.
//!
//! `zip` gzips a payload and encodes it as standard base64 so it can live in
//! a vault string field; `unzip` reverses it byte-exactly. The gzip header
//! carries no timestamp, so the output is deterministic.

use std::io::{Read, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::trace;

use crate::error::CodecError;

/// Compress and encode a payload.
///
/// # Errors
///
/// Returns `CodecError::Compress` if the gzip stream can't be written.
pub fn zip(payload: &[u8]) -> Result<String, CodecError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(payload).map_err(CodecError::Compress)?;
    let compressed = encoder.finish().map_err(CodecError::Compress)?;

    let encoded = STANDARD.encode(compressed);
    trace!(plain_len = payload.len(), encoded_len = encoded.len(), "zipped");
    Ok(encoded)
}

/// Decode and decompress a payload produced by [`zip`].
///
/// ASCII whitespace (line wrapping, trailing newlines) is ignored.
///
/// # Errors
///
/// Returns `CodecError::Empty` for an empty input, `CodecError::Encoding`
/// for malformed base64 and `CodecError::Decompress` for a corrupt gzip
/// stream.
pub fn unzip(encoded: &[u8]) -> Result<Vec<u8>, CodecError> {
    let cleaned: Vec<u8> = encoded
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Err(CodecError::Empty);
    }

    let compressed = STANDARD.decode(cleaned)?;
    let mut decoder = GzDecoder::new(compressed.as_slice());
    let mut payload = Vec::new();
    decoder
        .read_to_end(&mut payload)
        .map_err(CodecError::Decompress)?;

    trace!(encoded_len = encoded.len(), plain_len = payload.len(), "unzipped");
    Ok(payload)
}
