//! Data URI encoding.
//!
//! An asset becomes `data:<mime>;base64,<payload>`, where the payload is the
//! standard (padded, `+/` alphabet) base64 encoding of the file's exact bytes.
//! The whole file is held in memory; there is no size limit, and the encoded
//! form is about 4/3 of the source size.

use base64::{Engine as _, engine::general_purpose};
use std::fs;
use std::io;
use std::path::Path;

/// Build a data URI from raw bytes.
pub fn data_uri(bytes: &[u8], mime_type: &str) -> String {
    let b64 = general_purpose::STANDARD.encode(bytes);
    format!("data:{mime_type};base64,{b64}")
}

/// Read `path` and return its data URI plus the number of bytes read.
pub fn encode(path: &Path, mime_type: &str) -> io::Result<(String, usize)> {
    let bytes = fs::read(path)?;
    Ok((data_uri(&bytes, mime_type), bytes.len()))
}

/// Split a base64 data URI back into its MIME type and decoded bytes.
///
/// Returns `None` for anything that is not `data:<mime>;base64,<payload>`
/// with a valid payload.
pub fn decode_data_uri(uri: &str) -> Option<(&str, Vec<u8>)> {
    let rest = uri.strip_prefix("data:")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    let bytes = general_purpose::STANDARD.decode(payload).ok()?;
    Some((mime, bytes))
}
