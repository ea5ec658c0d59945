//! Share token codec: JSON, raw deflate, then unpadded URL-safe base64.

use crate::model::project::Project;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{Read, Write};

/// Upper bound on inflated document size accepted from a token.
pub const MAX_DECODED_BYTES: u64 = 4 * 1024 * 1024;

/// Share token encode/decode failure.
#[derive(Debug)]
pub enum ShareCodecError {
    /// Token is empty after trimming.
    EmptyToken,
    /// Token is not unpadded URL-safe base64.
    Base64(base64::DecodeError),
    /// Compression stream failed in either direction.
    Compression(std::io::Error),
    /// Inflated document exceeds `MAX_DECODED_BYTES`.
    TooLarge,
    /// Inflated bytes are empty or not a project document.
    Document(String),
    /// Project failed to serialize.
    Json(serde_json::Error),
}

impl Display for ShareCodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyToken => write!(f, "share token is empty"),
            Self::Base64(err) => write!(f, "share token is not valid base64: {err}"),
            Self::Compression(err) => write!(f, "share token compression failed: {err}"),
            Self::TooLarge => write!(
                f,
                "share token expands beyond {MAX_DECODED_BYTES} bytes"
            ),
            Self::Document(details) => write!(f, "share token payload is invalid: {details}"),
            Self::Json(err) => write!(f, "project serialization failed: {err}"),
        }
    }
}

impl Error for ShareCodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Base64(err) => Some(err),
            Self::Compression(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::EmptyToken | Self::TooLarge | Self::Document(_) => None,
        }
    }
}

impl From<base64::DecodeError> for ShareCodecError {
    fn from(value: base64::DecodeError) -> Self {
        Self::Base64(value)
    }
}

impl From<std::io::Error> for ShareCodecError {
    fn from(value: std::io::Error) -> Self {
        Self::Compression(value)
    }
}

/// Encodes a project document into a share token.
pub fn encode(project: &Project) -> Result<String, ShareCodecError> {
    let json = serde_json::to_vec(project).map_err(ShareCodecError::Json)?;
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&json)?;
    let compressed = encoder.finish()?;
    let token = URL_SAFE_NO_PAD.encode(compressed);
    debug!(
        "event=share_encode module=share status=ok json_bytes={} token_len={}",
        json.len(),
        token.len()
    );
    Ok(token)
}

/// Decodes a share token back into a project document.
pub fn decode(token: &str) -> Result<Project, ShareCodecError> {
    let result = decode_inner(token.trim());
    if let Err(err) = &result {
        warn!(
            "event=share_decode module=share status=error token_len={} error={}",
            token.len(),
            err
        );
    }
    result
}

fn decode_inner(token: &str) -> Result<Project, ShareCodecError> {
    if token.is_empty() {
        return Err(ShareCodecError::EmptyToken);
    }
    let compressed = URL_SAFE_NO_PAD.decode(token)?;

    let mut json = Vec::new();
    DeflateDecoder::new(compressed.as_slice())
        .take(MAX_DECODED_BYTES + 1)
        .read_to_end(&mut json)?;
    if json.len() as u64 > MAX_DECODED_BYTES {
        return Err(ShareCodecError::TooLarge);
    }
    if json.is_empty() {
        return Err(ShareCodecError::Document("empty payload".to_string()));
    }

    serde_json::from_slice(&json).map_err(|err| ShareCodecError::Document(err.to_string()))
}
