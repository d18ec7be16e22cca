use anyhow::{Context, Result};
use base64::Engine as _;

pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(data)
        .context("Base64 decoding failed")
}
