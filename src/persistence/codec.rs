//! Reversible obfuscation for locally stored values
//!
//! JSON text is XORed byte-by-byte against a repeating fixed key and written
//! out as lowercase hex pairs. This only keeps values from being readable at
//! a glance in devtools; it is not encryption and the key is not a secret.

use hex::FromHexError;
use serde_json::Value;
use thiserror::Error;

/// Fixed obfuscation key
pub const OBFUSCATION_KEY: &[u8] = b"pixel-snake:easter-egg";

/// Reasons an encoded string could not be turned back into a value
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("encoded text has odd length {0}")]
    OddLength(usize),
    #[error("invalid hex digit at offset {index}")]
    InvalidHex { index: usize },
    #[error("decoded bytes are not valid UTF-8")]
    InvalidUtf8,
    #[error("decoded text is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Value <-> opaque string transform used by all persistence
pub trait Codec {
    fn encode(&self, value: &Value) -> String;
    fn decode(&self, text: &str) -> Result<Value, CodecError>;
}

/// Repeating-key XOR rendered as hex
#[derive(Debug, Clone, Copy)]
pub struct XorHexCodec {
    key: &'static [u8],
}

impl Default for XorHexCodec {
    fn default() -> Self {
        Self::new(OBFUSCATION_KEY)
    }
}

impl XorHexCodec {
    pub const fn new(key: &'static [u8]) -> Self {
        Self { key }
    }

    /// XOR is its own inverse, so this both applies and removes the key
    fn apply_key(&self, bytes: &mut [u8]) {
        if self.key.is_empty() {
            return;
        }
        for (byte, k) in bytes.iter_mut().zip(self.key.iter().cycle()) {
            *byte ^= k;
        }
    }
}

impl Codec for XorHexCodec {
    fn encode(&self, value: &Value) -> String {
        let mut bytes = value.to_string().into_bytes();
        self.apply_key(&mut bytes);
        hex::encode(bytes)
    }

    fn decode(&self, text: &str) -> Result<Value, CodecError> {
        let mut bytes = hex::decode(text).map_err(|e| match e {
            FromHexError::InvalidHexCharacter { index, .. } => CodecError::InvalidHex { index },
            _ => CodecError::OddLength(text.len()),
        })?;

        self.apply_key(&mut bytes);
        let json = String::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)?;
        Ok(serde_json::from_str(&json)?)
    }
}
