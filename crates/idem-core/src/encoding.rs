//! Text encodings used to turn string input into the bytes that are hashed
//! and written.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Encoding applied to text input. Raw byte input is never re-encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextEncoding {
    #[default]
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
    #[serde(rename = "utf16le", alias = "utf-16le", alias = "ucs2", alias = "ucs-2")]
    Utf16Le,
    #[serde(rename = "latin1", alias = "binary")]
    Latin1,
    #[serde(rename = "ascii")]
    Ascii,
    #[serde(rename = "hex")]
    Hex,
    #[serde(rename = "base64")]
    Base64,
}

#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("unsupported text encoding: {0}")]
    Unknown(String),
    #[error("character {ch:?} cannot be represented in {encoding}")]
    Unrepresentable { ch: char, encoding: TextEncoding },
    #[error("invalid {encoding} data: {reason}")]
    Invalid {
        encoding: TextEncoding,
        reason: String,
    },
}

impl TextEncoding {
    pub fn as_str(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf16Le => "utf16le",
            TextEncoding::Latin1 => "latin1",
            TextEncoding::Ascii => "ascii",
            TextEncoding::Hex => "hex",
            TextEncoding::Base64 => "base64",
        }
    }

    /// Convert text to bytes under this encoding.
    pub fn encode(self, text: &str) -> Result<Vec<u8>, EncodingError> {
        match self {
            TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            TextEncoding::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            TextEncoding::Latin1 => narrow(text, 0xff, self),
            TextEncoding::Ascii => narrow(text, 0x7f, self),
            TextEncoding::Hex => hex::decode(text.trim()).map_err(|e| self.invalid(e)),
            TextEncoding::Base64 => STANDARD.decode(text.trim()).map_err(|e| self.invalid(e)),
        }
    }

    /// Convert bytes back to text under this encoding.
    pub fn decode(self, bytes: &[u8]) -> Result<String, EncodingError> {
        match self {
            TextEncoding::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|e| self.invalid(e)),
            TextEncoding::Utf16Le => {
                if bytes.len() % 2 != 0 {
                    return Err(self.invalid("odd number of bytes"));
                }
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16(&units).map_err(|e| self.invalid(e))
            }
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            TextEncoding::Ascii => {
                if let Some(&b) = bytes.iter().find(|b| !b.is_ascii()) {
                    return Err(self.invalid(format!("byte 0x{b:02x} is not ascii")));
                }
                Ok(bytes.iter().map(|&b| char::from(b)).collect())
            }
            TextEncoding::Hex => Ok(hex::encode(bytes)),
            TextEncoding::Base64 => Ok(STANDARD.encode(bytes)),
        }
    }

    fn invalid(self, reason: impl fmt::Display) -> EncodingError {
        EncodingError::Invalid {
            encoding: self,
            reason: reason.to_string(),
        }
    }
}

/// Single-byte encodings: every char must fit under `max`.
fn narrow(text: &str, max: u32, encoding: TextEncoding) -> Result<Vec<u8>, EncodingError> {
    text.chars()
        .map(|ch| {
            if (ch as u32) <= max {
                Ok(ch as u32 as u8)
            } else {
                Err(EncodingError::Unrepresentable { ch, encoding })
            }
        })
        .collect()
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextEncoding {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "utf16le" | "utf-16le" | "ucs2" | "ucs-2" => Ok(TextEncoding::Utf16Le),
            "latin1" | "binary" => Ok(TextEncoding::Latin1),
            "ascii" => Ok(TextEncoding::Ascii),
            "hex" => Ok(TextEncoding::Hex),
            "base64" => Ok(TextEncoding::Base64),
            _ => Err(EncodingError::Unknown(s.to_string())),
        }
    }
}
