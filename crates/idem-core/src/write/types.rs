use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::checksum::HashAlgorithm;
use crate::encoding::{EncodingError, TextEncoding};

/// Content to write: text (encoded with [`WriteOptions::encoding`]) or raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteData {
    Text(String),
    Bytes(Vec<u8>),
}

impl WriteData {
    /// Canonical byte buffer that is hashed and written.
    pub fn into_bytes(self, encoding: TextEncoding) -> Result<Vec<u8>, EncodingError> {
        match self {
            WriteData::Text(text) => encoding.encode(&text),
            WriteData::Bytes(bytes) => Ok(bytes),
        }
    }
}

impl From<&str> for WriteData {
    fn from(s: &str) -> Self {
        WriteData::Text(s.to_string())
    }
}

impl From<String> for WriteData {
    fn from(s: String) -> Self {
        WriteData::Text(s)
    }
}

impl From<&[u8]> for WriteData {
    fn from(b: &[u8]) -> Self {
        WriteData::Bytes(b.to_vec())
    }
}

impl From<Vec<u8>> for WriteData {
    fn from(b: Vec<u8>) -> Self {
        WriteData::Bytes(b)
    }
}

/// Options for [`super::idempotent_write`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteOptions {
    #[serde(default)]
    pub algorithm: HashAlgorithm,
    #[serde(default)]
    pub encoding: TextEncoding,
}

/// What an idempotent write did to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteOperation {
    Created,
    Updated,
    NoChange,
}

impl WriteOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            WriteOperation::Created => "created",
            WriteOperation::Updated => "updated",
            WriteOperation::NoChange => "no-change",
        }
    }
}

impl fmt::Display for WriteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteResult {
    pub operation: WriteOperation,
    pub path: PathBuf,
}
