//! Image generation request types and data-URI helpers.

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Prefix of every image returned by the client.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Output resolution tag understood by the image model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageSize {
    #[default]
    #[serde(rename = "1K")]
    Size1K,
    #[serde(rename = "2K")]
    Size2K,
    #[serde(rename = "4K")]
    Size4K,
}

impl ImageSize {
    pub const ALL: [ImageSize; 3] = [ImageSize::Size1K, ImageSize::Size2K, ImageSize::Size4K];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Size1K => "1K",
            Self::Size2K => "2K",
            Self::Size4K => "4K",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "1K" => Ok(Self::Size1K),
            "2K" => Ok(Self::Size2K),
            "4K" => Ok(Self::Size4K),
            other => Err(Error::validation(format!(
                "unsupported image size `{other}` (expected 1K, 2K or 4K)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
    #[serde(default)]
    pub size: ImageSize,
}

impl ImageRequest {
    pub fn new(prompt: impl Into<String>, size: ImageSize) -> Self {
        Self {
            prompt: prompt.into(),
            size,
        }
    }
}

/// Wrap base64 image data returned by the model.
pub fn png_data_uri(base64_data: &str) -> String {
    format!("{PNG_DATA_URI_PREFIX}{base64_data}")
}

/// Decode a `data:<mime>;base64,<payload>` URI into raw bytes.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
    let payload = uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
        .map(|(_, data)| data)
        .ok_or_else(|| Error::validation("not a base64 data URI"))?;
    Ok(base64::engine::general_purpose::STANDARD.decode(payload.trim())?)
}
