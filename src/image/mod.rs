//! Image capture and transport encoding
//!
//! Turns uploaded image bytes into the inline data-URI form the inference
//! service accepts. No resizing happens here; the service enforces its own
//! limits.

pub mod encoder;
pub mod mime;

pub use encoder::ImageEncoder;

use crate::{Error, Result};
use serde::Serialize;
use std::path::Path;
use std::str::FromStr;

/// Raw image bytes plus their declared media type.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    bytes: Vec<u8>,
    media_type: String,
}

impl ImagePayload {
    pub fn new(bytes: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self {
            bytes,
            media_type: media_type.into(),
        }
    }

    /// Declare the media type from the payload's magic bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let media_type = mime::detect_image_mime(&bytes);
        Self::new(bytes, media_type)
    }

    /// Read an image file. A file that cannot be read is an encoding failure.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| Error::Encoding(image::ImageError::IoError(e)))?;
        tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(Self::from_bytes(bytes))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }
}

/// Fidelity requested from the inference service for the attached image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageDetail {
    Low,
    High,
    #[default]
    Auto,
}

impl ImageDetail {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageDetail::Low => "low",
            ImageDetail::High => "high",
            ImageDetail::Auto => "auto",
        }
    }

    /// Whether `width`x`height` falls outside the service's documented size
    /// guidance for this fidelity.
    ///
    /// Low fidelity expects at most 512x512. High (and auto, which may pick
    /// high) expects the short side under 768px and the long side under 2000px.
    pub fn exceeds_guidance(&self, width: u32, height: u32) -> bool {
        let (short, long) = if width <= height {
            (width, height)
        } else {
            (height, width)
        };
        match self {
            ImageDetail::Low => long > 512,
            ImageDetail::High | ImageDetail::Auto => short >= 768 || long >= 2000,
        }
    }
}

impl FromStr for ImageDetail {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(ImageDetail::Low),
            "high" => Ok(ImageDetail::High),
            "auto" => Ok(ImageDetail::Auto),
            other => Err(Error::Config(format!(
                "Invalid image detail '{}'. Expected one of: low, high, auto",
                other
            ))),
        }
    }
}

/// Base64 form of an [`ImagePayload`], ready to embed in a request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub media_type: String,
    pub base64: String,
    pub detail: ImageDetail,
    pub width: u32,
    pub height: u32,
}

impl EncodedImage {
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.base64)
    }
}
