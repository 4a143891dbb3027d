use super::{EncodedImage, ImageDetail, ImagePayload};
use crate::Result;
use base64::Engine as _;
use image::ImageReader;
use std::io::Cursor;

/// Encodes image payloads for transmission to the inference service.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageEncoder {
    detail: ImageDetail,
}

impl ImageEncoder {
    pub fn new(detail: ImageDetail) -> Self {
        Self { detail }
    }

    /// Consume a payload and produce its base64 transport form.
    ///
    /// Only the image header is decoded, to reject bytes that are not an image
    /// and to learn the dimensions. Oversized images are logged, not rejected.
    pub fn encode(&self, payload: ImagePayload) -> Result<EncodedImage> {
        let (width, height) = read_dimensions(payload.bytes())?;

        if self.detail.exceeds_guidance(width, height) {
            tracing::warn!(
                "Image is {}x{}, outside the size guidance for {} detail; the service may downscale it",
                width,
                height,
                self.detail.as_str()
            );
        }

        let base64 = base64::engine::general_purpose::STANDARD.encode(payload.bytes());
        tracing::debug!(
            "Encoded {} image ({}x{}, {} bytes -> {} chars)",
            payload.media_type(),
            width,
            height,
            payload.bytes().len(),
            base64.len()
        );

        Ok(EncodedImage {
            media_type: payload.media_type().to_string(),
            base64,
            detail: self.detail,
            width,
            height,
        })
    }
}

fn read_dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?;
    Ok(reader.into_dimensions()?)
}
