//! Image codec collaborator.
//!
//! The [`Codec`] trait is the narrow seam between the pipeline and the
//! pixel work: reading dimensions from fetched bytes, and the combined
//! extract → resize → JPEG-encode step. The production implementation is
//! [`ImageCodec`] — pure Rust on the `image` crate, statically linked, no
//! system dependencies. Tests swap in the recording mock from
//! [`tests`](self::tests).
//!
//! Input decoding accepts whatever decoders are compiled in (JPEG, PNG,
//! GIF, WebP, TIFF); output is always JPEG.

use crate::error::{DecodeError, EncodeError};
use crate::geometry::{CropRect, Dimensions};
use image::ImageReader;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use std::io::Cursor;

/// Decode/encode operations the pipeline needs.
///
/// Implementations must be cheap to share across requests; both methods are
/// stateless and take the full input bytes each call.
pub trait Codec: Send + Sync {
    /// Read the pixel dimensions of an encoded image.
    fn read_dimensions(&self, bytes: &[u8]) -> Result<Dimensions, DecodeError>;

    /// Extract `rect` from the image, resize to exactly `out_w`×`out_h`
    /// (cover fit, no letterboxing), and encode as JPEG at `quality`.
    fn extract_resize_encode(
        &self,
        bytes: &[u8],
        rect: CropRect,
        out_w: u32,
        out_h: u32,
        quality: u8,
    ) -> Result<Vec<u8>, EncodeError>;
}

/// Pure Rust codec on the `image` crate (Lanczos3 resampling).
#[derive(Debug, Clone, Default)]
pub struct ImageCodec;

impl ImageCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Codec for ImageCodec {
    fn read_dimensions(&self, bytes: &[u8]) -> Result<Dimensions, DecodeError> {
        let (width, height) = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| DecodeError::Malformed(e.to_string()))?
            .into_dimensions()
            .map_err(|_| DecodeError::UnreadableDimensions)?;
        Dimensions::new(width, height).ok_or(DecodeError::UnreadableDimensions)
    }

    fn extract_resize_encode(
        &self,
        bytes: &[u8],
        rect: CropRect,
        out_w: u32,
        out_h: u32,
        quality: u8,
    ) -> Result<Vec<u8>, EncodeError> {
        let img = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| EncodeError(format!("unreadable input: {e}")))?
            .decode()
            .map_err(|e| EncodeError(format!("decode failed: {e}")))?;

        let cropped = img.crop_imm(rect.x, rect.y, rect.width, rect.height);
        let resized = cropped.resize_to_fill(out_w, out_h, FilterType::Lanczos3);

        // JPEG has no alpha; flatten before encoding.
        let rgb = image::DynamicImage::ImageRgb8(resized.to_rgb8());
        let mut out = Vec::new();
        let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut out), quality);
        rgb.write_with_encoder(encoder)
            .map_err(|e| EncodeError(format!("JPEG encode failed: {e}")))?;
        Ok(out)
    }
}
