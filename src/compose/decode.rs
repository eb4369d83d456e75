//! Decoding input images into RGBA canvases.

use crate::error::AdError;
use image::RgbaImage;
use std::path::Path;

/// Decode encoded bytes (PNG, JPEG, WebP or GIF), converting to RGBA.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, AdError> {
    let format = image::guess_format(bytes)
        .map_err(|e| AdError::Decode(format!("unrecognised image format: {}", e)))?;
    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| AdError::Decode(e.to_string()))?;
    Ok(img.to_rgba8())
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> Result<RgbaImage, AdError> {
    let bytes = std::fs::read(path)
        .map_err(|e| AdError::Decode(format!("{}: {}", path.display(), e)))?;
    decode_image(&bytes).map_err(|e| AdError::Decode(format!("{}: {}", path.display(), e)))
}
