//! Canvas encoders
//!
//! Banners ship as lossy JPEG; story frames stay lossless PNG so they can
//! be previewed and re-exported without generation loss.

use crate::error::AdError;
use image::RgbaImage;

/// Output formats produced by the template engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Jpeg => write!(f, "jpeg"),
            OutputFormat::Png => write!(f, "png"),
        }
    }
}

/// Result of encoding a canvas
#[derive(Debug)]
pub struct EncodedImage {
    /// The encoded image data
    pub data: Vec<u8>,
    /// The output format
    pub format: OutputFormat,
}

impl EncodedImage {
    pub fn new(data: Vec<u8>, format: OutputFormat) -> Self {
        Self { data, format }
    }
}

/// Trait for canvas encoders
///
/// Object-safe so the engines can pick an encoder at runtime through
/// [`EncoderFactory`].
pub trait ImageEncoder: Send + Sync {
    /// The output format this encoder produces
    fn format(&self) -> OutputFormat;

    /// Encode an RGBA canvas. `quality` (1-100) is ignored by lossless encoders.
    fn encode(&self, img: &RgbaImage, quality: u8) -> Result<EncodedImage, AdError>;
}

/// JPEG encoder using the image crate
pub struct JpegEncoder;

impl ImageEncoder for JpegEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Jpeg
    }

    fn encode(&self, img: &RgbaImage, quality: u8) -> Result<EncodedImage, AdError> {
        use image::codecs::jpeg::JpegEncoder as ImageJpegEncoder;
        use image::ImageEncoder as _;
        use std::io::Cursor;

        // JPEG has no alpha channel
        let rgb_data = rgba_to_rgb(img.as_raw());

        let mut output = Cursor::new(Vec::new());
        let encoder = ImageJpegEncoder::new_with_quality(&mut output, quality.clamp(1, 100));

        encoder
            .write_image(&rgb_data, img.width(), img.height(), image::ColorType::Rgb8)
            .map_err(|e| AdError::encode_failed("jpeg", e.to_string()))?;

        Ok(EncodedImage::new(output.into_inner(), OutputFormat::Jpeg))
    }
}

/// PNG encoder using the image crate
pub struct PngEncoder;

impl ImageEncoder for PngEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Png
    }

    fn encode(&self, img: &RgbaImage, _quality: u8) -> Result<EncodedImage, AdError> {
        use image::codecs::png::PngEncoder as ImagePngEncoder;
        use image::ImageEncoder as _;
        use std::io::Cursor;

        let mut output = Cursor::new(Vec::new());
        let encoder = ImagePngEncoder::new(&mut output);

        encoder
            .write_image(img.as_raw(), img.width(), img.height(), image::ColorType::Rgba8)
            .map_err(|e| AdError::encode_failed("png", e.to_string()))?;

        Ok(EncodedImage::new(output.into_inner(), OutputFormat::Png))
    }
}

/// Factory for creating encoders based on output format
pub struct EncoderFactory;

impl EncoderFactory {
    pub fn create(format: OutputFormat) -> Box<dyn ImageEncoder> {
        match format {
            OutputFormat::Jpeg => Box::new(JpegEncoder),
            OutputFormat::Png => Box::new(PngEncoder),
        }
    }
}

/// Encode `img` to bytes in the requested format.
pub fn encode(img: &RgbaImage, format: OutputFormat, quality: u8) -> Result<Vec<u8>, AdError> {
    if img.width() == 0 || img.height() == 0 {
        return Err(AdError::encode_failed(
            format.to_string(),
            "cannot encode an empty canvas",
        ));
    }
    let encoded = EncoderFactory::create(format).encode(img, quality)?;
    Ok(encoded.data)
}

/// Convert RGBA to RGB by discarding the alpha channel
fn rgba_to_rgb(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for chunk in rgba.chunks_exact(4) {
        rgb.extend_from_slice(&chunk[..3]);
    }
    rgb
}
