//! Raster compositing primitives
//!
//! Everything the template engines need below the text layer:
//! - Hex color parsing and formatting
//! - Decoding input images to RGBA
//! - Transparent/white border trimming
//! - Aspect-preserving Lanczos resize
//! - Alpha-aware pasting and filled shapes
//! - Linear and radial gradient backgrounds
//! - JPEG/PNG encoding of finished canvases
//!
//! All canvases are `RgbaImage`s. Backgrounds are created opaque, so the
//! alpha channel only matters for pasted content.

pub mod color;
pub mod decode;
pub mod encoder;
pub mod geometry;
pub mod gradient;

pub use color::{hex_to_rgb, rgb_to_hex, Color};
pub use decode::{decode_image, load_image};
pub use encoder::{encode, EncodedImage, EncoderFactory, ImageEncoder, OutputFormat};
pub use geometry::{
    fill_circle, fit_dimensions, fit_within, paste_with_alpha, resize_exact, solid_canvas,
    trim_and_fit, trim_transparent_border,
};
pub use gradient::{linear_gradient, radial_gradient};
