//! Text rendering and layout
//!
//! - [`fonts`]: the process-wide font library (embedded DejaVu faces,
//!   optional on-disk overrides)
//! - [`render`]: measuring and rasterising single lines with `ab_glyph`
//! - [`layout`]: word wrap, shrink-to-fit, underlined CTAs, italic
//!   annotations and tiled watermarks

pub mod fonts;
pub mod layout;
pub mod render;

pub use fonts::{font, Font, FontFace, FontFamily, FontLibrary, FontWeight};
pub use layout::{
    draw_handwritten, draw_text_block, draw_underlined_text, measure_handwritten, shrink_to_fit,
    tile_watermark, watermark_positions, wrap_text, Align, WatermarkTiling,
};
pub use render::{draw_text, line_height, text_bounds, text_width, TextBounds};
