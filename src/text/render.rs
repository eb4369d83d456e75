//! Glyph rasterisation onto RGBA canvases.
//!
//! Text is positioned the way a designer places a text box: `(x, y)` is
//! the top-left corner and the first baseline sits one ascent below `y`.

use super::fonts::Font;
use crate::compose::geometry::blend_over;
use crate::compose::Color;
use ab_glyph::{point, Font as _, Glyph, ScaleFont};
use image::{Rgba, RgbaImage};

/// Ink bounding box of rendered text, in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl TextBounds {
    pub fn width(&self) -> u32 {
        (self.max_x - self.min_x).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.max_y - self.min_y).max(0) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            min_x: self.min_x + dx,
            min_y: self.min_y + dy,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
        }
    }
}

/// Lay out `text` on a single line with its origin at (0, 0).
fn layout_glyphs(text: &str, font: &Font) -> Vec<Glyph> {
    let scaled = font.arc().as_scaled(font.scale());
    let baseline = scaled.ascent();

    let mut glyphs = Vec::with_capacity(text.len());
    let mut cursor_x = 0.0f32;
    let mut prev: Option<ab_glyph::GlyphId> = None;

    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = prev {
            cursor_x += scaled.kern(prev, id);
        }
        glyphs.push(id.with_scale_and_position(font.scale(), point(cursor_x, baseline)));
        cursor_x += scaled.h_advance(id);
        prev = Some(id);
    }
    glyphs
}

/// Advance width of `text` in pixels, rounded up.
pub fn text_width(text: &str, font: &Font) -> u32 {
    let scaled = font.arc().as_scaled(font.scale());
    let mut width = 0.0f32;
    let mut prev: Option<ab_glyph::GlyphId> = None;

    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = prev {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        prev = Some(id);
    }
    width.max(0.0).ceil() as u32
}

/// Ink bounds of `text` drawn at (0, 0).
///
/// Whitespace-only or empty text has empty bounds at the origin.
pub fn text_bounds(text: &str, font: &Font) -> TextBounds {
    let mut bounds: Option<TextBounds> = None;

    for glyph in layout_glyphs(text, font) {
        let Some(outlined) = font.arc().outline_glyph(glyph) else {
            continue;
        };
        let rect = outlined.px_bounds();
        let glyph_bounds = TextBounds {
            min_x: rect.min.x.floor() as i32,
            min_y: rect.min.y.floor() as i32,
            max_x: rect.max.x.ceil() as i32,
            max_y: rect.max.y.ceil() as i32,
        };
        bounds = Some(match bounds {
            None => glyph_bounds,
            Some(b) => TextBounds {
                min_x: b.min_x.min(glyph_bounds.min_x),
                min_y: b.min_y.min(glyph_bounds.min_y),
                max_x: b.max_x.max(glyph_bounds.max_x),
                max_y: b.max_y.max(glyph_bounds.max_y),
            },
        });
    }
    bounds.unwrap_or_default()
}

/// Line height (ascent to descent) of `font`, rounded up.
pub fn line_height(font: &Font) -> u32 {
    font.arc().as_scaled(font.scale()).height().ceil() as u32
}

/// Draw `text` with its top-left corner at (`x`, `y`) and return the ink bounds.
///
/// Glyph coverage is alpha-blended so anti-aliased edges mix with whatever
/// is already on the canvas. Pixels off the canvas are dropped.
pub fn draw_text(
    canvas: &mut RgbaImage,
    text: &str,
    x: i32,
    y: i32,
    font: &Font,
    color: Color,
) -> TextBounds {
    let (width, height) = (canvas.width() as i32, canvas.height() as i32);

    for glyph in layout_glyphs(text, font) {
        let Some(outlined) = font.arc().outline_glyph(glyph) else {
            continue;
        };
        let rect = outlined.px_bounds();

        outlined.draw(|gx, gy, coverage| {
            let px = x + rect.min.x as i32 + gx as i32;
            let py = y + rect.min.y as i32 + gy as i32;
            if px < 0 || py < 0 || px >= width || py >= height || coverage <= 0.0 {
                return;
            }
            let alpha = (coverage.min(1.0) * 255.0).round() as u8;
            let src = Rgba([color.r, color.g, color.b, alpha]);
            let dst = *canvas.get_pixel(px as u32, py as u32);
            canvas.put_pixel(px as u32, py as u32, blend_over(dst, src, 1.0));
        });
    }

    text_bounds(text, font).offset(x, y)
}
