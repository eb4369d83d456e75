//! Text layout helpers: wrapping, shrink-to-fit, blocks, underlines,
//! annotations and tiled watermarks.

use super::fonts::{font, Font, FontFace};
use super::render::{draw_text, text_bounds, text_width, TextBounds};
use crate::compose::Color;
use crate::constants::LINE_SPACING_PX;
use crate::error::AdError;
use image::RgbaImage;
use tracing::warn;

/// Horizontal alignment of wrapped lines inside their box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Greedy word wrap.
///
/// Words are appended while the line still fits `max_width`; a word that
/// is wider than `max_width` on its own gets a line to itself.
pub fn wrap_text(text: &str, font: &Font, max_width: u32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if text_width(&candidate, font) <= max_width {
            current = candidate;
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Largest size in `min_size..=start_size` at which `text` fits `max_width`.
///
/// Steps down one pixel at a time. When even `min_size` does not fit, the
/// minimum is returned and the overflow is logged; the caller renders the
/// text overflowing.
pub fn shrink_to_fit(
    text: &str,
    face: FontFace,
    max_width: u32,
    start_size: u32,
    min_size: u32,
) -> Result<u32, AdError> {
    let min_size = min_size.max(1);
    let mut size = start_size.max(min_size);

    while size > min_size {
        if text_width(text, &font(face, size as f32)?) <= max_width {
            return Ok(size);
        }
        size -= 1;
    }

    let width = text_width(text, &font(face, min_size as f32)?);
    if width > max_width {
        warn!(
            text = %text,
            width,
            max_width,
            size = min_size,
            "Text overflows its zone at minimum font size"
        );
    }
    Ok(min_size)
}

/// Draw `text` at (`x`, `y`), wrapping to `max_width` when given.
///
/// Lines are aligned within `max_width` and separated by their ink height
/// plus a fixed gap. Returns the total height consumed.
#[allow(clippy::too_many_arguments)]
pub fn draw_text_block(
    canvas: &mut RgbaImage,
    text: &str,
    x: i32,
    y: i32,
    font: &Font,
    color: Color,
    max_width: Option<u32>,
    align: Align,
) -> u32 {
    let Some(max_width) = max_width else {
        return draw_text(canvas, text, x, y, font, color).height();
    };

    let mut total_height = 0u32;
    for line in wrap_text(text, font, max_width) {
        let line_width = text_width(&line, font);
        let line_x = match align {
            Align::Left => x,
            Align::Center => x + (max_width as i32 - line_width as i32) / 2,
            Align::Right => x + max_width as i32 - line_width as i32,
        };
        draw_text(canvas, &line, line_x, y + total_height as i32, font, color);
        total_height += text_bounds(&line, font).max_y.max(0) as u32 + LINE_SPACING_PX;
    }
    total_height
}

/// Draw `text` with a 1px rule one pixel below its ink bounds.
pub fn draw_underlined_text(
    canvas: &mut RgbaImage,
    text: &str,
    x: i32,
    y: i32,
    font: &Font,
    color: Color,
) -> TextBounds {
    let bounds = draw_text(canvas, text, x, y, font, color);
    if bounds.is_empty() {
        return bounds;
    }

    let rule_y = bounds.max_y + 1;
    if rule_y < 0 || rule_y >= canvas.height() as i32 {
        return bounds;
    }
    let pixel = color.to_rgba();
    let x_start = bounds.min_x.max(0);
    let x_end = bounds.max_x.min(canvas.width() as i32 - 1);
    for px in x_start..=x_end {
        canvas.put_pixel(px as u32, rule_y as u32, pixel);
    }
    bounds
}

/// Measure a handwritten-style annotation without drawing it.
pub fn measure_handwritten(text: &str, size: u32) -> Result<(u32, u32), AdError> {
    let bounds = text_bounds(text, &font(FontFace::DISPLAY_ITALIC, size as f32)?);
    Ok((bounds.width(), bounds.height()))
}

/// Draw an italic annotation at (`x`, `y`); returns its ink width and height.
pub fn draw_handwritten(
    canvas: &mut RgbaImage,
    text: &str,
    x: i32,
    y: i32,
    color: Color,
    size: u32,
) -> Result<(u32, u32), AdError> {
    let f = font(FontFace::DISPLAY_ITALIC, size as f32)?;
    let bounds = draw_text(canvas, text, x, y, &f, color);
    Ok((bounds.width(), bounds.height()))
}

/// Spacing of a tiled watermark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatermarkTiling {
    pub font_size: u32,
    pub spacing_x: u32,
    pub spacing_y: u32,
}

/// Origins of every watermark copy for a `width`×`height` canvas.
///
/// The grid extends one cell past every edge and odd rows are shifted
/// right by half a column so no seam shows at the borders.
pub fn watermark_positions(width: u32, height: u32, spacing_x: u32, spacing_y: u32) -> Vec<(i32, i32)> {
    let sx = spacing_x.max(1) as i32;
    let sy = spacing_y.max(1) as i32;
    let rows = height as i32 / sy;
    let cols = width as i32 / sx;

    let mut positions = Vec::new();
    for row in -1..=rows + 1 {
        let stagger = row.rem_euclid(2) * (sx / 2);
        for col in -1..=cols + 1 {
            positions.push((col * sx + stagger, row * sy));
        }
    }
    positions
}

/// Repeat `text` across the whole canvas in a staggered grid.
pub fn tile_watermark(
    canvas: &mut RgbaImage,
    text: &str,
    color: Color,
    tiling: WatermarkTiling,
) -> Result<(), AdError> {
    let f = font(FontFace::DISPLAY_BOLD, tiling.font_size as f32)?;
    for (x, y) in watermark_positions(canvas.width(), canvas.height(), tiling.spacing_x, tiling.spacing_y) {
        draw_text(canvas, text, x, y, &f, color);
    }
    Ok(())
}
