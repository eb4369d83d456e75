//! Procedural gradient backgrounds.

use super::color::Color;
use image::RgbaImage;

/// Vertical gradient from `top` (first row) to `bottom` (last row).
///
/// Row `y` uses `t = y / (height - 1)`; a single-row image is `top`.
pub fn linear_gradient(width: u32, height: u32, top: Color, bottom: Color) -> RgbaImage {
    let mut img = RgbaImage::new(width, height);
    let denom = height.saturating_sub(1).max(1) as f32;

    // One color per row, then fill the row
    for (y, row) in img.rows_mut().enumerate() {
        let pixel = top.lerp(bottom, y as f32 / denom).to_rgba();
        for px in row {
            *px = pixel;
        }
    }
    img
}

/// Radial gradient from `center` to `edge`.
///
/// `t` is the distance from the canvas centre divided by the distance to a
/// corner, so only the corners reach `edge` exactly.
pub fn radial_gradient(width: u32, height: u32, center: Color, edge: Color) -> RgbaImage {
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let max_r = (cx * cx + cy * cy).sqrt();

    RgbaImage::from_fn(width, height, |x, y| {
        if max_r <= f32::EPSILON {
            return center.to_rgba();
        }
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        let t = ((dx * dx + dy * dy).sqrt() / max_r).min(1.0);
        center.lerp(edge, t).to_rgba()
    })
}
