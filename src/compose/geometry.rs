//! Image geometry: trimming, resizing and alpha compositing.
//!
//! Resizing goes through `fast_image_resize` with a Lanczos3 convolution.
//! Alpha is premultiplied around the resize so transparent edges do not
//! bleed dark fringes into logos and cut-out product shots.

use super::color::Color;
use crate::constants::{TRIM_ALPHA_THRESHOLD, TRIM_WHITE_THRESHOLD};
use crate::error::AdError;
use fast_image_resize::{FilterType, Image, MulDiv, PixelType, ResizeAlg, Resizer};
use image::{imageops, Rgba, RgbaImage};
use std::num::NonZeroU32;

/// Create an opaque canvas filled with `color`.
pub fn solid_canvas(width: u32, height: u32, color: Color) -> RgbaImage {
    RgbaImage::from_pixel(width, height, color.to_rgba())
}

/// Crop away transparent and near-white borders.
///
/// A pixel counts as content when its alpha is above a low threshold and it
/// is not near-white in all three channels. The result is cropped to the
/// bounding box of content pixels. Images without any content pixel are
/// returned unchanged.
pub fn trim_transparent_border(img: &RgbaImage) -> RgbaImage {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;

    for (x, y, pixel) in img.enumerate_pixels() {
        if !is_content(pixel) {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((min_x, min_y, max_x, max_y)) => {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            }
        });
    }

    match bounds {
        Some((min_x, min_y, max_x, max_y)) => {
            imageops::crop_imm(img, min_x, min_y, max_x - min_x + 1, max_y - min_y + 1).to_image()
        }
        None => img.clone(),
    }
}

fn is_content(pixel: &Rgba<u8>) -> bool {
    let [r, g, b, a] = pixel.0;
    let near_white = r > TRIM_WHITE_THRESHOLD && g > TRIM_WHITE_THRESHOLD && b > TRIM_WHITE_THRESHOLD;
    a > TRIM_ALPHA_THRESHOLD && !near_white
}

/// Target dimensions for fitting `width`×`height` inside `max_w`×`max_h`.
///
/// Uses a single uniform scale factor, floors the result and never returns
/// a zero dimension.
pub fn fit_dimensions(width: u32, height: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (1, 1);
    }
    let ratio = (max_w as f64 / width as f64).min(max_h as f64 / height as f64);
    let new_w = ((width as f64 * ratio).floor() as u32).clamp(1, max_w.max(1));
    let new_h = ((height as f64 * ratio).floor() as u32).clamp(1, max_h.max(1));
    (new_w, new_h)
}

/// Scale `img` uniformly so it fits inside `max_w`×`max_h`.
///
/// Upscales as well as downscales: a small logo is enlarged to fill its zone.
pub fn fit_within(img: &RgbaImage, max_w: u32, max_h: u32) -> Result<RgbaImage, AdError> {
    let (new_w, new_h) = fit_dimensions(img.width(), img.height(), max_w, max_h);
    if (new_w, new_h) == img.dimensions() {
        return Ok(img.clone());
    }
    resize_exact(img, new_w, new_h)
}

/// Trim borders, then fit inside `max_w`×`max_h`.
///
/// This is how every logo and product shot is prepared before pasting.
pub fn trim_and_fit(img: &RgbaImage, max_w: u32, max_h: u32) -> Result<RgbaImage, AdError> {
    fit_within(&trim_transparent_border(img), max_w, max_h)
}

/// Resize to exact dimensions with Lanczos3.
pub fn resize_exact(img: &RgbaImage, target_w: u32, target_h: u32) -> Result<RgbaImage, AdError> {
    let src_width =
        NonZeroU32::new(img.width()).ok_or_else(|| AdError::resize_failed("Source width is 0"))?;
    let src_height =
        NonZeroU32::new(img.height()).ok_or_else(|| AdError::resize_failed("Source height is 0"))?;
    let dst_width =
        NonZeroU32::new(target_w).ok_or_else(|| AdError::resize_failed("Target width is 0"))?;
    let dst_height =
        NonZeroU32::new(target_h).ok_or_else(|| AdError::resize_failed("Target height is 0"))?;

    let mut src_image =
        Image::from_vec_u8(src_width, src_height, img.as_raw().clone(), PixelType::U8x4)
            .map_err(|e| AdError::resize_failed(format!("Failed to create source image: {:?}", e)))?;

    let alpha_mul_div = MulDiv::default();
    alpha_mul_div
        .multiply_alpha_inplace(&mut src_image.view_mut())
        .map_err(|e| AdError::resize_failed(format!("Failed to premultiply alpha: {:?}", e)))?;

    let mut dst_image = Image::new(dst_width, dst_height, PixelType::U8x4);
    let mut resizer = Resizer::new(ResizeAlg::Convolution(FilterType::Lanczos3));
    resizer
        .resize(&src_image.view(), &mut dst_image.view_mut())
        .map_err(|e| AdError::resize_failed(format!("Resize operation failed: {:?}", e)))?;

    alpha_mul_div
        .divide_alpha_inplace(&mut dst_image.view_mut())
        .map_err(|e| AdError::resize_failed(format!("Failed to restore alpha: {:?}", e)))?;

    RgbaImage::from_raw(target_w, target_h, dst_image.into_vec())
        .ok_or_else(|| AdError::resize_failed("Failed to create output image buffer"))
}

/// Composite `img` onto `canvas` with its top-left corner at (`x`, `y`).
///
/// The pasted image's alpha channel is the blend mask: opaque pixels
/// overwrite, transparent pixels leave the canvas untouched and everything
/// in between uses the Porter-Duff "over" operator. Parts falling outside
/// the canvas are clipped.
pub fn paste_with_alpha(canvas: &mut RgbaImage, img: &RgbaImage, x: i32, y: i32) {
    let canvas_w = canvas.width() as i32;
    let canvas_h = canvas.height() as i32;

    let x_start = x.max(0);
    let y_start = y.max(0);
    let x_end = (x + img.width() as i32).min(canvas_w);
    let y_end = (y + img.height() as i32).min(canvas_h);

    for ty in y_start..y_end {
        for tx in x_start..x_end {
            let src = *img.get_pixel((tx - x) as u32, (ty - y) as u32);
            match src[3] {
                0 => {}
                255 => canvas.put_pixel(tx as u32, ty as u32, src),
                _ => {
                    let dst = *canvas.get_pixel(tx as u32, ty as u32);
                    canvas.put_pixel(tx as u32, ty as u32, blend_over(dst, src, 1.0));
                }
            }
        }
    }
}

/// Porter-Duff "over": `foreground` on top of `background`, with an extra
/// opacity multiplier applied to the foreground alpha.
pub(crate) fn blend_over(background: Rgba<u8>, foreground: Rgba<u8>, opacity: f32) -> Rgba<u8> {
    let fg_alpha = (foreground[3] as f32 / 255.0) * opacity.clamp(0.0, 1.0);
    let bg_alpha = background[3] as f32 / 255.0;

    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);
    if out_alpha < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend_channel = |fg: u8, bg: u8| -> u8 {
        let fg_f = fg as f32 / 255.0;
        let bg_f = bg as f32 / 255.0;
        let result = (fg_f * fg_alpha + bg_f * bg_alpha * (1.0 - fg_alpha)) / out_alpha;
        (result * 255.0).round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend_channel(foreground[0], background[0]),
        blend_channel(foreground[1], background[1]),
        blend_channel(foreground[2], background[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}

/// Fill the disc of radius `radius` centred on (`cx`, `cy`).
pub fn fill_circle(canvas: &mut RgbaImage, cx: i32, cy: i32, radius: i32, color: Color) {
    if radius < 0 {
        return;
    }
    let pixel = color.to_rgba();
    let r_sq = (radius as i64) * (radius as i64);
    let y_start = (cy - radius).max(0);
    let y_end = (cy + radius).min(canvas.height() as i32 - 1);
    let x_start = (cx - radius).max(0);
    let x_end = (cx + radius).min(canvas.width() as i32 - 1);

    for y in y_start..=y_end {
        let dy = (y - cy) as i64;
        for x in x_start..=x_end {
            let dx = (x - cx) as i64;
            if dx * dx + dy * dy <= r_sq {
                canvas.put_pixel(x as u32, y as u32, pixel);
            }
        }
    }
}
