//! Per-channel frame layouts.
//!
//! Coordinates are absolute pixels on the 1080×1920 story canvas. Text
//! positions are the top-left of the text box.

use super::channel::FrameContext;
use super::{annotation, ProductEntry};
use crate::compose::{
    fill_circle, linear_gradient, paste_with_alpha, solid_canvas, trim_and_fit, Color,
};
use crate::constants::{DEFAULT_THEME_NAME, STORY_HEIGHT, STORY_WIDTH};
use crate::error::AdError;
use crate::text::{
    draw_handwritten, draw_text, draw_text_block, font, measure_handwritten, tile_watermark,
    Align, FontFace, WatermarkTiling,
};
use image::RgbaImage;

const W: i32 = STORY_WIDTH as i32;
const H: i32 = STORY_HEIGHT as i32;

/// Horizontal margin of wrapped benefit copy
const COPY_MARGIN: i32 = 80;

/// A product slot on a collage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

const fn slot(x: i32, y: i32, w: u32, h: u32) -> Slot {
    Slot { x, y, w, h }
}

pub const HOME_SLOTS: [Slot; 6] = [
    slot(60, 80, 350, 420),
    slot(430, 50, 320, 380),
    slot(760, 100, 280, 340),
    slot(60, 960, 330, 400),
    slot(420, 920, 320, 400),
    slot(740, 980, 300, 380),
];

pub const BEAUTY_SLOTS: [Slot; 4] = [
    slot(80, 60, 400, 480),
    slot(520, 30, 380, 460),
    slot(60, 930, 420, 500),
    slot(500, 960, 400, 480),
];

/// Painted first, so the title sits on top
pub const FASHION_SLOTS: [Slot; 5] = [
    slot(500, 40, 500, 600),
    slot(40, 50, 400, 480),
    slot(60, 1050, 460, 560),
    slot(540, 1000, 480, 580),
    slot(320, 540, 380, 460),
];

pub const PASTEL_SLOTS: [Slot; 6] = [
    slot(60, 60, 380, 460),
    slot(480, 40, 360, 440),
    slot(760, 80, 280, 360),
    slot(60, 940, 360, 440),
    slot(460, 920, 340, 420),
    slot(740, 960, 300, 380),
];

const HOME_WATERMARK: WatermarkTiling = WatermarkTiling {
    font_size: 42,
    spacing_x: 360,
    spacing_y: 90,
};

fn background(ctx: &FrameContext<'_>, individual: bool) -> RgbaImage {
    let palette = ctx.palette;
    match palette.gradient(ctx.gradient_idx) {
        Some((top, bottom)) => linear_gradient(STORY_WIDTH, STORY_HEIGHT, top, bottom),
        None if individual => solid_canvas(STORY_WIDTH, STORY_HEIGHT, palette.individual_bg()),
        None => solid_canvas(STORY_WIDTH, STORY_HEIGHT, palette.bg),
    }
}

fn watermark(canvas: &mut RgbaImage, ctx: &FrameContext<'_>) -> Result<(), AdError> {
    match ctx.palette.watermark {
        Some(color) => tile_watermark(canvas, "JUST DROPPED", color, HOME_WATERMARK),
        None => Ok(()),
    }
}

/// Fit the product inside the slot less `inset` and centre it there.
fn place_in_slot(canvas: &mut RgbaImage, product: &ProductEntry, slot: Slot, inset: u32) -> Result<(), AdError> {
    let img = trim_and_fit(
        &product.image,
        slot.w.saturating_sub(inset).max(1),
        slot.h.saturating_sub(inset).max(1),
    )?;
    let x = slot.x + (slot.w as i32 - img.width() as i32) / 2;
    let y = slot.y + (slot.h as i32 - img.height() as i32) / 2;
    paste_with_alpha(canvas, &img, x, y);
    Ok(())
}

/// Month label and title, plus the theme line when a theme was chosen.
#[allow(clippy::too_many_arguments)]
fn title_block(
    canvas: &mut RgbaImage,
    ctx: &FrameContext<'_>,
    month_y: i32,
    month_size: u32,
    title_y: i32,
    title_size: u32,
    theme_y: i32,
) -> Result<(), AdError> {
    let month_font = font(FontFace::DISPLAY_ITALIC, month_size as f32)?;
    draw_text(canvas, ctx.month_label(), 80, month_y, &month_font, ctx.palette.accent);

    let title_font = font(FontFace::DISPLAY_BOLD, title_size as f32)?;
    draw_text(canvas, ctx.lang.title(), 80, title_y, &title_font, ctx.palette.text);

    theme_line(canvas, ctx, 80, theme_y)
}

fn theme_line(canvas: &mut RgbaImage, ctx: &FrameContext<'_>, x: i32, y: i32) -> Result<(), AdError> {
    let theme = ctx.theme_name.trim();
    if theme.is_empty() || theme == DEFAULT_THEME_NAME {
        return Ok(());
    }
    draw_handwritten(canvas, theme, x, y, ctx.palette.accent, 26)?;
    Ok(())
}

/// Annotation centred horizontally at `y`
fn centered_annotation(canvas: &mut RgbaImage, text: &str, y: i32, color: Color, size: u32) -> Result<(), AdError> {
    let (width, _) = measure_handwritten(text, size)?;
    draw_handwritten(canvas, text, (W - width as i32) / 2, y, color, size)?;
    Ok(())
}

/// Benefit copy wrapped and centred below the product.
fn benefit_copy(canvas: &mut RgbaImage, product: &ProductEntry, y: i32, size: u32, color: Color) -> Result<(), AdError> {
    if product.copy.trim().is_empty() {
        return Ok(());
    }
    let copy_font = font(FontFace::TEXT_REGULAR, size as f32)?;
    draw_text_block(
        canvas,
        &product.copy,
        COPY_MARGIN,
        y,
        &copy_font,
        color,
        Some((W - 2 * COPY_MARGIN) as u32),
        Align::Center,
    );
    Ok(())
}

fn individual_annotation(product: &ProductEntry, chars: usize) -> Option<String> {
    if product.copy.trim().is_empty() {
        None
    } else {
        Some(annotation(&product.copy, chars))
    }
}

// @AmazonHome: cream with a tiled watermark, annotated scatter

pub fn home_collage(products: &[ProductEntry], ctx: &FrameContext<'_>) -> Result<RgbaImage, AdError> {
    let mut canvas = background(ctx, false);
    watermark(&mut canvas, ctx)?;
    title_block(&mut canvas, ctx, 730, 30, 770, 80, 870)?;

    for (slot, product) in HOME_SLOTS.iter().zip(super::pad_products(products, HOME_SLOTS.len())) {
        place_in_slot(&mut canvas, product, *slot, 30)?;
        // Cut back to the last word boundary within 25 chars, not a hard slice
        if let Some(note) = individual_annotation(product, 25) {
            draw_handwritten(&mut canvas, &note, slot.x + 10, slot.y - 5, ctx.palette.accent, 20)?;
        }
    }
    Ok(canvas)
}

pub fn home_individual(product: &ProductEntry, ctx: &FrameContext<'_>) -> Result<RgbaImage, AdError> {
    let mut canvas = background(ctx, true);
    watermark(&mut canvas, ctx)?;

    if let Some(note) = individual_annotation(product, super::Channel::AmazonHome.spec().annotation_chars) {
        centered_annotation(&mut canvas, &note, 340, ctx.palette.accent, 26)?;
    }

    let img = trim_and_fit(&product.image, 650, 800)?;
    let y = 420;
    paste_with_alpha(&mut canvas, &img, (W - img.width() as i32) / 2, y);

    benefit_copy(&mut canvas, product, y + img.height() as i32 + 60, 30, ctx.palette.text)?;
    Ok(canvas)
}

// @AmazonBeauty: mint with circular backdrops

pub fn beauty_collage(products: &[ProductEntry], ctx: &FrameContext<'_>) -> Result<RgbaImage, AdError> {
    let mut canvas = background(ctx, false);
    title_block(&mut canvas, ctx, 680, 28, 720, 78, 860)?;

    let sub_font = font(FontFace::TEXT_REGULAR, 28.0)?;
    draw_text(&mut canvas, "new beauty finds to add to cart", 80, 815, &sub_font, ctx.palette.accent);

    let circle = ctx.palette.circle.unwrap_or(ctx.palette.bg);
    for (slot, product) in BEAUTY_SLOTS.iter().zip(super::pad_products(products, BEAUTY_SLOTS.len())) {
        let radius = (slot.w.min(slot.h) / 2) as i32 - 10;
        fill_circle(
            &mut canvas,
            slot.x + slot.w as i32 / 2,
            slot.y + slot.h as i32 / 2,
            radius,
            circle,
        );
        place_in_slot(&mut canvas, product, *slot, 80)?;
    }
    Ok(canvas)
}

pub fn beauty_individual(product: &ProductEntry, ctx: &FrameContext<'_>) -> Result<RgbaImage, AdError> {
    let mut canvas = background(ctx, true);

    let (cx, cy, radius) = (W / 2, 820, 380);
    fill_circle(&mut canvas, cx, cy, radius, ctx.palette.circle.unwrap_or(ctx.palette.bg));

    let img = trim_and_fit(&product.image, 580, 700)?;
    let y = cy - img.height() as i32 / 2 - 40;
    paste_with_alpha(&mut canvas, &img, (W - img.width() as i32) / 2, y);

    if let Some(note) = individual_annotation(product, super::Channel::AmazonBeauty.spec().annotation_chars) {
        centered_annotation(&mut canvas, &note, y - 50, ctx.palette.accent, 24)?;
    }

    benefit_copy(&mut canvas, product, cy + radius + 50, 28, ctx.palette.text)?;
    Ok(canvas)
}

// @AmazonFashion: editorial scatter under a stacked title

pub fn fashion_collage(products: &[ProductEntry], ctx: &FrameContext<'_>) -> Result<RgbaImage, AdError> {
    let mut canvas = background(ctx, false);

    for (slot, product) in FASHION_SLOTS.iter().zip(super::pad_products(products, FASHION_SLOTS.len())) {
        place_in_slot(&mut canvas, product, *slot, 30)?;
    }

    let title_font = font(FontFace::DISPLAY_BOLD, 90.0)?;
    draw_text(&mut canvas, "JUST", 55, 680, &title_font, ctx.palette.text);
    draw_text(&mut canvas, "DROPPED", 55, 780, &title_font, ctx.palette.text);

    let sub_font = font(FontFace::TEXT_REGULAR, 22.0)?;
    draw_text(&mut canvas, "DISCOVER MORE MUST-HAVES", 60, 890, &sub_font, ctx.palette.accent);

    theme_line(&mut canvas, ctx, 60, 925)?;
    Ok(canvas)
}

/// Annotation chunks scattered around a fashion product.
///
/// Copy longer than four words yields words 1-3 and words 4-6; shorter
/// copy yields a single truncated annotation.
pub fn fashion_chunks(copy: &str, max_chars: usize) -> Vec<String> {
    let words: Vec<&str> = copy.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }
    if words.len() > 4 {
        vec![words[..3].join(" "), words[3..words.len().min(6)].join(" ")]
    } else {
        vec![annotation(copy, max_chars)]
    }
}

pub fn fashion_individual(product: &ProductEntry, ctx: &FrameContext<'_>) -> Result<RgbaImage, AdError> {
    let mut canvas = background(ctx, true);

    let img = trim_and_fit(&product.image, 800, 1100)?;
    let (px, py) = ((W - img.width() as i32) / 2, 250);
    paste_with_alpha(&mut canvas, &img, px, py);

    let scatter = [
        (px + img.width() as i32 - 40, py - 30),
        (px - 20, py + img.height() as i32 / 3),
    ];
    let chunks = fashion_chunks(&product.copy, super::Channel::AmazonFashion.spec().annotation_chars);
    for (chunk, (sx, sy)) in chunks.iter().zip(scatter) {
        let sx = sx.clamp(20, W - 250);
        let sy = sy.clamp(20, H - 60);
        draw_handwritten(&mut canvas, chunk, sx, sy, ctx.palette.accent, 22)?;
    }

    benefit_copy(&mut canvas, product, py + img.height() as i32 + 50, 28, ctx.palette.text)?;
    Ok(canvas)
}

// @Amazon and @Amazon.ca: cycling pastel gradients

pub fn pastel_collage(products: &[ProductEntry], ctx: &FrameContext<'_>) -> Result<RgbaImage, AdError> {
    let mut canvas = background(ctx, false);
    title_block(&mut canvas, ctx, 700, 28, 740, 78, 840)?;

    for (slot, product) in PASTEL_SLOTS.iter().zip(super::pad_products(products, PASTEL_SLOTS.len())) {
        place_in_slot(&mut canvas, product, *slot, 30)?;
    }
    Ok(canvas)
}

pub fn pastel_individual(product: &ProductEntry, ctx: &FrameContext<'_>) -> Result<RgbaImage, AdError> {
    let mut canvas = background(ctx, true);

    if let Some(note) = individual_annotation(product, super::Channel::Amazon.spec().annotation_chars) {
        centered_annotation(&mut canvas, &note, 340, ctx.palette.accent, 26)?;
    }

    let img = trim_and_fit(&product.image, 680, 820)?;
    let y = 420;
    paste_with_alpha(&mut canvas, &img, (W - img.width() as i32) / 2, y);

    benefit_copy(&mut canvas, product, y + img.height() as i32 + 60, 28, ctx.palette.text)?;
    Ok(canvas)
}
