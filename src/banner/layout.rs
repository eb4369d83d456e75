//! Banner layouts.
//!
//! Both layouts split the banner into horizontal zones measured as
//! fractions of the width. Images are trimmed, fitted to their zone and
//! centred vertically; the CTA is underlined and centred in its zone.

use super::{BannerLayout, BannerSize, BrandConfig, Language};
use crate::compose::{paste_with_alpha, solid_canvas, trim_and_fit, Color};
use crate::error::AdError;
use crate::text::{
    draw_text, draw_underlined_text, font, shrink_to_fit, text_bounds, FontFace,
};
use image::RgbaImage;

const TEXT_COLOR: Color = Color::black();
const CTA_COLOR: Color = Color::black();

/// Smallest headline size before the text is allowed to overflow
pub const MIN_HEADLINE_SIZE: u32 = 8;

/// `floor(value * fraction)` for layout fractions
fn frac(value: u32, fraction: f64) -> u32 {
    (value as f64 * fraction) as u32
}

/// Horizontal pixel range `[left, right)` reserved for one content type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zone {
    pub left: u32,
    pub right: u32,
}

impl Zone {
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }
}

/// Zone boundaries of the headline layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlineZones {
    pub pad: u32,
    pub logo: Zone,
    pub headline: Zone,
    pub product: Zone,
    pub cta: Zone,
}

impl HeadlineZones {
    pub fn for_size(width: u32, height: u32) -> Self {
        let pad = edge_padding(height);
        Self {
            pad,
            logo: Zone { left: pad, right: frac(width, 0.16) },
            headline: Zone { left: frac(width, 0.17), right: frac(width, 0.62) },
            product: Zone { left: frac(width, 0.62), right: frac(width, 0.77) },
            cta: Zone { left: frac(width, 0.78), right: width.saturating_sub(pad) },
        }
    }
}

/// Zone boundaries of the compact layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactZones {
    pub pad: u32,
    pub logo: Zone,
    pub product: Zone,
    pub cta: Zone,
}

impl CompactZones {
    pub fn for_size(width: u32, height: u32) -> Self {
        let pad = edge_padding(height);
        Self {
            pad,
            logo: Zone { left: pad, right: frac(width, 0.28) },
            product: Zone { left: frac(width, 0.29), right: frac(width, 0.52) },
            cta: Zone { left: frac(width, 0.54), right: width.saturating_sub(pad) },
        }
    }
}

fn edge_padding(height: u32) -> u32 {
    frac(height, 0.14).max(8)
}

/// Headline size for `text` on a `width`×`height` banner.
///
/// Starts at 40% of the height (never below 16px) and shrinks one pixel at
/// a time until the text fits the headline zone, stopping at 8px.
pub fn headline_font_size(width: u32, height: u32, text: &str) -> Result<u32, AdError> {
    let zones = HeadlineZones::for_size(width, height);
    let start = frac(height, 0.40).max(16);
    shrink_to_fit(text, FontFace::DISPLAY_BOLD, zones.headline.width(), start, MIN_HEADLINE_SIZE)
}

/// Render one full-size banner.
pub fn render_banner(size: BannerSize, cfg: &BrandConfig, lang: Language) -> Result<RgbaImage, AdError> {
    match size.layout {
        BannerLayout::Headline => render_headline(size.width, size.height, cfg, lang),
        BannerLayout::Compact => render_compact(size.width, size.height, cfg, lang),
    }
}

/// `[ Logo ] [ "New on Amazon!" / headline ] [ Product ] [ CTA ]`
fn render_headline(w: u32, h: u32, cfg: &BrandConfig, lang: Language) -> Result<RgbaImage, AdError> {
    let zones = HeadlineZones::for_size(w, h);
    let mut canvas = solid_canvas(w, h, cfg.bg_color);

    paste_logo(&mut canvas, cfg, zones.logo, zones.pad)?;

    // Two-line block, centred vertically as a unit
    let intro_font = font(FontFace::DISPLAY_BOLD, frac(h, 0.19).max(10) as f32)?;
    let headline = cfg.headline(lang);
    let headline_font = font(FontFace::DISPLAY_BOLD, headline_font_size(w, h, headline)? as f32)?;

    let intro = lang.new_on_amazon();
    let intro_bounds = text_bounds(intro, &intro_font);
    let headline_bounds = text_bounds(headline, &headline_font);
    let gap = frac(h, 0.02).max(1);
    let block = intro_bounds.height() + gap + headline_bounds.height();
    let top = (h as i32 - block as i32) / 2;
    let x = zones.headline.left as i32;

    draw_text(&mut canvas, intro, x, top - intro_bounds.min_y, &intro_font, TEXT_COLOR);
    let headline_top = top + (intro_bounds.height() + gap) as i32;
    draw_text(
        &mut canvas,
        headline,
        x,
        headline_top - headline_bounds.min_y,
        &headline_font,
        TEXT_COLOR,
    );

    paste_product(&mut canvas, cfg, zones.product)?;
    draw_cta(&mut canvas, cfg, lang, zones.cta)?;
    Ok(canvas)
}

/// `[ Logo ] [ Product ] [ CTA ]`
fn render_compact(w: u32, h: u32, cfg: &BrandConfig, lang: Language) -> Result<RgbaImage, AdError> {
    let zones = CompactZones::for_size(w, h);
    let mut canvas = solid_canvas(w, h, cfg.bg_color);

    paste_logo(&mut canvas, cfg, zones.logo, zones.pad)?;
    paste_product(&mut canvas, cfg, zones.product)?;
    draw_cta(&mut canvas, cfg, lang, zones.cta)?;
    Ok(canvas)
}

fn paste_logo(canvas: &mut RgbaImage, cfg: &BrandConfig, zone: Zone, pad: u32) -> Result<(), AdError> {
    let h = canvas.height();
    let logo = trim_and_fit(&cfg.logo_image, zone.width().max(1), h.saturating_sub(pad * 2).max(1))?;
    let y = (h as i32 - logo.height() as i32) / 2;
    paste_with_alpha(canvas, &logo, zone.left as i32, y);
    Ok(())
}

fn paste_product(canvas: &mut RgbaImage, cfg: &BrandConfig, zone: Zone) -> Result<(), AdError> {
    let h = canvas.height();
    let product = trim_and_fit(&cfg.product_image, zone.width().max(1), h.saturating_sub(4).max(1))?;
    let x = zone.left as i32 + (zone.width() as i32 - product.width() as i32) / 2;
    let y = (h as i32 - product.height() as i32) / 2;
    paste_with_alpha(canvas, &product, x, y);
    Ok(())
}

fn draw_cta(canvas: &mut RgbaImage, cfg: &BrandConfig, lang: Language, zone: Zone) -> Result<(), AdError> {
    let h = canvas.height();
    let cta_font = font(FontFace::DISPLAY_REGULAR, frac(h, 0.24).max(12) as f32)?;
    let text = lang.cta(&cfg.brand_name);
    let bounds = text_bounds(&text, &cta_font);

    let x = zone.left as i32 + (zone.width() as i32 - bounds.width() as i32) / 2 - bounds.min_x;
    let y = (h as i32 - bounds.height() as i32) / 2 - bounds.min_y;
    draw_underlined_text(canvas, &text, x, y, &cta_font, CTA_COLOR);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headline_zones_1300() {
        let z = HeadlineZones::for_size(1300, 90);
        assert_eq!(z.pad, 12);
        assert_eq!(z.logo, Zone { left: 12, right: 208 });
        assert_eq!(z.headline, Zone { left: 221, right: 806 });
        assert_eq!(z.product, Zone { left: 806, right: 1001 });
        assert_eq!(z.cta, Zone { left: 1014, right: 1288 });
    }

    #[test]
    fn test_compact_zones_640() {
        let z = CompactZones::for_size(640, 90);
        assert_eq!(z.logo, Zone { left: 12, right: 179 });
        assert_eq!(z.product, Zone { left: 185, right: 332 });
        assert_eq!(z.cta, Zone { left: 345, right: 628 });
    }

    #[test]
    fn test_padding_floor() {
        assert_eq!(edge_padding(45), 8);
        assert_eq!(edge_padding(90), 12);
    }

    #[test]
    fn test_short_headline_keeps_start_size() {
        assert_eq!(headline_font_size(1300, 90, "Hi").unwrap(), 36);
    }
}
