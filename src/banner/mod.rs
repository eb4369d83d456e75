//! Banner template engine
//!
//! Renders the ILM banner set for one brand: three placement sizes in
//! English and Spanish, each with a half-size derivative. Half sizes are
//! resampled from the rendered full-size canvas rather than laid out
//! again, so both keep identical proportions.
//!
//! The US and Canadian sets render identically and differ only in how
//! files are named (see [`Region`]).

pub mod layout;

pub use layout::{headline_font_size, render_banner, CompactZones, HeadlineZones, Zone};

use crate::asset::GeneratedAsset;
use crate::compose::{encode, resize_exact, Color, OutputFormat};
use crate::constants::{BANNER_JPEG_QUALITY, BANNER_PLACEMENT};
use crate::error::AdError;
use image::RgbaImage;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Instant;
use tracing::{debug, info};

/// Everything needed to render one brand's banners
#[derive(Clone)]
pub struct BrandConfig {
    pub brand_name: String,
    pub brand_abbrev: String,
    pub logo_image: RgbaImage,
    pub product_image: RgbaImage,
    pub headline_eng: String,
    pub headline_esp: String,
    pub bg_color: Color,
}

impl BrandConfig {
    /// Fail fast on empty fields before any rendering starts.
    pub fn validate(&self) -> Result<(), AdError> {
        let required = [
            ("brand_name", &self.brand_name),
            ("brand_abbrev", &self.brand_abbrev),
            ("headline_eng", &self.headline_eng),
            ("headline_esp", &self.headline_esp),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(AdError::MissingField(field));
            }
        }
        if self.logo_image.width() == 0 || self.logo_image.height() == 0 {
            return Err(AdError::MissingField("logo_image"));
        }
        if self.product_image.width() == 0 || self.product_image.height() == 0 {
            return Err(AdError::MissingField("product_image"));
        }
        Ok(())
    }

    pub fn headline(&self, lang: Language) -> &str {
        match lang {
            Language::Eng => &self.headline_eng,
            Language::Esp => &self.headline_esp,
        }
    }
}

impl std::fmt::Debug for BrandConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrandConfig")
            .field("brand_name", &self.brand_name)
            .field("brand_abbrev", &self.brand_abbrev)
            .field("logo", &self.logo_image.dimensions())
            .field("product", &self.product_image.dimensions())
            .field("headline_eng", &self.headline_eng)
            .field("headline_esp", &self.headline_esp)
            .field("bg_color", &self.bg_color)
            .finish()
    }
}

/// Banner copy language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Eng,
    Esp,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Eng, Language::Esp];

    /// Code used in filenames
    pub fn code(&self) -> &'static str {
        match self {
            Language::Eng => "ENG",
            Language::Esp => "ESP",
        }
    }

    pub fn new_on_amazon(&self) -> &'static str {
        match self {
            Language::Eng => "New on Amazon!",
            Language::Esp => "\u{a1}Nuevo en Amazon!",
        }
    }

    pub fn cta(&self, brand: &str) -> String {
        match self {
            Language::Eng => format!("Shop {}", brand),
            Language::Esp => format!("Compra {}", brand),
        }
    }
}

/// Filename convention of a banner set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// `{W}x{H}_{LANG}_ILM_{abbrev}.jpg`
    #[default]
    Us,
    /// `{W}x{H}_ILM_{brand}_CA_{LANG}.jpg`
    Ca,
}

impl Region {
    pub const ALL: [Region; 2] = [Region::Us, Region::Ca];
}

impl FromStr for Region {
    type Err = AdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "us" => Ok(Region::Us),
            "ca" => Ok(Region::Ca),
            other => Err(AdError::Config(format!("unknown region '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerLayout {
    /// Logo, two-line headline, product and CTA
    Headline,
    /// Logo, product and CTA
    Compact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerSize {
    pub width: u32,
    pub height: u32,
    pub layout: BannerLayout,
}

impl BannerSize {
    pub const fn new(width: u32, height: u32, layout: BannerLayout) -> Self {
        Self { width, height, layout }
    }

    /// Dimensions of the half-scale derivative
    pub fn half(&self) -> (u32, u32) {
        (self.width / 2, self.height / 2)
    }
}

/// Full-size placements, in output order
pub const BANNER_SIZES: [BannerSize; 3] = [
    BannerSize::new(1300, 90, BannerLayout::Headline),
    BannerSize::new(1200, 90, BannerLayout::Headline),
    BannerSize::new(640, 90, BannerLayout::Compact),
];

static UNSAFE_FILENAME_CHARS: OnceLock<Regex> = OnceLock::new();

fn unsafe_filename_chars() -> &'static Regex {
    UNSAFE_FILENAME_CHARS.get_or_init(|| {
        Regex::new(r"[^A-Za-z0-9_-]+").expect("Invalid filename regex - this is a compile-time bug")
    })
}

/// Replace runs of characters outside `[A-Za-z0-9_-]` with `_`.
pub fn sanitize_filename(name: &str) -> String {
    unsafe_filename_chars()
        .replace_all(name, "_")
        .trim_matches('_')
        .to_string()
}

/// Banners ship as lossy JPEG
const BANNER_FORMAT: OutputFormat = OutputFormat::Jpeg;

/// Output filename for one banner
pub fn banner_filename(width: u32, height: u32, lang: Language, cfg: &BrandConfig, region: Region) -> String {
    match region {
        Region::Us => format!(
            "{}x{}_{}_{}_{}.{}",
            width,
            height,
            lang.code(),
            BANNER_PLACEMENT,
            cfg.brand_abbrev,
            BANNER_FORMAT.extension()
        ),
        Region::Ca => format!(
            "{}x{}_{}_{}_CA_{}.{}",
            width,
            height,
            BANNER_PLACEMENT,
            sanitize_filename(&cfg.brand_name),
            lang.code(),
            BANNER_FORMAT.extension()
        ),
    }
}

/// Rendered and encoded full/half pair, before naming
struct RenderedPair {
    lang: Language,
    full: (u32, u32, Vec<u8>),
    half: (u32, u32, Vec<u8>),
}

fn render_all(cfg: &BrandConfig) -> Result<Vec<RenderedPair>, AdError> {
    cfg.validate()?;

    let mut pairs = Vec::with_capacity(Language::ALL.len() * BANNER_SIZES.len());
    for lang in Language::ALL {
        for size in BANNER_SIZES {
            let full = render_banner(size, cfg, lang)?;
            let (half_w, half_h) = size.half();
            let half = resize_exact(&full, half_w, half_h)?;

            let full_bytes = encode(&full, BANNER_FORMAT, BANNER_JPEG_QUALITY)?;
            let half_bytes = encode(&half, BANNER_FORMAT, BANNER_JPEG_QUALITY)?;
            debug!(
                lang = lang.code(),
                width = size.width,
                height = size.height,
                full_bytes = full_bytes.len(),
                half_bytes = half_bytes.len(),
                "Rendered banner"
            );

            pairs.push(RenderedPair {
                lang,
                full: (size.width, size.height, full_bytes),
                half: (half_w, half_h, half_bytes),
            });
        }
    }
    Ok(pairs)
}

fn name_pairs(pairs: &[RenderedPair], cfg: &BrandConfig, region: Region, out: &mut Vec<GeneratedAsset>) {
    for pair in pairs {
        for (w, h, bytes) in [&pair.full, &pair.half] {
            out.push(GeneratedAsset::new(
                banner_filename(*w, *h, pair.lang, cfg, region),
                bytes.clone(),
            ));
        }
    }
}

/// The 12-banner set for one region.
///
/// Order: English then Spanish; within a language each full size is
/// followed by its half size.
pub fn generate_banners(cfg: &BrandConfig, region: Region) -> Result<Vec<GeneratedAsset>, AdError> {
    let started = Instant::now();
    let pairs = render_all(cfg)?;
    let mut assets = Vec::with_capacity(pairs.len() * 2);
    name_pairs(&pairs, cfg, region, &mut assets);

    info!(
        brand = %cfg.brand_name,
        region = ?region,
        count = assets.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Generated banners"
    );
    Ok(assets)
}

/// All 24 banners: the US set followed by the Canadian set.
///
/// Rendering happens once; the two sets share encoded bytes.
pub fn generate_all_banners(cfg: &BrandConfig) -> Result<Vec<GeneratedAsset>, AdError> {
    let started = Instant::now();
    let pairs = render_all(cfg)?;
    let mut assets = Vec::with_capacity(pairs.len() * 2 * Region::ALL.len());
    for region in Region::ALL {
        name_pairs(&pairs, cfg, region, &mut assets);
    }

    info!(
        brand = %cfg.brand_name,
        count = assets.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Generated all banners"
    );
    Ok(assets)
}
