//! Story template engine
//!
//! Renders "Just Dropped" Instagram story frames (1080×1920 PNG) for the
//! five Amazon channels. A franchise's sequence is:
//!
//! 1. a collage of the channel's products under the title,
//! 2. one individual frame per product, in input order,
//! 3. the collage again as the closing frame.
//!
//! `@Amazon.ca` repeats the whole sequence with French copy under a
//! separate `_FR` folder. Gradient channels cycle their background per
//! individual frame.

pub mod channel;
pub mod layouts;
pub mod locale;

pub use channel::{Channel, ChannelSpec, FrameContext, Palette};
pub use layouts::fashion_chunks;
pub use locale::StoryLang;

use crate::asset::GeneratedAsset;
use crate::banner::sanitize_filename;
use crate::compose::{encode, OutputFormat};
use crate::constants::DEFAULT_THEME_NAME;
use crate::error::AdError;
use chrono::{Local, NaiveDate};
use image::RgbaImage;
use std::collections::{BTreeMap, HashMap};
use std::time::Instant;
use tracing::{debug, info};

/// One product featured in a franchise
#[derive(Clone)]
pub struct ProductEntry {
    /// Free-text identifier, used in frame filenames
    pub asin: String,
    pub brand: String,
    pub product_name: String,
    /// Benefit copy; its opening words become the annotation
    pub copy: String,
    pub image: RgbaImage,
}

impl std::fmt::Debug for ProductEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductEntry")
            .field("asin", &self.asin)
            .field("brand", &self.brand)
            .field("product_name", &self.product_name)
            .field("copy", &self.copy)
            .field("image", &self.image.dimensions())
            .finish()
    }
}

/// Repeat `products` cyclically to fill `count` slots.
///
/// Longer lists are cut to `count`; an empty list stays empty.
pub fn pad_products(products: &[ProductEntry], count: usize) -> Vec<&ProductEntry> {
    products.iter().cycle().take(count).collect()
}

/// The first `max_chars` characters of `copy`, without a dangling partial word.
///
/// When the cut lands inside a word that word is dropped, keeping the
/// space before it. If the first word alone is longer than `max_chars` the
/// hard cut is kept so the annotation is never empty.
pub fn annotation(copy: &str, max_chars: usize) -> String {
    let copy = copy.trim();
    if copy.chars().count() <= max_chars {
        return copy.to_string();
    }

    let head: String = copy.chars().take(max_chars).collect();
    let next = copy.chars().nth(max_chars);
    let cut_inside_word = matches!(next, Some(c) if !c.is_whitespace())
        && !head.ends_with(char::is_whitespace);
    if !cut_inside_word {
        return head;
    }

    match head.rfind(char::is_whitespace) {
        Some(idx) => {
            let boundary = idx + head[idx..].chars().next().map_or(1, char::len_utf8);
            head[..boundary].to_string()
        }
        None => head,
    }
}

fn frame_label(product: &ProductEntry, position: usize) -> String {
    let label = sanitize_filename(&product.asin);
    if label.is_empty() {
        format!("Product_{}", position)
    } else {
        label
    }
}

/// Story frames stay lossless
const FRAME_FORMAT: OutputFormat = OutputFormat::Png;

fn encode_frame(canvas: &RgbaImage) -> Result<Vec<u8>, AdError> {
    encode(canvas, FRAME_FORMAT, 0)
}

fn collage_name(folder: &str, frame_number: usize) -> String {
    format!(
        "{}/Frame_{:02}_Collage.{}",
        folder,
        frame_number,
        FRAME_FORMAT.extension()
    )
}

/// All frames for one channel, dated today.
pub fn generate_franchise_frames(
    channel: Channel,
    products: &[ProductEntry],
    theme_name: &str,
) -> Result<Vec<GeneratedAsset>, AdError> {
    generate_franchise_frames_at(channel, products, theme_name, Local::now().date_naive())
}

/// All frames for one channel, with month labels taken from `date`.
///
/// Returns `len + 2` frames, or twice that for channels with a French set.
pub fn generate_franchise_frames_at(
    channel: Channel,
    products: &[ProductEntry],
    theme_name: &str,
    date: NaiveDate,
) -> Result<Vec<GeneratedAsset>, AdError> {
    let started = Instant::now();
    let spec = channel.spec();

    let mut langs = vec![StoryLang::En];
    if spec.french_set {
        langs.push(StoryLang::Fr);
    }

    let mut frames = Vec::with_capacity(langs.len() * (products.len() + 2));
    for lang in langs {
        let folder = channel.folder_for(lang);
        let ctx = FrameContext {
            palette: &spec.palette,
            lang,
            date,
            theme_name,
            gradient_idx: 0,
        };

        let collage = encode_frame(&(spec.collage)(products, &ctx)?)?;
        debug!(channel = %channel, folder = %folder, bytes = collage.len(), "Rendered collage");
        frames.push(GeneratedAsset::new(
            collage_name(&folder, 1),
            collage.clone(),
        ));

        for (i, product) in products.iter().enumerate() {
            let frame_ctx = FrameContext {
                gradient_idx: i,
                ..ctx.clone()
            };
            let bytes = encode_frame(&(spec.individual)(product, &frame_ctx)?)?;
            let name = format!(
                "{}/Frame_{:02}_{}.{}",
                folder,
                i + 2,
                frame_label(product, i + 1),
                FRAME_FORMAT.extension()
            );
            debug!(channel = %channel, frame = %name, bytes = bytes.len(), "Rendered frame");
            frames.push(GeneratedAsset::new(name, bytes));
        }

        frames.push(GeneratedAsset::new(
            collage_name(&folder, products.len() + 2),
            collage,
        ));
    }

    info!(
        channel = %channel,
        products = products.len(),
        frames = frames.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Generated franchise frames"
    );
    Ok(frames)
}

/// Frames for every franchise, in channel order, dated today.
pub fn generate_all_franchises(
    franchises: &BTreeMap<Channel, Vec<ProductEntry>>,
    theme_names: &HashMap<Channel, String>,
) -> Result<Vec<GeneratedAsset>, AdError> {
    generate_all_franchises_at(franchises, theme_names, Local::now().date_naive())
}

/// Frames for every franchise; channels without a theme use "Just Dropped".
pub fn generate_all_franchises_at(
    franchises: &BTreeMap<Channel, Vec<ProductEntry>>,
    theme_names: &HashMap<Channel, String>,
    date: NaiveDate,
) -> Result<Vec<GeneratedAsset>, AdError> {
    let mut all = Vec::new();
    for (channel, products) in franchises {
        let theme = theme_names
            .get(channel)
            .map(String::as_str)
            .unwrap_or(DEFAULT_THEME_NAME);
        all.extend(generate_franchise_frames_at(*channel, products, theme, date)?);
    }
    Ok(all)
}
