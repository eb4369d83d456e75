//! Channels and their static visual configuration.
//!
//! Each channel maps to a [`ChannelSpec`]: a palette plus the two layout
//! functions that draw its collage and individual frames. Adding a channel
//! means adding a variant and one table entry.

use super::layouts;
use super::locale::StoryLang;
use super::ProductEntry;
use crate::compose::Color;
use crate::error::AdError;
use chrono::NaiveDate;
use image::RgbaImage;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Social channel a franchise is published on
///
/// Ordering follows [`Channel::ALL`], which is also the generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    AmazonHome,
    AmazonBeauty,
    AmazonFashion,
    Amazon,
    AmazonCa,
}

impl Channel {
    pub const ALL: [Channel; 5] = [
        Channel::AmazonHome,
        Channel::AmazonBeauty,
        Channel::AmazonFashion,
        Channel::Amazon,
        Channel::AmazonCa,
    ];

    /// Public handle, e.g. `@Amazon.ca`
    pub fn handle(&self) -> &'static str {
        match self {
            Channel::AmazonHome => "@AmazonHome",
            Channel::AmazonBeauty => "@AmazonBeauty",
            Channel::AmazonFashion => "@AmazonFashion",
            Channel::Amazon => "@Amazon",
            Channel::AmazonCa => "@Amazon.ca",
        }
    }

    /// Output folder: the handle without `@`, dots replaced by `_`
    pub fn folder(&self) -> String {
        self.handle().replace('@', "").replace('.', "_")
    }

    /// Output folder for a frame set in `lang`
    pub fn folder_for(&self, lang: StoryLang) -> String {
        format!("{}{}", self.folder(), lang.folder_suffix())
    }

    /// US channels share a brand pool; the Canadian channel does not
    pub fn is_us(&self) -> bool {
        !matches!(self, Channel::AmazonCa)
    }

    pub fn spec(&self) -> &'static ChannelSpec {
        match self {
            Channel::AmazonHome => &HOME,
            Channel::AmazonBeauty => &BEAUTY,
            Channel::AmazonFashion => &FASHION,
            Channel::Amazon => &AMAZON,
            Channel::AmazonCa => &AMAZON_CA,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.handle())
    }
}

impl FromStr for Channel {
    type Err = AdError;

    /// Accepts the handle with or without the leading `@`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().trim_start_matches('@');
        Channel::ALL
            .into_iter()
            .find(|c| c.handle()[1..].eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AdError::Config(format!("unknown channel '{}'", s)))
    }
}

impl Serialize for Channel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.handle())
    }
}

impl<'de> Deserialize<'de> for Channel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Colors of one channel
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    /// Background of individual frames when it differs from `bg`
    pub bg_individual: Option<Color>,
    /// Backdrop circles behind products
    pub circle: Option<Color>,
    /// Tiled "JUST DROPPED" pattern
    pub watermark: Option<Color>,
    pub text: Color,
    pub accent: Color,
    /// Top/bottom pairs cycled across frames
    pub gradients: &'static [(Color, Color)],
}

impl Palette {
    /// Gradient for frame `idx`, cycling through the list
    pub fn gradient(&self, idx: usize) -> Option<(Color, Color)> {
        if self.gradients.is_empty() {
            None
        } else {
            Some(self.gradients[idx % self.gradients.len()])
        }
    }

    pub fn individual_bg(&self) -> Color {
        self.bg_individual.unwrap_or(self.bg)
    }
}

/// Per-frame inputs shared by every layout
#[derive(Debug, Clone)]
pub struct FrameContext<'a> {
    pub palette: &'a Palette,
    pub lang: StoryLang,
    pub date: NaiveDate,
    pub theme_name: &'a str,
    /// Index into the palette's gradient list
    pub gradient_idx: usize,
}

impl FrameContext<'_> {
    pub fn month_label(&self) -> &'static str {
        self.lang.month_label(self.date)
    }
}

pub type CollageFn = fn(&[ProductEntry], &FrameContext<'_>) -> Result<RgbaImage, AdError>;
pub type IndividualFn = fn(&ProductEntry, &FrameContext<'_>) -> Result<RgbaImage, AdError>;

/// Static description of a channel's frames
pub struct ChannelSpec {
    pub palette: Palette,
    pub collage: CollageFn,
    pub individual: IndividualFn,
    /// Characters of copy used for the individual-frame annotation
    pub annotation_chars: usize,
    /// Also render a French frame set
    pub french_set: bool,
}

const INK: Color = Color::new(0x2C, 0x2C, 0x2C);

const PASTEL_GRADIENTS: [(Color, Color); 6] = [
    (Color::new(0xF5, 0xE6, 0xDC), Color::new(0xF0, 0xD4, 0xC8)), // peach
    (Color::new(0xE8, 0xE0, 0xF0), Color::new(0xD8, 0xCC, 0xE8)), // lavender
    (Color::new(0xFF, 0xF5, 0xD6), Color::new(0xFF, 0xED, 0xBA)), // yellow
    (Color::new(0xD6, 0xE8, 0xF5), Color::new(0xC0, 0xD8, 0xF0)), // blue
    (Color::new(0xD4, 0xEF, 0xE0), Color::new(0xC0, 0xE8, 0xD0)), // mint
    (Color::new(0xF5, 0xF1, 0xED), Color::new(0xED, 0xE5, 0xD8)), // beige
];

const PASTEL_PALETTE: Palette = Palette {
    bg: Color::new(0xF5, 0xE6, 0xDC),
    bg_individual: None,
    circle: None,
    watermark: None,
    text: INK,
    accent: Color::new(0x6B, 0x5B, 0x73),
    gradients: &PASTEL_GRADIENTS,
};

static HOME: ChannelSpec = ChannelSpec {
    palette: Palette {
        bg: Color::new(0xF5, 0xF1, 0xED),
        bg_individual: None,
        circle: None,
        watermark: Some(Color::new(0xED, 0xE9, 0xE3)),
        text: INK,
        accent: Color::new(0x8B, 0x7D, 0x6B),
        gradients: &[],
    },
    collage: layouts::home_collage,
    individual: layouts::home_individual,
    annotation_chars: 35,
    french_set: false,
};

static BEAUTY: ChannelSpec = ChannelSpec {
    palette: Palette {
        bg: Color::new(0xD4, 0xEF, 0xE0),
        bg_individual: Some(Color::new(0xF5, 0xF8, 0xF6)),
        circle: Some(Color::new(0xC8, 0xED, 0xDA)),
        watermark: None,
        text: INK,
        accent: Color::new(0x4A, 0x8B, 0x6F),
        gradients: &[],
    },
    collage: layouts::beauty_collage,
    individual: layouts::beauty_individual,
    annotation_chars: 30,
    french_set: false,
};

static FASHION: ChannelSpec = ChannelSpec {
    palette: Palette {
        bg: Color::new(0xF0, 0xEB, 0xE6),
        bg_individual: None,
        circle: None,
        watermark: None,
        text: INK,
        accent: Color::new(0x8B, 0x7D, 0x6B),
        gradients: &[],
    },
    collage: layouts::fashion_collage,
    individual: layouts::fashion_individual,
    annotation_chars: 30,
    french_set: false,
};

static AMAZON: ChannelSpec = ChannelSpec {
    palette: PASTEL_PALETTE,
    collage: layouts::pastel_collage,
    individual: layouts::pastel_individual,
    annotation_chars: 30,
    french_set: false,
};

static AMAZON_CA: ChannelSpec = ChannelSpec {
    palette: PASTEL_PALETTE,
    collage: layouts::pastel_collage,
    individual: layouts::pastel_individual,
    annotation_chars: 30,
    french_set: true,
};
