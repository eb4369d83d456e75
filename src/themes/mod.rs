//! Trend research and theme proposals
//!
//! For each channel a handful of seasonal queries are sent to the search
//! provider. The hits do not pick the themes; each channel has a fixed set
//! of candidate themes and the hits only enrich their rationale with a
//! matching trend signal. With no results (or no API key) the candidates
//! are returned unchanged.

use crate::constants::{DEFAULT_WEB_RESULTS_PER_QUERY, TREND_SNIPPET_MAX_CHARS};
use crate::search::{web_search_or_empty, SearchResult, WebSearch};
use crate::story::Channel;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info};

/// Meteorological season of a date (northern hemisphere)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub fn of(date: NaiveDate) -> Self {
        match date.month() {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Fall,
            _ => Season::Winter,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A proposed franchise theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub rationale: String,
    /// Lowercase keywords matched against search signals
    pub keywords: Vec<String>,
}

/// `{season}` in names and rationales, `{season_lc}` in keywords
struct ThemeTemplate {
    name: &'static str,
    rationale: &'static str,
    keywords: &'static [&'static str],
}

const HOME_THEMES: &[ThemeTemplate] = &[
    ThemeTemplate {
        name: "{season} Refresh",
        rationale: "Seasonal home refresh is a top trend for {season} {year}. \
                    Pinterest and TikTok show high engagement with room makeover content.",
        keywords: &["{season_lc}", "refresh", "home", "decor"],
    },
    ThemeTemplate {
        name: "Cozy Minimalism",
        rationale: "Clean, warm aesthetics with neutral tones continue trending. \
                    Aligns with @AmazonHome's beige/cream visual identity.",
        keywords: &["minimalist", "cozy", "neutral", "warm"],
    },
    ThemeTemplate {
        name: "Elevated Essentials",
        rationale: "Trending: upgrading everyday home items to premium versions. \
                    TikTok 'home upgrade' content drives discovery.",
        keywords: &["upgrade", "essentials", "elevated", "premium"],
    },
];

const BEAUTY_THEMES: &[ThemeTemplate] = &[
    ThemeTemplate {
        name: "{season} Glow",
        rationale: "Seasonal beauty routines are trending for {season} {year}. \
                    Skincare and glow-focused content dominates TikTok.",
        keywords: &["{season_lc}", "glow", "skincare", "routine"],
    },
    ThemeTemplate {
        name: "Clean Beauty Essentials",
        rationale: "Clean and sustainable beauty continues to grow. \
                    Matches @AmazonBeauty's fresh mint aesthetic.",
        keywords: &["clean", "beauty", "sustainable", "fresh"],
    },
    ThemeTemplate {
        name: "TikTok Viral Picks",
        rationale: "Products going viral on TikTok drive massive Amazon search traffic. \
                    Curating viral picks builds relevance.",
        keywords: &["viral", "trending", "tiktok", "picks"],
    },
];

const FASHION_THEMES: &[ThemeTemplate] = &[
    ThemeTemplate {
        name: "{season} Edit",
        rationale: "Seasonal fashion edits are a staple format. \
                    {season} {year} shows strong interest in transitional pieces.",
        keywords: &["{season_lc}", "edit", "style", "outfit"],
    },
    ThemeTemplate {
        name: "Quiet Luxury",
        rationale: "The quiet luxury trend continues with understated, high-quality pieces. \
                    Aligns with @AmazonFashion's editorial tone.",
        keywords: &["quiet luxury", "elevated", "understated", "quality"],
    },
    ThemeTemplate {
        name: "Street Style Selects",
        rationale: "Street style and casual-cool looks remain highly engaging. \
                    Pinterest street style boards drive outfit inspiration.",
        keywords: &["street style", "casual", "cool", "selects"],
    },
];

const AMAZON_THEMES: &[ThemeTemplate] = &[
    ThemeTemplate {
        name: "Best of {season}",
        rationale: "General seasonal curation across categories. \
                    Broad appeal for @Amazon's diverse audience.",
        keywords: &["{season_lc}", "best", "picks", "new"],
    },
    ThemeTemplate {
        name: "Viral Finds",
        rationale: "Cross-category viral products drive high engagement. \
                    TikTok-to-Amazon pipeline is a proven discovery channel.",
        keywords: &["viral", "finds", "trending", "discover"],
    },
    ThemeTemplate {
        name: "New & Notable",
        rationale: "Fresh product launches across categories. \
                    Positions @Amazon as the go-to for discovery.",
        keywords: &["new", "notable", "launch", "just dropped"],
    },
];

const AMAZON_CA_THEMES: &[ThemeTemplate] = &[
    ThemeTemplate {
        name: "{season} Picks \u{2013} Canada",
        rationale: "Seasonal curation tailored for Canadian customers. \
                    Localised content with Canadian spelling and French versions.",
        keywords: &["{season_lc}", "canada", "picks", "new"],
    },
    ThemeTemplate {
        name: "Canadian Favourites",
        rationale: "Highlighting products popular with Canadian shoppers. \
                    Builds local relevance for @Amazon.ca.",
        keywords: &["favourites", "canada", "popular", "trending"],
    },
];

fn theme_templates(channel: Channel) -> &'static [ThemeTemplate] {
    match channel {
        Channel::AmazonHome => HOME_THEMES,
        Channel::AmazonBeauty => BEAUTY_THEMES,
        Channel::AmazonFashion => FASHION_THEMES,
        Channel::Amazon => AMAZON_THEMES,
        Channel::AmazonCa => AMAZON_CA_THEMES,
    }
}

fn query_templates(channel: Channel) -> &'static [&'static str] {
    match channel {
        Channel::AmazonHome => &[
            "home decor trends {year} Pinterest",
            "trending home products TikTok {season} {year}",
            "interior design trends {season} {year}",
        ],
        Channel::AmazonBeauty => &[
            "beauty trends {year} TikTok",
            "skincare trends {season} {year} Pinterest",
            "trending beauty products {season} {year}",
        ],
        Channel::AmazonFashion => &[
            "fashion trends {season} {year} Pinterest",
            "trending fashion TikTok {season} {year}",
            "style trends {season} {year}",
        ],
        Channel::Amazon => &[
            "trending products Amazon {season} {year}",
            "viral products TikTok {season} {year}",
            "best new products {season} {year}",
        ],
        Channel::AmazonCa => &[
            "trending products Canada {season} {year}",
            "popular products Amazon Canada {season} {year}",
        ],
    }
}

fn fill(template: &str, season: Season, year: i32) -> String {
    template
        .replace("{season_lc}", &season.name().to_lowercase())
        .replace("{season}", season.name())
        .replace("{year}", &year.to_string())
}

/// Search queries for `channel` on `date`
pub fn search_queries(channel: Channel, date: NaiveDate) -> Vec<String> {
    let season = Season::of(date);
    query_templates(channel)
        .iter()
        .map(|t| fill(t, season, date.year()))
        .collect()
}

/// Candidate themes for `channel`, before any trend enrichment
pub fn candidate_themes(channel: Channel, date: NaiveDate) -> Vec<Theme> {
    let season = Season::of(date);
    let year = date.year();
    theme_templates(channel)
        .iter()
        .map(|t| Theme {
            name: fill(t.name, season, year),
            rationale: fill(t.rationale, season, year),
            keywords: t.keywords.iter().map(|k| fill(k, season, year)).collect(),
        })
        .collect()
}

/// Themes for `channel` enriched with search signals, dated today.
pub fn extract_themes(results: &[SearchResult], channel: Channel) -> Vec<Theme> {
    extract_themes_at(results, channel, Local::now().date_naive())
}

/// Themes for `channel` enriched with search signals.
///
/// The first result whose signal mentions any of a theme's keywords is
/// quoted (first 120 characters) at the end of that theme's rationale.
pub fn extract_themes_at(results: &[SearchResult], channel: Channel, date: NaiveDate) -> Vec<Theme> {
    let signals: Vec<String> = results.iter().map(SearchResult::signal).collect();
    let mut themes = candidate_themes(channel, date);

    for theme in &mut themes {
        let matching = signals
            .iter()
            .find(|signal| theme.keywords.iter().any(|kw| signal.contains(kw.as_str())));
        if let Some(signal) = matching {
            let snippet: String = signal.chars().take(TREND_SNIPPET_MAX_CHARS).collect();
            theme
                .rationale
                .push_str(&format!(" Trend signal: \"{}...\"", snippet.trim()));
        }
    }
    themes
}

/// Research themes for `channels` (all channels when empty).
///
/// Search failures are logged and treated as no results, so every
/// requested channel gets its candidate themes.
pub fn research_themes(
    search: &dyn WebSearch,
    channels: &[Channel],
    date: NaiveDate,
) -> BTreeMap<Channel, Vec<Theme>> {
    let started = Instant::now();
    let channels: &[Channel] = if channels.is_empty() {
        &Channel::ALL
    } else {
        channels
    };

    let mut all_themes = BTreeMap::new();
    for &channel in channels {
        let mut results = Vec::new();
        for query in search_queries(channel, date) {
            let hits = web_search_or_empty(search, &query, DEFAULT_WEB_RESULTS_PER_QUERY);
            debug!(channel = %channel, query = %query, hits = hits.len(), "Trend query");
            results.extend(hits);
        }
        all_themes.insert(channel, extract_themes_at(&results, channel, date));
    }

    info!(
        channels = all_themes.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Researched themes"
    );
    all_themes
}
