// Constants module - centralized default values for rendering and configuration
//
// Layout fractions that belong to a single template stay next to that
// template; values shared across modules or exposed as configuration
// defaults live here.

// =============================================================================
// Encoding defaults
// =============================================================================

/// JPEG quality used for banner output
pub const BANNER_JPEG_QUALITY: u8 = 95;

/// Placement code embedded in banner filenames
pub const BANNER_PLACEMENT: &str = "ILM";

/// Default banner background color
pub const DEFAULT_BANNER_BG_HEX: &str = "#d9f69e";

// =============================================================================
// Story defaults
// =============================================================================

/// Instagram story canvas width
pub const STORY_WIDTH: u32 = 1080;

/// Instagram story canvas height
pub const STORY_HEIGHT: u32 = 1920;

/// Theme name used when a franchise has no approved theme
pub const DEFAULT_THEME_NAME: &str = "Just Dropped";

/// Extra vertical space between wrapped lines of copy
pub const LINE_SPACING_PX: u32 = 8;

// =============================================================================
// Image preparation
// =============================================================================

/// Pixels with alpha at or below this value count as transparent when trimming
pub const TRIM_ALPHA_THRESHOLD: u8 = 10;

/// Pixels with all channels above this value count as white when trimming
pub const TRIM_WHITE_THRESHOLD: u8 = 240;

/// Channel threshold above which the white-key remover clears a pixel
pub const WHITE_KEY_THRESHOLD: u8 = 230;

// =============================================================================
// Search defaults
// =============================================================================

/// Default search API base URL
pub const DEFAULT_SEARCH_BASE_URL: &str = "https://api.search.brave.com/res/v1";

/// Default search request timeout in seconds
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 10;

/// Default image download timeout in seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;

/// Results requested per trend query
pub const DEFAULT_WEB_RESULTS_PER_QUERY: u32 = 5;

/// Upper bound the search API accepts for image result counts
pub const MAX_IMAGE_RESULTS: u32 = 20;

// =============================================================================
// Retry defaults
// =============================================================================

/// Default number of retries after a rate-limited search call
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Default initial backoff in milliseconds
pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 2000;

/// Default maximum backoff in milliseconds
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 4000;

// =============================================================================
// Theme synthesis
// =============================================================================

/// Maximum characters of a search snippet appended to a theme rationale
pub const TREND_SNIPPET_MAX_CHARS: usize = 120;

// =============================================================================
// Campaign curation
// =============================================================================

/// Primary products planned per franchise
pub const PRIMARY_ASINS_PER_FRANCHISE: usize = 10;

/// Alternative ASINs planned per franchise
pub const ALT_ASINS_PER_FRANCHISE: usize = 40;

/// Products listed by name in a missing-image error
pub const MISSING_IMAGE_LIST_MAX: usize = 5;

/// Spreadsheet sheet names are limited to this many characters
pub const REPORT_SHEET_NAME_MAX_CHARS: usize = 31;
