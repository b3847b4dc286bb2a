use serde::Deserialize;

/// Browser-like user agent sent with every request.
///
/// The origin serves a reduced markup variant to obvious bots, so the
/// scraper identifies as a desktop browser the way the source system did.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for radscrape
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// HTTP fetch behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Total request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Cooldown slept once before the single HTTP 429 retry (seconds)
    #[serde(rename = "rate-limit-cooldown-secs", default = "default_cooldown_secs")]
    pub rate_limit_cooldown_secs: u64,

    /// User agent header value
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Politeness delay configuration
///
/// These delays are pacing between requests, not a correctness mechanism.
/// Tests disable them wholesale with `enabled = false`.
#[derive(Debug, Clone, Deserialize)]
pub struct PacingConfig {
    /// Lower bound of the delay after each item (milliseconds)
    #[serde(rename = "item-delay-min-ms", default = "default_item_delay_min")]
    pub item_delay_min_ms: u64,

    /// Upper bound of the delay after each item (milliseconds)
    #[serde(rename = "item-delay-max-ms", default = "default_item_delay_max")]
    pub item_delay_max_ms: u64,

    /// Lower bound of the delay after each listing page (milliseconds)
    #[serde(rename = "page-delay-min-ms", default = "default_page_delay_min")]
    pub page_delay_min_ms: u64,

    /// Upper bound of the delay after each listing page (milliseconds)
    #[serde(rename = "page-delay-max-ms", default = "default_page_delay_max")]
    pub page_delay_max_ms: u64,

    /// Whether pacing delays are applied at all
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Scraped origin configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Base origin for listing URLs and relative href resolution
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path the JSON result document is written to
    #[serde(rename = "results-path", default = "default_results_path")]
    pub results_path: String,

    /// Root directory for saved case images; each run creates a fresh
    /// uniquely named subdirectory underneath it
    #[serde(rename = "image-dir", default = "default_image_dir")]
    pub image_dir: String,
}

fn default_timeout_secs() -> u64 {
    25
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_cooldown_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_item_delay_min() -> u64 {
    1000
}

fn default_item_delay_max() -> u64 {
    2000
}

fn default_page_delay_min() -> u64 {
    2000
}

fn default_page_delay_max() -> u64 {
    4000
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "https://radiopaedia.org".to_string()
}

fn default_results_path() -> String {
    "./results.json".to_string()
}

fn default_image_dir() -> String {
    "./downloaded_images".to_string()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            rate_limit_cooldown_secs: default_cooldown_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            item_delay_min_ms: default_item_delay_min(),
            item_delay_max_ms: default_item_delay_max(),
            page_delay_min_ms: default_page_delay_min(),
            page_delay_max_ms: default_page_delay_max(),
            enabled: true,
        }
    }
}

impl PacingConfig {
    /// A pacing configuration with all delays switched off, for tests
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_path: default_results_path(),
            image_dir: default_image_dir(),
        }
    }
}
