use serde::Deserialize;

/// Main configuration structure for scrapedf
///
/// Every field has a default, so an empty file (or no file at all) yields
/// the stock crawl: depth 5, 5 second timeouts, A4 pages in 12pt Helvetica.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of link hops from the start page
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum number of fetches in flight at once
    #[serde(rename = "max-concurrent-requests", default = "default_concurrency")]
    pub max_concurrent_requests: u32,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            request_timeout_secs: default_timeout(),
            max_concurrent_requests: default_concurrency(),
            user_agent: default_user_agent(),
        }
    }
}

/// Page layout configuration for rendered documents
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    #[serde(rename = "page-width-mm", default = "default_page_width")]
    pub page_width_mm: f32,

    #[serde(rename = "page-height-mm", default = "default_page_height")]
    pub page_height_mm: f32,

    /// Margin applied on all four sides
    #[serde(rename = "margin-mm", default = "default_margin")]
    pub margin_mm: f32,

    /// Font size in points
    #[serde(rename = "font-size", default = "default_font_size")]
    pub font_size: f32,

    /// Vertical advance per rendered line
    #[serde(rename = "line-height-mm", default = "default_line_height")]
    pub line_height_mm: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page_width_mm: default_page_width(),
            page_height_mm: default_page_height(),
            margin_mm: default_margin(),
            font_size: default_font_size(),
            line_height_mm: default_line_height(),
        }
    }
}

fn default_max_depth() -> u32 {
    5
}

fn default_timeout() -> u64 {
    5
}

fn default_concurrency() -> u32 {
    8
}

fn default_user_agent() -> String {
    format!("scrapedf/{}", env!("CARGO_PKG_VERSION"))
}

// A4 portrait
fn default_page_width() -> f32 {
    210.0
}

fn default_page_height() -> f32 {
    297.0
}

fn default_margin() -> f32 {
    10.0
}

fn default_font_size() -> f32 {
    12.0
}

fn default_line_height() -> f32 {
    10.0
}
