//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that coordinates:
//! - Fetching the start page and failing fast if it is unreachable
//! - Fetching each depth level concurrently
//! - Handing every fetched page to a [`PageHandler`]
//! - Queuing same-host links for the next level

use super::fetcher::{build_http_client, fetch_page, FetchError, FetchedPage};
use super::parser::extract_links;
use super::scheduler::Scheduler;
use super::CrawlError;
use crate::config::CrawlerConfig;
use crate::url::{is_same_host, parse_start_url};
use reqwest::Client;
use std::sync::Arc;
use tokio::task::JoinSet;
use url::Url;

/// Receives crawl results
///
/// Handlers may be called from several worker threads at once and must
/// tolerate concurrent invocation, including for the same URL.
pub trait PageHandler: Send + Sync + 'static {
    /// Called once for every successfully fetched same-host response
    fn on_page(&self, page: &FetchedPage);

    /// Called for every failed fetch
    fn on_error(&self, error: &FetchError) {
        tracing::warn!("Failed to fetch {}", error);
    }
}

/// Totals for one crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Responses handed to the page handler
    pub pages_fetched: usize,

    /// Fetches that failed
    pub fetch_errors: usize,

    /// Deepest level (in hops from the start page) that was fetched
    pub max_depth_reached: u32,
}

/// Outcome of visiting one URL
enum Visit {
    /// Page was handled; carries the links it contains
    Page(Vec<Url>),
    /// Response ended up on another host after redirects
    OffHost,
    /// Fetch failed
    Failed(FetchError),
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: CrawlerConfig,
    client: Client,
    scheduler: Scheduler,
    start_url: Url,
}

impl Coordinator {
    /// Creates a coordinator for a crawl starting at `start_url`
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(CrawlError)` - The start URL is invalid or the HTTP client could not be built
    pub fn new(start_url: &str, config: CrawlerConfig) -> Result<Self, CrawlError> {
        let (start_url, host) = parse_start_url(start_url)?;
        let client = build_http_client(&config)?;
        let scheduler = Scheduler::new(host, config.max_concurrent_requests as usize);

        Ok(Self {
            config,
            client,
            scheduler,
            start_url,
        })
    }

    pub fn host(&self) -> &str {
        self.scheduler.host()
    }

    pub fn start_url(&self) -> &Url {
        &self.start_url
    }

    /// Runs the crawl to completion
    ///
    /// Levels are processed breadth first: every URL at depth `n` is fetched
    /// (concurrently, up to the configured limit) before any URL at depth
    /// `n + 1`. Links found at `max_depth` are not followed.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlSummary)` - The crawl finished; individual pages may have failed
    /// * `Err(CrawlError)` - The start URL could not be fetched at all
    pub async fn run<H: PageHandler>(self, handler: Arc<H>) -> Result<CrawlSummary, CrawlError> {
        let host = self.host().to_string();
        let max_depth = self.config.max_depth;
        let mut summary = CrawlSummary::default();

        tracing::info!("Starting crawl of {} (max depth {})", self.start_url, max_depth);
        self.scheduler.seed(&self.start_url);

        let mut level = match visit(&self.client, self.start_url.clone(), &host, &handler).await {
            Visit::Page(links) => {
                summary.pages_fetched += 1;
                if max_depth > 0 {
                    self.scheduler.admit(links)
                } else {
                    Vec::new()
                }
            }
            Visit::OffHost => Vec::new(),
            Visit::Failed(error) if error.is_network() => {
                return Err(CrawlError::StartUnreachable {
                    url: self.start_url.to_string(),
                    source: error,
                });
            }
            Visit::Failed(_) => {
                summary.fetch_errors += 1;
                Vec::new()
            }
        };

        let mut depth = 1;
        while !level.is_empty() && depth <= max_depth {
            tracing::debug!("Fetching {} URLs at depth {}", level.len(), depth);
            summary.max_depth_reached = depth;

            let mut tasks = JoinSet::new();
            for url in level {
                let Some(permit) = self.scheduler.acquire().await else {
                    tracing::error!("Fetch slots closed; stopping crawl");
                    break;
                };
                let client = self.client.clone();
                let host = host.clone();
                let handler = Arc::clone(&handler);
                tasks.spawn(async move {
                    let _permit = permit;
                    visit(&client, url, &host, &handler).await
                });
            }

            let mut next = Vec::new();
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok(Visit::Page(links)) => {
                        summary.pages_fetched += 1;
                        if depth < max_depth {
                            next.extend(self.scheduler.admit(links));
                        }
                    }
                    Ok(Visit::OffHost) => {}
                    Ok(Visit::Failed(_)) => summary.fetch_errors += 1,
                    Err(e) => tracing::error!("Crawl task failed: {}", e),
                }
            }

            level = next;
            depth += 1;
        }

        tracing::info!(
            "Crawl finished: {} pages fetched, {} errors, {} URLs queued",
            summary.pages_fetched,
            summary.fetch_errors,
            self.scheduler.queued_count()
        );

        Ok(summary)
    }
}

/// Fetches one URL, hands the response to `handler` and returns its links
async fn visit<H: PageHandler>(client: &Client, url: Url, host: &str, handler: &Arc<H>) -> Visit {
    let page = match fetch_page(client, &url).await {
        Ok(page) => page,
        Err(error) => {
            handler.on_error(&error);
            return Visit::Failed(error);
        }
    };

    if !is_same_host(&page.url, host) {
        tracing::debug!("{} redirected off-host to {}", url, page.url);
        return Visit::OffHost;
    }

    let links = if page.is_html() {
        extract_links(&page.text(), &page.url)
    } else {
        Vec::new()
    };

    // Rendering is blocking file work; keep it off the async workers
    let handler = Arc::clone(handler);
    if let Err(e) = tokio::task::spawn_blocking(move || handler.on_page(&page)).await {
        tracing::error!("Page handler for {} failed: {}", url, e);
    }

    Visit::Page(links)
}

/// Runs a complete crawl from `start_url`
///
/// This is the main entry point for starting a crawl. It validates the start
/// URL, builds the HTTP client, then fetches same-host pages level by level
/// up to the configured depth, handing each one to `handler`.
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Crawl completed
/// * `Err(CrawlError)` - The start URL is invalid or unreachable
///
/// # Example
///
/// ```no_run
/// use scrapedf::config::CrawlerConfig;
/// use scrapedf::crawler::{crawl, FetchedPage, PageHandler};
/// use std::sync::Arc;
///
/// struct Printer;
///
/// impl PageHandler for Printer {
///     fn on_page(&self, page: &FetchedPage) {
///         println!("{} ({} bytes)", page.url, page.body.len());
///     }
/// }
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let summary = crawl("https://example.com/", CrawlerConfig::default(), Arc::new(Printer)).await?;
/// println!("{} pages", summary.pages_fetched);
/// # Ok(())
/// # }
/// ```
pub async fn crawl<H: PageHandler>(
    start_url: &str,
    config: CrawlerConfig,
    handler: Arc<H>,
) -> Result<CrawlSummary, CrawlError> {
    Coordinator::new(start_url, config)?.run(handler).await
}
