//! Per-run scrape state
//!
//! A `Session` lives for exactly one `Scraper::scrape_and_save` call. It owns
//! the temporary directory the page documents are written to, the set of
//! response URLs already turned into a document, and the artifacts produced.

use super::ScrapeOptions;
use crate::archive::Artifact;
use crate::crawler::{FetchError, FetchedPage, PageHandler, VisitedSet};
use crate::extract::{extract_text, parse_document};
use crate::output::ScrapeStats;
use crate::render::{clean_lines, DocumentRenderer};
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

const TEMP_DIR_PREFIX: &str = "scrapedf";

pub(crate) struct Session<R: DocumentRenderer> {
    options: ScrapeOptions,
    renderer: R,
    temp_dir: TempDir,
    visited: VisitedSet,
    artifacts: DashMap<String, PathBuf>,
    next_file: AtomicUsize,
    stats: ScrapeStats,
}

impl<R: DocumentRenderer> Session<R> {
    /// Creates a session with a fresh temporary directory
    pub(crate) fn new(options: ScrapeOptions, renderer: R) -> std::io::Result<Self> {
        let temp_dir = tempfile::Builder::new().prefix(TEMP_DIR_PREFIX).tempdir()?;
        tracing::debug!("Writing page documents to {}", temp_dir.path().display());

        Ok(Self {
            options,
            renderer,
            temp_dir,
            visited: VisitedSet::new(),
            artifacts: DashMap::new(),
            next_file: AtomicUsize::new(1),
            stats: ScrapeStats::new(),
        })
    }

    pub(crate) fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub(crate) fn stats(&self) -> &ScrapeStats {
        &self.stats
    }

    /// Artifacts produced so far, in no particular order
    pub(crate) fn artifacts(&self) -> Vec<Artifact> {
        self.artifacts
            .iter()
            .map(|entry| Artifact::new(entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Turns a response into the text that gets rendered
    fn payload(&self, page: &FetchedPage) -> String {
        let body = page.text();
        if !self.options.strip() {
            return body;
        }

        let text = extract_text(&parse_document(&body));
        if self.options.clean() {
            clean_lines(&text)
        } else {
            text
        }
    }
}

impl<R: DocumentRenderer + 'static> PageHandler for Session<R> {
    fn on_page(&self, page: &FetchedPage) {
        self.stats.record_fetched();

        let url = page.url.as_str();
        if !self.visited.mark(url) {
            tracing::debug!("Already rendered {}", url);
            self.stats.record_duplicate();
            return;
        }

        let text = self.payload(page);

        let n = self.next_file.fetch_add(1, Ordering::Relaxed);
        let path = self.temp_dir.path().join(format!("page-{}.pdf", n));

        if let Err(e) = self.renderer.render(&text, &path) {
            tracing::warn!("Failed to create PDF for {}: {}", url, e);
            self.stats.record_render_failure();
            if path.exists() {
                if let Err(e) = std::fs::remove_file(&path) {
                    tracing::warn!("Failed to remove partial PDF {}: {}", path.display(), e);
                }
            }
            return;
        }

        self.artifacts.insert(url.to_string(), path);
        tracing::info!("Created PDF for {}", url);
    }

    fn on_error(&self, error: &FetchError) {
        tracing::warn!("Failed to fetch {}", error);
        self.stats.record_fetch_error();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RenderError;
    use std::sync::{Arc, Mutex};
    use std::thread;
    use url::Url;

    /// Records payloads and writes them as plain files
    #[derive(Default)]
    struct RecordingRenderer {
        payloads: Mutex<Vec<String>>,
        fail: bool,
    }

    impl DocumentRenderer for RecordingRenderer {
        fn render(&self, text: &str, path: &Path) -> Result<(), RenderError> {
            std::fs::write(path, text)?;
            if self.fail {
                return Err(RenderError::Pdf("forced failure".to_string()));
            }
            self.payloads.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn page(url: &str, body: &[u8]) -> FetchedPage {
        FetchedPage {
            url: Url::parse(url).unwrap(),
            status_code: 200,
            content_type: Some("text/html".to_string()),
            body: body.to_vec(),
        }
    }

    fn session(strip: bool, clean: bool) -> Session<RecordingRenderer> {
        Session::new(ScrapeOptions::new(strip, clean), RecordingRenderer::default()).unwrap()
    }

    #[test]
    fn test_raw_mode_renders_body() {
        let session = session(false, false);
        session.on_page(&page("https://example.com/", b"<p>Hi</p>"));

        assert_eq!(*session.renderer.payloads.lock().unwrap(), vec!["<p>Hi</p>"]);
        let artifacts = session.artifacts();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].url, "https://example.com/");
        assert!(artifacts[0].path.starts_with(session.temp_path()));
    }

    #[test]
    fn test_strip_mode_extracts_text() {
        let session = session(true, false);
        session.on_page(&page("https://example.com/", b"<h1>T</h1><p>C</p>"));

        assert_eq!(*session.renderer.payloads.lock().unwrap(), vec!["T\n\nC\n\n"]);
    }

    #[test]
    fn test_clean_mode_drops_short_lines() {
        let session = session(true, true);
        session.on_page(&page(
            "https://example.com/",
            b"<h1>Menu</h1><p>This line has enough words.</p>",
        ));

        let payloads = session.renderer.payloads.lock().unwrap();
        assert!(!payloads[0].contains("Menu"));
        assert!(payloads[0].contains("This line has enough words."));
    }

    #[test]
    fn test_declared_charset_page_is_rendered() {
        let session = session(true, false);
        let mut latin1 = page("https://example.com/", b"<p>Caf\xe9 cr\xe8me is served daily</p>");
        latin1.content_type = Some("text/html; charset=iso-8859-1".to_string());
        session.on_page(&latin1);

        assert_eq!(session.artifacts().len(), 1);
        assert_eq!(
            *session.renderer.payloads.lock().unwrap(),
            vec!["Caf\u{e9} cr\u{e8}me is served daily\n\n"]
        );
    }

    #[test]
    fn test_invalid_utf8_page_is_still_rendered() {
        let session = session(true, false);
        session.on_page(&page("https://example.com/", b"<p>Caf\xe9 au lait</p>"));

        assert_eq!(session.artifacts().len(), 1);
        assert_eq!(
            *session.renderer.payloads.lock().unwrap(),
            vec!["Caf\u{FFFD} au lait\n\n"]
        );
    }

    #[test]
    fn test_render_failure_removes_partial_file() {
        let session = Session::new(
            ScrapeOptions::default(),
            RecordingRenderer {
                fail: true,
                ..RecordingRenderer::default()
            },
        )
        .unwrap();
        session.on_page(&page("https://example.com/", b"<p>Hi</p>"));

        assert!(session.artifacts().is_empty());
        assert_eq!(session.stats().render_failures(), 1);
        assert_eq!(std::fs::read_dir(session.temp_path()).unwrap().count(), 0);
    }

    #[test]
    fn test_same_url_rendered_once() {
        let session = session(false, false);
        session.on_page(&page("https://example.com/a", b"first"));
        session.on_page(&page("https://example.com/a", b"second"));

        assert_eq!(session.artifacts().len(), 1);
        assert_eq!(session.stats().pages_fetched(), 2);
        assert_eq!(session.stats().duplicates(), 1);
    }

    #[test]
    fn test_concurrent_same_url_records_one_artifact() {
        let session = Arc::new(session(false, false));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let session = Arc::clone(&session);
                thread::spawn(move || {
                    session.on_page(&page("https://example.com/contested", b"body"));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(session.artifacts().len(), 1);
        assert_eq!(session.renderer.payloads.lock().unwrap().len(), 1);
        assert_eq!(session.stats().duplicates(), 7);
    }

    #[test]
    fn test_temp_dir_removed_on_drop() {
        let session = session(false, false);
        let temp = session.temp_path().to_path_buf();
        assert!(temp.exists());
        drop(session);
        assert!(!temp.exists());
    }

    #[test]
    fn test_fetch_error_counted() {
        let session = session(false, false);
        session.on_error(&FetchError::Status {
            url: "https://example.com/missing".to_string(),
            status_code: 404,
        });
        assert_eq!(session.stats().fetch_errors(), 1);
    }
}
