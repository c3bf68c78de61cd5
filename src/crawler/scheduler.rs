//! Crawl frontier: which discovered links get queued
//!
//! This module handles:
//! - Restricting the crawl to the start page's host
//! - Queuing each distinct URL at most once per crawl
//! - Global concurrency limiting via a semaphore

use super::visited::VisitedSet;
use crate::url::is_same_host;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use url::Url;

/// Frontier for one crawl
///
/// Links are admitted when they are on the crawl host and have never been
/// queued before. Admission is atomic per URL, so the same link discovered
/// by two pages at once is queued only once.
#[derive(Debug)]
pub struct Scheduler {
    /// Host every queued URL must be on
    host: String,

    /// URLs that have ever been queued (fetched, in flight, or waiting)
    queued: VisitedSet,

    /// Global semaphore for limiting concurrent fetches
    global_semaphore: Arc<Semaphore>,
}

impl Scheduler {
    /// Creates a scheduler for `host` allowing `max_concurrent` fetches at once
    pub fn new(host: impl Into<String>, max_concurrent: usize) -> Self {
        Self {
            host: host.into(),
            queued: VisitedSet::new(),
            global_semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Queues the start URL; returns false if it was already queued
    pub fn seed(&self, url: &Url) -> bool {
        self.queued.mark(url.as_str())
    }

    /// Filters discovered links down to those that should be fetched next
    pub fn admit(&self, links: impl IntoIterator<Item = Url>) -> Vec<Url> {
        links
            .into_iter()
            .filter(|link| {
                if !is_same_host(link, &self.host) {
                    tracing::debug!("Skipping off-host link {}", link);
                    return false;
                }
                if !self.queued.mark(link.as_str()) {
                    tracing::trace!("Skipping already queued link {}", link);
                    return false;
                }
                true
            })
            .collect()
    }

    /// Waits for a free fetch slot
    ///
    /// Returns None only if the semaphore was closed.
    pub async fn acquire(&self) -> Option<OwnedSemaphorePermit> {
        self.global_semaphore.clone().acquire_owned().await.ok()
    }

    /// Number of distinct URLs queued so far
    pub fn queued_count(&self) -> usize {
        self.queued.len()
    }
}
