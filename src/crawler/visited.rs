//! At-most-once bookkeeping keyed by URL

use dashmap::DashSet;
use std::sync::Arc;

/// A concurrent set of URL keys with an atomic test-and-set
///
/// Clones share the same underlying set, so one `VisitedSet` can be handed to
/// every worker of a crawl.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    inner: Arc<DashSet<String>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `key` and returns true if this call was the first to do so
    ///
    /// # Examples
    ///
    /// ```
    /// use scrapedf::crawler::VisitedSet;
    ///
    /// let visited = VisitedSet::new();
    /// assert!(visited.mark("https://example.com/"));
    /// assert!(!visited.mark("https://example.com/"));
    /// ```
    pub fn mark(&self, key: &str) -> bool {
        self.inner.insert(key.to_string())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_mark_once() {
        let visited = VisitedSet::new();
        assert!(visited.is_empty());
        assert!(visited.mark("a"));
        assert!(!visited.mark("a"));
        assert!(visited.mark("b"));
        assert!(!visited.mark("b"));
        assert_eq!(visited.len(), 2);
    }

    #[test]
    fn test_clones_share_state() {
        let visited = VisitedSet::new();
        let other = visited.clone();
        assert!(visited.mark("shared"));
        assert!(!other.mark("shared"));
    }

    #[test]
    fn test_concurrent_mark_single_winner() {
        let visited = VisitedSet::new();
        let winners = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let visited = visited.clone();
                let winners = Arc::clone(&winners);
                thread::spawn(move || {
                    if visited.mark("https://example.com/contested") {
                        winners.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(winners.load(Ordering::SeqCst), 1);
    }
}
