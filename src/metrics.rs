use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Operational counters for monitoring
#[derive(Clone)]
pub struct Metrics {
    pub books_created: Arc<AtomicUsize>,
    pub borrows_created: Arc<AtomicUsize>,
    pub borrows_rejected: Arc<AtomicUsize>,
    pub returns_completed: Arc<AtomicUsize>,
    pub tokens_issued: Arc<AtomicUsize>,
    pub start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            books_created: Arc::new(AtomicUsize::new(0)),
            borrows_created: Arc::new(AtomicUsize::new(0)),
            borrows_rejected: Arc::new(AtomicUsize::new(0)),
            returns_completed: Arc::new(AtomicUsize::new(0)),
            tokens_issued: Arc::new(AtomicUsize::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_books_created(&self) {
        self.books_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_borrows_created(&self) {
        self.borrows_created.fetch_add(1, Ordering::Relaxed);
    }

    /// Borrow attempts rejected because no copies were left.
    pub fn inc_borrows_rejected(&self) {
        self.borrows_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_returns_completed(&self) {
        self.returns_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_tokens_issued(&self) {
        self.tokens_issued.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            books_created: self.books_created.load(Ordering::Relaxed),
            borrows_created: self.borrows_created.load(Ordering::Relaxed),
            borrows_rejected: self.borrows_rejected.load(Ordering::Relaxed),
            returns_completed: self.returns_completed.load(Ordering::Relaxed),
            tokens_issued: self.tokens_issued.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
pub struct MetricsSnapshot {
    pub books_created: usize,
    pub borrows_created: usize,
    pub borrows_rejected: usize,
    pub returns_completed: usize,
    pub tokens_issued: usize,
    pub uptime_seconds: u64,
}
