//! Shared pagination driver for history endpoints.
//!
//! Venues page their history either by record id (pass the last seen id to
//! get the next slice) or by time window (query `[start, end)` and advance
//! the window). Both styles run through one sequential loop, [`Paginator`],
//! which owns the concerns every paged fetch shares: accumulation, boundary
//! de-duplication, an item limit, a hard iteration bound against endpoints
//! that never report exhaustion, and cooperative cancellation between pages.

use std::collections::HashSet;
use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::Result;
use crate::types::Timestamp;

/// Iteration ceiling applied when the caller does not set one.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Which way a time-window cursor walks through history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorDirection {
    /// Oldest slice first, advancing toward the present.
    #[default]
    Forward,
    /// Newest slice first, stepping back into history.
    Backward,
}

/// A half-open `[start, end)` range walked in fixed steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    /// Inclusive lower bound of the full range, epoch milliseconds.
    pub start: Timestamp,
    /// Exclusive upper bound of the full range, epoch milliseconds.
    pub end: Timestamp,
    /// Step size in milliseconds; the venue's per-query range cap.
    pub step: i64,
    /// Walk direction.
    pub direction: CursorDirection,
}

impl TimeWindow {
    /// Window walked oldest-first.
    pub fn forward(start: Timestamp, end: Timestamp, step: i64) -> Self {
        Self {
            start,
            end,
            step: step.max(1),
            direction: CursorDirection::Forward,
        }
    }

    /// Window walked newest-first.
    pub fn backward(start: Timestamp, end: Timestamp, step: i64) -> Self {
        Self {
            start,
            end,
            step: step.max(1),
            direction: CursorDirection::Backward,
        }
    }

    /// The slice to query right now, as `[start, end)`.
    pub fn current(&self) -> (Timestamp, Timestamp) {
        match self.direction {
            CursorDirection::Forward => (self.start, self.end.min(self.start + self.step)),
            CursorDirection::Backward => (self.start.max(self.end - self.step), self.end),
        }
    }

    /// Advances past the current slice; `None` once the range is covered.
    pub fn advance(self) -> Option<Self> {
        let (slice_start, slice_end) = self.current();
        let next = match self.direction {
            CursorDirection::Forward => Self {
                start: slice_end,
                ..self
            },
            CursorDirection::Backward => Self {
                end: slice_start,
                ..self
            },
        };
        if next.start >= next.end {
            None
        } else {
            Some(next)
        }
    }
}

/// Continuation state handed to the page-fetch closure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCursor {
    /// First page of an id-walked listing.
    Begin,
    /// Resume after this record id.
    AfterId(String),
    /// Fetch this time slice.
    Window(TimeWindow),
}

/// One fetched page: its items plus where to continue, if anywhere.
#[derive(Debug)]
pub struct Page<T> {
    /// Items in venue order.
    pub items: Vec<T>,
    /// Cursor for the next page; `None` ends the walk.
    pub next: Option<PageCursor>,
}

impl<T> Page<T> {
    /// Terminal page.
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }
}

/// Sequential pagination loop with limit, iteration bound, and cancellation.
#[derive(Debug, Clone)]
pub struct Paginator {
    max_iterations: usize,
    limit: Option<usize>,
    cancel: CancellationToken,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new()
    }
}

impl Paginator {
    /// Paginator with the default iteration bound and no item limit.
    pub fn new() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            limit: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Stops accumulating once `limit` items are collected.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Overrides the iteration ceiling.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    /// Checks `token` between pages; a cancelled token ends the walk with
    /// whatever was collected so far.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Drives `fetch` from `start` until exhaustion, the item limit, the
    /// iteration bound, or cancellation.
    ///
    /// `key` extracts a de-duplication id; items whose id was already seen
    /// are dropped (venues repeat records on slice boundaries), items
    /// without an id are always kept. Arrival order is preserved.
    pub async fn collect<T, K, F, Fut>(
        &self,
        start: PageCursor,
        mut key: K,
        mut fetch: F,
    ) -> Result<Vec<T>>
    where
        K: FnMut(&T) -> Option<String>,
        F: FnMut(PageCursor) -> Fut,
        Fut: Future<Output = Result<Page<T>>>,
    {
        let mut collected = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut cursor = start;

        for iteration in 0..self.max_iterations {
            if self.cancel.is_cancelled() {
                debug!(pages = iteration, "pagination cancelled");
                return Ok(collected);
            }

            let page = fetch(cursor).await?;
            debug!(page = iteration, items = page.items.len(), "fetched page");

            for item in page.items {
                if let Some(id) = key(&item) {
                    if !seen.insert(id) {
                        continue;
                    }
                }
                collected.push(item);
                if let Some(limit) = self.limit {
                    if collected.len() >= limit {
                        return Ok(collected);
                    }
                }
            }

            match page.next {
                Some(next) => cursor = next,
                None => return Ok(collected),
            }
        }

        warn!(
            max_iterations = self.max_iterations,
            items = collected.len(),
            "pagination stopped at iteration bound"
        );
        Ok(collected)
    }
}
