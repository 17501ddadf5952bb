// src/ready.rs
//! One-shot readiness signal for a dynamically changing document.
//!
//! The portal renders the attendance table client-side, so the markup we want
//! may not be there on the first look. `ReadySignal::wait_for` checks the
//! current snapshot first and only then subscribes to a mutation feed,
//! re-probing after each batch until the matcher fires. It resolves at most
//! once; later calls hand back the cached match without touching the feed.
//!
//! The feed is a capability trait so tests can drive it with a channel and a
//! few canned snapshots instead of a live page.

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Pending,
    Resolved,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReadyError {
    /// Target never appeared. The browser original waited forever here;
    /// a bounded wait is deliberate.
    #[error("target did not appear within {0:?}")]
    Timeout(Duration),
    #[error("mutation feed closed before the target appeared")]
    FeedClosed,
}

/// Why a feed stopped delivering batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedError {
    TimedOut,
    Closed,
}

/// Source of document snapshots, one per mutation batch.
pub trait MutationFeed {
    /// Current snapshot, checked before any subscription is made.
    fn snapshot(&self) -> &str;

    /// Block until the next batch lands (returning the post-batch snapshot)
    /// or `timeout` elapses.
    fn next_batch(&mut self, timeout: Duration) -> Result<&str, FeedError>;
}

/// One-shot signal. `Pending` until the matcher first succeeds, `Resolved`
/// (terminal) after. Independent signals over the same feed do not
/// deduplicate; each probes on its own.
pub struct ReadySignal {
    state: ReadyState,
    matched: Option<String>,
}

impl ReadySignal {
    pub fn new() -> Self {
        Self { state: ReadyState::Pending, matched: None }
    }

    pub fn state(&self) -> ReadyState {
        self.state
    }

    /// Wait until `matcher` yields a fragment of the document, or fail after
    /// `timeout`. Synchronous fast path: if the matcher already succeeds on
    /// the current snapshot, no subscription is established at all.
    pub fn wait_for<M, F>(
        &mut self,
        mut matcher: M,
        feed: &mut F,
        timeout: Duration,
    ) -> Result<String, ReadyError>
    where
        M: FnMut(&str) -> Option<String>,
        F: MutationFeed + ?Sized,
    {
        if let Some(hit) = &self.matched {
            return Ok(hit.clone());
        }

        if let Some(hit) = matcher(feed.snapshot()) {
            return Ok(self.resolve(hit));
        }

        let deadline = Instant::now() + timeout;
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                return Err(ReadyError::Timeout(timeout));
            }
            match feed.next_batch(left) {
                Ok(doc) => {
                    if let Some(hit) = matcher(doc) {
                        return Ok(self.resolve(hit));
                    }
                }
                Err(FeedError::TimedOut) => return Err(ReadyError::Timeout(timeout)),
                Err(FeedError::Closed) => return Err(ReadyError::FeedClosed),
            }
        }
    }

    fn resolve(&mut self, hit: String) -> String {
        self.state = ReadyState::Resolved;
        self.matched = Some(hit.clone());
        hit
    }
}

impl Default for ReadySignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Feed backed by an mpsc channel of snapshots. The producing side stands in
/// for whatever is mutating the document (tests, a refetch loop, ...).
pub struct ChannelFeed {
    current: String,
    rx: Receiver<String>,
}

impl ChannelFeed {
    pub fn new(initial: String, rx: Receiver<String>) -> Self {
        Self { current: initial, rx }
    }
}

impl MutationFeed for ChannelFeed {
    fn snapshot(&self) -> &str {
        &self.current
    }

    fn next_batch(&mut self, timeout: Duration) -> Result<&str, FeedError> {
        match self.rx.recv_timeout(timeout) {
            Ok(doc) => {
                self.current = doc;
                Ok(&self.current)
            }
            Err(RecvTimeoutError::Timeout) => Err(FeedError::TimedOut),
            Err(RecvTimeoutError::Disconnected) => Err(FeedError::Closed),
        }
    }
}
