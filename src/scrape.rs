// src/scrape.rs
//! Orchestration: wait for the table, parse it, augment it.
//!
//! The portal builds the attendance table client-side, so a snapshot taken
//! too early simply lacks it. `collect` gates everything behind a
//! `ReadySignal` over whatever `MutationFeed` the caller provides: the CLI
//! uses `RefetchFeed` (periodic re-GET), tests use a channel of canned
//! snapshots.

use std::thread;
use std::time::Duration;

use thiserror::Error;

use crate::adapters::{self, PageAdapter};
use crate::core::net;
use crate::progress::Progress;
use crate::ready::{FeedError, MutationFeed, ReadyError, ReadySignal};
use crate::table::{self, Augmented};

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("page does not match any known layout")]
    UnknownLayout,
    #[error("{0} not found in the page")]
    MissingTarget(&'static str),
    #[error("unexpected header layout on {0} page, refusing to augment")]
    HeaderMismatch(&'static str),
    #[error(transparent)]
    NotReady(#[from] ReadyError),
}

/// Wait until some adapter recognizes the document and can locate its table.
/// Returns the adapter plus the snapshot the table was first seen in.
pub fn await_table<F>(
    feed: &mut F,
    timeout: Duration,
) -> Result<(&'static dyn PageAdapter, String), ScrapeError>
where
    F: MutationFeed + ?Sized,
{
    let chosen = std::cell::Cell::new(None);
    let mut signal = ReadySignal::new();
    let doc = signal.wait_for(
        |doc| {
            let adapter = adapters::detect(doc)?;
            adapter.locate_table(doc)?;
            chosen.set(Some(adapter));
            Some(doc.to_string())
        },
        feed,
        timeout,
    )?;
    let adapter = chosen.get().ok_or(ScrapeError::UnknownLayout)?;
    Ok((adapter, doc))
}

/// Full pass over a feed: wait, parse, augment. The subject-name map comes
/// back inside `Augmented`; nothing is stashed in shared state.
pub fn collect<F>(
    feed: &mut F,
    timeout: Duration,
    progress: Option<&mut dyn Progress>,
) -> Result<Augmented, ScrapeError>
where
    F: MutationFeed + ?Sized,
{
    let (adapter, doc) = await_table(feed, timeout)?;
    augment_snapshot(&doc, adapter, progress)
}

/// Augment a saved page. A static snapshot has nothing to wait for: the
/// table is either present or the page is simply not an attendance page,
/// and the error says which.
pub fn collect_static(
    doc: &str,
    progress: Option<&mut dyn Progress>,
) -> Result<Augmented, ScrapeError> {
    let adapter = adapters::detect(doc).ok_or(ScrapeError::UnknownLayout)?;
    adapter
        .locate_table(doc)
        .ok_or(ScrapeError::MissingTarget("attendance table"))?;
    augment_snapshot(doc, adapter, progress)
}

fn augment_snapshot(
    doc: &str,
    adapter: &'static dyn PageAdapter,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Augmented, ScrapeError> {
    logf!("Layout detected: {}", adapter.label());
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Found attendance table ({} layout)", adapter.label()));
    }

    let parsed = table::parse(doc, adapter)?;
    if let Some(p) = progress.as_deref_mut() {
        p.begin(parsed.rows.len());
    }

    let aug = table::augment(&parsed, adapter)?;

    if let Some(p) = progress.as_deref_mut() {
        let code_col = adapter.columns().code;
        for (row, margin) in aug.rows.iter().zip(&aug.margins) {
            let subject = row.get(code_col).map(String::as_str).unwrap_or("?");
            p.row_done(subject, *margin);
        }
        p.finish();
    }

    Ok(aug)
}

/// Feed that re-fetches the page on a fixed pause. Stands in for a mutation
/// observer when all we have is HTTP: each refetch is one "batch".
pub struct RefetchFeed {
    host: String,
    port: u16,
    path: String,
    pause: Duration,
    current: String,
}

impl RefetchFeed {
    /// Fetches the initial snapshot eagerly so `snapshot()` has something
    /// to probe before any batch arrives.
    pub fn open(host: &str, port: u16, path: &str, pause: Duration)
        -> Result<Self, Box<dyn std::error::Error>>
    {
        let current = net::http_get(host, port, path)?;
        Ok(Self {
            host: s!(host),
            port,
            path: s!(path),
            pause,
            current,
        })
    }
}

impl MutationFeed for RefetchFeed {
    fn snapshot(&self) -> &str {
        &self.current
    }

    fn next_batch(&mut self, timeout: Duration) -> Result<&str, FeedError> {
        if timeout < self.pause {
            thread::sleep(timeout);
            return Err(FeedError::TimedOut);
        }
        thread::sleep(self.pause);
        match net::http_get(&self.host, self.port, &self.path) {
            Ok(doc) => {
                self.current = doc;
                Ok(&self.current)
            }
            Err(e) => {
                loge!("Refetch failed: {e}");
                Err(FeedError::Closed)
            }
        }
    }
}
