// src/progress.rs
/// Lightweight progress reporting for the scrape/augment run.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called once the table is in hand, with the number of data rows.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called per augmented row. `margin` is None when the row was skipped.
    fn row_done(&mut self, _subject: &str, _margin: Option<i32>) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
