// src/progress.rs
/// Lightweight progress reporting used by long-running operations.
/// Frontends implement this to surface scrape status to users.
pub trait Progress {
    /// Called at the start with the number of regions to scrape.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one region's dataset has been written out.
    fn region_done(&mut self, _region: &str, _location: &str) {}

    /// Called when one region failed; the run continues without it.
    fn region_failed(&mut self, _region: &str, _msg: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
