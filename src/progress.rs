//! Progress tracking for locus extraction.
//!
//! A [`Progress`] snapshot is handed to the caller's callback after every
//! finalized locus, so long runs over large `.loci` files can report how far
//! they have come.
//!
//! # Example
//!
//! ```rust,no_run
//! use lociphy::input::Input;
//! use lociphy::locus::LocusStreamReader;
//! use lociphy::run::Pipeline;
//!
//! let mut pipeline = Pipeline::from_config_file("params.txt")?;
//! let input = Input::File("run1.loci".into());
//! let reader = LocusStreamReader::new(input.open()?);
//!
//! pipeline.process_stream_with_progress(reader, |progress| {
//!     if progress.batches_processed % 10_000 == 0 {
//!         eprintln!(
//!             "{} loci read, {} retained",
//!             progress.batches_processed, progress.batches_retained
//!         );
//!     }
//! })?;
//! # Ok::<(), lociphy::error::LociError>(())
//! ```

/// Progress snapshot during extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    /// Number of terminated loci read so far.
    pub batches_processed: u64,
    /// Number of those loci that matched a rule.
    pub batches_retained: u64,
    /// Current length of every accumulated sequence.
    pub alignment_length: u64,
}

impl Progress {
    /// Creates a progress record with zero counts.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            batches_processed: 0,
            batches_retained: 0,
            alignment_length: 0,
        }
    }

    /// Record one finalized locus. `appended` is the width added to the
    /// alignment, or `None` if the locus was discarded.
    pub fn record_batch(&mut self, appended: Option<usize>) {
        self.batches_processed += 1;
        if let Some(width) = appended {
            self.batches_retained += 1;
            self.alignment_length += width as u64;
        }
    }

    /// Number of loci that matched no rule.
    #[must_use]
    pub const fn batches_discarded(&self) -> u64 {
        self.batches_processed - self.batches_retained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_starts_at_zero() {
        let progress = Progress::new();
        assert_eq!(progress, Progress::default());
        assert_eq!(progress.batches_discarded(), 0);
    }

    #[test]
    fn progress_records_batches() {
        let mut progress = Progress::new();
        progress.record_batch(Some(100));
        progress.record_batch(None);
        progress.record_batch(Some(50));

        assert_eq!(progress.batches_processed, 3);
        assert_eq!(progress.batches_retained, 2);
        assert_eq!(progress.batches_discarded(), 1);
        assert_eq!(progress.alignment_length, 150);
    }
}
