//! Sample co-occurrence counts.
//!
//! Cell `(i, j)` counts the retained loci that contain both the `i`-th and
//! the `j`-th declared sample. The matrix is symmetric and its diagonal stays
//! zero.

use crate::registry::SampleRegistry;

/// Square co-occurrence matrix indexed by registry position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CooccurrenceMatrix {
    size: usize,
    counts: Vec<u32>,
}

impl CooccurrenceMatrix {
    /// Allocates a zeroed `size × size` matrix.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            counts: vec![0; size * size],
        }
    }

    /// Number of rows (and columns).
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Count at `(row, column)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> u32 {
        assert!(column < self.size, "column {column} out of bounds");
        self.counts[row * self.size + column]
    }

    /// Counts of one row.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[must_use]
    pub fn row(&self, row: usize) -> &[u32] {
        &self.counts[row * self.size..(row + 1) * self.size]
    }

    /// Iterates over rows in registry order.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        // `max(1)` keeps `chunks_exact` valid for an empty matrix.
        self.counts.chunks_exact(self.size.max(1))
    }

    /// Records one retained locus.
    ///
    /// Every ordered pair of distinct declared samples among `batch_ids` gets
    /// one more co-occurrence. Undeclared identifiers are ignored. Returns the
    /// number of cells incremented, `k · (k − 1)` for `k` declared samples.
    pub fn record<'a, I>(&mut self, batch_ids: I, registry: &SampleRegistry) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut positions: Vec<usize> = batch_ids
            .into_iter()
            .filter_map(|id| registry.position(id))
            .collect();
        positions.sort_unstable();
        positions.dedup();

        let mut incremented = 0;
        for &a in &positions {
            for &b in &positions {
                if a != b {
                    self.counts[a * self.size + b] += 1;
                    incremented += 1;
                }
            }
        }
        incremented
    }
}
