//! Streaming reader for `.loci` files.
//!
//! A `.loci` file lists, for each locus, one line per sample followed by a
//! terminator line starting with `//`:
//!
//! ```text
//! A10     ACGT-ACGTA
//! B10     ACGTTACGTA
//! //          -     *  |1|
//! ```
//!
//! The first whitespace-separated token of a sample line is its identifier
//! and the last one its aligned sequence; any fields in between are ignored.
//!
//! # Example
//!
//! ```rust
//! use lociphy::locus::LocusStreamReader;
//!
//! let text = "A10  ACGT\nB10  AC-T\n//\nA10  GG\n";
//! let batches: Vec<_> = LocusStreamReader::new(text.as_bytes())
//!     .collect::<Result<_, _>>()?;
//!
//! // The trailing batch has no terminator and is dropped.
//! assert_eq!(batches.len(), 1);
//! assert_eq!(batches[0].locus_width(), Some(4));
//! # Ok::<(), lociphy::error::LociError>(())
//! ```

use std::{
    io::BufRead,
    path::{Path, PathBuf},
};

use rustc_hash::FxHashSet;

use crate::error::LociError;

#[cfg(feature = "tracing")]
use tracing::{trace, warn};

/// Prefix of the line closing each locus.
pub const TERMINATOR: &str = "//";

/// The samples of one locus, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    entries: Vec<(String, String)>,
}

impl Batch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sample sequence. A repeated identifier replaces the earlier
    /// sequence in place.
    pub fn insert<I, S>(&mut self, id: I, sequence: S)
    where
        I: Into<String>,
        S: Into<String>,
    {
        let id = id.into();
        let sequence = sequence.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, slot)) => *slot = sequence,
            None => self.entries.push((id, sequence)),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The set of sample identifiers in this batch.
    #[must_use]
    pub fn ids(&self) -> FxHashSet<&str> {
        self.entries.iter().map(|(id, _)| id.as_str()).collect()
    }

    /// Iterates over `(id, sequence)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(id, seq)| (id.as_str(), seq.as_str()))
    }

    /// Length of the first sequence, shared by all sequences of a
    /// well-formed locus. `None` for an empty batch.
    #[must_use]
    pub fn locus_width(&self) -> Option<usize> {
        self.entries.first().map(|(_, seq)| seq.len())
    }
}

/// Splits a sample line into its identifier and sequence.
///
/// Returns `None` if the line has fewer than two whitespace-separated fields.
#[must_use]
pub fn parse_locus_line(line: &str) -> Option<(&str, &str)> {
    let mut fields = line.split_whitespace();
    let id = fields.next()?;
    let sequence = fields.last()?;
    Some((id, sequence))
}

/// Iterator over the terminated batches of a `.loci` stream.
///
/// Lines are read one at a time; only the batch under construction is held
/// in memory. Blank lines are skipped. A final batch without a terminator
/// line is dropped.
pub struct LocusStreamReader<R> {
    reader: R,
    origin: PathBuf,
    line: String,
    line_number: usize,
    batch: Batch,
    finished: bool,
}

impl<R: BufRead> LocusStreamReader<R> {
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            origin: PathBuf::from("-"),
            line: String::new(),
            line_number: 0,
            batch: Batch::new(),
            finished: false,
        }
    }

    /// Sets the path reported in read errors.
    #[must_use]
    pub fn with_origin<P: AsRef<Path>>(mut self, origin: P) -> Self {
        self.origin = origin.as_ref().to_path_buf();
        self
    }

    fn read_batch(&mut self) -> Result<Option<Batch>, LociError> {
        loop {
            self.line.clear();
            let read = self
                .reader
                .read_line(&mut self.line)
                .map_err(|source| LociError::LocusRead {
                    source,
                    path: self.origin.clone(),
                })?;

            if read == 0 {
                if !self.batch.is_empty() {
                    #[cfg(feature = "tracing")]
                    warn!(
                        samples = self.batch.len(),
                        line = self.line_number,
                        "Dropping final locus without a terminator line"
                    );
                    self.batch = Batch::new();
                }
                return Ok(None);
            }
            self.line_number += 1;

            let line = self.line.trim_end_matches(['\n', '\r']);
            if line.starts_with(TERMINATOR) {
                let batch = std::mem::take(&mut self.batch);

                #[cfg(feature = "tracing")]
                trace!(samples = batch.len(), line = self.line_number, "Read locus");

                return Ok(Some(batch));
            }
            if line.trim().is_empty() {
                continue;
            }

            let (id, sequence) =
                parse_locus_line(line).ok_or_else(|| LociError::MalformedLocusLine {
                    line_number: self.line_number,
                    line: line.to_string(),
                })?;
            self.batch.insert(id, sequence);
        }
    }
}

impl<R: BufRead> Iterator for LocusStreamReader<R> {
    type Item = Result<Batch, LociError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_batch() {
            Ok(Some(batch)) => Some(Ok(batch)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(text: &str) -> Result<Vec<Batch>, LociError> {
        LocusStreamReader::new(text.as_bytes()).collect()
    }

    #[test]
    fn parse_line_takes_first_and_last_fields() {
        assert_eq!(
            parse_locus_line("A10   12  x   ACGT"),
            Some(("A10", "ACGT"))
        );
        assert_eq!(parse_locus_line("A10\tAC-T"), Some(("A10", "AC-T")));
    }

    #[test]
    fn parse_line_needs_two_fields() {
        assert_eq!(parse_locus_line("A10"), None);
        assert_eq!(parse_locus_line("   "), None);
    }

    #[test]
    fn batches_split_on_terminator() {
        let batches = read_all("A  AC\nB  GT\n//  |1|\nC  TTT\n//\n").unwrap();
        assert_eq!(batches.len(), 2);
        assert_eq!(
            batches[0].iter().collect::<Vec<_>>(),
            vec![("A", "AC"), ("B", "GT")]
        );
        assert_eq!(batches[1].locus_width(), Some(3));
    }

    #[test]
    fn trailing_unterminated_batch_is_dropped() {
        let batches = read_all("A  AC\n//\nB  GT\n").unwrap();
        assert_eq!(batches.len(), 1);
        assert!(!batches[0].ids().contains("B"));
    }

    #[cfg(feature = "tracing")]
    #[test]
    #[tracing_test::traced_test]
    fn dropped_batch_is_logged() {
        let batches = read_all("A  AC\n//\nB  GT\n").unwrap();
        assert_eq!(batches.len(), 1);
        assert!(logs_contain("Dropping final locus"));
    }

    #[test]
    fn consecutive_terminators_yield_empty_batch() {
        let batches = read_all("//\n//\n").unwrap();
        assert_eq!(batches.len(), 2);
        assert!(batches.iter().all(Batch::is_empty));
    }

    #[test]
    fn crlf_and_blank_lines() {
        let batches = read_all("A  AC\r\n\r\nB  GT\r\n//\r\n").unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 2);
    }

    #[test]
    fn malformed_line_is_fatal() {
        let err = read_all("A  AC\nB\n//\n").unwrap_err();
        assert!(matches!(
            err,
            LociError::MalformedLocusLine { line_number: 2, .. }
        ));
    }

    #[test]
    fn repeated_id_in_batch_replaces_sequence() {
        let mut batch = Batch::new();
        batch.insert("A", "AAAA");
        batch.insert("B", "CCCC");
        batch.insert("A", "GGGG");
        assert_eq!(
            batch.iter().collect::<Vec<_>>(),
            vec![("A", "GGGG"), ("B", "CCCC")]
        );
    }

    #[test]
    fn ids_collects_identifier_set() {
        let mut batch = Batch::new();
        batch.insert("A", "AC");
        batch.insert("B", "GT");
        let ids = batch.ids();
        assert!(ids.contains("A"));
        assert!(ids.contains("B"));
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn invalid_utf8_reports_origin() {
        let bytes: &[u8] = b"A  AC\n\xff\xfe  GT\n//\n";
        let err = LocusStreamReader::new(bytes)
            .with_origin("broken.loci")
            .collect::<Result<Vec<_>, _>>()
            .unwrap_err();
        match err {
            LociError::LocusRead { path, .. } => assert_eq!(path, PathBuf::from("broken.loci")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
