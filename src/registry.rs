//! Declared samples and their accumulated alignment rows.
//!
//! The registry is built once from the ID section of the arguments file and
//! fixes the row order of the PHYLIP output and both axes of the
//! co-occurrence matrix. After every retained batch all rows have the same
//! length.

use rustc_hash::FxHashMap;

use crate::locus::Batch;

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

const ID_KEYWORD: &str = "id";
/// Shortest ID line, counting its line terminator.
const MIN_ID_LINE_LEN: usize = 2;

/// Gap character of the locus input.
pub const GAP: char = '-';
/// Ambiguous base used for gaps and for samples absent from a locus.
pub const FILLER: char = 'N';

/// Insertion-ordered sample identifiers with their growing sequences.
#[derive(Debug, Clone, Default)]
pub struct SampleRegistry {
    ids: Vec<String>,
    sequences: Vec<String>,
    positions: FxHashMap<String, usize>,
}

impl SampleRegistry {
    /// Creates a registry with an empty sequence for each identifier.
    ///
    /// A repeated identifier keeps the position of its first declaration.
    #[must_use]
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::default();
        for id in ids {
            let id = id.into();
            if registry.positions.contains_key(&id) {
                #[cfg(feature = "tracing")]
                warn!(id = %id, "Duplicate sample identifier; keeping first position");
                continue;
            }
            registry.positions.insert(id.clone(), registry.ids.len());
            registry.ids.push(id);
            registry.sequences.push(String::new());
        }
        registry
    }

    /// Builds the registry from the ID section of an arguments file.
    #[must_use]
    pub fn from_config(text: &str) -> Self {
        let registry = Self::new(parse_id_section(text));

        #[cfg(feature = "tracing")]
        debug!(samples = registry.len(), "Parsed sample ID section");

        registry
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Sample identifiers in declaration order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Row/column index of `id`, if declared.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Accumulated sequence of `id`, if declared.
    #[must_use]
    pub fn sequence(&self, id: &str) -> Option<&str> {
        self.position(id).map(|i| self.sequences[i].as_str())
    }

    /// Shared length of every accumulated sequence.
    #[must_use]
    pub fn alignment_length(&self) -> usize {
        self.sequences.first().map_or(0, String::len)
    }

    /// Iterates over `(id, sequence)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.ids
            .iter()
            .zip(&self.sequences)
            .map(|(id, seq)| (id.as_str(), seq.as_str()))
    }

    /// Appends a retained batch to every row.
    ///
    /// Declared samples present in the batch get their sequence with gaps
    /// replaced by [`FILLER`]; every other declared sample gets a run of
    /// [`FILLER`] as long as the batch's locus width. Batch samples that were
    /// never declared are ignored.
    ///
    /// All sequences of a batch are expected to share one width. Returns the
    /// width appended, or `None` for an empty batch.
    pub fn append_batch(&mut self, batch: &Batch) -> Option<usize> {
        let width = batch.locus_width()?;
        let mut present = vec![false; self.len()];

        for (id, sequence) in batch.iter() {
            let Some(position) = self.position(id) else {
                continue;
            };

            #[cfg(feature = "tracing")]
            {
                if sequence.len() != width {
                    warn!(
                        id = %id,
                        expected = width,
                        found = sequence.len(),
                        "Sequence length differs from locus width"
                    );
                }
            }

            self.sequences[position].extend(
                sequence
                    .chars()
                    .map(|base| if base == GAP { FILLER } else { base }),
            );
            present[position] = true;
        }

        for (sequence, present) in self.sequences.iter_mut().zip(present) {
            if !present {
                sequence.extend(std::iter::repeat(FILLER).take(width));
            }
        }

        Some(width)
    }
}

/// Reads sample identifiers from the ID section of an arguments file.
///
/// Lines are ignored up to and including the first one containing "id" (any
/// case). Each following line is an identifier, with trailing whitespace
/// removed, until the first line shorter than two characters counting its
/// line terminator. A single-character ID followed by a newline is therefore
/// kept, while an empty line, a whitespace-only line, or a lone character on
/// an unterminated last line ends the section.
#[must_use]
pub fn parse_id_section(text: &str) -> Vec<&str> {
    let mut lines = text.split_inclusive('\n');
    if !lines
        .by_ref()
        .any(|line| line.to_lowercase().contains(ID_KEYWORD))
    {
        #[cfg(feature = "tracing")]
        warn!("No sample ID section found");
        return Vec::new();
    }

    lines
        .take_while(|line| line.chars().count() >= MIN_ID_LINE_LEN)
        .map(str::trim_end)
        .take_while(|id| !id.is_empty())
        .collect()
}
