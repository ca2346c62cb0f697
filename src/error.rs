//! Error types for lociphy.
//!
//! This module provides strongly-typed errors for every stage of a run:
//! argument collection, arguments-file parsing, locus streaming and output.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in lociphy operations.
#[derive(Debug, Error)]
pub enum LociError {
    /// Wrong number of command-line arguments.
    #[error(
        "missing or unexpected arguments; required arguments are:\n \
         1. loci input file,\n 2. arguments file,\n \
         3. PHYLIP output file,\n 4. matrix output file"
    )]
    ArgumentCount,

    /// A `minimum of` group definition line could not be parsed.
    #[error("malformed group definition line {line:?}: {details}; expected \"minimum of x (...)\" with x a single digit")]
    ConfigFormat { line: String, details: String },

    /// Failed to read the arguments file.
    #[error("failed to read arguments file '{path}': {source}")]
    ConfigRead {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Failed to read the locus input.
    #[error("failed to read loci input '{path}': {source}")]
    LocusRead {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// A locus line lacks the `<identifier> ... <sequence>` structure.
    #[error("malformed locus line {line_number}: {line:?}")]
    MalformedLocusLine { line_number: usize, line: String },

    /// Failed to create or write an output file.
    #[error("failed to write output '{path}': {source}")]
    OutputWrite {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
}

/// Errors from parsing the parenthesized species expression of a group line.
///
/// Columns are 0-based byte offsets into the expression text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpeciesExpressionError {
    /// The expression holds no samples at all.
    #[error("empty species list")]
    Empty,

    /// A comma with nothing before or after it.
    #[error("empty clause at column {column}")]
    EmptyClause { column: usize },

    /// An `and/or` that does not sit between two samples.
    #[error("'and/or' at column {column} is not between two samples")]
    StrayAndOr { column: usize },

    /// Two samples follow each other without `,` or `and/or`.
    #[error("expected ',' or 'and/or' before '{sample}' at column {column}")]
    MissingSeparator { sample: String, column: usize },

    /// A parenthesis inside a sample name.
    #[error("unbalanced parenthesis in '{sample}' at column {column}")]
    Parenthesis { sample: String, column: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_format_error_names_line() {
        let err = LociError::ConfigFormat {
            line: "minimum of x (A)".to_string(),
            details: "expected a digit".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("\"minimum of x (A)\""));
        assert!(message.contains("expected a digit"));
    }

    #[test]
    fn malformed_locus_line_display() {
        let err = LociError::MalformedLocusLine {
            line_number: 7,
            line: "A10".to_string(),
        };
        assert_eq!(err.to_string(), "malformed locus line 7: \"A10\"");
    }

    #[test]
    fn species_error_display() {
        let err = SpeciesExpressionError::StrayAndOr { column: 4 };
        assert_eq!(
            err.to_string(),
            "'and/or' at column 4 is not between two samples"
        );
    }
}
