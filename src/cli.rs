//! Command-line interface definition.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Extract .loci batches matching sample-group rules into a PHYLIP alignment
/// and a sample co-occurrence matrix.
#[derive(Parser, Debug)]
#[command(name = "lociphy")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the .loci input file ("-" for stdin)
    pub loci: PathBuf,

    /// Path to the arguments file listing sample IDs and extraction groups
    pub arguments: PathBuf,

    /// Path of the PHYLIP alignment to write
    pub phylip: PathBuf,

    /// Path of the co-occurrence matrix to write
    pub matrix: PathBuf,

    /// Co-occurrence matrix format
    #[arg(short, long, value_enum, default_value = "tsv")]
    pub matrix_format: MatrixFormat,

    /// Suppress the run summary
    #[arg(short, long)]
    pub quiet: bool,
}

/// Output format for the co-occurrence matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum MatrixFormat {
    /// Tab-separated table with a header row of sample IDs
    #[default]
    Tsv,
    /// JSON object with "samples" and "counts"
    Json,
}
