//! # lociphy
//!
//! Extract loci from a `.loci` multi-locus alignment into a concatenated
//! PHYLIP alignment, keeping only loci whose samples satisfy user-defined
//! group rules, and count how often each pair of samples shares a retained
//! locus.
//!
//! ## Arguments file
//!
//! One text file declares the samples to keep and the groups a locus must
//! match:
//!
//! ```text
//! Sample IDs
//! A10
//! B10
//! C10
//!
//! Extract
//! minimum of 2 (A10 and/or B10)     # both of them
//! minimum of 2 (C10, A10 and/or B10) # C10 with A10, or C10 with B10
//! ```
//!
//! ## Library usage
//!
//! ```rust
//! use lociphy::{locus::LocusStreamReader, run::Pipeline};
//!
//! let arguments = "IDs\nA10\nB10\nC10\n\nextract\nminimum of 2 (A10 and/or B10)\n";
//! let loci = "A10  AC-T\nB10  ACGT\n//\nA10  GG\nC10  GG\n//\n";
//!
//! let mut pipeline = Pipeline::from_config_text(arguments)?;
//! let progress = pipeline.process_stream(LocusStreamReader::new(loci.as_bytes()))?;
//!
//! assert_eq!(progress.batches_retained, 1);
//! assert_eq!(pipeline.registry().sequence("A10"), Some("ACNT"));
//! assert_eq!(pipeline.registry().sequence("C10"), Some("NNNN"));
//! assert_eq!(pipeline.matrix().get(0, 1), 1);
//! # Ok::<(), lociphy::error::LociError>(())
//! ```
//!
//! ## Features
//!
//! - `tracing` (default): spans and events through the `tracing` crate.
//! - `gzip`: read `.loci.gz` input.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod locus;
pub mod matrix;
pub mod output;
pub mod progress;
pub mod registry;
pub mod rules;
pub mod run;
pub mod species;
