//! Input source abstraction for file and stdin.
//!
//! This module provides the [`Input`] enum for reading `.loci` data either
//! from a file or from standard input, so the tool can sit at the end of a
//! Unix pipeline.
//!
//! # Example
//!
//! ```rust
//! use lociphy::input::Input;
//! use std::path::Path;
//!
//! // From a file path
//! let input = Input::from_path(Path::new("run1.loci"));
//! assert!(matches!(input, Input::File(_)));
//!
//! // From stdin marker
//! let input = Input::from_path(Path::new("-"));
//! assert!(matches!(input, Input::Stdin));
//! ```

use std::{
    fmt,
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use crate::error::LociError;

/// Locus input source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Input {
    /// Read from a file at the specified path.
    File(PathBuf),
    /// Read from standard input.
    #[default]
    Stdin,
}

impl Input {
    /// Creates an `Input` from a path; `-` means stdin.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            Self::Stdin
        } else {
            Self::File(path.to_path_buf())
        }
    }

    /// Path used in error messages; `-` for stdin.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::File(path) => path,
            Self::Stdin => Path::new("-"),
        }
    }

    /// Opens the source for buffered line reading.
    ///
    /// With the `gzip` feature, files ending in `.gz` are decompressed on the
    /// fly.
    ///
    /// # Errors
    ///
    /// Returns [`LociError::LocusRead`] if the file cannot be opened.
    pub fn open(&self) -> Result<Box<dyn BufRead>, LociError> {
        match self {
            Self::Stdin => Ok(Box::new(BufReader::new(io::stdin().lock()))),
            Self::File(path) => {
                let file = File::open(path).map_err(|source| LociError::LocusRead {
                    source,
                    path: path.clone(),
                })?;
                Ok(wrap_file(file, path))
            }
        }
    }
}

#[cfg(feature = "gzip")]
fn wrap_file(file: File, path: &Path) -> Box<dyn BufRead> {
    use flate2::read::MultiGzDecoder;

    if is_gzip_path(path) {
        Box::new(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    }
}

#[cfg(not(feature = "gzip"))]
fn wrap_file(file: File, _path: &Path) -> Box<dyn BufRead> {
    Box::new(BufReader::new(file))
}

/// Check if a path has a gzip extension (.gz).
#[cfg(feature = "gzip")]
fn is_gzip_path(path: &Path) -> bool {
    path.extension().map(|ext| ext == "gz").unwrap_or(false)
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdin => write!(f, "<stdin>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_path_dash_is_stdin() {
        let input = Input::from_path(Path::new("-"));
        assert_eq!(input, Input::Stdin);
        assert_eq!(input.path(), Path::new("-"));
    }

    #[test]
    fn from_path_file() {
        let input = Input::from_path(Path::new("run1.loci"));
        assert_eq!(input, Input::File(PathBuf::from("run1.loci")));
        assert_eq!(input.to_string(), "run1.loci");
    }

    #[test]
    fn display_stdin() {
        assert_eq!(Input::Stdin.to_string(), "<stdin>");
    }

    #[test]
    fn open_missing_file_reports_path() {
        let input = Input::from_path(Path::new("/nonexistent/run1.loci"));
        match input.open() {
            Err(LociError::LocusRead { path, .. }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/run1.loci"));
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("opening a missing file should fail"),
        }
    }

    #[cfg(feature = "gzip")]
    #[test]
    fn gzip_extension_detection() {
        assert!(is_gzip_path(Path::new("run1.loci.gz")));
        assert!(!is_gzip_path(Path::new("run1.loci")));
    }
}
