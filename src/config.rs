use std::path::PathBuf;

use crate::{
    cli::{Args, MatrixFormat},
    input::Input,
};

/// Resolved settings of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub loci: Input,
    pub arguments: PathBuf,
    pub phylip: PathBuf,
    pub matrix: PathBuf,
    pub matrix_format: MatrixFormat,
}

impl Config {
    pub fn new<P1, P2, P3, P4>(loci: P1, arguments: P2, phylip: P3, matrix: P4) -> Self
    where
        P1: Into<PathBuf>,
        P2: Into<PathBuf>,
        P3: Into<PathBuf>,
        P4: Into<PathBuf>,
    {
        Self {
            loci: Input::from_path(&loci.into()),
            arguments: arguments.into(),
            phylip: phylip.into(),
            matrix: matrix.into(),
            matrix_format: MatrixFormat::default(),
        }
    }

    #[must_use]
    pub fn with_matrix_format(mut self, format: MatrixFormat) -> Self {
        self.matrix_format = format;
        self
    }
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Config::new(&args.loci, &args.arguments, &args.phylip, &args.matrix)
            .with_matrix_format(args.matrix_format)
    }
}
