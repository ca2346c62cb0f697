//! Locus extraction pipeline.
//!
//! A [`Pipeline`] owns everything a run mutates: the match rules, the sample
//! registry with its accumulated sequences, the co-occurrence matrix and the
//! progress counters. Each terminated locus goes through the matcher and, if
//! retained, the sequence accumulator and the matrix, in that order.

use std::{
    fs::{self, File},
    io::{BufRead, BufWriter, Write},
    path::Path,
};

use tempfile::{Builder, NamedTempFile};

use crate::{
    cli::MatrixFormat,
    config::Config,
    error::LociError,
    locus::{Batch, LocusStreamReader},
    matrix::CooccurrenceMatrix,
    output,
    progress::Progress,
    registry::SampleRegistry,
    rules::MatchRuleSet,
};

#[cfg(feature = "tracing")]
use tracing::{debug, info, info_span, trace};

/// The state of one extraction run.
#[derive(Debug, Clone)]
pub struct Pipeline {
    rules: MatchRuleSet,
    registry: SampleRegistry,
    matrix: CooccurrenceMatrix,
    progress: Progress,
}

impl Pipeline {
    /// Creates a pipeline and allocates a matrix sized to the registry.
    #[must_use]
    pub fn new(rules: MatchRuleSet, registry: SampleRegistry) -> Self {
        let matrix = CooccurrenceMatrix::new(registry.len());
        Self {
            rules,
            registry,
            matrix,
            progress: Progress::new(),
        }
    }

    /// Builds a pipeline from the text of an arguments file.
    ///
    /// # Errors
    ///
    /// Returns [`LociError::ConfigFormat`] for a malformed group definition.
    pub fn from_config_text(text: &str) -> Result<Self, LociError> {
        let rules = MatchRuleSet::from_config(text)?;
        let registry = SampleRegistry::from_config(text);
        Ok(Self::new(rules, registry))
    }

    /// Reads an arguments file and builds a pipeline from it.
    ///
    /// # Errors
    ///
    /// Returns [`LociError::ConfigRead`] if the file cannot be read and
    /// [`LociError::ConfigFormat`] for a malformed group definition.
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> Result<Self, LociError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LociError::ConfigRead {
            source,
            path: path.to_path_buf(),
        })?;
        Self::from_config_text(&text)
    }

    #[must_use]
    pub fn rules(&self) -> &MatchRuleSet {
        &self.rules
    }

    #[must_use]
    pub fn registry(&self) -> &SampleRegistry {
        &self.registry
    }

    #[must_use]
    pub fn matrix(&self) -> &CooccurrenceMatrix {
        &self.matrix
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// Processes one terminated locus. Returns `true` if it was retained.
    pub fn process_batch(&mut self, batch: &Batch) -> bool {
        let ids = batch.ids();
        if !self.rules.is_retained(&ids) {
            self.progress.record_batch(None);
            return false;
        }

        let width = self.registry.append_batch(batch);
        #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
        let pairs = self.matrix.record(ids, &self.registry);
        self.progress.record_batch(width);

        #[cfg(feature = "tracing")]
        trace!(samples = batch.len(), width = ?width, pairs, "Retained locus");

        true
    }

    /// Consumes a locus stream.
    ///
    /// # Errors
    ///
    /// Returns the first read or parse error of the stream; nothing after it
    /// is processed.
    pub fn process_stream<R: BufRead>(
        &mut self,
        reader: LocusStreamReader<R>,
    ) -> Result<Progress, LociError> {
        self.process_stream_with_progress(reader, |_| {})
    }

    /// Consumes a locus stream, calling `callback` after every locus.
    ///
    /// # Errors
    ///
    /// Returns the first read or parse error of the stream.
    pub fn process_stream_with_progress<R, F>(
        &mut self,
        reader: LocusStreamReader<R>,
        mut callback: F,
    ) -> Result<Progress, LociError>
    where
        R: BufRead,
        F: FnMut(&Progress),
    {
        for batch in reader {
            self.process_batch(&batch?);
            callback(&self.progress);
        }

        #[cfg(feature = "tracing")]
        debug!(
            processed = self.progress.batches_processed,
            retained = self.progress.batches_retained,
            "Finished locus stream"
        );

        Ok(self.progress)
    }

    /// Writes the accumulated alignment as PHYLIP.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn write_phylip<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        output::write_phylip(writer, &self.registry)
    }

    /// Writes the co-occurrence matrix.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn write_matrix<W: Write>(
        &self,
        writer: &mut W,
        format: MatrixFormat,
    ) -> std::io::Result<()> {
        output::write_matrix(writer, &self.registry, &self.matrix, format)
    }
}

/// Runs a full extraction: reads the arguments file, streams the locus
/// input, then writes both outputs.
///
/// Both outputs are staged in temporary files next to their destinations and
/// moved into place only after the whole input has been processed and both
/// writes have succeeded, so a failed run leaves no partial output behind.
///
/// # Errors
///
/// Returns a [`LociError`] for the first failure of any stage.
pub fn run(config: &Config) -> Result<Progress, LociError> {
    #[cfg(feature = "tracing")]
    info!(loci = %config.loci, arguments = ?config.arguments, "Starting locus extraction");

    let mut pipeline = Pipeline::from_config_file(&config.arguments)?;

    #[cfg(feature = "tracing")]
    info!(
        samples = pipeline.registry().len(),
        rules = pipeline.rules().len(),
        "Loaded arguments file"
    );

    let progress = {
        #[cfg(feature = "tracing")]
        let _span = info_span!("read_loci", path = ?config.loci.path()).entered();

        let reader = LocusStreamReader::new(config.loci.open()?).with_origin(config.loci.path());
        pipeline.process_stream(reader)?
    };

    let phylip = stage_output(&config.phylip, |w| pipeline.write_phylip(w))?;
    let matrix = stage_output(&config.matrix, |w| {
        pipeline.write_matrix(w, config.matrix_format)
    })?;
    persist_output(phylip, &config.phylip)?;
    persist_output(matrix, &config.matrix)?;

    #[cfg(feature = "tracing")]
    info!(
        processed = progress.batches_processed,
        retained = progress.batches_retained,
        alignment_length = progress.alignment_length,
        "Locus extraction complete"
    );

    Ok(progress)
}

/// Writes one output into a temporary file in the destination's directory.
/// The temporary file is removed if it is dropped without being persisted.
fn stage_output<F>(path: &Path, write: F) -> Result<NamedTempFile, LociError>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> std::io::Result<()>,
{
    let to_error = |source| LociError::OutputWrite {
        source,
        path: path.to_path_buf(),
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = Builder::new();
    // Same mode as `File::create`, still subject to the umask.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    let mut staged = builder.tempfile_in(dir).map_err(to_error)?;
    {
        let mut buf = BufWriter::new(staged.as_file_mut());
        write(&mut buf).map_err(to_error)?;
        buf.flush().map_err(to_error)?;
    }
    Ok(staged)
}

fn persist_output(staged: NamedTempFile, path: &Path) -> Result<(), LociError> {
    staged
        .persist(path)
        .map(drop)
        .map_err(|e| LociError::OutputWrite {
            source: e.error,
            path: path.to_path_buf(),
        })
}
