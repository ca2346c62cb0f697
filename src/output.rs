//! PHYLIP and co-occurrence matrix writers.

use std::io::{self, Write};

use serde::Serialize;

use crate::{cli::MatrixFormat, matrix::CooccurrenceMatrix, registry::SampleRegistry};

/// JSON form of the co-occurrence matrix.
#[derive(Serialize)]
struct MatrixJson<'a> {
    samples: &'a [String],
    counts: Vec<&'a [u32]>,
}

/// Writes the accumulated alignment in sequential PHYLIP layout.
///
/// The header holds the sample count and alignment length; each sample then
/// takes two lines, its identifier and its sequence.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_phylip<W: Write>(writer: &mut W, registry: &SampleRegistry) -> io::Result<()> {
    writeln!(writer, "{} {}", registry.len(), registry.alignment_length())?;
    for (id, sequence) in registry.iter() {
        writeln!(writer, "{id}\n{sequence}")?;
    }
    Ok(())
}

/// Writes the co-occurrence matrix as tab-separated text.
///
/// The header row starts with an empty cell; each row starts with the sample
/// identifier followed by its counts, right-aligned to four characters.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_matrix_tsv<W: Write>(
    writer: &mut W,
    registry: &SampleRegistry,
    matrix: &CooccurrenceMatrix,
) -> io::Result<()> {
    write!(writer, "\t")?;
    for id in registry.ids() {
        write!(writer, "{id}\t")?;
    }
    writeln!(writer)?;

    for (id, row) in registry.ids().iter().zip(matrix.rows()) {
        write!(writer, "{id}\t")?;
        for (i, count) in row.iter().enumerate() {
            if i > 0 {
                write!(writer, "\t")?;
            }
            write!(writer, "{count:4}")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Writes the co-occurrence matrix as pretty-printed JSON.
///
/// # Errors
///
/// Returns any serialization or write error as an I/O error.
pub fn write_matrix_json<W: Write>(
    writer: &mut W,
    registry: &SampleRegistry,
    matrix: &CooccurrenceMatrix,
) -> io::Result<()> {
    let json = MatrixJson {
        samples: registry.ids(),
        counts: matrix.rows().collect(),
    };
    serde_json::to_writer_pretty(&mut *writer, &json)?;
    writeln!(writer)
}

/// Writes the matrix in the requested format.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_matrix<W: Write>(
    writer: &mut W,
    registry: &SampleRegistry,
    matrix: &CooccurrenceMatrix,
    format: MatrixFormat,
) -> io::Result<()> {
    match format {
        MatrixFormat::Tsv => write_matrix_tsv(writer, registry, matrix),
        MatrixFormat::Json => write_matrix_json(writer, registry, matrix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locus::Batch;

    fn example() -> (SampleRegistry, CooccurrenceMatrix) {
        let mut registry = SampleRegistry::new(["A10", "B10", "C10"]);
        let mut matrix = CooccurrenceMatrix::new(registry.len());
        let mut batch = Batch::new();
        batch.insert("A10", "AC-T");
        batch.insert("C10", "ACGT");
        registry.append_batch(&batch);
        matrix.record(batch.ids(), &registry);
        (registry, matrix)
    }

    #[test]
    fn phylip_layout() {
        let (registry, _) = example();
        let mut out = Vec::new();
        write_phylip(&mut out, &registry).unwrap();
        insta::assert_snapshot!(String::from_utf8(out).unwrap(), @r###"
        3 4
        A10
        ACNT
        B10
        NNNN
        C10
        ACGT
        "###);
    }

    #[test]
    fn phylip_empty_registry() {
        let mut out = Vec::new();
        write_phylip(&mut out, &SampleRegistry::default()).unwrap();
        assert_eq!(out, b"0 0\n");
    }

    #[test]
    fn matrix_tsv_layout() {
        let (registry, matrix) = example();
        let mut out = Vec::new();
        write_matrix_tsv(&mut out, &registry, &matrix).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\tA10\tB10\tC10\t\n\
             A10\t   0\t   0\t   1\n\
             B10\t   0\t   0\t   0\n\
             C10\t   1\t   0\t   0\n"
        );
    }

    #[test]
    fn matrix_json_layout() {
        let (registry, matrix) = example();
        let mut out = Vec::new();
        write_matrix_json(&mut out, &registry, &matrix).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["samples"], serde_json::json!(["A10", "B10", "C10"]));
        assert_eq!(
            value["counts"],
            serde_json::json!([[0, 0, 1], [0, 0, 0], [1, 0, 0]])
        );
    }
}
