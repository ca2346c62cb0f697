//! Tests for gzip compressed input support.

#![cfg(feature = "gzip")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use flate2::write::GzEncoder;
use flate2::Compression;
use lociphy::config::Config;
use lociphy::run::run;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn gzip_fixture(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("simple.loci.gz");
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&fs::read(fixture_path("simple.loci")).unwrap())
        .unwrap();
    fs::write(&path, encoder.finish().unwrap()).unwrap();
    path
}

#[test]
fn gzip_and_plain_produce_same_results() {
    let dir = TempDir::new().unwrap();
    let gz = gzip_fixture(&dir);

    let plain = Config::new(
        fixture_path("simple.loci"),
        fixture_path("params.txt"),
        dir.path().join("plain.phy"),
        dir.path().join("plain.tsv"),
    );
    let compressed = Config::new(
        &gz,
        fixture_path("params.txt"),
        dir.path().join("gz.phy"),
        dir.path().join("gz.tsv"),
    );

    let plain_progress = run(&plain).expect("should read plain file");
    let gz_progress = run(&compressed).expect("should read gzipped file");

    assert_eq!(plain_progress, gz_progress);
    assert_eq!(
        fs::read_to_string(&plain.phylip).unwrap(),
        fs::read_to_string(&compressed.phylip).unwrap()
    );
    assert_eq!(
        fs::read_to_string(&plain.matrix).unwrap(),
        fs::read_to_string(&compressed.matrix).unwrap()
    );
}
