//! Tests for tracing instrumentation.
//!
//! These tests verify that tracing spans and events are emitted correctly
//! when the tracing feature is enabled.

#![cfg(feature = "tracing")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use lociphy::config::Config;
use lociphy::locus::LocusStreamReader;
use lociphy::run::{run, Pipeline};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// A simple layer that counts events at or above a level.
struct EventCounter {
    level: Level,
    count: Arc<AtomicUsize>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCounter {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        if event.metadata().level() <= &self.level {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[test]
fn run_emits_tracing_events() {
    let event_count = Arc::new(AtomicUsize::new(0));
    let layer = EventCounter {
        level: Level::INFO,
        count: Arc::clone(&event_count),
    };

    let subscriber = tracing_subscriber::registry().with(layer);
    let dir = TempDir::new().unwrap();

    tracing::subscriber::with_default(subscriber, || {
        let config = Config::new(
            fixture_path("simple.loci"),
            fixture_path("params.txt"),
            dir.path().join("out.phy"),
            dir.path().join("out.tsv"),
        );
        run(&config).expect("should extract loci");
    });

    assert!(
        event_count.load(Ordering::SeqCst) > 0,
        "should emit tracing events"
    );
}

#[test]
fn dropped_trailing_locus_emits_warning() {
    let warnings = Arc::new(AtomicUsize::new(0));
    let layer = EventCounter {
        level: Level::WARN,
        count: Arc::clone(&warnings),
    };

    let subscriber = tracing_subscriber::registry().with(layer);

    tracing::subscriber::with_default(subscriber, || {
        let mut pipeline =
            Pipeline::from_config_text("IDs\nAA\n\nextract\nminimum of 1 (AA)\n").unwrap();
        pipeline
            .process_stream(LocusStreamReader::new("AA  ACGT\n//\nAA  GG\n".as_bytes()))
            .expect("should process stream");
    });

    assert_eq!(warnings.load(Ordering::SeqCst), 1);
}

#[test]
fn duplicate_sample_ids_emit_warning() {
    let warnings = Arc::new(AtomicUsize::new(0));
    let layer = EventCounter {
        level: Level::WARN,
        count: Arc::clone(&warnings),
    };

    let subscriber = tracing_subscriber::registry().with(layer);

    tracing::subscriber::with_default(subscriber, || {
        let pipeline =
            Pipeline::from_config_text("IDs\nAA\nBB\nAA\n\nextract\nminimum of 1 (AA)\n")
                .unwrap();
        assert_eq!(pipeline.registry().len(), 2);
    });

    assert_eq!(warnings.load(Ordering::SeqCst), 1);
}
