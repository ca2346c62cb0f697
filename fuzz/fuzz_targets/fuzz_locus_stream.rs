//! Fuzz target for the locus stream reader and accumulator.
//!
//! Whatever the stream contains, reading must not panic, no gap may survive
//! accumulation and the matrix diagonal must stay zero.

#![no_main]

use libfuzzer_sys::fuzz_target;
use lociphy::locus::LocusStreamReader;
use lociphy::run::Pipeline;

const ARGUMENTS: &str = "IDs\nAA\nBB\nCC\n\nextract\nminimum of 1 (AA and/or BB and/or CC)\n";

fuzz_target!(|data: &[u8]| {
    let Ok(mut pipeline) = Pipeline::from_config_text(ARGUMENTS) else {
        return;
    };

    for batch in LocusStreamReader::new(data) {
        let Ok(batch) = batch else {
            return;
        };
        pipeline.process_batch(&batch);
    }

    for (_, sequence) in pipeline.registry().iter() {
        assert!(!sequence.contains('-'));
    }
    for i in 0..pipeline.matrix().size() {
        assert_eq!(pipeline.matrix().get(i, i), 0);
    }
});
