//! Fuzz target for group definition lines.
//!
//! Parsing must never panic, and every rule produced must have a minimum
//! between 1 and 9.

#![no_main]

use libfuzzer_sys::fuzz_target;
use lociphy::rules::parse_group_line;

fuzz_target!(|data: &[u8]| {
    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };
    if line.len() > 256 {
        return;
    }

    if let Ok(rules) = parse_group_line(line) {
        for rule in &rules {
            assert!((1..=9).contains(&rule.minimum_matches()));
            assert!(!rule.species().is_empty());
        }
    }
});
