//! Fuzz target for species expression parsing.
//!
//! Any accepted expression must:
//! 1. Expand to `combination_count()` combinations
//! 2. Re-parse from its display form to the same clauses

#![no_main]

use libfuzzer_sys::fuzz_target;
use lociphy::species::SpeciesExpression;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Keep the product of clause sizes small enough to expand.
    if text.len() > 256 {
        return;
    }

    let Ok(expression) = SpeciesExpression::parse(text) else {
        return;
    };

    if expression.combination_count() <= 4096 {
        assert_eq!(expression.expand().len(), expression.combination_count());
    }

    let reparsed = SpeciesExpression::parse(&expression.to_string())
        .expect("display form should parse");
    assert_eq!(reparsed, expression);
});
