//! Fuzz target: parse and evaluate arbitrary source.
//!
//! Exercises the full pipeline — preprocessing, lexing, parsing, and
//! evaluation. Findings here indicate real bugs: panics, unbounded
//! recursion past the evaluator's own depth limit, or a leaked/
//! double-released node.

#![no_main]

use libfuzzer_sys::fuzz_target;

use knot::{CollectPrint, Environment, parse_program, release, run_program};

fuzz_target!(|data: &[u8]| {
    // Only fuzz valid UTF-8 — source is always text.
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };

    // Skip excessively large inputs — they slow the fuzzer without finding
    // interesting bugs.
    if source.len() > 4096 {
        return;
    }

    let Ok(program) = parse_program(source) else {
        return;
    };

    let mut env = Environment::new();
    let mut out = CollectPrint::new();
    let _ = run_program(&program, &mut env, &mut out, false);
    release(program);
});
