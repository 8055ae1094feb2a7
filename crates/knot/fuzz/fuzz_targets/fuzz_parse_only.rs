//! Fuzz target: parse arbitrary source without evaluating it.
//!
//! Runs much faster than `fuzz_eval` and is effective for finding panics in
//! the preprocessor, lexer, and parser alone. A crash here indicates a bug
//! in parsing — it should never panic, only return an error.

#![no_main]

use libfuzzer_sys::fuzz_target;

use knot::{parse_program, release};

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };

    if source.len() > 8192 {
        return;
    }

    if let Ok(program) = parse_program(source) {
        release(program);
    }
});
