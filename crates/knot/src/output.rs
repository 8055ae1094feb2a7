//! Output sink abstraction for the `PRINT` operator and verbose driver
//! echoing.
//!
//! Grounded on the teacher's `PrintWriter` trait (`crates/ouros/src/io.rs`):
//! separating "what gets printed" from "where it goes" lets tests capture
//! output instead of asserting against real stdout.

/// Receives text produced by `PRINT` and by the driver's result/verbose
/// echoing.
pub trait PrintSink {
    /// Writes `text` with no added separators or trailing newline.
    fn write_str(&mut self, text: &str);

    /// Writes a single trailing newline after a `PRINT` or result line.
    fn write_newline(&mut self) {
        self.write_str("\n");
    }
}

/// Default sink: writes directly to stdout.
#[derive(Debug, Default)]
pub struct StdPrint;

impl PrintSink for StdPrint {
    fn write_str(&mut self, text: &str) {
        print!("{text}");
    }

    fn write_newline(&mut self) {
        println!();
    }
}

/// Test/embedding sink: collects everything written into an owned `String`.
#[derive(Debug, Default)]
pub struct CollectPrint(String);

impl CollectPrint {
    #[must_use]
    pub fn new() -> Self {
        Self(String::new())
    }

    #[must_use]
    pub fn output(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_output(self) -> String {
        self.0
    }
}

impl PrintSink for CollectPrint {
    fn write_str(&mut self, text: &str) {
        self.0.push_str(text);
    }

    fn write_newline(&mut self) {
        self.0.push('\n');
    }
}

/// Sink that discards all output. Useful when only the evaluated result
/// (not `PRINT` side effects) matters to a caller.
#[derive(Debug, Default)]
pub struct NoPrint;

impl PrintSink for NoPrint {
    fn write_str(&mut self, _text: &str) {}

    fn write_newline(&mut self) {}
}
