//! The read-eval-print loop session (spec.md §6 REPL contract): tracks
//! paren balance across lines, accumulates input until balanced, then runs
//! it through preprocess → lex → parse → driver against one long-lived
//! environment.
//!
//! Grounded on the teacher's `ouros-repl.rs` binary: a persistent session
//! object the surrounding I/O loop feeds lines into, separate from the
//! line-reading/prompting loop itself (`knot-cli`'s `run_interactive`).

use crate::environment::Environment;
use crate::error::ErrorKind;
use crate::node::release;
use crate::output::PrintSink;
use crate::parser::parse_program;
use crate::{driver, driver::DriverOutcome};

/// Whether the session should keep reading more input after evaluating a
/// chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplProgress {
    Continue,
    Quit,
}

/// A persistent REPL session: one environment shared across every
/// evaluated chunk until the session ends.
pub struct ReplSession {
    env: Environment,
}

impl Default for ReplSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplSession {
    #[must_use]
    pub fn new() -> Self {
        Self { env: Environment::new() }
    }

    /// True once `buffer`'s parentheses are balanced (depth returns to, or
    /// below, zero) and it is ready to be evaluated. A surplus of closing
    /// parens is treated as balanced too — `eval_chunk`'s parser will
    /// reject it as a syntax error rather than have the caller wait
    /// forever for more input that would never balance it.
    #[must_use]
    pub fn needs_more_input(buffer: &str) -> bool {
        let mut depth: i64 = 0;
        for c in buffer.chars() {
            match c {
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {}
            }
        }
        depth > 0
    }

    /// Evaluates one balanced chunk of source against this session's
    /// environment, sharing state with every previous and future call.
    ///
    /// # Errors
    /// Any parse or evaluation error, per spec.md §7: a bad chunk
    /// terminates that chunk and returns the prompt, without tearing down
    /// the session's environment.
    pub fn eval_chunk(&mut self, source: &str, out: &mut dyn PrintSink) -> Result<ReplProgress, ErrorKind> {
        let program = parse_program(source)?;
        let outcome = driver::run_program(&program, &mut self.env, out, false);
        release(program);
        match outcome? {
            DriverOutcome::Completed => Ok(ReplProgress::Continue),
            DriverOutcome::Quit => Ok(ReplProgress::Quit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::CollectPrint;

    #[test]
    fn unbalanced_input_needs_more() {
        assert!(ReplSession::needs_more_input("(+ 1 2"));
        assert!(!ReplSession::needs_more_input("(+ 1 2)"));
        assert!(!ReplSession::needs_more_input("(+ 1 (* 2 3))"));
    }

    #[test]
    fn environment_persists_across_chunks() {
        let mut session = ReplSession::new();
        let mut out = CollectPrint::new();
        session.eval_chunk("(SET 'A 5)", &mut out).unwrap();
        session.eval_chunk("(INC A 2)", &mut out).unwrap();
        let progress = session.eval_chunk("A", &mut out).unwrap();
        assert_eq!(progress, ReplProgress::Continue);
        assert_eq!(out.output(), "5\n7\n7\n");
    }

    #[test]
    fn quit_is_reported_to_the_caller() {
        let mut session = ReplSession::new();
        let mut out = CollectPrint::new();
        let progress = session.eval_chunk("(QUIT)", &mut out).unwrap();
        assert_eq!(progress, ReplProgress::Quit);
    }

    #[test]
    fn an_error_in_one_chunk_does_not_poison_the_session() {
        let mut session = ReplSession::new();
        let mut out = CollectPrint::new();
        assert!(session.eval_chunk("(/ 1 0)", &mut out).is_err());
        let progress = session.eval_chunk("(+ 1 1)", &mut out).unwrap();
        assert_eq!(progress, ReplProgress::Continue);
        assert_eq!(out.output(), "2\n");
    }
}
