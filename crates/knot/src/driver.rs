//! Program evaluation (spec.md §4.5): evaluates each top-level form of a
//! parsed program against a shared environment, printing and releasing
//! each result as it goes.

use crate::environment::Environment;
use crate::error::{ControlStatus, ErrorKind, EvalError};
use crate::eval::{EvalContext, evaluate};
use crate::node::{Node, ReleaseTemporary};
use crate::output::PrintSink;

/// Whether the driver ran every form or stopped early because a form
/// evaluated to `ControlStatus::Quit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverOutcome {
    Completed,
    Quit,
}

/// Evaluates every top-level expression of `program` (a List of forms,
/// spec.md §6's parser contract) against `env`, printing each result
/// through `out`. `verbose` additionally echoes each form before it runs.
///
/// # Errors
/// The first error any form produces halts the driver; `ControlBreak`
/// reaching this layer (a `BRK` outside any `WHILE`) is rewritten to
/// `SyntaxError` per spec.md §7.
pub fn run_program(
    program: &Node,
    env: &mut Environment,
    out: &mut dyn PrintSink,
    verbose: bool,
) -> Result<DriverOutcome, ErrorKind> {
    let forms = program.list_children().map_err(|_| ErrorKind::Internal)?;

    for (index, form) in forms.iter().enumerate() {
        if verbose {
            out.write_str(&format!("{}> {form}", index + 1));
            out.write_newline();
        }

        let mut ctx = EvalContext::new(env, out);
        let result = match evaluate(form, &mut ctx, 0) {
            Ok(node) => node,
            Err(EvalError::Control(ControlStatus::Quit)) => return Ok(DriverOutcome::Quit),
            Err(EvalError::Control(ControlStatus::Break)) => return Err(ErrorKind::SyntaxError),
            Err(EvalError::Error(kind)) => return Err(kind),
        };

        out.write_str(&result.to_string());
        out.write_newline();
        result.release_temporary();
    }

    Ok(DriverOutcome::Completed)
}
