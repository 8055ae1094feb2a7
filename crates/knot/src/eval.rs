//! The recursive evaluator (spec.md §4.3): a single function dispatching an
//! AST node to a result node against an [`Environment`].

use crate::environment::Environment;
use crate::error::{ErrorKind, EvalResult};
use crate::node::{Node, Origin};
use crate::operators;
use crate::output::PrintSink;

/// Recursion-depth ceiling for [`evaluate`].
///
/// Ambient addition (see SPEC_FULL.md §5): the original C source has no
/// protection against unbounded recursion, and the distilled spec is silent
/// on it. Rather than let a self-referential or deeply nested program
/// overflow the native stack, `evaluate` counts its own recursion and
/// reports `ErrorKind::Internal` once this is exceeded, grounded on the
/// teacher's `ResourceTracker` / `DEFAULT_MAX_RECURSION_DEPTH` pattern.
pub const MAX_EVAL_DEPTH: usize = 2000;

/// Everything an evaluation call needs beyond the node it is looking at: the
/// shared variable environment and the sink `PRINT` (and verbose driver
/// echoing) writes through.
///
/// Bundled into one struct, rather than threading `env` and `out` as
/// separate parameters, so a future cross-cutting addition touches one
/// signature instead of every operator's.
pub struct EvalContext<'a> {
    pub env: &'a mut Environment,
    pub out: &'a mut dyn PrintSink,
}

impl<'a> EvalContext<'a> {
    pub fn new(env: &'a mut Environment, out: &'a mut dyn PrintSink) -> Self {
        Self { env, out }
    }
}

/// `evaluate(node, env) -> result-node, status` (spec.md §4.3).
///
/// The returned [`Node`] is either: the node itself (atoms), a cloned
/// handle onto a variable's storage (bare symbols), or a freshly produced
/// `Temporary`. Callers must `release_temporary` the result once done.
pub fn evaluate(node: &Node, ctx: &mut EvalContext, depth: usize) -> EvalResult<Node> {
    if depth > MAX_EVAL_DEPTH {
        return Err(ErrorKind::Internal.into());
    }

    if node.is_number() || node.is_boolean() {
        return Ok(node.clone());
    }

    if let Some(name) = node.symbol_text() {
        return ctx.env.lookup(&name).ok_or_else(|| ErrorKind::UnknownVariable.into());
    }

    // Remaining case: a List.
    let len = node.list_len().expect("non-atom, non-symbol node must be a list");
    if len == 0 {
        return Ok(Node::boolean(false, Origin::Temporary));
    }

    let head = node.list_get(0).expect("non-empty list has a head");
    let Some(operator_name) = head.symbol_text() else {
        return Err(ErrorKind::SyntaxError.into());
    };

    operators::dispatch(&operator_name, node, ctx, depth + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;
    use crate::node::ReleaseTemporary;
    use crate::output::NoPrint;
    use crate::parser::parse_program;

    fn eval_one(src: &str, env: &mut Environment) -> Node {
        let program = parse_program(src).unwrap();
        let forms = program.list_children().unwrap();
        assert_eq!(forms.len(), 1, "expected exactly one top-level form in {src:?}");
        let mut out = NoPrint;
        let mut ctx = EvalContext::new(env, &mut out);
        evaluate(&forms[0], &mut ctx, 0).unwrap()
    }

    fn eval_err(src: &str, env: &mut Environment) -> EvalError {
        let program = parse_program(src).unwrap();
        let forms = program.list_children().unwrap();
        let mut out = NoPrint;
        let mut ctx = EvalContext::new(env, &mut out);
        evaluate(&forms[0], &mut ctx, 0).unwrap_err()
    }

    #[test]
    fn atoms_evaluate_to_themselves() {
        let mut env = Environment::new();
        assert_eq!(eval_one("42", &mut env).as_number(), Some(42));
        assert_eq!(eval_one("T", &mut env).as_boolean(), Some(true));
        assert_eq!(eval_one("NIL", &mut env).as_boolean(), Some(false));
    }

    #[test]
    fn empty_list_evaluates_to_false() {
        let mut env = Environment::new();
        let result = eval_one("()", &mut env);
        assert_eq!(result.as_boolean(), Some(false));
    }

    #[test]
    fn unknown_symbol_is_unknown_variable() {
        let mut env = Environment::new();
        let err = eval_err("X", &mut env);
        assert_eq!(err.leaked_break_is_syntax_error(), ErrorKind::UnknownVariable);
    }

    #[test]
    fn non_symbol_head_is_syntax_error() {
        let mut env = Environment::new();
        let err = eval_err("(1 2)", &mut env);
        assert_eq!(err.leaked_break_is_syntax_error(), ErrorKind::SyntaxError);
    }

    #[test]
    fn deep_recursion_reports_internal_instead_of_overflowing() {
        let mut env = Environment::new();
        let mut src = String::from("(+ 1 ");
        for _ in 0..(MAX_EVAL_DEPTH + 10) {
            src.push_str("(+ 1 ");
        }
        src.push('1');
        for _ in 0..=(MAX_EVAL_DEPTH + 10) {
            src.push(')');
        }
        let err = eval_err(&src, &mut env);
        assert_eq!(err.leaked_break_is_syntax_error(), ErrorKind::Internal);
    }

    #[test]
    fn arithmetic_result_is_released_cleanly() {
        let mut env = Environment::new();
        let result = eval_one("(+ 1 2 3)", &mut env);
        assert_eq!(result.as_number(), Some(6));
        result.release_temporary();
    }
}
