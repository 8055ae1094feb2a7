//! `SET`, `INC`, `DEC`, `QUOTE` (spec.md §4.4).

use super::OperatorName;
use crate::error::{ErrorKind, EvalResult};
use crate::eval::{EvalContext, evaluate};
use crate::node::{self, Node, Origin, ReleaseTemporary};

pub(super) fn eval_inc_dec(
    op: OperatorName,
    list_node: &Node,
    ctx: &mut EvalContext<'_>,
    depth: usize,
) -> EvalResult<Node> {
    let children = list_node.list_children()?;
    if children.len() != 3 {
        return Err(ErrorKind::SyntaxError.into());
    }

    let target = evaluate(&children[1], ctx, depth)?;
    if target.origin() != Origin::Variable {
        target.release_temporary();
        return Err(ErrorKind::NotAVariable.into());
    }
    if !target.is_number() {
        target.release_temporary();
        return Err(ErrorKind::SyntaxError.into());
    }

    let delta_node = evaluate(&children[2], ctx, depth)?;
    if !delta_node.is_number() {
        delta_node.release_temporary();
        target.release_temporary();
        return Err(ErrorKind::SyntaxError.into());
    }
    let delta = delta_node.as_number().expect("checked is_number above");
    delta_node.release_temporary();

    let current = target.as_number().expect("checked is_number above");
    let updated = match op {
        OperatorName::Inc => current.checked_add(delta),
        OperatorName::Dec => current.checked_sub(delta),
        _ => unreachable!("eval_inc_dec is only dispatched for INC, DEC"),
    }
    .ok_or(ErrorKind::Internal)?;

    target.set_kind(node::NodeKind::Number(updated));
    Ok(target)
}

/// `SET target value`. `target` is usually `'name` (a quoted symbol, from
/// which a variable is resolved or created) but a bare already-bound
/// variable symbol works too, since evaluating it already yields the
/// `Variable` node directly.
pub(super) fn eval_set(list_node: &Node, ctx: &mut EvalContext<'_>, depth: usize) -> EvalResult<Node> {
    let children = list_node.list_children()?;
    if children.len() != 3 {
        return Err(ErrorKind::SyntaxError.into());
    }

    let evaluated_target = evaluate(&children[1], ctx, depth)?;
    let target = if evaluated_target.is_symbol() {
        let name = evaluated_target.symbol_text().expect("checked is_symbol above");
        evaluated_target.release_temporary();
        if !ctx.env.exists(&name) {
            ctx.env.add_zero(&name)?;
        }
        ctx.env.lookup(&name).expect("just ensured the variable exists")
    } else {
        evaluated_target
    };
    if target.origin() != Origin::Variable {
        target.release_temporary();
        return Err(ErrorKind::NotAVariable.into());
    }

    let value = evaluate(&children[2], ctx, depth)?;
    if value.is_symbol() {
        value.release_temporary();
        return Err(ErrorKind::SyntaxError.into());
    }

    let copied = value.deep_copy(Origin::Variable);
    value.release_temporary();
    let new_kind = copied.into_kind();
    let old_kind = target.replace_kind(new_kind);
    node::release(Node::new(old_kind, Origin::Variable));

    Ok(target)
}

/// `QUOTE expr`: returns `expr` verbatim, without evaluating it.
pub(super) fn eval_quote(list_node: &Node) -> EvalResult<Node> {
    let children = list_node.list_children()?;
    if children.len() != 2 {
        return Err(ErrorKind::SyntaxError.into());
    }
    Ok(children[1].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::output::NoPrint;
    use crate::parser::parse_program;

    fn eval_all(src: &str) -> Vec<EvalResult<Node>> {
        let program = parse_program(src).unwrap();
        let forms = program.list_children().unwrap();
        let mut env = Environment::new();
        let mut out = NoPrint;
        let mut results = Vec::new();
        for form in &forms {
            let mut ctx = EvalContext::new(&mut env, &mut out);
            results.push(crate::eval::evaluate(form, &mut ctx, 0));
        }
        results
    }

    #[test]
    fn set_creates_an_unknown_variable_then_inc_mutates_in_place() {
        let results = eval_all("(SET 'A 5) (INC A 2) A");
        assert_eq!(results[0].as_ref().unwrap().as_number(), Some(5));
        assert_eq!(results[1].as_ref().unwrap().as_number(), Some(7));
        assert_eq!(results[2].as_ref().unwrap().as_number(), Some(7));
    }

    #[test]
    fn set_deep_copies_a_quoted_list_value() {
        let results = eval_all("(SET 'XS '(1 2 3)) (LENGTH XS)");
        assert_eq!(results[0].as_ref().unwrap().to_string(), "(1 2 3)");
        assert_eq!(results[1].as_ref().unwrap().as_number(), Some(3));
    }

    #[test]
    fn inc_on_a_non_variable_target_is_not_a_variable() {
        let results = eval_all("(INC 5 1)");
        let err = results[0].as_ref().unwrap_err();
        assert_eq!(err.leaked_break_is_syntax_error(), ErrorKind::NotAVariable);
    }

    #[test]
    fn quote_returns_its_argument_unevaluated() {
        let results = eval_all("(QUOTE (+ 1 2))");
        assert_eq!(results[0].as_ref().unwrap().to_string(), "(+ 1 2)");
    }
}
