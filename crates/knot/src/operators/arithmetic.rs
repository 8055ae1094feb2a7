//! `+ - * /` (spec.md §4.4).
//!
//! Grounded on `examples/original_source/src/operators.c`'s `oper_add` /
//! `oper_sub` / `oper_mul` / `oper_div`: evaluate each argument, check its
//! kind, fold it into an accumulator, release the per-argument temporary.
//! Overflow is unspecified by the source (spec.md §9 Open Questions); this
//! implementation reports it as `Internal` rather than wrapping silently.

use super::OperatorName;
use crate::error::{ErrorKind, EvalResult};
use crate::eval::{EvalContext, evaluate};
use crate::node::{Node, Origin, ReleaseTemporary};

pub(super) fn eval_arithmetic(
    op: OperatorName,
    list_node: &Node,
    ctx: &mut EvalContext<'_>,
    depth: usize,
) -> EvalResult<Node> {
    let children = list_node.list_children()?;
    if children.len() < 3 {
        return Err(ErrorKind::SyntaxError.into());
    }

    let mut values = Vec::with_capacity(children.len() - 1);
    for arg in &children[1..] {
        let result = evaluate(arg, ctx, depth)?;
        if !result.is_number() {
            result.release_temporary();
            return Err(ErrorKind::SyntaxError.into());
        }
        let value = result.as_number().expect("checked is_number above");
        result.release_temporary();
        values.push(value);
    }

    let folded = match op {
        OperatorName::Add => values[1..].iter().try_fold(values[0], |acc, v| acc.checked_add(*v)),
        OperatorName::Sub => values[1..].iter().try_fold(values[0], |acc, v| acc.checked_sub(*v)),
        OperatorName::Mul => values[1..].iter().try_fold(values[0], |acc, v| acc.checked_mul(*v)),
        OperatorName::Div => {
            let mut acc = Some(values[0]);
            for divisor in &values[1..] {
                if *divisor == 0 {
                    return Err(ErrorKind::ZeroDivision.into());
                }
                acc = acc.and_then(|a| a.checked_div(*divisor));
            }
            acc
        }
        _ => unreachable!("eval_arithmetic is only dispatched for +, -, *, /"),
    };

    let result = folded.ok_or(ErrorKind::Internal)?;
    Ok(Node::number(result, Origin::Temporary))
}
