//! `= /= < > <= >=` and `MIN`/`MAX` (spec.md §4.4).

use super::OperatorName;
use crate::error::{ErrorKind, EvalResult};
use crate::eval::{EvalContext, evaluate};
use crate::node::{Node, Origin, ReleaseTemporary};

fn evaluate_numeric_args(
    list_node: &Node,
    ctx: &mut EvalContext<'_>,
    depth: usize,
    min_args: usize,
) -> EvalResult<Vec<i64>> {
    let children = list_node.list_children()?;
    if children.len() < min_args + 1 {
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
    Ok(values)
}

pub(super) fn eval_relational(
    op: OperatorName,
    list_node: &Node,
    ctx: &mut EvalContext<'_>,
    depth: usize,
) -> EvalResult<Node> {
    let values = evaluate_numeric_args(list_node, ctx, depth, 2)?;
    let holds = match op {
        OperatorName::Eql => values.iter().all(|v| *v == values[0]),
        OperatorName::Neql => {
            !values.iter().enumerate().any(|(i, a)| values[i + 1..].iter().any(|b| a == b))
        }
        OperatorName::Lt => values.windows(2).all(|w| w[0] < w[1]),
        OperatorName::Gt => values.windows(2).all(|w| w[0] > w[1]),
        OperatorName::Le => values.windows(2).all(|w| w[0] <= w[1]),
        OperatorName::Ge => values.windows(2).all(|w| w[0] >= w[1]),
        _ => unreachable!("eval_relational is only dispatched for comparison operators"),
    };
    Ok(Node::boolean(holds, Origin::Temporary))
}

pub(super) fn eval_min_max(
    op: OperatorName,
    list_node: &Node,
    ctx: &mut EvalContext<'_>,
    depth: usize,
) -> EvalResult<Node> {
    let values = evaluate_numeric_args(list_node, ctx, depth, 1)?;
    let result = match op {
        OperatorName::Min => *values.iter().min().expect("min_args = 1 guarantees a value"),
        OperatorName::Max => *values.iter().max().expect("min_args = 1 guarantees a value"),
        _ => unreachable!("eval_min_max is only dispatched for MIN, MAX"),
    };
    Ok(Node::number(result, Origin::Temporary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::output::NoPrint;
    use crate::parser::parse_program;

    fn eval_top(src: &str) -> EvalResult<Node> {
        let program = parse_program(src).unwrap();
        let forms = program.list_children().unwrap();
        let mut env = Environment::new();
        let mut out = NoPrint;
        let mut ctx = EvalContext::new(&mut env, &mut out);
        crate::eval::evaluate(&forms[0], &mut ctx, 0)
    }

    #[test]
    fn eql_is_true_iff_all_match_the_first() {
        assert_eq!(eval_top("(= 1 1 1)").unwrap().as_boolean(), Some(true));
        assert_eq!(eval_top("(= 1 1 2)").unwrap().as_boolean(), Some(false));
    }

    #[test]
    fn neql_is_true_iff_pairwise_distinct() {
        assert_eq!(eval_top("(/= 1 2 3)").unwrap().as_boolean(), Some(true));
        assert_eq!(eval_top("(/= 1 2 1)").unwrap().as_boolean(), Some(false));
    }

    #[test]
    fn ordering_holds_across_every_adjacent_pair() {
        assert_eq!(eval_top("(< 1 2 3)").unwrap().as_boolean(), Some(true));
        assert_eq!(eval_top("(< 1 3 2)").unwrap().as_boolean(), Some(false));
        assert_eq!(eval_top("(>= 3 3 2)").unwrap().as_boolean(), Some(true));
    }

    #[test]
    fn min_max_accept_a_single_argument() {
        assert_eq!(eval_top("(MIN 5)").unwrap().as_number(), Some(5));
        assert_eq!(eval_top("(MAX 1 9 4)").unwrap().as_number(), Some(9));
    }
}
