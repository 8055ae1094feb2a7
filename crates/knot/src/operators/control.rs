//! `IF`, `WHILE`, `BRK`, `QUIT`, `PRINT` (spec.md §4.4).

use crate::error::{ControlStatus, ErrorKind, EvalError, EvalResult};
use crate::eval::{EvalContext, evaluate};
use crate::node::{Node, Origin, ReleaseTemporary};

pub(super) fn eval_if(list_node: &Node, ctx: &mut EvalContext<'_>, depth: usize) -> EvalResult<Node> {
    let children = list_node.list_children()?;
    if children.len() != 3 && children.len() != 4 {
        return Err(ErrorKind::SyntaxError.into());
    }
    let cond = evaluate(&children[1], ctx, depth)?;
    if !cond.is_boolean() {
        cond.release_temporary();
        return Err(ErrorKind::SyntaxError.into());
    }
    let truthy = cond.as_boolean().expect("checked is_boolean above");
    cond.release_temporary();

    if truthy {
        evaluate(&children[2], ctx, depth)
    } else if children.len() == 4 {
        evaluate(&children[3], ctx, depth)
    } else {
        Ok(Node::boolean(false, Origin::Temporary))
    }
}

pub(super) fn eval_while(list_node: &Node, ctx: &mut EvalContext<'_>, depth: usize) -> EvalResult<Node> {
    let children = list_node.list_children()?;
    if children.len() < 3 {
        return Err(ErrorKind::SyntaxError.into());
    }
    let cond_node = &children[1];
    let body = &children[2..];

    loop {
        let cond = evaluate(cond_node, ctx, depth)?;
        if !cond.is_boolean() {
            cond.release_temporary();
            return Err(ErrorKind::SyntaxError.into());
        }
        let truthy = cond.as_boolean().expect("checked is_boolean above");
        cond.release_temporary();
        if !truthy {
            break;
        }

        let mut broke = false;
        for form in body {
            match evaluate(form, ctx, depth) {
                Ok(result) => result.release_temporary(),
                Err(EvalError::Control(ControlStatus::Break)) => {
                    broke = true;
                    break;
                }
                Err(other) => return Err(other),
            }
        }
        if broke {
            break;
        }
    }

    Ok(Node::boolean(false, Origin::Temporary))
}

pub(super) fn eval_brk(list_node: &Node) -> EvalResult<Node> {
    let children = list_node.list_children()?;
    if children.len() != 1 {
        return Err(ErrorKind::SyntaxError.into());
    }
    Err(ControlStatus::Break.into())
}

pub(super) fn eval_quit(list_node: &Node) -> EvalResult<Node> {
    let children = list_node.list_children()?;
    if children.len() != 1 {
        return Err(ErrorKind::SyntaxError.into());
    }
    Err(ControlStatus::Quit.into())
}

pub(super) fn eval_print(list_node: &Node, ctx: &mut EvalContext<'_>, depth: usize) -> EvalResult<Node> {
    let children = list_node.list_children()?;
    if children.len() != 2 {
        return Err(ErrorKind::SyntaxError.into());
    }
    let result = evaluate(&children[1], ctx, depth)?;
    ctx.out.write_str(&result.to_string());
    ctx.out.write_newline();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::output::CollectPrint;
    use crate::parser::parse_program;

    fn eval_top_with_output(src: &str) -> (EvalResult<Node>, String) {
        let program = parse_program(src).unwrap();
        let forms = program.list_children().unwrap();
        let mut env = Environment::new();
        let mut out = CollectPrint::new();
        let mut ctx = EvalContext::new(&mut env, &mut out);
        let result = evaluate(&forms[0], &mut ctx, 0);
        (result, out.into_output())
    }

    fn eval_top(src: &str) -> EvalResult<Node> {
        eval_top_with_output(src).0
    }

    fn eval_all(src: &str) -> Vec<EvalResult<Node>> {
        let program = parse_program(src).unwrap();
        let forms = program.list_children().unwrap();
        let mut env = Environment::new();
        let mut out = CollectPrint::new();
        let mut results = Vec::new();
        for form in &forms {
            let mut ctx = EvalContext::new(&mut env, &mut out);
            results.push(evaluate(form, &mut ctx, 0));
        }
        results
    }

    #[test]
    fn if_takes_the_else_branch_when_false() {
        assert_eq!(eval_top("(IF NIL (QUOTE YES) (QUOTE NO))").unwrap().to_string(), "NO");
    }

    #[test]
    fn if_without_else_returns_false_on_a_false_condition() {
        assert_eq!(eval_top("(IF NIL (QUOTE YES))").unwrap().as_boolean(), Some(false));
    }

    #[test]
    fn while_loops_until_condition_is_false() {
        let results = eval_all("(SET 'I 0) (WHILE (< I 3) (INC I 1)) I");
        assert_eq!(results[1].as_ref().unwrap().as_boolean(), Some(false));
        assert_eq!(results[2].as_ref().unwrap().as_number(), Some(3));
    }

    #[test]
    fn brk_terminates_the_enclosing_loop_cleanly() {
        let results = eval_all("(SET 'I 0) (WHILE (< I 10) (INC I 1) (IF (= I 3) (BRK))) I");
        assert_eq!(results[2].as_ref().unwrap().as_number(), Some(3));
    }

    #[test]
    fn brk_at_top_level_leaks_as_a_control_status() {
        let err = eval_top("(BRK)").unwrap_err();
        assert_eq!(err.leaked_break_is_syntax_error(), ErrorKind::SyntaxError);
    }

    #[test]
    fn quit_produces_a_control_quit_status() {
        let err = eval_top("(QUIT)").unwrap_err();
        assert!(matches!(err, EvalError::Control(ControlStatus::Quit)));
    }

    #[test]
    fn print_writes_the_value_and_a_newline_then_returns_it() {
        let (result, output) = eval_top_with_output("(PRINT (+ 1 2))");
        assert_eq!(result.unwrap().as_number(), Some(3));
        assert_eq!(output, "3\n");
    }
}
