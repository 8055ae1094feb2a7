//! `LIST`, `ATOM`, `CAR`, `CDR`, `NTH`, `LENGTH` (spec.md §4.4).
//!
//! `CAR`/`CDR`/`NTH` lean on the `Node` handle's `Rc` refcounting rather
//! than special-cased release logic: extracting a child clones its handle,
//! so `release_temporary` on the spine naturally stops descending into
//! whichever child the caller still holds a clone of (its refcount never
//! drops to zero under `Rc::try_unwrap`) while every other child, if
//! `Temporary`, is freed as usual.

use super::OperatorName;
use crate::error::{ErrorKind, EvalResult};
use crate::eval::{EvalContext, evaluate};
use crate::node::{Node, Origin, ReleaseTemporary};

pub(super) fn eval_list(list_node: &Node, ctx: &mut EvalContext<'_>, depth: usize) -> EvalResult<Node> {
    let children = list_node.list_children()?;
    if children.len() < 2 {
        return Err(ErrorKind::SyntaxError.into());
    }
    let mut results = Vec::with_capacity(children.len() - 1);
    for arg in &children[1..] {
        results.push(evaluate(arg, ctx, depth)?);
    }
    Ok(Node::list(results, Origin::Temporary))
}

pub(super) fn eval_atom(list_node: &Node, ctx: &mut EvalContext<'_>, depth: usize) -> EvalResult<Node> {
    let children = list_node.list_children()?;
    if children.len() != 2 {
        return Err(ErrorKind::SyntaxError.into());
    }
    let result = evaluate(&children[1], ctx, depth)?;
    let is_atom = result.is_atom();
    result.release_temporary();
    Ok(Node::boolean(is_atom, Origin::Temporary))
}

pub(super) fn eval_car(list_node: &Node, ctx: &mut EvalContext<'_>, depth: usize) -> EvalResult<Node> {
    let children = list_node.list_children()?;
    if children.len() != 2 {
        return Err(ErrorKind::SyntaxError.into());
    }
    let target = evaluate(&children[1], ctx, depth)?;
    if target.list_len().unwrap_or(0) == 0 {
        target.release_temporary();
        return Err(ErrorKind::SyntaxError.into());
    }
    let first = target.list_get(0).expect("checked non-empty list above");
    target.release_temporary();
    Ok(first)
}

/// `CDR`: requires length ≥ 2 (spec.md §9's Open Question resolution —
/// the tail of a singleton is rejected, not an empty list).
pub(super) fn eval_cdr(list_node: &Node, ctx: &mut EvalContext<'_>, depth: usize) -> EvalResult<Node> {
    let children = list_node.list_children()?;
    if children.len() != 2 {
        return Err(ErrorKind::SyntaxError.into());
    }
    let target = evaluate(&children[1], ctx, depth)?;
    let len = target.list_len().unwrap_or(0);
    if len < 2 {
        target.release_temporary();
        return Err(ErrorKind::SyntaxError.into());
    }
    let tail: Vec<Node> = (1..len).map(|i| target.list_get(i).expect("index in bounds")).collect();
    target.release_temporary();
    Ok(Node::list(tail, Origin::Temporary))
}

pub(super) fn eval_nth(list_node: &Node, ctx: &mut EvalContext<'_>, depth: usize) -> EvalResult<Node> {
    let children = list_node.list_children()?;
    if children.len() != 3 {
        return Err(ErrorKind::SyntaxError.into());
    }
    let index_node = evaluate(&children[1], ctx, depth)?;
    if !index_node.is_number() {
        index_node.release_temporary();
        return Err(ErrorKind::SyntaxError.into());
    }
    let index = index_node.as_number().expect("checked is_number above");
    index_node.release_temporary();
    if index < 0 {
        return Err(ErrorKind::SyntaxError.into());
    }

    let target = evaluate(&children[2], ctx, depth)?;
    let index = index as usize;
    let len = target.list_len().unwrap_or(0);
    if target.is_atom() || index >= len {
        target.release_temporary();
        return Err(ErrorKind::SyntaxError.into());
    }
    let element = target.list_get(index).expect("index checked in bounds above");
    target.release_temporary();
    Ok(element)
}

pub(super) fn eval_length(list_node: &Node, ctx: &mut EvalContext<'_>, depth: usize) -> EvalResult<Node> {
    let children = list_node.list_children()?;
    if children.len() != 2 {
        return Err(ErrorKind::SyntaxError.into());
    }
    let target = evaluate(&children[1], ctx, depth)?;
    if target.is_atom() {
        target.release_temporary();
        return Err(ErrorKind::SyntaxError.into());
    }
    let len = target.list_len().expect("checked is_atom above");
    target.release_temporary();
    Ok(Node::number(len as i64, Origin::Temporary))
}
