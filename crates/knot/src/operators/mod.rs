//! The built-in operator table (spec.md §4.4): a fixed registry of
//! upper-cased head symbols, each with its own evaluation rule.
//!
//! Grounded on the teacher's `Builtins` enum
//! (`crates/ouros/src/builtins/mod.rs`): a `strum`-derived enum keyed by
//! symbol name dispatches to one handler per operator family, with each
//! family living in its own submodule.

use strum::EnumString;

use crate::error::{ErrorKind, EvalResult};
use crate::eval::EvalContext;
use crate::node::Node;

mod arithmetic;
mod control;
mod list_ops;
mod relational;
mod variables;

/// One entry per built-in form. Variants that aren't valid Rust
/// identifiers (`+`, `/=`, `<=`, …) get an explicit `serialize` override;
/// everything else matches its own upper-cased name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
enum OperatorName {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
    Inc,
    Dec,
    #[strum(serialize = "=")]
    Eql,
    #[strum(serialize = "/=")]
    Neql,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = "<=")]
    Le,
    #[strum(serialize = ">=")]
    Ge,
    Min,
    Max,
    Set,
    Quote,
    List,
    Atom,
    Car,
    Cdr,
    Nth,
    Length,
    If,
    While,
    Brk,
    Quit,
    Print,
}

/// Looks up `name` (already upper-cased by the preprocessor) in the
/// operator table and invokes its handler on the whole call-site list
/// `list_node` (head included), per spec.md §4.3/§9 "operator signature
/// uniformity".
pub fn dispatch(name: &str, list_node: &Node, ctx: &mut EvalContext<'_>, depth: usize) -> EvalResult<Node> {
    let op: OperatorName = name.parse().map_err(|_| ErrorKind::UnknownOperator)?;
    match op {
        OperatorName::Add | OperatorName::Sub | OperatorName::Mul | OperatorName::Div => {
            arithmetic::eval_arithmetic(op, list_node, ctx, depth)
        }
        OperatorName::Inc | OperatorName::Dec => variables::eval_inc_dec(op, list_node, ctx, depth),
        OperatorName::Eql
        | OperatorName::Neql
        | OperatorName::Lt
        | OperatorName::Gt
        | OperatorName::Le
        | OperatorName::Ge => relational::eval_relational(op, list_node, ctx, depth),
        OperatorName::Min | OperatorName::Max => relational::eval_min_max(op, list_node, ctx, depth),
        OperatorName::Set => variables::eval_set(list_node, ctx, depth),
        OperatorName::Quote => variables::eval_quote(list_node),
        OperatorName::List => list_ops::eval_list(list_node, ctx, depth),
        OperatorName::Atom => list_ops::eval_atom(list_node, ctx, depth),
        OperatorName::Car => list_ops::eval_car(list_node, ctx, depth),
        OperatorName::Cdr => list_ops::eval_cdr(list_node, ctx, depth),
        OperatorName::Nth => list_ops::eval_nth(list_node, ctx, depth),
        OperatorName::Length => list_ops::eval_length(list_node, ctx, depth),
        OperatorName::If => control::eval_if(list_node, ctx, depth),
        OperatorName::While => control::eval_while(list_node, ctx, depth),
        OperatorName::Brk => control::eval_brk(list_node),
        OperatorName::Quit => control::eval_quit(list_node),
        OperatorName::Print => control::eval_print(list_node, ctx, depth),
    }
}
