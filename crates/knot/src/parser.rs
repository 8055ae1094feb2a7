//! Recursive-descent parser implementing spec.md §6's grammar:
//!
//! ```text
//! List → Expr List | ε
//! Expr → "'" Expr | "(" List ")" | Number | Symbol
//! ```
//!
//! A quoted expression `'E` desugars to the list `(QUOTE E)`. Grounded on
//! `examples/original_source/src/parser.c`'s `parse_expr`/`parse_multiple`.

use crate::error::ErrorKind;
use crate::lexer::tokenize;
use crate::node::{Node, Origin};
use crate::preprocessor::preprocess;

/// Preprocesses, tokenizes, and parses `source` into the List of top-level
/// expressions the evaluator expects (spec.md §6 "Parser contract").
///
/// # Errors
/// `ErrorKind::SyntaxError` on any malformed input: unbalanced brackets,
/// a dangling `'`, or an out-of-range numeric literal.
pub fn parse_program(source: &str) -> Result<Node, ErrorKind> {
    let preprocessed = preprocess(source);
    let tokens = tokenize(&preprocessed);
    let mut pos = 0;
    let forms = parse_list(&tokens, &mut pos, false)?;
    if pos != tokens.len() {
        return Err(ErrorKind::SyntaxError);
    }
    Ok(Node::list(forms, Origin::Ast))
}

/// `List → Expr List | ε`. `stop_at_close_paren` distinguishes a
/// bracket-delimited nested list (stop before `)`, left for the caller to
/// consume) from the top-level list (run to end of input).
fn parse_list(tokens: &[String], pos: &mut usize, stop_at_close_paren: bool) -> Result<Vec<Node>, ErrorKind> {
    let mut children = Vec::new();
    loop {
        match tokens.get(*pos) {
            None => break,
            Some(t) if stop_at_close_paren && t == ")" => break,
            _ => children.push(parse_expr(tokens, pos)?),
        }
    }
    Ok(children)
}

/// `Expr → "'" Expr | "(" List ")" | Number | Symbol`.
fn parse_expr(tokens: &[String], pos: &mut usize) -> Result<Node, ErrorKind> {
    let token = tokens.get(*pos).ok_or(ErrorKind::SyntaxError)?;
    match token.as_str() {
        "'" => {
            *pos += 1;
            let inner = parse_expr(tokens, pos)?;
            let quote_symbol = Node::symbol("QUOTE", Origin::Ast);
            Ok(Node::list(vec![quote_symbol, inner], Origin::Ast))
        }
        "(" => {
            *pos += 1;
            let children = parse_list(tokens, pos, true)?;
            match tokens.get(*pos) {
                Some(t) if t == ")" => {
                    *pos += 1;
                    Ok(Node::list(children, Origin::Ast))
                }
                _ => Err(ErrorKind::SyntaxError),
            }
        }
        ")" => Err(ErrorKind::SyntaxError),
        literal if is_number_literal(literal) => {
            let value: i64 = literal.parse().map_err(|_| ErrorKind::SyntaxError)?;
            *pos += 1;
            Ok(Node::number(value, Origin::Ast))
        }
        symbol_text => {
            *pos += 1;
            Ok(Node::symbol(symbol_text.to_owned(), Origin::Ast))
        }
    }
}

/// spec.md §6: "Numeric literals are all-digit tokens." No leading `-` — a
/// negative value can only arise from evaluation (`-`), never a literal.
fn is_number_literal(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}
