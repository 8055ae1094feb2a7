//! The variable environment: an ordered name → `Variable`-origin-node
//! mapping, linear-scanned (spec.md §4.2). Grounded on
//! `examples/original_source/src/env.c`'s `get_var`.

use crate::error::ErrorKind;
use crate::node::{Node, Origin, release};

/// A single mutable mapping from upper-cased variable name to its current
/// value, persisted across every top-level expression of a program or REPL
/// session (spec.md Glossary).
#[derive(Default)]
pub struct Environment {
    vars: Vec<(String, Node)>,
}

impl Environment {
    #[must_use]
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    /// Linear scan; returns a cloned handle onto the variable's node (an
    /// `Rc` clone, so mutation through it is visible to the environment).
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Node> {
        self.vars.iter().find(|(n, _)| n == name).map(|(_, node)| node.clone())
    }

    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.vars.iter().any(|(n, _)| n == name)
    }

    /// `add-zero`: adds a new entry with a freshly allocated `Variable`
    /// zero `Number`. Precondition: `name` does not already exist — the
    /// caller (`SET`) checks this via `exists` first.
    ///
    /// # Errors
    /// `ErrorKind::Internal` if `name` already exists (a contract
    /// violation by the caller, not a user-facing condition).
    pub fn add_zero(&mut self, name: &str) -> Result<Node, ErrorKind> {
        if self.exists(name) {
            return Err(ErrorKind::Internal);
        }
        let node = Node::number(0, Origin::Variable);
        self.vars.push((name.to_owned(), node.clone()));
        Ok(node)
    }

    /// Releases every variable's node and drops every name string.
    pub fn release_all(&mut self) {
        for (_, node) in self.vars.drain(..) {
            release(node);
        }
    }
}

impl Drop for Environment {
    fn drop(&mut self) {
        self.release_all();
    }
}
