//! The AST/value node model: a tagged union with an origin tag controlling
//! release policy (spec.md §3, §4.1).
//!
//! A [`Node`] is a cheaply-cloneable handle (`Rc<RefCell<NodeData>>`). This
//! is the reference-counted-handle representation spec.md §9's design notes
//! call out as option (b): cloning a handle is how the evaluator hands back
//! "a borrowed reference to a variable node" — the clone shares the same
//! backing cell, so mutating through one handle (`INC`/`DEC`/`SET`) is
//! visible through every other handle that aliases the same variable.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::ErrorKind;

/// Ownership class controlling who releases a node. See spec.md §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Owned by the parsed program; never released by the evaluator.
    Ast,
    /// Owned by the environment; released only on teardown or replacement.
    Variable,
    /// Freshly produced by an operator; released by whoever consumes it.
    Temporary,
}

/// The payload shape for a node, keyed by its kind tag.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Number(i64),
    Boolean(bool),
    Symbol(String),
    List(Vec<Node>),
}

struct NodeData {
    origin: Origin,
    kind: NodeKind,
    #[cfg(feature = "ref-count-panic")]
    released: std::cell::Cell<bool>,
}

/// A tagged-union AST/value node. See the module docs for the ownership
/// model this handle implements.
#[derive(Clone)]
pub struct Node(Rc<RefCell<NodeData>>);

impl Node {
    pub(crate) fn new(kind: NodeKind, origin: Origin) -> Self {
        Self(Rc::new(RefCell::new(NodeData {
            origin,
            kind,
            #[cfg(feature = "ref-count-panic")]
            released: std::cell::Cell::new(false),
        })))
    }

    /// `make-number` (spec.md §4.1). Takes the origin directly rather than
    /// returning an origin-unset node — see DESIGN.md for this Open
    /// Question resolution.
    #[must_use]
    pub fn number(value: i64, origin: Origin) -> Self {
        Self::new(NodeKind::Number(value), origin)
    }

    /// `make-boolean`.
    #[must_use]
    pub fn boolean(truthy: bool, origin: Origin) -> Self {
        Self::new(NodeKind::Boolean(truthy), origin)
    }

    /// `make-symbol`. `text` is stored verbatim; callers are responsible for
    /// upper-casing per the preprocessor contract (spec.md §6).
    #[must_use]
    pub fn symbol(text: impl Into<String>, origin: Origin) -> Self {
        Self::new(NodeKind::Symbol(text.into()), origin)
    }

    /// `make-empty-list`.
    #[must_use]
    pub fn empty_list(origin: Origin) -> Self {
        Self::new(NodeKind::List(Vec::new()), origin)
    }

    /// A list node pre-populated with `children`.
    #[must_use]
    pub fn list(children: Vec<Node>, origin: Origin) -> Self {
        Self::new(NodeKind::List(children), origin)
    }

    #[must_use]
    pub fn origin(&self) -> Origin {
        self.0.borrow().origin
    }

    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self.0.borrow().kind, NodeKind::Number(_))
    }

    #[must_use]
    pub fn is_boolean(&self) -> bool {
        matches!(self.0.borrow().kind, NodeKind::Boolean(_))
    }

    #[must_use]
    pub fn is_symbol(&self) -> bool {
        matches!(self.0.borrow().kind, NodeKind::Symbol(_))
    }

    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self.0.borrow().kind, NodeKind::List(_))
    }

    /// `ATOM` predicate: true iff this node is not a list.
    #[must_use]
    pub fn is_atom(&self) -> bool {
        !self.is_list()
    }

    #[must_use]
    pub fn as_number(&self) -> Option<i64> {
        match self.0.borrow().kind {
            NodeKind::Number(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_boolean(&self) -> Option<bool> {
        match self.0.borrow().kind {
            NodeKind::Boolean(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the symbol text, cloned out of the node.
    #[must_use]
    pub fn symbol_text(&self) -> Option<String> {
        match &self.0.borrow().kind {
            NodeKind::Symbol(text) => Some(text.clone()),
            _ => None,
        }
    }

    /// Number of children, or `None` if this node is not a list.
    #[must_use]
    pub fn list_len(&self) -> Option<usize> {
        match &self.0.borrow().kind {
            NodeKind::List(children) => Some(children.len()),
            _ => None,
        }
    }

    /// The child at `index`, cloned (a cheap `Rc` clone — a new handle onto
    /// the same underlying data). `None` if not a list or out of bounds.
    #[must_use]
    pub fn list_get(&self, index: usize) -> Option<Node> {
        match &self.0.borrow().kind {
            NodeKind::List(children) => children.get(index).cloned(),
            _ => None,
        }
    }

    /// All children, cloned into a fresh `Vec` of handles.
    ///
    /// # Errors
    /// `ErrorKind::Internal` if this node is not a list.
    pub fn list_children(&self) -> Result<Vec<Node>, ErrorKind> {
        match &self.0.borrow().kind {
            NodeKind::List(children) => Ok(children.clone()),
            _ => Err(ErrorKind::Internal),
        }
    }

    /// `list-append`: appends `child` to this list node in place.
    ///
    /// # Errors
    /// `ErrorKind::Internal` if `self` is not a list.
    pub fn list_append(&self, child: Node) -> Result<(), ErrorKind> {
        match &mut self.0.borrow_mut().kind {
            NodeKind::List(children) => {
                children.push(child);
                Ok(())
            }
            _ => Err(ErrorKind::Internal),
        }
    }

    /// Mutates this node's payload in place, preserving its handle identity
    /// (spec.md §9: "an implementation must not swap the node handle inside
    /// the environment on update — only its payload"). Used by `INC`/`DEC`
    /// (numbers) and `SET` (arbitrary deep-copied payload).
    pub(crate) fn set_kind(&self, kind: NodeKind) {
        self.0.borrow_mut().kind = kind;
    }

    /// Same identity-preserving mutation as [`Self::set_kind`], but hands
    /// back the previous payload so the caller can release it explicitly.
    /// Used by `SET`, which must release the variable's old contents before
    /// installing the deep-copied new value.
    pub(crate) fn replace_kind(&self, kind: NodeKind) -> NodeKind {
        std::mem::replace(&mut self.0.borrow_mut().kind, kind)
    }

    /// Unwraps a freshly built, uniquely-owned node into its payload. Used
    /// by `SET` to move a `deep_copy`'s payload into a variable's storage
    /// without leaving the temporary copy's wrapper node around.
    pub(crate) fn into_kind(self) -> NodeKind {
        self.0.borrow().kind.clone()
    }

    /// `deep-copy`: returns a fresh node whose every descendant is newly
    /// allocated and tagged with `target_origin`.
    #[must_use]
    pub fn deep_copy(&self, target_origin: Origin) -> Node {
        let data = self.0.borrow();
        match &data.kind {
            NodeKind::Number(v) => Node::number(*v, target_origin),
            NodeKind::Boolean(v) => Node::boolean(*v, target_origin),
            NodeKind::Symbol(s) => Node::symbol(s.clone(), target_origin),
            NodeKind::List(children) => {
                let copied = children.iter().map(|c| c.deep_copy(target_origin)).collect();
                Node::list(copied, target_origin)
            }
        }
    }

    /// Writes the Lisp-like external form of this node (spec.md §4.1
    /// `print`): integers as decimal, `T`/`NIL` for booleans, symbols as
    /// their text, lists as `(child0 child1 …)`.
    pub fn write_external(&self, out: &mut impl fmt::Write) -> fmt::Result {
        match &self.0.borrow().kind {
            NodeKind::Number(v) => write!(out, "{v}"),
            NodeKind::Boolean(true) => out.write_str("T"),
            NodeKind::Boolean(false) => out.write_str("NIL"),
            NodeKind::Symbol(text) => out.write_str(text),
            NodeKind::List(children) => {
                out.write_char('(')?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        out.write_char(' ')?;
                    }
                    child.write_external(out)?;
                }
                out.write_char(')')
            }
        }
    }

    /// True iff this node and `other` print identically (spec.md §8
    /// property 4, structural equality).
    #[must_use]
    pub fn prints_same_as(&self, other: &Node) -> bool {
        self.to_string() == other.to_string()
    }

    /// The number of live handles onto this node's backing storage. Test-only
    /// introspection used to confirm a release walk actually dropped its
    /// stake in a node (spec.md §8 property 1) rather than merely becoming
    /// unreachable through the handle that called it.
    #[must_use]
    pub fn strong_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_external(f)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        write!(f, "Node({:?}, {:?})", data.origin, data.kind)
    }
}

/// Consumes a node and recursively releases it, descending into children
/// that satisfy `should_descend`. Mirrors the teacher's `DropWithHeap`
/// trait shape (`crates/ouros/src/heap.rs`): an explicit, visible "I am
/// done with this value" operation rather than relying on incidental
/// `Drop` behavior to get the origin-stop-at-alias policy right.
fn release_walk(node: Node, should_descend: impl Fn(Origin) -> bool + Copy) {
    let Ok(cell) = Rc::try_unwrap(node.0) else {
        // Still aliased elsewhere (e.g. an environment slot, or another
        // surviving handle into the same subtree) — this handle's share of
        // the reference count is simply dropped here.
        return;
    };
    let data = cell.into_inner();
    #[cfg(feature = "ref-count-panic")]
    data.released.set(true);
    if let NodeKind::List(children) = data.kind {
        for child in children {
            if should_descend(child.origin()) {
                release_walk(child, should_descend);
            }
            // else: an alias into Ast/Variable storage owned elsewhere —
            // the walk stops here, per spec.md §3 invariant 4.
        }
    }
}

/// `release(node)`: unconditional recursive release, descending into every
/// child regardless of origin. Used to tear down an entire owned subtree —
/// a variable's value on `release-all`, or the whole parsed program.
pub fn release(node: Node) {
    release_walk(node, |_| true);
}

/// The `release-temporary` operation (spec.md §4.1): skips the walk
/// entirely unless the node's own origin is `Temporary`; otherwise walks
/// children, stopping at the first non-`Temporary` child in each branch.
pub trait ReleaseTemporary {
    fn release_temporary(self);
}

impl ReleaseTemporary for Node {
    fn release_temporary(self) {
        if self.origin() != Origin::Temporary {
            return;
        }
        release_walk(self, |origin| origin == Origin::Temporary);
    }
}

#[cfg(feature = "ref-count-panic")]
impl Drop for NodeData {
    fn drop(&mut self) {
        if self.origin == Origin::Temporary && !self.released.get() && !std::thread::panicking() {
            panic!("temporary node dropped without going through release_temporary/release");
        }
    }
}
