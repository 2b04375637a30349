//! # Syntax Projections
//!
//! [`OptionalSyntax<N>`] and [`ValidSyntax<N>`] wrap a typed AST node. Navigation
//! (`parent`, `ancestor`, `of_type`) stays inside the optional vocabulary so a
//! missing node flows through a chain without checks at every step.
//!
//! Two valid nodes are equal when they are structurally equivalent: same kinds and
//! same significant tokens, trivia ignored. A node reparsed from identical text is
//! equal to the original; a node with an edited modifier list is not.

mod modifiers;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use chumsky::span::SimpleSpan;
use prism_common::{Optional, Projection, Validation};
use prism_compiler_diagnostics::{LineIndex, Location};
use prism_compiler_parser::ast::AstNode;
use prism_compiler_parser::{is_equivalent, structural_hash, SyntaxKind, SyntaxNode, TextRange};
use prism_compiler_semantic::Compilation;

use crate::symbol::OptionalSymbol;

/// A syntax node of type `N` that may be missing.
#[must_use]
pub struct OptionalSyntax<N> {
    node: Option<N>,
}

impl<N: AstNode> OptionalSyntax<N> {
    pub const fn empty() -> Self {
        Self { node: None }
    }

    pub const fn new(node: Option<N>) -> Self {
        Self { node }
    }

    /// Casts an untyped node; empty when it is not an `N`.
    pub fn from_node(node: Option<SyntaxNode>) -> Self {
        Self {
            node: node.and_then(N::cast),
        }
    }

    pub fn map<R>(self, f: impl FnOnce(ValidSyntax<N>) -> R) -> Optional<R> {
        Optional::from(self.validate().map(f))
    }

    /// Alias of [`OptionalSyntax::map`].
    pub fn select<R>(self, f: impl FnOnce(ValidSyntax<N>) -> R) -> Optional<R> {
        self.map(f)
    }

    pub fn and_then<M: AstNode>(
        self,
        f: impl FnOnce(ValidSyntax<N>) -> OptionalSyntax<M>,
    ) -> OptionalSyntax<M> {
        match self.validate() {
            Some(valid) => f(valid),
            None => OptionalSyntax::empty(),
        }
    }

    pub fn filter(self, predicate: impl FnOnce(&N) -> bool) -> Self {
        Self {
            node: self.node.filter(predicate),
        }
    }

    /// The same node seen as an `M`; empty when its kind is not one of `M`'s.
    pub fn of_type<M: AstNode>(self) -> OptionalSyntax<M> {
        OptionalSyntax::from_node(self.node.map(|node| node.syntax().clone()))
    }

    pub fn parent<P: AstNode>(self) -> OptionalSyntax<P> {
        self.and_then(|valid| valid.parent())
    }

    pub fn ancestor<A: AstNode>(self) -> OptionalSyntax<A> {
        self.and_then(|valid| valid.ancestor())
    }

    pub fn match_value<R>(
        self,
        on_present: impl FnOnce(ValidSyntax<N>) -> R,
        on_absent: impl FnOnce() -> R,
    ) -> R {
        match self.validate() {
            Some(valid) => on_present(valid),
            None => on_absent(),
        }
    }

    pub fn match_do(self, on_present: impl FnOnce(ValidSyntax<N>), on_absent: impl FnOnce()) {
        self.match_value(on_present, on_absent);
    }
}

impl<N: AstNode> Default for OptionalSyntax<N> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<N: Clone> Clone for OptionalSyntax<N> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
        }
    }
}

impl<N: AstNode> From<N> for OptionalSyntax<N> {
    fn from(node: N) -> Self {
        Self::new(Some(node))
    }
}

impl<N: AstNode> From<ValidSyntax<N>> for OptionalSyntax<N> {
    fn from(valid: ValidSyntax<N>) -> Self {
        Self::new(Some(valid.node))
    }
}

impl<N: AstNode> Projection for OptionalSyntax<N> {
    type Value = N;

    const WHAT: &'static str = "syntax node";

    fn has_value(&self) -> bool {
        self.node.is_some()
    }

    fn or_null(self) -> Option<N> {
        self.node
    }
}

impl<N: AstNode> Validation for OptionalSyntax<N> {
    type Valid = ValidSyntax<N>;

    fn validate(self) -> Option<ValidSyntax<N>> {
        self.node.map(ValidSyntax::new)
    }
}

impl<N: AstNode> fmt::Debug for OptionalSyntax<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node {
            Some(node) => write!(f, "OptionalSyntax({:?})", node.syntax()),
            None => f.write_str("OptionalSyntax(<missing>)"),
        }
    }
}

/// A syntax node known to be present.
#[derive(Clone)]
pub struct ValidSyntax<N> {
    node: N,
}

impl<N: AstNode> ValidSyntax<N> {
    pub const fn new(node: N) -> Self {
        Self { node }
    }

    pub fn from_node(node: SyntaxNode) -> Option<Self> {
        N::cast(node).map(Self::new)
    }

    pub const fn node(&self) -> &N {
        &self.node
    }

    pub fn into_node(self) -> N {
        self.node
    }

    pub fn syntax(&self) -> &SyntaxNode {
        self.node.syntax()
    }

    pub fn kind(&self) -> SyntaxKind {
        self.syntax().kind()
    }

    /// Source text of the node, trivia included.
    pub fn text(&self) -> String {
        self.syntax().text().to_string()
    }

    pub fn span(&self) -> TextRange {
        self.syntax().text_range()
    }

    /// Line and column of the node inside the tree it belongs to.
    pub fn location(&self, file_path: impl Into<Arc<str>>) -> Location {
        let root = self
            .syntax()
            .ancestors()
            .last()
            .unwrap_or_else(|| self.syntax().clone());
        let index = LineIndex::new(&root.text().to_string());
        let range = self.span();
        let span = SimpleSpan::from(usize::from(range.start())..usize::from(range.end()));
        Location::new(file_path.into(), span, &index)
    }

    pub fn to_optional(&self) -> OptionalSyntax<N>
    where
        N: Clone,
    {
        OptionalSyntax::new(Some(self.node.clone()))
    }

    pub fn of_type<M: AstNode>(&self) -> OptionalSyntax<M> {
        OptionalSyntax::from_node(Some(self.syntax().clone()))
    }

    /// The direct parent, when it is a `P`.
    pub fn parent<P: AstNode>(&self) -> OptionalSyntax<P> {
        OptionalSyntax::from_node(self.syntax().parent())
    }

    /// The nearest enclosing `A`, the node itself excluded.
    pub fn ancestor<A: AstNode>(&self) -> OptionalSyntax<A> {
        OptionalSyntax::new(self.ancestors::<A>().next().map(ValidSyntax::into_node))
    }

    /// Every enclosing `A`, nearest first, computed as the iterator advances.
    pub fn ancestors<A: AstNode>(&self) -> impl Iterator<Item = ValidSyntax<A>> {
        self.syntax()
            .ancestors()
            .skip(1)
            .filter_map(A::cast)
            .map(ValidSyntax::new)
    }

    /// Every `D` below the node, in preorder.
    pub fn descendants<D: AstNode>(&self) -> impl Iterator<Item = ValidSyntax<D>> {
        self.syntax()
            .descendants()
            .skip(1)
            .filter_map(D::cast)
            .map(ValidSyntax::new)
    }

    /// The symbol the node declares in `compilation`. Empty for nodes that declare
    /// nothing and for nodes from another tree.
    pub fn to_symbol(&self, compilation: &Compilation) -> OptionalSymbol {
        compilation.declared_symbol(self.syntax()).into()
    }
}

impl<N: AstNode> PartialEq for ValidSyntax<N> {
    fn eq(&self, other: &Self) -> bool {
        is_equivalent(self.syntax(), other.syntax())
    }
}

impl<N: AstNode> Eq for ValidSyntax<N> {}

impl<N: AstNode> Hash for ValidSyntax<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        structural_hash(self.syntax(), state);
    }
}

impl<N: AstNode> fmt::Display for ValidSyntax<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.syntax(), f)
    }
}

impl<N: AstNode> fmt::Debug for ValidSyntax<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValidSyntax({:?})", self.syntax())
    }
}
