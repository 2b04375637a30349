//! Tree utilities: debug dumps, trivia-insensitive comparison and modifier rewriting.

use std::fmt::Write;

use rowan::{GreenNode, GreenToken, NodeOrToken};

use crate::syntax_kind::SyntaxKind::{self, *};
use crate::{SyntaxElement, SyntaxNode};

/// Indented `KIND@range` dump of `node`, one element per line. Whitespace tokens are
/// omitted; comments are kept.
pub fn debug_tree(node: &SyntaxNode) -> String {
    let mut out = String::new();
    write_element(&mut out, &NodeOrToken::Node(node.clone()), 0);
    out
}

fn write_element(out: &mut String, element: &SyntaxElement, depth: usize) {
    let indent = "  ".repeat(depth);
    match element {
        NodeOrToken::Node(node) => {
            let _ = writeln!(out, "{indent}{:?}@{:?}", node.kind(), node.text_range());
            for child in node.children_with_tokens() {
                write_element(out, &child, depth + 1);
            }
        }
        NodeOrToken::Token(token) if token.kind() == WHITESPACE => {}
        NodeOrToken::Token(token) => {
            let _ = writeln!(
                out,
                "{indent}{:?}@{:?} {:?}",
                token.kind(),
                token.text_range(),
                token.text()
            );
        }
    }
}

/// Structural equality: same node kinds and the same significant token kinds and
/// texts, in the same order. Whitespace and comments are ignored.
pub fn is_equivalent(a: &SyntaxNode, b: &SyntaxNode) -> bool {
    if a.kind() != b.kind() {
        return false;
    }
    let significant = |node: &SyntaxNode| {
        node.children_with_tokens()
            .filter(|element| !element.kind().is_trivia())
            .collect::<Vec<_>>()
    };
    let (left, right) = (significant(a), significant(b));
    left.len() == right.len()
        && left.iter().zip(&right).all(|pair| match pair {
            (NodeOrToken::Node(l), NodeOrToken::Node(r)) => is_equivalent(l, r),
            (NodeOrToken::Token(l), NodeOrToken::Token(r)) => {
                l.kind() == r.kind() && l.text() == r.text()
            }
            _ => false,
        })
}

/// Structural hash consistent with [`is_equivalent`].
pub fn structural_hash<H: std::hash::Hasher>(node: &SyntaxNode, state: &mut H) {
    use std::hash::Hash;
    node.kind().hash(state);
    for element in node.children_with_tokens() {
        match element {
            NodeOrToken::Node(child) => structural_hash(&child, state),
            NodeOrToken::Token(token) if !token.kind().is_trivia() => {
                token.kind().hash(state);
                token.text().hash(state);
            }
            NodeOrToken::Token(_) => {}
        }
    }
}

/// Returns a detached copy of `decl` whose `MODIFIER_LIST` holds exactly `modifiers`,
/// in the given order, separated by single spaces. Everything else, trivia included,
/// is preserved. A declaration without a modifier list is returned unchanged.
pub fn with_modifier_list(decl: &SyntaxNode, modifiers: &[SyntaxKind]) -> SyntaxNode {
    let Some(list) = decl.children().find(|n| n.kind() == MODIFIER_LIST) else {
        return SyntaxNode::new_root(decl.green().into_owned());
    };

    let mut tokens = Vec::with_capacity(modifiers.len() * 2);
    for (i, kind) in modifiers.iter().enumerate() {
        let Some(text) = kind.text() else { continue };
        if i > 0 {
            tokens.push(NodeOrToken::Token(GreenToken::new(WHITESPACE.into(), " ")));
        }
        tokens.push(NodeOrToken::Token(GreenToken::new((*kind).into(), text)));
    }
    let new_list = GreenNode::new(MODIFIER_LIST.into(), tokens);

    let was_empty = list.first_token().is_none();
    let mut children: Vec<NodeOrToken<GreenNode, GreenToken>> = Vec::new();
    let mut elements = decl.children_with_tokens().peekable();
    while let Some(element) = elements.next() {
        match element {
            NodeOrToken::Node(node) if node == list => {
                children.push(NodeOrToken::Node(new_list.clone()));
                let next_is_space = elements
                    .peek()
                    .is_some_and(|next| next.kind() == WHITESPACE);
                if modifiers.is_empty() && !was_empty && next_is_space {
                    // Drop the separator that followed the removed modifiers.
                    elements.next();
                } else if !modifiers.is_empty() && was_empty && !next_is_space {
                    children.push(NodeOrToken::Token(GreenToken::new(WHITESPACE.into(), " ")));
                }
            }
            NodeOrToken::Node(node) => children.push(NodeOrToken::Node(node.green().into_owned())),
            NodeOrToken::Token(token) => {
                children.push(NodeOrToken::Token(token.green().to_owned()));
            }
        }
    }
    SyntaxNode::new_root(GreenNode::new(decl.kind().into(), children))
}
