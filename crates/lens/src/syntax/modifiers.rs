//! Modifier editing on declarations.

use prism_compiler_parser::ast::HasModifiers;
use prism_compiler_parser::{with_modifier_list, SyntaxKind};

use super::ValidSyntax;

/// Position of a modifier in the conventional declaration order.
fn rank(kind: SyntaxKind) -> u8 {
    use SyntaxKind::*;
    match kind {
        PUBLIC_KW => 0,
        PRIVATE_KW => 1,
        PROTECTED_KW => 2,
        INTERNAL_KW => 3,
        STATIC_KW => 10,
        ABSTRACT_KW => 11,
        SEALED_KW => 12,
        VIRTUAL_KW => 13,
        OVERRIDE_KW => 14,
        READONLY_KW => 15,
        NEW_KW => 16,
        CONST_KW => 17,
        VOLATILE_KW => 18,
        ASYNC_KW => 20,
        EXTERN_KW => 21,
        PARTIAL_KW => 30,
        UNSAFE_KW => 40,
        _ => u8::MAX,
    }
}

impl<N: HasModifiers + Clone> ValidSyntax<N> {
    /// Modifier keywords as written.
    pub fn modifiers(&self) -> Vec<SyntaxKind> {
        self.node
            .modifier_list()
            .map(|list| list.modifiers().collect())
            .unwrap_or_default()
    }

    pub fn has_modifier(&self, kind: SyntaxKind) -> bool {
        self.node.has_modifier(kind)
    }

    /// A copy with `kind` added. Adding a modifier that is already present changes
    /// nothing but the order.
    pub fn add_modifier(&self, kind: SyntaxKind) -> Self {
        let mut modifiers = self.modifiers();
        if !modifiers.contains(&kind) {
            modifiers.push(kind);
        }
        self.with_modifiers(modifiers)
    }

    pub fn remove_modifier(&self, kind: SyntaxKind) -> Self {
        let mut modifiers = self.modifiers();
        modifiers.retain(|&modifier| modifier != kind);
        self.with_modifiers(modifiers)
    }

    /// A detached copy whose modifier list is exactly `modifiers`, deduplicated and
    /// in canonical order. Non-modifier kinds are ignored.
    pub fn with_modifiers(&self, modifiers: impl IntoIterator<Item = SyntaxKind>) -> Self {
        let mut modifiers: Vec<_> = modifiers
            .into_iter()
            .filter(|kind| kind.is_modifier())
            .collect();
        modifiers.sort_by_key(|&kind| rank(kind));
        modifiers.dedup();

        let edited = with_modifier_list(self.syntax(), &modifiers);
        // The edit keeps the node kind, so the cast back cannot fail.
        Self::from_node(edited).unwrap_or_else(|| self.clone())
    }
}
