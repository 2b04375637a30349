//! Signature pass: base types, interfaces, enum underlying types and the types of
//! methods, properties, fields and parameters.

use prism_compiler_parser::ast::{AstNode, FieldDecl, MethodDecl, Param, PropertyDecl, TypeDecl, TypeRef};
use prism_compiler_parser::{SyntaxKind, SyntaxNode};

use super::scope::Scope;
use super::Binder;
use crate::special_type::SpecialType;
use crate::symbols::{
    AnnotatedType, DeclSite, MethodKind, NullableAnnotation, SymbolIndex, SymbolKind, SymbolRef,
    TypeKind,
};

impl Binder {
    pub(super) fn bind_signatures(&mut self) {
        let indices: Vec<SymbolIndex> = self.data.symbols.indices().collect();
        for index in indices {
            match self.data.symbols[index].kind {
                SymbolKind::NamedType => self.bind_type_header(index),
                SymbolKind::Method => self.bind_method_signature(index),
                SymbolKind::Property | SymbolKind::Field | SymbolKind::Parameter => {
                    self.bind_value_type(index)
                }
                _ => {}
            }
        }
    }

    /// The scope a symbol's own signature is bound in, and its declaring node.
    pub(super) fn signature_scope(
        &mut self,
        index: SymbolIndex,
        site: &DeclSite,
    ) -> Option<(Scope, SyntaxNode)> {
        let node = self.node(site)?;
        let symbol = &self.data.symbols[index];
        let scope_symbol = match symbol.kind {
            SymbolKind::NamedType | SymbolKind::Method => index,
            _ => symbol.containing.unwrap_or(self.data.global_namespace),
        };
        Some((self.scope_at(site.file, &node, scope_symbol), node))
    }

    fn bind_type_header(&mut self, index: SymbolIndex) {
        let type_kind = self.data.symbols[index].type_kind;
        let sites = self.data.symbols[index].declarations.clone();

        let mut base = None;
        let mut interfaces: Vec<SymbolRef> = Vec::new();
        let mut underlying = None;
        for site in &sites {
            let Some((scope, node)) = self.signature_scope(index, site) else { continue };
            let Some(list) = TypeDecl::cast(node).and_then(|decl| decl.base_list()) else { continue };
            for (position, ty) in list.types().enumerate() {
                let resolved = self.resolve_type(&scope, &ty).ty;
                match type_kind {
                    Some(TypeKind::Enum) => {
                        if position == 0 {
                            underlying = Some(resolved);
                        }
                    }
                    Some(TypeKind::Class)
                        if position == 0
                            && base.is_none()
                            && matches!(
                                self.data.type_kind(&resolved),
                                TypeKind::Class | TypeKind::Error
                            ) =>
                    {
                        base = Some(resolved);
                    }
                    _ => {
                        if !interfaces.contains(&resolved) {
                            interfaces.push(resolved);
                        }
                    }
                }
            }
        }

        let data = &self.data;
        let base = match type_kind {
            Some(TypeKind::Class) => base.or_else(|| {
                (data.special(SpecialType::Object) != Some(index))
                    .then(|| data.special_ref(SpecialType::Object))
                    .flatten()
            }),
            Some(TypeKind::Struct) => data.special_ref(SpecialType::ValueType),
            Some(TypeKind::Enum) => data.special_ref(SpecialType::Enum),
            Some(TypeKind::Delegate) => data.special_ref(SpecialType::MulticastDelegate),
            _ => None,
        };
        let underlying = match type_kind {
            Some(TypeKind::Enum) => Some(AnnotatedType {
                ty: underlying
                    .or_else(|| data.special_ref(SpecialType::Int32))
                    .unwrap_or_else(|| SymbolRef::error("int", 0)),
                annotation: NullableAnnotation::None,
            }),
            _ => None,
        };

        let symbol = &mut self.data.symbols[index];
        symbol.base_type = base;
        symbol.interfaces = interfaces;
        if underlying.is_some() {
            symbol.ty = underlying;
        }
    }

    fn bind_method_signature(&mut self, index: SymbolIndex) {
        let symbol = &self.data.symbols[index];
        let return_type = match symbol.method_kind {
            Some(MethodKind::Constructor | MethodKind::StaticConstructor) => self
                .data
                .special_ref(SpecialType::Void)
                .map(|ty| AnnotatedType {
                    ty,
                    annotation: NullableAnnotation::None,
                }),
            Some(MethodKind::DelegateInvoke) => {
                let Some(delegate) = symbol.containing else { return };
                let Some(site) = self.data.symbols[delegate].declarations.first().copied() else {
                    return;
                };
                self.signature_scope(delegate, &site).and_then(|(scope, node)| {
                    let ty = TypeDecl::cast(node)?.delegate_return_type()?;
                    Some(self.resolve_type(&scope, &ty))
                })
            }
            _ => {
                let Some(site) = symbol.declarations.first().copied() else { return };
                self.signature_scope(index, &site).and_then(|(scope, node)| {
                    let ty = MethodDecl::cast(node)?.return_type()?;
                    Some(self.resolve_type(&scope, &ty))
                })
            }
        };
        self.data.symbols[index].ty = return_type;
    }

    /// The written type of a property, field or parameter.
    fn bind_value_type(&mut self, index: SymbolIndex) {
        let Some(site) = self.data.symbols[index].declarations.first().copied() else { return };
        if site.kind == SyntaxKind::ENUM_MEMBER {
            let owner = self.data.symbols[index].containing;
            self.data.symbols[index].ty = owner.map(|owner| AnnotatedType {
                ty: SymbolRef::Declared(owner),
                annotation: NullableAnnotation::None,
            });
            return;
        }
        let Some((scope, node)) = self.signature_scope(index, &site) else { return };
        let Some(ty) = written_type(&node) else { return };
        let ty = self.resolve_type(&scope, &ty);
        self.data.symbols[index].ty = Some(ty);
    }
}

fn written_type(node: &SyntaxNode) -> Option<TypeRef> {
    match node.kind() {
        SyntaxKind::PROPERTY_DECL => PropertyDecl::cast(node.clone())?.ty(),
        SyntaxKind::PARAM => Param::cast(node.clone())?.ty(),
        SyntaxKind::VARIABLE_DECLARATOR => FieldDecl::cast(node.parent()?)?.ty(),
        _ => None,
    }
}
