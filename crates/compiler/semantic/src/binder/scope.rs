//! Name lookup: scopes, `using` imports and type reference resolution.

use std::sync::Arc;

use prism_compiler_diagnostics::Diagnostic;
use prism_compiler_parser::ast::{AstNode, NamedType, TypeRef, TypeRefKind, UsingDirective};
use prism_compiler_parser::{SyntaxKind, SyntaxNode};
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::Binder;
use crate::compilation::span;
use crate::options::NullableContext;
use crate::special_type::SpecialType;
use crate::symbols::{
    AnnotatedType, DeclSite, FileIndex, NullableAnnotation, SymbolIndex, SymbolKind, SymbolRef,
};

/// What a name resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Resolved {
    Namespace(SymbolIndex),
    Type(SymbolRef),
}

#[derive(Debug, Clone)]
pub(super) enum Import {
    Namespace(SymbolIndex),
    Alias(SmolStr, Resolved),
}

/// Imports of each namespace declaration and compilation unit, resolved once.
#[derive(Default)]
pub(super) struct ImportCache {
    by_container: FxHashMap<DeclSite, Arc<[Import]>>,
}

/// Where a name is looked up from.
#[derive(Debug, Clone)]
pub(super) struct Scope {
    pub file: FileIndex,
    /// Innermost symbol whose members and type parameters are visible.
    pub symbol: SymbolIndex,
    /// Imports of the enclosing namespace declarations, innermost first.
    pub imports: Vec<Import>,
}

/// One `Name<Args>` step of a dotted name.
#[derive(Debug, Clone)]
pub(super) struct PathSegment {
    pub name: SmolStr,
    pub args: Vec<TypeRef>,
}

impl PathSegment {
    pub fn plain(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }
}

pub(super) fn path_of(named: &NamedType) -> Vec<PathSegment> {
    named
        .segments()
        .iter()
        .map(|segment| PathSegment {
            name: segment.name().unwrap_or_default(),
            args: segment.type_args(),
        })
        .collect()
}

impl Binder {
    pub(super) fn scope_at(&mut self, file: FileIndex, node: &SyntaxNode, symbol: SymbolIndex) -> Scope {
        let containers: Vec<SyntaxNode> = node
            .ancestors()
            .filter(|n| matches!(n.kind(), SyntaxKind::NAMESPACE_DECL | SyntaxKind::COMPILATION_UNIT))
            .collect();
        let mut imports = Vec::new();
        for container in containers {
            imports.extend(self.imports_of(file, &container).iter().cloned());
        }
        Scope {
            file,
            symbol,
            imports,
        }
    }

    fn imports_of(&mut self, file: FileIndex, container: &SyntaxNode) -> Arc<[Import]> {
        let key = DeclSite {
            file,
            kind: container.kind(),
            range: container.text_range(),
        };
        if let Some(imports) = self.imports.by_container.get(&key) {
            return imports.clone();
        }

        // Usings are resolved from the global namespace without other imports.
        let root_scope = Scope {
            file,
            symbol: self.data.global_namespace,
            imports: Vec::new(),
        };
        let mut imports = Vec::new();
        for using in container.children().filter_map(UsingDirective::cast) {
            if using.is_static() {
                continue;
            }
            if let Some(alias) = using.alias() {
                let Some(target) = using.aliased_type() else { continue };
                let resolved = match target.shape() {
                    Some(TypeRefKind::Named(named)) => {
                        match self.resolve_path(&root_scope, &path_of(&named), named.is_global()) {
                            Some(resolved) => resolved,
                            None => {
                                self.report_unresolved(file, &named);
                                continue;
                            }
                        }
                    }
                    _ => Resolved::Type(self.resolve_type(&root_scope, &target).ty),
                };
                imports.push(Import::Alias(alias, resolved));
            } else if let Some(name) = using.name() {
                let path: Vec<PathSegment> = name.segments().into_iter().map(PathSegment::plain).collect();
                match self.resolve_path(&root_scope, &path, true) {
                    Some(Resolved::Namespace(namespace)) => imports.push(Import::Namespace(namespace)),
                    _ => self.report(
                        file,
                        Diagnostic::unresolved_type(&name.dotted(), span(name.syntax().text_range())),
                    ),
                }
            }
        }

        let imports: Arc<[Import]> = imports.into();
        self.imports.by_container.insert(key, imports.clone());
        imports
    }

    fn report_unresolved(&mut self, file: FileIndex, named: &NamedType) {
        self.report(
            file,
            Diagnostic::unresolved_type(&named.dotted_name(), span(named.syntax().text_range())),
        );
    }

    fn default_annotation(&self) -> NullableAnnotation {
        match self.data.options.nullable {
            NullableContext::Disable => NullableAnnotation::None,
            NullableContext::Enable | NullableContext::Annotations => NullableAnnotation::NotAnnotated,
        }
    }

    /// The nested type `name` of `ty` or of one of its base types.
    fn nested_type(&self, ty: SymbolIndex, name: &str, arity: usize) -> Option<SymbolIndex> {
        let mut current = Some(ty);
        // Bounded walk: base lists may be cyclic in malformed input.
        for _ in 0..64 {
            let index = current?;
            let symbol = &self.data.symbols[index];
            let found = symbol.members.iter().copied().find(|&member| {
                let member = &self.data.symbols[member];
                member.kind == SymbolKind::NamedType && member.name == name && member.arity() == arity
            });
            if found.is_some() {
                return found;
            }
            current = symbol.base_type.as_ref().and_then(SymbolRef::definition);
        }
        None
    }

    /// Member lookup inside a namespace or type.
    pub(super) fn member_of(&self, container: &Resolved, name: &str, arity: usize) -> Option<Resolved> {
        match container {
            Resolved::Namespace(namespace) => {
                let members = &self.data.symbols[*namespace].members;
                let ty = members.iter().copied().find(|&member| {
                    let member = &self.data.symbols[member];
                    member.kind == SymbolKind::NamedType && member.name == name && member.arity() == arity
                });
                if let Some(ty) = ty {
                    return Some(Resolved::Type(SymbolRef::Declared(ty)));
                }
                if arity > 0 {
                    return None;
                }
                members
                    .iter()
                    .copied()
                    .find(|&member| {
                        let member = &self.data.symbols[member];
                        member.kind == SymbolKind::Namespace && member.name == name
                    })
                    .map(Resolved::Namespace)
            }
            Resolved::Type(ty) => self
                .nested_type(ty.definition()?, name, arity)
                .map(|nested| Resolved::Type(SymbolRef::Declared(nested))),
        }
    }

    /// Unqualified lookup: type parameters and nested types of the enclosing symbols,
    /// then namespace members outward, then aliases and imported namespaces.
    pub(super) fn lookup(&self, scope: &Scope, name: &str, arity: usize) -> Option<Resolved> {
        let mut current = Some(scope.symbol);
        while let Some(index) = current {
            let symbol = &self.data.symbols[index];
            if arity == 0 {
                let type_parameter = symbol
                    .type_parameters
                    .iter()
                    .copied()
                    .find(|&param| self.data.symbols[param].name == name);
                if let Some(param) = type_parameter {
                    return Some(Resolved::Type(SymbolRef::Declared(param)));
                }
            }
            let found = match symbol.kind {
                SymbolKind::NamedType => self
                    .nested_type(index, name, arity)
                    .map(|nested| Resolved::Type(SymbolRef::Declared(nested))),
                SymbolKind::Namespace => self.member_of(&Resolved::Namespace(index), name, arity),
                _ => None,
            };
            if found.is_some() {
                return found;
            }
            current = symbol.containing;
        }

        if arity == 0 {
            let alias = scope.imports.iter().find_map(|import| match import {
                Import::Alias(alias, target) if alias == name => Some(target.clone()),
                _ => None,
            });
            if alias.is_some() {
                return alias;
            }
        }
        scope.imports.iter().find_map(|import| match import {
            Import::Namespace(namespace) => {
                match self.member_of(&Resolved::Namespace(*namespace), name, arity) {
                    Some(Resolved::Type(ty)) => Some(Resolved::Type(ty)),
                    _ => None,
                }
            }
            Import::Alias(..) => None,
        })
    }

    /// Resolves a dotted path. Type arguments are resolved (and reported) only once
    /// the generic type itself has been found.
    pub(super) fn resolve_path(
        &mut self,
        scope: &Scope,
        path: &[PathSegment],
        global: bool,
    ) -> Option<Resolved> {
        let (first, rest) = path.split_first()?;
        let mut current = if global {
            let global = Resolved::Namespace(self.data.global_namespace);
            self.member_of(&global, &first.name, first.args.len())?
        } else {
            self.lookup(scope, &first.name, first.args.len())?
        };
        current = self.apply_type_args(scope, current, &first.args);
        for segment in rest {
            current = self.member_of(&current, &segment.name, segment.args.len())?;
            current = self.apply_type_args(scope, current, &segment.args);
        }
        Some(current)
    }

    fn apply_type_args(&mut self, scope: &Scope, resolved: Resolved, args: &[TypeRef]) -> Resolved {
        match resolved {
            Resolved::Type(SymbolRef::Declared(definition)) if !args.is_empty() => {
                let arguments: Vec<SymbolRef> = args
                    .iter()
                    .map(|arg| self.resolve_type(scope, arg).ty)
                    .collect();
                Resolved::Type(self.data.constructed(definition, arguments.into()))
            }
            other => other,
        }
    }

    fn resolve_named_type(&mut self, scope: &Scope, named: &NamedType) -> SymbolRef {
        let path = path_of(named);
        match self.resolve_path(scope, &path, named.is_global()) {
            Some(Resolved::Type(ty)) => ty,
            _ => {
                self.report_unresolved(scope.file, named);
                path.last()
                    .map(|segment| SymbolRef::error(segment.name.clone(), segment.args.len()))
                    .unwrap_or_else(|| SymbolRef::error("", 0))
            }
        }
    }

    pub(super) fn resolve_type(&mut self, scope: &Scope, ty: &TypeRef) -> AnnotatedType {
        let annotation = self.default_annotation();
        match ty.shape() {
            Some(TypeRefKind::Predefined(keyword)) => {
                let resolved = SpecialType::from_keyword(keyword).and_then(|s| self.data.special_ref(s));
                let ty = match resolved {
                    Some(resolved) => resolved,
                    None => {
                        let text = keyword.text().unwrap_or("?");
                        self.report(
                            scope.file,
                            Diagnostic::unresolved_type(text, span(ty.syntax().text_range())),
                        );
                        SymbolRef::error(text, 0)
                    }
                };
                AnnotatedType { ty, annotation }
            }
            Some(TypeRefKind::Named(named)) => AnnotatedType {
                ty: self.resolve_named_type(scope, &named),
                annotation,
            },
            Some(TypeRefKind::Array { element, rank }) => {
                let element = self.resolve_type(scope, &element).ty;
                AnnotatedType {
                    ty: SymbolRef::Array {
                        element: Arc::new(element),
                        rank: rank as u8,
                    },
                    annotation,
                }
            }
            Some(TypeRefKind::Nullable(inner)) => {
                let inner = self.resolve_type(scope, &inner);
                match self.data.special(SpecialType::Nullable) {
                    Some(nullable) if self.data.is_value_type(&inner.ty) => AnnotatedType {
                        ty: self.data.constructed(nullable, Arc::from([inner.ty])),
                        annotation,
                    },
                    _ => AnnotatedType {
                        ty: inner.ty,
                        annotation: NullableAnnotation::Annotated,
                    },
                }
            }
            None => AnnotatedType {
                ty: SymbolRef::error("", 0),
                annotation,
            },
        }
    }
}
