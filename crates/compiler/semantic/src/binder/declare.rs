//! Declaration pass: creates the symbols of one file and merges them with what
//! earlier files declared.

use prism_compiler_diagnostics::Diagnostic;
use prism_compiler_parser::ast::{
    AstNode, EnumMember, FieldDecl, HasModifiers, HasName, HasParams, HasTypeParams, MemberDecl,
    MethodDecl, ModifierList, NamespaceDecl, Param, PropertyDecl, RecordDecl, TypeDecl,
    TypeDeclKind, TypeParam,
};
use prism_compiler_parser::{SyntaxKind, SyntaxNode};
use smol_str::SmolStr;

use super::Binder;
use crate::compilation::span;
use crate::symbols::{
    Accessibility, DeclModifiers, FileIndex, MethodKind, SymbolData, SymbolIndex, SymbolKind,
    TypeKind,
};

/// Explicit accessibility written in a modifier list.
fn written_accessibility(list: Option<&ModifierList>) -> Option<Accessibility> {
    let list = list?;
    let has = |kind| list.modifiers().any(|m| m == kind);
    let accessibility = if has(SyntaxKind::PUBLIC_KW) {
        Accessibility::Public
    } else if has(SyntaxKind::PROTECTED_KW) && has(SyntaxKind::INTERNAL_KW) {
        Accessibility::ProtectedOrInternal
    } else if has(SyntaxKind::PROTECTED_KW) && has(SyntaxKind::PRIVATE_KW) {
        Accessibility::ProtectedAndInternal
    } else if has(SyntaxKind::PROTECTED_KW) {
        Accessibility::Protected
    } else if has(SyntaxKind::INTERNAL_KW) {
        Accessibility::Internal
    } else if has(SyntaxKind::PRIVATE_KW) {
        Accessibility::Private
    } else {
        return None;
    };
    Some(accessibility)
}

fn written_modifiers(list: Option<&ModifierList>) -> DeclModifiers {
    list.map(|list| {
        list.modifiers()
            .filter_map(DeclModifiers::from_keyword)
            .fold(DeclModifiers::empty(), |acc, flag| acc | flag)
    })
    .unwrap_or_default()
}

fn type_kind_of(kind: TypeDeclKind) -> TypeKind {
    match kind {
        TypeDeclKind::Class | TypeDeclKind::Record => TypeKind::Class,
        TypeDeclKind::Struct | TypeDeclKind::RecordStruct => TypeKind::Struct,
        TypeDeclKind::Interface => TypeKind::Interface,
        TypeDeclKind::Enum => TypeKind::Enum,
        TypeDeclKind::Delegate => TypeKind::Delegate,
    }
}

impl Binder {
    pub(super) fn declare_file(&mut self, file: FileIndex) {
        let root = self.roots[file].clone();
        let global = self.data.global_namespace;
        self.declare_namespace_body(file, &root, global);
    }

    fn declare_namespace_body(&mut self, file: FileIndex, node: &SyntaxNode, namespace: SymbolIndex) {
        for child in node.children() {
            if let Some(decl) = NamespaceDecl::cast(child.clone()) {
                let Some(name) = decl.name() else { continue };
                let innermost = name
                    .segments()
                    .into_iter()
                    .fold(namespace, |outer, segment| self.namespace(outer, segment));
                self.add_declaration(innermost, file, &child);
                self.declare_namespace_body(file, &child, innermost);
            } else if let Some(decl) = TypeDecl::cast(child) {
                self.declare_type(file, &decl, namespace);
            }
        }
    }

    /// The namespace `name` inside `outer`, created on first use.
    fn namespace(&mut self, outer: SymbolIndex, name: SmolStr) -> SymbolIndex {
        let existing = self.data.symbols[outer].members.iter().copied().find(|&member| {
            let symbol = &self.data.symbols[member];
            symbol.kind == SymbolKind::Namespace && symbol.name == name
        });
        if let Some(existing) = existing {
            return existing;
        }
        let mut data = SymbolData::new(SymbolKind::Namespace, name, Some(outer));
        data.accessibility = Accessibility::Public;
        let index = self.push_symbol(data);
        self.data.symbols[outer].members.push(index);
        index
    }

    fn default_accessibility(&self, container: SymbolIndex) -> Accessibility {
        let container = &self.data.symbols[container];
        match (container.kind, container.type_kind) {
            (SymbolKind::Namespace, _) => Accessibility::Internal,
            (_, Some(TypeKind::Interface | TypeKind::Enum)) => Accessibility::Public,
            _ => Accessibility::Private,
        }
    }

    fn is_interface(&self, index: SymbolIndex) -> bool {
        self.data.symbols[index].type_kind == Some(TypeKind::Interface)
    }

    fn declare_type(&mut self, file: FileIndex, decl: &TypeDecl, container: SymbolIndex) {
        let Some(name) = decl.name() else { return };
        let arity = decl.type_params().len();
        let list = decl.modifier_list();
        let mut modifiers = written_modifiers(list.as_ref());
        let type_kind = type_kind_of(decl.kind());
        if matches!(type_kind, TypeKind::Struct | TypeKind::Enum | TypeKind::Delegate) {
            modifiers |= DeclModifiers::SEALED;
        }
        if matches!(decl.kind(), TypeDeclKind::Record | TypeDeclKind::RecordStruct) {
            modifiers |= DeclModifiers::RECORD;
        }

        let existing = self.data.symbols[container].members.iter().copied().find(|&member| {
            let symbol = &self.data.symbols[member];
            symbol.kind == SymbolKind::NamedType && symbol.name == name && symbol.arity() == arity
        });

        let index = match existing {
            Some(existing) => {
                let previous = self.data.symbols[existing].modifiers;
                let previous_partial = previous.contains(DeclModifiers::PARTIAL);
                let partial = modifiers.contains(DeclModifiers::PARTIAL);
                if !(previous_partial && partial) {
                    let range = decl
                        .name_token()
                        .map(|token| token.text_range())
                        .unwrap_or_else(|| decl.syntax().text_range());
                    let diagnostic = if previous_partial || partial {
                        Diagnostic::missing_partial_modifier(&name, span(range))
                    } else {
                        Diagnostic::duplicate_definition(&name, span(range))
                    };
                    self.report(file, diagnostic);
                }
                existing
            }
            None => {
                let mut data = SymbolData::new(SymbolKind::NamedType, name, Some(container));
                data.type_kind = Some(type_kind);
                data.accessibility = self.default_accessibility(container);
                let index = self.push_symbol(data);
                self.data.symbols[container].members.push(index);
                index
            }
        };

        {
            let symbol = &mut self.data.symbols[index];
            symbol.modifiers |= modifiers;
            if let Some(accessibility) = written_accessibility(list.as_ref()) {
                symbol.accessibility = accessibility;
            }
        }
        self.add_declaration(index, file, decl.syntax());

        for (ordinal, param) in decl.type_params().iter().enumerate() {
            self.declare_type_parameter(file, param, index, ordinal);
        }

        if type_kind == TypeKind::Delegate {
            self.declare_delegate_invoke(file, decl, index);
            return;
        }
        for member in decl.members() {
            self.declare_member(file, &member, index);
        }
        if let Some(record) = RecordDecl::cast(decl.syntax().clone()) {
            if record.param_list().is_some() {
                self.declare_record_parameters(file, &record, index);
            }
        }
    }

    fn declare_type_parameter(
        &mut self,
        file: FileIndex,
        param: &TypeParam,
        owner: SymbolIndex,
        ordinal: usize,
    ) {
        // Later partial declarations re-declare the same type parameters.
        if let Some(&existing) = self.data.symbols[owner].type_parameters.get(ordinal) {
            self.add_declaration(existing, file, param.syntax());
            return;
        }
        let name = param.name().unwrap_or_default();
        let mut data = SymbolData::new(SymbolKind::TypeParameter, name, Some(owner));
        data.ordinal = ordinal;
        let index = self.push_symbol(data);
        self.data.symbols[owner].type_parameters.push(index);
        self.add_declaration(index, file, param.syntax());
    }

    fn declare_member(&mut self, file: FileIndex, member: &MemberDecl, owner: SymbolIndex) {
        let node = member.syntax();
        match node.kind() {
            kind if kind.is_type_decl() => {
                if let Some(decl) = TypeDecl::cast(node.clone()) {
                    self.declare_type(file, &decl, owner);
                }
            }
            SyntaxKind::METHOD_DECL => {
                if let Some(decl) = MethodDecl::cast(node.clone()) {
                    self.declare_method(file, &decl, owner);
                }
            }
            SyntaxKind::CONSTRUCTOR_DECL => self.declare_constructor(file, member, owner),
            SyntaxKind::PROPERTY_DECL => {
                if let Some(decl) = PropertyDecl::cast(node.clone()) {
                    self.declare_property(file, &decl, owner);
                }
            }
            SyntaxKind::FIELD_DECL => {
                if let Some(decl) = FieldDecl::cast(node.clone()) {
                    self.declare_fields(file, &decl, owner);
                }
            }
            SyntaxKind::ENUM_MEMBER => {
                if let Some(decl) = EnumMember::cast(node.clone()) {
                    self.declare_enum_member(file, &decl, owner);
                }
            }
            _ => {}
        }
    }

    /// Creates a member symbol of `owner` with written modifiers and accessibility.
    fn new_member(
        &self,
        owner: SymbolIndex,
        kind: SymbolKind,
        name: SmolStr,
        list: Option<&ModifierList>,
    ) -> SymbolData {
        let mut data = SymbolData::new(kind, name, Some(owner));
        data.modifiers = written_modifiers(list);
        data.accessibility =
            written_accessibility(list).unwrap_or_else(|| self.default_accessibility(owner));
        data
    }

    fn add_member(&mut self, owner: SymbolIndex, data: SymbolData) -> SymbolIndex {
        let index = self.push_symbol(data);
        self.data.symbols[owner].members.push(index);
        index
    }

    fn declare_method(&mut self, file: FileIndex, decl: &MethodDecl, owner: SymbolIndex) {
        let Some(name) = decl.name() else { return };
        let list = decl.modifier_list();
        let mut data = self.new_member(owner, SymbolKind::Method, name, list.as_ref());
        data.method_kind = Some(MethodKind::Ordinary);
        if self.is_interface(owner)
            && !data.modifiers.contains(DeclModifiers::STATIC)
            && !decl.has_body()
        {
            data.modifiers |= DeclModifiers::ABSTRACT;
        }
        let index = self.add_member(owner, data);
        self.add_declaration(index, file, decl.syntax());
        for (ordinal, param) in decl.type_params().iter().enumerate() {
            self.declare_type_parameter(file, param, index, ordinal);
        }
        self.declare_parameters(file, &decl.params(), index);
    }

    fn declare_constructor(&mut self, file: FileIndex, member: &MemberDecl, owner: SymbolIndex) {
        let list = member.modifier_list();
        let is_static = member.has_modifier(SyntaxKind::STATIC_KW);
        let name = if is_static { ".cctor" } else { ".ctor" };
        let mut data = self.new_member(owner, SymbolKind::Method, name.into(), list.as_ref());
        data.method_kind = Some(if is_static {
            MethodKind::StaticConstructor
        } else {
            MethodKind::Constructor
        });
        let index = self.add_member(owner, data);
        self.add_declaration(index, file, member.syntax());
        let params: Vec<Param> = member
            .syntax()
            .children()
            .find(|n| n.kind() == SyntaxKind::PARAM_LIST)
            .map(|list| list.children().filter_map(Param::cast).collect())
            .unwrap_or_default();
        self.declare_parameters(file, &params, index);
    }

    fn declare_parameters(&mut self, file: FileIndex, params: &[Param], owner: SymbolIndex) {
        for (ordinal, param) in params.iter().enumerate() {
            let mut data =
                SymbolData::new(SymbolKind::Parameter, param.name().unwrap_or_default(), Some(owner));
            data.ordinal = ordinal;
            if param.is_params() {
                data.modifiers |= DeclModifiers::PARAMS;
            }
            if param.default_value().is_some() {
                data.modifiers |= DeclModifiers::OPTIONAL;
            }
            let index = self.push_symbol(data);
            self.data.symbols[owner].parameters.push(index);
            self.add_declaration(index, file, param.syntax());
        }
    }

    fn declare_property(&mut self, file: FileIndex, decl: &PropertyDecl, owner: SymbolIndex) {
        let Some(name) = decl.name() else { return };
        let list = decl.modifier_list();
        let mut data = self.new_member(owner, SymbolKind::Property, name, list.as_ref());
        if decl.is_expression_bodied() {
            data.modifiers |= DeclModifiers::GETTER;
        }
        for accessor in decl.accessors() {
            data.modifiers |= match accessor.keyword() {
                Some(SyntaxKind::GET_KW) => DeclModifiers::GETTER,
                Some(SyntaxKind::SET_KW) => DeclModifiers::SETTER,
                Some(SyntaxKind::INIT_KW) => DeclModifiers::SETTER | DeclModifiers::INIT_ONLY,
                _ => DeclModifiers::empty(),
            };
        }
        if self.is_interface(owner) && !data.modifiers.contains(DeclModifiers::STATIC) {
            data.modifiers |= DeclModifiers::ABSTRACT;
        }
        let index = self.add_member(owner, data);
        self.add_declaration(index, file, decl.syntax());
    }

    fn declare_fields(&mut self, file: FileIndex, decl: &FieldDecl, owner: SymbolIndex) {
        let list = decl.modifier_list();
        for declarator in decl.declarators() {
            let Some(name) = declarator.name() else { continue };
            let mut data = self.new_member(owner, SymbolKind::Field, name, list.as_ref());
            if data.modifiers.contains(DeclModifiers::CONST) {
                data.modifiers |= DeclModifiers::STATIC;
            }
            let index = self.add_member(owner, data);
            self.add_declaration(index, file, declarator.syntax());
        }
    }

    fn declare_enum_member(&mut self, file: FileIndex, decl: &EnumMember, owner: SymbolIndex) {
        let Some(name) = decl.name() else { return };
        let mut data = SymbolData::new(SymbolKind::Field, name, Some(owner));
        data.accessibility = Accessibility::Public;
        data.modifiers = DeclModifiers::CONST | DeclModifiers::STATIC;
        let index = self.add_member(owner, data);
        self.add_declaration(index, file, decl.syntax());
    }

    fn declare_delegate_invoke(&mut self, file: FileIndex, decl: &TypeDecl, owner: SymbolIndex) {
        let mut data = SymbolData::new(SymbolKind::Method, "Invoke", Some(owner));
        data.accessibility = Accessibility::Public;
        data.modifiers = DeclModifiers::IMPLICIT | DeclModifiers::VIRTUAL;
        data.method_kind = Some(MethodKind::DelegateInvoke);
        let index = self.add_member(owner, data);
        self.declare_parameters(file, &decl.params(), index);
    }

    /// Positional record parameters: a primary constructor plus one property per
    /// parameter the body does not declare itself.
    fn declare_record_parameters(&mut self, file: FileIndex, record: &RecordDecl, owner: SymbolIndex) {
        let params = record.params();

        let mut constructor = SymbolData::new(SymbolKind::Method, ".ctor", Some(owner));
        constructor.accessibility = Accessibility::Public;
        constructor.method_kind = Some(MethodKind::Constructor);
        let constructor = self.add_member(owner, constructor);
        self.declare_parameters(file, &params, constructor);

        let accessors = if record.is_struct() && !record.has_modifier(SyntaxKind::READONLY_KW) {
            DeclModifiers::GETTER | DeclModifiers::SETTER
        } else {
            DeclModifiers::GETTER | DeclModifiers::SETTER | DeclModifiers::INIT_ONLY
        };
        for param in &params {
            let Some(name) = param.name() else { continue };
            let declared = self.data.symbols[owner]
                .members
                .iter()
                .any(|&member| self.data.symbols[member].name == name);
            if declared {
                continue;
            }
            let mut data = SymbolData::new(SymbolKind::Property, name, Some(owner));
            data.accessibility = Accessibility::Public;
            data.modifiers = accessors;
            let index = self.add_member(owner, data);
            self.add_declaration(index, file, param.syntax());
        }
    }

    /// Parameterless constructors the language supplies when none is written.
    pub(super) fn synthesize_constructors(&mut self) {
        let types: Vec<SymbolIndex> = self
            .data
            .symbols
            .iter_enumerated()
            .filter(|(_, s)| {
                s.kind == SymbolKind::NamedType
                    && matches!(s.type_kind, Some(TypeKind::Class | TypeKind::Struct))
                    && !s.modifiers.contains(DeclModifiers::STATIC)
            })
            .map(|(index, _)| index)
            .collect();

        for owner in types {
            let symbol = &self.data.symbols[owner];
            let is_struct = symbol.type_kind == Some(TypeKind::Struct);
            let has_constructor = symbol.members.iter().any(|&member| {
                let member = &self.data.symbols[member];
                member.method_kind == Some(MethodKind::Constructor)
                    && (!is_struct || member.parameters.is_empty())
            });
            if has_constructor {
                continue;
            }
            let accessibility = if symbol.modifiers.contains(DeclModifiers::ABSTRACT) {
                Accessibility::Protected
            } else {
                Accessibility::Public
            };
            let mut data = SymbolData::new(SymbolKind::Method, ".ctor", Some(owner));
            data.accessibility = accessibility;
            data.modifiers = DeclModifiers::IMPLICIT;
            data.method_kind = Some(MethodKind::Constructor);
            self.add_member(owner, data);
        }
    }
}
