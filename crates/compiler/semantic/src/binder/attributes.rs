//! Attribute binding: resolves each attribute class, selects a constructor and
//! evaluates positional and named arguments as typed constants.

use prism_compiler_diagnostics::Diagnostic;
use prism_compiler_parser::ast::{AstNode, Attribute, AttributeList, Expr, NamedType, Param};
use prism_compiler_parser::{SyntaxKind, SyntaxNode};
use smol_str::SmolStr;

use super::scope::{path_of, Resolved, Scope};
use super::Binder;
use crate::compilation::span;
use crate::constant::{ConstantValue, TypedConstant, TypedConstantKind};
use crate::symbols::{
    BoundAttribute, DeclModifiers, DeclSite, MethodKind, SymbolIndex, SymbolKind, SymbolRef, TypeKind,
};

const ATTRIBUTE_SUFFIX: &str = "Attribute";

impl Binder {
    pub(super) fn bind_attributes(&mut self) {
        let indices: Vec<SymbolIndex> = self.data.symbols.indices().collect();
        for index in indices {
            let sites = self.data.symbols[index].declarations.clone();
            let mut bound = Vec::new();
            for site in &sites {
                let Some(node) = self.node(site) else { continue };
                let owner = match site.kind {
                    SyntaxKind::VARIABLE_DECLARATOR => node.parent(),
                    _ => Some(node.clone()),
                };
                let Some(owner) = owner else { continue };
                let lists: Vec<AttributeList> = owner.children().filter_map(AttributeList::cast).collect();
                if lists.is_empty() {
                    continue;
                }
                let scope_symbol = self.data.symbols[index]
                    .containing
                    .unwrap_or(self.data.global_namespace);
                let scope = self.scope_at(site.file, &node, scope_symbol);
                for list in lists {
                    if !self.attribute_applies(index, site, list.target().as_deref()) {
                        continue;
                    }
                    for attribute in list.attributes() {
                        bound.push(self.bind_attribute(&scope, *site, &attribute));
                    }
                }
            }
            self.data.symbols[index].attributes = bound;
        }
    }

    /// Whether an attribute list with `target` written on `site` belongs to `index`.
    fn attribute_applies(&self, index: SymbolIndex, site: &DeclSite, target: Option<&str>) -> bool {
        let kind = self.data.symbols[index].kind;
        // A positional record parameter declares both a parameter and a property.
        let record_property = kind == SymbolKind::Property && site.kind == SyntaxKind::PARAM;
        match target {
            None => !record_property,
            Some(target) => matches!(
                (target, kind),
                ("type", SymbolKind::NamedType)
                    | ("method", SymbolKind::Method)
                    | ("field", SymbolKind::Field)
                    | ("property", SymbolKind::Property)
                    | ("param", SymbolKind::Parameter)
                    | ("typevar", SymbolKind::TypeParameter)
            ),
        }
    }

    fn bind_attribute(&mut self, scope: &Scope, owner: DeclSite, attribute: &Attribute) -> BoundAttribute {
        let syntax = attribute.syntax();
        let site = DeclSite {
            file: owner.file,
            kind: syntax.kind(),
            range: syntax.text_range(),
        };
        let class = match attribute.name() {
            Some(named) => self.resolve_attribute_class(scope, &named),
            None => SymbolRef::error("", 0),
        };

        let positional: Vec<Expr> = attribute
            .positional_args()
            .iter()
            .filter_map(|arg| arg.expr())
            .collect();
        let (constructor, constructor_args) = if class.is_error() {
            let args = positional
                .iter()
                .map(|expr| self.evaluate(scope, expr, None).unwrap_or_else(|_| TypedConstant::error()))
                .collect();
            (None, args)
        } else {
            self.bind_constructor_args(scope, &class, syntax, &positional)
        };

        let mut named_args = Vec::new();
        for arg in attribute.named_args() {
            let (Some(name), Some(expr)) = (arg.name(), arg.expr()) else { continue };
            if class.is_error() {
                let value = self.evaluate(scope, &expr, None).unwrap_or_else(|_| TypedConstant::error());
                named_args.push((name, value));
                continue;
            }
            let Some(ty) = self.settable_member_type(&class, &name) else {
                let class_name = self.type_name(&class);
                self.report(
                    scope.file,
                    Diagnostic::invalid_attribute_argument(
                        format!("'{class_name}' has no settable field or property named '{name}'"),
                        span(arg.syntax().text_range()),
                    ),
                );
                continue;
            };
            let value = self.evaluate_argument(scope, &expr, &ty);
            named_args.push((name, value));
        }

        BoundAttribute {
            class,
            constructor,
            constructor_args,
            named_args,
            site,
        }
    }

    /// `[Name]` binds to `NameAttribute` when it exists and to `Name` otherwise.
    fn resolve_attribute_class(&mut self, scope: &Scope, named: &NamedType) -> SymbolRef {
        let path = path_of(named);
        let mut suffixed = path.clone();
        if let Some(last) = suffixed.last_mut() {
            last.name = SmolStr::new(format!("{}{ATTRIBUTE_SUFFIX}", last.name));
        }
        for candidate in [suffixed, path.clone()] {
            if let Some(Resolved::Type(ty)) = self.resolve_path(scope, &candidate, named.is_global()) {
                if self.data.type_kind(&ty) == TypeKind::Class {
                    return ty;
                }
            }
        }

        let name = named.dotted_name();
        tracing::warn!(attribute = %name, "unresolved attribute class");
        self.report(
            scope.file,
            Diagnostic::unresolved_attribute(&name, span(named.syntax().text_range())),
        );
        let last = path.last().map(|segment| segment.name.clone()).unwrap_or_default();
        SymbolRef::error(last, 0)
    }

    fn bind_constructor_args(
        &mut self,
        scope: &Scope,
        class: &SymbolRef,
        syntax: &SyntaxNode,
        positional: &[Expr],
    ) -> (Option<SymbolIndex>, Vec<TypedConstant>) {
        let Some(constructor) = self.select_constructor(class, positional.len()) else {
            let class_name = self.type_name(class);
            self.report(
                scope.file,
                Diagnostic::invalid_attribute_argument(
                    format!(
                        "'{class_name}' does not contain a constructor that takes {} arguments",
                        positional.len()
                    ),
                    span(syntax.text_range()),
                ),
            );
            let args = positional
                .iter()
                .map(|expr| self.evaluate(scope, expr, None).unwrap_or_else(|_| TypedConstant::error()))
                .collect();
            return (None, args);
        };

        let parameters = self.data.symbols[constructor].parameters.clone();
        let mut args = Vec::with_capacity(parameters.len());
        for (position, &parameter) in parameters.iter().enumerate() {
            let ty = self.parameter_type(class, parameter);
            let is_params = self.data.symbols[parameter]
                .modifiers
                .contains(DeclModifiers::PARAMS);
            if is_params {
                args.push(self.pack_params(scope, &positional[position.min(positional.len())..], &ty));
                break;
            }
            match positional.get(position) {
                Some(expr) => args.push(self.evaluate_argument(scope, expr, &ty)),
                None => args.push(self.default_value(parameter, &ty)),
            }
        }
        (Some(constructor), args)
    }

    /// The first instance constructor of `class` that can take `count` arguments,
    /// preferring one whose parameter count matches exactly.
    fn select_constructor(&self, class: &SymbolRef, count: usize) -> Option<SymbolIndex> {
        let definition = class.definition()?;
        let constructors: Vec<SymbolIndex> = self.data.symbols[definition]
            .members
            .iter()
            .copied()
            .filter(|&m| self.data.symbols[m].method_kind == Some(MethodKind::Constructor))
            .collect();
        let exact = constructors
            .iter()
            .copied()
            .find(|&c| self.data.symbols[c].parameters.len() == count);
        exact.or_else(|| {
            constructors.iter().copied().find(|&c| {
                let parameters = &self.data.symbols[c].parameters;
                let required = parameters
                    .iter()
                    .filter(|&&p| {
                        !self.data.symbols[p]
                            .modifiers
                            .intersects(DeclModifiers::OPTIONAL | DeclModifiers::PARAMS)
                    })
                    .count();
                let takes_params = parameters
                    .last()
                    .is_some_and(|&p| self.data.symbols[p].modifiers.contains(DeclModifiers::PARAMS));
                count >= required && (count <= parameters.len() || takes_params)
            })
        })
    }

    fn parameter_type(&self, class: &SymbolRef, parameter: SymbolIndex) -> SymbolRef {
        match &self.data.symbols[parameter].ty {
            Some(ty) => self.data.substitute_through(&ty.ty, class),
            None => SymbolRef::error("", 0),
        }
    }

    /// A `params` argument: either one array written directly or the remaining
    /// arguments packed into an array.
    fn pack_params(&mut self, scope: &Scope, rest: &[Expr], ty: &SymbolRef) -> TypedConstant {
        if let [single] = rest {
            if let Ok(array) = self.evaluate(scope, single, Some(ty)) {
                return array;
            }
        }
        let element = match ty {
            SymbolRef::Array { element, .. } => element.as_ref().clone(),
            _ => SymbolRef::error("", 0),
        };
        let values = rest
            .iter()
            .map(|expr| self.evaluate_argument(scope, expr, &element))
            .collect();
        TypedConstant::new(TypedConstantKind::Array, Some(ty.clone()), ConstantValue::Array(values))
    }

    fn evaluate_argument(&mut self, scope: &Scope, expr: &Expr, ty: &SymbolRef) -> TypedConstant {
        match self.evaluate(scope, expr, Some(ty)) {
            Ok(value) => value,
            Err(message) => {
                self.report(
                    scope.file,
                    Diagnostic::invalid_attribute_argument(message, span(expr.syntax().text_range())),
                );
                TypedConstant::error()
            }
        }
    }

    /// The written default of an optional parameter.
    fn default_value(&mut self, parameter: SymbolIndex, ty: &SymbolRef) -> TypedConstant {
        let Some(site) = self.data.symbols[parameter].declarations.first().copied() else {
            return TypedConstant::error();
        };
        let Some((scope, node)) = self.signature_scope(parameter, &site) else {
            return TypedConstant::error();
        };
        let default = Param::cast(node)
            .and_then(|param| param.default_value())
            .and_then(|value| value.constant_expr());
        match default {
            Some(expr) => self
                .evaluate(&scope, &expr, Some(ty))
                .unwrap_or_else(|_| TypedConstant::error()),
            None => TypedConstant::error(),
        }
    }

    /// The type of a writable property or field `name` of `class` or its bases.
    fn settable_member_type(&self, class: &SymbolRef, name: &str) -> Option<SymbolRef> {
        let mut current = class.clone();
        for _ in 0..64 {
            let definition = current.definition()?;
            let symbol = &self.data.symbols[definition];
            let member = symbol.members.iter().copied().find(|&m| {
                let member = &self.data.symbols[m];
                let writable = match member.kind {
                    SymbolKind::Property => member.modifiers.contains(DeclModifiers::SETTER),
                    SymbolKind::Field => !member
                        .modifiers
                        .intersects(DeclModifiers::CONST | DeclModifiers::READONLY),
                    _ => false,
                };
                writable && !member.modifiers.contains(DeclModifiers::STATIC) && member.name == name
            });
            if let Some(member) = member {
                let ty = self.data.symbols[member].ty.as_ref()?;
                return Some(self.data.substitute_through(&ty.ty, &current));
            }
            let base = symbol.base_type.clone()?;
            current = self.data.substitute_through(&base, &current);
        }
        None
    }

    fn type_name(&self, ty: &SymbolRef) -> SmolStr {
        match ty {
            SymbolRef::Declared(index) | SymbolRef::Constructed { definition: index, .. } => {
                self.data.symbols[*index].name.clone()
            }
            SymbolRef::Array { .. } => SmolStr::new_static("array"),
            SymbolRef::Error { name, .. } => name.clone(),
        }
    }
}
