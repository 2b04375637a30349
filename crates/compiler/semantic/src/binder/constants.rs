//! Constant evaluation for enum members, `const` fields and attribute arguments.

use std::sync::Arc;

use prism_compiler_diagnostics::Diagnostic;
use prism_compiler_parser::ast::{AstNode, EnumMember, Expr, ExprKind, VariableDeclarator};
use prism_compiler_parser::{SyntaxKind, SyntaxNode, SyntaxToken};
use smol_str::SmolStr;

use super::scope::{PathSegment, Resolved, Scope};
use super::Binder;
use crate::compilation::span;
use crate::constant::{
    parse_int_literal, parse_real_literal, unquote_char, unquote_string, ConstantValue,
    IntLiteral, RealSuffix, TypedConstant, TypedConstantKind,
};
use crate::special_type::SpecialType;
use crate::symbols::{DeclModifiers, SymbolIndex, SymbolKind, SymbolRef, TypeKind};

type EvalResult = Result<TypedConstant, String>;

impl Binder {
    pub(super) fn bind_constants(&mut self) {
        let constants: Vec<SymbolIndex> = self
            .data
            .symbols
            .iter_enumerated()
            .filter(|(_, s)| s.kind == SymbolKind::Field && s.modifiers.contains(DeclModifiers::CONST))
            .map(|(index, _)| index)
            .collect();
        for field in constants {
            self.constant_of(field);
        }
    }

    /// The value of a constant field, evaluated on first request. A field whose
    /// evaluation depends on itself is an error constant.
    pub(super) fn constant_of(&mut self, field: SymbolIndex) -> TypedConstant {
        if let Some(constant) = &self.data.symbols[field].constant {
            return constant.clone();
        }
        if !self.evaluating.insert(field) {
            return TypedConstant::error();
        }
        let constant = self.evaluate_field(field);
        self.evaluating.remove(&field);
        self.data.symbols[field].constant = Some(constant.clone());
        constant
    }

    fn evaluate_field(&mut self, field: SymbolIndex) -> TypedConstant {
        let Some(owner) = self.data.symbols[field].containing else {
            return TypedConstant::error();
        };
        let Some(site) = self.data.symbols[field].declarations.first().copied() else {
            return TypedConstant::error();
        };
        let Some(node) = self.node(&site) else {
            return TypedConstant::error();
        };
        let scope = self.scope_at(site.file, &node, owner);

        if self.data.symbols[owner].type_kind == Some(TypeKind::Enum) {
            return self.evaluate_enum_member(field, owner, &scope, &node);
        }

        let target = self.data.symbols[field].ty.as_ref().map(|t| t.ty.clone());
        let initializer = VariableDeclarator::cast(node.clone())
            .and_then(|declarator| declarator.initializer())
            .and_then(|value| value.constant_expr());
        let Some(expr) = initializer else {
            let name = self.data.symbols[field].name.clone();
            self.report(
                site.file,
                Diagnostic::invalid_constant(
                    format!("The constant '{name}' must have a constant initializer"),
                    span(node.text_range()),
                ),
            );
            return TypedConstant::error();
        };
        match self.evaluate(&scope, &expr, target.as_ref()) {
            Ok(constant) => constant,
            Err(message) => {
                self.report(
                    site.file,
                    Diagnostic::invalid_constant(message, span(expr.syntax().text_range())),
                );
                TypedConstant::error()
            }
        }
    }

    fn evaluate_enum_member(
        &mut self,
        field: SymbolIndex,
        owner: SymbolIndex,
        scope: &Scope,
        node: &SyntaxNode,
    ) -> TypedConstant {
        let enum_type = SymbolRef::Declared(owner);
        let underlying = self.data.symbols[owner]
            .ty
            .as_ref()
            .map(|t| t.ty.clone())
            .unwrap_or_else(|| SymbolRef::error("int", 0));

        let explicit = EnumMember::cast(node.clone())
            .and_then(|member| member.value())
            .and_then(|value| value.constant_expr());
        let value = match explicit {
            Some(expr) => match self.evaluate(scope, &expr, Some(&underlying)) {
                Ok(constant) => constant.value,
                Err(message) => {
                    self.report(
                        scope.file,
                        Diagnostic::invalid_constant(message, span(expr.syntax().text_range())),
                    );
                    return TypedConstant::error();
                }
            },
            None => {
                let members = self.data.symbols[owner].members.clone();
                let position = members.iter().position(|&m| m == field).unwrap_or(0);
                let previous = members[..position]
                    .iter()
                    .rev()
                    .copied()
                    .find(|&m| self.data.symbols[m].kind == SymbolKind::Field);
                match previous {
                    None => self.integral_value(0, &underlying).unwrap_or(ConstantValue::I32(0)),
                    Some(previous) => {
                        let previous = self.constant_of(previous);
                        let next = previous.value.as_i128().map(|v| v + 1);
                        match next.and_then(|next| self.integral_value(next, &underlying).ok()) {
                            Some(value) => value,
                            None => return TypedConstant::error(),
                        }
                    }
                }
            }
        };
        TypedConstant::new(TypedConstantKind::Enum, Some(enum_type), value)
    }

    fn special_of(&self, ty: &SymbolRef) -> Option<SpecialType> {
        match ty {
            SymbolRef::Declared(index) => self.data.special_type_of(*index),
            _ => None,
        }
    }

    fn primitive(&self, special: SpecialType, value: ConstantValue) -> TypedConstant {
        TypedConstant::new(
            TypedConstantKind::Primitive,
            self.data.special_ref(special),
            value,
        )
    }

    /// `value` represented as the integral type `ty`, or an error when it does not
    /// fit.
    fn integral_value(&self, value: i128, ty: &SymbolRef) -> Result<ConstantValue, String> {
        let special = self.special_of(ty).unwrap_or(SpecialType::Int32);
        let fits = |min: i128, max: i128| value >= min && value <= max;
        let converted = match special {
            SpecialType::SByte if fits(i8::MIN.into(), i8::MAX.into()) => ConstantValue::I32(value as i32),
            SpecialType::Byte if fits(0, u8::MAX.into()) => ConstantValue::I32(value as i32),
            SpecialType::Int16 if fits(i16::MIN.into(), i16::MAX.into()) => ConstantValue::I32(value as i32),
            SpecialType::UInt16 if fits(0, u16::MAX.into()) => ConstantValue::I32(value as i32),
            SpecialType::Int32 if fits(i32::MIN.into(), i32::MAX.into()) => ConstantValue::I32(value as i32),
            SpecialType::UInt32 if fits(0, u32::MAX.into()) => ConstantValue::U32(value as u32),
            SpecialType::Int64 if fits(i64::MIN.into(), i64::MAX.into()) => ConstantValue::I64(value as i64),
            SpecialType::UInt64 if fits(0, u64::MAX.into()) => ConstantValue::U64(value as u64),
            _ => {
                let keyword = special.keyword().unwrap_or("integral type");
                return Err(format!("Constant value '{value}' cannot be converted to a '{keyword}'"));
            }
        };
        Ok(converted)
    }

    /// Evaluates `expr` and converts the result to `target`.
    pub(super) fn evaluate(&mut self, scope: &Scope, expr: &Expr, target: Option<&SymbolRef>) -> EvalResult {
        let natural = self.evaluate_natural(scope, expr, target)?;
        match target {
            Some(target) => self.convert(natural, target),
            None => Ok(natural),
        }
    }

    fn evaluate_natural(&mut self, scope: &Scope, expr: &Expr, target: Option<&SymbolRef>) -> EvalResult {
        let Some(shape) = expr.shape() else {
            return Err("Expected a constant expression".to_string());
        };
        match shape {
            ExprKind::Literal(token) => self.literal(&token),
            ExprKind::Prefix { op, operand } => {
                let operand = operand.ok_or_else(|| "Expected an operand".to_string())?;
                let value = self.evaluate(scope, &operand, None)?;
                self.prefix(op, value)
            }
            ExprKind::TypeOf(ty) => {
                let ty = ty.ok_or_else(|| "Expected a type in typeof".to_string())?;
                let resolved = self.resolve_type(scope, &ty).ty;
                Ok(TypedConstant::new(
                    TypedConstantKind::Type,
                    self.data.special_ref(SpecialType::Type),
                    ConstantValue::Type(resolved),
                ))
            }
            ExprKind::Name(segments) => self.evaluate_name(scope, &segments, target),
            ExprKind::Binary { op, lhs, rhs } => {
                let rhs = rhs.ok_or_else(|| "Expected an operand".to_string())?;
                let lhs = self.evaluate(scope, &lhs, target)?;
                let rhs = self.evaluate(scope, &rhs, target)?;
                self.binary(op, lhs, rhs)
            }
            ExprKind::Array(elements) => {
                let array_type = match target {
                    Some(ty @ SymbolRef::Array { .. }) => Some(ty.clone()),
                    _ => expr.array_element_type().map(|element| SymbolRef::Array {
                        element: Arc::new(self.resolve_type(scope, &element).ty),
                        rank: 1,
                    }),
                };
                let element_type = match &array_type {
                    Some(SymbolRef::Array { element, .. }) => Some(element.as_ref().clone()),
                    _ => None,
                };
                let values = elements
                    .iter()
                    .map(|element| self.evaluate(scope, element, element_type.as_ref()))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TypedConstant::new(
                    TypedConstantKind::Array,
                    array_type,
                    ConstantValue::Array(values),
                ))
            }
        }
    }

    fn literal(&self, token: &SyntaxToken) -> EvalResult {
        let text = token.text();
        let constant = match token.kind() {
            SyntaxKind::TRUE_KW => self.primitive(SpecialType::Boolean, ConstantValue::Bool(true)),
            SyntaxKind::FALSE_KW => self.primitive(SpecialType::Boolean, ConstantValue::Bool(false)),
            SyntaxKind::NULL_KW => {
                TypedConstant::new(TypedConstantKind::Primitive, None, ConstantValue::Null)
            }
            SyntaxKind::INT_NUMBER => match parse_int_literal(text)? {
                IntLiteral::I32(v) => self.primitive(SpecialType::Int32, ConstantValue::I32(v)),
                IntLiteral::U32(v) => self.primitive(SpecialType::UInt32, ConstantValue::U32(v)),
                IntLiteral::I64(v) => self.primitive(SpecialType::Int64, ConstantValue::I64(v)),
                IntLiteral::U64(v) => self.primitive(SpecialType::UInt64, ConstantValue::U64(v)),
            },
            SyntaxKind::REAL_NUMBER => match parse_real_literal(text)? {
                (v, RealSuffix::Float) => self.primitive(SpecialType::Single, ConstantValue::F32(v as f32)),
                (v, RealSuffix::Double) => self.primitive(SpecialType::Double, ConstantValue::F64(v)),
                (v, RealSuffix::Decimal) => self.primitive(SpecialType::Decimal, ConstantValue::F64(v)),
            },
            SyntaxKind::STRING => self.primitive(
                SpecialType::String,
                ConstantValue::String(SmolStr::new(unquote_string(text)?)),
            ),
            SyntaxKind::CHAR => self.primitive(SpecialType::Char, ConstantValue::Char(unquote_char(text)?)),
            _ => return Err(format!("'{text}' is not a literal")),
        };
        Ok(constant)
    }

    fn prefix(&self, op: SyntaxKind, operand: TypedConstant) -> EvalResult {
        let value = match (op, &operand.value) {
            (SyntaxKind::MINUS, ConstantValue::I32(v)) => match v.checked_neg() {
                Some(v) => ConstantValue::I32(v),
                None => ConstantValue::I64(-i64::from(*v)),
            },
            (SyntaxKind::MINUS, ConstantValue::U32(v)) => {
                let negated = -i64::from(*v);
                match i32::try_from(negated) {
                    Ok(v) => ConstantValue::I32(v),
                    Err(_) => ConstantValue::I64(negated),
                }
            }
            (SyntaxKind::MINUS, ConstantValue::I64(v)) => {
                ConstantValue::I64(v.checked_neg().ok_or("Constant overflow")?)
            }
            (SyntaxKind::MINUS, ConstantValue::U64(v)) if *v == 1 << 63 => ConstantValue::I64(i64::MIN),
            (SyntaxKind::MINUS, ConstantValue::F32(v)) => ConstantValue::F32(-v),
            (SyntaxKind::MINUS, ConstantValue::F64(v)) => ConstantValue::F64(-v),
            (SyntaxKind::TILDE, ConstantValue::I32(v)) => ConstantValue::I32(!v),
            (SyntaxKind::TILDE, ConstantValue::U32(v)) => ConstantValue::U32(!v),
            (SyntaxKind::TILDE, ConstantValue::I64(v)) => ConstantValue::I64(!v),
            (SyntaxKind::TILDE, ConstantValue::U64(v)) => ConstantValue::U64(!v),
            _ => {
                let op = op.text().unwrap_or("?");
                return Err(format!("Operator '{op}' cannot be applied to this constant"));
            }
        };
        let special = match value {
            ConstantValue::I32(_) => Some(SpecialType::Int32),
            ConstantValue::I64(_) => Some(SpecialType::Int64),
            _ => None,
        };
        let ty = match (operand.kind, special) {
            (TypedConstantKind::Primitive, Some(special)) => self.data.special_ref(special),
            _ => operand.ty,
        };
        Ok(TypedConstant::new(operand.kind, ty, value))
    }

    fn binary(&self, op: SyntaxKind, lhs: TypedConstant, rhs: TypedConstant) -> EvalResult {
        if let (SyntaxKind::PLUS, ConstantValue::String(a), ConstantValue::String(b)) =
            (op, &lhs.value, &rhs.value)
        {
            let joined = SmolStr::new(format!("{a}{b}"));
            return Ok(TypedConstant::new(lhs.kind, lhs.ty, ConstantValue::String(joined)));
        }
        let (Some(a), Some(b)) = (lhs.value.as_i128(), rhs.value.as_i128()) else {
            let op = op.text().unwrap_or("?");
            return Err(format!("Operator '{op}' cannot be applied to these operands"));
        };
        let result = match op {
            SyntaxKind::PIPE => a | b,
            SyntaxKind::AMP => a & b,
            _ => a + b,
        };
        // The result keeps the representation of the wider operand.
        let value = match (&lhs.value, &rhs.value) {
            (ConstantValue::U64(_), _) | (_, ConstantValue::U64(_)) => {
                u64::try_from(result).map(ConstantValue::U64).ok()
            }
            (ConstantValue::I64(_), _) | (_, ConstantValue::I64(_)) => {
                i64::try_from(result).map(ConstantValue::I64).ok()
            }
            (ConstantValue::U32(_), ConstantValue::U32(_)) => {
                u32::try_from(result).map(ConstantValue::U32).ok()
            }
            _ => i32::try_from(result).map(ConstantValue::I32).ok(),
        }
        .ok_or("Constant overflow")?;
        Ok(TypedConstant::new(lhs.kind, lhs.ty, value))
    }

    fn const_member(&self, ty: SymbolIndex, name: &str) -> Option<SymbolIndex> {
        self.data.symbols[ty].members.iter().copied().find(|&member| {
            let member = &self.data.symbols[member];
            member.kind == SymbolKind::Field
                && member.modifiers.contains(DeclModifiers::CONST)
                && member.name == name
        })
    }

    fn evaluate_name(&mut self, scope: &Scope, segments: &[SmolStr], target: Option<&SymbolRef>) -> EvalResult {
        let (global, segments) = match segments.split_first() {
            Some((first, rest)) if first == "global" && !rest.is_empty() => (true, rest),
            _ => (false, segments),
        };
        let Some((member, prefix)) = segments.split_last() else {
            return Err("Expected a name".to_string());
        };

        if prefix.is_empty() {
            let target_enum = target
                .and_then(SymbolRef::definition)
                .filter(|&def| self.data.symbols[def].type_kind == Some(TypeKind::Enum));
            if let Some(field) = target_enum.and_then(|def| self.const_member(def, member)) {
                return Ok(self.constant_of(field));
            }
            let mut current = Some(scope.symbol);
            while let Some(index) = current {
                if self.data.symbols[index].kind == SymbolKind::NamedType {
                    if let Some(field) = self.const_member(index, member) {
                        return Ok(self.constant_of(field));
                    }
                }
                current = self.data.symbols[index].containing;
            }
            return Err(format!("The name '{member}' does not exist in the current context"));
        }

        let path: Vec<PathSegment> = prefix.iter().cloned().map(PathSegment::plain).collect();
        let owner = match self.resolve_path(scope, &path, global) {
            Some(Resolved::Type(ty)) => ty.definition(),
            _ => None,
        };
        match owner.and_then(|owner| self.const_member(owner, member)) {
            Some(field) => Ok(self.constant_of(field)),
            None => Err(format!(
                "'{}' does not contain a constant named '{member}'",
                prefix.join(".")
            )),
        }
    }

    /// Converts a constant to `target`, as an attribute argument or initializer.
    fn convert(&self, constant: TypedConstant, target: &SymbolRef) -> EvalResult {
        if constant.is_error() || target.is_error() {
            return Ok(constant);
        }
        let special = self.special_of(target);
        if special == Some(SpecialType::Object) {
            return Ok(constant);
        }

        let target_kind = self.data.type_kind(target);
        if let Some(nullable) = self.data.special(SpecialType::Nullable) {
            if let SymbolRef::Constructed { definition, arguments } = target {
                if *definition == nullable {
                    if constant.is_null() {
                        return Ok(TypedConstant::new(constant.kind, Some(target.clone()), constant.value));
                    }
                    return match arguments.first() {
                        Some(inner) => self.convert(constant, inner),
                        None => Ok(constant),
                    };
                }
            }
        }

        if constant.is_null() {
            let nullable = matches!(
                target_kind,
                TypeKind::Class | TypeKind::Interface | TypeKind::Delegate | TypeKind::Array | TypeKind::TypeParameter
            );
            if !nullable {
                return Err(format!("Cannot convert null to '{}'", self.display_name(target)));
            }
            let kind = if target_kind == TypeKind::Array {
                TypedConstantKind::Array
            } else {
                TypedConstantKind::Primitive
            };
            return Ok(TypedConstant::new(kind, Some(target.clone()), ConstantValue::Null));
        }

        if target_kind == TypeKind::Enum {
            if constant.kind == TypedConstantKind::Enum && constant.ty.as_ref() == Some(target) {
                return Ok(constant);
            }
            let underlying = target
                .definition()
                .and_then(|def| self.data.symbols[def].ty.as_ref())
                .map(|t| t.ty.clone())
                .unwrap_or_else(|| SymbolRef::error("int", 0));
            return match constant.value.as_i128() {
                Some(v) if constant.kind == TypedConstantKind::Primitive => Ok(TypedConstant::new(
                    TypedConstantKind::Enum,
                    Some(target.clone()),
                    self.integral_value(v, &underlying)?,
                )),
                _ => Err(self.mismatch(&constant, target)),
            };
        }

        if let Some(special) = special {
            let value = match special {
                s if s.is_integral() => match constant.value {
                    ConstantValue::Char(_) => return Err(self.mismatch(&constant, target)),
                    ref value => match value.as_i128() {
                        Some(v) => self.integral_value(v, target)?,
                        None => return Err(self.mismatch(&constant, target)),
                    },
                },
                SpecialType::Single => match constant.value.as_f64() {
                    Some(v) if !matches!(constant.value, ConstantValue::F64(_)) => ConstantValue::F32(v as f32),
                    _ => return Err(self.mismatch(&constant, target)),
                },
                SpecialType::Double | SpecialType::Decimal => match constant.value.as_f64() {
                    Some(v) => ConstantValue::F64(v),
                    None => return Err(self.mismatch(&constant, target)),
                },
                SpecialType::String | SpecialType::Boolean | SpecialType::Char | SpecialType::Type => {
                    if self.special_of(constant.ty.as_ref().unwrap_or(target)) != Some(special) {
                        return Err(self.mismatch(&constant, target));
                    }
                    return Ok(constant);
                }
                _ => return Err(self.mismatch(&constant, target)),
            };
            return Ok(TypedConstant::new(TypedConstantKind::Primitive, Some(target.clone()), value));
        }

        match (&constant.ty, target) {
            (Some(ty), target) if ty == target => Ok(constant),
            (Some(SymbolRef::Array { .. }), SymbolRef::Array { .. }) => Ok(constant),
            _ => Err(self.mismatch(&constant, target)),
        }
    }

    fn mismatch(&self, constant: &TypedConstant, target: &SymbolRef) -> String {
        let from = constant
            .ty
            .as_ref()
            .map(|ty| self.display_name(ty))
            .unwrap_or_else(|| "<null>".to_string());
        format!("Cannot convert a constant of type '{from}' to '{}'", self.display_name(target))
    }

    fn display_name(&self, ty: &SymbolRef) -> String {
        match ty {
            SymbolRef::Declared(index) | SymbolRef::Constructed { definition: index, .. } => {
                let keyword = self.data.special_type_of(*index).and_then(SpecialType::keyword);
                keyword
                    .map(str::to_string)
                    .unwrap_or_else(|| self.data.symbols[*index].name.to_string())
            }
            SymbolRef::Array { element, .. } => format!("{}[]", self.display_name(element)),
            SymbolRef::Error { name, .. } => name.to_string(),
        }
    }
}
