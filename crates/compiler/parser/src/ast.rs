//! # Typed AST
//!
//! Thin typed views over [`SyntaxNode`]s. A view never owns data; it is a node whose
//! kind has been checked, with accessors that walk its children.

use smol_str::SmolStr;

use crate::syntax_kind::SyntaxKind::{self, *};
use crate::{SyntaxNode, SyntaxToken};

/// A typed view over a syntax node of one or more kinds.
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;

    fn cast(node: SyntaxNode) -> Option<Self>;

    fn syntax(&self) -> &SyntaxNode;
}

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident, $($kind:ident)|+) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            syntax: SyntaxNode,
        }

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                matches!(kind, $($kind)|+)
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                Self::can_cast(node.kind()).then_some(Self { syntax: node })
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.syntax
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.syntax, f)
            }
        }
    };
}

ast_node!(CompilationUnit, COMPILATION_UNIT);
ast_node!(UsingDirective, USING_DIRECTIVE);
ast_node!(NamespaceDecl, NAMESPACE_DECL);
ast_node!(Name, NAME);
ast_node!(
    /// Any type declaration: class, struct, interface, record, record struct, enum
    /// or delegate.
    TypeDecl,
    CLASS_DECL | STRUCT_DECL | INTERFACE_DECL | RECORD_DECL | RECORD_STRUCT_DECL | ENUM_DECL | DELEGATE_DECL
);
ast_node!(ClassDecl, CLASS_DECL);
ast_node!(StructDecl, STRUCT_DECL);
ast_node!(InterfaceDecl, INTERFACE_DECL);
ast_node!(
    /// `record`, `record class` and `record struct` declarations.
    RecordDecl,
    RECORD_DECL | RECORD_STRUCT_DECL
);
ast_node!(EnumDecl, ENUM_DECL);
ast_node!(DelegateDecl, DELEGATE_DECL);
ast_node!(EnumMember, ENUM_MEMBER);
ast_node!(MethodDecl, METHOD_DECL);
ast_node!(ConstructorDecl, CONSTRUCTOR_DECL);
ast_node!(PropertyDecl, PROPERTY_DECL);
ast_node!(FieldDecl, FIELD_DECL);
ast_node!(VariableDeclarator, VARIABLE_DECLARATOR);
ast_node!(
    /// Anything that can appear in a type body.
    MemberDecl,
    CLASS_DECL
        | STRUCT_DECL
        | INTERFACE_DECL
        | RECORD_DECL
        | RECORD_STRUCT_DECL
        | ENUM_DECL
        | DELEGATE_DECL
        | METHOD_DECL
        | CONSTRUCTOR_DECL
        | PROPERTY_DECL
        | FIELD_DECL
        | ENUM_MEMBER
);
ast_node!(MemberList, MEMBER_LIST);
ast_node!(AccessorList, ACCESSOR_LIST);
ast_node!(Accessor, ACCESSOR);
ast_node!(AttributeList, ATTRIBUTE_LIST);
ast_node!(Attribute, ATTRIBUTE);
ast_node!(AttributeArgList, ATTRIBUTE_ARG_LIST);
ast_node!(AttributeArg, ATTRIBUTE_ARG);
ast_node!(ModifierList, MODIFIER_LIST);
ast_node!(TypeParamList, TYPE_PARAM_LIST);
ast_node!(TypeParam, TYPE_PARAM);
ast_node!(ParamList, PARAM_LIST);
ast_node!(Param, PARAM);
ast_node!(BaseList, BASE_LIST);
ast_node!(TypeArgList, TYPE_ARG_LIST);
ast_node!(
    TypeRef,
    PREDEFINED_TYPE | NAMED_TYPE | ARRAY_TYPE | NULLABLE_TYPE
);
ast_node!(NamedType, NAMED_TYPE);
ast_node!(NameSegment, NAME_SEGMENT);
ast_node!(EqualsValue, EQUALS_VALUE);
ast_node!(
    Expr,
    LITERAL_EXPR | TYPEOF_EXPR | NAME_EXPR | PREFIX_EXPR | BINARY_EXPR | ARRAY_EXPR
);

fn child<N: AstNode>(parent: &SyntaxNode) -> Option<N> {
    parent.children().find_map(N::cast)
}

fn children<N: AstNode>(parent: &SyntaxNode) -> impl Iterator<Item = N> {
    parent.children().filter_map(N::cast)
}

fn token(parent: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    parent
        .children_with_tokens()
        .filter_map(|element| element.into_token())
        .find(|token| token.kind() == kind)
}

fn significant_tokens(parent: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> {
    parent
        .children_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| !token.kind().is_trivia())
}

/// Identifier text without a leading `@` escape.
pub fn ident_text(token: &SyntaxToken) -> SmolStr {
    SmolStr::new(token.text().trim_start_matches('@'))
}

// ---- Shared accessors -----------------------------------------------------

pub trait HasName: AstNode {
    /// The declared name token: the first direct identifier child.
    fn name_token(&self) -> Option<SyntaxToken> {
        token(self.syntax(), IDENT)
    }

    fn name(&self) -> Option<SmolStr> {
        self.name_token().map(|token| ident_text(&token))
    }
}

pub trait HasModifiers: AstNode {
    fn modifier_list(&self) -> Option<ModifierList> {
        child(self.syntax())
    }

    fn has_modifier(&self, kind: SyntaxKind) -> bool {
        self.modifier_list()
            .is_some_and(|list| list.modifiers().any(|m| m == kind))
    }
}

pub trait HasAttributes: AstNode {
    fn attribute_lists(&self) -> Vec<AttributeList> {
        children(self.syntax()).collect()
    }

    fn attributes(&self) -> Vec<Attribute> {
        self.attribute_lists()
            .iter()
            .flat_map(AttributeList::attributes)
            .collect()
    }
}

pub trait HasTypeParams: AstNode {
    fn type_param_list(&self) -> Option<TypeParamList> {
        child(self.syntax())
    }

    fn type_params(&self) -> Vec<TypeParam> {
        self.type_param_list()
            .map(|list| children(list.syntax()).collect())
            .unwrap_or_default()
    }
}

pub trait HasParams: AstNode {
    fn param_list(&self) -> Option<ParamList> {
        child(self.syntax())
    }

    fn params(&self) -> Vec<Param> {
        self.param_list()
            .map(|list| children(list.syntax()).collect())
            .unwrap_or_default()
    }
}

pub trait HasDocComments: AstNode {
    /// The raw XML of the leading `///` lines, one line per comment with the
    /// marker and a single following space removed.
    fn doc_comment_xml(&self) -> Option<String> {
        crate::doc::doc_comment_xml(self.syntax())
    }
}

macro_rules! impl_traits {
    ($trait:ident: $($node:ident),+) => {
        $(impl $trait for $node {})+
    };
}

impl_traits!(HasName: TypeDecl, ClassDecl, StructDecl, InterfaceDecl, RecordDecl, EnumDecl, DelegateDecl,
    EnumMember, MethodDecl, ConstructorDecl, PropertyDecl, VariableDeclarator, MemberDecl, TypeParam, Param);
impl_traits!(HasModifiers: TypeDecl, ClassDecl, StructDecl, InterfaceDecl, RecordDecl, EnumDecl, DelegateDecl,
    MethodDecl, ConstructorDecl, PropertyDecl, FieldDecl, MemberDecl, Accessor);
impl_traits!(HasAttributes: TypeDecl, ClassDecl, StructDecl, InterfaceDecl, RecordDecl, EnumDecl, DelegateDecl,
    EnumMember, MethodDecl, ConstructorDecl, PropertyDecl, FieldDecl, MemberDecl, Accessor, TypeParam, Param);
impl_traits!(HasTypeParams: TypeDecl, ClassDecl, StructDecl, InterfaceDecl, RecordDecl, DelegateDecl, MethodDecl);
impl_traits!(HasParams: TypeDecl, RecordDecl, DelegateDecl, MethodDecl, ConstructorDecl);
impl_traits!(HasDocComments: TypeDecl, ClassDecl, StructDecl, InterfaceDecl, RecordDecl, EnumDecl, DelegateDecl,
    EnumMember, MethodDecl, ConstructorDecl, PropertyDecl, FieldDecl, MemberDecl, NamespaceDecl);

// ---- Compilation unit and namespaces ----------------------------------------

impl CompilationUnit {
    pub fn usings(&self) -> impl Iterator<Item = UsingDirective> {
        children(self.syntax())
    }

    pub fn namespaces(&self) -> impl Iterator<Item = NamespaceDecl> {
        children(self.syntax())
    }

    pub fn members(&self) -> impl Iterator<Item = MemberDecl> {
        children(self.syntax())
    }

    /// Every type declaration in the file, nested ones included, in source order.
    pub fn type_decls(&self) -> impl Iterator<Item = TypeDecl> {
        self.syntax().descendants().filter_map(TypeDecl::cast)
    }
}

impl UsingDirective {
    pub fn is_static(&self) -> bool {
        token(self.syntax(), STATIC_KW).is_some()
    }

    /// `using Alias = Type;`
    pub fn alias(&self) -> Option<SmolStr> {
        token(self.syntax(), EQ)?;
        token(self.syntax(), IDENT).map(|t| ident_text(&t))
    }

    pub fn name(&self) -> Option<Name> {
        child(self.syntax())
    }

    pub fn aliased_type(&self) -> Option<TypeRef> {
        child(self.syntax())
    }
}

impl NamespaceDecl {
    pub fn name(&self) -> Option<Name> {
        child(self.syntax())
    }

    pub fn is_file_scoped(&self) -> bool {
        token(self.syntax(), L_BRACE).is_none()
    }

    pub fn usings(&self) -> impl Iterator<Item = UsingDirective> {
        children(self.syntax())
    }

    pub fn namespaces(&self) -> impl Iterator<Item = NamespaceDecl> {
        children(self.syntax())
    }

    pub fn members(&self) -> impl Iterator<Item = MemberDecl> {
        children(self.syntax())
    }
}

impl Name {
    pub fn is_global(&self) -> bool {
        token(self.syntax(), COLON2).is_some()
    }

    /// Identifier segments in order, without a `global::` alias.
    pub fn segments(&self) -> Vec<SmolStr> {
        let mut tokens: Vec<_> = significant_tokens(self.syntax()).collect();
        if self.is_global() {
            tokens.drain(..2);
        }
        tokens
            .iter()
            .filter(|t| t.kind() == IDENT)
            .map(ident_text)
            .collect()
    }

    pub fn dotted(&self) -> String {
        self.segments().join(".")
    }
}

// ---- Type declarations --------------------------------------------------------

/// Which keyword introduced a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeDeclKind {
    Class,
    Struct,
    Interface,
    Record,
    RecordStruct,
    Enum,
    Delegate,
}

impl TypeDecl {
    pub fn kind(&self) -> TypeDeclKind {
        match self.syntax().kind() {
            STRUCT_DECL => TypeDeclKind::Struct,
            INTERFACE_DECL => TypeDeclKind::Interface,
            RECORD_DECL => TypeDeclKind::Record,
            RECORD_STRUCT_DECL => TypeDeclKind::RecordStruct,
            ENUM_DECL => TypeDeclKind::Enum,
            DELEGATE_DECL => TypeDeclKind::Delegate,
            _ => TypeDeclKind::Class,
        }
    }

    pub fn base_list(&self) -> Option<BaseList> {
        child(self.syntax())
    }

    pub fn member_list(&self) -> Option<MemberList> {
        child(self.syntax())
    }

    pub fn members(&self) -> Vec<MemberDecl> {
        self.member_list()
            .map(|list| list.members().collect())
            .unwrap_or_default()
    }

    /// Return type of a delegate declaration.
    pub fn delegate_return_type(&self) -> Option<TypeRef> {
        (self.kind() == TypeDeclKind::Delegate).then(|| child(self.syntax()))?
    }
}

impl RecordDecl {
    pub fn is_struct(&self) -> bool {
        self.syntax().kind() == RECORD_STRUCT_DECL
    }
}

impl EnumDecl {
    pub fn underlying_type(&self) -> Option<TypeRef> {
        self.base_list()?.types().next()
    }

    pub fn base_list(&self) -> Option<BaseList> {
        child(self.syntax())
    }

    pub fn variants(&self) -> Vec<EnumMember> {
        self.syntax()
            .children()
            .find(|n| n.kind() == MEMBER_LIST)
            .map(|list| children(&list).collect())
            .unwrap_or_default()
    }
}

impl MemberList {
    pub fn members(&self) -> impl Iterator<Item = MemberDecl> {
        children(self.syntax())
    }
}

impl ModifierList {
    pub fn modifiers(&self) -> impl Iterator<Item = SyntaxKind> {
        significant_tokens(self.syntax()).map(|t| t.kind())
    }

    pub fn modifier_tokens(&self) -> impl Iterator<Item = SyntaxToken> {
        significant_tokens(self.syntax())
    }
}

impl BaseList {
    pub fn types(&self) -> impl Iterator<Item = TypeRef> {
        children(self.syntax())
    }
}

impl TypeParam {
    pub fn variance(&self) -> Option<SyntaxKind> {
        significant_tokens(self.syntax())
            .map(|t| t.kind())
            .find(|k| matches!(k, IN_KW | OUT_KW))
    }
}

// ---- Members -----------------------------------------------------------------

impl EnumMember {
    pub fn value(&self) -> Option<EqualsValue> {
        child(self.syntax())
    }
}

impl MethodDecl {
    pub fn return_type(&self) -> Option<TypeRef> {
        child(self.syntax())
    }

    pub fn has_body(&self) -> bool {
        self.syntax()
            .children()
            .any(|n| matches!(n.kind(), BLOCK | EXPR_BODY))
    }
}

impl PropertyDecl {
    pub fn ty(&self) -> Option<TypeRef> {
        child(self.syntax())
    }

    pub fn accessor_list(&self) -> Option<AccessorList> {
        child(self.syntax())
    }

    pub fn accessors(&self) -> Vec<Accessor> {
        self.accessor_list()
            .map(|list| children(list.syntax()).collect())
            .unwrap_or_default()
    }

    /// `=> expr;` properties are get-only.
    pub fn is_expression_bodied(&self) -> bool {
        self.syntax().children().any(|n| n.kind() == EXPR_BODY)
    }

    pub fn initializer(&self) -> Option<EqualsValue> {
        child(self.syntax())
    }
}

impl Accessor {
    /// `GET_KW`, `SET_KW` or `INIT_KW`.
    pub fn keyword(&self) -> Option<SyntaxKind> {
        significant_tokens(self.syntax())
            .map(|t| t.kind())
            .find(|k| matches!(k, GET_KW | SET_KW | INIT_KW))
    }
}

impl FieldDecl {
    pub fn ty(&self) -> Option<TypeRef> {
        child(self.syntax())
    }

    pub fn declarators(&self) -> impl Iterator<Item = VariableDeclarator> {
        children(self.syntax())
    }
}

impl VariableDeclarator {
    pub fn initializer(&self) -> Option<EqualsValue> {
        child(self.syntax())
    }
}

impl Param {
    pub fn ty(&self) -> Option<TypeRef> {
        child(self.syntax())
    }

    pub fn default_value(&self) -> Option<EqualsValue> {
        child(self.syntax())
    }

    pub fn is_params(&self) -> bool {
        token(self.syntax(), PARAMS_KW).is_some()
    }

    /// `ref`, `out`, `in` or `this`, if present.
    pub fn ref_kind(&self) -> Option<SyntaxKind> {
        significant_tokens(self.syntax())
            .map(|t| t.kind())
            .find(|k| matches!(k, REF_KW | OUT_KW | IN_KW))
    }
}

// ---- Attributes ----------------------------------------------------------------

impl AttributeList {
    pub fn attributes(&self) -> Vec<Attribute> {
        children(self.syntax()).collect()
    }

    /// `assembly`, `return`, `field`... when the list has an explicit target.
    pub fn target(&self) -> Option<SmolStr> {
        let target = self
            .syntax()
            .children()
            .find(|n| n.kind() == ATTRIBUTE_TARGET)?;
        let token = target.first_token()?;
        Some(ident_text(&token))
    }
}

impl Attribute {
    pub fn name(&self) -> Option<NamedType> {
        child(self.syntax())
    }

    pub fn arg_list(&self) -> Option<AttributeArgList> {
        child(self.syntax())
    }

    pub fn args(&self) -> Vec<AttributeArg> {
        self.arg_list()
            .map(|list| children(list.syntax()).collect())
            .unwrap_or_default()
    }

    pub fn positional_args(&self) -> Vec<AttributeArg> {
        self.args().into_iter().filter(|a| a.name().is_none()).collect()
    }

    pub fn named_args(&self) -> Vec<AttributeArg> {
        self.args().into_iter().filter(|a| a.name().is_some()).collect()
    }
}

impl AttributeArg {
    /// The `Name` of a `Name = value` argument.
    pub fn name(&self) -> Option<SmolStr> {
        let name_equals = self
            .syntax()
            .children()
            .find(|n| n.kind() == NAME_EQUALS)?;
        token(&name_equals, IDENT).map(|t| ident_text(&t))
    }

    pub fn expr(&self) -> Option<Expr> {
        child(self.syntax())
    }
}

// ---- Types ---------------------------------------------------------------------

/// The structural shape of a [`TypeRef`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRefKind {
    /// A keyword type: `int`, `string`, `void`...
    Predefined(SyntaxKind),
    Named(NamedType),
    Array { element: TypeRef, rank: usize },
    Nullable(TypeRef),
}

impl TypeRef {
    pub fn shape(&self) -> Option<TypeRefKind> {
        let syntax = self.syntax();
        match syntax.kind() {
            PREDEFINED_TYPE => significant_tokens(syntax)
                .next()
                .map(|t| TypeRefKind::Predefined(t.kind())),
            NAMED_TYPE => NamedType::cast(syntax.clone()).map(TypeRefKind::Named),
            ARRAY_TYPE => {
                let element = child(syntax)?;
                let rank = 1 + significant_tokens(syntax)
                    .filter(|t| t.kind() == COMMA)
                    .count();
                Some(TypeRefKind::Array { element, rank })
            }
            NULLABLE_TYPE => child(syntax).map(TypeRefKind::Nullable),
            _ => None,
        }
    }
}

impl NamedType {
    pub fn is_global(&self) -> bool {
        token(self.syntax(), COLON2).is_some()
    }

    pub fn segments(&self) -> Vec<NameSegment> {
        children(self.syntax()).collect()
    }

    /// The written name without type arguments, e.g. `System.Collections.List`.
    pub fn dotted_name(&self) -> String {
        self.segments()
            .iter()
            .filter_map(NameSegment::name)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl NameSegment {
    pub fn name(&self) -> Option<SmolStr> {
        token(self.syntax(), IDENT).map(|t| ident_text(&t))
    }

    pub fn type_args(&self) -> Vec<TypeRef> {
        child::<TypeArgList>(self.syntax())
            .map(|list| children(list.syntax()).collect())
            .unwrap_or_default()
    }
}

// ---- Expressions -----------------------------------------------------------------

impl EqualsValue {
    /// The value, when the whole initializer is a constant expression.
    pub fn constant_expr(&self) -> Option<Expr> {
        let expr: Expr = child(self.syntax())?;
        // Only `=` may precede the expression and nothing may follow it; anything
        // else means the expression was a prefix of something larger.
        let mut significant = self
            .syntax()
            .children_with_tokens()
            .filter(|element| !element.kind().is_trivia());
        let leading = significant.next().map(|element| element.kind());
        let parsed = significant.next().and_then(|element| element.into_node());
        let exact = leading == Some(EQ)
            && parsed.as_ref() == Some(expr.syntax())
            && significant.next().is_none();
        exact.then_some(expr)
    }
}

/// The structural shape of an [`Expr`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprKind {
    Literal(SyntaxToken),
    TypeOf(Option<TypeRef>),
    /// Dotted member access, e.g. `Level.High`.
    Name(Vec<SmolStr>),
    Prefix { op: SyntaxKind, operand: Option<Expr> },
    Binary { op: SyntaxKind, lhs: Expr, rhs: Option<Expr> },
    Array(Vec<Expr>),
}

impl Expr {
    pub fn shape(&self) -> Option<ExprKind> {
        let syntax = self.syntax();
        let shape = match syntax.kind() {
            LITERAL_EXPR => ExprKind::Literal(significant_tokens(syntax).next()?),
            TYPEOF_EXPR => ExprKind::TypeOf(child(syntax)),
            NAME_EXPR => ExprKind::Name(
                significant_tokens(syntax)
                    .filter(|t| t.kind() == IDENT || t.kind().is_predefined_type())
                    .map(|t| ident_text(&t))
                    .collect(),
            ),
            PREFIX_EXPR => ExprKind::Prefix {
                op: significant_tokens(syntax).next()?.kind(),
                operand: child(syntax),
            },
            BINARY_EXPR => {
                let mut operands = children::<Expr>(syntax);
                let lhs = operands.next()?;
                ExprKind::Binary {
                    op: significant_tokens(syntax)
                        .map(|t| t.kind())
                        .find(|k| matches!(k, PIPE | PLUS | AMP))?,
                    lhs,
                    rhs: operands.next(),
                }
            }
            ARRAY_EXPR => ExprKind::Array(children(syntax).collect()),
            _ => return None,
        };
        Some(shape)
    }

    /// Explicit element type of `new T[] { ... }`.
    pub fn array_element_type(&self) -> Option<TypeRef> {
        if self.syntax().kind() != ARRAY_EXPR {
            return None;
        }
        let ty: TypeRef = child(self.syntax())?;
        match ty.shape()? {
            TypeRefKind::Array { element, .. } => Some(element),
            _ => Some(ty),
        }
    }
}
