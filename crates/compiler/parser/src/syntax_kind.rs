//! Every token and node kind of the lossless syntax tree.

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive, ToPrimitive)]
#[repr(u16)]
pub enum SyntaxKind {
    // Trivia
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,
    DOC_COMMENT,

    // Literals and names
    IDENT,
    INT_NUMBER,
    REAL_NUMBER,
    STRING,
    CHAR,

    // Punctuation
    L_BRACE,
    R_BRACE,
    L_PAREN,
    R_PAREN,
    L_BRACK,
    R_BRACK,
    L_ANGLE,
    R_ANGLE,
    COMMA,
    SEMICOLON,
    COLON,
    COLON2,
    DOT,
    EQ,
    EQ2,
    NEQ,
    FAT_ARROW,
    QUESTION,
    BANG,
    TILDE,
    PLUS,
    MINUS,
    STAR,
    SLASH,
    PERCENT,
    AMP,
    PIPE,
    CARET,
    HASH,

    // Declaration keywords
    ABSTRACT_KW,
    ASYNC_KW,
    CLASS_KW,
    CONST_KW,
    DELEGATE_KW,
    ENUM_KW,
    EVENT_KW,
    EXTERN_KW,
    FALSE_KW,
    GET_KW,
    IN_KW,
    INIT_KW,
    INTERFACE_KW,
    INTERNAL_KW,
    NAMESPACE_KW,
    NEW_KW,
    NULL_KW,
    OUT_KW,
    OVERRIDE_KW,
    PARAMS_KW,
    PARTIAL_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    PUBLIC_KW,
    READONLY_KW,
    RECORD_KW,
    REF_KW,
    SEALED_KW,
    SET_KW,
    STATIC_KW,
    STRUCT_KW,
    THIS_KW,
    TRUE_KW,
    TYPEOF_KW,
    UNSAFE_KW,
    USING_KW,
    VIRTUAL_KW,
    VOID_KW,
    VOLATILE_KW,
    WHERE_KW,

    // Predefined type keywords
    BOOL_KW,
    BYTE_KW,
    SBYTE_KW,
    CHAR_KW,
    DECIMAL_KW,
    DOUBLE_KW,
    FLOAT_KW,
    INT_KW,
    UINT_KW,
    LONG_KW,
    ULONG_KW,
    SHORT_KW,
    USHORT_KW,
    OBJECT_KW,
    STRING_KW,

    ERROR_TOKEN,
    EOF,

    // Nodes
    COMPILATION_UNIT,
    USING_DIRECTIVE,
    NAMESPACE_DECL,
    NAME,
    CLASS_DECL,
    STRUCT_DECL,
    INTERFACE_DECL,
    RECORD_DECL,
    RECORD_STRUCT_DECL,
    ENUM_DECL,
    DELEGATE_DECL,
    ENUM_MEMBER,
    METHOD_DECL,
    CONSTRUCTOR_DECL,
    PROPERTY_DECL,
    FIELD_DECL,
    VARIABLE_DECLARATOR,
    MEMBER_LIST,
    ACCESSOR_LIST,
    ACCESSOR,
    ATTRIBUTE_LIST,
    ATTRIBUTE_TARGET,
    ATTRIBUTE,
    ATTRIBUTE_ARG_LIST,
    ATTRIBUTE_ARG,
    NAME_EQUALS,
    MODIFIER_LIST,
    TYPE_PARAM_LIST,
    TYPE_PARAM,
    PARAM_LIST,
    PARAM,
    BASE_LIST,
    CONSTRAINT_CLAUSE,
    TYPE_ARG_LIST,
    PREDEFINED_TYPE,
    NAMED_TYPE,
    NAME_SEGMENT,
    ARRAY_TYPE,
    NULLABLE_TYPE,
    EQUALS_VALUE,
    LITERAL_EXPR,
    TYPEOF_EXPR,
    NAME_EXPR,
    PREFIX_EXPR,
    BINARY_EXPR,
    ARRAY_EXPR,
    BLOCK,
    EXPR_BODY,
    ERROR,

    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    pub const fn is_trivia(self) -> bool {
        matches!(self, WHITESPACE | LINE_COMMENT | BLOCK_COMMENT | DOC_COMMENT)
    }

    pub const fn is_predefined_type(self) -> bool {
        matches!(
            self,
            BOOL_KW
                | BYTE_KW
                | SBYTE_KW
                | CHAR_KW
                | DECIMAL_KW
                | DOUBLE_KW
                | FLOAT_KW
                | INT_KW
                | UINT_KW
                | LONG_KW
                | ULONG_KW
                | SHORT_KW
                | USHORT_KW
                | OBJECT_KW
                | STRING_KW
                | VOID_KW
        )
    }

    /// Keywords that may appear in a modifier list.
    pub const fn is_modifier(self) -> bool {
        matches!(
            self,
            PUBLIC_KW
                | PRIVATE_KW
                | PROTECTED_KW
                | INTERNAL_KW
                | STATIC_KW
                | ABSTRACT_KW
                | SEALED_KW
                | VIRTUAL_KW
                | OVERRIDE_KW
                | READONLY_KW
                | NEW_KW
                | ASYNC_KW
                | EXTERN_KW
                | PARTIAL_KW
                | UNSAFE_KW
                | CONST_KW
                | VOLATILE_KW
        )
    }

    pub const fn is_type_decl(self) -> bool {
        matches!(
            self,
            CLASS_DECL
                | STRUCT_DECL
                | INTERFACE_DECL
                | RECORD_DECL
                | RECORD_STRUCT_DECL
                | ENUM_DECL
                | DELEGATE_DECL
        )
    }

    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            INT_NUMBER | REAL_NUMBER | STRING | CHAR | TRUE_KW | FALSE_KW | NULL_KW
        )
    }

    /// Source text of a keyword or punctuation kind.
    pub const fn text(self) -> Option<&'static str> {
        let text = match self {
            L_BRACE => "{",
            R_BRACE => "}",
            L_PAREN => "(",
            R_PAREN => ")",
            L_BRACK => "[",
            R_BRACK => "]",
            L_ANGLE => "<",
            R_ANGLE => ">",
            COMMA => ",",
            SEMICOLON => ";",
            COLON => ":",
            COLON2 => "::",
            DOT => ".",
            EQ => "=",
            EQ2 => "==",
            NEQ => "!=",
            FAT_ARROW => "=>",
            QUESTION => "?",
            BANG => "!",
            TILDE => "~",
            PLUS => "+",
            MINUS => "-",
            STAR => "*",
            SLASH => "/",
            PERCENT => "%",
            AMP => "&",
            PIPE => "|",
            CARET => "^",
            HASH => "#",
            ABSTRACT_KW => "abstract",
            ASYNC_KW => "async",
            CLASS_KW => "class",
            CONST_KW => "const",
            DELEGATE_KW => "delegate",
            ENUM_KW => "enum",
            EVENT_KW => "event",
            EXTERN_KW => "extern",
            FALSE_KW => "false",
            GET_KW => "get",
            IN_KW => "in",
            INIT_KW => "init",
            INTERFACE_KW => "interface",
            INTERNAL_KW => "internal",
            NAMESPACE_KW => "namespace",
            NEW_KW => "new",
            NULL_KW => "null",
            OUT_KW => "out",
            OVERRIDE_KW => "override",
            PARAMS_KW => "params",
            PARTIAL_KW => "partial",
            PRIVATE_KW => "private",
            PROTECTED_KW => "protected",
            PUBLIC_KW => "public",
            READONLY_KW => "readonly",
            RECORD_KW => "record",
            REF_KW => "ref",
            SEALED_KW => "sealed",
            SET_KW => "set",
            STATIC_KW => "static",
            STRUCT_KW => "struct",
            THIS_KW => "this",
            TRUE_KW => "true",
            TYPEOF_KW => "typeof",
            UNSAFE_KW => "unsafe",
            USING_KW => "using",
            VIRTUAL_KW => "virtual",
            VOID_KW => "void",
            VOLATILE_KW => "volatile",
            WHERE_KW => "where",
            BOOL_KW => "bool",
            BYTE_KW => "byte",
            SBYTE_KW => "sbyte",
            CHAR_KW => "char",
            DECIMAL_KW => "decimal",
            DOUBLE_KW => "double",
            FLOAT_KW => "float",
            INT_KW => "int",
            UINT_KW => "uint",
            LONG_KW => "long",
            ULONG_KW => "ulong",
            SHORT_KW => "short",
            USHORT_KW => "ushort",
            OBJECT_KW => "object",
            STRING_KW => "string",
            _ => return None,
        };
        Some(text)
    }

    /// Human readable description used in parse errors.
    pub fn describe(self) -> String {
        match self {
            IDENT => "identifier".to_string(),
            INT_NUMBER | REAL_NUMBER => "number".to_string(),
            STRING => "string literal".to_string(),
            CHAR => "character literal".to_string(),
            EOF => "end of file".to_string(),
            kind => match kind.text() {
                Some(text) => format!("'{text}'"),
                None => format!("{kind:?}"),
            },
        }
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// The rowan language tag of the declaration syntax tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lang {}

impl rowan::Language for Lang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> SyntaxKind {
        SyntaxKind::from_u16(raw.0).unwrap_or(ERROR)
    }

    fn kind_to_raw(kind: SyntaxKind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<Lang>;
pub type SyntaxToken = rowan::SyntaxToken<Lang>;
pub type SyntaxElement = rowan::SyntaxElement<Lang>;
