//! # Lexer
//!
//! Splits source text into tokens with `logos`. Nothing is skipped: whitespace and
//! comments come out as trivia tokens so the syntax tree can stay lossless.
//!
//! `>` is always lexed on its own so nested generic argument lists (`List<List<int>>`)
//! close correctly; shift and comparison operators only occur inside skipped bodies,
//! where their exact shape does not matter.

use logos::Logos;
use prism_compiler_diagnostics::Diagnostic;

use crate::syntax_kind::SyntaxKind;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,
    #[regex(r"///[^\n]*", priority = 10)]
    DocComment,
    #[regex(r"//[^\n]*")]
    LineComment,
    #[token("/*", block_comment)]
    BlockComment,

    // Keywords
    #[token("abstract")]
    Abstract,
    #[token("async")]
    Async,
    #[token("class")]
    Class,
    #[token("const")]
    Const,
    #[token("delegate")]
    Delegate,
    #[token("enum")]
    Enum,
    #[token("event")]
    Event,
    #[token("extern")]
    Extern,
    #[token("false")]
    False,
    #[token("get")]
    Get,
    #[token("in")]
    In,
    #[token("init")]
    Init,
    #[token("interface")]
    Interface,
    #[token("internal")]
    Internal,
    #[token("namespace")]
    Namespace,
    #[token("new")]
    New,
    #[token("null")]
    Null,
    #[token("out")]
    Out,
    #[token("override")]
    Override,
    #[token("params")]
    Params,
    #[token("partial")]
    Partial,
    #[token("private")]
    Private,
    #[token("protected")]
    Protected,
    #[token("public")]
    Public,
    #[token("readonly")]
    Readonly,
    #[token("record")]
    Record,
    #[token("ref")]
    Ref,
    #[token("sealed")]
    Sealed,
    #[token("set")]
    Set,
    #[token("static")]
    Static,
    #[token("struct")]
    Struct,
    #[token("this")]
    This,
    #[token("true")]
    True,
    #[token("typeof")]
    Typeof,
    #[token("unsafe")]
    Unsafe,
    #[token("using")]
    Using,
    #[token("virtual")]
    Virtual,
    #[token("void")]
    Void,
    #[token("volatile")]
    Volatile,
    #[token("where")]
    Where,

    // Predefined types
    #[token("bool")]
    Bool,
    #[token("byte")]
    Byte,
    #[token("sbyte")]
    SByte,
    #[token("char")]
    CharKw,
    #[token("decimal")]
    Decimal,
    #[token("double")]
    Double,
    #[token("float")]
    Float,
    #[token("int")]
    Int,
    #[token("uint")]
    UInt,
    #[token("long")]
    Long,
    #[token("ulong")]
    ULong,
    #[token("short")]
    Short,
    #[token("ushort")]
    UShort,
    #[token("object")]
    Object,
    #[token("string")]
    StringKw,

    // Identifiers (`@` escapes a keyword)
    #[regex(r"@?[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    // Literals
    #[regex(r"[0-9][0-9_]*([uU][lL]?|[lL][uU]?)?")]
    #[regex(r"0[xX][0-9a-fA-F_]+([uU][lL]?|[lL][uU]?)?")]
    Integer,
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?[fFdDmM]?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+[fFdDmM]?")]
    #[regex(r"[0-9][0-9_]*[fFdDmM]")]
    Real,
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r#"@"([^"]|"")*""#)]
    String,
    #[regex(r"'([^'\\\n]|\\.)+'")]
    Char,

    // Punctuation
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBrack,
    #[token("]")]
    RBrack,
    #[token("<")]
    LAngle,
    #[token(">")]
    RAngle,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("::")]
    ColonColon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("==")]
    EqEq,
    #[token("!=")]
    Neq,
    #[token("=>")]
    FatArrow,
    #[token("=")]
    Eq,
    #[token("?")]
    Question,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("#")]
    Hash,
}

/// Consumes a `/* ... */` comment after its opener. An unterminated comment runs
/// to the end of the input and is an error.
fn block_comment(lex: &mut logos::Lexer<'_, TokenType>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

impl From<TokenType> for SyntaxKind {
    fn from(token: TokenType) -> Self {
        use TokenType as T;
        match token {
            T::Whitespace => Self::WHITESPACE,
            T::DocComment => Self::DOC_COMMENT,
            T::LineComment => Self::LINE_COMMENT,
            T::BlockComment => Self::BLOCK_COMMENT,
            T::Abstract => Self::ABSTRACT_KW,
            T::Async => Self::ASYNC_KW,
            T::Class => Self::CLASS_KW,
            T::Const => Self::CONST_KW,
            T::Delegate => Self::DELEGATE_KW,
            T::Enum => Self::ENUM_KW,
            T::Event => Self::EVENT_KW,
            T::Extern => Self::EXTERN_KW,
            T::False => Self::FALSE_KW,
            T::Get => Self::GET_KW,
            T::In => Self::IN_KW,
            T::Init => Self::INIT_KW,
            T::Interface => Self::INTERFACE_KW,
            T::Internal => Self::INTERNAL_KW,
            T::Namespace => Self::NAMESPACE_KW,
            T::New => Self::NEW_KW,
            T::Null => Self::NULL_KW,
            T::Out => Self::OUT_KW,
            T::Override => Self::OVERRIDE_KW,
            T::Params => Self::PARAMS_KW,
            T::Partial => Self::PARTIAL_KW,
            T::Private => Self::PRIVATE_KW,
            T::Protected => Self::PROTECTED_KW,
            T::Public => Self::PUBLIC_KW,
            T::Readonly => Self::READONLY_KW,
            T::Record => Self::RECORD_KW,
            T::Ref => Self::REF_KW,
            T::Sealed => Self::SEALED_KW,
            T::Set => Self::SET_KW,
            T::Static => Self::STATIC_KW,
            T::Struct => Self::STRUCT_KW,
            T::This => Self::THIS_KW,
            T::True => Self::TRUE_KW,
            T::Typeof => Self::TYPEOF_KW,
            T::Unsafe => Self::UNSAFE_KW,
            T::Using => Self::USING_KW,
            T::Virtual => Self::VIRTUAL_KW,
            T::Void => Self::VOID_KW,
            T::Volatile => Self::VOLATILE_KW,
            T::Where => Self::WHERE_KW,
            T::Bool => Self::BOOL_KW,
            T::Byte => Self::BYTE_KW,
            T::SByte => Self::SBYTE_KW,
            T::CharKw => Self::CHAR_KW,
            T::Decimal => Self::DECIMAL_KW,
            T::Double => Self::DOUBLE_KW,
            T::Float => Self::FLOAT_KW,
            T::Int => Self::INT_KW,
            T::UInt => Self::UINT_KW,
            T::Long => Self::LONG_KW,
            T::ULong => Self::ULONG_KW,
            T::Short => Self::SHORT_KW,
            T::UShort => Self::USHORT_KW,
            T::Object => Self::OBJECT_KW,
            T::StringKw => Self::STRING_KW,
            T::Identifier => Self::IDENT,
            T::Integer => Self::INT_NUMBER,
            T::Real => Self::REAL_NUMBER,
            T::String => Self::STRING,
            T::Char => Self::CHAR,
            T::LBrace => Self::L_BRACE,
            T::RBrace => Self::R_BRACE,
            T::LParen => Self::L_PAREN,
            T::RParen => Self::R_PAREN,
            T::LBrack => Self::L_BRACK,
            T::RBrack => Self::R_BRACK,
            T::LAngle => Self::L_ANGLE,
            T::RAngle => Self::R_ANGLE,
            T::Comma => Self::COMMA,
            T::Semicolon => Self::SEMICOLON,
            T::ColonColon => Self::COLON2,
            T::Colon => Self::COLON,
            T::Dot => Self::DOT,
            T::EqEq => Self::EQ2,
            T::Neq => Self::NEQ,
            T::FatArrow => Self::FAT_ARROW,
            T::Eq => Self::EQ,
            T::Question => Self::QUESTION,
            T::Bang => Self::BANG,
            T::Tilde => Self::TILDE,
            T::Plus => Self::PLUS,
            T::Minus => Self::MINUS,
            T::Star => Self::STAR,
            T::Slash => Self::SLASH,
            T::Percent => Self::PERCENT,
            T::Amp => Self::AMP,
            T::Pipe => Self::PIPE,
            T::Caret => Self::CARET,
            T::Hash => Self::HASH,
        }
    }
}

/// One lexed token, borrowing its text from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: usize,
}

impl Token<'_> {
    pub const fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// Lexes `source` completely. Unrecognised input becomes `ERROR_TOKEN`s with a
/// lexical diagnostic each; the concatenated token texts always equal `source`.
pub fn lex(source: &str) -> (Vec<Token<'_>>, Vec<Diagnostic>) {
    let mut tokens = Vec::new();
    let mut diagnostics = Vec::new();
    let mut lexer = TokenType::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let text = lexer.slice();
        let kind = match result {
            Ok(token) => SyntaxKind::from(token),
            Err(()) => {
                let message = if text.starts_with("/*") {
                    "Unterminated block comment".to_string()
                } else {
                    format!("Unexpected character '{text}'")
                };
                diagnostics.push(Diagnostic::lexical_error(message, span.clone().into()));
                SyntaxKind::ERROR_TOKEN
            }
        };
        tokens.push(Token {
            kind,
            text,
            offset: span.start,
        });
    }

    (tokens, diagnostics)
}
