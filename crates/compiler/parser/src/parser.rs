//! # Recursive-Descent Parser
//!
//! Builds a lossless `rowan` green tree from the token stream. The grammar covers
//! declarations only: member bodies and non-constant initializers are kept as raw
//! token runs (`BLOCK`, `EXPR_BODY`, trailing tokens of an `EQUALS_VALUE`).
//!
//! ## Trivia placement
//!
//! Trivia is attached lazily: whitespace and comments preceding a token are flushed
//! into whichever node is open when the next token or node is emitted. Declarations
//! are the exception: a run of trivia that contains a `///` doc comment is split so
//! that everything from the first doc comment onwards lands inside the declaration.
//!
//! ## Error recovery
//!
//! Errors never abort the parse. A missing token is reported and skipped over; tokens
//! that cannot start a member are wrapped in `ERROR` nodes until a synchronising token
//! is found. Every loop consumes at least one token per iteration.

use prism_compiler_diagnostics::Diagnostic;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder};

use crate::lexer::{lex, Token};
use crate::syntax_kind::SyntaxKind::{self, *};

/// Result of parsing one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    green: GreenNode,
    diagnostics: Vec<Diagnostic>,
}

impl Parse {
    pub const fn green(&self) -> &GreenNode {
        &self.green
    }

    /// A fresh red tree over the shared green tree.
    pub fn syntax_node(&self) -> crate::SyntaxNode {
        crate::SyntaxNode::new_root(self.green.clone())
    }

    pub fn tree(&self) -> crate::ast::CompilationUnit {
        use crate::ast::AstNode;
        crate::ast::CompilationUnit::cast(self.syntax_node())
            .unwrap_or_else(|| unreachable!("the parser always produces a compilation unit"))
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Parses `source` into a syntax tree. Always succeeds; problems are reported as
/// diagnostics on the returned [`Parse`].
pub fn parse_text(source: &str) -> Parse {
    let _span = tracing::trace_span!("parse_text", len = source.len()).entered();
    let (tokens, mut diagnostics) = lex(source);
    let mut parser = Parser::new(tokens);
    parser.compilation_unit();
    diagnostics.extend(parser.diagnostics);
    Parse {
        green: parser.builder.finish(),
        diagnostics,
    }
}

/// Tokens that end a skipped run at nesting depth zero.
const MEMBER_RECOVERY: &[SyntaxKind] = &[R_BRACE, SEMICOLON];

struct Parser<'t> {
    tokens: Vec<Token<'t>>,
    /// Index of the next token to emit, trivia included.
    cursor: usize,
    builder: GreenNodeBuilder<'static>,
    diagnostics: Vec<Diagnostic>,
}

impl<'t> Parser<'t> {
    fn new(tokens: Vec<Token<'t>>) -> Self {
        Self {
            tokens,
            cursor: 0,
            builder: GreenNodeBuilder::new(),
            diagnostics: Vec::new(),
        }
    }

    // ---- Token inspection -------------------------------------------------

    fn significant(&self, n: usize) -> Option<&Token<'t>> {
        self.tokens[self.cursor..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        self.significant(n).map_or(EOF, |t| t.kind)
    }

    fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn current_text(&self) -> &'t str {
        self.significant(0).map_or("", |t| t.text)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current())
    }

    fn at_eof(&self) -> bool {
        self.at(EOF)
    }

    fn current_span(&self) -> std::ops::Range<usize> {
        match self.significant(0) {
            Some(token) => token.offset..token.end(),
            None => {
                let end = self.tokens.last().map_or(0, Token::end);
                end..end
            }
        }
    }

    // ---- Tree building ----------------------------------------------------

    fn flush_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.cursor) {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder.token(token.kind.into(), token.text);
            self.cursor += 1;
        }
    }

    /// Flushes pending trivia up to (not including) the first doc comment.
    fn flush_trivia_before_doc(&mut self) {
        while let Some(token) = self.tokens.get(self.cursor) {
            if !token.kind.is_trivia() || token.kind == DOC_COMMENT {
                break;
            }
            self.builder.token(token.kind.into(), token.text);
            self.cursor += 1;
        }
    }

    fn start_node(&mut self, kind: SyntaxKind) {
        self.flush_trivia();
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.flush_trivia();
        self.builder.checkpoint()
    }

    /// Checkpoint for a declaration: its leading doc comments end up inside it.
    fn decl_checkpoint(&mut self) -> Checkpoint {
        self.flush_trivia_before_doc();
        self.builder.checkpoint()
    }

    fn wrap(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
        self.builder.finish_node();
    }

    fn bump(&mut self) {
        self.flush_trivia();
        if let Some(token) = self.tokens.get(self.cursor) {
            self.builder.token(token.kind.into(), token.text);
            self.cursor += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.error_expected(&kind.describe());
        false
    }

    fn error_expected(&mut self, expected: &str) {
        let span = self.current_span();
        let diagnostic = if self.at_eof() {
            Diagnostic::unexpected_end_of_file(expected, span.into())
        } else {
            let found = self.current().describe();
            Diagnostic::unexpected_token(expected, &found, span.into())
        };
        self.diagnostics.push(diagnostic);
    }

    /// Wraps the current token in an `ERROR` node after reporting it.
    fn bump_error(&mut self, expected: &str) {
        self.error_expected(expected);
        self.start_node(ERROR);
        self.bump();
        self.finish_node();
    }

    /// Consumes a balanced run of tokens until one of `until` at depth zero.
    /// The terminator itself is not consumed.
    fn skip_balanced(&mut self, until: &[SyntaxKind]) {
        let mut depth = 0usize;
        while !self.at_eof() {
            let kind = self.current();
            if depth == 0 && until.contains(&kind) {
                break;
            }
            match kind {
                L_BRACE | L_PAREN | L_BRACK => depth += 1,
                R_BRACE | R_PAREN | R_BRACK => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.bump();
        }
    }

    // ---- Compilation unit and namespaces ---------------------------------

    fn compilation_unit(&mut self) {
        self.builder.start_node(COMPILATION_UNIT.into());
        self.namespace_body(false);
        self.flush_trivia();
        self.finish_node();
    }

    /// Usings and members until EOF, or until `}` when `braced`.
    fn namespace_body(&mut self, braced: bool) {
        loop {
            match self.current() {
                EOF => break,
                R_BRACE if braced => break,
                USING_KW => self.using_directive(),
                NAMESPACE_KW => self.namespace_decl(),
                R_BRACE => self.bump_error("declaration"),
                _ => self.member(),
            }
        }
    }

    fn using_directive(&mut self) {
        self.start_node(USING_DIRECTIVE);
        self.bump();
        self.eat(STATIC_KW);
        if self.at(IDENT) && self.nth(1) == EQ {
            self.bump();
            self.bump();
            self.type_ref();
        } else {
            self.name();
        }
        self.expect(SEMICOLON);
        self.finish_node();
    }

    fn namespace_decl(&mut self) {
        let checkpoint = self.decl_checkpoint();
        self.bump();
        self.name();
        if self.eat(SEMICOLON) {
            // File-scoped: the namespace owns the rest of the file.
            self.namespace_body(false);
        } else if self.expect(L_BRACE) {
            self.namespace_body(true);
            self.expect(R_BRACE);
            self.eat(SEMICOLON);
        }
        self.wrap(checkpoint, NAMESPACE_DECL);
    }

    /// Dotted name: `A.B.C`, optionally `global::`-prefixed.
    fn name(&mut self) {
        self.start_node(NAME);
        if self.at(IDENT) && self.nth(1) == COLON2 {
            self.bump();
            self.bump();
        }
        if self.expect(IDENT) {
            while self.at(DOT) && self.nth(1) == IDENT {
                self.bump();
                self.bump();
            }
        }
        self.finish_node();
    }

    // ---- Members ---------------------------------------------------------

    fn member(&mut self) {
        let checkpoint = self.decl_checkpoint();
        while self.at(L_BRACK) {
            self.attribute_list();
        }
        self.modifier_list();

        match self.current() {
            CLASS_KW | STRUCT_KW | INTERFACE_KW | RECORD_KW => self.type_decl(checkpoint),
            ENUM_KW => self.enum_decl(checkpoint),
            DELEGATE_KW => self.delegate_decl(checkpoint),
            IDENT if self.nth(1) == L_PAREN => self.constructor_decl(checkpoint),
            IDENT | VOID_KW | L_PAREN => self.typed_member(checkpoint),
            kind if kind.is_predefined_type() => self.typed_member(checkpoint),
            _ => {
                self.error_expected("declaration");
                self.start_node(ERROR);
                if !self.at_any(MEMBER_RECOVERY) {
                    self.bump();
                }
                self.skip_balanced(MEMBER_RECOVERY);
                self.eat(SEMICOLON);
                self.finish_node();
                self.wrap(checkpoint, ERROR);
            }
        }
    }

    fn modifier_list(&mut self) {
        self.start_node(MODIFIER_LIST);
        while self.current().is_modifier() {
            self.bump();
        }
        self.finish_node();
    }

    fn type_decl(&mut self, checkpoint: Checkpoint) {
        let kind = match self.current() {
            CLASS_KW => CLASS_DECL,
            STRUCT_KW => STRUCT_DECL,
            INTERFACE_KW => INTERFACE_DECL,
            _ => match self.nth(1) {
                STRUCT_KW => RECORD_STRUCT_DECL,
                _ => RECORD_DECL,
            },
        };
        self.bump();
        if kind == RECORD_STRUCT_DECL || (kind == RECORD_DECL && self.at(CLASS_KW)) {
            self.bump();
        }
        self.expect(IDENT);
        if self.at(L_ANGLE) {
            self.type_param_list();
        }
        if self.at(L_PAREN) {
            self.param_list();
        }
        if self.at(COLON) {
            self.base_list();
        }
        while self.at(WHERE_KW) {
            self.constraint_clause();
        }
        if self.at(L_BRACE) {
            self.member_list();
            self.eat(SEMICOLON);
        } else {
            self.expect(SEMICOLON);
        }
        self.wrap(checkpoint, kind);
    }

    fn member_list(&mut self) {
        self.start_node(MEMBER_LIST);
        self.bump();
        while !self.at(R_BRACE) && !self.at_eof() {
            if self.at(NAMESPACE_KW) || self.at(USING_KW) {
                self.bump_error("member declaration");
                continue;
            }
            self.member();
        }
        self.expect(R_BRACE);
        self.finish_node();
    }

    fn enum_decl(&mut self, checkpoint: Checkpoint) {
        self.bump();
        self.expect(IDENT);
        if self.at(COLON) {
            self.base_list();
        }
        if self.at(L_BRACE) {
            self.start_node(MEMBER_LIST);
            self.bump();
            while !self.at(R_BRACE) && !self.at_eof() {
                if self.at(IDENT) || self.at(L_BRACK) {
                    self.enum_member();
                } else {
                    self.bump_error("enum member");
                    continue;
                }
                if !self.eat(COMMA) {
                    break;
                }
            }
            self.expect(R_BRACE);
            self.finish_node();
            self.eat(SEMICOLON);
        } else {
            self.expect(L_BRACE);
        }
        self.wrap(checkpoint, ENUM_DECL);
    }

    fn enum_member(&mut self) {
        let checkpoint = self.decl_checkpoint();
        while self.at(L_BRACK) {
            self.attribute_list();
        }
        self.expect(IDENT);
        if self.at(EQ) {
            self.equals_value(&[COMMA, R_BRACE]);
        }
        self.wrap(checkpoint, ENUM_MEMBER);
    }

    fn delegate_decl(&mut self, checkpoint: Checkpoint) {
        self.bump();
        self.type_ref();
        self.expect(IDENT);
        if self.at(L_ANGLE) {
            self.type_param_list();
        }
        self.param_list();
        while self.at(WHERE_KW) {
            self.constraint_clause();
        }
        self.expect(SEMICOLON);
        self.wrap(checkpoint, DELEGATE_DECL);
    }

    fn constructor_decl(&mut self, checkpoint: Checkpoint) {
        self.bump();
        self.param_list();
        if self.at(COLON) {
            // `: base(...)` / `: this(...)` initializer, kept raw.
            self.start_node(EXPR_BODY);
            self.bump();
            self.skip_balanced(&[L_BRACE, SEMICOLON, FAT_ARROW]);
            self.finish_node();
        }
        self.body();
        self.wrap(checkpoint, CONSTRUCTOR_DECL);
    }

    /// A member that starts with a type: method, property or field.
    fn typed_member(&mut self, checkpoint: Checkpoint) {
        self.type_ref();
        let name_checkpoint = self.checkpoint();
        if !self.expect(IDENT) {
            self.skip_balanced(MEMBER_RECOVERY);
            self.eat(SEMICOLON);
            self.wrap(checkpoint, ERROR);
            return;
        }

        match self.current() {
            L_PAREN | L_ANGLE => {
                if self.at(L_ANGLE) {
                    self.type_param_list();
                }
                self.param_list();
                while self.at(WHERE_KW) {
                    self.constraint_clause();
                }
                self.body();
                self.wrap(checkpoint, METHOD_DECL);
            }
            L_BRACE | FAT_ARROW => {
                if self.at(L_BRACE) {
                    self.accessor_list();
                    if self.at(EQ) {
                        self.equals_value(&[SEMICOLON]);
                        self.expect(SEMICOLON);
                    }
                } else {
                    self.expr_body();
                }
                self.wrap(checkpoint, PROPERTY_DECL);
            }
            _ => {
                if self.at(EQ) {
                    self.equals_value(&[COMMA, SEMICOLON]);
                }
                self.wrap(name_checkpoint, VARIABLE_DECLARATOR);
                while self.eat(COMMA) {
                    self.start_node(VARIABLE_DECLARATOR);
                    self.expect(IDENT);
                    if self.at(EQ) {
                        self.equals_value(&[COMMA, SEMICOLON]);
                    }
                    self.finish_node();
                }
                self.expect(SEMICOLON);
                self.wrap(checkpoint, FIELD_DECL);
            }
        }
    }

    /// `;`, a skipped block, or an expression body.
    fn body(&mut self) {
        match self.current() {
            L_BRACE => self.block(),
            FAT_ARROW => self.expr_body(),
            _ => {
                self.expect(SEMICOLON);
            }
        }
    }

    fn block(&mut self) {
        self.start_node(BLOCK);
        self.bump();
        self.skip_balanced(&[]);
        self.expect(R_BRACE);
        self.finish_node();
    }

    fn expr_body(&mut self) {
        self.start_node(EXPR_BODY);
        self.bump();
        self.skip_balanced(&[SEMICOLON]);
        self.expect(SEMICOLON);
        self.finish_node();
    }

    fn accessor_list(&mut self) {
        self.start_node(ACCESSOR_LIST);
        self.bump();
        while !self.at(R_BRACE) && !self.at_eof() {
            let checkpoint = self.decl_checkpoint();
            while self.at(L_BRACK) {
                self.attribute_list();
            }
            self.modifier_list();
            if self.at_any(&[GET_KW, SET_KW, INIT_KW]) {
                self.bump();
                self.body();
                self.wrap(checkpoint, ACCESSOR);
            } else {
                self.error_expected("'get', 'set' or 'init'");
                self.start_node(ERROR);
                if !self.at(R_BRACE) {
                    self.bump();
                }
                self.finish_node();
                self.wrap(checkpoint, ERROR);
            }
        }
        self.expect(R_BRACE);
        self.finish_node();
    }

    // ---- Attributes ------------------------------------------------------

    fn attribute_list(&mut self) {
        self.start_node(ATTRIBUTE_LIST);
        self.bump();
        if self.nth(1) == COLON && self.nth(2) != COLON {
            self.start_node(ATTRIBUTE_TARGET);
            self.bump();
            self.bump();
            self.finish_node();
        }
        while !self.at(R_BRACK) && !self.at_eof() {
            if self.at(IDENT) {
                self.attribute();
            } else {
                self.bump_error("attribute");
            }
            if !self.eat(COMMA) {
                break;
            }
        }
        self.expect(R_BRACK);
        self.finish_node();
    }

    fn attribute(&mut self) {
        self.start_node(ATTRIBUTE);
        self.named_type();
        if self.at(L_PAREN) {
            self.start_node(ATTRIBUTE_ARG_LIST);
            self.bump();
            while !self.at(R_PAREN) && !self.at_eof() {
                self.attribute_arg();
                if !self.eat(COMMA) {
                    break;
                }
            }
            self.expect(R_PAREN);
            self.finish_node();
        }
        self.finish_node();
    }

    fn attribute_arg(&mut self) {
        self.start_node(ATTRIBUTE_ARG);
        if self.at(IDENT) && self.nth(1) == EQ {
            self.start_node(NAME_EQUALS);
            self.bump();
            self.bump();
            self.finish_node();
        }
        if !self.expr() {
            self.error_expected("constant expression");
            self.skip_balanced(&[COMMA, R_PAREN]);
        }
        self.finish_node();
    }

    // ---- Type parameters, parameters, bases -------------------------------

    fn type_param_list(&mut self) {
        self.start_node(TYPE_PARAM_LIST);
        self.bump();
        while !self.at(R_ANGLE) && !self.at_eof() {
            self.start_node(TYPE_PARAM);
            while self.at(L_BRACK) {
                self.attribute_list();
            }
            if self.at(IN_KW) || self.at(OUT_KW) {
                self.bump();
            }
            self.expect(IDENT);
            self.finish_node();
            if !self.eat(COMMA) {
                break;
            }
        }
        self.expect(R_ANGLE);
        self.finish_node();
    }

    fn param_list(&mut self) {
        self.start_node(PARAM_LIST);
        if !self.expect(L_PAREN) {
            self.finish_node();
            return;
        }
        while !self.at(R_PAREN) && !self.at_eof() {
            self.param();
            if !self.eat(COMMA) {
                break;
            }
        }
        self.expect(R_PAREN);
        self.finish_node();
    }

    fn param(&mut self) {
        let checkpoint = self.decl_checkpoint();
        while self.at(L_BRACK) {
            self.attribute_list();
        }
        while self.at_any(&[REF_KW, OUT_KW, IN_KW, PARAMS_KW, THIS_KW, READONLY_KW]) {
            self.bump();
        }
        if self.type_ref() {
            self.expect(IDENT);
            if self.at(EQ) {
                self.equals_value(&[COMMA, R_PAREN]);
            }
        } else {
            self.skip_balanced(&[COMMA, R_PAREN]);
        }
        self.wrap(checkpoint, PARAM);
    }

    fn base_list(&mut self) {
        self.start_node(BASE_LIST);
        self.bump();
        loop {
            if !self.type_ref() {
                break;
            }
            if self.at(L_PAREN) {
                // Primary constructor arguments passed to the base record.
                self.start_node(EXPR_BODY);
                self.bump();
                self.skip_balanced(&[R_PAREN]);
                self.expect(R_PAREN);
                self.finish_node();
            }
            if !self.eat(COMMA) {
                break;
            }
        }
        self.finish_node();
    }

    fn constraint_clause(&mut self) {
        self.start_node(CONSTRAINT_CLAUSE);
        self.bump();
        self.expect(IDENT);
        self.expect(COLON);
        loop {
            match self.current() {
                CLASS_KW | STRUCT_KW | UNSAFE_KW => {
                    self.bump();
                    self.eat(QUESTION);
                }
                NEW_KW => {
                    self.bump();
                    self.expect(L_PAREN);
                    self.expect(R_PAREN);
                }
                _ => {
                    if !self.type_ref() {
                        break;
                    }
                }
            }
            if !self.eat(COMMA) {
                break;
            }
        }
        self.finish_node();
    }

    // ---- Types -----------------------------------------------------------

    /// Parses a type reference. Returns `false` (after reporting) when none starts here.
    fn type_ref(&mut self) -> bool {
        let checkpoint = self.checkpoint();
        match self.current() {
            kind if kind.is_predefined_type() => {
                self.start_node(PREDEFINED_TYPE);
                self.bump();
                self.finish_node();
            }
            IDENT => self.named_type(),
            _ => {
                self.error_expected("type");
                return false;
            }
        }
        loop {
            if self.at(QUESTION) {
                self.bump();
                self.wrap(checkpoint, NULLABLE_TYPE);
            } else if self.at(L_BRACK) && matches!(self.nth(1), R_BRACK | COMMA) {
                self.bump();
                while self.eat(COMMA) {}
                self.expect(R_BRACK);
                self.wrap(checkpoint, ARRAY_TYPE);
            } else {
                break;
            }
        }
        true
    }

    fn named_type(&mut self) {
        self.start_node(NAMED_TYPE);
        if self.at(IDENT) && self.current_text() == "global" && self.nth(1) == COLON2 {
            self.bump();
            self.bump();
        }
        self.name_segment();
        while self.at(DOT) && self.nth(1) == IDENT {
            self.bump();
            self.name_segment();
        }
        self.finish_node();
    }

    fn name_segment(&mut self) {
        self.start_node(NAME_SEGMENT);
        self.expect(IDENT);
        if self.at(L_ANGLE) {
            self.start_node(TYPE_ARG_LIST);
            self.bump();
            while !self.at(R_ANGLE) && !self.at_eof() {
                if !self.type_ref() {
                    break;
                }
                if !self.eat(COMMA) {
                    break;
                }
            }
            self.expect(R_ANGLE);
            self.finish_node();
        }
        self.finish_node();
    }

    // ---- Constant expressions --------------------------------------------

    /// `= value` where the value may be an arbitrary expression. Constant prefixes
    /// are parsed structurally; anything after them is kept as raw tokens.
    fn equals_value(&mut self, until: &[SyntaxKind]) {
        self.start_node(EQUALS_VALUE);
        self.bump();
        if self.can_start_expr() {
            self.expr();
        }
        self.skip_balanced(until);
        self.finish_node();
    }

    fn can_start_expr(&self) -> bool {
        let kind = self.current();
        kind.is_literal()
            || kind.is_predefined_type()
            || matches!(kind, IDENT | MINUS | TYPEOF_KW | NEW_KW | L_BRACE | L_BRACK)
    }

    /// Parses a constant expression. Returns `false` without consuming anything when
    /// no expression starts here.
    fn expr(&mut self) -> bool {
        let checkpoint = self.checkpoint();
        if !self.unary_expr() {
            return false;
        }
        while self.at_any(&[PIPE, PLUS, AMP]) {
            self.bump();
            if !self.unary_expr() {
                self.error_expected("expression");
            }
            self.wrap(checkpoint, BINARY_EXPR);
        }
        true
    }

    fn unary_expr(&mut self) -> bool {
        match self.current() {
            kind if kind.is_literal() => {
                self.start_node(LITERAL_EXPR);
                self.bump();
                self.finish_node();
            }
            MINUS | TILDE => {
                self.start_node(PREFIX_EXPR);
                self.bump();
                if !self.unary_expr() {
                    self.error_expected("expression");
                }
                self.finish_node();
            }
            L_PAREN => {
                // Parenthesised constants are transparent.
                self.bump();
                if !self.expr() {
                    self.error_expected("expression");
                }
                self.expect(R_PAREN);
            }
            TYPEOF_KW => {
                self.start_node(TYPEOF_EXPR);
                self.bump();
                self.expect(L_PAREN);
                self.type_ref();
                self.expect(R_PAREN);
                self.finish_node();
            }
            IDENT => {
                self.start_node(NAME_EXPR);
                if self.current_text() == "global" && self.nth(1) == COLON2 {
                    self.bump();
                    self.bump();
                }
                self.bump();
                while self.at(DOT) && self.nth(1) == IDENT {
                    self.bump();
                    self.bump();
                }
                self.finish_node();
            }
            kind if kind.is_predefined_type() && self.nth(1) == DOT => {
                self.start_node(NAME_EXPR);
                self.bump();
                while self.at(DOT) && self.nth(1) == IDENT {
                    self.bump();
                    self.bump();
                }
                self.finish_node();
            }
            NEW_KW => {
                self.start_node(ARRAY_EXPR);
                self.bump();
                if self.at(IDENT) || self.current().is_predefined_type() {
                    self.type_ref();
                }
                if self.at(L_BRACK) {
                    self.bump();
                    while self.eat(COMMA) {}
                    self.expect(R_BRACK);
                }
                if self.at(L_BRACE) {
                    self.array_elements(L_BRACE, R_BRACE);
                }
                self.finish_node();
            }
            L_BRACE => {
                self.start_node(ARRAY_EXPR);
                self.array_elements(L_BRACE, R_BRACE);
                self.finish_node();
            }
            L_BRACK => {
                self.start_node(ARRAY_EXPR);
                self.array_elements(L_BRACK, R_BRACK);
                self.finish_node();
            }
            _ => return false,
        }
        true
    }

    fn array_elements(&mut self, open: SyntaxKind, close: SyntaxKind) {
        self.expect(open);
        while !self.at(close) && !self.at_eof() {
            if !self.expr() {
                self.error_expected("expression");
                self.skip_balanced(&[COMMA, close]);
            }
            if !self.eat(COMMA) {
                break;
            }
        }
        self.expect(close);
    }
}
