//! Declarations.
//!
//! A declaration is a list of names followed by `:` or `::`. Which node it
//! becomes is known only after that: `Name :: struct` opens a struct,
//! `Name :: (…) {…}` a procedure, `a, b : T : …` a constant. The names are
//! pushed first and the node is opened retroactively around them.

use jai_diagnostic::ErrorCode;
use jai_ir::{FieldName, Span, SyntaxKind, TokenKind};

use crate::{PResult, Parser, SyntaxError};

/// Operators that can be overloaded, each as the token sequence spelling it.
const OVERLOADABLE_OPERATORS: &[&[TokenKind]] = {
    use TokenKind::{
        Amp, AmpEq, AmpTilde, AndAnd, AndAndEq, Caret, CaretEq, Eq, EqEq, Gt, GtEq, LBracket,
        Lt, LtEq, Minus, MinusEq, NotEq, OrOr, OrOrEq, Percent, PercentEq, Pipe, PipeEq, Plus,
        PlusEq, RBracket, RotL, RotLEq, RotR, RotREq, Shl, ShlEq, Shr, ShrEq, Slash, SlashEq,
        Star, StarEq, Tilde,
    };
    &[
        // Longest spellings first.
        &[LBracket, RBracket, Eq],
        &[Star, LBracket, RBracket],
        &[LBracket, RBracket],
        &[PlusEq],
        &[MinusEq],
        &[StarEq],
        &[SlashEq],
        &[PercentEq],
        &[AmpEq],
        &[PipeEq],
        &[CaretEq],
        &[ShlEq],
        &[ShrEq],
        &[RotLEq],
        &[RotREq],
        &[OrOrEq],
        &[AndAndEq],
        &[Plus],
        &[Minus],
        &[Star],
        &[Slash],
        &[Percent],
        &[Amp],
        &[Pipe],
        &[Caret],
        &[Shl],
        &[Shr],
        &[RotL],
        &[RotR],
        &[OrOr],
        &[AndAnd],
        &[EqEq],
        &[NotEq],
        &[Tilde],
        &[AmpTilde],
        &[Gt],
        &[GtEq],
        &[LtEq],
        &[Lt],
    ]
};

impl Parser<'_> {
    /// `names : T`, `names : T? = values`, `names : T? : values`, or one of
    /// the declarations introduced by `Name ::`.
    pub(super) fn parse_declaration(&mut self) -> PResult {
        let checkpoint = self.checkpoint();
        let mut names = 1;
        self.bump_tagged(FieldName::Name);
        while self.eat(TokenKind::Comma) {
            self.expect_name(FieldName::Name)?;
            names += 1;
        }

        let kind = if let Some(colons) = self.cursor.double_colon_at(0) {
            for _ in 0..colons {
                self.bump();
            }
            if names == 1 {
                self.parse_definition()?
            } else {
                self.parse_value_list()?;
                SyntaxKind::ConstDeclaration
            }
        } else {
            self.expect(TokenKind::Colon)?;
            if !self.check(TokenKind::Eq) && !self.check(TokenKind::Colon) {
                self.parse_type()?;
                self.tag(FieldName::Type);
            }
            if self.eat(TokenKind::Colon) {
                self.parse_value_list()?;
                SyntaxKind::ConstDeclaration
            } else {
                if self.eat(TokenKind::Eq) {
                    self.parse_value_list()?;
                }
                SyntaxKind::VariableDeclaration
            }
        };

        self.start_at(checkpoint, kind);
        self.finish();
        Ok(())
    }

    /// Everything after `Name ::`. Returns the kind of node to open
    /// around the name.
    fn parse_definition(&mut self) -> Result<SyntaxKind, SyntaxError> {
        if self.check_word("struct") || self.check_word("union") {
            let kind =
                self.decide(&[SyntaxKind::StructDeclaration, SyntaxKind::AnonymousStructType]);
            if kind == SyntaxKind::StructDeclaration {
                self.bump_keyword();
                self.parse_struct_tail()?;
                return Ok(kind);
            }
        }
        if self.check_word("enum") || self.check_word("enum_flags") {
            let kind = self.decide(&[SyntaxKind::ConstDeclaration, SyntaxKind::EnumDeclaration]);
            if kind == SyntaxKind::EnumDeclaration {
                self.bump_keyword();
                self.parse_enum_tail()?;
                return Ok(kind);
            }
        }
        if self.check_directive("#import") {
            self.parse_import_tail()?;
            return Ok(SyntaxKind::Import);
        }
        self.eat_procedure_modifier();

        self.parse_expr()?;
        if self.builder.last_node_kind() == Some(SyntaxKind::Procedure)
            && !self.check(TokenKind::Comma)
        {
            return Ok(SyntaxKind::ProcedureDeclaration);
        }
        self.tag(FieldName::Value);
        while self.eat(TokenKind::Comma) {
            self.parse_expr()?;
            self.tag(FieldName::Value);
        }
        Ok(SyntaxKind::ConstDeclaration)
    }

    /// `inline` or `no_inline` before a procedure literal.
    fn eat_procedure_modifier(&mut self) {
        if (self.check_word("inline") || self.check_word("no_inline"))
            && self.peek_kind_at(1) == TokenKind::LParen
        {
            self.bump_keyword();
            self.tag(FieldName::Modifier);
        }
    }

    /// `value (, value)*`, each recorded as a value.
    fn parse_value_list(&mut self) -> PResult {
        self.parse_expr()?;
        self.tag(FieldName::Value);
        while self.eat(TokenKind::Comma) {
            self.parse_expr()?;
            self.tag(FieldName::Value);
        }
        Ok(())
    }

    /// After `struct` or `union`: optional parameters, directives, and the
    /// member block. Shared by declarations and anonymous struct types.
    pub(super) fn parse_struct_tail(&mut self) -> PResult {
        if self.check(TokenKind::LParen) {
            self.parse_parameter_group()?;
        }
        self.parse_trailing_directives(|_| true)?;
        let open = self.current_span();
        self.expect(TokenKind::LBrace)?;
        self.in_fresh_context(Self::parse_statement_list);
        self.expect_closing_brace(open);
        Ok(())
    }

    /// After `enum` or `enum_flags`: optional backing type, `#specified`
    /// and other directives, then `{ A; B :: 2; }`. Shared by declarations
    /// and anonymous enum types.
    pub(super) fn parse_enum_tail(&mut self) -> PResult {
        if !self.check(TokenKind::LBrace) && !self.check(TokenKind::Directive) {
            self.parse_type()?;
            self.tag(FieldName::Type);
        }
        while self.check(TokenKind::Directive) {
            if self.check_directive("#specified") {
                self.start(SyntaxKind::SpecifiedDirective);
                self.bump();
                self.finish();
            } else {
                self.parse_directive_modifier()?;
                self.tag(FieldName::Modifier);
            }
        }

        let open = self.current_span();
        self.expect(TokenKind::LBrace)?;
        self.in_fresh_context(Self::parse_enum_members);
        self.expect_closing_brace(open);
        Ok(())
    }

    fn parse_enum_members(&mut self) {
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            if self.eat(TokenKind::Semicolon) {
                continue;
            }
            if !self.check(TokenKind::Ident) {
                let error = self.expected(ErrorCode::E1004, "enum member name");
                self.skip_as_error(error);
                continue;
            }
            let checkpoint = self.checkpoint();
            let depth = self.builder.depth();
            let start = self.cursor.position();
            if let Err(error) = self.parse_enum_member() {
                self.recover(checkpoint, depth, start, error);
            }
        }
    }

    /// `NAME` or `NAME :: value`, then `;` unless the enum closes.
    fn parse_enum_member(&mut self) -> PResult {
        self.start(SyntaxKind::EnumMember);
        self.bump_tagged(FieldName::Name);
        if let Some(colons) = self.cursor.double_colon_at(0) {
            for _ in 0..colons {
                self.bump();
            }
            self.parse_expr()?;
            self.tag(FieldName::Value);
        }
        self.finish();
        if !self.eat(TokenKind::Semicolon) && !self.check(TokenKind::RBrace) {
            let error = SyntaxError::new(
                ErrorCode::E1008,
                format!("expected `;` after enum member, found {}", self.found()),
                Span::point(self.cursor.previous_span().end),
            );
            self.error(error);
        }
        Ok(())
    }

    /// From `#import` on: modifiers, the module path and optional module
    /// arguments.
    pub(super) fn parse_import_tail(&mut self) -> PResult {
        self.bump();
        self.parse_directive_options()?;
        self.parse_string()?;
        self.tag(FieldName::Path);
        if self.check(TokenKind::LParen) {
            self.parse_call_arguments()?;
        }
        Ok(())
    }

    /// `operator OP :: procedure` at the current token.
    pub(super) fn at_operator_declaration(&self) -> bool {
        self.operator_len_at(1).is_some()
    }

    /// Length of the overloadable operator spelled at offset `n`, if it is
    /// followed by `::`.
    fn operator_len_at(&self, n: usize) -> Option<usize> {
        OVERLOADABLE_OPERATORS
            .iter()
            .find(|spelling| {
                spelling
                    .iter()
                    .enumerate()
                    .all(|(i, kind)| self.peek_kind_at(n + i) == *kind)
                    && self.cursor.double_colon_at(n + spelling.len()).is_some()
            })
            .map(|spelling| spelling.len())
    }

    pub(super) fn parse_operator_declaration(&mut self) -> PResult {
        self.start(SyntaxKind::ProcedureDeclaration);
        self.bump_keyword();
        let len = self.operator_len_at(0).unwrap_or(1);
        for _ in 0..len {
            self.bump_tagged(FieldName::Operator);
        }
        if let Some(colons) = self.cursor.double_colon_at(0) {
            for _ in 0..colons {
                self.bump();
            }
        }
        self.eat_procedure_modifier();
        self.parse_expr()?;
        self.finish();
        Ok(())
    }
}
