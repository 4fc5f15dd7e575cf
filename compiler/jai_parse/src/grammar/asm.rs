//! Inline assembly: `#asm AVX, AVX2 { … }`.
//!
//! Each line is a register declaration (`x : gpr === a`) or an instruction
//! (`mov.q x, [y + 8]`), ended by `;` or the closing brace. A malformed
//! line becomes an `ERROR` node on its own.

use jai_diagnostic::ErrorCode;
use jai_ir::{FieldName, Span, SyntaxKind, TokenKind};

use crate::{PResult, Parser, SyntaxError};

impl Parser<'_> {
    pub(super) fn parse_asm(&mut self) -> PResult {
        self.start(SyntaxKind::AsmStatement);
        self.bump();
        while self.check(TokenKind::Ident) {
            self.bump_tagged(FieldName::Modifier);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        let open = self.current_span();
        self.expect(TokenKind::LBrace)?;
        self.in_fresh_context(Self::parse_asm_lines);
        self.expect_closing_brace(open);
        self.finish();
        Ok(())
    }

    fn parse_asm_lines(&mut self) {
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            if self.eat(TokenKind::Semicolon) {
                continue;
            }
            let checkpoint = self.checkpoint();
            let depth = self.builder.depth();
            let start = self.cursor.position();
            if let Err(error) = self.parse_asm_line() {
                self.recover(checkpoint, depth, start, error);
            }
        }
    }

    fn parse_asm_line(&mut self) -> PResult {
        if !self.check(TokenKind::Ident) {
            return Err(self.expected(ErrorCode::E1004, "instruction or register declaration"));
        }
        if self.peek_kind_at(1) == TokenKind::Colon {
            self.parse_asm_declaration()?;
        } else {
            self.parse_asm_instruction()?;
        }
        if !self.eat(TokenKind::Semicolon) && !self.check(TokenKind::RBrace) {
            let error = SyntaxError::new(
                ErrorCode::E1008,
                format!("expected `;` after assembly line, found {}", self.found()),
                Span::point(self.cursor.previous_span().end),
            );
            self.error(error);
        }
        Ok(())
    }

    /// `name : class (=== register)?`
    fn parse_asm_declaration(&mut self) -> PResult {
        self.start(SyntaxKind::AsmDeclaration);
        self.bump_tagged(FieldName::Name);
        self.bump();
        self.expect_name(FieldName::Type)?;
        if self.eat(TokenKind::TripleEq) {
            self.expect_name(FieldName::Register)?;
        }
        self.finish();
        Ok(())
    }

    /// `mnemonic(.size)? operand (, operand)*`
    fn parse_asm_instruction(&mut self) -> PResult {
        self.start(SyntaxKind::AsmInstruction);
        self.bump_tagged(FieldName::Mnemonic);
        if self.check(TokenKind::Dot) && self.peek_kind_at(1) == TokenKind::Ident {
            self.bump();
            self.bump_tagged(FieldName::Size);
        }
        if !self.check(TokenKind::Semicolon) && !self.check(TokenKind::RBrace) {
            self.parse_asm_operand()?;
            while self.eat(TokenKind::Comma) {
                self.parse_asm_operand()?;
            }
        }
        self.finish();
        Ok(())
    }

    fn parse_asm_operand(&mut self) -> PResult {
        if self.check(TokenKind::LBracket) {
            self.start(SyntaxKind::AsmMemoryOperand);
            self.bump();
            self.parse_expr()?;
            self.expect(TokenKind::RBracket)?;
            self.finish();
        } else {
            self.parse_expr()?;
        }
        self.tag(FieldName::Operand);
        Ok(())
    }
}
