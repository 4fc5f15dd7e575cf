//! Control flow statements and blocks.

use jai_diagnostic::ErrorCode;
use jai_ir::{FieldName, SyntaxKind, TokenKind};

use crate::{PResult, ParseContext, Parser};

impl Parser<'_> {
    /// `{ statements }`. Context flags do not reach into a block.
    pub(crate) fn parse_block(&mut self) -> PResult {
        self.start(SyntaxKind::Block);
        let open = self.current_span();
        self.expect(TokenKind::LBrace)?;
        self.in_fresh_context(Self::parse_statement_list);
        self.expect_closing_brace(open);
        self.finish();
        Ok(())
    }

    /// Consume the keyword or directive that opens a statement.
    pub(super) fn bump_introducer(&mut self) {
        if self.check(TokenKind::Ident) {
            self.bump_keyword();
        } else {
            self.bump();
        }
    }

    /// `if` and `#if`: an if statement, or an if-case when the condition is
    /// followed by `== {`.
    pub(super) fn parse_if(&mut self) -> PResult {
        let checkpoint = self.checkpoint();
        self.bump_introducer();
        self.with_context(ParseContext::IN_CONDITION, Self::parse_expr)?;
        self.tag(FieldName::Condition);

        if self.check(TokenKind::EqEq) && self.peek_kind_at(1) == TokenKind::LBrace {
            self.start_at(checkpoint, SyntaxKind::IfCaseStatement);
            self.bump();
            let open = self.current_span();
            self.bump();
            self.in_fresh_context(Self::parse_switch_cases);
            self.expect_closing_brace(open);
            self.finish();
            return Ok(());
        }

        self.start_at(checkpoint, SyntaxKind::IfStatement);
        self.eat_word("then");
        self.parse_substatement(Some(FieldName::Consequence))?;
        if self.eat_word("else") {
            self.parse_substatement(Some(FieldName::Alternative))?;
        }
        self.finish();
        Ok(())
    }

    fn parse_switch_cases(&mut self) {
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            if self.eat(TokenKind::Semicolon) {
                continue;
            }
            if !self.check_word("case") {
                let error = self.expected(ErrorCode::E1001, "`case`");
                self.skip_as_error(error);
                continue;
            }
            let checkpoint = self.checkpoint();
            let depth = self.builder.depth();
            let start = self.cursor.position();
            if let Err(error) = self.parse_switch_case() {
                self.recover(checkpoint, depth, start, error);
            }
        }
    }

    /// `case value?;` and the statements up to the next case.
    fn parse_switch_case(&mut self) -> PResult {
        self.start(SyntaxKind::SwitchCase);
        self.bump_keyword();
        if !self.check(TokenKind::Semicolon) {
            self.parse_expr()?;
            self.tag(FieldName::Value);
        }
        self.expect(TokenKind::Semicolon)?;
        while !self.check_word("case") && !self.check(TokenKind::RBrace) && !self.is_at_end() {
            self.parse_statement_recovering();
        }
        self.finish();
        Ok(())
    }

    /// `while (name : T? =)? condition body`
    pub(super) fn parse_while(&mut self) -> PResult {
        self.start(SyntaxKind::WhileStatement);
        self.bump_keyword();
        if self.check(TokenKind::Ident) && self.peek_kind_at(1) == TokenKind::Colon {
            self.bump_tagged(FieldName::Name);
            self.bump();
            if !self.check(TokenKind::Eq) {
                self.parse_type()?;
                self.tag(FieldName::Type);
            }
            self.expect(TokenKind::Eq)?;
        }
        self.parse_expr()?;
        self.tag(FieldName::Condition);
        self.parse_substatement(Some(FieldName::Body))?;
        self.finish();
        Ok(())
    }

    /// `for #v2? <? *? (names :)? iterable body`
    pub(super) fn parse_for(&mut self) -> PResult {
        self.start(SyntaxKind::ForStatement);
        self.bump_keyword();
        if self.check_directive("#v2") {
            self.bump_tagged(FieldName::Modifier);
        }
        for modifier in [TokenKind::Lt, TokenKind::Star] {
            if self.check(modifier) {
                self.bump_tagged(FieldName::Modifier);
            }
        }
        if self.at_loop_names() {
            self.bump_tagged(FieldName::Value);
            while self.eat(TokenKind::Comma) {
                self.bump_tagged(FieldName::Value);
            }
            self.expect(TokenKind::Colon)?;
        }
        self.parse_expr()?;
        self.parse_substatement(Some(FieldName::Body))?;
        self.finish();
        Ok(())
    }

    /// `it, index :` at the current token.
    fn at_loop_names(&self) -> bool {
        let mut offset = 0;
        loop {
            if self.peek_kind_at(offset) != TokenKind::Ident {
                return false;
            }
            match self.peek_kind_at(offset + 1) {
                TokenKind::Colon => return true,
                TokenKind::Comma if offset < 4 => offset += 2,
                _ => return false,
            }
        }
    }

    /// `return values?`
    pub(super) fn parse_return(&mut self) -> PResult {
        self.start(SyntaxKind::ReturnStatement);
        self.bump_keyword();
        if !self.check(TokenKind::Semicolon) && !self.check(TokenKind::RBrace) && !self.is_at_end()
        {
            self.parse_expr()?;
            self.tag(FieldName::Value);
            while self.eat(TokenKind::Comma) {
                self.parse_expr()?;
                self.tag(FieldName::Value);
            }
        }
        self.finish();
        Ok(())
    }

    /// `break label?` and `continue label?`
    pub(super) fn parse_jump(&mut self, kind: SyntaxKind) -> PResult {
        self.start(kind);
        self.bump_keyword();
        if self.check(TokenKind::Ident) {
            self.bump_tagged(FieldName::Label);
        }
        self.finish();
        Ok(())
    }

    pub(super) fn parse_defer(&mut self) -> PResult {
        self.start(SyntaxKind::DeferStatement);
        self.bump_keyword();
        self.parse_substatement(Some(FieldName::Body))?;
        self.finish();
        Ok(())
    }

    /// `using (,only(…) | ,except(…) | ,map(…))? statement`
    pub(super) fn parse_using(&mut self) -> PResult {
        self.start(SyntaxKind::UsingStatement);
        self.bump_keyword();
        self.tag(FieldName::Keyword);
        while self.check(TokenKind::Comma) {
            self.bump();
            self.parse_postfix_operand()?;
            self.tag(FieldName::Modifier);
        }
        self.parse_substatement(None)?;
        self.finish();
        Ok(())
    }

    /// `remove it`
    pub(super) fn parse_remove(&mut self) -> PResult {
        self.start(SyntaxKind::RemoveStatement);
        self.bump_keyword();
        if !self.check(TokenKind::Semicolon) {
            self.parse_expr()?;
            self.tag(FieldName::Value);
        }
        self.finish();
        Ok(())
    }

    /// `push_context context { … }`
    pub(super) fn parse_push_context(&mut self) -> PResult {
        self.start(SyntaxKind::PushContextStatement);
        self.bump_keyword();
        self.parse_expr()?;
        self.tag(FieldName::Value);
        self.parse_block()?;
        self.tag(FieldName::Body);
        self.finish();
        Ok(())
    }
}
