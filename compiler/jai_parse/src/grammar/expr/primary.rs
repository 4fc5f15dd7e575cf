//! Primary expressions.

use jai_diagnostic::ErrorCode;
use jai_ir::{Child, FieldName, SyntaxElement, SyntaxKind, TokenKind};

use super::Operand;
use crate::grammar::is_statement_keyword;
use crate::grammar::ty::{is_builtin_type, reinterpret_as_type};
use crate::{PResult, ParseContext, Parser, SyntaxError};

/// Tokens scanned for the `) =>` closing a quick procedure's parameters.
const QUICK_LOOKAHEAD: usize = 64;

impl Parser<'_> {
    pub(super) fn parse_primary(&mut self) -> Result<Operand, SyntaxError> {
        match self.current_kind() {
            TokenKind::Ident => self.parse_word(),
            TokenKind::Int => Ok(self.leaf(SyntaxKind::Integer)),
            TokenKind::Float => Ok(self.leaf(SyntaxKind::Float)),
            TokenKind::Quote => {
                self.parse_string()?;
                Ok(Operand::Open)
            }
            TokenKind::Directive => self.parse_directive_expression(),
            TokenKind::LParen => self.parse_paren(),
            TokenKind::LBracket | TokenKind::Dollar => {
                self.parse_type()?;
                Ok(Operand::Open)
            }
            TokenKind::Dot => self.parse_implicit(),
            TokenKind::TripleDash => Ok(self.leaf(SyntaxKind::Uninitialized)),
            // The lexer already reported the bad token.
            TokenKind::Error => Ok(self.leaf(SyntaxKind::Error)),
            _ => Err(self.expected(ErrorCode::E1002, "expression")),
        }
    }

    /// A node holding just the current token.
    fn leaf(&mut self, kind: SyntaxKind) -> Operand {
        self.start(kind);
        self.bump();
        self.finish();
        Operand::Open
    }

    fn keyword_leaf(&mut self, kind: SyntaxKind) -> Operand {
        self.start(kind);
        self.bump_keyword();
        self.finish();
        Operand::Open
    }

    fn parse_word(&mut self) -> Result<Operand, SyntaxError> {
        let text = self.current_text();
        match text {
            "true" | "false" => Ok(self.keyword_leaf(SyntaxKind::Boolean)),
            "null" => Ok(self.keyword_leaf(SyntaxKind::Null)),
            "struct" | "union" => {
                self.parse_anonymous_struct()?;
                Ok(Operand::Closed)
            }
            "enum" | "enum_flags" => {
                self.parse_anonymous_enum()?;
                Ok(Operand::Closed)
            }
            "ifx" => self.parse_if_expression(),
            "type_of" if self.peek_kind_at(1) == TokenKind::LParen => {
                self.parse_type_of()?;
                Ok(Operand::Open)
            }
            "inline" | "no_inline" if self.peek_kind_at(1) == TokenKind::Ident => {
                self.parse_inline_call()
            }
            _ if is_statement_keyword(text) => Err(self.expected(ErrorCode::E1002, "expression")),
            _ if is_builtin_type(text) => Ok(self.leaf(SyntaxKind::BuiltinType)),
            _ if self.peek_kind_at(1) == TokenKind::FatArrow => {
                self.start(SyntaxKind::QuickProcedure);
                self.ident_node();
                self.tag(FieldName::Parameters);
                self.parse_quick_body()?;
                self.finish();
                Ok(Operand::Closed)
            }
            _ => {
                self.ident_node();
                Ok(Operand::Open)
            }
        }
    }

    /// `inline f(args)`: the call carries the modifier.
    fn parse_inline_call(&mut self) -> Result<Operand, SyntaxError> {
        let checkpoint = self.checkpoint();
        self.bump_keyword();
        self.tag(FieldName::Modifier);
        self.ident_node();
        if !self.check(TokenKind::LParen) {
            return Err(self.expected(ErrorCode::E1001, "`(`"));
        }
        self.tag(FieldName::Function);
        self.start_at(checkpoint, SyntaxKind::CallExpression);
        self.parse_call_arguments()?;
        self.finish();
        Ok(Operand::Open)
    }

    /// `ifx cond then? a else b` and `#ifx`. Branches are expressions or
    /// `{ expr; … }` blocks.
    pub(crate) fn parse_if_expression(&mut self) -> Result<Operand, SyntaxError> {
        self.start(SyntaxKind::IfExpression);
        self.bump_introducer();
        self.parse_expr()?;
        self.tag(FieldName::Condition);
        self.eat_word("then");
        self.parse_if_expression_branch()?;
        self.tag(FieldName::Consequence);
        if self.eat_word("else") {
            self.parse_if_expression_branch()?;
            self.tag(FieldName::Alternative);
        }
        self.finish();
        Ok(Operand::Closed)
    }

    fn parse_if_expression_branch(&mut self) -> PResult {
        if !self.check(TokenKind::LBrace) {
            return self.parse_expr();
        }
        self.start(SyntaxKind::IfExpressionBlock);
        let open = self.current_span();
        self.bump();
        self.in_fresh_context(|p| -> PResult {
            while !p.check(TokenKind::RBrace) && !p.is_at_end() {
                if p.eat(TokenKind::Semicolon) {
                    continue;
                }
                p.parse_expr()?;
                if !p.check(TokenKind::RBrace) {
                    p.expect(TokenKind::Semicolon)?;
                }
            }
            Ok(())
        })?;
        self.expect_closing_brace(open);
        self.finish();
        Ok(())
    }

    /// `=>` and the body of a quick procedure.
    fn parse_quick_body(&mut self) -> PResult {
        self.bump();
        if self.check(TokenKind::LBrace) {
            self.parse_block()?;
        } else {
            self.parse_expr()?;
        }
        self.tag(FieldName::Body);
        Ok(())
    }

    /// A `(` in operand position: quick procedure parameters, a procedure
    /// literal or type, or a parenthesized expression. A parenthesized
    /// expression followed by `->` is the parameter list of a procedure
    /// type.
    fn parse_paren(&mut self) -> Result<Operand, SyntaxError> {
        if self.at_quick_parameters() {
            self.start(SyntaxKind::QuickProcedure);
            self.bump();
            self.in_fresh_context(|p| {
                p.with_context(ParseContext::IN_ARGUMENTS, Self::parse_quick_parameters)
            })?;
            self.expect(TokenKind::RParen)?;
            self.parse_quick_body()?;
            self.finish();
            return Ok(Operand::Closed);
        }
        if self.at_parameter_list() {
            return self.parse_procedure();
        }

        let checkpoint = self.checkpoint();
        self.start(SyntaxKind::ParenthesizedExpression);
        self.bump();
        self.in_fresh_context(Self::parse_expr)?;
        self.expect(TokenKind::RParen)?;
        self.finish();

        if self.check(TokenKind::Arrow) {
            self.builder.splice_last_node(|node| {
                node.into_children()
                    .into_iter()
                    .map(|child| match child.element {
                        SyntaxElement::Node(inner) => Child {
                            field: Some(FieldName::Parameters),
                            element: SyntaxElement::Node(reinterpret_as_type(inner)),
                        },
                        element => Child {
                            field: child.field,
                            element,
                        },
                    })
                    .collect()
            });
            self.start_at(checkpoint, SyntaxKind::ProcedureType);
            self.bump();
            self.parse_results()?;
            self.finish();
        }
        Ok(Operand::Open)
    }

    /// Bare names or typed parameters, `(a, b)` or `(x: int, y := 2)`.
    fn parse_quick_parameters(&mut self) -> PResult {
        while !self.check(TokenKind::RParen) && !self.is_at_end() {
            if self.at_parameter() {
                self.parse_parameter()?;
            } else if self.check(TokenKind::Ident) {
                self.ident_node();
            } else {
                return Err(self.expected(ErrorCode::E1004, "parameter name"));
            }
            self.tag(FieldName::Parameters);
            if !self.check(TokenKind::RParen) {
                self.expect(TokenKind::Comma)?;
            }
        }
        Ok(())
    }

    /// Is the `(` at the cursor closed by a `)` followed by `=>`? Nested
    /// groups are skipped; the scan stops at `;` and after
    /// `QUICK_LOOKAHEAD` tokens.
    fn at_quick_parameters(&self) -> bool {
        let mut depth = 0usize;
        for offset in 1..QUICK_LOOKAHEAD {
            match self.peek_kind_at(offset) {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen if depth == 0 => {
                    return self.peek_kind_at(offset + 1) == TokenKind::FatArrow;
                }
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    if depth == 0 {
                        return false;
                    }
                    depth -= 1;
                }
                TokenKind::Semicolon | TokenKind::Eof => return false,
                _ => {}
            }
        }
        false
    }

    /// `()`, `(name :`, `(name ,`, `(using` or `($` at the current `(`.
    fn at_parameter_list(&self) -> bool {
        match self.peek_kind_at(1) {
            TokenKind::RParen | TokenKind::Dollar => true,
            TokenKind::Ident if self.cursor.word_at(1, "using") => true,
            TokenKind::Ident => {
                matches!(self.peek_kind_at(2), TokenKind::Colon | TokenKind::Comma)
            }
            _ => false,
        }
    }

    /// `.{…}`, `.[…]` or `.Name` with the type left to context.
    fn parse_implicit(&mut self) -> Result<Operand, SyntaxError> {
        match self.peek_kind_at(1) {
            TokenKind::LBrace => self.parse_untyped_literal(SyntaxKind::StructLiteral),
            TokenKind::LBracket => self.parse_untyped_literal(SyntaxKind::ArrayLiteral),
            TokenKind::Ident => {
                self.start(SyntaxKind::MemberExpression);
                self.bump();
                self.bump_tagged(FieldName::Member);
                self.finish();
                Ok(Operand::Open)
            }
            _ => Err(self.expected(ErrorCode::E1002, "expression")),
        }
    }

    fn parse_untyped_literal(&mut self, kind: SyntaxKind) -> Result<Operand, SyntaxError> {
        self.start(kind);
        self.parse_literal_body(kind)?;
        self.finish();
        Ok(Operand::Open)
    }
}
