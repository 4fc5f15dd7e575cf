//! Postfix operators, argument lists and struct/array literals.

use jai_ir::{FieldName, SyntaxKind, TokenKind};

use super::Operand;
use crate::builder::Checkpoint;
use crate::grammar::ty::reinterpret_as_type;
use crate::{PResult, ParseContext, Parser, SyntaxError};

impl Parser<'_> {
    /// An operand followed by its postfix operators.
    pub(super) fn parse_postfix_expression(&mut self) -> Result<Operand, SyntaxError> {
        let checkpoint = self.checkpoint();
        if self.parse_primary()? == Operand::Closed {
            return Ok(Operand::Closed);
        }
        self.parse_postfix(checkpoint)?;
        Ok(Operand::Open)
    }

    /// An operand without binary operators, as in `using,only(a, b)`.
    pub(crate) fn parse_postfix_operand(&mut self) -> PResult {
        self.parse_postfix_expression()?;
        Ok(())
    }

    fn parse_postfix(&mut self, checkpoint: Checkpoint) -> PResult {
        loop {
            match self.current_kind() {
                TokenKind::LParen => {
                    let kind = self.decide(&[
                        SyntaxKind::CallExpression,
                        SyntaxKind::ParameterizedStructType,
                    ]);
                    let field = if kind == SyntaxKind::CallExpression {
                        FieldName::Function
                    } else {
                        FieldName::Type
                    };
                    self.tag(field);
                    self.start_at(checkpoint, kind);
                    self.parse_call_arguments()?;
                    self.finish();
                }
                TokenKind::LBracket => {
                    self.tag(FieldName::Object);
                    self.start_at(checkpoint, SyntaxKind::IndexExpression);
                    self.bump();
                    self.in_fresh_context(|p| -> PResult {
                        p.parse_expr()?;
                        p.tag(FieldName::Index);
                        if p.eat(TokenKind::Comma) {
                            p.parse_expr()?;
                            p.tag(FieldName::Index);
                        }
                        Ok(())
                    })?;
                    self.expect(TokenKind::RBracket)?;
                    self.finish();
                }
                TokenKind::Dot => match self.peek_kind_at(1) {
                    TokenKind::Ident => {
                        self.tag(FieldName::Object);
                        self.start_at(checkpoint, SyntaxKind::MemberExpression);
                        self.bump();
                        self.bump_tagged(FieldName::Member);
                        self.finish();
                    }
                    TokenKind::Star => {
                        self.tag(FieldName::Argument);
                        self.start_at(checkpoint, SyntaxKind::DereferenceExpression);
                        self.bump();
                        self.bump();
                        self.finish();
                    }
                    TokenKind::LBrace => {
                        self.parse_typed_literal(checkpoint, SyntaxKind::StructLiteral)?;
                    }
                    TokenKind::LBracket => {
                        self.parse_typed_literal(checkpoint, SyntaxKind::ArrayLiteral)?;
                    }
                    _ => break,
                },
                // A `*` that no operand can follow dereferences.
                TokenKind::Star if !self.can_start_expression_at(1) => {
                    self.tag(FieldName::Argument);
                    self.start_at(checkpoint, SyntaxKind::DereferenceExpression);
                    self.bump();
                    self.finish();
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// `T.{…}` or `T.[…]`: the operand so far names the literal's type.
    fn parse_typed_literal(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) -> PResult {
        self.builder.map_last_node(reinterpret_as_type);
        self.tag(FieldName::Type);
        self.start_at(checkpoint, kind);
        self.parse_literal_body(kind)?;
        self.finish();
        Ok(())
    }

    /// `.{ entries }` or `.[ entries ]`, from the dot on. Struct entries
    /// may name their member: `.{x = 1, y = 2}`.
    pub(super) fn parse_literal_body(&mut self, kind: SyntaxKind) -> PResult {
        let close = if kind == SyntaxKind::StructLiteral {
            TokenKind::RBrace
        } else {
            TokenKind::RBracket
        };
        self.bump();
        let open = self.current_span();
        self.bump();
        self.in_fresh_context(|p| {
            p.with_context(ParseContext::IN_ARGUMENTS, |p| -> PResult {
                while !p.check(close) && !p.is_at_end() {
                    p.parse_literal_entry()?;
                    p.tag(FieldName::Element);
                    if !p.eat(TokenKind::Comma) {
                        break;
                    }
                }
                Ok(())
            })
        })?;
        if close == TokenKind::RBrace {
            self.expect_closing_brace(open);
            Ok(())
        } else {
            self.expect(close)
        }
    }

    fn parse_literal_entry(&mut self) -> PResult {
        if self.check(TokenKind::Ident) && self.peek_kind_at(1) == TokenKind::Eq {
            self.start(SyntaxKind::AssignmentStatement);
            self.ident_node();
            self.tag(FieldName::Left);
            self.bump_tagged(FieldName::Operator);
            self.parse_expr()?;
            self.tag(FieldName::Right);
            self.finish();
            Ok(())
        } else {
            self.parse_expr()
        }
    }

    /// `( arguments )` of a call or directive.
    pub(crate) fn parse_call_arguments(&mut self) -> PResult {
        self.parse_argument_list(Self::parse_expr)
    }

    /// `( arguments )` with positional arguments read by `argument`.
    /// Named arguments `name = value`, spreads `..args` and empty slots
    /// `f(, 2,)` are accepted in any list.
    pub(crate) fn parse_argument_list(&mut self, argument: fn(&mut Self) -> PResult) -> PResult {
        self.expect(TokenKind::LParen)?;
        self.in_fresh_context(|p| {
            p.with_context(ParseContext::IN_ARGUMENTS, |p| -> PResult {
                while !p.check(TokenKind::RParen) && !p.is_at_end() {
                    // Skipped slot.
                    if p.eat(TokenKind::Comma) {
                        continue;
                    }
                    p.parse_argument(argument)?;
                    p.tag(FieldName::Argument);
                    if !p.check(TokenKind::RParen) {
                        p.expect(TokenKind::Comma)?;
                    }
                }
                Ok(())
            })
        })?;
        self.expect(TokenKind::RParen)
    }

    fn parse_argument(&mut self, argument: fn(&mut Self) -> PResult) -> PResult {
        if self.check(TokenKind::Ident) && self.peek_kind_at(1) == TokenKind::Eq {
            self.start(SyntaxKind::NamedArgument);
            self.bump_tagged(FieldName::Name);
            self.bump();
            self.parse_expr()?;
            self.tag(FieldName::Value);
            self.finish();
            Ok(())
        } else if self.check(TokenKind::DotDot) {
            self.start(SyntaxKind::SpreadArgument);
            self.bump();
            self.parse_expr()?;
            self.tag(FieldName::Value);
            self.finish();
            Ok(())
        } else {
            argument(self)
        }
    }
}
