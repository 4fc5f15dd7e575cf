//! Expression parsing.
//!
//! Binary operators use precedence climbing over the table in
//! [`rules::BINARY_OPERATORS`](crate::rules::BINARY_OPERATORS); unary
//! operators and casts are handled before the operand, and postfix forms
//! (calls, member access, indexing, dereference, typed literals) after it.
//!
//! # Module Structure
//!
//! - `mod.rs`: Binary and range operators, unary operators, casts
//! - `primary.rs`: Literals, identifiers, parentheses, quick procedures
//! - `postfix.rs`: Calls, member access, indexing, literals after a type

mod postfix;
mod primary;

use jai_ir::{FieldName, SyntaxKind, TokenKind};
use jai_stack::ensure_sufficient_stack;

use crate::rules::{binary_operator, Prec};
use crate::{PResult, ParseContext, Parser, SyntaxError};

/// Whether a parsed operand can still take postfix and binary operators.
///
/// Constructs that end in a body (`struct {…}`, a procedure literal,
/// `#run {…}`, `ifx`) are closed: `(a: int) {…} + 1` is not a sum.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Operand {
    Open,
    Closed,
}

impl Parser<'_> {
    /// A full expression. Clears the type context: a type position's
    /// array size or default value is an ordinary expression.
    pub(crate) fn parse_expr(&mut self) -> PResult {
        self.without_context(ParseContext::IN_TYPE, |p| p.parse_expr_bp(Prec::ASSIGNMENT))
    }

    /// An expression whose binary operators all bind at least as tight
    /// as `min`.
    pub(crate) fn parse_expr_bp(&mut self, min: Prec) -> PResult {
        ensure_sufficient_stack(|| self.parse_expr_bp_inner(min))
    }

    fn parse_expr_bp_inner(&mut self, min: Prec) -> PResult {
        let checkpoint = self.checkpoint();
        if self.parse_unary()? == Operand::Closed {
            return Ok(());
        }

        loop {
            let kind = self.current_kind();
            if kind == TokenKind::DotDot {
                if min > Prec::RANGE {
                    break;
                }
                // Ranges do not chain.
                self.tag(FieldName::RangeFrom);
                self.start_at(checkpoint, SyntaxKind::Range);
                self.bump();
                self.parse_expr_bp(Prec::RANGE.tighter())?;
                self.tag(FieldName::RangeTo);
                self.finish();
                break;
            }

            let Some(op) = binary_operator(kind) else {
                break;
            };
            if op.prec < min {
                break;
            }
            if kind == TokenKind::EqEq
                && self.context.in_condition()
                && self.peek_kind_at(1) == TokenKind::LBrace
            {
                break;
            }

            self.tag(FieldName::Left);
            self.start_at(checkpoint, SyntaxKind::BinaryExpression);
            self.bump_tagged(FieldName::Operator);
            self.parse_expr_bp(op.prec.tighter())?;
            self.tag(FieldName::Right);
            self.finish();
        }
        Ok(())
    }

    fn parse_unary(&mut self) -> Result<Operand, SyntaxError> {
        match self.current_kind() {
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Bang
            | TokenKind::Tilde
            | TokenKind::Amp => {
                self.start(SyntaxKind::UnaryExpression);
                self.bump_tagged(FieldName::Operator);
                self.parse_expr_bp(Prec::UNARY)?;
                self.tag(FieldName::Argument);
                self.finish();
                Ok(Operand::Open)
            }
            TokenKind::Star => {
                self.start(SyntaxKind::Address);
                self.bump();
                self.parse_expr_bp(Prec::UNARY)?;
                self.finish();
                Ok(Operand::Open)
            }
            TokenKind::Shl => {
                self.start(SyntaxKind::PointerExpression);
                self.bump();
                self.parse_expr_bp(Prec::UNARY)?;
                self.tag(FieldName::Argument);
                self.finish();
                Ok(Operand::Open)
            }
            TokenKind::Ident
                if self.check_word("cast")
                    && matches!(self.peek_kind_at(1), TokenKind::LParen | TokenKind::Comma) =>
            {
                self.parse_cast()
            }
            TokenKind::Ident if self.check_word("xx") && self.can_start_expression_at(1) => {
                self.start(SyntaxKind::CastExpression);
                self.bump_keyword();
                self.parse_cast_modifiers();
                self.parse_expr_bp(Prec::CAST)?;
                self.tag(FieldName::Value);
                self.finish();
                Ok(Operand::Open)
            }
            _ => self.parse_postfix_expression(),
        }
    }

    /// `cast(,modifiers)? (T) value`
    fn parse_cast(&mut self) -> Result<Operand, SyntaxError> {
        self.start(SyntaxKind::CastExpression);
        self.bump_keyword();
        self.parse_cast_modifiers();
        self.expect(TokenKind::LParen)?;
        self.in_fresh_context(Self::parse_type)?;
        self.tag(FieldName::Type);
        self.expect(TokenKind::RParen)?;
        self.parse_expr_bp(Prec::CAST)?;
        self.tag(FieldName::Value);
        self.finish();
        Ok(Operand::Open)
    }

    /// `,no_check`, `,trunc`, `,force` after `cast` or `xx`.
    fn parse_cast_modifiers(&mut self) {
        while self.check(TokenKind::Comma) && self.peek_kind_at(1) == TokenKind::Ident {
            self.bump();
            self.bump_tagged(FieldName::Modifier);
        }
    }

    /// Can the token `n` ahead begin an operand?
    pub(crate) fn can_start_expression_at(&self, n: usize) -> bool {
        match self.peek_kind_at(n) {
            TokenKind::Ident => !super::is_statement_keyword(self.cursor.peek_text_at(n)),
            TokenKind::Int
            | TokenKind::Float
            | TokenKind::Quote
            | TokenKind::Directive
            | TokenKind::LParen
            | TokenKind::LBracket
            | TokenKind::Dot
            | TokenKind::DotDot
            | TokenKind::Dollar
            | TokenKind::Star
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Bang
            | TokenKind::Tilde
            | TokenKind::Amp
            | TokenKind::Shl
            | TokenKind::TripleDash => true,
            _ => false,
        }
    }
}
