//! Grammar productions.
//!
//! This module extends Parser with methods for every layer of the
//! grammar. The entry point is [`Parser::parse_source_file`].
//!
//! # Module Structure
//!
//! - `mod.rs`: Statement lists, statement dispatch, terminators
//! - `decl.rs`: Constant, variable, procedure, struct and enum declarations
//! - `stmt.rs`: Control flow and blocks
//! - `directive.rs`: `#`-directives in statement and expression position
//! - `asm.rs`: Inline assembly
//! - `ty.rs`: Types and parameter lists
//! - `expr/`: Precedence climbing over expressions

mod asm;
mod decl;
mod directive;
mod expr;
mod stmt;
mod ty;

use jai_diagnostic::ErrorCode;
use jai_ir::{FieldName, Span, SyntaxKind, TokenKind};
use jai_stack::ensure_sufficient_stack;
use tracing::debug;

use crate::rules::{self, Resolution, Terminator};
use crate::{ErrorContext, PResult, Parser, SyntaxError};

/// Longest `a, b, c :` name list looked at when deciding whether a
/// statement is a declaration.
const MAX_DECLARED_NAMES: usize = 32;

/// Identifiers that start a statement and never an expression.
const STATEMENT_KEYWORDS: &[&str] = &[
    "if",
    "while",
    "for",
    "return",
    "break",
    "continue",
    "defer",
    "using",
    "remove",
    "push_context",
    "case",
    "else",
    "then",
];

fn is_statement_keyword(text: &str) -> bool {
    STATEMENT_KEYWORDS.contains(&text)
}

impl Parser<'_> {
    pub(crate) fn parse_source_file(&mut self) {
        while !self.is_at_end() {
            self.parse_statement_recovering();
        }
    }

    /// Statements up to the closing `}` (not consumed) or end of input.
    pub(crate) fn parse_statement_list(&mut self) {
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            self.parse_statement_recovering();
        }
    }

    /// One statement with its terminator. A statement that fails to parse
    /// becomes an `ERROR` node.
    pub(crate) fn parse_statement_recovering(&mut self) {
        if self.eat(TokenKind::Semicolon) {
            return;
        }
        let checkpoint = self.checkpoint();
        let depth = self.builder.depth();
        let start = self.cursor.position();
        if let Err(error) = self.parse_substatement(None) {
            self.recover(checkpoint, depth, start, error);
        }
    }

    /// A statement nested in another construct (a branch, a loop body, the
    /// operand of `#run`), recorded under `field`. A lone `;` is an empty
    /// statement.
    pub(crate) fn parse_substatement(&mut self, field: Option<FieldName>) -> PResult {
        if self.eat(TokenKind::Semicolon) {
            return Ok(());
        }
        let kind = self.parse_statement()?;
        if let Some(field) = field {
            self.tag(field);
        }
        self.expect_terminator(kind);
        Ok(())
    }

    /// Parse one statement without its terminator and return the kind of
    /// the node it produced.
    fn parse_statement(&mut self) -> Result<Option<SyntaxKind>, SyntaxError> {
        ensure_sufficient_stack(|| -> Result<Option<SyntaxKind>, SyntaxError> {
            self.parse_statement_inner()?;
            Ok(self.builder.last_node_kind())
        })
    }

    fn parse_statement_inner(&mut self) -> PResult {
        match self.current_kind() {
            TokenKind::LBrace => self.parse_block(),
            TokenKind::Directive => self.parse_directive_statement(),
            TokenKind::Hash => self.parse_hash_directive(),
            TokenKind::Ident if self.at_declaration() => self.parse_declaration(),
            TokenKind::Ident => match self.current_text() {
                "if" => self.parse_if(),
                "while" => self.parse_while(),
                "for" => self.parse_for(),
                "return" => self.parse_return(),
                "break" => self.parse_jump(SyntaxKind::BreakStatement),
                "continue" => self.parse_jump(SyntaxKind::ContinueStatement),
                "defer" => self.parse_defer(),
                "using" => self.parse_using(),
                "remove" => self.parse_remove(),
                "push_context" => self.parse_push_context(),
                "operator" if self.at_operator_declaration() => {
                    self.parse_operator_declaration()
                }
                _ => self.parse_expression_statement(),
            },
            _ => self.parse_expression_statement(),
        }
    }

    /// `name :`, `name ::` or `a, b, c :` at the current token.
    fn at_declaration(&self) -> bool {
        let mut offset = 0;
        for _ in 0..MAX_DECLARED_NAMES {
            if self.peek_kind_at(offset) != TokenKind::Ident {
                return false;
            }
            match self.peek_kind_at(offset + 1) {
                TokenKind::Colon | TokenKind::ColonColon => return true,
                TokenKind::Comma => offset += 2,
                _ => return false,
            }
        }
        false
    }

    /// Require `;` after statements of the semicolon class. A missing one
    /// is reported at the end of the statement and parsing goes on.
    fn expect_terminator(&mut self, kind: Option<SyntaxKind>) {
        let Some(kind) = kind else {
            return;
        };
        if rules::terminator_for(kind) == Terminator::SelfTerminated
            || self.eat(TokenKind::Semicolon)
        {
            return;
        }
        // The lexer already reported the unterminated literal.
        if self.cursor.previous_kind() == TokenKind::Error {
            return;
        }
        let error = SyntaxError::new(
            ErrorCode::E1008,
            format!("expected `;`, found {}", self.found()),
            Span::point(self.cursor.previous_span().end),
        )
        .with_context(ErrorContext::new(kind));
        self.error(error);
    }

    /// Expression statement, assignment `a, b = x, y` or update `a += x`.
    fn parse_expression_statement(&mut self) -> PResult {
        let checkpoint = self.checkpoint();
        self.parse_expr()?;
        let continues = |p: &Self| {
            p.check(TokenKind::Comma) || p.check(TokenKind::Eq) || p.current_kind().is_compound_assign()
        };
        if !continues(self) {
            return Ok(());
        }

        self.tag(FieldName::Left);
        while self.eat(TokenKind::Comma) {
            if self.check(TokenKind::Eq) {
                break;
            }
            self.parse_expr()?;
            self.tag(FieldName::Left);
        }

        let kind = if self.check(TokenKind::Eq) {
            SyntaxKind::AssignmentStatement
        } else if self.current_kind().is_compound_assign() {
            SyntaxKind::UpdateStatement
        } else {
            return Err(self.expected(ErrorCode::E1001, "`=`"));
        };
        self.start_at(checkpoint, kind);
        self.bump_tagged(FieldName::Operator);
        self.parse_expr()?;
        self.tag(FieldName::Right);
        while self.eat(TokenKind::Comma) {
            self.parse_expr()?;
            self.tag(FieldName::Right);
        }
        self.finish();
        Ok(())
    }

    /// An identifier node for the current token.
    fn ident_node(&mut self) {
        self.start(SyntaxKind::Identifier);
        self.bump();
        self.finish();
    }

    /// Settle a declared conflict between rules that matched the same text.
    ///
    /// Candidates the conflict table cannot order are reported as `E2001`
    /// and settled on the rule with the highest dynamic precedence, so the
    /// tree stays deterministic.
    pub(crate) fn decide(&mut self, candidates: &[SyntaxKind]) -> SyntaxKind {
        let first = candidates.first().copied().unwrap_or(SyntaxKind::Error);
        let names: Vec<&str> = candidates.iter().map(|kind| kind.name()).collect();
        match rules::resolve(&names) {
            Resolution::Chosen(rule) => {
                let chosen = SyntaxKind::from_name(rule.name).unwrap_or(first);
                debug!(candidates = ?names, chosen = rule.name, "conflict resolved");
                chosen
            }
            Resolution::Unresolved { fallback } => {
                let chosen = fallback
                    .and_then(|rule| SyntaxKind::from_name(rule.name))
                    .unwrap_or(first);
                let error = SyntaxError::new(
                    ErrorCode::E2001,
                    format!(
                        "ambiguous syntax: {} all match here; using {chosen}",
                        names.join(", ")
                    ),
                    self.current_span(),
                );
                self.error(error);
                chosen
            }
        }
    }
}
