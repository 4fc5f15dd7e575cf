//! `#`-directives.
//!
//! Directives are one token kind; what follows one depends on its name.
//! Statement-position directives (`#import`, `#load`, `#run`, `#assert`,
//! …) get their own nodes, a few prefix the statement after them, and the
//! rest become `compiler_directive` nodes. Expression-position directives
//! are listed in [`EXPRESSION_DIRECTIVES`].

use jai_diagnostic::ErrorCode;
use jai_ir::{FieldName, SyntaxKind, TokenKind};

use super::expr::Operand;
use crate::rules::Prec;
use crate::{PResult, Parser, SyntaxError};

/// Directives that start an expression.
const EXPRESSION_DIRECTIVES: &[&str] = &[
    "#char",
    "#string",
    "#run",
    "#insert",
    "#type",
    "#library",
    "#system_library",
    "#ifx",
    "#code",
    "#bake_arguments",
    "#bake_constants",
    "#procedure_of_call",
    "#caller_location",
    "#caller_code",
    "#location",
    "#file",
    "#line",
    "#filepath",
    "#procedure_name",
    "#this",
    "#compile_time",
    "#exists",
    "#is_constant",
];

/// Directives that may follow a procedure's parameter and result lists.
const PROCEDURE_DIRECTIVES: &[&str] = &[
    "#expand",
    "#c_call",
    "#foreign",
    "#compiler",
    "#must",
    "#elsewhere",
    "#modify",
    "#no_context",
    "#intrinsic",
    "#runtime_support",
    "#symmetric",
    "#no_debug",
    "#cpp_method",
    "#cpp_return_type_is_non_pod",
    "#no_aoc",
    "#dump",
    "#type_info_none",
    "#type_info_procedures_are_void_pointers",
];

/// Directives that mark the declaration or statement right after them.
const PREFIX_DIRECTIVES: &[&str] = &["#as", "#no_reset", "#place", "#placeholder"];

/// Directives that take a library name and an optional symbol name.
const LINKAGE_DIRECTIVES: &[&str] = &["#foreign", "#elsewhere", "#intrinsic", "#runtime_support"];

pub(crate) fn is_expression_directive(name: &str) -> bool {
    EXPRESSION_DIRECTIVES.contains(&name)
}

pub(crate) fn is_procedure_directive(name: &str) -> bool {
    PROCEDURE_DIRECTIVES.contains(&name)
}

impl Parser<'_> {
    pub(super) fn parse_directive_statement(&mut self) -> PResult {
        let name = self.current_text();
        match name {
            "#import" => {
                self.start(SyntaxKind::Import);
                self.parse_import_tail()?;
                self.finish();
                Ok(())
            }
            "#load" => {
                self.start(SyntaxKind::Load);
                self.bump();
                self.parse_string()?;
                self.tag(FieldName::Path);
                self.finish();
                Ok(())
            }
            "#run" => self.parse_compile_time_statement(SyntaxKind::RunStatement),
            "#insert" => self.parse_compile_time_statement(SyntaxKind::InsertStatement),
            "#assert" => {
                self.start(SyntaxKind::AssertDirective);
                self.bump();
                self.parse_expr()?;
                self.tag(FieldName::Condition);
                if self.eat(TokenKind::Comma) {
                    self.parse_expr()?;
                    self.tag(FieldName::Message);
                }
                self.finish();
                Ok(())
            }
            "#add_context" => {
                self.start(SyntaxKind::AddContextDirective);
                self.bump();
                self.parse_substatement(None)?;
                self.finish();
                Ok(())
            }
            "#module_parameters" => {
                self.start(SyntaxKind::ModuleParametersDirective);
                self.bump();
                self.parse_parameter_group()?;
                if self.check(TokenKind::LParen) {
                    self.parse_parameter_group()?;
                }
                self.finish();
                Ok(())
            }
            "#through" => {
                self.start(SyntaxKind::ThroughStatement);
                self.bump();
                self.finish();
                Ok(())
            }
            "#asm" => self.parse_asm(),
            "#if" => self.parse_if(),
            _ if PREFIX_DIRECTIVES.contains(&name) => {
                self.start(SyntaxKind::CompilerDirective);
                self.bump();
                self.parse_substatement(None)?;
                self.finish();
                Ok(())
            }
            _ if is_expression_directive(name) => self.parse_expression_statement(),
            _ => {
                self.start(SyntaxKind::CompilerDirective);
                self.bump();
                if self.check(TokenKind::LParen) {
                    self.parse_call_arguments()?;
                }
                self.finish();
                Ok(())
            }
        }
    }

    /// `#run` or `#insert` as a statement: either `-> results { … }` or
    /// the statement they apply to.
    fn parse_compile_time_statement(&mut self, kind: SyntaxKind) -> PResult {
        self.start(kind);
        self.bump();
        self.parse_directive_options()?;
        if self.eat(TokenKind::Arrow) {
            self.parse_results()?;
            self.parse_block()?;
            self.tag(FieldName::Body);
        } else {
            self.parse_substatement(None)?;
        }
        self.finish();
        Ok(())
    }

    /// `# name`, with a space between.
    pub(super) fn parse_hash_directive(&mut self) -> PResult {
        self.start(SyntaxKind::CompilerDirective);
        self.bump();
        self.expect_name(FieldName::Name)?;
        self.finish();
        Ok(())
    }

    /// `,file`, `,stallable`, `,scope(…)` right after a directive.
    pub(super) fn parse_directive_options(&mut self) -> PResult {
        while self.check(TokenKind::Comma) && self.peek_kind_at(1) == TokenKind::Ident {
            self.bump();
            self.bump_tagged(FieldName::Modifier);
            if self.check(TokenKind::LParen) {
                self.parse_call_arguments()?;
            }
        }
        Ok(())
    }

    /// Directives accepted by `accept` ahead of a body, each recorded as a
    /// modifier. Returns how many there were.
    pub(super) fn parse_trailing_directives(
        &mut self,
        accept: fn(&str) -> bool,
    ) -> Result<usize, SyntaxError> {
        let mut count = 0;
        while self.check(TokenKind::Directive) && accept(self.current_text()) {
            self.parse_directive_modifier()?;
            self.tag(FieldName::Modifier);
            count += 1;
        }
        Ok(count)
    }

    /// One directive attached to a procedure, struct, enum or declaration.
    pub(super) fn parse_directive_modifier(&mut self) -> PResult {
        let name = self.current_text();
        if name == "#modify" {
            self.start(SyntaxKind::ModifyDirective);
            self.bump();
            self.parse_block()?;
            self.tag(FieldName::Body);
            self.finish();
            return Ok(());
        }

        self.start(SyntaxKind::CompilerDirective);
        self.bump();
        if LINKAGE_DIRECTIVES.contains(&name) {
            if self.check(TokenKind::Ident) {
                self.ident_node();
                self.tag(FieldName::Argument);
            }
            if self.check(TokenKind::Quote) {
                self.parse_string()?;
                self.tag(FieldName::Name);
            }
        } else if name == "#align" {
            self.parse_expr_bp(Prec::UNARY)?;
            self.tag(FieldName::Argument);
        }
        self.finish();
        Ok(())
    }

    /// A directive in expression position.
    pub(super) fn parse_directive_expression(&mut self) -> Result<Operand, SyntaxError> {
        let name = self.current_text();
        match name {
            "#char" => {
                self.start(SyntaxKind::String);
                self.bump_tagged(FieldName::Modifier);
                self.parse_string_body()?;
                self.finish();
                Ok(Operand::Open)
            }
            "#string" => {
                self.parse_heredoc();
                Ok(Operand::Open)
            }
            "#run" => self.parse_compile_time_expression(SyntaxKind::RunExpression),
            "#insert" => self.parse_compile_time_expression(SyntaxKind::InsertExpression),
            "#type" => {
                self.start(SyntaxKind::TypeLiteral);
                self.bump();
                self.parse_directive_options()?;
                self.parse_type()?;
                self.tag(FieldName::Type);
                self.finish();
                Ok(Operand::Open)
            }
            "#library" | "#system_library" => {
                self.start(SyntaxKind::LibraryDirective);
                self.bump();
                self.parse_directive_options()?;
                self.parse_string()?;
                self.tag(FieldName::Path);
                self.finish();
                Ok(Operand::Open)
            }
            "#ifx" => self.parse_if_expression(),
            "#code" => {
                self.start(SyntaxKind::DirectiveExpression);
                self.bump();
                self.parse_directive_options()?;
                if self.check(TokenKind::LBrace) {
                    self.parse_block()?;
                    self.tag(FieldName::Body);
                } else {
                    self.parse_expr()?;
                    self.tag(FieldName::Argument);
                }
                self.finish();
                Ok(Operand::Closed)
            }
            "#bake_arguments" | "#bake_constants" | "#procedure_of_call" => {
                self.start(SyntaxKind::DirectiveExpression);
                self.bump();
                self.parse_expr_bp(Prec::UNARY)?;
                self.tag(FieldName::Argument);
                self.finish();
                Ok(Operand::Open)
            }
            _ if is_expression_directive(name) => {
                self.start(SyntaxKind::DirectiveExpression);
                self.bump();
                if self.check(TokenKind::LParen) {
                    self.parse_call_arguments()?;
                }
                self.finish();
                Ok(Operand::Open)
            }
            _ => Err(self.expected(ErrorCode::E1002, "expression")),
        }
    }

    /// `#run`/`#insert` as an expression: `-> results { … }`, a block, or
    /// an operand.
    fn parse_compile_time_expression(&mut self, kind: SyntaxKind) -> Result<Operand, SyntaxError> {
        self.start(kind);
        self.bump();
        self.parse_directive_options()?;
        let operand = if self.eat(TokenKind::Arrow) {
            self.parse_results()?;
            self.parse_block()?;
            self.tag(FieldName::Body);
            Operand::Closed
        } else if self.check(TokenKind::LBrace) {
            self.parse_block()?;
            self.tag(FieldName::Body);
            Operand::Closed
        } else {
            self.parse_expr_bp(Prec::UNARY)?;
            self.tag(FieldName::Value);
            Operand::Open
        };
        self.finish();
        Ok(operand)
    }

    /// `#string DELIM … DELIM`. A missing delimiter or end marker was
    /// already reported by the lexer.
    fn parse_heredoc(&mut self) {
        self.start(SyntaxKind::HeredocString);
        self.bump();
        if self.eat(TokenKind::HeredocStart) {
            self.eat(TokenKind::HeredocBody);
            if !self.eat(TokenKind::HeredocEnd) {
                // Unterminated body.
                self.eat(TokenKind::Error);
            }
        }
        self.finish();
    }

    /// A string literal node.
    pub(crate) fn parse_string(&mut self) -> PResult {
        if self.check_directive("#char") {
            self.parse_directive_expression()?;
            return Ok(());
        }
        self.start(SyntaxKind::String);
        self.parse_string_body()?;
        self.finish();
        Ok(())
    }

    /// `"` content and escapes `"`.
    fn parse_string_body(&mut self) -> PResult {
        if !self.check(TokenKind::Quote) {
            return Err(self.expected(ErrorCode::E1001, "string literal"));
        }
        self.bump();
        while matches!(
            self.current_kind(),
            TokenKind::StringContent | TokenKind::EscapeSequence
        ) {
            self.bump();
        }
        self.expect(TokenKind::Quote)
    }
}
