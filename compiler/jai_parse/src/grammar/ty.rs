//! Types, parameter lists and procedure literals.
//!
//! Types are parsed under [`ParseContext::IN_TYPE`]. In that context a
//! parenthesized parameter list is always a procedure type, `*` builds a
//! pointer type and `A.B` a qualified type. Expressions that turn out to
//! name a type (the prefix of `.{` or `.[`) are rewritten by
//! [`reinterpret_as_type`].

use jai_diagnostic::ErrorCode;
use jai_ir::{Child, FieldName, SyntaxElement, SyntaxKind, SyntaxNode, TokenKind};
use jai_stack::ensure_sufficient_stack;

use super::directive::is_procedure_directive;
use super::expr::Operand;
use crate::{PResult, ParseContext, Parser, SyntaxError};

/// Names that always denote a builtin type.
const BUILTIN_TYPES: &[&str] = &[
    "bool", "string", "int", "float", "float32", "float64", "s8", "s16", "s32", "s64", "u8",
    "u16", "u32", "u64", "void", "Type", "Any",
];

pub(super) fn is_builtin_type(name: &str) -> bool {
    BUILTIN_TYPES.contains(&name)
}

impl Parser<'_> {
    pub(crate) fn parse_type(&mut self) -> PResult {
        self.with_context(ParseContext::IN_TYPE, |p| {
            ensure_sufficient_stack(|| p.parse_type_inner())
        })
    }

    fn parse_type_inner(&mut self) -> PResult {
        match self.current_kind() {
            TokenKind::Ident => self.parse_named_type(),
            TokenKind::Star => {
                self.start(SyntaxKind::PointerType);
                self.bump();
                self.parse_type()?;
                self.finish();
                Ok(())
            }
            TokenKind::LBracket => self.parse_array_type(),
            TokenKind::LParen => {
                self.parse_procedure()?;
                Ok(())
            }
            TokenKind::Dollar => self.parse_polymorphic_type(),
            TokenKind::DotDot => {
                self.start(SyntaxKind::VariadicType);
                self.bump();
                self.parse_type()?;
                self.finish();
                Ok(())
            }
            TokenKind::Directive => {
                self.parse_directive_expression()?;
                Ok(())
            }
            _ => Err(self.expected(ErrorCode::E1005, "type")),
        }
    }

    /// Builtin, anonymous struct or enum, `type_of(…)`, or a name with
    /// optional module qualification and type arguments.
    fn parse_named_type(&mut self) -> PResult {
        let text = self.current_text();
        match text {
            "struct" | "union" => return self.parse_anonymous_struct(),
            "enum" | "enum_flags" => return self.parse_anonymous_enum(),
            "type_of" if self.peek_kind_at(1) == TokenKind::LParen => {
                return self.parse_type_of();
            }
            _ if is_builtin_type(text) => {
                self.start(SyntaxKind::BuiltinType);
                self.bump();
                self.finish();
                return Ok(());
            }
            _ => {}
        }

        let checkpoint = self.checkpoint();
        self.ident_node();
        while self.check(TokenKind::Dot) && self.peek_kind_at(1) == TokenKind::Ident {
            self.tag(FieldName::Object);
            self.start_at(checkpoint, SyntaxKind::QualifiedType);
            self.bump();
            self.bump_tagged(FieldName::Member);
            self.finish();
        }
        if self.check(TokenKind::LParen) {
            self.tag(FieldName::Type);
            self.start_at(checkpoint, SyntaxKind::ParameterizedStructType);
            self.parse_argument_list(Self::parse_type_argument)?;
            self.finish();
        }
        Ok(())
    }

    /// A type argument: a type when the tokens can only be one, otherwise
    /// an expression (`N`, `4`, `Vector2`).
    fn parse_type_argument(&mut self) -> PResult {
        match self.current_kind() {
            TokenKind::Star | TokenKind::LBracket | TokenKind::Dollar | TokenKind::DotDot => {
                self.parse_type()
            }
            _ => self.parse_expr(),
        }
    }

    /// `[]T`, `[..]T`, `[N]T`. The element may be missing in value
    /// position.
    fn parse_array_type(&mut self) -> PResult {
        self.start(SyntaxKind::ArrayType);
        self.bump();
        if self.check(TokenKind::DotDot) {
            self.bump();
        } else if !self.check(TokenKind::RBracket) {
            self.in_fresh_context(Self::parse_expr)?;
            self.tag(FieldName::Size);
        }
        self.expect(TokenKind::RBracket)?;
        if self.can_start_type() {
            self.parse_type()?;
            self.tag(FieldName::Element);
        }
        self.finish();
        Ok(())
    }

    /// `$T`, `$$T`, `$T/Interface`.
    fn parse_polymorphic_type(&mut self) -> PResult {
        self.start(SyntaxKind::PolymorphicType);
        self.bump();
        self.eat(TokenKind::Dollar);
        self.expect_name(FieldName::Name)?;
        if self.eat(TokenKind::Slash) {
            self.parse_type()?;
            self.tag(FieldName::Type);
        }
        self.finish();
        Ok(())
    }

    fn can_start_type(&self) -> bool {
        match self.current_kind() {
            TokenKind::Ident => !super::is_statement_keyword(self.current_text()),
            TokenKind::Star
            | TokenKind::LBracket
            | TokenKind::LParen
            | TokenKind::Dollar
            | TokenKind::DotDot
            | TokenKind::Directive => true,
            _ => false,
        }
    }

    pub(super) fn parse_anonymous_struct(&mut self) -> PResult {
        self.start(SyntaxKind::AnonymousStructType);
        self.bump_keyword();
        self.parse_struct_tail()?;
        self.finish();
        Ok(())
    }

    pub(super) fn parse_anonymous_enum(&mut self) -> PResult {
        self.start(SyntaxKind::AnonymousEnumType);
        self.bump_keyword();
        self.parse_enum_tail()?;
        self.finish();
        Ok(())
    }

    /// `type_of(expr)`
    pub(super) fn parse_type_of(&mut self) -> PResult {
        self.start(SyntaxKind::TypeOfExpression);
        self.bump_keyword();
        self.expect(TokenKind::LParen)?;
        self.in_fresh_context(Self::parse_expr)?;
        self.tag(FieldName::Argument);
        self.expect(TokenKind::RParen)?;
        self.finish();
        Ok(())
    }

    /// `( parameters )`, each parameter recorded under `parameters`.
    pub(super) fn parse_parameter_group(&mut self) -> PResult {
        self.expect(TokenKind::LParen)?;
        self.in_fresh_context(|p| {
            p.with_context(ParseContext::IN_ARGUMENTS, Self::parse_parameters)
        })?;
        self.expect(TokenKind::RParen)
    }

    fn parse_parameters(&mut self) -> PResult {
        while !self.check(TokenKind::RParen) && !self.is_at_end() {
            if self.at_parameter() {
                self.parse_parameter()?;
            } else {
                self.parse_type()?;
            }
            self.tag(FieldName::Parameters);
            if !self.check(TokenKind::RParen) {
                self.expect(TokenKind::Comma)?;
            }
        }
        Ok(())
    }

    /// `using? $? name :` at the current token.
    pub(super) fn at_parameter(&self) -> bool {
        let mut offset = 0;
        if self.cursor.word_at(0, "using") {
            offset += 1;
        }
        while offset < 3 && self.peek_kind_at(offset) == TokenKind::Dollar {
            offset += 1;
        }
        self.peek_kind_at(offset) == TokenKind::Ident
            && self.peek_kind_at(offset + 1) == TokenKind::Colon
    }

    /// `using? $?name : T? (= default)?`
    pub(super) fn parse_parameter(&mut self) -> PResult {
        self.start(SyntaxKind::Parameter);
        if self.check_word("using") {
            self.bump_keyword();
            self.tag(FieldName::Keyword);
        }
        while self.check(TokenKind::Dollar) {
            self.bump_tagged(FieldName::Modifier);
        }
        self.bump_tagged(FieldName::Name);
        self.expect(TokenKind::Colon)?;
        if !self.check(TokenKind::Eq) {
            self.parse_type()?;
            self.tag(FieldName::Type);
        }
        if self.eat(TokenKind::Eq) {
            self.parse_expr()?;
            self.tag(FieldName::DefaultValue);
        }
        self.finish();
        Ok(())
    }

    /// Results after `->`: `(a: int, b: bool)`, or types and named
    /// returns separated by commas. Inside an argument list a comma ends
    /// the results.
    pub(super) fn parse_results(&mut self) -> PResult {
        if self.check(TokenKind::LParen)
            && self.peek_kind_at(1) == TokenKind::Ident
            && self.peek_kind_at(2) == TokenKind::Colon
        {
            self.bump();
            self.in_fresh_context(|p| {
                p.with_context(ParseContext::IN_ARGUMENTS, |p| -> PResult {
                    while !p.check(TokenKind::RParen) && !p.is_at_end() {
                        p.parse_result()?;
                        if !p.check(TokenKind::RParen) {
                            p.expect(TokenKind::Comma)?;
                        }
                    }
                    Ok(())
                })
            })?;
            return self.expect(TokenKind::RParen);
        }

        self.parse_result()?;
        while !self.context.in_arguments() && self.check(TokenKind::Comma) {
            self.bump();
            self.parse_result()?;
        }
        Ok(())
    }

    /// A result type, or `name : T (= default)?`.
    fn parse_result(&mut self) -> PResult {
        if self.check(TokenKind::Ident) && self.peek_kind_at(1) == TokenKind::Colon {
            self.start(SyntaxKind::NamedReturn);
            self.bump_tagged(FieldName::Name);
            self.bump();
            self.parse_type()?;
            self.tag(FieldName::Type);
            if self.eat(TokenKind::Eq) {
                self.parse_expr()?;
                self.tag(FieldName::DefaultValue);
            }
            self.finish();
        } else {
            self.parse_type()?;
        }
        self.tag(FieldName::Result);
        Ok(())
    }

    /// `(params) (-> results)? directives* body?`
    ///
    /// A procedure when it has a body or trailing directives and does not
    /// sit in a type position; a procedure type otherwise.
    pub(super) fn parse_procedure(&mut self) -> Result<Operand, SyntaxError> {
        let in_type = self.context.in_type();
        let checkpoint = self.checkpoint();
        self.parse_parameter_group()?;
        if self.eat(TokenKind::Arrow) {
            self.parse_results()?;
        }
        let directives = self.parse_trailing_directives(is_procedure_directive)?;
        let has_body = !in_type && self.check(TokenKind::LBrace);
        if has_body {
            self.parse_block()?;
            self.tag(FieldName::Body);
        }
        let kind = if !in_type && (has_body || directives > 0) {
            SyntaxKind::Procedure
        } else {
            SyntaxKind::ProcedureType
        };
        self.start_at(checkpoint, kind);
        self.finish();
        Ok(if has_body {
            Operand::Closed
        } else {
            Operand::Open
        })
    }
}

/// Rewrite an expression that names a type into the type reading of the
/// same tokens: calls become type instantiations, member accesses
/// qualified names, address-of a pointer type.
pub(super) fn reinterpret_as_type(node: SyntaxNode) -> SyntaxNode {
    match node.kind() {
        SyntaxKind::CallExpression => {
            rebuild(node, SyntaxKind::ParameterizedStructType, |field| {
                (field == Some(FieldName::Function)).then_some(Some(FieldName::Type))
            })
        }
        SyntaxKind::MemberExpression => {
            rebuild(node, SyntaxKind::QualifiedType, |field| {
                (field == Some(FieldName::Object)).then_some(field)
            })
        }
        SyntaxKind::Address => rebuild(node, SyntaxKind::PointerType, Some),
        _ => node,
    }
}

/// Rebuild `node` as `kind`. Child nodes for which `select` returns a new
/// field are reinterpreted as types and recorded under that field.
fn rebuild(
    node: SyntaxNode,
    kind: SyntaxKind,
    select: impl Fn(Option<FieldName>) -> Option<Option<FieldName>>,
) -> SyntaxNode {
    let at = node.span().start;
    let children = node
        .into_children()
        .into_iter()
        .map(|child| match child.element {
            SyntaxElement::Node(inner) => match select(child.field) {
                Some(field) => Child {
                    field,
                    element: SyntaxElement::Node(reinterpret_as_type(inner)),
                },
                None => Child {
                    field: child.field,
                    element: SyntaxElement::Node(inner),
                },
            },
            element => Child {
                field: child.field,
                element,
            },
        })
        .collect();
    SyntaxNode::new(kind, children, at)
}
