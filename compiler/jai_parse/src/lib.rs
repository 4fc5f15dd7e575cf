//! Parser for Jai.
//!
//! Recursive descent for declarations and statements, precedence climbing
//! for expressions, all writing into a lossless concrete syntax tree. Every
//! token the lexer produced, trivia included, ends up as a leaf, and a parse
//! always yields a tree: spans that match nothing become `ERROR` nodes and
//! the parser resynchronizes at the next statement boundary.
//!
//! Ambiguities are settled locally. Context flags ([`ParseContext`]) say
//! whether a type or an expression is expected, a bounded look at the
//! following tokens picks between look-alike constructs, and the declared
//! conflicts in [`rules`] break the remaining ties.

mod builder;
mod context;
mod cursor;
mod error;
mod grammar;
mod recovery;
pub mod rules;

pub use context::ParseContext;
pub use cursor::{Cursor, Extra, Extras};
pub use error::{ErrorContext, InputError, SyntaxError};
pub use recovery::TokenSet;

use jai_diagnostic::ErrorCode;
use jai_ir::{FieldName, Span, SyntaxKind, SyntaxNode, TokenKind, TokenList};
use tracing::{debug, debug_span};

use builder::{Checkpoint, TreeBuilder};
use cursor::Extra as CursorExtra;

/// Result of a grammar function.
type PResult = Result<(), SyntaxError>;

/// Options for [`parse_with_options`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Report at most this many errors. Parsing still runs to the end of
    /// the input; a final `E1010` marks the cut.
    pub max_errors: Option<usize>,
    /// Also stop skipping after an error at the next top-level
    /// declaration (`name ::`, `#import`, `#load`, `#run`), not only at
    /// `;` and `}`.
    pub resync_on_declaration: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_errors: None,
            resync_on_declaration: true,
        }
    }
}

/// A parsed source file: the tree and every error found on the way.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Parse {
    tree: SyntaxNode,
    errors: Vec<SyntaxError>,
}

impl Parse {
    /// Root `source_file` node.
    pub fn tree(&self) -> &SyntaxNode {
        &self.tree
    }

    /// Lexical and syntax errors, ordered by position.
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_parts(self) -> (SyntaxNode, Vec<SyntaxError>) {
        (self.tree, self.errors)
    }
}

/// Parse source text with default options.
pub fn parse(source: &str) -> Parse {
    parse_with_options(source, &ParseOptions::default())
}

pub fn parse_with_options(source: &str, options: &ParseOptions) -> Parse {
    let _span = debug_span!("parse", bytes = source.len()).entered();

    let lexed = jai_lexer::lex(source);
    let mut parser = Parser::new(source, &lexed.tokens, options);
    parser.parse_source_file();
    let (tree, syntax_errors) = parser.into_parts();

    let mut errors: Vec<SyntaxError> = lexed.errors.iter().map(SyntaxError::from).collect();
    errors.extend(syntax_errors);
    errors.sort_by_key(|error| error.span.start);
    if let Some(max) = options.max_errors {
        if errors.len() > max {
            errors.truncate(max);
            let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
            errors.push(SyntaxError::new(
                ErrorCode::E1010,
                format!("too many errors; stopped reporting after {max}"),
                Span::point(end),
            ));
        }
    }

    debug!(errors = errors.len(), "parsed");
    Parse { tree, errors }
}

/// Parse raw bytes, rejecting input that is not UTF-8 or too large for
/// 32-bit spans.
pub fn try_parse(bytes: &[u8]) -> Result<Parse, InputError> {
    try_parse_with_options(bytes, &ParseOptions::default())
}

pub fn try_parse_with_options(bytes: &[u8], options: &ParseOptions) -> Result<Parse, InputError> {
    let source = check_input(bytes)?;
    Ok(parse_with_options(source, options))
}

/// Source text for `bytes`, if it is UTF-8 and fits 32-bit spans.
pub fn check_input(bytes: &[u8]) -> Result<&str, InputError> {
    if Span::try_from_range(0..bytes.len()).is_err() {
        return Err(InputError::TooLarge { len: bytes.len() });
    }
    std::str::from_utf8(bytes).map_err(|error| InputError::InvalidUtf8 {
        valid_up_to: error.valid_up_to(),
    })
}

/// Parser state.
pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
    builder: TreeBuilder,
    errors: Vec<SyntaxError>,
    context: ParseContext,
    options: &'a ParseOptions,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, tokens: &'a TokenList, options: &'a ParseOptions) -> Self {
        Parser {
            cursor: Cursor::new(source, tokens),
            builder: TreeBuilder::new(SyntaxKind::SourceFile),
            errors: Vec::new(),
            context: ParseContext::NONE,
            options,
        }
    }

    fn into_parts(mut self) -> (SyntaxNode, Vec<SyntaxError>) {
        self.flush_extras();
        (self.builder.finish_root(), self.errors)
    }

    // Cursor delegation methods.

    #[inline]
    fn current_kind(&self) -> TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    fn current_text(&self) -> &'a str {
        self.cursor.current_text()
    }

    #[inline]
    fn peek_kind_at(&self, n: usize) -> TokenKind {
        self.cursor.peek_kind_at(n)
    }

    #[inline]
    fn check(&self, kind: TokenKind) -> bool {
        self.cursor.check(kind)
    }

    /// Is the current token the identifier `word`?
    #[inline]
    fn check_word(&self, word: &str) -> bool {
        self.cursor.word_at(0, word)
    }

    #[inline]
    fn check_directive(&self, name: &str) -> bool {
        self.cursor.check_directive(name)
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    // Tree building.

    /// Move pending extras into the innermost open node.
    fn flush_extras(&mut self) {
        for extra in self.cursor.take_extras() {
            match extra {
                CursorExtra::Token(token) => self.builder.token(token),
                CursorExtra::Deprecated(group) => {
                    self.builder.node(builder::deprecated_directive(group));
                }
            }
        }
    }

    /// Consume the current token into the innermost open node.
    fn bump(&mut self) {
        self.flush_extras();
        if self.is_at_end() {
            return;
        }
        let token = self.cursor.advance();
        self.builder.token(token);
    }

    /// Consume the current token, recording it as `kind`. Keywords are
    /// lexed as identifiers and re-tagged here.
    fn bump_as(&mut self, kind: TokenKind) {
        self.flush_extras();
        if self.is_at_end() {
            return;
        }
        let mut token = self.cursor.advance();
        token.kind = kind;
        self.builder.token(token);
    }

    fn bump_keyword(&mut self) {
        self.bump_as(TokenKind::Keyword);
    }

    fn bump_tagged(&mut self, field: FieldName) {
        self.bump();
        self.tag(field);
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn eat_word(&mut self, word: &str) -> bool {
        if self.check_word(word) {
            self.bump_keyword();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> PResult {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.expected(
                ErrorCode::E1001,
                &TokenSet::new().with(kind).format_expected(),
            ))
        }
    }

    /// Consume the `}` closing a body opened at `open`. A missing brace is
    /// reported but does not abort the enclosing construct.
    fn expect_closing_brace(&mut self, open: Span) {
        if self.eat(TokenKind::RBrace) {
            return;
        }
        let error = SyntaxError::new(
            ErrorCode::E1003,
            format!("unclosed `{{`, found {}", self.found()),
            open,
        )
        .with_related(self.current_span(), "block ends here");
        self.error(error);
    }

    /// A bare identifier in name position, recorded under `field`.
    fn expect_name(&mut self, field: FieldName) -> PResult {
        if self.check(TokenKind::Ident) {
            self.bump_tagged(field);
            Ok(())
        } else {
            Err(self.expected(ErrorCode::E1004, "identifier"))
        }
    }

    fn start(&mut self, kind: SyntaxKind) {
        self.flush_extras();
        let at = self.current_span().start;
        self.builder.start(kind, at);
    }

    fn finish(&mut self) {
        self.builder.finish();
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.flush_extras();
        let at = self.current_span().start;
        self.builder.checkpoint(at)
    }

    fn start_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_at(checkpoint, kind);
    }

    fn tag(&mut self, field: FieldName) {
        self.builder.tag_last(field);
    }

    // Errors.

    fn error(&mut self, error: SyntaxError) {
        debug!(code = %error.code, span = %error.span, message = %error.message, "syntax error");
        self.errors.push(error);
    }

    /// "expected {what}, found {current}" at the current token.
    fn expected(&self, code: ErrorCode, what: &str) -> SyntaxError {
        SyntaxError::new(
            code,
            format!("expected {what}, found {}", self.found()),
            self.current_span(),
        )
    }

    /// Description of the current token for error messages.
    fn found(&self) -> String {
        let kind = self.current_kind();
        match kind {
            TokenKind::Eof
            | TokenKind::Error
            | TokenKind::StringContent
            | TokenKind::HeredocBody => kind.display_name().to_string(),
            _ => format!("`{}`", self.current_text()),
        }
    }

    // Context.

    fn with_context<T>(&mut self, flag: ParseContext, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.context;
        self.context = saved.with(flag);
        let result = f(self);
        self.context = saved;
        result
    }

    fn without_context<T>(&mut self, flag: ParseContext, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.context;
        self.context = saved.without(flag);
        let result = f(self);
        self.context = saved;
        result
    }

    /// Run `f` with every context flag cleared, as at the start of a
    /// statement.
    fn in_fresh_context<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = std::mem::replace(&mut self.context, ParseContext::NONE);
        let result = f(self);
        self.context = saved;
        result
    }
}

#[cfg(test)]
mod tests;
