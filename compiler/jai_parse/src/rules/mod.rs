//! Grammar rules as data.
//!
//! Precedence levels, the binary operator table, per-rule metadata and the
//! declared conflicts between rules. The parser consults this table at the
//! few places where two rules can match the same text; everything else is
//! decided by position or by the follow token before a rule is chosen.

use std::sync::LazyLock;

use jai_ir::{SyntaxKind, SyntaxKind as K, TokenKind};
use rustc_hash::FxHashMap;

/// Binding power of a rule or operator. Higher binds tighter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Prec(pub i8);

impl Prec {
    pub const PARENTHESES: Prec = Prec(-1);
    pub const NONE: Prec = Prec(0);
    pub const ASSIGNMENT: Prec = Prec(1);
    pub const RANGE: Prec = Prec(2);
    pub const LOGICAL_OR: Prec = Prec(4);
    pub const LOGICAL_AND: Prec = Prec(5);
    pub const BITWISE_OR: Prec = Prec(6);
    pub const BITWISE_XOR: Prec = Prec(7);
    pub const BITWISE_AND: Prec = Prec(8);
    pub const EQUALITY: Prec = Prec(10);
    pub const COMPARE: Prec = Prec(11);
    pub const SHIFT: Prec = Prec(12);
    pub const ADD: Prec = Prec(13);
    pub const MULTIPLY: Prec = Prec(14);
    pub const CAST: Prec = Prec(15);
    pub const UNARY: Prec = Prec(17);
    pub const CALL: Prec = Prec(18);
    pub const MEMBER: Prec = Prec(19);

    /// The next level up: minimum power for the right operand of a
    /// left-associative operator.
    #[must_use]
    pub const fn tighter(self) -> Prec {
        Prec(self.0 + 1)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Assoc {
    Left,
    Right,
    None,
}

/// Where a statement ends.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Terminator {
    /// Needs a `;`.
    Semicolon,
    /// Ends with its own `}` or nested statement.
    SelfTerminated,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BinaryOperator {
    pub token: TokenKind,
    pub prec: Prec,
    pub assoc: Assoc,
}

const fn left(token: TokenKind, prec: Prec) -> BinaryOperator {
    BinaryOperator {
        token,
        prec,
        assoc: Assoc::Left,
    }
}

/// Every binary operator. `^` and `~` are both exclusive or.
pub const BINARY_OPERATORS: &[BinaryOperator] = &[
    left(TokenKind::OrOr, Prec::LOGICAL_OR),
    left(TokenKind::AndAnd, Prec::LOGICAL_AND),
    left(TokenKind::Pipe, Prec::BITWISE_OR),
    left(TokenKind::Caret, Prec::BITWISE_XOR),
    left(TokenKind::Tilde, Prec::BITWISE_XOR),
    left(TokenKind::Amp, Prec::BITWISE_AND),
    left(TokenKind::AmpTilde, Prec::BITWISE_AND),
    left(TokenKind::EqEq, Prec::EQUALITY),
    left(TokenKind::NotEq, Prec::EQUALITY),
    left(TokenKind::Lt, Prec::COMPARE),
    left(TokenKind::Gt, Prec::COMPARE),
    left(TokenKind::LtEq, Prec::COMPARE),
    left(TokenKind::GtEq, Prec::COMPARE),
    left(TokenKind::Shl, Prec::SHIFT),
    left(TokenKind::Shr, Prec::SHIFT),
    left(TokenKind::RotL, Prec::SHIFT),
    left(TokenKind::RotR, Prec::SHIFT),
    left(TokenKind::Plus, Prec::ADD),
    left(TokenKind::Minus, Prec::ADD),
    left(TokenKind::Star, Prec::MULTIPLY),
    left(TokenKind::Slash, Prec::MULTIPLY),
    left(TokenKind::Percent, Prec::MULTIPLY),
];

/// Look up the binary operator spelled by `kind`.
pub fn binary_operator(kind: TokenKind) -> Option<&'static BinaryOperator> {
    BINARY_OPERATORS.iter().find(|op| op.token == kind)
}

/// Metadata of one grammar rule.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rule {
    pub name: &'static str,
    pub prec: Prec,
    pub assoc: Assoc,
    /// Tie-breaker between rules that match the same text at equal
    /// static precedence.
    pub dynamic: i8,
    pub terminator: Terminator,
}

impl Rule {
    const fn new(name: &'static str) -> Rule {
        Rule {
            name,
            prec: Prec::NONE,
            assoc: Assoc::None,
            dynamic: 0,
            terminator: Terminator::Semicolon,
        }
    }

    const fn of(kind: SyntaxKind) -> Rule {
        Rule::new(kind.name())
    }

    const fn prec(mut self, prec: Prec, assoc: Assoc) -> Rule {
        self.prec = prec;
        self.assoc = assoc;
        self
    }

    const fn dynamic(mut self, dynamic: i8) -> Rule {
        self.dynamic = dynamic;
        self
    }

    const fn self_terminated(mut self) -> Rule {
        self.terminator = Terminator::SelfTerminated;
        self
    }
}

pub const RULES: &[Rule] = &[
    // Declarations
    Rule::of(K::ProcedureDeclaration).self_terminated(),
    Rule::of(K::StructDeclaration).self_terminated(),
    Rule::of(K::EnumDeclaration)
        .prec(Prec(1), Assoc::None)
        .self_terminated(),
    Rule::of(K::ConstDeclaration),
    Rule::of(K::VariableDeclaration),
    Rule::of(K::Import),
    Rule::of(K::Load),
    Rule::of(K::RunStatement).self_terminated(),
    Rule::of(K::InsertStatement).self_terminated(),
    Rule::of(K::AssertDirective),
    Rule::of(K::AddContextDirective).self_terminated(),
    Rule::of(K::ModuleParametersDirective),
    Rule::of(K::CompilerDirective).self_terminated(),
    Rule::of(K::UsingStatement).self_terminated(),
    // Statements
    Rule::of(K::Block)
        .prec(Prec(2), Assoc::None)
        .self_terminated(),
    Rule::of(K::AssignmentStatement).prec(Prec::ASSIGNMENT, Assoc::Left),
    Rule::of(K::UpdateStatement).prec(Prec::ASSIGNMENT, Assoc::Left),
    Rule::of(K::IfStatement)
        .prec(Prec::NONE, Assoc::Right)
        .self_terminated(),
    Rule::of(K::IfCaseStatement).self_terminated(),
    Rule::of(K::ThroughStatement),
    Rule::of(K::WhileStatement).self_terminated(),
    Rule::of(K::ForStatement)
        .prec(Prec(3), Assoc::Right)
        .self_terminated(),
    Rule::of(K::DeferStatement).self_terminated(),
    Rule::of(K::ReturnStatement),
    Rule::of(K::BreakStatement),
    Rule::of(K::ContinueStatement),
    Rule::of(K::RemoveStatement),
    Rule::of(K::PushContextStatement).self_terminated(),
    Rule::of(K::AsmStatement)
        .prec(Prec::NONE, Assoc::Right)
        .self_terminated(),
    Rule::of(K::Error).self_terminated(),
    // Expressions
    Rule::of(K::ParenthesizedExpression).prec(Prec::PARENTHESES, Assoc::None),
    Rule::of(K::UnaryExpression).prec(Prec::UNARY, Assoc::Left),
    // Per-operator levels live in `BINARY_OPERATORS`.
    Rule::of(K::BinaryExpression).prec(Prec::NONE, Assoc::Left),
    Rule::of(K::Address).prec(Prec::CAST, Assoc::Left),
    Rule::of(K::PointerExpression).prec(Prec::UNARY, Assoc::Left),
    Rule::of(K::DereferenceExpression).prec(Prec::MEMBER, Assoc::Left),
    Rule::of(K::CastExpression).prec(Prec::CAST, Assoc::Left),
    Rule::of(K::CallExpression)
        .prec(Prec::CALL, Assoc::Right)
        .dynamic(1),
    Rule::of(K::MemberExpression).prec(Prec::MEMBER, Assoc::Left),
    Rule::of(K::IndexExpression).prec(Prec::MEMBER, Assoc::Left),
    Rule::of(K::Range).prec(Prec::RANGE, Assoc::None),
    Rule::of(K::IfExpression).prec(Prec::NONE, Assoc::Right),
    Rule::of(K::QuickProcedure).prec(Prec::NONE, Assoc::Right),
    Rule::of(K::Procedure).prec(Prec::NONE, Assoc::Right),
    Rule::of(K::RunExpression).prec(Prec(20), Assoc::None),
    // Types
    Rule::of(K::ParameterizedStructType)
        .prec(Prec(17), Assoc::None)
        .dynamic(0),
    Rule::of(K::PointerType).prec(Prec::CAST, Assoc::Left),
    Rule::of(K::QualifiedType).prec(Prec::MEMBER, Assoc::Left),
    Rule::of(K::ArrayType).prec(Prec::NONE, Assoc::Left),
    Rule::of(K::ProcedureType).prec(Prec::NONE, Assoc::Left),
    Rule::of(K::AnonymousStructType).prec(Prec::PARENTHESES, Assoc::None),
    Rule::of(K::AnonymousEnumType).prec(Prec::PARENTHESES, Assoc::None),
    Rule::of(K::NamedReturn).prec(Prec(1), Assoc::Right),
    // Statement classes: the statements allowed before a `,` in a
    // statement list and those that must stand alone.
    Rule::new("all_statements"),
    Rule::new("no_comma_statements").self_terminated(),
];

/// How a declared conflict is settled.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// The syntactic position says whether a type or an expression is expected.
    Position,
    /// A bounded look at the tokens that follow picks the rule.
    FollowToken,
    /// The rule with the higher static precedence wins.
    StaticPrecedence,
    /// Equal static precedence; the higher dynamic precedence wins.
    DynamicPrecedence,
    /// The statement's terminator class decides whether `;` is required.
    TerminatorClass,
}

/// Rules that can match the same text.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Conflict {
    pub rules: &'static [&'static str],
    pub strategy: Strategy,
    pub note: &'static str,
}

pub const CONFLICTS: &[Conflict] = &[
    Conflict {
        rules: &["call_expression", "parameterized_struct_type"],
        strategy: Strategy::StaticPrecedence,
        note: "`Name(args)` is a call unless a type is expected or `.{`/`.[` follows",
    },
    Conflict {
        rules: &["address", "pointer_type"],
        strategy: Strategy::Position,
        note: "prefix `*` builds a pointer type in type positions and takes an address elsewhere",
    },
    Conflict {
        rules: &["member_expression", "qualified_type"],
        strategy: Strategy::Position,
        note: "`A.B` is a qualified type in type positions",
    },
    Conflict {
        rules: &["dereference_expression", "binary_expression"],
        strategy: Strategy::FollowToken,
        note: "postfix `*` dereferences when no operand can follow it",
    },
    Conflict {
        rules: &["procedure", "procedure_type"],
        strategy: Strategy::FollowToken,
        note: "a parameter list followed by a body or directives is a procedure",
    },
    Conflict {
        rules: &["procedure_type", "run_expression"],
        strategy: Strategy::FollowToken,
        note: "`#run -> T {}` runs a block; `->` after `#run` never starts a type",
    },
    Conflict {
        rules: &["parenthesized_expression", "procedure_type", "quick_procedure"],
        strategy: Strategy::FollowToken,
        note: "`(x)` followed by `=>` is a quick procedure, by `->` a procedure type",
    },
    Conflict {
        rules: &["if_statement", "if_case_statement"],
        strategy: Strategy::FollowToken,
        note: "`if x == {` opens an if-case",
    },
    Conflict {
        rules: &["enum_declaration", "const_declaration"],
        strategy: Strategy::StaticPrecedence,
        note: "`Name :: enum` declares an enum",
    },
    Conflict {
        rules: &["struct_declaration", "anonymous_struct_type"],
        strategy: Strategy::Position,
        note: "`Name :: struct` declares a struct; elsewhere `struct {}` is a type",
    },
    Conflict {
        rules: &["all_statements", "no_comma_statements"],
        strategy: Strategy::TerminatorClass,
        note: "self-terminated statements need no `;`",
    },
];

static REGISTRY: LazyLock<FxHashMap<&'static str, &'static Rule>> =
    LazyLock::new(|| RULES.iter().map(|rule| (rule.name, rule)).collect());

/// Rules indexed by name.
pub fn registry() -> &'static FxHashMap<&'static str, &'static Rule> {
    &REGISTRY
}

pub fn rule(name: &str) -> Option<&'static Rule> {
    registry().get(name).copied()
}

/// Terminator class of a statement node; kinds without a rule need `;`.
pub fn terminator_for(kind: SyntaxKind) -> Terminator {
    rule(kind.name()).map_or(Terminator::Semicolon, |rule| rule.terminator)
}

/// The declared conflict covering all of `candidates`, if any.
pub fn conflict_for(candidates: &[&str]) -> Option<&'static Conflict> {
    CONFLICTS.iter().find(|conflict| {
        candidates.len() >= 2 && candidates.iter().all(|c| conflict.rules.contains(c))
    })
}

/// Outcome of settling a conflict.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Chosen(&'static Rule),
    /// No declared conflict settles the candidates. `fallback` is the
    /// candidate with the highest dynamic precedence, if any is known.
    Unresolved { fallback: Option<&'static Rule> },
}

/// Settle a conflict between rules that matched the same text.
///
/// Static precedence decides first, dynamic precedence second. Candidates
/// with no declared conflict between them, or that tie on both, are
/// unresolved.
pub fn resolve(candidates: &[&str]) -> Resolution {
    let rules: Vec<&'static Rule> = candidates.iter().filter_map(|name| rule(name)).collect();
    let fallback = rules
        .iter()
        .copied()
        .reduce(|best, r| if r.dynamic > best.dynamic { r } else { best });

    if rules.len() != candidates.len() || conflict_for(candidates).is_none() {
        return Resolution::Unresolved { fallback };
    }

    let key = |rule: &Rule| (rule.prec, rule.dynamic);
    let Some(best) = rules.iter().copied().max_by_key(|r| key(r)) else {
        return Resolution::Unresolved { fallback };
    };
    let ties = rules.iter().filter(|r| key(r) == key(best)).count();
    if ties > 1 {
        Resolution::Unresolved { fallback }
    } else {
        Resolution::Chosen(best)
    }
}
