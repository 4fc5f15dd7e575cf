//! Node taxonomy of the concrete syntax tree.
//!
//! Node and field names are a public contract: editor queries and other
//! consumers match on them. Adding a kind is backward compatible; renaming or
//! removing one requires bumping [`TAXONOMY_VERSION`].

use std::fmt;
use std::sync::LazyLock;

use rustc_hash::FxHashMap;

/// Version of the node taxonomy.
pub const TAXONOMY_VERSION: u32 = 1;

macro_rules! named_enum {
    (
        $(#[$enum_meta:meta])*
        pub enum $ty:ident {
            $( $(#[$meta:meta])* $variant:ident => $name:literal, )*
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
        pub enum $ty {
            $( $(#[$meta])* $variant, )*
        }

        impl $ty {
            /// Every variant in declaration order.
            pub const ALL: &[$ty] = &[$($ty::$variant,)*];

            /// Stable snake_case name.
            pub const fn name(self) -> &'static str {
                match self {
                    $($ty::$variant => $name,)*
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

named_enum! {
    /// Kind of a syntax node.
    pub enum SyntaxKind {
        SourceFile => "source_file",
        /// Span the parser could not match against any alternative.
        Error => "ERROR",

        // Declarations
        ProcedureDeclaration => "procedure_declaration",
        StructDeclaration => "struct_declaration",
        EnumDeclaration => "enum_declaration",
        EnumMember => "enum_member",
        ConstDeclaration => "const_declaration",
        VariableDeclaration => "variable_declaration",
        Import => "import",
        Load => "load",
        RunStatement => "run_statement",
        InsertStatement => "insert_statement",
        AssertDirective => "assert_directive",
        AddContextDirective => "add_context_directive",
        ModuleParametersDirective => "module_parameters_directive",
        /// `#scope_file`, `#foreign lib`, `#expand` and other directives
        /// without a dedicated node.
        CompilerDirective => "compiler_directive",
        ModifyDirective => "modify_directive",
        /// `#deprecated "reason"`, attached as an extra.
        DeprecatedDirective => "deprecated_directive",
        SpecifiedDirective => "specified_directive",
        UsingStatement => "using_statement",

        // Statements
        Block => "block",
        AssignmentStatement => "assignment_statement",
        UpdateStatement => "update_statement",
        IfStatement => "if_statement",
        IfCaseStatement => "if_case_statement",
        SwitchCase => "switch_case",
        ThroughStatement => "through_statement",
        WhileStatement => "while_statement",
        ForStatement => "for_statement",
        DeferStatement => "defer_statement",
        ReturnStatement => "return_statement",
        BreakStatement => "break_statement",
        ContinueStatement => "continue_statement",
        RemoveStatement => "remove_statement",
        PushContextStatement => "push_context_statement",
        AsmStatement => "asm_statement",
        AsmInstruction => "asm_instruction",
        AsmDeclaration => "asm_declaration",
        AsmMemoryOperand => "asm_memory_operand",

        // Expressions
        Identifier => "identifier",
        ParenthesizedExpression => "parenthesized_expression",
        UnaryExpression => "unary_expression",
        BinaryExpression => "binary_expression",
        Address => "address",
        /// `<< ptr`
        PointerExpression => "pointer_expression",
        /// `ptr.*` and postfix `ptr*`
        DereferenceExpression => "dereference_expression",
        CastExpression => "cast_expression",
        CallExpression => "call_expression",
        NamedArgument => "named_argument",
        SpreadArgument => "spread_argument",
        MemberExpression => "member_expression",
        IndexExpression => "index_expression",
        Range => "range",
        IfExpression => "if_expression",
        IfExpressionBlock => "if_expression_block",
        TypeOfExpression => "type_of_expression",
        RunExpression => "run_expression",
        InsertExpression => "insert_expression",
        LibraryDirective => "library_directive",
        /// `#caller_location`, `#code expr`, `#procedure_name()` and similar.
        DirectiveExpression => "directive_expression",
        QuickProcedure => "quick_procedure",
        Procedure => "procedure",
        Parameter => "parameter",
        NamedReturn => "named_return",

        // Literals
        Integer => "integer",
        Float => "float",
        String => "string",
        HeredocString => "heredoc_string",
        StructLiteral => "struct_literal",
        ArrayLiteral => "array_literal",
        Boolean => "boolean",
        Null => "null",
        Uninitialized => "uninitialized",

        // Types
        BuiltinType => "builtin_type",
        QualifiedType => "qualified_type",
        PointerType => "pointer_type",
        ParameterizedStructType => "parameterized_struct_type",
        AnonymousStructType => "anonymous_struct_type",
        AnonymousEnumType => "anonymous_enum_type",
        ArrayType => "array_type",
        ProcedureType => "procedure_type",
        TypeLiteral => "type_literal",
        PolymorphicType => "polymorphic_type",
        VariadicType => "variadic_type",
    }
}

named_enum! {
    /// Name under which a child is recorded in its parent's field map.
    pub enum FieldName {
        Name => "name",
        Type => "type",
        Value => "value",
        Condition => "condition",
        Consequence => "consequence",
        Alternative => "alternative",
        Body => "body",
        Left => "left",
        Right => "right",
        Operator => "operator",
        Argument => "argument",
        Function => "function",
        Object => "object",
        Member => "member",
        Index => "index",
        Parameters => "parameters",
        Result => "result",
        Modifier => "modifier",
        Keyword => "keyword",
        DefaultValue => "default_value",
        Path => "path",
        RangeFrom => "range_from",
        RangeTo => "range_to",
        Element => "element",
        Size => "size",
        Label => "label",
        Mnemonic => "mnemonic",
        Operand => "operand",
        Register => "register",
        Message => "message",
        Directive => "directive",
    }
}

/// Abstract categories consumers can match on without listing every kind.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Supertype {
    Declaration,
    Statement,
    Expression,
    Type,
    Literal,
}

impl SyntaxKind {
    /// Parse a stable name back into a kind.
    pub fn from_name(name: &str) -> Option<SyntaxKind> {
        static BY_NAME: LazyLock<FxHashMap<&'static str, SyntaxKind>> =
            LazyLock::new(|| SyntaxKind::ALL.iter().map(|k| (k.name(), *k)).collect());
        BY_NAME.get(name).copied()
    }

    /// Supertypes this kind belongs to.
    pub const fn supertypes(self) -> &'static [Supertype] {
        use Supertype::{Declaration, Expression, Literal, Statement, Type};
        use SyntaxKind as K;
        match self {
            K::ProcedureDeclaration
            | K::StructDeclaration
            | K::EnumDeclaration
            | K::ConstDeclaration
            | K::VariableDeclaration
            | K::Import
            | K::Load
            | K::RunStatement
            | K::InsertStatement
            | K::AssertDirective
            | K::AddContextDirective
            | K::ModuleParametersDirective
            | K::CompilerDirective
            | K::UsingStatement
            | K::IfStatement
            | K::IfCaseStatement => &[Declaration, Statement],

            K::Block
            | K::AssignmentStatement
            | K::UpdateStatement
            | K::ThroughStatement
            | K::WhileStatement
            | K::ForStatement
            | K::DeferStatement
            | K::ReturnStatement
            | K::BreakStatement
            | K::ContinueStatement
            | K::RemoveStatement
            | K::PushContextStatement
            | K::AsmStatement => &[Statement],

            K::Identifier | K::TypeOfExpression => &[Expression, Type],

            K::ParenthesizedExpression
            | K::UnaryExpression
            | K::BinaryExpression
            | K::Address
            | K::PointerExpression
            | K::DereferenceExpression
            | K::CastExpression
            | K::CallExpression
            | K::MemberExpression
            | K::IndexExpression
            | K::Range
            | K::IfExpression
            | K::RunExpression
            | K::InsertExpression
            | K::LibraryDirective
            | K::DirectiveExpression
            | K::QuickProcedure
            | K::Procedure => &[Expression],

            K::Integer
            | K::Float
            | K::String
            | K::HeredocString
            | K::StructLiteral
            | K::ArrayLiteral
            | K::Boolean
            | K::Null
            | K::Uninitialized => &[Expression, Literal],

            K::BuiltinType
            | K::QualifiedType
            | K::PointerType
            | K::ParameterizedStructType
            | K::AnonymousStructType
            | K::AnonymousEnumType
            | K::ArrayType
            | K::ProcedureType
            | K::TypeLiteral
            | K::PolymorphicType
            | K::VariadicType => &[Type],

            K::SourceFile
            | K::Error
            | K::EnumMember
            | K::ModifyDirective
            | K::DeprecatedDirective
            | K::SpecifiedDirective
            | K::SwitchCase
            | K::AsmInstruction
            | K::AsmDeclaration
            | K::AsmMemoryOperand
            | K::NamedArgument
            | K::SpreadArgument
            | K::IfExpressionBlock
            | K::Parameter
            | K::NamedReturn => &[],
        }
    }

    fn has_supertype(self, supertype: Supertype) -> bool {
        self.supertypes().contains(&supertype)
    }

    pub fn is_declaration(self) -> bool {
        self.has_supertype(Supertype::Declaration)
    }

    pub fn is_statement(self) -> bool {
        self.has_supertype(Supertype::Statement)
    }

    pub fn is_expression(self) -> bool {
        self.has_supertype(Supertype::Expression)
    }

    pub fn is_type(self) -> bool {
        self.has_supertype(Supertype::Type)
    }

    pub fn is_literal(self) -> bool {
        self.has_supertype(Supertype::Literal)
    }

    /// Nodes that only wrap the name token they are spelled by. Their token
    /// is not repeated in the s-expression.
    pub const fn is_name_leaf(self) -> bool {
        matches!(self, SyntaxKind::Identifier | SyntaxKind::BuiltinType)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in SyntaxKind::ALL {
            assert_eq!(SyntaxKind::from_name(kind.name()), Some(*kind));
        }
        assert_eq!(SyntaxKind::from_name("no_such_kind"), None);
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = SyntaxKind::ALL.iter().map(|k| k.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), SyntaxKind::ALL.len());
    }

    #[test]
    fn literals_are_expressions() {
        for kind in SyntaxKind::ALL.iter().filter(|k| k.is_literal()) {
            assert!(kind.is_expression(), "{kind} is a literal but not an expression");
        }
    }

    #[test]
    fn supertype_samples() {
        assert!(SyntaxKind::VariableDeclaration.is_declaration());
        assert!(SyntaxKind::VariableDeclaration.is_statement());
        assert!(SyntaxKind::WhileStatement.is_statement());
        assert!(!SyntaxKind::WhileStatement.is_declaration());
        assert!(SyntaxKind::PointerType.is_type());
        assert!(!SyntaxKind::PointerType.is_expression());
        assert!(SyntaxKind::Identifier.is_type());
        assert!(SyntaxKind::Identifier.is_expression());
        assert!(SyntaxKind::Error.supertypes().is_empty());
    }

    #[test]
    fn field_names_are_snake_case() {
        for field in FieldName::ALL {
            assert!(field
                .name()
                .chars()
                .all(|c| c.is_ascii_lowercase() || c == '_'));
        }
    }
}
