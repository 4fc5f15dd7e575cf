//! Parse context flags for context-sensitive parsing.
//!
//! Several Jai constructs read the same tokens differently depending on
//! where they appear: `(a: int) -> int` is a procedure type in a type
//! position and the head of a procedure literal elsewhere, and `x == {`
//! opens an if-case only inside an `if` condition.

/// Context flags for parsing.
///
/// Multiple flags can be combined using bitwise OR.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseContext(u16);

impl ParseContext {
    /// No special context.
    pub const NONE: Self = Self(0);

    /// Parsing a type. A parenthesized parameter list is a procedure
    /// type and never takes a body.
    pub const IN_TYPE: Self = Self(1 << 0);

    /// Parsing the condition of an `if`. `==` directly followed by `{`
    /// ends the condition and opens an if-case body.
    pub const IN_CONDITION: Self = Self(1 << 1);

    /// Inside a comma-separated argument or entry list. Procedure
    /// results stop at `,` instead of reading a result list.
    pub const IN_ARGUMENTS: Self = Self(1 << 2);

    /// Create a new context with no flags set.
    #[inline]
    pub const fn new() -> Self {
        Self::NONE
    }

    /// Check if a flag is set.
    #[inline]
    pub const fn has(self, flag: Self) -> bool {
        (self.0 & flag.0) != 0
    }

    /// Add a flag to the context.
    #[inline]
    #[must_use]
    pub const fn with(self, flag: Self) -> Self {
        Self(self.0 | flag.0)
    }

    /// Remove a flag from the context.
    #[inline]
    #[must_use]
    pub const fn without(self, flag: Self) -> Self {
        Self(self.0 & !flag.0)
    }

    /// Check if we're parsing a type.
    #[inline]
    pub const fn in_type(self) -> bool {
        self.has(Self::IN_TYPE)
    }

    #[inline]
    pub const fn in_condition(self) -> bool {
        self.has(Self::IN_CONDITION)
    }

    #[inline]
    pub const fn in_arguments(self) -> bool {
        self.has(Self::IN_ARGUMENTS)
    }
}
