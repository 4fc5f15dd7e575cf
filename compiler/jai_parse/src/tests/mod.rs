//! Parser tests.
//!
//! Tests are organized into modules by category:
//! - `declarations`: Constants, variables, procedures, structs, enums, imports
//! - `statements`: Control flow, directives in statement position, assembly
//! - `expressions`: Operators, precedence, calls, literals, directives
//! - `types`: Type positions and the expression/type conflicts

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod declarations;
mod expressions;
mod types;

use crate::parse;

/// Parse `source`, require it to be error free and render the tree.
fn sexp(source: &str) -> String {
    let parse = parse(source);
    assert!(
        parse.errors().is_empty(),
        "unexpected errors in {source:?}: {:#?}",
        parse.errors()
    );
    parse.tree().to_sexp()
}
