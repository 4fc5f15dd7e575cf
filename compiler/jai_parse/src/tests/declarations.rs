//! Declaration tests.

use pretty_assertions::assert_eq;

use super::sexp;
use crate::parse;
use jai_diagnostic::ErrorCode;

#[test]
fn test_variable_with_type() {
    assert_eq!(
        sexp("x : int;"),
        "(source_file (variable_declaration name: (identifier) type: (builtin_type)))"
    );
}

#[test]
fn test_variable_list() {
    assert_eq!(
        sexp("x, y := 1, 2;"),
        "(source_file (variable_declaration name: (identifier) name: (identifier) \
         value: (integer) value: (integer)))"
    );
}

#[test]
fn test_constants() {
    assert_eq!(
        sexp("PI :: 3.14;"),
        "(source_file (const_declaration name: (identifier) value: (float)))"
    );
    assert_eq!(
        sexp("N : int : 4;"),
        "(source_file (const_declaration name: (identifier) type: (builtin_type) value: (integer)))"
    );
}

#[test]
fn test_uninitialized_variable() {
    assert_eq!(
        sexp("x: int = ---;"),
        "(source_file (variable_declaration name: (identifier) type: (builtin_type) \
         value: (uninitialized)))"
    );
}

#[test]
fn test_procedure_declaration() {
    assert_eq!(
        sexp("add :: (a: int, b: int) -> int { return a + b; }"),
        "(source_file (procedure_declaration name: (identifier) (procedure \
         parameters: (parameter name: (identifier) type: (builtin_type)) \
         parameters: (parameter name: (identifier) type: (builtin_type)) \
         result: (builtin_type) \
         body: (block (return_statement value: (binary_expression left: (identifier) right: (identifier)))))))"
    );
}

#[test]
fn test_procedure_needs_no_semicolon() {
    let parse = parse("main :: () {}\nx := 1;");
    assert!(parse.errors().is_empty(), "{:?}", parse.errors());
    assert_eq!(
        parse.tree().to_sexp(),
        "(source_file (procedure_declaration name: (identifier) (procedure body: (block))) \
         (variable_declaration name: (identifier) value: (integer)))"
    );
}

#[test]
fn test_foreign_procedure() {
    assert_eq!(
        sexp("malloc :: (size: s64) -> *void #foreign libc;"),
        "(source_file (procedure_declaration name: (identifier) (procedure \
         parameters: (parameter name: (identifier) type: (builtin_type)) \
         result: (pointer_type (builtin_type)) \
         modifier: (compiler_directive argument: (identifier)))))"
    );
}

#[test]
fn test_procedure_type_constant() {
    assert_eq!(
        sexp("Callback :: (x: int) -> int;"),
        "(source_file (const_declaration name: (identifier) value: (procedure_type \
         parameters: (parameter name: (identifier) type: (builtin_type)) result: (builtin_type))))"
    );
}

#[test]
fn test_operator_overload() {
    assert_eq!(
        sexp("operator + :: (a: V, b: V) -> V { return a; }"),
        "(source_file (procedure_declaration (procedure \
         parameters: (parameter name: (identifier) type: (identifier)) \
         parameters: (parameter name: (identifier) type: (identifier)) \
         result: (identifier) body: (block (return_statement value: (identifier))))))"
    );
}

#[test]
fn test_subscript_operator_overload() {
    let parse = parse("operator [] :: (a: A, i: int) -> int { return 0; }");
    assert!(parse.errors().is_empty(), "{:?}", parse.errors());
    assert!(parse
        .tree()
        .to_sexp()
        .starts_with("(source_file (procedure_declaration (procedure"));
}

#[test]
fn test_struct_declaration() {
    assert_eq!(
        sexp("Vec :: struct { x, y: float; }"),
        "(source_file (struct_declaration name: (identifier) \
         (variable_declaration name: (identifier) name: (identifier) type: (builtin_type))))"
    );
}

#[test]
fn test_parameterized_struct() {
    assert_eq!(
        sexp("Pair :: struct (T: Type) { a: T; }"),
        "(source_file (struct_declaration name: (identifier) \
         parameters: (parameter name: (identifier) type: (builtin_type)) \
         (variable_declaration name: (identifier) type: (identifier))))"
    );
}

#[test]
fn test_enum_declaration() {
    assert_eq!(
        sexp("Color :: enum u8 { RED; GREEN :: 5; }"),
        "(source_file (enum_declaration name: (identifier) type: (builtin_type) \
         (enum_member name: (identifier)) (enum_member name: (identifier) value: (integer))))"
    );
}

#[test]
fn test_enum_flags_specified() {
    assert_eq!(
        sexp("Flags :: enum_flags #specified { A :: 1; }"),
        "(source_file (enum_declaration name: (identifier) (specified_directive) \
         (enum_member name: (identifier) value: (integer))))"
    );
}

#[test]
fn test_last_enum_member_needs_no_semicolon() {
    assert_eq!(
        sexp("E :: enum { A; B }"),
        "(source_file (enum_declaration name: (identifier) \
         (enum_member name: (identifier)) (enum_member name: (identifier))))"
    );
}

#[test]
fn test_enum_member_missing_semicolon() {
    let parse = parse("E :: enum { A B; }");
    let codes: Vec<ErrorCode> = parse.errors().iter().map(|e| e.code).collect();
    assert_eq!(codes, vec![ErrorCode::E1008]);
    assert!(!parse.tree().has_error());
}

#[test]
fn test_imports() {
    assert_eq!(
        sexp("#import \"Basic\";"),
        "(source_file (import path: (string (string_content))))"
    );
    assert_eq!(
        sexp("Math :: #import,file \"m.jai\";"),
        "(source_file (import name: (identifier) modifier: (identifier) path: (string (string_content))))"
    );
}

#[test]
fn test_load() {
    assert_eq!(
        sexp("#load \"util.jai\";"),
        "(source_file (load path: (string (string_content))))"
    );
}

#[test]
fn test_deprecated_is_an_extra() {
    let parse = parse("#deprecated \"use g\"\nf :: () {}");
    assert!(parse.errors().is_empty(), "{:?}", parse.errors());
    assert_eq!(
        parse.tree().to_sexp(),
        "(source_file (deprecated_directive message: (string (string_content))) \
         (procedure_declaration name: (identifier) (procedure body: (block))))"
    );
}
