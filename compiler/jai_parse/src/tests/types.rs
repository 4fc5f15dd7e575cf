//! Type position tests.

use pretty_assertions::assert_eq;

use super::sexp;

/// Render the type of `x : <ty>;`.
fn ty(ty: &str) -> String {
    let tree = sexp(&format!("x : {ty};"));
    let prefix = "(source_file (variable_declaration name: (identifier) type: ";
    tree.strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix("))"))
        .unwrap_or_else(|| panic!("not a single declaration: {tree}"))
        .to_string()
}

#[test]
fn test_builtin_and_named() {
    assert_eq!(ty("float64"), "(builtin_type)");
    assert_eq!(ty("Node"), "(identifier)");
}

#[test]
fn test_pointer_type() {
    assert_eq!(ty("*int"), "(pointer_type (builtin_type))");
    assert_eq!(ty("**Node"), "(pointer_type (pointer_type (identifier)))");
}

#[test]
fn test_qualified_type() {
    assert_eq!(
        ty("Math.Vector3"),
        "(qualified_type object: (identifier) member: (identifier))"
    );
}

#[test]
fn test_call_shape_is_a_type_in_type_position() {
    assert_eq!(
        ty("Vector2(f32)"),
        "(parameterized_struct_type type: (identifier) argument: (identifier))"
    );
    assert_eq!(
        ty("Table(string, *Node)"),
        "(parameterized_struct_type type: (identifier) argument: (builtin_type) \
         argument: (pointer_type (identifier)))"
    );
}

#[test]
fn test_array_types() {
    assert_eq!(ty("[..]int"), "(array_type element: (builtin_type))");
    assert_eq!(ty("[4]float"), "(array_type size: (integer) element: (builtin_type))");
    assert_eq!(
        ty("[]*Node"),
        "(array_type element: (pointer_type (identifier)))"
    );
}

#[test]
fn test_procedure_type() {
    assert_eq!(
        ty("(int) -> bool"),
        "(procedure_type parameters: (builtin_type) result: (builtin_type))"
    );
    assert_eq!(
        ty("(a: int, b: int) -> int, bool"),
        "(procedure_type parameters: (parameter name: (identifier) type: (builtin_type)) \
         parameters: (parameter name: (identifier) type: (builtin_type)) \
         result: (builtin_type) result: (builtin_type))"
    );
}

#[test]
fn test_procedure_type_in_value_position() {
    assert_eq!(
        sexp("F :: (int) -> int;"),
        "(source_file (const_declaration name: (identifier) value: (procedure_type \
         parameters: (builtin_type) result: (builtin_type))))"
    );
    assert_eq!(
        sexp("T :: #type (int) -> int;"),
        "(source_file (const_declaration name: (identifier) value: (type_literal \
         type: (procedure_type parameters: (builtin_type) result: (builtin_type)))))"
    );
}

#[test]
fn test_anonymous_types() {
    assert_eq!(
        ty("struct { a: int; }"),
        "(anonymous_struct_type (variable_declaration name: (identifier) type: (builtin_type)))"
    );
    assert_eq!(
        ty("enum { A; B; }"),
        "(anonymous_enum_type (enum_member name: (identifier)) (enum_member name: (identifier)))"
    );
}

#[test]
fn test_polymorphic_parameters() {
    assert_eq!(
        sexp("f :: (x: $T) -> T { return x; }"),
        "(source_file (procedure_declaration name: (identifier) (procedure \
         parameters: (parameter name: (identifier) type: (polymorphic_type name: (identifier))) \
         result: (identifier) body: (block (return_statement value: (identifier))))))"
    );
    assert_eq!(
        ty("$T/Container"),
        "(polymorphic_type name: (identifier) type: (identifier))"
    );
}

#[test]
fn test_parameter_forms() {
    assert_eq!(
        sexp("print :: (using v: Vec, args: ..Any, n := 3) {}"),
        "(source_file (procedure_declaration name: (identifier) (procedure \
         parameters: (parameter name: (identifier) type: (identifier)) \
         parameters: (parameter name: (identifier) type: (variadic_type (builtin_type))) \
         parameters: (parameter name: (identifier) default_value: (integer)) \
         body: (block))))"
    );
}

#[test]
fn test_polymorphic_parameter_name() {
    assert_eq!(
        sexp("f :: ($T: Type) {}"),
        "(source_file (procedure_declaration name: (identifier) (procedure \
         parameters: (parameter name: (identifier) type: (builtin_type)) body: (block))))"
    );
}

#[test]
fn test_named_returns() {
    assert_eq!(
        sexp("f :: () -> (ok: bool, n: int = 0) {}"),
        "(source_file (procedure_declaration name: (identifier) (procedure \
         result: (named_return name: (identifier) type: (builtin_type)) \
         result: (named_return name: (identifier) type: (builtin_type) default_value: (integer)) \
         body: (block))))"
    );
}

#[test]
fn test_type_of_in_type_position() {
    assert_eq!(ty("type_of(y)"), "(type_of_expression argument: (identifier))");
}
