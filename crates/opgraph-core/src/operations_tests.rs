//! Tests for operations module

use crate::error::Error;
use crate::operations::*;

fn strings(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn test_builtin_names_in_registration_order() {
    let registry = OperationRegistry::with_builtins();

    assert_eq!(
        registry.names(),
        ["sum", "average", "min", "max", "count", "concatenate"]
    );
}

#[test]
fn test_numeric_builtins() {
    let registry = OperationRegistry::with_builtins();
    let cells = [1.0, 4.0, 2.5, -0.5];

    assert!((registry.invoke_numeric("sum", &cells).unwrap() - 7.0).abs() < f64::EPSILON);
    assert!((registry.invoke_numeric("average", &cells).unwrap() - 1.75).abs() < f64::EPSILON);
    assert!((registry.invoke_numeric("min", &cells).unwrap() + 0.5).abs() < f64::EPSILON);
    assert!((registry.invoke_numeric("max", &cells).unwrap() - 4.0).abs() < f64::EPSILON);
    assert!((registry.invoke_numeric("count", &cells).unwrap() - 4.0).abs() < f64::EPSILON);
}

#[test]
fn test_sum_and_count_of_empty_column() {
    let registry = OperationRegistry::with_builtins();

    assert_eq!(registry.invoke_numeric("sum", &[]).unwrap(), 0.0);
    assert_eq!(registry.invoke_numeric("count", &[]).unwrap(), 0.0);
}

#[test]
fn test_average_of_empty_column_is_an_error() {
    let registry = OperationRegistry::with_builtins();

    for name in ["average", "min", "max"] {
        let err = registry.invoke_numeric(name, &[]).unwrap_err();
        assert!(matches!(err, Error::EmptyColumn(ref n) if n == name));
    }
}

#[test]
fn test_concatenate_joins_without_separator() {
    let registry = OperationRegistry::with_builtins();

    let joined = registry
        .invoke_text("concatenate", &strings(&["ab", "c", "", "d"]))
        .unwrap();

    assert_eq!(joined, "abcd");
}

#[test]
fn test_unknown_name_is_operation_not_found() {
    let registry = OperationRegistry::with_builtins();

    let err = registry.invoke_numeric("median", &[1.0]).unwrap_err();

    assert!(matches!(err, Error::OperationNotFound(ref n) if n == "median"));
    assert_eq!(err.code(), "OPG-002");
}

#[test]
fn test_kind_mismatch_both_ways() {
    let registry = OperationRegistry::with_builtins();

    let err = registry.invoke_text("sum", &strings(&["a"])).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { expected: "text", .. }));

    let err = registry.invoke_numeric("concatenate", &[1.0]).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { expected: "numeric", .. }));
}

#[test]
fn test_register_custom_reducers() {
    let mut registry = OperationRegistry::new();
    registry.register_numeric("range", |cells| {
        let min = cells.iter().copied().reduce(f64::min)?;
        let max = cells.iter().copied().reduce(f64::max)?;
        Some(max - min)
    });
    registry.register_text("first", |cells| cells.first().cloned());

    assert_eq!(registry.invoke_numeric("range", &[3.0, 9.0, 5.0]).unwrap(), 6.0);
    assert_eq!(registry.invoke_text("first", &strings(&["x", "y"])).unwrap(), "x");
    assert_eq!(registry.kind("range"), Some(ReducerKind::Numeric));
    assert_eq!(registry.kind("first"), Some(ReducerKind::Text));
    assert!(registry.contains("range"));
    assert!(!registry.contains("sum"));
}

#[test]
fn test_register_replaces_existing_name() {
    let mut registry = OperationRegistry::with_builtins();
    registry.register_text("sum", |cells| Some(cells.join("+")));

    assert_eq!(registry.kind("sum"), Some(ReducerKind::Text));
    assert_eq!(registry.names().len(), 6);
}
