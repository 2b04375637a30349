//! Validation and semantic identity.

use std::collections::HashSet;

use prism_compiler_parser::ast::TypeDecl;

use super::*;

#[test]
fn test_same_entity_from_separate_lookups_is_equal() {
    let compilation = shop();
    let by_name = valid_type(&compilation, "Shop.Orders.OrderService");
    let by_syntax = by_name
        .declaring_syntax::<TypeDecl>()
        .validate()
        .unwrap()
        .to_symbol(&compilation)
        .validate()
        .unwrap();
    let by_member = valid_member(&valid_type(&compilation, "Shop.Orders.OrderService"), "Count")
        .containing_type()
        .validate()
        .unwrap();

    assert_eq!(by_name, by_syntax);
    assert_eq!(by_name, by_member);
    let set: HashSet<_> = [by_name, by_syntax, by_member].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn test_same_printed_name_different_entity() {
    let compilation = compile(
        "namespace A { public class Item { } }
         namespace B { public class Item { } }",
    );
    let a = valid_type(&compilation, "A.Item");
    let b = valid_type(&compilation, "B.Item");
    assert_eq!(a.name(), b.name());
    assert_eq!(a.display_name(), b.display_name());
    assert_ne!(a, b);

    let recompiled = compile(
        "namespace A { public class Item { } }
         namespace B { public class Item { } }",
    );
    assert_ne!(a, valid_type(&recompiled, "A.Item"));
}

#[test]
fn test_error_symbol_is_not_valid() {
    let compilation = compile("public class C { public Missing Field; }");
    let field = valid_member(&valid_type(&compilation, "C"), "Field");
    let ty = field.value_type();

    assert!(ty.is_error());
    assert!(ty.is_empty());
    assert!(ty.raw().is_some());
    assert_eq!(
        ty.or_throw_msg("field type must resolve").unwrap_err().to_string(),
        "field type must resolve"
    );

    let missing = OptionalSymbol::new(compilation.get_type_by_metadata_name("Nope"));
    assert!(missing.is_empty());
    assert!(!missing.is_error());
    assert!(missing.raw().is_none());
}

#[test]
fn test_unresolved_type_arguments_are_skipped() {
    let compilation = compile(
        "public class Pair<A, B> { }
         public class C { public Pair<int, Missing> Both; }",
    );
    let both = valid_member(&valid_type(&compilation, "C"), "Both")
        .value_type()
        .validate()
        .unwrap();
    assert_eq!(names(both.type_arguments()), ["Int32"]);
    assert!(both.get_type_argument(0).has_value());
    assert!(both.get_type_argument(1).is_error());
}

#[test]
fn test_symbol_round_trips_through_optional() {
    let compilation = shop();
    let level = valid_type(&compilation, "Shop.Orders.Level");
    let optional = level.to_optional();
    assert!(optional.has_value());
    assert_eq!(optional.or_null().as_ref(), Some(level.symbol()));
    assert_eq!(level, *level.symbol());
}

#[test]
fn test_generic_type_named_inside_itself_is_its_definition() {
    let compilation = compile(
        "public class Node<T> {
             public Node<T> Next;
             public Node<int> Boxed;
             public class Inner { }
         }",
    );
    let node = valid_type(&compilation, "Node`1");
    let next = valid_member(&node, "Next").value_type().validate().unwrap();
    assert_eq!(next, node);
    assert_eq!(next.original_definition(), node);

    let inner = valid_member(&node, "Inner");
    assert_eq!(inner.containing_type().validate(), Some(next));

    let boxed = valid_member(&node, "Boxed").value_type().validate().unwrap();
    assert_ne!(boxed, node);
    assert_eq!(boxed.original_definition(), node);
}
