use std::collections::HashSet;

use prism_compiler_semantic::{SymbolKind, TypeKind};

use super::*;

const SOURCE: &str = "namespace Shop { public class Cart { public int Count; } public struct Item { } }";

#[test]
fn test_lookups_of_the_same_declaration_are_equal() {
    let compilation = compile_ok(SOURCE);
    let first = type_named(&compilation, "Shop.Cart");
    let second = type_named(&compilation, "Shop.Cart");
    assert_eq!(first, second);

    let from_member = member(&first, "Count").containing_type();
    assert_eq!(from_member.as_ref(), Some(&second));

    let set: HashSet<_> = [first, second, type_named(&compilation, "Shop.Item")].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn test_symbols_of_different_compilations_differ() {
    let one = compile_ok(SOURCE);
    let two = compile_ok(SOURCE);
    assert_ne!(type_named(&one, "Shop.Cart"), type_named(&two, "Shop.Cart"));
    assert_eq!(one.clone().id(), one.id());
    assert_ne!(one.id(), two.id());
}

#[test]
fn test_kind_queries() {
    let compilation = compile_ok(SOURCE);
    let cart = type_named(&compilation, "Shop.Cart");
    let item = type_named(&compilation, "Shop.Item");
    assert_eq!(cart.kind(), SymbolKind::NamedType);
    assert_eq!(cart.type_kind(), Some(TypeKind::Class));
    assert!(cart.is_reference_type() && !cart.is_value_type());
    assert!(item.is_value_type());
    assert_eq!(member(&cart, "Count").kind(), SymbolKind::Field);

    let shop = cart.containing_namespace().expect("namespace");
    assert_eq!(shop.kind(), SymbolKind::Namespace);
    assert!(shop.containing_symbol().is_some_and(|global| global.is_global_namespace()));
}
