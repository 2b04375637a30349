//! Laws every optional wrapper obeys.

use std::cell::Cell;

use prism_compiler_parser::ast::TypeDecl;
use proptest::prelude::*;

use super::*;

proptest! {
    #[test]
    fn optional_map_preserves_presence(value in proptest::option::of(any::<i64>())) {
        let optional = Optional::from(value);
        let mapped = optional.map(|v| v.wrapping_mul(3));
        prop_assert_eq!(mapped.has_value(), value.is_some());
        prop_assert_eq!(mapped.or_null(), value.map(|v| v.wrapping_mul(3)));
    }

    #[test]
    fn optional_or_throw_matches_or_null(value in proptest::option::of(".*")) {
        let thrown = Optional::from(value.clone()).or_throw();
        prop_assert_eq!(thrown.ok(), value);
    }

    #[test]
    fn argument_or_default_falls_back_only_when_empty(
        value in proptest::option::of(any::<i32>()),
        fallback in any::<i32>(),
    ) {
        let argument = match value {
            Some(v) => OptionalArgument::with_value(v),
            None => OptionalArgument::empty(),
        };
        prop_assert_eq!(argument.or_default(fallback), value.unwrap_or(fallback));
    }

    #[test]
    fn argument_filter_is_conjunction(value in any::<i32>(), bound in any::<i32>()) {
        let kept = OptionalArgument::with_value(value).filter(|v| *v > bound);
        prop_assert_eq!(kept.has_value(), value > bound);
    }

    #[test]
    fn equatable_arrays_compare_by_elements(items in proptest::collection::vec(any::<u16>(), 0..16)) {
        let left = EquatableArray::from(items.clone());
        let right: EquatableArray<u16> = items.iter().copied().collect();
        prop_assert_eq!(&left, &right);
        prop_assert_eq!(left.stable_hash(), right.stable_hash());
    }
}

#[test]
fn test_validation_polarity_for_symbols() {
    let compilation = shop();

    let mut valid = None;
    let present = OptionalSymbol::new(compilation.get_type_by_metadata_name("Shop.Orders.Order"));
    assert!(present.clone().try_validate(&mut valid));
    assert!(valid.is_some());
    assert!(!present.is_not_valid(&mut valid));
    assert_eq!(valid.map(|symbol| symbol.name().to_string()), Some("Order".to_string()));

    let mut valid = None;
    let missing = OptionalSymbol::new(compilation.get_type_by_metadata_name("Shop.Orders.Nope"));
    assert!(!missing.clone().try_validate(&mut valid));
    assert!(missing.is_not_valid(&mut valid));
    assert!(valid.is_none());
}

#[test]
fn test_validation_polarity_for_syntax_and_attributes() {
    let compilation = shop();
    let service = valid_type(&compilation, "Shop.Orders.OrderService");

    let mut syntax = None;
    assert!(!service.declaring_syntax::<TypeDecl>().is_not_valid(&mut syntax));
    assert!(syntax.is_some());
    assert!(OptionalSyntax::<TypeDecl>::empty().is_not_valid(&mut syntax));
    assert!(syntax.is_none());

    let mut attribute = None;
    assert!(service.get_attribute("Config").try_validate(&mut attribute));
    assert!(attribute.is_some());
    assert!(!service.get_attribute("Obsolete").try_validate(&mut attribute));
    assert!(attribute.is_none());
}

#[test]
fn test_throwing_boundaries() {
    let compilation = shop();
    let service = valid_type(&compilation, "Shop.Orders.OrderService");

    let error = service.get_member("Nope").validate_or_throw().unwrap_err();
    assert_eq!(error, ProjectionError::Invalid { what: "symbol" });
    let error = service.get_attribute("Nope").or_throw().unwrap_err();
    assert_eq!(error.to_string(), "attribute has no value");
    let error = OptionalSyntax::<TypeDecl>::empty().or_throw().unwrap_err();
    assert_eq!(error.to_string(), "syntax node has no value");
    let error = OptionalArgument::<i32>::empty().or_throw().unwrap_err();
    assert_eq!(error.to_string(), "argument has no value");
}

#[test]
fn test_lazy_messages_run_only_on_failure() {
    let compilation = shop();
    let service = valid_type(&compilation, "Shop.Orders.OrderService");
    let calls = Cell::new(0);
    let message = || {
        calls.set(calls.get() + 1);
        "missing member"
    };

    assert!(service.get_member("Count").validate_or_throw_with(message).is_ok());
    assert!(service.get_attribute("Config").or_throw_with(message).is_ok());
    assert_eq!(calls.get(), 0);

    let error = service.get_member("Nope").validate_or_throw_with(message).unwrap_err();
    assert_eq!(error.to_string(), "missing member");
    assert_eq!(calls.get(), 1);
}
