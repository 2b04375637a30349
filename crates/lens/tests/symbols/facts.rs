//! Naming, accessibility, modifier and classification facts.

use super::*;

#[test]
fn test_identity_names() {
    let compilation = shop();
    let service = valid_type(&compilation, "Shop.Orders.OrderService");

    assert_eq!(service.name(), "OrderService");
    assert_eq!(service.namespace().as_deref(), Some("Shop.Orders"));
    assert_eq!(service.fully_qualified_name(), "Shop.Orders.OrderService");
    assert_eq!(service.global_qualified_name(), "global::Shop.Orders.OrderService");
    assert_eq!(service.display_name(), "OrderService");
    assert_eq!(service.property_name(), "OrderService");
    assert_eq!(service.parameter_name(), "orderService");
}

#[test]
fn test_interface_names_drop_prefix() {
    let compilation = shop();
    let store = valid_type(&compilation, "Shop.Orders.IOrderStore");
    assert!(store.is_interface());
    assert_eq!(store.property_name(), "OrderStore");
    assert_eq!(store.parameter_name(), "orderStore");
    assert_eq!(store.kind_keyword(), "interface");
}

#[test]
fn test_global_namespace_has_no_namespace() {
    let compilation = compile("public class Top { }");
    let top = valid_type(&compilation, "Top");
    assert_eq!(top.namespace(), None);
    assert_eq!(top.global_qualified_name(), "global::Top");
}

#[test]
fn test_accessibility_keywords() {
    let compilation = compile(
        "public class Outer
        {
            public class A { }
            internal class B { }
            protected class C { }
            private class D { }
            protected internal class E { }
            private protected class F { }
        }",
    );
    let outer = valid_type(&compilation, "Outer");
    let keywords: Vec<_> = ["A", "B", "C", "D", "E", "F"]
        .iter()
        .map(|name| valid_member(&outer, name).accessibility_keyword())
        .collect();
    assert_eq!(
        keywords,
        [
            "public",
            "internal",
            "protected",
            "private",
            "protected internal",
            "private protected"
        ]
    );

    assert!(valid_member(&outer, "E").is_protected_or_internal());
    assert!(valid_member(&outer, "F").is_protected_and_internal());
    assert!(!valid_member(&outer, "F").is_protected());
}

#[test]
fn test_modifiers() {
    let compilation = shop();
    let service = valid_type(&compilation, "Shop.Orders.OrderService");
    let attribute = valid_type(&compilation, "Shop.Orders.ConfigAttribute");
    let wrapper = valid_type(&compilation, "Shop.Orders.Wrapper`1");

    assert!(service.is_partial());
    assert!(!attribute.is_partial());
    assert!(attribute.is_sealed());
    assert!(!service.is_static());

    let max_lines = valid_member(&service, "MaxLines");
    assert!(max_lines.is_const());
    assert!(max_lines.is_static());
    assert!(valid_member(&service, "Count").is_readonly());
    assert!(valid_member(&service, "LoadAsync").is_async());
    assert!(!valid_member(&service, "FlushAsync").is_async());

    assert!(!valid_member(&attribute, "Timeout").is_readonly());
    assert!(valid_member(&wrapper, "Value").is_readonly());

    let constructor = valid_member(&service, ".ctor");
    assert!(constructor.is_implicitly_declared());
}

#[test]
fn test_classification() {
    let compilation = shop();
    let order = valid_type(&compilation, "Shop.Orders.Order");
    let level = valid_type(&compilation, "Shop.Orders.Level");
    let wrapper = valid_type(&compilation, "Shop.Orders.Wrapper`1");

    assert!(order.is_record());
    assert!(order.is_class());
    assert!(order.is_reference_type());
    assert_eq!(order.kind_keyword(), "record");

    assert!(level.is_enum());
    assert!(level.is_value_type());
    assert_eq!(level.kind_keyword(), "enum");

    assert!(wrapper.is_generic());
    assert!(!order.is_generic());
    assert!(wrapper.is_type());
    assert!(!valid_member(&wrapper, "Value").is_type());
}

#[test]
fn test_record_struct_keyword() {
    let compilation = compile(
        "public record struct Point(int X, int Y);
         public readonly struct Size { }
         public delegate void Changed(int value);",
    );
    let point = valid_type(&compilation, "Point");
    assert!(point.is_struct());
    assert!(point.is_record());
    assert_eq!(point.kind_keyword(), "record struct");

    let size = valid_type(&compilation, "Size");
    assert!(size.is_readonly());
    assert_eq!(size.kind_keyword(), "struct");

    let changed = valid_type(&compilation, "Changed");
    assert!(changed.is_delegate());
    assert_eq!(changed.kind_keyword(), "delegate");
}

#[test]
fn test_nullable_annotations() {
    let compilation = compile(
        "public class C
         {
             public int? Count;
             public string? Name;
             public string Title;
         }",
    );
    let c = valid_type(&compilation, "C");
    let annotated = |name: &str| {
        valid_member(&c, name)
            .value_type()
            .map(|ty| ty.is_nullable_annotated())
            .or_default(false)
    };
    assert!(annotated("Count"));
    assert!(annotated("Name"));
    assert!(!annotated("Title"));
}
