//! Attribute lookup, argument extraction and typed queries.

use super::*;

mod arguments;
mod queries;

fn config(compilation: &Compilation) -> ValidAttribute {
    valid_type(compilation, "Shop.Orders.OrderService")
        .get_attribute("Config")
        .validate()
        .unwrap()
}

#[test]
fn test_attribute_names() {
    let compilation = shop();
    let config = config(&compilation);

    assert_eq!(config.name(), "ConfigAttribute");
    assert_eq!(config.short_name(), "Config");
    assert_eq!(config.full_name(), "Shop.Orders.ConfigAttribute");
    assert_eq!(config.to_string(), "Shop.Orders.ConfigAttribute");
    for name in ["Config", "ConfigAttribute", "Shop.Orders.Config", "Shop.Orders.ConfigAttribute"] {
        assert!(config.is_named(name), "{name}");
    }
    assert!(!config.is_named("Conf"));
    assert_eq!(config.suggested_property_name(), "Config");
    assert_eq!(config.suggested_parameter_name(), "config");
}

#[test]
fn test_lookup_by_name() {
    let compilation = shop();
    let service = valid_type(&compilation, "Shop.Orders.OrderService");

    assert!(service.has_attribute("Config"));
    assert!(service.has_attribute("Shop.Orders.ConfigAttribute"));
    assert!(service.lacks_attribute("Obsolete"));
    assert_eq!(service.attributes().len(), 1);
    assert_eq!(service.attributes_named("ConfigAttribute").len(), 1);
    assert!(service.get_attribute("Obsolete").is_empty());

    let order = valid_type(&compilation, "Shop.Orders.Order");
    assert!(order.attributes().is_empty());
    assert!(OptionalSymbol::empty().get_attribute("Config").is_empty());
}

#[test]
fn test_constructor_and_raw_arguments() {
    let compilation = shop();
    let config = config(&compilation);

    let constructor = config.constructor().validate().unwrap();
    assert_eq!(constructor.name(), ".ctor");
    assert_eq!(names(constructor.parameters()), ["name", "level"]);
    assert_eq!(
        config.with_args(|positional, named| (positional.len(), named.len())),
        (2, 2)
    );
    let named: Vec<_> = config.named_args().iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(named, ["Timeout", "Tags"]);
    assert_eq!(config.map(|attribute| attribute.short_name().len()), 6);
}

#[test]
fn test_application_syntax() {
    let compilation = shop();
    let syntax = config(&compilation).application_syntax().validate().unwrap();
    assert!(syntax.text().starts_with("Config(\"orders\""));
    assert_eq!(
        syntax.location("shop/orders.cs").to_string(),
        "shop/orders.cs:38:6"
    );
}

#[test]
fn test_unresolved_attribute_class() {
    init_tracing();
    let compilation = compile("[Missing(1)] public class C { }");
    let class = valid_type(&compilation, "C");

    assert_eq!(class.symbol().attributes().len(), 1);
    assert!(class.attributes().is_empty());
    assert!(class.lacks_attribute("Missing"));
    assert!(class.get_attribute("Missing").is_empty());

    let raw = OptionalAttribute::from(class.symbol().attributes().remove(0));
    assert!(raw.is_empty());
    assert!(raw.constructor_arg::<i32>(0).is_empty());
    assert!(!compilation.diagnostics().is_empty());
}

#[test]
fn test_presence_checks_skip_unresolved_applications() {
    let compilation = compile(
        "using System; [Missing, Obsolete(\"old\"), Missing2] public class C { }",
    );
    let class = valid_type(&compilation, "C");

    assert_eq!(class.symbol().attributes().len(), 3);
    assert!(class.has_attribute("Obsolete"));
    assert!(class.has_attribute("System.ObsoleteAttribute"));
    assert!(!class.lacks_attribute("Obsolete"));
    assert!(class.lacks_attribute("Missing"));
    assert!(class.lacks_attribute("Missing2"));
    assert!(!class.has_attribute("Serializable"));
}

#[test]
fn test_generic_attribute_type_argument() {
    let compilation = compile(
        "public class HandlerAttribute<T> : System.Attribute { }
         [Handler<int>] public class C { }",
    );
    let handler = valid_type(&compilation, "C")
        .get_attribute("Handler")
        .validate()
        .unwrap();

    assert_eq!(
        handler.get_type_argument(0).map(|ty| ty.display_name()).or_null(),
        Some("int".to_string())
    );
    assert!(handler.get_type_argument(1).is_empty());
    assert!(handler.constructor_args().is_empty());
}

#[test]
fn test_optional_attribute_chaining() {
    let compilation = shop();
    let service = valid_type(&compilation, "Shop.Orders.OrderService");

    let timeout = service
        .get_attribute("Config")
        .filter(|attribute| attribute.short_name() == "Config")
        .named_arg::<i32>("Timeout");
    assert_eq!(timeout, 30);

    let filtered = service.get_attribute("Config").filter(|_| false);
    assert!(filtered.named_arg::<i32>("Timeout").is_empty());

    let name = service
        .get_attribute("Config")
        .and_then(|attribute| attribute.constructor_arg::<String>(0).into_optional());
    assert_eq!(name, "orders".to_string());
}
