//! Members, signatures, constants, locations and documentation.

use prism_compiler_semantic::ConstantValue;

use super::*;

#[test]
fn test_members_and_signatures() {
    let compilation = shop();
    let service = valid_type(&compilation, "Shop.Orders.OrderService");

    let members = names(service.members());
    assert_eq!(
        members,
        ["MaxLines", "Count", "LoadAsync", "FlushAsync", "Dispose", ".ctor"]
    );
    assert_eq!(service.members_named("LoadAsync").len(), 1);
    assert!(service.get_member("Missing").is_empty());

    let load = valid_member(&service, "LoadAsync");
    assert!(load.is_method());
    let parameters = load.parameters();
    assert_eq!(names(parameters.clone()), ["id"]);
    assert_eq!(
        parameters[0].value_type().map(|ty| ty.display_name()).or_null(),
        Some("int".to_string())
    );
    assert_eq!(
        load.return_type().map(|ty| ty.display_name()).or_null(),
        Some("Task<Order>".to_string())
    );
}

#[test]
fn test_enum_members_and_constants() {
    let compilation = shop();
    let level = valid_type(&compilation, "Shop.Orders.Level");
    assert_eq!(
        level.enum_underlying_type().map(|ty| ty.display_name()).or_null(),
        Some("int".to_string())
    );

    let high = valid_member(&level, "High");
    let value = high.constant_value().or_null().unwrap();
    assert_eq!(value.value, ConstantValue::I32(2));

    let service = valid_type(&compilation, "Shop.Orders.OrderService");
    let max_lines = valid_member(&service, "MaxLines").constant_value();
    assert_eq!(max_lines.map(|constant| constant.value).or_null(), Some(ConstantValue::I32(50)));
    assert!(valid_member(&service, "Count").constant_value().is_empty());
    assert!(service.enum_underlying_type().is_empty());
}

#[test]
fn test_locations() {
    let compilation = shop();
    let service = valid_type(&compilation, "Shop.Orders.OrderService");
    assert_eq!(
        service.location().map(|location| location.to_string()).or_null(),
        Some("shop/orders.cs:39:26".to_string())
    );
    assert_eq!(service.locations().len(), 1);

    let constructor = valid_member(&service, ".ctor");
    assert!(constructor.location().is_empty());
}

#[test]
fn test_partial_declarations_have_one_location_each() {
    let compilation = compile_files(&[
        ("a.cs", "public partial class P { }"),
        ("b.cs", "\npublic partial class P { }"),
    ]);
    let p = valid_type(&compilation, "P");
    let locations: Vec<_> = p.locations().iter().map(ToString::to_string).collect();
    assert_eq!(locations, ["a.cs:1:22", "b.cs:2:22"]);
    assert_eq!(p.declaring_syntaxes::<prism_compiler_parser::ast::TypeDecl>().len(), 2);
}

#[test]
fn test_documentation() {
    let compilation = shop();
    let order = valid_type(&compilation, "Shop.Orders.Order");

    let xml = order.documentation_xml().unwrap();
    assert!(xml.contains("<summary>"));

    let documentation = order.documentation().or_null().unwrap();
    assert_eq!(documentation.summary.as_deref(), Some("One placed order."));
    assert_eq!(documentation.param("Id"), Some("Order number."));
    assert_eq!(documentation.param("Customer"), None);

    let service = valid_type(&compilation, "Shop.Orders.OrderService");
    assert!(service.documentation_xml().is_none());
    assert!(service.documentation().is_empty());
}

#[test]
fn test_member_summary_snapshot() {
    let compilation = shop();
    let service = valid_type(&compilation, "Shop.Orders.OrderService");
    let summary = service
        .members()
        .iter()
        .map(|member| {
            let suffix = if member.is_static() { " static" } else { "" };
            format!("{} {}{suffix}", member.accessibility_keyword(), member.name())
        })
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(summary, @r"
    public MaxLines static
    public Count
    public LoadAsync
    public FlushAsync
    public Dispose
    public .ctor
    ");
}
