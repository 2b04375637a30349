use super::*;

#[test]
fn test_field_attribute_applies_to_every_declarator() {
    let compilation = compile_ok("public class C { [System.Obsolete] public int X, Y; }");
    let c = type_named(&compilation, "C");
    for name in ["X", "Y"] {
        let attributes = member(&c, name).attributes();
        assert_eq!(attributes.len(), 1, "{name}");
        assert_eq!(attributes[0].attribute_class().name(), "ObsoleteAttribute");
    }
}

#[test]
fn test_property_target_on_record_parameter() {
    let compilation = compile_ok(
        "using System; public record Person([property: Obsolete] string Name, [Obsolete] int Age);",
    );
    let person = type_named(&compilation, "Person");

    assert_eq!(member(&person, "Name").attributes().len(), 1);
    assert!(member(&person, "Age").attributes().is_empty());

    let constructor = member(&person, ".ctor");
    let parameters = constructor.parameters();
    assert!(parameters[0].attributes().is_empty());
    assert_eq!(parameters[1].attributes().len(), 1);
}

#[test]
fn test_method_and_return_targets() {
    let compilation = compile_ok(
        r#"
        using System;
        public class C
        {
            [method: Obsolete("m")]
            public void Run([Obsolete] int count) { }
        }
        "#,
    );
    let c = type_named(&compilation, "C");
    let run = member(&c, "Run");
    assert_eq!(run.attributes()[0].constructor_args()[0].as_str(), Some("m"));
    assert_eq!(run.parameters()[0].attributes().len(), 1);
}

#[test]
fn test_attributes_follow_declaration_order() {
    let compilation = compile_ok(
        "[System.Obsolete(\"first\")][System.Obsolete(\"second\")] public class C { }",
    );
    let c = type_named(&compilation, "C");
    let messages: Vec<_> = c
        .attributes()
        .iter()
        .filter_map(|a| a.constructor_args().first().and_then(|m| m.as_str().map(str::to_string)))
        .collect();
    assert_eq!(messages, ["first", "second"]);
}
