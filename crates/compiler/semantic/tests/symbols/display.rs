use prism_compiler_semantic::DisplayFormat;

use super::*;

const WIDGETS: &str = r#"
namespace Acme.Widgets
{
    public class Box<T>
    {
        public T Lid;
        public T Get(int index, params string[] rest) { return Lid; }
        public Box(T lid) { }
    }

    public class Shelf
    {
        public Box<int?>[] Rows { get; set; }
        public System.Collections.Generic.List<string> Names { get; }
    }
}
"#;

#[test]
fn test_member_display_strings() {
    let compilation = compile_ok(WIDGETS);
    let boxed = type_named(&compilation, "Acme.Widgets.Box`1");
    let rendered: Vec<String> = boxed.members().iter().map(|m| m.to_string()).collect();
    insta::assert_debug_snapshot!(rendered, @r#"
    [
        "Acme.Widgets.Box<T>.Lid",
        "Acme.Widgets.Box<T>.Get(int, params string[])",
        "Acme.Widgets.Box<T>.Box(T)",
    ]
    "#);
}

#[test]
fn test_type_display_formats() {
    let compilation = compile_ok(WIDGETS);
    let shelf = type_named(&compilation, "Acme.Widgets.Shelf");
    let rows = member(&shelf, "Rows").ty().expect("typed");
    let names = member(&shelf, "Names").ty().expect("typed");

    assert_eq!(rows.to_display_string(DisplayFormat::Minimal), "Box<int?>[]");
    assert_eq!(
        rows.to_display_string(DisplayFormat::Qualified),
        "Acme.Widgets.Box<int?>[]"
    );
    assert_eq!(
        names.to_display_string(DisplayFormat::FullyQualified),
        "global::System.Collections.Generic.List<string>"
    );
    assert_eq!(names.to_display_string(DisplayFormat::Minimal), "List<string>");
}

#[test]
fn test_namespace_display() {
    let compilation = compile_ok("public class Top { }");
    let top = type_named(&compilation, "Top");
    assert_eq!(top.to_display_string(DisplayFormat::FullyQualified), "global::Top");
    assert_eq!(top.to_string(), "Top");
    assert_eq!(compilation.global_namespace().to_string(), "<global namespace>");

    let widgets = compile_ok(WIDGETS);
    let namespace = type_named(&widgets, "Acme.Widgets.Shelf")
        .containing_namespace()
        .expect("namespace");
    assert_eq!(namespace.to_string(), "Acme.Widgets");
    assert_eq!(namespace.to_display_string(DisplayFormat::Minimal), "Widgets");
}
