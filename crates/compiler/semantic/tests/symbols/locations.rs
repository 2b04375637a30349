use prism_compiler_parser::SyntaxKind;

use super::*;

#[test]
fn test_location_points_at_the_name() {
    let compilation = compile_ok("public class A { }");
    let a = type_named(&compilation, "A");
    let locations: Vec<String> = a.locations().iter().map(|l| l.to_string()).collect();
    assert_eq!(locations, ["test.cs:1:14"]);
}

#[test]
fn test_partial_type_has_a_location_per_file() {
    let compilation = compile_files(&[
        ("a.cs", "public partial class P { }"),
        ("b.cs", "\npublic partial class P { }"),
    ]);
    let p = type_named(&compilation, "P");
    let references = p.declaring_syntax_references();
    assert_eq!(references.len(), 2);
    assert!(references.iter().all(|r| r.kind() == SyntaxKind::CLASS_DECL));

    let locations: Vec<String> = p.locations().iter().map(|l| l.to_string()).collect();
    assert_eq!(locations, ["a.cs:1:22", "b.cs:2:22"]);
}

#[test]
fn test_declarator_location_and_syntax() {
    let compilation = compile_ok("class C\n{\n    int x, y;\n}");
    let c = type_named(&compilation, "C");
    let y = member(&c, "y");
    let locations: Vec<String> = y.locations().iter().map(|l| l.to_string()).collect();
    assert_eq!(locations, ["test.cs:3:12"]);

    let syntax = y.declaring_syntax_references()[0].syntax().expect("in tree");
    assert_eq!(syntax.kind(), SyntaxKind::VARIABLE_DECLARATOR);
    assert_eq!(syntax.text().to_string().trim(), "y");
}

#[test]
fn test_documentation_comment_xml() {
    let compilation = compile_ok(
        r#"
/// <summary>Adds numbers.</summary>
/// <param name="a">First.</param>
public class Calc
{
    /// <summary>Upper bound.</summary>
    public const int Max = 9, Min = 0;

    public int Plain;
}
"#,
    );
    let calc = type_named(&compilation, "Calc");
    assert_eq!(
        calc.documentation_comment_xml().as_deref(),
        Some("<summary>Adds numbers.</summary>\n<param name=\"a\">First.</param>")
    );
    assert_eq!(
        member(&calc, "Min").documentation_comment_xml().as_deref(),
        Some("<summary>Upper bound.</summary>")
    );
    assert_eq!(member(&calc, "Plain").documentation_comment_xml(), None);
}

#[test]
fn test_implicit_members_have_no_syntax() {
    let compilation = compile_ok("public class C { }");
    let constructor = member(&type_named(&compilation, "C"), ".ctor");
    assert!(constructor.is_implicitly_declared());
    assert!(constructor.locations().is_empty());
    assert!(constructor.declaring_syntax_references().is_empty());
}
