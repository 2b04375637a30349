//! Declaration pass: namespaces, partial types, implicit and record members.

use prism_compiler_diagnostics::DiagnosticCode;
use prism_compiler_semantic::{Accessibility, MethodKind, SpecialType, SymbolKind, TypeKind};

use super::*;

#[test]
fn test_partial_types_merge_across_files() {
    let compilation = compile_files(&[
        (
            "a.cs",
            "namespace Shop { public partial class Cart { public int Count { get; set; } } }",
        ),
        (
            "b.cs",
            "namespace Shop { partial class Cart { public void Clear() { } } }",
        ),
    ]);
    assert!(compilation.diagnostics().is_empty(), "{:?}", compilation.diagnostics());

    let cart = type_named(&compilation, "Shop.Cart");
    assert_eq!(cart.declaring_syntax_references().len(), 2);
    assert_eq!(cart.declared_accessibility(), Accessibility::Public);
    let names: Vec<_> = cart.members().iter().map(|m| m.name()).collect();
    assert_eq!(names, ["Count", "Clear", ".ctor"]);

    let constructor = member(&cart, ".ctor");
    assert!(constructor.is_implicitly_declared());
    assert_eq!(constructor.method_kind(), Some(MethodKind::Constructor));
}

#[test]
fn test_namespaces_merge_and_nest() {
    let compilation = compile_files(&[
        ("a.cs", "namespace Acme.Core { public class A { } }"),
        ("b.cs", "namespace Acme { namespace Core { public class B { } } }"),
    ]);
    let a = type_named(&compilation, "Acme.Core.A");
    let b = type_named(&compilation, "Acme.Core.B");
    let namespace = a.containing_namespace().expect("namespace");
    assert_eq!(Some(namespace.clone()), b.containing_namespace());
    assert_eq!(namespace.name(), "Core");
    assert_eq!(namespace.declaring_syntax_references().len(), 2);
    assert!(namespace.containing_symbol().is_some_and(|outer| outer.name() == "Acme"));
}

#[test]
fn test_missing_partial_modifier_is_reported() {
    let compilation = compile("class A { } partial class A { }");
    let codes: Vec<_> = compilation.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(codes, [DiagnosticCode::ConflictingPartialDeclaration]);
    assert_eq!(
        compilation.diagnostics()[0].file_path.as_deref(),
        Some("test.cs")
    );
}

#[test]
fn test_duplicate_type_is_reported() {
    let compilation = compile("class A { } class A { }");
    let codes: Vec<_> = compilation.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(codes, [DiagnosticCode::DuplicateDefinition]);
}

#[test]
fn test_generic_arity_distinguishes_types() {
    let compilation = compile_ok(
        "namespace Outer.Inner { public class Box { } public class Box<T> { public class Lid { } } }",
    );
    let plain = type_named(&compilation, "Outer.Inner.Box");
    let generic = type_named(&compilation, "Outer.Inner.Box`1");
    assert_ne!(plain, generic);
    assert_eq!(generic.arity(), 1);
    assert_eq!(generic.metadata_name(), "Box`1");

    let lid = type_named(&compilation, "Outer.Inner.Box`1+Lid");
    assert_eq!(lid.containing_type(), Some(generic));
    assert_eq!(lid.containing_namespace().map(|ns| ns.name()), Some("Inner".into()));
}

#[test]
fn test_implicit_constructors() {
    let compilation = compile_ok(
        r#"
        public abstract class Shape { }
        public struct Point { public Point(int x) { } }
        public static class Util { }
        public class Explicit { private Explicit(string name) { } }
        "#,
    );
    let shape_ctor = member(&type_named(&compilation, "Shape"), ".ctor");
    assert!(shape_ctor.is_implicitly_declared());
    assert_eq!(shape_ctor.declared_accessibility(), Accessibility::Protected);

    let point = type_named(&compilation, "Point");
    let constructors = point.get_members(".ctor");
    assert_eq!(constructors.len(), 2);
    assert_eq!(constructors[0].parameters().len(), 1);
    assert!(constructors[1].is_implicitly_declared());

    assert!(type_named(&compilation, "Util").get_members(".ctor").is_empty());
    let explicit = type_named(&compilation, "Explicit").get_members(".ctor");
    assert_eq!(explicit.len(), 1);
    assert_eq!(explicit[0].declared_accessibility(), Accessibility::Private);
}

#[test]
fn test_record_positional_members() {
    let compilation = compile_ok(
        r#"
        public record Person(string Name, int Age) { public int Age { get; } }
        public record struct Point(int X);
        "#,
    );
    let person = type_named(&compilation, "Person");
    assert!(person.is_record());
    assert_eq!(person.type_kind(), Some(TypeKind::Class));

    let name = member(&person, "Name");
    assert_eq!(name.kind(), SymbolKind::Property);
    assert!(name.has_getter() && name.has_setter() && name.is_init_only());
    assert_eq!(person.get_members("Age").len(), 1);
    assert!(!member(&person, "Age").has_setter());

    let primary = member(&person, ".ctor");
    let parameters: Vec<_> = primary.parameters().iter().map(|p| p.name()).collect();
    assert_eq!(parameters, ["Name", "Age"]);

    let point = type_named(&compilation, "Point");
    assert_eq!(point.type_kind(), Some(TypeKind::Struct));
    let x = member(&point, "X");
    assert!(x.has_setter() && !x.is_init_only());
}

#[test]
fn test_delegate_signature() {
    let compilation = compile_ok("public delegate string Formatter(int value);");
    let formatter = type_named(&compilation, "Formatter");
    assert_eq!(formatter.type_kind(), Some(TypeKind::Delegate));
    assert!(formatter.is_sealed());
    assert_eq!(
        formatter.return_type().and_then(|t| t.special_type()),
        Some(SpecialType::String)
    );
    let parameters = formatter.parameters();
    assert_eq!(parameters.len(), 1);
    assert_eq!(parameters[0].name(), "value");
    assert_eq!(parameters[0].ty().and_then(|t| t.special_type()), Some(SpecialType::Int32));

    let invoke = member(&formatter, "Invoke");
    assert!(invoke.is_implicitly_declared());
    assert_eq!(invoke.method_kind(), Some(MethodKind::DelegateInvoke));
    assert_eq!(
        formatter.base_type().and_then(|b| b.special_type()),
        Some(SpecialType::MulticastDelegate)
    );
}

#[test]
fn test_interface_members_are_abstract_and_public() {
    let compilation = compile_ok("public interface IShape { double Area(); string Name { get; } }");
    let shape = type_named(&compilation, "IShape");
    for member in shape.members() {
        assert!(member.is_abstract(), "{member:?}");
        assert_eq!(member.declared_accessibility(), Accessibility::Public);
    }
    assert!(shape.get_members(".ctor").is_empty());
}

#[test]
fn test_default_base_types() {
    let compilation = compile_ok(
        "public class A { } public struct S { } public enum E { X } public interface I { }",
    );
    let base = |name: &str| type_named(&compilation, name).base_type().and_then(|b| b.special_type());
    assert_eq!(base("A"), Some(SpecialType::Object));
    assert_eq!(base("S"), Some(SpecialType::ValueType));
    assert_eq!(base("E"), Some(SpecialType::Enum));
    assert_eq!(base("I"), None);
    assert!(type_named(&compilation, "S").is_value_type());
    assert!(type_named(&compilation, "A").is_reference_type());
    assert!(compilation
        .special_type(SpecialType::Object)
        .is_some_and(|object| object.base_type().is_none()));
}

#[test]
fn test_declared_symbol_from_syntax() {
    let compilation = compile_ok("namespace N { public class A { public int X, Y; } }");
    let root = compilation.syntax_tree("test.cs").expect("tree");
    let class = root
        .descendants()
        .find(|node| node.kind() == prism_compiler_parser::SyntaxKind::CLASS_DECL)
        .expect("class");
    assert_eq!(compilation.declared_symbol(&class), Some(type_named(&compilation, "N.A")));

    let declarators: Vec<_> = root
        .descendants()
        .filter(|node| node.kind() == prism_compiler_parser::SyntaxKind::VARIABLE_DECLARATOR)
        .filter_map(|node| compilation.declared_symbol(&node))
        .map(|symbol| symbol.name())
        .collect();
    assert_eq!(declarators, ["X", "Y"]);

    let foreign = prism_compiler_parser::parse_text("namespace N { public class A { } }").syntax_node();
    assert_eq!(compilation.declared_symbol(&foreign), None);
}

#[test]
fn test_source_types_exclude_core_library() {
    let compilation = compile_ok("public class A { public class B { } } public enum C { }");
    let names: Vec<_> = compilation.source_types().iter().map(|t| t.name()).collect();
    assert_eq!(names, ["A", "B", "C"]);
    assert_eq!(compilation.syntax_trees().len(), 1);
}
