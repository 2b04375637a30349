//! Type reference resolution: usings, aliases, nesting, generics and errors.

use prism_compiler_diagnostics::DiagnosticCode;
use prism_compiler_semantic::{CompilationOptions, DisplayFormat, SpecialType};

use super::*;

#[test]
fn test_using_directive_brings_namespace_into_scope() {
    let compilation = compile_files(&[
        ("models.cs", "namespace Acme.Models { public class Order { } }"),
        (
            "service.cs",
            r#"
            using Acme.Models;
            using Ord = Acme.Models.Order;

            namespace App
            {
                public class Service
                {
                    public Order Current { get; set; }
                    public Ord Last;
                }
            }
            "#,
        ),
    ]);
    assert!(compilation.diagnostics().is_empty(), "{:?}", compilation.diagnostics());

    let order = type_named(&compilation, "Acme.Models.Order");
    let service = type_named(&compilation, "App.Service");
    assert_eq!(member(&service, "Current").ty(), Some(order.clone()));
    assert_eq!(member(&service, "Last").ty(), Some(order));
}

#[test]
fn test_enclosing_namespaces_are_searched_outward() {
    let compilation = compile_ok(
        r#"
        namespace Acme { public class Shared { } }
        namespace Acme.Feature { public class Uses { public Shared Value; } }
        "#,
    );
    let uses = type_named(&compilation, "Acme.Feature.Uses");
    assert_eq!(
        member(&uses, "Value").ty(),
        Some(type_named(&compilation, "Acme.Shared"))
    );
}

#[test]
fn test_nested_types_are_found_through_base_types() {
    let compilation = compile_ok(
        r#"
        public class Base { public class Inner { } }
        public class Derived : Base { public Inner Value; }
        "#,
    );
    let derived = type_named(&compilation, "Derived");
    assert_eq!(derived.base_type(), Some(type_named(&compilation, "Base")));
    assert_eq!(
        member(&derived, "Value").ty(),
        Some(type_named(&compilation, "Base+Inner"))
    );
}

#[test]
fn test_type_arguments_are_substituted_through_bases() {
    let compilation = compile_ok(
        r#"
        namespace G
        {
            public interface IRepo<T> { }
            public class Repo<T> : IRepo<T> { }
            public class Orders : Repo<string> { }
        }
        "#,
    );
    let orders = type_named(&compilation, "G.Orders");
    let base = orders.base_type().expect("base type");
    assert_eq!(base.to_display_string(DisplayFormat::Minimal), "Repo<string>");
    assert_eq!(base.original_definition(), type_named(&compilation, "G.Repo`1"));
    assert_eq!(
        base.type_arguments().first().and_then(|t| t.special_type()),
        Some(SpecialType::String)
    );

    let interfaces = base.interfaces();
    assert_eq!(interfaces.len(), 1);
    assert_eq!(interfaces[0].to_display_string(DisplayFormat::Minimal), "IRepo<string>");
    assert!(orders.interfaces().is_empty());
}

#[test]
fn test_construct_matches_written_type() {
    let compilation = compile_ok(
        r#"
        public class Wrapper<T> { }
        public class Holder { public Wrapper<int> Value; }
        "#,
    );
    let wrapper = type_named(&compilation, "Wrapper`1");
    let int = compilation.special_type(SpecialType::Int32).expect("int");
    let constructed = wrapper.construct(&[int.clone()]).expect("arity matches");
    let holder = type_named(&compilation, "Holder");
    assert_eq!(member(&holder, "Value").ty(), Some(constructed.clone()));
    assert_eq!(constructed.type_arguments(), [int.clone()]);
    assert!(wrapper.construct(&[int.clone(), int]).is_none());
    assert_eq!(wrapper.type_arguments(), wrapper.type_parameters());
}

#[test]
fn test_method_type_parameters_are_in_scope() {
    let compilation = compile_ok("public class C { public T Pick<T>(T[] items) { return default; } }");
    let pick = member(&type_named(&compilation, "C"), "Pick");
    let t = pick.type_parameters().pop().expect("type parameter");
    assert_eq!(pick.return_type(), Some(t.clone()));
    let items = pick.parameters()[0].ty().expect("parameter type");
    assert_eq!(items.element_type(), Some(t));
    assert_eq!(items.array_rank(), Some(1));
}

#[test]
fn test_task_types_come_from_core_library() {
    let compilation = compile_ok(
        r#"
        using System.Threading.Tasks;
        public class Worker { public async Task<int> RunAsync() { return 1; } }
        "#,
    );
    let run = member(&type_named(&compilation, "Worker"), "RunAsync");
    assert!(run.is_async());
    let returned = run.return_type().expect("return type");
    assert_eq!(
        returned.original_definition(),
        type_named(&compilation, "System.Threading.Tasks.Task`1")
    );
    assert_eq!(
        returned.base_type().map(|b| b.to_display_string(DisplayFormat::Qualified)),
        Some("System.Threading.Tasks.Task".to_string())
    );
}

#[test]
fn test_unresolved_type_becomes_error_symbol() {
    let source = "public class A { public Missing Field; }";
    let compilation = compile(source);
    let field = member(&type_named(&compilation, "A"), "Field");
    let ty = field.ty().expect("type");
    assert!(ty.is_error());
    assert_eq!(ty.name(), "Missing");

    let codes: Vec<_> = compilation.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(codes, [DiagnosticCode::UnresolvedType]);
    assert!(format_diagnostics(source, &compilation).contains("Missing"));
}

#[test]
fn test_unresolved_using_is_reported_once() {
    let compilation = compile("using Nowhere; public class A { } public class B { }");
    let codes: Vec<_> = compilation.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(codes, [DiagnosticCode::UnresolvedType]);
}

#[test]
fn test_predefined_types_need_the_core_library() {
    let compilation = compile_with(
        &[("test.cs", "public class A { public int Count; }")],
        CompilationOptions::default().without_core_library(),
    );
    assert!(compilation.special_type(SpecialType::Int32).is_none());
    let count = member(&type_named(&compilation, "A"), "Count");
    assert!(count.ty().is_some_and(|t| t.is_error()));
    assert_eq!(compilation.diagnostics().len(), 1);
}
