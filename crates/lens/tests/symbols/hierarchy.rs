//! Base types, interfaces, generics and task-like return types.

use super::*;

#[test]
fn test_interfaces_and_closure() {
    let compilation = shop();
    let service = valid_type(&compilation, "Shop.Orders.OrderService");

    assert_eq!(names(service.interfaces()), ["IOrderStore"]);
    assert_eq!(names(service.all_interfaces()), ["IOrderStore", "IDisposable"]);
    assert!(service.implements("IDisposable"));
    assert!(service.implements("System.IDisposable"));
    assert!(service.implements("global::System.IDisposable"));
    assert!(!service.implements("IEquatable"));
}

#[test]
fn test_all_interfaces_through_base_types() {
    let compilation = compile(
        "using System;
         public interface IA { }
         public interface IB : IA { }
         public class Base : IB, IDisposable { }
         public class Derived : Base, IA { }",
    );
    let derived = valid_type(&compilation, "Derived");
    let all = names(derived.all_interfaces());
    assert_eq!(all, ["IA", "IB", "IDisposable"]);
    assert!(derived.implements("IB"));
}

#[test]
fn test_base_type_chain() {
    let compilation = compile(
        "public class A { }
         public class B : A { }
         public class C : B { }",
    );
    let c = valid_type(&compilation, "C");
    assert_eq!(names(c.base_types()), ["B", "A", "Object"]);
    assert!(c.inherits_from("A"));
    assert!(c.inherits_from("System.Object"));
    assert!(!c.inherits_from("C"));
    assert!(c.base_type().filter(|base| base.name() == "B").has_value());

    let object = valid_type(&compilation, "System.Object");
    assert!(object.base_type().is_empty());
    assert_eq!(object.base_types().count(), 0);
}

#[test]
fn test_keyword_aliased_types_match_declared_paths() {
    let compilation = compile(
        "namespace N {
             public class Outer { public class Inner { } }
             public struct Id { }
         }",
    );
    let int = valid_type(&compilation, "System.Int32");
    assert_eq!(int.fully_qualified_name(), "int");
    assert_eq!(int.declared_path(), "System.Int32");
    assert!(int.has_name("int"));
    assert!(int.has_name("System.Int32"));
    assert!(int.has_name("global::System.Int32"));
    assert!(!int.has_name("System.Int64"));

    let string = valid_type(&compilation, "System.String");
    assert!(string.has_name("System.String"));
    assert!(valid_type(&compilation, "N.Id").inherits_from("System.ValueType"));

    let inner = valid_type(&compilation, "N.Outer+Inner");
    assert_eq!(inner.declared_path(), "N.Outer.Inner");
    assert!(inner.has_name("N.Outer.Inner"));
}

#[test]
fn test_containing_type() {
    let compilation = shop();
    let service = valid_type(&compilation, "Shop.Orders.OrderService");
    let count = valid_member(&service, "Count");
    assert_eq!(count.containing_type().validate(), Some(service.clone()));
    assert!(service.containing_type().is_empty());
    assert!(service
        .containing_symbol()
        .filter(ValidSymbol::is_namespace)
        .has_value());
}

#[test]
fn test_type_arguments_by_position() {
    let compilation = shop();
    let service = valid_type(&compilation, "Shop.Orders.OrderService");
    let wrapper = valid_member(&service, "Count").value_type().validate().unwrap();

    assert_eq!(wrapper.display_name(), "Wrapper<int>");
    assert_eq!(wrapper.arity(), 1);
    assert!(wrapper.get_type_argument(0).has_value());
    assert!(wrapper.get_type_argument(1).is_empty());
    assert_eq!(names(wrapper.type_arguments()), ["Int32"]);
    assert!(wrapper.single_type_argument().has_value());
    assert_eq!(
        wrapper.first_type_argument().map(|argument| argument.display_name()).or_null(),
        Some("int".to_string())
    );
    assert_eq!(names(wrapper.original_definition().type_parameters()), ["T"]);
}

#[test]
fn test_method_type_parameters() {
    let compilation = compile(
        "public class Mapper
         {
             public TOut Map<TIn, TOut>(TIn value) { return default; }
         }",
    );
    let map = valid_member(&valid_type(&compilation, "Mapper"), "Map");
    assert!(map.is_generic());
    assert_eq!(names(map.type_parameters()), ["TIn", "TOut"]);
    assert!(map.single_type_argument().is_empty());
}

#[test]
fn test_task_like_return_types() {
    let compilation = shop();
    let service = valid_type(&compilation, "Shop.Orders.OrderService");

    let load = valid_member(&service, "LoadAsync").return_type().validate().unwrap();
    assert!(load.is_generic_task());
    assert!(load.is_task_like());
    assert!(!load.is_task());
    assert_eq!(
        load.task_result_type().map(|result| result.name()).or_null(),
        Some("Order".into())
    );

    let flush = valid_member(&service, "FlushAsync").return_type().validate().unwrap();
    assert!(flush.is_task());
    assert!(flush.task_result_type().is_empty());

    let dispose = valid_member(&service, "Dispose").return_type();
    assert!(!dispose.map(|ty| ty.is_task_like()).or_default(false));
}

#[test]
fn test_user_type_named_task_is_not_task_like() {
    let compilation = compile(
        "namespace Jobs { public class Task { } public class Runner { public Task Run() { return null; } } }",
    );
    let run = valid_member(&valid_type(&compilation, "Jobs.Runner"), "Run");
    let ret = run.return_type().validate().unwrap();
    assert_eq!(ret.fully_qualified_name(), "Jobs.Task");
    assert!(!ret.is_task_like());
}
