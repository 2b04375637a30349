use prism_compiler_diagnostics::DiagnosticCode;
use prism_compiler_semantic::{ConstantValue, SpecialType, TypedConstantKind};

use super::*;

const CONFIG: &str = r#"
using System;

namespace Acme
{
    public enum Level { Low, Medium, High }

    [AttributeUsage(AttributeTargets.Class | AttributeTargets.Field, AllowMultiple = true)]
    public sealed class ConfigAttribute : Attribute
    {
        public ConfigAttribute(string name, Level level = Level.Medium) { }
        public int Timeout { get; set; }
        public int Retries;
        public Type Target { get; set; }
        public string[] Tags { get; set; }
    }

    [Config("a", Timeout = 30)]
    public class A { }

    [Config("b", Level.High, Target = typeof(A), Tags = new[] { "x", "y" })]
    public class B { }
}
"#;

#[test]
fn test_optional_constructor_argument_takes_default() {
    let compilation = compile_ok(CONFIG);
    let a = type_named(&compilation, "Acme.A");
    let attributes = a.attributes();
    assert_eq!(attributes.len(), 1);

    let config = &attributes[0];
    assert_eq!(config.attribute_class().name(), "ConfigAttribute");
    assert_eq!(config.constructor().map(|c| c.parameters().len()), Some(2));

    let args = config.constructor_args();
    assert_eq!(args[0].as_str(), Some("a"));
    assert_eq!(args[1].kind, TypedConstantKind::Enum);
    assert_eq!(args[1].value, ConstantValue::I32(1));
    assert_eq!(config.named_arg("Timeout").map(|c| &c.value), Some(&ConstantValue::I32(30)));
    assert!(config.named_arg("Retries").is_none());
}

#[test]
fn test_type_and_array_arguments() {
    let compilation = compile_ok(CONFIG);
    let b = type_named(&compilation, "Acme.B");
    let config = &b.attributes()[0];

    assert_eq!(config.constructor_args()[1].value, ConstantValue::I32(2));

    let target = config.named_arg("Target").expect("Target is set");
    assert_eq!(target.kind, TypedConstantKind::Type);
    assert_eq!(config.type_value(target), Some(type_named(&compilation, "Acme.A")));

    let tags = config.named_arg("Tags").expect("Tags is set");
    assert_eq!(tags.kind, TypedConstantKind::Array);
    let values: Vec<_> = tags
        .values()
        .unwrap_or_default()
        .iter()
        .filter_map(|value| value.as_str())
        .collect();
    assert_eq!(values, ["x", "y"]);
    let element = config.constant_type(tags).and_then(|ty| ty.element_type());
    assert_eq!(element.and_then(|ty| ty.special_type()), Some(SpecialType::String));
}

#[test]
fn test_enum_flags_in_attribute_usage() {
    let compilation = compile_ok(CONFIG);
    let config = type_named(&compilation, "Acme.ConfigAttribute");
    let usage = &config.attributes()[0];
    assert_eq!(usage.attribute_class().name(), "AttributeUsageAttribute");
    // Class (4) | Field (256)
    assert_eq!(usage.constructor_args()[0].value, ConstantValue::I32(260));
    assert_eq!(
        usage.named_arg("AllowMultiple").map(|c| &c.value),
        Some(&ConstantValue::Bool(true))
    );
}

#[test]
fn test_core_attribute_with_two_arguments() {
    let compilation = compile_ok("[System.Obsolete(\"old\", true)] public class Legacy { }");
    let legacy = type_named(&compilation, "Legacy");
    let obsolete = &legacy.attributes()[0];
    assert_eq!(
        obsolete.attribute_class().to_string(),
        "System.ObsoleteAttribute"
    );
    let args = obsolete.constructor_args();
    assert_eq!(args.len(), 2);
    assert_eq!(args[0].as_str(), Some("old"));
    assert_eq!(args[1].value, ConstantValue::Bool(true));
}

#[test]
fn test_unresolved_attribute_is_an_error_class() {
    let compilation = compile("[Missing(1)] public class C { }");
    let c = type_named(&compilation, "C");
    let attribute = &c.attributes()[0];
    assert!(attribute.attribute_class().is_error());
    assert!(attribute.constructor().is_none());
    assert_eq!(attribute.constructor_args()[0].value, ConstantValue::I32(1));

    let codes: Vec<_> = compilation.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(codes, [DiagnosticCode::UnresolvedAttribute]);
}

#[test]
fn test_mismatched_argument_is_reported() {
    let source = format!("{CONFIG}\n[Acme.Config(42)] public class D {{ }}");
    let compilation = compile(&source);
    let d = type_named(&compilation, "D");
    let config = &d.attributes()[0];
    assert!(config.constructor_args()[0].is_error());

    let codes: Vec<_> = compilation.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(codes, [DiagnosticCode::InvalidAttributeArgument]);
}

#[test]
fn test_unknown_named_argument_is_dropped() {
    let compilation = compile("[System.Obsolete(Message = \"gone\")] public class C { }");
    let c = type_named(&compilation, "C");
    assert!(c.attributes()[0].named_args().is_empty());

    let codes: Vec<_> = compilation.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(codes, [DiagnosticCode::InvalidAttributeArgument]);
}
