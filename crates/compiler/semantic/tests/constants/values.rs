//! Enum member values and `const` field initializers.

use prism_compiler_diagnostics::DiagnosticCode;
use prism_compiler_semantic::{ConstantValue, SpecialType, TypedConstant, TypedConstantKind};

use super::*;

fn constant(symbol: &prism_compiler_semantic::Symbol, name: &str) -> TypedConstant {
    member(symbol, name)
        .constant_value()
        .cloned()
        .unwrap_or_else(|| panic!("{name} has no constant value"))
}

#[test]
fn test_enum_members_count_up_from_zero() {
    let compilation = compile_ok("public enum Level { Low, Medium, High }");
    let level = type_named(&compilation, "Level");
    assert_eq!(
        level.enum_underlying_type().and_then(|t| t.special_type()),
        Some(SpecialType::Int32)
    );

    let high = constant(&level, "High");
    assert_eq!(high.kind, TypedConstantKind::Enum);
    assert_eq!(high.value, ConstantValue::I32(2));
    assert_eq!(high.ty.map(|ty| compilation.symbol(ty)), Some(level.clone()));
    assert_eq!(constant(&level, "Low").value, ConstantValue::I32(0));
    assert!(member(&level, "Medium").is_const() && member(&level, "Medium").is_static());
}

#[test]
fn test_explicit_and_combined_enum_values() {
    let compilation = compile_ok(
        "public enum Access : byte { None = 0, Read = 1, Write = 2, ReadWrite = Read | Write, Next }",
    );
    let access = type_named(&compilation, "Access");
    assert_eq!(
        access.enum_underlying_type().and_then(|t| t.special_type()),
        Some(SpecialType::Byte)
    );
    assert_eq!(constant(&access, "ReadWrite").value, ConstantValue::I32(3));
    assert_eq!(constant(&access, "Next").value, ConstantValue::I32(4));
}

#[test]
fn test_const_fields_fold_expressions() {
    let compilation = compile_ok(
        r#"
        public class Limits
        {
            public const int Max = 10;
            public const int Min = -Max;
            public const string Name = "lim" + "its";
            public const long Big = 3000000000;
            public const double Ratio = 0.5;
            public const char Separator = ',';
        }
        "#,
    );
    let limits = type_named(&compilation, "Limits");
    assert_eq!(constant(&limits, "Min").value, ConstantValue::I32(-10));
    assert_eq!(constant(&limits, "Name").as_str(), Some("limits"));
    assert_eq!(constant(&limits, "Big").value, ConstantValue::I64(3_000_000_000));
    assert_eq!(constant(&limits, "Ratio").value, ConstantValue::F64(0.5));
    assert_eq!(constant(&limits, "Separator").value, ConstantValue::Char(','));
    assert!(member(&limits, "Max").is_static());
}

#[test]
fn test_constants_referenced_across_types() {
    let compilation = compile_ok(
        r#"
        namespace Config
        {
            public static class Defaults { public const int Timeout = 30; }
            public class Client { public const int Timeout = Defaults.Timeout + 5; }
        }
        "#,
    );
    let client = type_named(&compilation, "Config.Client");
    assert_eq!(constant(&client, "Timeout").value, ConstantValue::I32(35));
}

#[test]
fn test_cyclic_constants_are_errors() {
    let compilation = compile("public class C { public const int A = B; public const int B = A; }");
    let c = type_named(&compilation, "C");
    assert!(constant(&c, "A").is_error());
    assert!(constant(&c, "B").is_error());
}

#[test]
fn test_out_of_range_enum_value_is_reported() {
    let compilation = compile("public enum Small : byte { Big = 300 }");
    let small = type_named(&compilation, "Small");
    assert!(constant(&small, "Big").is_error());
    let codes: Vec<_> = compilation.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(codes, [DiagnosticCode::InvalidConstant]);
}

#[test]
fn test_unknown_name_in_initializer_is_reported() {
    let compilation = compile("public class C { public const int Count = Missing; }");
    let c = type_named(&compilation, "C");
    assert!(constant(&c, "Count").is_error());
    let codes: Vec<_> = compilation.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(codes, [DiagnosticCode::InvalidConstant]);
}
