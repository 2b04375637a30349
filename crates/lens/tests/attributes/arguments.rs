//! Reading constructor and named arguments as typed values.

use std::str::FromStr;

use num_derive::FromPrimitive;
use prism_common::EquatableArray;

use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
enum Level {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl FromStr for Level {
    type Err = ();

    fn from_str(name: &str) -> Result<Self, ()> {
        match name {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            _ => Err(()),
        }
    }
}

#[test]
fn test_named_and_positional_arguments() {
    let compilation = shop();
    let config = config(&compilation);

    assert_eq!(config.named_arg::<i32>("Timeout"), 30);
    assert_eq!(config.named_arg::<i64>("Timeout"), 30);
    assert_eq!(config.named_arg::<i32>("Retries").or_default(3), 3);
    assert!(config.named_arg::<String>("Timeout").is_empty());

    assert_eq!(config.constructor_arg::<String>(0), "orders".to_string());
    assert!(config.constructor_arg::<i32>(0).is_empty());
    assert!(config.constructor_arg::<String>(5).is_empty());
}

#[test]
fn test_array_arguments() {
    let compilation = shop();
    let config = config(&compilation);

    assert_eq!(
        config.named_arg::<Vec<String>>("Tags"),
        vec!["fast".to_string(), "eu".to_string()]
    );
    let tags = config.named_arg::<EquatableArray<String>>("Tags").or_null().unwrap();
    assert_eq!(tags, EquatableArray::from(vec!["fast".to_string(), "eu".to_string()]));
    assert!(config.named_arg::<Vec<i32>>("Tags").is_empty());
}

#[test]
fn test_enum_arguments() {
    let compilation = shop();
    let config = config(&compilation);

    // The omitted `level` parameter takes its default, `Level.Medium`.
    assert_eq!(config.constructor_arg::<i32>(1).to_enum::<Level>(), Level::Medium);
    assert_eq!(OptionalArgument::with_value(2).to_enum::<Level>(), Level::High);
    assert!(OptionalArgument::with_value(99).to_enum::<Level>().is_empty());
    assert_eq!(
        OptionalArgument::with_value("Low".to_string()).to_enum::<Level>(),
        Level::Low
    );
    assert!(OptionalArgument::<i32>::empty().to_enum::<Level>().is_empty());
}

#[test]
fn test_guard_style_extraction() {
    let compilation = shop();
    let config = config(&compilation);

    let mut timeout = None;
    assert!(config.named_arg::<i32>("Timeout").try_get_value(&mut timeout));
    assert_eq!(timeout, Some(30));

    let mut retries = Some(1);
    assert!(config.named_arg::<i32>("Retries").is_missing(&mut retries));
    assert_eq!(retries, None);

    let described = config.named_arg::<i32>("Timeout").match_value(
        |seconds| format!("{seconds}s"),
        || "default".to_string(),
    );
    assert_eq!(described, "30s");
}

#[test]
fn test_type_arguments_read_as_symbols() {
    let compilation = compile(
        "using System;
         public class KindAttribute : Attribute {
             public KindAttribute(Type target) { }
         }
         [Kind(typeof(string))] public class C { }
         [Kind(null)] public class D { }",
    );
    let target = valid_type(&compilation, "C")
        .get_attribute("Kind")
        .constructor_arg::<ValidSymbol>(0);
    assert_eq!(
        target.map(|symbol| symbol.display_name()).or_null(),
        Some("string".to_string())
    );
    assert!(valid_type(&compilation, "D")
        .get_attribute("Kind")
        .constructor_arg::<ValidSymbol>(0)
        .is_empty());
}
