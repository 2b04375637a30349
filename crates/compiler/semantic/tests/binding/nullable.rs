//! Nullable annotations under each nullable context.

use prism_compiler_semantic::{
    CompilationOptions, DisplayFormat, NullableAnnotation, NullableContext, SpecialType,
};

use super::*;

const SOURCE: &str = "public class A { public int? Count; public string? Name; public string Title; }";

#[test]
fn test_nullable_value_type_is_constructed_nullable() {
    let compilation = compile_ok(SOURCE);
    let count = member(&type_named(&compilation, "A"), "Count").ty().expect("type");
    assert_eq!(
        count.original_definition().special_type(),
        Some(SpecialType::Nullable)
    );
    assert!(count.is_value_type());
    assert_eq!(count.to_display_string(DisplayFormat::Minimal), "int?");
}

#[test]
fn test_nullable_reference_type_is_annotated() {
    let compilation = compile_ok(SOURCE);
    let a = type_named(&compilation, "A");
    let name = member(&a, "Name").ty().expect("type");
    let title = member(&a, "Title").ty().expect("type");

    assert_eq!(name.nullable_annotation(), NullableAnnotation::Annotated);
    assert_eq!(title.nullable_annotation(), NullableAnnotation::NotAnnotated);
    assert_eq!(name.to_display_string(DisplayFormat::Minimal), "string?");
    assert_eq!(title.to_display_string(DisplayFormat::Minimal), "string");
    // Annotations do not take part in identity.
    assert_eq!(name, title);
}

#[test]
fn test_disabled_context_has_no_annotations() {
    let compilation = compile_with(
        &[("test.cs", SOURCE)],
        CompilationOptions::default().with_nullable(NullableContext::Disable),
    );
    let title = member(&type_named(&compilation, "A"), "Title").ty().expect("type");
    assert_eq!(title.nullable_annotation(), NullableAnnotation::None);
}
