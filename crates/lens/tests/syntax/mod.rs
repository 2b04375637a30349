//! Declaring syntax, structural equality and modifier edits.

use prism_compiler_parser::ast::{ClassDecl, MethodDecl, TypeDecl, VariableDeclarator};
use prism_compiler_parser::SyntaxKind::{PARTIAL_KW, PUBLIC_KW, SEALED_KW};

use super::*;

fn cart_class(compilation: &Compilation) -> ValidSyntax<TypeDecl> {
    valid_type(compilation, "Cart")
        .declaring_syntax::<TypeDecl>()
        .validate()
        .unwrap()
}

#[test]
fn test_partial_after_edit() {
    init_tracing();
    let mut project = TestProject::new(&[("cart.cs", "public class Cart { }")]);

    let before = project.compilation();
    assert!(!valid_type(&before, "Cart").is_partial());

    project.edit("cart.cs", "public partial class Cart { }").unwrap();
    let after = project.compilation();
    assert!(valid_type(&after, "Cart").is_partial());
    assert_ne!(cart_class(&before), cart_class(&after));
}

#[test]
fn test_add_modifier_to_declaration() {
    let compilation = compile("public class Cart { }");
    let class = cart_class(&compilation);
    assert_eq!(class.modifiers(), vec![PUBLIC_KW]);

    let edited = class.add_modifier(PARTIAL_KW);
    assert_eq!(edited.text(), "public partial class Cart { }");
    assert!(edited.has_modifier(PARTIAL_KW));
    assert!(!class.has_modifier(PARTIAL_KW));

    // The edited copy is detached from the compilation.
    assert!(edited.to_symbol(&compilation).is_empty());
    assert!(class.to_symbol(&compilation).has_value());
}

#[test]
fn test_structural_equality_across_compilations() {
    let first = compile("public class Cart { }");
    let second = compile("public   class Cart\n{\n}");

    assert_eq!(cart_class(&first), cart_class(&second));
    assert_ne!(valid_type(&first, "Cart"), valid_type(&second, "Cart"));

    let sealed = cart_class(&first).add_modifier(SEALED_KW);
    assert_ne!(sealed, cart_class(&second));
    assert_eq!(sealed.remove_modifier(SEALED_KW), cart_class(&second));

    // Nodes of another tree declare nothing in this compilation.
    assert!(cart_class(&second).to_symbol(&first).is_empty());
}

#[test]
fn test_navigation_back_to_symbols() {
    let compilation = shop();
    let service = valid_type(&compilation, "Shop.Orders.OrderService");
    let count = valid_member(&service, "Count");

    let declarator = count
        .declaring_syntax::<VariableDeclarator>()
        .validate()
        .unwrap();
    assert_eq!(declarator.to_symbol(&compilation).validate(), Some(count));

    let owner = declarator.ancestor::<TypeDecl>();
    assert!(owner.clone().of_type::<ClassDecl>().has_value());
    assert_eq!(
        owner.validate().unwrap().to_symbol(&compilation).validate(),
        Some(service.clone())
    );

    let methods: Vec<_> = service
        .declaring_syntax::<TypeDecl>()
        .validate()
        .unwrap()
        .descendants::<MethodDecl>()
        .map(|method| {
            method
                .to_symbol(&compilation)
                .map(|symbol| symbol.name().to_string())
                .or_default(String::new())
        })
        .collect();
    assert_eq!(methods, ["LoadAsync", "FlushAsync", "Dispose"]);
}

#[test]
fn test_missing_declaring_syntax() {
    let compilation = shop();
    let service = valid_type(&compilation, "Shop.Orders.OrderService");
    let constructor = valid_member(&service, ".ctor");

    assert!(constructor.declaring_syntax::<TypeDecl>().is_empty());
    assert!(constructor.declaring_syntaxes::<MethodDecl>().is_empty());
    assert!(service.declaring_syntax::<MethodDecl>().is_empty());
    assert!(OptionalSyntax::<TypeDecl>::empty()
        .ancestor::<TypeDecl>()
        .is_empty());
}

#[test]
fn test_declaration_location() {
    let compilation = compile("namespace N\n{\n    public class Cart { }\n}");
    let class = valid_type(&compilation, "N.Cart")
        .declaring_syntax::<TypeDecl>()
        .validate()
        .unwrap();
    assert_eq!(class.location("cart.cs").to_string(), "cart.cs:3:5");
}
