use crate::test_support::{check, codes};
use jck_ast::{AstBuilder, CompilationUnit, Member, Modifiers, TypeDecl};
use jck_common::diagnostics::diagnostic_codes;

fn units(b: &AstBuilder, types: Vec<TypeDecl>) -> Vec<CompilationUnit> {
    vec![b.unit("Overrides.java", None, vec![], types)]
}

fn returning(b: &AstBuilder, modifiers: Modifiers, ty: &str, name: &str) -> Member {
    b.method(modifiers, ty, name, vec![], Some(vec![b.return_(Some(b.int(1)))]))
}

fn void_method(b: &AstBuilder, modifiers: Modifiers, name: &str) -> Member {
    b.method(modifiers, "void", name, vec![], Some(vec![]))
}

#[test]
fn test_concrete_return_type_mismatch() {
    let b = AstBuilder::new();
    let base = b.class(Modifiers::empty(), "A", None, vec![returning(&b, Modifiers::empty(), "int", "m")]);
    let sub = b.class(Modifiers::empty(), "B", Some("A"), vec![returning(&b, Modifiers::empty(), "long", "m")]);
    let units = units(&b, vec![base, sub]);
    let (_, diagnostics) = check(&units);

    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::OVERRIDE_RETURN_TYPE]);
    let message = &diagnostics.as_slice()[0].message_text;
    assert!(message.starts_with("m() in B cannot override m() in A"), "{message}");
}

#[test]
fn test_abstract_return_type_mismatch() {
    let b = AstBuilder::new();
    let base = b.class(
        Modifiers::ABSTRACT,
        "A",
        None,
        vec![b.method(Modifiers::ABSTRACT, "int", "m", vec![], None)],
    );
    let sub = b.class(
        Modifiers::ABSTRACT,
        "B",
        Some("A"),
        vec![b.method(Modifiers::ABSTRACT, "long", "m", vec![], None)],
    );
    let units = units(&b, vec![base, sub]);
    let (_, diagnostics) = check(&units);

    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::OVERRIDE_RETURN_TYPE]);
}

#[test]
fn test_interface_method_mismatch() {
    let b = AstBuilder::new();
    let iface = b.interface(
        Modifiers::empty(),
        "I",
        &[],
        vec![b.method(Modifiers::empty(), "int", "m", vec![], None)],
    );
    let class = b.implementing(
        b.class(
            Modifiers::empty(),
            "C",
            None,
            vec![returning(&b, Modifiers::PUBLIC, "long", "m")],
        ),
        &["I"],
    );
    let units = units(&b, vec![iface, class]);
    let (_, diagnostics) = check(&units);

    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::OVERRIDE_RETURN_TYPE]);
}

#[test]
fn test_weaker_access_final_and_static_overrides() {
    let b = AstBuilder::new();
    let base = b.class(
        Modifiers::empty(),
        "A",
        None,
        vec![
            void_method(&b, Modifiers::PUBLIC, "open"),
            void_method(&b, Modifiers::FINAL, "fixed"),
            void_method(&b, Modifiers::STATIC, "shared"),
        ],
    );
    let sub = b.class(
        Modifiers::empty(),
        "B",
        Some("A"),
        vec![
            void_method(&b, Modifiers::empty(), "open"),
            void_method(&b, Modifiers::empty(), "fixed"),
            void_method(&b, Modifiers::empty(), "shared"),
        ],
    );
    let units = units(&b, vec![base, sub]);
    let (_, diagnostics) = check(&units);

    assert_eq!(
        codes(&diagnostics),
        vec![
            diagnostic_codes::OVERRIDE_WEAKER_ACCESS,
            diagnostic_codes::OVERRIDE_FINAL,
            diagnostic_codes::OVERRIDE_STATIC_MISMATCH,
        ]
    );
    let messages: Vec<&str> = diagnostics.iter().map(|d| d.message_text.as_str()).collect();
    assert!(messages[0].ends_with("was public"), "{}", messages[0]);
    assert!(messages[2].ends_with("overridden method is static"), "{}", messages[2]);
}

#[test]
fn test_private_and_overloaded_methods_are_not_overrides() {
    let b = AstBuilder::new();
    let base = b.class(
        Modifiers::empty(),
        "A",
        None,
        vec![
            returning(&b, Modifiers::PRIVATE, "int", "hidden"),
            returning(&b, Modifiers::empty(), "int", "over"),
        ],
    );
    let sub = b.class(
        Modifiers::empty(),
        "B",
        Some("A"),
        vec![
            returning(&b, Modifiers::empty(), "long", "hidden"),
            b.method(
                Modifiers::empty(),
                "long",
                "over",
                vec![b.param("int", "x")],
                Some(vec![b.return_(Some(b.name("x")))]),
            ),
        ],
    );
    let units = units(&b, vec![base, sub]);
    let (_, diagnostics) = check(&units);

    assert!(diagnostics.is_empty(), "{:?}", diagnostics.as_slice());
}

#[test]
fn test_matching_override_with_qualified_return_type() {
    let b = AstBuilder::new();
    let base = b.class(
        Modifiers::empty(),
        "A",
        None,
        vec![b.method(
            Modifiers::PUBLIC,
            "String",
            "name",
            vec![],
            Some(vec![b.return_(Some(b.str_("a")))]),
        )],
    );
    let sub = b.class(
        Modifiers::empty(),
        "B",
        Some("A"),
        vec![b.method(
            Modifiers::PUBLIC,
            "java.lang.String",
            "name",
            vec![],
            Some(vec![b.return_(Some(b.str_("b")))]),
        )],
    );
    let units = units(&b, vec![base, sub]);
    let (_, diagnostics) = check(&units);

    assert!(diagnostics.is_empty(), "{:?}", diagnostics.as_slice());
}
