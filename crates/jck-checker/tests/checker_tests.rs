use crate::test_support::{check, check_with, codes};
use crate::context::CheckerOptions;
use jck_ast::{AstBuilder, BinaryOp, CompilationUnit, Modifiers, TypeDecl};
use jck_binder::LanguageLevel;
use jck_common::diagnostics::diagnostic_codes;
use jck_common::limits::MAX_AST_DEPTH;

fn units(b: &AstBuilder, types: Vec<TypeDecl>) -> Vec<CompilationUnit> {
    vec![b.unit("Outer.java", None, vec![], types)]
}

#[test]
fn test_inner_class_sees_outer_fields() {
    let b = AstBuilder::new();
    let inner = b.class(
        Modifiers::empty(),
        "Inner",
        None,
        vec![b.method(
            Modifiers::empty(),
            "int",
            "read",
            vec![],
            Some(vec![b.return_(Some(b.name("count")))]),
        )],
    );
    let nested = b.class(
        Modifiers::STATIC,
        "Nested",
        None,
        vec![b.method(
            Modifiers::empty(),
            "int",
            "read",
            vec![],
            Some(vec![
                b.expr_stmt(b.name("LIMIT")),
                b.return_(Some(b.name("count"))),
            ]),
        )],
    );
    let outer = b.class(
        Modifiers::empty(),
        "Outer",
        None,
        vec![
            b.field(Modifiers::empty(), "int", "count", None),
            b.field(Modifiers::STATIC | Modifiers::FINAL, "int", "LIMIT", Some(b.int(3))),
            b.nested(inner),
            b.nested(nested),
        ],
    );
    let units = units(&b, vec![outer]);
    let (_, diagnostics) = check(&units);

    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::CANNOT_FIND_SYMBOL_VARIABLE]);
    assert_eq!(
        diagnostics.as_slice()[0].message_text,
        "cannot find symbol: variable count"
    );
}

#[test]
fn test_instance_field_from_static_method() {
    let b = AstBuilder::new();
    let decl = b.class(
        Modifiers::empty(),
        "Outer",
        None,
        vec![
            b.field(Modifiers::empty(), "int", "x", None),
            b.method(
                Modifiers::STATIC,
                "void",
                "m",
                vec![],
                Some(vec![b.assign("x", b.int(1)), b.expr_stmt(b.this())]),
            ),
        ],
    );
    let units = units(&b, vec![decl]);
    let (_, diagnostics) = check(&units);

    assert_eq!(
        codes(&diagnostics),
        vec![
            diagnostic_codes::NON_STATIC_FROM_STATIC,
            diagnostic_codes::NON_STATIC_FROM_STATIC,
        ]
    );
    assert_eq!(
        diagnostics.as_slice()[0].message_text,
        "non-static variable x cannot be referenced from a static context"
    );
}

#[test]
fn test_static_initializer_and_static_final_assignment() {
    let b = AstBuilder::new();
    let decl = b.class(
        Modifiers::empty(),
        "Outer",
        None,
        vec![
            b.field(Modifiers::STATIC, "int", "counter", None),
            b.field(Modifiers::STATIC | Modifiers::FINAL, "int", "LIMIT", Some(b.int(1))),
            b.initializer(
                true,
                vec![
                    b.assign("counter", b.name("LIMIT")),
                    b.assign("LIMIT", b.int(2)),
                ],
            ),
        ],
    );
    let units = units(&b, vec![decl]);
    let (_, diagnostics) = check(&units);

    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::CANNOT_ASSIGN_FINAL]);
}

#[test]
fn test_interface_default_method_body_is_checked() {
    let b = AstBuilder::new();
    let decl = b.interface(
        Modifiers::empty(),
        "Shape",
        &[],
        vec![
            b.field(Modifiers::empty(), "int", "SIDES", Some(b.int(4))),
            b.method(
                Modifiers::DEFAULT,
                "int",
                "sides",
                vec![],
                Some(vec![b.expr_stmt(b.name("missing"))]),
            ),
        ],
    );
    let units = units(&b, vec![decl]);
    let (_, diagnostics) = check(&units);

    assert_eq!(
        codes(&diagnostics),
        vec![
            diagnostic_codes::CANNOT_FIND_SYMBOL_VARIABLE,
            diagnostic_codes::MISSING_RETURN,
        ]
    );
}

#[test]
fn test_java7_rejects_interface_method_bodies() {
    let b = AstBuilder::new();
    let decl = b.interface(
        Modifiers::empty(),
        "Shape",
        &[],
        vec![b.method(
            Modifiers::DEFAULT,
            "void",
            "draw",
            vec![],
            Some(vec![]),
        )],
    );
    let units = units(&b, vec![decl]);
    let options = CheckerOptions {
        language_level: LanguageLevel::Java7,
        ..CheckerOptions::default()
    };
    let (_, diagnostics) = check_with(&units, &options);

    assert_eq!(
        codes(&diagnostics),
        vec![diagnostic_codes::INTERFACE_METHOD_BODY_NOT_ALLOWED]
    );
}

#[test]
fn test_unknown_local_type_reported_once() {
    let b = AstBuilder::new();
    let decl = b.class(
        Modifiers::empty(),
        "Outer",
        None,
        vec![b.method(
            Modifiers::empty(),
            "void",
            "m",
            vec![],
            Some(vec![b.local(Modifiers::empty(), "Widget", "w", Some(b.null()))]),
        )],
    );
    let units = units(&b, vec![decl]);
    let (_, diagnostics) = check(&units);

    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::CANNOT_FIND_SYMBOL_CLASS]);
}

#[test]
fn test_deep_expression_reports_nesting_once() {
    // Runs on its own thread: the walk is recursive up to the depth limit.
    let handle = std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(|| {
            let b = AstBuilder::new();
            let mut expr = b.int(0);
            for _ in 0..(MAX_AST_DEPTH + 16) {
                expr = b.binary(BinaryOp::Add, expr, b.int(1));
            }
            let decl = b.class(
                Modifiers::empty(),
                "Outer",
                None,
                vec![b.method(
                    Modifiers::empty(),
                    "void",
                    "m",
                    vec![],
                    Some(vec![b.expr_stmt(expr)]),
                )],
            );
            let units = units(&b, vec![decl]);
            let (_, diagnostics) = check(&units);
            codes(&diagnostics)
        })
        .expect("spawn checker thread");
    let codes = handle.join().expect("checker thread");

    assert_eq!(codes, vec![diagnostic_codes::NESTING_TOO_DEEP]);
}

#[test]
fn test_units_checked_after_all_are_bound() {
    let b = AstBuilder::new();
    let user = b.class(
        Modifiers::empty(),
        "User",
        None,
        vec![b.method(
            Modifiers::empty(),
            "void",
            "m",
            vec![],
            Some(vec![b.expr_stmt(b.new_("p.Later", vec![b.int(1)]))]),
        )],
    );
    let later = b.class(
        Modifiers::PUBLIC,
        "Later",
        None,
        vec![b.constructor(Modifiers::PUBLIC, "Later", vec![b.param("int", "x")], vec![])],
    );
    let units = vec![
        b.unit("User.java", None, vec![], vec![user]),
        b.unit("Later.java", Some("p"), vec![], vec![later]),
    ];
    let (_, diagnostics) = check(&units);

    assert!(diagnostics.is_empty(), "{:?}", diagnostics.as_slice());
}
