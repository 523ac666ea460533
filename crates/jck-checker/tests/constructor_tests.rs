use crate::test_support::{check, codes};
use jck_ast::{AstBuilder, BinaryOp, CompilationUnit, Modifiers, TypeDecl};
use jck_binder::{Binder, SymbolTable};
use jck_common::Diagnostics;
use jck_common::diagnostics::diagnostic_codes;

use crate::context::CheckerOptions;
use crate::oracle::DeclaredTypeOracle;
use crate::state::CheckerState;

fn unit(b: &AstBuilder, types: Vec<TypeDecl>) -> Vec<CompilationUnit> {
    vec![b.unit("C.java", None, vec![], types)]
}

fn field_has_value(table: &SymbolTable<'_>, class: &str, field: &str) -> bool {
    let id = table.find(class).expect("class");
    let entry = table.entry(id).expect("resolved");
    entry.field(field).expect("field").1.has_value
}

#[test]
fn test_unassigned_final_in_empty_constructor() {
    let b = AstBuilder::new();
    let decl = b.class(
        Modifiers::PUBLIC,
        "Jimes",
        None,
        vec![
            b.field(Modifiers::FINAL, "int", "i", None),
            b.constructor(Modifiers::PUBLIC, "Jimes", vec![], vec![]),
        ],
    );
    let units = unit(&b, vec![decl]);
    let (_, diagnostics) = check(&units);

    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::FINAL_FIELD_NOT_INITIALIZED]);
    assert_eq!(
        diagnostics.as_slice()[0].message_text,
        "The final field i has not been initialized in constructor Jimes()"
    );
}

#[test]
fn test_assigned_final_has_value_after_checking() {
    let b = AstBuilder::new();
    let decl = b.class(
        Modifiers::PUBLIC,
        "Jimes",
        None,
        vec![
            b.field(Modifiers::FINAL, "int", "i", None),
            b.constructor(Modifiers::PUBLIC, "Jimes", vec![], vec![b.assign("i", b.int(1))]),
        ],
    );
    let units = unit(&b, vec![decl]);
    let (table, diagnostics) = check(&units);

    assert!(diagnostics.is_empty(), "{:?}", diagnostics.as_slice());
    assert!(field_has_value(&table, "Jimes", "i"));
}

#[test]
fn test_assignment_after_delegation_is_rejected_once() {
    let b = AstBuilder::new();
    let second = b.assign_expr(b.name("j"), b.int(45));
    let anchor = second.id();
    let decl = b.class(
        Modifiers::empty(),
        "C",
        None,
        vec![
            b.field(Modifiers::FINAL, "int", "j", None),
            b.constructor(
                Modifiers::empty(),
                "C",
                vec![b.param("int", "x")],
                vec![b.assign("j", b.name("x"))],
            ),
            b.constructor(
                Modifiers::empty(),
                "C",
                vec![b.param("boolean", "b")],
                vec![b.this_call(vec![b.int(1)]), b.expr_stmt(second)],
            ),
        ],
    );
    let units = unit(&b, vec![decl]);
    let (table, diagnostics) = check(&units);

    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::CANNOT_ASSIGN_FINAL]);
    let diag = &diagnostics.as_slice()[0];
    assert_eq!(diag.anchor, anchor);
    assert_eq!(
        diag.message_text,
        "cannot assign a value to j because it is immutable and has already been given a value"
    );
    assert!(field_has_value(&table, "C", "j"));
}

#[test]
fn test_self_delegation_reports_only_the_assignment() {
    let b = AstBuilder::new();
    let assign = b.assign_expr(b.name("j"), b.int(45));
    let anchor = assign.id();
    let decl = b.class(
        Modifiers::empty(),
        "C",
        None,
        vec![
            b.field(Modifiers::FINAL, "int", "j", None),
            b.constructor(
                Modifiers::empty(),
                "C",
                vec![],
                vec![b.this_call(vec![]), b.expr_stmt(assign)],
            ),
        ],
    );
    let units = unit(&b, vec![decl]);
    let (_, diagnostics) = check(&units);

    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::CANNOT_ASSIGN_FINAL]);
    let diag = &diagnostics.as_slice()[0];
    assert_eq!(diag.anchor, anchor);
    assert_eq!(
        diag.message_text,
        "cannot assign a value to j because it is immutable and has already been given a value"
    );
}

#[test]
fn test_assignment_in_skippable_branch_is_not_definite() {
    let b = AstBuilder::new();
    let decl = b.class(
        Modifiers::empty(),
        "C",
        None,
        vec![
            b.field(Modifiers::FINAL, "int", "f", None),
            b.constructor(
                Modifiers::empty(),
                "C",
                vec![b.param("boolean", "c")],
                vec![
                    b.if_(b.name("c"), vec![b.assign("f", b.int(1))], None),
                    b.local(Modifiers::empty(), "int", "y", Some(b.name("f"))),
                ],
            ),
        ],
    );
    let units = unit(&b, vec![decl]);
    let (table, diagnostics) = check(&units);

    assert_eq!(
        codes(&diagnostics),
        vec![
            diagnostic_codes::MAY_NOT_HAVE_VALUE,
            diagnostic_codes::FINAL_FIELD_NOT_INITIALIZED,
        ]
    );
    assert!(!field_has_value(&table, "C", "f"));
}

#[test]
fn test_branch_ending_in_return_does_not_leak_its_state() {
    let b = AstBuilder::new();
    let decl = b.class(
        Modifiers::empty(),
        "C",
        None,
        vec![
            b.field(Modifiers::FINAL, "int", "f", None),
            b.constructor(
                Modifiers::empty(),
                "C",
                vec![b.param("boolean", "c")],
                vec![
                    b.if_(
                        b.name("c"),
                        vec![b.assign("f", b.int(1)), b.return_(None)],
                        None,
                    ),
                    b.assign("f", b.int(2)),
                ],
            ),
        ],
    );
    let units = unit(&b, vec![decl]);
    let (_, diagnostics) = check(&units);

    assert!(diagnostics.is_empty(), "{:?}", diagnostics.as_slice());
}

#[test]
fn test_second_assignment_reported_without_changing_state() {
    let b = AstBuilder::new();
    let second = b.assign_expr(b.field_access(b.this(), "f"), b.int(2));
    let anchor = second.id();
    let decl = b.class(
        Modifiers::empty(),
        "C",
        None,
        vec![
            b.field(Modifiers::FINAL, "int", "f", None),
            b.constructor(
                Modifiers::empty(),
                "C",
                vec![],
                vec![b.assign_this("f", b.int(1)), b.expr_stmt(second)],
            ),
        ],
    );
    let units = unit(&b, vec![decl]);
    let (table, diagnostics) = check(&units);

    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::CANNOT_ASSIGN_FINAL]);
    assert_eq!(diagnostics.as_slice()[0].anchor, anchor);
    assert!(field_has_value(&table, "C", "f"));
}

#[test]
fn test_delegation_target_checked_first() {
    let b = AstBuilder::new();
    let decl = b.class(
        Modifiers::empty(),
        "C",
        None,
        vec![
            b.field(Modifiers::FINAL, "int", "f", None),
            b.constructor(Modifiers::empty(), "C", vec![], vec![b.this_call(vec![b.int(1)])]),
            b.constructor(
                Modifiers::empty(),
                "C",
                vec![b.param("int", "x")],
                vec![b.assign("f", b.name("x"))],
            ),
        ],
    );
    let units = unit(&b, vec![decl]);
    let (table, diagnostics) = check(&units);

    assert!(diagnostics.is_empty(), "{:?}", diagnostics.as_slice());
    assert!(field_has_value(&table, "C", "f"));
}

#[test]
fn test_rollback_between_sibling_constructors() {
    let b = AstBuilder::new();
    let decl = b.class(
        Modifiers::empty(),
        "C",
        None,
        vec![
            b.field(Modifiers::FINAL, "int", "f", None),
            b.constructor(
                Modifiers::empty(),
                "C",
                vec![b.param("int", "x")],
                vec![b.assign("f", b.name("x"))],
            ),
            b.constructor(Modifiers::empty(), "C", vec![], vec![]),
        ],
    );
    let units = unit(&b, vec![decl]);
    let (table, diagnostics) = check(&units);

    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::FINAL_FIELD_NOT_INITIALIZED]);
    assert_eq!(
        diagnostics.as_slice()[0].message_text,
        "The final field f has not been initialized in constructor C()"
    );
    assert!(!field_has_value(&table, "C", "f"));
    let id = table.find("C").expect("class");
    assert_eq!(table.entry(id).expect("entry").pending_constructor_count, 0);
}

#[test]
fn test_recursive_delegation_reported() {
    let b = AstBuilder::new();
    let decl = b.class(
        Modifiers::empty(),
        "C",
        None,
        vec![
            b.field(Modifiers::FINAL, "int", "f", None),
            b.constructor(Modifiers::empty(), "C", vec![], vec![b.this_call(vec![b.int(1)])]),
            b.constructor(
                Modifiers::empty(),
                "C",
                vec![b.param("int", "x")],
                vec![b.this_call(vec![])],
            ),
        ],
    );
    let units = unit(&b, vec![decl]);
    let (_, diagnostics) = check(&units);

    assert_eq!(
        codes(&diagnostics),
        vec![diagnostic_codes::RECURSIVE_CONSTRUCTOR_INVOCATION]
    );
}

#[test]
fn test_initializers_seed_constructors() {
    let b = AstBuilder::new();
    let decl = b.class(
        Modifiers::empty(),
        "C",
        None,
        vec![
            b.field(Modifiers::FINAL, "int", "f", Some(b.int(1))),
            b.field(Modifiers::FINAL, "int", "g", None),
            b.initializer(false, vec![b.assign("g", b.int(2))]),
            b.constructor(Modifiers::empty(), "C", vec![], vec![]),
        ],
    );
    let units = unit(&b, vec![decl]);
    let (table, diagnostics) = check(&units);

    assert!(diagnostics.is_empty(), "{:?}", diagnostics.as_slice());
    assert!(field_has_value(&table, "C", "g"));
}

#[test]
fn test_default_constructor_reports_at_field() {
    let b = AstBuilder::new();
    let field = b.field(Modifiers::FINAL, "int", "f", None);
    let anchor = field.id();
    let decl = b.class(Modifiers::empty(), "D", None, vec![field]);
    let units = unit(&b, vec![decl]);
    let (_, diagnostics) = check(&units);

    assert_eq!(
        codes(&diagnostics),
        vec![diagnostic_codes::FINAL_FIELD_NOT_INITIALIZED_DEFAULT_CONSTRUCTOR]
    );
    assert_eq!(diagnostics.as_slice()[0].anchor, anchor);
    assert!(diagnostics.as_slice()[0].message_text.ends_with("default constructor of D"));
}

#[test]
fn test_initializer_reads_blank_final() {
    let b = AstBuilder::new();
    let decl = b.class(
        Modifiers::empty(),
        "C",
        None,
        vec![
            b.field(Modifiers::FINAL, "int", "a", None),
            b.field(Modifiers::FINAL, "int", "b", Some(b.name("a"))),
        ],
    );
    let units = unit(&b, vec![decl]);
    let (_, diagnostics) = check(&units);

    assert_eq!(
        codes(&diagnostics),
        vec![
            diagnostic_codes::MAY_NOT_HAVE_VALUE,
            diagnostic_codes::FINAL_FIELD_NOT_INITIALIZED_DEFAULT_CONSTRUCTOR,
        ]
    );
}

#[test]
fn test_missing_no_arg_super_constructor() {
    let b = AstBuilder::new();
    let base = b.class(
        Modifiers::empty(),
        "A",
        None,
        vec![b.constructor(Modifiers::empty(), "A", vec![b.param("int", "x")], vec![])],
    );
    let explicit = b.class(
        Modifiers::empty(),
        "B",
        Some("A"),
        vec![b.constructor(Modifiers::empty(), "B", vec![], vec![])],
    );
    let implicit = b.class(Modifiers::empty(), "D", Some("A"), vec![]);
    let with_call = b.class(
        Modifiers::empty(),
        "E",
        Some("A"),
        vec![b.constructor(
            Modifiers::empty(),
            "E",
            vec![],
            vec![b.super_call(vec![b.int(3)])],
        )],
    );
    let units = unit(&b, vec![base, explicit, implicit, with_call]);
    let (_, diagnostics) = check(&units);

    assert_eq!(
        codes(&diagnostics),
        vec![
            diagnostic_codes::NO_DEFAULT_SUPER_CONSTRUCTOR,
            diagnostic_codes::NO_DEFAULT_SUPER_CONSTRUCTOR,
        ]
    );
    assert_eq!(
        diagnostics.as_slice()[0].message_text,
        "no no-argument constructor available in superclass A"
    );
}

#[test]
fn test_super_call_without_suitable_constructor() {
    let b = AstBuilder::new();
    let base = b.class(
        Modifiers::empty(),
        "A",
        None,
        vec![b.constructor(Modifiers::empty(), "A", vec![b.param("int", "x")], vec![])],
    );
    let sub = b.class(
        Modifiers::empty(),
        "B",
        Some("A"),
        vec![b.constructor(
            Modifiers::empty(),
            "B",
            vec![],
            vec![b.super_call(vec![b.str_("s")])],
        )],
    );
    let units = unit(&b, vec![base, sub]);
    let (_, diagnostics) = check(&units);

    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::NO_SUITABLE_CONSTRUCTOR]);
    assert_eq!(
        diagnostics.as_slice()[0].message_text,
        "no suitable constructor found for A(String)"
    );
}

#[test]
fn test_final_field_written_from_method() {
    let b = AstBuilder::new();
    let decl = b.class(
        Modifiers::empty(),
        "C",
        None,
        vec![
            b.field(Modifiers::FINAL, "int", "f", Some(b.int(1))),
            b.field(Modifiers::empty(), "int", "n", None),
            b.method(
                Modifiers::empty(),
                "void",
                "m",
                vec![],
                Some(vec![
                    b.assign("f", b.int(2)),
                    b.expr_stmt(b.compound_assign(BinaryOp::Add, b.name("n"), b.int(1))),
                ]),
            ),
        ],
    );
    let units = unit(&b, vec![decl]);
    let (_, diagnostics) = check(&units);

    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::CANNOT_ASSIGN_FINAL]);
}

#[test]
fn test_return_value_in_constructor() {
    let b = AstBuilder::new();
    let decl = b.class(
        Modifiers::empty(),
        "C",
        None,
        vec![b.constructor(
            Modifiers::empty(),
            "C",
            vec![],
            vec![b.return_(Some(b.int(1)))],
        )],
    );
    let units = unit(&b, vec![decl]);
    let (_, diagnostics) = check(&units);

    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::RETURN_VALUE_IN_CONSTRUCTOR]);
}

#[test]
fn test_constructor_call_must_come_first() {
    let b = AstBuilder::new();
    let decl = b.class(
        Modifiers::empty(),
        "C",
        None,
        vec![b.constructor(
            Modifiers::empty(),
            "C",
            vec![],
            vec![
                b.local(Modifiers::empty(), "int", "a", Some(b.int(1))),
                b.super_call(vec![]),
            ],
        )],
    );
    let units = unit(&b, vec![decl]);
    let (_, diagnostics) = check(&units);

    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::CONSTRUCTOR_CALL_NOT_FIRST]);
    assert_eq!(
        diagnostics.as_slice()[0].message_text,
        "call to super must be first statement in constructor"
    );
}

#[test]
fn test_qualified_and_simple_parameter_types_pair() {
    let b = AstBuilder::new();
    let decl = b.class(
        Modifiers::empty(),
        "C",
        None,
        vec![
            b.constructor(Modifiers::empty(), "C", vec![b.param("String", "s")], vec![]),
            b.constructor(
                Modifiers::empty(),
                "C",
                vec![b.param("java.lang.Integer", "i")],
                vec![],
            ),
        ],
    );
    let units = unit(&b, vec![decl]);
    let (table, diagnostics) = check(&units);

    assert!(!diagnostics.has_internal_errors());
    assert!(diagnostics.is_empty(), "{:?}", diagnostics.as_slice());
    let id = table.find("C").expect("class");
    let types: Vec<Vec<&str>> = table
        .entry(id)
        .expect("entry")
        .constructors()
        .map(|(_, c)| c.param_types())
        .collect();
    assert_eq!(types, vec![vec!["java.lang.String"], vec!["java.lang.Integer"]]);
}

#[test]
fn test_unpaired_declaration_is_an_internal_error() {
    let b = AstBuilder::new();
    let bound = b.class(
        Modifiers::empty(),
        "C",
        None,
        vec![b.method(
            Modifiers::empty(),
            "void",
            "m",
            vec![b.param("int", "a")],
            Some(vec![]),
        )],
    );
    // Same declaration node, but the body now declares a different parameter type.
    let mut drifted = bound.clone();
    if let jck_ast::Member::Method(method) = &mut drifted.members[0] {
        method.params[0].ty = b.ty("long");
    }
    let bound_units = unit(&b, vec![bound]);
    let checked_units = unit(&b, vec![drifted]);

    let mut table = SymbolTable::with_java_lang();
    let mut diagnostics = Diagnostics::new("");
    let options = CheckerOptions::default();
    Binder::new(&mut table, &mut diagnostics, options.language_level).bind_all(&bound_units);
    let oracle = DeclaredTypeOracle;
    let mut checker = CheckerState::new(&mut table, &mut diagnostics, &options, &oracle);
    checker.check_unit(&checked_units[0]);

    assert_eq!(
        codes(&diagnostics),
        vec![diagnostic_codes::INTERNAL_UNMATCHED_DECLARATION]
    );
    assert!(diagnostics.has_internal_errors());
    assert!(diagnostics.as_slice()[0].message_text.contains("m(long)"));
}
