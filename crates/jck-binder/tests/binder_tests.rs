use crate::options::LanguageLevel;
use crate::state::Binder;
use crate::symbols::ClassEntry;
use crate::table::SymbolTable;
use jck_ast::{AstBuilder, CompilationUnit, Modifiers};
use jck_common::Diagnostics;
use jck_common::diagnostics::diagnostic_codes;

fn bind<'a>(units: &'a [CompilationUnit], level: LanguageLevel) -> (SymbolTable<'a>, Diagnostics) {
    let mut table = SymbolTable::with_java_lang();
    let mut diagnostics = Diagnostics::new("");
    Binder::new(&mut table, &mut diagnostics, level).bind_all(units);
    (table, diagnostics)
}

fn class<'t>(table: &'t SymbolTable<'_>, name: &str) -> &'t ClassEntry {
    let id = table.find(name).expect("class should be known");
    table.entry(id).expect("class should be resolved")
}

#[test]
fn test_class_fields_methods_and_default_constructor() {
    let b = AstBuilder::new();
    let decl = b.class(
        Modifiers::PUBLIC,
        "A",
        None,
        vec![
            b.field(Modifiers::empty(), "int", "x", None),
            b.field(Modifiers::FINAL, "int", "y", None),
            b.field(Modifiers::FINAL, "String", "s", Some(b.str_("s"))),
            b.method(
                Modifiers::empty(),
                "void",
                "m",
                vec![b.param("int", "a")],
                Some(vec![]),
            ),
        ],
    );
    let units = vec![b.unit("A.java", Some("p"), vec![], vec![decl])];
    let (table, diags) = bind(&units, LanguageLevel::Java8);
    assert!(diags.is_empty(), "Expected no diagnostics, got: {:?}", diags.as_slice());

    let a = class(&table, "p.A");
    assert_eq!(a.fields.len(), 3);
    assert!(a.fields[0].has_value, "non-final fields carry a default value");
    assert!(!a.fields[1].has_value, "blank final has no value yet");
    assert!(a.fields[2].has_value && a.fields[2].has_initializer);
    assert_eq!(a.fields[2].ty, "java.lang.String");
    assert_eq!(a.superclass, table.find("java.lang.Object"));

    let ctors: Vec<_> = a.constructors().collect();
    assert_eq!(ctors.len(), 1);
    assert!(ctors[0].1.synthetic);
    assert_eq!(a.pending_constructor_count, 0);
    assert_eq!(a.methods_named("m").count(), 1);
}

#[test]
fn test_duplicate_field_in_ancestor_is_reported_and_still_inserted() {
    let b = AstBuilder::new();
    let parent = b.class(
        Modifiers::empty(),
        "A",
        None,
        vec![b.field(Modifiers::empty(), "int", "x", None)],
    );
    let child = b.class(
        Modifiers::empty(),
        "B",
        Some("A"),
        vec![b.field(Modifiers::empty(), "int", "x", None)],
    );
    let units = vec![b.unit("A.java", None, vec![], vec![parent, child])];
    let (table, diags) = bind(&units, LanguageLevel::Java8);

    assert_eq!(diags.count_code(diagnostic_codes::DUPLICATE_FIELD), 1);
    assert!(diags.as_slice()[0].message_text.contains("duplicate field x"));
    assert_eq!(class(&table, "B").fields.len(), 1);
}

#[test]
fn test_duplicate_field_in_same_class_keeps_both() {
    let b = AstBuilder::new();
    let decl = b.class(
        Modifiers::empty(),
        "A",
        None,
        vec![
            b.field(Modifiers::empty(), "int", "x", None),
            b.field(Modifiers::FINAL, "String", "x", None),
        ],
    );
    let units = vec![b.unit("A.java", None, vec![], vec![decl])];
    let (table, diags) = bind(&units, LanguageLevel::Java8);

    assert_eq!(diags.len(), 1, "{:?}", diags.as_slice());
    assert_eq!(diags.count_code(diagnostic_codes::DUPLICATE_FIELD), 1);
    let a = class(&table, "A");
    assert_eq!(a.fields.len(), 2);
    assert_eq!(a.fields[1].ty, "java.lang.String");
}

#[test]
fn test_duplicate_signature_is_rejected() {
    let b = AstBuilder::new();
    let first = b.method(
        Modifiers::empty(),
        "void",
        "m",
        vec![b.param("String", "s")],
        Some(vec![]),
    );
    let second = b.method(
        Modifiers::empty(),
        "void",
        "m",
        vec![b.param("java.lang.String", "t")],
        Some(vec![]),
    );
    let second_id = second.id();
    let decl = b.class(Modifiers::empty(), "A", None, vec![first, second]);
    let units = vec![b.unit("A.java", None, vec![], vec![decl])];
    let (table, diags) = bind(&units, LanguageLevel::Java8);

    assert_eq!(diags.count_code(diagnostic_codes::DUPLICATE_METHOD), 1);
    assert_eq!(
        diags.as_slice()[0].message_text,
        "method m(String) is already defined in A"
    );
    assert!(table.is_rejected(second_id));
    assert_eq!(class(&table, "A").methods_named("m").count(), 1);
}

#[test]
fn test_method_named_as_class_and_duplicate_parameter() {
    let b = AstBuilder::new();
    let decl = b.class(
        Modifiers::empty(),
        "A",
        None,
        vec![
            b.method(Modifiers::empty(), "void", "A", vec![], Some(vec![])),
            b.method(
                Modifiers::empty(),
                "void",
                "m",
                vec![b.param("int", "a"), b.param("long", "a")],
                Some(vec![]),
            ),
        ],
    );
    let units = vec![b.unit("A.java", None, vec![], vec![decl])];
    let (table, diags) = bind(&units, LanguageLevel::Java8);

    assert_eq!(diags.count_code(diagnostic_codes::METHOD_NAMED_AS_CLASS), 1);
    assert_eq!(diags.count_code(diagnostic_codes::DUPLICATE_PARAMETER), 1);
    let a = class(&table, "A");
    assert_eq!(a.methods_named("A").count(), 0);
    assert_eq!(a.methods_named("m").count(), 1);
}

#[test]
fn test_cyclic_inheritance_is_reported_once_and_terminates() {
    let b = AstBuilder::new();
    let a = b.class(Modifiers::empty(), "A", Some("B"), vec![]);
    let bb = b.class(Modifiers::empty(), "B", Some("A"), vec![]);
    let units = vec![b.unit("A.java", None, vec![], vec![a, bb])];
    let (table, diags) = bind(&units, LanguageLevel::Java8);

    assert_eq!(
        diags.count_code(diagnostic_codes::CYCLIC_INHERITANCE),
        1,
        "got: {:?}",
        diags.as_slice()
    );
    let a_id = table.find("A").expect("A");
    let b_id = table.find("B").expect("B");
    assert!(table.ancestors(a_id).len() <= 2);
    assert!(table.ancestors(b_id).len() <= 2);
}

#[test]
fn test_forward_reference_across_units() {
    let b = AstBuilder::new();
    let child = b.class(Modifiers::PUBLIC, "B", Some("A"), vec![]);
    let parent = b.class(
        Modifiers::PUBLIC,
        "A",
        None,
        vec![b.field(Modifiers::PROTECTED, "int", "x", None)],
    );
    let units = vec![
        b.unit("B.java", Some("p"), vec![], vec![child]),
        b.unit("A.java", Some("p"), vec![], vec![parent]),
    ];
    let (table, diags) = bind(&units, LanguageLevel::Java8);
    assert!(diags.is_empty(), "got: {:?}", diags.as_slice());

    let b_entry = class(&table, "p.B");
    let a_id = table.find("p.A").expect("A");
    assert_eq!(b_entry.superclass, Some(a_id));
    assert_eq!(b_entry.super_vars(&table).len(), 1);
}

#[test]
fn test_resolution_is_idempotent() {
    let b = AstBuilder::new();
    let decl = b.class(
        Modifiers::empty(),
        "A",
        None,
        vec![b.field(Modifiers::empty(), "Missing", "m", None)],
    );
    let units = vec![b.unit("A.java", None, vec![], vec![decl])];
    let mut table = SymbolTable::with_java_lang();
    let mut diags = Diagnostics::new("");
    let mut binder = Binder::new(&mut table, &mut diags, LanguageLevel::Java8);
    binder.bind_all(&units);
    let id = binder.table.find("A").expect("A");
    assert_eq!(binder.resolve(id), id);
    binder.bind_unit(&units[0]);
    assert_eq!(binder.resolve(id), id);

    assert_eq!(table.entry(id).map(|e| e.fields.len()), Some(1));
    assert_eq!(diags.count_code(diagnostic_codes::CANNOT_FIND_SYMBOL_CLASS), 1);
    assert_eq!(class(&table, "A").fields[0].ty, "Missing");
}

#[test]
fn test_unknown_name_stays_a_continuation() {
    let mut table = SymbolTable::with_java_lang();
    let mut diags = Diagnostics::new("");
    let id = table.lookup("q.Nowhere");
    let mut binder = Binder::new(&mut table, &mut diags, LanguageLevel::Java8);
    assert_eq!(binder.resolve(id), id);
    assert!(table.is_continuation(id));
    assert!(table.entry(id).is_none());
}

#[test]
fn test_interface_members_java8() {
    let b = AstBuilder::new();
    let decl = b.interface(
        Modifiers::PUBLIC,
        "I",
        &[],
        vec![
            b.field(Modifiers::empty(), "int", "K", None),
            b.method(Modifiers::empty(), "void", "m", vec![], None),
            b.method(Modifiers::DEFAULT, "void", "d", vec![], Some(vec![])),
            b.method(Modifiers::empty(), "void", "bad", vec![], Some(vec![])),
        ],
    );
    let units = vec![b.unit("I.java", None, vec![], vec![decl])];
    let (table, diags) = bind(&units, LanguageLevel::Java8);

    assert_eq!(diags.count_code(diagnostic_codes::STATIC_FINAL_NOT_INITIALIZED), 1);
    assert_eq!(diags.count_code(diagnostic_codes::INTERFACE_METHOD_BODY_NOT_ALLOWED), 1);
    let i = class(&table, "I");
    let k = &i.fields[0];
    assert!(k.is_static() && k.is_final());
    let (_, m) = i.methods_named("m").next().expect("m");
    assert!(m.is_abstract());
    assert_eq!(m.visibility(), jck_ast::Visibility::Public);
    assert_eq!(i.constructors().count(), 0, "interfaces get no constructor");
}

#[test]
fn test_interface_method_body_rejected_at_java7() {
    let b = AstBuilder::new();
    let decl = b.interface(
        Modifiers::empty(),
        "I",
        &[],
        vec![b.method(Modifiers::DEFAULT, "void", "d", vec![], Some(vec![]))],
    );
    let units = vec![b.unit("I.java", None, vec![], vec![decl])];
    let (_, diags) = bind(&units, LanguageLevel::Java7);
    assert_eq!(diags.count_code(diagnostic_codes::INTERFACE_METHOD_BODY_NOT_ALLOWED), 1);
    assert!(diags.as_slice()[0].message_text.contains("java7"));
}

#[test]
fn test_method_body_rules_for_classes() {
    let b = AstBuilder::new();
    let decl = b.class(
        Modifiers::ABSTRACT,
        "A",
        None,
        vec![
            b.method(Modifiers::ABSTRACT, "void", "a", vec![], Some(vec![])),
            b.method(Modifiers::empty(), "void", "c", vec![], None),
            b.method(Modifiers::NATIVE, "void", "n", vec![], None),
        ],
    );
    let units = vec![b.unit("A.java", None, vec![], vec![decl])];
    let (_, diags) = bind(&units, LanguageLevel::Java8);
    assert_eq!(diags.count_code(diagnostic_codes::ABSTRACT_METHOD_WITH_BODY), 1);
    assert_eq!(diags.count_code(diagnostic_codes::MISSING_METHOD_BODY), 1);
    assert_eq!(diags.len(), 2);
}

#[test]
fn test_constructors_pending_count_and_delegation_flag() {
    let b = AstBuilder::new();
    let decl = b.class(
        Modifiers::empty(),
        "C",
        None,
        vec![
            b.constructor(Modifiers::empty(), "C", vec![b.param("int", "x")], vec![]),
            b.constructor(
                Modifiers::empty(),
                "C",
                vec![],
                vec![b.this_call(vec![b.int(1)])],
            ),
        ],
    );
    let units = vec![b.unit("C.java", None, vec![], vec![decl])];
    let (table, diags) = bind(&units, LanguageLevel::Java8);
    assert!(diags.is_empty(), "got: {:?}", diags.as_slice());

    let c = class(&table, "C");
    assert_eq!(c.pending_constructor_count, 2);
    let delegating: Vec<bool> = c.constructors().map(|(_, m)| m.delegates).collect();
    assert_eq!(delegating, vec![false, true]);
    assert!(c.constructors().all(|(_, m)| !m.synthetic));
}

#[test]
fn test_supertype_kind_rules() {
    let b = AstBuilder::new();
    let extends_final = b.class(Modifiers::empty(), "S", Some("String"), vec![]);
    let implements_class = b.implementing(
        b.class(Modifiers::empty(), "T", None, vec![]),
        &["Exception"],
    );
    let iface = b.interface(Modifiers::empty(), "I", &[], vec![]);
    let extends_iface = b.class(Modifiers::empty(), "U", Some("I"), vec![]);
    let units = vec![b.unit(
        "S.java",
        None,
        vec![],
        vec![extends_final, implements_class, iface, extends_iface],
    )];
    let (table, diags) = bind(&units, LanguageLevel::Java8);

    assert_eq!(diags.count_code(diagnostic_codes::CANNOT_INHERIT_FROM_FINAL), 1);
    assert_eq!(diags.count_code(diagnostic_codes::INTERFACE_EXPECTED), 1);
    assert_eq!(diags.count_code(diagnostic_codes::NO_INTERFACE_EXPECTED), 1);
    assert!(class(&table, "T").interfaces.is_empty());
    assert_eq!(class(&table, "U").superclass, None);
}

#[test]
fn test_duplicate_class_and_nested_types() {
    let b = AstBuilder::new();
    let outer = b.class(
        Modifiers::PUBLIC,
        "Outer",
        None,
        vec![b.nested(b.class(Modifiers::PRIVATE, "Inner", None, vec![]))],
    );
    let again = b.class(Modifiers::empty(), "Outer", None, vec![]);
    let units = vec![
        b.unit("Outer.java", Some("p"), vec![], vec![outer]),
        b.unit("Other.java", Some("p"), vec![], vec![again]),
    ];
    let (table, diags) = bind(&units, LanguageLevel::Java8);

    assert_eq!(diags.count_code(diagnostic_codes::DUPLICATE_CLASS), 1);
    assert_eq!(diags.as_slice()[0].file, "Other.java");
    let outer_entry = class(&table, "p.Outer");
    let inner_id = table.find("p.Outer.Inner").expect("inner");
    assert_eq!(outer_entry.nested.get("Inner"), Some(&inner_id));
    assert_eq!(class(&table, "p.Outer.Inner").enclosing, Some(outer_entry.id));
}
