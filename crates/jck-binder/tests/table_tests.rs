use super::*;
use jck_ast::{AstBuilder, Modifiers};

#[test]
fn test_lookup_creates_a_single_continuation() {
    let mut table = SymbolTable::new();
    assert!(table.find("a.B").is_none());
    let first = table.lookup("a.B");
    let second = table.lookup("a.B");
    assert_eq!(first, second);
    assert_eq!(table.len(), 1);
    assert!(table.is_continuation(first));
    assert!(!table.is_known(first), "no unit declares a.B yet");
    assert!(table.entry(first).is_none());
    assert_eq!(table.name_of(first), "a.B");
}

#[test]
fn test_declare_attaches_site_to_existing_continuation() {
    let b = AstBuilder::new();
    let unit = b.unit(
        "B.java",
        Some("a"),
        vec![],
        vec![b.class(
            Modifiers::PUBLIC,
            "B",
            None,
            vec![b.nested(b.interface(Modifiers::empty(), "N", &[], vec![]))],
        )],
    );
    let mut table = SymbolTable::new();
    let early = table.lookup("a.B");
    let duplicates = table.declare_unit(&unit);
    assert!(duplicates.is_empty());

    assert!(table.is_known(early));
    assert!(table.is_continuation(early), "declaring does not build the entry");
    let nested = table.find("a.B.N").expect("nested type declared");
    assert_eq!(table.enclosing_of(nested), Some(early));
    assert_eq!(table.top_level_of(nested), early);
    assert!(table.modifiers_of(nested).is_static(), "member interfaces are static");
    assert_eq!(table.package_of_class(nested), "a");

    let again = table.declare_unit(&unit);
    assert_eq!(again.len(), 1);
    assert_eq!(again[0].1, "a.B");
}

#[test]
fn test_java_lang_bootstrap() {
    let table = SymbolTable::with_java_lang();
    let object = table.find("java.lang.Object").expect("Object");
    let entry = table.entry(object).expect("Object is resolved");
    assert!(entry.is_library);
    let ctors: Vec<_> = entry.constructors().collect();
    assert_eq!(ctors.len(), 1);
    assert!(ctors[0].1.params.is_empty());
    assert_eq!(entry.methods_named("toString").count(), 1);

    let string = table.find("java.lang.String").expect("String");
    assert!(table.modifiers_of(string).is_final());

    let runtime = table.find("java.lang.RuntimeException").expect("RuntimeException");
    let chain: Vec<&str> = table
        .superclass_chain(runtime)
        .into_iter()
        .map(|id| table.name_of(id))
        .collect();
    assert_eq!(
        chain,
        vec!["java.lang.Exception", "java.lang.Throwable", "java.lang.Object"]
    );
    assert!(table.is_subclass_of(runtime, object));
    assert!(table.has_package("java"));
    assert!(table.has_package("java.lang"));
    assert!(!table.has_package("jav"));
}

#[test]
fn test_boxing_names() {
    assert_eq!(crate::library::boxed_name("int"), Some("java.lang.Integer"));
    assert_eq!(crate::library::unboxed_name("Character"), Some("char"));
    assert_eq!(crate::library::unboxed_name("String"), None);
}
