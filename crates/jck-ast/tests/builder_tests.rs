use super::*;

#[test]
fn test_builder_allocates_unique_ids() {
    let b = AstBuilder::new();
    let decl = b.class(
        Modifiers::PUBLIC,
        "A",
        None,
        vec![
            b.field(Modifiers::FINAL, "int", "i", None),
            b.constructor(Modifiers::PUBLIC, "A", vec![], vec![b.assign("i", b.int(1))]),
        ],
    );

    let mut ids = vec![decl.id];
    for member in &decl.members {
        ids.push(member.id());
    }
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
}

#[test]
fn test_type_ref_parses_array_dimensions() {
    let b = AstBuilder::new();
    let ty = b.ty("java.lang.String[][]");
    assert_eq!(ty.name, "java.lang.String");
    assert_eq!(ty.dims, 2);
    assert_eq!(ty.display_name(), "java.lang.String[][]");
    assert!(!ty.is_primitive());
    assert!(b.ty("int").is_primitive());
    assert!(b.ty("void").is_void());
}

#[test]
fn test_assign_this_is_recognized_as_field_target() {
    let b = AstBuilder::new();
    let Stmt::Expr(stmt) = b.assign_this("count", b.int(0)) else {
        panic!("expected expression statement");
    };
    let Expr::Assign(assign) = &stmt.expr else {
        panic!("expected assignment");
    };
    assert_eq!(assign.target.assigned_name(), Some(("count", true)));
}

#[test]
fn test_unit_survives_json_round_trip_with_defaults() {
    let json = r#"{
        "file": "A.java",
        "types": [
            { "id": 1, "kind": "Class", "name": "A",
              "members": [
                { "Field": { "id": 2, "modifiers": "FINAL", "ty": { "id": 3, "name": "int" }, "name": "i" } }
              ] }
        ]
    }"#;
    let unit: CompilationUnit = serde_json::from_str(json).expect("valid unit");
    assert_eq!(unit.package_name(), "");
    let field = unit.types[0].fields().next().expect("one field");
    assert!(field.modifiers.is_final());
    assert!(field.init.is_none());
}
