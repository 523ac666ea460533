//! Preloaded `java.lang` entries.
//!
//! Only the members the checker needs to see are modelled: `Object`'s
//! constructor and the methods every class inherits, plus the exception
//! hierarchy and boxed primitives.

use jck_ast::{Modifiers, TypeKind};
use jck_common::NodeId;
use smallvec::SmallVec;

use crate::symbols::{ClassEntry, ClassId, FieldEntry, FieldOwner, MethodEntry, MethodId};
use crate::table::SymbolTable;

pub const OBJECT: &str = "java.lang.Object";
pub const STRING: &str = "java.lang.String";

const BOXED: &[(&str, &str)] = &[
    ("java.lang.Boolean", "boolean"),
    ("java.lang.Byte", "byte"),
    ("java.lang.Short", "short"),
    ("java.lang.Character", "char"),
    ("java.lang.Integer", "int"),
    ("java.lang.Long", "long"),
    ("java.lang.Float", "float"),
    ("java.lang.Double", "double"),
];

/// Boxed class name of a primitive type.
#[must_use]
pub fn boxed_name(primitive: &str) -> Option<&'static str> {
    BOXED
        .iter()
        .find(|(_, prim)| *prim == primitive)
        .map(|(boxed, _)| *boxed)
}

/// Primitive type of a boxed class name (qualified or simple).
#[must_use]
pub fn unboxed_name(name: &str) -> Option<&'static str> {
    let simple = crate::names::simple_name(name);
    BOXED
        .iter()
        .find(|(boxed, _)| crate::names::simple_name(boxed) == simple)
        .map(|(_, prim)| *prim)
}

impl SymbolTable<'_> {
    /// A table preloaded with the `java.lang` types every unit can see.
    #[must_use]
    pub fn with_java_lang() -> Self {
        let mut table = Self::new();
        let object = table.insert_library(ClassEntry::new(
            ClassId(0),
            OBJECT,
            TypeKind::Class,
            Modifiers::PUBLIC,
        ));
        table.add_library_constructor(object, &[]);
        table.add_library_method(object, "toString", STRING, &[]);
        table.add_library_method(object, "equals", "boolean", &[OBJECT]);
        table.add_library_method(object, "hashCode", "int", &[]);

        let final_public = Modifiers::PUBLIC | Modifiers::FINAL;
        let string = table.add_library_class(STRING, final_public, Some(object));
        table.add_library_constructor(string, &[]);
        table.add_library_constructor(string, &[STRING]);
        table.add_library_method(string, "length", "int", &[]);

        let throwable = table.add_library_class("java.lang.Throwable", Modifiers::PUBLIC, Some(object));
        table.add_library_constructor(throwable, &[]);
        table.add_library_constructor(throwable, &[STRING]);
        table.add_library_method(throwable, "getMessage", STRING, &[]);
        for (name, parent) in [
            ("java.lang.Exception", throwable),
            ("java.lang.Error", throwable),
        ] {
            let id = table.add_library_class(name, Modifiers::PUBLIC, Some(parent));
            table.add_library_constructor(id, &[]);
            table.add_library_constructor(id, &[STRING]);
        }
        if let Some(exception) = table.find("java.lang.Exception") {
            let runtime =
                table.add_library_class("java.lang.RuntimeException", Modifiers::PUBLIC, Some(exception));
            table.add_library_constructor(runtime, &[]);
            table.add_library_constructor(runtime, &[STRING]);
        }

        table.add_library_class("java.lang.System", final_public, Some(object));
        table.add_library_class("java.lang.Math", final_public, Some(object));
        for (boxed, primitive) in BOXED {
            let id = table.add_library_class(boxed, final_public, Some(object));
            table.add_library_constructor(id, &[*primitive]);
        }
        tracing::debug!(classes = table.len(), "java.lang preloaded");
        table
    }

    pub fn add_library_class(
        &mut self,
        qualified_name: &str,
        modifiers: Modifiers,
        superclass: Option<ClassId>,
    ) -> ClassId {
        let mut entry = ClassEntry::new(ClassId(0), qualified_name, TypeKind::Class, modifiers);
        entry.superclass = superclass;
        self.insert_library(entry)
    }

    pub fn add_library_constructor(&mut self, class: ClassId, params: &[&str]) -> Option<MethodId> {
        let name = self.simple_name_of(class).to_string();
        self.add_library_member(class, &name, None, params)
    }

    pub fn add_library_method(
        &mut self,
        class: ClassId,
        name: &str,
        return_type: &str,
        params: &[&str],
    ) -> Option<MethodId> {
        self.add_library_member(class, name, Some(return_type), params)
    }

    fn add_library_member(
        &mut self,
        class: ClassId,
        name: &str,
        return_type: Option<&str>,
        params: &[&str],
    ) -> Option<MethodId> {
        let entry = self.entry_mut(class)?;
        let id = entry.method_id(entry.methods.len());
        let params = params
            .iter()
            .enumerate()
            .map(|(i, ty)| FieldEntry {
                name: format!("arg{i}"),
                modifiers: Modifiers::empty(),
                ty: (*ty).to_string(),
                has_value: true,
                has_initializer: false,
                owner: FieldOwner::Method(id),
                decl: NodeId::NONE,
            })
            .collect();
        entry.methods.push(MethodEntry {
            name: name.to_string(),
            modifiers: Modifiers::PUBLIC,
            params,
            throws: SmallVec::new(),
            return_type: return_type.map(str::to_string),
            owner: class,
            is_constructor: return_type.is_none(),
            delegates: false,
            synthetic: false,
            decl: NodeId::NONE,
        });
        Some(id)
    }
}
