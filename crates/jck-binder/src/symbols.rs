//! Symbol entries produced by the structural pass.
//!
//! Entries refer to each other through arena indices (`ClassId`), never by
//! owning pointers, so cyclic super/enclosing relationships are harmless.

use indexmap::IndexMap;
use jck_ast::{Modifiers, TypeKind, Visibility};
use jck_common::NodeId;
use smallvec::SmallVec;

use crate::names::signature_text;

/// Index of a class slot in the `SymbolTable` arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub u32);

impl ClassId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A method or constructor: owning class plus position in its method list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId {
    pub class: ClassId,
    pub index: u32,
}

/// A field: owning class plus position in its field list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId {
    pub class: ClassId,
    pub index: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldOwner {
    Class(ClassId),
    /// Parameter of a method or constructor.
    Method(MethodId),
}

/// A field or parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldEntry {
    pub name: String,
    pub modifiers: Modifiers,
    /// Declared type, fully qualified when it could be resolved.
    pub ty: String,
    /// Whether the variable currently carries a value.
    pub has_value: bool,
    pub has_initializer: bool,
    pub owner: FieldOwner,
    /// Declaring node, for diagnostics.
    pub decl: NodeId,
}

impl FieldEntry {
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.modifiers.is_final()
    }

    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.modifiers.visibility()
    }
}

impl AsRef<str> for FieldEntry {
    fn as_ref(&self) -> &str {
        &self.ty
    }
}

/// One entry of a `throws` clause.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThrowsEntry {
    pub name: String,
    pub class: Option<ClassId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodEntry {
    pub name: String,
    pub modifiers: Modifiers,
    pub params: Vec<FieldEntry>,
    pub throws: SmallVec<[ThrowsEntry; 2]>,
    /// `None` for constructors.
    pub return_type: Option<String>,
    pub owner: ClassId,
    pub is_constructor: bool,
    /// Constructor whose body starts with `this(...)`.
    pub delegates: bool,
    /// Implicit default constructor.
    pub synthetic: bool,
    pub decl: NodeId,
}

impl MethodEntry {
    #[must_use]
    pub fn param_types(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.ty.as_str()).collect()
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.modifiers.visibility()
    }

    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.modifiers.is_abstract()
    }

    #[must_use]
    pub fn is_final(&self) -> bool {
        self.modifiers.is_final()
    }

    #[must_use]
    pub fn returns_void(&self) -> bool {
        self.return_type.as_deref() == Some("void")
    }

    /// `name(T1, T2)` with unqualified parameter types.
    #[must_use]
    pub fn signature(&self) -> String {
        signature_text(&self.name, &self.param_types())
    }
}

/// A resolved class or interface.
#[derive(Clone, Debug)]
pub struct ClassEntry {
    pub id: ClassId,
    pub qualified_name: String,
    pub simple_name: String,
    pub package: String,
    pub kind: TypeKind,
    pub modifiers: Modifiers,
    pub superclass: Option<ClassId>,
    pub interfaces: Vec<ClassId>,
    pub fields: Vec<FieldEntry>,
    pub methods: Vec<MethodEntry>,
    pub nested: IndexMap<String, ClassId>,
    pub enclosing: Option<ClassId>,
    /// Precompiled library type; accessibility walks stop here.
    pub is_library: bool,
    /// Declared constructors not yet visited by the checking pass.
    pub pending_constructor_count: usize,
    pub decl: NodeId,
    pub file: String,
}

impl ClassEntry {
    /// Header entry with no supertypes and no members.
    #[must_use]
    pub fn new(id: ClassId, qualified_name: &str, kind: TypeKind, modifiers: Modifiers) -> Self {
        Self {
            id,
            qualified_name: qualified_name.to_string(),
            simple_name: crate::names::simple_name(qualified_name).to_string(),
            package: String::new(),
            kind,
            modifiers,
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            nested: IndexMap::new(),
            enclosing: None,
            is_library: false,
            pending_constructor_count: 0,
            decl: NodeId::NONE,
            file: String::new(),
        }
    }

    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.is_interface() || self.modifiers.is_abstract()
    }

    #[must_use]
    pub fn is_final(&self) -> bool {
        self.modifiers.is_final()
    }

    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.modifiers.visibility()
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<(FieldId, &FieldEntry)> {
        self.fields
            .iter()
            .enumerate()
            .rev()
            .find(|(_, f)| f.name == name)
            .map(|(i, f)| (self.field_id(i), f))
    }

    #[must_use]
    pub fn field_id(&self, index: usize) -> FieldId {
        FieldId {
            class: self.id,
            index: index as u32,
        }
    }

    #[must_use]
    pub fn method_id(&self, index: usize) -> MethodId {
        MethodId {
            class: self.id,
            index: index as u32,
        }
    }

    pub fn constructors(&self) -> impl Iterator<Item = (MethodId, &MethodEntry)> {
        self.methods
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_constructor)
            .map(|(i, m)| (self.method_id(i), m))
    }

    pub fn methods_named<'s>(
        &'s self,
        name: &'s str,
    ) -> impl Iterator<Item = (MethodId, &'s MethodEntry)> + 's {
        self.methods
            .iter()
            .enumerate()
            .filter(move |(_, m)| !m.is_constructor && m.name == name)
            .map(|(i, m)| (self.method_id(i), m))
    }

    /// Number of constructors written in source.
    #[must_use]
    pub fn declared_constructor_count(&self) -> usize {
        self.methods
            .iter()
            .filter(|m| m.is_constructor && !m.synthetic)
            .count()
    }

    /// Transitive union of ancestor fields, nearest ancestor first.
    #[must_use]
    pub fn super_vars(&self, table: &crate::table::SymbolTable<'_>) -> Vec<FieldId> {
        let mut vars = Vec::new();
        for ancestor in table.ancestors(self.id) {
            if let Some(entry) = table.entry(ancestor) {
                vars.extend((0..entry.fields.len()).map(|i| entry.field_id(i)));
            }
        }
        vars
    }
}
