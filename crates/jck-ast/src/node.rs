//! Compilation units and declarations.

use crate::modifiers::Modifiers;
use crate::stmt::Block;
use crate::expr::Expr;
use jck_common::NodeId;
use serde::{Deserialize, Serialize};

/// One parsed source file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompilationUnit {
    pub file: String,
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub imports: Vec<ImportDecl>,
    pub types: Vec<TypeDecl>,
}

impl CompilationUnit {
    /// Package name, with the unnamed package as the empty string.
    #[must_use]
    pub fn package_name(&self) -> &str {
        self.package.as_deref().unwrap_or("")
    }

    /// Fully qualified name of a top-level type declared in this unit.
    #[must_use]
    pub fn qualify(&self, simple: &str) -> String {
        match self.package.as_deref() {
            Some(pkg) if !pkg.is_empty() => format!("{pkg}.{simple}"),
            _ => simple.to_string(),
        }
    }
}

/// `import a.b.C;` or `import a.b.*;`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDecl {
    pub id: NodeId,
    /// Imported type name, or package name for wildcard imports.
    pub name: String,
    #[serde(default)]
    pub wildcard: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Class,
    Interface,
}

impl TypeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
        }
    }
}

/// A class or interface declaration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub id: NodeId,
    pub kind: TypeKind,
    pub name: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Superclass of a class. Interfaces put their super-interfaces in `interfaces`.
    #[serde(default)]
    pub extends: Option<TypeRef>,
    #[serde(default)]
    pub interfaces: Vec<TypeRef>,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl TypeDecl {
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Field(f) => Some(f),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Method(m) => Some(m),
            _ => None,
        })
    }

    pub fn constructors(&self) -> impl Iterator<Item = &ConstructorDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Constructor(c) => Some(c),
            _ => None,
        })
    }

    pub fn nested_types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Type(t) => Some(t),
            _ => None,
        })
    }

    pub fn initializers(&self) -> impl Iterator<Item = &InitializerDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Initializer(i) => Some(i),
            _ => None,
        })
    }
}

/// Class body member.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Member {
    Field(FieldDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    Initializer(InitializerDecl),
    Type(TypeDecl),
}

impl Member {
    #[must_use]
    pub fn id(&self) -> NodeId {
        match self {
            Member::Field(f) => f.id,
            Member::Method(m) => m.id,
            Member::Constructor(c) => c.id,
            Member::Initializer(i) => i.id,
            Member::Type(t) => t.id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub id: NodeId,
    #[serde(default)]
    pub modifiers: Modifiers,
    pub ty: TypeRef,
    pub name: String,
    #[serde(default)]
    pub init: Option<Expr>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub id: NodeId,
    #[serde(default)]
    pub modifiers: Modifiers,
    pub return_type: TypeRef,
    pub name: String,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub throws: Vec<TypeRef>,
    /// `None` for abstract, native and interface methods.
    #[serde(default)]
    pub body: Option<Block>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstructorDecl {
    pub id: NodeId,
    #[serde(default)]
    pub modifiers: Modifiers,
    pub name: String,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub throws: Vec<TypeRef>,
    pub body: Block,
}

/// `{ ... }` or `static { ... }` at class level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InitializerDecl {
    pub id: NodeId,
    #[serde(default)]
    pub is_static: bool,
    pub body: Block,
}

/// Formal parameter (also used for catch parameters).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub id: NodeId,
    #[serde(default)]
    pub modifiers: Modifiers,
    pub ty: TypeRef,
    pub name: String,
}

/// A type as written in source: a possibly qualified name plus array dimensions.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    pub id: NodeId,
    pub name: String,
    #[serde(default)]
    pub dims: u8,
}

const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "short", "char", "int", "long", "float", "double",
];

impl TypeRef {
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.dims == 0 && self.name == "void"
    }

    /// Primitive element type (arrays of primitives are references).
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        self.dims == 0 && PRIMITIVES.contains(&self.name.as_str())
    }

    #[must_use]
    pub fn is_primitive_name(name: &str) -> bool {
        PRIMITIVES.contains(&name) || name == "void"
    }

    /// Source text of the type, e.g. `java.lang.String[]`.
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut text = self.name.clone();
        for _ in 0..self.dims {
            text.push_str("[]");
        }
        text
    }
}
