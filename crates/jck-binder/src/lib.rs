//! Symbol table and structural pass.
//!
//! - `symbols` - class, method and field entries
//! - `table` - the `SymbolTable` arena with continuation slots
//! - `library` - preloaded `java.lang` entries
//! - `names` - qualified/unqualified name helpers and signature matching
//! - `resolve` - type-name resolution and accessibility
//! - `state` / `members` - the structural pass (`Binder`)

pub mod library;
pub mod names;
pub mod options;
pub mod resolve;
pub mod symbols;
pub mod table;

mod members;
mod state;

pub use names::{
    find_registered, names_equivalent, package_of, params_match, signature_text, simple_name,
};
pub use options::LanguageLevel;
pub use resolve::{AccessContext, ResolvedType, TypeContext};
pub use state::Binder;
pub use symbols::{
    ClassEntry, ClassId, FieldEntry, FieldId, FieldOwner, MethodEntry, MethodId, ThrowsEntry,
};
pub use table::{ClassSlot, DeclSite, SymbolTable};
