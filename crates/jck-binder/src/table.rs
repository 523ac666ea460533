//! The global symbol table.
//!
//! Classes live in an arena of `ClassSlot`s indexed by `ClassId`. A slot is
//! created the first time a name is looked up and stays `Unresolved` (a
//! continuation) until the structural pass promotes it to a `Resolved`
//! entry. Slots are never removed, so a `ClassId` stays valid for the life of
//! the table.

use jck_ast::{CompilationUnit, Modifiers, TypeDecl, TypeKind};
use jck_common::NodeId;
use jck_common::limits::MAX_INHERITANCE_DEPTH;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

use crate::names::package_of;
use crate::symbols::{ClassEntry, ClassId, FieldEntry, FieldId, MethodEntry, MethodId};

/// Where a source type is declared.
#[derive(Clone, Copy, Debug)]
pub struct DeclSite<'a> {
    pub unit: &'a CompilationUnit,
    pub decl: &'a TypeDecl,
    pub enclosing: Option<ClassId>,
}

#[derive(Clone, Debug)]
pub enum ClassSlot<'a> {
    /// Continuation: the name is known, the entry is not built yet.
    /// `decl` is `None` while no unit has declared the name.
    Unresolved {
        name: String,
        decl: Option<DeclSite<'a>>,
    },
    Resolved(Box<ClassEntry>),
}

impl ClassSlot<'_> {
    #[must_use]
    pub fn is_continuation(&self) -> bool {
        matches!(self, ClassSlot::Unresolved { .. })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            ClassSlot::Unresolved { name, .. } => name,
            ClassSlot::Resolved(entry) => &entry.qualified_name,
        }
    }
}

#[derive(Debug, Default)]
pub struct SymbolTable<'a> {
    slots: Vec<ClassSlot<'a>>,
    names: FxHashMap<String, ClassId>,
    sites: FxHashMap<ClassId, DeclSite<'a>>,
    by_decl: FxHashMap<NodeId, ClassId>,
    packages: FxHashSet<String>,
    /// Member declarations the structural pass refused to register.
    rejected: FxHashSet<NodeId>,
    reported_unknown: FxHashSet<(NodeId, String)>,
}

impl<'a> SymbolTable<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Slots
    // =========================================================================

    /// Id for `qualified_name`, creating a continuation on first lookup.
    pub fn lookup(&mut self, qualified_name: &str) -> ClassId {
        if let Some(&id) = self.names.get(qualified_name) {
            return id;
        }
        let id = ClassId(self.slots.len() as u32);
        self.slots.push(ClassSlot::Unresolved {
            name: qualified_name.to_string(),
            decl: None,
        });
        self.names.insert(qualified_name.to_string(), id);
        tracing::trace!(name = qualified_name, id = id.0, "continuation created");
        id
    }

    /// Id for `qualified_name` if anything has mentioned it.
    #[must_use]
    pub fn find(&self, qualified_name: &str) -> Option<ClassId> {
        self.names.get(qualified_name).copied()
    }

    /// Find a name that is declared in source or preloaded from a library.
    #[must_use]
    pub fn find_known(&self, qualified_name: &str) -> Option<ClassId> {
        self.find(qualified_name).filter(|&id| self.is_known(id))
    }

    /// A slot is known when it is resolved or has a declaration to resolve from.
    #[must_use]
    pub fn is_known(&self, id: ClassId) -> bool {
        match self.slots.get(id.index()) {
            Some(ClassSlot::Resolved(_)) => true,
            Some(ClassSlot::Unresolved { decl, .. }) => decl.is_some(),
            None => false,
        }
    }

    #[must_use]
    pub fn slot(&self, id: ClassId) -> Option<&ClassSlot<'a>> {
        self.slots.get(id.index())
    }

    #[must_use]
    pub fn is_continuation(&self, id: ClassId) -> bool {
        self.slot(id).is_none_or(ClassSlot::is_continuation)
    }

    /// Resolved entry; `None` for continuations.
    #[must_use]
    pub fn entry(&self, id: ClassId) -> Option<&ClassEntry> {
        match self.slots.get(id.index()) {
            Some(ClassSlot::Resolved(entry)) => Some(entry),
            _ => None,
        }
    }

    pub fn entry_mut(&mut self, id: ClassId) -> Option<&mut ClassEntry> {
        match self.slots.get_mut(id.index()) {
            Some(ClassSlot::Resolved(entry)) => Some(entry),
            _ => None,
        }
    }

    /// Replace a slot with its resolved entry.
    pub(crate) fn promote(&mut self, entry: ClassEntry) {
        let index = entry.id.index();
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = ClassSlot::Resolved(Box::new(entry));
        }
    }

    /// Register a preloaded library type.
    pub fn insert_library(&mut self, mut entry: ClassEntry) -> ClassId {
        let id = self.lookup(&entry.qualified_name.clone());
        entry.id = id;
        entry.is_library = true;
        entry.package = package_of(&entry.qualified_name).to_string();
        self.packages.insert(entry.package.clone());
        self.promote(entry);
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &ClassEntry> {
        self.slots.iter().filter_map(|slot| match slot {
            ClassSlot::Resolved(entry) => Some(entry.as_ref()),
            ClassSlot::Unresolved { .. } => None,
        })
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// Record where a source type is declared.
    ///
    /// Returns `Err` with the existing id when the name is already declared.
    pub fn declare(
        &mut self,
        unit: &'a CompilationUnit,
        decl: &'a TypeDecl,
        enclosing: Option<ClassId>,
    ) -> Result<ClassId, ClassId> {
        let qualified = match enclosing {
            Some(outer) => format!("{}.{}", self.name_of(outer), decl.name),
            None => unit.qualify(&decl.name),
        };
        let id = self.lookup(&qualified);
        if self.sites.contains_key(&id) || !self.is_continuation(id) {
            return Err(id);
        }
        let site = DeclSite {
            unit,
            decl,
            enclosing,
        };
        if let Some(ClassSlot::Unresolved { decl: slot_decl, .. }) = self.slots.get_mut(id.index())
        {
            *slot_decl = Some(site);
        }
        self.sites.insert(id, site);
        self.by_decl.insert(decl.id, id);
        self.packages.insert(unit.package_name().to_string());
        Ok(id)
    }

    /// Declare every type of a unit, nested types included.
    ///
    /// Returns the declarations whose qualified name was already taken.
    pub fn declare_unit(&mut self, unit: &'a CompilationUnit) -> Vec<(&'a TypeDecl, String)> {
        let mut duplicates = Vec::new();
        for decl in &unit.types {
            self.declare_recursive(unit, decl, None, &mut duplicates);
        }
        duplicates
    }

    fn declare_recursive(
        &mut self,
        unit: &'a CompilationUnit,
        decl: &'a TypeDecl,
        enclosing: Option<ClassId>,
        duplicates: &mut Vec<(&'a TypeDecl, String)>,
    ) {
        match self.declare(unit, decl, enclosing) {
            Ok(id) => {
                for nested in decl.nested_types() {
                    self.declare_recursive(unit, nested, Some(id), duplicates);
                }
            }
            Err(existing) => duplicates.push((decl, self.name_of(existing).to_string())),
        }
    }

    #[must_use]
    pub fn site(&self, id: ClassId) -> Option<DeclSite<'a>> {
        self.sites.get(&id).copied()
    }

    #[must_use]
    pub fn class_for_decl(&self, decl: NodeId) -> Option<ClassId> {
        self.by_decl.get(&decl).copied()
    }

    #[must_use]
    pub fn has_package(&self, name: &str) -> bool {
        self.packages.contains(name)
            || self
                .packages
                .iter()
                .any(|pkg| pkg.starts_with(name) && pkg[name.len()..].starts_with('.'))
    }

    pub fn mark_rejected(&mut self, decl: NodeId) {
        self.rejected.insert(decl);
    }

    #[must_use]
    pub fn is_rejected(&self, decl: NodeId) -> bool {
        self.rejected.contains(&decl)
    }

    /// True the first time `name` fails to resolve at `node`.
    pub fn first_unknown_report(&mut self, node: NodeId, name: &str) -> bool {
        self.reported_unknown.insert((node, name.to_string()))
    }

    // =========================================================================
    // Class facts (available for continuations with a declaration)
    // =========================================================================

    #[must_use]
    pub fn name_of(&self, id: ClassId) -> &str {
        self.slot(id).map_or("", ClassSlot::name)
    }

    #[must_use]
    pub fn simple_name_of(&self, id: ClassId) -> &str {
        crate::names::simple_name(self.name_of(id))
    }

    #[must_use]
    pub fn kind_of(&self, id: ClassId) -> Option<TypeKind> {
        match self.entry(id) {
            Some(entry) => Some(entry.kind),
            None => self.site(id).map(|site| site.decl.kind),
        }
    }

    #[must_use]
    pub fn enclosing_of(&self, id: ClassId) -> Option<ClassId> {
        match self.entry(id) {
            Some(entry) => entry.enclosing,
            None => self.site(id).and_then(|site| site.enclosing),
        }
    }

    #[must_use]
    pub fn package_of_class(&self, id: ClassId) -> &str {
        match self.entry(id) {
            Some(entry) => &entry.package,
            None => match self.site(id) {
                Some(site) => site.unit.package_name(),
                None => package_of(self.name_of(id)),
            },
        }
    }

    #[must_use]
    pub fn is_library(&self, id: ClassId) -> bool {
        self.entry(id).is_some_and(|entry| entry.is_library)
    }

    /// Modifiers with member-type defaults applied.
    #[must_use]
    pub fn modifiers_of(&self, id: ClassId) -> Modifiers {
        match self.entry(id) {
            Some(entry) => entry.modifiers,
            None => match self.site(id) {
                Some(site) => self.normalized_type_modifiers(site),
                None => Modifiers::PUBLIC,
            },
        }
    }

    /// Interfaces are abstract; nested interfaces are static; types declared
    /// inside interfaces are public and static.
    #[must_use]
    pub fn normalized_type_modifiers(&self, site: DeclSite<'a>) -> Modifiers {
        let mut modifiers = site.decl.modifiers;
        if site.decl.is_interface() {
            modifiers |= Modifiers::ABSTRACT;
            if site.enclosing.is_some() {
                modifiers |= Modifiers::STATIC;
            }
        }
        if let Some(outer) = site.enclosing
            && self.kind_of(outer) == Some(TypeKind::Interface)
        {
            modifiers = modifiers.with_visibility(jck_ast::Visibility::Public) | Modifiers::STATIC;
        }
        modifiers
    }

    #[must_use]
    pub fn top_level_of(&self, id: ClassId) -> ClassId {
        let mut current = id;
        let mut steps = 0;
        while let Some(outer) = self.enclosing_of(current) {
            current = outer;
            steps += 1;
            if steps > MAX_INHERITANCE_DEPTH {
                break;
            }
        }
        current
    }

    /// Enclosing classes, innermost first, starting with `id` itself.
    #[must_use]
    pub fn enclosing_chain(&self, id: ClassId) -> Vec<ClassId> {
        let mut chain = vec![id];
        let mut current = id;
        while let Some(outer) = self.enclosing_of(current) {
            if chain.contains(&outer) || chain.len() > MAX_INHERITANCE_DEPTH {
                break;
            }
            chain.push(outer);
            current = outer;
        }
        chain
    }

    // =========================================================================
    // Members
    // =========================================================================

    #[must_use]
    pub fn field(&self, id: FieldId) -> Option<&FieldEntry> {
        self.entry(id.class)?.fields.get(id.index as usize)
    }

    pub fn field_mut(&mut self, id: FieldId) -> Option<&mut FieldEntry> {
        self.entry_mut(id.class)?.fields.get_mut(id.index as usize)
    }

    #[must_use]
    pub fn method(&self, id: MethodId) -> Option<&MethodEntry> {
        self.entry(id.class)?.methods.get(id.index as usize)
    }

    pub fn method_mut(&mut self, id: MethodId) -> Option<&mut MethodEntry> {
        self.entry_mut(id.class)?.methods.get_mut(id.index as usize)
    }

    // =========================================================================
    // Hierarchy
    // =========================================================================

    /// Superclasses, nearest first, excluding `id`.
    #[must_use]
    pub fn superclass_chain(&self, id: ClassId) -> Vec<ClassId> {
        let mut chain = Vec::new();
        let mut current = self.entry(id).and_then(|e| e.superclass);
        while let Some(next) = current {
            if next == id || chain.contains(&next) || chain.len() >= MAX_INHERITANCE_DEPTH {
                break;
            }
            chain.push(next);
            current = self.entry(next).and_then(|e| e.superclass);
        }
        chain
    }

    /// All superclasses and superinterfaces, transitively, nearest first.
    #[must_use]
    pub fn ancestors(&self, id: ClassId) -> Vec<ClassId> {
        let mut seen = FxHashSet::default();
        seen.insert(id);
        let mut order = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(id);
        while let Some(current) = queue.pop_front() {
            let Some(entry) = self.entry(current) else {
                continue;
            };
            for next in entry.superclass.iter().chain(entry.interfaces.iter()) {
                if seen.insert(*next) {
                    order.push(*next);
                    queue.push_back(*next);
                }
            }
            if order.len() >= MAX_INHERITANCE_DEPTH {
                break;
            }
        }
        order
    }

    #[must_use]
    pub fn is_subclass_of(&self, sub: ClassId, sup: ClassId) -> bool {
        sub == sup || self.ancestors(sub).contains(&sup)
    }
}

#[cfg(test)]
#[path = "../tests/table_tests.rs"]
mod tests;
