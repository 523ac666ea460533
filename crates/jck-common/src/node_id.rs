use serde::{Deserialize, Serialize};

/// Identity of an AST node.
///
/// Node ids are allocated by whoever builds the tree (the external parser or
/// `jck_ast::AstBuilder`) and are only used to anchor diagnostics and to key
/// per-node side tables. They carry no structural meaning.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Placeholder for synthesized declarations that have no source node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[must_use]
    pub const fn is_some(self) -> bool {
        !self.is_none()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "#synthetic")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}
