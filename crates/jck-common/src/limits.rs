//! Centralized limits and thresholds for the checker.
//!
//! Both passes are recursive tree walks; these bounds keep pathological
//! inputs from overflowing the stack or looping over malformed hierarchies.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum statement/expression nesting the checking pass descends into.
///
/// Deeper trees get a single diagnostic at the node where the limit was hit
/// and the subtree is not checked.
pub const MAX_AST_DEPTH: u32 = 512;

/// Maximum number of ancestors walked when collecting inherited members.
///
/// Cyclic inheritance is broken by the binder, so this only guards against
/// corrupted symbol tables.
pub const MAX_INHERITANCE_DEPTH: usize = 256;

/// Maximum number of enclosing levels walked by the accessibility check.
pub const MAX_NESTING_DEPTH: usize = 64;

// =============================================================================
// Capacity Limits
// =============================================================================

/// Default cap on diagnostics collected for one compilation unit (0 = unlimited).
pub const DEFAULT_MAX_DIAGNOSTICS: usize = 0;
