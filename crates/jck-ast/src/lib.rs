//! AST for class and interface bodies.
//!
//! The tree is produced by an external parser and is never mutated by the
//! checker. Every node carries a `NodeId` so diagnostics can be anchored to
//! the most specific construct available.
//!
//! - `node` - compilation units, imports, type and member declarations
//! - `stmt` - statements
//! - `expr` - expressions
//! - `modifiers` - declaration modifiers and visibility
//! - `builder` - `AstBuilder` for constructing trees with fresh node ids

pub mod builder;
pub mod expr;
pub mod modifiers;
pub mod node;
pub mod stmt;

pub use builder::AstBuilder;
pub use expr::{
    ArrayAccessExpr, AssignExpr, BinaryExpr, BinaryOp, CallExpr, CastExpr, ConditionalExpr, Expr, FieldAccessExpr,
    InstanceOfExpr, Literal, LiteralExpr, NameExpr, NewArrayExpr, NewExpr, UnaryExpr, UnaryOp,
};
pub use jck_common::NodeId;
pub use modifiers::{Modifiers, Visibility};
pub use node::{
    CompilationUnit, ConstructorDecl, FieldDecl, ImportDecl, InitializerDecl, Member, MethodDecl,
    Param, TypeDecl, TypeKind, TypeRef,
};
pub use stmt::{
    Block, CatchClause, ConstructorCallKind, ConstructorCallStmt, DoWhileStmt, ExprStmt,
    ForEachStmt, ForStmt, IfStmt, JumpStmt, LocalVarDecl, ReturnStmt, Stmt, ThrowStmt, TryStmt,
    WhileStmt,
};
