//! Statements.

use crate::expr::Expr;
use crate::modifiers::Modifiers;
use crate::node::{Param, TypeRef};
use jck_common::NodeId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: NodeId,
    #[serde(default)]
    pub stmts: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    Block(Block),
    LocalVar(LocalVarDecl),
    Expr(ExprStmt),
    If(IfStmt),
    While(WhileStmt),
    DoWhile(DoWhileStmt),
    For(ForStmt),
    ForEach(ForEachStmt),
    Return(ReturnStmt),
    Throw(ThrowStmt),
    Break(JumpStmt),
    Continue(JumpStmt),
    Try(TryStmt),
    /// `this(...)` or `super(...)`.
    ConstructorCall(ConstructorCallStmt),
    Empty(NodeId),
}

impl Stmt {
    #[must_use]
    pub fn id(&self) -> NodeId {
        match self {
            Stmt::Block(b) => b.id,
            Stmt::LocalVar(v) => v.id,
            Stmt::Expr(e) => e.id,
            Stmt::If(s) => s.id,
            Stmt::While(s) => s.id,
            Stmt::DoWhile(s) => s.id,
            Stmt::For(s) => s.id,
            Stmt::ForEach(s) => s.id,
            Stmt::Return(s) => s.id,
            Stmt::Throw(s) => s.id,
            Stmt::Break(s) | Stmt::Continue(s) => s.id,
            Stmt::Try(s) => s.id,
            Stmt::ConstructorCall(s) => s.id,
            Stmt::Empty(id) => *id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocalVarDecl {
    pub id: NodeId,
    #[serde(default)]
    pub modifiers: Modifiers,
    pub ty: TypeRef,
    pub name: String,
    #[serde(default)]
    pub init: Option<Expr>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExprStmt {
    pub id: NodeId,
    pub expr: Expr,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IfStmt {
    pub id: NodeId,
    pub cond: Expr,
    pub then_branch: Box<Stmt>,
    #[serde(default)]
    pub else_branch: Option<Box<Stmt>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WhileStmt {
    pub id: NodeId,
    pub cond: Expr,
    pub body: Box<Stmt>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DoWhileStmt {
    pub id: NodeId,
    pub body: Box<Stmt>,
    pub cond: Expr,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForStmt {
    pub id: NodeId,
    #[serde(default)]
    pub init: Vec<Stmt>,
    #[serde(default)]
    pub cond: Option<Expr>,
    #[serde(default)]
    pub update: Vec<Expr>,
    pub body: Box<Stmt>,
}

/// `for (T x : iterable) body`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForEachStmt {
    pub id: NodeId,
    pub var: LocalVarDecl,
    pub iterable: Expr,
    pub body: Box<Stmt>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReturnStmt {
    pub id: NodeId,
    #[serde(default)]
    pub value: Option<Expr>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThrowStmt {
    pub id: NodeId,
    pub expr: Expr,
}

/// `break` / `continue`, optionally labeled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpStmt {
    pub id: NodeId,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TryStmt {
    pub id: NodeId,
    pub block: Block,
    #[serde(default)]
    pub catches: Vec<CatchClause>,
    #[serde(default)]
    pub finally: Option<Block>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatchClause {
    pub id: NodeId,
    pub param: Param,
    pub body: Block,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstructorCallKind {
    This,
    Super,
}

impl ConstructorCallKind {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            ConstructorCallKind::This => "this",
            ConstructorCallKind::Super => "super",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstructorCallStmt {
    pub id: NodeId,
    pub kind: ConstructorCallKind,
    #[serde(default)]
    pub args: Vec<Expr>,
}
