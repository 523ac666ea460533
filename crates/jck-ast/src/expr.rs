//! Expressions.
//!
//! Only the shapes the checker needs to see through are modelled; typing of
//! expressions is delegated to an external oracle.

use crate::node::TypeRef;
use jck_common::NodeId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Literal(LiteralExpr),
    Name(NameExpr),
    This(NodeId),
    FieldAccess(FieldAccessExpr),
    Assign(AssignExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Conditional(ConditionalExpr),
    Call(CallExpr),
    New(NewExpr),
    NewArray(NewArrayExpr),
    Cast(CastExpr),
    InstanceOf(InstanceOfExpr),
    ArrayAccess(ArrayAccessExpr),
}

impl Expr {
    #[must_use]
    pub fn id(&self) -> NodeId {
        match self {
            Expr::Literal(e) => e.id,
            Expr::Name(e) => e.id,
            Expr::This(id) => *id,
            Expr::FieldAccess(e) => e.id,
            Expr::Assign(e) => e.id,
            Expr::Unary(e) => e.id,
            Expr::Binary(e) => e.id,
            Expr::Conditional(e) => e.id,
            Expr::Call(e) => e.id,
            Expr::New(e) => e.id,
            Expr::NewArray(e) => e.id,
            Expr::Cast(e) => e.id,
            Expr::InstanceOf(e) => e.id,
            Expr::ArrayAccess(e) => e.id,
        }
    }

    /// Name of the variable this expression denotes when used as an
    /// assignment target: `x` or `this.x`.
    #[must_use]
    pub fn assigned_name(&self) -> Option<(&str, bool)> {
        match self {
            Expr::Name(n) => Some((&n.name, false)),
            Expr::FieldAccess(fa) if matches!(*fa.target, Expr::This(_)) => Some((&fa.name, true)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Int(i64),
    Long(i64),
    Double(f64),
    Float(f64),
    Bool(bool),
    Char(char),
    String(String),
    Null,
}

impl Literal {
    /// Type name of the literal; `null` for the null literal.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Literal::Int(_) => "int",
            Literal::Long(_) => "long",
            Literal::Double(_) => "double",
            Literal::Float(_) => "float",
            Literal::Bool(_) => "boolean",
            Literal::Char(_) => "char",
            Literal::String(_) => "java.lang.String",
            Literal::Null => "null",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LiteralExpr {
    pub id: NodeId,
    pub value: Literal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameExpr {
    pub id: NodeId,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldAccessExpr {
    pub id: NodeId,
    pub target: Box<Expr>,
    pub name: String,
}

/// `target = value`, or a compound assignment when `op` is set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssignExpr {
    pub id: NodeId,
    #[serde(default)]
    pub op: Option<BinaryOp>,
    pub target: Box<Expr>,
    pub value: Box<Expr>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
    BitNot,
    PreInc,
    PreDec,
    PostInc,
    PostDec,
}

impl UnaryOp {
    /// Increment/decrement operators both read and write their operand.
    #[must_use]
    pub const fn is_update(self) -> bool {
        matches!(
            self,
            UnaryOp::PreInc | UnaryOp::PreDec | UnaryOp::PostInc | UnaryOp::PostDec
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpr {
    pub id: NodeId,
    pub op: UnaryOp,
    pub operand: Box<Expr>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    UShr,
    BitAnd,
    BitOr,
    BitXor,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    AndAnd,
    OrOr,
}

impl BinaryOp {
    #[must_use]
    pub const fn is_short_circuit(self) -> bool {
        matches!(self, BinaryOp::AndAnd | BinaryOp::OrOr)
    }

    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge | BinaryOp::Eq | BinaryOp::Ne
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub id: NodeId,
    pub op: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConditionalExpr {
    pub id: NodeId,
    pub cond: Box<Expr>,
    pub then_expr: Box<Expr>,
    pub else_expr: Box<Expr>,
}

/// Method invocation; `target` is `None` for unqualified calls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
    pub id: NodeId,
    #[serde(default)]
    pub target: Option<Box<Expr>>,
    pub name: String,
    #[serde(default)]
    pub args: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewExpr {
    pub id: NodeId,
    pub ty: TypeRef,
    #[serde(default)]
    pub args: Vec<Expr>,
}

/// `new T[d0][d1]...`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewArrayExpr {
    pub id: NodeId,
    pub ty: TypeRef,
    #[serde(default)]
    pub dims: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CastExpr {
    pub id: NodeId,
    pub ty: TypeRef,
    pub expr: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstanceOfExpr {
    pub id: NodeId,
    pub expr: Box<Expr>,
    pub ty: TypeRef,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrayAccessExpr {
    pub id: NodeId,
    pub array: Box<Expr>,
    pub index: Box<Expr>,
}
