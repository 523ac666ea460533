//! Expression typing.
//!
//! The checker never infers expression types itself; it asks a
//! `TypeOracle`. `DeclaredTypeOracle` is the standalone default and only
//! knows what declarations say: literal types, declared variable and field
//! types, `new`/cast targets and method return types.

use jck_ast::{BinaryOp, Expr, Literal, TypeRef, UnaryOp};
use jck_binder::{ClassId, SymbolTable, TypeContext, names_equivalent, simple_name};

use crate::scope::Scope;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprType {
    Known(String),
    Void,
    Null,
    Unknown,
}

impl ExprType {
    /// Short rendering for diagnostics.
    #[must_use]
    pub fn display(&self) -> &str {
        match self {
            ExprType::Known(name) => simple_name(name),
            ExprType::Void => "void",
            ExprType::Null => "<null>",
            ExprType::Unknown => "?",
        }
    }

    fn known(name: &str) -> Self {
        if name == "void" {
            ExprType::Void
        } else {
            ExprType::Known(name.to_string())
        }
    }
}

/// What an oracle may look at while typing an expression.
pub struct ScopeView<'v, 'a> {
    pub scope: &'v Scope,
    pub table: &'v SymbolTable<'a>,
    pub class: Option<ClassId>,
    pub ctx: TypeContext<'v>,
}

pub trait TypeOracle {
    fn type_of(&self, expr: &Expr, view: &ScopeView<'_, '_>) -> ExprType;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DeclaredTypeOracle;

const NUMERIC_RANK: &[&str] = &["byte", "short", "char", "int", "long", "float", "double"];

fn numeric_rank(name: &str) -> Option<usize> {
    NUMERIC_RANK.iter().position(|p| *p == name)
}

/// Binary numeric promotion of two primitive operand types.
fn promote(left: &str, right: &str) -> Option<&'static str> {
    let rank = numeric_rank(left)?.max(numeric_rank(right)?);
    Some(if rank <= 3 { "int" } else { NUMERIC_RANK[rank] })
}

impl DeclaredTypeOracle {
    fn type_ref(view: &ScopeView<'_, '_>, ty: &TypeRef) -> String {
        let mut name = match view.table.lookup_type_name(&view.ctx, &ty.name) {
            Some(id) => view.table.name_of(id).to_string(),
            None => ty.name.clone(),
        };
        for _ in 0..ty.dims {
            name.push_str("[]");
        }
        name
    }

    fn field_type(view: &ScopeView<'_, '_>, class: ClassId, name: &str) -> ExprType {
        std::iter::once(class)
            .chain(view.table.ancestors(class))
            .find_map(|c| view.table.entry(c)?.field(name).map(|(_, f)| f.ty.clone()))
            .map_or(ExprType::Unknown, ExprType::Known)
    }

    fn method_type(view: &ScopeView<'_, '_>, class: ClassId, name: &str, arity: usize) -> ExprType {
        std::iter::once(class)
            .chain(view.table.ancestors(class))
            .find_map(|c| {
                view.table
                    .entry(c)?
                    .methods_named(name)
                    .find(|(_, m)| m.arity() == arity)
                    .and_then(|(_, m)| m.return_type.clone())
            })
            .map_or(ExprType::Unknown, |ret| ExprType::known(&ret))
    }

    fn class_of(view: &ScopeView<'_, '_>, ty: &ExprType) -> Option<ClassId> {
        match ty {
            ExprType::Known(name) => view
                .table
                .find_known(name)
                .or_else(|| view.table.lookup_type_name(&view.ctx, name)),
            _ => None,
        }
    }
}

impl TypeOracle for DeclaredTypeOracle {
    fn type_of(&self, expr: &Expr, view: &ScopeView<'_, '_>) -> ExprType {
        match expr {
            Expr::Literal(lit) => match lit.value {
                Literal::Null => ExprType::Null,
                ref value => ExprType::Known(value.type_name().to_string()),
            },
            Expr::Name(name) => match view.scope.lookup(&name.name) {
                Some(id) => ExprType::Known(view.scope.var(id).ty.clone()),
                None => ExprType::Unknown,
            },
            Expr::This(_) => view
                .class
                .map_or(ExprType::Unknown, |c| ExprType::Known(view.table.name_of(c).to_string())),
            Expr::FieldAccess(access) => {
                if matches!(*access.target, Expr::This(_)) {
                    return match view.scope.lookup_field(&access.name) {
                        Some(id) => ExprType::Known(view.scope.var(id).ty.clone()),
                        None => ExprType::Unknown,
                    };
                }
                let target = self.type_of(&access.target, view);
                if access.name == "length" && matches!(&target, ExprType::Known(t) if t.ends_with("[]")) {
                    return ExprType::Known("int".to_string());
                }
                match Self::class_of(view, &target) {
                    Some(class) => Self::field_type(view, class, &access.name),
                    None => ExprType::Unknown,
                }
            }
            Expr::Assign(assign) => self.type_of(&assign.target, view),
            Expr::Unary(unary) => match unary.op {
                UnaryOp::Not => ExprType::Known("boolean".to_string()),
                _ => self.type_of(&unary.operand, view),
            },
            Expr::Binary(binary) => {
                if binary.op.is_comparison() || binary.op.is_short_circuit() {
                    return ExprType::Known("boolean".to_string());
                }
                let left = self.type_of(&binary.left, view);
                let right = self.type_of(&binary.right, view);
                let is_string =
                    |t: &ExprType| matches!(t, ExprType::Known(n) if names_equivalent(n, "java.lang.String"));
                if binary.op == BinaryOp::Add && (is_string(&left) || is_string(&right)) {
                    return ExprType::Known("java.lang.String".to_string());
                }
                match (&left, &right) {
                    (ExprType::Known(l), ExprType::Known(r)) if l == "boolean" && r == "boolean" => {
                        ExprType::Known("boolean".to_string())
                    }
                    (ExprType::Known(l), ExprType::Known(r)) => {
                        let promoted = match binary.op {
                            BinaryOp::Shl | BinaryOp::Shr | BinaryOp::UShr => promote(l, l),
                            _ => promote(l, r),
                        };
                        promoted.map_or(ExprType::Unknown, |t| ExprType::Known(t.to_string()))
                    }
                    _ => ExprType::Unknown,
                }
            }
            Expr::Conditional(cond) => {
                let then_ty = self.type_of(&cond.then_expr, view);
                let else_ty = self.type_of(&cond.else_expr, view);
                match (then_ty, else_ty) {
                    (a, b) if a == b => a,
                    (ExprType::Null, other) | (other, ExprType::Null) => other,
                    _ => ExprType::Unknown,
                }
            }
            Expr::Call(call) => {
                let class = match call.target.as_deref() {
                    None | Some(Expr::This(_)) => view.class,
                    Some(target) => Self::class_of(view, &self.type_of(target, view)),
                };
                class.map_or(ExprType::Unknown, |c| {
                    Self::method_type(view, c, &call.name, call.args.len())
                })
            }
            Expr::New(new) => ExprType::Known(Self::type_ref(view, &new.ty)),
            Expr::NewArray(array) => {
                let mut name = Self::type_ref(view, &array.ty);
                for _ in 0..array.dims.len() {
                    name.push_str("[]");
                }
                ExprType::Known(name)
            }
            Expr::Cast(cast) => ExprType::Known(Self::type_ref(view, &cast.ty)),
            Expr::InstanceOf(_) => ExprType::Known("boolean".to_string()),
            Expr::ArrayAccess(access) => match self.type_of(&access.array, view) {
                ExprType::Known(name) => name
                    .strip_suffix("[]")
                    .map_or(ExprType::Unknown, |elem| ExprType::Known(elem.to_string())),
                _ => ExprType::Unknown,
            },
        }
    }
}

#[cfg(test)]
#[path = "../tests/oracle_tests.rs"]
mod tests;
