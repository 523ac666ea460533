//! Programmatic AST construction.
//!
//! The checker consumes trees from an external parser; `AstBuilder` is the
//! in-process way to produce the same trees (tests, embedders, tooling). It
//! hands out fresh, unique `NodeId`s for every node it creates.

use crate::expr::{
    ArrayAccessExpr, AssignExpr, BinaryExpr, BinaryOp, CallExpr, CastExpr, ConditionalExpr, Expr,
    FieldAccessExpr, InstanceOfExpr, Literal, LiteralExpr, NameExpr, NewArrayExpr, NewExpr,
    UnaryExpr, UnaryOp,
};
use crate::modifiers::Modifiers;
use crate::node::{
    CompilationUnit, ConstructorDecl, FieldDecl, ImportDecl, InitializerDecl, Member, MethodDecl,
    Param, TypeDecl, TypeKind, TypeRef,
};
use crate::stmt::{
    Block, CatchClause, ConstructorCallKind, ConstructorCallStmt, DoWhileStmt, ExprStmt,
    ForEachStmt, ForStmt, IfStmt, JumpStmt, LocalVarDecl, ReturnStmt, Stmt, ThrowStmt, TryStmt,
    WhileStmt,
};
use jck_common::NodeId;
use std::cell::Cell;

/// Allocates node ids while building declarations, statements and expressions.
///
/// All methods take `&self` so calls can be nested freely:
/// `b.class("A", ..., vec![b.field(...)])`.
#[derive(Debug, Default)]
pub struct AstBuilder {
    next: Cell<u32>,
}

impl AstBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue numbering after `start` (useful when merging with parsed trees).
    #[must_use]
    pub fn starting_at(start: u32) -> Self {
        Self {
            next: Cell::new(start),
        }
    }

    pub fn id(&self) -> NodeId {
        let id = self.next.get();
        self.next.set(id + 1);
        NodeId(id)
    }

    // =========================================================================
    // Units and declarations
    // =========================================================================

    pub fn unit(
        &self,
        file: &str,
        package: Option<&str>,
        imports: Vec<ImportDecl>,
        types: Vec<TypeDecl>,
    ) -> CompilationUnit {
        CompilationUnit {
            file: file.to_string(),
            package: package.map(str::to_string),
            imports,
            types,
        }
    }

    pub fn import(&self, name: &str) -> ImportDecl {
        ImportDecl {
            id: self.id(),
            name: name.to_string(),
            wildcard: false,
        }
    }

    pub fn import_all(&self, package: &str) -> ImportDecl {
        ImportDecl {
            id: self.id(),
            name: package.to_string(),
            wildcard: true,
        }
    }

    pub fn class(
        &self,
        modifiers: Modifiers,
        name: &str,
        extends: Option<&str>,
        members: Vec<Member>,
    ) -> TypeDecl {
        TypeDecl {
            id: self.id(),
            kind: TypeKind::Class,
            name: name.to_string(),
            modifiers,
            extends: extends.map(|e| self.ty(e)),
            interfaces: Vec::new(),
            members,
        }
    }

    pub fn interface(
        &self,
        modifiers: Modifiers,
        name: &str,
        extends: &[&str],
        members: Vec<Member>,
    ) -> TypeDecl {
        TypeDecl {
            id: self.id(),
            kind: TypeKind::Interface,
            name: name.to_string(),
            modifiers,
            extends: None,
            interfaces: extends.iter().map(|e| self.ty(e)).collect(),
            members,
        }
    }

    /// Add `implements` clauses to a class declaration.
    pub fn implementing(&self, mut decl: TypeDecl, interfaces: &[&str]) -> TypeDecl {
        decl.interfaces
            .extend(interfaces.iter().map(|name| self.ty(name)));
        decl
    }

    pub fn nested(&self, decl: TypeDecl) -> Member {
        Member::Type(decl)
    }

    pub fn field(&self, modifiers: Modifiers, ty: &str, name: &str, init: Option<Expr>) -> Member {
        Member::Field(FieldDecl {
            id: self.id(),
            modifiers,
            ty: self.ty(ty),
            name: name.to_string(),
            init,
        })
    }

    pub fn method(
        &self,
        modifiers: Modifiers,
        return_type: &str,
        name: &str,
        params: Vec<Param>,
        body: Option<Vec<Stmt>>,
    ) -> Member {
        Member::Method(MethodDecl {
            id: self.id(),
            modifiers,
            return_type: self.ty(return_type),
            name: name.to_string(),
            params,
            throws: Vec::new(),
            body: body.map(|stmts| self.block(stmts)),
        })
    }

    pub fn constructor(
        &self,
        modifiers: Modifiers,
        name: &str,
        params: Vec<Param>,
        body: Vec<Stmt>,
    ) -> Member {
        Member::Constructor(ConstructorDecl {
            id: self.id(),
            modifiers,
            name: name.to_string(),
            params,
            throws: Vec::new(),
            body: self.block(body),
        })
    }

    pub fn initializer(&self, is_static: bool, body: Vec<Stmt>) -> Member {
        Member::Initializer(InitializerDecl {
            id: self.id(),
            is_static,
            body: self.block(body),
        })
    }

    pub fn param(&self, ty: &str, name: &str) -> Param {
        Param {
            id: self.id(),
            modifiers: Modifiers::empty(),
            ty: self.ty(ty),
            name: name.to_string(),
        }
    }

    pub fn final_param(&self, ty: &str, name: &str) -> Param {
        Param {
            modifiers: Modifiers::FINAL,
            ..self.param(ty, name)
        }
    }

    /// Type reference; a trailing `[]` per array dimension is accepted.
    pub fn ty(&self, text: &str) -> TypeRef {
        let mut name = text.trim();
        let mut dims = 0u8;
        while let Some(stripped) = name.strip_suffix("[]") {
            name = stripped.trim_end();
            dims += 1;
        }
        TypeRef {
            id: self.id(),
            name: name.to_string(),
            dims,
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub fn block(&self, stmts: Vec<Stmt>) -> Block {
        Block {
            id: self.id(),
            stmts,
        }
    }

    pub fn block_stmt(&self, stmts: Vec<Stmt>) -> Stmt {
        Stmt::Block(self.block(stmts))
    }

    pub fn local(&self, modifiers: Modifiers, ty: &str, name: &str, init: Option<Expr>) -> Stmt {
        Stmt::LocalVar(self.local_decl(modifiers, ty, name, init))
    }

    pub fn local_decl(
        &self,
        modifiers: Modifiers,
        ty: &str,
        name: &str,
        init: Option<Expr>,
    ) -> LocalVarDecl {
        LocalVarDecl {
            id: self.id(),
            modifiers,
            ty: self.ty(ty),
            name: name.to_string(),
            init,
        }
    }

    pub fn expr_stmt(&self, expr: Expr) -> Stmt {
        Stmt::Expr(ExprStmt {
            id: self.id(),
            expr,
        })
    }

    /// `name = value;`
    pub fn assign(&self, name: &str, value: Expr) -> Stmt {
        let target = self.name(name);
        self.expr_stmt(self.assign_expr(target, value))
    }

    /// `this.name = value;`
    pub fn assign_this(&self, name: &str, value: Expr) -> Stmt {
        let target = self.field_access(self.this(), name);
        self.expr_stmt(self.assign_expr(target, value))
    }

    pub fn if_(&self, cond: Expr, then_branch: Vec<Stmt>, else_branch: Option<Vec<Stmt>>) -> Stmt {
        Stmt::If(IfStmt {
            id: self.id(),
            cond,
            then_branch: Box::new(self.block_stmt(then_branch)),
            else_branch: else_branch.map(|stmts| Box::new(self.block_stmt(stmts))),
        })
    }

    pub fn while_(&self, cond: Expr, body: Vec<Stmt>) -> Stmt {
        Stmt::While(WhileStmt {
            id: self.id(),
            cond,
            body: Box::new(self.block_stmt(body)),
        })
    }

    pub fn do_while(&self, body: Vec<Stmt>, cond: Expr) -> Stmt {
        Stmt::DoWhile(DoWhileStmt {
            id: self.id(),
            body: Box::new(self.block_stmt(body)),
            cond,
        })
    }

    pub fn for_(
        &self,
        init: Vec<Stmt>,
        cond: Option<Expr>,
        update: Vec<Expr>,
        body: Vec<Stmt>,
    ) -> Stmt {
        Stmt::For(ForStmt {
            id: self.id(),
            init,
            cond,
            update,
            body: Box::new(self.block_stmt(body)),
        })
    }

    pub fn for_each(&self, ty: &str, name: &str, iterable: Expr, body: Vec<Stmt>) -> Stmt {
        Stmt::ForEach(ForEachStmt {
            id: self.id(),
            var: self.local_decl(Modifiers::empty(), ty, name, None),
            iterable,
            body: Box::new(self.block_stmt(body)),
        })
    }

    pub fn return_(&self, value: Option<Expr>) -> Stmt {
        Stmt::Return(ReturnStmt {
            id: self.id(),
            value,
        })
    }

    pub fn throw_(&self, expr: Expr) -> Stmt {
        Stmt::Throw(ThrowStmt {
            id: self.id(),
            expr,
        })
    }

    pub fn break_(&self) -> Stmt {
        Stmt::Break(JumpStmt {
            id: self.id(),
            label: None,
        })
    }

    pub fn continue_(&self) -> Stmt {
        Stmt::Continue(JumpStmt {
            id: self.id(),
            label: None,
        })
    }

    pub fn try_(
        &self,
        block: Vec<Stmt>,
        catches: Vec<(Param, Vec<Stmt>)>,
        finally: Option<Vec<Stmt>>,
    ) -> Stmt {
        Stmt::Try(TryStmt {
            id: self.id(),
            block: self.block(block),
            catches: catches
                .into_iter()
                .map(|(param, body)| CatchClause {
                    id: self.id(),
                    param,
                    body: self.block(body),
                })
                .collect(),
            finally: finally.map(|stmts| self.block(stmts)),
        })
    }

    pub fn this_call(&self, args: Vec<Expr>) -> Stmt {
        Stmt::ConstructorCall(ConstructorCallStmt {
            id: self.id(),
            kind: ConstructorCallKind::This,
            args,
        })
    }

    pub fn super_call(&self, args: Vec<Expr>) -> Stmt {
        Stmt::ConstructorCall(ConstructorCallStmt {
            id: self.id(),
            kind: ConstructorCallKind::Super,
            args,
        })
    }

    pub fn empty(&self) -> Stmt {
        Stmt::Empty(self.id())
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    pub fn literal(&self, value: Literal) -> Expr {
        Expr::Literal(LiteralExpr {
            id: self.id(),
            value,
        })
    }

    pub fn int(&self, value: i64) -> Expr {
        self.literal(Literal::Int(value))
    }

    pub fn bool_(&self, value: bool) -> Expr {
        self.literal(Literal::Bool(value))
    }

    pub fn str_(&self, value: &str) -> Expr {
        self.literal(Literal::String(value.to_string()))
    }

    pub fn null(&self) -> Expr {
        self.literal(Literal::Null)
    }

    pub fn name(&self, name: &str) -> Expr {
        Expr::Name(NameExpr {
            id: self.id(),
            name: name.to_string(),
        })
    }

    pub fn this(&self) -> Expr {
        Expr::This(self.id())
    }

    pub fn field_access(&self, target: Expr, name: &str) -> Expr {
        Expr::FieldAccess(FieldAccessExpr {
            id: self.id(),
            target: Box::new(target),
            name: name.to_string(),
        })
    }

    pub fn assign_expr(&self, target: Expr, value: Expr) -> Expr {
        Expr::Assign(AssignExpr {
            id: self.id(),
            op: None,
            target: Box::new(target),
            value: Box::new(value),
        })
    }

    pub fn compound_assign(&self, op: BinaryOp, target: Expr, value: Expr) -> Expr {
        Expr::Assign(AssignExpr {
            id: self.id(),
            op: Some(op),
            target: Box::new(target),
            value: Box::new(value),
        })
    }

    pub fn unary(&self, op: UnaryOp, operand: Expr) -> Expr {
        Expr::Unary(UnaryExpr {
            id: self.id(),
            op,
            operand: Box::new(operand),
        })
    }

    pub fn binary(&self, op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary(BinaryExpr {
            id: self.id(),
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn conditional(&self, cond: Expr, then_expr: Expr, else_expr: Expr) -> Expr {
        Expr::Conditional(ConditionalExpr {
            id: self.id(),
            cond: Box::new(cond),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
        })
    }

    pub fn call(&self, target: Option<Expr>, name: &str, args: Vec<Expr>) -> Expr {
        Expr::Call(CallExpr {
            id: self.id(),
            target: target.map(Box::new),
            name: name.to_string(),
            args,
        })
    }

    pub fn new_(&self, ty: &str, args: Vec<Expr>) -> Expr {
        Expr::New(NewExpr {
            id: self.id(),
            ty: self.ty(ty),
            args,
        })
    }

    pub fn new_array(&self, ty: &str, dims: Vec<Expr>) -> Expr {
        Expr::NewArray(NewArrayExpr {
            id: self.id(),
            ty: self.ty(ty),
            dims,
        })
    }

    pub fn cast(&self, ty: &str, expr: Expr) -> Expr {
        Expr::Cast(CastExpr {
            id: self.id(),
            ty: self.ty(ty),
            expr: Box::new(expr),
        })
    }

    pub fn instance_of(&self, expr: Expr, ty: &str) -> Expr {
        Expr::InstanceOf(InstanceOfExpr {
            id: self.id(),
            expr: Box::new(expr),
            ty: self.ty(ty),
        })
    }

    pub fn index(&self, array: Expr, index: Expr) -> Expr {
        Expr::ArrayAccess(ArrayAccessExpr {
            id: self.id(),
            array: Box::new(array),
            index: Box::new(index),
        })
    }
}

#[cfg(test)]
#[path = "../tests/builder_tests.rs"]
mod tests;
