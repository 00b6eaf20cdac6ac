//! Static traversal of function bodies.
//!
//! Every statement and every expression nested in it is visited exactly once, in source order.
//! Nothing here simulates evaluation: both arms of a conditional and the bodies of loops that
//! might never run are walked all the same.

use crate::syntax::{Expr, FunctionDefinition, Stmt};
use indexmap::IndexSet;

/// Visitor over IR statements and expressions.
///
/// Override the hooks you care about; the default implementations delegate to the
/// `walk_*` functions so the rest of the tree is still traversed.
pub trait ExprVisitor: Sized {
    fn visit_function(&mut self, function: &FunctionDefinition) {
        walk_function(self, function)
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt)
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr)
    }
}

pub fn walk_function<V: ExprVisitor>(visitor: &mut V, function: &FunctionDefinition) {
    walk_stmts(visitor, &function.body);
}

pub fn walk_stmts<V: ExprVisitor>(visitor: &mut V, stmts: &[Stmt]) {
    for stmt in stmts {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_stmt<V: ExprVisitor>(visitor: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::Block(stmts) => walk_stmts(visitor, stmts),
        Stmt::Let { target, value, .. } => {
            visitor.visit_expr(target);
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
        }
        Stmt::Assign { target, value, .. } => {
            visitor.visit_expr(target);
            visitor.visit_expr(value);
        }
        Stmt::Expr(expr) | Stmt::Return(expr) => visitor.visit_expr(expr),
        Stmt::If {
            cond,
            then,
            otherwise,
            ..
        } => {
            visitor.visit_expr(cond);
            walk_stmts(visitor, then);
            if let Some(otherwise) = otherwise {
                walk_stmts(visitor, otherwise);
            }
        }
        Stmt::Repeat { count, body } => {
            visitor.visit_expr(count);
            walk_stmts(visitor, body);
        }
        Stmt::While { cond, body } => {
            visitor.visit_expr(cond);
            walk_stmts(visitor, body);
        }
        Stmt::DoUntil { body, cond } => {
            walk_stmts(visitor, body);
            visitor.visit_expr(cond);
        }
        Stmt::TryCatch { body, handler, .. } => {
            walk_stmts(visitor, body);
            walk_stmts(visitor, handler);
        }
    }
}

pub fn walk_expr<V: ExprVisitor>(visitor: &mut V, expr: &Expr) {
    match expr {
        Expr::Id(_)
        | Expr::Int(_)
        | Expr::Bool(_)
        | Expr::Str(_)
        | Expr::Nil
        | Expr::Hole => {}
        Expr::Call { fun, args } => {
            visitor.visit_expr(fun);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        Expr::MethodCall { receiver, args, .. } => {
            visitor.visit_expr(receiver);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        Expr::Binary { lhs, rhs, .. } => {
            visitor.visit_expr(lhs);
            visitor.visit_expr(rhs);
        }
        Expr::Unary { operand, .. } => visitor.visit_expr(operand),
        Expr::Ternary {
            cond,
            then,
            otherwise,
        } => {
            visitor.visit_expr(cond);
            visitor.visit_expr(then);
            visitor.visit_expr(otherwise);
        }
        Expr::Tensor(items) | Expr::Tuple(items) => {
            for item in items {
                visitor.visit_expr(item);
            }
        }
    }
}

struct ClosureVisitor<F> {
    callback: F,
}

impl<F: FnMut(&Expr)> ExprVisitor for ClosureVisitor<F> {
    fn visit_expr(&mut self, expr: &Expr) {
        (self.callback)(expr);
        walk_expr(self, expr);
    }
}

/// Calls `callback` on every expression of `function`, outer expressions before inner ones.
pub fn for_each_expression<F: FnMut(&Expr)>(function: &FunctionDefinition, callback: F) {
    let mut visitor = ClosureVisitor { callback };
    visitor.visit_function(function);
}

/// Collects the names of functions invoked through direct calls.
///
/// Only calls whose callee is a bare identifier count. Method-style calls (`x.foo()`,
/// `x~foo()`) are dispatched on a receiver and are not recorded; their receiver and arguments
/// are still scanned. Callers that depend on such functions must declare them explicitly via
/// [`FunctionInfo::with_dependencies`](crate::registry::FunctionInfo::with_dependencies).
#[derive(Debug, Default)]
pub struct CallSiteScanner {
    callees: IndexSet<String>,
}

impl CallSiteScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scan(mut self, function: &FunctionDefinition) -> IndexSet<String> {
        self.visit_function(function);
        self.callees
    }
}

impl ExprVisitor for CallSiteScanner {
    fn visit_expr(&mut self, expr: &Expr) {
        if let Expr::Call { fun, .. } = expr {
            if let Expr::Id(name) = fun.as_ref() {
                self.callees.insert(name.clone());
            }
        }
        walk_expr(self, expr);
    }
}

/// Distinct direct callees of `function` in first-occurrence order.
pub fn direct_callees(function: &FunctionDefinition) -> IndexSet<String> {
    CallSiteScanner::new().scan(function)
}
