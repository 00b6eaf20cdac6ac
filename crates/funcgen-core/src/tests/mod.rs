/*! Unit coverage for registration, scanning, pruning and ordering.
 *
 * Each test builds a fresh registry; nothing is shared between tests.
 */

mod placement_tests;

use crate::syntax::{Expr, FuncType, FunctionDefinition, Stmt};

/// Ordinary function whose body calls each of `callees` once, in order.
pub(crate) fn calling(name: &str, callees: &[&str]) -> FunctionDefinition {
    let body = callees
        .iter()
        .map(|callee| Stmt::expr(Expr::call(*callee, vec![])))
        .collect();
    FunctionDefinition::new(name, vec![], FuncType::Unit, body)
}
