/*! Function registry and emission ordering for FunC-style IR.
 *
 * Lowering passes produce IR functions independently: user code, serializers, stdlib helpers,
 * synthetic entry points. This crate collects them in a single registry, infers the call graph
 * from the IR itself, drops everything not reachable from the entry points and hands the emitter
 * one dependency-ordered list that survives mutual recursion.
 */

pub mod extract;
pub mod manifest;
pub mod placement;
pub mod prune;
pub mod registry;
pub mod sequence;
pub mod syntax;
pub mod visit;

pub use extract::{DependencyEdge, Extraction, ExtractionReport};
pub use manifest::{Manifest, Registration};
pub use placement::Placement;
pub use registry::{
    BodyKind, FunctionBody, FunctionInfo, FunctionRegistry, RegisteredFunction,
    RegistrationPolicy,
};
pub use syntax::{
    AsmFunction, BinaryOp, Expr, FuncType, FunctionAttribute, FunctionDefinition, Param, Stmt,
    UnaryOp,
};
pub use visit::{direct_callees, for_each_expression, CallSiteScanner, ExprVisitor};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FuncGenError {
    #[error("Duplicate function: {0}")]
    DuplicateFunction(String),
    #[error("Registry finalized: cannot register {0} after extraction")]
    RegistryFinalized(String),
    #[error("Invalid placement: {0}")]
    InvalidPlacement(String),
    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FuncGenError>;

#[cfg(test)]
mod tests;
