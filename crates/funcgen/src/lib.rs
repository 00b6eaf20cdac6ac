/*! Single import for registering lowered functions and emitting them in dependency order.
 *
 * Register every function a lowering pass produces, call `extract` once, and hand the result to
 * the emitter. Unreachable helpers are dropped and callees always precede their callers.
 */

pub use funcgen_core as core;
pub use funcgen_emit as emit;

pub use funcgen_core::{
    extract::{DependencyEdge, Extraction, ExtractionReport},
    manifest::Manifest,
    placement::Placement,
    registry::{FunctionBody, FunctionInfo, FunctionRegistry, RegisteredFunction, RegistrationPolicy},
    syntax::{AsmFunction, Expr, FuncType, FunctionAttribute, FunctionDefinition, Param, Stmt},
    FuncGenError, Result,
};

pub use funcgen_emit::{EmitterConfig, FuncEmitter, OutputFormat};
