/*! Render an extracted function list as FunC source.
 *
 * The registry decides what is emitted and in which order; this crate only turns that list into
 * text. Placeholders are skipped, placement drives section grouping, and entry points are listed
 * so a dispatch table can be wired up by whoever assembles the final contract.
 */

pub mod config;
pub mod emitter;
pub mod formatter;
pub mod func_emitter;
pub mod output;

pub use config::{EmitterConfig, IndentStyle};
pub use emitter::{EmitContext, EmitHelper, EmitResult, Emitter};
pub use formatter::FuncFormatter;
pub use func_emitter::{FuncEmitter, FunctionEmitter, Section};
pub use output::{EmissionRecord, OutputFormat};
