use crate::{
    prune::reachable,
    registry::{FunctionRegistry, RegisteredFunction},
    sequence::sequence,
};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DependencyEdge {
    pub caller: String,
    pub callee: String,
}

impl DependencyEdge {
    pub fn new(caller: impl Into<String>, callee: impl Into<String>) -> Self {
        Self {
            caller: caller.into(),
            callee: callee.into(),
        }
    }
}

/// Diagnostics collected while extracting; none of them is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionReport {
    /// Registered functions not reachable from any entry point, in registration order.
    pub pruned: Vec<String>,
    /// Calls from live functions to names that were never registered.
    pub dangling: Vec<DependencyEdge>,
    /// Dependencies skipped by the sequencer because they close a cycle.
    pub back_edges: Vec<DependencyEdge>,
}

#[derive(Debug, Clone)]
pub struct Extraction<'a> {
    pub functions: Vec<&'a RegisteredFunction>,
    pub report: ExtractionReport,
}

impl<'a> Extraction<'a> {
    pub fn names(&self) -> Vec<&'a str> {
        self.functions.iter().map(|f| f.name.as_str()).collect()
    }
}

impl FunctionRegistry {
    /// Live functions in emission order.
    ///
    /// Registered entries are left untouched, so repeated calls yield the same sequence, but
    /// the registry is finalized: any later registration fails.
    pub fn extract(&self) -> Vec<&RegisteredFunction> {
        self.extract_report().functions
    }

    pub fn extract_report(&self) -> Extraction<'_> {
        self.finalize();

        let reach = reachable(self);
        let pruned: Vec<String> = self
            .iter()
            .filter(|f| !reach.is_live(&f.name))
            .map(|f| f.name.clone())
            .collect();
        if !pruned.is_empty() {
            debug!(count = pruned.len(), names = ?pruned, "pruned unreachable functions");
        }

        let seq = sequence(self, &reach);
        if !seq.back_edges.is_empty() {
            debug!(cycles = seq.back_edges.len(), "skipped cyclic dependencies while ordering");
        }

        debug!(
            registered = self.len(),
            emitted = seq.order.len(),
            "extracted emission order"
        );

        Extraction {
            functions: seq.order,
            report: ExtractionReport {
                pruned,
                dangling: reach.dangling,
                back_edges: seq.back_edges,
            },
        }
    }
}
