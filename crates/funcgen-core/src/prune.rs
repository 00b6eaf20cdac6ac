//! Dead-function elimination by reachability from the entry points.

use crate::{extract::DependencyEdge, registry::FunctionRegistry};
use indexmap::IndexSet;

#[derive(Debug, Clone, Default)]
pub struct Reachability<'a> {
    /// Live names in discovery order.
    pub live: IndexSet<&'a str>,
    /// Edges from a live function to a name that is not registered.
    pub dangling: Vec<DependencyEdge>,
}

impl<'a> Reachability<'a> {
    pub fn is_live(&self, name: &str) -> bool {
        self.live.contains(name)
    }
}

/// Computes the functions transitively reachable from every entry point.
///
/// A name is marked live before its dependencies are pushed, so self-recursion and longer
/// cycles are visited once. Unknown dependency names are recorded and otherwise ignored.
pub fn reachable<'a>(registry: &'a FunctionRegistry) -> Reachability<'a> {
    let mut result = Reachability::default();
    let mut stack: Vec<&'a str> = Vec::new();

    for root in registry.entry_points() {
        if result.live.insert(root.name.as_str()) {
            stack.push(root.name.as_str());
        }
    }

    while let Some(name) = stack.pop() {
        let Some(function) = registry.get(name) else {
            continue;
        };

        for dep in &function.dependencies {
            match registry.get(dep) {
                Some(target) => {
                    if result.live.insert(target.name.as_str()) {
                        stack.push(target.name.as_str());
                    }
                }
                None => result.dangling.push(DependencyEdge::new(name, dep)),
            }
        }
    }

    result
}
