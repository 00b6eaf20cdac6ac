//! Cycle-tolerant dependency ordering of the live functions.

use crate::{
    extract::DependencyEdge,
    prune::Reachability,
    registry::{FunctionRegistry, RegisteredFunction},
};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

struct Frame<'a> {
    function: &'a RegisteredFunction,
    next_dep: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Sequence<'a> {
    pub order: Vec<&'a RegisteredFunction>,
    /// Edges into a function whose traversal was still in progress, i.e. cycles.
    pub back_edges: Vec<DependencyEdge>,
}

/// Orders the live functions so that dependencies come before their callers.
///
/// Post-order DFS over an explicit work stack. Traversals start from live functions in
/// registration order and follow dependencies in their recorded order, which makes the
/// output deterministic. An edge to an in-progress function closes a cycle and is skipped;
/// the partner is appended once its own traversal finishes.
pub fn sequence<'a>(registry: &'a FunctionRegistry, reach: &Reachability<'a>) -> Sequence<'a> {
    let mut state: HashMap<&'a str, VisitState> = HashMap::with_capacity(reach.live.len());
    let mut result = Sequence {
        order: Vec::with_capacity(reach.live.len()),
        back_edges: Vec::new(),
    };
    let mut stack: Vec<Frame<'a>> = Vec::new();

    for start in registry.iter().filter(|f| reach.is_live(&f.name)) {
        if state.get(start.name.as_str()).copied().unwrap_or(VisitState::Unvisited)
            != VisitState::Unvisited
        {
            continue;
        }

        state.insert(start.name.as_str(), VisitState::InProgress);
        stack.push(Frame {
            function: start,
            next_dep: 0,
        });

        while let Some(frame) = stack.last_mut() {
            let current = frame.function;
            let Some(dep) = current.dependencies.get_index(frame.next_dep) else {
                stack.pop();
                state.insert(current.name.as_str(), VisitState::Done);
                result.order.push(current);
                continue;
            };
            frame.next_dep += 1;

            let Some(target) = registry.get(dep).filter(|f| reach.is_live(&f.name)) else {
                continue;
            };

            match state
                .get(target.name.as_str())
                .copied()
                .unwrap_or(VisitState::Unvisited)
            {
                VisitState::Unvisited => {
                    state.insert(target.name.as_str(), VisitState::InProgress);
                    stack.push(Frame {
                        function: target,
                        next_dep: 0,
                    });
                }
                VisitState::InProgress => {
                    result
                        .back_edges
                        .push(DependencyEdge::new(&current.name, &target.name));
                }
                VisitState::Done => {}
            }
        }
    }

    result
}
