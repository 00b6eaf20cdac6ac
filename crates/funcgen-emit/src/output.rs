use anyhow::Result;
use funcgen_core::{BodyKind, RegisteredFunction};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One extracted function as seen by tooling that does not render FunC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmissionRecord {
    pub index: usize,
    pub name: String,
    pub kind: BodyKind,
    pub placement: Option<String>,
    pub entry_point: bool,
    pub dependencies: Vec<String>,
}

impl EmissionRecord {
    pub fn new(index: usize, function: &RegisteredFunction) -> Self {
        Self {
            index,
            name: function.name.clone(),
            kind: function.kind(),
            placement: function.placement.as_ref().map(ToString::to_string),
            entry_point: function.is_entry_point,
            dependencies: function.dependencies.iter().cloned().collect(),
        }
    }
}

pub fn records(functions: &[&RegisteredFunction]) -> Vec<EmissionRecord> {
    functions
        .iter()
        .enumerate()
        .map(|(index, function)| EmissionRecord::new(index, function))
        .collect()
}

pub fn to_json(functions: &[&RegisteredFunction]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&records(functions))?)
}
