//! JSON description of a sequence of registrations.
//!
//! Lets a registry be rebuilt outside a compiler run, e.g. to inspect why a helper was dropped.

use crate::{
    registry::{FunctionInfo, FunctionRegistry, RegistrationPolicy},
    syntax::{AsmFunction, FunctionDefinition},
    Result,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Registration {
    Ordinary {
        definition: FunctionDefinition,
        #[serde(default)]
        info: FunctionInfo,
    },
    Asm {
        definition: AsmFunction,
        #[serde(default)]
        info: FunctionInfo,
    },
    Placeholder {
        name: String,
        #[serde(default)]
        info: FunctionInfo,
    },
}

impl Registration {
    pub fn name(&self) -> &str {
        match self {
            Registration::Ordinary { definition, .. } => &definition.name,
            Registration::Asm { definition, .. } => &definition.name,
            Registration::Placeholder { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub policy: RegistrationPolicy,
    #[serde(default)]
    pub functions: Vec<Registration>,
}

impl Manifest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replays the registrations, in order, into `registry`.
    pub fn apply(&self, registry: &mut FunctionRegistry) -> Result<()> {
        for registration in &self.functions {
            match registration.clone() {
                Registration::Ordinary { definition, info } => {
                    registry.register_ordinary(definition, info)?
                }
                Registration::Asm { definition, info } => {
                    registry.register_assembly(definition, info)?
                }
                Registration::Placeholder { name, info } => {
                    registry.register_placeholder(name, info)?
                }
            }
        }
        Ok(())
    }

    pub fn into_registry(self) -> Result<FunctionRegistry> {
        let mut registry = FunctionRegistry::with_policy(self.policy);
        self.apply(&mut registry)?;
        Ok(registry)
    }
}
