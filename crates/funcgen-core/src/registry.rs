use crate::{
    placement::Placement,
    syntax::{AsmFunction, FuncType, FunctionAttribute, FunctionDefinition, Param, Stmt},
    visit::direct_callees,
    FuncGenError, Result,
};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Asm,
    Placeholder,
    Ordinary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "definition", rename_all = "snake_case")]
pub enum FunctionBody {
    Ordinary(FunctionDefinition),
    Asm(AsmFunction),
    /// Defined elsewhere; never emitted but still a valid dependency target.
    Placeholder,
}

impl FunctionBody {
    pub fn kind(&self) -> BodyKind {
        match self {
            FunctionBody::Ordinary(_) => BodyKind::Ordinary,
            FunctionBody::Asm(_) => BodyKind::Asm,
            FunctionBody::Placeholder => BodyKind::Placeholder,
        }
    }
}

/// Registration-time metadata supplied by the lowering pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionInfo {
    pub placement: Option<Placement>,
    pub entry_point: bool,
    /// Dependencies the call-site scanner cannot discover on its own.
    pub depends_on: Vec<String>,
}

impl FunctionInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    pub fn as_entry_point(mut self) -> Self {
        self.entry_point = true;
        self
    }

    pub fn with_dependencies<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on.extend(names.into_iter().map(Into::into));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredFunction {
    pub name: String,
    pub body: FunctionBody,
    pub placement: Option<Placement>,
    pub is_entry_point: bool,
    pub dependencies: IndexSet<String>,
}

impl RegisteredFunction {
    pub fn kind(&self) -> BodyKind {
        self.body.kind()
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.body, FunctionBody::Placeholder)
    }

    pub fn definition(&self) -> Option<&FunctionDefinition> {
        match &self.body {
            FunctionBody::Ordinary(def) => Some(def),
            _ => None,
        }
    }

    pub fn asm(&self) -> Option<&AsmFunction> {
        match &self.body {
            FunctionBody::Asm(asm) => Some(asm),
            _ => None,
        }
    }
}

/// What happens when a name is registered twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationPolicy {
    /// Insert-or-replace: the last registration wins.
    #[default]
    Overwrite,
    /// A second registration fails with [`FuncGenError::DuplicateFunction`].
    Strict,
}

/// Every function generated for one compilation unit.
///
/// Entries keep the position of their first registration, so iteration order (and therefore
/// the tie-breaking of [`extract`](FunctionRegistry::extract)) is reproducible. A replacement
/// swaps the whole entry, dependency set included.
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    functions: IndexMap<String, RegisteredFunction>,
    policy: RegistrationPolicy,
    finalized: Cell<bool>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: RegistrationPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> RegistrationPolicy {
        self.policy
    }

    pub fn register_ordinary(
        &mut self,
        definition: FunctionDefinition,
        info: FunctionInfo,
    ) -> Result<()> {
        let mut dependencies = direct_callees(&definition);
        dependencies.extend(info.depends_on);
        self.insert(RegisteredFunction {
            name: definition.name.clone(),
            body: FunctionBody::Ordinary(definition),
            placement: info.placement,
            is_entry_point: info.entry_point,
            dependencies,
        })
    }

    pub fn register_assembly(&mut self, definition: AsmFunction, info: FunctionInfo) -> Result<()> {
        self.insert(RegisteredFunction {
            name: definition.name.clone(),
            body: FunctionBody::Asm(definition),
            placement: info.placement,
            is_entry_point: info.entry_point,
            dependencies: info.depends_on.into_iter().collect(),
        })
    }

    pub fn register_placeholder(&mut self, name: impl Into<String>, info: FunctionInfo) -> Result<()> {
        self.insert(RegisteredFunction {
            name: name.into(),
            body: FunctionBody::Placeholder,
            placement: info.placement,
            is_entry_point: info.entry_point,
            dependencies: info.depends_on.into_iter().collect(),
        })
    }

    /// Builds an ordinary function, registers it and hands it back to the caller.
    pub fn fun(
        &mut self,
        attrs: Vec<FunctionAttribute>,
        name: impl Into<String>,
        params: Vec<Param>,
        return_ty: FuncType,
        body: Vec<Stmt>,
        info: FunctionInfo,
    ) -> Result<FunctionDefinition> {
        let definition = FunctionDefinition::new(name, params, return_ty, body).with_attrs(attrs);
        self.register_ordinary(definition.clone(), info)?;
        Ok(definition)
    }

    pub fn asm(
        &mut self,
        attrs: Vec<FunctionAttribute>,
        name: impl Into<String>,
        params: Vec<Param>,
        return_ty: FuncType,
        asm: impl Into<String>,
        info: FunctionInfo,
    ) -> Result<AsmFunction> {
        let definition = AsmFunction::new(name, params, return_ty, asm).with_attrs(attrs);
        self.register_assembly(definition.clone(), info)?;
        Ok(definition)
    }

    /// Records a name that is defined outside the generated code.
    pub fn skip(&mut self, name: impl Into<String>, info: FunctionInfo) -> Result<()> {
        self.register_placeholder(name, info)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredFunction> {
        self.functions.get(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// All entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredFunction> {
        self.functions.values()
    }

    pub fn entry_points(&self) -> impl Iterator<Item = &RegisteredFunction> {
        self.iter().filter(|f| f.is_entry_point)
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized.get()
    }

    pub(crate) fn finalize(&self) {
        self.finalized.set(true);
    }

    fn insert(&mut self, function: RegisteredFunction) -> Result<()> {
        if self.finalized.get() {
            return Err(FuncGenError::RegistryFinalized(function.name));
        }

        if self.functions.contains_key(&function.name) {
            if self.policy == RegistrationPolicy::Strict {
                return Err(FuncGenError::DuplicateFunction(function.name));
            }
            debug!(name = %function.name, kind = ?function.kind(), "replacing registered function");
        }

        trace!(
            name = %function.name,
            kind = ?function.kind(),
            dependencies = function.dependencies.len(),
            entry_point = function.is_entry_point,
            "registering function"
        );
        self.functions.insert(function.name.clone(), function);
        Ok(())
    }
}
