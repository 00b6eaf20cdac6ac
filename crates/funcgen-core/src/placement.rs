use crate::FuncGenError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output section a function is written into.
///
/// Placement only groups definitions for the emitter; it never affects ordering. The string
/// form (`stdlib`, `constants`, `type:<name>`) is what the emitter uses as a section key and
/// what manifests store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Placement {
    Stdlib,
    Constants,
    Type(String),
}

impl Placement {
    pub fn stdlib() -> Self {
        Placement::Stdlib
    }

    pub fn constants() -> Self {
        Placement::Constants
    }

    pub fn of_type(name: impl Into<String>) -> Self {
        Placement::Type(name.into())
    }

    pub fn type_name(&self) -> Option<&str> {
        match self {
            Placement::Type(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Stdlib => write!(f, "stdlib"),
            Placement::Constants => write!(f, "constants"),
            Placement::Type(name) => write!(f, "type:{}", name),
        }
    }
}

impl FromStr for Placement {
    type Err = FuncGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stdlib" => Ok(Placement::Stdlib),
            "constants" => Ok(Placement::Constants),
            _ => match s.strip_prefix("type:") {
                Some(name) if !name.is_empty() => Ok(Placement::Type(name.to_string())),
                _ => Err(FuncGenError::InvalidPlacement(s.to_string())),
            },
        }
    }
}

impl TryFrom<String> for Placement {
    type Error = FuncGenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Placement> for String {
    fn from(placement: Placement) -> Self {
        placement.to_string()
    }
}
