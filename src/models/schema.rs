//! Declarative constructor schemas.
//!
//! Each model registers an ordered list of parameters alongside itself
//! instead of having its constructor discovered at runtime.
//!
//! Epistemic foundation:
//! - K_i: Parameter order is declaration order
//! - B_i: A type annotation may not be expressible as a flag → checked at startup
//! - I^R: Parameters without defaults become required flags

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value type a flag is converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Int,
    Float,
    Bool,
    Str,
}

impl ParamType {
    /// Resolve a declared annotation into a flag type.
    ///
    /// Returns `(type, nullable)`; a missing annotation is untyped and
    /// handled as a string. `None` means the annotation cannot be
    /// expressed as a flag.
    pub fn from_annotation(annotation: Option<&str>) -> Option<(Self, bool)> {
        let Some(annotation) = annotation.map(str::trim) else {
            return Some((Self::Str, false));
        };

        if let Some(inner) = annotation
            .strip_prefix("Optional[")
            .and_then(|rest| rest.strip_suffix(']'))
        {
            let (ty, _) = Self::from_annotation(Some(inner))?;
            return Some((ty, true));
        }

        let ty = match annotation {
            "int" => Self::Int,
            "float" => Self::Float,
            "bool" => Self::Bool,
            "str" => Self::Str,
            _ => return None,
        };
        Some((ty, false))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Str => "str",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A constructor argument value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl ParamValue {
    /// Whether this value can stand as a default for a parameter of `ty`.
    pub fn fits(&self, ty: ParamType, nullable: bool) -> bool {
        match (self, ty) {
            (Self::Null, _) => nullable,
            (Self::Int(_), ParamType::Int | ParamType::Float)
            | (Self::Float(_), ParamType::Float)
            | (Self::Bool(_), ParamType::Bool)
            | (Self::Str(_), ParamType::Str) => true,
            _ => false,
        }
    }

    /// Coerce to the representation the flag parser produces for `ty`.
    ///
    /// Only widens integers declared as float defaults.
    pub fn coerce(self, ty: ParamType) -> Self {
        match (self, ty) {
            (Self::Int(v), ParamType::Float) => Self::Float(v as f64),
            (value, _) => value,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("None"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// One formal constructor parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter name as written in the constructor (snake_case)
    pub name: String,

    /// Declared type annotation, if any (e.g. "int", "Optional[float]")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,

    /// Default value; absent means the flag is required
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ParamValue>,
}

impl ParamSpec {
    /// A required parameter with the given annotation.
    pub fn new(name: impl Into<String>, annotation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotation: Some(annotation.into()),
            default: None,
        }
    }

    /// A parameter without any annotation.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotation: None,
            default: None,
        }
    }

    /// Attach a default value, making the flag optional.
    pub fn default(mut self, value: impl Into<ParamValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Attach a `None` default.
    pub fn default_none(mut self) -> Self {
        self.default = Some(ParamValue::Null);
        self
    }

    /// Kebab-cased flag name (`embedding_dim` → `embedding-dim`).
    pub fn flag_name(&self) -> String {
        self.name.trim_matches('_').replace('_', "-")
    }
}
