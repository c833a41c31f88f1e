//! Parameter bindings for parameterized gates.
//!
//! A parameterized gate is bound either to a constant angle or to one of the
//! circuit's declared variables. Only variable-bound gates contribute an
//! entry to the gradient vector.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};

/// The value a parameterized gate is bound to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Parameter {
    /// A fixed numeric angle.
    Constant(f64),
    /// A reference to a declared circuit variable.
    Variable(String),
}

impl Parameter {
    /// Create a constant binding.
    pub fn constant(value: f64) -> Self {
        Parameter::Constant(value)
    }

    /// Create a variable binding.
    pub fn variable(name: impl Into<String>) -> Self {
        Parameter::Variable(name.into())
    }

    /// Check if this binding refers to a variable.
    #[inline]
    pub fn is_variable(&self) -> bool {
        matches!(self, Parameter::Variable(_))
    }

    /// The constant value, if this is a constant binding.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Parameter::Constant(v) => Some(*v),
            Parameter::Variable(_) => None,
        }
    }

    /// The variable name, if this is a variable binding.
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            Parameter::Variable(name) => Some(name),
            Parameter::Constant(_) => None,
        }
    }

    /// Resolve a variable binding against concrete values.
    ///
    /// Constants are returned unchanged.
    pub fn bind(&self, values: &FxHashMap<&str, f64>) -> IrResult<Self> {
        match self {
            Parameter::Constant(_) => Ok(self.clone()),
            Parameter::Variable(name) => values
                .get(name.as_str())
                .map(|v| Parameter::Constant(*v))
                .ok_or_else(|| IrError::UnboundParameter(name.clone())),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Constant(v) => write!(f, "{v}"),
            Parameter::Variable(name) => write!(f, "{name}"),
        }
    }
}

impl From<f64> for Parameter {
    fn from(value: f64) -> Self {
        Parameter::Constant(value)
    }
}

impl From<&str> for Parameter {
    fn from(name: &str) -> Self {
        Parameter::Variable(name.to_string())
    }
}

impl From<String> for Parameter {
    fn from(name: String) -> Self {
        Parameter::Variable(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_constant() {
        let p = Parameter::constant(1.5);
        assert!(!p.is_variable());
        assert_eq!(p.as_f64(), Some(1.5));
        assert_eq!(p.variable_name(), None);
    }

    #[test]
    fn test_variable() {
        let p = Parameter::variable("theta");
        assert!(p.is_variable());
        assert_eq!(p.as_f64(), None);
        assert_eq!(p.variable_name(), Some("theta"));
    }

    #[test]
    fn test_bind() {
        let mut values = FxHashMap::default();
        values.insert("theta", PI / 2.0);

        let bound = Parameter::variable("theta").bind(&values).unwrap();
        assert_eq!(bound, Parameter::Constant(PI / 2.0));

        let constant = Parameter::constant(0.25).bind(&values).unwrap();
        assert_eq!(constant, Parameter::Constant(0.25));
    }

    #[test]
    fn test_bind_missing_variable() {
        let values = FxHashMap::default();
        let err = Parameter::variable("phi").bind(&values).unwrap_err();
        assert!(matches!(err, IrError::UnboundParameter(name) if name == "phi"));
    }

    #[test]
    fn test_untagged_serde() {
        let c: Parameter = serde_json::from_str("1.57").unwrap();
        assert_eq!(c, Parameter::Constant(1.57));
        let v: Parameter = serde_json::from_str("\"a\"").unwrap();
        assert_eq!(v, Parameter::variable("a"));
    }
}
