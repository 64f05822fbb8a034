//! Rotation angles that may still be symbolic.
//!
//! A template circuit carries [`ParameterExpression::Symbol`] angles named
//! after the slots of a [`ParameterVector`]; binding replaces each symbol
//! with a constant without touching circuit structure.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};

/// A rotation angle: either known or a named placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterExpression {
    /// Concrete angle in radians.
    Constant(f64),
    /// Placeholder resolved at bind time.
    Symbol(String),
}

impl ParameterExpression {
    pub fn constant(value: f64) -> Self {
        Self::Constant(value)
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// True for placeholders.
    pub fn is_symbolic(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }

    /// The angle, once known.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Constant(v) => Some(v),
            Self::Symbol(_) => None,
        }
    }

    /// Placeholder name, if any.
    pub fn symbol_name(&self) -> Option<&str> {
        match self {
            Self::Symbol(name) => Some(name),
            Self::Constant(_) => None,
        }
    }

    /// Replace the symbol `name` with `value`; anything else is returned as is.
    #[must_use]
    pub fn bind(&self, name: &str, value: f64) -> Self {
        match self.symbol_name() {
            Some(n) if n == name => Self::Constant(value),
            _ => self.clone(),
        }
    }

    /// Look the symbol up in `values`. Missing symbols stay symbolic.
    #[must_use]
    pub fn resolve(&self, values: &FxHashMap<String, f64>) -> Self {
        self.symbol_name()
            .and_then(|name| values.get(name))
            .map_or_else(|| self.clone(), |&v| Self::Constant(v))
    }
}

impl fmt::Display for ParameterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(v) => write!(f, "{v:.4}"),
            Self::Symbol(name) => f.write_str(name),
        }
    }
}

impl From<f64> for ParameterExpression {
    fn from(value: f64) -> Self {
        Self::Constant(value)
    }
}

/// Symbols `name[0]`, ..., `name[len-1]` bound positionally.
///
/// Slot `i` of the value slice passed to [`bindings`](Self::bindings) goes
/// to `name[i]`, so the order in which a builder hands out slots is the
/// angle layout callers must follow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterVector {
    name: String,
    len: usize,
}

impl ParameterVector {
    pub fn new(name: impl Into<String>, len: usize) -> Self {
        Self {
            name: name.into(),
            len,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `name[index]`, without a bounds check.
    pub fn symbol_name(&self, index: usize) -> String {
        format!("{}[{index}]", self.name)
    }

    /// Placeholder for slot `index`.
    pub fn get(&self, index: usize) -> IrResult<ParameterExpression> {
        if index < self.len {
            Ok(ParameterExpression::Symbol(self.symbol_name(index)))
        } else {
            Err(IrError::ParameterIndexOutOfRange {
                name: self.name.clone(),
                index,
                len: self.len,
            })
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = ParameterExpression> + '_ {
        (0..self.len).map(|i| ParameterExpression::Symbol(self.symbol_name(i)))
    }

    /// Symbol-to-value map for exactly `len` finite values.
    pub fn bindings(&self, values: &[f64]) -> IrResult<FxHashMap<String, f64>> {
        if values.len() != self.len {
            return Err(IrError::ParameterCountMismatch {
                name: self.name.clone(),
                expected: self.len,
                got: values.len(),
            });
        }
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let symbol = self.symbol_name(i);
                if value.is_finite() {
                    Ok((symbol, value))
                } else {
                    Err(IrError::NonFiniteValue { symbol, value })
                }
            })
            .collect()
    }
}
