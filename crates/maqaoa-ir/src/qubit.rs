//! Qubit and classical bit identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::IrError;

/// Unique identifier for a qubit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// Position of this qubit in a statevector index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

impl TryFrom<usize> for QubitId {
    type Error = IrError;

    fn try_from(id: usize) -> Result<Self, Self::Error> {
        u32::try_from(id)
            .map(QubitId)
            .map_err(|_| IrError::IdOverflow(id))
    }
}

/// Unique identifier for a classical bit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClbitId(pub u32);

impl ClbitId {
    /// Position of this bit in a readout register.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl From<u32> for ClbitId {
    fn from(id: u32) -> Self {
        ClbitId(id)
    }
}

impl TryFrom<usize> for ClbitId {
    type Error = IrError;

    fn try_from(id: usize) -> Result<Self, Self::Error> {
        u32::try_from(id)
            .map(ClbitId)
            .map_err(|_| IrError::IdOverflow(id))
    }
}
