//! Contract violation diagnostics.
//!
//! A [`Violation`] is raised, never stored: it is built by the active error
//! factory the moment a predicate fails and returned to the caller of the
//! wrapped method. Serde derives let callers ship violations to external
//! tooling unchanged.

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// The kind of contract that was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractKind {
    /// An argument check run before the method body executes.
    Precondition,
    /// A result check run after the method body executes.
    Postcondition,
}

/// A structured contract violation.
///
/// Carries everything diagnostics need: the resolved method name, the
/// resolved predicate name, the offending value, and (for preconditions) the
/// zero-based index of the offending argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct Violation {
    /// What kind of contract was violated.
    pub kind: ContractKind,
    /// Resolved name of the method whose contract failed.
    pub method: String,
    /// Resolved name of the predicate that rejected the value.
    pub predicate: String,
    /// The offending argument or result value.
    pub value: Value,
    /// Zero-based argument index; `None` for postconditions.
    pub index: Option<usize>,
    /// Human-readable description, produced by the active error factory.
    pub message: String,
}
