//! Violation factories.
//!
//! Factories are capability closures: given the resolved method name, the
//! resolved predicate name, and the offending value (plus the argument index
//! for preconditions), they produce the [`Violation`] the wrapped call
//! returns. Replacing a factory through the configuration store changes what
//! already-wrapped methods raise.

use std::sync::Arc;

use covenant_core::value::Value;
use covenant_core::violation::{ContractKind, Violation};

/// Builds the violation for a failed argument check.
pub type PreconditionErrorFactory = Arc<dyn Fn(&str, &str, &Value, usize) -> Violation + Send + Sync>;

/// Builds the violation for a failed result check.
pub type PostconditionErrorFactory = Arc<dyn Fn(&str, &str, &Value) -> Violation + Send + Sync>;

/// Default precondition factory: full diagnostic context with a descriptive
/// message naming the argument index, method, predicate, and value.
pub fn precondition_violation(method: &str, predicate: &str, value: &Value, index: usize) -> Violation {
    Violation {
        kind: ContractKind::Precondition,
        method: method.to_string(),
        predicate: predicate.to_string(),
        value: value.clone(),
        index: Some(index),
        message: format!(
            "precondition failed: argument #{index} of method \"{method}\" must satisfy predicate \"{predicate}\" but it does not: {value}"
        ),
    }
}

/// Default postcondition factory.
pub fn postcondition_violation(method: &str, predicate: &str, value: &Value) -> Violation {
    Violation {
        kind: ContractKind::Postcondition,
        method: method.to_string(),
        predicate: predicate.to_string(),
        value: value.clone(),
        index: None,
        message: format!(
            "postcondition failed: result of method \"{method}\" must satisfy predicate \"{predicate}\" but it does not: {value}"
        ),
    }
}
