//! Name resolvers: pure functions mapping a method or predicate to the
//! diagnostic string embedded in violations. Both are pluggable through the
//! configuration store and are invoked with the original method (never the
//! wrapper) at call time.

use std::sync::Arc;

use covenant_core::method::Method;
use covenant_core::predicate::Predicate;

/// Resolves a method to its displayable name.
pub type MethodNameResolver = Arc<dyn Fn(&Method) -> String + Send + Sync>;

/// Resolves a predicate to its displayable name.
pub type PredicateNameResolver = Arc<dyn Fn(&Predicate) -> String + Send + Sync>;

/// Default method-name resolution: the wrapper-carried original name when
/// present, otherwise the method's own declared name.
pub fn default_method_name(method: &Method) -> String {
    method.contract_name().unwrap_or(method.name()).to_string()
}

/// Default predicate-name resolution: the declared label when present,
/// otherwise the closure's compiler type name.
pub fn default_predicate_name(predicate: &Predicate) -> String {
    match predicate.label() {
        Some(label) => label.to_string(),
        None => predicate.type_name().to_string(),
    }
}
