//! Decoration-time error types.
//!
//! These are raised synchronously while a decorator is being built or
//! applied, before any wrapper exists. Contract violations at call time are
//! a separate type, [`covenant_core::Violation`].

use thiserror::Error;

/// Errors raised while building or applying a decorator.
#[derive(Debug, Error)]
pub enum DecorateError {
    /// A precondition decorator was requested with an empty predicate list.
    #[error("at least one predicate must be passed")]
    NoPredicates,

    /// The decorated member is a data field, not a method.
    #[error("member \"{name}\" is not callable: only methods can carry contracts")]
    NotCallable { name: String },
}
