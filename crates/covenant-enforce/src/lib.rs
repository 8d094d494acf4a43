//! Contract enforcement for dynamically typed methods. Arguments are checked
//! against positional predicates before a call and the result against a
//! single predicate after it. Wrappers read a shared configuration context on
//! every invocation, so resolvers and violation factories can be swapped at
//! runtime without re-wrapping anything.

pub mod config;
pub mod decorate;
pub mod error;
pub mod report;
pub mod resolve;
pub mod validate;
pub mod wrap;

// Re-export commonly used types
pub use config::{configure, global, ConfigPatch, ContractContext};
pub use decorate::{postcondition, precondition, Decorator};
pub use error::DecorateError;
pub use validate::{check_postcondition, check_preconditions};
pub use wrap::{wrap_postcondition, wrap_precondition, CONTRACT_SUFFIX};
