//! Decorator factories: the public entry points a host composes with.
//!
//! A [`Decorator`] is a value, not syntax: `apply` takes a member descriptor
//! and returns the transformed descriptor, so any composition point (manual
//! wrapping, a builder, a registry) can use it. Factories validate their own
//! inputs up front; everything else is read live from the context when the
//! decorator is applied and when wrapped methods are called.

use covenant_core::method::Descriptor;
use covenant_core::predicate::Predicate;

use crate::config::{global, ContractContext};
use crate::error::DecorateError;
use crate::wrap::{wrap_postcondition, wrap_precondition};

/// The contract payload a decorator installs.
#[derive(Debug, Clone)]
enum Contract {
    Precondition(Vec<Predicate>),
    Postcondition(Predicate),
}

/// A pending contract, ready to be applied to method descriptors.
#[derive(Debug, Clone)]
pub struct Decorator {
    context: ContractContext,
    contract: Contract,
}

impl Decorator {
    /// Applies the contract to a member descriptor, returning the descriptor
    /// produced by the wrapper generator.
    pub fn apply(&self, descriptor: Descriptor) -> Result<Descriptor, DecorateError> {
        match &self.contract {
            Contract::Precondition(predicates) => {
                wrap_precondition(&self.context, descriptor, predicates.clone())
            }
            Contract::Postcondition(predicate) => {
                wrap_postcondition(&self.context, descriptor, predicate.clone())
            }
        }
    }
}

impl ContractContext {
    /// Builds a precondition decorator bound to this context. Each predicate
    /// validates the argument at its own position.
    pub fn precondition(&self, predicates: Vec<Predicate>) -> Result<Decorator, DecorateError> {
        if predicates.is_empty() {
            return Err(DecorateError::NoPredicates);
        }
        Ok(Decorator {
            context: self.clone(),
            contract: Contract::Precondition(predicates),
        })
    }

    /// Builds a postcondition decorator bound to this context. Exactly one
    /// predicate validates the return value.
    pub fn postcondition(&self, predicate: Predicate) -> Decorator {
        Decorator {
            context: self.clone(),
            contract: Contract::Postcondition(predicate),
        }
    }
}

/// Builds a precondition decorator bound to the process-wide context.
pub fn precondition(predicates: Vec<Predicate>) -> Result<Decorator, DecorateError> {
    global().precondition(predicates)
}

/// Builds a postcondition decorator bound to the process-wide context.
pub fn postcondition(predicate: Predicate) -> Decorator {
    global().postcondition(predicate)
}
