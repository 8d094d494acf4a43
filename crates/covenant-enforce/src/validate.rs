//! The validation algorithm.
//!
//! Called by wrappers at method entry (preconditions) and method exit
//! (postconditions). Both checks read the context once per call, so they see
//! whatever resolvers, factories, and `enabled` state are configured at that
//! moment, not at wrap time.

use covenant_core::method::Method;
use covenant_core::predicate::Predicate;
use covenant_core::value::Value;
use covenant_core::violation::Violation;

use crate::config::ContractContext;

/// Checks the call arguments against the positional predicate list.
///
/// Pairs are checked in ascending index order; the first falsy result wins
/// and no later index is evaluated. Checks stop at the shorter of the two
/// lists: predicates beyond the argument count, and arguments beyond the
/// predicate count, are not checked. When the context is disabled the whole
/// call is skipped.
pub fn check_preconditions(
    ctx: &ContractContext,
    method: &Method,
    predicates: &[Predicate],
    arguments: &[Value],
) -> Result<(), Violation> {
    let config = ctx.snapshot();
    if !config.enabled {
        return Ok(());
    }
    for (index, (predicate, argument)) in predicates.iter().zip(arguments).enumerate() {
        if !predicate.test(argument) {
            let method_name = (config.method_name_resolver)(method);
            let predicate_name = (config.predicate_name_resolver)(predicate);
            return Err((config.precondition_error)(
                &method_name,
                &predicate_name,
                argument,
                index,
            ));
        }
    }
    Ok(())
}

/// Checks the method's return value against the result predicate.
///
/// Returns the value unchanged when the check passes or the context is
/// disabled.
pub fn check_postcondition(
    ctx: &ContractContext,
    method: &Method,
    predicate: &Predicate,
    result: Value,
) -> Result<Value, Violation> {
    let config = ctx.snapshot();
    if !config.enabled {
        return Ok(result);
    }
    if predicate.test(&result) {
        return Ok(result);
    }
    let method_name = (config.method_name_resolver)(method);
    let predicate_name = (config.predicate_name_resolver)(predicate);
    Err((config.postcondition_error)(&method_name, &predicate_name, &result))
}
