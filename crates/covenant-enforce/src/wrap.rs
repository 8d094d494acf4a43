//! The wrapper generator: swaps a descriptor's method for a checking wrapper.
//!
//! Wrapping happens at most once, at decoration time, and only when the
//! context is enabled at that moment. A context disabled at decoration time
//! returns the descriptor untouched, and that decision is never revisited:
//! enabling contracts later only affects methods decorated while enabled.
//! Installed wrappers, by contrast, read the context live on every call.

use covenant_core::method::{Descriptor, Member, Method};
use covenant_core::predicate::Predicate;

use crate::config::ContractContext;
use crate::error::DecorateError;
use crate::validate::{check_postcondition, check_preconditions};

/// Fixed marker appended to a wrapper's display name, so diagnostics and
/// stack inspection can recognize generated wrappers.
pub const CONTRACT_SUFFIX: &str = "Contract";

/// Installs a precondition wrapper: arguments are validated before the
/// original method runs; its result is returned unchanged.
pub fn wrap_precondition(
    ctx: &ContractContext,
    descriptor: Descriptor,
    predicates: Vec<Predicate>,
) -> Result<Descriptor, DecorateError> {
    wrap(ctx, descriptor, move |context, original, resolved| {
        tracing::debug!(method = %resolved, count = predicates.len(), "installing precondition wrapper");
        Method::wrapped(
            format!("{resolved}{CONTRACT_SUFFIX}"),
            resolved,
            move |arguments| {
                check_preconditions(&context, &original, &predicates, arguments)?;
                original.call(arguments)
            },
        )
    })
}

/// Installs a postcondition wrapper: the original method runs first, then
/// its result passes through the validator before reaching the caller.
pub fn wrap_postcondition(
    ctx: &ContractContext,
    descriptor: Descriptor,
    predicate: Predicate,
) -> Result<Descriptor, DecorateError> {
    wrap(ctx, descriptor, move |context, original, resolved| {
        tracing::debug!(method = %resolved, "installing postcondition wrapper");
        Method::wrapped(
            format!("{resolved}{CONTRACT_SUFFIX}"),
            resolved,
            move |arguments| {
                let result = original.call(arguments)?;
                check_postcondition(&context, &original, &predicate, result)
            },
        )
    })
}

// Shared decoration path. The enabled gate comes before the callable check,
// so a disabled context never raises NotCallable at decoration time.
fn wrap<F>(ctx: &ContractContext, descriptor: Descriptor, build: F) -> Result<Descriptor, DecorateError>
where
    F: FnOnce(ContractContext, Method, String) -> Method,
{
    if !ctx.enabled() {
        return Ok(descriptor);
    }
    let original = match &descriptor.value {
        Member::Method(method) => method.clone(),
        Member::Field(_) => {
            return Err(DecorateError::NotCallable {
                name: descriptor.name.clone(),
            })
        }
    };
    let resolved = (ctx.method_name_resolver())(&original);
    let wrapper = build(ctx.clone(), original, resolved);
    Ok(Descriptor {
        name: descriptor.name,
        value: Member::Method(wrapper),
    })
}

#[cfg(test)]
mod tests {
    use covenant_core::value::Value;
    use covenant_core::violation::ContractKind;
    use proptest::prelude::*;

    use super::*;

    fn enabled_context() -> ContractContext {
        let ctx = ContractContext::new();
        ctx.set_enabled(true);
        ctx
    }

    fn positive() -> Predicate {
        Predicate::named("positive", |v| matches!(v, Value::Int(n) if *n > 0))
    }

    /// Helper: a `sum` method descriptor adding its two integer arguments.
    fn sum_descriptor() -> Descriptor {
        Descriptor::method(
            "sum",
            Method::new("sum", |args| match args {
                [Value::Int(a), Value::Int(b)] => Ok(Value::Int(a + b)),
                _ => Ok(Value::Unit),
            }),
        )
    }

    #[test]
    fn wrapper_carries_suffixed_name_and_original_name() {
        let ctx = enabled_context();
        let wrapped = wrap_precondition(&ctx, sum_descriptor(), vec![positive()]).unwrap();
        let method = wrapped.as_method().unwrap();
        assert_eq!(method.name(), "sumContract");
        assert_eq!(method.contract_name(), Some("sum"));
        assert_eq!(wrapped.name, "sum");
    }

    #[test]
    fn precondition_wrapper_delegates_and_returns_the_original_result() {
        let ctx = enabled_context();
        let wrapped =
            wrap_precondition(&ctx, sum_descriptor(), vec![positive(), positive()]).unwrap();
        let result = wrapped.as_method().unwrap().call(&[Value::Int(2), Value::Int(3)]);
        assert_eq!(result, Ok(Value::Int(5)));
    }

    #[test]
    fn precondition_wrapper_rejects_before_running_the_method() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let ctx = enabled_context();
        let calls = Arc::new(AtomicUsize::new(0));
        let body_calls = Arc::clone(&calls);
        let descriptor = Descriptor::method(
            "record",
            Method::new("record", move |_| {
                body_calls.fetch_add(1, Ordering::SeqCst);
                Ok(Value::Unit)
            }),
        );
        let wrapped = wrap_precondition(&ctx, descriptor, vec![positive()]).unwrap();
        let violation = wrapped.as_method().unwrap().call(&[Value::Int(-1)]).unwrap_err();
        assert_eq!(violation.kind, ContractKind::Precondition);
        assert_eq!(violation.method, "record");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn postcondition_wrapper_checks_after_running_the_method() {
        let ctx = enabled_context();
        let descriptor = Descriptor::method(
            "identity",
            Method::new("identity", |args| Ok(args[0].clone())),
        );
        let two_items = Predicate::named(
            "two_items",
            |v| matches!(v, Value::Array(items) if items.len() == 2),
        );
        let wrapped = wrap_postcondition(&ctx, descriptor, two_items).unwrap();
        let method = wrapped.as_method().unwrap();

        let pair = Value::Array(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(method.call(&[pair.clone()]), Ok(pair));

        let single = Value::Array(vec![Value::Int(1)]);
        let violation = method.call(&[single.clone()]).unwrap_err();
        assert_eq!(violation.kind, ContractKind::Postcondition);
        assert_eq!(violation.value, single);
        assert_eq!(violation.index, None);
    }

    #[test]
    fn disabled_context_returns_the_identical_descriptor() {
        let ctx = ContractContext::new();
        ctx.set_enabled(false);
        let descriptor = sum_descriptor();
        let original = descriptor.as_method().unwrap().clone();
        let result = wrap_precondition(&ctx, descriptor, vec![positive()]).unwrap();
        assert!(result.as_method().unwrap().same_callable(&original));
    }

    #[test]
    fn enabling_later_does_not_retroactively_wrap() {
        let ctx = ContractContext::new();
        ctx.set_enabled(false);
        let wrapped = wrap_precondition(&ctx, sum_descriptor(), vec![positive()]).unwrap();

        ctx.set_enabled(true);
        // The decoration-time snapshot stands: no wrapper exists, so a call
        // that would violate the contract goes straight through.
        let result = wrapped.as_method().unwrap().call(&[Value::Int(-1), Value::Int(1)]);
        assert_eq!(result, Ok(Value::Int(0)));
    }

    #[test]
    fn disabling_later_silences_an_installed_wrapper() {
        let ctx = enabled_context();
        let wrapped = wrap_precondition(&ctx, sum_descriptor(), vec![positive()]).unwrap();
        let method = wrapped.as_method().unwrap();
        assert!(method.call(&[Value::Int(-1), Value::Int(1)]).is_err());

        ctx.set_enabled(false);
        assert_eq!(method.call(&[Value::Int(-1), Value::Int(1)]), Ok(Value::Int(0)));
    }

    #[test]
    fn decorating_a_field_fails_when_enabled() {
        let ctx = enabled_context();
        let descriptor = Descriptor::field("limit", Value::Int(10));
        let err = wrap_precondition(&ctx, descriptor, vec![positive()]).unwrap_err();
        assert!(matches!(err, DecorateError::NotCallable { name } if name == "limit"));
    }

    #[test]
    fn decorating_a_field_is_ignored_when_disabled() {
        let ctx = ContractContext::new();
        ctx.set_enabled(false);
        let descriptor = Descriptor::field("limit", Value::Int(10));
        let result = wrap_postcondition(&ctx, descriptor, positive()).unwrap();
        assert!(matches!(result.value, Member::Field(Value::Int(10))));
    }

    #[test]
    fn nested_wrappers_keep_attributing_to_the_original() {
        let ctx = enabled_context();
        let once = wrap_precondition(&ctx, sum_descriptor(), vec![positive()]).unwrap();
        let twice = wrap_postcondition(
            &ctx,
            once,
            Predicate::named("any", |_: &Value| true),
        )
        .unwrap();
        let method = twice.as_method().unwrap();
        // The outer wrapper resolved the inner one's carried original name.
        assert_eq!(method.name(), "sumContract");
        assert_eq!(method.contract_name(), Some("sum"));

        let violation = method.call(&[Value::Int(-1), Value::Int(1)]).unwrap_err();
        assert_eq!(violation.method, "sum");
    }

    proptest! {
        // With every argument satisfying its predicate, the wrapper is
        // observationally identical to the original method.
        #[test]
        fn wrapped_call_matches_original_when_contracts_hold(
            args in proptest::collection::vec(1i64..100, 2..6)
        ) {
            let ctx = enabled_context();
            let wrapped =
                wrap_precondition(&ctx, sum_descriptor(), vec![positive(), positive()]).unwrap();
            let arguments: Vec<Value> = args.iter().map(|n| Value::Int(*n)).collect();
            let original = sum_descriptor();
            prop_assert_eq!(
                wrapped.as_method().unwrap().call(&arguments),
                original.as_method().unwrap().call(&arguments)
            );
        }
    }

    #[test]
    fn reconfigured_factory_changes_what_existing_wrappers_raise() {
        use std::sync::Arc;

        use crate::config::ConfigPatch;
        use covenant_core::violation::Violation;

        let ctx = enabled_context();
        let wrapped = wrap_precondition(&ctx, sum_descriptor(), vec![positive()]).unwrap();

        ctx.configure(ConfigPatch {
            precondition_error: Some(Arc::new(|method, predicate, value, index| Violation {
                kind: ContractKind::Precondition,
                method: method.to_string(),
                predicate: predicate.to_string(),
                value: value.clone(),
                index: Some(index),
                message: format!("broken covenant on {method}"),
            })),
            ..ConfigPatch::default()
        });

        let violation = wrapped
            .as_method()
            .unwrap()
            .call(&[Value::Int(-1), Value::Int(1)])
            .unwrap_err();
        assert_eq!(violation.message, "broken covenant on sum");
    }
}
