//! Live contract configuration.
//!
//! [`ContractContext`] is an explicit configuration object shared by every
//! wrapper built from it: cloning the context clones an `Arc`, so all clones
//! see the same store. Wrappers read the store on every invocation, which is
//! what makes runtime reconfiguration affect methods wrapped long before.
//!
//! The process-wide default context lives behind [`global`]; tests that need
//! isolated settings construct their own context instead of mutating it.

use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use covenant_core::method::Method;
use covenant_core::predicate::Predicate;
use covenant_core::value::Value;
use covenant_core::violation::Violation;

use crate::report::{self, PostconditionErrorFactory, PreconditionErrorFactory};
use crate::resolve::{self, MethodNameResolver, PredicateNameResolver};

/// Environment variable consulted once, at context construction, for the
/// default `enabled` state.
pub const ENV_VAR: &str = "COVENANT_CONTRACTS";

/// The five contract settings.
///
/// Held behind the context's lock; [`ContractContext::snapshot`] clones it
/// (cheap `Arc` bumps) so a checked call reads a consistent view once.
#[derive(Clone)]
pub struct ContractConfig {
    /// Whether contract checking is active.
    pub enabled: bool,
    /// Maps a method to its diagnostic name.
    pub method_name_resolver: MethodNameResolver,
    /// Maps a predicate to its diagnostic name.
    pub predicate_name_resolver: PredicateNameResolver,
    /// Builds precondition violations.
    pub precondition_error: PreconditionErrorFactory,
    /// Builds postcondition violations.
    pub postcondition_error: PostconditionErrorFactory,
}

impl ContractConfig {
    /// Default settings: `enabled` from the environment signal, default
    /// resolvers and factories.
    fn from_environment() -> Self {
        ContractConfig {
            enabled: enabled_from_environment(),
            method_name_resolver: Arc::new(resolve::default_method_name),
            predicate_name_resolver: Arc::new(resolve::default_predicate_name),
            precondition_error: Arc::new(report::precondition_violation),
            postcondition_error: Arc::new(report::postcondition_violation),
        }
    }
}

fn enabled_from_environment() -> bool {
    parse_enabled_signal(std::env::var(ENV_VAR).ok().as_deref())
}

// Unset or unrecognized values fall back to the build profile, so debug
// builds check contracts and release builds skip them unless told otherwise.
fn parse_enabled_signal(value: Option<&str>) -> bool {
    match value {
        Some("1") | Some("true") | Some("on") => true,
        Some("0") | Some("false") | Some("off") => false,
        _ => cfg!(debug_assertions),
    }
}

/// A partial configuration for [`ContractContext::configure`].
///
/// Only `Some` fields are applied; the rest of the store is untouched.
#[derive(Default)]
pub struct ConfigPatch {
    pub enabled: Option<bool>,
    pub method_name_resolver: Option<MethodNameResolver>,
    pub predicate_name_resolver: Option<PredicateNameResolver>,
    pub precondition_error: Option<PreconditionErrorFactory>,
    pub postcondition_error: Option<PostconditionErrorFactory>,
}

/// Shared, live-read contract configuration.
#[derive(Clone)]
pub struct ContractContext {
    inner: Arc<RwLock<ContractConfig>>,
}

impl ContractContext {
    /// Creates an independent context with default settings. The environment
    /// signal is read here, once.
    pub fn new() -> Self {
        ContractContext {
            inner: Arc::new(RwLock::new(ContractConfig::from_environment())),
        }
    }

    /// Clones the current settings in one lock acquisition.
    pub(crate) fn snapshot(&self) -> ContractConfig {
        self.inner.read().clone()
    }

    /// Whether contract checking is currently active.
    pub fn enabled(&self) -> bool {
        self.inner.read().enabled
    }

    /// Toggles contract checking. Affects future calls through wrappers that
    /// already exist; it does not install or remove wrappers.
    pub fn set_enabled(&self, enabled: bool) {
        self.inner.write().enabled = enabled;
        tracing::debug!(enabled, "contract checking toggled");
    }

    /// The active method-name resolver.
    pub fn method_name_resolver(&self) -> MethodNameResolver {
        self.inner.read().method_name_resolver.clone()
    }

    /// Replaces the method-name resolver, atomically and for all wrappers.
    pub fn set_method_name_resolver<F>(&self, resolver: F)
    where
        F: Fn(&Method) -> String + Send + Sync + 'static,
    {
        self.inner.write().method_name_resolver = Arc::new(resolver);
        tracing::debug!("method name resolver replaced");
    }

    /// The active predicate-name resolver.
    pub fn predicate_name_resolver(&self) -> PredicateNameResolver {
        self.inner.read().predicate_name_resolver.clone()
    }

    /// Replaces the predicate-name resolver, atomically and for all wrappers.
    pub fn set_predicate_name_resolver<F>(&self, resolver: F)
    where
        F: Fn(&Predicate) -> String + Send + Sync + 'static,
    {
        self.inner.write().predicate_name_resolver = Arc::new(resolver);
        tracing::debug!("predicate name resolver replaced");
    }

    /// The active precondition violation factory.
    pub fn precondition_error(&self) -> PreconditionErrorFactory {
        self.inner.read().precondition_error.clone()
    }

    /// Replaces the precondition violation factory.
    pub fn set_precondition_error<F>(&self, factory: F)
    where
        F: Fn(&str, &str, &Value, usize) -> Violation + Send + Sync + 'static,
    {
        self.inner.write().precondition_error = Arc::new(factory);
        tracing::debug!("precondition error factory replaced");
    }

    /// The active postcondition violation factory.
    pub fn postcondition_error(&self) -> PostconditionErrorFactory {
        self.inner.read().postcondition_error.clone()
    }

    /// Replaces the postcondition violation factory.
    pub fn set_postcondition_error<F>(&self, factory: F)
    where
        F: Fn(&str, &str, &Value) -> Violation + Send + Sync + 'static,
    {
        self.inner.write().postcondition_error = Arc::new(factory);
        tracing::debug!("postcondition error factory replaced");
    }

    /// Applies the `Some` fields of a patch, left to right, under one write
    /// lock. Absent fields keep their current values.
    pub fn configure(&self, patch: ConfigPatch) {
        let mut config = self.inner.write();
        if let Some(enabled) = patch.enabled {
            config.enabled = enabled;
        }
        if let Some(resolver) = patch.method_name_resolver {
            config.method_name_resolver = resolver;
        }
        if let Some(resolver) = patch.predicate_name_resolver {
            config.predicate_name_resolver = resolver;
        }
        if let Some(factory) = patch.precondition_error {
            config.precondition_error = factory;
        }
        if let Some(factory) = patch.postcondition_error {
            config.postcondition_error = factory;
        }
        tracing::debug!("contract configuration updated");
    }
}

impl Default for ContractContext {
    fn default() -> Self {
        ContractContext::new()
    }
}

impl std::fmt::Debug for ContractContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractContext")
            .field("enabled", &self.enabled())
            .finish_non_exhaustive()
    }
}

static GLOBAL: OnceLock<ContractContext> = OnceLock::new();

/// The process-wide default context, initialized on first use.
pub fn global() -> &'static ContractContext {
    GLOBAL.get_or_init(ContractContext::new)
}

/// Applies a patch to the process-wide context.
pub fn configure(patch: ConfigPatch) {
    global().configure(patch);
}

#[cfg(test)]
mod tests {
    use covenant_core::violation::ContractKind;

    use super::*;

    #[test]
    fn parse_enabled_signal_recognizes_on_and_off_values() {
        assert!(parse_enabled_signal(Some("1")));
        assert!(parse_enabled_signal(Some("true")));
        assert!(parse_enabled_signal(Some("on")));
        assert!(!parse_enabled_signal(Some("0")));
        assert!(!parse_enabled_signal(Some("false")));
        assert!(!parse_enabled_signal(Some("off")));
    }

    #[test]
    fn parse_enabled_signal_falls_back_to_build_profile() {
        assert_eq!(parse_enabled_signal(None), cfg!(debug_assertions));
        assert_eq!(parse_enabled_signal(Some("maybe")), cfg!(debug_assertions));
    }

    #[test]
    fn set_enabled_is_visible_to_readers() {
        let ctx = ContractContext::new();
        ctx.set_enabled(false);
        assert!(!ctx.enabled());
        ctx.set_enabled(true);
        assert!(ctx.enabled());
    }

    #[test]
    fn contexts_are_independent_but_clones_share_state() {
        let a = ContractContext::new();
        let b = ContractContext::new();
        a.set_enabled(false);
        b.set_enabled(true);
        assert!(!a.enabled());
        assert!(b.enabled());

        let shared = a.clone();
        shared.set_enabled(true);
        assert!(a.enabled());
    }

    #[test]
    fn configure_applies_only_present_fields() {
        let ctx = ContractContext::new();
        ctx.set_enabled(true);
        ctx.configure(ConfigPatch {
            predicate_name_resolver: Some(Arc::new(|_| "renamed".to_string())),
            ..ConfigPatch::default()
        });

        // enabled untouched, resolver replaced
        assert!(ctx.enabled());
        let predicate = Predicate::named("positive", |_: &Value| true);
        assert_eq!((ctx.predicate_name_resolver())(&predicate), "renamed");
        // the other resolver keeps its default
        let method = Method::new("sum", |_| Ok(Value::Unit));
        assert_eq!((ctx.method_name_resolver())(&method), "sum");
    }

    #[test]
    fn replaced_factory_is_what_readers_get_back() {
        let ctx = ContractContext::new();
        ctx.set_precondition_error(|method, predicate, value, index| Violation {
            kind: ContractKind::Precondition,
            method: method.to_string(),
            predicate: predicate.to_string(),
            value: value.clone(),
            index: Some(index),
            message: "custom".to_string(),
        });
        let violation = (ctx.precondition_error())("m", "p", &Value::Int(0), 3);
        assert_eq!(violation.message, "custom");
        assert_eq!(violation.index, Some(3));
    }

    #[test]
    fn global_returns_the_same_context() {
        // Read-only: the global store is shared across the whole test binary.
        let a = global();
        let b = global();
        assert!(std::ptr::eq(a, b));
    }
}
