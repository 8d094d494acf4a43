//! Predicates: one-value tests supplied by contract declaration sites.
//!
//! A predicate owns its test closure and the naming data the diagnostic
//! resolvers read: an optional declared label, and the closure's compiler
//! type name captured at construction as the fallback for anonymous
//! predicates.

use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// The callable shape of a predicate test.
pub type PredicateFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A single-value test with an associated displayable name.
#[derive(Clone)]
pub struct Predicate {
    label: Option<String>,
    type_name: &'static str,
    func: PredicateFn,
}

impl Predicate {
    /// Creates an anonymous predicate. Its displayable name falls back to
    /// the closure's compiler type name.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Predicate {
            label: None,
            type_name: std::any::type_name::<F>(),
            func: Arc::new(func),
        }
    }

    /// Creates a predicate with a declared name.
    pub fn named<F>(label: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Predicate {
            label: Some(label.into()),
            type_name: std::any::type_name::<F>(),
            func: Arc::new(func),
        }
    }

    /// Runs the test against one value.
    pub fn test(&self, value: &Value) -> bool {
        (self.func)(value)
    }

    /// The declared name, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The closure's compiler type name, captured at construction.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("label", &self.label)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
