//! Methods, members, and the descriptor record the wrapping engine rewrites.
//!
//! A [`Method`] is a named callable over [`Value`] slices. Generated wrappers
//! are plain `Method`s too, distinguished only by data: their display name
//! carries a fixed suffix and [`Method::contract_name`] holds the resolved
//! name of the original, so diagnostics and nested decoration keep
//! attributing work to the right method without any synthesized code.

use std::fmt;
use std::sync::Arc;

use crate::value::Value;
use crate::violation::Violation;

/// The callable shape of a method body.
pub type MethodFn = Arc<dyn Fn(&[Value]) -> Result<Value, Violation> + Send + Sync>;

/// A named callable member.
#[derive(Clone)]
pub struct Method {
    name: String,
    contract_name: Option<String>,
    func: MethodFn,
}

impl Method {
    /// Creates a plain (unwrapped) method.
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Violation> + Send + Sync + 'static,
    {
        Method {
            name: name.into(),
            contract_name: None,
            func: Arc::new(func),
        }
    }

    /// Creates a generated wrapper method.
    ///
    /// `name` is the wrapper's own display name (the original's resolved name
    /// plus the wrapper suffix); `contract_name` is the resolved name of the
    /// wrapped original.
    pub fn wrapped<F>(name: impl Into<String>, contract_name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Violation> + Send + Sync + 'static,
    {
        Method {
            name: name.into(),
            contract_name: Some(contract_name.into()),
            func: Arc::new(func),
        }
    }

    /// Invokes the callable.
    pub fn call(&self, arguments: &[Value]) -> Result<Value, Violation> {
        (self.func)(arguments)
    }

    /// The callable's own declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// For wrappers, the resolved name of the original method.
    pub fn contract_name(&self) -> Option<&str> {
        self.contract_name.as_deref()
    }

    /// Whether two methods share the identical underlying callable.
    pub fn same_callable(&self, other: &Method) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("name", &self.name)
            .field("contract_name", &self.contract_name)
            .finish_non_exhaustive()
    }
}

/// A decoratable class member: a callable method or a plain data field.
///
/// Fields exist so the wrapping engine can reject contracts on data members.
#[derive(Debug, Clone)]
pub enum Member {
    Method(Method),
    Field(Value),
}

/// A member descriptor: the record the host hands to a decorator.
///
/// Wrapping swaps `value` for a wrapper method; `name` never changes.
#[derive(Debug, Clone)]
pub struct Descriptor {
    pub name: String,
    pub value: Member,
}

impl Descriptor {
    /// Describes a callable member.
    pub fn method(name: impl Into<String>, method: Method) -> Self {
        Descriptor {
            name: name.into(),
            value: Member::Method(method),
        }
    }

    /// Describes a data member.
    pub fn field(name: impl Into<String>, value: Value) -> Self {
        Descriptor {
            name: name.into(),
            value: Member::Field(value),
        }
    }

    /// The member's method, when it is one.
    pub fn as_method(&self) -> Option<&Method> {
        match &self.value {
            Member::Method(method) => Some(method),
            Member::Field(_) => None,
        }
    }
}
