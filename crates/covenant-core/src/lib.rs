pub mod method;
pub mod predicate;
pub mod value;
pub mod violation;

// Re-export commonly used types
pub use method::{Descriptor, Member, Method, MethodFn};
pub use predicate::{Predicate, PredicateFn};
pub use value::Value;
pub use violation::{ContractKind, Violation};
