//! Semantic analysis: name resolution, static types and call-site generics

pub mod builtins;
mod evaluator;
mod extract;
mod generics;
mod scope;
mod validator;

pub use evaluator::{block_type, expression_type};
pub use extract::{call_target, resolve_type, CallTarget};
pub use generics::{check_function_call, check_generic_function_call, infer_generic_return_type, CallError};
pub use scope::{Scope, ValueEntry};
pub use validator::validate;
