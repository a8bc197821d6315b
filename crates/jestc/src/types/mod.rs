//! Type system for Jest
//!
//! The closed [`Type`] algebra, the [`FunctionDeclaration`] model that
//! semantic analysis checks calls against, and record layouts.

mod function;
mod record;
mod ty;

pub use function::{positional_names, FunctionDeclaration};
pub use record::RecordDeclaration;
pub use ty::{GenericParameter, Type};
