//! Jest Compiler - semantic analysis for the Jest language
//!
//! Checks a Jest program for name resolution and static typing errors before
//! code generation. Annotations are optional: anything whose type cannot be
//! determined statically is accepted, so only provable mistakes are reported.
//!
//! ## Architecture
//!
//! - **Syntax** (`syntax/`): Lexer, parser and the tree the checker walks
//! - **Types** (`types/`): Static types and function declarations
//! - **Sema** (`sema/`): Scopes, the prelude, the expression type evaluator,
//!   call-site generic checking and the validator
//! - **Driver** (`driver/`): The lex, parse and validate pipeline
//! - **Common** (`common/`): Shared infrastructure (errors, spans)

pub mod common;
pub mod types;
pub mod syntax;
pub mod sema;
pub mod driver;

// Re-exports for convenience
pub use common::{CompileError, CompileResult, DiagnosticReporter, Span, ValidationError, ValidationResult};
pub use driver::{check_source, is_valid, CheckConfig, CheckContext};
pub use sema::validate;
pub use types::{FunctionDeclaration, Type};
