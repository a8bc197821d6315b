//! Common infrastructure shared by the front end and semantic analysis

mod error;
mod span;

pub use error::{
    CompileError, CompileResult, DiagnosticReporter, ErrorCategory, InternalError,
    ValidationError, ValidationResult,
};
pub use span::Span;
