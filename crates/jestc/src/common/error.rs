//! Error types and diagnostic reporting

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use thiserror::Error;
use super::Span;
use crate::types::Type;

/// Error raised while turning source text into a checked program
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Lexer error at {span}: {message}")]
    Lexer { message: String, span: Span },

    #[error("Parser error at {span}: {message}")]
    Parser { message: String, span: Span },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompileError {
    pub fn lexer(message: impl Into<String>, span: Span) -> Self {
        Self::Lexer {
            message: message.into(),
            span,
        }
    }

    pub fn parser(message: impl Into<String>, span: Span) -> Self {
        Self::Parser {
            message: message.into(),
            span,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            CompileError::Lexer { span, .. } | CompileError::Parser { span, .. } => Some(*span),
            CompileError::Validation(err) => Some(err.span()),
            CompileError::Io(_) => None,
        }
    }
}

pub type CompileResult<T> = Result<T, CompileError>;

/// Broad grouping of validation errors, used for diagnostics headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Scope,
    Resolution,
    Shape,
    Type,
    Generics,
}

impl ErrorCategory {
    pub fn title(self) -> &'static str {
        match self {
            ErrorCategory::Scope => "Scope error",
            ErrorCategory::Resolution => "Resolution error",
            ErrorCategory::Shape => "Shape error",
            ErrorCategory::Type => "Type error",
            ErrorCategory::Generics => "Generics error",
        }
    }
}

/// A user-facing semantic error. Validation stops at the first one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("variable '{name}' is already declared in this scope")]
    VariableAlreadyDeclared { name: String, span: Span },

    #[error("function '{name}' is already declared in this scope")]
    FunctionAlreadyDeclared { name: String, span: Span },

    #[error("unknown variable '{name}'")]
    UnknownVariable { name: String, span: Span },

    #[error("unknown function '{name}'")]
    UnknownFunction { name: String, span: Span },

    #[error("unknown type '{name}'")]
    UnknownType { name: String, span: Span },

    #[error("function '{function}' expects {expected} argument(s) but was called with {actual}")]
    ParameterNumberMismatch {
        function: String,
        expected: usize,
        actual: usize,
        span: Span,
    },

    #[error("parameter '{parameter}' of function '{function}' expects {expected} but was given {actual}")]
    ParameterCategoryMismatch {
        function: String,
        parameter: String,
        expected: Type,
        actual: Type,
        span: Span,
    },

    #[error("conditional branches have different types: {expected} and {actual}")]
    BranchTypeMismatch {
        expected: Type,
        actual: Type,
        span: Span,
    },

    #[error("expected an expression, found a definition")]
    NotExpression { span: Span },

    #[error("variable '{name}' is declared as {expected} but assigned a value of type {actual}")]
    VariableTypeMismatch {
        name: String,
        expected: Type,
        actual: Type,
        span: Span,
    },

    #[error("parameter '{parameter}' of function '{function}' has type {expected} but was given {actual}")]
    FunctionParameterTypeMismatch {
        function: String,
        parameter: String,
        expected: Type,
        actual: Type,
        span: Span,
    },

    #[error("call to '{function}' binds generic parameter {parameter} to inconsistent types: {}", format_types(.types))]
    InconsistentGenericTypes {
        function: String,
        parameter: String,
        types: Vec<Type>,
        span: Span,
    },

    #[error("cannot solve generic parameters of '{function}' for argument types ({})", format_argument_types(.argument_types))]
    GenericInferenceError {
        function: String,
        argument_types: Vec<Option<Type>>,
        span: Span,
    },

    #[error("cannot find a common type for the result of '{function}' among: {}", format_types(.types))]
    NoCommonType {
        function: String,
        types: Vec<Type>,
        span: Span,
    },
}

impl ValidationError {
    pub fn span(&self) -> Span {
        match self {
            ValidationError::VariableAlreadyDeclared { span, .. }
            | ValidationError::FunctionAlreadyDeclared { span, .. }
            | ValidationError::UnknownVariable { span, .. }
            | ValidationError::UnknownFunction { span, .. }
            | ValidationError::UnknownType { span, .. }
            | ValidationError::ParameterNumberMismatch { span, .. }
            | ValidationError::ParameterCategoryMismatch { span, .. }
            | ValidationError::BranchTypeMismatch { span, .. }
            | ValidationError::NotExpression { span }
            | ValidationError::VariableTypeMismatch { span, .. }
            | ValidationError::FunctionParameterTypeMismatch { span, .. }
            | ValidationError::InconsistentGenericTypes { span, .. }
            | ValidationError::GenericInferenceError { span, .. }
            | ValidationError::NoCommonType { span, .. } => *span,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ValidationError::VariableAlreadyDeclared { .. }
            | ValidationError::FunctionAlreadyDeclared { .. } => ErrorCategory::Scope,
            ValidationError::UnknownVariable { .. }
            | ValidationError::UnknownFunction { .. }
            | ValidationError::UnknownType { .. } => ErrorCategory::Resolution,
            ValidationError::ParameterNumberMismatch { .. }
            | ValidationError::ParameterCategoryMismatch { .. }
            | ValidationError::BranchTypeMismatch { .. }
            | ValidationError::NotExpression { .. } => ErrorCategory::Shape,
            ValidationError::VariableTypeMismatch { .. }
            | ValidationError::FunctionParameterTypeMismatch { .. } => ErrorCategory::Type,
            ValidationError::InconsistentGenericTypes { .. }
            | ValidationError::GenericInferenceError { .. }
            | ValidationError::NoCommonType { .. } => ErrorCategory::Generics,
        }
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Internal invariant violation, such as a tree shape the grammar cannot
/// produce. Never reported as a user error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InternalError {
    #[error("invalid source tree at {span}: {node}")]
    BadSource { node: &'static str, span: Span },

    #[error("declaration of '{name}' has {names} parameter name(s) but {types} parameter type(s)")]
    MalformedDeclaration {
        name: String,
        names: usize,
        types: usize,
    },
}

impl InternalError {
    pub fn bad_source(node: &'static str, span: Span) -> Self {
        Self::BadSource { node, span }
    }

    /// Abort the current pass
    pub fn raise(self) -> ! {
        panic!("{self}")
    }
}

fn format_types(types: &[Type]) -> String {
    types.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

fn format_argument_types(types: &[Option<Type>]) -> String {
    types
        .iter()
        .map(|ty| ty.as_ref().map_or_else(|| "_".to_string(), ToString::to_string))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Diagnostic reporter for pretty error output
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    /// Build the diagnostic for an error without emitting it
    pub fn diagnostic(file_id: usize, error: &CompileError) -> Diagnostic<usize> {
        match error {
            CompileError::Lexer { message, span } => Diagnostic::error()
                .with_message("Lexer error")
                .with_labels(vec![
                    Label::primary(file_id, span.start..span.end).with_message(message)
                ]),

            CompileError::Parser { message, span } => Diagnostic::error()
                .with_message("Syntax error")
                .with_labels(vec![
                    Label::primary(file_id, span.start..span.end).with_message(message)
                ]),

            CompileError::Validation(err) => {
                let span = err.span();
                Diagnostic::error()
                    .with_message(err.category().title())
                    .with_labels(vec![
                        Label::primary(file_id, span.start..span.end).with_message(err.to_string())
                    ])
            }

            CompileError::Io(err) => {
                Diagnostic::error().with_message(format!("IO error: {}", err))
            }
        }
    }

    pub fn report_error(&self, file_id: usize, error: &CompileError) {
        let diagnostic = Self::diagnostic(file_id, error);
        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, &diagnostic);
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}
