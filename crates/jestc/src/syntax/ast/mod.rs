//! Jest AST definitions

mod expr;
mod item;
mod stmt;
mod types;

pub use expr::*;
pub use item::*;
pub use stmt::*;
pub use types::*;

use crate::common::Span;

/// A complete Jest source file
#[derive(Debug, Clone, PartialEq)]
pub struct SourceCode {
    pub imports: Vec<ImportStatement>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl SourceCode {
    pub fn new(imports: Vec<ImportStatement>, body: Vec<Stmt>, span: Span) -> Self {
        Self {
            imports,
            body,
            span,
        }
    }
}

/// Import of a host class: import java.util.Date;
#[derive(Debug, Clone, PartialEq)]
pub struct ImportStatement {
    pub path: Vec<String>,
    pub span: Span,
}

impl ImportStatement {
    /// Name the import binds (the last path segment)
    pub fn binding(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }
}
