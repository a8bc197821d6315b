//! Jest statement AST nodes

use super::{Expr, FunctionDef, RecordDef, TypeAnnotation};
use crate::common::Span;

/// A braced sequence of statements; its value is the trailing expression
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>, span: Span) -> Self {
        Self { stmts, span }
    }

    pub fn empty(span: Span) -> Self {
        Self {
            stmts: Vec::new(),
            span,
        }
    }
}

/// A statement
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn is_definition(&self) -> bool {
        !matches!(self.kind, StmtKind::Expr(_))
    }
}

/// Statement kinds
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// Function: defn f(x: Number) -> Number { x }
    FunctionDef(FunctionDef),
    /// Record: record Point(x: Number, y: Number)
    RecordDef(RecordDef),
    /// Variable: def x: Number = 1;
    Def(DefAssignment),
    /// Expression statement
    Expr(Expr),
}

/// def name[: Type] = value;
#[derive(Debug, Clone, PartialEq)]
pub struct DefAssignment {
    pub name: String,
    pub ty: Option<TypeAnnotation>,
    pub value: Expr,
    pub span: Span,
}
