//! Jest definition AST nodes (functions, records, methods)

use super::{Block, TypeAnnotation};
use crate::common::Span;

/// defn <T> name(a: T) -> T { ... }
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub generic_parameters: Vec<String>,
    pub params: Vec<Param>,
    pub return_type: Option<TypeAnnotation>,
    pub body: Block,
    pub span: Span,
}

impl FunctionDef {
    pub fn is_generic(&self) -> bool {
        !self.generic_parameters.is_empty()
    }
}

/// A typed parameter or record field: `name: Type`
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: TypeAnnotation,
    pub span: Span,
}

/// record Name(fields) implements Protocol { methods }
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDef {
    pub name: String,
    pub fields: Vec<Param>,
    pub implementations: Vec<Implementation>,
    pub span: Span,
}

/// implements Protocol { defmethod ... }
#[derive(Debug, Clone, PartialEq)]
pub struct Implementation {
    pub protocol: String,
    pub methods: Vec<MethodDef>,
    pub span: Span,
}

/// defmethod name(params) -> Type { ... }; the receiver is implicit
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: Option<TypeAnnotation>,
    pub body: Block,
    pub span: Span,
}
