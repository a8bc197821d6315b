//! Type annotations as written in source

use crate::common::Span;
use std::fmt;

/// A type annotation: `Number`, `Vector<T>`, `(T) -> U`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAnnotation {
    pub kind: TypeAnnotationKind,
    pub span: Span,
}

impl TypeAnnotation {
    pub fn new(kind: TypeAnnotationKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn named(name: impl Into<String>, span: Span) -> Self {
        Self::new(
            TypeAnnotationKind::Named {
                name: name.into(),
                args: Vec::new(),
            },
            span,
        )
    }

    pub fn is_function(&self) -> bool {
        matches!(self.kind, TypeAnnotationKind::Function { .. })
    }
}

/// Annotation kinds
#[derive(Debug, Clone, PartialEq)]
pub enum TypeAnnotationKind {
    /// Named type, optionally applied: Number, Map<String, T>
    Named {
        name: String,
        args: Vec<TypeAnnotation>,
    },
    /// Function type: (Number, String) -> Boolean
    Function {
        params: Vec<TypeAnnotation>,
        ret: Box<TypeAnnotation>,
    },
}

impl fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeAnnotationKind::Named { name, args } => {
                write!(f, "{}", name)?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            TypeAnnotationKind::Function { params, ret } => {
                write!(f, "(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ") -> {}", ret)
            }
        }
    }
}
