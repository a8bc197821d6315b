//! Jest expression AST nodes

use super::{Block, TypeAnnotation};
use crate::common::Span;

/// A Jest expression
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Expression kinds
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Number literal: 42, 3.5
    Number(f64),
    /// String literal: "hello"
    String(String),
    /// Symbol literal: :key
    Symbol(String),
    /// Boolean literal: true, false
    Bool(bool),
    /// nil
    Nil,

    /// Identifier: x, nil?
    Identifier(String),

    /// Binary operation: a + b, a and b
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Unary operation: -x, !x
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    /// Call by name: foo(x, y)
    Call(FunctionCall),
    /// Call with a receiver: p.scaled(3), xs->take(2)
    MethodCall(MethodCall),
    /// Record member: p.x
    MemberGet {
        target: Box<Expr>,
        member: String,
    },
    /// Keyed lookup: m[:k], xs[0]
    Get {
        collection: Box<Expr>,
        key: Box<Expr>,
    },

    /// Vector literal: [1, 2, 3]
    Vector(Vec<Expr>),
    /// Map literal: %{:a 1, :b 2}
    Map(Vec<(Expr, Expr)>),

    /// Block expression: { ... }
    Block(Block),

    /// Let binding: let a = 1, b = 2 { a + b }
    VarScope(VarScope),

    /// For loop: for x in xs { ... }
    ForLoop(ForLoop),

    /// Conditional: if c { } elif d { } else { }
    Conditional(Conditional),

    /// Lambda: fn(x: Number) -> x * 2
    Lambda(Lambda),

    /// Parenthesized expression: (a + b)
    Paren(Box<Expr>),
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    And,
    Or,
}

impl BinOp {
    pub fn is_arithmetic(self) -> bool {
        matches!(self, BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Rem)
    }

    /// Binding power; higher binds tighter
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Or => 1,
            BinOp::And => 2,
            BinOp::Eq | BinOp::Ne => 3,
            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => 4,
            BinOp::Add | BinOp::Sub => 5,
            BinOp::Mul | BinOp::Div | BinOp::Rem => 6,
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

/// A call by name
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<Expr>,
    pub span: Span,
}

/// Where a method call passes its receiver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threading {
    /// `p.m(a)` calls `m(p, a)`
    First,
    /// `p->m(a)` calls `m(a, p)`
    Last,
}

/// A call whose receiver is written before the method name
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub receiver: Box<Expr>,
    /// Method name and explicit arguments; the span covers the whole chain link
    pub call: FunctionCall,
    pub threading: Threading,
}

impl MethodCall {
    /// Arguments in the order the method receives them
    pub fn arguments(&self) -> Vec<&Expr> {
        let explicit = self.call.args.iter();
        let receiver = std::iter::once(self.receiver.as_ref());
        match self.threading {
            Threading::First => receiver.chain(explicit).collect(),
            Threading::Last => explicit.chain(receiver).collect(),
        }
    }
}

/// A name introduced by a binding construct
#[derive(Debug, Clone, PartialEq)]
pub struct LocalName {
    pub name: String,
    pub span: Span,
}

/// One `name = value` pair of a let
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarScope {
    pub bindings: Vec<Binding>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop {
    pub vars: Vec<LocalName>,
    pub iterable: Box<Expr>,
    pub body: Block,
}

/// `if`/`elif` arms followed by an optional `else`
#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub branches: Vec<Branch>,
    pub else_block: Option<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub condition: Expr,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    pub params: Vec<LambdaParam>,
    pub body: Box<Expr>,
}

/// Lambda parameter; the annotation is optional
#[derive(Debug, Clone, PartialEq)]
pub struct LambdaParam {
    pub name: String,
    pub ty: Option<TypeAnnotation>,
    pub span: Span,
}
