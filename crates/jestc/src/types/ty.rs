//! Structural type algebra
//!
//! Types form a closed set. Compatibility is the asymmetric
//! [`Type::implements_type`] relation, never plain equality: callers always ask
//! whether the *argument* (or assigned value) implements the *declared* type.

use std::fmt;

/// A Jest type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// A named, non-parameterized type: `Number`, `String`, a record name
    Simple(String),

    /// A generic parameter (`T`) of the function `owner`
    GenericParameter(GenericParameter),

    /// A parameterized type: `Vector<Number>`, `Map<String, T>`
    GenericType { name: String, args: Vec<Type> },

    /// A function type: `(Number, String) -> Boolean`
    FunctionType { params: Vec<Type>, ret: Box<Type> },
}

/// A placeholder type declared in a generic function signature
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GenericParameter {
    pub name: String,
    /// Name of the function declaring the parameter
    pub owner: String,
}

impl GenericParameter {
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
        }
    }
}

/// Separates a declaring function from the call site an instance belongs to
const INSTANCE_MARK: char = '#';

impl GenericParameter {
    /// This parameter as an unknown of one particular use of its function
    pub fn instance(&self, site: &str) -> Self {
        Self::new(self.name.clone(), format!("{}{INSTANCE_MARK}{site}", self.origin_owner()))
    }

    /// Is this an unknown being solved for, rather than a parameter in scope?
    pub fn is_instance(&self) -> bool {
        self.owner.contains(INSTANCE_MARK)
    }

    /// The declared parameter an instance was made from
    pub fn origin(&self) -> Self {
        Self::new(self.name.clone(), self.origin_owner())
    }

    fn origin_owner(&self) -> &str {
        self.owner.split(INSTANCE_MARK).next().unwrap_or(&self.owner)
    }
}

impl fmt::Display for GenericParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Type {
    // ==================== Constructors ====================

    pub fn simple(name: impl Into<String>) -> Self {
        Type::Simple(name.into())
    }

    pub fn generic_parameter(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Type::GenericParameter(GenericParameter::new(name, owner))
    }

    pub fn generic(name: impl Into<String>, args: Vec<Type>) -> Self {
        Type::GenericType {
            name: name.into(),
            args,
        }
    }

    pub fn function(params: Vec<Type>, ret: Type) -> Self {
        Type::FunctionType {
            params,
            ret: Box::new(ret),
        }
    }

    pub fn number() -> Self {
        Type::simple("Number")
    }

    pub fn string() -> Self {
        Type::simple("String")
    }

    pub fn symbol() -> Self {
        Type::simple("Symbol")
    }

    pub fn boolean() -> Self {
        Type::simple("Boolean")
    }

    pub fn nil() -> Self {
        Type::simple("Nil")
    }

    // ==================== Relations ====================

    /// Can a value of type `self` be used where `other` is expected?
    ///
    /// Generic type arguments are covariant. Function parameters are
    /// contravariant and function results covariant.
    pub fn implements_type(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Simple(a), Type::Simple(b)) => a == b,
            (Type::GenericParameter(a), Type::GenericParameter(b)) => a.name == b.name,
            (
                Type::GenericType { name: n1, args: a1 },
                Type::GenericType { name: n2, args: a2 },
            ) => {
                n1 == n2
                    && a1.len() == a2.len()
                    && a1.iter().zip(a2).all(|(mine, theirs)| mine.implements_type(theirs))
            }
            (
                Type::FunctionType { params: p1, ret: r1 },
                Type::FunctionType { params: p2, ret: r2 },
            ) => {
                p1.len() == p2.len()
                    && p1.iter().zip(p2).all(|(mine, theirs)| theirs.implements_type(mine))
                    && r1.implements_type(r2)
            }
            _ => false,
        }
    }

    /// Compatible in both directions
    pub fn is_compatible_with(&self, other: &Type) -> bool {
        self.implements_type(other) && other.implements_type(self)
    }

    /// Immediate structural children
    pub fn dependent_types(&self) -> Vec<&Type> {
        match self {
            Type::Simple(_) | Type::GenericParameter(_) => Vec::new(),
            Type::GenericType { args, .. } => args.iter().collect(),
            Type::FunctionType { params, ret } => {
                params.iter().chain(std::iter::once(ret.as_ref())).collect()
            }
        }
    }

    /// Is this a generic parameter or does it contain one?
    pub fn is_generic(&self) -> bool {
        match self {
            Type::GenericParameter(_) => true,
            Type::Simple(_) => false,
            _ => self.dependent_types().into_iter().any(Type::is_generic),
        }
    }

    /// Does any generic parameter inside this type satisfy `pred`?
    pub fn any_parameter(&self, pred: &impl Fn(&GenericParameter) -> bool) -> bool {
        match self {
            Type::GenericParameter(param) => pred(param),
            _ => self.dependent_types().into_iter().any(|ty| ty.any_parameter(pred)),
        }
    }

    /// Does `needle` occur anywhere inside this type (including itself)?
    pub fn contains(&self, needle: &Type) -> bool {
        self == needle || self.dependent_types().into_iter().any(|ty| ty.contains(needle))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Type::FunctionType { .. })
    }

    pub fn as_generic_parameter(&self) -> Option<&GenericParameter> {
        match self {
            Type::GenericParameter(param) => Some(param),
            _ => None,
        }
    }

    /// Replace generic parameters using `lookup`; unmapped parameters stay
    pub fn substitute(&self, lookup: &impl Fn(&GenericParameter) -> Option<Type>) -> Type {
        match self {
            Type::Simple(_) => self.clone(),
            Type::GenericParameter(param) => lookup(param).unwrap_or_else(|| self.clone()),
            Type::GenericType { name, args } => Type::GenericType {
                name: name.clone(),
                args: args.iter().map(|arg| arg.substitute(lookup)).collect(),
            },
            Type::FunctionType { params, ret } => Type::FunctionType {
                params: params.iter().map(|p| p.substitute(lookup)).collect(),
                ret: Box::new(ret.substitute(lookup)),
            },
        }
    }

    /// Element type of a parameterized sequence (`Vector<T>`, `List<T>`)
    pub fn element_type(&self) -> Option<&Type> {
        match self {
            Type::GenericType { name, args } if args.len() == 1 && (name == "Vector" || name == "List") => {
                args.first()
            }
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Simple(name) => f.write_str(name),
            Type::GenericParameter(param) => write!(f, "{param}"),
            Type::GenericType { name, args } => {
                write!(f, "{name}<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
            Type::FunctionType { params, ret } => {
                f.write_str("(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{param}")?;
                }
                write!(f, ") -> {ret}")
            }
        }
    }
}
