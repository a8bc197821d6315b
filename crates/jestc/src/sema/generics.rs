//! Call-site checking for generic functions
//!
//! Inference is local to a single call. The declared parameter types are
//! walked in lock-step with the argument types to produce constraints
//! `(generic parameter, type)`. The unknowns are instances made for this call:
//! the callee's parameters, plus those of any generic function passed as an
//! argument. Every other type is rigid, including the caller's own `T`. A union-find over the constraint
//! graph then checks that no unknown is asked to be two incompatible things.
//!
//! Arguments whose type is statically unknown (`None`) satisfy any parameter
//! and contribute nothing.

use crate::common::{Span, ValidationError};
use crate::types::{FunctionDeclaration, GenericParameter, Type};
use std::collections::HashMap;
use thiserror::Error;

/// Why a call does not fit a declaration; lifted into a [`ValidationError`]
/// once the call site is known
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CallError {
    #[error("expected {expected} argument(s), found {actual}")]
    ParameterNumberMismatch { expected: usize, actual: usize },

    #[error("parameter '{parameter}' has type {expected} but was given {actual}")]
    ParameterTypeMismatch {
        parameter: String,
        expected: Type,
        actual: Type,
    },

    #[error("parameter '{parameter}' expects a function {expected} but was given {actual}")]
    ParameterCategoryMismatch {
        parameter: String,
        expected: Type,
        actual: Type,
    },

    #[error("generic parameter {parameter} bound to inconsistent types")]
    InconsistentGenericTypes {
        parameter: GenericParameter,
        types: Vec<Type>,
    },

    #[error("generic parameters cannot be solved")]
    GenericInferenceError { argument_types: Vec<Option<Type>> },

    #[error("no common type")]
    NoCommonType { types: Vec<Type> },
}

impl CallError {
    /// Attach the call site
    pub fn at(self, function: &str, span: Span) -> ValidationError {
        let function = function.to_string();
        match self {
            CallError::ParameterNumberMismatch { expected, actual } => {
                ValidationError::ParameterNumberMismatch {
                    function,
                    expected,
                    actual,
                    span,
                }
            }
            CallError::ParameterTypeMismatch {
                parameter,
                expected,
                actual,
            } => ValidationError::FunctionParameterTypeMismatch {
                function,
                parameter,
                expected,
                actual,
                span,
            },
            CallError::ParameterCategoryMismatch {
                parameter,
                expected,
                actual,
            } => ValidationError::ParameterCategoryMismatch {
                function,
                parameter,
                expected,
                actual,
                span,
            },
            CallError::InconsistentGenericTypes { parameter, types } => {
                ValidationError::InconsistentGenericTypes {
                    function,
                    parameter: parameter.name,
                    types,
                    span,
                }
            }
            CallError::GenericInferenceError { argument_types } => {
                ValidationError::GenericInferenceError {
                    function,
                    argument_types,
                    span,
                }
            }
            CallError::NoCommonType { types } => ValidationError::NoCommonType {
                function,
                types,
                span,
            },
        }
    }
}

type Constraint = (GenericParameter, Type);

/// Check a call against any declaration
pub fn check_function_call(decl: &FunctionDeclaration, args: &[Option<Type>]) -> Result<(), CallError> {
    if decl.is_generic() {
        return check_generic_function_call(decl, args);
    }

    check_arity(decl, args)?;
    let params = decl.param_names().iter().zip(decl.param_types());
    for ((name, declared), arg) in params.zip(args) {
        let Some(arg) = arg else { continue };
        if !arg.implements_type(declared) {
            return Err(CallError::ParameterTypeMismatch {
                parameter: name.clone(),
                expected: declared.clone(),
                actual: arg.clone(),
            });
        }
    }
    Ok(())
}

/// Owner suffix for the unknowns of the callee at a call site
const CALL_SITE: &str = "call";

/// Check a call to the generic `decl` with the given argument types.
///
/// The callee's parameters are instantiated afresh, so a recursive call from
/// its own body treats the body's `T` as a rigid type like any other.
pub fn check_generic_function_call(
    decl: &FunctionDeclaration,
    args: &[Option<Type>],
) -> Result<(), CallError> {
    check_arity(decl, args)?;
    check_instance_call(&decl.instantiate(CALL_SITE), args).map_err(|err| match err {
        CallError::InconsistentGenericTypes { parameter, types } => CallError::InconsistentGenericTypes {
            parameter: parameter.origin(),
            types,
        },
        other => other,
    })
}

fn check_instance_call(decl: &FunctionDeclaration, args: &[Option<Type>]) -> Result<(), CallError> {
    let params = decl.param_names().iter().zip(decl.param_types());
    let known = params.zip(args).filter_map(|((name, declared), arg)| {
        arg.as_ref().map(|arg| (name.as_str(), declared, arg))
    });
    let known: Vec<_> = known.collect();

    for &(name, declared, arg) in &known {
        if !declared.is_generic() && !is_open(arg) && !arg.implements_type(declared) {
            return Err(CallError::ParameterTypeMismatch {
                parameter: name.to_string(),
                expected: declared.clone(),
                actual: arg.clone(),
            });
        }
    }

    let mut constraints = Vec::new();
    for &(name, declared, arg) in known.iter().filter(|(_, declared, arg)| is_solved(declared, arg)) {
        ensure_matching_shapes(name, declared, arg)?;
        generic_type_constraints(declared, arg, &mut constraints);
    }

    check_direct_bindings(decl, args)?;
    check_consistency(&constraints, args)
}

/// The type of a call to `decl`, with generic parameters in the return type
/// replaced by what the arguments bind them to.
///
/// `Ok(None)` when an argument the answer depends on is unknown.
pub fn infer_generic_return_type(
    decl: &FunctionDeclaration,
    args: &[Option<Type>],
) -> Result<Option<Type>, CallError> {
    check_arity(decl, args)?;

    if !decl.return_type().is_generic() {
        return Ok(Some(decl.return_type().clone()));
    }

    let decl = decl.instantiate(CALL_SITE);
    let return_type = decl.return_type();
    let indices: HashMap<GenericParameter, Vec<usize>> =
        decl.generic_type_indices().into_iter().collect();

    let mut sets = TypeSets::default();
    for (declared, arg) in decl.param_types().iter().zip(args) {
        let Some(arg) = arg else { continue };
        if is_solved(declared, arg) {
            let mut constraints = Vec::new();
            generic_type_constraints(declared, arg, &mut constraints);
            sets.add_all(&constraints);
        }
    }

    let mut bindings = HashMap::new();
    for param in decl.generic_parameters() {
        let node = Type::GenericParameter(param.clone());
        if !return_type.contains(&node) {
            continue;
        }

        let members = sets.class_of(&node);
        let rigid = || members.iter().filter(|ty| !is_variable(ty));
        let closed: Vec<Type> = rigid().filter(|ty| !is_open(ty)).cloned().collect();

        let Some(common) = closed.first() else {
            let feeds_unknown = members
                .iter()
                .filter_map(|ty| indices.get(ty.as_generic_parameter()?))
                .flatten()
                .any(|&index| args[index].is_none());
            // Bound only to types still mentioning unknowns
            if feeds_unknown || rigid().next().is_some() {
                return Ok(None);
            }
            return Err(CallError::NoCommonType { types: Vec::new() });
        };

        if closed.iter().any(|ty| !ty.is_compatible_with(common)) {
            return Err(CallError::NoCommonType {
                types: distinct(closed),
            });
        }
        bindings.insert(param.clone(), common.clone());
    }

    Ok(Some(return_type.substitute(&|param: &GenericParameter| {
        bindings.get(param).cloned()
    })))
}

fn check_arity(decl: &FunctionDeclaration, args: &[Option<Type>]) -> Result<(), CallError> {
    if decl.arity() != args.len() {
        return Err(CallError::ParameterNumberMismatch {
            expected: decl.arity(),
            actual: args.len(),
        });
    }
    Ok(())
}

/// Recursively compare the structure of a declared parameter type with the
/// argument given for it. A generic parameter on the declared side matches
/// whatever shape it is given, as does an unknown on the argument side.
pub fn ensure_matching_shapes(parameter: &str, declared: &Type, argument: &Type) -> Result<(), CallError> {
    // An unknown of the argument takes whatever shape it meets
    if is_variable(argument) {
        return Ok(());
    }

    let type_mismatch = || CallError::ParameterTypeMismatch {
        parameter: parameter.to_string(),
        expected: declared.clone(),
        actual: argument.clone(),
    };

    match declared {
        Type::GenericParameter(_) => Ok(()),
        Type::Simple(_) => {
            if argument.implements_type(declared) {
                Ok(())
            } else {
                Err(type_mismatch())
            }
        }
        Type::FunctionType { .. } => {
            if !argument.is_function() {
                return Err(CallError::ParameterCategoryMismatch {
                    parameter: parameter.to_string(),
                    expected: declared.clone(),
                    actual: argument.clone(),
                });
            }
            match_dependents(parameter, declared, argument).ok_or_else(type_mismatch)?
        }
        Type::GenericType { name, .. } => match argument {
            Type::GenericType { name: given, .. } if given == name => {
                match_dependents(parameter, declared, argument).ok_or_else(type_mismatch)?
            }
            _ => Err(type_mismatch()),
        },
    }
}

/// `None` when the two types have a different number of children
fn match_dependents(parameter: &str, declared: &Type, argument: &Type) -> Option<Result<(), CallError>> {
    let declared_children = declared.dependent_types();
    let argument_children = argument.dependent_types();
    if declared_children.len() != argument_children.len() {
        return None;
    }
    Some(
        declared_children
            .into_iter()
            .zip(argument_children)
            .try_for_each(|(d, a)| ensure_matching_shapes(parameter, d, a)),
    )
}

/// Walk `declared` and `argument` in lock-step and record every pairing of a
/// generic parameter with the type on the other side. Both directions are
/// recorded when both sides are generic parameters.
pub fn generic_type_constraints(declared: &Type, argument: &Type, out: &mut Vec<Constraint>) {
    match (declared, argument) {
        (Type::GenericParameter(d), Type::GenericParameter(a)) => {
            out.push((d.clone(), argument.clone()));
            out.push((a.clone(), declared.clone()));
        }
        (Type::GenericParameter(d), _) => out.push((d.clone(), argument.clone())),
        (_, Type::GenericParameter(a)) => out.push((a.clone(), declared.clone())),
        _ => {
            for (d, a) in declared.dependent_types().into_iter().zip(argument.dependent_types()) {
                generic_type_constraints(d, a, out);
            }
        }
    }
}

/// Types bound to `param` by the arguments at `positions`, in argument order
fn realizations(
    decl: &FunctionDeclaration,
    args: &[Option<Type>],
    param: &GenericParameter,
    positions: &[usize],
) -> Vec<Type> {
    let mut constraints = Vec::new();
    for &index in positions {
        if let Some(arg) = &args[index] {
            generic_type_constraints(&decl.param_types()[index], arg, &mut constraints);
        }
    }
    constraints
        .into_iter()
        .filter(|(bound, _)| bound == param)
        .map(|(_, ty)| ty)
        .collect()
}

/// Each generic parameter's directly bound rigid types must agree
fn check_direct_bindings(decl: &FunctionDeclaration, args: &[Option<Type>]) -> Result<(), CallError> {
    for (param, positions) in decl.generic_type_indices() {
        let rigid: Vec<Type> = realizations(decl, args, &param, &positions)
            .into_iter()
            .filter(|ty| !is_variable(ty) && !is_open(ty))
            .collect();

        if let Some(first) = rigid.first() {
            if rigid.iter().any(|ty| !ty.is_compatible_with(first)) {
                return Err(CallError::InconsistentGenericTypes {
                    parameter: param,
                    types: distinct(rigid),
                });
            }
        }
    }
    Ok(())
}

/// Union every constraint; no class may hold two incompatible rigid types.
///
/// Catches conflicts that only show through a chain of unknowns, such as a
/// generic function argument tying two of the callee's parameters together.
fn check_consistency(constraints: &[Constraint], args: &[Option<Type>]) -> Result<(), CallError> {
    let mut sets = TypeSets::default();
    sets.add_all(constraints);

    let classes: Vec<usize> = (0..sets.types.len()).map(|id| sets.find(id)).collect();
    let mut rigid_by_class: HashMap<usize, &Type> = HashMap::new();
    for (ty, class) in sets.types.iter().zip(classes) {
        if is_variable(ty) || is_open(ty) {
            continue;
        }
        match rigid_by_class.get(&class) {
            Some(existing) if !existing.is_compatible_with(ty) => {
                return Err(CallError::GenericInferenceError {
                    argument_types: args.to_vec(),
                });
            }
            Some(_) => {}
            None => {
                rigid_by_class.insert(class, ty);
            }
        }
    }
    Ok(())
}

/// Is `ty` one of the unknowns being solved for?
fn is_variable(ty: &Type) -> bool {
    ty.as_generic_parameter().is_some_and(GenericParameter::is_instance)
}

/// Does `ty` mention an unknown somewhere inside?
fn is_open(ty: &Type) -> bool {
    ty.any_parameter(&GenericParameter::is_instance)
}

/// Does this parameter take part in solving, rather than a direct check?
fn is_solved(declared: &Type, argument: &Type) -> bool {
    declared.is_generic() || is_open(argument)
}

fn distinct(types: Vec<Type>) -> Vec<Type> {
    let mut out: Vec<Type> = Vec::with_capacity(types.len());
    for ty in types {
        if !out.contains(&ty) {
            out.push(ty);
        }
    }
    out
}

/// Disjoint sets over interned types
#[derive(Debug, Default)]
struct TypeSets {
    types: Vec<Type>,
    ids: HashMap<Type, usize>,
    parent: Vec<usize>,
}

impl TypeSets {
    fn node(&mut self, ty: &Type) -> usize {
        if let Some(&id) = self.ids.get(ty) {
            return id;
        }
        let id = self.types.len();
        self.types.push(ty.clone());
        self.ids.insert(ty.clone(), id);
        self.parent.push(id);
        id
    }

    fn find(&mut self, mut id: usize) -> usize {
        while self.parent[id] != id {
            // Path halving
            self.parent[id] = self.parent[self.parent[id]];
            id = self.parent[id];
        }
        id
    }

    fn add_all(&mut self, constraints: &[Constraint]) {
        for (param, ty) in constraints {
            let left = self.node(&Type::GenericParameter(param.clone()));
            let right = self.node(ty);
            self.union(left, right);
        }
    }

    /// Every type in the class of `ty`, in the order they were first seen
    fn class_of(&mut self, ty: &Type) -> Vec<Type> {
        let id = self.node(ty);
        let class = self.find(id);
        let mut members = Vec::new();
        for other in 0..self.types.len() {
            if self.find(other) == class {
                members.push(self.types[other].clone());
            }
        }
        members
    }

    fn union(&mut self, a: usize, b: usize) {
        let (a, b) = (self.find(a), self.find(b));
        if a != b {
            self.parent[b] = a;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn gp(name: &str, owner: &str) -> Type {
        Type::generic_parameter(name, owner)
    }

    fn names(count: usize) -> Vec<String> {
        ["a", "b", "c", "d"][..count].iter().map(|s| s.to_string()).collect()
    }

    fn generic(name: &str, params: &[&str], param_types: Vec<Type>, ret: Type) -> FunctionDeclaration {
        FunctionDeclaration::generic(
            name,
            params.iter().map(|p| GenericParameter::new(*p, name)).collect(),
            names(param_types.len()),
            param_types,
            ret,
        )
    }

    fn identity() -> FunctionDeclaration {
        generic("identity", &["T"], vec![gp("T", "identity")], gp("T", "identity"))
    }

    fn pair() -> FunctionDeclaration {
        generic(
            "pair",
            &["T"],
            vec![gp("T", "pair"), gp("T", "pair")],
            Type::generic("Vector", vec![gp("T", "pair")]),
        )
    }

    /// map<T, U>(xs: Vector<T>, f: (T) -> U) -> Vector<U>
    fn map() -> FunctionDeclaration {
        generic(
            "map",
            &["T", "U"],
            vec![
                Type::generic("Vector", vec![gp("T", "map")]),
                Type::function(vec![gp("T", "map")], gp("U", "map")),
            ],
            Type::generic("Vector", vec![gp("U", "map")]),
        )
    }

    #[test]
    fn test_identity_infers_argument_type() {
        let args = [Some(Type::number())];
        assert_eq!(check_generic_function_call(&identity(), &args), Ok(()));
        assert_eq!(infer_generic_return_type(&identity(), &args), Ok(Some(Type::number())));
    }

    #[test]
    fn test_arity_is_checked_first() {
        let err = check_generic_function_call(&identity(), &[None, None]).unwrap_err();
        assert_eq!(err, CallError::ParameterNumberMismatch { expected: 1, actual: 2 });
    }

    #[test]
    fn test_pair_requires_consistent_bindings() {
        assert_eq!(
            check_generic_function_call(&pair(), &[Some(Type::number()), Some(Type::number())]),
            Ok(())
        );

        let err = check_generic_function_call(&pair(), &[Some(Type::number()), Some(Type::string())])
            .unwrap_err();
        assert_eq!(
            err,
            CallError::InconsistentGenericTypes {
                parameter: GenericParameter::new("T", "pair"),
                types: vec![Type::number(), Type::string()],
            }
        );
    }

    #[test]
    fn test_unknown_arguments_bind_nothing() {
        let args = [Some(Type::number()), None];
        assert_eq!(check_generic_function_call(&pair(), &args), Ok(()));
        assert_eq!(
            infer_generic_return_type(&pair(), &args),
            Ok(Some(Type::generic("Vector", vec![Type::number()])))
        );
        assert_eq!(infer_generic_return_type(&identity(), &[None]), Ok(None));
    }

    #[test]
    fn test_non_generic_parameters_checked_directly() {
        let decl = generic(
            "tag",
            &["T"],
            vec![gp("T", "tag"), Type::string()],
            gp("T", "tag"),
        );
        let err = check_generic_function_call(&decl, &[Some(Type::number()), Some(Type::number())])
            .unwrap_err();
        assert!(matches!(err, CallError::ParameterTypeMismatch { ref parameter, .. } if parameter == "b"));
    }

    #[test]
    fn test_nested_generic_inference() {
        let args = [
            Some(Type::generic("Vector", vec![Type::number()])),
            Some(Type::function(vec![Type::number()], Type::string())),
        ];
        assert_eq!(check_generic_function_call(&map(), &args), Ok(()));
        assert_eq!(
            infer_generic_return_type(&map(), &args),
            Ok(Some(Type::generic("Vector", vec![Type::string()])))
        );
    }

    #[test]
    fn test_nested_conflict_is_inconsistent() {
        let args = [
            Some(Type::generic("Vector", vec![Type::number()])),
            Some(Type::function(vec![Type::string()], Type::string())),
        ];
        let err = check_generic_function_call(&map(), &args).unwrap_err();
        assert!(matches!(err, CallError::InconsistentGenericTypes { ref parameter, .. } if parameter.name == "T"));
    }

    #[test]
    fn test_shape_mismatches() {
        let err = check_generic_function_call(
            &map(),
            &[Some(Type::generic("Vector", vec![Type::number()])), Some(Type::number())],
        )
        .unwrap_err();
        assert!(matches!(err, CallError::ParameterCategoryMismatch { .. }));

        let err = check_generic_function_call(
            &map(),
            &[
                Some(Type::generic("List", vec![Type::number()])),
                Some(Type::function(vec![Type::number()], Type::number())),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, CallError::ParameterTypeMismatch { ref parameter, .. } if parameter == "a"));

        let err = check_generic_function_call(
            &map(),
            &[
                Some(Type::generic("Vector", vec![Type::number()])),
                Some(Type::function(vec![Type::number(), Type::number()], Type::number())),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, CallError::ParameterTypeMismatch { ref parameter, .. } if parameter == "b"));
    }

    #[test]
    fn test_caller_parameters_are_rigid() {
        // Inside `defn <T> wrap(x: T)`, calling identity(x) binds identity's T to wrap's T
        let args = [Some(gp("T", "wrap"))];
        assert_eq!(check_generic_function_call(&identity(), &args), Ok(()));
        assert_eq!(infer_generic_return_type(&identity(), &args), Ok(Some(gp("T", "wrap"))));

        let args = [Some(gp("T", "wrap")), Some(Type::number())];
        assert!(matches!(
            check_generic_function_call(&pair(), &args),
            Err(CallError::InconsistentGenericTypes { .. })
        ));
    }

    #[test]
    fn test_union_find_detects_transitive_conflict() {
        // T ~ U directly, T ~ Number and U ~ String: no single binding works
        let t = GenericParameter::new("T", "swap#call");
        let u = GenericParameter::new("U", "swap#call");
        let constraints = [
            (t.clone(), Type::GenericParameter(u.clone())),
            (t.clone(), Type::number()),
            (u.clone(), Type::string()),
        ];
        let args = [Some(Type::number()), Some(Type::string())];
        assert_eq!(
            check_consistency(&constraints, &args),
            Err(CallError::GenericInferenceError { argument_types: args.to_vec() })
        );
        assert_eq!(check_consistency(&constraints[..2], &args), Ok(()));
    }

    #[test]
    fn test_recursive_call_treats_own_parameter_as_rigid() {
        // Inside `defn <T> pair(a: T, b: T)`, the call pair(a, 1)
        let args = [Some(gp("T", "pair")), Some(Type::number())];
        assert_eq!(
            check_generic_function_call(&pair(), &args),
            Err(CallError::InconsistentGenericTypes {
                parameter: GenericParameter::new("T", "pair"),
                types: vec![gp("T", "pair"), Type::number()],
            })
        );
        assert!(matches!(
            infer_generic_return_type(&pair(), &args),
            Err(CallError::NoCommonType { .. })
        ));

        let args = [Some(gp("T", "pair")), Some(gp("T", "pair"))];
        assert_eq!(check_generic_function_call(&pair(), &args), Ok(()));
        assert_eq!(
            infer_generic_return_type(&pair(), &args),
            Ok(Some(Type::generic("Vector", vec![gp("T", "pair")])))
        );
    }

    #[test]
    fn test_generic_function_arguments_are_solved() {
        // apply<T, U>(x: T, f: (T) -> U) -> U, given identity's own unknowns
        let apply = generic(
            "apply",
            &["T", "U"],
            vec![gp("T", "apply"), Type::function(vec![gp("T", "apply")], gp("U", "apply"))],
            gp("U", "apply"),
        );
        let same = gp("T", "identity#arg1");
        let passed = Some(Type::function(vec![same.clone()], same.clone()));

        let args = [Some(Type::number()), passed.clone()];
        assert_eq!(check_generic_function_call(&apply, &args), Ok(()));
        assert_eq!(infer_generic_return_type(&apply, &args), Ok(Some(Type::number())));

        // Unknown input leaves the result unknown
        assert_eq!(infer_generic_return_type(&apply, &[None, passed.clone()]), Ok(None));

        // both<T>(a: T, f: (T) -> String): identity would need Number = String
        let both = generic(
            "both",
            &["T"],
            vec![gp("T", "both"), Type::function(vec![gp("T", "both")], Type::string())],
            gp("T", "both"),
        );
        let args = [Some(Type::number()), passed];
        assert_eq!(
            check_generic_function_call(&both, &args),
            Err(CallError::GenericInferenceError { argument_types: args.to_vec() })
        );
    }

    #[test]
    fn test_unrealized_return_parameter() {
        let decl = generic("make", &["T"], vec![], gp("T", "make"));
        assert_eq!(
            infer_generic_return_type(&decl, &[]),
            Err(CallError::NoCommonType { types: vec![] })
        );
    }

    #[test]
    fn test_conflicting_return_realizations() {
        let args = [Some(Type::number()), Some(Type::string())];
        assert_eq!(
            infer_generic_return_type(&pair(), &args),
            Err(CallError::NoCommonType {
                types: vec![Type::number(), Type::string()],
            })
        );
    }

    #[test]
    fn test_declared_call_names_parameter() {
        let add = FunctionDeclaration::declared(
            "add",
            names(2),
            vec![Type::number(), Type::number()],
            Type::number(),
        );
        assert_eq!(check_function_call(&add, &[Some(Type::number()), None]), Ok(()));
        assert_eq!(
            check_function_call(&add, &[Some(Type::number()), Some(Type::string())]),
            Err(CallError::ParameterTypeMismatch {
                parameter: "b".to_string(),
                expected: Type::number(),
                actual: Type::string(),
            })
        );
        assert!(matches!(
            check_function_call(&add, &[None]),
            Err(CallError::ParameterNumberMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_lifted_error_names_function() {
        let err = CallError::ParameterNumberMismatch { expected: 1, actual: 0 }.at("identity", Span::new(0, 10));
        assert_eq!(
            err,
            ValidationError::ParameterNumberMismatch {
                function: "identity".to_string(),
                expected: 1,
                actual: 0,
                span: Span::new(0, 10),
            }
        );
    }
}
