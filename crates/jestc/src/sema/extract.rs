//! Declarations and argument types read off the tree

use super::evaluator::expression_type;
use super::scope::{Scope, ValueEntry};
use crate::common::{ValidationError, ValidationResult};
use crate::syntax::ast::{Expr, ExprKind, FunctionDef, MethodDef, Param, RecordDef, TypeAnnotation, TypeAnnotationKind};
use crate::types::{FunctionDeclaration, GenericParameter, RecordDeclaration, Type};
use std::borrow::Cow;

/// Resolve a written annotation through the type namespace
pub fn resolve_type(scope: &Scope<'_>, annotation: &TypeAnnotation) -> ValidationResult<Type> {
    match &annotation.kind {
        TypeAnnotationKind::Named { name, args } => {
            let base = scope.get_type(name).ok_or_else(|| ValidationError::UnknownType {
                name: name.clone(),
                span: annotation.span,
            })?;
            if args.is_empty() {
                return Ok(base.clone());
            }
            let args = args
                .iter()
                .map(|arg| resolve_type(scope, arg))
                .collect::<ValidationResult<Vec<_>>>()?;
            Ok(Type::generic(name.clone(), args))
        }
        TypeAnnotationKind::Function { params, ret } => {
            let params = params
                .iter()
                .map(|param| resolve_type(scope, param))
                .collect::<ValidationResult<Vec<_>>>()?;
            Ok(Type::function(params, resolve_type(scope, ret)?))
        }
    }
}

/// Child of `parent` binding each generic parameter of `def` as a type
pub fn generic_scope<'p>(parent: &'p Scope<'p>, def: &FunctionDef) -> Scope<'p> {
    let mut scope = Scope::child(parent);
    for name in &def.generic_parameters {
        scope.add_type(name.clone(), Type::generic_parameter(name.clone(), def.name.clone()));
    }
    scope
}

/// Declaration of a function; `None` when it has no return annotation.
///
/// `scope` must already bind the generic parameters (see [`generic_scope`]).
pub fn function_declaration(
    scope: &Scope<'_>,
    def: &FunctionDef,
) -> ValidationResult<Option<FunctionDeclaration>> {
    let Some(return_annotation) = &def.return_type else {
        return Ok(None);
    };

    let (param_names, param_types) = parameter_list(scope, &def.params)?;
    let return_type = resolve_type(scope, return_annotation)?;

    if def.is_generic() {
        let generic_parameters = def
            .generic_parameters
            .iter()
            .map(|name| GenericParameter::new(name.clone(), def.name.clone()))
            .collect();
        Ok(Some(FunctionDeclaration::generic(
            def.name.clone(),
            generic_parameters,
            param_names,
            param_types,
            return_type,
        )))
    } else {
        Ok(Some(FunctionDeclaration::declared(
            def.name.clone(),
            param_names,
            param_types,
            return_type,
        )))
    }
}

/// Declaration of a record method, with the receiver as a leading `self`
pub fn method_declaration(
    scope: &Scope<'_>,
    method: &MethodDef,
    receiver: &Type,
) -> ValidationResult<Option<FunctionDeclaration>> {
    let Some(return_annotation) = &method.return_type else {
        return Ok(None);
    };

    let (mut param_names, mut param_types) = parameter_list(scope, &method.params)?;
    param_names.insert(0, "self".to_string());
    param_types.insert(0, receiver.clone());

    Ok(Some(FunctionDeclaration::declared(
        method.name.clone(),
        param_names,
        param_types,
        resolve_type(scope, return_annotation)?,
    )))
}

/// Layout of a record definition; its constructor follows from it
pub fn record_declaration(scope: &Scope<'_>, record: &RecordDef) -> ValidationResult<RecordDeclaration> {
    let (names, types) = parameter_list(scope, &record.fields)?;
    Ok(RecordDeclaration::new(record.name.clone(), names.into_iter().zip(types).collect()))
}

fn parameter_list(scope: &Scope<'_>, params: &[Param]) -> ValidationResult<(Vec<String>, Vec<Type>)> {
    let mut names = Vec::with_capacity(params.len());
    let mut types = Vec::with_capacity(params.len());
    for param in params {
        names.push(param.name.clone());
        types.push(resolve_type(scope, &param.ty)?);
    }
    Ok((names, types))
}

/// Bind a parameter: function-typed ones live in the function namespace
pub fn bind_parameter(scope: &mut Scope<'_>, name: &str, ty: Type) {
    match FunctionDeclaration::from_function_type(name, &ty) {
        Some(declaration) => scope.add_function(name, Some(declaration)),
        None => scope.add_variable(name, Some(ty)),
    }
}

/// Type of each argument, in the order given
fn argument_types<'e>(
    scope: &Scope<'_>,
    args: impl IntoIterator<Item = &'e Expr>,
) -> ValidationResult<Vec<Option<Type>>> {
    args.into_iter().map(|arg| expression_type(scope, arg)).collect()
}

/// Argument types for a call to `declaration`.
///
/// A generic function named where a generic callee expects a function
/// contributes its signature, with its parameters as fresh unknowns of this
/// call. Everywhere else a generic function value is untyped.
pub fn call_argument_types(
    scope: &Scope<'_>,
    declaration: &FunctionDeclaration,
    args: &[&Expr],
) -> ValidationResult<Vec<Option<Type>>> {
    if !declaration.is_generic() {
        return argument_types(scope, args.iter().copied());
    }

    let expects_function = |index: usize| declaration.param_types().get(index).is_some_and(Type::is_function);
    args.iter()
        .enumerate()
        .map(|(index, arg)| match (&arg.kind, expects_function(index)) {
            (ExprKind::Identifier(name), true) => match scope.value_entry(name) {
                Some(ValueEntry::Function(Some(passed))) if passed.is_generic() => {
                    Ok(Some(passed.instantiate(&format!("arg{index}")).function_type()))
                }
                _ => expression_type(scope, arg),
            },
            _ => expression_type(scope, arg),
        })
        .collect()
}

/// What a call name resolves to
#[derive(Debug, Clone, PartialEq)]
pub enum CallTarget<'s> {
    /// A declaration calls can be checked against
    Typed(Cow<'s, FunctionDeclaration>),
    /// Known by name only; any arguments are accepted
    Untyped,
}

/// Resolve `name` as the target of a call.
///
/// The nearest binding wins whichever namespace it lives in. A variable
/// holding a function type is wrapped as a declaration with positional
/// parameter names; any other variable is an untyped target.
pub fn call_target<'s>(scope: &'s Scope<'_>, name: &str) -> Option<CallTarget<'s>> {
    Some(match scope.value_entry(name)? {
        ValueEntry::Function(Some(declaration)) => CallTarget::Typed(Cow::Borrowed(declaration)),
        ValueEntry::Function(None) => CallTarget::Untyped,
        ValueEntry::Variable(ty) => match ty.as_ref().and_then(|ty| FunctionDeclaration::from_function_type(name, ty)) {
            Some(declaration) => CallTarget::Typed(Cow::Owned(declaration)),
            None => CallTarget::Untyped,
        },
    })
}
