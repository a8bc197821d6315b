//! Static type of an expression
//!
//! The evaluator never changes the scope it is handed. Constructs that bind
//! names (blocks, `let`, lambdas) get private child scopes that are dropped
//! when evaluation returns. `Ok(None)` means the type is not known statically.

use super::extract::{
    bind_parameter, call_argument_types, call_target, function_declaration, generic_scope,
    method_declaration, record_declaration, resolve_type, CallTarget,
};
use super::generics::infer_generic_return_type;
use super::scope::{Scope, ValueEntry};
use crate::common::{Span, ValidationError, ValidationResult};
use crate::syntax::ast::{Block, Conditional, Expr, ExprKind, Lambda, StmtKind, UnaryOp, VarScope};
use crate::types::Type;

/// Type of `expr` in `scope`
pub fn expression_type(scope: &Scope<'_>, expr: &Expr) -> ValidationResult<Option<Type>> {
    match &expr.kind {
        ExprKind::Number(_) => Ok(Some(Type::number())),
        ExprKind::String(_) => Ok(Some(Type::string())),
        ExprKind::Symbol(_) => Ok(Some(Type::symbol())),
        ExprKind::Bool(_) => Ok(Some(Type::boolean())),
        ExprKind::Nil => Ok(Some(Type::nil())),
        ExprKind::Vector(_) => Ok(Some(Type::simple("Vector"))),
        ExprKind::Map(_) => Ok(Some(Type::simple("Map"))),

        ExprKind::Binary { op, .. } => Ok(Some(if op.is_arithmetic() {
            Type::number()
        } else {
            Type::boolean()
        })),
        ExprKind::Unary { op, .. } => Ok(Some(match op {
            UnaryOp::Neg => Type::number(),
            UnaryOp::Not => Type::boolean(),
        })),

        ExprKind::Identifier(name) => identifier_type(scope, name, expr),
        ExprKind::Call(call) => {
            let args: Vec<&Expr> = call.args.iter().collect();
            call_type(scope, &call.name, call.span, &args)
        }
        ExprKind::MethodCall(method) => {
            call_type(scope, &method.call.name, method.call.span, &method.arguments())
        }
        ExprKind::MemberGet { target, member } => {
            let target_type = expression_type(scope, target)?;
            member_type(scope, target_type.as_ref(), member, expr.span)
        }
        ExprKind::Get { collection, .. } => {
            Ok(expression_type(scope, collection)?.as_ref().and_then(entry_type))
        }
        ExprKind::Paren(inner) => expression_type(scope, inner),

        ExprKind::Block(block) => block_type(scope, block),
        ExprKind::VarScope(var_scope) => let_type(scope, var_scope),
        ExprKind::ForLoop(_) => Ok(Some(Type::simple("List"))),
        ExprKind::Conditional(conditional) => conditional_type(scope, conditional),
        ExprKind::Lambda(lambda) => lambda_type(scope, lambda),
    }
}

fn identifier_type(scope: &Scope<'_>, name: &str, expr: &Expr) -> ValidationResult<Option<Type>> {
    match scope.value_entry(name) {
        Some(ValueEntry::Variable(ty)) => Ok(ty.clone()),
        // A generic function has no single type as a value
        Some(ValueEntry::Function(Some(declaration))) if !declaration.is_generic() => {
            Ok(Some(declaration.function_type()))
        }
        Some(ValueEntry::Function(_)) => Ok(None),
        None => Err(ValidationError::UnknownVariable {
            name: name.to_string(),
            span: expr.span,
        }),
    }
}

/// Result type of calling `name` with `args`, already in parameter order
fn call_type(scope: &Scope<'_>, name: &str, span: Span, args: &[&Expr]) -> ValidationResult<Option<Type>> {
    let target = call_target(scope, name).ok_or_else(|| ValidationError::UnknownFunction {
        name: name.to_string(),
        span,
    })?;

    match target {
        CallTarget::Untyped => Ok(None),
        CallTarget::Typed(declaration) if declaration.is_generic() => {
            let args = call_argument_types(scope, &declaration, args)?;
            infer_generic_return_type(&declaration, &args).map_err(|err| err.at(name, span))
        }
        CallTarget::Typed(declaration) => Ok(Some(declaration.return_type().clone())),
    }
}

/// Type of `member` on a value of `target`.
///
/// Only values of a visible record are checked; anything else is unknown.
pub fn member_type(
    scope: &Scope<'_>,
    target: Option<&Type>,
    member: &str,
    span: Span,
) -> ValidationResult<Option<Type>> {
    let Some(record) = target.and_then(|ty| scope.record(ty)) else {
        return Ok(None);
    };
    match record.field(member) {
        Some(ty) => Ok(Some(ty.clone())),
        None => Err(ValidationError::UnknownVariable {
            name: member.to_string(),
            span,
        }),
    }
}

/// Type of `collection[key]`: the element of a sequence or the value of a map
fn entry_type(collection: &Type) -> Option<Type> {
    if let Some(element) = collection.element_type() {
        return Some(element.clone());
    }
    match collection {
        Type::GenericType { name, args } if name == "Map" && args.len() == 2 => args.get(1).cloned(),
        _ => None,
    }
}

/// Type of a block; its definitions go into a private child of `scope`
pub fn block_type(scope: &Scope<'_>, block: &Block) -> ValidationResult<Option<Type>> {
    let Some((last, init)) = block.stmts.split_last() else {
        return Ok(Some(Type::nil()));
    };

    let mut local = Scope::child(scope);

    for stmt in init {
        declare(&mut local, &stmt.kind)?;
    }

    match &last.kind {
        StmtKind::Expr(expr) => expression_type(&local, expr),
        _ => Err(ValidationError::NotExpression { span: last.span }),
    }
}

/// Record what a statement declares so later statements can see it
fn declare(scope: &mut Scope<'_>, stmt: &StmtKind) -> ValidationResult<()> {
    match stmt {
        StmtKind::Def(def) => {
            let ty = match &def.ty {
                Some(annotation) => Some(resolve_type(scope, annotation)?),
                None => expression_type(scope, &def.value)?,
            };
            scope.add_variable(def.name.clone(), ty);
        }
        StmtKind::FunctionDef(def) => {
            let declaration = {
                let signature_scope = generic_scope(scope, def);
                function_declaration(&signature_scope, def)?
            };
            scope.add_function(def.name.clone(), declaration);
        }
        StmtKind::RecordDef(record) => {
            let receiver = Type::simple(record.name.clone());
            scope.add_type(record.name.clone(), receiver.clone());
            let layout = record_declaration(scope, record)?;
            scope.add_function(record.name.clone(), Some(layout.constructor()));
            scope.add_record(layout);
            for method in record.implementations.iter().flat_map(|imp| &imp.methods) {
                let declaration = method_declaration(scope, method, &receiver)?;
                scope.add_function(method.name.clone(), declaration);
            }
        }
        StmtKind::Expr(_) => {}
    }
    Ok(())
}

fn let_type(scope: &Scope<'_>, var_scope: &VarScope) -> ValidationResult<Option<Type>> {
    let mut local = Scope::child(scope);
    for binding in &var_scope.bindings {
        let ty = expression_type(&local, &binding.value)?;
        local.add_variable(binding.name.clone(), ty);
    }
    block_type(&local, &var_scope.body)
}

fn conditional_type(scope: &Scope<'_>, conditional: &Conditional) -> ValidationResult<Option<Type>> {
    // Without an else the value may be nil or the branch value
    let Some(else_block) = &conditional.else_block else {
        return Ok(None);
    };

    let blocks = conditional
        .branches
        .iter()
        .map(|branch| &branch.body)
        .chain(std::iter::once(else_block));

    let mut types = Vec::new();
    for block in blocks {
        match block_type(scope, block)? {
            Some(ty) => types.push((ty, block.span)),
            None => return Ok(None),
        }
    }

    let mut types = types.into_iter();
    let Some((expected, _)) = types.next() else {
        return Ok(None);
    };
    for (actual, span) in types {
        if !actual.is_compatible_with(&expected) {
            return Err(ValidationError::BranchTypeMismatch {
                expected,
                actual,
                span,
            });
        }
    }
    Ok(Some(expected))
}

fn lambda_type(scope: &Scope<'_>, lambda: &Lambda) -> ValidationResult<Option<Type>> {
    let mut local = Scope::child(scope);
    let mut params = Vec::with_capacity(lambda.params.len());

    for param in &lambda.params {
        let Some(annotation) = &param.ty else {
            return Ok(None);
        };
        let ty = resolve_type(scope, annotation)?;
        bind_parameter(&mut local, &param.name, ty.clone());
        params.push(ty);
    }

    Ok(expression_type(&local, &lambda.body)?.map(|ret| Type::function(params, ret)))
}
