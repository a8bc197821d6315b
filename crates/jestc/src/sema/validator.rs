//! Jest semantic validator
//!
//! A recursive walk over the tree. The scope for the node being visited is
//! passed down explicitly; every scoped construct builds a child scope on the
//! stack, so leaving a construct (normally or through `?`) drops its names.
//! The walk stops at the first error.

use super::builtins;
use super::evaluator::{expression_type, member_type};
use super::extract::{
    bind_parameter, call_argument_types, call_target, function_declaration, generic_scope,
    method_declaration, record_declaration, resolve_type, CallTarget,
};
use super::generics::check_function_call;
use super::Scope;
use crate::common::{Span, ValidationError, ValidationResult};
use crate::syntax::ast::*;
use crate::types::Type;
use tracing::{debug, trace};

/// Validate a whole program against a fresh prelude
pub fn validate(source: &SourceCode) -> ValidationResult<()> {
    let prelude = builtins::prelude();
    // User definitions may shadow the prelude
    let mut program = Scope::child(&prelude);

    for import in &source.imports {
        visit_import(&mut program, import);
    }
    for stmt in &source.body {
        visit_stmt(&mut program, stmt)?;
    }

    debug!(target: "sema", statements = source.body.len(), "program validated");
    Ok(())
}

fn visit_import(scope: &mut Scope<'_>, import: &ImportStatement) {
    let Some(name) = import.binding() else {
        crate::common::InternalError::bad_source("ImportStatement", import.span).raise();
    };
    trace!(target: "sema", class = name, "import");
    scope.add_type(name, Type::simple(name));
}

// ==================== Statements ====================

fn visit_stmt(scope: &mut Scope<'_>, stmt: &Stmt) -> ValidationResult<()> {
    match &stmt.kind {
        StmtKind::FunctionDef(def) => visit_function_def(scope, def),
        StmtKind::RecordDef(record) => visit_record_def(scope, record),
        StmtKind::Def(def) => visit_def(scope, def),
        StmtKind::Expr(expr) => visit_expr(scope, expr),
    }
}

fn visit_block(parent: &Scope<'_>, block: &Block) -> ValidationResult<()> {
    let mut scope = Scope::child(parent);
    for stmt in &block.stmts {
        visit_stmt(&mut scope, stmt)?;
    }
    Ok(())
}

fn visit_function_def(scope: &mut Scope<'_>, def: &FunctionDef) -> ValidationResult<()> {
    ensure_undeclared_function(scope, &def.name, def.span)?;

    // Registered before the body so the function can call itself
    let declaration = function_declaration(&generic_scope(scope, def), def)?;
    debug!(
        target: "sema",
        function = %def.name,
        typed = declaration.is_some(),
        generic = def.is_generic(),
        depth = scope.depth(),
        "declare function"
    );
    scope.add_function(def.name.clone(), declaration);

    let generics = generic_scope(scope, def);
    let mut params = Scope::child(&generics);
    for param in &def.params {
        declare_parameter(&mut params, param)?;
    }
    visit_block(&params, &def.body)
}

fn visit_record_def(scope: &mut Scope<'_>, record: &RecordDef) -> ValidationResult<()> {
    if scope.is_type_in_current_scope(&record.name) {
        return Err(ValidationError::FunctionAlreadyDeclared {
            name: record.name.clone(),
            span: record.span,
        });
    }
    ensure_undeclared_function(scope, &record.name, record.span)?;
    ensure_distinct_fields(record)?;

    let receiver = Type::simple(record.name.clone());
    scope.add_type(record.name.clone(), receiver.clone());
    let layout = record_declaration(scope, record)?;
    debug!(target: "sema", record = %record.name, fields = layout.fields.len(), "declare record");
    scope.add_function(record.name.clone(), Some(layout.constructor()));
    scope.add_record(layout);

    for implementation in &record.implementations {
        trace!(target: "sema", record = %record.name, protocol = %implementation.protocol, "implementation");
        for method in &implementation.methods {
            visit_method_def(scope, record, method, &receiver)?;
        }
    }
    Ok(())
}

fn ensure_distinct_fields(record: &RecordDef) -> ValidationResult<()> {
    for (index, field) in record.fields.iter().enumerate() {
        if record.fields[..index].iter().any(|earlier| earlier.name == field.name) {
            return Err(ValidationError::VariableAlreadyDeclared {
                name: field.name.clone(),
                span: record.span,
            });
        }
    }
    Ok(())
}

/// Methods are callable from the enclosing scope with the receiver first
fn visit_method_def(
    scope: &mut Scope<'_>,
    record: &RecordDef,
    method: &MethodDef,
    receiver: &Type,
) -> ValidationResult<()> {
    ensure_undeclared_function(scope, &method.name, method.span)?;

    let declaration = method_declaration(scope, method, receiver)?;
    trace!(target: "sema", method = %method.name, receiver = %receiver, "declare method");
    scope.add_function(method.name.clone(), declaration);

    let mut fields = Scope::child(scope);
    for field in &record.fields {
        declare_parameter(&mut fields, field)?;
    }
    let mut params = Scope::child(&fields);
    params.add_variable("self", Some(receiver.clone()));
    for param in &method.params {
        declare_parameter(&mut params, param)?;
    }
    visit_block(&params, &method.body)
}

fn declare_parameter(scope: &mut Scope<'_>, param: &Param) -> ValidationResult<()> {
    ensure_undeclared_variable(scope, &param.name, param.span)?;
    let ty = resolve_type(scope, &param.ty)?;
    bind_parameter(scope, &param.name, ty);
    Ok(())
}

fn visit_def(scope: &mut Scope<'_>, def: &DefAssignment) -> ValidationResult<()> {
    ensure_undeclared_variable(scope, &def.name, def.span)?;

    visit_expr(scope, &def.value)?;
    let value_type = expression_type(scope, &def.value)?;

    let declared = match &def.ty {
        Some(annotation) => {
            let annotated = resolve_type(scope, annotation)?;
            if let Some(actual) = value_type {
                if !actual.implements_type(&annotated) {
                    return Err(ValidationError::VariableTypeMismatch {
                        name: def.name.clone(),
                        expected: annotated,
                        actual,
                        span: def.span,
                    });
                }
            }
            Some(annotated)
        }
        None => value_type,
    };

    trace!(target: "sema", variable = %def.name, ty = ?declared, "declare variable");
    scope.add_variable(def.name.clone(), declared);
    Ok(())
}

// A name is bound at most once per level across both value namespaces;
// only the error kind depends on what is being declared.

fn ensure_undeclared_function(scope: &Scope<'_>, name: &str, span: Span) -> ValidationResult<()> {
    if scope.is_value_in_current_scope(name) {
        return Err(ValidationError::FunctionAlreadyDeclared {
            name: name.to_string(),
            span,
        });
    }
    Ok(())
}

fn ensure_undeclared_variable(scope: &Scope<'_>, name: &str, span: Span) -> ValidationResult<()> {
    if scope.is_value_in_current_scope(name) {
        return Err(ValidationError::VariableAlreadyDeclared {
            name: name.to_string(),
            span,
        });
    }
    Ok(())
}

// ==================== Expressions ====================

fn visit_expr(scope: &Scope<'_>, expr: &Expr) -> ValidationResult<()> {
    match &expr.kind {
        ExprKind::Number(_)
        | ExprKind::String(_)
        | ExprKind::Symbol(_)
        | ExprKind::Bool(_)
        | ExprKind::Nil => Ok(()),

        ExprKind::Identifier(name) => {
            if scope.is_variable_or_function_in_scope(name) {
                Ok(())
            } else {
                Err(ValidationError::UnknownVariable {
                    name: name.clone(),
                    span: expr.span,
                })
            }
        }

        ExprKind::Binary { left, right, .. } => {
            visit_expr(scope, left)?;
            visit_expr(scope, right)
        }
        ExprKind::Unary { operand, .. } => visit_expr(scope, operand),
        ExprKind::Paren(inner) => visit_expr(scope, inner),

        ExprKind::Vector(items) => items.iter().try_for_each(|item| visit_expr(scope, item)),
        ExprKind::Map(entries) => entries.iter().try_for_each(|(key, value)| {
            visit_expr(scope, key)?;
            visit_expr(scope, value)
        }),

        ExprKind::Call(call) => {
            let args: Vec<&Expr> = call.args.iter().collect();
            visit_call(scope, &call.name, call.span, &args)
        }
        ExprKind::MethodCall(method) => {
            visit_call(scope, &method.call.name, method.call.span, &method.arguments())
        }
        ExprKind::MemberGet { target, member } => {
            visit_expr(scope, target)?;
            let target_type = expression_type(scope, target)?;
            member_type(scope, target_type.as_ref(), member, expr.span)?;
            Ok(())
        }
        ExprKind::Get { collection, key } => {
            visit_expr(scope, collection)?;
            visit_expr(scope, key)
        }
        ExprKind::Block(block) => visit_block(scope, block),
        ExprKind::VarScope(var_scope) => visit_var_scope(scope, var_scope),
        ExprKind::ForLoop(for_loop) => visit_for_loop(scope, for_loop),
        ExprKind::Conditional(conditional) => visit_conditional(scope, conditional),
        ExprKind::Lambda(lambda) => visit_lambda(scope, lambda),
    }
}

/// `args` are in the order the target receives them
fn visit_call(scope: &Scope<'_>, name: &str, span: Span, args: &[&Expr]) -> ValidationResult<()> {
    let target = call_target(scope, name).ok_or_else(|| ValidationError::UnknownFunction {
        name: name.to_string(),
        span,
    })?;

    for arg in args {
        visit_expr(scope, arg)?;
    }

    match target {
        CallTarget::Untyped => {
            trace!(target: "sema", function = %name, "untyped call");
            Ok(())
        }
        CallTarget::Typed(declaration) => {
            let args = call_argument_types(scope, &declaration, args)?;
            trace!(
                target: "sema",
                function = %name,
                generic = declaration.is_generic(),
                arguments = args.len(),
                "check call"
            );
            check_function_call(&declaration, &args).map_err(|err| err.at(name, span))
        }
    }
}

fn visit_var_scope(parent: &Scope<'_>, var_scope: &VarScope) -> ValidationResult<()> {
    let mut scope = Scope::child(parent);
    for binding in &var_scope.bindings {
        ensure_undeclared_variable(&scope, &binding.name, binding.span)?;
        visit_expr(&scope, &binding.value)?;
        let ty = expression_type(&scope, &binding.value)?;
        scope.add_variable(binding.name.clone(), ty);
    }
    visit_block(&scope, &var_scope.body)
}

fn visit_for_loop(parent: &Scope<'_>, for_loop: &ForLoop) -> ValidationResult<()> {
    visit_expr(parent, &for_loop.iterable)?;

    let element = match for_loop.vars.as_slice() {
        [_] => expression_type(parent, &for_loop.iterable)?
            .and_then(|ty| ty.element_type().cloned()),
        _ => None,
    };

    let mut scope = Scope::child(parent);
    for var in &for_loop.vars {
        ensure_undeclared_variable(&scope, &var.name, var.span)?;
        scope.add_variable(var.name.clone(), element.clone());
    }
    visit_block(&scope, &for_loop.body)
}

fn visit_conditional(parent: &Scope<'_>, conditional: &Conditional) -> ValidationResult<()> {
    let scope = Scope::child(parent);
    for branch in &conditional.branches {
        visit_expr(&scope, &branch.condition)?;
        visit_block(&scope, &branch.body)?;
    }
    if let Some(else_block) = &conditional.else_block {
        visit_block(&scope, else_block)?;
    }
    Ok(())
}

fn visit_lambda(parent: &Scope<'_>, lambda: &Lambda) -> ValidationResult<()> {
    let mut scope = Scope::child(parent);
    for param in &lambda.params {
        ensure_undeclared_variable(&scope, &param.name, param.span)?;
        match &param.ty {
            Some(annotation) => {
                let ty = resolve_type(&scope, annotation)?;
                bind_parameter(&mut scope, &param.name, ty);
            }
            None => scope.add_variable(param.name.clone(), None),
        }
    }
    visit_expr(&scope, &lambda.body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse;
    use pretty_assertions::assert_eq;

    fn check(source: &str) -> ValidationResult<()> {
        validate(&parse(source).unwrap())
    }

    #[test]
    fn test_valid_programs() {
        assert_eq!(check("def x = 1; def y = x + 2;"), Ok(()));
        assert_eq!(check("defn add(a: Number, b: Number) -> Number { a + b } add(1, 2)"), Ok(()));
        assert_eq!(check("for x in range(0, 10, 1) { println(x) }"), Ok(()));
        assert_eq!(check("let a = 1, b = a + 1 { println(a * b) }"), Ok(()));
        assert_eq!(check("if true { println(1) } elif false { 2 } else { 3 }"), Ok(()));
    }

    #[test]
    fn test_shadowing_in_nested_scope() {
        assert_eq!(check("def x = 1; { def x = \"s\"; println(x) } println(x)"), Ok(()));
        assert_eq!(check("defn f(x: Number) -> Number { let x = 2 { x } }"), Ok(()));
    }

    #[test]
    fn test_redeclaration_in_same_scope() {
        assert!(matches!(
            check("def x = 1; def x = 2;"),
            Err(ValidationError::VariableAlreadyDeclared { ref name, .. }) if name == "x"
        ));
        assert!(matches!(
            check("defn f() -> Nil { nil } defn f() -> Nil { nil }"),
            Err(ValidationError::FunctionAlreadyDeclared { ref name, .. }) if name == "f"
        ));
        assert!(matches!(
            check("let a = 1, a = 2 { a }"),
            Err(ValidationError::VariableAlreadyDeclared { .. })
        ));
        assert!(matches!(
            check("defn f(a: Number, a: Number) -> Number { a }"),
            Err(ValidationError::VariableAlreadyDeclared { .. })
        ));
    }

    #[test]
    fn test_value_names_bind_once_per_scope() {
        assert!(matches!(
            check("def f = 1; defn f() -> Nil { nil }"),
            Err(ValidationError::FunctionAlreadyDeclared { ref name, .. }) if name == "f"
        ));
        assert!(matches!(
            check("defn f() -> Nil { nil } def f = 1;"),
            Err(ValidationError::VariableAlreadyDeclared { ref name, .. }) if name == "f"
        ));
        assert!(matches!(
            check("def P = 1; record P(x: Number)"),
            Err(ValidationError::FunctionAlreadyDeclared { ref name, .. }) if name == "P"
        ));
        assert!(matches!(
            check("def m = 1; record P(x: Number) implements Q { defmethod m() -> Number { x } }"),
            Err(ValidationError::FunctionAlreadyDeclared { ref name, .. }) if name == "m"
        ));
        // Either order is fine one level down
        assert_eq!(check("def f = 1; { defn f() -> Nil { nil } f() }"), Ok(()));
    }

    #[test]
    fn test_prelude_names_may_be_shadowed() {
        assert_eq!(check("defn <T> identity(x: T) -> T { x } def n: Number = identity(5);"), Ok(()));
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(
            check("def y = x;"),
            Err(ValidationError::UnknownVariable {
                name: "x".to_string(),
                span: Span::new(8, 9),
            })
        );
        assert!(matches!(
            check("frobnicate(1)"),
            Err(ValidationError::UnknownFunction { ref name, .. }) if name == "frobnicate"
        ));
        assert!(matches!(
            check("def w: Widget = 1;"),
            Err(ValidationError::UnknownType { ref name, .. }) if name == "Widget"
        ));
    }

    #[test]
    fn test_scopes_close_on_exit() {
        assert!(matches!(
            check("{ def inner = 1; } println(inner)"),
            Err(ValidationError::UnknownVariable { ref name, .. }) if name == "inner"
        ));
        assert!(matches!(
            check("defn f(p: Number) -> Number { p } println(p)"),
            Err(ValidationError::UnknownVariable { .. })
        ));
        assert!(matches!(
            check("for item in [1] { item } item"),
            Err(ValidationError::UnknownVariable { .. })
        ));
    }

    #[test]
    fn test_recursion_sees_own_name() {
        assert_eq!(
            check("defn fact(n: Number) -> Number { if n < 2 { 1 } else { n * fact(n - 1) } }"),
            Ok(())
        );
    }

    #[test]
    fn test_call_arity_and_types() {
        let prelude = "defn add(a: Number, b: Number) -> Number { a + b } ";
        assert!(matches!(
            check(&format!("{prelude} add(1)")),
            Err(ValidationError::ParameterNumberMismatch { expected: 2, actual: 1, .. })
        ));
        match check(&format!("{prelude} add(1, \"x\")")) {
            Err(ValidationError::FunctionParameterTypeMismatch {
                function,
                parameter,
                expected,
                actual,
                ..
            }) => {
                assert_eq!(function, "add");
                assert_eq!(parameter, "b");
                assert_eq!(expected, Type::number());
                assert_eq!(actual, Type::string());
            }
            other => panic!("expected parameter mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_untyped_values_are_accepted() {
        let source = "defn add(a: Number, b: Number) -> Number { a + b } add(inc(1), first([1]))";
        assert_eq!(check(source), Ok(()));
        assert_eq!(check("defn log(x: Number) { println(x) } def y: Number = log(1);"), Ok(()));
    }

    #[test]
    fn test_def_annotation() {
        assert_eq!(check("def xs: List<Number> = range(0, 3, 1);"), Ok(()));
        assert!(matches!(
            check("def x: String = 1 + 2;"),
            Err(ValidationError::VariableTypeMismatch { ref name, .. }) if name == "x"
        ));
        // The annotation is what later code sees
        assert!(matches!(
            check("defn twice(n: Number) -> Number { n * 2 } def s: String = \"a\"; twice(s)"),
            Err(ValidationError::FunctionParameterTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_generic_calls() {
        let identity = "defn <T> identity(x: T) -> T { x } ";
        assert_eq!(check(&format!("{identity} def n: Number = identity(5);")), Ok(()));
        assert!(matches!(
            check(&format!("{identity} def s: String = identity(5);")),
            Err(ValidationError::VariableTypeMismatch { .. })
        ));

        let pair = "defn <T> pair(a: T, b: T) -> Vector<T> { [a, b] } ";
        assert_eq!(check(&format!("{pair} pair(1, 2)")), Ok(()));
        match check(&format!("{pair} pair(1, \"s\")")) {
            Err(ValidationError::InconsistentGenericTypes { function, parameter, types, .. }) => {
                assert_eq!(function, "pair");
                assert_eq!(parameter, "T");
                assert_eq!(types, vec![Type::number(), Type::string()]);
            }
            other => panic!("expected inconsistent generics, got {other:?}"),
        }
    }

    #[test]
    fn test_higher_order_generic_call() {
        let source = "
            defn <T, U> apply(x: T, f: (T) -> U) -> U { f(x) }
            defn show(n: Number) -> String { str(n) }
            def s: String = apply(1, show);
        ";
        assert_eq!(check(source), Ok(()));

        let source = "
            defn <T, U> apply(x: T, f: (T) -> U) -> U { f(x) }
            apply(1, 2)
        ";
        assert!(matches!(
            check(source),
            Err(ValidationError::ParameterCategoryMismatch { ref function, ref parameter, .. })
                if function == "apply" && parameter == "f"
        ));
    }

    #[test]
    fn test_generic_function_passed_as_argument() {
        let functions = "
            defn <T> same(x: T) -> T { x }
            defn <T, U> apply(x: T, f: (T) -> U) -> U { f(x) }
            defn <T> both(a: T, f: (T) -> String) -> T { a }
        ";
        assert_eq!(check(&format!("{functions} def n: Number = apply(1, same);")), Ok(()));
        assert!(matches!(
            check(&format!("{functions} def s: String = apply(1, same);")),
            Err(ValidationError::VariableTypeMismatch { ref name, .. }) if name == "s"
        ));
        assert!(matches!(
            check(&format!("{functions} both(1, same)")),
            Err(ValidationError::GenericInferenceError { ref function, ref argument_types, .. })
                if function == "both" && argument_types.len() == 2
        ));
        assert_eq!(check(&format!("{functions} both(\"s\", same)")), Ok(()));
    }

    #[test]
    fn test_unsolvable_generic_return() {
        assert!(matches!(
            check("defn <T> make() -> T { nil } def x = make();"),
            Err(ValidationError::NoCommonType { ref function, ref types, .. })
                if function == "make" && types.is_empty()
        ));
        // Unused results are never inferred
        assert_eq!(check("defn <T> make() -> T { nil } make()"), Ok(()));
    }

    #[test]
    fn test_recursive_generic_call_keeps_parameters_rigid() {
        assert!(matches!(
            check("defn <T> f(a: T, b: T) -> T { f(a, 1) }"),
            Err(ValidationError::InconsistentGenericTypes { ref function, ref parameter, .. })
                if function == "f" && parameter == "T"
        ));
        assert!(matches!(
            check("defn <T> f(a: T, b: T) -> T { def s: String = f(a, 1); a }"),
            Err(ValidationError::InconsistentGenericTypes { .. })
        ));
        assert_eq!(check("defn <T> f(a: T, b: T) -> T { f(b, a) }"), Ok(()));
        assert_eq!(check("defn <T> f(a: T, b: T) -> T { def c: T = f(b, a); c }"), Ok(()));
    }

    #[test]
    fn test_nearest_binding_wins_across_namespaces() {
        // A local function value hides an outer function of the same name
        let source = "
            defn g(s: String) -> String { s }
            defn h() -> Number { def g = fn(x: Number) -> x; g(1) }
        ";
        assert_eq!(check(source), Ok(()));
        assert!(matches!(
            check("defn g(s: String) -> String { s } defn h() -> Number { def g = fn(x: Number) -> x; g(\"s\") }"),
            Err(ValidationError::FunctionParameterTypeMismatch { ref parameter, .. }) if parameter == "0"
        ));

        // A function-typed parameter hides an outer variable
        assert!(matches!(
            check("def f = 1; defn k(f: (Number) -> Number) -> Number { def y: Number = f; y }"),
            Err(ValidationError::VariableTypeMismatch { ref name, .. }) if name == "y"
        ));
    }

    #[test]
    fn test_function_typed_parameters_are_callable() {
        assert_eq!(check("defn call(f: (Number) -> Number) -> Number { f(1) }"), Ok(()));
        assert!(matches!(
            check("defn call(f: (Number) -> Number) -> Number { f(\"s\") }"),
            Err(ValidationError::FunctionParameterTypeMismatch { ref parameter, .. }) if parameter == "0"
        ));
    }

    #[test]
    fn test_lambda_values() {
        assert_eq!(check("def double = fn(x: Number) -> x * 2; double(3)"), Ok(()));
        assert!(matches!(
            check("def double = fn(x: Number) -> x * 2; double(\"s\")"),
            Err(ValidationError::FunctionParameterTypeMismatch { .. })
        ));
        assert!(matches!(
            check("fn(x) -> y"),
            Err(ValidationError::UnknownVariable { ref name, .. }) if name == "y"
        ));
    }

    #[test]
    fn test_records_and_methods() {
        let source = "
            record Point(x: Number, y: Number) implements Shape {
                defmethod scaled(k: Number) -> Number { x * k }
            }
            def p: Point = Point(1, 2);
            def s: Number = scaled(p, 3);
        ";
        assert_eq!(check(source), Ok(()));
        assert!(matches!(
            check("record P(x: Number) implements Q { defmethod m() -> Number { x } } m(1)"),
            Err(ValidationError::FunctionParameterTypeMismatch { ref parameter, .. }) if parameter == "self"
        ));
        assert!(matches!(
            check("record Point(x: Number, y: Number) Point(1)"),
            Err(ValidationError::ParameterNumberMismatch { .. })
        ));
        assert!(matches!(
            check("record Point(x: Number) record Point(y: Number)"),
            Err(ValidationError::FunctionAlreadyDeclared { .. })
        ));
    }

    #[test]
    fn test_duplicate_record_fields() {
        let source = "record P(x: Number, x: String)";
        assert_eq!(
            check(source),
            Err(ValidationError::VariableAlreadyDeclared {
                name: "x".to_string(),
                span: Span::new(0, source.len()),
            })
        );
        assert!(matches!(
            check("record P(x: Number, x: String) implements Q { defmethod m() -> Number { 1 } }"),
            Err(ValidationError::VariableAlreadyDeclared { ref name, .. }) if name == "x"
        ));
        // Nothing was registered for the rejected record
        assert!(matches!(
            check("record P(x: Number, y: Number, x: Number) def p = P(1, 2, 3);"),
            Err(ValidationError::VariableAlreadyDeclared { .. })
        ));
    }

    #[test]
    fn test_method_member_and_get_chains() {
        let record = "
            record Point(x: Number, y: Number) implements Shape {
                defmethod scaled(k: Number) -> Number { x * k }
                defmethod label() -> String { \"point\" }
            }
            def p = Point(1, 2);
        ";
        assert_eq!(check(&format!("{record} def s: Number = p.scaled(3);")), Ok(()));
        assert_eq!(check(&format!("{record} def t: Number = p.y;")), Ok(()));
        assert_eq!(check(&format!("{record} def u: Number = 3->scaled(p);")), Ok(()));
        assert_eq!(check(&format!("{record} def l: String = p.label();")), Ok(()));
        assert!(matches!(
            check(&format!("{record} def s: String = p.scaled(3);")),
            Err(ValidationError::VariableTypeMismatch { ref name, .. }) if name == "s"
        ));
        assert!(matches!(
            check(&format!("{record} p.scaled(\"big\")")),
            Err(ValidationError::FunctionParameterTypeMismatch { ref parameter, .. }) if parameter == "k"
        ));
        assert!(matches!(
            check(&format!("{record} p.z")),
            Err(ValidationError::UnknownVariable { ref name, .. }) if name == "z"
        ));
        assert!(matches!(
            check(&format!("{record} p.rotate(1)")),
            Err(ValidationError::UnknownFunction { ref name, .. }) if name == "rotate"
        ));
        assert!(matches!(
            check(&format!("{record} q.x")),
            Err(ValidationError::UnknownVariable { ref name, .. }) if name == "q"
        ));

        assert_eq!(check("defn at(m: Map<Symbol, Number>) -> Number { m[:a] }"), Ok(()));
        assert!(matches!(
            check("defn at(m: Map<Symbol, Number>) -> String { def s: String = m[:a]; s }"),
            Err(ValidationError::VariableTypeMismatch { .. })
        ));
        assert!(matches!(
            check("def xs = [1]; xs[k]"),
            Err(ValidationError::UnknownVariable { ref name, .. }) if name == "k"
        ));
    }

    #[test]
    fn test_for_loop_element_type() {
        assert!(matches!(
            check("defn s(t: String) -> String { t } for i in range(0, 3, 1) { s(i) }"),
            Err(ValidationError::FunctionParameterTypeMismatch { .. })
        ));
        assert_eq!(check("defn s(t: String) -> String { t } for i in [1, 2] { s(i) }"), Ok(()));
    }

    #[test]
    fn test_imports_register_types() {
        assert_eq!(check("import java.util.Date; defn f(d: Date) -> Date { d }"), Ok(()));
    }

    #[test]
    fn test_branch_mismatch_when_value_used() {
        assert!(matches!(
            check("def v = if true { 1 } else { \"one\" };"),
            Err(ValidationError::BranchTypeMismatch { .. })
        ));
        assert_eq!(check("if true { 1 } else { \"one\" }"), Ok(()));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let program = parse("defn f(a: Number) -> Number { a } def x = f(1);").unwrap();
        assert_eq!(validate(&program), Ok(()));
        assert_eq!(validate(&program), Ok(()));

        let broken = parse("def x = 1; def x = 2;").unwrap();
        assert_eq!(validate(&broken), validate(&broken));
    }
}
