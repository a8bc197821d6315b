//! Checking pipeline: lex, parse, validate

use crate::common::{CompileResult, DiagnosticReporter};
use crate::sema;
use crate::syntax::ast::SourceCode;
use crate::syntax::lexer::Lexer;
use crate::syntax::parser::Parser;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Options for a checking run
#[derive(Debug, Clone, Default)]
pub struct CheckConfig {
    pub dump_tokens: bool,
    pub dump_ast: bool,
    pub verbose: bool,
}

/// Source file being checked, with its diagnostics sink
pub struct CheckContext<'a> {
    pub filename: String,
    pub file_id: usize,
    pub reporter: &'a DiagnosticReporter,
}

impl<'a> CheckContext<'a> {
    pub fn new(filename: String, file_id: usize, reporter: &'a DiagnosticReporter) -> Self {
        Self { filename, file_id, reporter }
    }
}

/// Run the whole pipeline over `source`, returning the validated tree
pub fn check_source(source: &str, config: &CheckConfig) -> CompileResult<SourceCode> {
    if config.dump_tokens {
        eprintln!("=== Jest Tokens ===");
        eprint!("{}", dump_tokens(source)?);
        eprintln!("=== End Tokens ===\n");
    }

    if config.verbose {
        eprintln!("Parsing...");
    }
    let program = Parser::new(source).parse_source()?;
    debug!(
        target: "driver",
        imports = program.imports.len(),
        statements = program.body.len(),
        "parsed"
    );

    if config.dump_ast {
        eprintln!("=== Jest AST ===");
        eprintln!("{program:#?}");
        eprintln!("=== End AST ===\n");
    }

    if config.verbose {
        eprintln!("Validating...");
    }
    sema::validate(&program)?;
    Ok(program)
}

/// Check `source`, reporting the first error through the context's reporter
pub fn check_with_context(source: &str, ctx: &CheckContext<'_>, config: &CheckConfig) -> CompileResult<()> {
    info!(target: "driver", file = %ctx.filename, "checking");
    match check_source(source, config) {
        Ok(_) => {
            info!(target: "driver", file = %ctx.filename, "ok");
            Ok(())
        }
        Err(err) => {
            debug!(target: "driver", file = %ctx.filename, error = %err, "rejected");
            ctx.reporter.report_error(ctx.file_id, &err);
            Err(err)
        }
    }
}

/// Read and check a file
pub fn check_file(path: &Path, config: &CheckConfig) -> CompileResult<SourceCode> {
    let source = fs::read_to_string(path)?;
    check_source(&source, config)
}

/// Whether `source` passes every check
pub fn is_valid(source: &str) -> bool {
    check_source(source, &CheckConfig::default()).is_ok()
}

/// One token per line
pub fn dump_tokens(source: &str) -> CompileResult<String> {
    let tokens = Lexer::new(source).tokenize_all()?;
    let mut output = String::new();
    for token in &tokens {
        let _ = writeln!(output, "{:?} @ {}", token.kind, token.span);
    }
    Ok(output)
}

/// Pretty-printed tree
pub fn dump_ast(source: &str) -> CompileResult<String> {
    let program = Parser::new(source).parse_source()?;
    Ok(format!("{program:#?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{CompileError, ValidationError};

    #[test]
    fn test_valid_program() {
        let source = "
            import java.util.Date;
            defn <T> identity(x: T) -> T { x }
            def n: Number = identity(5);
            for i in range(0, n, 1) { println(i) }
        ";
        assert!(is_valid(source));
        let program = check_source(source, &CheckConfig::default()).unwrap();
        assert_eq!(program.imports.len(), 1);
    }

    #[test]
    fn test_stage_errors() {
        assert!(matches!(
            check_source("def x = @;", &CheckConfig::default()),
            Err(CompileError::Lexer { .. })
        ));
        assert!(matches!(
            check_source("def = 1;", &CheckConfig::default()),
            Err(CompileError::Parser { .. })
        ));
        assert!(matches!(
            check_source("println(y)", &CheckConfig::default()),
            Err(CompileError::Validation(ValidationError::UnknownVariable { .. }))
        ));
        assert!(!is_valid("defn <T> pair(a: T, b: T) -> Vector<T> { [a, b] } pair(1, \"s\")"));
    }

    #[test]
    fn test_dumps() {
        let tokens = dump_tokens("def x = 1;").unwrap();
        assert_eq!(tokens.lines().count(), 6);
        assert!(tokens.starts_with("Def"));
        assert!(dump_ast("def x = 1;").unwrap().contains("DefAssignment"));
    }

    #[test]
    fn test_check_file_missing() {
        assert!(matches!(
            check_file(Path::new("/nonexistent/prog.jest"), &CheckConfig::default()),
            Err(CompileError::Io(_))
        ));
    }
}
