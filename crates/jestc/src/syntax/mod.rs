//! Jest front end
//!
//! Turns source text into the [`ast::SourceCode`] tree that semantic analysis
//! walks. Lexing uses logos; parsing is hand-written recursive descent with one
//! token of lookahead.

pub mod ast;
pub mod lexer;
pub mod parser;

pub use parser::parse;
