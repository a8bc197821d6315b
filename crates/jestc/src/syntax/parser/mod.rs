//! Jest parser module

mod parser;

pub use parser::{parse, Parser};
