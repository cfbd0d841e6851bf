//! Declaration DSL: lexing, parsing, and validation.

pub mod lexer;
pub mod parser;
pub mod types;
pub mod validation;

pub use parser::{parse, ParseError};
pub use types::{OptionEntry, VarKind, VariableSpec};
pub use validation::{validate, ValidationIssue};
