//! Value resolution: walking specs in declaration order and consulting
//! an injected value source.

pub mod condition;
pub mod engine;
pub mod source;

pub use engine::{resolve, Environment, ResolveError};
pub use source::{SilentSource, SourceError, ValueSource};
