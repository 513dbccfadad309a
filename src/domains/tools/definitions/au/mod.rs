//! Australian healthcare identifier tools.

pub mod identifier;

pub use identifier::{GenerateIdentifierParams, GenerateIdentifierTool};
