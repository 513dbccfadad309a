//! Terminology tools.

pub mod lookup_code;

pub use lookup_code::{LookupCodeParams, LookupCodeTool};
