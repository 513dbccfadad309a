//! Tool definitions module.
//!
//! Each tool lives in its own file, grouped by area:
//! `au` for Australian identifiers, `fhir` for general FHIR helpers and
//! `tx` for terminology.

pub mod au;
pub mod common;
pub mod fhir;
pub mod tx;

pub use au::{GenerateIdentifierParams, GenerateIdentifierTool};
pub use fhir::{GenerateUuidParams, GenerateUuidTool, ValidateParams, ValidateTool};
pub use tx::{LookupCodeParams, LookupCodeTool};
