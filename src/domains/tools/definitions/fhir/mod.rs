//! General FHIR tools.

pub mod generate_uuid;
pub mod validate;

pub use generate_uuid::{GenerateUuidParams, GenerateUuidTool};
pub use validate::{ValidateParams, ValidateTool};
