//! Validation domain module.
//!
//! Validates FHIR resources with the official HL7 FHIR validator, run as an
//! external Java process.
//!
//! - `validator.rs` - `ResourceValidator` trait, request and report types
//! - `java.rs` - Live implementation that shells out to `validator_cli.jar`
//! - `error.rs` - Validation error types

mod error;
mod java;
mod validator;

pub use error::ValidationError;
pub use java::JavaValidator;
pub use validator::{
    FhirVersion, ResourceValidator, SnomedEdition, ValidationReport, ValidationRequest,
    filter_issue_lines,
};
