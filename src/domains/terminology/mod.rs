//! Terminology domain module.
//!
//! Looks up clinical codes (SNOMED CT, LOINC, ...) by text against a FHIR
//! terminology server.
//!
//! - `client.rs` - `TerminologyClient` trait and the FHIR REST client
//! - `error.rs` - Terminology error types

mod client;
mod error;

pub use client::{ExpansionCoding, FhirTerminologyClient, TerminologyClient};
pub use error::TerminologyError;
