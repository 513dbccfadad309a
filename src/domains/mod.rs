//! Domains module containing business logic organized by bounded contexts.
//!
//! `identifiers`, `validation` and `terminology` hold the FHIR logic;
//! `tools` exposes it over MCP.

pub mod identifiers;
pub mod terminology;
pub mod tools;
pub mod validation;
