//! FHIR tools MCP server.
//!
//! A Model Context Protocol server with tools for producing and checking
//! FHIR test data:
//!
//! - fictional but checksum-valid Australian identifiers (HPI-I, IHI, HPI-O,
//!   Medicare, DVA) and random UUIDs
//! - resource validation with the HL7 FHIR validator
//! - code lookup against a FHIR terminology server
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **identifiers**: digit sources, checksums and identifier generators
//!   - **validation**: the validator seam and its Java implementation
//!   - **terminology**: the terminology client seam and its HTTP implementation
//!   - **tools**: MCP tool definitions, router and registry
//!
//! # Example
//!
//! ```rust,no_run
//! use fhir_tools_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```
//!
//! Identifiers can also be generated without the server:
//!
//! ```rust
//! use fhir_tools_mcp_server::domains::identifiers::{
//!     generate_ihi, luhn_checksum, SeededDigitSource,
//! };
//!
//! let ihi = generate_ihi(&SeededDigitSource::new(42));
//! assert!(ihi.value().starts_with("800360"));
//! assert_eq!(luhn_checksum(ihi.value()), 0);
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
