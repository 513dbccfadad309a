//! Identifiers domain module.
//!
//! Synthetic identifier generation for Australian healthcare records.
//!
//! ## Architecture
//!
//! - `digits.rs` - Injectable randomness (`RandomDigitSource`)
//! - `checksum.rs` - Luhn and weighted positional check digits
//! - `generators.rs` - One generator per identifier kind
//!
//! All generators are synchronous and stateless; the only input is the
//! digit source passed in by the caller.

pub mod checksum;
pub mod digits;
pub mod generators;

pub use checksum::{MEDICARE_WEIGHTS, luhn_check_digit, luhn_checksum, weighted_checksum};
pub use digits::{FixedDigitSource, RandomDigitSource, SeededDigitSource, ThreadRngDigitSource};
pub use generators::{
    Identifier, IdentifierKind, generate_dva, generate_hpi_i, generate_hpi_o, generate_ihi,
    generate_medicare,
};
