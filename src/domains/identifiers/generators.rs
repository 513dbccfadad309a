//! Synthetic Australian healthcare identifier generators.
//!
//! | Kind     | Prefix          | Random digits | Check digit | Length |
//! |----------|-----------------|---------------|-------------|--------|
//! | HPI-I    | `800361`        | 9             | Luhn        | 16     |
//! | IHI      | `800360`        | 9             | Luhn        | 16     |
//! | HPI-O    | `800362`        | 9             | Luhn        | 16     |
//! | Medicare | leading 2-6     | 7 or 8        | weighted    | 9-10   |
//! | DVA      | `N`/`H`/`W`/`Q` | 7, 8 or 9     | none        | 8-10   |
//!
//! The numbers are syntactically valid but fictional.

use std::fmt;

use super::checksum::{luhn_check_digit, weighted_checksum};
use super::digits::RandomDigitSource;

const HPI_I_PREFIX: &str = "800361";
const IHI_PREFIX: &str = "800360";
const HPI_O_PREFIX: &str = "800362";

/// Random digits following a Luhn prefix.
const LUHN_BODY_DIGITS: usize = 9;

/// Total length of an HPI-I, IHI or HPI-O.
pub const LUHN_IDENTIFIER_LENGTH: usize = 16;

const MEDICARE_LEADING_DIGITS: [char; 5] = ['2', '3', '4', '5', '6'];

/// DVA card prefixes: N and H gold cards, W white card, Q war widow/widower.
const DVA_PREFIXES: [char; 4] = ['N', 'H', 'W', 'Q'];
const DVA_DIGIT_COUNTS: [usize; 3] = [7, 8, 9];

/// The identifier formats this server can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    /// Healthcare Provider Identifier - Individual.
    HpiI,
    /// Individual Healthcare Identifier.
    Ihi,
    /// Healthcare Provider Identifier - Organisation.
    HpiO,
    /// Medicare card number.
    Medicare,
    /// Department of Veterans' Affairs file number.
    Dva,
}

impl IdentifierKind {
    /// Every kind, in tool registration order.
    pub const ALL: [IdentifierKind; 5] = [
        IdentifierKind::HpiI,
        IdentifierKind::Ihi,
        IdentifierKind::HpiO,
        IdentifierKind::Medicare,
        IdentifierKind::Dva,
    ];

    /// Short display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::HpiI => "HPI-I",
            Self::Ihi => "IHI",
            Self::HpiO => "HPI-O",
            Self::Medicare => "Medicare",
            Self::Dva => "DVA",
        }
    }

    /// Fixed numeric prefix, for the Luhn-checked kinds.
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            Self::HpiI => Some(HPI_I_PREFIX),
            Self::Ihi => Some(IHI_PREFIX),
            Self::HpiO => Some(HPI_O_PREFIX),
            Self::Medicare | Self::Dva => None,
        }
    }

    /// Generate a fresh identifier of this kind.
    pub fn generate(&self, source: &dyn RandomDigitSource) -> Identifier {
        let value = match self {
            Self::HpiI | Self::Ihi | Self::HpiO => {
                // prefix() is Some for every Luhn kind
                luhn_identifier(self.prefix().unwrap_or_default(), source)
            }
            Self::Medicare => medicare_number(source),
            Self::Dva => dva_number(source),
        };

        debug_assert!(
            self.is_well_formed(&value),
            "generated {} {:?} is malformed",
            self.label(),
            value
        );

        Identifier { kind: *self, value }
    }

    /// Check `value` against the output format of this kind.
    ///
    /// This is a shape check only; check digits are not verified.
    pub fn is_well_formed(&self, value: &str) -> bool {
        match self {
            Self::HpiI | Self::Ihi | Self::HpiO => {
                let prefix = self.prefix().unwrap_or_default();
                value.len() == LUHN_IDENTIFIER_LENGTH
                    && value.starts_with(prefix)
                    && all_digits(value)
            }
            Self::Medicare => {
                let mut chars = value.chars();
                matches!(chars.next(), Some('2'..='6'))
                    && (9..=10).contains(&value.len())
                    && all_digits(chars.as_str())
            }
            Self::Dva => {
                let mut chars = value.chars();
                matches!(chars.next(), Some(c) if DVA_PREFIXES.contains(&c))
                    && (8..=10).contains(&value.len())
                    && all_digits(chars.as_str())
            }
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A generated identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    kind: IdentifierKind,
    value: String,
}

impl Identifier {
    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_value(self) -> String {
        self.value
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Generate an HPI-I.
pub fn generate_hpi_i(source: &dyn RandomDigitSource) -> Identifier {
    IdentifierKind::HpiI.generate(source)
}

/// Generate an IHI.
pub fn generate_ihi(source: &dyn RandomDigitSource) -> Identifier {
    IdentifierKind::Ihi.generate(source)
}

/// Generate an HPI-O.
pub fn generate_hpi_o(source: &dyn RandomDigitSource) -> Identifier {
    IdentifierKind::HpiO.generate(source)
}

/// Generate a Medicare number.
pub fn generate_medicare(source: &dyn RandomDigitSource) -> Identifier {
    IdentifierKind::Medicare.generate(source)
}

/// Generate a DVA number.
pub fn generate_dva(source: &dyn RandomDigitSource) -> Identifier {
    IdentifierKind::Dva.generate(source)
}

/// prefix + 9 random digits + Luhn check digit.
fn luhn_identifier(prefix: &str, source: &dyn RandomDigitSource) -> String {
    let body = checked_digits(source, LUHN_BODY_DIGITS);

    let mut value = String::with_capacity(LUHN_IDENTIFIER_LENGTH);
    value.push_str(prefix);
    value.push_str(&body);

    let check = luhn_check_digit(&value);
    value.push(char::from(b'0' + check));
    value
}

/// Leading digit 2-6, then 7 or 8 random digits, then the weighted check digit.
///
/// When 8 random digits are drawn the base number is 9 digits long and its
/// last digit falls outside the weight table, so it does not affect the
/// check digit.
fn medicare_number(source: &dyn RandomDigitSource) -> String {
    let leading = MEDICARE_LEADING_DIGITS[source.choose(MEDICARE_LEADING_DIGITS.len())];
    let use_eight_digits = source.choose(2) == 1;
    let middle_len = if use_eight_digits { 8 } else { 7 };

    let mut value = String::with_capacity(middle_len + 2);
    value.push(leading);
    value.push_str(&checked_digits(source, middle_len));

    let check = weighted_checksum(&value);
    value.push(char::from(b'0' + check));
    value
}

/// Card prefix letter followed by 7-9 random digits.
fn dva_number(source: &dyn RandomDigitSource) -> String {
    let prefix = DVA_PREFIXES[source.choose(DVA_PREFIXES.len())];
    let length = DVA_DIGIT_COUNTS[source.choose(DVA_DIGIT_COUNTS.len())];

    let mut value = String::with_capacity(length + 1);
    value.push(prefix);
    value.push_str(&checked_digits(source, length));
    value
}

fn checked_digits(source: &dyn RandomDigitSource, length: usize) -> String {
    let digits = source.random_digits(length);
    debug_assert!(
        digits.len() == length && all_digits(&digits),
        "digit source returned {:?} for length {}",
        digits,
        length
    );
    digits
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}
