//! Check-digit algorithms.
//!
//! - Luhn (mod 10, alternate doubling) for HPI-I, IHI and HPI-O
//! - Weighted positional sum for Medicare numbers
//!
//! Inputs are ASCII decimal digit strings supplied by the generators. Digit
//! validity is a caller contract and is only asserted in debug builds.

/// Position weights for the Medicare check digit.
pub const MEDICARE_WEIGHTS: [u32; 8] = [1, 3, 7, 9, 1, 3, 7, 9];

/// Compute the Luhn running checksum of a digit string.
///
/// Digits are walked right to left: even positions are added as-is, odd
/// positions are doubled and reduced by 9 when the double exceeds 9.
/// Returns `total mod 10`.
///
/// A string that ends in a correct Luhn check digit yields `0`.
pub fn luhn_checksum(digits: &str) -> u8 {
    let total: u32 = digits
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let d = digit_value(b);
            if i % 2 == 0 {
                d
            } else {
                let doubled = d * 2;
                if doubled < 10 { doubled } else { doubled - 9 }
            }
        })
        .sum();

    (total % 10) as u8
}

/// Derive the Luhn check digit to append to `partial`.
///
/// Appends a `0` placeholder, computes the checksum, and returns
/// `(10 - checksum) mod 10`.
pub fn luhn_check_digit(partial: &str) -> u8 {
    let mut padded = String::with_capacity(partial.len() + 1);
    padded.push_str(partial);
    padded.push('0');

    (10 - luhn_checksum(&padded)) % 10
}

/// Compute the Medicare weighted checksum.
///
/// Each digit is multiplied by [`MEDICARE_WEIGHTS`] at its position. Only the
/// first eight positions carry a weight; any digit past index 7 does not
/// contribute to the sum.
pub fn weighted_checksum(digits: &str) -> u8 {
    let sum: u32 = digits
        .bytes()
        .zip(MEDICARE_WEIGHTS)
        .map(|(b, w)| digit_value(b) * w)
        .sum();

    (sum % 10) as u8
}

fn digit_value(b: u8) -> u32 {
    debug_assert!(b.is_ascii_digit(), "non-digit byte {:?} in checksum input", b as char);
    u32::from(b.wrapping_sub(b'0'))
}
