//! Luhn algorithm implementation for card number validation.
//!
//! The Luhn algorithm (also known as the "modulus 10" algorithm) is a checksum
//! formula used to validate card numbers and other identification numbers.
//! It detects every single-digit error and most adjacent transpositions.
//!
//! # Performance
//!
//! This implementation uses a lookup table for the doubling operation,
//! making it O(n) with no allocation.

use crate::error::ValidationError;

/// Lookup table for doubled digits: double the value, subtract 9 if >= 10.
/// Index is the digit (0-9), value is the transformed result.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Checks a card number string against the Luhn checksum.
///
/// The input must consist of ASCII digits only. There is no length limit.
///
/// # Returns
///
/// * `Ok(true)` - the checksum passes
/// * `Ok(false)` - the input is well-formed but the checksum fails
/// * `Err(ValidationError::Empty)` - the input is empty
/// * `Err(ValidationError::InvalidCharacter { .. })` - the input contains
///   anything other than `0`-`9`
///
/// Both error variants report `ErrorKind::InvalidInput`.
///
/// # Example
///
/// ```
/// use stripe_lite::is_luhn_valid;
///
/// assert_eq!(is_luhn_valid("4242424242424242"), Ok(true));
/// assert_eq!(is_luhn_valid("4213729238347292"), Ok(false));
/// assert!(is_luhn_valid("12a3").is_err());
/// ```
pub fn is_luhn_valid(number: &str) -> Result<bool, ValidationError> {
    if number.is_empty() {
        return Err(ValidationError::Empty);
    }

    if let Some((position, character)) = number
        .chars()
        .enumerate()
        .find(|(_, c)| !c.is_ascii_digit())
    {
        return Err(ValidationError::InvalidCharacter {
            position,
            character,
        });
    }

    let sum = checksum(number.bytes().map(|b| b - b'0'));
    Ok(sum % 10 == 0)
}

/// Validates a card number given as digit values (0-9, not ASCII).
///
/// # Example
///
/// ```
/// use stripe_lite::luhn::validate;
///
/// let digits = [4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2];
/// assert!(validate(&digits));
///
/// let invalid = [4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 3];
/// assert!(!validate(&invalid));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    if digits.is_empty() {
        return false;
    }

    compute_checksum(digits) % 10 == 0
}

/// Computes the Luhn sum modulo 10 for a sequence of digits.
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u32 {
    checksum(digits.iter().copied())
}

/// Sums digits right to left, doubling every second one.
///
/// The rightmost digit is position 0 and is not doubled. The running sum is
/// kept modulo 10 so input length is unbounded.
fn checksum<I>(digits: I) -> u32
where
    I: DoubleEndedIterator<Item = u8>,
{
    digits
        .rev()
        .enumerate()
        .map(|(i, digit)| {
            if i % 2 == 1 {
                DOUBLE_TABLE[digit as usize] as u32
            } else {
                digit as u32
            }
        })
        .fold(0, |acc, value| (acc + value) % 10)
}

/// Generates the check digit for a partial card number.
///
/// Given digits without the check digit, computes the digit that makes the
/// full number pass Luhn validation.
///
/// # Example
///
/// ```
/// use stripe_lite::luhn::generate_check_digit;
///
/// let partial = [4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4];
/// assert_eq!(generate_check_digit(&partial), 2);
/// ```
#[inline]
pub fn generate_check_digit(digits: &[u8]) -> u8 {
    // Appending a 0 shifts every existing digit one position left, which is
    // exactly the doubling pattern of the final number.
    let sum = checksum(digits.iter().copied().chain(std::iter::once(0)));
    ((10 - (sum % 10)) % 10) as u8
}
