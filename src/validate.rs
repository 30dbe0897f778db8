//! Full validation pipeline for card numbers.
//!
//! Combines parsing, length checks, the Luhn checksum, network
//! classification, and the network's canonical lengths into one operation.
//! This is the check applied to card details before they are sent to Stripe.
//!
//! Unlike [`crate::is_luhn_valid`], parsing here tolerates the separators
//! people type: spaces, hyphens, and dots.

use crate::card::{CardNetwork, ValidatedCard, MAX_CARD_DIGITS, MIN_CARD_DIGITS};
use crate::detect::detect_network;
use crate::error::ValidationError;
use crate::luhn;

/// Validates a card number string.
///
/// Performs, in order:
/// 1. Input parsing (strips spaces, hyphens, and dots)
/// 2. Length validation (12 to 19 digits)
/// 3. Luhn checksum validation
/// 4. Network detection (unknown networks are rejected)
/// 5. Network-specific length validation
///
/// # Example
///
/// ```
/// use stripe_lite::{validate, CardNetwork};
///
/// let card = validate("4242-4242-4242-4242").unwrap();
/// assert_eq!(card.network(), CardNetwork::Visa);
/// assert_eq!(card.last_four(), "4242");
///
/// assert!(validate("4242-4242-4242-4243").is_err());
/// ```
pub fn validate(input: &str) -> Result<ValidatedCard, ValidationError> {
    let (digits, count) = parse(input)?;
    finish(digits, count, false)
}

/// Validates a card number string, accepting unknown networks.
///
/// Like [`validate`], but a number that matches no known prefix is accepted
/// as [`CardNetwork::Unknown`] at any length between 12 and 19 digits.
///
/// # Example
///
/// ```
/// use stripe_lite::{validate_any, CardNetwork};
///
/// let card = validate_any("7992739871300").unwrap();
/// assert_eq!(card.network(), CardNetwork::Unknown);
/// ```
pub fn validate_any(input: &str) -> Result<ValidatedCard, ValidationError> {
    let (digits, count) = parse(input)?;
    finish(digits, count, true)
}

/// Validates a pre-parsed slice of digits (0-9 values, not ASCII).
///
/// # Example
///
/// ```
/// use stripe_lite::validate_digits;
///
/// let digits = [4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2];
/// let card = validate_digits(&digits).unwrap();
/// assert_eq!(card.network().name(), "Visa");
/// ```
pub fn validate_digits(digits: &[u8]) -> Result<ValidatedCard, ValidationError> {
    let count = digits.len();

    if count == 0 {
        return Err(ValidationError::Empty);
    }

    if count > MAX_CARD_DIGITS {
        return Err(ValidationError::TooLong {
            length: count,
            maximum: MAX_CARD_DIGITS,
        });
    }

    if let Some(position) = digits.iter().position(|&d| d > 9) {
        return Err(ValidationError::InvalidCharacter {
            position,
            character: char::REPLACEMENT_CHARACTER,
        });
    }

    let mut fixed = [0u8; MAX_CARD_DIGITS];
    fixed[..count].copy_from_slice(digits);

    finish(fixed, count, false)
}

/// Quickly checks if a card number is valid without returning detailed info.
///
/// # Example
///
/// ```
/// use stripe_lite::is_valid;
///
/// assert!(is_valid("4242 4242 4242 4242"));
/// assert!(!is_valid("4242 4242 4242 4243"));
/// ```
#[inline]
pub fn is_valid(input: &str) -> bool {
    validate(input).is_ok()
}

/// Extracts digits, skipping separators.
fn parse(input: &str) -> Result<([u8; MAX_CARD_DIGITS], usize), ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::Empty);
    }

    let mut digits = [0u8; MAX_CARD_DIGITS];
    let mut count = 0usize;

    for (position, c) in input.chars().enumerate() {
        match c {
            '0'..='9' => {
                if count >= MAX_CARD_DIGITS {
                    return Err(ValidationError::TooLong {
                        length: count + 1,
                        maximum: MAX_CARD_DIGITS,
                    });
                }
                digits[count] = (c as u8) - b'0';
                count += 1;
            }
            ' ' | '-' | '.' => {}
            _ => {
                return Err(ValidationError::InvalidCharacter {
                    position,
                    character: c,
                });
            }
        }
    }

    if count == 0 {
        return Err(ValidationError::NoDigits);
    }

    Ok((digits, count))
}

fn finish(
    digits: [u8; MAX_CARD_DIGITS],
    count: usize,
    allow_unknown: bool,
) -> Result<ValidatedCard, ValidationError> {
    let card = ValidatedCard::new(CardNetwork::Unknown, digits, count as u8);

    if count < MIN_CARD_DIGITS {
        return Err(ValidationError::TooShort {
            length: count,
            minimum: MIN_CARD_DIGITS,
        });
    }

    if !luhn::validate(card.digits()) {
        return Err(ValidationError::InvalidChecksum);
    }

    let network = detect_network(card.digits());
    if !network.is_known() && !allow_unknown {
        return Err(ValidationError::UnknownNetwork);
    }

    if !network.is_valid_length(count) {
        return Err(ValidationError::InvalidLengthForNetwork {
            network,
            length: count,
            valid_lengths: network.valid_lengths(),
        });
    }

    Ok(card.with_network(network))
}
