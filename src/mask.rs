//! Masking utilities for card numbers.
//!
//! Card numbers must never show up in logs or error messages in full. These
//! helpers reveal at most the BIN (first 6 digits) and the last 4 digits.

use crate::ValidatedCard;

/// Masks a card number showing only the last 4 digits.
///
/// Format: `****-****-****-1234`
///
/// # Example
///
/// ```
/// use stripe_lite::validate;
///
/// let card = validate("4242-4242-4242-4242").unwrap();
/// assert_eq!(card.masked(), "****-****-****-4242");
/// ```
#[inline]
pub fn mask_card(card: &ValidatedCard) -> String {
    let digits: Vec<char> = card.digits().iter().map(|&d| (b'0' + d) as char).collect();
    mask_digits(&digits)
}

/// Masks a card number showing the BIN (first 6) and last 4 digits.
///
/// Format: `424242******4242`. Cards with 10 digits or fewer fall back to
/// [`mask_card`].
///
/// # Example
///
/// ```
/// use stripe_lite::validate;
///
/// let card = validate("4242-4242-4242-4242").unwrap();
/// assert_eq!(card.masked_with_bin(), "424242******4242");
/// ```
#[inline]
pub fn mask_with_bin(card: &ValidatedCard) -> String {
    let digits = card.digits();
    let len = digits.len();

    if len <= 10 {
        return mask_card(card);
    }

    let mut result = String::with_capacity(len);
    result.extend(digits[..6].iter().map(|&d| (b'0' + d) as char));
    result.extend(std::iter::repeat('*').take(len - 10));
    result.extend(digits[len - 4..].iter().map(|&d| (b'0' + d) as char));
    result
}

/// Masks a raw, unvalidated card number string.
///
/// Non-digit characters are dropped before masking, so formatted input masks
/// the same way as bare digits. Inputs of 4 digits or fewer are fully masked.
///
/// # Example
///
/// ```
/// use stripe_lite::mask::mask_string;
///
/// assert_eq!(mask_string("4242 4242 4242 4242"), "****-****-****-4242");
/// assert_eq!(mask_string("123"), "***");
/// ```
#[inline]
pub fn mask_string(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() <= 4 {
        return "*".repeat(digits.len());
    }
    mask_digits(&digits)
}

/// Extracts just the last 4 digits from a card number string.
///
/// Returns an empty string if there are fewer than 4 digits.
#[inline]
pub fn last_four_from_string(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() >= 4 {
        digits[digits.len() - 4..].iter().collect()
    } else {
        String::new()
    }
}

fn mask_digits(digits: &[char]) -> String {
    let len = digits.len();
    let masked_count = len.saturating_sub(4);
    let mut result = String::with_capacity(len + (len / 4));

    for i in 0..masked_count {
        if i > 0 && i % 4 == 0 {
            result.push('-');
        }
        result.push('*');
    }

    if masked_count > 0 && masked_count % 4 == 0 {
        result.push('-');
    }

    result.extend(&digits[masked_count..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate_any;

    #[test]
    fn test_mask_card_16_digits() {
        let card = validate_any("4242424242424242").unwrap();
        assert_eq!(mask_card(&card), "****-****-****-4242");
    }

    #[test]
    fn test_mask_card_15_digits() {
        let card = validate_any("378282246310005").unwrap();
        let masked = mask_card(&card);
        assert_eq!(masked, "****-****-***0005");
    }

    #[test]
    fn test_mask_with_bin() {
        let card = validate_any("4242424242424242").unwrap();
        assert_eq!(mask_with_bin(&card), "424242******4242");

        let card = validate_any("30569309025904").unwrap();
        assert_eq!(mask_with_bin(&card), "305693****5904");
    }

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string("4242424242424242"), "****-****-****-4242");
        assert_eq!(mask_string("4242-4242-4242-4242"), "****-****-****-4242");
        assert_eq!(mask_string("4242 4242 4242 4242"), "****-****-****-4242");
        assert_eq!(mask_string(""), "");
        assert_eq!(mask_string("1234"), "****");
    }

    #[test]
    fn test_last_four_from_string() {
        assert_eq!(last_four_from_string("4242424242424242"), "4242");
        assert_eq!(last_four_from_string("4242-4242-4242-1234"), "1234");
        assert_eq!(last_four_from_string("123"), "");
    }

    #[test]
    fn test_mask_short_card() {
        // 12-digit card (minimum)
        let card = validate_any("500000001239").unwrap();
        assert_eq!(mask_card(&card), "****-****-1239");
    }
}
