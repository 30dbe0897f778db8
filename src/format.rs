//! Card number formatting utilities.
//!
//! # Format Conventions
//!
//! - **American Express** (15 digits): `XXXX XXXXXX XXXXX`
//! - **Diners Club** (14 digits): `XXXX XXXXXX XXXX`
//! - **Everything else**: groups of 4 with the remainder at the end
//!
//! # Example
//!
//! ```
//! use stripe_lite::format::{format_card_number, format_with_separator};
//!
//! assert_eq!(format_card_number("4242424242424242"), "4242 4242 4242 4242");
//! assert_eq!(format_card_number("378282246310005"), "3782 822463 10005");
//! assert_eq!(format_with_separator("4242424242424242", "-"), "4242-4242-4242-4242");
//! ```

use crate::detect::detect_network;
use crate::CardNetwork;

/// Formats a card number with space-separated groups.
pub fn format_card_number(input: &str) -> String {
    format_with_separator(input, " ")
}

/// Formats a card number with a custom separator.
///
/// Non-digit characters in the input are dropped first; grouping follows
/// the detected network.
///
/// # Example
///
/// ```
/// use stripe_lite::format::format_with_separator;
///
/// assert_eq!(format_with_separator("4242 4242 4242 4242", "-"), "4242-4242-4242-4242");
/// assert_eq!(format_with_separator("30569309025904", " "), "3056 930902 5904");
/// ```
pub fn format_with_separator(input: &str, separator: &str) -> String {
    let digits: Vec<u8> = input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .map(|c| (c as u8) - b'0')
        .collect();

    if digits.is_empty() {
        return String::new();
    }

    let groups = grouping_for_network(detect_network(&digits), digits.len());

    let mut result = String::with_capacity(digits.len() + groups.len() * separator.len());
    let mut chunks = digits.as_slice();
    for group_size in groups {
        if chunks.is_empty() {
            break;
        }
        let (head, tail) = chunks.split_at(group_size.min(chunks.len()));
        if !result.is_empty() {
            result.push_str(separator);
        }
        result.extend(head.iter().map(|&d| (b'0' + d) as char));
        chunks = tail;
    }

    result
}

/// Returns the digit grouping pattern for a network and length.
///
/// The last group absorbs any digits left over from the fixed patterns.
fn grouping_for_network(network: CardNetwork, length: usize) -> Vec<usize> {
    match network {
        CardNetwork::AmericanExpress if length == 15 => vec![4, 6, 5],
        CardNetwork::DinersClub if length == 14 => vec![4, 6, 4],
        _ => {
            let mut groups = vec![4; length / 4];
            if length % 4 > 0 {
                groups.push(length % 4);
            }
            groups
        }
    }
}

/// Strips all formatting from a card number, leaving only digits.
///
/// # Example
///
/// ```
/// use stripe_lite::format::strip_formatting;
///
/// assert_eq!(strip_formatting("4242 4242 4242 4242"), "4242424242424242");
/// assert_eq!(strip_formatting("4242-4242-4242-4242"), "4242424242424242");
/// ```
pub fn strip_formatting(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_visa() {
        assert_eq!(format_card_number("4242424242424242"), "4242 4242 4242 4242");
        assert_eq!(format_card_number("4222222222222"), "4222 2222 2222 2");
    }

    #[test]
    fn test_format_amex() {
        assert_eq!(format_card_number("378282246310005"), "3782 822463 10005");
        assert_eq!(format_card_number("3782-8224-6310-005"), "3782 822463 10005");
    }

    #[test]
    fn test_format_diners() {
        assert_eq!(format_card_number("30569309025904"), "3056 930902 5904");
        // 15-digit Diners falls back to groups of four
        assert_eq!(format_card_number("361134239348202"), "3611 3423 9348 202");
    }

    #[test]
    fn test_custom_separator() {
        assert_eq!(
            format_with_separator("4242424242424242", " - "),
            "4242 - 4242 - 4242 - 4242"
        );
        assert_eq!(format_with_separator("4242424242424242", ""), "4242424242424242");
    }

    #[test]
    fn test_empty_and_non_digit_input() {
        assert_eq!(format_card_number(""), "");
        assert_eq!(format_card_number("abc"), "");
    }

    #[test]
    fn test_strip_formatting() {
        assert_eq!(strip_formatting("4242.4242.4242.4242"), "4242424242424242");
        assert_eq!(strip_formatting("no digits"), "");
    }
}
