//! Card network classification by prefix.
//!
//! The leading digits of a card number (the IIN, or BIN) identify the
//! network. Rules are tried in a fixed order, most specific first, so every
//! number maps to exactly one network.
//!
//! | Network | Prefix | Canonical lengths |
//! |---------|--------|-------------------|
//! | Visa | 4 | 13, 16 |
//! | MasterCard | 51-55 | 16 |
//! | American Express | 34, 37 | 15 |
//! | Diners Club | 300-305, 36, 38 (14 digits) | 14 |
//! | Discover | 6011 | 16 |
//! | JCB | 3528-3589, 2131, 1800, 38 (other lengths) | 15, 16 |
//!
//! Lengths only break the tie on the shared `38` prefix. Everywhere else
//! classification looks at the prefix alone; length checks belong to
//! [`crate::validate`].

use crate::CardNetwork;

/// Classifies a card number string into a network.
///
/// Never fails: empty input, or input with any character outside `0`-`9`,
/// classifies as [`CardNetwork::Unknown`]. The checksum is not consulted.
///
/// # Example
///
/// ```
/// use stripe_lite::{classify_card_network, CardNetwork};
///
/// assert_eq!(classify_card_network("4242424242424242"), CardNetwork::Visa);
/// assert_eq!(classify_card_network("344347386473833"), CardNetwork::AmericanExpress);
/// assert_eq!(classify_card_network("79927398713"), CardNetwork::Unknown);
/// ```
pub fn classify_card_network(number: &str) -> CardNetwork {
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return CardNetwork::Unknown;
    }

    // Only the first four digits and the length matter.
    let mut prefix = [0u8; 4];
    let mut taken = 0;
    for (slot, b) in prefix.iter_mut().zip(number.bytes()) {
        *slot = b - b'0';
        taken += 1;
    }

    classify(&prefix[..taken], number.len())
}

/// Classifies a card number given as digit values (0-9, not ASCII).
///
/// # Example
///
/// ```
/// use stripe_lite::detect::detect_network;
/// use stripe_lite::CardNetwork;
///
/// let amex = [3, 7, 8, 2, 8, 2, 2, 4, 6, 3, 1, 0, 0, 0, 5];
/// assert_eq!(detect_network(&amex), CardNetwork::AmericanExpress);
/// ```
#[inline]
pub fn detect_network(digits: &[u8]) -> CardNetwork {
    classify(digits, digits.len())
}

fn classify(digits: &[u8], length: usize) -> CardNetwork {
    match digits {
        [4, ..] => CardNetwork::Visa,

        [5, 1..=5, ..] => CardNetwork::MasterCard,

        [3, 4, ..] | [3, 7, ..] => CardNetwork::AmericanExpress,

        [3, 0, 0..=5, ..] | [3, 6, ..] => CardNetwork::DinersClub,
        [3, 8, ..] if length == 14 => CardNetwork::DinersClub,

        [6, 0, 1, 1, ..] => CardNetwork::Discover,

        // 3528-3589
        [3, 5, 2, 8..=9, ..] => CardNetwork::Jcb,
        [3, 5, 3..=8, _, ..] => CardNetwork::Jcb,
        [2, 1, 3, 1, ..] | [1, 8, 0, 0, ..] => CardNetwork::Jcb,
        [3, 8, ..] => CardNetwork::Jcb,

        _ => CardNetwork::Unknown,
    }
}

/// Returns true if the length is canonical for the network.
#[inline]
pub fn is_valid_length_for_network(network: CardNetwork, length: usize) -> bool {
    network.is_valid_length(length)
}
