//! Core card types.
//!
//! This module provides the `CardNetwork` enum for identifying card networks
//! and the `ValidatedCard` struct for holding validated card data securely.

use std::fmt;
use zeroize::Zeroize;

/// Card networks recognized by the classifier.
///
/// The display names are the `brand` strings Stripe reports on card
/// objects, so the same enum is used for locally classified numbers and for
/// cards returned by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardNetwork {
    /// Visa - Prefix 4, lengths 13, 16
    Visa,
    /// MasterCard - Prefix 51-55, length 16
    MasterCard,
    /// American Express - Prefix 34, 37, length 15
    #[cfg_attr(feature = "serde", serde(rename = "American Express"))]
    AmericanExpress,
    /// Diners Club - Prefix 300-305, 36, 38, length 14
    #[cfg_attr(feature = "serde", serde(rename = "Diners Club"))]
    DinersClub,
    /// Discover - Prefix 6011, length 16
    Discover,
    /// JCB - Prefix 3528-3589, 2131, 1800, lengths 15, 16
    #[cfg_attr(feature = "serde", serde(rename = "JCB"))]
    Jcb,
    /// Any number that matches none of the known prefixes.
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

impl CardNetwork {
    /// All networks, in classification priority order.
    pub const ALL: [CardNetwork; 7] = [
        Self::Visa,
        Self::MasterCard,
        Self::AmericanExpress,
        Self::DinersClub,
        Self::Discover,
        Self::Jcb,
        Self::Unknown,
    ];

    /// Returns the canonical lengths for this network.
    ///
    /// `Unknown` has no canonical length and returns an empty slice.
    #[inline]
    pub const fn valid_lengths(&self) -> &'static [u8] {
        match self {
            Self::Visa => &[13, 16],
            Self::MasterCard => &[16],
            Self::AmericanExpress => &[15],
            Self::DinersClub => &[14],
            Self::Discover => &[16],
            Self::Jcb => &[15, 16],
            Self::Unknown => &[],
        }
    }

    /// Returns true if the given length is valid for this network.
    ///
    /// Every length between [`MIN_CARD_DIGITS`] and [`MAX_CARD_DIGITS`] is
    /// accepted for `Unknown`.
    #[inline]
    pub const fn is_valid_length(&self, length: usize) -> bool {
        if let Self::Unknown = self {
            return length >= MIN_CARD_DIGITS && length <= MAX_CARD_DIGITS;
        }
        let valid = self.valid_lengths();
        let mut i = 0;
        while i < valid.len() {
            if valid[i] as usize == length {
                return true;
            }
            i += 1;
        }
        false
    }

    /// Returns a human-readable name for the card network.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::MasterCard => "MasterCard",
            Self::AmericanExpress => "American Express",
            Self::DinersClub => "Diners Club",
            Self::Discover => "Discover",
            Self::Jcb => "JCB",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns true unless this is `Unknown`.
    #[inline]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for CardNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maximum number of digits in a card number.
pub const MAX_CARD_DIGITS: usize = 19;

/// Minimum number of digits accepted by the full validation pipeline.
pub const MIN_CARD_DIGITS: usize = 12;

/// A validated card number with secure memory handling.
///
/// The card number is stored in a fixed-size array that is zeroed when the
/// struct is dropped.
///
/// # Security
///
/// - Full card number is private and only accessible via `number()`
/// - Memory is zeroed on drop using the `zeroize` crate
/// - Debug and Display output is masked
#[derive(Clone)]
pub struct ValidatedCard {
    network: CardNetwork,
    digits: [u8; MAX_CARD_DIGITS],
    digit_count: u8,
}

impl ValidatedCard {
    /// Internal constructor. Use `validate()` to create instances.
    #[inline]
    pub(crate) fn new(network: CardNetwork, digits: [u8; MAX_CARD_DIGITS], digit_count: u8) -> Self {
        Self {
            network,
            digits,
            digit_count,
        }
    }

    #[inline]
    pub(crate) fn with_network(mut self, network: CardNetwork) -> Self {
        self.network = network;
        self
    }

    /// Returns the detected card network.
    #[inline]
    pub const fn network(&self) -> CardNetwork {
        self.network
    }

    /// Returns the number of digits in the card number.
    #[inline]
    pub const fn length(&self) -> usize {
        self.digit_count as usize
    }

    /// Returns the last four digits as a string.
    #[inline]
    pub fn last_four(&self) -> String {
        let len = self.digit_count as usize;
        to_string(&self.digits[len.saturating_sub(4)..len])
    }

    /// Returns the leading digits (at most 8) that identify the issuer.
    #[inline]
    pub fn bin(&self, length: usize) -> String {
        let bin_len = length.min(8).min(self.digit_count as usize);
        to_string(&self.digits[..bin_len])
    }

    /// Returns the 6-digit BIN.
    #[inline]
    pub fn bin6(&self) -> String {
        self.bin(6)
    }

    /// Returns the 8-digit BIN.
    #[inline]
    pub fn bin8(&self) -> String {
        self.bin(8)
    }

    /// Returns the full card number as a string.
    ///
    /// # Security Warning
    ///
    /// This exposes the full card number. Never log the result; use
    /// `masked()` for display.
    #[inline]
    pub fn number(&self) -> String {
        to_string(self.digits())
    }

    /// Returns the card number masked as `****-****-****-1234`.
    #[inline]
    pub fn masked(&self) -> String {
        crate::mask::mask_card(self)
    }

    /// Returns the card number masked as `411111******1234`.
    #[inline]
    pub fn masked_with_bin(&self) -> String {
        crate::mask::mask_with_bin(self)
    }

    #[inline]
    pub(crate) fn digits(&self) -> &[u8] {
        &self.digits[..self.digit_count as usize]
    }
}

fn to_string(digits: &[u8]) -> String {
    digits.iter().map(|&d| (b'0' + d) as char).collect()
}

impl fmt::Debug for ValidatedCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedCard")
            .field("network", &self.network)
            .field("number", &self.masked())
            .field("length", &self.digit_count)
            .finish()
    }
}

impl fmt::Display for ValidatedCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.network, self.masked())
    }
}

impl Drop for ValidatedCard {
    fn drop(&mut self) {
        self.digits.zeroize();
    }
}
