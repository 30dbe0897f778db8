//! Rich error types for card number validation.
//!
//! Provides detailed, actionable error messages that explain exactly why validation failed.

use crate::CardNetwork;

/// Broad category of a [`ValidationError`].
///
/// Callers that only need to tell malformed input apart from a number that
/// is well-formed but wrong can match on this instead of every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input is not a usable digit string (empty, bad characters, bad length).
    InvalidInput,
    /// The digits are well-formed but the Luhn checksum failed.
    Checksum,
    /// The digit count does not fit the detected network.
    Length,
    /// No known card network matches the number.
    Network,
}

/// Errors that can occur during card number validation.
///
/// Each variant provides specific details about the validation failure,
/// enabling users to understand and fix the issue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The input string was empty.
    #[error("card number is empty")]
    Empty,

    /// The card number has too few digits.
    #[error("card number too short: got {length} digits, minimum is {minimum}")]
    TooShort {
        /// The actual number of digits provided.
        length: usize,
        /// The minimum required digits (12).
        minimum: usize,
    },

    /// The card number has too many digits.
    #[error("card number too long: got {length} digits, maximum is {maximum}")]
    TooLong {
        /// The actual number of digits provided.
        length: usize,
        /// The maximum allowed digits (19).
        maximum: usize,
    },

    /// An invalid character was found in the input.
    #[error("invalid character '{}' at position {position}", .character.escape_default())]
    InvalidCharacter {
        /// The position in the input string (0-indexed, in characters).
        position: usize,
        /// The invalid character that was found.
        character: char,
    },

    /// The Luhn checksum validation failed.
    ///
    /// This usually indicates a typo in the card number.
    #[error("invalid checksum (Luhn check failed) - please verify the card number")]
    InvalidChecksum,

    /// The card number length is invalid for the detected network.
    #[error("{network} cards must have {} digits, got {length}", join_lengths(.valid_lengths))]
    InvalidLengthForNetwork {
        /// The detected card network.
        network: CardNetwork,
        /// The actual number of digits.
        length: usize,
        /// The valid lengths for this network.
        valid_lengths: &'static [u8],
    },

    /// Could not detect a known card network from the prefix.
    #[error("unknown card network - check the card number prefix")]
    UnknownNetwork,

    /// The card number contains only separators.
    #[error("card number contains no digits")]
    NoDigits,
}

impl ValidationError {
    /// Returns the broad category of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Empty
            | Self::NoDigits
            | Self::InvalidCharacter { .. }
            | Self::TooShort { .. }
            | Self::TooLong { .. } => ErrorKind::InvalidInput,
            Self::InvalidChecksum => ErrorKind::Checksum,
            Self::InvalidLengthForNetwork { .. } => ErrorKind::Length,
            Self::UnknownNetwork => ErrorKind::Network,
        }
    }

    /// Returns true if the input itself was malformed.
    #[inline]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidInput)
    }
}

fn join_lengths(lengths: &[u8]) -> String {
    lengths
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(" or ")
}
