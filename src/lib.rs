//! # stripe_lite
//!
//! A lightweight client for the Stripe REST API, with local card number
//! checks that run before anything is sent over the network.
//!
//! ## Features
//!
//! - Luhn checksum validation
//! - Card network classification (Visa, MasterCard, American Express,
//!   Diners Club, Discover, JCB)
//! - Masking and display formatting for card numbers
//! - Typed Stripe client for plans, charges, customers, subscriptions and
//!   tokens (`client` feature)
//! - Command-line checker (`cli` feature)
//!
//! ## Quick Start
//!
//! ```rust
//! use stripe_lite::{classify_card_network, is_luhn_valid, CardNetwork};
//!
//! assert_eq!(classify_card_network("4242424242424242"), CardNetwork::Visa);
//! assert_eq!(is_luhn_valid("4242424242424242"), Ok(true));
//!
//! // Well-formed but wrong: Ok(false)
//! assert_eq!(is_luhn_valid("4213729238347292"), Ok(false));
//!
//! // Malformed: an error, distinct from a failed checksum
//! assert!(is_luhn_valid("12a3").unwrap_err().is_invalid_input());
//! ```
//!
//! ## Full Validation
//!
//! ```rust
//! use stripe_lite::{validate, CardNetwork};
//!
//! let card = validate("3782 822463 10005").unwrap();
//! assert_eq!(card.network(), CardNetwork::AmericanExpress);
//! assert_eq!(card.last_four(), "0005");
//!
//! // Safe for logging - never exposes the full card number
//! println!("Card: {}", card.masked());
//! ```
//!
//! ## Stripe Client
//!
//! ```no_run
//! # #[cfg(feature = "client")]
//! # async fn example() -> Result<(), stripe_lite::client::StripeError> {
//! use stripe_lite::client::{CardParams, ChargeParams, Client, ClientConfig, currency};
//!
//! let client = Client::new(ClientConfig::from_env()?)?;
//!
//! let card = CardParams::new("4242424242424242", 12, 2030);
//! let charge = client
//!     .charges()
//!     .create(&ChargeParams::with_card(400, currency::USD, card))
//!     .await?;
//! println!("charged {} ({})", charge.id, charge.amount);
//! # Ok(())
//! # }
//! ```
//!
//! ## Supported Card Networks
//!
//! | Network | Prefix | Length |
//! |---------|--------|--------|
//! | Visa | 4 | 13, 16 |
//! | MasterCard | 51-55 | 16 |
//! | American Express | 34, 37 | 15 |
//! | Diners Club | 300-305, 36, 38 | 14 |
//! | Discover | 6011 | 16 |
//! | JCB | 3528-3589, 2131, 1800 | 15, 16 |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | `Serialize`/`Deserialize` for public types |
//! | `client` | Async Stripe REST client |
//! | `cli` | `cardcheck` command-line tool |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod card;
pub mod detect;
pub mod error;
pub mod format;
pub mod luhn;
pub mod mask;
pub mod validate;

#[cfg(feature = "client")]
pub mod client;

// Re-export main types at crate root
pub use card::{CardNetwork, ValidatedCard, MAX_CARD_DIGITS, MIN_CARD_DIGITS};
pub use detect::classify_card_network;
pub use error::{ErrorKind, ValidationError};
pub use luhn::is_luhn_valid;
pub use validate::{is_valid, validate, validate_any, validate_digits};

pub use mask::mask_string;
