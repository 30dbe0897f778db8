//! Fuzz target for the full validation pipeline and display helpers.
//!
//! Nothing here may panic, and a validated card must agree with the strict
//! checks.

#![no_main]

use libfuzzer_sys::fuzz_target;
use stripe_lite::{classify_card_network, format, is_luhn_valid, is_valid, mask, validate, validate_any, validate_digits};

fuzz_target!(|data: &str| {
    let _ = is_valid(data);
    let _ = mask::mask_string(data);
    let _ = format::format_card_number(data);

    if let Ok(card) = validate_any(data) {
        let number = card.number();
        assert_eq!(is_luhn_valid(&number), Ok(true));
        assert_eq!(card.network(), classify_card_network(&number));
        assert!(!card.masked().contains(&number));
        assert_eq!(validate(data).is_ok(), card.network().is_known());
    }

    let digits: Vec<u8> = data.bytes().map(|b| b % 10).collect();
    let _ = validate_digits(&digits);
});
