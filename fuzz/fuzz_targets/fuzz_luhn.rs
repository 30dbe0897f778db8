//! Fuzz target for the Luhn check.
//!
//! The strict string check must never panic, must agree with the digit-slice
//! check on digit-only input, and must report malformed input as an error.

#![no_main]

use libfuzzer_sys::fuzz_target;
use stripe_lite::{is_luhn_valid, luhn};

fuzz_target!(|data: &str| {
    let result = is_luhn_valid(data);

    if !data.is_empty() && data.bytes().all(|b| b.is_ascii_digit()) {
        let digits: Vec<u8> = data.bytes().map(|b| b - b'0').collect();
        assert_eq!(result, Ok(luhn::validate(&digits)), "string and digit checks disagree");

        let check = luhn::generate_check_digit(&digits);
        assert!(check <= 9);
        let mut with_check = digits;
        with_check.push(check);
        assert!(luhn::validate(&with_check), "check digit must complete the number");
    } else {
        assert!(result.is_err_and(|e| e.is_invalid_input()));
    }
});
