//! Integration tests for stripe_lite's offline card checks.
//!
//! These cover the public API end to end: the strict core operations, the
//! full validation pipeline, and the display helpers built on it.

use stripe_lite::{
    classify_card_network, format, is_luhn_valid, is_valid, luhn, mask, validate, validate_any,
    validate_digits, CardNetwork, ErrorKind, ValidationError, MIN_CARD_DIGITS,
};

// =============================================================================
// TEST CARD NUMBERS
// =============================================================================
// Published test numbers. They pass Luhn but are not real cards.

mod test_cards {
    pub const VISA_1: &str = "4242424242424242";
    pub const VISA_2: &str = "4111111111111111";
    pub const VISA_3: &str = "4012888888881881";
    pub const VISA_13: &str = "4222222222222";
    pub const VISA_DEBIT: &str = "4000056655665556";

    pub const MC_1: &str = "5555555555554444";
    pub const MC_2: &str = "5105105105105100";
    pub const MC_3: &str = "5200828282828210";

    pub const AMEX_1: &str = "378282246310005";
    pub const AMEX_2: &str = "371449635398431";
    pub const AMEX_3: &str = "340000000000009";

    pub const DISCOVER_1: &str = "6011111111111117";
    pub const DISCOVER_2: &str = "6011000990139424";

    pub const DINERS_1: &str = "30569309025904";
    pub const DINERS_2: &str = "38520000023237";
    pub const DINERS_3: &str = "36700102000000";

    pub const JCB_1: &str = "3530111333300000";
    pub const JCB_2: &str = "3566002020360505";
    pub const JCB_15_2131: &str = "213100000000001";
    pub const JCB_15_1800: &str = "180000000000002";
}

use test_cards::*;

// =============================================================================
// STRIPE FIXTURES
// =============================================================================

/// (number, expected network, expected Luhn result)
const STRIPE_FIXTURES: &[(&str, CardNetwork, bool)] = &[
    ("4242424242424242", CardNetwork::Visa, true),
    ("4213729238347292", CardNetwork::Visa, false),
    ("79927398713", CardNetwork::Unknown, true),
    ("79927398710", CardNetwork::Unknown, false),
    ("601134239348202", CardNetwork::Discover, false),
    ("344347386473833", CardNetwork::AmericanExpress, false),
    ("374347386473833", CardNetwork::AmericanExpress, false),
    ("361134239348202", CardNetwork::DinersClub, false),
    ("300134239348202", CardNetwork::DinersClub, false),
    ("521134239348202", CardNetwork::MasterCard, false),
    ("380134239348202", CardNetwork::Jcb, false),
    ("180034239348202", CardNetwork::Jcb, false),
];

#[test]
fn test_stripe_fixtures() {
    for &(number, network, luhn_ok) in STRIPE_FIXTURES {
        assert_eq!(classify_card_network(number), network, "network of {number}");
        assert_eq!(is_luhn_valid(number), Ok(luhn_ok), "luhn of {number}");
    }
}

#[test]
fn test_fixture_checksum_failures_are_not_input_errors() {
    for &(number, _, luhn_ok) in STRIPE_FIXTURES {
        if !luhn_ok {
            assert!(matches!(is_luhn_valid(number), Ok(false)));
            let expected = if number.len() < MIN_CARD_DIGITS {
                ValidationError::TooShort {
                    length: number.len(),
                    minimum: MIN_CARD_DIGITS,
                }
            } else {
                ValidationError::InvalidChecksum
            };
            assert_eq!(validate_any(number).unwrap_err(), expected, "{number}");
        }
    }
}

#[test]
fn test_short_fixture_fails_length_before_checksum() {
    assert_eq!(is_luhn_valid("79927398710"), Ok(false));
    assert_eq!(
        validate_any("79927398710").unwrap_err(),
        ValidationError::TooShort {
            length: 11,
            minimum: MIN_CARD_DIGITS,
        }
    );
}

// =============================================================================
// VALIDATION - VALID CARDS
// =============================================================================

#[test]
fn test_all_visa_test_cards() {
    for number in [VISA_1, VISA_2, VISA_3, VISA_13, VISA_DEBIT] {
        let card = validate(number).unwrap_or_else(|e| panic!("{number}: {e}"));
        assert_eq!(card.network(), CardNetwork::Visa);
    }
}

#[test]
fn test_all_mastercard_test_cards() {
    for number in [MC_1, MC_2, MC_3] {
        let card = validate(number).unwrap_or_else(|e| panic!("{number}: {e}"));
        assert_eq!(card.network(), CardNetwork::MasterCard);
    }
}

#[test]
fn test_all_amex_test_cards() {
    for number in [AMEX_1, AMEX_2, AMEX_3] {
        let card = validate(number).unwrap_or_else(|e| panic!("{number}: {e}"));
        assert_eq!(card.network(), CardNetwork::AmericanExpress);
        assert_eq!(card.length(), 15);
    }
}

#[test]
fn test_all_discover_test_cards() {
    for number in [DISCOVER_1, DISCOVER_2] {
        let card = validate(number).unwrap_or_else(|e| panic!("{number}: {e}"));
        assert_eq!(card.network(), CardNetwork::Discover);
    }
}

#[test]
fn test_all_diners_test_cards() {
    for number in [DINERS_1, DINERS_2, DINERS_3] {
        let card = validate(number).unwrap_or_else(|e| panic!("{number}: {e}"));
        assert_eq!(card.network(), CardNetwork::DinersClub);
        assert_eq!(card.length(), 14);
    }
}

#[test]
fn test_all_jcb_test_cards() {
    for number in [JCB_1, JCB_2, JCB_15_2131, JCB_15_1800] {
        let card = validate(number).unwrap_or_else(|e| panic!("{number}: {e}"));
        assert_eq!(card.network(), CardNetwork::Jcb);
    }
}

#[test]
fn test_formatted_input_accepted() {
    for number in [
        "4242 4242 4242 4242",
        "4242-4242-4242-4242",
        "4242.4242.4242.4242",
        " 4242 4242-4242.4242 ",
    ] {
        let card = validate(number).unwrap_or_else(|e| panic!("{number:?}: {e}"));
        assert_eq!(card.number(), VISA_1);
    }
}

// =============================================================================
// VALIDATION - INVALID CARDS
// =============================================================================

#[test]
fn test_checksum_failure() {
    assert_eq!(validate("4242424242424241").unwrap_err(), ValidationError::InvalidChecksum);
    assert!(!is_valid("4242424242424241"));
}

#[test]
fn test_unknown_network_only_accepted_by_validate_any() {
    // 12 digits, Luhn-valid, no known prefix.
    assert_eq!(validate("500000001239").unwrap_err(), ValidationError::UnknownNetwork);
    let card = validate_any("500000001239").unwrap();
    assert_eq!(card.network(), CardNetwork::Unknown);
}

#[test]
fn test_prefix_matches_but_length_does_not() {
    // Visa prefix, Luhn-valid, 14 digits.
    let err = validate("42424242424242").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Length);
    match err {
        ValidationError::InvalidLengthForNetwork { network, length, .. } => {
            assert_eq!(network, CardNetwork::Visa);
            assert_eq!(length, 14);
        }
        other => panic!("expected length error, got {other:?}"),
    }
}

#[test]
fn test_length_bounds() {
    assert!(matches!(
        validate("79927398713"),
        Err(ValidationError::TooShort { length: 11, minimum: 12 })
    ));
    assert!(matches!(
        validate("4000000000000000000000"),
        Err(ValidationError::TooLong { .. })
    ));
}

#[test]
fn test_malformed_input() {
    assert_eq!(validate("").unwrap_err(), ValidationError::Empty);
    assert_eq!(validate(" - . ").unwrap_err(), ValidationError::NoDigits);
    assert_eq!(
        validate("4242 4242 x242 4242").unwrap_err(),
        ValidationError::InvalidCharacter { position: 10, character: 'x' }
    );
    for input in ["", " - . ", "4242 4242 x242 4242"] {
        assert_eq!(validate(input).unwrap_err().kind(), ErrorKind::InvalidInput);
    }
}

// =============================================================================
// STRICT CORE OPERATIONS
// =============================================================================

#[test]
fn test_strict_luhn_rejects_separators() {
    let err = is_luhn_valid("4242 4242 4242 4242").unwrap_err();
    assert!(err.is_invalid_input());
    assert_eq!(is_luhn_valid(""), Err(ValidationError::Empty));
}

#[test]
fn test_strict_classification_of_malformed_input() {
    assert_eq!(classify_card_network(""), CardNetwork::Unknown);
    assert_eq!(classify_card_network("4242 4242"), CardNetwork::Unknown);
    assert_eq!(classify_card_network("abcd"), CardNetwork::Unknown);
}

#[test]
fn test_classification_ignores_checksum_and_length() {
    assert_eq!(classify_card_network("4"), CardNetwork::Visa);
    assert_eq!(classify_card_network("4999999999999999999999"), CardNetwork::Visa);
    assert_eq!(classify_card_network("37"), CardNetwork::AmericanExpress);
}

#[test]
fn test_strict_and_full_pipeline_agree_on_valid_cards() {
    for number in [VISA_1, MC_1, AMEX_1, DISCOVER_1, DINERS_1, DINERS_2, JCB_1] {
        let card = validate(number).unwrap();
        assert_eq!(is_luhn_valid(number), Ok(true));
        assert_eq!(classify_card_network(number), card.network());
    }
}

#[test]
fn test_validate_digits_matches_validate() {
    let digits: Vec<u8> = AMEX_1.bytes().map(|b| b - b'0').collect();
    let card = validate_digits(&digits).unwrap();
    assert_eq!(card.network(), CardNetwork::AmericanExpress);
    assert_eq!(card.number(), AMEX_1);

    assert!(matches!(
        validate_digits(&[4, 2, 10, 2]),
        Err(ValidationError::InvalidCharacter { position: 2, .. })
    ));
}

#[test]
fn test_check_digit_completes_fixture_prefixes() {
    // Every checksum-failing fixture becomes valid with the right last digit.
    for &(number, network, _) in STRIPE_FIXTURES {
        let body: Vec<u8> = number[..number.len() - 1].bytes().map(|b| b - b'0').collect();
        let fixed = format!("{}{}", &number[..number.len() - 1], luhn::generate_check_digit(&body));
        assert_eq!(is_luhn_valid(&fixed), Ok(true), "{fixed}");
        assert_eq!(classify_card_network(&fixed), network);
    }
}

// =============================================================================
// DISPLAY HELPERS
// =============================================================================

#[test]
fn test_masking_never_reveals_middle_digits() {
    for number in [VISA_1, MC_1, AMEX_1, DINERS_1, JCB_1] {
        let card = validate(number).unwrap();
        let masked = card.masked();
        assert!(masked.ends_with(&number[number.len() - 4..]));
        assert!(!masked.contains(&number[..6]));

        let with_bin = card.masked_with_bin();
        assert!(with_bin.starts_with(&number[..6]));
        assert!(with_bin.ends_with(&number[number.len() - 4..]));
        assert_eq!(with_bin.len(), number.len());
    }
}

#[test]
fn test_debug_and_display_are_masked() {
    let card = validate(VISA_1).unwrap();
    assert!(!format!("{card:?}").contains(VISA_1));
    assert!(!format!("{card}").contains(VISA_1));
}

#[test]
fn test_mask_string_on_raw_input() {
    assert_eq!(mask::mask_string("4242-4242-4242-4242"), "****-****-****-4242");
    assert_eq!(mask::last_four_from_string("3782 822463 10005"), "0005");
}

#[test]
fn test_format_by_network() {
    assert_eq!(format::format_card_number(VISA_1), "4242 4242 4242 4242");
    assert_eq!(format::format_card_number(AMEX_1), "3782 822463 10005");
    assert_eq!(format::format_card_number(DINERS_1), "3056 930902 5904");
    assert_eq!(format::strip_formatting("3782 822463 10005"), AMEX_1);
}

// =============================================================================
// CONCURRENCY
// =============================================================================

#[test]
fn test_parallel_validation() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let number = [VISA_1, MC_1, AMEX_1, JCB_1][i % 4];
                (0..1000).all(|_| is_valid(number))
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
