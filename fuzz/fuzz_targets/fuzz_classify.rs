//! Fuzz target for network classification.

#![no_main]

use libfuzzer_sys::fuzz_target;
use stripe_lite::{classify_card_network, detect, CardNetwork};

fuzz_target!(|data: &str| {
    let network = classify_card_network(data);

    if data.is_empty() || !data.bytes().all(|b| b.is_ascii_digit()) {
        assert_eq!(network, CardNetwork::Unknown);
        return;
    }

    let digits: Vec<u8> = data.bytes().map(|b| b - b'0').collect();
    assert_eq!(network, detect::detect_network(&digits));
});
