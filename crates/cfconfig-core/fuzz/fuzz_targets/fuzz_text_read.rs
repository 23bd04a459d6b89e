//! Fuzz test for text document parsing
//!
//! Tests that the INI reader handles arbitrary input safely.

#![no_main]

use cfconfig_core::TextCodec;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let codec = TextCodec::new();

    match codec.read(data) {
        Ok(record) => {
            // Whatever parsed must survive a write/read cycle
            let again = codec
                .read(&codec.write(&record))
                .expect("rewritten document should parse");
            assert_eq!(again.radio_channel, record.radio_channel);
            assert_eq!(again.radio_speed, record.radio_speed);
        }
        Err(e) => assert!(e.is_malformed_text()),
    }
});
