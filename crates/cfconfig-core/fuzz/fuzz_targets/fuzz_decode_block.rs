//! Fuzz test for binary block decoding
//!
//! Tests that decoding handles arbitrary storage contents safely.

#![no_main]

use cfconfig_core::{BinaryCodec, ConfigBlockService, DEFAULT_TEXT};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let codec = BinaryCodec::new();

    // Anything that decodes must re-encode to the same 16 bytes
    if let Ok(record) = codec.decode(data) {
        assert_eq!(&codec.encode(&record)[..], &data[..16]);
    }

    // Inspection never fails
    let report = codec.inspect(data);
    assert_eq!(report.length, data.len());

    // Corrupt input always extracts to the default document
    match ConfigBlockService::new().extract_detailed(data) {
        Ok(extraction) if extraction.is_default() => {
            assert_eq!(extraction.text, DEFAULT_TEXT);
        }
        Ok(_) => assert!(report.is_valid()),
        Err(e) => assert!(!e.is_corrupt_block()),
    }
});
