#![no_main]

use ebrechnung::CodecConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Errors are fine, panics are bugs. Internal errors mean a validator gap.
    if let Err(e) = ebrechnung::transform_json(data, &CodecConfig::default()) {
        assert!(e.is_client_error(), "internal error on fuzzed input: {e}");
    }
});
