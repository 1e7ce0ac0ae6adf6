#![no_main]

use ebrechnung::core::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = RawInvoice::from_json_slice(data) else {
        return;
    };
    if let Ok(request) = validate(&raw) {
        let agg = aggregate(&request.lines).expect("validated lines aggregate");
        agg.check_conservation().expect("amounts are conserved");
    }
});
