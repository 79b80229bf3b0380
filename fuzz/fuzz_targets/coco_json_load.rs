//! Fuzz target for loading COCO JSON.
//!
//! Arbitrary bytes go through parsing, required-key validation and record
//! deserialization. Errors are expected; panics are not.
//!
//! Run with:
//!   cargo +nightly fuzz run coco_json_load

#![no_main]

use cocoedit::model::from_coco_slice;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // 10MB cap keeps libFuzzer away from OOM.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_coco_slice(data);
});
