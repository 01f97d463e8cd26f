//! Fuzz target for COCO JSON parsing.
//!
//! Feeds arbitrary bytes to the COCO reader, checking for panics or hangs.
//!
//! Run with:
//!   cargo +nightly fuzz run coco_json_parse

#![no_main]

use coco2kitti::ir::io_coco_json::from_coco_slice;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // 10MB is generous for a single split's annotation file.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_coco_slice(data);
});
