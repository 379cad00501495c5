#![no_main]

use libfuzzer_sys::fuzz_target;
use pai::document::{deserialize, serialize};
use pai::Context;

fuzz_target!(|data: &[u8]| {
    let ctx = Context::default().with_max_pixels(1 << 20);
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(grid) = deserialize(text, &ctx) {
            // Anything that decodes must survive a round trip.
            let encoded = serialize(&grid, &ctx).unwrap();
            assert_eq!(deserialize(&encoded, &ctx).unwrap(), grid);
        }
    }
});
