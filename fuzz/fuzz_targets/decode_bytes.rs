#![no_main]

use libfuzzer_sys::fuzz_target;
use pai::codec::{decode_bytes, Options};
use pai::Context;

fuzz_target!(|data: &[u8]| {
    let options = Options {
        context: Context::default().with_max_pixels(1 << 20),
        ..Options::default()
    };
    let _ = decode_bytes(data, &options);
});
