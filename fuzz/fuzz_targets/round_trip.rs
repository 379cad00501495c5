#![no_main]

use libfuzzer_sys::fuzz_target;
use pai::codec::{decode_bytes, encode_grid, Options};
use pai::{Pixel, PixelGrid};

fuzz_target!(|data: &[u8]| {
    // The first byte picks the width, the rest are RGB triples.
    let Some((&w, rest)) = data.split_first() else {
        return;
    };
    let pixels: Vec<Pixel> = rest
        .chunks_exact(3)
        .map(|c| Pixel::new(c[0] & 0x3, c[1] & 0x3, c[2] & 0x3))
        .collect();
    let width = w as usize % 16 + 1;
    let height = pixels.len() / width;
    if height == 0 {
        return;
    }
    let pixels = pixels[..width * height].to_vec();
    let grid = PixelGrid::from_pixels(width, height, pixels).unwrap();

    let options = Options::default();
    let encoded = encode_grid(&grid, &options).unwrap();
    assert_eq!(decode_bytes(&encoded, &options).unwrap(), grid);
});
