use pai::color::{decode_color, encode_color};
use pai::{PaiError, Pixel};

#[test]
fn test_encode_color() {
    assert_eq!(encode_color(Pixel::new(255, 255, 255)), "ffffff");
    assert_eq!(encode_color(Pixel::new(0, 0, 0)), "000000");
    assert_eq!(encode_color(Pixel::new(1, 2, 3)), "010203");
    assert_eq!(encode_color(Pixel::new(171, 205, 239)), "abcdef");
}

#[test]
fn test_decode_color() {
    assert_eq!(decode_color("ff0000").unwrap(), Pixel::new(255, 0, 0));
    assert_eq!(decode_color("#00ff00").unwrap(), Pixel::new(0, 255, 0));
    assert_eq!(decode_color("ABCDEF").unwrap(), Pixel::new(171, 205, 239));
    assert_eq!(decode_color("0a0B0c").unwrap(), Pixel::new(10, 11, 12));
}

#[test]
fn test_decode_malformed_color() {
    for text in [
        "", "#", "fff", "fffffff", "gggggg", "##ffffff", "ff ff0", "+fffff",
        "ffffé", "ff00ff#",
    ] {
        match decode_color(text) {
            Err(PaiError::MalformedColor(s)) => assert_eq!(s, text),
            other => panic!("{:?} decoded to {:?}", text, other),
        }
    }
}

#[test]
fn test_every_channel_value() {
    for v in 0..=255u8 {
        let color = Pixel::new(v, 255 - v, v / 2);
        let text = encode_color(color);
        assert_eq!(text.len(), 6);
        assert_eq!(decode_color(&text).unwrap(), color);
    }
}
