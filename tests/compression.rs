use pai::compression::{
    compress, decompress, Brotli, Compressor, Deflate, Method,
};
use pai::container::{is_framed, unwrap, wrap, HEADER_LEN};
use pai::{Context, PaiError};

const SAMPLE: &str = "ff0000:1@0000ff:1x3&ffffff:2&ff0000:1@0000ff:1&\
                      ffffff:2x40&000000:1@ffffff:1";

#[test]
fn test_quality_levels() {
    for method in Method::ALL {
        for quality in 1..=11 {
            let ctx = Context::new(quality);
            let compressed = compress(SAMPLE, &ctx, method).unwrap();
            assert_eq!(decompress(&compressed, method).unwrap(), SAMPLE);
        }
    }
}

#[test]
fn test_invalid_quality() {
    for quality in [0, 12, 255] {
        let ctx = Context::new(quality);
        assert!(matches!(
            compress(SAMPLE, &ctx, Method::Brotli),
            Err(PaiError::InvalidQuality(q)) if q == quality
        ));
    }
}

#[test]
fn test_compressor_trait() {
    fn round_trip(compressor: &dyn Compressor, input: &[u8]) {
        let mut compressed = vec![7, 7];
        let written = compressor.compress(input, 5, &mut compressed).unwrap();
        assert_eq!(written + 2, compressed.len());

        let mut decompressed = Vec::new();
        let read = compressor
            .decompress(&compressed[2..], &mut decompressed)
            .unwrap();
        assert_eq!(read, input.len());
        assert_eq!(decompressed, input);
    }

    for compressor in [&Brotli as &dyn Compressor, &Deflate] {
        round_trip(compressor, b"");
        round_trip(compressor, b"ffffff:1");
        round_trip(compressor, SAMPLE.as_bytes());
        round_trip(compressor, "ffffff:3@000000:1&".repeat(500).as_bytes());
    }
}

#[test]
fn test_truncated_payload() {
    let text = "0a0b0c:1@ffffff:3&".repeat(200);
    for method in Method::ALL {
        let compressed = compress(&text, &Context::default(), method).unwrap();
        let half = &compressed[..compressed.len() / 2];
        assert!(matches!(
            decompress(half, method),
            Err(PaiError::CorruptPayload(_))
        ));
        assert!(matches!(
            decompress(&[], method),
            Err(PaiError::CorruptPayload(_))
        ));
    }
}

#[test]
fn test_trailing_bytes() {
    for method in Method::ALL {
        let mut compressed =
            compress("ff0000:2", &Context::default(), method).unwrap();
        assert_eq!(decompress(&compressed, method).unwrap(), "ff0000:2");
        compressed.extend_from_slice(b"garbage");
        assert!(matches!(
            decompress(&compressed, method),
            Err(PaiError::CorruptPayload(_))
        ));

        // A second stream glued to the first is also rejected.
        let mut doubled =
            compress("ff0000:2", &Context::default(), method).unwrap();
        let copy = doubled.clone();
        doubled.extend_from_slice(&copy);
        assert!(matches!(
            decompress(&doubled, method),
            Err(PaiError::CorruptPayload(_))
        ));
    }
}

#[test]
fn test_non_text_payload() {
    let mut compressed = Vec::new();
    Brotli.compress(&[0xff, 0xfe, 0x80], 11, &mut compressed).unwrap();
    assert!(matches!(
        decompress(&compressed, Method::Brotli),
        Err(PaiError::CorruptPayload(_))
    ));
}

#[test]
fn test_method_names() {
    for method in Method::ALL {
        assert_eq!(Method::from_name(method.name()), Some(method));
        assert_eq!(Method::from_id(method.id()), Some(method));
    }
    assert_eq!(Method::from_name("lz4"), None);
    assert_eq!(Method::from_id(0), None);
    assert_eq!(Method::default(), Method::Brotli);
}

#[test]
fn test_container() {
    let payload = [1, 2, 3, 4];
    let mut framed = Vec::new();
    let written = wrap(Method::Deflate, &payload, &mut framed);
    assert_eq!(written, framed.len());
    assert_eq!(written, HEADER_LEN + payload.len());
    assert!(is_framed(&framed));

    let (method, body) = unwrap(&framed, Method::Brotli).unwrap();
    assert_eq!(method, Method::Deflate);
    assert_eq!(body, payload);

    // Unframed input is passed through with the fallback method.
    let (method, body) = unwrap(&payload, Method::Brotli).unwrap();
    assert_eq!(method, Method::Brotli);
    assert_eq!(body, payload);
}

#[test]
fn test_corrupt_container() {
    let mut framed = Vec::new();
    let _ = wrap(Method::Brotli, &[9, 9], &mut framed);

    let mut bad_version = framed.clone();
    bad_version[HEADER_LEN - 2] = 99;
    assert!(matches!(
        unwrap(&bad_version, Method::Brotli),
        Err(PaiError::CorruptPayload(_))
    ));

    let mut bad_method = framed.clone();
    bad_method[HEADER_LEN - 1] = 0;
    assert!(matches!(
        unwrap(&bad_method, Method::Brotli),
        Err(PaiError::CorruptPayload(_))
    ));

    assert!(matches!(
        unwrap(&framed[..HEADER_LEN - 1], Method::Brotli),
        Err(PaiError::CorruptPayload(_))
    ));
}
