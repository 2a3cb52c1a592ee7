//! Codec roundtrips and format validation against the on-disk layout.

use bmpforge::*;

fn gradient(width: u32, height: u32) -> Image {
    let mut image = Image::new(width, height);
    for y in 0..height {
        for x in 0..width {
            image.set(
                x,
                y,
                Pixel::new(
                    (x * 40 % 256) as u8,
                    (y * 60 % 256) as u8,
                    ((x + y) * 25 % 256) as u8,
                ),
            );
        }
    }
    image
}

fn noise(width: u32, height: u32) -> Image {
    let mut state: u32 = 0xDEAD_BEEF;
    let mut image = Image::new(width, height);
    for px in image.pixels_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *px = Pixel::new(state as u8, (state >> 8) as u8, (state >> 16) as u8);
    }
    image
}

#[test]
fn roundtrip_preserves_pixels() {
    let image = gradient(5, 3);
    let bmp = Bmp::new(image.clone());

    let encoded = bmp.encode(Unstoppable).unwrap();
    assert_eq!(&encoded[0..2], b"BM");
    // width 5 → 15 pixel bytes per row, padded to 16
    assert_eq!(encoded.len(), 54 + 16 * 3);

    let decoded = Bmp::decode(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.image, image);
    assert_eq!(decoded.header.width, 5);
    assert_eq!(decoded.header.height, 3);
    assert_eq!(decoded.header.bits_per_pixel, 24);
    assert_eq!(decoded.header.image_size, 48);
    assert_eq!(decoded.header.file_size, 54 + 48);
}

#[test]
fn encoded_layout_is_canonical() {
    let encoded = Bmp::new(gradient(3, 2)).encode(Unstoppable).unwrap();

    let u16_at = |off: usize| u16::from_le_bytes([encoded[off], encoded[off + 1]]);
    let u32_at = |off: usize| {
        u32::from_le_bytes([
            encoded[off],
            encoded[off + 1],
            encoded[off + 2],
            encoded[off + 3],
        ])
    };

    assert_eq!(&encoded[0..2], b"BM");
    assert_eq!(u32_at(2), encoded.len() as u32); // file size
    assert_eq!(u32_at(6), 0); // reserved
    assert_eq!(u32_at(10), 54); // pixel data offset
    assert_eq!(u32_at(14), 40); // DIB header size
    assert_eq!(u32_at(18), 3); // width
    assert_eq!(u32_at(22), 2); // height
    assert_eq!(u16_at(26), 1); // planes
    assert_eq!(u16_at(28), 24); // bits per pixel
    assert_eq!(u32_at(30), 0); // compression
    assert_eq!(u32_at(34), 24); // image size: 12-byte rows × 2
    assert_eq!(u32_at(38), 0); // h pixels per meter
    assert_eq!(u32_at(42), 0); // v pixels per meter
    assert_eq!(u32_at(46), 0); // colors used
    assert_eq!(u32_at(50), 0); // important colors
}

#[test]
fn roundtrip_all_padding_widths() {
    for width in 1..=8 {
        let image = noise(width, 3);
        let encoded = Bmp::new(image.clone()).encode(Unstoppable).unwrap();
        let decoded = Bmp::decode(&encoded, Unstoppable).unwrap();
        assert_eq!(decoded.image, image, "width {width}");
    }
}

#[test]
fn bottom_row_is_stored_first() {
    let mut image = Image::new(1, 2);
    image.set(0, 0, Pixel::new(1, 2, 3)); // top row in memory
    image.set(0, 1, Pixel::new(4, 5, 6)); // bottom row in memory

    let encoded = Bmp::new(image).encode(Unstoppable).unwrap();
    // Bottom row first on disk.
    assert_eq!(&encoded[54..57], &[4, 5, 6]);
    assert_eq!(&encoded[58..61], &[1, 2, 3]);
}

#[test]
fn bad_signature_rejected() {
    let mut encoded = Bmp::new(gradient(3, 2)).encode(Unstoppable).unwrap();
    encoded[0] = b'X';
    encoded[1] = b'X';
    match Bmp::decode(&encoded, Unstoppable) {
        Err(BmpError::UnrecognizedFormat) => {}
        other => panic!("expected UnrecognizedFormat, got {other:?}"),
    }
}

#[test]
fn unsupported_dib_size_rejected() {
    let mut encoded = Bmp::new(gradient(3, 2)).encode(Unstoppable).unwrap();
    encoded[14..18].copy_from_slice(&124u32.to_le_bytes());
    match Bmp::decode(&encoded, Unstoppable) {
        Err(BmpError::UnsupportedVariant(msg)) => assert!(msg.contains("DIB"), "{msg}"),
        other => panic!("expected UnsupportedVariant, got {other:?}"),
    }
}

#[test]
fn unsupported_bit_depth_rejected() {
    let mut encoded = Bmp::new(gradient(3, 2)).encode(Unstoppable).unwrap();
    encoded[28..30].copy_from_slice(&32u16.to_le_bytes());
    match Bmp::decode(&encoded, Unstoppable) {
        Err(BmpError::UnsupportedVariant(msg)) => assert!(msg.contains("bit depth"), "{msg}"),
        other => panic!("expected UnsupportedVariant, got {other:?}"),
    }
}

#[test]
fn compressed_input_rejected() {
    let mut encoded = Bmp::new(gradient(3, 2)).encode(Unstoppable).unwrap();
    encoded[30..34].copy_from_slice(&1u32.to_le_bytes()); // BI_RLE8
    match Bmp::decode(&encoded, Unstoppable) {
        Err(BmpError::UnsupportedVariant(msg)) => assert!(msg.contains("compressed"), "{msg}"),
        other => panic!("expected UnsupportedVariant, got {other:?}"),
    }
}

#[test]
fn truncated_pixel_rows_rejected() {
    let encoded = Bmp::new(gradient(4, 4)).encode(Unstoppable).unwrap();
    let truncated = &encoded[..encoded.len() - 10];
    match Bmp::decode(truncated, Unstoppable) {
        Err(BmpError::UnexpectedEof) => {}
        other => panic!("expected UnexpectedEof, got {other:?}"),
    }
}

#[test]
fn truncated_header_rejected() {
    let encoded = Bmp::new(gradient(4, 4)).encode(Unstoppable).unwrap();
    match Bmp::decode(&encoded[..30], Unstoppable) {
        Err(BmpError::UnexpectedEof) => {}
        other => panic!("expected UnexpectedEof, got {other:?}"),
    }
}

#[test]
fn nonpositive_dimensions_rejected() {
    let good = Bmp::new(gradient(3, 2)).encode(Unstoppable).unwrap();

    // Negative height (a top-down file) is out of scope.
    let mut encoded = good.clone();
    encoded[22..26].copy_from_slice(&(-2i32).to_le_bytes());
    match Bmp::decode(&encoded, Unstoppable) {
        Err(BmpError::InvalidHeader(msg)) => assert!(msg.contains("height"), "{msg}"),
        other => panic!("expected InvalidHeader, got {other:?}"),
    }

    let mut encoded = good;
    encoded[18..22].copy_from_slice(&0i32.to_le_bytes());
    match Bmp::decode(&encoded, Unstoppable) {
        Err(BmpError::InvalidHeader(msg)) => assert!(msg.contains("width"), "{msg}"),
        other => panic!("expected InvalidHeader, got {other:?}"),
    }
}

#[test]
fn declared_trailing_padding_roundtrip() {
    let image = gradient(3, 2);
    let mut encoded = Bmp::new(image.clone()).encode(Unstoppable).unwrap();

    // Inflate the declared image size by 8 bytes and append the fill.
    encoded[34..38].copy_from_slice(&(24u32 + 8).to_le_bytes());
    encoded.extend_from_slice(&[0u8; 8]);

    let decoded = Bmp::decode(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.header.image_size, 32);
    assert_eq!(decoded.image, image);

    // The declared size survives re-encoding as trailing zero fill.
    let reencoded = decoded.encode(Unstoppable).unwrap();
    assert_eq!(reencoded.len(), 54 + 32);
    assert_eq!(&reencoded[54 + 24..], &[0u8; 8]);
    let image_size_field = u32::from_le_bytes([
        reencoded[34],
        reencoded[35],
        reencoded[36],
        reencoded[37],
    ]);
    assert_eq!(image_size_field, 32);
}

#[test]
fn limits_reject_large() {
    let encoded = Bmp::new(gradient(5, 3)).encode(Unstoppable).unwrap();

    let limits = Limits {
        max_pixels: Some(4),
        ..Default::default()
    };
    match DecodeRequest::new(&encoded)
        .with_limits(&limits)
        .decode(Unstoppable)
    {
        Err(BmpError::LimitExceeded(_)) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }

    let limits = Limits {
        max_memory_bytes: Some(8),
        ..Default::default()
    };
    match DecodeRequest::new(&encoded)
        .with_limits(&limits)
        .decode(Unstoppable)
    {
        Err(BmpError::LimitExceeded(_)) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }

    let limits = Limits::default();
    assert!(
        DecodeRequest::new(&encoded)
            .with_limits(&limits)
            .decode(Unstoppable)
            .is_ok()
    );
}

#[test]
fn header_probe_reads_no_pixels() {
    let encoded = Bmp::new(gradient(7, 4)).encode(Unstoppable).unwrap();

    // The probe succeeds on the 54-byte header alone.
    let header = Header::from_bytes(&encoded[..54]).unwrap();
    assert_eq!(header.width, 7);
    assert_eq!(header.height, 4);
    assert_eq!(header.bits_per_pixel, 24);

    let rendered = header.to_string();
    assert!(rendered.contains("Width: 7 pixels"), "{rendered}");
    assert!(rendered.contains("DibHeaderSize: 40 bytes"), "{rendered}");
}
