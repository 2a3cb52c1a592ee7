#![no_main]
use libfuzzer_sys::fuzz_target;

use bmpforge::{Bmp, Operation, Rotation, apply};

fuzz_target!(|data: &[u8]| {
    // If it decodes, re-encoding and decoding again must produce
    // identical pixels.
    let Ok(bmp) = Bmp::decode(data, enough::Unstoppable) else {
        return;
    };

    let Ok(reencoded) = bmp.encode(enough::Unstoppable) else {
        return;
    };
    let Ok(decoded) = Bmp::decode(&reencoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };
    assert_eq!(bmp.image, decoded.image, "roundtrip pixel mismatch");

    // A full turn through the rotation group must restore the image.
    let mut rotated = decoded;
    let quarter = Rotation::from_degrees(90).expect("right angle");
    for _ in 0..4 {
        apply(
            &mut rotated,
            &[Operation::Rotate(quarter)],
            enough::Unstoppable,
        )
        .expect("rotation cannot fail");
    }
    assert_eq!(bmp.image, rotated.image, "rotation group mismatch");
});
