//! BMP encoder: canonical 54-byte header, then bottom-up padded rows.

use alloc::vec::Vec;
use core::iter::repeat_n;

use enough::Stop;

use crate::error::BmpError;
use crate::header::{Header, PIXEL_DATA_OFFSET};
use crate::image::Bmp;

/// Encode a document to BMP bytes.
///
/// Dimensions come from the image (the pipeline keeps the header in
/// sync); the header contributes only its declared `image_size`, which
/// is preserved when it exceeds the padded row total and re-emitted as
/// trailing zero fill.
pub(crate) fn encode(bmp: &Bmp, stop: &dyn Stop) -> Result<Vec<u8>, BmpError> {
    let image = &bmp.image;
    let width = image.width();
    let height = image.height();
    let w = width as usize;
    let h = height as usize;

    let row_stride = w
        .checked_mul(3)
        .and_then(|r| r.checked_add(3))
        .map(|r| r & !3)
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;
    let pixel_data_size = row_stride
        .checked_mul(h)
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;
    let image_size = pixel_data_size.max(bmp.header.image_size as usize);
    let file_size = image_size
        .checked_add(PIXEL_DATA_OFFSET as usize)
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;
    if u32::try_from(file_size).is_err() {
        return Err(BmpError::DimensionsTooLarge { width, height });
    }

    stop.check()?;

    let mut out = Vec::with_capacity(file_size);
    let header = Header {
        file_size: file_size as u32,
        width: width as i32,
        height: height as i32,
        bits_per_pixel: 24,
        image_size: image_size as u32,
    };
    header.write_into(&mut out);

    // Restore bottom-up disk order: the memory-bottom row is written first.
    let pad = row_stride - w * 3;
    for (i, row) in image.rows().rev().enumerate() {
        if i % 16 == 0 {
            stop.check()?;
        }
        for px in row {
            out.push(px.b);
            out.push(px.g);
            out.push(px.r);
        }
        out.extend(repeat_n(0u8, pad));
    }

    // Declared size beyond the padded rows becomes trailing zero fill.
    out.extend(repeat_n(0u8, image_size - pixel_data_size));

    Ok(out)
}
