//! BMP decoder: header validation, then the bottom-up pixel grid.

use alloc::vec;

use enough::Stop;

use crate::error::BmpError;
use crate::header::{self, Header, PIXEL_DATA_OFFSET};
use crate::image::{Bmp, Image};
use crate::limits::Limits;
use crate::pixel::Pixel;

// ── Cursor over the input byte source ───────────────────────────────

/// Seekable reader over the raw file bytes. The only operations the
/// decoder needs are exact reads and absolute seeks; a short read is an
/// [`BmpError::UnexpectedEof`].
pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn set_position(&mut self, pos: usize) -> Result<(), BmpError> {
        if pos > self.data.len() {
            return Err(BmpError::UnexpectedEof);
        }
        self.pos = pos;
        Ok(())
    }

    pub(crate) fn skip(&mut self, n: usize) -> Result<(), BmpError> {
        let new_pos = self.pos.checked_add(n).ok_or(BmpError::UnexpectedEof)?;
        self.set_position(new_pos)
    }

    pub(crate) fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N], BmpError> {
        let mut buf = [0u8; N];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    pub(crate) fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), BmpError> {
        let n = buf.len();
        if self.pos + n > self.data.len() {
            return Err(BmpError::UnexpectedEof);
        }
        buf.copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(())
    }

    pub(crate) fn get_u16_le(&mut self) -> Result<u16, BmpError> {
        Ok(u16::from_le_bytes(self.read_fixed::<2>()?))
    }

    pub(crate) fn get_u32_le(&mut self) -> Result<u32, BmpError> {
        Ok(u32::from_le_bytes(self.read_fixed::<4>()?))
    }

    pub(crate) fn get_i32_le(&mut self) -> Result<i32, BmpError> {
        Ok(i32::from_le_bytes(self.read_fixed::<4>()?))
    }
}

// ── Public decode API ───────────────────────────────────────────────

/// Builder for decoding a BMP byte buffer.
///
/// ```
/// use bmpforge::{DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // your BMP bytes
/// let limits = Limits {
///     max_pixels: Some(1 << 24),
///     ..Default::default()
/// };
/// let result = DecodeRequest::new(data).with_limits(&limits).decode(Unstoppable);
/// assert!(result.is_err()); // empty input
/// ```
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Enforce resource limits before the pixel buffer is allocated.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<Bmp, BmpError> {
        decode_impl(self.data, self.limits, &stop)
    }
}

/// Decode a BMP file with no resource limits.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<Bmp, BmpError> {
    decode_impl(data, None, &stop)
}

pub(crate) fn decode_impl(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Bmp, BmpError> {
    let mut bytes = Cursor::new(data);
    let header = header::parse(&mut bytes)?;

    // parse() guarantees positive dimensions.
    let width = header.width as u32;
    let height = header.height as u32;

    let pixel_count = (width as usize)
        .checked_mul(height as usize)
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;
    let out_bytes = pixel_count
        .checked_mul(core::mem::size_of::<Pixel>())
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;
    if let Some(limits) = limits {
        limits.check_dimensions(width, height)?;
        limits.check_allocation(out_bytes)?;
    }
    stop.check()?;

    let image = decode_pixels(&mut bytes, &header, stop)?;
    Ok(Bmp { header, image })
}

/// Read the padded, bottom-up rows into a top-down pixel grid.
fn decode_pixels(
    bytes: &mut Cursor<'_>,
    header: &Header,
    stop: &dyn Stop,
) -> Result<Image, BmpError> {
    let width = header.width as usize;
    let height = header.height as usize;
    let stride = header.row_stride();

    bytes.set_position(PIXEL_DATA_OFFSET as usize)?;

    let mut pixels = vec![Pixel::default(); width * height];
    let mut row = vec![0u8; stride];

    // Rows are stored bottom row first on disk; memory row 0 is the top
    // row. Trailing pad bytes in each row are read and ignored.
    for disk_row in 0..height {
        if disk_row % 16 == 0 {
            stop.check()?;
        }
        bytes.read_exact(&mut row)?;
        let y = height - 1 - disk_row;
        let dst = &mut pixels[y * width..(y + 1) * width];
        for (px, src) in dst.iter_mut().zip(row.chunks_exact(3)) {
            *px = Pixel::new(src[0], src[1], src[2]);
        }
    }

    Ok(Image::from_vec(width as u32, height as u32, pixels))
}
