//! BITMAPFILEHEADER + BITMAPINFOHEADER codec.

use alloc::format;
use alloc::vec::Vec;
use core::fmt;

use crate::decode::Cursor;
use crate::error::BmpError;

/// Size of the BITMAPFILEHEADER block.
pub const FILE_HEADER_SIZE: u32 = 14;
/// Size of the BITMAPINFOHEADER block, the only DIB header supported.
pub const INFO_HEADER_SIZE: u32 = 40;
/// Pixel data offset in every file this crate reads or writes.
pub const PIXEL_DATA_OFFSET: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

/// Parsed BMP header pair.
///
/// A header this crate considers valid always describes an uncompressed,
/// bottom-up, 24-bit file with a 40-byte DIB header. The size fields are
/// recomputed when the header is written; a declared `image_size` larger
/// than the padded row total is preserved and becomes trailing zero fill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    /// Total file size declared by the file header.
    pub file_size: u32,
    /// Image width in pixels.
    pub width: i32,
    /// Image height in pixels (positive; rows are stored bottom-up on disk).
    pub height: i32,
    /// Bits per pixel. Always 24 for a valid header.
    pub bits_per_pixel: u16,
    /// Pixel data byte count, including row padding.
    pub image_size: u32,
}

impl Header {
    /// Parse a header from the start of `data` without touching pixel
    /// data.
    pub fn from_bytes(data: &[u8]) -> Result<Header, BmpError> {
        parse(&mut Cursor::new(data))
    }

    /// A header for a `width`×`height` image with no declared extra
    /// padding. Size fields are filled in at encode time.
    pub(crate) fn for_dimensions(width: u32, height: u32) -> Header {
        Header {
            file_size: 0,
            width: width as i32,
            height: height as i32,
            bits_per_pixel: 24,
            image_size: 0,
        }
    }

    /// On-disk row byte count, padded to a 4-byte multiple.
    pub fn row_stride(&self) -> usize {
        (self.bits_per_pixel as usize * self.width.unsigned_abs() as usize).div_ceil(32) * 4
    }

    pub(crate) fn sync_dimensions(&mut self, width: u32, height: u32) {
        self.width = width as i32;
        self.height = height as i32;
    }

    /// Serialize as the canonical 54-byte block.
    ///
    /// `image_size` and `file_size` must already hold the values to
    /// declare; the encoder computes them with checked arithmetic.
    pub(crate) fn write_into(&self, out: &mut Vec<u8>) {
        // File header (14 bytes)
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&self.file_size.to_le_bytes());
        out.extend_from_slice(&[0u8; 4]); // reserved
        out.extend_from_slice(&PIXEL_DATA_OFFSET.to_le_bytes());

        // DIB header (BITMAPINFOHEADER, 40 bytes)
        out.extend_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes()); // positive = bottom-up
        out.extend_from_slice(&1u16.to_le_bytes()); // planes
        out.extend_from_slice(&24u16.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes()); // compression
        out.extend_from_slice(&self.image_size.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes()); // h pixels per meter
        out.extend_from_slice(&0u32.to_le_bytes()); // v pixels per meter
        out.extend_from_slice(&0u32.to_le_bytes()); // colors used
        out.extend_from_slice(&0u32.to_le_bytes()); // important colors
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BMP Header:")?;
        writeln!(f, "- FileType: BM")?;
        writeln!(f, "- FileSize: {} bytes", self.file_size)?;
        writeln!(f, "- HeaderSize: {} bytes", PIXEL_DATA_OFFSET)?;
        writeln!(f, "DIB Header:")?;
        writeln!(f, "- DibHeaderSize: {INFO_HEADER_SIZE} bytes")?;
        writeln!(f, "- Width: {} pixels", self.width)?;
        writeln!(f, "- Height: {} pixels", self.height)?;
        writeln!(f, "- PixelSize: {} bits", self.bits_per_pixel)?;
        write!(f, "- ImageSize: {} bytes", self.image_size)
    }
}

/// Parse and validate the 54-byte header pair.
pub(crate) fn parse(bytes: &mut Cursor<'_>) -> Result<Header, BmpError> {
    let signature = bytes.read_fixed::<2>()?;
    if &signature != b"BM" {
        return Err(BmpError::UnrecognizedFormat);
    }

    let file_size = bytes.get_u32_le()?;
    bytes.skip(4)?; // reserved
    // The declared pixel data offset is consumed to stay positioned; the
    // pixel codec seeks to the fixed 54-byte offset itself.
    let _pixel_data_offset = bytes.get_u32_le()?;

    let dib_size = bytes.get_u32_le()?;
    if dib_size != INFO_HEADER_SIZE {
        return Err(BmpError::UnsupportedVariant(format!(
            "DIB header size {dib_size}, only BITMAPINFOHEADER (40) is supported"
        )));
    }

    let width = bytes.get_i32_le()?;
    let height = bytes.get_i32_le()?;
    bytes.skip(2)?; // planes, assumed 1
    let bits_per_pixel = bytes.get_u16_le()?;
    if bits_per_pixel != 24 {
        return Err(BmpError::UnsupportedVariant(format!(
            "bit depth {bits_per_pixel}, only 24-bit BMP is supported"
        )));
    }

    let compression = bytes.get_u32_le()?;
    if compression != 0 {
        return Err(BmpError::UnsupportedVariant(format!(
            "compressed BMP not supported (compression {compression})"
        )));
    }

    let image_size = bytes.get_u32_le()?;
    // Pixels-per-meter ×2, colors used, important colors: ignored.
    bytes.skip(16)?;

    if width <= 0 {
        return Err(BmpError::InvalidHeader(format!(
            "width {width} is not positive"
        )));
    }
    if height <= 0 {
        return Err(BmpError::InvalidHeader(format!(
            "height {height} is not positive"
        )));
    }

    Ok(Header {
        file_size,
        width,
        height,
        bits_per_pixel,
        image_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_stride_rounds_to_four_bytes() {
        let mut header = Header::for_dimensions(1, 1);
        for (width, stride) in [(1, 4), (2, 8), (3, 12), (4, 12), (5, 16), (6, 20)] {
            header.width = width;
            assert_eq!(header.row_stride(), stride, "width {width}");
        }
    }
}
