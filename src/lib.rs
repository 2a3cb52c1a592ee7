//! # bmpforge
//!
//! 24-bit uncompressed BMP codec with an in-memory transform pipeline:
//! decode a file into a top-down pixel grid, apply a sequence of geometric
//! transforms (crop, mirror, rotate) and pixel filters (channel isolation,
//! grayscale, negative, pixelate, box blur), then re-encode.
//!
//! ## Format
//!
//! Exactly the classic 54-byte BITMAPFILEHEADER + BITMAPINFOHEADER layout,
//! little-endian, followed by bottom-up, row-padded 24-bit BGR pixel data.
//! Files this crate writes are bit-compatible with that layout; anything
//! else (compression, palettes, other bit depths, alpha) is rejected with
//! a typed error.
//!
//! ## Pipeline semantics
//!
//! Operations run in a fixed canonical order regardless of how they are
//! interleaved in the request: crops, then mirrors, then rotates (each
//! group in the order given), then the header picks up the resized
//! dimensions, then filters. Every operation is validated before any
//! pixel work begins, and output bytes exist only if the whole pipeline
//! succeeded; a failure at any stage produces no partial file.
//!
//! ## Non-Goals
//!
//! - Compressed BMP variants (RLE, bitfields)
//! - Palette/indexed color depths, 32-bit, alpha channels
//! - Any file format other than 24-bit uncompressed BMP
//!
//! ## Usage
//!
//! ```
//! use bmpforge::{apply, Bmp, Filter, Image, Operation, Rotation, Unstoppable};
//!
//! let mut bmp = Bmp::new(Image::new(4, 3));
//! let ops = [
//!     Operation::Rotate(Rotation::from_degrees(90)?),
//!     Operation::Filter(Filter::Negative),
//! ];
//! apply(&mut bmp, &ops, Unstoppable)?;
//! assert_eq!(bmp.image.width(), 3);
//!
//! let bytes = bmp.encode(Unstoppable)?;
//! let decoded = Bmp::decode(&bytes, Unstoppable)?;
//! assert_eq!(decoded.image, bmp.image);
//! # Ok::<(), bmpforge::BmpError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod apply;
mod decode;
mod encode;
mod error;
mod filter;
mod header;
mod image;
mod limits;
mod pixel;
mod transform;

// Re-exports
pub use apply::{Operation, apply, transform, validate_ops};
pub use decode::{DecodeRequest, decode};
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::BmpError;
pub use filter::Filter;
pub use header::Header;
pub use image::{Bmp, Image};
pub use limits::Limits;
pub use pixel::Pixel;
pub use transform::{CropSpec, MirrorAxis, Rotation, crop, mirror, rotate};
