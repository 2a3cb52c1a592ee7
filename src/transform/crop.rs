//! Rectangular crop into a fresh image.

use alloc::vec::Vec;

use crate::error::BmpError;
use crate::image::Image;
use crate::pixel::Pixel;

/// A crop rectangle request.
///
/// `width`/`height` of `None` crop to the image's right/bottom edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropSpec {
    pub offset_x: u32,
    pub offset_y: u32,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl CropSpec {
    /// Crop from (offset_x, offset_y) to the image edge.
    pub fn new(offset_x: u32, offset_y: u32) -> CropSpec {
        CropSpec {
            offset_x,
            offset_y,
            width: None,
            height: None,
        }
    }

    /// Crop an explicit `width`×`height` rectangle.
    pub fn with_size(offset_x: u32, offset_y: u32, width: u32, height: u32) -> CropSpec {
        CropSpec {
            offset_x,
            offset_y,
            width: Some(width),
            height: Some(height),
        }
    }

    /// Parse `OffsetX-OffsetY` or `OffsetX-OffsetY-Width-Height`.
    pub fn parse(token: &str) -> Result<CropSpec, BmpError> {
        let unknown = || BmpError::UnknownToken {
            kind: "crop spec",
            token: token.into(),
        };
        let fields: Vec<u32> = token
            .split('-')
            .map(|field| field.parse::<u32>().map_err(|_| unknown()))
            .collect::<Result<_, _>>()?;
        match fields[..] {
            [offset_x, offset_y] => Ok(CropSpec::new(offset_x, offset_y)),
            [offset_x, offset_y, width, height] => {
                Ok(CropSpec::with_size(offset_x, offset_y, width, height))
            }
            _ => Err(unknown()),
        }
    }

    /// Reject argument values that are invalid for any image: explicit
    /// zero extents.
    pub(crate) fn validate(&self) -> Result<(), BmpError> {
        if self.width == Some(0) {
            return Err(BmpError::InvalidArgument {
                param: "crop width",
                value: 0,
            });
        }
        if self.height == Some(0) {
            return Err(BmpError::InvalidArgument {
                param: "crop height",
                value: 0,
            });
        }
        Ok(())
    }
}

/// Copy the crop rectangle into a fresh image.
///
/// Bounds are checked before any allocation: the offset must lie inside
/// the image and the rectangle (explicit or defaulted to the edge) must
/// not extend past it. The error names the parameter that violated
/// which bound.
pub fn crop(image: &Image, spec: &CropSpec) -> Result<Image, BmpError> {
    spec.validate()?;
    let img_w = image.width();
    let img_h = image.height();

    if spec.offset_x >= img_w {
        return Err(BmpError::OutOfBounds {
            param: "crop offset x",
            value: i64::from(spec.offset_x),
            bound: img_w,
        });
    }
    if spec.offset_y >= img_h {
        return Err(BmpError::OutOfBounds {
            param: "crop offset y",
            value: i64::from(spec.offset_y),
            bound: img_h,
        });
    }

    let crop_w = spec.width.unwrap_or(img_w - spec.offset_x);
    let crop_h = spec.height.unwrap_or(img_h - spec.offset_y);
    let right = u64::from(spec.offset_x) + u64::from(crop_w);
    if right > u64::from(img_w) {
        return Err(BmpError::OutOfBounds {
            param: "crop offset x + width",
            value: right as i64,
            bound: img_w,
        });
    }
    let bottom = u64::from(spec.offset_y) + u64::from(crop_h);
    if bottom > u64::from(img_h) {
        return Err(BmpError::OutOfBounds {
            param: "crop offset y + height",
            value: bottom as i64,
            bound: img_h,
        });
    }

    let src_w = img_w as usize;
    let mut pixels: Vec<Pixel> = Vec::with_capacity(crop_w as usize * crop_h as usize);
    for y in 0..crop_h as usize {
        let start = (y + spec.offset_y as usize) * src_w + spec.offset_x as usize;
        pixels.extend_from_slice(&image.pixels()[start..start + crop_w as usize]);
    }

    Ok(Image::from_vec(crop_w, crop_h, pixels))
}
