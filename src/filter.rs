//! Pointwise and convolution pixel filters.
//!
//! Every filter keeps the image dimensions and mutates in place. Blur
//! reads from a snapshot of the pre-blur buffer so already-blurred
//! neighbors never feed back into the average.

use alloc::vec::Vec;

use enough::Stop;

use crate::error::BmpError;
use crate::image::Image;
use crate::pixel::Pixel;

/// Block/kernel strength carried by the parsed `pixelate` and `blur`
/// tokens.
const DEFAULT_STRENGTH: i32 = 20;

/// A pixel filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Filter {
    /// Zero the green and red channels.
    KeepBlue,
    /// Zero the blue and green channels.
    KeepRed,
    /// Zero the blue and red channels.
    KeepGreen,
    /// Rec. 601 luma on every pixel, truncated.
    Grayscale,
    /// Per-channel complement (255 − value).
    Negative,
    /// Flatten `block`×`block` tiles to their average color.
    Pixelate { block: i32 },
    /// Box blur over an odd `kernel`×`kernel` window, shrunk at edges.
    Blur { kernel: i32 },
}

impl Filter {
    /// Parse a filter name from the fixed vocabulary: `keep-blue`,
    /// `keep-red`, `keep-green` (or the bare channel names),
    /// `grayscale`, `negative`, `pixelate`, `blur`. Case-insensitive.
    ///
    /// `pixelate` and `blur` carry a strength of 20.
    pub fn parse(token: &str) -> Result<Filter, BmpError> {
        Ok(match token.to_ascii_lowercase().as_str() {
            "keep-blue" | "blue" => Filter::KeepBlue,
            "keep-red" | "red" => Filter::KeepRed,
            "keep-green" | "green" => Filter::KeepGreen,
            "grayscale" => Filter::Grayscale,
            "negative" => Filter::Negative,
            "pixelate" => Filter::Pixelate {
                block: DEFAULT_STRENGTH,
            },
            "blur" => Filter::Blur {
                kernel: DEFAULT_STRENGTH,
            },
            _ => {
                return Err(BmpError::UnknownToken {
                    kind: "filter",
                    token: token.into(),
                });
            }
        })
    }

    /// Reject argument values that are invalid for any image.
    pub(crate) fn validate(&self) -> Result<(), BmpError> {
        match *self {
            Filter::Pixelate { block } if block < 0 => Err(BmpError::InvalidArgument {
                param: "block size",
                value: i64::from(block),
            }),
            Filter::Blur { kernel } if kernel < 0 => Err(BmpError::InvalidArgument {
                param: "kernel size",
                value: i64::from(kernel),
            }),
            _ => Ok(()),
        }
    }

    /// Apply in place.
    pub fn apply(&self, image: &mut Image, stop: &dyn Stop) -> Result<(), BmpError> {
        match *self {
            Filter::KeepBlue => {
                for px in image.pixels_mut() {
                    px.g = 0;
                    px.r = 0;
                }
                Ok(())
            }
            Filter::KeepRed => {
                for px in image.pixels_mut() {
                    px.b = 0;
                    px.g = 0;
                }
                Ok(())
            }
            Filter::KeepGreen => {
                for px in image.pixels_mut() {
                    px.b = 0;
                    px.r = 0;
                }
                Ok(())
            }
            Filter::Grayscale => {
                for px in image.pixels_mut() {
                    let luma = px.luminance();
                    *px = Pixel::new(luma, luma, luma);
                }
                Ok(())
            }
            Filter::Negative => {
                for px in image.pixels_mut() {
                    px.b = 255 - px.b;
                    px.g = 255 - px.g;
                    px.r = 255 - px.r;
                }
                Ok(())
            }
            Filter::Pixelate { block } => pixelate(image, block, stop),
            Filter::Blur { kernel } => blur(image, kernel, stop),
        }
    }
}

// ── Pixelate ────────────────────────────────────────────────────────

/// Flatten non-overlapping tiles anchored at (0,0) to their per-channel
/// mean (integer truncation). Edge tiles are clipped to the image bounds
/// but never empty. A block size of 0 is a no-op.
fn pixelate(image: &mut Image, block: i32, stop: &dyn Stop) -> Result<(), BmpError> {
    if block < 0 {
        return Err(BmpError::InvalidArgument {
            param: "block size",
            value: i64::from(block),
        });
    }
    if block == 0 {
        return Ok(());
    }
    let block = block as usize;
    let width = image.width() as usize;
    let height = image.height() as usize;

    let mut tile_y = 0;
    while tile_y < height {
        stop.check()?;
        let tile_h = block.min(height - tile_y);
        let mut tile_x = 0;
        while tile_x < width {
            let tile_w = block.min(width - tile_x);

            let mut sum = [0u64; 3];
            for y in tile_y..tile_y + tile_h {
                for px in &image.pixels()[y * width + tile_x..y * width + tile_x + tile_w] {
                    sum[0] += u64::from(px.b);
                    sum[1] += u64::from(px.g);
                    sum[2] += u64::from(px.r);
                }
            }
            let count = (tile_w * tile_h) as u64;
            let avg = Pixel::new(
                (sum[0] / count) as u8,
                (sum[1] / count) as u8,
                (sum[2] / count) as u8,
            );
            for y in tile_y..tile_y + tile_h {
                image.pixels_mut()[y * width + tile_x..][..tile_w].fill(avg);
            }
            tile_x += block;
        }
        tile_y += block;
    }
    Ok(())
}

// ── Box blur ────────────────────────────────────────────────────────

/// Box blur with a shrinking window: near edges the average covers only
/// the in-bounds neighbors, with no clamping, wrapping, or zero padding.
/// Even kernel sizes are bumped to the next odd size so the window
/// centers on the pixel.
fn blur(image: &mut Image, kernel: i32, stop: &dyn Stop) -> Result<(), BmpError> {
    if kernel < 0 {
        return Err(BmpError::InvalidArgument {
            param: "kernel size",
            value: i64::from(kernel),
        });
    }
    let kernel = if kernel % 2 == 0 { kernel + 1 } else { kernel };
    let half = (kernel / 2) as usize;
    if half == 0 {
        // A 1×1 window averages only the pixel itself.
        return Ok(());
    }

    let width = image.width() as usize;
    let height = image.height() as usize;
    if width == 0 || height == 0 {
        return Ok(());
    }

    let source: Vec<Pixel> = image.pixels().to_vec();
    let dst = image.pixels_mut();

    for y in 0..height {
        if y % 16 == 0 {
            stop.check()?;
        }
        let y0 = y.saturating_sub(half);
        let y1 = (y + half).min(height - 1);
        for x in 0..width {
            let x0 = x.saturating_sub(half);
            let x1 = (x + half).min(width - 1);

            let mut sum = [0u64; 3];
            for ny in y0..=y1 {
                for px in &source[ny * width + x0..ny * width + x1 + 1] {
                    sum[0] += u64::from(px.b);
                    sum[1] += u64::from(px.g);
                    sum[2] += u64::from(px.r);
                }
            }
            let count = ((y1 - y0 + 1) * (x1 - x0 + 1)) as u64;
            dst[y * width + x] = Pixel::new(
                round_div(sum[0], count),
                round_div(sum[1], count),
                round_div(sum[2], count),
            );
        }
    }
    Ok(())
}

/// Nearest-integer division; halves round up.
fn round_div(sum: u64, count: u64) -> u8 {
    ((2 * sum + count) / (2 * count)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_div_rounds_halves_up() {
        assert_eq!(round_div(25, 2), 13); // 12.5
        assert_eq!(round_div(24, 2), 12);
        assert_eq!(round_div(220, 4), 55);
        assert_eq!(round_div(0, 9), 0);
        assert_eq!(round_div(255 * 9, 9), 255);
    }
}
