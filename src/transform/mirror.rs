//! Mirror flips, in place.

use crate::error::BmpError;
use crate::image::Image;

/// Mirror axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MirrorAxis {
    /// Swap columns: a left-right flip.
    Horizontal,
    /// Swap rows: a top-bottom flip.
    Vertical,
}

impl MirrorAxis {
    /// Parse a mirror token. Accepts `horizontal`, `horizontally`,
    /// `hor`, `h` and the matching `vertical` forms, case-insensitive.
    pub fn parse(token: &str) -> Result<MirrorAxis, BmpError> {
        match token.to_ascii_lowercase().as_str() {
            "horizontal" | "horizontally" | "hor" | "h" => Ok(MirrorAxis::Horizontal),
            "vertical" | "vertically" | "ver" | "v" => Ok(MirrorAxis::Vertical),
            _ => Err(BmpError::UnknownToken {
                kind: "mirror direction",
                token: token.into(),
            }),
        }
    }
}

/// Mirror in place. Dimensions are unchanged.
pub fn mirror(image: &mut Image, axis: MirrorAxis) {
    let width = image.width() as usize;
    let height = image.height() as usize;
    let pixels = image.pixels_mut();
    match axis {
        MirrorAxis::Horizontal => {
            for row in pixels.chunks_exact_mut(width.max(1)) {
                row.reverse();
            }
        }
        MirrorAxis::Vertical => {
            for y in 0..height / 2 {
                for x in 0..width {
                    pixels.swap(y * width + x, (height - 1 - y) * width + x);
                }
            }
        }
    }
}
