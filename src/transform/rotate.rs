//! Quarter-turn rotation by coordinate remapping.

use alloc::vec;

use crate::error::BmpError;
use crate::image::Image;
use crate::pixel::Pixel;

/// A rotation normalized to a whole number of clockwise quarter turns.
///
/// `"right"`/`"90"` is one clockwise turn; `"left"`/`"-90"` is the
/// counter-clockwise equivalent, i.e. three clockwise turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rotation {
    quarter_turns: u8,
}

impl Rotation {
    /// Normalize a degree count to `{0, 90, 180, 270}`.
    ///
    /// Any multiple of 90 is accepted, including negative values and
    /// values beyond ±360.
    pub fn from_degrees(degrees: i32) -> Result<Rotation, BmpError> {
        if degrees % 90 != 0 {
            return Err(BmpError::InvalidArgument {
                param: "rotation angle",
                value: i64::from(degrees),
            });
        }
        let normalized = ((degrees % 360) + 360) % 360;
        Ok(Rotation {
            quarter_turns: (normalized / 90) as u8,
        })
    }

    /// Parse a rotation token: `90`, `180`, `270`, `right`, `left`,
    /// `-90`, `-180`, `-270`. Case-insensitive.
    pub fn parse(token: &str) -> Result<Rotation, BmpError> {
        let degrees = match token.to_ascii_lowercase().as_str() {
            "right" | "90" => 90,
            "left" | "-90" => -90,
            "180" | "-180" => 180,
            "270" => 270,
            "-270" => -270,
            _ => {
                return Err(BmpError::UnknownToken {
                    kind: "rotation",
                    token: token.into(),
                });
            }
        };
        Rotation::from_degrees(degrees)
    }

    /// Normalized clockwise angle in `{0, 90, 180, 270}`.
    pub fn degrees(self) -> u32 {
        u32::from(self.quarter_turns) * 90
    }
}

/// Rotate clockwise, producing a fresh image.
///
/// For 90° and 270° the output dimensions are the input's swapped. The
/// output pixel at (newX, newY) is sourced per the quarter-turn mapping:
/// 90° takes (x, y) to (height-1-y, x), 180° to (width-1-x, height-1-y),
/// 270° to (y, width-1-x).
pub fn rotate(image: &Image, rotation: Rotation) -> Image {
    let width = image.width() as usize;
    let height = image.height() as usize;
    let turns = rotation.quarter_turns;

    if turns == 0 {
        return image.clone();
    }

    let (new_width, new_height) = match turns {
        1 | 3 => (height, width),
        _ => (width, height),
    };

    let src = image.pixels();
    let mut pixels = vec![Pixel::default(); src.len()];
    for y in 0..height {
        for x in 0..width {
            let (new_x, new_y) = match turns {
                1 => (height - 1 - y, x),
                2 => (width - 1 - x, height - 1 - y),
                _ => (y, width - 1 - x),
            };
            pixels[new_y * new_width + new_x] = src[y * width + x];
        }
    }

    Image::from_vec(new_width as u32, new_height as u32, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_normalization() {
        assert_eq!(Rotation::from_degrees(90).unwrap().degrees(), 90);
        assert_eq!(Rotation::from_degrees(-90).unwrap().degrees(), 270);
        assert_eq!(Rotation::from_degrees(-270).unwrap().degrees(), 90);
        assert_eq!(Rotation::from_degrees(360).unwrap().degrees(), 0);
        assert_eq!(Rotation::from_degrees(-720).unwrap().degrees(), 0);
        assert_eq!(Rotation::from_degrees(450).unwrap().degrees(), 90);
        assert!(Rotation::from_degrees(45).is_err());
    }
}
