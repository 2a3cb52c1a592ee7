//! Geometric transforms: crop, mirror, rotate.
//!
//! Mirrors swap pixels in place; crop and rotate change dimensions and
//! therefore always produce a freshly allocated image.

mod crop;
mod mirror;
mod rotate;

pub use crop::{CropSpec, crop};
pub use mirror::{MirrorAxis, mirror};
pub use rotate::{Rotation, rotate};
