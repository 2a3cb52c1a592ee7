/// A single 24-bit pixel in the file's (Blue, Green, Red) channel order.
///
/// Field order matches the on-disk byte order of a BMP pixel triple.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pixel {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Pixel {
    pub const fn new(b: u8, g: u8, r: u8) -> Pixel {
        Pixel { b, g, r }
    }

    /// Rec. 601 luma (`0.299R + 0.587G + 0.114B`), truncated to 8 bits.
    pub fn luminance(self) -> u8 {
        (0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)) as u8
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGB8> for Pixel {
    fn from(p: rgb::RGB8) -> Pixel {
        Pixel::new(p.b, p.g, p.r)
    }
}

#[cfg(feature = "rgb")]
impl From<Pixel> for rgb::RGB8 {
    fn from(p: Pixel) -> rgb::RGB8 {
        rgb::RGB8 {
            r: p.r,
            g: p.g,
            b: p.b,
        }
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::alt::BGR8> for Pixel {
    fn from(p: rgb::alt::BGR8) -> Pixel {
        Pixel::new(p.b, p.g, p.r)
    }
}

#[cfg(feature = "rgb")]
impl From<Pixel> for rgb::alt::BGR8 {
    fn from(p: Pixel) -> rgb::alt::BGR8 {
        rgb::alt::BGR8 {
            b: p.b,
            g: p.g,
            r: p.r,
        }
    }
}
