//! Quarter-turn rotations and their pixel application.

use image::{RgbaImage, imageops};
use serde::{Deserialize, Deserializer};

use crate::error::ErrorKind;

/// Clockwise rotation in 90-degree steps.
///
/// ```text
///     0°        90°       180°      270°
///     ┌───┐     ┌────┐    ┌───┐     ┌────┐
///     │ F │     │  F │    │   │     │ Ꟊ  │
///     │   │     └────┘    │ Ꟊ │     └────┘
///     └───┘               └───┘
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    #[default]
    None,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Rotation {
    const ALL: [Self; 4] = [Self::None, Self::Rotate90, Self::Rotate180, Self::Rotate270];

    /// From clockwise degrees. Only exact quarter turns are accepted;
    /// negative and >= 360 values wrap.
    pub fn from_degrees(degrees: i64) -> Result<Self, ErrorKind> {
        if degrees % 90 != 0 {
            return Err(ErrorKind::InvalidRotation { degrees });
        }
        Ok(Self::ALL[(degrees / 90).rem_euclid(4) as usize])
    }

    pub fn degrees(self) -> u32 {
        self.quarter_turns() * 90
    }

    fn quarter_turns(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Rotate90 => 1,
            Self::Rotate180 => 2,
            Self::Rotate270 => 3,
        }
    }

    pub fn is_identity(self) -> bool {
        self == Self::None
    }

    /// Rotate `image` clockwise by this amount.
    pub fn apply(self, image: &RgbaImage) -> RgbaImage {
        match self {
            Self::None => image.clone(),
            Self::Rotate90 => imageops::rotate90(image),
            Self::Rotate180 => imageops::rotate180(image),
            Self::Rotate270 => imageops::rotate270(image),
        }
    }
}

impl<'de> Deserialize<'de> for Rotation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let degrees = i64::deserialize(deserializer)?;
        Self::from_degrees(degrees).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use proptest::prelude::*;

    fn numbered(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| Rgba([x as u8, y as u8, (x * 7 + y) as u8, 255]))
    }

    #[test]
    fn degrees_round_trip() {
        for d in [0, 90, 180, 270] {
            assert_eq!(Rotation::from_degrees(d).unwrap().degrees(), d as u32);
        }
        assert_eq!(Rotation::from_degrees(360).unwrap(), Rotation::None);
        assert_eq!(Rotation::from_degrees(-90).unwrap(), Rotation::Rotate270);
    }

    #[test]
    fn rejects_non_quarter_turns() {
        assert!(matches!(
            Rotation::from_degrees(45),
            Err(ErrorKind::InvalidRotation { degrees: 45 })
        ));
    }

    #[test]
    fn quarter_turns_swap_dimensions() {
        let src = numbered(4, 7);
        assert_eq!(Rotation::None.apply(&src).dimensions(), (4, 7));
        assert_eq!(Rotation::Rotate90.apply(&src).dimensions(), (7, 4));
        assert_eq!(Rotation::Rotate180.apply(&src).dimensions(), (4, 7));
        assert_eq!(Rotation::Rotate270.apply(&src).dimensions(), (7, 4));
    }

    #[test]
    fn rotate90_is_clockwise() {
        let src = numbered(3, 2);
        let out = Rotation::Rotate90.apply(&src);
        assert_eq!(out.dimensions(), (2, 3));
        // Top-left of the source ends up top-right.
        assert_eq!(out.get_pixel(1, 0), src.get_pixel(0, 0));
        // Bottom-left of the source ends up top-left.
        assert_eq!(out.get_pixel(0, 0), src.get_pixel(0, 1));
    }

    #[test]
    fn half_turns_and_wrapped_angles_agree() {
        let src = numbered(5, 3);
        let twice = Rotation::Rotate90.apply(&Rotation::Rotate90.apply(&src));
        assert_eq!(twice, Rotation::Rotate180.apply(&src));
        assert_eq!(
            Rotation::from_degrees(-90).unwrap().apply(&src),
            Rotation::Rotate270.apply(&src)
        );
        // 180° moves the top-left pixel to the bottom-right.
        assert_eq!(Rotation::Rotate180.apply(&src).get_pixel(4, 2), src.get_pixel(0, 0));
    }

    proptest! {
        #[test]
        fn prop_identity_and_full_turn(w in 1u32..12, h in 1u32..12) {
            let src = numbered(w, h);
            prop_assert_eq!(&Rotation::None.apply(&src), &src);

            let mut img = src.clone();
            for _ in 0..4 {
                img = Rotation::Rotate90.apply(&img);
            }
            prop_assert_eq!(&img, &src);
        }
    }
}
