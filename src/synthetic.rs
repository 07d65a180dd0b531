//! Placeholder inputs for trying a layout without real page scans.
//!
//! Every image carries its index as large digits and a marker square in its
//! top-left corner, so both placement and rotation can be checked by eye.

use image::{Rgba, RgbaImage};

use crate::error::ErrorKind;
use crate::geometry::{Rect, Size};
use crate::stroke::fill_rect;
use crate::units::Measurement;

/// Test image size used when none is given.
pub const DEFAULT_TEST_SIZE: Size = Size::new(600, 800);

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// 3×5 bitmap digits, one row per byte, high bit on the left.
const DIGITS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b010, 0b010, 0b010],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

/// Generate `count` distinguishable `width`×`height` images.
///
/// Colored images get a per-index background hue; black-and-white images are
/// white with black ink. Output depends only on the arguments.
pub fn generate(count: usize, width: u32, height: u32, black_and_white: bool) -> Vec<RgbaImage> {
    (0..count)
        .map(|index| generate_one(index, width, height, black_and_white))
        .collect()
}

fn generate_one(index: usize, width: u32, height: u32, black_and_white: bool) -> RgbaImage {
    let (background, ink) = if black_and_white {
        (WHITE, BLACK)
    } else {
        let bg = hue_color(index);
        (bg, contrasting(bg))
    };
    let mut img = RgbaImage::from_pixel(width, height, background);
    let shorter = width.min(height);

    // Frame and orientation marker.
    let frame = (shorter / 50).max(1);
    let full = Rect::new(0, 0, width, height);
    fill_rect(&mut img, Rect::new(0, 0, width, frame), ink);
    fill_rect(&mut img, Rect::new(0, height.saturating_sub(frame), width, frame), ink);
    fill_rect(&mut img, Rect::new(0, 0, frame, height), ink);
    fill_rect(&mut img, Rect::new(width.saturating_sub(frame), 0, frame, height), ink);
    let marker = (shorter / 8).max(1);
    fill_rect(&mut img, Rect::new(frame * 2, frame * 2, marker, marker), ink);

    draw_number(&mut img, full, index, ink);
    img
}

fn draw_number(img: &mut RgbaImage, area: Rect, number: usize, ink: Rgba<u8>) {
    let digits: Vec<usize> = number
        .to_string()
        .bytes()
        .map(|b| usize::from(b - b'0'))
        .collect();
    // Glyphs are 3 units wide with 1 unit between them, 5 units tall.
    let cols = 4 * digits.len() as u32 - 1;
    let unit = (area.width * 3 / 5 / cols).min(area.height * 2 / 5 / 5).max(1);
    let origin_x = area.x + area.width.saturating_sub(cols * unit) / 2;
    let origin_y = area.y + area.height.saturating_sub(5 * unit) / 2;

    for (i, &d) in digits.iter().enumerate() {
        let glyph_x = origin_x + i as u32 * 4 * unit;
        for (row, bits) in DIGITS[d].iter().enumerate() {
            for col in 0..3u32 {
                if bits & (0b100 >> col) != 0 {
                    let r = Rect::new(glyph_x + col * unit, origin_y + row as u32 * unit, unit, unit);
                    fill_rect(img, r, ink);
                }
            }
        }
    }
}

/// Evenly spread hues (golden angle), fixed saturation and value.
fn hue_color(index: usize) -> Rgba<u8> {
    let hue = (index as f64 * 137.507_764) % 360.0;
    let (s, v) = (0.45, 0.95);
    let c = v * s;
    let x = c * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match (hue / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let channel = |f: f64| ((f + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba([channel(r), channel(g), channel(b), 255])
}

fn contrasting(bg: Rgba<u8>) -> Rgba<u8> {
    let [r, g, b, _] = bg.0;
    let luma = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
    if luma > 128_000 { BLACK } else { WHITE }
}

/// Parse `WIDTH,HEIGHT` measurements into pixels at `ppi`.
///
/// Empty text gives [`DEFAULT_TEST_SIZE`].
pub fn parse_test_dimensions(text: &str, ppi: f64) -> Result<Size, ErrorKind> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(DEFAULT_TEST_SIZE);
    }
    let malformed = || ErrorKind::MalformedMeasurement {
        text: text.to_owned(),
    };
    let (w, h) = text.split_once(',').ok_or_else(malformed)?;
    let to_px = |part: &str| -> Result<u32, ErrorKind> {
        let px = Measurement::parse(part)?.to_pixels(ppi, None)?;
        u32::try_from(px).ok().filter(|&v| v > 0).ok_or_else(malformed)
    };
    Ok(Size::new(to_px(w)?, to_px(h)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_and_size() {
        let imgs = generate(3, 40, 60, false);
        assert_eq!(imgs.len(), 3);
        assert!(imgs.iter().all(|i| i.dimensions() == (40, 60)));
        assert!(generate(0, 10, 10, true).is_empty());
    }

    #[test]
    fn deterministic() {
        assert_eq!(generate(4, 50, 70, false), generate(4, 50, 70, false));
        assert_eq!(generate(4, 50, 70, true), generate(4, 50, 70, true));
    }

    #[test]
    fn every_image_is_distinct() {
        for bw in [false, true] {
            let imgs = generate(12, 64, 80, bw);
            for i in 0..imgs.len() {
                for j in i + 1..imgs.len() {
                    assert_ne!(imgs[i], imgs[j], "{i} == {j} (bw: {bw})");
                }
            }
        }
    }

    #[test]
    fn black_and_white_uses_two_colors() {
        for img in generate(3, 30, 30, true) {
            assert!(img.pixels().all(|p| *p == BLACK || *p == WHITE));
        }
    }

    #[test]
    fn marker_breaks_rotational_symmetry() {
        let img = &generate(1, 80, 80, true)[0];
        let rotated = image::imageops::rotate180(img);
        assert_ne!(img, &rotated);
    }

    #[test]
    fn tiny_images_do_not_panic() {
        let imgs = generate(101, 1, 1, false);
        assert_eq!(imgs.len(), 101);
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(parse_test_dimensions("", 300.0).unwrap(), DEFAULT_TEST_SIZE);
        assert_eq!(
            parse_test_dimensions("600px,800px", 300.0).unwrap(),
            Size::new(600, 800)
        );
        assert_eq!(
            parse_test_dimensions("2in, 50.8mm", 300.0).unwrap(),
            Size::new(600, 600)
        );
        for bad in ["600", "a,b", "0,10", "50%,10"] {
            assert!(parse_test_dimensions(bad, 300.0).is_err(), "{bad:?}");
        }
    }
}
