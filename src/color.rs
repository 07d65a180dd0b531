//! RGBA colors: `#RRGGBB[AA]` hex, a few names, or an `R,G,B,A` quad.

use core::fmt;
use core::str::FromStr;

use image::Rgba;
use serde::{Deserialize, Deserializer};

use crate::error::ErrorKind;

/// Flat 8-bit RGBA color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }

    /// Parse any of the accepted textual forms.
    ///
    /// - `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` (alpha defaults to opaque)
    /// - a name from a small table (case-insensitive): `black`, `white`, ...
    /// - `R,G,B,A` with each component in `0..=255`
    pub fn parse(text: &str) -> Result<Self, ErrorKind> {
        let s = text.trim();
        let parsed = if let Some(hex) = s.strip_prefix('#') {
            parse_hex(hex)
        } else if s.contains(',') {
            parse_quad(s)
        } else {
            lookup_named(s)
        };
        parsed.ok_or_else(|| ErrorKind::MalformedColor {
            text: text.to_owned(),
        })
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let b = hex.as_bytes();
    match hex.len() {
        3 => Some(Color::rgb(
            expand_nibble(b[0])?,
            expand_nibble(b[1])?,
            expand_nibble(b[2])?,
        )),
        4 => Some(Color::rgba(
            expand_nibble(b[0])?,
            expand_nibble(b[1])?,
            expand_nibble(b[2])?,
            expand_nibble(b[3])?,
        )),
        6 => Some(Color::rgb(
            parse_byte(&b[0..2])?,
            parse_byte(&b[2..4])?,
            parse_byte(&b[4..6])?,
        )),
        8 => Some(Color::rgba(
            parse_byte(&b[0..2])?,
            parse_byte(&b[2..4])?,
            parse_byte(&b[4..6])?,
            parse_byte(&b[6..8])?,
        )),
        _ => None,
    }
}

/// Expand a single hex nibble: 'f' → 0xFF, 'a' → 0xAA.
fn expand_nibble(ch: u8) -> Option<u8> {
    let n = hex_val(ch)?;
    Some(n << 4 | n)
}

fn hex_val(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'a'..=b'f' => Some(ch - b'a' + 10),
        b'A'..=b'F' => Some(ch - b'A' + 10),
        _ => None,
    }
}

fn parse_byte(pair: &[u8]) -> Option<u8> {
    Some(hex_val(pair[0])? << 4 | hex_val(pair[1])?)
}

fn parse_quad(s: &str) -> Option<Color> {
    let mut parts = s.split(',').map(|p| p.trim().parse::<u8>().ok());
    let r = parts.next()??;
    let g = parts.next()??;
    let b = parts.next()??;
    let a = parts.next()??;
    if parts.next().is_some() {
        return None;
    }
    Some(Color::rgba(r, g, b, a))
}

fn lookup_named(name: &str) -> Option<Color> {
    let lower = name.to_ascii_lowercase();
    NAMED_COLORS
        .binary_search_by_key(&lower.as_str(), |&(n, _)| n)
        .ok()
        .map(|idx| NAMED_COLORS[idx].1)
}

/// Sorted alphabetically for binary search.
const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::BLACK),
    ("blue", Color::rgb(0, 0, 255)),
    ("gray", Color::rgb(128, 128, 128)),
    ("green", Color::rgb(0, 128, 0)),
    ("grey", Color::rgb(128, 128, 128)),
    ("red", Color::rgb(255, 0, 0)),
    ("transparent", Color::TRANSPARENT),
    ("white", Color::WHITE),
];

impl FromStr for Color {
    type Err = ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_table_is_sorted() {
        for pair in NAMED_COLORS.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} >= {}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn hex_forms() {
        assert_eq!(Color::parse("#ff0000").unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(
            Color::parse("#00ff0080").unwrap(),
            Color::rgba(0, 255, 0, 0x80)
        );
        assert_eq!(Color::parse("#fff").unwrap(), Color::WHITE);
        assert_eq!(Color::parse("#0008").unwrap(), Color::rgba(0, 0, 0, 0x88));
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(Color::parse("Black").unwrap(), Color::BLACK);
        assert_eq!(Color::parse(" white ").unwrap(), Color::WHITE);
    }

    #[test]
    fn quad_form() {
        assert_eq!(
            Color::parse("10, 20,30,255").unwrap(),
            Color::rgba(10, 20, 30, 255)
        );
    }

    #[test]
    fn rejects_malformed() {
        for bad in ["", "#12", "#gggggg", "1,2,3", "1,2,3,4,5", "256,0,0,0", "chartreuse"] {
            assert!(
                matches!(Color::parse(bad), Err(ErrorKind::MalformedColor { .. })),
                "{bad:?} accepted"
            );
        }
    }

    #[test]
    fn display_is_hex_with_alpha() {
        assert_eq!(Color::rgb(1, 2, 255).to_string(), "#0102ffff");
    }
}
