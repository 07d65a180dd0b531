//! Border value type shared by all four border scopes.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::color::Color;
use crate::error::ErrorKind;
use crate::units::Measurement;

/// Thickness of a border that does not set one.
pub const DEFAULT_THICKNESS: Measurement = Measurement::px(2.0);

/// How a border outline is stroked.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BorderType {
    /// Solid outline.
    #[default]
    Plain,
    /// Short on/off runs.
    Dotted,
    /// Long on/off runs.
    Dashed,
    /// Only short segments at the four corners.
    Corner,
}

impl BorderType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Dotted => "dotted",
            Self::Dashed => "dashed",
            Self::Corner => "corner",
        }
    }

    pub fn parse(text: &str) -> Result<Self, ErrorKind> {
        match text.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "dotted" => Ok(Self::Dotted),
            "dashed" => Ok(Self::Dashed),
            "corner" => Ok(Self::Corner),
            _ => Err(ErrorKind::UnknownBorderType {
                text: text.to_owned(),
            }),
        }
    }
}

impl FromStr for BorderType {
    type Err = ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BorderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BorderType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// A border at one scope. Present-but-disabled draws nothing.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Border {
    pub enabled: bool,
    pub color: Color,
    #[serde(rename = "type")]
    pub kind: BorderType,
    pub thickness: Measurement,
}

impl Default for Border {
    /// Disabled, black, plain, [`DEFAULT_THICKNESS`].
    fn default() -> Self {
        Self {
            enabled: false,
            color: Color::BLACK,
            kind: BorderType::Plain,
            thickness: DEFAULT_THICKNESS,
        }
    }
}

impl Border {
    /// An enabled plain border of the given color.
    pub fn plain(color: Color) -> Self {
        Self {
            enabled: true,
            color,
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: BorderType) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_thickness(mut self, thickness: Measurement) -> Self {
        self.thickness = thickness;
        self
    }
}

/// The border at `scope` if it exists and is enabled.
pub(crate) fn enabled(scope: &Option<Border>) -> Option<&Border> {
    scope.as_ref().filter(|b| b.enabled)
}
