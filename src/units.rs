//! Unit-aware measurements and their conversion to pixels.
//!
//! A [`Measurement`] is a number with a [`Unit`]. Physical units convert
//! through a resolution in pixels per inch; percent converts through a
//! caller-supplied reference length.
//!
//! ```
//! use zinelayout::{Measurement, Unit};
//!
//! let m: Measurement = "2in".parse().unwrap();
//! assert_eq!(m, Measurement::new(2.0, Unit::Inch));
//! assert_eq!(m.to_pixels(300.0, None).unwrap(), 600);
//!
//! let half: Measurement = "50%".parse().unwrap();
//! assert_eq!(half.to_pixels(300.0, Some(1000)).unwrap(), 500);
//! ```

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::ErrorKind;

/// Resolution used when a document does not set one.
pub const DEFAULT_PPI: f64 = 300.0;

const CM_PER_INCH: f64 = 2.54;
const MM_PER_INCH: f64 = 25.4;

/// Unit tag of a [`Measurement`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Raw pixels. Also the unit of a bare number.
    #[default]
    Pixel,
    Inch,
    Centimeter,
    Millimeter,
    /// Percent of a reference length supplied at conversion time.
    Percent,
}

impl Unit {
    /// Suffix used in the textual form.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Pixel => "px",
            Self::Inch => "in",
            Self::Centimeter => "cm",
            Self::Millimeter => "mm",
            Self::Percent => "%",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        // Suffixes are short; compare case-insensitively without allocating.
        const SUFFIXES: [(&str, Unit); 6] = [
            ("", Unit::Pixel),
            ("px", Unit::Pixel),
            ("in", Unit::Inch),
            ("cm", Unit::Centimeter),
            ("mm", Unit::Millimeter),
            ("%", Unit::Percent),
        ];
        SUFFIXES
            .iter()
            .find(|(s, _)| s.eq_ignore_ascii_case(suffix))
            .map(|&(_, u)| u)
    }
}

/// A non-negative number with a unit.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Measurement {
    pub value: f64,
    pub unit: Unit,
}

impl Measurement {
    /// Zero pixels.
    pub const ZERO: Self = Self {
        value: 0.0,
        unit: Unit::Pixel,
    };

    pub const fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub const fn px(value: f64) -> Self {
        Self::new(value, Unit::Pixel)
    }

    pub const fn inches(value: f64) -> Self {
        Self::new(value, Unit::Inch)
    }

    pub const fn percent(value: f64) -> Self {
        Self::new(value, Unit::Percent)
    }

    pub fn is_percent(&self) -> bool {
        self.unit == Unit::Percent
    }

    /// Parse `<number><optional unit suffix>`.
    ///
    /// The number is unsigned decimal (`12`, `0.5`, `.5`, `2.`); whitespace
    /// around the number and between number and suffix is ignored.
    pub fn parse(text: &str) -> Result<Self, ErrorKind> {
        let malformed = || ErrorKind::MalformedMeasurement {
            text: text.to_owned(),
        };

        let s = text.trim();
        let num_len = s
            .bytes()
            .take_while(|b| b.is_ascii_digit() || *b == b'.')
            .count();
        let (number, suffix) = s.split_at(num_len);

        // At most one decimal point and at least one digit.
        if number.bytes().filter(|&b| b == b'.').count() > 1
            || !number.bytes().any(|b| b.is_ascii_digit())
        {
            return Err(malformed());
        }
        let value: f64 = number.parse().map_err(|_| malformed())?;
        let unit = Unit::from_suffix(suffix.trim_start()).ok_or_else(malformed)?;
        if !value.is_finite() {
            return Err(malformed());
        }
        Ok(Self { value, unit })
    }

    /// Convert to a whole number of pixels.
    ///
    /// Rounds to nearest, ties away from zero. Percent needs `reference`.
    pub fn to_pixels(&self, ppi: f64, reference: Option<u32>) -> Result<i64, ErrorKind> {
        to_pixels(self.value, self.unit, ppi, reference)
    }
}

/// Convert `value` in `unit` to pixels at `ppi`.
///
/// Factors: 1in = `ppi` px, 1cm = `ppi / 2.54` px, 1mm = `ppi / 25.4` px,
/// percent = `reference * value / 100`.
pub fn to_pixels(value: f64, unit: Unit, ppi: f64, reference: Option<u32>) -> Result<i64, ErrorKind> {
    let exact = match unit {
        Unit::Pixel => value,
        Unit::Inch => value * ppi,
        Unit::Centimeter => value * ppi / CM_PER_INCH,
        Unit::Millimeter => value * ppi / MM_PER_INCH,
        Unit::Percent => {
            let reference = reference.ok_or(ErrorKind::MissingReference { value })?;
            f64::from(reference) * value / 100.0
        }
    };
    // f64::round rounds half away from zero; the cast rejects NaN/overflow.
    num_traits::cast::<f64, i64>(exact.round()).ok_or_else(|| ErrorKind::MalformedMeasurement {
        text: format!("{value}{}", unit.suffix()),
    })
}

/// Check a resolution before it is used for conversions.
pub fn validate_ppi(ppi: f64) -> Result<f64, ErrorKind> {
    if ppi.is_finite() && ppi > 0.0 {
        Ok(ppi)
    } else {
        Err(ErrorKind::InvalidResolution { ppi })
    }
}

impl FromStr for Measurement {
    type Err = ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

impl<'de> Deserialize<'de> for Measurement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) if n.is_finite() && n >= 0.0 => Ok(Self::px(n)),
            Raw::Number(n) => Err(serde::de::Error::custom(ErrorKind::MalformedMeasurement {
                text: n.to_string(),
            })),
            Raw::Text(t) => Self::parse(&t).map_err(serde::de::Error::custom),
        }
    }
}
