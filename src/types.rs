//! Strongly-typed primitives shared by the resolution pipeline.
//!
//! - EMU results are `Emu`, never a bare `i64`
//! - Raw SVG input is a `LengthInput`, parsed lengths are `LengthValue`
//! - Percent is a fraction after parsing, vw/vh are not

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Integer English Metric Units (914400 per inch).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Emu(pub i64);

impl Emu {
    pub const ZERO: Emu = Emu(0);

    /// Round a fractional EMU amount to the nearest integer.
    ///
    /// Ties round away from zero. Non-finite input yields `Emu::ZERO`.
    #[inline]
    pub fn from_f64(value: f64) -> Emu {
        if !value.is_finite() {
            return Emu::ZERO;
        }
        // `as` saturates at the i64 bounds; -0.0 becomes 0
        Emu(value.round() as i64)
    }

    /// Get the raw value
    #[inline]
    pub fn raw(self) -> i64 {
        self.0
    }

    /// Get the value as a float (for further fractional math)
    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }

    #[inline]
    pub fn abs(self) -> Emu {
        Emu(self.0.saturating_abs())
    }

    #[inline]
    pub fn min(self, other: Emu) -> Emu {
        Emu(self.0.min(other.0))
    }

    #[inline]
    pub fn max(self, other: Emu) -> Emu {
        Emu(self.0.max(other.0))
    }
}

// Arithmetic saturates like `from_f64` does
impl Add for Emu {
    type Output = Emu;
    fn add(self, rhs: Emu) -> Emu { Emu(self.0.saturating_add(rhs.0)) }
}
impl Sub for Emu {
    type Output = Emu;
    fn sub(self, rhs: Emu) -> Emu { Emu(self.0.saturating_sub(rhs.0)) }
}
impl Mul<i64> for Emu {
    type Output = Emu;
    fn mul(self, rhs: i64) -> Emu { Emu(self.0.saturating_mul(rhs)) }
}
impl Neg for Emu {
    type Output = Emu;
    fn neg(self) -> Emu { Emu(self.0.saturating_neg()) }
}

impl PartialEq<i64> for Emu {
    fn eq(&self, other: &i64) -> bool {
        self.0 == *other
    }
}

impl From<Emu> for i64 {
    fn from(emu: Emu) -> i64 {
        emu.0
    }
}

impl fmt::Display for Emu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Axis hint for context-dependent units (percentages).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    #[default]
    X,
    Y,
}

/// Unit suffix of an SVG length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Unitless,
    Pixel,
    Point,
    Millimeter,
    Centimeter,
    Inch,
    Em,
    Ex,
    /// Stored as a 0-1 fraction
    Percent,
    /// Stored as the raw number ("50vw" is 50.0)
    ViewportWidth,
    /// Stored as the raw number ("50vh" is 50.0)
    ViewportHeight,
}

impl UnitKind {
    /// Map a suffix to its unit kind. Matching is case-sensitive.
    pub fn from_suffix(suffix: &str) -> Option<UnitKind> {
        Some(match suffix {
            "" => UnitKind::Unitless,
            "px" => UnitKind::Pixel,
            "pt" => UnitKind::Point,
            "mm" => UnitKind::Millimeter,
            "cm" => UnitKind::Centimeter,
            "in" => UnitKind::Inch,
            "em" => UnitKind::Em,
            "ex" => UnitKind::Ex,
            "%" => UnitKind::Percent,
            "vw" => UnitKind::ViewportWidth,
            "vh" => UnitKind::ViewportHeight,
            _ => return None,
        })
    }

    pub fn suffix(self) -> &'static str {
        match self {
            UnitKind::Unitless => "",
            UnitKind::Pixel => "px",
            UnitKind::Point => "pt",
            UnitKind::Millimeter => "mm",
            UnitKind::Centimeter => "cm",
            UnitKind::Inch => "in",
            UnitKind::Em => "em",
            UnitKind::Ex => "ex",
            UnitKind::Percent => "%",
            UnitKind::ViewportWidth => "vw",
            UnitKind::ViewportHeight => "vh",
        }
    }

    /// Physical units resolve straight to EMU, independent of DPI.
    pub fn is_absolute(self) -> bool {
        matches!(
            self,
            UnitKind::Point | UnitKind::Millimeter | UnitKind::Centimeter | UnitKind::Inch
        )
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// A parsed SVG length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LengthValue {
    pub numeric: f64,
    pub unit: UnitKind,
}

impl LengthValue {
    pub const ZERO: LengthValue = LengthValue {
        numeric: 0.0,
        unit: UnitKind::Unitless,
    };

    pub fn new(numeric: f64, unit: UnitKind) -> Self {
        LengthValue { numeric, unit }
    }

    /// The number as it appeared in the source text (`"50%"` gives 50).
    pub fn as_written(&self) -> f64 {
        match self.unit {
            UnitKind::Percent => self.numeric * 100.0,
            _ => self.numeric,
        }
    }
}

impl Default for LengthValue {
    fn default() -> Self {
        LengthValue::ZERO
    }
}

impl fmt::Display for LengthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            UnitKind::Percent => write!(f, "{}%", self.numeric * 100.0),
            unit => write!(f, "{}{}", self.numeric, unit),
        }
    }
}

/// Raw length as handed over by the SVG attribute source.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum LengthInput<'a> {
    Text(&'a str),
    Number(f64),
    #[default]
    Absent,
}

impl LengthInput<'_> {
    /// The numeric part of the input if it is already a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            LengthInput::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl<'a> From<&'a str> for LengthInput<'a> {
    fn from(s: &'a str) -> Self {
        LengthInput::Text(s)
    }
}

impl<'a> From<&'a String> for LengthInput<'a> {
    fn from(s: &'a String) -> Self {
        LengthInput::Text(s.as_str())
    }
}

impl<'a> From<Option<&'a str>> for LengthInput<'a> {
    fn from(s: Option<&'a str>) -> Self {
        match s {
            Some(s) => LengthInput::Text(s),
            None => LengthInput::Absent,
        }
    }
}

impl From<f64> for LengthInput<'_> {
    fn from(n: f64) -> Self {
        LengthInput::Number(n)
    }
}

impl From<i32> for LengthInput<'_> {
    fn from(n: i32) -> Self {
        LengthInput::Number(f64::from(n))
    }
}
