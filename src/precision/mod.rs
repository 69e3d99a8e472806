//! Fractional-precision layer
//!
//! Keeps sub-EMU precision for shapes that need it (Bezier control points,
//! gradient stops) and validates every value before it is rounded.
//!
//! Two entry points per operation:
//! - `try_*` returns a typed `CoordinateError` (contract regime)
//! - the plain variant never fails; it logs and returns a fallback

pub mod batch;
pub mod drawingml;
pub mod validate;

use crate::defaults;
use crate::errors::{ConfigError, CoordinateError};
use crate::types::{Axis, Emu, LengthInput};
use crate::units::{try_parse_length, UnitEngine, ViewportContext};

pub use validate::round_half_up;

/// Multiplier applied to fractional EMU while precision is preserved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PrecisionMode {
    #[default]
    Standard,
    Subpixel,
    HighPrecision,
    UltraPrecision,
}

impl PrecisionMode {
    pub fn factor(self) -> f64 {
        match self {
            PrecisionMode::Standard => 1.0,
            PrecisionMode::Subpixel => 100.0,
            PrecisionMode::HighPrecision => 1000.0,
            PrecisionMode::UltraPrecision => 10000.0,
        }
    }
}

/// Rounding and validation policy of the fractional pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FractionalCoordinateContext {
    /// Multiplier applied to every converted value
    pub fractional_scale: f64,
    pub max_decimal_places: u8,
    /// Distance from an integer below which adaptive precision snaps
    pub precision_threshold: f64,
    pub adaptive_precision: bool,
}

impl Default for FractionalCoordinateContext {
    fn default() -> Self {
        Self {
            fractional_scale: 1.0,
            max_decimal_places: defaults::MAX_DECIMAL_PLACES,
            precision_threshold: defaults::PRECISION_THRESHOLD,
            adaptive_precision: false,
        }
    }
}

impl FractionalCoordinateContext {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fractional_scale.is_finite() || self.fractional_scale <= 0.0 {
            return Err(ConfigError {
                message: format!("fractional_scale must be positive, got {}", self.fractional_scale),
            });
        }
        if !self.precision_threshold.is_finite() || self.precision_threshold < 0.0 {
            return Err(ConfigError {
                message: format!(
                    "precision_threshold must be a non-negative number, got {}",
                    self.precision_threshold
                ),
            });
        }
        if self.max_decimal_places > 10 {
            return Err(ConfigError {
                message: format!("max_decimal_places must be at most 10, got {}", self.max_decimal_places),
            });
        }
        Ok(())
    }
}

/// Unit engine wrapper that preserves and validates fractional EMU.
#[derive(Debug)]
pub struct PrecisionEngine {
    inner: UnitEngine,
    mode: PrecisionMode,
    config: FractionalCoordinateContext,
}

impl PrecisionEngine {
    /// Wrap `inner` with the default fractional policy.
    pub fn new(inner: UnitEngine, mode: PrecisionMode) -> Self {
        Self {
            inner,
            mode,
            config: FractionalCoordinateContext::default(),
        }
    }

    pub fn try_new(
        inner: UnitEngine,
        mode: PrecisionMode,
        config: FractionalCoordinateContext,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { inner, mode, config })
    }

    pub fn mode(&self) -> PrecisionMode {
        self.mode
    }

    pub fn precision_factor(&self) -> f64 {
        self.mode.factor()
    }

    pub fn context(&self) -> &FractionalCoordinateContext {
        &self.config
    }

    pub fn inner(&self) -> &UnitEngine {
        &self.inner
    }

    /// Convert a length to validated fractional EMU.
    ///
    /// With `preserve_precision` the result is scaled by the precision
    /// factor; use `to_integer_emu` to bring it back to plain EMU.
    pub fn try_to_fractional_emu(
        &self,
        value: LengthInput<'_>,
        ctx: Option<&ViewportContext>,
        axis: Axis,
        preserve_precision: bool,
    ) -> Result<f64, CoordinateError> {
        let ctx = ctx.copied().unwrap_or_default();

        validate::check_input(value)?;
        let length = self.inner.parse(value);
        validate::check_magnitude(length.as_written())?;

        let factor = if preserve_precision { self.mode.factor() } else { 1.0 };
        let converted =
            self.inner.resolve_length_emu(length, &ctx, axis) * self.config.fractional_scale * factor;
        validate::check_overflow(converted)?;

        let clamped = validate::clamp_to_bounds(converted, defaults::MAX_EMU * factor);
        let mut rounded = round_half_up(clamped, self.config.max_decimal_places);
        if self.config.adaptive_precision {
            rounded = validate::snap_to_integer(rounded, self.config.precision_threshold);
        }
        validate::check_final(rounded)
    }

    /// Like `try_to_fractional_emu`, but never fails.
    ///
    /// On any validation error the failure is logged and a deterministic
    /// fallback is returned: the raw number read as pixels at 96 DPI when it
    /// is finite and within +-10000, otherwise 0.
    pub fn to_fractional_emu(
        &self,
        value: LengthInput<'_>,
        ctx: Option<&ViewportContext>,
        axis: Axis,
        preserve_precision: bool,
    ) -> f64 {
        match self.try_to_fractional_emu(value, ctx, axis, preserve_precision) {
            Ok(emu) => emu,
            Err(err) => {
                let fallback = fallback_emu(value);
                crate::log::warn!(error = %err, ?value, fallback, "coordinate conversion failed");
                fallback
            }
        }
    }

    /// Integer EMU through the fractional pipeline.
    pub fn to_precise_emu(&self, value: LengthInput<'_>, ctx: Option<&ViewportContext>, axis: Axis) -> Emu {
        Emu::from_f64(self.to_fractional_emu(value, ctx, axis, false))
    }

    /// Final rounding of a fractional value.
    ///
    /// `preserved` says whether `fractional` still carries the precision
    /// factor, in which case it is divided back out first.
    pub fn to_integer_emu(&self, fractional: f64, preserved: bool) -> Emu {
        let emu = if preserved {
            fractional / self.mode.factor()
        } else {
            fractional
        };
        Emu::from_f64(emu)
    }
}

fn fallback_emu(value: LengthInput<'_>) -> f64 {
    let raw = match value {
        LengthInput::Number(n) => Some(n),
        LengthInput::Text(text) if text.len() <= defaults::MAX_INPUT_LEN => {
            try_parse_length(text).map(|length| length.as_written())
        }
        _ => None,
    };
    match raw {
        Some(n) if n.is_finite() && n.abs() <= defaults::FALLBACK_PIXEL_RANGE => n * defaults::EMU_PER_PIXEL,
        _ => 0.0,
    }
}
