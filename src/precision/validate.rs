//! Validation stages of the fractional pipeline.
//!
//! Each stage is a small function so the pipeline in `PrecisionEngine` reads
//! top to bottom, and so each stage can be tested on its own.

use crate::defaults;
use crate::errors::CoordinateError;
use crate::types::LengthInput;

/// Reject non-finite numbers and overlong strings before parsing.
pub(crate) fn check_input(value: LengthInput<'_>) -> Result<(), CoordinateError> {
    match value {
        LengthInput::Number(n) if !n.is_finite() => Err(CoordinateError::validation(format!(
            "coordinate is not finite: {n}"
        ))),
        LengthInput::Text(text) if text.chars().count() > defaults::MAX_INPUT_LEN => {
            Err(CoordinateError::validation(format!(
                "coordinate string longer than {} characters",
                defaults::MAX_INPUT_LEN
            )))
        }
        _ => Ok(()),
    }
}

/// Reject absurd magnitudes before they reach the unit math.
pub(crate) fn check_magnitude(numeric: f64) -> Result<(), CoordinateError> {
    if numeric.abs() > defaults::MAX_INPUT_MAGNITUDE {
        return Err(CoordinateError::validation(format!(
            "coordinate magnitude {numeric} exceeds {}",
            defaults::MAX_INPUT_MAGNITUDE
        )));
    }
    Ok(())
}

/// Guard the converted value against overflow.
pub(crate) fn check_overflow(converted: f64) -> Result<(), CoordinateError> {
    if !converted.is_finite() || converted.abs() > defaults::MAX_CONVERTED_MAGNITUDE {
        return Err(CoordinateError::PrecisionOverflow {
            value: converted,
            limit: defaults::MAX_CONVERTED_MAGNITUDE,
        });
    }
    Ok(())
}

/// Clamp into `[0, ceiling]`.
pub(crate) fn clamp_to_bounds(emu: f64, ceiling: f64) -> f64 {
    if emu < 0.0 {
        crate::log::debug!(emu, "negative EMU clamped to 0");
        0.0
    } else if emu > ceiling {
        crate::log::debug!(emu, ceiling, "EMU clamped to ceiling");
        ceiling
    } else {
        emu
    }
}

/// Round to `places` decimal digits, ties away from zero.
///
/// Decimal ties that binary floats store slightly low (2.675 is really
/// 2.67499999...) still round up.
pub fn round_half_up(value: f64, places: u8) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(i32::from(places));
    let scaled = value.abs() * factor;
    // No fractional digits left to round at this magnitude
    if scaled >= TWO_POW_52 {
        return value;
    }

    let floor = scaled.floor();
    let frac = scaled - floor;
    // Only a fraction within a few ULP of .5 counts as a tie
    let tie = (frac - 0.5).abs() <= scaled * f64::EPSILON * 4.0;
    let rounded = (if tie || frac > 0.5 { floor + 1.0 } else { floor }) / factor;
    if value < 0.0 { -rounded } else { rounded }
}

const TWO_POW_52: f64 = 4_503_599_627_370_496.0;

/// Snap values within `threshold` of an integer onto it.
pub(crate) fn snap_to_integer(value: f64, threshold: f64) -> f64 {
    let nearest = value.round();
    if (value - nearest).abs() < threshold {
        nearest
    } else {
        value
    }
}

/// Last line of defence before a value leaves the pipeline.
pub(crate) fn check_final(emu: f64) -> Result<f64, CoordinateError> {
    if emu.is_finite() {
        Ok(emu)
    } else {
        Err(CoordinateError::EmuBoundary { value: emu })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_stage() {
        assert!(check_input(LengthInput::Number(1.0)).is_ok());
        assert!(check_input(LengthInput::Absent).is_ok());
        assert!(check_input(LengthInput::Text("garbage")).is_ok());
        assert!(check_input(LengthInput::Number(f64::NAN)).is_err());
        assert!(check_input(LengthInput::Number(f64::NEG_INFINITY)).is_err());

        let long = "1".repeat(101);
        assert!(check_input(LengthInput::Text(&long)).is_err());
        let limit = "1".repeat(100);
        assert!(check_input(LengthInput::Text(&limit)).is_ok());
    }

    #[test]
    fn magnitude_and_overflow_stages() {
        assert!(check_magnitude(1e10).is_ok());
        assert!(check_magnitude(-1e10 - 1.0).is_err());
        assert!(check_overflow(1e15).is_ok());
        assert_eq!(
            check_overflow(-2e15),
            Err(CoordinateError::PrecisionOverflow { value: -2e15, limit: 1e15 })
        );
        assert!(check_overflow(f64::INFINITY).is_err());
    }

    #[test]
    fn clamping() {
        assert_eq!(clamp_to_bounds(-5.0, 100.0), 0.0);
        assert_eq!(clamp_to_bounds(500.0, 100.0), 100.0);
        assert_eq!(clamp_to_bounds(42.5, 100.0), 42.5);
    }

    #[test]
    fn half_up_not_bankers() {
        assert_eq!(round_half_up(0.5, 0), 1.0);
        assert_eq!(round_half_up(2.5, 0), 3.0);
        assert_eq!(round_half_up(-2.5, 0), -3.0);
        assert_eq!(round_half_up(1.0005, 3), 1.001);
        assert_eq!(round_half_up(2.675, 2), 2.68);
        assert_eq!(round_half_up(1.23449, 3), 1.234);
        assert_eq!(round_half_up(914400.0, 3), 914400.0);
    }

    #[test]
    fn half_up_keeps_large_integers() {
        assert_eq!(round_half_up(914_400_000_000.0, 3), 914_400_000_000.0);
        assert_eq!(round_half_up(-914_400_000_000.0, 3), -914_400_000_000.0);
        assert_eq!(round_half_up(914_400_000.0, 10), 914_400_000.0);
        assert_eq!(round_half_up(9_144_000_000_000.0, 3), 9_144_000_000_000.0);
        assert_eq!(round_half_up(123_456_789.25, 1), 123_456_789.3);
        assert_eq!(round_half_up(123_456_789.24, 1), 123_456_789.2);
    }

    #[test]
    fn snapping() {
        assert_eq!(snap_to_integer(9.9995, 0.001), 10.0);
        assert_eq!(snap_to_integer(9.99, 0.001), 9.99);
        assert_eq!(snap_to_integer(3.0004, 0.001), 3.0);
    }

    #[test]
    fn final_stage() {
        assert_eq!(check_final(1.5), Ok(1.5));
        assert!(matches!(check_final(f64::NAN), Err(CoordinateError::EmuBoundary { .. })));
    }
}
