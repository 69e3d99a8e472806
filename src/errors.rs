//! Error types for the contract regime.
//!
//! Bad SVG data never surfaces as an error: the parser, the unit engine and
//! the viewBox resolver degrade to safe defaults. The types here are returned
//! only where the *caller* broke a contract (invalid context, oversized batch,
//! `try_*` precision entry points).

use miette::Diagnostic;
use thiserror::Error;

// ============================================================================
// Coordinate Errors
// ============================================================================

/// Errors raised by the fractional-precision layer
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    /// Bad, missing or oversized input value
    #[error("invalid coordinate: {message}")]
    #[diagnostic(code(svg_emu::coordinate::validation))]
    Validation { message: String },

    /// An intermediate value left the safe numeric range
    #[error("precision overflow: {value} exceeds {limit}")]
    #[diagnostic(
        code(svg_emu::coordinate::precision_overflow),
        help("lower the precision mode or check the source coordinate")
    )]
    PrecisionOverflow { value: f64, limit: f64 },

    /// Final value is not a usable PowerPoint EMU
    #[error("EMU value out of bounds: {value}")]
    #[diagnostic(code(svg_emu::coordinate::emu_boundary))]
    EmuBoundary { value: f64 },
}

impl CoordinateError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        CoordinateError::Validation {
            message: message.into(),
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Invalid field in a `ViewportContext`
#[derive(Error, Diagnostic, Debug, Clone, Copy, PartialEq)]
pub enum ContextError {
    #[error("{field} is not finite")]
    #[diagnostic(code(svg_emu::context::not_finite))]
    NotFinite { field: &'static str },

    #[error("{field} must not be negative, got {value}")]
    #[diagnostic(code(svg_emu::context::negative))]
    Negative { field: &'static str, value: f64 },

    #[error("dpi must be positive, got {value}")]
    #[diagnostic(
        code(svg_emu::context::dpi),
        help("use 96 for screen content or 72 for print")
    )]
    NonPositiveDpi { value: f64 },
}

/// Invalid `FractionalCoordinateContext`
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
#[error("invalid precision configuration: {message}")]
#[diagnostic(code(svg_emu::precision::config))]
pub struct ConfigError {
    pub message: String,
}
