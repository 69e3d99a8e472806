//! The length resolution interface and its two implementations.
//!
//! `UnitEngine` rounds straight to integer EMU. `PrecisionEngine` wraps a
//! `UnitEngine` and runs every value through the fractional validation
//! pipeline first. Callers pick one when they build their `Resolver`.

use enum_dispatch::enum_dispatch;

use crate::precision::{PrecisionEngine, PrecisionMode};
use crate::types::{Axis, Emu, LengthInput};
use crate::units::{UnitEngine, ViewportContext};

/// Anything that can turn an SVG length into EMU.
#[enum_dispatch]
pub trait LengthResolver {
    /// Integer EMU suitable for OOXML output.
    fn to_emu(&self, value: LengthInput<'_>, ctx: &ViewportContext, axis: Axis) -> Emu;

    /// Pixels at the context DPI.
    fn to_pixels(&self, value: LengthInput<'_>, ctx: &ViewportContext, axis: Axis) -> f64;

    /// EMU before the final rounding step.
    fn fractional_emu(&self, value: LengthInput<'_>, ctx: &ViewportContext, axis: Axis) -> f64;
}

impl LengthResolver for UnitEngine {
    fn to_emu(&self, value: LengthInput<'_>, ctx: &ViewportContext, axis: Axis) -> Emu {
        UnitEngine::to_emu(self, value, ctx, axis)
    }

    fn to_pixels(&self, value: LengthInput<'_>, ctx: &ViewportContext, axis: Axis) -> f64 {
        UnitEngine::to_pixels(self, value, ctx, axis)
    }

    fn fractional_emu(&self, value: LengthInput<'_>, ctx: &ViewportContext, axis: Axis) -> f64 {
        UnitEngine::fractional_emu(self, value, ctx, axis)
    }
}

impl LengthResolver for PrecisionEngine {
    fn to_emu(&self, value: LengthInput<'_>, ctx: &ViewportContext, axis: Axis) -> Emu {
        self.to_precise_emu(value, Some(ctx), axis)
    }

    fn to_pixels(&self, value: LengthInput<'_>, ctx: &ViewportContext, axis: Axis) -> f64 {
        self.to_fractional_emu(value, Some(ctx), axis, false) / ctx.emu_per_pixel()
    }

    fn fractional_emu(&self, value: LengthInput<'_>, ctx: &ViewportContext, axis: Axis) -> f64 {
        self.to_fractional_emu(value, Some(ctx), axis, false)
    }
}

/// Resolver selected at construction time.
#[enum_dispatch(LengthResolver)]
#[derive(Debug)]
pub enum Resolver {
    UnitEngine,
    PrecisionEngine,
}

impl Resolver {
    /// Plain integer resolution.
    pub fn standard() -> Self {
        Resolver::UnitEngine(UnitEngine::new())
    }

    /// Fractional resolution with validation, in the given precision mode.
    pub fn precise(mode: PrecisionMode) -> Self {
        Resolver::PrecisionEngine(PrecisionEngine::new(UnitEngine::new(), mode))
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Resolver::standard()
    }
}
