//! Unit resolution engine
//!
//! Every SVG length goes through one scalar core, `UnitEngine::fractional_emu`.
//! Integer EMU, pixels, batch conversion and the fractional-precision layer
//! are all built on top of it.

pub mod batch;
pub mod context;
pub mod parse;

use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;

use crate::defaults;
use crate::types::{Axis, Emu, LengthInput, LengthValue, UnitKind};

pub use batch::{axis_for_key, batch_convert};
pub use context::{ContextUpdate, ViewportContext};
pub use parse::{parse_length, try_parse_length};

/// Intermediate result of resolving a length.
///
/// Relative units land in pixels at the context DPI; physical units go
/// straight to EMU so they never pick up DPI rounding.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Resolved {
    Pixels(f64),
    Emu(f64),
}

impl Resolved {
    fn into_emu(self, ctx: &ViewportContext) -> f64 {
        match self {
            Resolved::Pixels(px) => px * ctx.emu_per_pixel(),
            Resolved::Emu(emu) => emu,
        }
    }

    fn into_pixels(self, ctx: &ViewportContext) -> f64 {
        match self {
            Resolved::Pixels(px) => px,
            Resolved::Emu(emu) => emu / ctx.emu_per_pixel(),
        }
    }
}

fn resolve(length: LengthValue, ctx: &ViewportContext, axis: Axis) -> Resolved {
    let n = length.numeric;
    match length.unit {
        UnitKind::Unitless | UnitKind::Pixel => Resolved::Pixels(n),
        UnitKind::Point => Resolved::Emu(n * defaults::EMU_PER_INCH / defaults::POINTS_PER_INCH),
        UnitKind::Millimeter => Resolved::Emu(n * defaults::EMU_PER_INCH / defaults::MM_PER_INCH),
        UnitKind::Centimeter => Resolved::Emu(n * defaults::EMU_PER_INCH / defaults::CM_PER_INCH),
        UnitKind::Inch => Resolved::Emu(n * defaults::EMU_PER_INCH),
        UnitKind::Em => Resolved::Pixels(n * ctx.font_size()),
        UnitKind::Ex => Resolved::Pixels(n * ctx.x_height()),
        // Already a fraction
        UnitKind::Percent => match axis {
            Axis::X => Resolved::Pixels(n * ctx.percent_base_width()),
            Axis::Y => Resolved::Pixels(n * ctx.percent_base_height()),
        },
        // Raw number, the /100 happens here
        UnitKind::ViewportWidth => Resolved::Pixels(n / 100.0 * ctx.width()),
        UnitKind::ViewportHeight => Resolved::Pixels(n / 100.0 * ctx.height()),
    }
}

/// Long-lived conversion service.
///
/// Holds nothing but a bounded cache of parsed length strings; the cache is
/// a memo of `parse_length` and never changes a result.
pub struct UnitEngine {
    cache: Option<Mutex<LruCache<String, LengthValue>>>,
}

impl Default for UnitEngine {
    fn default() -> Self {
        Self::with_cache_capacity(defaults::PARSE_CACHE_CAPACITY)
    }
}

impl std::fmt::Debug for UnitEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnitEngine")
            .field("cached", &self.cache.is_some())
            .finish()
    }
}

impl UnitEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a parse cache of `capacity` entries; 0 disables caching.
    pub fn with_cache_capacity(capacity: usize) -> Self {
        let cache = NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap)));
        Self { cache }
    }

    /// Parse a length, consulting the cache for strings.
    pub fn parse(&self, value: LengthInput<'_>) -> LengthValue {
        let LengthInput::Text(text) = value else {
            return parse_length(value);
        };
        let Some(cache) = &self.cache else {
            return parse_length(value);
        };

        // A poisoned lock only costs us the memo
        if let Ok(mut cache) = cache.lock() {
            if let Some(hit) = cache.get(text) {
                return *hit;
            }
            let parsed = parse_length(value);
            cache.put(text.to_string(), parsed);
            parsed
        } else {
            parse_length(value)
        }
    }

    /// Un-rounded EMU for a length. Non-finite results become 0.
    pub fn fractional_emu(&self, value: LengthInput<'_>, ctx: &ViewportContext, axis: Axis) -> f64 {
        let emu = self.resolve_length_emu(self.parse(value), ctx, axis);
        if emu.is_finite() {
            emu
        } else {
            crate::log::warn!(?value, "length resolved to a non-finite EMU, using 0");
            0.0
        }
    }

    /// Un-rounded EMU for an already parsed length (no finiteness guard).
    pub fn resolve_length_emu(&self, length: LengthValue, ctx: &ViewportContext, axis: Axis) -> f64 {
        resolve(length, ctx, axis).into_emu(ctx)
    }

    /// Convert a length to integer EMU, rounding half away from zero.
    pub fn to_emu(&self, value: LengthInput<'_>, ctx: &ViewportContext, axis: Axis) -> Emu {
        Emu::from_f64(self.fractional_emu(value, ctx, axis))
    }

    /// Convert a length to pixels at the context DPI.
    pub fn to_pixels(&self, value: LengthInput<'_>, ctx: &ViewportContext, axis: Axis) -> f64 {
        let px = resolve(self.parse(value), ctx, axis).into_pixels(ctx);
        if px.is_finite() { px } else { 0.0 }
    }

    /// Express an EMU amount in the given unit.
    ///
    /// Inverse of `fractional_emu`: percentages come back as fractions and
    /// viewport units as raw numbers, matching what the parser produces.
    /// A zero reference size (zero font size, zero viewport) yields 0.
    pub fn from_emu(&self, emu: Emu, unit: UnitKind, ctx: &ViewportContext, axis: Axis) -> f64 {
        let emu = emu.as_f64();
        let px = emu / ctx.emu_per_pixel();
        let per = |base: f64, scale: f64| if base > 0.0 { px / base * scale } else { 0.0 };
        match unit {
            UnitKind::Unitless | UnitKind::Pixel => px,
            UnitKind::Point => emu / defaults::EMU_PER_POINT,
            UnitKind::Millimeter => emu / defaults::EMU_PER_MM,
            UnitKind::Centimeter => emu / defaults::EMU_PER_CM,
            UnitKind::Inch => emu / defaults::EMU_PER_INCH,
            UnitKind::Em => per(ctx.font_size(), 1.0),
            UnitKind::Ex => per(ctx.x_height(), 1.0),
            UnitKind::Percent => match axis {
                Axis::X => per(ctx.percent_base_width(), 1.0),
                Axis::Y => per(ctx.percent_base_height(), 1.0),
            },
            UnitKind::ViewportWidth => per(ctx.width(), 100.0),
            UnitKind::ViewportHeight => per(ctx.height(), 100.0),
        }
    }

    /// Convert many named lengths, inferring the axis from each key.
    pub fn batch_convert<'a, I, K, V>(&self, values: I, ctx: &ViewportContext) -> BTreeMap<String, Emu>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<LengthInput<'a>>,
    {
        batch_convert(self, values, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emu(s: &str) -> i64 {
        UnitEngine::new().to_emu(s.into(), &ViewportContext::default(), Axis::X).raw()
    }

    #[test]
    fn huge_lengths_saturate() {
        let engine = UnitEngine::new();
        let ctx = ViewportContext::default();
        let low = engine.to_emu("-1e300px".into(), &ctx, Axis::X);
        let high = engine.to_emu("1e300in".into(), &ctx, Axis::Y);
        assert_eq!(low, i64::MIN);
        assert_eq!(low.abs(), i64::MAX);
        assert_eq!(high - low, i64::MAX);
    }

    #[test]
    fn absolute_units() {
        assert_eq!(emu("1in"), 914400);
        assert_eq!(emu("72pt"), 914400);
        assert_eq!(emu("1pt"), 12700);
        assert_eq!(emu("1mm"), 36000);
        assert_eq!(emu("1cm"), 360000);
        assert_eq!(emu("25.4mm"), 914400);
    }

    #[test]
    fn pixels_follow_dpi() {
        let engine = UnitEngine::new();
        let ctx = ViewportContext::default();
        assert_eq!(engine.to_emu("96px".into(), &ctx, Axis::X), 914400);
        assert_eq!(engine.to_emu(96.into(), &ctx, Axis::X), 914400);
        let print = ctx.with_dpi(72.0).unwrap();
        assert_eq!(engine.to_emu("72px".into(), &print, Axis::X), 914400);
    }

    #[test]
    fn font_relative_units() {
        let engine = UnitEngine::new();
        let ctx = ViewportContext::default();
        // 16px font, 8px x-height
        assert_eq!(engine.to_emu("1em".into(), &ctx, Axis::X), 16 * 9525);
        assert_eq!(engine.to_emu("1ex".into(), &ctx, Axis::X), 8 * 9525);
        let big = ctx.with_font_size(32.0).unwrap();
        assert_eq!(engine.to_emu("0.5em".into(), &big, Axis::X), 16 * 9525);
    }

    #[test]
    fn percent_uses_axis_and_parent() {
        let engine = UnitEngine::new();
        let ctx = ViewportContext::default();
        assert_eq!(engine.to_emu("50%".into(), &ctx, Axis::X), 400 * 9525);
        assert_eq!(engine.to_emu("50%".into(), &ctx, Axis::Y), 300 * 9525);

        let nested = ctx.with_parent(200.0, 100.0).unwrap();
        assert_eq!(engine.to_emu("50%".into(), &nested, Axis::X), 100 * 9525);
        assert_eq!(engine.to_emu("50%".into(), &nested, Axis::Y), 50 * 9525);
    }

    #[test]
    fn viewport_units_divide_by_100_at_resolution() {
        let engine = UnitEngine::new();
        let ctx = ViewportContext::default();
        assert_eq!(engine.to_emu("50vw".into(), &ctx, Axis::Y), 400 * 9525);
        assert_eq!(engine.to_emu("50vh".into(), &ctx, Axis::X), 300 * 9525);
        // Same visual size as the percentage on the matching axis
        assert_eq!(
            engine.to_emu("50vw".into(), &ctx, Axis::X),
            engine.to_emu("50%".into(), &ctx, Axis::X)
        );
    }

    #[test]
    fn zero_and_garbage_are_zero() {
        assert_eq!(emu("0"), 0);
        assert_eq!(emu("-0"), 0);
        assert_eq!(emu("-0.00001px"), 0);
        assert_eq!(emu("invalid"), 0);
        assert_eq!(emu(""), 0);
        let engine = UnitEngine::new();
        let ctx = ViewportContext::default();
        assert_eq!(engine.to_emu(LengthInput::Absent, &ctx, Axis::X), 0);
        assert_eq!(engine.to_emu(f64::NAN.into(), &ctx, Axis::X), 0);
    }

    #[test]
    fn to_pixels() {
        let engine = UnitEngine::new();
        let ctx = ViewportContext::default();
        assert_eq!(engine.to_pixels("1in".into(), &ctx, Axis::X), 96.0);
        assert_eq!(engine.to_pixels("2em".into(), &ctx, Axis::X), 32.0);
        assert_eq!(engine.to_pixels("25%".into(), &ctx, Axis::Y), 150.0);
        let print = ctx.with_dpi(72.0).unwrap();
        assert_eq!(engine.to_pixels("1in".into(), &print, Axis::X), 72.0);
    }

    #[test]
    fn from_emu_inverts_every_unit() {
        let engine = UnitEngine::new();
        let ctx = ViewportContext::default();
        let cases = [
            ("12px", UnitKind::Pixel, 12.0),
            ("3pt", UnitKind::Point, 3.0),
            ("5mm", UnitKind::Millimeter, 5.0),
            ("2cm", UnitKind::Centimeter, 2.0),
            ("1.5in", UnitKind::Inch, 1.5),
            ("2em", UnitKind::Em, 2.0),
            ("3ex", UnitKind::Ex, 3.0),
            ("25%", UnitKind::Percent, 0.25),
            ("10vw", UnitKind::ViewportWidth, 10.0),
            ("10vh", UnitKind::ViewportHeight, 10.0),
        ];
        for (input, unit, expected) in cases {
            let e = engine.to_emu(input.into(), &ctx, Axis::X);
            let back = engine.from_emu(e, unit, &ctx, Axis::X);
            assert!((back - expected).abs() < 1e-4, "{input}: got {back}");
        }
    }

    #[test]
    fn from_emu_with_zero_reference_is_zero() {
        let engine = UnitEngine::new();
        let ctx = ViewportContext::new(0.0, 0.0).unwrap();
        assert_eq!(engine.from_emu(Emu(9525), UnitKind::ViewportWidth, &ctx, Axis::X), 0.0);
        assert_eq!(engine.from_emu(Emu(9525), UnitKind::Percent, &ctx, Axis::Y), 0.0);
    }

    #[test]
    fn cache_does_not_change_results() {
        let cached = UnitEngine::new();
        let uncached = UnitEngine::with_cache_capacity(0);
        let ctx = ViewportContext::default();
        for s in ["10px", "1in", "50%", "bad", "10px", "2.5em", "1in"] {
            assert_eq!(
                cached.to_emu(s.into(), &ctx, Axis::Y),
                uncached.to_emu(s.into(), &ctx, Axis::Y)
            );
        }
    }

    #[test]
    fn tiny_cache_evicts_without_affecting_output() {
        let engine = UnitEngine::with_cache_capacity(2);
        let ctx = ViewportContext::default();
        for _ in 0..3 {
            assert_eq!(engine.to_emu("1in".into(), &ctx, Axis::X), 914400);
            assert_eq!(engine.to_emu("1pt".into(), &ctx, Axis::X), 12700);
            assert_eq!(engine.to_emu("1mm".into(), &ctx, Axis::X), 36000);
        }
    }
}
