//! Viewport resolution: `viewBox`, `preserveAspectRatio` and the mapping
//! from SVG user space into an EMU viewport.

pub mod mapping;
pub mod viewbox;

use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;

use crate::defaults;
use crate::types::{Axis, LengthInput};
use crate::units::{UnitEngine, ViewportContext};

pub use mapping::{calculate_viewport_mapping, ViewportDimensions, ViewportMapping};
pub use viewbox::{parse_preserve_aspect_ratio, parse_viewbox, AspectAlign, MeetOrSlice, ViewBoxInfo};

/// Raw viewport attributes of an `<svg>` (or other viewport-establishing)
/// element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewportAttributes<'a> {
    pub width: Option<&'a str>,
    pub height: Option<&'a str>,
    pub view_box: Option<&'a str>,
    pub preserve_aspect_ratio: Option<&'a str>,
}

/// Turns viewport attributes into a `ViewportMapping`.
pub struct ViewportResolver {
    engine: UnitEngine,
    cache: Mutex<LruCache<String, Option<ViewBoxInfo>>>,
}

impl Default for ViewportResolver {
    fn default() -> Self {
        Self::new(UnitEngine::new())
    }
}

impl std::fmt::Debug for ViewportResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportResolver")
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

impl ViewportResolver {
    pub fn new(engine: UnitEngine) -> Self {
        let capacity = NonZeroUsize::new(defaults::PARSE_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self {
            engine,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn engine(&self) -> &UnitEngine {
        &self.engine
    }

    /// `parse_viewbox`, memoized per attribute string.
    pub fn parse_viewbox(&self, value: &str) -> Option<ViewBoxInfo> {
        let Ok(mut cache) = self.cache.lock() else {
            return parse_viewbox(value);
        };
        if let Some(hit) = cache.get(value) {
            return *hit;
        }
        let parsed = parse_viewbox(value);
        cache.put(value.to_string(), parsed);
        parsed
    }

    pub fn calculate_viewport_mapping(
        &self,
        viewbox: Option<&ViewBoxInfo>,
        viewport: ViewportDimensions,
        align: AspectAlign,
        meet_or_slice: MeetOrSlice,
    ) -> ViewportMapping {
        calculate_viewport_mapping(viewbox, viewport, align, meet_or_slice)
    }

    /// Mapping for an element's viewport.
    ///
    /// The target is `viewport` when given, otherwise the element's declared
    /// `width`/`height` converted to EMU in `ctx` (absent sizes are `100%`).
    pub fn resolve(
        &self,
        attrs: &ViewportAttributes<'_>,
        viewport: Option<ViewportDimensions>,
        ctx: &ViewportContext,
    ) -> ViewportMapping {
        let viewport = viewport.unwrap_or_else(|| {
            let width = self.engine.to_emu(declared(attrs.width), ctx, Axis::X);
            let height = self.engine.to_emu(declared(attrs.height), ctx, Axis::Y);
            ViewportDimensions::from_emu(width, height)
        });

        let viewbox = attrs.view_box.and_then(|vb| self.parse_viewbox(vb));
        let (align, meet_or_slice) = parse_preserve_aspect_ratio(attrs.preserve_aspect_ratio);
        crate::log::trace!(?viewbox, ?align, ?meet_or_slice, ?viewport, "resolving viewport");

        calculate_viewport_mapping(viewbox.as_ref(), viewport, align, meet_or_slice)
    }

    /// Context for the children of a nested viewport element.
    ///
    /// The new viewport is the viewBox size when there is one, otherwise the
    /// declared size in pixels; `ctx` becomes its percentage reference.
    pub fn nested_context(&self, attrs: &ViewportAttributes<'_>, ctx: &ViewportContext) -> ViewportContext {
        let (width, height) = match attrs.view_box.and_then(|vb| self.parse_viewbox(vb)) {
            Some(vb) => (vb.width, vb.height),
            None => (
                self.engine.to_pixels(declared(attrs.width), ctx, Axis::X).max(0.0),
                self.engine.to_pixels(declared(attrs.height), ctx, Axis::Y).max(0.0),
            ),
        };

        match ctx.for_nested_viewport(width, height) {
            Ok(nested) => nested,
            Err(err) => {
                crate::log::warn!(%err, "nested viewport rejected, keeping the outer context");
                *ctx
            }
        }
    }
}

fn declared(value: Option<&str>) -> LengthInput<'_> {
    LengthInput::Text(value.unwrap_or("100%"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Emu;

    #[test]
    fn explicit_viewport_wins() {
        let r = ViewportResolver::default();
        let attrs = ViewportAttributes {
            width: Some("10in"),
            height: Some("10in"),
            view_box: Some("0 0 200 100"),
            preserve_aspect_ratio: None,
        };
        let m = r.resolve(&attrs, Some(ViewportDimensions::new(400, 400)), &ViewportContext::default());
        assert_eq!(m.scale_x, 2.0);
        assert_eq!(m.translate_y, 100.0);
        assert_eq!((m.viewport_width, m.viewport_height), (400, 400));
    }

    #[test]
    fn declared_size_becomes_viewport() {
        let r = ViewportResolver::default();
        let attrs = ViewportAttributes {
            width: Some("1in"),
            height: Some("0.5in"),
            view_box: Some("0 0 100 50"),
            preserve_aspect_ratio: Some("xMinYMin"),
        };
        let m = r.resolve(&attrs, None, &ViewportContext::default());
        assert_eq!((m.viewport_width, m.viewport_height), (914400, 457200));
        assert_eq!(m.scale_x, 9144.0);
        assert_eq!(m.svg_to_emu(100.0, 50.0), (Emu(914400), Emu(457200)));
    }

    #[test]
    fn absent_size_is_full_viewport() {
        let r = ViewportResolver::default();
        let m = r.resolve(&ViewportAttributes::default(), None, &ViewportContext::default());
        // 800 × 600 px at 96 DPI
        assert_eq!((m.viewport_width, m.viewport_height), (7_620_000, 5_715_000));
        assert_eq!(m, ViewportMapping::identity(ViewportDimensions::new(7_620_000, 5_715_000)));
    }

    #[test]
    fn bad_viewbox_is_identity() {
        let r = ViewportResolver::default();
        let attrs = ViewportAttributes {
            view_box: Some("0 0 -1 10"),
            ..ViewportAttributes::default()
        };
        let vp = ViewportDimensions::SLIDE_16_9;
        assert_eq!(r.resolve(&attrs, Some(vp), &ViewportContext::default()), ViewportMapping::identity(vp));
    }

    #[test]
    fn cached_viewbox_matches_uncached() {
        let r = ViewportResolver::default();
        for _ in 0..3 {
            assert_eq!(r.parse_viewbox("0,0,640,480"), parse_viewbox("0,0,640,480"));
            assert_eq!(r.parse_viewbox("nope"), None);
        }
    }

    #[test]
    fn nested_context_uses_viewbox_size() {
        let r = ViewportResolver::default();
        let outer = ViewportContext::default();
        let attrs = ViewportAttributes {
            width: Some("50%"),
            view_box: Some("0 0 320 240"),
            ..ViewportAttributes::default()
        };
        let inner = r.nested_context(&attrs, &outer);
        assert_eq!((inner.width(), inner.height()), (320.0, 240.0));
        assert_eq!(inner.parent_width(), Some(800.0));
        assert_eq!(inner.parent_height(), Some(600.0));
    }

    #[test]
    fn nested_context_uses_declared_size() {
        let r = ViewportResolver::default();
        let outer = ViewportContext::default();
        let attrs = ViewportAttributes {
            width: Some("50%"),
            height: Some("-20px"),
            ..ViewportAttributes::default()
        };
        let inner = r.nested_context(&attrs, &outer);
        assert_eq!((inner.width(), inner.height()), (400.0, 0.0));
        assert_eq!(inner.font_size(), outer.font_size());
    }
}
