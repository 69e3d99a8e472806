//! DrawingML local coordinates (the fixed 21600 × 21600 shape space)

use crate::defaults::DRAWINGML_COORD_SPACE;

use super::{round_half_up, PrecisionEngine};

impl PrecisionEngine {
    /// Map a point inside a viewport onto DrawingML's local shape space,
    /// scaled by the precision factor.
    ///
    /// A degenerate viewport maps everything to the origin. Results are
    /// clamped to `[0, 21600 * factor]`.
    pub fn to_precise_drawingml_coords(
        &self,
        x: f64,
        y: f64,
        viewport_width: f64,
        viewport_height: f64,
    ) -> (f64, f64) {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(viewport_width) || !usable(viewport_height) {
            crate::log::warn!(viewport_width, viewport_height, "degenerate viewport for DrawingML coordinates");
            return (0.0, 0.0);
        }

        let space = DRAWINGML_COORD_SPACE * self.precision_factor();
        let places = self.context().max_decimal_places;
        let map = |v: f64, extent: f64| {
            let mapped = v / extent * space;
            if !mapped.is_finite() {
                return 0.0;
            }
            round_half_up(mapped.clamp(0.0, space), places)
        };
        (map(x, viewport_width), map(y, viewport_height))
    }
}
