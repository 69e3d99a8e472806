//! Batch conversion of named lengths

use std::collections::BTreeMap;

use crate::resolver::LengthResolver;
use crate::types::{Axis, Emu, LengthInput};

use super::context::ViewportContext;

/// Attribute names that resolve against the vertical axis.
const VERTICAL_KEYS: [&str; 7] = ["y", "cy", "height", "dy", "y1", "y2", "vh"];

/// Axis a named length resolves against. Matching is case-insensitive.
pub fn axis_for_key(key: &str) -> Axis {
    if VERTICAL_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key)) {
        Axis::Y
    } else {
        Axis::X
    }
}

/// Resolve many named lengths against one context.
///
/// Each entry goes through the resolver's scalar `to_emu`, so the result for
/// every key is exactly what a single call would produce.
pub fn batch_convert<'a, R, I, K, V>(resolver: &R, values: I, ctx: &ViewportContext) -> BTreeMap<String, Emu>
where
    R: LengthResolver + Sync + ?Sized,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<LengthInput<'a>>,
{
    let items: Vec<(String, LengthInput<'a>)> = values
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();

    crate::log::debug!(count = items.len(), "batch_convert");

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        items
            .into_par_iter()
            .map(|(key, value)| {
                let emu = resolver.to_emu(value, ctx, axis_for_key(&key));
                (key, emu)
            })
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        items
            .into_iter()
            .map(|(key, value)| {
                let emu = resolver.to_emu(value, ctx, axis_for_key(&key));
                (key, emu)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::UnitEngine;

    #[test]
    fn vertical_keys() {
        for key in ["y", "cy", "height", "dy", "y1", "y2", "vh", "Y", "CY", "Height"] {
            assert_eq!(axis_for_key(key), Axis::Y, "{key}");
        }
        for key in ["x", "cx", "width", "r", "rx", "ry", "x1", "font-size", "yy", ""] {
            assert_eq!(axis_for_key(key), Axis::X, "{key}");
        }
    }

    #[test]
    fn pixels_at_96_dpi() {
        let engine = UnitEngine::new();
        let ctx = ViewportContext::default().with_dpi(96.0).unwrap();
        let result = batch_convert(&engine, [("x", "10px"), ("y", "20px")], &ctx);
        assert_eq!(result["x"], 95250);
        assert_eq!(result["y"], 190500);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn percent_keys_pick_their_axis() {
        let engine = UnitEngine::new();
        let ctx = ViewportContext::default();
        let result = engine.batch_convert([("width", "50%"), ("height", "50%")], &ctx);
        assert_eq!(result["width"], 400 * 9525);
        assert_eq!(result["height"], 300 * 9525);
    }

    #[test]
    fn empty_batch() {
        let engine = UnitEngine::new();
        let values: Vec<(String, f64)> = Vec::new();
        assert!(engine.batch_convert(values, &ViewportContext::default()).is_empty());
    }
}
