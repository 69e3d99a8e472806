//! Batch and vectorized fractional conversion.
//!
//! Items are isolated: a bad coordinate turns into its own fallback value and
//! never aborts the rest. Only a container that breaks the calling contract
//! (more than `MAX_BATCH_SIZE` entries) is rejected as a whole.

use std::collections::BTreeMap;

use glam::DVec2;

use crate::defaults;
use crate::errors::CoordinateError;
use crate::types::{Axis, LengthInput};
use crate::units::{axis_for_key, ViewportContext};

use super::PrecisionEngine;

fn check_batch_size(len: usize) -> Result<(), CoordinateError> {
    if len > defaults::MAX_BATCH_SIZE {
        return Err(CoordinateError::validation(format!(
            "batch of {len} coordinates exceeds the limit of {}",
            defaults::MAX_BATCH_SIZE
        )));
    }
    Ok(())
}

impl PrecisionEngine {
    /// Convert named lengths, inferring each axis from its key.
    pub fn try_batch_to_fractional_emu<'a, I, K, V>(
        &self,
        values: I,
        ctx: Option<&ViewportContext>,
        preserve_precision: bool,
    ) -> Result<BTreeMap<String, f64>, CoordinateError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<LengthInput<'a>>,
    {
        let items: Vec<(String, LengthInput<'a>)> = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        check_batch_size(items.len())?;

        let convert = |(key, value): (String, LengthInput<'a>)| {
            let emu = self.to_fractional_emu(value, ctx, axis_for_key(&key), preserve_precision);
            (key, emu)
        };

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            Ok(items.into_par_iter().map(convert).collect())
        }

        #[cfg(not(feature = "parallel"))]
        {
            Ok(items.into_iter().map(convert).collect())
        }
    }

    /// Convert a slice of lengths that all share one axis.
    pub fn try_convert_coordinates(
        &self,
        values: &[LengthInput<'_>],
        ctx: Option<&ViewportContext>,
        axis: Axis,
        preserve_precision: bool,
    ) -> Result<Vec<f64>, CoordinateError> {
        check_batch_size(values.len())?;

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            Ok(values
                .par_iter()
                .map(|v| self.to_fractional_emu(*v, ctx, axis, preserve_precision))
                .collect())
        }

        #[cfg(not(feature = "parallel"))]
        {
            Ok(values
                .iter()
                .map(|v| self.to_fractional_emu(*v, ctx, axis, preserve_precision))
                .collect())
        }
    }

    /// Convert pixel-space points (x on the horizontal axis, y on the
    /// vertical one) into fractional EMU points.
    pub fn try_convert_points(
        &self,
        points: &[DVec2],
        ctx: Option<&ViewportContext>,
        preserve_precision: bool,
    ) -> Result<Vec<DVec2>, CoordinateError> {
        check_batch_size(points.len())?;
        Ok(points
            .iter()
            .map(|p| {
                let x = self.to_fractional_emu(p.x.into(), ctx, Axis::X, preserve_precision);
                let y = self.to_fractional_emu(p.y.into(), ctx, Axis::Y, preserve_precision);
                DVec2::new(x, y)
            })
            .collect())
    }
}
