//! Viewport mapping: viewBox user space → EMU

use glam::{DAffine2, DVec2, dvec2};

use crate::defaults;
use crate::types::{Axis, Emu};

use super::viewbox::{AspectAlign, MeetOrSlice, ViewBoxInfo};

/// Target viewport size, already in EMU.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct ViewportDimensions {
    pub width: i64,
    pub height: i64,
}

impl ViewportDimensions {
    /// 10in × 7.5in slide
    pub const SLIDE_4_3: ViewportDimensions = ViewportDimensions {
        width: defaults::SLIDE_WIDTH_EMU,
        height: defaults::SLIDE_HEIGHT_EMU,
    };
    /// 13.333in × 7.5in slide
    pub const SLIDE_16_9: ViewportDimensions = ViewportDimensions {
        width: defaults::WIDE_SLIDE_WIDTH_EMU,
        height: defaults::SLIDE_HEIGHT_EMU,
    };

    /// Negative sizes clamp to zero.
    pub fn new(width: i64, height: i64) -> Self {
        ViewportDimensions {
            width: width.max(0),
            height: height.max(0),
        }
    }

    pub fn from_emu(width: Emu, height: Emu) -> Self {
        Self::new(width.raw(), height.raw())
    }

    fn size(&self) -> DVec2 {
        dvec2(self.width as f64, self.height as f64)
    }
}

/// The single affine mapping from viewBox user space into the viewport.
///
/// `scale_x == scale_y` unless the alignment is `None`, and both are
/// strictly positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportMapping {
    pub scale_x: f64,
    pub scale_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub viewport_width: i64,
    pub viewport_height: i64,
    pub content_width: i64,
    pub content_height: i64,
    pub clip_needed: bool,
    pub clip_x: f64,
    pub clip_y: f64,
    pub clip_width: f64,
    pub clip_height: f64,
}

impl ViewportMapping {
    /// Identity mapping over the given viewport.
    pub fn identity(viewport: ViewportDimensions) -> Self {
        ViewportMapping {
            scale_x: 1.0,
            scale_y: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            viewport_width: viewport.width,
            viewport_height: viewport.height,
            content_width: viewport.width,
            content_height: viewport.height,
            clip_needed: false,
            clip_x: 0.0,
            clip_y: 0.0,
            clip_width: 0.0,
            clip_height: 0.0,
        }
    }

    pub fn scale(&self) -> DVec2 {
        dvec2(self.scale_x, self.scale_y)
    }

    pub fn translate(&self) -> DVec2 {
        dvec2(self.translate_x, self.translate_y)
    }

    /// Map a user-space point without rounding.
    pub fn map_point(&self, point: DVec2) -> DVec2 {
        point * self.scale() + self.translate()
    }

    /// Map a user-space point to integer EMU.
    pub fn svg_to_emu(&self, x: f64, y: f64) -> (Emu, Emu) {
        let p = self.map_point(dvec2(x, y));
        (Emu::from_f64(p.x), Emu::from_f64(p.y))
    }

    /// Scale a user-space length (no translation) to integer EMU.
    pub fn svg_length_to_emu(&self, length: f64, axis: Axis) -> Emu {
        let scale = match axis {
            Axis::X => self.scale_x,
            Axis::Y => self.scale_y,
        };
        Emu::from_f64(length * scale)
    }

    pub fn to_affine(&self) -> DAffine2 {
        DAffine2::from_translation(self.translate()) * DAffine2::from_scale(self.scale())
    }

    /// Combine with an element's own transform: the element transform is
    /// applied first, the viewport mapping second.
    pub fn compose(&self, element: DAffine2) -> DAffine2 {
        self.to_affine() * element
    }
}

/// Compute the mapping for a viewBox placed into a viewport.
///
/// A missing or invalid viewBox yields the identity mapping.
pub fn calculate_viewport_mapping(
    viewbox: Option<&ViewBoxInfo>,
    viewport: ViewportDimensions,
    align: AspectAlign,
    meet_or_slice: MeetOrSlice,
) -> ViewportMapping {
    let Some(vb) = viewbox.filter(|vb| vb.is_valid()) else {
        return ViewportMapping::identity(viewport);
    };

    let size = viewport.size();
    let sx = size.x / vb.width;
    let sy = size.y / vb.height;
    let origin = dvec2(vb.min_x, vb.min_y);

    let Some((fx, fy)) = align.factors() else {
        if !usable_scale(sx) || !usable_scale(sy) {
            crate::log::warn!(sx, sy, "degenerate viewport scale, using identity mapping");
            return ViewportMapping::identity(viewport);
        }
        let scale = dvec2(sx, sy);
        let translate = -origin * scale;
        return ViewportMapping {
            scale_x: sx,
            scale_y: sy,
            translate_x: translate.x,
            translate_y: translate.y,
            content_width: viewport.width,
            content_height: viewport.height,
            ..ViewportMapping::identity(viewport)
        };
    };

    let uniform = match meet_or_slice {
        MeetOrSlice::Meet => sx.min(sy),
        MeetOrSlice::Slice => sx.max(sy),
    };
    if !usable_scale(uniform) {
        crate::log::warn!(uniform, "degenerate viewport scale, using identity mapping");
        return ViewportMapping::identity(viewport);
    }

    let content_width = (vb.width * uniform).round() as i64;
    let content_height = (vb.height * uniform).round() as i64;
    let content = dvec2(content_width as f64, content_height as f64);
    let offset = (size - content) * dvec2(fx, fy);
    let translate = -origin * uniform + offset;

    let clip_needed = meet_or_slice == MeetOrSlice::Slice
        && (content_width > viewport.width || content_height > viewport.height);

    let mut mapping = ViewportMapping {
        scale_x: uniform,
        scale_y: uniform,
        translate_x: translate.x,
        translate_y: translate.y,
        content_width,
        content_height,
        clip_needed,
        ..ViewportMapping::identity(viewport)
    };
    if clip_needed {
        mapping.clip_width = size.x;
        mapping.clip_height = size.y;
    }
    mapping
}

fn usable_scale(scale: f64) -> bool {
    scale.is_finite() && scale > 0.0
}
