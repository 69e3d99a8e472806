//! Viewport context - the values relative units resolve against

use crate::defaults;
use crate::errors::ContextError;

/// Immutable bundle of everything context-dependent units need.
///
/// A context is built once per conversion scope. Entering a nested viewport
/// or changing the font size derives a new context instead of mutating this
/// one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportContext {
    width: f64,
    height: f64,
    font_size: f64,
    x_height: f64,
    dpi: f64,
    parent_width: Option<f64>,
    parent_height: Option<f64>,
}

/// Field overrides for `ViewportContext::with_updates`.
///
/// `None` keeps the current value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContextUpdate {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub font_size: Option<f64>,
    pub x_height: Option<f64>,
    pub dpi: Option<f64>,
    pub parent_width: Option<f64>,
    pub parent_height: Option<f64>,
}

impl Default for ViewportContext {
    fn default() -> Self {
        Self {
            width: defaults::VIEWPORT_WIDTH,
            height: defaults::VIEWPORT_HEIGHT,
            font_size: defaults::FONT_SIZE,
            x_height: defaults::FONT_SIZE * defaults::X_HEIGHT_RATIO,
            dpi: defaults::DEFAULT_DPI,
            parent_width: None,
            parent_height: None,
        }
    }
}

impl ViewportContext {
    /// Default context with the given viewport size in pixels.
    pub fn new(width: f64, height: f64) -> Result<Self, ContextError> {
        Self::default().with_updates(ContextUpdate {
            width: Some(width),
            height: Some(height),
            ..ContextUpdate::default()
        })
    }

    pub fn width(&self) -> f64 { self.width }
    pub fn height(&self) -> f64 { self.height }
    pub fn font_size(&self) -> f64 { self.font_size }
    pub fn x_height(&self) -> f64 { self.x_height }
    pub fn dpi(&self) -> f64 { self.dpi }
    pub fn parent_width(&self) -> Option<f64> { self.parent_width }
    pub fn parent_height(&self) -> Option<f64> { self.parent_height }

    /// Reference width for percentages: the parent's when known.
    pub fn percent_base_width(&self) -> f64 {
        self.parent_width.unwrap_or(self.width)
    }

    /// Reference height for percentages: the parent's when known.
    pub fn percent_base_height(&self) -> f64 {
        self.parent_height.unwrap_or(self.height)
    }

    /// EMU per pixel at this context's DPI.
    pub fn emu_per_pixel(&self) -> f64 {
        defaults::EMU_PER_INCH / self.dpi
    }

    /// Derive a new context with some fields replaced.
    ///
    /// Changing `font_size` without an explicit `x_height` resets the
    /// x-height to half the new font size.
    pub fn with_updates(&self, update: ContextUpdate) -> Result<Self, ContextError> {
        let font_size = update.font_size.unwrap_or(self.font_size);
        let x_height = match (update.x_height, update.font_size) {
            (Some(x), _) => x,
            (None, Some(fs)) => fs * defaults::X_HEIGHT_RATIO,
            (None, None) => self.x_height,
        };

        let ctx = Self {
            width: update.width.unwrap_or(self.width),
            height: update.height.unwrap_or(self.height),
            font_size,
            x_height,
            dpi: update.dpi.unwrap_or(self.dpi),
            parent_width: update.parent_width.or(self.parent_width),
            parent_height: update.parent_height.or(self.parent_height),
        };
        ctx.validate()?;
        Ok(ctx)
    }

    pub fn with_dpi(&self, dpi: f64) -> Result<Self, ContextError> {
        self.with_updates(ContextUpdate {
            dpi: Some(dpi),
            ..ContextUpdate::default()
        })
    }

    pub fn with_font_size(&self, font_size: f64) -> Result<Self, ContextError> {
        self.with_updates(ContextUpdate {
            font_size: Some(font_size),
            ..ContextUpdate::default()
        })
    }

    pub fn with_parent(&self, parent_width: f64, parent_height: f64) -> Result<Self, ContextError> {
        self.with_updates(ContextUpdate {
            parent_width: Some(parent_width),
            parent_height: Some(parent_height),
            ..ContextUpdate::default()
        })
    }

    /// Context for content inside a nested viewport of the given size.
    ///
    /// The current viewport becomes the percentage reference of the new one.
    pub fn for_nested_viewport(&self, width: f64, height: f64) -> Result<Self, ContextError> {
        self.with_updates(ContextUpdate {
            width: Some(width),
            height: Some(height),
            parent_width: Some(self.width),
            parent_height: Some(self.height),
            ..ContextUpdate::default()
        })
    }

    fn validate(&self) -> Result<(), ContextError> {
        let fields = [
            ("width", Some(self.width)),
            ("height", Some(self.height)),
            ("font_size", Some(self.font_size)),
            ("x_height", Some(self.x_height)),
            ("parent_width", self.parent_width),
            ("parent_height", self.parent_height),
        ];
        for (field, value) in fields {
            let Some(value) = value else { continue };
            if !value.is_finite() {
                return Err(ContextError::NotFinite { field });
            }
            if value < 0.0 {
                return Err(ContextError::Negative { field, value });
            }
        }

        if !self.dpi.is_finite() {
            return Err(ContextError::NotFinite { field: "dpi" });
        }
        if self.dpi <= 0.0 {
            return Err(ContextError::NonPositiveDpi { value: self.dpi });
        }
        Ok(())
    }
}
