//! Resolve SVG lengths and viewports into OOXML EMU coordinates.
//!
//! ```
//! use svg_emu::{Axis, UnitEngine, ViewportContext};
//!
//! let engine = UnitEngine::new();
//! let ctx = ViewportContext::default();
//! assert_eq!(engine.to_emu("1in".into(), &ctx, Axis::X), 914_400);
//! assert_eq!(engine.to_emu("50%".into(), &ctx, Axis::Y), 2_857_500);
//! ```
//!
//! Lengths go through [`UnitEngine`] (or the stricter [`PrecisionEngine`]),
//! whole `<svg>` viewports through [`ViewportResolver`].

pub mod defaults;
pub mod errors;
pub mod log;
pub mod precision;
pub mod resolver;
pub mod types;
pub mod units;
pub mod viewport;

pub use errors::{ConfigError, ContextError, CoordinateError};
pub use precision::{FractionalCoordinateContext, PrecisionEngine, PrecisionMode};
pub use resolver::{LengthResolver, Resolver};
pub use types::{Axis, Emu, LengthInput, LengthValue, UnitKind};
pub use units::{parse_length, ContextUpdate, UnitEngine, ViewportContext};
pub use viewport::{
    calculate_viewport_mapping, parse_preserve_aspect_ratio, parse_viewbox, AspectAlign, MeetOrSlice,
    ViewBoxInfo, ViewportAttributes, ViewportDimensions, ViewportMapping, ViewportResolver,
};
