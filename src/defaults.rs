//! Unit constants and default settings

pub const EMU_PER_INCH: f64 = 914_400.0;
pub const EMU_PER_POINT: f64 = 12_700.0;
pub const EMU_PER_MM: f64 = 36_000.0;
pub const EMU_PER_CM: f64 = 360_000.0;
/// One CSS pixel at `DEFAULT_DPI`
pub const EMU_PER_PIXEL: f64 = 9_525.0;

pub const POINTS_PER_INCH: f64 = 72.0;
pub const MM_PER_INCH: f64 = 25.4;
pub const CM_PER_INCH: f64 = 2.54;

pub const DEFAULT_DPI: f64 = 96.0;
pub const PRINT_DPI: f64 = 72.0;
pub const HIGH_DPI: f64 = 150.0;

pub const VIEWPORT_WIDTH: f64 = 800.0;
pub const VIEWPORT_HEIGHT: f64 = 600.0;
pub const FONT_SIZE: f64 = 16.0;
pub const X_HEIGHT_RATIO: f64 = 0.5;

/// Fixed local coordinate space of a DrawingML shape
pub const DRAWINGML_COORD_SPACE: f64 = 21_600.0;

/// 10in × 7.5in slide
pub const SLIDE_WIDTH_EMU: i64 = 9_144_000;
pub const SLIDE_HEIGHT_EMU: i64 = 6_858_000;
/// 13.333in × 7.5in slide
pub const WIDE_SLIDE_WIDTH_EMU: i64 = 12_192_000;

pub const PARSE_CACHE_CAPACITY: usize = 1000;

// Fractional-precision validation limits
pub const MAX_INPUT_LEN: usize = 100;
pub const MAX_INPUT_MAGNITUDE: f64 = 1e10;
pub const MAX_CONVERTED_MAGNITUDE: f64 = 1e15;
/// 1000 inches
pub const MAX_EMU: f64 = EMU_PER_INCH * 1000.0;
pub const MAX_BATCH_SIZE: usize = 1000;
/// Largest raw value the fallback still treats as a pixel coordinate
pub const FALLBACK_PIXEL_RANGE: f64 = 10_000.0;
pub const MAX_DECIMAL_PLACES: u8 = 3;
pub const PRECISION_THRESHOLD: f64 = 0.001;
