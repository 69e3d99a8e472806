//! Logging shims.
//!
//! With the `tracing` feature these are the `tracing` macros, so fallbacks and
//! clamps show up in whatever subscriber the host application installs.
//! Without it they expand to nothing and the arguments are never evaluated.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __svg_emu_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __svg_emu_trace {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __svg_emu_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{
    __svg_emu_debug as debug, __svg_emu_trace as trace, __svg_emu_warn as warn,
};
