//! Logging shims for the figure pipeline.
//!
//! The pipeline only logs degradations (missed text lookups, skipped labels,
//! saved paths), all behind the `tracing` cargo feature. With the feature on,
//! `debug!` and `warn!` are the `tracing` macros; with it off they swallow
//! their arguments unevaluated, so call sites stay unconditional.

#[cfg(feature = "tracing")]
pub use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, warn};
