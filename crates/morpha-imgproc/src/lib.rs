#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
/// border handling for N-dimensional filters.
pub mod border;

/// regional maxima and minima detection.
pub mod extrema;

/// grey morphology on N-dimensional arrays.
pub mod morphology;

/// grayscale rendering of 2D arrays for display.
pub mod render;
