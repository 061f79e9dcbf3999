//! Interchange formats and diagnostic output for sparsity patterns.
//!
//! The single-array compressed format `[nrow, ncol, colind.., row..]`
//! is the persisted representation of a pattern.  With the `serde`
//! feature the same data is available as checked JSON.

mod compressed;
mod scatter;
mod spy;

#[cfg(feature = "serde")]
mod json;

#[cfg(feature = "serde")]
pub use json::*;
