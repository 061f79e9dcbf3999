//! Interned structural sparsity patterns.
//!
//! A [`Sparsity`] describes which entries of an `nrow x ncol` matrix are
//! structurally nonzero, in compressed column form.  Patterns are
//! immutable and interned in a process-wide store: structurally equal
//! patterns are always the same shared instance.  Operations that appear
//! to modify a pattern rebind the handle to another interned instance.

mod block_concatenate;
mod cache;
mod combine;
mod constructors;
mod core;
mod error_types;
mod indexing;
mod slicing;
mod transform;
pub(crate) mod utils;

pub use self::core::*;
pub use cache::cached_pattern_count;
pub use combine::{MAP_DROPPED, MAP_IN_X, MAP_IN_Y};
pub use error_types::*;
pub use transform::invperm;
