//! __structsparse__ is a Rust implementation of interned structural sparsity
//! patterns, the substrate on which symbolic matrix algebra and sparse
//! derivative computations are built.
//!
//! A [`Sparsity`] records which entries of an `nrow x ncol` matrix are
//! structurally nonzero, in compressed column form, and never carries
//! numeric values.  Patterns are immutable and interned: constructing a
//! pattern that already exists anywhere in the process returns the same
//! shared instance, so comparing two patterns is usually a single pointer
//! comparison.
//!
//! ## Features
//!
//! * __Structure algebra__: union and intersection with nonzero mappings,
//! products, transposes, permutations, Kronecker products, concatenation,
//! splitting and sub-pattern extraction.
//!
//! * __Graph analysis__: elimination trees, strongly connected components,
//! Dulmage–Mendelsohn block triangular forms, structural rank and AMD
//! fill-reducing orderings.
//!
//! * __Jacobian and Hessian compression__: greedy unidirectional and star
//! colorings configured through [`ColoringSettings`].
//!
//! * __Dependency propagation__: bit-parallel forward and reverse sweeps
//! through structural matrix products and linear solves.
//!
//! __Example usage__ :
//!
//! ```
//! use structsparse::Sparsity;
//!
//! let a = Sparsity::banded(4, 1);
//! let b = Sparsity::diag(4, 4);
//! let c = a.intersect(&b).unwrap();
//! assert!(c.is_same(&b));
//!
//! let colors = a.uni_coloring(None, usize::MAX).unwrap();
//! assert_eq!(colors.ncol(), 3);
//! ```
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

pub mod coloring;
pub mod graph;
pub mod io;
pub mod propagation;
pub mod sparsity;

pub use coloring::{
    ColoringOrdering, ColoringSettings, ColoringSettingsBuilder, ColoringSettingsError,
    ColoringStrategy,
};
pub use graph::BlockTriangularForm;
pub use propagation::{BitVecT, Bvec};
pub use sparsity::{SparseFormatError, Sparsity, SparsityError};
