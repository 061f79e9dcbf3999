//! Graph algorithms on sparsity patterns.
//!
//! A pattern is read as a directed graph on its columns (square case) or
//! as a bipartite graph between rows and columns.  None of these routines
//! re-validate the pattern; see [`Sparsity::check_format`].
//!
//! [`Sparsity::check_format`]: crate::Sparsity::check_format

mod dfs;
mod dmperm;
mod etree;
mod ordering;

pub use dmperm::BlockTriangularForm;
pub use etree::{postorder, NO_PARENT};
