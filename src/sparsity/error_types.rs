use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Error type returned by sparsity pattern format checks.
pub enum SparseFormatError {
    /// Pattern dimension fields and/or array lengths are incompatible
    #[error("Pattern dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    /// Column offsets do not start at zero or are not monotone
    #[error("Bad column offset values")]
    BadColind,
    /// Row indices are not strictly increasing within a column
    #[error("Row indices are not strictly increasing within each column")]
    BadRowOrdering,
    /// A row index exceeds the row dimension
    #[error("Row index exceeds the pattern row dimension")]
    BadRowIndex,
}

/// Error type returned by recoverable sparsity pattern operations.
///
/// Violated invariants of the pattern itself are not reported through
/// this type: they are programming errors and panic at the point of
/// construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SparsityError {
    /// An index supplied by the caller is outside `[0, bound)`
    #[error("{context}: index {index} out of range [0,{bound})")]
    OutOfRange {
        context: &'static str,
        index: isize,
        bound: usize,
    },
    /// Shapes of two operands cannot be combined
    #[error("{context}: dimension mismatch, got {}x{} and {}x{}", .lhs.0, .lhs.1, .rhs.0, .rhs.1)]
    DimensionMismatch {
        context: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },
    /// Parallel index arrays differ in length
    #[error("{context}: expected length {expected}, got {got}")]
    IncompatibleLength {
        context: &'static str,
        expected: usize,
        got: usize,
    },
    /// Split offsets are not a monotone partition of the dimension
    #[error("{context}: invalid offsets ({reason})")]
    InvalidOffsets {
        context: &'static str,
        reason: String,
    },
    /// Index vector is not a permutation
    #[error("Invalid permutation vector")]
    InvalidPermutation,
    /// The fill-reducing ordering could not be computed
    #[error("Fill-reducing ordering failed ({0})")]
    Ordering(String),
    /// Malformed compressed column data
    #[error(transparent)]
    Format(#[from] SparseFormatError),
}

impl SparsityError {
    pub(crate) fn out_of_range(context: &'static str, index: isize, bound: usize) -> Self {
        SparsityError::OutOfRange {
            context,
            index,
            bound,
        }
    }

    pub(crate) fn mismatch(
        context: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    ) -> Self {
        SparsityError::DimensionMismatch { context, lhs, rhs }
    }
}
