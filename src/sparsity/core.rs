use super::cache;
use super::SparseFormatError;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Immutable structural sparsity pattern in Compressed Sparse Column (CSC) format
///
/// A `Sparsity` is a cheap, clonable handle to an interned pattern.  Two
/// handles describing the same structure always point at the same shared
/// instance, so equality tests are usually a single pointer comparison.
///
/// __Example usage__ : To construct the pattern of the 3 x 3 matrix
/// ```text
/// A = [x  x  x]
///     [x  ⋅  x]
///     [⋅  x  x]
/// ```
///
/// ```
/// use structsparse::Sparsity;
///
/// let A = Sparsity::new(
///    3,                         // nrow
///    3,                         // ncol
///    vec![0, 2, 4, 7],          // colind
///    vec![0, 1, 0, 2, 0, 1, 2], // row
///  );
///
/// assert_eq!(A.nnz(), 7);
/// assert!(A.is_same(&Sparsity::new(3, 3, vec![0, 2, 4, 7], vec![0, 1, 0, 2, 0, 1, 2])));
/// ```
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "crate::io::SparsityRaw", into = "crate::io::SparsityRaw")
)]
pub struct Sparsity {
    pub(crate) inner: Arc<SparsityData>,
}

/// Shared storage behind a [`Sparsity`] handle.
#[derive(Debug)]
pub struct SparsityData {
    pub(crate) nrow: usize,
    pub(crate) ncol: usize,
    pub(crate) colind: Vec<usize>,
    pub(crate) row: Vec<usize>,
    pub(crate) hash: u64,
}

impl SparsityData {
    pub(crate) fn matches(&self, nrow: usize, ncol: usize, colind: &[usize], row: &[usize]) -> bool {
        self.nrow == nrow && self.ncol == ncol && self.colind == colind && self.row == row
    }
}

/// Check that compressed column data describes a valid pattern.
pub fn check_format(
    nrow: usize,
    ncol: usize,
    colind: &[usize],
    row: &[usize],
) -> Result<(), SparseFormatError> {
    if colind.len() != ncol + 1 || colind[ncol] != row.len() {
        return Err(SparseFormatError::IncompatibleDimension);
    }

    //check for colind monotonicity
    if colind[0] != 0 || colind.windows(2).any(|c| c[0] > c[1]) {
        return Err(SparseFormatError::BadColind);
    }

    //check for row monotonicity within each column
    if !rows_sequential(colind, row, true) {
        return Err(SparseFormatError::BadRowOrdering);
    }

    //check for row values out of bounds
    if !row.iter().all(|r| r < &nrow) {
        return Err(SparseFormatError::BadRowIndex);
    }

    Ok(())
}

/// true if the row indices of every column are sorted.  With `strictly`
/// set, repeated row indices within a column are rejected as well.
///
/// `colind` must be a valid offset array into `row`.
pub fn rows_sequential(colind: &[usize], row: &[usize], strictly: bool) -> bool {
    colind.windows(2).all(|c| {
        row[c[0]..c[1]]
            .windows(2)
            .all(|r| r[0] < r[1] || (!strictly && r[0] == r[1]))
    })
}

impl Sparsity {
    /// `Sparsity` constructor.
    ///
    /// # Panics
    /// Panics if the compressed column data is malformed.  Use
    /// [`Sparsity::try_new`] for data from an untrusted source.
    pub fn new(nrow: usize, ncol: usize, colind: Vec<usize>, row: Vec<usize>) -> Self {
        if let Err(e) = check_format(nrow, ncol, &colind, &row) {
            panic!("Sparsity::new: {} ({}x{} pattern)", e, nrow, ncol);
        }
        Self::intern(nrow, ncol, colind, row)
    }

    /// Fallible `Sparsity` constructor.
    pub fn try_new(
        nrow: usize,
        ncol: usize,
        colind: Vec<usize>,
        row: Vec<usize>,
    ) -> Result<Self, SparseFormatError> {
        check_format(nrow, ncol, &colind, &row)?;
        Ok(Self::intern(nrow, ncol, colind, row))
    }

    /// Construct from borrowed compressed column arrays.
    ///
    /// Fully dense data is routed to [`Sparsity::dense`] without
    /// inspecting the row indices.
    ///
    /// # Panics
    /// Panics if the compressed column data is malformed.
    pub fn from_raw(nrow: usize, ncol: usize, colind: &[usize], row: &[usize]) -> Self {
        assert_eq!(colind.len(), ncol + 1, "Sparsity::from_raw: colind length");
        if nrow.checked_mul(ncol) == Some(colind[ncol]) {
            return Self::dense(nrow, ncol);
        }
        Self::new(nrow, ncol, colind.to_vec(), row.to_vec())
    }

    // Interning entry point for data known to be valid.
    pub(crate) fn intern(nrow: usize, ncol: usize, colind: Vec<usize>, row: Vec<usize>) -> Self {
        debug_assert!(check_format(nrow, ncol, &colind, &row).is_ok());
        cache::intern(nrow, ncol, colind, row)
    }

    /// Re-check the pattern invariants.
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        check_format(self.nrow(), self.ncol(), self.colind(), self.row())
    }

    /// number of rows
    pub fn nrow(&self) -> usize {
        self.inner.nrow
    }

    /// number of columns
    pub fn ncol(&self) -> usize {
        self.inner.ncol
    }

    /// number of rows, alias of [`Sparsity::nrow`]
    pub fn size1(&self) -> usize {
        self.inner.nrow
    }

    /// number of columns, alias of [`Sparsity::ncol`]
    pub fn size2(&self) -> usize {
        self.inner.ncol
    }

    /// `(nrow, ncol)`
    pub fn size(&self) -> (usize, usize) {
        (self.nrow(), self.ncol())
    }

    /// number of elements, structural zeros included
    pub fn numel(&self) -> usize {
        self.nrow() * self.ncol()
    }

    /// number of structural nonzeros
    pub fn nnz(&self) -> usize {
        self.inner.colind[self.inner.ncol]
    }

    /// column offsets, length `ncol+1`
    pub fn colind(&self) -> &[usize] {
        &self.inner.colind
    }

    /// row indices, length `nnz`
    pub fn row(&self) -> &[usize] {
        &self.inner.row
    }

    /// structural hash of the pattern
    pub fn hash_value(&self) -> u64 {
        self.inner.hash
    }

    /// true if both handles refer to the same interned instance
    pub fn is_same(&self, other: &Sparsity) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// structural comparison against raw compressed column data
    pub fn is_equal(&self, nrow: usize, ncol: usize, colind: &[usize], row: &[usize]) -> bool {
        self.inner.matches(nrow, ncol, colind, row)
    }

    //-------------------------------------------
    // shape queries
    //-------------------------------------------

    /// Empty in at least one dimension, or in both if `both` is set.
    pub fn is_empty(&self, both: bool) -> bool {
        if both {
            self.nrow() == 0 && self.ncol() == 0
        } else {
            self.nrow() == 0 || self.ncol() == 0
        }
    }

    /// 1 x 1, and also structurally nonzero if `scalar_and_dense` is set.
    pub fn is_scalar(&self, scalar_and_dense: bool) -> bool {
        self.nrow() == 1 && self.ncol() == 1 && (!scalar_and_dense || self.nnz() == 1)
    }

    pub fn is_dense(&self) -> bool {
        self.nnz() == self.numel()
    }

    pub fn is_row(&self) -> bool {
        self.nrow() == 1
    }

    pub fn is_column(&self) -> bool {
        self.ncol() == 1
    }

    pub fn is_vector(&self) -> bool {
        self.is_row() || self.is_column()
    }

    pub fn is_square(&self) -> bool {
        self.nrow() == self.ncol()
    }

    /// true if the pattern is exactly the identity pattern
    pub fn is_diag(&self) -> bool {
        if !self.is_square() || self.nnz() != self.ncol() {
            return false;
        }
        let rows_ok = self.row().iter().enumerate().all(|(i, &r)| r == i);
        let cols_ok = self.colind().iter().enumerate().all(|(i, &c)| c == i);
        rows_ok && cols_ok
    }

    /// no entries above the diagonal
    pub fn is_tril(&self) -> bool {
        self.entries().all(|(r, c)| r >= c)
    }

    /// no entries below the diagonal
    pub fn is_triu(&self) -> bool {
        self.entries().all(|(r, c)| r <= c)
    }

    /// Number of entries on or below (strictly below) the diagonal.
    pub fn nnz_lower(&self, strictly: bool) -> usize {
        self.entries()
            .filter(|&(r, c)| if strictly { r > c } else { r >= c })
            .count()
    }

    /// Number of entries on or above (strictly above) the diagonal.
    pub fn nnz_upper(&self, strictly: bool) -> usize {
        self.entries()
            .filter(|&(r, c)| if strictly { r < c } else { r <= c })
            .count()
    }

    pub fn nnz_diag(&self) -> usize {
        self.entries().filter(|&(r, c)| r == c).count()
    }

    /// Largest distance of an entry above the diagonal.
    pub fn bw_upper(&self) -> usize {
        self.entries().map(|(r, c)| c.saturating_sub(r)).max().unwrap_or(0)
    }

    /// Largest distance of an entry below the diagonal.
    pub fn bw_lower(&self) -> usize {
        self.entries().map(|(r, c)| r.saturating_sub(c)).max().unwrap_or(0)
    }

    //-------------------------------------------
    // compressed data accessors
    //-------------------------------------------

    /// Iterator over `(row, col)` of the nonzeros in storage order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let colind = self.colind();
        let row = self.row();
        (0..self.ncol()).flat_map(move |c| (colind[c]..colind[c + 1]).map(move |k| (row[k], c)))
    }

    pub fn get_colind(&self) -> Vec<usize> {
        self.colind().to_vec()
    }

    pub fn get_row(&self) -> Vec<usize> {
        self.row().to_vec()
    }

    /// column index of every nonzero
    pub fn get_col(&self) -> Vec<usize> {
        self.entries().map(|(_, c)| c).collect()
    }

    /// `(colind, row)`
    pub fn get_ccs(&self) -> (Vec<usize>, Vec<usize>) {
        (self.get_colind(), self.get_row())
    }

    /// `(rowind, col)` of the compressed row representation
    pub fn get_crs(&self) -> (Vec<usize>, Vec<usize>) {
        self.t().get_ccs()
    }

    /// `(rows, cols)` of every nonzero in storage order
    pub fn get_triplet(&self) -> (Vec<usize>, Vec<usize>) {
        self.entries().unzip()
    }

    /// `"3x4"`, or `"3x4,5nz"` if `with_nz` is set.
    pub fn dim(&self, with_nz: bool) -> String {
        if with_nz {
            format!("{}x{},{}nz", self.nrow(), self.ncol(), self.nnz())
        } else {
            format!("{}x{}", self.nrow(), self.ncol())
        }
    }
}

impl PartialEq for Sparsity {
    fn eq(&self, other: &Self) -> bool {
        self.is_same(other)
            || (self.inner.hash == other.inner.hash
                && self.is_equal(other.nrow(), other.ncol(), other.colind(), other.row()))
    }
}

impl Eq for Sparsity {}

impl Hash for Sparsity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.inner.hash);
    }
}

impl fmt::Debug for Sparsity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sparsity")
            .field("nrow", &self.nrow())
            .field("ncol", &self.ncol())
            .field("colind", &self.colind())
            .field("row", &self.row())
            .finish()
    }
}

impl fmt::Display for Sparsity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dense = self.is_dense();
        write!(f, "{}", self.dim(!dense))
    }
}

#[test]
fn test_check_format() {
    // [x ⋅ ]
    // [x x ]
    assert!(check_format(2, 2, &[0, 2, 3], &[0, 1, 1]).is_ok());

    assert_eq!(
        check_format(2, 2, &[0, 2], &[0, 1]),
        Err(SparseFormatError::IncompatibleDimension)
    );
    assert_eq!(
        check_format(2, 2, &[0, 2, 3], &[0]),
        Err(SparseFormatError::IncompatibleDimension)
    );
    assert_eq!(
        check_format(2, 2, &[0, 2, 1], &[0]),
        Err(SparseFormatError::BadColind)
    );
    assert_eq!(
        check_format(2, 2, &[1, 2, 2], &[0, 1]),
        Err(SparseFormatError::BadColind)
    );
    assert_eq!(
        check_format(2, 2, &[0, 2, 3], &[1, 0, 1]),
        Err(SparseFormatError::BadRowOrdering)
    );
    assert_eq!(
        check_format(2, 2, &[0, 2, 3], &[0, 1, 2]),
        Err(SparseFormatError::BadRowIndex)
    );
}

#[test]
fn test_rows_sequential() {
    let colind = [0, 3, 4];
    assert!(rows_sequential(&colind, &[0, 1, 2, 0], true));
    assert!(!rows_sequential(&colind, &[0, 1, 1, 0], true));
    assert!(rows_sequential(&colind, &[0, 1, 1, 0], false));
    assert!(!rows_sequential(&colind, &[0, 2, 1, 0], false));

    // sortedness is only required within a column
    assert!(rows_sequential(&colind, &[1, 2, 3, 0], true));
}

#[test]
fn test_from_raw() {
    // fully dense data lands on the dense pattern
    let sp = Sparsity::from_raw(2, 2, &[0, 2, 4], &[0, 1, 0, 1]);
    assert!(sp.is_same(&Sparsity::dense(2, 2)));

    // [x ⋅ ]
    // [⋅ x ]
    let sp = Sparsity::from_raw(2, 2, &[0, 1, 2], &[0, 1]);
    assert!(sp.is_same(&Sparsity::diag(2, 2)));
    assert_eq!(sp.nnz(), 2);

    // no overflow when the element count exceeds usize
    let sp = Sparsity::from_raw(usize::MAX, 2, &[0, 0, 1], &[7]);
    assert_eq!(sp.nnz(), 1);
    assert_eq!(sp.row(), &[7]);
}

#[test]
#[should_panic]
fn test_from_raw_malformed() {
    Sparsity::from_raw(2, 2, &[0, 1, 2], &[1, 2]);
}

#[test]
fn test_shape_queries() {
    // [x x ⋅ ]
    // [⋅ x x ]
    // [⋅ ⋅ x ]
    let sp = Sparsity::new(3, 3, vec![0, 1, 3, 5], vec![0, 0, 1, 1, 2]);

    assert!(sp.is_triu());
    assert!(!sp.is_tril());
    assert!(!sp.is_diag());
    assert_eq!(sp.nnz_upper(false), 5);
    assert_eq!(sp.nnz_upper(true), 2);
    assert_eq!(sp.nnz_lower(false), 3);
    assert_eq!(sp.nnz_diag(), 3);
    assert_eq!(sp.bw_upper(), 1);
    assert_eq!(sp.bw_lower(), 0);
    assert_eq!(sp.get_col(), vec![0, 1, 1, 2, 2]);
    assert_eq!(sp.to_string(), "3x3,5nz");
    assert_eq!(Sparsity::dense(3, 4).to_string(), "3x4");
    assert!(Sparsity::diag(4, 4).is_diag());
}
