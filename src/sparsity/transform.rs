use itertools::Itertools;

use super::utils::colcount_to_colind;
use super::{Sparsity, SparsityError};

impl Sparsity {
    /// Transpose with a mapping from each nonzero of the result to the
    /// nonzero of `self` it came from.
    pub fn transpose(&self) -> (Sparsity, Vec<usize>) {
        self.transpose_with_mapping(false)
    }

    /// Transpose.  With `invert_mapping` the mapping instead holds, for
    /// each nonzero of `self`, its offset in the result.
    pub fn transpose_with_mapping(&self, invert_mapping: bool) -> (Sparsity, Vec<usize>) {
        let (nrow, ncol, nnz) = (self.nrow(), self.ncol(), self.nnz());

        // row counts become column offsets of the transpose
        let mut colind = vec![0; nrow + 1];
        self.row().iter().for_each(|&r| colind[r + 1] += 1);
        colcount_to_colind(&mut colind);

        let mut next = colind[..nrow].to_vec();
        let mut row = vec![0; nnz];
        let mut mapping = vec![0; nnz];
        for (k, (r, c)) in self.entries().enumerate() {
            let dest = next[r];
            next[r] += 1;
            row[dest] = c;
            if invert_mapping {
                mapping[k] = dest;
            } else {
                mapping[dest] = k;
            }
        }

        (Sparsity::intern(ncol, nrow, colind, row), mapping)
    }

    /// transpose, discarding the mapping
    pub fn t(&self) -> Sparsity {
        self.transpose().0
    }

    /// true if `y` is the transpose of `self`
    pub fn is_transpose(&self, y: &Sparsity) -> bool {
        self.nrow() == y.ncol() && self.ncol() == y.nrow() && self.nnz() == y.nnz() && self.t() == *y
    }

    /// true if the pattern is square and equal to its transpose
    pub fn is_symmetric(&self) -> bool {
        self.is_square() && self.is_transpose(self)
    }

    /// Lower triangular part
    pub fn tril(&self, include_diagonal: bool) -> Sparsity {
        self.filter_entries(|r, c| r > c || (include_diagonal && r == c))
    }

    /// Upper triangular part
    pub fn triu(&self, include_diagonal: bool) -> Sparsity {
        self.filter_entries(|r, c| r < c || (include_diagonal && r == c))
    }

    // sub-pattern of the entries for which keep(row,col) holds
    fn filter_entries<F>(&self, keep: F) -> Sparsity
    where
        F: Fn(usize, usize) -> bool,
    {
        let mut colind = vec![0; self.ncol() + 1];
        let mut row = Vec::with_capacity(self.nnz());
        for (r, c) in self.entries().filter(|&(r, c)| keep(r, c)) {
            row.push(r);
            colind[c + 1] += 1;
        }
        colcount_to_colind(&mut colind);
        Sparsity::intern(self.nrow(), self.ncol(), colind, row)
    }

    /// Permute rows and/or columns.
    ///
    /// An entry in row `r` (column `c`) moves to row `p[r]` (column
    /// `p[c]`).  With `invert_permutation` the inverse of `p` is applied,
    /// so that row `k` of the result is row `p[k]` of `self`.
    pub fn pmult(
        &self,
        p: &[usize],
        permute_rows: bool,
        permute_columns: bool,
        invert_permutation: bool,
    ) -> Result<Sparsity, SparsityError> {
        if permute_rows && p.len() != self.nrow() {
            return Err(SparsityError::IncompatibleLength {
                context: "Sparsity::pmult rows",
                expected: self.nrow(),
                got: p.len(),
            });
        }
        if permute_columns && p.len() != self.ncol() {
            return Err(SparsityError::IncompatibleLength {
                context: "Sparsity::pmult columns",
                expected: self.ncol(),
                got: p.len(),
            });
        }

        invperm(p)?;
        Ok(self.pmult_unchecked(p, permute_rows, permute_columns, invert_permutation))
    }

    // pmult for a `p` already known to be a permutation of matching length
    pub(crate) fn pmult_unchecked(
        &self,
        p: &[usize],
        permute_rows: bool,
        permute_columns: bool,
        invert_permutation: bool,
    ) -> Sparsity {
        let mut pinv = vec![0; p.len()];
        p.iter().enumerate().for_each(|(i, &j)| pinv[j] = i);
        let pp = if invert_permutation { &pinv } else { p };

        let (rows, cols): (Vec<usize>, Vec<usize>) = self
            .entries()
            .map(|(r, c)| {
                let r = if permute_rows { pp[r] } else { r };
                let c = if permute_columns { pp[c] } else { c };
                (r, c)
            })
            .unzip();

        Sparsity::triplet_unchecked(self.nrow(), self.ncol(), &rows, &cols, false).0
    }

    /// Reinterpret the column major element order with a new shape.
    pub fn reshape(&self, nrow: usize, ncol: usize) -> Result<Sparsity, SparsityError> {
        if nrow * ncol != self.numel() {
            return Err(SparsityError::mismatch(
                "Sparsity::reshape",
                self.size(),
                (nrow, ncol),
            ));
        }
        if (nrow, ncol) == self.size() {
            return Ok(self.clone());
        }
        let (rows, cols): (Vec<usize>, Vec<usize>) =
            self.find().into_iter().map(|k| (k % nrow, k / nrow)).unzip();
        Ok(Sparsity::triplet_unchecked(nrow, ncol, &rows, &cols, false).0)
    }

    /// Change the shape, dropping entries outside the new bounds.
    pub fn resize(&mut self, nrow: usize, ncol: usize) {
        if self.size() == (nrow, ncol) {
            return;
        }
        let mut colind = vec![0; ncol + 1];
        let mut row = Vec::new();
        for cc in 0..ncol.min(self.ncol()) {
            let rng = self.colind()[cc]..self.colind()[cc + 1];
            row.extend(self.row()[rng].iter().take_while(|&&r| r < nrow));
            colind[cc + 1] = row.len();
        }
        for cc in self.ncol().min(ncol)..ncol {
            colind[cc + 1] = row.len();
        }
        *self = Sparsity::intern(nrow, ncol, colind, row);
    }

    /// Pattern of the Kronecker product
    pub fn kron(a: &Sparsity, b: &Sparsity) -> Sparsity {
        let (a_nrow, a_ncol) = a.size();
        let (b_nrow, b_ncol) = b.size();
        if a.is_dense() && b.is_dense() {
            return Sparsity::dense(a_nrow * b_nrow, a_ncol * b_ncol);
        }

        let mut colind = Vec::with_capacity(a_ncol * b_ncol + 1);
        let mut row = Vec::with_capacity(a.nnz() * b.nnz());
        colind.push(0);
        for (a_cc, b_cc) in (0..a_ncol).cartesian_product(0..b_ncol) {
            let a_rows = &a.row()[a.colind()[a_cc]..a.colind()[a_cc + 1]];
            let b_rows = &b.row()[b.colind()[b_cc]..b.colind()[b_cc + 1]];
            for &a_r in a_rows {
                row.extend(b_rows.iter().map(|&b_r| a_r * b_nrow + b_r));
            }
            colind.push(row.len());
        }
        Sparsity::intern(a_nrow * b_nrow, a_ncol * b_ncol, colind, row)
    }

    /// Diagonal extraction, or diagonal construction from a vector.
    ///
    /// For a vector of length `n` the result is the `n x n` diagonal
    /// pattern with the vector's nonzeros on the diagonal.  Otherwise the
    /// result is a column holding the diagonal entries.  The mapping gives,
    /// for each nonzero of the result, its offset in `self`.
    pub fn get_diag(&self) -> (Sparsity, Vec<usize>) {
        if self.is_column() && !self.is_scalar(false) {
            let n = self.nrow();
            let rows = self.get_row();
            let (sp, _) = Sparsity::triplet_unchecked(n, n, &rows, &rows, false);
            return (sp, (0..self.nnz()).collect());
        }
        if self.is_row() && !self.is_scalar(false) {
            let n = self.ncol();
            let cols = self.get_col();
            let (sp, _) = Sparsity::triplet_unchecked(n, n, &cols, &cols, false);
            return (sp, (0..self.nnz()).collect());
        }

        let n = self.nrow().min(self.ncol());
        let mut row = Vec::new();
        let mut mapping = Vec::new();
        for i in 0..n {
            if let Some(k) = self.locate(i, i) {
                row.push(i);
                mapping.push(k);
            }
        }
        let colind = vec![0, row.len()];
        (Sparsity::intern(n, 1, colind, row), mapping)
    }

    /// Dense pattern of the same shape, with the column major linear
    /// index of every nonzero of `self`.
    pub fn make_dense(&self) -> (Sparsity, Vec<usize>) {
        (Sparsity::dense(self.nrow(), self.ncol()), self.find())
    }

    /// Pattern of the matrix product `x * y`
    pub fn mtimes(x: &Sparsity, y: &Sparsity) -> Result<Sparsity, SparsityError> {
        if x.ncol() != y.nrow() {
            return Err(SparsityError::mismatch("Sparsity::mtimes", x.size(), y.size()));
        }
        let (nrow, ncol) = (x.nrow(), y.ncol());

        // mark[r] == j once row r has been added to column j
        let mut mark = vec![usize::MAX; nrow];
        let mut colind = vec![0; ncol + 1];
        let mut row = Vec::new();
        for j in 0..ncol {
            let start = row.len();
            for &k in &y.row()[y.colind()[j]..y.colind()[j + 1]] {
                for &r in &x.row()[x.colind()[k]..x.colind()[k + 1]] {
                    if mark[r] != j {
                        mark[r] = j;
                        row.push(r);
                    }
                }
            }
            row[start..].sort_unstable();
            colind[j + 1] = row.len();
        }
        Ok(Sparsity::intern(nrow, ncol, colind, row))
    }

    /// Number of nonzeros in the pattern of `x * a`, without forming it.
    pub fn norm_0_mul(x: &Sparsity, a: &Sparsity) -> Result<usize, SparsityError> {
        if x.ncol() != a.nrow() {
            return Err(SparsityError::mismatch("Sparsity::norm_0_mul", x.size(), a.size()));
        }

        let mut mark = vec![usize::MAX; x.nrow()];
        let mut nnz = 0;
        for j in 0..a.ncol() {
            for &k in &a.row()[a.colind()[j]..a.colind()[j + 1]] {
                for &r in &x.row()[x.colind()[k]..x.colind()[k + 1]] {
                    if mark[r] != j {
                        mark[r] = j;
                        nnz += 1;
                    }
                }
            }
        }
        Ok(nnz)
    }

    /// Complement: every structural zero becomes a nonzero and vice versa.
    pub fn pattern_inverse(&self) -> Sparsity {
        let (nrow, ncol) = self.size();
        let mut colind = vec![0; ncol + 1];
        let mut row = Vec::with_capacity(self.numel() - self.nnz());
        for cc in 0..ncol {
            let mut present = self.row()[self.colind()[cc]..self.colind()[cc + 1]]
                .iter()
                .peekable();
            for rr in 0..nrow {
                if present.next_if_eq(&&rr).is_none() {
                    row.push(rr);
                }
            }
            colind[cc + 1] = row.len();
        }
        Sparsity::intern(nrow, ncol, colind, row)
    }
}

/// Inverse of a permutation vector.
pub fn invperm(p: &[usize]) -> Result<Vec<usize>, SparsityError> {
    let mut b = vec![usize::MAX; p.len()];
    for (i, &j) in p.iter().enumerate() {
        if j < p.len() && b[j] == usize::MAX {
            b[j] = i;
        } else {
            return Err(SparsityError::InvalidPermutation);
        }
    }
    Ok(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    // [x ⋅ x ⋅ ]
    // [⋅ ⋅ x x ]
    // [x ⋅ ⋅ x ]
    fn test_pattern() -> Sparsity {
        Sparsity::new(3, 4, vec![0, 2, 2, 4, 6], vec![0, 2, 0, 1, 1, 2])
    }

    #[test]
    fn test_transpose() {
        let a = test_pattern();
        let (at, map) = a.transpose();
        assert_eq!(at.size(), (4, 3));
        assert_eq!(at.colind(), &[0, 2, 4, 6]);
        assert_eq!(at.row(), &[0, 2, 2, 3, 0, 3]);
        assert_eq!(map, vec![0, 2, 3, 4, 1, 5]);

        let (_, inv) = a.transpose_with_mapping(true);
        for (k, &m) in map.iter().enumerate() {
            assert_eq!(inv[m], k);
        }
        assert!(at.t().is_same(&a));
        assert!(a.is_transpose(&at));
    }

    #[test]
    fn test_triangular_parts() {
        let a = Sparsity::dense(3, 3);
        assert!(a.tril(true).is_same(&Sparsity::lower(3)));
        assert!(a.triu(true).is_same(&Sparsity::upper(3)));
        assert_eq!(a.tril(false).nnz(), 3);
        assert!(Sparsity::upper(3).unite(&Sparsity::lower(3)).unwrap().is_symmetric());
    }

    #[test]
    fn test_pmult() {
        // move row 0 to the bottom
        let a = Sparsity::unit(3, 0);
        let b = a.pmult(&[2, 0, 1], true, false, false).unwrap();
        assert_eq!(b.row(), &[2]);
        let c = a.pmult(&[2, 0, 1], true, false, true).unwrap();
        assert_eq!(c.row(), &[1]);
        assert_eq!(
            a.pmult(&[0, 0, 1], true, false, false),
            Err(SparsityError::InvalidPermutation)
        );
    }

    #[test]
    fn test_reshape_and_resize() {
        let a = test_pattern();
        let r = a.reshape(6, 2).unwrap();
        assert_eq!(r.find(), a.find());
        assert!(a.reshape(5, 2).is_err());

        let mut s = a.clone();
        s.resize(2, 5);
        assert_eq!(s.colind(), &[0, 1, 1, 3, 4, 4]);
        assert_eq!(s.row(), &[0, 0, 1, 1]);
    }

    #[test]
    fn test_kron() {
        let k = Sparsity::kron(&Sparsity::diag(2, 2), &Sparsity::dense(2, 1));
        assert_eq!(k.size(), (4, 2));
        assert_eq!(k.row(), &[0, 1, 2, 3]);
        assert_eq!(k.colind(), &[0, 2, 4]);
    }

    #[test]
    fn test_get_diag() {
        let a = test_pattern();
        let (d, map) = a.get_diag();
        assert_eq!(d.size(), (3, 1));
        assert_eq!(d.row(), &[0]);
        assert_eq!(map, vec![0]);

        let v = Sparsity::new(3, 1, vec![0, 2], vec![0, 2]);
        let (dv, _) = v.get_diag();
        assert_eq!(dv.size(), (3, 3));
        assert_eq!(dv.find(), vec![0, 8]);
    }

    #[test]
    fn test_mtimes() {
        // [x ⋅ ]   [⋅ x ]   [⋅ x ]
        // [x x ] * [x ⋅ ] = [x x ]
        let x = Sparsity::new(2, 2, vec![0, 2, 3], vec![0, 1, 1]);
        let y = Sparsity::new(2, 2, vec![0, 1, 2], vec![1, 0]);
        let z = Sparsity::mtimes(&x, &y).unwrap();
        assert_eq!(z.colind(), &[0, 1, 3]);
        assert_eq!(z.row(), &[1, 0, 1]);
        assert!(Sparsity::mtimes(&x, &Sparsity::dense(3, 1)).is_err());
    }

    #[test]
    fn test_norm_0_mul() {
        let x = Sparsity::new(2, 2, vec![0, 2, 3], vec![0, 1, 1]);
        let y = Sparsity::new(2, 2, vec![0, 1, 2], vec![1, 0]);
        assert_eq!(Sparsity::norm_0_mul(&x, &y), Ok(3));

        let a = test_pattern();
        let expected = Sparsity::mtimes(&a.t(), &a).unwrap().nnz();
        assert_eq!(Sparsity::norm_0_mul(&a.t(), &a), Ok(expected));
        assert!(Sparsity::norm_0_mul(&a, &a).is_err());
    }

    #[test]
    fn test_pattern_inverse() {
        // [⋅ x ⋅ x ]
        // [x x ⋅ ⋅ ]
        // [⋅ x x ⋅ ]
        let inv = test_pattern().pattern_inverse();
        assert_eq!(inv.colind(), &[0, 1, 4, 5, 6]);
        assert_eq!(inv.row(), &[1, 0, 1, 2, 2, 0]);
        assert!(inv.pattern_inverse().is_same(&test_pattern()));

        assert!(Sparsity::dense(2, 3).pattern_inverse().is_same(&Sparsity::zeros(2, 3)));
        assert!(Sparsity::zeros(2, 3).pattern_inverse().is_same(&Sparsity::dense(2, 3)));
    }

    #[test]
    fn test_invperm() {
        assert_eq!(invperm(&[2, 0, 1]), Ok(vec![1, 2, 0]));
        assert!(invperm(&[0, 3, 1]).is_err());
    }
}
