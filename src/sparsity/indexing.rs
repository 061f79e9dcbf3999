use super::utils::wrap_index;
use super::{Sparsity, SparsityError};
use itertools::Itertools;

impl Sparsity {
    /// Row index of the nonzero at storage offset `el`.
    pub fn row_at(&self, el: usize) -> Result<usize, SparsityError> {
        self.row()
            .get(el)
            .copied()
            .ok_or_else(|| SparsityError::out_of_range("Sparsity::row_at", el as isize, self.nnz()))
    }

    /// Column offset `cc` for `cc` in `[0, ncol]`.
    pub fn colind_at(&self, cc: usize) -> Result<usize, SparsityError> {
        self.colind().get(cc).copied().ok_or_else(|| {
            SparsityError::out_of_range("Sparsity::colind_at", cc as isize, self.ncol() + 1)
        })
    }

    /// Storage offset of the entry `(rr,cc)`, or `None` if it is
    /// structurally zero.  Negative indices count from the end.
    pub fn get_nz(&self, rr: isize, cc: isize) -> Result<Option<usize>, SparsityError> {
        let rr = wrap_index("Sparsity::get_nz row", rr, self.nrow())?;
        let cc = wrap_index("Sparsity::get_nz column", cc, self.ncol())?;
        Ok(self.locate(rr, cc))
    }

    // lookup without bounds checks on (rr,cc)
    pub(crate) fn locate(&self, rr: usize, cc: usize) -> Option<usize> {
        let start = self.colind()[cc];
        let stop = self.colind()[cc + 1];
        self.row()[start..stop]
            .binary_search(&rr)
            .ok()
            .map(|k| start + k)
    }

    /// true if `(rr,cc)` is a structural nonzero
    pub fn has_nz(&self, rr: isize, cc: isize) -> Result<bool, SparsityError> {
        Ok(self.get_nz(rr, cc)?.is_some())
    }

    /// Storage offsets of every combination of `rr` and `cc`, column
    /// major, `None` for structural zeros.
    pub fn get_nz_list(
        &self,
        rr: &[isize],
        cc: &[isize],
    ) -> Result<Vec<Option<usize>>, SparsityError> {
        let mut out = Vec::with_capacity(rr.len() * cc.len());
        for &c in cc {
            for &r in rr {
                out.push(self.get_nz(r, c)?);
            }
        }
        Ok(out)
    }

    /// Column major linear index of every nonzero.
    pub fn find(&self) -> Vec<usize> {
        let nrow = self.nrow();
        self.entries().map(|(r, c)| r + c * nrow).collect()
    }

    /// Storage offsets of the nonzeros on or below the diagonal.
    pub fn get_lower(&self) -> Vec<usize> {
        self.entries().positions(|(r, c)| r >= c).collect()
    }

    /// Storage offsets of the nonzeros on or above the diagonal.
    pub fn get_upper(&self) -> Vec<usize> {
        self.entries().positions(|(r, c)| r <= c).collect()
    }

    /// Storage offsets of linear (column major) indices, `None` for
    /// structural zeros.
    pub fn get_nz_linear(&self, indices: &[usize]) -> Result<Vec<Option<usize>>, SparsityError> {
        let numel = self.numel();
        indices
            .iter()
            .map(|&k| {
                if k >= numel {
                    return Err(SparsityError::out_of_range(
                        "Sparsity::get_nz_linear",
                        k as isize,
                        numel,
                    ));
                }
                Ok(self.locate(k % self.nrow(), k / self.nrow()))
            })
            .collect()
    }

    /// Make `(rr,cc)` a structural nonzero and return its storage offset.
    ///
    /// Negative indices count from the end.  If the entry already exists,
    /// its offset is returned and the pattern is unchanged.  Otherwise the
    /// handle is rebound to a new interned pattern containing the entry.
    pub fn add_nz(&mut self, rr: isize, cc: isize) -> Result<usize, SparsityError> {
        let rr = wrap_index("Sparsity::add_nz row", rr, self.nrow())?;
        let cc = wrap_index("Sparsity::add_nz column", cc, self.ncol())?;

        // dense patterns already contain every entry
        if self.is_dense() {
            return Ok(rr + cc * self.nrow());
        }

        let nnz = self.nnz();
        let colind = self.colind();
        let row = self.row();

        // quick return if the element goes at the end of storage
        if colind[cc] == nnz || (colind[cc + 1] == nnz && row[nnz - 1] < rr) {
            let mut new_row = Vec::with_capacity(nnz + 1);
            new_row.extend_from_slice(row);
            new_row.push(rr);
            let mut new_colind = self.get_colind();
            new_colind[(cc + 1)..].iter_mut().for_each(|c| *c += 1);
            *self = Sparsity::intern(self.nrow(), self.ncol(), new_colind, new_row);
            return Ok(nnz);
        }

        let start = colind[cc];
        let ind = match row[start..colind[cc + 1]].binary_search(&rr) {
            Ok(k) => return Ok(start + k),
            Err(k) => start + k,
        };

        let mut new_row = self.get_row();
        new_row.insert(ind, rr);
        let mut new_colind = self.get_colind();
        new_colind[(cc + 1)..].iter_mut().for_each(|c| *c += 1);
        *self = Sparsity::intern(self.nrow(), self.ncol(), new_colind, new_row);
        Ok(ind)
    }
}

#[test]
fn test_get_lower_upper() {
    // [x x ⋅ ]
    // [x ⋅ x ]
    // [⋅ x x ]
    let sp = Sparsity::new(3, 3, vec![0, 2, 4, 6], vec![0, 1, 0, 2, 1, 2]);
    assert_eq!(sp.get_lower(), vec![0, 1, 3, 5]);
    assert_eq!(sp.get_upper(), vec![0, 2, 4, 5]);
    assert_eq!(sp.get_lower().len(), sp.nnz_lower(false));

    let u = Sparsity::upper(3);
    assert_eq!(u.get_upper(), (0..u.nnz()).collect::<Vec<_>>());
}

#[test]
fn test_bounds_checked_access() {
    // [x ⋅ ]
    // [⋅ x ]
    let sp = Sparsity::diag(2, 2);
    assert_eq!(sp.row_at(1), Ok(1));
    assert!(matches!(
        sp.row_at(2),
        Err(SparsityError::OutOfRange { index: 2, bound: 2, .. })
    ));
    assert_eq!(sp.colind_at(2), Ok(2));
    assert!(sp.colind_at(3).is_err());
}

#[test]
fn test_get_nz() {
    // [x ⋅ x ]
    // [⋅ ⋅ x ]
    let sp = Sparsity::new(2, 3, vec![0, 1, 1, 3], vec![0, 0, 1]);
    assert_eq!(sp.get_nz(0, 0), Ok(Some(0)));
    assert_eq!(sp.get_nz(1, 0), Ok(None));
    assert_eq!(sp.get_nz(-1, -1), Ok(Some(2)));
    assert!(sp.get_nz(2, 0).is_err());
    assert_eq!(sp.find(), vec![0, 4, 5]);
    assert_eq!(sp.get_nz_linear(&[5, 1]), Ok(vec![Some(2), None]));
}

#[test]
fn test_add_nz_in_middle() {
    // [x ⋅ ]      [x ⋅ ]
    // [⋅ ⋅ ]  ->  [x ⋅ ]
    // [x x ]      [x x ]
    let mut sp = Sparsity::new(3, 2, vec![0, 2, 3], vec![0, 2, 2]);
    let k = sp.add_nz(1, 0).unwrap();
    assert_eq!(k, 1);
    assert_eq!(sp.colind(), &[0, 3, 4]);
    assert_eq!(sp.row(), &[0, 1, 2, 2]);

    // idempotent
    let before = sp.clone();
    assert_eq!(sp.add_nz(1, 0), Ok(1));
    assert!(sp.is_same(&before));
}

#[test]
fn test_add_nz_append_path() {
    let mut sp = Sparsity::zeros(3, 3);
    for (r, c) in [(0, 0), (2, 0), (1, 1), (0, 2), (2, 2)] {
        let k = sp.add_nz(r, c).unwrap();
        assert_eq!(sp.get_nz(r, c), Ok(Some(k)));
        assert_eq!(k, sp.nnz() - 1);
    }
    assert_eq!(sp.colind(), &[0, 2, 3, 5]);
    assert_eq!(sp.row(), &[0, 2, 1, 0, 2]);
}

#[test]
fn test_add_nz_dense() {
    let mut sp = Sparsity::dense(3, 2);
    let before = sp.clone();
    assert_eq!(sp.add_nz(2, 1), Ok(5));
    assert!(sp.is_same(&before));
}
