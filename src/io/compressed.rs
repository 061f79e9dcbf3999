use crate::sparsity::{Sparsity, SparsityError};

impl Sparsity {
    /// Single-array form `[nrow, ncol, colind(0..=ncol), row(0..nnz)]`.
    pub fn compress(&self) -> Vec<usize> {
        let mut v = Vec::with_capacity(3 + self.ncol() + self.nnz());
        v.push(self.nrow());
        v.push(self.ncol());
        v.extend_from_slice(self.colind());
        v.extend_from_slice(self.row());
        v
    }

    /// Pattern from its single-array form.
    ///
    /// A dense pattern may omit the row indices entirely, in which case
    /// `v` ends after `colind`.
    pub fn compressed(v: &[usize]) -> Result<Sparsity, SparsityError> {
        if v.len() < 2 {
            return Err(SparsityError::IncompatibleLength {
                context: "Sparsity::compressed header",
                expected: 2,
                got: v.len(),
            });
        }
        let (nrow, ncol) = (v[0], v[1]);
        let row_start = ncol
            .checked_add(3)
            .filter(|&s| s <= v.len())
            .ok_or(SparsityError::IncompatibleLength {
                context: "Sparsity::compressed colind",
                expected: ncol.saturating_add(3),
                got: v.len(),
            })?;
        let colind = &v[2..row_start];
        let nnz = colind[ncol];

        let dense = v.len() == row_start && nrow.checked_mul(ncol) == Some(nnz);
        if dense {
            return Ok(Sparsity::dense(nrow, ncol));
        }
        if v.len() != row_start.saturating_add(nnz) {
            return Err(SparsityError::IncompatibleLength {
                context: "Sparsity::compressed row",
                expected: row_start.saturating_add(nnz),
                got: v.len(),
            });
        }
        let row = &v[row_start..];
        Ok(Sparsity::try_new(nrow, ncol, colind.to_vec(), row.to_vec())?)
    }
}
