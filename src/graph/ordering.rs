use crate::sparsity::{Sparsity, SparsityError};

impl Sparsity {
    /// Approximate minimum degree ordering of a square pattern.
    ///
    /// The ordering is computed for the symmetric pattern `A + Aᵀ`.
    /// Returns the permutation `perm` such that `A(perm,perm)` tends to
    /// have a sparse Cholesky factor.
    ///
    /// # Panics
    /// Panics if the pattern is not square.
    pub fn amd(&self) -> Result<Vec<usize>, SparsityError> {
        assert!(
            self.is_square(),
            "Sparsity::amd: pattern must be square, got {}",
            self.dim(false)
        );
        let control = amd::Control::default();
        let (perm, _iperm, _info) = amd::order(self.ncol(), self.colind(), self.row(), &control)
            .map_err(|status| SparsityError::Ordering(format!("{:?}", status)))?;
        log::trace!("amd ordering of {} computed", self);
        Ok(perm)
    }

    /// Symmetric permutation `A(perm,perm)` of a square pattern.
    pub fn permute_symmetric(&self, perm: &[usize]) -> Result<Sparsity, SparsityError> {
        self.pmult(perm, true, true, true)
    }
}

#[test]
fn test_amd_arrow() {
    // arrow pointing up-left: the dense row and column must not go first
    // [x x x x ]
    // [x x ⋅ ⋅ ]
    // [x ⋅ x ⋅ ]
    // [x ⋅ ⋅ x ]
    let arrow = Sparsity::new(
        4,
        4,
        vec![0, 4, 6, 8, 10],
        vec![0, 1, 2, 3, 0, 1, 0, 2, 0, 3],
    );
    let perm = arrow.amd().unwrap();
    let mut sorted = perm.clone();
    sorted.sort();
    assert_eq!(sorted, vec![0, 1, 2, 3]);
    assert_ne!(perm[0], 0);

    let permuted = arrow.permute_symmetric(&perm).unwrap();
    assert_eq!(permuted.nnz(), arrow.nnz());
    assert!(permuted.is_symmetric());
}

#[test]
fn test_permute_symmetric() {
    // [x ⋅ ]      [x x ]
    // [x x ]  ->  [⋅ x ]
    let sp = Sparsity::lower(2);
    let p = sp.permute_symmetric(&[1, 0]).unwrap();
    assert!(p.is_same(&Sparsity::upper(2)));
    assert!(sp.permute_symmetric(&[1, 1]).is_err());
}
