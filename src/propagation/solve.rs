use super::BitVecT;
use crate::sparsity::Sparsity;

impl Sparsity {
    /// Dependency propagation through a linear solve with this pattern.
    ///
    /// With `tr` unset `x` receives, for every unknown of `A x = b`, the
    /// bits of all right-hand side entries it depends on.  With `tr` set
    /// the same is done for `A' x = b`.  All unknowns in one diagonal
    /// block of the block triangular form share their dependencies.
    ///
    /// `x` is overwritten.
    ///
    /// # Panics
    /// Panics if the pattern is not square or if `x` or `b` does not have
    /// one entry per row.
    pub fn spsolve<T: BitVecT>(&self, x: &mut [T], b: &[T], tr: bool) {
        assert!(
            self.is_square(),
            "Sparsity::spsolve: only defined for square patterns, got {}",
            self.dim(false)
        );
        let n = self.ncol();
        assert_eq!(x.len(), n, "Sparsity::spsolve: bad length of x");
        assert_eq!(b.len(), n, "Sparsity::spsolve: bad length of b");

        let f = self.btf();
        let (colind, row) = (self.colind(), self.row());
        x.iter_mut().for_each(|v| *v = T::zero());

        if !tr {
            // A(rowperm, colperm) is block lower triangular, so the rows of
            // block k only couple to unknowns of blocks up to k
            let mut coupled = vec![T::zero(); n];
            for k in 0..f.nb {
                let dep = f.rowperm[f.rowblock[k]..f.rowblock[k + 1]]
                    .iter()
                    .fold(T::zero(), |acc, &rr| acc | b[rr] | coupled[rr]);

                for &cc in &f.colperm[f.colblock[k]..f.colblock[k + 1]] {
                    x[cc] = dep;
                    for &rr in &row[colind[cc]..colind[cc + 1]] {
                        coupled[rr] = coupled[rr] | dep;
                    }
                }
            }
        } else {
            // rows of A are the unknowns, blocks are resolved last to first
            for k in (0..f.nb).rev() {
                let dep = f.colperm[f.colblock[k]..f.colblock[k + 1]]
                    .iter()
                    .fold(T::zero(), |acc, &cc| {
                        row[colind[cc]..colind[cc + 1]]
                            .iter()
                            .fold(acc | b[cc], |acc, &rr| acc | x[rr])
                    });

                for &rr in &f.rowperm[f.rowblock[k]..f.rowblock[k + 1]] {
                    x[rr] = dep;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::propagation::Bvec;
    use crate::sparsity::Sparsity;

    fn seeds(n: usize) -> Vec<Bvec> {
        (0..n).map(|k| 1 << k).collect()
    }

    #[test]
    fn test_spsolve_lower() {
        // forward substitution reaches every later unknown
        let sp = Sparsity::lower(3);
        let mut x = vec![0; 3];
        sp.spsolve(&mut x, &seeds(3), false);
        assert_eq!(x, vec![0b001, 0b011, 0b111]);

        // backward substitution on the transpose
        sp.spsolve(&mut x, &seeds(3), true);
        assert_eq!(x, vec![0b111, 0b110, 0b100]);
    }

    #[test]
    fn test_spsolve_diagonal() {
        let sp = Sparsity::diag(4, 4);
        let mut x = vec![0xff; 4];
        sp.spsolve(&mut x, &seeds(4), false);
        assert_eq!(x, seeds(4));
    }

    #[test]
    fn test_spsolve_decoupled_blocks() {
        // [x ⋅ x ⋅ ]
        // [⋅ x ⋅ x ]
        // [x ⋅ x ⋅ ]
        // [⋅ x ⋅ x ]
        let sp = Sparsity::triplet(4, 4, &[0, 2, 1, 3, 0, 2, 1, 3], &[0, 0, 1, 1, 2, 2, 3, 3])
            .unwrap();
        let mut x = vec![0u8; 4];
        sp.spsolve(&mut x, &[1, 2, 4, 8], false);
        assert_eq!(x, vec![0b0101, 0b1010, 0b0101, 0b1010]);
    }

    #[test]
    fn test_spsolve_transpose_consistent() {
        // [x ⋅ ⋅ x ]
        // [x x ⋅ ⋅ ]
        // [⋅ ⋅ x ⋅ ]
        // [⋅ ⋅ x x ]
        let sp = Sparsity::triplet(4, 4, &[0, 1, 1, 2, 3, 0, 3], &[0, 0, 1, 2, 2, 3, 3]).unwrap();
        let mut x = vec![0; 4];
        let mut xt = vec![0; 4];
        sp.spsolve(&mut x, &seeds(4), true);
        sp.t().spsolve(&mut xt, &seeds(4), false);
        assert_eq!(x, xt);

        // x2 = b2, x3 from b2 and b3, x0 from b0 and x3, x1 from b1 and x0
        sp.spsolve(&mut x, &seeds(4), false);
        assert_eq!(x, vec![0b1101, 0b1111, 0b0100, 0b1100]);
    }

    #[test]
    #[should_panic]
    fn test_spsolve_rectangular() {
        let mut x = vec![0u32; 3];
        Sparsity::dense(3, 2).spsolve(&mut x, &[0; 3], false);
    }
}
