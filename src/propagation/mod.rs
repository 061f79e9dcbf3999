//! Bit-parallel dependency propagation through structural products.
//!
//! Every stored entry carries a bit vector of the seed directions it
//! depends on.  The kernels push these bits through `z = x * y` using
//! only the patterns of `x`, `y` and `z`, which is how the pattern of a
//! derivative is inferred before any numeric evaluation.  The same is
//! done for a linear solve with [`Sparsity::spsolve`].

mod bitvec;
mod solve;

pub use bitvec::*;

use crate::sparsity::{Sparsity, SparsityError};

fn check_mul_dims(
    context: &'static str,
    x_sp: &Sparsity,
    y_sp: &Sparsity,
    z_sp: &Sparsity,
) -> Result<(), SparsityError> {
    if x_sp.ncol() != y_sp.nrow() {
        return Err(SparsityError::mismatch(context, x_sp.size(), y_sp.size()));
    }
    if z_sp.nrow() != x_sp.nrow() || z_sp.ncol() != y_sp.ncol() {
        return Err(SparsityError::mismatch(
            context,
            z_sp.size(),
            (x_sp.nrow(), y_sp.ncol()),
        ));
    }
    Ok(())
}

fn check_lengths<T>(context: &'static str, v: &[T], sp: &Sparsity) {
    assert_eq!(
        v.len(),
        sp.nnz(),
        "{}: bit vector length does not match {}",
        context,
        sp
    );
}

impl Sparsity {
    /// Forward propagation through `z += x * y`.
    ///
    /// Every nonzero of `z` receives the bits of all `x` and `y` entries
    /// in its product-sum, on top of its own.  `w` is scratch space with
    /// at least `z_sp.nrow()` entries.
    ///
    /// # Panics
    /// Panics if a bit vector length differs from the nonzero count of
    /// its pattern, or if `w` is too short.
    pub fn mul_sparsity_fwd<T: BitVecT>(
        x: &[T],
        x_sp: &Sparsity,
        y: &[T],
        y_sp: &Sparsity,
        z: &mut [T],
        z_sp: &Sparsity,
        w: &mut [T],
    ) -> Result<(), SparsityError> {
        const CONTEXT: &str = "Sparsity::mul_sparsity_fwd";
        check_mul_dims(CONTEXT, x_sp, y_sp, z_sp)?;
        check_lengths(CONTEXT, x, x_sp);
        check_lengths(CONTEXT, y, y_sp);
        check_lengths(CONTEXT, z, z_sp);
        assert!(w.len() >= z_sp.nrow(), "{}: work vector too short", CONTEXT);

        let (x_colind, x_row) = (x_sp.colind(), x_sp.row());
        let (y_colind, y_row) = (y_sp.colind(), y_sp.row());
        let (z_colind, z_row) = (z_sp.colind(), z_sp.row());

        for cc in 0..z_sp.ncol() {
            // dense column of z
            for kk in z_colind[cc]..z_colind[cc + 1] {
                w[z_row[kk]] = z[kk];
            }

            for kk in y_colind[cc]..y_colind[cc + 1] {
                let rr = y_row[kk];
                let yy = y[kk];
                for kk1 in x_colind[rr]..x_colind[rr + 1] {
                    w[x_row[kk1]] = w[x_row[kk1]] | x[kk1] | yy;
                }
            }

            // back to the sparse column
            for kk in z_colind[cc]..z_colind[cc + 1] {
                z[kk] = w[z_row[kk]];
            }
        }
        Ok(())
    }

    /// Reverse propagation through `z += x * y`.
    ///
    /// Every `x` and `y` entry receives the bits of the `z` nonzeros its
    /// product-sums contribute to.  `z` is left unchanged.  `w` is
    /// scratch space with at least `z_sp.nrow()` entries.
    ///
    /// # Panics
    /// Panics if a bit vector length differs from the nonzero count of
    /// its pattern, or if `w` is too short.
    pub fn mul_sparsity_rev<T: BitVecT>(
        x: &mut [T],
        x_sp: &Sparsity,
        y: &mut [T],
        y_sp: &Sparsity,
        z: &mut [T],
        z_sp: &Sparsity,
        w: &mut [T],
    ) -> Result<(), SparsityError> {
        const CONTEXT: &str = "Sparsity::mul_sparsity_rev";
        check_mul_dims(CONTEXT, x_sp, y_sp, z_sp)?;
        check_lengths(CONTEXT, x, x_sp);
        check_lengths(CONTEXT, y, y_sp);
        check_lengths(CONTEXT, z, z_sp);
        assert!(w.len() >= z_sp.nrow(), "{}: work vector too short", CONTEXT);

        let (x_colind, x_row) = (x_sp.colind(), x_sp.row());
        let (y_colind, y_row) = (y_sp.colind(), y_sp.row());
        let (z_colind, z_row) = (z_sp.colind(), z_sp.row());

        for cc in 0..z_sp.ncol() {
            for kk in z_colind[cc]..z_colind[cc + 1] {
                w[z_row[kk]] = z[kk];
            }

            for kk in y_colind[cc]..y_colind[cc + 1] {
                let rr = y_row[kk];
                let mut yy = T::zero();
                for kk1 in x_colind[rr]..x_colind[rr + 1] {
                    let seed = w[x_row[kk1]];
                    yy = yy | seed;
                    x[kk1] = x[kk1] | seed;
                }
                y[kk] = y[kk] | yy;
            }

            for kk in z_colind[cc]..z_colind[cc + 1] {
                z[kk] = w[z_row[kk]];
            }
        }
        Ok(())
    }
}
