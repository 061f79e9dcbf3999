//---------------------------------------------------------
// merging of two patterns of equal shape: union,
// intersection and one-sided differences.
//---------------------------------------------------------

use super::{Sparsity, SparsityError};
use std::ops::{Add, Mul};

/// Mapping bit: position is nonzero in the left operand
pub const MAP_IN_X: u8 = 1;
/// Mapping bit: position is nonzero in the right operand
pub const MAP_IN_Y: u8 = 2;
/// Mapping bit: position was dropped from the result
pub const MAP_DROPPED: u8 = 4;

impl Sparsity {
    /// Merge two patterns.
    ///
    /// Visits every position that is nonzero in `self` or in `y`.
    /// A position nonzero only in `y` is dropped if `f0x_is_zero`, one
    /// nonzero only in `self` is dropped if `fx0_is_zero`.  Positions
    /// nonzero in both are always kept.  A `1 x 1` operand is broadcast
    /// against the shape of the other one.
    pub fn combine(
        &self,
        y: &Sparsity,
        f0x_is_zero: bool,
        fx0_is_zero: bool,
    ) -> Result<Sparsity, SparsityError> {
        self.combine_with_mapping(y, f0x_is_zero, fx0_is_zero)
            .map(|(sp, _)| sp)
    }

    /// As [`Sparsity::combine`], also returning one classification byte
    /// per visited position, built from [`MAP_IN_X`], [`MAP_IN_Y`] and
    /// [`MAP_DROPPED`].
    pub fn combine_with_mapping(
        &self,
        y: &Sparsity,
        f0x_is_zero: bool,
        fx0_is_zero: bool,
    ) -> Result<(Sparsity, Vec<u8>), SparsityError> {
        let (x, y) = broadcast(self, y)?;

        // quick return if identical
        if x.is_same(&y) {
            return Ok((x.clone(), vec![MAP_IN_X | MAP_IN_Y; x.nnz()]));
        }

        let (nrow, ncol) = x.size();
        let (x_colind, x_row) = (x.colind(), x.row());
        let (y_colind, y_row) = (y.colind(), y.row());

        let mut colind = vec![0; ncol + 1];
        let mut row = Vec::with_capacity(x.nnz().max(y.nnz()));
        let mut mapping = Vec::with_capacity(x.nnz() + y.nnz());

        for cc in 0..ncol {
            let (mut el1, el1_last) = (x_colind[cc], x_colind[cc + 1]);
            let (mut el2, el2_last) = (y_colind[cc], y_colind[cc + 1]);

            while el1 < el1_last || el2 < el2_last {
                let row1 = if el1 < el1_last { x_row[el1] } else { nrow };
                let row2 = if el2 < el2_last { y_row[el2] } else { nrow };

                if row1 == row2 {
                    row.push(row1);
                    mapping.push(MAP_IN_X | MAP_IN_Y);
                    el1 += 1;
                    el2 += 1;
                } else if row1 < row2 {
                    if fx0_is_zero {
                        mapping.push(MAP_IN_X | MAP_DROPPED);
                    } else {
                        row.push(row1);
                        mapping.push(MAP_IN_X);
                    }
                    el1 += 1;
                } else {
                    if f0x_is_zero {
                        mapping.push(MAP_IN_Y | MAP_DROPPED);
                    } else {
                        row.push(row2);
                        mapping.push(MAP_IN_Y);
                    }
                    el2 += 1;
                }
            }
            colind[cc + 1] = row.len();
        }

        Ok((Sparsity::intern(nrow, ncol, colind, row), mapping))
    }

    /// Union of the nonzeros of two patterns
    pub fn unite(&self, y: &Sparsity) -> Result<Sparsity, SparsityError> {
        self.combine(y, false, false)
    }

    /// Intersection of the nonzeros of two patterns
    pub fn intersect(&self, y: &Sparsity) -> Result<Sparsity, SparsityError> {
        self.combine(y, true, true)
    }
}

// expand a 1 x 1 operand to the shape of the other one
fn broadcast(x: &Sparsity, y: &Sparsity) -> Result<(Sparsity, Sparsity), SparsityError> {
    if x.size() == y.size() {
        return Ok((x.clone(), y.clone()));
    }
    let expand = |s: &Sparsity, (nrow, ncol): (usize, usize)| {
        if s.is_dense() {
            Sparsity::dense(nrow, ncol)
        } else {
            Sparsity::zeros(nrow, ncol)
        }
    };
    if x.is_scalar(false) {
        Ok((expand(x, y.size()), y.clone()))
    } else if y.is_scalar(false) {
        Ok((x.clone(), expand(y, x.size())))
    } else {
        Err(SparsityError::mismatch("Sparsity::combine", x.size(), y.size()))
    }
}

impl Add for &Sparsity {
    type Output = Sparsity;

    /// Union of two patterns.
    ///
    /// # Panics
    /// Panics if the shapes are not broadcast compatible.
    fn add(self, rhs: &Sparsity) -> Sparsity {
        match self.unite(rhs) {
            Ok(sp) => sp,
            Err(e) => panic!("{}", e),
        }
    }
}

impl Mul for &Sparsity {
    type Output = Sparsity;

    /// Intersection of two patterns.
    ///
    /// # Panics
    /// Panics if the shapes are not broadcast compatible.
    fn mul(self, rhs: &Sparsity) -> Sparsity {
        match self.intersect(rhs) {
            Ok(sp) => sp,
            Err(e) => panic!("{}", e),
        }
    }
}
